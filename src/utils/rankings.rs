use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::models::{LocationRating, RankingOrder, Review};

#[derive(Default)]
struct Tally {
	sum: u32,
	rated: usize,
	count: usize,
}

/// Groups reviews by exact location string and ranks them by mean rating.
///
/// Every review counts towards `count`; only valid ratings count towards the
/// mean. Locations in `known_locations` without reviews are included with no
/// mean. Unrated locations always sort last, ties are broken by location.
pub fn aggregate_ratings(
	reviews: &[Review],
	known_locations: &[String],
	order: RankingOrder,
) -> Vec<LocationRating> {
	let mut tallies: BTreeMap<&str, Tally> = BTreeMap::new();

	for location in known_locations {
		tallies.entry(location.as_str()).or_default();
	}

	for review in reviews {
		let tally = tallies.entry(review.location.as_str()).or_default();
		tally.count += 1;
		if let Some(rating) = review.rating.filter(|r| (1..=5).contains(r)) {
			tally.sum += u32::from(rating);
			tally.rated += 1;
		}
	}

	let mut ratings: Vec<LocationRating> = tallies
		.into_iter()
		.map(|(location, tally)| LocationRating {
			location: location.to_string(),
			average_rating: (tally.rated > 0).then(|| f64::from(tally.sum) / tally.rated as f64),
			count: tally.count,
			rated_count: tally.rated,
		})
		.collect();

	ratings.sort_by(|a, b| compare_ratings(a, b, order));
	ratings
}

fn compare_ratings(a: &LocationRating, b: &LocationRating, order: RankingOrder) -> Ordering {
	let by_mean = match (a.average_rating, b.average_rating) {
		(Some(x), Some(y)) => match order {
			RankingOrder::Asc => x.total_cmp(&y),
			RankingOrder::Desc => y.total_cmp(&x),
		},
		(Some(_), None) => Ordering::Less,
		(None, Some(_)) => Ordering::Greater,
		(None, None) => Ordering::Equal,
	};

	by_mean.then_with(|| a.location.cmp(&b.location))
}
