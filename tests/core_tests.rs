use std::collections::BTreeSet;

use approx::assert_abs_diff_eq;
use uuid::Uuid;

use restroom_reviews::models::{Building, Coordinates, RankingOrder, Review};
use restroom_reviews::utils::{
	aggregate_ratings, haversine_distance, nearest_building, sort_by_distance,
};

fn review(location: &str, rating: Option<u8>) -> Review {
	Review {
		review_id: Uuid::new_v4(),
		author: "Anonymous".to_string(),
		author_id: None,
		location: location.to_string(),
		rating,
		comment: String::new(),
		timestamp: None,
		image_url: None,
		is_anonymous: false,
		likes: BTreeSet::new(),
		replies: Vec::new(),
	}
}

fn building(name: &str, coords: Option<(f64, f64)>) -> Building {
	Building {
		name: name.to_string(),
		floors: Vec::new(),
		coordinates: coords.map(|(latitude, longitude)| Coordinates {
			latitude,
			longitude,
		}),
	}
}

#[test]
fn ranking_of_two_locations() {
	let reviews = vec![review("A", Some(5)), review("A", Some(3)), review("B", None)];

	let ratings = aggregate_ratings(&reviews, &[], RankingOrder::Desc);

	assert_eq!(ratings.len(), 2);
	assert_eq!(ratings[0].location, "A");
	assert_abs_diff_eq!(ratings[0].average_rating.unwrap(), 4.0);
	assert_eq!(ratings[0].count, 2);
	assert_eq!(ratings[1].location, "B");
	assert!(ratings[1].average_rating.is_none());
	assert_eq!(ratings[1].count, 1);
}

#[test]
fn ranking_orders_are_monotonic_with_unrated_last() {
	let reviews: Vec<Review> = (0..40)
		.map(|i| {
			let rating = match i % 7 {
				0 => None,
				n => Some((n % 5 + 1) as u8),
			};
			review(&format!("L{}", i % 9), rating)
		})
		.chain([review("Unrated", None)])
		.collect();

	let desc = aggregate_ratings(&reviews, &[], RankingOrder::Desc);
	let asc = aggregate_ratings(&reviews, &[], RankingOrder::Asc);

	for ratings in [&desc, &asc] {
		assert_eq!(ratings.len(), 10);
		assert_eq!(ratings.last().unwrap().location, "Unrated");
	}
	let means = |ratings: &[restroom_reviews::models::LocationRating]| -> Vec<f64> {
		ratings.iter().filter_map(|r| r.average_rating).collect()
	};
	assert!(means(&desc).windows(2).all(|w| w[0] >= w[1]));
	assert!(means(&asc).windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn nearest_of_two_buildings() {
	let registry = vec![building("X", Some((0.0, 0.0))), building("Y", Some((0.0, 1.0)))];

	let nearest = nearest_building(0.0, 0.6, &registry).unwrap();
	assert_eq!(nearest.name, "Y");

	let distances: Vec<f64> = registry
		.iter()
		.map(|b| {
			let c = b.coordinates.unwrap();
			haversine_distance(0.0, 0.6, c.latitude, c.longitude)
		})
		.collect();
	assert!(distances[1] < distances[0]);
}

#[test]
fn closer_query_resolves_to_the_nearer_building() {
	let registry = vec![building("X", Some((0.0, 0.0))), building("Y", Some((0.0, 1.0)))];

	assert_eq!(nearest_building(0.0, 0.4, &registry).unwrap().name, "X");
}

#[test]
fn uncoordinated_buildings_are_never_nearest() {
	let registry = vec![building("AAA", None), building("ZZZ", Some((50.0, 50.0)))];

	assert_eq!(nearest_building(0.0, 0.0, &registry).unwrap().name, "ZZZ");
	assert!(nearest_building(0.0, 0.0, &[building("AAA", None)]).is_none());
	assert!(sort_by_distance(0.0, 0.0, &registry).iter().all(|b| b.building.name != "AAA"));
}
