use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
	api::CustomError,
	models::{Reply, Review, ReviewSort},
};

/// Newest first; reviews without a timestamp go last.
fn by_newest(a: &Review, b: &Review) -> Ordering {
	match (a.timestamp, b.timestamp) {
		(Some(x), Some(y)) => y.cmp(&x),
		(Some(_), None) => Ordering::Less,
		(None, Some(_)) => Ordering::Greater,
		(None, None) => Ordering::Equal,
	}
}

pub fn sort_reviews(reviews: &mut [Review], sort: ReviewSort) {
	match sort {
		ReviewSort::Recent => reviews.sort_by(by_newest),
		ReviewSort::Likes => reviews.sort_by(|a, b| {
			b.likes
				.len()
				.cmp(&a.likes.len())
				.then_with(|| by_newest(a, b))
		}),
	}
}

/// Adds the user to the like set or removes them. Returns whether the review is now liked.
pub fn toggle_like(review: &mut Review, user_id: &str) -> bool {
	if review.likes.remove(user_id) {
		false
	} else {
		review.likes.insert(user_id.to_string());
		true
	}
}

/// Only the author of a review may remove it.
pub fn ensure_author(review: &Review, user_id: &str) -> Result<(), CustomError> {
	if review.is_authored_by(user_id) {
		Ok(())
	} else {
		Err(CustomError::Forbidden(
			"You can only delete your own reviews".to_string(),
		))
	}
}

pub fn add_reply(
	review: &mut Review,
	author: &str,
	author_id: &str,
	comment: &str,
	timestamp: DateTime<Utc>,
) -> Reply {
	let reply = Reply {
		reply_id: Uuid::new_v4(),
		author: author.to_string(),
		author_id: author_id.to_string(),
		comment: comment.trim().to_string(),
		timestamp,
	};
	review.replies.push(reply.clone());
	reply
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::TimeZone;
	use std::collections::BTreeSet;

	fn review(location: &str, day: Option<u32>, likes: &[&str]) -> Review {
		Review {
			review_id: Uuid::new_v4(),
			author: "Anonymous".to_string(),
			author_id: None,
			location: location.to_string(),
			rating: Some(3),
			comment: String::new(),
			timestamp: day.map(|d| Utc.with_ymd_and_hms(2025, 3, d, 12, 0, 0).unwrap()),
			image_url: None,
			is_anonymous: false,
			likes: likes.iter().map(|l| l.to_string()).collect::<BTreeSet<_>>(),
			replies: Vec::new(),
		}
	}

	fn locations(reviews: &[Review]) -> Vec<&str> {
		reviews.iter().map(|r| r.location.as_str()).collect()
	}

	#[test]
	fn recent_is_newest_first() {
		let mut reviews = vec![
			review("old", Some(1), &[]),
			review("undated", None, &[]),
			review("new", Some(9), &[]),
		];

		sort_reviews(&mut reviews, ReviewSort::Recent);

		assert_eq!(locations(&reviews), vec!["new", "old", "undated"]);
	}

	#[test]
	fn likes_then_recency() {
		let mut reviews = vec![
			review("a", Some(1), &["u1"]),
			review("b", Some(2), &[]),
			review("c", Some(3), &["u1"]),
			review("d", Some(4), &["u1", "u2"]),
		];

		sort_reviews(&mut reviews, ReviewSort::Likes);

		assert_eq!(locations(&reviews), vec!["d", "c", "a", "b"]);
	}

	#[test]
	fn like_toggles() {
		let mut r = review("a", Some(1), &[]);

		assert!(toggle_like(&mut r, "u1"));
		assert!(r.likes.contains("u1"));
		assert!(!toggle_like(&mut r, "u1"));
		assert!(r.likes.is_empty());
	}

	#[test]
	fn only_the_author_may_delete() {
		let mut r = review("a", Some(1), &[]);
		r.author_id = Some("u1".to_string());

		assert!(ensure_author(&r, "u1").is_ok());
		assert!(matches!(ensure_author(&r, "u2"), Err(CustomError::Forbidden(_))));

		r.author_id = None;
		assert!(matches!(ensure_author(&r, "u1"), Err(CustomError::Forbidden(_))));
		assert!(matches!(ensure_author(&r, ""), Err(CustomError::Forbidden(_))));
	}

	#[test]
	fn forbidden_delete_maps_to_403() {
		use actix_web::{http::StatusCode, ResponseError};

		let r = review("a", Some(1), &[]);
		let err = ensure_author(&r, "u1").unwrap_err();

		assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
	}

	#[test]
	fn replies_are_appended_in_order() {
		let mut r = review("a", Some(1), &[]);
		let now = Utc::now();

		add_reply(&mut r, "Jane", "u1", " first ", now);
		add_reply(&mut r, "Sam", "u2", "second", now);

		assert_eq!(r.replies.len(), 2);
		assert_eq!(r.replies[0].comment, "first");
		assert_eq!(r.replies[1].author, "Sam");
	}
}
