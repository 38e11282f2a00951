use chrono::SecondsFormat;

use crate::models::{FilteredReply, FilteredReview, Review};

/// Public view of a review for the given viewer. Author ids never leave the service.
pub fn filter_review_record(review: &Review, viewer_id: Option<&str>) -> FilteredReview {
	FilteredReview {
		review_id: review.review_id.to_string(),
		author: review.author.to_owned(),
		location: review.location.to_owned(),
		rating: review.rating,
		comment: review.comment.to_owned(),
		timestamp: review
			.timestamp
			.map(|ts| ts.to_rfc3339_opts(SecondsFormat::Millis, true)),
		image_url: review.image_url.to_owned(),
		is_anonymous: review.is_anonymous,
		likes_count: review.likes.len(),
		liked_by_me: viewer_id.is_some_and(|id| review.likes.contains(id)),
		replies: review
			.replies
			.iter()
			.map(|reply| FilteredReply {
				reply_id: reply.reply_id.to_string(),
				author: reply.author.to_owned(),
				comment: reply.comment.to_owned(),
				timestamp: reply.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
			})
			.collect(),
	}
}
