use std::collections::BTreeSet;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

pub const ANONYMOUS: &str = "Anonymous";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Reply {
	pub reply_id: Uuid,
	pub author: String,
	pub author_id: String,
	pub comment: String,
	pub timestamp: DateTime<Utc>,
}

/// A review that passed validation at the store boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
	pub review_id: Uuid,
	pub author: String,
	pub author_id: Option<String>,
	pub location: String,
	pub rating: Option<u8>,
	pub comment: String,
	pub timestamp: Option<DateTime<Utc>>,
	pub image_url: Option<String>,
	pub is_anonymous: bool,
	pub likes: BTreeSet<String>,
	pub replies: Vec<Reply>,
}

/// Row of the `reviews` collection as stored.
#[derive(Debug, sqlx::FromRow)]
pub struct ReviewRow {
	pub review_id: Uuid,
	pub document: Value,
}

/// Raw review document. Every field may be missing.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDocument {
	#[serde(default)]
	pub user: Option<String>,
	#[serde(default)]
	pub user_id: Option<String>,
	#[serde(default)]
	pub location: Option<String>,
	#[serde(default)]
	pub rating: Option<Value>,
	#[serde(default)]
	pub comment: Option<String>,
	#[serde(default)]
	pub timestamp: Option<String>,
	#[serde(default)]
	pub image_url: Option<String>,
	#[serde(default)]
	pub is_anonymous: Option<bool>,
	#[serde(default)]
	pub likes: Option<Vec<String>>,
	#[serde(default)]
	pub replies: Option<Vec<Reply>>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DocumentError {
	#[error("review {0} is not a valid document: {1}")]
	Malformed(Uuid, String),
	#[error("review {0} has no location")]
	MissingLocation(Uuid),
}

/// Accepts only numbers with an integral value in 1..=5.
pub fn parse_rating(value: &Value) -> Option<u8> {
	let rating = value.as_f64()?;
	if !rating.is_finite() || rating.fract() != 0.0 || !(1.0..=5.0).contains(&rating) {
		return None;
	}
	Some(rating as u8)
}

fn non_blank(value: Option<String>) -> Option<String> {
	value.filter(|v| !v.trim().is_empty())
}

impl Review {
	pub fn from_row(row: ReviewRow) -> Result<Self, DocumentError> {
		let document: ReviewDocument = serde_json::from_value(row.document)
			.map_err(|e| DocumentError::Malformed(row.review_id, e.to_string()))?;

		Self::from_document(row.review_id, document)
	}

	pub fn from_document(review_id: Uuid, document: ReviewDocument) -> Result<Self, DocumentError> {
		let location =
			non_blank(document.location).ok_or(DocumentError::MissingLocation(review_id))?;
		let is_anonymous = document.is_anonymous.unwrap_or(false);
		let author = match non_blank(document.user) {
			Some(user) if !is_anonymous => user,
			_ => ANONYMOUS.to_string(),
		};

		Ok(Review {
			review_id,
			author,
			author_id: non_blank(document.user_id),
			location,
			rating: document.rating.as_ref().and_then(parse_rating),
			comment: document.comment.unwrap_or_default(),
			timestamp: document
				.timestamp
				.as_deref()
				.and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
				.map(|ts| ts.with_timezone(&Utc)),
			image_url: non_blank(document.image_url),
			is_anonymous,
			likes: document.likes.unwrap_or_default().into_iter().collect(),
			replies: document.replies.unwrap_or_default(),
		})
	}

	pub fn to_document(&self) -> ReviewDocument {
		ReviewDocument {
			user: Some(self.author.clone()),
			user_id: self.author_id.clone(),
			location: Some(self.location.clone()),
			rating: self.rating.map(Value::from),
			comment: Some(self.comment.clone()),
			timestamp: self
				.timestamp
				.map(|ts| ts.to_rfc3339_opts(SecondsFormat::Millis, true)),
			image_url: self.image_url.clone(),
			is_anonymous: Some(self.is_anonymous),
			likes: Some(self.likes.iter().cloned().collect()),
			replies: Some(self.replies.clone()),
		}
	}

	pub fn is_authored_by(&self, user_id: &str) -> bool {
		!user_id.is_empty() && self.author_id.as_deref() == Some(user_id)
	}
}

#[allow(non_snake_case)]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FilteredReview {
	pub review_id: String,
	pub author: String,
	pub location: String,
	pub rating: Option<u8>,
	pub comment: String,
	pub timestamp: Option<String>,
	pub image_url: Option<String>,
	pub is_anonymous: bool,
	pub likes_count: usize,
	pub liked_by_me: bool,
	pub replies: Vec<FilteredReply>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FilteredReply {
	pub reply_id: String,
	pub author: String,
	pub comment: String,
	pub timestamp: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AddReviewSchema {
	pub building: String,
	pub floor: String,
	pub custom_building: Option<String>,
	pub custom_floor: Option<String>,
	pub rating: u8,
	pub comment: String,
	pub image_url: Option<String>,
	#[serde(default)]
	pub is_anonymous: bool,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AddReplySchema {
	pub comment: String,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReviewSort {
	#[default]
	Recent,
	Likes,
}

#[derive(Deserialize, Debug)]
pub struct ReviewsFilterOptions {
	pub page: Option<usize>,
	pub limit: Option<usize>,
	pub sort: Option<ReviewSort>,
}

pub const MAX_PAGE_LIMIT: usize = 100;

impl ReviewsFilterOptions {
	/// Page size is clamped to 1..=MAX_PAGE_LIMIT, the offset saturates.
	pub fn limit_offset(&self) -> (usize, usize) {
		let limit = self.limit.unwrap_or(10).clamp(1, MAX_PAGE_LIMIT);
		let offset = self.page.unwrap_or(1).saturating_sub(1).saturating_mul(limit);
		(limit, offset)
	}
}
