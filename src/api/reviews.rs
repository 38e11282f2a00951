use sqlx::{types::Json, Pool, Postgres};
use uuid::Uuid;

use crate::{
	api::CustomError,
	models::{Review, ReviewRow},
};

/// Drops documents that fail validation so one bad document cannot break a listing.
fn validated(rows: Vec<ReviewRow>) -> Vec<Review> {
	rows.into_iter()
		.filter_map(|row| match Review::from_row(row) {
			Ok(review) => Some(review),
			Err(e) => {
				log::warn!("Skipping review document: {}", e);
				None
			}
		})
		.collect()
}

impl Review {
	pub async fn get_reviews(db: &Pool<Postgres>) -> Result<Vec<Self>, CustomError> {
		let rows = sqlx::query_as::<_, ReviewRow>("SELECT review_id, document FROM reviews")
			.fetch_all(db)
			.await
			.map_err(|e| {
				log::error!("Error fetching reviews: {:?}", e);
				e
			})?;

		Ok(validated(rows))
	}

	pub async fn get_reviews_by_location(
		db: &Pool<Postgres>,
		location: &str,
	) -> Result<Vec<Self>, CustomError> {
		let rows = sqlx::query_as::<_, ReviewRow>(
			"SELECT review_id, document FROM reviews WHERE document->>'location' = $1",
		)
		.bind(location)
		.fetch_all(db)
		.await
		.map_err(|e| {
			log::error!("Error fetching reviews for {}: {:?}", location, e);
			e
		})?;

		Ok(validated(rows))
	}

	pub async fn get_review(db: &Pool<Postgres>, review_id: Uuid) -> Result<Self, CustomError> {
		let row = sqlx::query_as::<_, ReviewRow>(
			"SELECT review_id, document FROM reviews WHERE review_id = $1",
		)
		.bind(review_id)
		.fetch_optional(db)
		.await?
		.ok_or_else(|| CustomError::NotFound(format!("Review {}", review_id)))?;

		Ok(Review::from_row(row)?)
	}

	pub async fn add_review(db: &Pool<Postgres>, review: &Review) -> Result<Self, CustomError> {
		let row = sqlx::query_as::<_, ReviewRow>(
			"INSERT INTO reviews (review_id, document) VALUES ($1, $2) RETURNING review_id, document",
		)
		.bind(review.review_id)
		.bind(Json(review.to_document()))
		.fetch_one(db)
		.await
		.map_err(|e| {
			log::error!("Error adding review: {:?}", e);
			e
		})?;

		Ok(Review::from_row(row)?)
	}

	/// Overwrites the stored document. Concurrent writers may lose updates.
	pub async fn update_review(db: &Pool<Postgres>, review: &Review) -> Result<Self, CustomError> {
		let row = sqlx::query_as::<_, ReviewRow>(
			"UPDATE reviews SET document = $2 WHERE review_id = $1 RETURNING review_id, document",
		)
		.bind(review.review_id)
		.bind(Json(review.to_document()))
		.fetch_optional(db)
		.await?
		.ok_or_else(|| CustomError::NotFound(format!("Review {}", review.review_id)))?;

		Ok(Review::from_row(row)?)
	}

	pub async fn delete_review(db: &Pool<Postgres>, review_id: Uuid) -> Result<(), CustomError> {
		let result = sqlx::query("DELETE FROM reviews WHERE review_id = $1")
			.bind(review_id)
			.execute(db)
			.await?;

		if result.rows_affected() == 0 {
			return Err(CustomError::NotFound(format!("Review {}", review_id)));
		}

		Ok(())
	}
}
