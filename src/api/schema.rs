use sqlx::{Pool, Postgres};

use crate::api::CustomError;

const CREATE_REVIEWS_TABLE: &str = "CREATE TABLE IF NOT EXISTS reviews (
	review_id UUID PRIMARY KEY,
	document JSONB NOT NULL
)";

pub async fn ensure_schema(db: &Pool<Postgres>) -> Result<(), CustomError> {
	sqlx::query(CREATE_REVIEWS_TABLE).execute(db).await?;
	Ok(())
}
