use crate::{
	api::CustomError,
	models::{FilteredLocationRating, RankingsOptions, Review},
	utils::{aggregate_ratings, known_locations, location_path},
	AppState,
};
use actix_web::{get, web, HttpResponse};
use serde_json::json;

#[get("/rankings")]
pub async fn get_rankings_handler(
	opts: web::Query<RankingsOptions>,
	data: web::Data<AppState>,
) -> Result<HttpResponse, CustomError> {
	let ranking_type = opts
		.ranking_type
		.ok_or_else(|| CustomError::BadRequest("type must be top or bottom".to_string()))?;

	let reviews = Review::get_reviews(&data.db).await?;
	let known = if opts.seeded.unwrap_or(false) {
		known_locations(&data.buildings)
	} else {
		Vec::new()
	};

	let rankings: Vec<FilteredLocationRating> =
		aggregate_ratings(&reviews, &known, ranking_type.into())
			.into_iter()
			.map(|rating| FilteredLocationRating {
				path: location_path(&rating.location),
				location: rating.location,
				average_rating: rating.average_rating,
				count: rating.count,
				rated_count: rating.rated_count,
			})
			.collect();

	Ok(HttpResponse::Ok().json(json!({
		"status": "success",
		"data": json!({
			"rankings": rankings,
			"rankings_count": rankings.len()
		})
	})))
}
