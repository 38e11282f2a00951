use crate::{
	api::CustomError,
	jwt_auth,
	models::{AddReplySchema, AddReviewSchema, FilteredReview, Review, ReviewsFilterOptions},
	utils::{
		add_reply, compose_location, ensure_author, filter_review_record, location_from_selection,
		sort_reviews, toggle_like,
	},
	AppState,
};
use actix_web::{
	delete, get, post,
	web::{self, Path},
	HttpResponse,
};
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

fn filter_reviews(reviews: &[Review], viewer_id: Option<&str>) -> Vec<FilteredReview> {
	reviews
		.iter()
		.map(|review| filter_review_record(review, viewer_id))
		.collect()
}

#[get("/reviews")]
pub async fn get_reviews_handler(
	opts: web::Query<ReviewsFilterOptions>,
	data: web::Data<AppState>,
) -> Result<HttpResponse, CustomError> {
	let (limit, offset) = opts.limit_offset();

	let mut reviews = Review::get_reviews(&data.db).await?;
	let reviews_count = reviews.len();
	sort_reviews(&mut reviews, opts.sort.unwrap_or_default());

	let page: Vec<Review> = reviews.into_iter().skip(offset).take(limit).collect();

	Ok(HttpResponse::Ok().json(json!({
		"status": "success",
		"data": json!({
			"reviews": filter_reviews(&page, None),
			"reviews_count": reviews_count
		})
	})))
}

#[get("/reviews/location/{building}/{floor}")]
pub async fn get_location_reviews_handler(
	path: Path<(String, String)>,
	data: web::Data<AppState>,
) -> Result<HttpResponse, CustomError> {
	let (building, floor) = path.into_inner();
	let location = compose_location(&building, &floor);

	let mut reviews = Review::get_reviews_by_location(&data.db, &location).await?;
	sort_reviews(&mut reviews, Default::default());

	Ok(HttpResponse::Ok().json(json!({
		"status": "success",
		"data": json!({
			"location": location,
			"reviews": filter_reviews(&reviews, None),
			"reviews_count": reviews.len()
		})
	})))
}

#[get("/review/{id}")]
pub async fn get_review_handler(
	path: Path<Uuid>,
	data: web::Data<AppState>,
) -> Result<HttpResponse, CustomError> {
	let review = Review::get_review(&data.db, path.into_inner()).await?;

	Ok(HttpResponse::Ok().json(json!({
		"status": "success",
		"data": json!({
			"review": filter_review_record(&review, None)
		})
	})))
}

#[post("/review")]
pub async fn add_review_handler(
	body: web::Json<AddReviewSchema>,
	data: web::Data<AppState>,
	user: jwt_auth::JwtMiddleware,
) -> Result<HttpResponse, CustomError> {
	if !(1..=5).contains(&body.rating) {
		return Err(CustomError::BadRequest("Rating must be between 1 and 5".to_string()));
	}
	if body.comment.trim().is_empty() {
		return Err(CustomError::BadRequest("Please leave a comment".to_string()));
	}

	let location = location_from_selection(&data.buildings, &body)?;

	let review = Review {
		review_id: Uuid::new_v4(),
		author: user.author_name(body.is_anonymous),
		author_id: Some(user.user_id.clone()),
		location,
		rating: Some(body.rating),
		comment: body.comment.trim().to_string(),
		timestamp: Some(Utc::now()),
		image_url: body.image_url.clone().filter(|url| !url.trim().is_empty()),
		is_anonymous: body.is_anonymous,
		likes: Default::default(),
		replies: Vec::new(),
	};

	let review = Review::add_review(&data.db, &review).await?;
	log::info!("Review {} added for {}", review.review_id, review.location);

	Ok(HttpResponse::Created().json(json!({
		"status": "success",
		"data": json!({
			"review": filter_review_record(&review, Some(user.user_id.as_str()))
		})
	})))
}

#[post("/review/{id}/like")]
pub async fn toggle_like_handler(
	path: Path<Uuid>,
	data: web::Data<AppState>,
	user: jwt_auth::JwtMiddleware,
) -> Result<HttpResponse, CustomError> {
	let mut review = Review::get_review(&data.db, path.into_inner()).await?;
	let liked = toggle_like(&mut review, &user.user_id);
	let review = Review::update_review(&data.db, &review).await?;

	Ok(HttpResponse::Ok().json(json!({
		"status": "success",
		"data": json!({
			"liked": liked,
			"review": filter_review_record(&review, Some(user.user_id.as_str()))
		})
	})))
}

#[post("/review/{id}/reply")]
pub async fn add_reply_handler(
	path: Path<Uuid>,
	body: web::Json<AddReplySchema>,
	data: web::Data<AppState>,
	user: jwt_auth::JwtMiddleware,
) -> Result<HttpResponse, CustomError> {
	if body.comment.trim().is_empty() {
		return Err(CustomError::BadRequest("Reply cannot be empty".to_string()));
	}

	let mut review = Review::get_review(&data.db, path.into_inner()).await?;
	add_reply(
		&mut review,
		&user.author_name(false),
		&user.user_id,
		&body.comment,
		Utc::now(),
	);
	let review = Review::update_review(&data.db, &review).await?;

	Ok(HttpResponse::Created().json(json!({
		"status": "success",
		"data": json!({
			"review": filter_review_record(&review, Some(user.user_id.as_str()))
		})
	})))
}

#[delete("/review/{id}")]
pub async fn delete_review_handler(
	path: Path<Uuid>,
	data: web::Data<AppState>,
	user: jwt_auth::JwtMiddleware,
) -> Result<HttpResponse, CustomError> {
	let review_id = path.into_inner();
	let review = Review::get_review(&data.db, review_id).await?;

	ensure_author(&review, &user.user_id)?;

	Review::delete_review(&data.db, review_id).await?;
	log::info!("Review {} deleted", review_id);

	Ok(HttpResponse::NoContent().finish())
}
