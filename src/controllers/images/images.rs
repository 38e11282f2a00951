use crate::{
	api::{BlobStore, CustomError},
	jwt_auth, AppState,
};
use actix_files::Files;
use actix_web::{http::header, post, web, HttpRequest, HttpResponse};
use serde_json::json;

#[post("/images")]
pub async fn upload_image_handler(
	req: HttpRequest,
	body: web::Bytes,
	data: web::Data<AppState>,
	user: jwt_auth::JwtMiddleware,
) -> Result<HttpResponse, CustomError> {
	let content_type = req
		.headers()
		.get(header::CONTENT_TYPE)
		.and_then(|value| value.to_str().ok());

	let url = data.blobs.upload(content_type, &body).await?;
	log::info!("Image uploaded by {}", user.user_id);

	Ok(HttpResponse::Created().json(json!({
		"status": "success",
		"data": json!({
			"image_url": url
		})
	})))
}

/// Serves stored photos under the public upload URL.
pub fn uploads_service(blobs: &BlobStore) -> Files {
	Files::new(blobs.mount_path(), blobs.root())
}
