use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use crate::models::DocumentError;

#[derive(Error, Debug)]
pub enum CustomError {
	#[error("Database error: {0}")]
	Database(#[from] sqlx::Error),

	#[error("{0}")]
	InvalidDocument(#[from] DocumentError),

	#[error("{0}")]
	BadRequest(String),

	#[error("{0} not found")]
	NotFound(String),

	#[error("You are not logged in, please provide token")]
	Unauthorized,

	#[error("{0}")]
	Forbidden(String),

	#[error("Failed to store image: {0}")]
	Blob(#[from] std::io::Error),

	#[error("Configuration error: {0}")]
	Config(String),

	#[error("Building registry error: {0}")]
	Registry(String),
}

impl ResponseError for CustomError {
	fn status_code(&self) -> StatusCode {
		match self {
			CustomError::BadRequest(_) => StatusCode::BAD_REQUEST,
			CustomError::NotFound(_) => StatusCode::NOT_FOUND,
			CustomError::Unauthorized => StatusCode::UNAUTHORIZED,
			CustomError::Forbidden(_) => StatusCode::FORBIDDEN,
			CustomError::Database(sqlx::Error::RowNotFound) => StatusCode::NOT_FOUND,
			_ => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	fn error_response(&self) -> HttpResponse {
		let status = self.status_code();
		let message = if status.is_server_error() {
			log::error!("{}", self);
			"Something went wrong, please try again".to_string()
		} else {
			self.to_string()
		};

		HttpResponse::build(status).json(json!({"status": "error", "message": message}))
	}
}
