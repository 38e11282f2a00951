use std::env;
use std::str::FromStr;

use crate::api::CustomError;

#[derive(Debug, Clone)]
pub struct Config {
	pub database_url: String,
	pub jwt_secret: String,
	pub host: String,
	pub port: u16,
	pub buildings_path: Option<String>,
	pub upload_dir: String,
	pub public_upload_url: String,
	pub max_image_bytes: usize,
}

fn required(key: &str) -> Result<String, CustomError> {
	env::var(key).map_err(|_| CustomError::Config(format!("{} must be set", key)))
}

fn optional<T: FromStr>(key: &str, default: T) -> Result<T, CustomError> {
	match env::var(key) {
		Ok(value) => value
			.parse()
			.map_err(|_| CustomError::Config(format!("{} has an invalid value", key))),
		Err(_) => Ok(default),
	}
}

impl Config {
	pub fn init() -> Result<Config, CustomError> {
		Ok(Config {
			database_url: required("DATABASE_URL")?,
			jwt_secret: required("JWT_SECRET")?,
			host: optional("HOST", "127.0.0.1".to_string())?,
			port: optional("PORT", 8000)?,
			buildings_path: env::var("BUILDINGS_PATH").ok(),
			upload_dir: optional("UPLOAD_DIR", "uploads".to_string())?,
			public_upload_url: optional("PUBLIC_UPLOAD_URL", "/uploads".to_string())?,
			max_image_bytes: optional("MAX_IMAGE_BYTES", 5 * 1024 * 1024)?,
		})
	}
}
