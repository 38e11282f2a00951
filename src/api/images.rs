use std::path::{Path, PathBuf};

use chrono::Utc;
use uuid::Uuid;

use crate::api::CustomError;

/// Directory-backed object store for review photos.
#[derive(Debug, Clone)]
pub struct BlobStore {
	root: PathBuf,
	public_url: String,
	max_bytes: usize,
}

impl BlobStore {
	pub fn new(root: impl Into<PathBuf>, public_url: &str, max_bytes: usize) -> Self {
		Self {
			root: root.into(),
			public_url: public_url.trim_end_matches('/').to_string(),
			max_bytes,
		}
	}

	pub fn max_bytes(&self) -> usize {
		self.max_bytes
	}

	pub fn root(&self) -> &Path {
		&self.root
	}

	/// Path component of the public URL, where the store is mounted.
	pub fn mount_path(&self) -> &str {
		let path = match self.public_url.split_once("://") {
			Some((_, rest)) => rest.find('/').map_or("", |i| &rest[i..]),
			None => self.public_url.as_str(),
		};
		if path.is_empty() {
			"/"
		} else {
			path
		}
	}

	/// Checks the upload and returns the file extension to store it under.
	pub fn validate(
		&self,
		content_type: Option<&str>,
		size: usize,
	) -> Result<&'static str, CustomError> {
		let extension = content_type
			.and_then(image_extension)
			.ok_or_else(|| CustomError::BadRequest("Please upload an image file".to_string()))?;

		if size == 0 {
			return Err(CustomError::BadRequest("Image is empty".to_string()));
		}
		if size > self.max_bytes {
			return Err(CustomError::BadRequest(format!(
				"Image size should be less than {}MB",
				self.max_bytes / (1024 * 1024)
			)));
		}

		Ok(extension)
	}

	pub async fn upload(
		&self,
		content_type: Option<&str>,
		bytes: &[u8],
	) -> Result<String, CustomError> {
		let extension = self.validate(content_type, bytes.len())?;
		let key = object_key(Utc::now().timestamp_millis(), Uuid::new_v4(), extension);
		let path = self.root.join(&key);

		if let Some(parent) = path.parent() {
			tokio::fs::create_dir_all(parent).await?;
		}
		tokio::fs::write(&path, bytes).await?;

		log::info!("Stored image {} ({} bytes)", key, bytes.len());

		Ok(format!("{}/{}", self.public_url, key))
	}
}

pub fn object_key(millis: i64, id: Uuid, extension: &str) -> String {
	format!("reviews/review_{}_{}.{}", millis, id, extension)
}

fn image_extension(content_type: &str) -> Option<&'static str> {
	let mime = content_type.split(';').next()?.trim().to_ascii_lowercase();
	let subtype = mime.strip_prefix("image/")?;

	match subtype {
		"jpeg" | "jpg" | "pjpeg" => Some("jpg"),
		"png" => Some("png"),
		"gif" => Some("gif"),
		"webp" => Some("webp"),
		"heic" => Some("heic"),
		"heif" => Some("heif"),
		"" => None,
		_ => Some("img"),
	}
}
