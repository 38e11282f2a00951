pub mod api;
pub mod config;
pub mod controllers;
pub mod jwt_auth;
pub mod models;
pub mod utils;

use sqlx::{Pool, Postgres};

use crate::api::BlobStore;
use crate::config::Config;
use crate::models::Building;

pub struct AppState {
	pub db: Pool<Postgres>,
	pub env: Config,
	pub buildings: Vec<Building>,
	pub blobs: BlobStore,
}
