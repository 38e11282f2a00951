use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use sqlx::postgres::PgPoolOptions;

use restroom_reviews::api::{ensure_schema, BlobStore};
use restroom_reviews::config::Config;
use restroom_reviews::utils::load_buildings;
use restroom_reviews::{controllers, AppState};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
	dotenv().ok();
	if std::env::var_os("RUST_LOG").is_none() {
		std::env::set_var("RUST_LOG", "actix_web=info,restroom_reviews=info");
	}
	env_logger::init();

	let config = match Config::init() {
		Ok(config) => config,
		Err(err) => {
			log::error!("🔥 {}", err);
			std::process::exit(1);
		}
	};

	let buildings = match load_buildings(config.buildings_path.as_deref()) {
		Ok(buildings) => buildings,
		Err(err) => {
			log::error!("🔥 {}", err);
			std::process::exit(1);
		}
	};

	let pool = match PgPoolOptions::new()
		.max_connections(10)
		.connect(&config.database_url)
		.await
	{
		Ok(pool) => {
			log::info!("✅Connection to the database is successful!");
			pool
		}
		Err(err) => {
			log::error!("🔥 Failed to connect to the database: {:?}", err);
			std::process::exit(1);
		}
	};

	if let Err(err) = ensure_schema(&pool).await {
		log::error!("🔥 Failed to prepare the reviews collection: {}", err);
		std::process::exit(1);
	}

	let blobs = BlobStore::new(
		&config.upload_dir,
		&config.public_upload_url,
		config.max_image_bytes,
	);
	if let Err(err) = std::fs::create_dir_all(blobs.root()) {
		log::error!("🔥 Failed to create upload directory: {}", err);
		std::process::exit(1);
	}
	let state = web::Data::new(AppState {
		db: pool,
		env: config.clone(),
		buildings,
		blobs,
	});

	log::info!("🚀 Server started successfully on {}:{}", config.host, config.port);

	HttpServer::new(move || {
		App::new()
			.app_data(state.clone())
			.app_data(web::PayloadConfig::new(state.blobs.max_bytes()))
			.configure(controllers::config)
			.service(controllers::images::uploads_service(&state.blobs))
			.wrap(Cors::permissive())
			.wrap(Logger::default())
	})
	.bind((config.host.as_str(), config.port))?
	.run()
	.await
}
