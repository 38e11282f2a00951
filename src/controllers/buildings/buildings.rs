use crate::{
	models::{Building, PositionOptions},
	utils::{
		building_choices, nearest_building, resolve_position, sort_alphabetically,
		LOCATION_ADVISORY,
	},
	AppState,
};
use actix_web::{get, web, HttpResponse, Responder};
use serde_json::json;

#[get("/buildings")]
pub async fn get_buildings_handler(data: web::Data<AppState>) -> impl Responder {
	let buildings: Vec<&Building> = sort_alphabetically(&data.buildings);

	HttpResponse::Ok().json(json!({
		"status": "success",
		"data": json!({
			"buildings": buildings,
			"buildings_count": buildings.len()
		})
	}))
}

#[get("/buildings/sorted")]
pub async fn get_sorted_buildings_handler(
	opts: web::Query<PositionOptions>,
	data: web::Data<AppState>,
) -> impl Responder {
	let choices = building_choices(&data.buildings, resolve_position(&opts));

	HttpResponse::Ok().json(json!({
		"status": "success",
		"data": choices
	}))
}

#[get("/buildings/nearest")]
pub async fn get_nearest_building_handler(
	opts: web::Query<PositionOptions>,
	data: web::Data<AppState>,
) -> impl Responder {
	match resolve_position(&opts) {
		Ok(coords) => {
			let building = nearest_building(coords.latitude, coords.longitude, &data.buildings);

			HttpResponse::Ok().json(json!({
				"status": "success",
				"data": json!({
					"building": building,
					"advisory": null
				})
			}))
		}
		Err(reason) => {
			log::info!("Nearest building unavailable: {}", reason);

			HttpResponse::Ok().json(json!({
				"status": "success",
				"data": json!({
					"building": null,
					"reason": reason.to_string(),
					"advisory": LOCATION_ADVISORY
				})
			}))
		}
	}
}
