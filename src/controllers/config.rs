use actix_web::web;

use crate::controllers::buildings::{
	get_buildings_handler, get_nearest_building_handler, get_sorted_buildings_handler,
};
use crate::controllers::images::upload_image_handler;
use crate::controllers::rankings::get_rankings_handler;
use crate::controllers::reviews::{
	add_reply_handler, add_review_handler, delete_review_handler, get_location_reviews_handler,
	get_review_handler, get_reviews_handler, toggle_like_handler,
};

pub fn config(conf: &mut web::ServiceConfig) {
	let scope = web::scope("/api")
		.service(get_buildings_handler)
		.service(get_sorted_buildings_handler)
		.service(get_nearest_building_handler)
		.service(get_rankings_handler)
		.service(get_reviews_handler)
		.service(get_location_reviews_handler)
		.service(get_review_handler)
		.service(add_review_handler)
		.service(toggle_like_handler)
		.service(add_reply_handler)
		.service(delete_review_handler)
		.service(upload_image_handler);

	conf.service(scope);
}
