use thiserror::Error;

use crate::models::{
	Building, BuildingChoice, BuildingChoices, BuildingWithDistance, Coordinates, PositionOptions,
};
use crate::utils::sort_alphabetically;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

pub const LOCATION_ADVISORY: &str =
	"Unable to access your location. Buildings are sorted alphabetically.";

/// Why the caller's position could not be used.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationUnavailable {
	#[error("location permission denied")]
	PermissionDenied,
	#[error("position unavailable")]
	PositionUnavailable,
	#[error("location request timed out")]
	Timeout,
	#[error("geolocation is not supported")]
	Unsupported,
	#[error("no position provided")]
	Missing,
	#[error("coordinates out of range")]
	InvalidCoordinates,
}

impl LocationUnavailable {
	/// Maps a browser `GeolocationPositionError.code`.
	pub fn from_code(code: u16) -> Self {
		match code {
			1 => LocationUnavailable::PermissionDenied,
			2 => LocationUnavailable::PositionUnavailable,
			3 => LocationUnavailable::Timeout,
			_ => LocationUnavailable::Unsupported,
		}
	}
}

/// Great-circle distance in kilometres.
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
	let d_lat = (lat2 - lat1).to_radians();
	let d_lon = (lon2 - lon1).to_radians();

	let a = (d_lat / 2.0).sin().powi(2)
		+ lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
	let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

	EARTH_RADIUS_KM * c
}

/// Closest building with coordinates; the first one wins on ties.
pub fn nearest_building(lat: f64, lon: f64, registry: &[Building]) -> Option<&Building> {
	if !lat.is_finite() || !lon.is_finite() {
		return None;
	}

	let mut nearest: Option<(&Building, f64)> = None;

	for building in registry {
		let Some(coords) = building.coordinates else {
			continue;
		};
		let distance = haversine_distance(lat, lon, coords.latitude, coords.longitude);

		match nearest {
			Some((_, shortest)) if distance >= shortest => {}
			_ => nearest = Some((building, distance)),
		}
	}

	nearest.map(|(building, _)| building)
}

/// Buildings with coordinates, closest first. Buildings without coordinates are left out.
pub fn sort_by_distance(lat: f64, lon: f64, registry: &[Building]) -> Vec<BuildingWithDistance> {
	if !lat.is_finite() || !lon.is_finite() {
		return Vec::new();
	}

	let mut buildings: Vec<BuildingWithDistance> = registry
		.iter()
		.filter_map(|building| {
			let coords = building.coordinates?;
			Some(BuildingWithDistance {
				building: building.clone(),
				distance_km: haversine_distance(lat, lon, coords.latitude, coords.longitude),
			})
		})
		.collect();

	buildings.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
	buildings
}

pub fn resolve_position(opts: &PositionOptions) -> Result<Coordinates, LocationUnavailable> {
	if let Some(code) = opts.geo_error {
		return Err(LocationUnavailable::from_code(code));
	}

	match (opts.lat, opts.lon) {
		(Some(lat), Some(lon)) => {
			Coordinates::new(lat, lon).ok_or(LocationUnavailable::InvalidCoordinates)
		}
		_ => Err(LocationUnavailable::Missing),
	}
}

/// Selection list for the submit form: by distance when the position is
/// known, alphabetical with an advisory otherwise.
pub fn building_choices(
	registry: &[Building],
	position: Result<Coordinates, LocationUnavailable>,
) -> BuildingChoices {
	let alphabetical = sort_alphabetically(registry);

	match position {
		Ok(coords) => {
			let mut buildings: Vec<BuildingChoice> =
				sort_by_distance(coords.latitude, coords.longitude, registry)
					.into_iter()
					.map(|b| BuildingChoice {
						name: b.building.name,
						floors: b.building.floors,
						distance_km: Some(b.distance_km),
					})
					.collect();
			buildings.extend(
				alphabetical
					.into_iter()
					.filter(|b| b.coordinates.is_none())
					.map(|b| BuildingChoice {
						name: b.name.clone(),
						floors: b.floors.clone(),
						distance_km: None,
					}),
			);

			BuildingChoices {
				selected: buildings.first().map(|b| b.name.clone()),
				buildings,
				advisory: None,
			}
		}
		Err(reason) => {
			log::info!("Falling back to alphabetical building order: {}", reason);

			let buildings: Vec<BuildingChoice> = alphabetical
				.into_iter()
				.map(|b| BuildingChoice {
					name: b.name.clone(),
					floors: b.floors.clone(),
					distance_km: None,
				})
				.collect();

			BuildingChoices {
				selected: buildings.first().map(|b| b.name.clone()),
				buildings,
				advisory: Some(LOCATION_ADVISORY.to_string()),
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use approx::assert_abs_diff_eq;

	fn building(name: &str, coords: Option<(f64, f64)>) -> Building {
		Building {
			name: name.to_string(),
			floors: vec!["1st Floor".to_string()],
			coordinates: coords.map(|(latitude, longitude)| Coordinates {
				latitude,
				longitude,
			}),
		}
	}

	#[test]
	fn distance_to_self_is_zero() {
		for (lat, lon) in [(0.0, 0.0), (42.2750, -83.7417), (-33.86, 151.21), (89.9, 179.9)] {
			assert_abs_diff_eq!(haversine_distance(lat, lon, lat, lon), 0.0);
		}
	}

	#[test]
	fn one_degree_of_longitude_on_equator() {
		assert_abs_diff_eq!(haversine_distance(0.0, 0.0, 0.0, 1.0), 111.195, epsilon = 1e-3);
	}

	#[test]
	fn distance_is_symmetric() {
		let there = haversine_distance(42.2750, -83.7417, 42.2932626, -83.7138866);
		let back = haversine_distance(42.2932626, -83.7138866, 42.2750, -83.7417);
		assert_abs_diff_eq!(there, back, epsilon = 1e-9);
		assert!(there > 2.0 && there < 4.0);
	}

	#[test]
	fn nearest_picks_closest() {
		let registry = vec![building("X", Some((0.0, 0.0))), building("Y", Some((0.0, 1.0)))];

		assert_eq!(nearest_building(0.0, 0.4, &registry).unwrap().name, "X");
		assert_eq!(nearest_building(0.0, 0.6, &registry).unwrap().name, "Y");
	}

	#[test]
	fn nearest_skips_buildings_without_coordinates() {
		let registry = vec![
			building("Aardvark Hall", None),
			building("Y", Some((10.0, 10.0))),
		];

		assert_eq!(nearest_building(0.0, 0.0, &registry).unwrap().name, "Y");
		assert!(nearest_building(0.0, 0.0, &registry[..1]).is_none());
		assert!(nearest_building(0.0, 0.0, &[]).is_none());
	}

	#[test]
	fn non_finite_query_has_no_nearest() {
		let registry = vec![building("X", Some((0.0, 0.0))), building("Y", Some((0.0, 1.0)))];

		assert!(nearest_building(f64::NAN, 0.0, &registry).is_none());
		assert!(nearest_building(0.0, f64::INFINITY, &registry).is_none());
		assert!(sort_by_distance(f64::NAN, f64::NAN, &registry).is_empty());
	}

	#[test]
	fn nearest_tie_keeps_registry_order() {
		let registry = vec![building("East", Some((0.0, 1.0))), building("West", Some((0.0, -1.0)))];

		assert_eq!(nearest_building(0.0, 0.0, &registry).unwrap().name, "East");
	}

	#[test]
	fn sort_by_distance_orders_and_annotates() {
		let registry = vec![
			building("Far", Some((0.0, 3.0))),
			building("None", None),
			building("Near", Some((0.0, 1.0))),
			building("Here", Some((0.0, 0.0))),
		];

		let sorted = sort_by_distance(0.0, 0.0, &registry);
		let names: Vec<&str> = sorted.iter().map(|b| b.building.name.as_str()).collect();

		assert_eq!(names, vec!["Here", "Near", "Far"]);
		assert_abs_diff_eq!(sorted[0].distance_km, 0.0);
		assert!(sorted.windows(2).all(|w| w[0].distance_km <= w[1].distance_km));
	}

	#[test]
	fn position_errors_are_reported() {
		let denied = PositionOptions {
			lat: Some(1.0),
			lon: Some(1.0),
			geo_error: Some(1),
		};
		assert_eq!(resolve_position(&denied), Err(LocationUnavailable::PermissionDenied));
		assert_eq!(
			resolve_position(&PositionOptions::default()),
			Err(LocationUnavailable::Missing)
		);

		let out_of_range = PositionOptions {
			lat: Some(91.0),
			lon: Some(0.0),
			geo_error: None,
		};
		assert_eq!(
			resolve_position(&out_of_range),
			Err(LocationUnavailable::InvalidCoordinates)
		);
	}

	#[test]
	fn choices_fall_back_to_alphabetical() {
		let registry = vec![building("Mason Hall", Some((0.0, 0.0))), building("Angell Hall", None)];

		let choices = building_choices(&registry, Err(LocationUnavailable::Timeout));
		let names: Vec<&str> = choices.buildings.iter().map(|b| b.name.as_str()).collect();

		assert_eq!(names, vec!["Angell Hall", "Mason Hall"]);
		assert_eq!(choices.selected.as_deref(), Some("Angell Hall"));
		assert_eq!(choices.advisory.as_deref(), Some(LOCATION_ADVISORY));
	}

	#[test]
	fn choices_by_distance_keep_uncoordinated_buildings() {
		let registry = vec![
			building("Far", Some((0.0, 2.0))),
			building("Zulu", None),
			building("Near", Some((0.0, 0.1))),
			building("Alpha", None),
		];

		let choices = building_choices(&registry, Ok(Coordinates {
			latitude: 0.0,
			longitude: 0.0,
		}));
		let names: Vec<&str> = choices.buildings.iter().map(|b| b.name.as_str()).collect();

		assert_eq!(names, vec!["Near", "Far", "Alpha", "Zulu"]);
		assert_eq!(choices.selected.as_deref(), Some("Near"));
		assert!(choices.advisory.is_none());
		assert!(choices.buildings[2].distance_km.is_none());
	}
}
