use std::collections::HashSet;

use crate::{
	api::CustomError,
	models::{AddReviewSchema, Building, Coordinates},
};

const EMBEDDED_BUILDINGS: &str = include_str!("../../data/buildings.json");

/// Selection value that switches building or floor to free text.
pub const OTHER: &str = "Other";

const LOCATION_SEPARATOR: &str = " - ";

pub fn parse_buildings(json: &str) -> Result<Vec<Building>, CustomError> {
	let buildings: Vec<Building> =
		serde_json::from_str(json).map_err(|e| CustomError::Registry(e.to_string()))?;

	let mut names = HashSet::new();
	for building in &buildings {
		if building.name.trim().is_empty() {
			return Err(CustomError::Registry("building with empty name".to_string()));
		}
		if let Some(coords) = building.coordinates {
			if Coordinates::new(coords.latitude, coords.longitude).is_none() {
				return Err(CustomError::Registry(format!(
					"{} has invalid coordinates",
					building.name
				)));
			}
		}
		if !names.insert(building.name.as_str()) {
			return Err(CustomError::Registry(format!(
				"duplicate building {}",
				building.name
			)));
		}
	}

	Ok(buildings)
}

/// Reads the registry from `path`, or the bundled campus data when unset.
pub fn load_buildings(path: Option<&str>) -> Result<Vec<Building>, CustomError> {
	let buildings = match path {
		Some(path) => {
			let json = std::fs::read_to_string(path)
				.map_err(|e| CustomError::Registry(format!("{}: {}", path, e)))?;
			parse_buildings(&json)?
		}
		None => parse_buildings(EMBEDDED_BUILDINGS)?,
	};

	log::info!("Loaded {} buildings", buildings.len());

	Ok(buildings)
}

pub fn sort_alphabetically(registry: &[Building]) -> Vec<&Building> {
	let mut buildings: Vec<&Building> = registry.iter().collect();
	buildings.sort_by(|a, b| {
		a.name
			.to_lowercase()
			.cmp(&b.name.to_lowercase())
			.then_with(|| a.name.cmp(&b.name))
	});
	buildings
}

pub fn find_building<'a>(registry: &'a [Building], name: &str) -> Option<&'a Building> {
	registry.iter().find(|b| b.name == name)
}

pub fn compose_location(building: &str, floor: &str) -> String {
	format!("{}{}{}", building, LOCATION_SEPARATOR, floor)
}

/// Splits on the last separator, so free-text building names may contain " - ".
pub fn split_location(location: &str) -> Option<(&str, &str)> {
	location
		.rsplit_once(LOCATION_SEPARATOR)
		.filter(|(building, floor)| !building.is_empty() && !floor.is_empty())
}

/// Page path of a location with percent-encoded segments.
pub fn location_path(location: &str) -> Option<String> {
	let (building, floor) = split_location(location)?;
	Some(format!(
		"/bathrooms/{}/{}",
		urlencoding::encode(building),
		urlencoding::encode(floor)
	))
}

/// Every building × floor pair of the registry.
pub fn known_locations(registry: &[Building]) -> Vec<String> {
	registry
		.iter()
		.flat_map(|b| b.floors.iter().map(|floor| compose_location(&b.name, floor)))
		.collect()
}

fn required<'a>(value: Option<&'a str>, message: &str) -> Result<&'a str, CustomError> {
	value
		.map(str::trim)
		.filter(|v| !v.is_empty())
		.ok_or_else(|| CustomError::BadRequest(message.to_string()))
}

/// Builds the location string of a submission.
pub fn location_from_selection(
	registry: &[Building],
	selection: &AddReviewSchema,
) -> Result<String, CustomError> {
	let building = required(Some(selection.building.as_str()), "Please select a building")?;
	let floor = required(Some(selection.floor.as_str()), "Please select a bathroom")?;

	if building == OTHER {
		let custom_building =
			required(selection.custom_building.as_deref(), "Please enter a building name")?;
		let custom_floor =
			required(selection.custom_floor.as_deref(), "Please enter a bathroom location")?;
		return Ok(compose_location(custom_building, custom_floor));
	}

	let known = find_building(registry, building)
		.ok_or_else(|| CustomError::BadRequest(format!("Unknown building {}", building)))?;

	if floor == OTHER {
		let custom_floor =
			required(selection.custom_floor.as_deref(), "Please enter a bathroom location")?;
		return Ok(compose_location(&known.name, custom_floor));
	}

	if !known.floors.iter().any(|f| f == floor) {
		return Err(CustomError::BadRequest(format!(
			"{} has no bathroom {}",
			known.name, floor
		)));
	}

	Ok(compose_location(&known.name, floor))
}
