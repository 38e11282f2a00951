use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct Coordinates {
	pub latitude: f64,
	pub longitude: f64,
}

impl Coordinates {
	/// Returns `None` for non-finite or out-of-range values.
	pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
		if !latitude.is_finite() || !longitude.is_finite() {
			return None;
		}
		if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
			return None;
		}
		Some(Self {
			latitude,
			longitude,
		})
	}
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Building {
	pub name: String,
	pub floors: Vec<String>,
	#[serde(default)]
	pub coordinates: Option<Coordinates>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct BuildingWithDistance {
	#[serde(flatten)]
	pub building: Building,
	pub distance_km: f64,
}

/// One entry of the building selection list.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct BuildingChoice {
	pub name: String,
	pub floors: Vec<String>,
	pub distance_km: Option<f64>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct BuildingChoices {
	pub buildings: Vec<BuildingChoice>,
	pub selected: Option<String>,
	pub advisory: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct PositionOptions {
	pub lat: Option<f64>,
	pub lon: Option<f64>,
	pub geo_error: Option<u16>,
}
