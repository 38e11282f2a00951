use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RankingOrder {
	Asc,
	Desc,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct LocationRating {
	pub location: String,
	pub average_rating: Option<f64>,
	pub count: usize,
	pub rated_count: usize,
}

#[derive(Debug, Serialize, Clone)]
pub struct FilteredLocationRating {
	pub location: String,
	pub average_rating: Option<f64>,
	pub count: usize,
	pub rated_count: usize,
	pub path: Option<String>,
}

/// `top` ranks best first, `bottom` worst first.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RankingType {
	Top,
	Bottom,
}

impl From<RankingType> for RankingOrder {
	fn from(ranking_type: RankingType) -> Self {
		match ranking_type {
			RankingType::Top => RankingOrder::Desc,
			RankingType::Bottom => RankingOrder::Asc,
		}
	}
}

#[derive(Deserialize, Debug)]
pub struct RankingsOptions {
	#[serde(rename = "type")]
	pub ranking_type: Option<RankingType>,
	pub seeded: Option<bool>,
}
