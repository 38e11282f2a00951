use serde::{Deserialize, Serialize};

/// Claims of a token issued by the identity provider.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
	pub sub: String,
	#[serde(default)]
	pub name: Option<String>,
	#[serde(default)]
	pub email: Option<String>,
	#[serde(default)]
	pub iat: usize,
	pub exp: usize,
}
