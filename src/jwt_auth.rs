use core::fmt;
use std::future::{ready, Ready};

use actix_web::error::ErrorUnauthorized;
use actix_web::{dev::Payload, http, web, Error as ActixWebError, FromRequest, HttpRequest};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::Serialize;

use crate::models::{TokenClaims, ANONYMOUS};
use crate::AppState;

#[derive(Debug, Serialize)]
struct ErrorResponse {
	status: String,
	message: String,
}

impl fmt::Display for ErrorResponse {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match serde_json::to_string(&self) {
			Ok(json) => write!(f, "{}", json),
			Err(_) => write!(f, "{}", self.message),
		}
	}
}

fn unauthorized(message: &str) -> ActixWebError {
	ErrorUnauthorized(ErrorResponse {
		status: "fail".to_string(),
		message: message.to_string(),
	})
}

/// User authenticated by a token from the identity provider.
pub struct JwtMiddleware {
	pub user_id: String,
	pub display_name: Option<String>,
	pub email: Option<String>,
}

impl JwtMiddleware {
	pub fn author_name(&self, is_anonymous: bool) -> String {
		if is_anonymous {
			return ANONYMOUS.to_string();
		}
		let non_blank = |name: &Option<String>| name.clone().filter(|n| !n.trim().is_empty());

		non_blank(&self.display_name)
			.or_else(|| non_blank(&self.email))
			.unwrap_or_else(|| ANONYMOUS.to_string())
	}
}

fn bearer_token(req: &HttpRequest) -> Option<String> {
	req.cookie("token").map(|c| c.value().to_string()).or_else(|| {
		req.headers()
			.get(http::header::AUTHORIZATION)
			.and_then(|h| h.to_str().ok())
			.and_then(|h| h.strip_prefix("Bearer "))
			.map(|token| token.to_string())
	})
}

impl FromRequest for JwtMiddleware {
	type Error = ActixWebError;
	type Future = Ready<Result<Self, Self::Error>>;

	fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
		let Some(data) = req.app_data::<web::Data<AppState>>() else {
			log::error!("AppState is not registered");
			return ready(Err(unauthorized("Authentication is not configured")));
		};

		let Some(token) = bearer_token(req) else {
			return ready(Err(unauthorized(
				"You are not logged in, please provide token",
			)));
		};

		let claims = match decode::<TokenClaims>(
			&token,
			&DecodingKey::from_secret(data.env.jwt_secret.as_ref()),
			&Validation::default(),
		) {
			Ok(c) => c.claims,
			Err(e) => {
				log::debug!("Rejected token: {:?}", e);
				return ready(Err(unauthorized("Invalid token")));
			}
		};

		ready(Ok(JwtMiddleware {
			user_id: claims.sub,
			display_name: claims.name,
			email: claims.email,
		}))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn user(name: Option<&str>, email: Option<&str>) -> JwtMiddleware {
		JwtMiddleware {
			user_id: "uid".to_string(),
			display_name: name.map(str::to_string),
			email: email.map(str::to_string),
		}
	}

	#[test]
	fn author_name_prefers_display_name() {
		assert_eq!(user(Some("Jane"), Some("jane@umich.edu")).author_name(false), "Jane");
		assert_eq!(user(None, Some("jane@umich.edu")).author_name(false), "jane@umich.edu");
		assert_eq!(user(None, None).author_name(false), ANONYMOUS);
		assert_eq!(user(Some("Jane"), None).author_name(true), ANONYMOUS);
	}

	#[test]
	fn blank_display_name_falls_back_to_email() {
		assert_eq!(
			user(Some("  "), Some("jane@umich.edu")).author_name(false),
			"jane@umich.edu"
		);
		assert_eq!(user(Some(""), Some(" ")).author_name(false), ANONYMOUS);
	}
}
