// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Bearer token verification.
//!
//! Tokens are HS256 JWTs minted by the account service with the payload
//! `{ id, name, iat, exp }`. The verifier checks the signature against the
//! configured key, then requires `exp` to be strictly in the future. On any
//! failure only an [`InvalidTokenError`] reason comes back; unverified claims
//! are dropped.

use std::fmt;

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use realty_common_config::SecretString;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::InvalidTokenError;
use crate::types::UserId;

/// Verified token payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
	/// Subject: the user the token was issued to.
	pub id: UserId,
	/// Display name at issuance. Informational only.
	#[serde(default)]
	pub name: String,
	/// Issued at (seconds since epoch).
	pub iat: i64,
	/// Expiry (seconds since epoch).
	pub exp: i64,
}

/// Checks a raw bearer token and yields its claims.
pub trait TokenVerifier: Send + Sync {
	fn verify(&self, token: Option<&str>) -> Result<Claims, InvalidTokenError>;
}

/// HS256 verifier over a shared secret.
pub struct JwtVerifier {
	key: DecodingKey,
	validation: Validation,
}

impl JwtVerifier {
	/// Build a verifier for tokens signed with `secret`.
	pub fn new(secret: &SecretString) -> Self {
		let mut validation = Validation::new(Algorithm::HS256);
		// Expiry is checked in `verify_at` against an explicit clock, with no leeway.
		validation.validate_exp = false;
		validation.leeway = 0;
		validation.required_spec_claims = ["exp".to_string()].into_iter().collect();

		Self {
			key: DecodingKey::from_secret(secret.expose().as_bytes()),
			validation,
		}
	}

	/// Verify `token` as of `now` (seconds since epoch).
	#[instrument(level = "trace", skip(self, token))]
	pub fn verify_at(&self, token: Option<&str>, now: i64) -> Result<Claims, InvalidTokenError> {
		let token = match token.map(str::trim) {
			Some(token) if !token.is_empty() => token,
			_ => return Err(InvalidTokenError::Missing),
		};

		let data = decode::<Claims>(token, &self.key, &self.validation).map_err(|e| {
			let reason = match e.kind() {
				ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
					InvalidTokenError::BadSignature
				}
				ErrorKind::ExpiredSignature => InvalidTokenError::Expired,
				_ => InvalidTokenError::Malformed,
			};
			debug!(error = %e, ?reason, "token rejected");
			reason
		})?;

		if now >= data.claims.exp {
			debug!(exp = data.claims.exp, now, "token rejected: expired");
			return Err(InvalidTokenError::Expired);
		}

		Ok(data.claims)
	}
}

impl TokenVerifier for JwtVerifier {
	fn verify(&self, token: Option<&str>) -> Result<Claims, InvalidTokenError> {
		self.verify_at(token, Utc::now().timestamp())
	}
}

impl fmt::Debug for JwtVerifier {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("JwtVerifier")
			.field("algorithm", &Algorithm::HS256)
			.field("key", &realty_common_config::REDACTED)
			.finish()
	}
}
