// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization configuration.
//!
//! Environment variables are read only by [`AuthConfig::from_env`]; everything
//! downstream receives the key explicitly.

use std::env;
use std::fmt;
use std::time::Duration;

use realty_common_config::{require_secret_env, RequiredSecretError, SecretString};
use thiserror::Error;

/// Token signing key shared with the account service (or `_FILE` variant).
pub const TOKEN_SECRET_ENV_VAR: &str = "REALTY_SERVER_AUTH_TOKEN_SECRET";
/// Optional upper bound, in milliseconds, on each store lookup.
pub const LOOKUP_TIMEOUT_ENV_VAR: &str = "REALTY_SERVER_AUTH_LOOKUP_TIMEOUT_MS";

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error(transparent)]
	Secret(#[from] RequiredSecretError),

	#[error("{0} is empty")]
	EmptySecret(&'static str),

	#[error("invalid {var}: {value}")]
	InvalidTimeout { var: &'static str, value: String },
}

#[derive(Clone)]
pub struct AuthConfig {
	/// HS256 key used to verify bearer tokens.
	pub token_secret: SecretString,
	/// Bound on each identity/ownership lookup. `None` leaves timeouts to the
	/// stores.
	pub lookup_timeout: Option<Duration>,
}

impl fmt::Debug for AuthConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("AuthConfig")
			.field("token_secret", &self.token_secret)
			.field("lookup_timeout", &self.lookup_timeout)
			.finish()
	}
}

impl AuthConfig {
	pub fn new(token_secret: impl Into<SecretString>) -> Self {
		Self {
			token_secret: token_secret.into(),
			lookup_timeout: None,
		}
	}

	pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
		self.lookup_timeout = Some(timeout);
		self
	}

	/// Load from `REALTY_SERVER_AUTH_TOKEN_SECRET[_FILE]` and
	/// `REALTY_SERVER_AUTH_LOOKUP_TIMEOUT_MS`.
	pub fn from_env() -> Result<Self, ConfigError> {
		let token_secret = require_secret_env(TOKEN_SECRET_ENV_VAR)?;
		if token_secret.is_empty() {
			return Err(ConfigError::EmptySecret(TOKEN_SECRET_ENV_VAR));
		}

		let lookup_timeout = match env::var(LOOKUP_TIMEOUT_ENV_VAR) {
			Ok(raw) if !raw.trim().is_empty() => {
				let millis: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidTimeout {
					var: LOOKUP_TIMEOUT_ENV_VAR,
					value: raw.clone(),
				})?;
				Some(Duration::from_millis(millis))
			}
			_ => None,
		};

		Ok(Self {
			token_secret,
			lookup_timeout,
		})
	}
}
