// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Helpers for pulling credentials out of HTTP requests.

use http::header::AUTHORIZATION;
use http::HeaderMap;
use tracing::instrument;

pub const BEARER_PREFIX: &str = "Bearer ";

/// Extract the bearer token from the `Authorization` header.
///
/// The prefix is matched exactly (`Bearer ` with one space). The token should
/// be treated as a secret and never logged.
#[instrument(level = "trace", skip_all)]
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
	headers
		.get(AUTHORIZATION)?
		.to_str()
		.ok()?
		.strip_prefix(BEARER_PREFIX)
		.map(str::to_string)
}
