// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use realty_server_auth::StoreError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListingError {
	/// Nothing matched: an unknown id, or a search with no results.
	#[error("listing not found")]
	NotFound,

	#[error(transparent)]
	Store(#[from] StoreError),
}

impl ListingError {
	pub fn status_code(&self) -> u16 {
		match self {
			ListingError::NotFound => 404,
			ListingError::Store(StoreError::Timeout) => 504,
			ListingError::Store(_) => 503,
		}
	}
}

pub type Result<T> = std::result::Result<T, ListingError>;
