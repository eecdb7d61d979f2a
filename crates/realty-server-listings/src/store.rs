// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use async_trait::async_trait;
use realty_server_auth::{ListingId, StoreError};

use crate::filter::ListingFilter;
use crate::types::Listing;

/// Read access to listings.
#[async_trait]
pub trait ListingStore: Send + Sync {
	/// All listings satisfying `filter`.
	async fn query(&self, filter: &ListingFilter) -> Result<Vec<Listing>, StoreError>;

	async fn find_by_id(&self, id: ListingId) -> Result<Option<Listing>, StoreError>;
}
