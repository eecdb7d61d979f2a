// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Listing ownership checks.
//!
//! The owner is read from the store on every check so that a transfer of a
//! listing takes effect on the next request.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::error::{AuthError, StoreError};
use crate::types::{ListingId, UserId};

/// Read access to listing ownership.
#[async_trait]
pub trait OwnershipStore: Send + Sync {
	/// The realtor who owns `listing_id`, or `None` if the listing does not exist.
	async fn find_owner_of(&self, listing_id: ListingId) -> Result<Option<UserId>, StoreError>;
}

#[derive(Clone)]
pub struct OwnershipChecker {
	store: Arc<dyn OwnershipStore>,
}

impl OwnershipChecker {
	pub fn new(store: Arc<dyn OwnershipStore>) -> Self {
		Self { store }
	}

	/// Returns whether `candidate` owns `listing_id`.
	///
	/// A listing that does not exist is [`AuthError::ResourceNotFound`], never
	/// `Ok(false)`.
	#[instrument(level = "debug", skip(self), fields(listing_id = %listing_id, candidate = %candidate))]
	pub async fn is_owner(&self, listing_id: ListingId, candidate: UserId) -> Result<bool, AuthError> {
		let owner = self
			.store
			.find_owner_of(listing_id)
			.await?
			.ok_or(AuthError::ResourceNotFound(listing_id))?;

		let is_owner = owner == candidate;
		debug!(owner = %owner, is_owner, "ownership checked");
		Ok(is_owner)
	}
}
