// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Listing read operations behind the HTTP layer.

use std::sync::Arc;

use realty_server_auth::{ListingId, UserId};
use tracing::{debug, instrument};

use crate::error::{ListingError, Result};
use crate::filter::ListingFilter;
use crate::store::ListingStore;
use crate::types::{Listing, ListingSummary};

#[derive(Clone)]
pub struct ListingService {
	store: Arc<dyn ListingStore>,
}

impl ListingService {
	pub fn new(store: Arc<dyn ListingStore>) -> Self {
		Self { store }
	}

	/// Search listings. A search with no results is [`ListingError::NotFound`].
	#[instrument(skip(self), fields(unconstrained = filter.is_unconstrained()))]
	pub async fn list_listings(&self, filter: &ListingFilter) -> Result<Vec<ListingSummary>> {
		let listings = self.store.query(filter).await?;
		if listings.is_empty() {
			debug!("no listings matched");
			return Err(ListingError::NotFound);
		}

		debug!(count = listings.len(), "listings matched");
		Ok(listings.into_iter().map(ListingSummary::from).collect())
	}

	#[instrument(skip(self), fields(listing_id = %id))]
	pub async fn get_listing(&self, id: ListingId) -> Result<Listing> {
		self.store.find_by_id(id).await?.ok_or(ListingError::NotFound)
	}

	/// The realtor who owns listing `id`.
	pub async fn realtor_of(&self, id: ListingId) -> Result<UserId> {
		self.get_listing(id).await.map(|listing| listing.realtor_id)
	}
}
