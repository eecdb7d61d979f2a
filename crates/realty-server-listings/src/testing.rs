// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! In-memory listing store for tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, RwLock};

use async_trait::async_trait;
use realty_server_auth::{ListingId, OwnershipStore, StoreError, UserId};

use crate::filter::ListingFilter;
use crate::store::ListingStore;
use crate::types::{Listing, PropertyType};

/// A listing with one image named `img-{id}`.
pub fn sample_listing(
	id: i64,
	city: &str,
	price: f64,
	property_type: PropertyType,
	realtor_id: i64,
) -> Listing {
	Listing {
		id: ListingId::new(id),
		address: format!("{id} Al-Souq"),
		city: city.to_string(),
		price,
		property_type,
		bedrooms: 3,
		bathrooms: 2.0,
		realtor_id: UserId::new(realtor_id),
		images: vec![format!("img-{id}")],
	}
}

/// Listings kept in id order. Serves both searches and ownership lookups.
#[derive(Default)]
pub struct InMemoryListingStore {
	listings: RwLock<BTreeMap<ListingId, Listing>>,
	last_filter: Mutex<Option<ListingFilter>>,
	unavailable: AtomicBool,
}

impl InMemoryListingStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_listing(self, listing: Listing) -> Self {
		self.listings.write().unwrap().insert(listing.id, listing);
		self
	}

	pub fn set_unavailable(&self, unavailable: bool) {
		self.unavailable.store(unavailable, Ordering::SeqCst);
	}

	/// The filter most recently passed to [`ListingStore::query`].
	pub fn last_filter(&self) -> Option<ListingFilter> {
		self.last_filter.lock().unwrap().clone()
	}

	fn check_available(&self) -> Result<(), StoreError> {
		if self.unavailable.load(Ordering::SeqCst) {
			Err(StoreError::Unavailable("listing store offline".to_string()))
		} else {
			Ok(())
		}
	}
}

#[async_trait]
impl ListingStore for InMemoryListingStore {
	async fn query(&self, filter: &ListingFilter) -> Result<Vec<Listing>, StoreError> {
		*self.last_filter.lock().unwrap() = Some(filter.clone());
		self.check_available()?;
		Ok(self
			.listings
			.read()
			.unwrap()
			.values()
			.filter(|listing| filter.matches(listing))
			.cloned()
			.collect())
	}

	async fn find_by_id(&self, id: ListingId) -> Result<Option<Listing>, StoreError> {
		self.check_available()?;
		Ok(self.listings.read().unwrap().get(&id).cloned())
	}
}

#[async_trait]
impl OwnershipStore for InMemoryListingStore {
	async fn find_owner_of(&self, listing_id: ListingId) -> Result<Option<UserId>, StoreError> {
		self.check_available()?;
		Ok(self
			.listings
			.read()
			.unwrap()
			.get(&listing_id)
			.map(|listing| listing.realtor_id))
	}
}
