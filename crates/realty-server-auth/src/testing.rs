// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! In-memory stores and helpers for tests in this and dependent crates.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

use crate::error::{InvalidTokenError, StoreError};
use crate::identity::IdentityStore;
use crate::ownership::OwnershipStore;
use crate::token::{Claims, TokenVerifier};
use crate::types::{ListingId, User, UserId};

/// Sign `claims` with HS256 the way the account service does.
pub fn sign_token(claims: &Claims, secret: &str) -> String {
	encode(
		&Header::new(Algorithm::HS256),
		claims,
		&EncodingKey::from_secret(secret.as_bytes()),
	)
	.expect("HS256 encoding cannot fail for serializable claims")
}

/// User store backed by a map, with a lookup counter and failure switches.
#[derive(Default)]
pub struct InMemoryUserStore {
	users: RwLock<HashMap<UserId, User>>,
	lookups: AtomicUsize,
	unavailable: AtomicBool,
	delay: Option<Duration>,
}

impl InMemoryUserStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_user(self, user: User) -> Self {
		self.insert(user);
		self
	}

	/// Sleep this long before answering each lookup.
	pub fn with_delay(mut self, delay: Duration) -> Self {
		self.delay = Some(delay);
		self
	}

	pub fn insert(&self, user: User) {
		self.users.write().unwrap().insert(user.id, user);
	}

	pub fn remove(&self, id: UserId) {
		self.users.write().unwrap().remove(&id);
	}

	pub fn set_unavailable(&self, unavailable: bool) {
		self.unavailable.store(unavailable, Ordering::SeqCst);
	}

	pub fn lookup_count(&self) -> usize {
		self.lookups.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl IdentityStore for InMemoryUserStore {
	async fn find_user_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
		self.lookups.fetch_add(1, Ordering::SeqCst);
		if let Some(delay) = self.delay {
			tokio::time::sleep(delay).await;
		}
		if self.unavailable.load(Ordering::SeqCst) {
			return Err(StoreError::Unavailable("user store offline".to_string()));
		}
		Ok(self.users.read().unwrap().get(&id).cloned())
	}
}

/// Listing-owner map with a lookup counter and a failure switch.
#[derive(Default)]
pub struct InMemoryOwnershipStore {
	owners: RwLock<HashMap<ListingId, UserId>>,
	lookups: AtomicUsize,
	unavailable: AtomicBool,
}

impl InMemoryOwnershipStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_listing(self, listing_id: ListingId, owner: UserId) -> Self {
		self.transfer(listing_id, owner);
		self
	}

	/// Set (or change) the owner of a listing.
	pub fn transfer(&self, listing_id: ListingId, owner: UserId) {
		self.owners.write().unwrap().insert(listing_id, owner);
	}

	pub fn set_unavailable(&self, unavailable: bool) {
		self.unavailable.store(unavailable, Ordering::SeqCst);
	}

	pub fn lookup_count(&self) -> usize {
		self.lookups.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl OwnershipStore for InMemoryOwnershipStore {
	async fn find_owner_of(&self, listing_id: ListingId) -> Result<Option<UserId>, StoreError> {
		self.lookups.fetch_add(1, Ordering::SeqCst);
		if self.unavailable.load(Ordering::SeqCst) {
			return Err(StoreError::Unavailable("listing store offline".to_string()));
		}
		Ok(self.owners.read().unwrap().get(&listing_id).copied())
	}
}

/// Wraps a verifier and counts how often it is called.
pub struct CountingVerifier {
	inner: Arc<dyn TokenVerifier>,
	calls: AtomicUsize,
}

impl CountingVerifier {
	pub fn new(inner: Arc<dyn TokenVerifier>) -> Self {
		Self {
			inner,
			calls: AtomicUsize::new(0),
		}
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}

impl TokenVerifier for CountingVerifier {
	fn verify(&self, token: Option<&str>) -> Result<Claims, InvalidTokenError> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		self.inner.verify(token)
	}
}
