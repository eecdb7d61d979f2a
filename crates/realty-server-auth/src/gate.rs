// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The authorization gate: the single entry point for request authorization.
//!
//! # Pipeline
//!
//! ```text
//! descriptor unrestricted? ── yes ──► Allowed(Anonymous)      (no token parsed)
//!        │ no
//!        ▼
//! verify token ── fail ──► Denied(Unauthenticated)
//!        ▼
//! resolve user ── absent ──► Denied(Unauthenticated)
//!        ▼
//! role policy ── no ──► Denied(Forbidden)
//!        ▼
//! owner-scoped? ── no ──► Allowed(User)
//!        │ yes
//!        ▼
//! ownership ── listing absent ──► Denied(NotFound)
//!           ── not owner ──► Denied(Forbidden)
//!           ── owner ──► Allowed(User)
//! ```
//!
//! Nothing is cached between calls: the role and the owner are re-read from
//! the stores on every request. At most one user lookup and one ownership
//! lookup are issued, in that order. Store failures are returned as
//! [`GateError::Infrastructure`], never as a denial.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use http::HeaderMap;
use tracing::{debug, instrument, warn};

use crate::config::AuthConfig;
use crate::decision::{AuthDecision, Caller};
use crate::error::{AuthError, GateError, PolicyDenial, StoreError};
use crate::identity::{IdentityResolver, IdentityStore};
use crate::middleware::extract_bearer_token;
use crate::operation::{Operation, OperationDescriptor, OperationRegistry};
use crate::ownership::{OwnershipChecker, OwnershipStore};
use crate::policy;
use crate::token::{JwtVerifier, TokenVerifier};
use crate::types::{ListingId, User};

#[derive(Clone)]
pub struct AuthorizationGate {
	verifier: Arc<dyn TokenVerifier>,
	identities: IdentityResolver,
	ownership: OwnershipChecker,
	registry: Arc<OperationRegistry>,
	lookup_timeout: Option<Duration>,
}

impl AuthorizationGate {
	pub fn new(
		verifier: Arc<dyn TokenVerifier>,
		identity_store: Arc<dyn IdentityStore>,
		ownership_store: Arc<dyn OwnershipStore>,
		registry: Arc<OperationRegistry>,
	) -> Self {
		Self {
			verifier,
			identities: IdentityResolver::new(identity_store),
			ownership: OwnershipChecker::new(ownership_store),
			registry,
			lookup_timeout: None,
		}
	}

	/// Build a gate with an HS256 verifier over the configured key.
	pub fn from_config(
		config: &AuthConfig,
		identity_store: Arc<dyn IdentityStore>,
		ownership_store: Arc<dyn OwnershipStore>,
		registry: Arc<OperationRegistry>,
	) -> Self {
		let verifier = Arc::new(JwtVerifier::new(&config.token_secret));
		let gate = Self::new(verifier, identity_store, ownership_store, registry);
		match config.lookup_timeout {
			Some(timeout) => gate.with_lookup_timeout(timeout),
			None => gate,
		}
	}

	pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
		self.lookup_timeout = Some(timeout);
		self
	}

	/// Authorize `operation` as described by the registry.
	#[instrument(
		level = "debug",
		skip(self, raw_token),
		fields(operation = %operation, listing_id = ?listing_id.map(ListingId::get))
	)]
	pub async fn authorize(
		&self,
		raw_token: Option<&str>,
		operation: Operation,
		listing_id: Option<ListingId>,
	) -> Result<AuthDecision, GateError> {
		let Some(descriptor) = self.registry.get(operation) else {
			warn!("authorization requested for unregistered operation");
			return Err(GateError::UnregisteredOperation(operation));
		};
		self.authorize_with(raw_token, descriptor, listing_id).await
	}

	/// Authorize against an explicit descriptor.
	pub async fn authorize_with(
		&self,
		raw_token: Option<&str>,
		descriptor: &OperationDescriptor,
		listing_id: Option<ListingId>,
	) -> Result<AuthDecision, GateError> {
		if descriptor.is_unrestricted() {
			debug!("operation has no requirements, allowing anonymously");
			return Ok(AuthDecision::Allowed(Caller::Anonymous));
		}

		match self.evaluate(raw_token, descriptor, listing_id).await {
			Ok(user) => {
				debug!(user_id = %user.id, role = %user.role, "allowed");
				Ok(AuthDecision::Allowed(Caller::User(user)))
			}
			Err(err) => {
				let message = err.to_string();
				match err.classify() {
					Ok(reason) => {
						debug!(%reason, error = %message, "denied");
						Ok(AuthDecision::Denied(reason))
					}
					Err(gate_err) => {
						warn!(error = %message, "authorization lookup failed");
						Err(gate_err)
					}
				}
			}
		}
	}

	/// Extract the bearer token from `headers` and authorize.
	pub async fn authorize_request(
		&self,
		headers: &HeaderMap,
		operation: Operation,
		listing_id: Option<ListingId>,
	) -> Result<AuthDecision, GateError> {
		let token = extract_bearer_token(headers);
		self.authorize(token.as_deref(), operation, listing_id).await
	}

	async fn evaluate(
		&self,
		raw_token: Option<&str>,
		descriptor: &OperationDescriptor,
		listing_id: Option<ListingId>,
	) -> Result<User, AuthError> {
		let claims = self.verifier.verify(raw_token)?;
		let user = self.bounded(self.identities.resolve(claims.id)).await?;

		if !policy::allows(&descriptor.required_roles, user.role) {
			return Err(PolicyDenial::RoleNotPermitted { role: user.role }.into());
		}

		if !descriptor.owner_scoped {
			return Ok(user);
		}

		let listing_id = listing_id.ok_or(PolicyDenial::ResourceUnspecified)?;
		if self.bounded(self.ownership.is_owner(listing_id, user.id)).await? {
			Ok(user)
		} else {
			Err(PolicyDenial::NotOwner { listing_id }.into())
		}
	}

	async fn bounded<T>(
		&self,
		lookup: impl Future<Output = Result<T, AuthError>>,
	) -> Result<T, AuthError> {
		match self.lookup_timeout {
			Some(limit) => tokio::time::timeout(limit, lookup)
				.await
				.map_err(|_| AuthError::Infrastructure(StoreError::Timeout))?,
			None => lookup.await,
		}
	}
}
