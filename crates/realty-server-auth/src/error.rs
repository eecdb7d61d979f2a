// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization error types.
//!
//! Every step of the authorization pipeline fails with an [`AuthError`]. The
//! gate folds all of them into a [`DenialReason`] except store failures, which
//! leave the gate as [`GateError::Infrastructure`] so callers can retry them.

use thiserror::Error;

use crate::decision::DenialReason;
use crate::operation::Operation;
use crate::types::{ListingId, Role, UserId};

/// Why a bearer token was rejected. Carries no claim data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidTokenError {
	#[error("no bearer token supplied")]
	Missing,

	#[error("malformed token")]
	Malformed,

	#[error("token signature does not match the verification key")]
	BadSignature,

	#[error("token expired")]
	Expired,
}

/// Failure of an external store (identity or listing persistence).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
	#[error("store unavailable: {0}")]
	Unavailable(String),

	#[error("store lookup timed out")]
	Timeout,

	#[error("store internal error: {0}")]
	Internal(String),
}

/// A policy check that evaluated to "no".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PolicyDenial {
	#[error("role {role} is not permitted for this operation")]
	RoleNotPermitted { role: Role },

	#[error("caller is not the owner of listing {listing_id}")]
	NotOwner { listing_id: ListingId },

	#[error("owner-scoped operation invoked without a listing id")]
	ResourceUnspecified,
}

/// Errors raised inside the authorization pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
	#[error("invalid token: {0}")]
	InvalidToken(#[from] InvalidTokenError),

	#[error("user not found: {0}")]
	IdentityNotFound(UserId),

	#[error("listing not found: {0}")]
	ResourceNotFound(ListingId),

	#[error("access denied: {0}")]
	PolicyDenied(#[from] PolicyDenial),

	#[error(transparent)]
	Infrastructure(#[from] StoreError),
}

impl AuthError {
	/// Returns true if this error should be logged at error level.
	pub fn is_internal(&self) -> bool {
		matches!(self, AuthError::Infrastructure(_))
	}

	/// Returns the HTTP status code for this error.
	///
	/// A missing identity reports 401 like a bad token so that the response
	/// never reveals which user ids exist.
	pub fn status_code(&self) -> u16 {
		match self {
			AuthError::InvalidToken(_) | AuthError::IdentityNotFound(_) => 401,
			AuthError::PolicyDenied(_) => 403,
			AuthError::ResourceNotFound(_) => 404,
			AuthError::Infrastructure(_) => 500,
		}
	}

	/// Split into the caller-facing denial, or the error that must escape the
	/// gate.
	pub fn classify(self) -> Result<DenialReason, GateError> {
		match self {
			AuthError::InvalidToken(_) | AuthError::IdentityNotFound(_) => {
				Ok(DenialReason::Unauthenticated)
			}
			AuthError::PolicyDenied(_) => Ok(DenialReason::Forbidden),
			AuthError::ResourceNotFound(_) => Ok(DenialReason::NotFound),
			AuthError::Infrastructure(err) => Err(GateError::Infrastructure(err)),
		}
	}
}

/// The only errors [`crate::AuthorizationGate::authorize`] returns.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateError {
	/// A backing store failed; not an access decision.
	#[error("authorization infrastructure failure: {0}")]
	Infrastructure(StoreError),

	/// The operation was never registered at startup.
	#[error("operation {0} is not registered")]
	UnregisteredOperation(Operation),
}

impl GateError {
	pub fn status_code(&self) -> u16 {
		match self {
			GateError::Infrastructure(StoreError::Timeout) => 504,
			GateError::Infrastructure(_) => 503,
			GateError::UnregisteredOperation(_) => 500,
		}
	}

	/// Store failures may succeed on retry; registry gaps never will.
	pub fn is_retryable(&self) -> bool {
		matches!(self, GateError::Infrastructure(_))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn token_and_identity_failures_are_401() {
		assert_eq!(AuthError::from(InvalidTokenError::Expired).status_code(), 401);
		assert_eq!(AuthError::IdentityNotFound(UserId::new(3)).status_code(), 401);
	}

	#[test]
	fn policy_denial_is_403() {
		let err = AuthError::from(PolicyDenial::RoleNotPermitted { role: Role::Buyer });
		assert_eq!(err.status_code(), 403);
		assert_eq!(err.to_string(), "access denied: role BUYER is not permitted for this operation");
	}

	#[test]
	fn missing_listing_is_404() {
		assert_eq!(AuthError::ResourceNotFound(ListingId::new(9)).status_code(), 404);
	}

	#[test]
	fn store_failure_is_internal() {
		let err = AuthError::from(StoreError::Timeout);
		assert!(err.is_internal());
		assert!(!AuthError::from(InvalidTokenError::Missing).is_internal());
	}

	#[test]
	fn classify_hides_which_authentication_step_failed() {
		assert_eq!(
			AuthError::from(InvalidTokenError::BadSignature).classify(),
			Ok(DenialReason::Unauthenticated)
		);
		assert_eq!(
			AuthError::IdentityNotFound(UserId::new(1)).classify(),
			Ok(DenialReason::Unauthenticated)
		);
	}

	#[test]
	fn classify_lets_store_failures_escape() {
		let err = AuthError::from(StoreError::Unavailable("connection refused".into()));
		assert_eq!(
			err.classify(),
			Err(GateError::Infrastructure(StoreError::Unavailable(
				"connection refused".into()
			)))
		);
	}

	#[test]
	fn gate_error_retryability() {
		assert!(GateError::Infrastructure(StoreError::Timeout).is_retryable());
		assert_eq!(GateError::Infrastructure(StoreError::Timeout).status_code(), 504);
		assert!(!GateError::UnregisteredOperation(Operation::CreateListing).is_retryable());
	}
}
