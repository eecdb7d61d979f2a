// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The gate's output.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{User, UserId};

/// Who the request runs as once it has been allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Caller {
	/// The operation had no requirements; no token was examined.
	Anonymous,
	/// A verified, resolved user.
	User(User),
}

impl Caller {
	pub fn user(&self) -> Option<&User> {
		match self {
			Caller::Anonymous => None,
			Caller::User(user) => Some(user),
		}
	}

	pub fn user_id(&self) -> Option<UserId> {
		self.user().map(|user| user.id)
	}

	pub fn is_anonymous(&self) -> bool {
		matches!(self, Caller::Anonymous)
	}
}

/// Caller-facing reason for a denial. Maps one-to-one onto 401/403/404.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialReason {
	Unauthenticated,
	Forbidden,
	NotFound,
}

impl DenialReason {
	pub fn status_code(&self) -> u16 {
		match self {
			DenialReason::Unauthenticated => 401,
			DenialReason::Forbidden => 403,
			DenialReason::NotFound => 404,
		}
	}
}

impl fmt::Display for DenialReason {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			DenialReason::Unauthenticated => write!(f, "unauthenticated"),
			DenialReason::Forbidden => write!(f, "forbidden"),
			DenialReason::NotFound => write!(f, "not_found"),
		}
	}
}

/// Result of authorizing one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthDecision {
	Allowed(Caller),
	Denied(DenialReason),
}

impl AuthDecision {
	pub fn is_allowed(&self) -> bool {
		matches!(self, AuthDecision::Allowed(_))
	}

	pub fn caller(&self) -> Option<&Caller> {
		match self {
			AuthDecision::Allowed(caller) => Some(caller),
			AuthDecision::Denied(_) => None,
		}
	}

	pub fn denial(&self) -> Option<DenialReason> {
		match self {
			AuthDecision::Allowed(_) => None,
			AuthDecision::Denied(reason) => Some(*reason),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::types::Role;

	#[test]
	fn denial_reasons_map_to_distinct_status_codes() {
		assert_eq!(DenialReason::Unauthenticated.status_code(), 401);
		assert_eq!(DenialReason::Forbidden.status_code(), 403);
		assert_eq!(DenialReason::NotFound.status_code(), 404);
	}

	#[test]
	fn allowed_user_exposes_identity() {
		let user = User::new(UserId::new(5), "Rana", Role::Realtor);
		let decision = AuthDecision::Allowed(Caller::User(user.clone()));

		assert!(decision.is_allowed());
		assert_eq!(decision.denial(), None);
		assert_eq!(decision.caller().and_then(Caller::user), Some(&user));
		assert_eq!(decision.caller().and_then(Caller::user_id), Some(UserId::new(5)));
	}

	#[test]
	fn anonymous_caller_has_no_user() {
		let caller = Caller::Anonymous;
		assert!(caller.is_anonymous());
		assert!(caller.user_id().is_none());
	}

	#[test]
	fn denied_has_no_caller() {
		let decision = AuthDecision::Denied(DenialReason::Forbidden);
		assert!(!decision.is_allowed());
		assert!(decision.caller().is_none());
		assert_eq!(decision.denial(), Some(DenialReason::Forbidden));
	}
}
