// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core type definitions for authorization.
//!
//! - **ID newtypes**: [`UserId`] and [`ListingId`] wrap the integer keys used
//!   by the stores so the two can never be swapped by accident
//! - **Roles**: the closed [`Role`] enumeration and the immutable [`RoleSet`]
//! - **Users**: the resolved identity record ([`User`])

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// ID Newtypes
// =============================================================================

macro_rules! define_id_type {
	($name:ident, $doc:expr) => {
		#[doc = $doc]
		#[derive(
			Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
		)]
		#[serde(transparent)]
		pub struct $name(i64);

		impl $name {
			pub const fn new(id: i64) -> Self {
				Self(id)
			}

			/// Get the raw integer key.
			pub const fn get(self) -> i64 {
				self.0
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				write!(f, "{}", self.0)
			}
		}

		impl FromStr for $name {
			type Err = std::num::ParseIntError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				s.parse().map(Self)
			}
		}

		impl From<i64> for $name {
			fn from(id: i64) -> Self {
				Self(id)
			}
		}

		impl From<$name> for i64 {
			fn from(id: $name) -> Self {
				id.0
			}
		}
	};
}

define_id_type!(UserId, "Unique identifier for a user.");
define_id_type!(ListingId, "Unique identifier for a property listing.");

// =============================================================================
// Roles
// =============================================================================

/// The kind of account a user holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
	/// Browses listings and sends inquiries.
	Buyer,
	/// Publishes and manages their own listings.
	Realtor,
	/// Operator account. Gets no implicit bypass; it passes only where listed.
	Admin,
}

impl Role {
	/// Returns all roles.
	pub fn all() -> &'static [Role] {
		&[Role::Buyer, Role::Realtor, Role::Admin]
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			Role::Buyer => "BUYER",
			Role::Realtor => "REALTOR",
			Role::Admin => "ADMIN",
		}
	}
}

impl fmt::Display for Role {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Returned when a string does not name a [`Role`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
	type Err = UnknownRole;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Role::all()
			.iter()
			.copied()
			.find(|role| role.as_str().eq_ignore_ascii_case(s))
			.ok_or_else(|| UnknownRole(s.to_string()))
	}
}

/// An immutable set of roles. Empty means "no role requirement".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleSet(BTreeSet<Role>);

impl RoleSet {
	/// The empty set.
	pub fn none() -> Self {
		Self::default()
	}

	pub fn of(roles: &[Role]) -> Self {
		roles.iter().copied().collect()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn contains(&self, role: Role) -> bool {
		self.0.contains(&role)
	}

	pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
		self.0.iter().copied()
	}
}

impl FromIterator<Role> for RoleSet {
	fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
		Self(iter.into_iter().collect())
	}
}

impl fmt::Display for RoleSet {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let names: Vec<&str> = self.0.iter().map(Role::as_str).collect();
		write!(f, "[{}]", names.join(", "))
	}
}

// =============================================================================
// Users
// =============================================================================

/// A user record as held by the identity store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
	pub id: UserId,
	pub display_name: String,
	pub email: Option<String>,
	pub role: Role,
}

impl User {
	pub fn new(id: UserId, display_name: impl Into<String>, role: Role) -> Self {
		Self {
			id,
			display_name: display_name.into(),
			email: None,
			role,
		}
	}

	pub fn with_email(mut self, email: impl Into<String>) -> Self {
		self.email = Some(email.into());
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	mod ids {
		use super::*;

		#[test]
		fn ids_serialize_as_plain_integers() {
			assert_eq!(serde_json::to_string(&UserId::new(7)).unwrap(), "7");
			let id: ListingId = serde_json::from_str("42").unwrap();
			assert_eq!(id, ListingId::new(42));
		}

		#[test]
		fn ids_parse_from_path_segments() {
			assert_eq!("15".parse::<ListingId>().unwrap(), ListingId::new(15));
			assert!("abc".parse::<ListingId>().is_err());
		}
	}

	mod roles {
		use super::*;

		#[test]
		fn roles_use_upper_case_wire_names() {
			assert_eq!(serde_json::to_string(&Role::Realtor).unwrap(), "\"REALTOR\"");
			let role: Role = serde_json::from_str("\"BUYER\"").unwrap();
			assert_eq!(role, Role::Buyer);
		}

		#[test]
		fn from_str_accepts_any_case() {
			assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
			assert_eq!("Realtor".parse::<Role>().unwrap(), Role::Realtor);
			assert_eq!(
				"landlord".parse::<Role>().unwrap_err(),
				UnknownRole("landlord".to_string())
			);
		}

		#[test]
		fn role_set_membership() {
			let set = RoleSet::of(&[Role::Realtor, Role::Admin]);
			assert!(set.contains(Role::Realtor));
			assert!(!set.contains(Role::Buyer));
			assert!(!set.is_empty());
			assert!(RoleSet::none().is_empty());
			assert_eq!(set.to_string(), "[REALTOR, ADMIN]");
		}
	}
}
