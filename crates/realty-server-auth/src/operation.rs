// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Operation descriptors and the startup registry.
//!
//! Each protected action declares its access requirements once, in an
//! [`OperationRegistry`] built at startup. The registry is immutable after
//! [`OperationRegistryBuilder::build`]; the gate only reads it.
//!
//! | Operation             | Roles   | Owner-scoped |
//! |-----------------------|---------|--------------|
//! | `ListListings`        | any     | no           |
//! | `GetListing`          | any     | no           |
//! | `CreateListing`       | REALTOR | no           |
//! | `UpdateListing`       | REALTOR | yes          |
//! | `DeleteListing`       | REALTOR | yes          |
//! | `InquireListing`      | BUYER   | no           |
//! | `ListListingMessages` | REALTOR | yes          |

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Role, RoleSet};

/// The actions exposed by the listing API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
	ListListings,
	GetListing,
	CreateListing,
	UpdateListing,
	DeleteListing,
	InquireListing,
	ListListingMessages,
}

impl Operation {
	pub fn all() -> &'static [Operation] {
		&[
			Operation::ListListings,
			Operation::GetListing,
			Operation::CreateListing,
			Operation::UpdateListing,
			Operation::DeleteListing,
			Operation::InquireListing,
			Operation::ListListingMessages,
		]
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			Operation::ListListings => "list_listings",
			Operation::GetListing => "get_listing",
			Operation::CreateListing => "create_listing",
			Operation::UpdateListing => "update_listing",
			Operation::DeleteListing => "delete_listing",
			Operation::InquireListing => "inquire_listing",
			Operation::ListListingMessages => "list_listing_messages",
		}
	}
}

impl fmt::Display for Operation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Access requirements of one operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationDescriptor {
	/// Roles allowed to invoke the operation; empty admits any caller.
	pub required_roles: RoleSet,
	/// Whether the caller must also own the targeted listing.
	pub owner_scoped: bool,
}

impl OperationDescriptor {
	/// No requirements at all: callers are not authenticated.
	pub fn public() -> Self {
		Self::default()
	}

	pub fn requires(roles: &[Role]) -> Self {
		Self {
			required_roles: RoleSet::of(roles),
			owner_scoped: false,
		}
	}

	/// Additionally require ownership of the targeted listing.
	pub fn owner_scoped(mut self) -> Self {
		self.owner_scoped = true;
		self
	}

	/// True when the gate may allow without looking at a token.
	pub fn is_unrestricted(&self) -> bool {
		self.required_roles.is_empty() && !self.owner_scoped
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
	#[error("operation {0} registered twice")]
	Duplicate(Operation),
}

/// Immutable mapping from operation to descriptor.
#[derive(Debug, Clone, Default)]
pub struct OperationRegistry {
	descriptors: HashMap<Operation, OperationDescriptor>,
}

impl OperationRegistry {
	pub fn builder() -> OperationRegistryBuilder {
		OperationRegistryBuilder::default()
	}

	/// The registry used by the listing API.
	pub fn listing_defaults() -> Self {
		let realtor = || OperationDescriptor::requires(&[Role::Realtor]);
		let entries = [
			(Operation::ListListings, OperationDescriptor::public()),
			(Operation::GetListing, OperationDescriptor::public()),
			(Operation::CreateListing, realtor()),
			(Operation::UpdateListing, realtor().owner_scoped()),
			(Operation::DeleteListing, realtor().owner_scoped()),
			(
				Operation::InquireListing,
				OperationDescriptor::requires(&[Role::Buyer]),
			),
			(Operation::ListListingMessages, realtor().owner_scoped()),
		];

		Self {
			descriptors: entries.into_iter().collect(),
		}
	}

	pub fn get(&self, operation: Operation) -> Option<&OperationDescriptor> {
		self.descriptors.get(&operation)
	}

	pub fn len(&self) -> usize {
		self.descriptors.len()
	}

	pub fn is_empty(&self) -> bool {
		self.descriptors.is_empty()
	}
}

#[derive(Debug, Default)]
pub struct OperationRegistryBuilder {
	descriptors: HashMap<Operation, OperationDescriptor>,
}

impl OperationRegistryBuilder {
	pub fn register(
		mut self,
		operation: Operation,
		descriptor: OperationDescriptor,
	) -> Result<Self, RegistryError> {
		if self.descriptors.contains_key(&operation) {
			return Err(RegistryError::Duplicate(operation));
		}
		self.descriptors.insert(operation, descriptor);
		Ok(self)
	}

	pub fn build(self) -> OperationRegistry {
		OperationRegistry {
			descriptors: self.descriptors,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_cover_every_operation() {
		let registry = OperationRegistry::listing_defaults();
		assert_eq!(registry.len(), Operation::all().len());
		for op in Operation::all() {
			assert!(registry.get(*op).is_some(), "{op} missing");
		}
	}

	#[test]
	fn owner_scoped_operations_always_name_roles() {
		let registry = OperationRegistry::listing_defaults();
		for op in Operation::all() {
			let descriptor = registry.get(*op).unwrap();
			if descriptor.owner_scoped {
				assert!(!descriptor.required_roles.is_empty(), "{op}");
			}
		}
	}

	#[test]
	fn read_operations_are_unrestricted() {
		let registry = OperationRegistry::listing_defaults();
		assert!(registry.get(Operation::ListListings).unwrap().is_unrestricted());
		assert!(registry.get(Operation::GetListing).unwrap().is_unrestricted());
		assert!(!registry.get(Operation::CreateListing).unwrap().is_unrestricted());
	}

	#[test]
	fn owner_scoped_without_roles_is_not_unrestricted() {
		assert!(!OperationDescriptor::public().owner_scoped().is_unrestricted());
	}

	#[test]
	fn builder_rejects_duplicates() {
		let err = OperationRegistry::builder()
			.register(Operation::GetListing, OperationDescriptor::public())
			.unwrap()
			.register(Operation::GetListing, OperationDescriptor::public())
			.unwrap_err();
		assert_eq!(err, RegistryError::Duplicate(Operation::GetListing));
	}

	#[test]
	fn builder_leaves_unregistered_operations_absent() {
		let registry = OperationRegistry::builder()
			.register(
				Operation::CreateListing,
				OperationDescriptor::requires(&[Role::Admin]),
			)
			.unwrap()
			.build();
		assert!(registry.get(Operation::DeleteListing).is_none());
		assert!(registry
			.get(Operation::CreateListing)
			.unwrap()
			.required_roles
			.contains(Role::Admin));
	}
}
