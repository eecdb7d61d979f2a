// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Role policy evaluation.

use crate::types::{Role, RoleSet};

/// Returns true if `actual` satisfies `required`.
///
/// An empty requirement admits every caller and `actual` is not consulted.
pub fn allows(required: &RoleSet, actual: Role) -> bool {
	required.is_empty() || required.contains(actual)
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	fn any_role() -> impl Strategy<Value = Role> {
		prop::sample::select(Role::all().to_vec())
	}

	#[test]
	fn realtor_only_operation() {
		let required = RoleSet::of(&[Role::Realtor]);
		assert!(allows(&required, Role::Realtor));
		assert!(!allows(&required, Role::Buyer));
		assert!(!allows(&required, Role::Admin));
	}

	proptest! {
		#[test]
		fn empty_requirement_allows_everyone(role in any_role()) {
			prop_assert!(allows(&RoleSet::none(), role));
		}

		#[test]
		fn non_empty_requirement_is_membership(
			roles in prop::collection::vec(any_role(), 1..4),
			actual in any_role(),
		) {
			let required = RoleSet::of(&roles);
			prop_assert_eq!(allows(&required, actual), roles.contains(&actual));
		}
	}
}
