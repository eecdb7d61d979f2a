// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Resolution of a verified subject id to a full user record.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::error::{AuthError, StoreError};
use crate::types::{User, UserId};

/// Read access to the user store.
#[async_trait]
pub trait IdentityStore: Send + Sync {
	async fn find_user_by_id(&self, id: UserId) -> Result<Option<User>, StoreError>;
}

/// Looks up the user a token was issued to. One store call per resolution.
#[derive(Clone)]
pub struct IdentityResolver {
	store: Arc<dyn IdentityStore>,
}

impl IdentityResolver {
	pub fn new(store: Arc<dyn IdentityStore>) -> Self {
		Self { store }
	}

	#[instrument(level = "debug", skip(self), fields(user_id = %id))]
	pub async fn resolve(&self, id: UserId) -> Result<User, AuthError> {
		match self.store.find_user_by_id(id).await? {
			Some(user) => Ok(user),
			None => {
				debug!("no user for verified subject");
				Err(AuthError::IdentityNotFound(id))
			}
		}
	}
}
