// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Request authorization for the realty listing server.
//!
//! Every protected request passes through [`AuthorizationGate::authorize`],
//! which composes four checks:
//!
//! - [`token`]: HS256 bearer token verification ([`JwtVerifier`])
//! - [`identity`]: subject id → [`User`] via an [`IdentityStore`]
//! - [`policy`]: role requirement of the [`OperationDescriptor`]
//! - [`ownership`]: listing ownership via an [`OwnershipStore`]
//!
//! The result is an [`AuthDecision`]: `Allowed(Caller)` or
//! `Denied(Unauthenticated | Forbidden | NotFound)`. A failing store is not a
//! decision; it comes back as [`GateError::Infrastructure`].
//!
//! Operation requirements live in an [`OperationRegistry`] built once at
//! startup. Nothing is cached across requests.

pub mod config;
pub mod decision;
pub mod error;
pub mod gate;
pub mod identity;
pub mod middleware;
pub mod operation;
pub mod ownership;
pub mod policy;
pub mod testing;
pub mod token;
pub mod types;

pub use config::{AuthConfig, ConfigError, LOOKUP_TIMEOUT_ENV_VAR, TOKEN_SECRET_ENV_VAR};
pub use decision::{AuthDecision, Caller, DenialReason};
pub use error::{AuthError, GateError, InvalidTokenError, PolicyDenial, StoreError};
pub use gate::AuthorizationGate;
pub use identity::{IdentityResolver, IdentityStore};
pub use middleware::{extract_bearer_token, BEARER_PREFIX};
pub use operation::{
	Operation, OperationDescriptor, OperationRegistry, OperationRegistryBuilder, RegistryError,
};
pub use ownership::{OwnershipChecker, OwnershipStore};
pub use token::{Claims, JwtVerifier, TokenVerifier};
pub use types::{ListingId, Role, RoleSet, UnknownRole, User, UserId};
