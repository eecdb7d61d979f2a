// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration primitives shared by the realty server crates.
//!
//! - [`Secret<T>`]: wrapper for key material that never prints its contents
//! - [`load_secret_env`] / [`require_secret_env`]: read secrets from `VAR` or
//!   from the file named by `VAR_FILE`

pub mod env;
pub mod secret;

pub use env::{load_secret_env, require_secret_env, RequiredSecretError, SecretEnvError};
pub use secret::{Secret, SecretString, REDACTED};
