// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! SQLite persistence for the realty server.
//!
//! [`UserRepository`] backs the gate's identity lookup and
//! [`ListingRepository`] backs both listing search and the ownership check.
//! Repository errors are [`DbError`]; at the store-trait boundary they become
//! [`StoreError`](realty_server_auth::StoreError).

pub mod error;
pub mod listing;
pub mod pool;
pub mod testing;
pub mod user;

pub use error::{DbError, Result};
pub use listing::{ListingRepository, NewListing};
pub use pool::{create_pool, create_schema};
pub use user::UserRepository;
