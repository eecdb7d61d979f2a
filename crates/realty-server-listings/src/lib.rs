// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Listing search for the realty server.
//!
//! - [`build_filter`] / [`ListingQuery`]: optional search parameters to a
//!   [`ListingFilter`]
//! - [`ListingStore`]: the persistence interface
//! - [`ListingService`]: search and lookup, reporting empty results as
//!   [`ListingError::NotFound`]

pub mod error;
pub mod filter;
pub mod service;
pub mod store;
pub mod testing;
pub mod types;

pub use error::ListingError;
pub use filter::{build_filter, ListingFilter, ListingQuery, PriceRange};
pub use service::ListingService;
pub use store::ListingStore;
pub use types::{Listing, ListingSummary, PropertyType};
