// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Listing search filters.
//!
//! [`build_filter`] turns the optional search parameters into a
//! [`ListingFilter`]. It never fails: a parameter that is absent, empty, or
//! unusable simply adds no constraint, and no parameters at all yields the
//! match-everything filter.

use serde::{Deserialize, Serialize};

use crate::types::{Listing, PropertyType};

/// Inclusive price bounds. Either side may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub gte: Option<f64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub lte: Option<f64>,
}

impl PriceRange {
	pub fn contains(&self, price: f64) -> bool {
		self.gte.map_or(true, |min| price >= min) && self.lte.map_or(true, |max| price <= max)
	}
}

/// Predicate handed to the listing store. Absent fields do not constrain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingFilter {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub city: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub price: Option<PriceRange>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub property_type: Option<PropertyType>,
}

impl ListingFilter {
	/// True if no field constrains the query.
	pub fn is_unconstrained(&self) -> bool {
		self.city.is_none() && self.price.is_none() && self.property_type.is_none()
	}

	/// Evaluate the filter against a single listing.
	pub fn matches(&self, listing: &Listing) -> bool {
		self.city.as_deref().map_or(true, |city| listing.city == city)
			&& self.price.map_or(true, |range| range.contains(listing.price))
			&& self.property_type.map_or(true, |t| listing.property_type == t)
	}
}

/// Build a filter from raw search parameters.
///
/// - `city` is used verbatim when non-empty.
/// - `min_price` / `max_price` become `gte` / `lte`; a price object is present
///   only if at least one of them parses as a number.
/// - `property_type` is kept only if it names a [`PropertyType`].
pub fn build_filter(
	city: Option<&str>,
	min_price: Option<&str>,
	max_price: Option<&str>,
	property_type: Option<&str>,
) -> ListingFilter {
	let gte = min_price.and_then(parse_price);
	let lte = max_price.and_then(parse_price);
	let price = (gte.is_some() || lte.is_some()).then_some(PriceRange { gte, lte });

	ListingFilter {
		city: city.filter(|c| !c.is_empty()).map(str::to_string),
		price,
		property_type: property_type.and_then(PropertyType::parse_opt),
	}
}

fn parse_price(raw: &str) -> Option<f64> {
	raw.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Search parameters as they arrive on the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingQuery {
	pub city: Option<String>,
	pub min_price: Option<String>,
	pub max_price: Option<String>,
	pub property_type: Option<String>,
}

impl ListingQuery {
	pub fn into_filter(self) -> ListingFilter {
		build_filter(
			self.city.as_deref(),
			self.min_price.as_deref(),
			self.max_price.as_deref(),
			self.property_type.as_deref(),
		)
	}
}
