// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Listing domain types.

use std::fmt;

use realty_server_auth::{ListingId, UserId};
use serde::{Deserialize, Serialize};

/// Kind of property on offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PropertyType {
	Residential,
	Condo,
}

impl PropertyType {
	pub fn all() -> &'static [PropertyType] {
		&[PropertyType::Residential, PropertyType::Condo]
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			PropertyType::Residential => "RESIDENTIAL",
			PropertyType::Condo => "CONDO",
		}
	}

	/// Parse a wire name; anything outside the enumeration is `None`.
	pub fn parse_opt(value: &str) -> Option<Self> {
		Self::all().iter().copied().find(|t| t.as_str() == value)
	}
}

impl fmt::Display for PropertyType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A property listing as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
	pub id: ListingId,
	pub address: String,
	pub city: String,
	pub price: f64,
	pub property_type: PropertyType,
	pub bedrooms: u32,
	pub bathrooms: f32,
	/// The realtor who published (and owns) the listing.
	pub realtor_id: UserId,
	/// Image URLs in upload order.
	pub images: Vec<String>,
}

/// The listing shape returned by search: one cover image instead of all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingSummary {
	pub id: ListingId,
	pub address: String,
	pub city: String,
	pub price: f64,
	pub property_type: PropertyType,
	pub bedrooms: u32,
	pub bathrooms: f32,
	pub realtor_id: UserId,
	pub image: Option<String>,
}

impl From<Listing> for ListingSummary {
	fn from(listing: Listing) -> Self {
		Self {
			image: listing.images.into_iter().next(),
			id: listing.id,
			address: listing.address,
			city: listing.city,
			price: listing.price,
			property_type: listing.property_type,
			bedrooms: listing.bedrooms,
			bathrooms: listing.bathrooms,
			realtor_id: listing.realtor_id,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn property_type_parsing_is_exact() {
		assert_eq!(PropertyType::parse_opt("CONDO"), Some(PropertyType::Condo));
		assert_eq!(PropertyType::parse_opt("RESIDENTIAL"), Some(PropertyType::Residential));
		assert_eq!(PropertyType::parse_opt("condo"), None);
		assert_eq!(PropertyType::parse_opt("CASTLE"), None);
	}

	#[test]
	fn summary_keeps_only_first_image() {
		let listing = Listing {
			id: ListingId::new(1),
			address: "1234 Al-Souq".to_string(),
			city: "Yabroud".to_string(),
			price: 1_500_000.0,
			property_type: PropertyType::Residential,
			bedrooms: 4,
			bathrooms: 2.0,
			realtor_id: UserId::new(5),
			images: vec!["img1".to_string(), "img2".to_string()],
		};

		let summary = ListingSummary::from(listing);
		assert_eq!(summary.image.as_deref(), Some("img1"));
		assert_eq!(summary.city, "Yabroud");
	}
}
