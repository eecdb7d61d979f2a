// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Listing repository.
//!
//! Serves listing search for [`ListingService`](realty_server_listings::ListingService)
//! and owner lookups for the authorization gate's ownership check.

use async_trait::async_trait;
use realty_server_auth::{ListingId, OwnershipStore, StoreError, UserId};
use realty_server_listings::{Listing, ListingFilter, ListingStore, PropertyType};
use sqlx::{sqlite::SqlitePool, Row};

use crate::error::DbError;

/// Fields of a listing before it has an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewListing {
	pub address: String,
	pub city: String,
	pub price: f64,
	pub property_type: PropertyType,
	pub bedrooms: u32,
	pub bathrooms: f32,
	pub realtor_id: UserId,
	pub images: Vec<String>,
}

#[derive(Clone)]
pub struct ListingRepository {
	pool: SqlitePool,
}

impl ListingRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Insert a listing and its images in one transaction.
	#[tracing::instrument(skip(self, listing), fields(realtor_id = %listing.realtor_id))]
	pub async fn create_listing(&self, listing: &NewListing) -> Result<ListingId, DbError> {
		let mut tx = self.pool.begin().await?;

		let result = sqlx::query(
			r#"
			INSERT INTO listings (
				address, city, price, property_type,
				number_of_bedrooms, number_of_bathrooms, realtor_id
			) VALUES (?, ?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(&listing.address)
		.bind(&listing.city)
		.bind(listing.price)
		.bind(listing.property_type.as_str())
		.bind(i64::from(listing.bedrooms))
		.bind(f64::from(listing.bathrooms))
		.bind(listing.realtor_id.get())
		.execute(&mut *tx)
		.await?;
		let id = result.last_insert_rowid();

		for url in &listing.images {
			sqlx::query("INSERT INTO images (url, listing_id) VALUES (?, ?)")
				.bind(url)
				.bind(id)
				.execute(&mut *tx)
				.await?;
		}

		tx.commit().await?;

		let id = ListingId::new(id);
		tracing::debug!(listing_id = %id, images = listing.images.len(), "listing created");
		Ok(id)
	}

	#[tracing::instrument(skip(self), fields(listing_id = %id))]
	pub async fn get_listing_by_id(&self, id: ListingId) -> Result<Option<Listing>, DbError> {
		let row = sqlx::query(
			r#"
			SELECT id, address, city, price, property_type,
			       number_of_bedrooms, number_of_bathrooms, realtor_id
			FROM listings
			WHERE id = ?
			"#,
		)
		.bind(id.get())
		.fetch_optional(&self.pool)
		.await?;

		match row {
			Some(row) => Ok(Some(self.hydrate(&row).await?)),
			None => Ok(None),
		}
	}

	/// Listings matching `filter`, in id order. Absent filter fields are bound
	/// as NULL and match every row.
	#[tracing::instrument(skip(self))]
	pub async fn search_listings(&self, filter: &ListingFilter) -> Result<Vec<Listing>, DbError> {
		let city = filter.city.as_deref();
		let min_price = filter.price.and_then(|p| p.gte);
		let max_price = filter.price.and_then(|p| p.lte);
		let property_type = filter.property_type.map(|t| t.as_str());

		let rows = sqlx::query(
			r#"
			SELECT id, address, city, price, property_type,
			       number_of_bedrooms, number_of_bathrooms, realtor_id
			FROM listings
			WHERE (? IS NULL OR city = ?)
			  AND (? IS NULL OR price >= ?)
			  AND (? IS NULL OR price <= ?)
			  AND (? IS NULL OR property_type = ?)
			ORDER BY id ASC
			"#,
		)
		.bind(city)
		.bind(city)
		.bind(min_price)
		.bind(min_price)
		.bind(max_price)
		.bind(max_price)
		.bind(property_type)
		.bind(property_type)
		.fetch_all(&self.pool)
		.await?;

		let mut listings = Vec::with_capacity(rows.len());
		for row in &rows {
			listings.push(self.hydrate(row).await?);
		}

		tracing::debug!(count = listings.len(), "listings searched");
		Ok(listings)
	}

	/// The realtor who owns the listing. `None` if the listing does not exist.
	#[tracing::instrument(skip(self), fields(listing_id = %id))]
	pub async fn get_owner(&self, id: ListingId) -> Result<Option<UserId>, DbError> {
		let owner: Option<i64> = sqlx::query_scalar("SELECT realtor_id FROM listings WHERE id = ?")
			.bind(id.get())
			.fetch_optional(&self.pool)
			.await?;

		Ok(owner.map(UserId::new))
	}

	/// Delete a listing and its images. Returns false if it did not exist.
	#[tracing::instrument(skip(self), fields(listing_id = %id))]
	pub async fn delete_listing(&self, id: ListingId) -> Result<bool, DbError> {
		let mut tx = self.pool.begin().await?;

		sqlx::query("DELETE FROM images WHERE listing_id = ?")
			.bind(id.get())
			.execute(&mut *tx)
			.await?;
		let result = sqlx::query("DELETE FROM listings WHERE id = ?")
			.bind(id.get())
			.execute(&mut *tx)
			.await?;

		tx.commit().await?;
		Ok(result.rows_affected() > 0)
	}

	async fn images_for(&self, listing_id: i64) -> Result<Vec<String>, DbError> {
		let urls = sqlx::query_scalar("SELECT url FROM images WHERE listing_id = ? ORDER BY id ASC")
			.bind(listing_id)
			.fetch_all(&self.pool)
			.await?;
		Ok(urls)
	}

	async fn hydrate(&self, row: &sqlx::sqlite::SqliteRow) -> Result<Listing, DbError> {
		let id: i64 = row.get("id");
		let images = self.images_for(id).await?;
		parse_listing_row(row, images)
	}
}

#[async_trait]
impl ListingStore for ListingRepository {
	async fn query(&self, filter: &ListingFilter) -> Result<Vec<Listing>, StoreError> {
		Ok(self.search_listings(filter).await?)
	}

	async fn find_by_id(&self, id: ListingId) -> Result<Option<Listing>, StoreError> {
		Ok(self.get_listing_by_id(id).await?)
	}
}

#[async_trait]
impl OwnershipStore for ListingRepository {
	async fn find_owner_of(&self, listing_id: ListingId) -> Result<Option<UserId>, StoreError> {
		Ok(self.get_owner(listing_id).await?)
	}
}

fn parse_listing_row(row: &sqlx::sqlite::SqliteRow, images: Vec<String>) -> Result<Listing, DbError> {
	let id: i64 = row.get("id");
	let property_type_str: String = row.get("property_type");
	let bedrooms: i64 = row.get("number_of_bedrooms");
	let bathrooms: f64 = row.get("number_of_bathrooms");
	let realtor_id: i64 = row.get("realtor_id");

	let property_type = PropertyType::parse_opt(&property_type_str)
		.ok_or_else(|| DbError::Internal(format!("unknown property type: {property_type_str}")))?;
	let bedrooms = u32::try_from(bedrooms)
		.map_err(|_| DbError::Internal(format!("invalid bedroom count: {bedrooms}")))?;

	Ok(Listing {
		id: ListingId::new(id),
		address: row.get("address"),
		city: row.get("city"),
		price: row.get("price"),
		property_type,
		bedrooms,
		bathrooms: bathrooms as f32,
		realtor_id: UserId::new(realtor_id),
		images,
	})
}
