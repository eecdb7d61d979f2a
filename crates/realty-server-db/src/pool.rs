// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqliteSynchronous};
use std::str::FromStr;

use crate::error::DbError;

/// Create a SqlitePool with WAL mode and common settings.
///
/// # Arguments
/// * `database_url` - SQLite connection string (e.g., "sqlite:./realty.db")
///
/// # Errors
/// Returns `DbError::Internal` if the URL is invalid, `DbError::Sqlx` if the
/// connection fails.
#[tracing::instrument(skip(database_url))]
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, DbError> {
	let options = SqliteConnectOptions::from_str(database_url)
		.map_err(|e| DbError::Internal(format!("Invalid database URL: {e}")))?
		.journal_mode(SqliteJournalMode::Wal)
		.synchronous(SqliteSynchronous::Normal)
		.foreign_keys(true)
		.create_if_missing(true);

	let pool = SqlitePool::connect_with(options).await?;

	tracing::debug!("database pool created");
	Ok(pool)
}

/// Create the `users`, `listings` and `images` tables if they do not exist.
#[tracing::instrument(skip(pool))]
pub async fn create_schema(pool: &SqlitePool) -> Result<(), DbError> {
	sqlx::query(
		r#"
		CREATE TABLE IF NOT EXISTS users (
			id INTEGER PRIMARY KEY AUTOINCREMENT,
			name TEXT NOT NULL,
			email TEXT UNIQUE,
			user_type TEXT NOT NULL
		)
		"#,
	)
	.execute(pool)
	.await?;

	sqlx::query(
		r#"
		CREATE TABLE IF NOT EXISTS listings (
			id INTEGER PRIMARY KEY AUTOINCREMENT,
			address TEXT NOT NULL,
			city TEXT NOT NULL,
			price REAL NOT NULL,
			property_type TEXT NOT NULL,
			number_of_bedrooms INTEGER NOT NULL,
			number_of_bathrooms REAL NOT NULL,
			realtor_id INTEGER NOT NULL REFERENCES users(id)
		)
		"#,
	)
	.execute(pool)
	.await?;

	sqlx::query(
		r#"
		CREATE TABLE IF NOT EXISTS images (
			id INTEGER PRIMARY KEY AUTOINCREMENT,
			url TEXT NOT NULL,
			listing_id INTEGER NOT NULL REFERENCES listings(id) ON DELETE CASCADE
		)
		"#,
	)
	.execute(pool)
	.await?;

	sqlx::query("CREATE INDEX IF NOT EXISTS idx_images_listing_id ON images(listing_id)")
		.execute(pool)
		.await?;

	tracing::debug!("schema ready");
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn test_creates_missing_database_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("realty.db");
		let pool = create_pool(&format!("sqlite:{}", path.display()))
			.await
			.unwrap();

		create_schema(&pool).await.unwrap();
		assert!(path.exists());
	}

	#[tokio::test]
	async fn test_schema_is_idempotent() {
		let pool = crate::testing::create_test_pool().await;
		create_schema(&pool).await.unwrap();
		create_schema(&pool).await.unwrap();
	}
}
