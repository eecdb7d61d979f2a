// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! User repository: the identity source for request authorization.

use async_trait::async_trait;
use realty_server_auth::{IdentityStore, Role, StoreError, User, UserId};
use sqlx::{sqlite::SqlitePool, Row};

use crate::error::DbError;

#[derive(Clone)]
pub struct UserRepository {
	pool: SqlitePool,
}

impl UserRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Insert a user and return its generated id.
	#[tracing::instrument(skip(self, name, email), fields(role = %role))]
	pub async fn create_user(
		&self,
		name: &str,
		email: Option<&str>,
		role: Role,
	) -> Result<UserId, DbError> {
		let result = sqlx::query("INSERT INTO users (name, email, user_type) VALUES (?, ?, ?)")
			.bind(name)
			.bind(email)
			.bind(role.as_str())
			.execute(&self.pool)
			.await?;

		let id = UserId::new(result.last_insert_rowid());
		tracing::debug!(user_id = %id, "user created");
		Ok(id)
	}

	/// Get a user by id. `None` if no such user exists.
	#[tracing::instrument(skip(self), fields(user_id = %id))]
	pub async fn get_user_by_id(&self, id: UserId) -> Result<Option<User>, DbError> {
		let row = sqlx::query("SELECT id, name, email, user_type FROM users WHERE id = ?")
			.bind(id.get())
			.fetch_optional(&self.pool)
			.await?;

		row.as_ref().map(parse_user_row).transpose()
	}

	/// Change a user's role. Returns false if the user does not exist.
	#[tracing::instrument(skip(self), fields(user_id = %id, role = %role))]
	pub async fn set_role(&self, id: UserId, role: Role) -> Result<bool, DbError> {
		let result = sqlx::query("UPDATE users SET user_type = ? WHERE id = ?")
			.bind(role.as_str())
			.bind(id.get())
			.execute(&self.pool)
			.await?;

		Ok(result.rows_affected() > 0)
	}
}

#[async_trait]
impl IdentityStore for UserRepository {
	async fn find_user_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
		Ok(self.get_user_by_id(id).await?)
	}
}

fn parse_user_row(row: &sqlx::sqlite::SqliteRow) -> Result<User, DbError> {
	let id: i64 = row.get("id");
	let name: String = row.get("name");
	let email: Option<String> = row.get("email");
	let user_type: String = row.get("user_type");

	let role = user_type
		.parse::<Role>()
		.map_err(|e| DbError::Internal(e.to_string()))?;

	Ok(User {
		id: UserId::new(id),
		display_name: name,
		email,
		role,
	})
}
