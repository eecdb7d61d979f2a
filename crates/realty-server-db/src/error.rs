// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use realty_server_auth::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum DbError {
	#[error("Database error: {0}")]
	Sqlx(#[from] sqlx::Error),

	#[error("Not found: {0}")]
	NotFound(String),

	#[error("Internal: {0}")]
	Internal(String),
}

pub type Result<T> = std::result::Result<T, DbError>;

impl From<DbError> for StoreError {
	fn from(err: DbError) -> Self {
		match err {
			DbError::Sqlx(sqlx::Error::PoolTimedOut) => StoreError::Timeout,
			DbError::Sqlx(
				e @ (sqlx::Error::PoolClosed | sqlx::Error::Io(_) | sqlx::Error::WorkerCrashed),
			) => StoreError::Unavailable(e.to_string()),
			other => StoreError::Internal(other.to_string()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn pool_exhaustion_is_a_timeout() {
		let err: StoreError = DbError::Sqlx(sqlx::Error::PoolTimedOut).into();
		assert_eq!(err, StoreError::Timeout);
	}

	#[test]
	fn closed_pool_is_unavailable() {
		let err: StoreError = DbError::Sqlx(sqlx::Error::PoolClosed).into();
		assert!(matches!(err, StoreError::Unavailable(_)));
	}

	#[test]
	fn bad_rows_are_internal() {
		let err: StoreError = DbError::Internal("unknown role: JANITOR".to_string()).into();
		assert_eq!(
			err,
			StoreError::Internal("Internal: unknown role: JANITOR".to_string())
		);
	}
}
