// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Secret loading from the process environment.
//!
//! A secret named `VAR` may be supplied directly as `VAR=value`, or indirectly
//! as `VAR_FILE=/path/to/file` (Docker and Kubernetes secret mounts). The file
//! form wins when both are set. One trailing newline is stripped from file
//! contents.

use std::path::PathBuf;
use std::{env, fs};

use thiserror::Error;

use crate::secret::SecretString;

/// Failure while reading a secret that was configured.
#[derive(Debug, Error)]
pub enum SecretEnvError {
	#[error("failed to read secret file at {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("secret file path in {var} is empty")]
	EmptyPath { var: String },
}

/// Failure while loading a secret that must be present.
#[derive(Debug, Error)]
pub enum RequiredSecretError {
	#[error("required secret not found: set either {var} or {file_var}")]
	Missing { var: String, file_var: String },

	#[error(transparent)]
	Load(#[from] SecretEnvError),
}

/// Load `var` from the environment, preferring `{var}_FILE`.
///
/// Returns `Ok(None)` when neither variable is set.
pub fn load_secret_env(var: &str) -> Result<Option<SecretString>, SecretEnvError> {
	let file_var = format!("{var}_FILE");

	if let Ok(path_str) = env::var(&file_var) {
		if path_str.is_empty() {
			return Err(SecretEnvError::EmptyPath { var: file_var });
		}

		let path = PathBuf::from(path_str);
		let content = fs::read_to_string(&path).map_err(|source| SecretEnvError::Io {
			path: path.clone(),
			source,
		})?;

		let value = content.strip_suffix('\n').unwrap_or(&content).to_string();
		return Ok(Some(SecretString::new(value)));
	}

	Ok(env::var(var).ok().map(SecretString::new))
}

/// Like [`load_secret_env`], but absence is an error.
pub fn require_secret_env(var: &str) -> Result<SecretString, RequiredSecretError> {
	load_secret_env(var)?.ok_or_else(|| RequiredSecretError::Missing {
		var: var.to_string(),
		file_var: format!("{var}_FILE"),
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;
	use tempfile::NamedTempFile;

	// Each test uses its own variable names so they can run in parallel.

	#[test]
	fn returns_none_when_unset() {
		let var = "REALTY_TEST_SECRET_UNSET";
		env::remove_var(var);
		env::remove_var(format!("{var}_FILE"));

		assert!(load_secret_env(var).unwrap().is_none());
	}

	#[test]
	fn reads_direct_value() {
		let var = "REALTY_TEST_SECRET_DIRECT";
		env::remove_var(format!("{var}_FILE"));
		env::set_var(var, "direct-value");

		let secret = load_secret_env(var).unwrap().unwrap();
		assert_eq!(secret.expose(), "direct-value");

		env::remove_var(var);
	}

	#[test]
	fn file_takes_precedence_and_strips_one_newline() {
		let var = "REALTY_TEST_SECRET_FILE";
		let mut file = NamedTempFile::new().unwrap();
		writeln!(file, "from-file").unwrap();

		env::set_var(var, "direct-value");
		env::set_var(format!("{var}_FILE"), file.path());

		let secret = load_secret_env(var).unwrap().unwrap();
		assert_eq!(secret.expose(), "from-file");

		env::remove_var(var);
		env::remove_var(format!("{var}_FILE"));
	}

	#[test]
	fn empty_file_path_is_an_error() {
		let var = "REALTY_TEST_SECRET_EMPTY_PATH";
		env::set_var(format!("{var}_FILE"), "");

		let err = load_secret_env(var).unwrap_err();
		assert!(matches!(err, SecretEnvError::EmptyPath { .. }));

		env::remove_var(format!("{var}_FILE"));
	}

	#[test]
	fn missing_file_is_an_io_error() {
		let var = "REALTY_TEST_SECRET_MISSING_FILE";
		env::set_var(format!("{var}_FILE"), "/nonexistent/realty/secret");

		let err = load_secret_env(var).unwrap_err();
		assert!(matches!(err, SecretEnvError::Io { .. }));

		env::remove_var(format!("{var}_FILE"));
	}

	#[test]
	fn require_reports_both_variable_names() {
		let var = "REALTY_TEST_SECRET_REQUIRED";
		env::remove_var(var);
		env::remove_var(format!("{var}_FILE"));

		let err = require_secret_env(var).unwrap_err();
		let message = err.to_string();
		assert!(message.contains(var));
		assert!(message.contains("REALTY_TEST_SECRET_REQUIRED_FILE"));
	}
}
