// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the Zitadel client and the provisioning workflow.

/// Errors surfaced by the transport layer.
///
/// Callers never see raw HTTP status codes or response bodies directly; every
/// remote interaction normalizes into one of these variants.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
	/// The HTTP request itself failed (connection refused, timeout, TLS).
	#[error("HTTP request failed: {0}")]
	Request(#[from] reqwest::Error),

	/// Zitadel rejected the request with a non-2xx status.
	#[error("Zitadel API error ({code}): {message}")]
	Api {
		/// The HTTP status code of the rejection.
		code: u16,
		/// The raw response body.
		message: String,
	},

	/// A 2xx response body that could not be decoded as JSON.
	#[error("failed to parse response: {0}")]
	Parse(String),
}

impl ApiError {
	/// Whether this error reports a duplicate of something that already
	/// exists remotely.
	///
	/// Zitadel's grant endpoint has no dedicated conflict shape we can rely
	/// on; the substring match on the message is inherited from the remote
	/// API's error format. Keep this predicate as the single place that
	/// heuristic lives.
	pub fn is_already_exists(&self) -> bool {
		match self {
			ApiError::Api { message, .. } => message.to_lowercase().contains("already exists"),
			_ => false,
		}
	}
}

/// Fatal errors of the provisioning workflow.
///
/// Everything that is recoverable is logged as a warning where it happens and
/// never reaches this type; a `ProvisionError` always aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum ProvisionError {
	/// The project search request itself failed.
	#[error("project search failed: {0}")]
	ProjectSearch(#[from] ApiError),

	/// The project does not exist on the Zitadel instance.
	#[error("project '{0}' not found; run the Zitadel bootstrap setup first")]
	ProjectNotFound(String),
}

#[cfg(test)]
mod tests {
	use super::*;

	fn api_error(code: u16, message: &str) -> ApiError {
		ApiError::Api {
			code,
			message: message.to_string(),
		}
	}

	#[test]
	fn already_exists_matches_exact_substring() {
		assert!(api_error(409, "User grant already exists (ERRORS-xyz)").is_already_exists());
	}

	#[test]
	fn already_exists_matches_case_insensitively() {
		assert!(api_error(409, "Grant ALREADY EXISTS").is_already_exists());
		assert!(api_error(409, "Already Exists").is_already_exists());
	}

	#[test]
	fn other_api_errors_do_not_match() {
		assert!(!api_error(403, "permission denied").is_already_exists());
		assert!(!api_error(404, "not found").is_already_exists());
	}

	#[test]
	fn parse_errors_never_match() {
		let err = ApiError::Parse("already exists".to_string());
		assert!(!err.is_already_exists());
	}

	#[test]
	fn project_not_found_names_bootstrap_step() {
		let err = ProvisionError::ProjectNotFound("segel-bundesliga".to_string());
		let message = err.to_string();
		assert!(message.contains("segel-bundesliga"));
		assert!(message.contains("bootstrap"));
	}
}
