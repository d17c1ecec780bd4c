// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Transport abstraction over the Zitadel administrative API.
//!
//! All remote interaction goes through the [`Transport`] trait: one operation,
//! one normalized outcome. Production code uses [`HttpTransport`] (reqwest with
//! bearer authentication); tests substitute a scripted fake and assert on the
//! recorded call sequence.

use async_trait::async_trait;
use regatta_common_secret::SecretString;
use reqwest::Method;
use serde_json::Value;

use crate::error::ApiError;

/// A single authenticated request/response exchange with Zitadel.
///
/// Implementations must not retry: the workflow attempts every call exactly
/// once and classifies the outcome itself.
#[async_trait]
pub trait Transport: Send + Sync {
	/// Issue `method` against `path` (absolute, starting with `/`) with an
	/// optional JSON payload, returning the decoded response body.
	async fn send(
		&self,
		method: Method,
		path: &str,
		body: Option<Value>,
	) -> Result<Value, ApiError>;
}

/// [`Transport`] backed by reqwest, authenticating with a personal access
/// token.
pub struct HttpTransport {
	base_url: String,
	http: reqwest::Client,
	pat: SecretString,
}

impl HttpTransport {
	/// Create a transport for the Zitadel instance at `base_url`.
	///
	/// A trailing slash on the base URL is tolerated; request paths always
	/// carry the leading slash.
	pub fn new(base_url: &str, pat: SecretString) -> Self {
		Self {
			base_url: normalize_base(base_url),
			http: regatta_common_http::new_client(),
			pat,
		}
	}
}

fn normalize_base(base_url: &str) -> String {
	base_url.trim_end_matches('/').to_string()
}

#[async_trait]
impl Transport for HttpTransport {
	async fn send(
		&self,
		method: Method,
		path: &str,
		body: Option<Value>,
	) -> Result<Value, ApiError> {
		let url = format!("{}{}", self.base_url, path);
		tracing::debug!(method = %method, path = %path, "sending request");

		// Bodies are never logged: user payloads carry the test password.
		let mut request = self
			.http
			.request(method, &url)
			.bearer_auth(self.pat.expose());
		if let Some(body) = &body {
			request = request.json(body);
		}

		let response = request.send().await?;
		let status = response.status();
		let text = response.text().await?;

		if !status.is_success() {
			tracing::debug!(status = %status, path = %path, "request rejected");
			return Err(ApiError::Api {
				code: status.as_u16(),
				message: text,
			});
		}

		// Removal endpoints answer 200 with an empty body.
		if text.trim().is_empty() {
			return Ok(Value::Null);
		}

		serde_json::from_str(&text)
			.map_err(|e| ApiError::Parse(format!("invalid JSON from {path}: {e}")))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn normalize_base_strips_trailing_slash() {
		assert_eq!(normalize_base("http://localhost:8081/"), "http://localhost:8081");
		assert_eq!(normalize_base("http://localhost:8081"), "http://localhost:8081");
	}

	#[test]
	fn normalize_base_strips_multiple_slashes() {
		assert_eq!(normalize_base("http://localhost:8081///"), "http://localhost:8081");
	}

	#[test]
	fn transport_is_object_safe() {
		fn assert_dyn(_: &dyn Transport) {}
		let transport = HttpTransport::new(
			"http://localhost:8081",
			SecretString::new("pat".to_string()),
		);
		assert_dyn(&transport);
	}
}
