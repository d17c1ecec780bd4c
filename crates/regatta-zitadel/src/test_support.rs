// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Scripted [`Transport`] fake for workflow tests.
//!
//! Responses are replayed in FIFO order; every call is recorded with its
//! method, path and body so tests can assert on the exact request sequence.
//! When the script runs dry the fake answers `null`, which satisfies any
//! stage that does not inspect the response body.

use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

use crate::error::ApiError;
use crate::transport::Transport;

#[derive(Debug, Clone)]
pub struct RecordedCall {
	pub method: Method,
	pub path: String,
	pub body: Option<Value>,
}

#[derive(Default)]
pub struct FakeTransport {
	responses: Mutex<Vec<Result<Value, ApiError>>>,
	calls: Mutex<Vec<RecordedCall>>,
}

impl FakeTransport {
	pub fn new() -> Self {
		Self::default()
	}

	/// Queue a successful JSON response.
	pub fn respond_ok(self, value: Value) -> Self {
		self.responses.lock().unwrap().push(Ok(value));
		self
	}

	/// Queue an API rejection with the given status code and message.
	pub fn respond_api_error(self, code: u16, message: &str) -> Self {
		self.responses.lock().unwrap().push(Err(ApiError::Api {
			code,
			message: message.to_string(),
		}));
		self
	}

	/// All calls made so far, in order.
	pub fn calls(&self) -> Vec<RecordedCall> {
		self.calls.lock().unwrap().clone()
	}

	/// The recorded paths, in order. Convenience for sequence assertions.
	pub fn paths(&self) -> Vec<String> {
		self.calls().into_iter().map(|c| c.path).collect()
	}
}

#[async_trait]
impl Transport for FakeTransport {
	async fn send(
		&self,
		method: Method,
		path: &str,
		body: Option<Value>,
	) -> Result<Value, ApiError> {
		self.calls.lock().unwrap().push(RecordedCall {
			method,
			path: path.to_string(),
			body,
		});

		let mut responses = self.responses.lock().unwrap();
		if responses.is_empty() {
			Ok(Value::Null)
		} else {
			responses.remove(0)
		}
	}
}
