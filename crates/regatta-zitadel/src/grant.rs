// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Project role grants.

use reqwest::Method;
use tracing::{instrument, warn};

use crate::transport::Transport;
use crate::types::UserGrantRequest;

/// Outcome of a role grant attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantOutcome {
	/// The grant was created.
	Granted,
	/// The grant already existed; treated as success.
	AlreadyGranted,
	/// The grant was rejected for some other reason; a warning, never fatal.
	Failed,
}

/// Grant `role` to a user within a project.
///
/// Idempotency rule: a rejection whose message says the grant already exists
/// is success — re-running the workflow must not escalate it. Any other
/// rejection is logged as a warning and the run continues.
#[instrument(skip(transport), fields(user_id = %user_id, role = %role))]
pub async fn grant_role(
	transport: &dyn Transport,
	user_id: &str,
	project_id: &str,
	role: &str,
) -> GrantOutcome {
	let request = serde_json::to_value(UserGrantRequest {
		project_id: project_id.to_string(),
		role_keys: vec![role.to_string()],
	})
	.expect("grant request serializes");

	match transport
		.send(
			Method::POST,
			&format!("/management/v1/users/{user_id}/grants"),
			Some(request),
		)
		.await
	{
		Ok(_) => {
			tracing::info!("role granted");
			GrantOutcome::Granted
		}
		Err(e) if e.is_already_exists() => {
			tracing::info!("role grant already exists");
			GrantOutcome::AlreadyGranted
		}
		Err(e) => {
			warn!(error = %e, "failed to grant role");
			GrantOutcome::Failed
		}
	}
}
