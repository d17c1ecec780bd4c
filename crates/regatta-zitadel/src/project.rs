// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Project lookup.

use reqwest::Method;
use tracing::instrument;

use crate::error::ProvisionError;
use crate::transport::Transport;
use crate::types::{ProjectSearchRequest, SearchResponse};

/// Resolve a project name to its opaque identifier.
///
/// Issues an exact-match search and takes the first result. This is the only
/// stage whose failure aborts the whole run: without the project there is
/// nothing to grant roles against, and the instance has clearly not been
/// bootstrapped.
///
/// # Errors
///
/// - [`ProvisionError::ProjectSearch`]: the search request itself failed.
/// - [`ProvisionError::ProjectNotFound`]: the search returned no results.
#[instrument(skip(transport))]
pub async fn locate_project(
	transport: &dyn Transport,
	name: &str,
) -> Result<String, ProvisionError> {
	let request = serde_json::to_value(ProjectSearchRequest::exact(name))
		.expect("project search request serializes");

	let response = transport
		.send(Method::POST, "/management/v1/projects/_search", Some(request))
		.await?;

	let response: SearchResponse = serde_json::from_value(response)
		.map_err(|e| crate::error::ApiError::Parse(format!("project search: {e}")))?;

	match response.result.into_iter().next() {
		Some(project) => {
			tracing::debug!(project_id = %project.id, "project located");
			Ok(project.id)
		}
		None => Err(ProvisionError::ProjectNotFound(name.to_string())),
	}
}
