// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Wire payload types for the Zitadel management and admin APIs.

use serde::{Deserialize, Serialize};

/// Exact-match query method understood by Zitadel's `_search` endpoints.
pub const TEXT_QUERY_METHOD_EQUALS: &str = "TEXT_QUERY_METHOD_EQUALS";

#[derive(Debug, Serialize)]
pub struct ProjectSearchRequest {
	pub queries: Vec<ProjectSearchQuery>,
}

impl ProjectSearchRequest {
	/// Exact-match search for a single project name.
	pub fn exact(name: &str) -> Self {
		Self {
			queries: vec![ProjectSearchQuery {
				name_query: TextQuery::equals(name),
			}],
		}
	}
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSearchQuery {
	pub name_query: TextQuery,
}

#[derive(Debug, Serialize)]
pub struct UserSearchRequest {
	pub queries: Vec<UserSearchQuery>,
}

impl UserSearchRequest {
	/// Exact-match search for a single username.
	pub fn exact(user_name: &str) -> Self {
		Self {
			queries: vec![UserSearchQuery {
				user_name_query: UserNameQuery {
					user_name: user_name.to_string(),
					method: TEXT_QUERY_METHOD_EQUALS.to_string(),
				},
			}],
		}
	}
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSearchQuery {
	pub user_name_query: UserNameQuery,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserNameQuery {
	pub user_name: String,
	pub method: String,
}

#[derive(Debug, Serialize)]
pub struct TextQuery {
	pub name: String,
	pub method: String,
}

impl TextQuery {
	fn equals(name: &str) -> Self {
		Self {
			name: name.to_string(),
			method: TEXT_QUERY_METHOD_EQUALS.to_string(),
		}
	}
}

/// Shared shape of `_search` responses: a (possibly absent) result list.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
	#[serde(default)]
	pub result: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
pub struct SearchResult {
	pub id: String,
}

/// The full login policy, replaced wholesale via `PUT /admin/v1/policies/login`.
///
/// Zitadel has no partial patch for this resource; a partial body would reset
/// the omitted fields, so every field is spelled out.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginPolicy {
	pub allow_username_password: bool,
	pub allow_register: bool,
	pub allow_external_idp: bool,
	pub force_mfa: bool,
	pub passwordless_type: String,
	pub hide_password_reset: bool,
	pub ignore_unknown_usernames: bool,
	pub default_redirect_uri: String,
	pub allow_domain_discovery: bool,
	pub disable_login_with_email: bool,
	pub disable_login_with_phone: bool,
	pub force_mfa_local_only: bool,
	pub mfa_init_skip_lifetime: String,
}

impl LoginPolicy {
	/// The fixed test-friendly policy: plain username/password login, nothing
	/// that would interrupt an automated browser session.
	pub fn simplified() -> Self {
		Self {
			allow_username_password: true,
			allow_register: false,
			allow_external_idp: false,
			force_mfa: false,
			passwordless_type: "PASSWORDLESS_TYPE_NOT_ALLOWED".to_string(),
			hide_password_reset: false,
			ignore_unknown_usernames: false,
			default_redirect_uri: String::new(),
			allow_domain_discovery: false,
			disable_login_with_email: false,
			disable_login_with_phone: true,
			force_mfa_local_only: false,
			// 30 days before Zitadel nags about MFA enrollment.
			mfa_init_skip_lifetime: "2592000s".to_string(),
		}
	}
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
	pub first_name: String,
	pub last_name: String,
	pub display_name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Email {
	pub email: String,
	pub is_email_verified: bool,
}

/// Payload for `POST /management/v1/users/human/_import`.
///
/// The import call is preferred because it accepts a verified email and a
/// final password in a single request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportHumanUserRequest {
	pub user_name: String,
	pub profile: Profile,
	pub email: Email,
	pub password: String,
	pub password_change_required: bool,
}

/// Payload for `POST /management/v1/users/human`, the fallback creation path.
///
/// Semantically equivalent to [`ImportHumanUserRequest`] but an older API
/// generation: the password is a nested object instead of a flat field.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHumanUserRequest {
	pub user_name: String,
	pub profile: Profile,
	pub email: Email,
	pub password: PasswordSpec,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordSpec {
	pub password: String,
	pub change_required: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetPasswordRequest {
	pub password: String,
	pub no_change_required: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserGrantRequest {
	pub project_id: String,
	pub role_keys: Vec<String>,
}

/// Response of both user creation endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedUser {
	pub user_id: Option<String>,
}
