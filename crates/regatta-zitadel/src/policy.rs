// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Login policy simplification.

use reqwest::Method;
use tracing::{instrument, warn};

use crate::transport::Transport;
use crate::types::LoginPolicy;

/// Second-factor types removed from the login policy.
pub const SECOND_FACTOR_TYPES: &[&str] = &["SECOND_FACTOR_TYPE_OTP", "SECOND_FACTOR_TYPE_U2F"];

/// Multi-factor types removed from the login policy.
pub const MULTI_FACTOR_TYPES: &[&str] = &["MULTI_FACTOR_TYPE_U2F_WITH_VERIFICATION"];

/// What the policy stage did, for the final report.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PolicyOutcome {
	/// Number of non-fatal failures recorded while applying the policy.
	pub warnings: usize,
}

/// Drive the login policy into the known-simple test state.
///
/// Replaces the whole policy (no MFA enforcement, no registration, no external
/// IDP, no passwordless, no phone login, password and email login enabled,
/// 30-day MFA enrollment grace period), then removes every configured second-
/// and multi-factor type.
///
/// Every failure here is recorded as a warning and the sequence continues: a
/// factor that is already absent rejects its removal request, and that must
/// not abort a re-run. The stage is idempotent — two runs end in the same
/// remote policy state.
#[instrument(skip_all)]
pub async fn simplify_login_policy(transport: &dyn Transport) -> PolicyOutcome {
	let mut outcome = PolicyOutcome::default();

	let policy = serde_json::to_value(LoginPolicy::simplified())
		.expect("login policy serializes");
	match transport
		.send(Method::PUT, "/admin/v1/policies/login", Some(policy))
		.await
	{
		Ok(_) => tracing::info!("login policy updated"),
		Err(e) => {
			warn!(error = %e, "failed to update login policy");
			outcome.warnings += 1;
		}
	}

	for factor in SECOND_FACTOR_TYPES {
		let path = format!("/admin/v1/policies/login/second_factors/{factor}");
		if let Err(e) = transport.send(Method::DELETE, &path, None).await {
			warn!(factor = %factor, error = %e, "failed to remove second factor");
			outcome.warnings += 1;
		}
	}

	for factor in MULTI_FACTOR_TYPES {
		let path = format!("/admin/v1/policies/login/multi_factors/{factor}");
		if let Err(e) = transport.send(Method::DELETE, &path, None).await {
			warn!(factor = %factor, error = %e, "failed to remove multi factor");
			outcome.warnings += 1;
		}
	}

	tracing::info!(warnings = outcome.warnings, "MFA factors removed");
	outcome
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test_support::FakeTransport;
	use serde_json::json;

	#[tokio::test]
	async fn issues_update_then_factor_removals_in_order() {
		let transport = FakeTransport::new();

		let outcome = simplify_login_policy(&transport).await;

		assert_eq!(outcome.warnings, 0);
		assert_eq!(
			transport.paths(),
			vec![
				"/admin/v1/policies/login",
				"/admin/v1/policies/login/second_factors/SECOND_FACTOR_TYPE_OTP",
				"/admin/v1/policies/login/second_factors/SECOND_FACTOR_TYPE_U2F",
				"/admin/v1/policies/login/multi_factors/MULTI_FACTOR_TYPE_U2F_WITH_VERIFICATION",
			]
		);

		let calls = transport.calls();
		assert_eq!(calls[0].method, Method::PUT);
		assert!(calls[1..].iter().all(|c| c.method == Method::DELETE));
		assert!(calls[1..].iter().all(|c| c.body.is_none()));
	}

	#[tokio::test]
	async fn update_body_is_the_fixed_simplified_policy() {
		let transport = FakeTransport::new();

		simplify_login_policy(&transport).await;

		let calls = transport.calls();
		let body = calls[0].body.as_ref().unwrap();
		assert_eq!(body["forceMfa"], json!(false));
		assert_eq!(body["allowRegister"], json!(false));
		assert_eq!(body["allowExternalIdp"], json!(false));
		assert_eq!(body["allowUsernamePassword"], json!(true));
		assert_eq!(body["passwordlessType"], json!("PASSWORDLESS_TYPE_NOT_ALLOWED"));
		assert_eq!(body["disableLoginWithPhone"], json!(true));
		assert_eq!(body["disableLoginWithEmail"], json!(false));
		assert_eq!(body["mfaInitSkipLifetime"], json!("2592000s"));
	}

	#[tokio::test]
	async fn update_failure_is_a_warning_and_removals_still_run() {
		let transport = FakeTransport::new().respond_api_error(500, "boom");

		let outcome = simplify_login_policy(&transport).await;

		assert_eq!(outcome.warnings, 1);
		assert_eq!(transport.calls().len(), 4);
	}

	#[tokio::test]
	async fn absent_factor_rejections_do_not_abort_the_sequence() {
		let transport = FakeTransport::new()
			.respond_ok(json!({}))
			.respond_api_error(404, "second factor not set")
			.respond_api_error(404, "second factor not set")
			.respond_api_error(404, "multi factor not set");

		let outcome = simplify_login_policy(&transport).await;

		assert_eq!(outcome.warnings, 3);
		assert_eq!(transport.calls().len(), 4);
	}
}
