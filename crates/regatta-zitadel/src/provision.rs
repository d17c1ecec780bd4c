// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The provisioning workflow: locate, policy, user, grant, report.

use regatta_common_secret::SecretString;
use tracing::instrument;

use crate::error::ProvisionError;
use crate::grant::{grant_role, GrantOutcome};
use crate::policy::simplify_login_policy;
use crate::project::locate_project;
use crate::transport::Transport;
use crate::user::{ensure_user, TestUser};

/// Default Zitadel endpoint of the local docker-compose stack.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8081";
/// The project the e2e suite authenticates against.
pub const DEFAULT_PROJECT: &str = "segel-bundesliga";
pub const DEFAULT_USERNAME: &str = "testuser";
pub const DEFAULT_PASSWORD: &str = "TestPass123#";
pub const DEFAULT_FIRST_NAME: &str = "Test";
pub const DEFAULT_LAST_NAME: &str = "User";
pub const DEFAULT_ROLE: &str = "ADMIN";

/// Immutable run configuration, passed by reference into every stage.
///
/// There is deliberately no long-lived client object holding resolved state:
/// the project identifier flows as a plain value from the locator to the
/// grant stage, which keeps each stage independently testable.
#[derive(Debug, Clone)]
pub struct FixtureConfig {
	pub project_name: String,
	pub user: TestUser,
	pub role: String,
}

impl Default for FixtureConfig {
	fn default() -> Self {
		Self {
			project_name: DEFAULT_PROJECT.to_string(),
			user: TestUser {
				username: DEFAULT_USERNAME.to_string(),
				password: SecretString::from(DEFAULT_PASSWORD),
				first_name: DEFAULT_FIRST_NAME.to_string(),
				last_name: DEFAULT_LAST_NAME.to_string(),
			},
			role: DEFAULT_ROLE.to_string(),
		}
	}
}

/// What a completed run produced.
///
/// `Display` renders the human-readable summary banner. This is the single
/// sanctioned place the test password appears in output — the whole point of
/// the tool is handing these credentials to the e2e suite.
#[derive(Debug)]
pub struct FixtureReport {
	pub project_id: String,
	/// `None` when both user creation methods failed; the role grant was
	/// skipped in that case.
	pub user_id: Option<String>,
	/// Number of non-fatal failures absorbed along the way.
	pub warnings: usize,
	pub username: String,
	pub password: SecretString,
}

impl std::fmt::Display for FixtureReport {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		writeln!(f, "{}", "=".repeat(50))?;
		writeln!(f, "Setup Complete!")?;
		writeln!(f, "{}", "=".repeat(50))?;
		writeln!(f)?;
		writeln!(f, "Test User Credentials:")?;
		writeln!(f, "  Username: {}", self.username)?;
		writeln!(f, "  Password: {}", self.password.expose())?;
		writeln!(f)?;
		writeln!(f, "Alternative (admin):")?;
		writeln!(f, "  Username: admin@zitadel.localhost")?;
		writeln!(f, "  Password: Admin123!")?;
		writeln!(f)?;
		writeln!(f, "Login Policy:")?;
		writeln!(f, "  - No MFA required")?;
		writeln!(f, "  - No email verification prompts")?;
		writeln!(f, "  - Simple username/password login")?;
		if self.warnings > 0 {
			writeln!(f)?;
			writeln!(f, "Completed with {} warning(s), see the log above.", self.warnings)?;
		}
		Ok(())
	}
}

/// Run the full provisioning sequence against `transport`.
///
/// Stage order is fixed: locate the project, simplify the login policy,
/// ensure the test user, grant the project role. Only the locate stage is
/// fatal; every other failure is absorbed as a warning and the next stage
/// still runs. The grant stage is skipped when user provisioning yielded no
/// identifier.
///
/// # Errors
///
/// Returns [`ProvisionError`] only when the project cannot be located —
/// the caller maps that to a failed exit.
#[instrument(skip_all, fields(project = %config.project_name))]
pub async fn provision(
	transport: &dyn Transport,
	config: &FixtureConfig,
) -> Result<FixtureReport, ProvisionError> {
	tracing::info!("starting Zitadel test fixture setup");

	let project_id = locate_project(transport, &config.project_name).await?;
	tracing::info!(project_id = %project_id, "project located");

	let policy = simplify_login_policy(transport).await;
	let mut warnings = policy.warnings;

	let user_id = ensure_user(transport, &config.user).await;

	match &user_id {
		Some(user_id) => {
			if grant_role(transport, user_id, &project_id, &config.role).await
				== GrantOutcome::Failed
			{
				warnings += 1;
			}
		}
		None => {
			warnings += 1;
			tracing::warn!("skipping role grant: user provisioning yielded no identifier");
		}
	}

	Ok(FixtureReport {
		project_id,
		user_id,
		warnings,
		username: config.user.username.clone(),
		password: config.user.password.clone(),
	})
}
