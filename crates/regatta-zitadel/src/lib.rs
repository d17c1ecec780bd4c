// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Zitadel E2E fixture provisioning for Regatta.
//!
//! This crate drives a Zitadel instance's administrative API into a
//! deterministic state for end-to-end tests: a simplified login policy with
//! no multi-factor prompts, one human test user with a pre-verified email and
//! a fixed password, and a project role grant for that user.
//!
//! # Idempotency
//!
//! The remote service is the only source of truth. Every stage re-queries
//! Zitadel before writing (search-then-create-or-update), so running the
//! workflow repeatedly converges to the same remote state: the user is never
//! duplicated, a pre-existing role grant is absorbed rather than escalated,
//! and the login policy is replaced wholesale on every run.
//!
//! # Fatal vs. recoverable outcomes
//!
//! Only the initial project lookup is fatal — without a project there is
//! nothing to provision against. Every later stage logs its failures as
//! warnings and the workflow keeps advancing, so a flaky policy update never
//! blocks user creation.
//!
//! # Example
//!
//! ```rust,no_run
//! use regatta_common_secret::SecretString;
//! use regatta_zitadel::{provision, FixtureConfig, HttpTransport};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pat = SecretString::new("pat-from-file".to_string());
//! let transport = HttpTransport::new("http://localhost:8081", pat);
//!
//! let config = FixtureConfig::default();
//! let report = provision(&transport, &config).await?;
//! println!("{report}");
//! # Ok(())
//! # }
//! ```

mod error;
mod grant;
mod policy;
mod project;
mod provision;
mod transport;
mod types;
mod user;

#[cfg(test)]
mod test_support;

pub use error::{ApiError, ProvisionError};
pub use grant::{grant_role, GrantOutcome};
pub use policy::{simplify_login_policy, PolicyOutcome, MULTI_FACTOR_TYPES, SECOND_FACTOR_TYPES};
pub use project::locate_project;
pub use provision::{
	provision, FixtureConfig, FixtureReport, DEFAULT_BASE_URL, DEFAULT_FIRST_NAME,
	DEFAULT_LAST_NAME, DEFAULT_PASSWORD, DEFAULT_PROJECT, DEFAULT_ROLE, DEFAULT_USERNAME,
};
pub use transport::{HttpTransport, Transport};
pub use types::LoginPolicy;
pub use user::{ensure_user, set_password, verify_email, TestUser};
