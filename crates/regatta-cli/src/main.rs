// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Regatta fixtures CLI - Zitadel test user setup for E2E testing.
//!
//! Provisions the deterministic fixtures the e2e suite logs in with: a
//! simplified login policy (no MFA, no email verification prompts), a test
//! user with a pre-verified email and fixed password, and an ADMIN role grant
//! on the project. Safe to run repeatedly; the remote instance is the only
//! source of truth.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use url::Url;

use regatta_common_secret::SecretString;
use regatta_zitadel::{provision, FixtureConfig, HttpTransport, TestUser};

/// Provision Zitadel test fixtures for end-to-end testing.
#[derive(Parser, Debug)]
#[command(name = "regatta-fixtures", version, about, long_about = None)]
struct Args {
	/// Zitadel base URL
	#[arg(
		long,
		env = "REGATTA_ZITADEL_URL",
		default_value = regatta_zitadel::DEFAULT_BASE_URL
	)]
	base_url: String,

	/// Path to the admin personal access token file
	#[arg(long, env = "REGATTA_PAT_FILE", default_value = "zitadel-data/admin.pat")]
	pat_file: PathBuf,

	/// Project the test user is granted access to
	#[arg(long, default_value = regatta_zitadel::DEFAULT_PROJECT)]
	project: String,

	/// Username of the test user
	#[arg(long, default_value = regatta_zitadel::DEFAULT_USERNAME)]
	username: String,

	/// Password of the test user
	#[arg(long, default_value = regatta_zitadel::DEFAULT_PASSWORD)]
	password: String,

	/// First name of the test user
	#[arg(long, default_value = regatta_zitadel::DEFAULT_FIRST_NAME)]
	first_name: String,

	/// Last name of the test user
	#[arg(long, default_value = regatta_zitadel::DEFAULT_LAST_NAME)]
	last_name: String,

	/// Role key granted within the project
	#[arg(long, default_value = regatta_zitadel::DEFAULT_ROLE)]
	role: String,

	/// Log level (error, warn, info, debug, trace)
	#[arg(short, long, default_value = "info")]
	log_level: String,
}

fn init_tracing(log_level: &str) {
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(format!("regatta={log_level}")));

	tracing_subscriber::registry()
		.with(filter)
		.with(fmt::layer().compact())
		.init();
}

/// Load the personal access token, trimming surrounding whitespace.
fn load_pat(path: &Path) -> Result<SecretString> {
	let contents = std::fs::read_to_string(path)
		.with_context(|| format!("PAT file not found: {}", path.display()))?;
	let token = contents.trim();
	anyhow::ensure!(!token.is_empty(), "PAT file is empty: {}", path.display());
	Ok(SecretString::from(token))
}

fn fixture_config(args: &Args) -> FixtureConfig {
	FixtureConfig {
		project_name: args.project.clone(),
		user: TestUser {
			username: args.username.clone(),
			password: SecretString::from(args.password.as_str()),
			first_name: args.first_name.clone(),
			last_name: args.last_name.clone(),
		},
		role: args.role.clone(),
	}
}

#[tokio::main]
async fn main() -> Result<()> {
	let args = Args::parse();
	init_tracing(&args.log_level);

	Url::parse(&args.base_url).context("invalid Zitadel base URL")?;
	let pat = load_pat(&args.pat_file)?;

	let transport = HttpTransport::new(&args.base_url, pat);
	let config = fixture_config(&args);
	info!(base_url = %args.base_url, project = %config.project_name, "provisioning Zitadel test fixtures");

	// Exit contract: locating the project is the only fatal stage. Any error
	// returned here becomes exit code 1; warnings from the later stages have
	// already been logged and still end in a success report.
	let report = provision(&transport, &config).await?;
	println!("{report}");
	Ok(())
}
