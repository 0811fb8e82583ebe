// SPDX-License-Identifier: Apache-2.0

//! Run the `outlier` binary end to end.
//!
//! None of these tests reach the network: they either fail before a request
//! is made, or read a saved GraphQL response from `tests/testdata`.

use anyhow::Result;
use pathbuf::pathbuf;
use std::{path::PathBuf, process::Output};
use tempfile::TempDir;
use xshell::{cmd, Shell};

const BIN: &str = env!("CARGO_BIN_EXE_outlier");

/// Environment variables which would change how the binary behaves.
const CONFIG_VARS: &[&str] = &[
	"GITHUB_TOKEN",
	"OUTLIER_FORMAT",
	"OUTLIER_COLOR",
	"OUTLIER_TOKEN_VAR",
	"OUTLIER_API_URL",
	"OUTLIER_LIMIT",
	"OUTLIER_RESPONSE_FILE",
];

/// A shell running in an empty directory, so no stray `.env` file is loaded.
fn clean_shell() -> Result<(Shell, TempDir)> {
	let dir = tempfile::tempdir()?;
	let sh = Shell::new()?;
	sh.change_dir(dir.path());
	Ok((sh, dir))
}

fn testdata(name: &str) -> PathBuf {
	pathbuf![env!("CARGO_MANIFEST_DIR"), "tests", "testdata", name]
}

fn run(args: &[&str]) -> Result<Output> {
	let (sh, _dir) = clean_shell()?;

	let mut cmd = cmd!(sh, "{BIN} {args...}").ignore_status().quiet();
	for var in CONFIG_VARS {
		cmd = cmd.env_remove(var);
	}

	Ok(cmd.output()?)
}

#[test]
fn no_arguments_prints_usage() -> Result<()> {
	let output = run(&[])?;

	assert_eq!(output.status.code(), Some(1));
	assert!(String::from_utf8(output.stderr)?.contains("Usage:"));
	assert!(output.stdout.is_empty());
	Ok(())
}

#[test]
fn one_argument_prints_usage() -> Result<()> {
	let output = run(&["puppetlabs"])?;

	assert_eq!(output.status.code(), Some(1));
	let stderr = String::from_utf8(output.stderr)?;
	assert!(stderr.contains("Usage:"));
	assert!(stderr.contains("<NAME>"));
	Ok(())
}

#[test]
fn three_arguments_prints_usage() -> Result<()> {
	let output = run(&["puppetlabs", "go-pe-client", "extra"])?;

	assert_eq!(output.status.code(), Some(1));
	assert!(String::from_utf8(output.stderr)?.contains("Usage:"));
	Ok(())
}

#[test]
fn help_exits_successfully() -> Result<()> {
	let output = run(&["--help"])?;

	assert_eq!(output.status.code(), Some(0));
	assert!(String::from_utf8(output.stdout)?.contains("<OWNER> <NAME>"));
	Ok(())
}

#[test]
fn version_exits_successfully() -> Result<()> {
	let output = run(&["--version"])?;

	assert_eq!(output.status.code(), Some(0));
	assert!(String::from_utf8(output.stdout)?.starts_with("outlier "));
	Ok(())
}

#[test]
fn color_choice_applies_to_errors() -> Result<()> {
	let output = run(&["octo", "widgets", "--color", "always"])?;
	assert_eq!(output.status.code(), Some(1));
	assert!(String::from_utf8(output.stderr)?.contains('\u{1b}'));

	let output = run(&["octo", "widgets", "--color", "never"])?;
	assert_eq!(output.status.code(), Some(1));
	assert!(!String::from_utf8(output.stderr)?.contains('\u{1b}'));
	Ok(())
}

#[test]
fn missing_token_fails_before_querying() -> Result<()> {
	// Nothing listens on the discard port, so a request would fail differently.
	let output = run(&[
		"puppetlabs",
		"go-pe-client",
		"--api-url",
		"http://127.0.0.1:9/graphql",
	])?;

	assert_eq!(output.status.code(), Some(1));
	assert!(String::from_utf8(output.stderr)?
		.contains("GITHUB_TOKEN environment variable must be defined"));
	assert!(output.stdout.is_empty());
	Ok(())
}

#[test]
fn missing_custom_token_var_is_named() -> Result<()> {
	let output = run(&["octo", "widgets", "--token-var", "OUTLIER_TEST_UNSET_TOKEN"])?;

	assert_eq!(output.status.code(), Some(1));
	assert!(String::from_utf8(output.stderr)?
		.contains("OUTLIER_TEST_UNSET_TOKEN environment variable must be defined"));
	Ok(())
}

#[test]
fn saved_response_prints_report() -> Result<()> {
	let file = testdata("merged-prs-response.json");
	let file = file.to_string_lossy();
	let output = run(&["octo", "widgets", "--color", "never", "--response-file", &*file])?;

	assert_eq!(output.status.code(), Some(0));

	let expected = "\
----------------------------------------------------------------
PR Stats for octo / widgets
----------------------------------------------------------------
Total PRs                : 10
Duration (median)        : 4 hours
Duration (75%-ile)       : 7 hours
Duration (90%-ile)       : 20 hours
Total Outliers (mild)    : 1 (between 20 and 100 hours)
Total Outliers (extreme) : 1 (over 100 hours)
----------------------------------------------------------------
";
	assert_eq!(String::from_utf8(output.stdout)?, expected);
	Ok(())
}

#[test]
fn saved_response_prints_json() -> Result<()> {
	let file = testdata("merged-prs-response.json");
	let file = file.to_string_lossy();
	let output = run(&["octo", "widgets", "-f", "json", "--response-file", &*file])?;

	assert_eq!(output.status.code(), Some(0));

	let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;
	assert_eq!(report["owner"], "octo");
	assert_eq!(report["name"], "widgets");
	assert_eq!(
		report["stats"],
		serde_json::json!({
			"total": 10,
			"median": 4,
			"p75": 7,
			"p90": 20,
			"mild_outlier_count": 1,
			"mild_outlier_min": 20,
			"extreme_outlier_count": 1,
			"extreme_outlier_min": 100
		})
	);
	Ok(())
}

#[test]
fn limit_applies_to_saved_response() -> Result<()> {
	let file = testdata("merged-prs-response.json");
	let file = file.to_string_lossy();
	let output = run(&[
		"octo",
		"widgets",
		"-f",
		"json",
		"-n",
		"4",
		"--response-file",
		&*file,
	])?;

	assert_eq!(output.status.code(), Some(0));

	let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;
	assert_eq!(report["stats"]["total"], 4);
	Ok(())
}

#[test]
fn no_merged_prs_fails_without_partial_output() -> Result<()> {
	let file = testdata("no-merged-prs-response.json");
	let file = file.to_string_lossy();
	let output = run(&["octo", "widgets", "--response-file", &*file])?;

	assert_eq!(output.status.code(), Some(1));
	assert!(output.stdout.is_empty());

	let stderr = String::from_utf8(output.stderr)?;
	assert!(stderr.contains("failed to calculate pull request statistics"));
	assert!(stderr.contains("no samples to calculate statistics from"));
	Ok(())
}
