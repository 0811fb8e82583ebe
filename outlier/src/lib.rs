// SPDX-License-Identifier: Apache-2.0

//! Fetch the most recently merged pull requests of a GitHub repository and
//! report how long they took to merge, flagging abnormally slow ones.

pub mod api;
pub mod cli;
pub mod config;
pub mod graphql;
pub mod report;
pub mod shell;
pub mod source;
pub mod stats;
pub mod tls;
pub mod util;

use crate::{
	api::GitHub,
	config::{Config, DataSource},
	report::Report,
	source::{PullRequestSource, ResponseFile},
	stats::RepoStats,
};
use anyhow::{Context, Result};
use std::io::Write;

/// Fetch merged PRs for `owner/name` from `source` and calculate their statistics.
pub fn generate_stats(
	source: &dyn PullRequestSource,
	owner: &str,
	name: &str,
	limit: u8,
) -> Result<RepoStats> {
	let prs = source
		.merged_pull_requests(owner, name, limit)
		.with_context(|| format!("failed to fetch merged pull requests for {}/{}", owner, name))?;

	let stats = RepoStats::from_records(&prs).context("failed to calculate pull request statistics")?;

	log::info!("calculated statistics over {} pull requests", stats.total);

	Ok(stats)
}

/// Run a full analysis as configured and write the report to `out`.
pub fn run<W: Write>(config: &Config, out: &mut W) -> Result<()> {
	let stats = match &config.source {
		DataSource::Api { url, token } => {
			let github = GitHub::new(token.as_ref(), url.as_str());
			generate_stats(&github, &config.owner, &config.name, config.limit)?
		}
		DataSource::ResponseFile(path) => {
			let file = ResponseFile::new(path);
			generate_stats(&file, &config.owner, &config.name, config.limit)?
		}
	};

	let report = Report {
		owner: &config.owner,
		name: &config.name,
		stats,
	};

	report.render(out, config.format)
}
