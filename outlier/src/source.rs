// SPDX-License-Identifier: Apache-2.0

//! Sources of merged pull request data.
//!
//! The live source is the GitHub GraphQL API (see [`crate::api::GitHub`]).
//! [`ResponseFile`] serves a previously saved API response instead, so a
//! report can be reproduced offline without a token.

use crate::graphql::merged_prs::{records_from_response, MergedPrsResponse};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::{fs, path::PathBuf};

/// Number of milliseconds in one hour.
const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// A single merged pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullRequestRecord {
	/// The pull request number within its repository.
	pub number: u64,
	/// When the pull request was opened.
	pub created_at: DateTime<Utc>,
	/// When the pull request was merged.
	pub merged_at: DateTime<Utc>,
}

impl PullRequestRecord {
	/// The time from opening to merging, rounded to the nearest whole hour.
	///
	/// Exact half hours round away from zero.
	pub fn duration_hours(&self) -> f64 {
		let elapsed = self.merged_at - self.created_at;
		(elapsed.num_milliseconds() as f64 / MILLIS_PER_HOUR).round()
	}
}

/// Anything which can list the most recently merged pull requests of a repo.
pub trait PullRequestSource {
	/// Get up to `limit` of the most recently merged pull requests for
	/// `owner/name`, oldest first.
	fn merged_pull_requests(
		&self,
		owner: &str,
		name: &str,
		limit: u8,
	) -> Result<Vec<PullRequestRecord>>;
}

/// A GraphQL response body saved to disk.
#[derive(Debug, Clone)]
pub struct ResponseFile {
	path: PathBuf,
}

impl ResponseFile {
	pub fn new(path: impl Into<PathBuf>) -> ResponseFile {
		ResponseFile { path: path.into() }
	}
}

impl PullRequestSource for ResponseFile {
	fn merged_pull_requests(
		&self,
		owner: &str,
		name: &str,
		limit: u8,
	) -> Result<Vec<PullRequestRecord>> {
		log::info!(
			"reading saved response [path='{}', owner='{}', name='{}']",
			self.path.display(),
			owner,
			name
		);

		let contents = fs::read_to_string(&self.path)
			.with_context(|| format!("failed to read '{}'", self.path.display()))?;
		let body: MergedPrsResponse = serde_json::from_str(&contents)
			.with_context(|| format!("'{}' is not a GraphQL response", self.path.display()))?;

		let mut records = records_from_response(body)?;

		// Mirror the API's `last: N` by keeping only the newest entries.
		let keep_from = records.len().saturating_sub(usize::from(limit));
		Ok(records.split_off(keep_from))
	}
}
