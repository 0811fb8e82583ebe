// SPDX-License-Identifier: Apache-2.0

//! Rendering of repository statistics for the terminal.

use crate::stats::RepoStats;
use anyhow::Result;
use console::style;
use serde::Serialize;
use std::io::Write;

/// Horizontal rule framing the human-readable report.
const RULE: &str = "----------------------------------------------------------------";

/// The format to report results in.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
	/// Human-readable format.
	#[default]
	Human,
	/// JSON format.
	Json,
}

/// The report output to the user.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
	/// The owner of the repository.
	pub owner: &'a str,
	/// The name of the repository.
	pub name: &'a str,
	/// Statistics over the repository's merged PRs.
	pub stats: RepoStats,
}

impl Report<'_> {
	/// Write the report to `out` in the given format.
	pub fn render<W: Write>(&self, out: &mut W, format: Format) -> Result<()> {
		match format {
			Format::Human => self.render_human(out),
			Format::Json => self.render_json(out),
		}
	}

	fn render_human<W: Write>(&self, out: &mut W) -> Result<()> {
		let stats = &self.stats;
		let heading = format!("PR Stats for {} / {}", self.owner, self.name);

		writeln!(out, "{}", RULE)?;
		writeln!(out, "{}", style(heading).bold())?;
		writeln!(out, "{}", RULE)?;
		writeln!(out, "Total PRs                : {}", stats.total)?;
		writeln!(out, "Duration (median)        : {} hours", stats.median)?;
		writeln!(out, "Duration (75%-ile)       : {} hours", stats.p75)?;
		writeln!(out, "Duration (90%-ile)       : {} hours", stats.p90)?;
		writeln!(
			out,
			"Total Outliers (mild)    : {}",
			render_range(
				stats.mild_outlier_count,
				stats.mild_outlier_min,
				mild_upper_bound(stats)
			)
		)?;
		writeln!(
			out,
			"Total Outliers (extreme) : {}",
			render_range(
				stats.extreme_outlier_count,
				stats.extreme_outlier_min,
				stats.extreme_outlier_min
			)
		)?;
		writeln!(out, "{}", RULE)?;

		Ok(())
	}

	fn render_json<W: Write>(&self, out: &mut W) -> Result<()> {
		serde_json::to_writer_pretty(&mut *out, self)?;
		writeln!(out)?;
		Ok(())
	}
}

/// Mild outliers run up to where the extreme ones begin, if there are any.
fn mild_upper_bound(stats: &RepoStats) -> i64 {
	if stats.extreme_outlier_count == 0 {
		stats.mild_outlier_min
	} else {
		stats.extreme_outlier_min
	}
}

/// Describe an outlier tier by its size and range.
fn render_range(total: usize, min: i64, max: i64) -> String {
	if total == 0 {
		return "None".to_owned();
	}

	if min == max {
		return format!("{} (over {} hours)", total, min);
	}

	format!("{} (between {} and {} hours)", total, min, max)
}
