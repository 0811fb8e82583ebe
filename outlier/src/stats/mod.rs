// SPDX-License-Identifier: Apache-2.0

//! Merge-time statistics for a set of pull requests.

pub mod math;
pub mod outliers;

use crate::{
	source::PullRequestRecord,
	stats::{
		math::{median, percentile},
		outliers::quartile_outliers,
	},
};
use serde::Serialize;

/// An error arising while calculating statistics.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum StatisticsError {
	#[error("no samples to calculate statistics from")]
	EmptyInput,

	#[error("percentile {0} is out of bounds for the samples")]
	OutOfBounds(f64),

	#[error("error calculating {statistic}")]
	Calculation {
		statistic: &'static str,
		#[source]
		source: Box<StatisticsError>,
	},
}

impl StatisticsError {
	fn calculating(statistic: &'static str) -> impl FnOnce(StatisticsError) -> StatisticsError {
		move |source| StatisticsError::Calculation {
			statistic,
			source: Box::new(source),
		}
	}
}

/// Statistics generated from the most recently merged PRs of a repo.
///
/// All durations are whole hours, truncated toward zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RepoStats {
	/// Number of PRs the statistics cover.
	pub total: usize,
	/// The median time to merge.
	pub median: i64,
	/// The time by which 75% of PRs had merged.
	pub p75: i64,
	/// The time by which 90% of PRs had merged.
	pub p90: i64,
	/// Number of PRs which took somewhat longer than normal.
	pub mild_outlier_count: usize,
	/// The shortest mild outlier, or 0 if there are none.
	pub mild_outlier_min: i64,
	/// Number of PRs which took much longer than normal.
	pub extreme_outlier_count: usize,
	/// The shortest extreme outlier, or 0 if there are none.
	pub extreme_outlier_min: i64,
}

impl RepoStats {
	/// Calculate statistics over the merge times of the given PRs.
	pub fn from_records(records: &[PullRequestRecord]) -> Result<RepoStats, StatisticsError> {
		let hours: Vec<f64> = records
			.iter()
			.map(|pr| {
				let hours = pr.duration_hours();
				if hours < 0.0 {
					log::warn!(
						"pull request merged before it was created [number={}, hours={}]",
						pr.number,
						hours
					);
				}
				hours
			})
			.collect();

		RepoStats::from_hours(&hours)
	}

	/// Calculate statistics over merge times already expressed in hours.
	pub fn from_hours(hours: &[f64]) -> Result<RepoStats, StatisticsError> {
		let median = median(hours).map_err(StatisticsError::calculating("median"))?;
		let p75 = percentile(hours, 75.0)
			.map_err(StatisticsError::calculating("75th percentile"))?;
		let p90 = percentile(hours, 90.0)
			.map_err(StatisticsError::calculating("90th percentile"))?;
		let outliers =
			quartile_outliers(hours).map_err(StatisticsError::calculating("quartile outliers"))?;

		log::trace!(
			"merge time statistics [median='{}', p75='{}', p90='{}']",
			median,
			p75,
			p90
		);

		let (mild_outlier_count, mild_outlier_min) = summarize(&outliers.mild);
		let (extreme_outlier_count, extreme_outlier_min) = summarize(&outliers.extreme);

		Ok(RepoStats {
			total: hours.len(),
			median: median as i64,
			p75: p75 as i64,
			p90: p90 as i64,
			mild_outlier_count,
			mild_outlier_min,
			extreme_outlier_count,
			extreme_outlier_min,
		})
	}
}

/// Count an outlier tier and find its smallest member.
fn summarize(tier: &[f64]) -> (usize, i64) {
	let min = tier
		.iter()
		.map(|hours| *hours as i64)
		.min()
		.unwrap_or_default();
	(tier.len(), min)
}
