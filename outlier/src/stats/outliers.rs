// SPDX-License-Identifier: Apache-2.0

//! Boxplot outlier detection.
//!
//! Fences sit 1.5 and 3 interquartile ranges beyond the quartiles. Samples past
//! the inner fence are mild outliers, samples past the outer fence are
//! extreme. Short merge times are never a problem, so only the upper tail is
//! reported.

use crate::stats::{
	math::{quartiles, sorted},
	StatisticsError,
};

/// Distance of the inner fences from the quartiles, in IQRs.
const INNER_FENCE: f64 = 1.5;

/// Distance of the outer fences from the quartiles, in IQRs.
const OUTER_FENCE: f64 = 3.0;

/// Upper-tail outliers in a sample list, each tier in ascending order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outliers {
	/// Samples beyond the inner fence but within the outer fence.
	pub mild: Vec<f64>,
	/// Samples beyond the outer fence.
	pub extreme: Vec<f64>,
}

/// Find the outliers of a sample list using its quartiles.
///
/// With fewer than two samples the quartiles are undefined and nothing is
/// an outlier.
pub fn quartile_outliers(data: &[f64]) -> Result<Outliers, StatisticsError> {
	if data.is_empty() {
		return Err(StatisticsError::EmptyInput);
	}

	let Some(q) = quartiles(data) else {
		return Ok(Outliers::default());
	};

	let iqr = q.iqr();
	let lower_inner = q.q1 - INNER_FENCE * iqr;
	let upper_inner = q.q3 + INNER_FENCE * iqr;
	let lower_outer = q.q1 - OUTER_FENCE * iqr;
	let upper_outer = q.q3 + OUTER_FENCE * iqr;

	log::trace!(
		"outlier fences [q1='{}', q3='{}', inner='{}', outer='{}']",
		q.q1,
		q.q3,
		upper_inner,
		upper_outer
	);

	let mut outliers = Outliers::default();
	let mut low_mild = 0;
	let mut low_extreme = 0;

	for value in sorted(data) {
		if value > upper_outer {
			outliers.extreme.push(value);
		} else if value > upper_inner {
			outliers.mild.push(value);
		} else if value < lower_outer {
			low_extreme += 1;
		} else if value < lower_inner {
			low_mild += 1;
		}
	}

	if low_mild + low_extreme > 0 {
		log::debug!(
			"ignoring lower-tail outliers [mild={}, extreme={}]",
			low_mild,
			low_extreme
		);
	}

	Ok(outliers)
}
