// SPDX-License-Identifier: Apache-2.0

//! Order statistics over duration samples.

use crate::stats::StatisticsError;

/// The lower quartile, median, and upper quartile of a sample list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quartiles {
	pub q1: f64,
	pub q2: f64,
	pub q3: f64,
}

impl Quartiles {
	/// The interquartile range, `Q3 - Q1`.
	pub fn iqr(&self) -> f64 {
		self.q3 - self.q1
	}
}

/// Get a sorted copy of the data.
pub fn sorted(data: &[f64]) -> Vec<f64> {
	let mut sorted = data.to_vec();
	sorted.sort_by(f64::total_cmp);
	sorted
}

/// Calculate the median of a set of floats.
///
/// For an even count this is the mean of the two middle values.
pub fn median(data: &[f64]) -> Result<f64, StatisticsError> {
	median_of_sorted(&sorted(data)).ok_or(StatisticsError::EmptyInput)
}

fn median_of_sorted(sorted: &[f64]) -> Option<f64> {
	let len = sorted.len();
	match len {
		0 => None,
		odd if odd % 2 == 1 => Some(sorted[len / 2]),
		_ => Some((sorted[len / 2 - 1] + sorted[len / 2]) / 2.0),
	}
}

/// Calculate a percentile of a set of floats, with `percent` in `(0, 100]`.
///
/// Uses the nearest rank `percent / 100 * n`. A whole rank selects that
/// sample directly, a fractional one takes the mean of the two samples
/// around it.
pub fn percentile(data: &[f64], percent: f64) -> Result<f64, StatisticsError> {
	match data {
		[] => return Err(StatisticsError::EmptyInput),
		[only] => return Ok(*only),
		_ => {}
	}

	if !(percent > 0.0 && percent <= 100.0) {
		return Err(StatisticsError::OutOfBounds(percent));
	}

	let sorted = sorted(data);
	let rank = percent / 100.0 * sorted.len() as f64;
	let idx = rank as usize;

	if rank.fract() == 0.0 {
		Ok(sorted[idx - 1])
	} else if rank > 1.0 {
		Ok((sorted[idx - 1] + sorted[idx]) / 2.0)
	} else {
		Err(StatisticsError::OutOfBounds(percent))
	}
}

/// Calculate quartiles as Tukey hinges: the medians of the lower and upper
/// halves of the sorted data, leaving out the middle sample for odd counts.
///
/// Returns `None` if there are fewer than two samples.
pub fn quartiles(data: &[f64]) -> Option<Quartiles> {
	let sorted = sorted(data);
	let len = sorted.len();
	let half = len / 2;
	let upper_start = if len % 2 == 0 { half } else { half + 1 };

	Some(Quartiles {
		q1: median_of_sorted(&sorted[..half])?,
		q2: median_of_sorted(&sorted)?,
		q3: median_of_sorted(&sorted[upper_start..])?,
	})
}
