// SPDX-License-Identifier: Apache-2.0

//! Utility type for hiding credentials when printed in a debug or log message.

use std::fmt::{Debug, Formatter, Result as FmtResult};

/// Helper container to ensure a value isn't printed.
pub struct Redacted<T>(T);

impl<T> Redacted<T> {
	/// Construct a new redacted value.
	pub fn new(val: T) -> Redacted<T> {
		Redacted(val)
	}
}

impl<T> AsRef<T> for Redacted<T> {
	fn as_ref(&self) -> &T {
		&self.0
	}
}

impl<T> Debug for Redacted<T> {
	fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
		write!(f, "<redacted>")
	}
}
