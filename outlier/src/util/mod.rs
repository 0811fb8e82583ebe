// SPDX-License-Identifier: Apache-2.0

//! Utility types used throughout Outlier.

pub mod redacted;
