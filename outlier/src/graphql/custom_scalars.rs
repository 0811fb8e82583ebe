//! Helper types used for GraphQL derives.
//!
//! These map scalar types from `types.graphql` to Rust types.

pub type DateTime = chrono::DateTime<chrono::Utc>;
