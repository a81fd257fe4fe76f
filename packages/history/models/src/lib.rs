#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Row type for the weather lookup history.

use serde::{Deserialize, Serialize};

/// One stored weather lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// District name as requested.
    pub district: String,
    /// Temperature at lookup time, if the provider reported one.
    pub temperature: Option<f64>,
    /// Free-text condition summary.
    pub condition: String,
    /// When the record was written (UTC, RFC 3339 with microseconds).
    pub timestamp: String,
}
