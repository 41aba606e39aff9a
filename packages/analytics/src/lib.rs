#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! In-memory analytics engine for the EV dashboard.
//!
//! Every derived view is a pure function of the normalized record set, the
//! active [`FilterConfig`], and the table's [`SortSpec`]. Computation always
//! runs in the same order: filter, then group and reduce, then rank and
//! truncate. [`session::DashboardSession`] hosts that pipeline and recomputes
//! it whenever one of its inputs changes.
//!
//! [`FilterConfig`]: ev_dashboard_analytics_models::FilterConfig
//! [`SortSpec`]: ev_dashboard_analytics_models::SortSpec

pub mod config;
pub mod filter;
pub mod group;
pub mod options;
pub mod rank;
pub mod session;
pub mod views;

#[cfg(test)]
mod test_utils;

pub use config::DashboardConfig;
pub use filter::{CompiledFilter, RangeInterval, filter_records};
pub use rank::rank;
pub use session::DashboardSession;
pub use views::compute_views;

use thiserror::Error;

/// Errors that can occur during analytics operations.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// A filter, sort, or dashboard configuration is structurally invalid.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of what went wrong.
        message: String,
    },

    /// A dashboard configuration document could not be parsed.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl AnalyticsError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
