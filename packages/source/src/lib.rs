#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Raw row normalization for the vehicle dataset.
//!
//! The data source collaborator fetches and parses the dataset file and hands
//! over an ordered sequence of raw rows (JSON objects keyed by column name).
//! This crate turns those rows into canonical [`VehicleRecord`]s, dropping
//! any row that lacks a make, model, model year, or EV type.
//!
//! [`VehicleRecord`]: ev_dashboard_source_models::VehicleRecord

pub mod normalize;
pub mod parsing;

use ev_dashboard_source_models::ColumnMapping;

/// Errors that can occur while normalizing source data.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// A raw row could not be normalized into a complete record.
    #[error("Normalization error: {message}")]
    Normalization {
        /// Description of what went wrong.
        message: String,
    },

    /// A column mapping document could not be parsed.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Parses a [`ColumnMapping`] from a TOML string.
///
/// Keys that are not present keep their default column names.
///
/// # Errors
///
/// Returns [`SourceError::Toml`] if the TOML is malformed or a key has the
/// wrong type.
pub fn parse_column_mapping_toml(toml_str: &str) -> Result<ColumnMapping, SourceError> {
    Ok(toml::from_str(toml_str)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_column_mapping() {
        let mapping = parse_column_mapping_toml(
            r#"
            make = "MAKE"
            postal_code = "Postal Cod"
            "#,
        )
        .unwrap();

        assert_eq!(mapping.make, "MAKE");
        assert_eq!(mapping.postal_code, "Postal Cod");
        assert_eq!(mapping.model, "Model");
        assert_eq!(mapping.model_year, "Model Year");
    }

    #[test]
    fn empty_document_yields_default_mapping() {
        let mapping = parse_column_mapping_toml("").unwrap();
        assert_eq!(mapping, ColumnMapping::default());
    }

    #[test]
    fn rejects_wrong_value_type() {
        let err = parse_column_mapping_toml("make = 3").unwrap_err();
        assert!(matches!(err, SourceError::Toml(_)));
    }
}
