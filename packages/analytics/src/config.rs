//! Dashboard view configuration, loadable from TOML.
//!
//! Every field is optional in the document; missing fields take the built-in
//! defaults:
//!
//! ```toml
//! make_chart_limit = 10
//! model_table_limit = 20
//!
//! [default_model_sort]
//! key = "count"
//! direction = "desc"
//!
//! [[range_presets]]
//! label = "0-100 miles"
//! value = "0-100"
//! ```

use ev_dashboard_analytics_models::{RangePreset, SortSpec};
use serde::Deserialize;

use crate::AnalyticsError;
use crate::filter::RangeInterval;

/// Limits, default sort, and range presets for the dashboard views.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Number of makes shown in the bar view.
    pub make_chart_limit: usize,
    /// Number of rows shown in the top models table.
    pub model_table_limit: usize,
    /// Sort applied to the top models table before the user picks one.
    pub default_model_sort: SortSpec,
    /// Buckets offered by the range selector.
    pub range_presets: Vec<RangePreset>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            make_chart_limit: 10,
            model_table_limit: 20,
            default_model_sort: SortSpec::default(),
            range_presets: RangePreset::defaults(),
        }
    }
}

impl DashboardConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::Toml`] if the document does not parse, or
    /// [`AnalyticsError::Config`] if it fails [`Self::validate`].
    pub fn from_toml(toml_str: &str) -> Result<Self, AnalyticsError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every range preset carries a usable `"min-max"` value.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::Config`] naming the first invalid preset.
    pub fn validate(&self) -> Result<(), AnalyticsError> {
        for preset in &self.range_presets {
            preset.value.parse::<RangeInterval>().map_err(|e| {
                AnalyticsError::config(format!("Range preset '{}': {e}", preset.label))
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ev_dashboard_analytics_models::{SortDirection, SortKey};

    #[test]
    fn empty_document_uses_defaults() {
        let config = DashboardConfig::from_toml("").unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.make_chart_limit, 10);
        assert_eq!(config.model_table_limit, 20);
        assert_eq!(config.default_model_sort, SortSpec::desc(SortKey::Count));
        assert_eq!(config.range_presets.len(), 4);
    }

    #[test]
    fn parses_overrides() {
        let toml_str = r#"
make_chart_limit = 5

[default_model_sort]
key = "avgPrice"
direction = "asc"

[[range_presets]]
label = "Short"
value = "1-50"
"#;
        let config = DashboardConfig::from_toml(toml_str).unwrap();
        assert_eq!(config.make_chart_limit, 5);
        assert_eq!(config.model_table_limit, 20);
        assert_eq!(config.default_model_sort.key, SortKey::AvgPrice);
        assert_eq!(config.default_model_sort.direction, SortDirection::Asc);
        assert_eq!(config.range_presets, vec![RangePreset::new("Short", "1-50")]);
    }

    #[test]
    fn rejects_malformed_preset() {
        let toml_str = r#"
[[range_presets]]
label = "Long"
value = "300+"
"#;
        let result = DashboardConfig::from_toml(toml_str);
        assert!(matches!(result, Err(AnalyticsError::Config { .. })));
    }

    #[test]
    fn rejects_unknown_sort_key() {
        let toml_str = r#"
[default_model_sort]
key = "color"
direction = "asc"
"#;
        let result = DashboardConfig::from_toml(toml_str);
        assert!(matches!(result, Err(AnalyticsError::Toml(_))));
    }
}
