#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Filter, sort, and derived view types for the dashboard analytics engine.
//!
//! Inputs ([`FilterConfig`], [`SortSpec`]) are immutable values owned by the
//! UI session: every update produces a new value. Outputs are the view
//! contracts consumed by the presentation layer (charts, table, stat tiles),
//! serialized in `camelCase`.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// One independently settable dimension of the filter surface.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum FilterDimension {
    /// Case-insensitive substring match on the make.
    Make,
    /// Exact model year match.
    Year,
    /// Exact EV type match.
    EvType,
    /// Exact state match.
    State,
    /// Inclusive electric range interval, encoded as `"min-max"`.
    Range,
}

impl FilterDimension {
    /// Short label shown on an active filter chip.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Make => "Make",
            Self::Year => "Year",
            Self::EvType => "Type",
            Self::State => "State",
            Self::Range => "Range",
        }
    }

    /// Returns all variants of this enum, in filter panel order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Make, Self::Year, Self::EvType, Self::State, Self::Range]
    }
}

/// The selected value for each filter dimension.
///
/// An empty string means "no constraint" for that dimension. Values are kept
/// exactly as entered; parsing and validation happen when the engine
/// compiles the config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterConfig {
    /// Make search text.
    pub make: String,
    /// Model year, as text.
    pub year: String,
    /// EV type.
    pub ev_type: String,
    /// Two-letter state abbreviation.
    pub state: String,
    /// Range interval (e.g., `"101-200"`).
    pub range: String,
}

impl FilterConfig {
    /// Returns the selected value for `dimension`.
    #[must_use]
    pub fn get(&self, dimension: FilterDimension) -> &str {
        match dimension {
            FilterDimension::Make => &self.make,
            FilterDimension::Year => &self.year,
            FilterDimension::EvType => &self.ev_type,
            FilterDimension::State => &self.state,
            FilterDimension::Range => &self.range,
        }
    }

    /// Returns a copy with `dimension` set to `value`, leaving every other
    /// dimension untouched.
    #[must_use]
    pub fn with(&self, dimension: FilterDimension, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        let value = value.into();
        match dimension {
            FilterDimension::Make => next.make = value,
            FilterDimension::Year => next.year = value,
            FilterDimension::EvType => next.ev_type = value,
            FilterDimension::State => next.state = value,
            FilterDimension::Range => next.range = value,
        }
        next
    }

    /// Returns a copy with `dimension` cleared.
    #[must_use]
    pub fn without(&self, dimension: FilterDimension) -> Self {
        self.with(dimension, String::new())
    }

    /// Returns a copy with every given `(dimension, value)` pair applied in
    /// order. Dimensions not mentioned keep their current value.
    #[must_use]
    pub fn merged<I, S>(&self, updates: I) -> Self
    where
        I: IntoIterator<Item = (FilterDimension, S)>,
        S: Into<String>,
    {
        updates
            .into_iter()
            .fold(self.clone(), |acc, (dimension, value)| {
                acc.with(dimension, value)
            })
    }

    /// Returns a config with every dimension cleared.
    #[must_use]
    pub fn cleared() -> Self {
        Self::default()
    }

    /// Returns `true` if `dimension` constrains the record set.
    #[must_use]
    pub fn is_active(&self, dimension: FilterDimension) -> bool {
        !self.get(dimension).is_empty()
    }

    /// Number of dimensions with a value.
    #[must_use]
    pub fn active_count(&self) -> usize {
        FilterDimension::all()
            .iter()
            .filter(|d| self.is_active(**d))
            .count()
    }

    /// Returns `true` if any dimension has a value.
    #[must_use]
    pub fn has_active(&self) -> bool {
        self.active_count() > 0
    }
}

/// A field a ranked view can be ordered by.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum SortKey {
    /// Group label (make or EV type).
    Label,
    /// Vehicle make.
    Make,
    /// Vehicle model.
    Model,
    /// EV type.
    EvType,
    /// Model year.
    Year,
    /// Number of vehicles.
    Count,
    /// Share of the filtered set.
    Percentage,
    /// Average electric range.
    AvgRange,
    /// Average base MSRP.
    AvgPrice,
    /// Average of a per-year range statistic.
    Average,
    /// Minimum of a per-year range statistic.
    Min,
    /// Maximum of a per-year range statistic.
    Max,
}

/// Ordering direction.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

impl SortDirection {
    /// Returns the opposite direction.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Active ranking key and direction for a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortSpec {
    /// Field to order by.
    pub key: SortKey,
    /// Ordering direction.
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::desc(SortKey::Count)
    }
}

impl SortSpec {
    /// Ascending order on `key`.
    #[must_use]
    pub const fn asc(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Asc,
        }
    }

    /// Descending order on `key`.
    #[must_use]
    pub const fn desc(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Desc,
        }
    }

    /// Returns the spec after the user selects `key`.
    ///
    /// Selecting the active key flips the direction; selecting any other key
    /// starts over in ascending order.
    #[must_use]
    pub fn toggled(self, key: SortKey) -> Self {
        if self.key == key {
            Self {
                key,
                direction: self.direction.flipped(),
            }
        } else {
            Self::asc(key)
        }
    }
}

/// A labelled, pre-encoded range filter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangePreset {
    /// Label shown in the range selector (e.g., "101-200 miles").
    pub label: String,
    /// Encoded `"min-max"` filter value.
    pub value: String,
}

impl RangePreset {
    /// Creates a preset.
    #[must_use]
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// The range selector's built-in buckets.
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("0-100 miles", "0-100"),
            Self::new("101-200 miles", "101-200"),
            Self::new("201-300 miles", "201-300"),
            Self::new("301+ miles", "301-500"),
        ]
    }
}

/// An active filter as shown on a removable chip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveFilter {
    /// Which dimension is constrained.
    pub dimension: FilterDimension,
    /// Short dimension label (e.g., "Type").
    pub name: String,
    /// Display value; range presets show their label instead of the encoding.
    pub value: String,
}

/// Selectable values for each filter dimension, drawn from the full
/// (unfiltered) record set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    /// Distinct makes, ascending.
    pub makes: Vec<String>,
    /// Distinct model years, newest first.
    pub years: Vec<i32>,
    /// Distinct EV types, ascending.
    pub ev_types: Vec<String>,
    /// Distinct states, ascending.
    pub states: Vec<String>,
    /// Distinct counties, ascending.
    pub counties: Vec<String>,
}

/// Vehicle count for one make (bar view).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MakeCount {
    /// Trimmed make.
    pub label: String,
    /// Number of vehicles.
    pub count: u64,
}

/// Vehicle count and share for one EV type (pie view).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeShare {
    /// Trimmed EV type.
    pub label: String,
    /// Number of vehicles.
    pub count: u64,
    /// Share of the filtered set, rounded to one decimal place.
    pub percentage: f64,
}

/// Electric range statistics for one model year (trend view).
///
/// Only vehicles with a known (non-zero) range contribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearRangeStats {
    /// Model year.
    pub year: i32,
    /// Rounded average range.
    pub average: u64,
    /// Shortest range.
    pub min: u64,
    /// Longest range.
    pub max: u64,
    /// Number of contributing vehicles.
    pub count: u64,
}

/// Aggregate row for one make/model pair (top models table).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelSummary {
    /// Vehicle make.
    pub make: String,
    /// Vehicle model.
    pub model: String,
    /// Number of vehicles.
    pub count: u64,
    /// Rounded average range; unknown ranges count as zero.
    pub avg_range: u64,
    /// Rounded average base MSRP; undisclosed prices count as zero.
    pub avg_price: u64,
    /// EV type of the first vehicle seen for this pair.
    pub ev_type: String,
}

/// Dashboard-level scalar statistics over the filtered set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    /// Number of vehicles.
    pub total_vehicles: u64,
    /// Number of distinct makes.
    pub unique_makes: u64,
    /// Number of distinct states.
    pub unique_states: u64,
    /// Rounded average range; unknown ranges count as zero.
    pub avg_range: u64,
    /// Rounded average base MSRP; undisclosed prices count as zero.
    pub avg_price: u64,
}

/// Every derived view the dashboard renders, computed from one filtered set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardViews {
    /// Number of vehicles that passed the filters.
    pub filtered_count: u64,
    /// Stat tiles.
    pub summary: SummaryStats,
    /// Top makes by vehicle count.
    pub make_distribution: Vec<MakeCount>,
    /// Sum of the counts shown in `make_distribution`.
    pub make_distribution_total: u64,
    /// Every EV type with its share.
    pub type_distribution: Vec<TypeShare>,
    /// Range statistics per model year, oldest first.
    pub range_trend: Vec<YearRangeStats>,
    /// Top make/model pairs under the active sort.
    pub top_models: Vec<ModelSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_sets_only_one_dimension() {
        let config = FilterConfig::default()
            .with(FilterDimension::Make, "tes")
            .with(FilterDimension::State, "WA");

        assert_eq!(config.make, "tes");
        assert_eq!(config.state, "WA");
        assert_eq!(config.year, "");
        assert_eq!(config.active_count(), 2);
    }

    #[test]
    fn without_leaves_other_dimensions_alone() {
        let config = FilterConfig::default()
            .with(FilterDimension::Year, "2022")
            .with(FilterDimension::Range, "0-100");

        let cleared = config.without(FilterDimension::Year);

        assert!(!cleared.is_active(FilterDimension::Year));
        assert_eq!(cleared.range, "0-100");
        assert_eq!(config.year, "2022");
    }

    #[test]
    fn merged_applies_updates_in_order() {
        let config = FilterConfig::default().with(FilterDimension::EvType, "BEV");
        let next = config.merged([
            (FilterDimension::Make, "ford"),
            (FilterDimension::EvType, ""),
        ]);

        assert_eq!(next.make, "ford");
        assert_eq!(next.ev_type, "");
        assert_eq!(next.active_count(), 1);
    }

    #[test]
    fn cleared_has_no_active_dimensions() {
        assert!(!FilterConfig::cleared().has_active());
    }

    #[test]
    fn dimension_names_roundtrip() {
        for dimension in FilterDimension::all() {
            let parsed: FilterDimension = dimension.to_string().parse().unwrap();
            assert_eq!(parsed, *dimension);
        }
        assert_eq!(FilterDimension::EvType.to_string(), "evType");
        assert_eq!(FilterDimension::EvType.display_name(), "Type");
    }

    #[test]
    fn toggling_active_key_flips_direction() {
        let spec = SortSpec::desc(SortKey::Count);
        assert_eq!(spec.toggled(SortKey::Count), SortSpec::asc(SortKey::Count));
        assert_eq!(
            spec.toggled(SortKey::Count).toggled(SortKey::Count),
            SortSpec::desc(SortKey::Count)
        );
    }

    #[test]
    fn toggling_new_key_resets_to_ascending() {
        let spec = SortSpec::desc(SortKey::Count);
        assert_eq!(spec.toggled(SortKey::AvgPrice), SortSpec::asc(SortKey::AvgPrice));
    }

    #[test]
    fn default_sort_is_count_descending() {
        assert_eq!(SortSpec::default(), SortSpec::desc(SortKey::Count));
    }

    #[test]
    fn sort_key_parses_from_camel_case() {
        assert_eq!("avgRange".parse::<SortKey>().unwrap(), SortKey::AvgRange);
        assert_eq!(SortKey::AvgPrice.to_string(), "avgPrice");
        assert!("avg_range".parse::<SortKey>().is_err());
    }

    #[test]
    fn default_presets_cover_four_buckets() {
        let presets = RangePreset::defaults();
        assert_eq!(presets.len(), 4);
        assert_eq!(presets[3].label, "301+ miles");
        assert_eq!(presets[3].value, "301-500");
    }
}
