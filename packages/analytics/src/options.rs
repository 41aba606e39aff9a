//! Filter selector options and active filter chips.

use std::cmp::Reverse;
use std::collections::BTreeSet;

use ev_dashboard_analytics_models::{
    ActiveFilter, FilterConfig, FilterDimension, FilterOptions, RangePreset,
};
use ev_dashboard_source_models::VehicleRecord;

/// Collects the distinct selectable values of each dimension from the full
/// record set.
///
/// Blank strings and the unknown year `0` are left out. Years are newest
/// first; everything else is ascending.
#[must_use]
pub fn filter_options(records: &[VehicleRecord]) -> FilterOptions {
    let mut makes = BTreeSet::new();
    let mut years = BTreeSet::new();
    let mut ev_types = BTreeSet::new();
    let mut states = BTreeSet::new();
    let mut counties = BTreeSet::new();

    for record in records {
        insert_non_blank(&mut makes, &record.make);
        insert_non_blank(&mut ev_types, &record.ev_type);
        insert_non_blank(&mut states, &record.state);
        insert_non_blank(&mut counties, &record.county);
        if record.model_year != 0 {
            years.insert(Reverse(record.model_year));
        }
    }

    FilterOptions {
        makes: makes.into_iter().collect(),
        years: years.into_iter().map(|Reverse(year)| year).collect(),
        ev_types: ev_types.into_iter().collect(),
        states: states.into_iter().collect(),
        counties: counties.into_iter().collect(),
    }
}

fn insert_non_blank(set: &mut BTreeSet<String>, value: &str) {
    if !value.trim().is_empty() && !set.contains(value) {
        set.insert(value.to_string());
    }
}

/// Counts the option makes containing `query`, ignoring case.
///
/// An empty query matches every make.
#[must_use]
pub fn make_match_count(options: &FilterOptions, query: &str) -> usize {
    let query = query.to_lowercase();
    options
        .makes
        .iter()
        .filter(|make| make.to_lowercase().contains(&query))
        .count()
}

/// Describes each active dimension of `config` for display, in dimension
/// order.
///
/// A range value shows the matching preset's label when there is one.
#[must_use]
pub fn active_filters(config: &FilterConfig, presets: &[RangePreset]) -> Vec<ActiveFilter> {
    FilterDimension::all()
        .iter()
        .filter(|dimension| config.is_active(**dimension))
        .map(|&dimension| {
            let raw = config.get(dimension);
            let value = match dimension {
                FilterDimension::Range => presets
                    .iter()
                    .find(|preset| preset.value == raw)
                    .map_or(raw, |preset| preset.label.as_str()),
                _ => raw,
            };
            ActiveFilter {
                dimension,
                name: dimension.display_name().to_string(),
                value: value.to_string(),
            }
        })
        .collect()
}
