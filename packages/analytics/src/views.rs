//! Derived views for the dashboard.
//!
//! Each view function takes an already-filtered record set. [`compute_views`]
//! runs the whole pipeline (filter, group, rank) for one set of inputs.

use std::collections::HashSet;

use ev_dashboard_analytics_models::{
    DashboardViews, FilterConfig, MakeCount, ModelSummary, SortKey, SortSpec, SummaryStats,
    TypeShare, YearRangeStats,
};
use ev_dashboard_source_models::VehicleRecord;

use crate::AnalyticsError;
use crate::config::DashboardConfig;
use crate::filter::CompiledFilter;
use crate::group::{
    CountReducer, ModelReducer, RangeStatsReducer, ev_type_key, group_by, make_key,
    make_model_key, rounded_div, year_key,
};
use crate::rank::rank;

/// Vehicle counts per make, largest first, capped at `limit`.
///
/// # Errors
///
/// Never fails in practice; ranking by count is always supported.
pub fn make_distribution(
    records: &[&VehicleRecord],
    limit: Option<usize>,
) -> Result<Vec<MakeCount>, AnalyticsError> {
    let counts = group_by(records.iter().copied(), make_key, &CountReducer)
        .into_iter()
        .map(|group| MakeCount {
            label: group.key,
            count: group.count,
        })
        .collect();

    rank(counts, SortSpec::desc(SortKey::Count), limit)
}

/// Vehicle counts and shares per EV type, largest first.
///
/// Shares are relative to the whole filtered set, not to the sum of the
/// grouped counts.
///
/// # Errors
///
/// Never fails in practice; ranking by count is always supported.
pub fn type_distribution(records: &[&VehicleRecord]) -> Result<Vec<TypeShare>, AnalyticsError> {
    let total = records.len() as u64;
    let shares = group_by(records.iter().copied(), ev_type_key, &CountReducer)
        .into_iter()
        .map(|group| TypeShare {
            percentage: group.percentage_of(total),
            label: group.key,
            count: group.count,
        })
        .collect();

    rank(shares, SortSpec::desc(SortKey::Count), None)
}

/// Electric range statistics per model year, oldest first.
///
/// # Errors
///
/// Never fails in practice; ranking by year is always supported.
pub fn range_trend(records: &[&VehicleRecord]) -> Result<Vec<YearRangeStats>, AnalyticsError> {
    let stats = group_by(records.iter().copied(), year_key, &RangeStatsReducer)
        .into_iter()
        .map(|group| YearRangeStats {
            year: group.key,
            average: group.average_a(),
            min: group.min_value.unwrap_or_default(),
            max: group.max_value.unwrap_or_default(),
            count: group.count,
        })
        .collect();

    rank(stats, SortSpec::asc(SortKey::Year), None)
}

/// Make/model aggregates ordered by `sort`, capped at `limit`.
///
/// # Errors
///
/// Returns [`AnalyticsError::Config`] if `sort.key` is not a table column.
pub fn top_models(
    records: &[&VehicleRecord],
    sort: SortSpec,
    limit: Option<usize>,
) -> Result<Vec<ModelSummary>, AnalyticsError> {
    let models = group_by(records.iter().copied(), make_model_key, &ModelReducer)
        .into_iter()
        .map(|group| {
            let avg_range = group.average_a();
            let avg_price = group.average_b();
            let (make, model) = group.key;
            ModelSummary {
                make,
                model,
                count: group.count,
                avg_range,
                avg_price,
                ev_type: group.representative.unwrap_or_default(),
            }
        })
        .collect();

    rank(models, sort, limit)
}

/// Stat tile values over the filtered set.
///
/// Distinct counts compare exact field values. Averages include unknown
/// ranges and prices as zero.
#[must_use]
pub fn summary_stats(records: &[&VehicleRecord]) -> SummaryStats {
    let makes: HashSet<&str> = records.iter().map(|r| r.make.as_str()).collect();
    let states: HashSet<&str> = records.iter().map(|r| r.state.as_str()).collect();

    let total = records.len() as u64;
    let range_sum: u64 = records.iter().map(|r| u64::from(r.electric_range)).sum();
    let price_sum: u64 = records.iter().map(|r| u64::from(r.base_msrp)).sum();

    SummaryStats {
        total_vehicles: total,
        unique_makes: makes.len() as u64,
        unique_states: states.len() as u64,
        avg_range: rounded_div(range_sum, total),
        avg_price: rounded_div(price_sum, total),
    }
}

/// Computes every dashboard view for one set of inputs.
///
/// Filters `records` by `filters` first; every view is then derived from
/// that filtered set, and each ranked view is truncated only after sorting.
///
/// # Errors
///
/// Returns [`AnalyticsError::Config`] if `filters` is malformed or `sort` is
/// not a table column.
pub fn compute_views(
    records: &[VehicleRecord],
    filters: &FilterConfig,
    sort: SortSpec,
    config: &DashboardConfig,
) -> Result<DashboardViews, AnalyticsError> {
    let filtered = CompiledFilter::compile(filters)?.apply(records);

    let make_distribution = make_distribution(&filtered, Some(config.make_chart_limit))?;
    let make_distribution_total: u64 = make_distribution.iter().map(|m| m.count).sum();
    let type_distribution = type_distribution(&filtered)?;
    let range_trend = range_trend(&filtered)?;
    let top_models = top_models(&filtered, sort, Some(config.model_table_limit))?;
    let summary = summary_stats(&filtered);

    log::debug!(
        "Recomputed views: {}/{} records, {} makes, {} types, {} years, {} models",
        filtered.len(),
        records.len(),
        make_distribution.len(),
        type_distribution.len(),
        range_trend.len(),
        top_models.len(),
    );

    Ok(DashboardViews {
        filtered_count: filtered.len() as u64,
        summary,
        make_distribution,
        make_distribution_total,
        type_distribution,
        range_trend,
        top_models,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{refs, scenario, vehicle};
    use ev_dashboard_analytics_models::FilterDimension;

    #[test]
    fn make_distribution_keeps_first_seen_order_for_ties() {
        let records = vec![
            vehicle("Kia", "Niro", 2020, "BEV", 0, 0),
            vehicle("Tesla", "Model 3", 2020, "BEV", 0, 0),
            vehicle("Ford", "Mach-E", 2020, "BEV", 0, 0),
            vehicle("Tesla", "Model Y", 2020, "BEV", 0, 0),
        ];
        let makes = make_distribution(&refs(&records), None).unwrap();
        let labels: Vec<&str> = makes.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, ["Tesla", "Kia", "Ford"]);
    }

    #[test]
    fn make_distribution_is_capped() {
        let records: Vec<VehicleRecord> = (0..15)
            .map(|i| vehicle(&format!("Make {i}"), "X", 2020, "BEV", 0, 0))
            .collect();
        let makes = make_distribution(&refs(&records), Some(10)).unwrap();
        assert_eq!(makes.len(), 10);
        assert_eq!(makes[0].label, "Make 0");
        assert_eq!(makes[9].label, "Make 9");
    }

    #[test]
    fn type_shares_use_filtered_set_size() {
        let records = vec![
            vehicle("Tesla", "Model 3", 2022, "BEV", 0, 0),
            vehicle("Toyota", "Prius Prime", 2022, "PHEV", 0, 0),
            vehicle("Chevrolet", "Volt", 2017, "PHEV", 0, 0),
        ];
        let shares = type_distribution(&refs(&records)).unwrap();
        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].label, "PHEV");
        assert_eq!(shares[0].count, 2);
        assert!((shares[0].percentage - 66.7).abs() < f64::EPSILON);
        assert!((shares[1].percentage - 33.3).abs() < f64::EPSILON);
    }

    #[test]
    fn type_shares_sum_to_one_hundred() {
        let records: Vec<VehicleRecord> = ["BEV", "PHEV", "BEV", "FCEV", "PHEV", "BEV", "HEV"]
            .iter()
            .map(|t| vehicle("Make", "Model", 2020, t, 0, 0))
            .collect();
        let shares = type_distribution(&refs(&records)).unwrap();
        let sum: f64 = shares.iter().map(|s| s.percentage).sum();
        #[allow(clippy::cast_precision_loss)]
        let tolerance = 0.1 * shares.len() as f64;
        assert!((sum - 100.0).abs() <= tolerance, "sum was {sum}");
    }

    #[test]
    fn range_trend_excludes_unknown_range_and_sorts_by_year() {
        let mut records = scenario();
        records.push(vehicle("Nissan", "Leaf", 2013, "BEV", 75, 0));
        let trend = range_trend(&refs(&records)).unwrap();

        let years: Vec<i32> = trend.iter().map(|t| t.year).collect();
        assert_eq!(years, [2013, 2022]);
        assert_eq!(
            trend[1],
            YearRangeStats {
                year: 2022,
                average: 255,
                min: 250,
                max: 260,
                count: 2,
            }
        );
    }

    #[test]
    fn top_models_scenario() {
        let records = scenario();
        let models = top_models(&refs(&records), SortSpec::default(), Some(20)).unwrap();
        assert_eq!(models.len(), 2);
        assert_eq!(
            models[0],
            ModelSummary {
                make: "Tesla".to_string(),
                model: "Model 3".to_string(),
                count: 2,
                avg_range: 255,
                avg_price: 41_000,
                ev_type: "BEV".to_string(),
            }
        );
        assert_eq!(models[1].avg_range, 0);
        assert_eq!(models[1].avg_price, 0);
    }

    #[test]
    fn top_models_rejects_trend_only_key() {
        let records = scenario();
        let result = top_models(&refs(&records), SortSpec::asc(SortKey::Min), None);
        assert!(matches!(result, Err(AnalyticsError::Config { .. })));
    }

    #[test]
    fn summary_includes_unknown_values_as_zero() {
        let records = scenario();
        let summary = summary_stats(&refs(&records));
        assert_eq!(
            summary,
            SummaryStats {
                total_vehicles: 3,
                unique_makes: 2,
                unique_states: 1,
                avg_range: 170,
                avg_price: 27_333,
            }
        );
    }

    #[test]
    fn summary_of_empty_set_is_zero() {
        assert_eq!(summary_stats(&[]), SummaryStats::default());
    }

    #[test]
    fn compute_views_filters_before_aggregating() {
        let records = scenario();
        let filters = FilterConfig::default().with(FilterDimension::Range, "0-100");
        let views =
            compute_views(&records, &filters, SortSpec::default(), &DashboardConfig::default())
                .unwrap();

        assert_eq!(views.filtered_count, 1);
        assert_eq!(views.summary.total_vehicles, 1);
        assert_eq!(views.make_distribution.len(), 1);
        assert_eq!(views.make_distribution[0].label, "Ford");
        assert_eq!(views.make_distribution_total, 1);
        assert!(views.range_trend.is_empty());
        assert_eq!(views.top_models[0].model, "Mach-E");
    }

    #[test]
    fn compute_views_totals_only_shown_makes() {
        let mut records: Vec<VehicleRecord> = (0..12)
            .map(|i| vehicle(&format!("Make {i}"), "X", 2020, "BEV", 0, 0))
            .collect();
        records.push(vehicle("Make 0", "Y", 2020, "BEV", 0, 0));
        let views = compute_views(
            &records,
            &FilterConfig::default(),
            SortSpec::default(),
            &DashboardConfig::default(),
        )
        .unwrap();

        assert_eq!(views.make_distribution.len(), 10);
        assert_eq!(views.make_distribution[0].count, 2);
        assert_eq!(views.make_distribution_total, 11);
    }

    #[test]
    fn compute_views_is_deterministic() {
        let records = scenario();
        let filters = FilterConfig::default().with(FilterDimension::Make, "o");
        let config = DashboardConfig::default();
        let first = compute_views(&records, &filters, SortSpec::default(), &config).unwrap();
        let second = compute_views(&records, &filters, SortSpec::default(), &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn compute_views_over_no_records_is_empty() {
        let views = compute_views(
            &[],
            &FilterConfig::default(),
            SortSpec::default(),
            &DashboardConfig::default(),
        )
        .unwrap();
        assert_eq!(views, DashboardViews::default());
    }

    #[test]
    fn compute_views_surfaces_bad_year() {
        let filters = FilterConfig::default().with(FilterDimension::Year, "20x2");
        let result = compute_views(
            &scenario(),
            &filters,
            SortSpec::default(),
            &DashboardConfig::default(),
        );
        assert!(matches!(result, Err(AnalyticsError::Config { .. })));
    }
}
