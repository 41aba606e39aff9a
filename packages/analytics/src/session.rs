//! Reactive host for the dashboard pipeline.
//!
//! A [`DashboardSession`] owns every input the views depend on. Each mutator
//! builds the next set of inputs, recomputes all views from scratch, and
//! only commits the new inputs once that recomputation succeeds. A rejected
//! update leaves the session exactly as it was.

use ev_dashboard_analytics_models::{
    ActiveFilter, DashboardViews, FilterConfig, FilterDimension, FilterOptions, SortKey, SortSpec,
};
use ev_dashboard_source_models::VehicleRecord;

use crate::AnalyticsError;
use crate::config::DashboardConfig;
use crate::options::{active_filters, filter_options, make_match_count};
use crate::views::compute_views;

/// The current dashboard state and its derived views.
#[derive(Debug, Clone)]
pub struct DashboardSession {
    config: DashboardConfig,
    records: Vec<VehicleRecord>,
    filters: FilterConfig,
    sort: SortSpec,
    views: DashboardViews,
    options: FilterOptions,
}

impl DashboardSession {
    /// Creates a session with no records loaded.
    ///
    /// The table starts out sorted by `config.default_model_sort`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::Config`] if `config` has an invalid range
    /// preset or a default sort the table cannot use.
    pub fn new(config: DashboardConfig) -> Result<Self, AnalyticsError> {
        config.validate()?;
        let sort = config.default_model_sort;
        let filters = FilterConfig::default();
        let views = compute_views(&[], &filters, sort, &config)?;

        Ok(Self {
            config,
            records: Vec::new(),
            filters,
            sort,
            views,
            options: FilterOptions::default(),
        })
    }

    /// Replaces the whole record set, keeping the current filters and sort.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::Config`] if recomputation fails.
    pub fn replace_records(
        &mut self,
        records: Vec<VehicleRecord>,
    ) -> Result<&DashboardViews, AnalyticsError> {
        self.commit(Some(records), self.filters.clone(), self.sort)
    }

    /// Sets one filter dimension.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::Config`] if the resulting filters are
    /// malformed; the previous filters stay in effect.
    pub fn set_filter(
        &mut self,
        dimension: FilterDimension,
        value: impl Into<String>,
    ) -> Result<&DashboardViews, AnalyticsError> {
        let filters = self.filters.with(dimension, value);
        self.commit(None, filters, self.sort)
    }

    /// Clears one filter dimension, leaving the others untouched.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::Config`] if recomputation fails.
    pub fn clear_filter(
        &mut self,
        dimension: FilterDimension,
    ) -> Result<&DashboardViews, AnalyticsError> {
        let filters = self.filters.without(dimension);
        self.commit(None, filters, self.sort)
    }

    /// Applies several filter changes as one update.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::Config`] if the merged filters are
    /// malformed; none of the changes are applied in that case.
    pub fn update_filters<I, S>(&mut self, updates: I) -> Result<&DashboardViews, AnalyticsError>
    where
        I: IntoIterator<Item = (FilterDimension, S)>,
        S: Into<String>,
    {
        let filters = self.filters.merged(updates);
        self.commit(None, filters, self.sort)
    }

    /// Clears every filter dimension at once.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::Config`] if recomputation fails.
    pub fn clear_filters(&mut self) -> Result<&DashboardViews, AnalyticsError> {
        self.commit(None, FilterConfig::cleared(), self.sort)
    }

    /// Applies a click on the `key` column header of the models table.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::Config`] if `key` is not a table column.
    pub fn toggle_sort(&mut self, key: SortKey) -> Result<&DashboardViews, AnalyticsError> {
        let sort = self.sort.toggled(key);
        log::debug!("Toggling table sort to {} {}", sort.key, sort.direction);
        self.commit(None, self.filters.clone(), sort)
    }

    /// Sets the models table sort directly.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::Config`] if `sort.key` is not a table
    /// column.
    pub fn set_sort(&mut self, sort: SortSpec) -> Result<&DashboardViews, AnalyticsError> {
        self.commit(None, self.filters.clone(), sort)
    }

    #[must_use]
    pub fn records(&self) -> &[VehicleRecord] {
        &self.records
    }

    #[must_use]
    pub const fn filters(&self) -> &FilterConfig {
        &self.filters
    }

    #[must_use]
    pub const fn sort(&self) -> SortSpec {
        self.sort
    }

    #[must_use]
    pub const fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Views derived from the committed inputs.
    #[must_use]
    pub const fn views(&self) -> &DashboardViews {
        &self.views
    }

    /// Selectable filter values drawn from the full record set.
    #[must_use]
    pub const fn filter_options(&self) -> &FilterOptions {
        &self.options
    }

    /// Chips describing the active filters.
    #[must_use]
    pub fn active_filters(&self) -> Vec<ActiveFilter> {
        active_filters(&self.filters, &self.config.range_presets)
    }

    /// Number of known makes matching a make search.
    #[must_use]
    pub fn make_match_count(&self, query: &str) -> usize {
        make_match_count(&self.options, query)
    }

    fn commit(
        &mut self,
        records: Option<Vec<VehicleRecord>>,
        filters: FilterConfig,
        sort: SortSpec,
    ) -> Result<&DashboardViews, AnalyticsError> {
        let candidate = records.as_deref().unwrap_or(&self.records);
        let views = match compute_views(candidate, &filters, sort, &self.config) {
            Ok(views) => views,
            Err(e) => {
                log::warn!("Rejected dashboard update: {e}");
                return Err(e);
            }
        };

        if let Some(records) = records {
            self.options = filter_options(&records);
            self.records = records;
        }
        self.filters = filters;
        self.sort = sort;
        self.views = views;

        Ok(&self.views)
    }
}
