//! Filter predicate evaluation.
//!
//! A [`FilterConfig`] holds raw text per dimension. It is compiled once into
//! a [`CompiledFilter`], which validates the year and range encodings up
//! front so that a malformed value is reported even when there are no
//! records to filter.

use std::str::FromStr;

use ev_dashboard_analytics_models::FilterConfig;
use ev_dashboard_source_models::VehicleRecord;

use crate::AnalyticsError;

/// Inclusive electric range interval parsed from a `"min-max"` encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RangeInterval {
    /// Lower bound (inclusive).
    pub min: u32,
    /// Upper bound (inclusive).
    pub max: u32,
}

impl RangeInterval {
    /// Returns `true` if `value` lies within the interval.
    #[must_use]
    pub const fn contains(self, value: u32) -> bool {
        value >= self.min && value <= self.max
    }
}

impl FromStr for RangeInterval {
    type Err = AnalyticsError;

    fn from_str(encoded: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = encoded.split('-').collect();
        let &[min, max] = parts.as_slice() else {
            return Err(AnalyticsError::config(format!(
                "Invalid range '{encoded}': expected format min-max"
            )));
        };

        let bound = |s: &str| {
            s.trim().parse::<u32>().map_err(|e| {
                AnalyticsError::config(format!(
                    "Invalid range '{encoded}': bound '{s}' is not a non-negative integer ({e})"
                ))
            })
        };
        let min = bound(min)?;
        let max = bound(max)?;

        if min > max {
            return Err(AnalyticsError::config(format!(
                "Invalid range '{encoded}': min {min} is greater than max {max}"
            )));
        }

        Ok(Self { min, max })
    }
}

/// A validated set of filter predicates, AND-combined.
///
/// `None` for a dimension means it does not constrain the record set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledFilter {
    make: Option<String>,
    year: Option<i32>,
    ev_type: Option<String>,
    state: Option<String>,
    range: Option<RangeInterval>,
}

impl CompiledFilter {
    /// Validates `config` and prepares its predicates.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::Config`] if the year is not an integer or the
    /// range is not a well-formed `"min-max"` interval.
    pub fn compile(config: &FilterConfig) -> Result<Self, AnalyticsError> {
        let make = non_empty(&config.make).map(str::to_lowercase);

        let year = non_empty(&config.year)
            .map(|year| {
                year.trim().parse::<i32>().map_err(|e| {
                    AnalyticsError::config(format!("Invalid year '{year}': {e}"))
                })
            })
            .transpose()?;

        let range = non_empty(&config.range)
            .map(RangeInterval::from_str)
            .transpose()?;

        Ok(Self {
            make,
            year,
            ev_type: non_empty(&config.ev_type).map(String::from),
            state: non_empty(&config.state).map(String::from),
            range,
        })
    }

    /// Returns `true` if no dimension is constrained.
    #[must_use]
    pub const fn is_unconstrained(&self) -> bool {
        self.make.is_none()
            && self.year.is_none()
            && self.ev_type.is_none()
            && self.state.is_none()
            && self.range.is_none()
    }

    /// Returns `true` if `record` satisfies every active predicate.
    #[must_use]
    pub fn matches(&self, record: &VehicleRecord) -> bool {
        if let Some(make) = &self.make
            && !record.make.to_lowercase().contains(make.as_str())
        {
            return false;
        }

        if let Some(year) = self.year
            && record.model_year != year
        {
            return false;
        }

        if let Some(ev_type) = &self.ev_type
            && record.ev_type != *ev_type
        {
            return false;
        }

        if let Some(state) = &self.state
            && record.state != *state
        {
            return false;
        }

        self.range
            .is_none_or(|range| range.contains(record.electric_range))
    }

    /// Keeps the records that satisfy every active predicate, in their
    /// original order.
    pub fn apply<'a, I>(&self, records: I) -> Vec<&'a VehicleRecord>
    where
        I: IntoIterator<Item = &'a VehicleRecord>,
    {
        if self.is_unconstrained() {
            return records.into_iter().collect();
        }
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}

/// Filters `records` by `config`, preserving order.
///
/// An all-empty config returns every record.
///
/// # Errors
///
/// Returns [`AnalyticsError::Config`] if `config` cannot be compiled.
pub fn filter_records<'a, I>(
    records: I,
    config: &FilterConfig,
) -> Result<Vec<&'a VehicleRecord>, AnalyticsError>
where
    I: IntoIterator<Item = &'a VehicleRecord>,
{
    let compiled = CompiledFilter::compile(config)?;
    Ok(compiled.apply(records))
}

fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() { None } else { Some(value) }
}
