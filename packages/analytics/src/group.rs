//! Grouping and reduction over a filtered record set.
//!
//! [`group_by`] buckets records by a derived key and folds each record into
//! its group's [`AggregateGroup`] through a [`Reducer`]. Groups come back in
//! first-seen key order; any reordering is left to the ranking stage.

use std::collections::HashMap;
use std::hash::Hash;

use ev_dashboard_source_models::VehicleRecord;

/// Accumulated statistics for one key.
///
/// `total_a` and `total_b` are raw sums; averages are derived on read and
/// only the final division is rounded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateGroup<K> {
    /// Group key.
    pub key: K,
    /// Number of contributing records.
    pub count: u64,
    /// First summed field.
    pub total_a: u64,
    /// Second summed field.
    pub total_b: u64,
    /// Smallest observed value, if the reducer tracks one.
    pub min_value: Option<u64>,
    /// Largest observed value, if the reducer tracks one.
    pub max_value: Option<u64>,
    /// Display value taken from the first contributing record.
    pub representative: Option<String>,
}

impl<K> AggregateGroup<K> {
    /// Creates an empty group.
    #[must_use]
    pub const fn new(key: K) -> Self {
        Self {
            key,
            count: 0,
            total_a: 0,
            total_b: 0,
            min_value: None,
            max_value: None,
            representative: None,
        }
    }

    /// Folds `value` into the min/max bounds.
    pub fn observe(&mut self, value: u64) {
        self.min_value = Some(self.min_value.map_or(value, |min| min.min(value)));
        self.max_value = Some(self.max_value.map_or(value, |max| max.max(value)));
    }

    /// Rounded `total_a / count`.
    #[must_use]
    pub const fn average_a(&self) -> u64 {
        rounded_div(self.total_a, self.count)
    }

    /// Rounded `total_b / count`.
    #[must_use]
    pub const fn average_b(&self) -> u64 {
        rounded_div(self.total_b, self.count)
    }

    /// This group's share of `total`, rounded to one decimal place.
    #[must_use]
    pub fn percentage_of(&self, total: u64) -> f64 {
        percentage(self.count, total)
    }
}

/// Folds records into an [`AggregateGroup`].
pub trait Reducer {
    /// Returns `false` for records that must not contribute to any group.
    fn admits(&self, _record: &VehicleRecord) -> bool {
        true
    }

    /// Adds `record` to `group`. Called once per admitted record.
    fn accumulate<K>(&self, group: &mut AggregateGroup<K>, record: &VehicleRecord);
}

/// Counts records and nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct CountReducer;

impl Reducer for CountReducer {
    fn accumulate<K>(&self, group: &mut AggregateGroup<K>, _record: &VehicleRecord) {
        group.count += 1;
    }
}

/// Electric range statistics over records with a known range.
///
/// A zero range means "unknown" here, so those records are left out of the
/// sum, the bounds, and the count.
#[derive(Debug, Clone, Copy, Default)]
pub struct RangeStatsReducer;

impl Reducer for RangeStatsReducer {
    fn admits(&self, record: &VehicleRecord) -> bool {
        record.electric_range > 0
    }

    fn accumulate<K>(&self, group: &mut AggregateGroup<K>, record: &VehicleRecord) {
        let range = u64::from(record.electric_range);
        group.count += 1;
        group.total_a += range;
        group.observe(range);
    }
}

/// Range and price totals per make/model, keeping the first EV type seen.
///
/// Zero ranges and prices are summed as real zeros, so they pull the
/// averages down.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelReducer;

impl Reducer for ModelReducer {
    fn accumulate<K>(&self, group: &mut AggregateGroup<K>, record: &VehicleRecord) {
        group.count += 1;
        group.total_a += u64::from(record.electric_range);
        group.total_b += u64::from(record.base_msrp);
        group
            .representative
            .get_or_insert_with(|| record.ev_type.clone());
    }
}

/// Groups `records` by `key_fn` and reduces each group with `reducer`.
///
/// Records for which `key_fn` returns `None` (blank keys) are dropped, as
/// are records the reducer does not admit. Groups are returned in the order
/// their key was first seen.
pub fn group_by<'a, K, I, F, R>(records: I, key_fn: F, reducer: &R) -> Vec<AggregateGroup<K>>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = &'a VehicleRecord>,
    F: Fn(&VehicleRecord) -> Option<K>,
    R: Reducer,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<AggregateGroup<K>> = Vec::new();

    for record in records {
        if !reducer.admits(record) {
            continue;
        }
        let Some(key) = key_fn(record) else {
            continue;
        };

        let slot = *index.entry(key.clone()).or_insert_with(|| {
            groups.push(AggregateGroup::new(key));
            groups.len() - 1
        });
        reducer.accumulate(&mut groups[slot], record);
    }

    groups
}

/// Trims `value`, returning `None` if nothing is left.
#[must_use]
pub fn trimmed_key(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Key function: trimmed make.
#[must_use]
pub fn make_key(record: &VehicleRecord) -> Option<String> {
    trimmed_key(&record.make)
}

/// Key function: trimmed EV type.
#[must_use]
pub fn ev_type_key(record: &VehicleRecord) -> Option<String> {
    trimmed_key(&record.ev_type)
}

/// Key function: model year, skipping the unknown year `0`.
#[must_use]
pub const fn year_key(record: &VehicleRecord) -> Option<i32> {
    if record.model_year == 0 {
        None
    } else {
        Some(record.model_year)
    }
}

/// Key function: trimmed `(make, model)` pair.
#[must_use]
pub fn make_model_key(record: &VehicleRecord) -> Option<(String, String)> {
    Some((trimmed_key(&record.make)?, trimmed_key(&record.model)?))
}

/// `numerator / denominator` rounded half away from zero, `0` when the
/// denominator is `0`.
#[must_use]
pub const fn rounded_div(numerator: u64, denominator: u64) -> u64 {
    if denominator == 0 {
        return 0;
    }
    let quotient = numerator / denominator;
    let remainder = numerator % denominator;
    if remainder >= denominator - remainder {
        quotient + 1
    } else {
        quotient
    }
}

/// `part / total * 100` rounded to one decimal place, `0.0` when `total` is
/// `0`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn percentage(part: u64, total: u64) -> f64 {
    rounded_div(part.saturating_mul(1000), total) as f64 / 10.0
}
