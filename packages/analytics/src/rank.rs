//! Ranking and top-N truncation.
//!
//! [`rank`] sorts any [`Rankable`] collection by a [`SortSpec`] and then
//! truncates it. The sort is stable, text compares case-insensitively, and a
//! descending sort reverses the comparator rather than the output, so tied
//! items keep their input order in both directions.

use std::cmp::Ordering;

use ev_dashboard_analytics_models::{
    MakeCount, ModelSummary, SortDirection, SortKey, SortSpec, TypeShare, YearRangeStats,
};

use crate::AnalyticsError;

/// The value an item exposes for one sort key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortValue<'a> {
    /// Compared case-insensitively.
    Text(&'a str),
    /// Compared numerically.
    Number(f64),
}

/// An item that can be ordered by some subset of [`SortKey`]s.
pub trait Rankable {
    /// Returns `true` if items of this type carry `key`.
    fn supports(key: SortKey) -> bool;

    /// Returns this item's value for `key`, or `None` if unsupported.
    fn sort_value(&self, key: SortKey) -> Option<SortValue<'_>>;
}

/// Sort key materialized once per item so text is lower-cased only once.
#[derive(Debug, Clone, PartialEq)]
enum OrderingKey {
    Text(String),
    Number(f64),
}

impl From<SortValue<'_>> for OrderingKey {
    fn from(value: SortValue<'_>) -> Self {
        match value {
            SortValue::Text(s) => Self::Text(s.to_lowercase()),
            SortValue::Number(n) => Self::Number(n),
        }
    }
}

impl OrderingKey {
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Number(_), Self::Text(_)) => Ordering::Less,
            (Self::Text(_), Self::Number(_)) => Ordering::Greater,
        }
    }
}

/// Sorts `items` by `spec` and keeps at most `limit` of them.
///
/// `None` keeps every item. Truncation always happens after sorting.
///
/// # Errors
///
/// Returns [`AnalyticsError::Config`] if `T` does not carry `spec.key`.
pub fn rank<T: Rankable>(
    items: Vec<T>,
    spec: SortSpec,
    limit: Option<usize>,
) -> Result<Vec<T>, AnalyticsError> {
    if !T::supports(spec.key) {
        return Err(unsupported(spec.key));
    }

    let mut keyed = items
        .into_iter()
        .map(|item| {
            let key = item
                .sort_value(spec.key)
                .map(OrderingKey::from)
                .ok_or_else(|| unsupported(spec.key))?;
            Ok((key, item))
        })
        .collect::<Result<Vec<_>, AnalyticsError>>()?;

    keyed.sort_by(|(a, _), (b, _)| match spec.direction {
        SortDirection::Asc => a.compare(b),
        SortDirection::Desc => b.compare(a),
    });

    let mut ranked: Vec<T> = keyed.into_iter().map(|(_, item)| item).collect();
    if let Some(limit) = limit {
        ranked.truncate(limit);
    }
    Ok(ranked)
}

fn unsupported(key: SortKey) -> AnalyticsError {
    AnalyticsError::config(format!("Sort key '{key}' is not available for this view"))
}

#[allow(clippy::cast_precision_loss)]
const fn number(value: u64) -> SortValue<'static> {
    SortValue::Number(value as f64)
}

impl Rankable for MakeCount {
    fn supports(key: SortKey) -> bool {
        matches!(key, SortKey::Label | SortKey::Make | SortKey::Count)
    }

    fn sort_value(&self, key: SortKey) -> Option<SortValue<'_>> {
        match key {
            SortKey::Label | SortKey::Make => Some(SortValue::Text(&self.label)),
            SortKey::Count => Some(number(self.count)),
            _ => None,
        }
    }
}

impl Rankable for TypeShare {
    fn supports(key: SortKey) -> bool {
        matches!(
            key,
            SortKey::Label | SortKey::EvType | SortKey::Count | SortKey::Percentage
        )
    }

    fn sort_value(&self, key: SortKey) -> Option<SortValue<'_>> {
        match key {
            SortKey::Label | SortKey::EvType => Some(SortValue::Text(&self.label)),
            SortKey::Count => Some(number(self.count)),
            SortKey::Percentage => Some(SortValue::Number(self.percentage)),
            _ => None,
        }
    }
}

impl Rankable for YearRangeStats {
    fn supports(key: SortKey) -> bool {
        matches!(
            key,
            SortKey::Year | SortKey::Average | SortKey::Min | SortKey::Max | SortKey::Count
        )
    }

    fn sort_value(&self, key: SortKey) -> Option<SortValue<'_>> {
        match key {
            SortKey::Year => Some(SortValue::Number(f64::from(self.year))),
            SortKey::Average => Some(number(self.average)),
            SortKey::Min => Some(number(self.min)),
            SortKey::Max => Some(number(self.max)),
            SortKey::Count => Some(number(self.count)),
            _ => None,
        }
    }
}

impl Rankable for ModelSummary {
    fn supports(key: SortKey) -> bool {
        matches!(
            key,
            SortKey::Make
                | SortKey::Model
                | SortKey::EvType
                | SortKey::Count
                | SortKey::AvgRange
                | SortKey::AvgPrice
        )
    }

    fn sort_value(&self, key: SortKey) -> Option<SortValue<'_>> {
        match key {
            SortKey::Make => Some(SortValue::Text(&self.make)),
            SortKey::Model => Some(SortValue::Text(&self.model)),
            SortKey::EvType => Some(SortValue::Text(&self.ev_type)),
            SortKey::Count => Some(number(self.count)),
            SortKey::AvgRange => Some(number(self.avg_range)),
            SortKey::AvgPrice => Some(number(self.avg_price)),
            _ => None,
        }
    }
}
