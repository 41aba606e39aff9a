//! Raw row to [`VehicleRecord`] normalization.
//!
//! A row is either fully normalized or rejected; no partial records are ever
//! emitted. Rejections in a batch are expected (the public dataset has
//! incomplete rows) and are only counted, never surfaced as errors.

use ev_dashboard_source_models::{ColumnMapping, RecordField, VehicleRecord};
use serde_json::Value;

use crate::SourceError;
use crate::parsing::{text_field, unsigned_field, year_field};

/// Result of normalizing a batch of raw rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedBatch {
    /// Records that passed validation, in source order.
    pub records: Vec<VehicleRecord>,
    /// Number of rows dropped because a required field was missing.
    pub rejected: usize,
}

/// Normalizes a single raw row into a [`VehicleRecord`].
///
/// # Errors
///
/// Returns [`SourceError::Normalization`] if the row is not a JSON object or
/// if the make, model, model year, or EV type is empty after defaulting.
pub fn normalize_row(row: &Value, mapping: &ColumnMapping) -> Result<VehicleRecord, SourceError> {
    if !row.is_object() {
        return Err(SourceError::Normalization {
            message: "raw row is not an object".to_string(),
        });
    }

    let text = |field: RecordField| text_field(row, mapping.column(field));

    let record = VehicleRecord {
        make: text(RecordField::Make),
        model: text(RecordField::Model),
        model_year: year_field(row, mapping.column(RecordField::ModelYear)),
        ev_type: text(RecordField::EvType),
        electric_range: unsigned_field(row, mapping.column(RecordField::ElectricRange)),
        base_msrp: unsigned_field(row, mapping.column(RecordField::BaseMsrp)),
        county: text(RecordField::County),
        city: text(RecordField::City),
        state: text(RecordField::State),
        vin: text(RecordField::Vin),
        postal_code: text(RecordField::PostalCode),
        clean_alternative_fuel: text(RecordField::CleanAlternativeFuel),
        legislative_district: text(RecordField::LegislativeDistrict),
        dol_vehicle_id: text(RecordField::DolVehicleId),
        vehicle_location: text(RecordField::VehicleLocation),
        electric_utility: text(RecordField::ElectricUtility),
        census_tract: text(RecordField::CensusTract),
    };

    if let Some(field) = record.missing_field() {
        return Err(SourceError::Normalization {
            message: format!(
                "missing required field {field} (column '{}')",
                mapping.column(field)
            ),
        });
    }

    Ok(record)
}

/// Normalizes an ordered batch of raw rows, silently dropping rows that
/// cannot be normalized.
#[must_use]
pub fn normalize_rows(rows: &[Value], mapping: &ColumnMapping) -> NormalizedBatch {
    let mut records = Vec::with_capacity(rows.len());
    let mut rejected = 0;

    for (index, row) in rows.iter().enumerate() {
        match normalize_row(row, mapping) {
            Ok(record) => records.push(record),
            Err(e) => {
                log::debug!("Skipping row {index}: {e}");
                rejected += 1;
            }
        }
    }

    log::info!(
        "Normalized {} vehicle records ({rejected} rejected)",
        records.len()
    );

    NormalizedBatch { records, rejected }
}
