#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! The canonical normalized vehicle record and the column mapping used to
//! build it.
//!
//! Raw rows handed over by the data source collaborator are heterogeneous
//! (strings, numbers, blanks). Every row that survives normalization becomes
//! a [`VehicleRecord`], and all analytics operate only on that shape.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A field of [`VehicleRecord`] that is populated from a source column.
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
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RecordField {
    /// Manufacturer name.
    Make,
    /// Model name.
    Model,
    /// Model year.
    ModelYear,
    /// Powertrain type (BEV, PHEV, ...).
    EvType,
    /// All-electric range in miles.
    ElectricRange,
    /// Manufacturer's suggested base retail price.
    BaseMsrp,
    /// County of registration.
    County,
    /// City of registration.
    City,
    /// State of registration.
    State,
    /// Truncated vehicle identification number.
    Vin,
    /// Postal code of registration.
    PostalCode,
    /// Clean alternative fuel vehicle eligibility.
    CleanAlternativeFuel,
    /// Legislative district.
    LegislativeDistrict,
    /// Department of licensing vehicle identifier.
    DolVehicleId,
    /// Geographic point of the registration.
    VehicleLocation,
    /// Electric utility serving the registration address.
    ElectricUtility,
    /// 2020 census tract.
    CensusTract,
}

impl RecordField {
    /// Fields that must be non-empty (or non-zero) for a row to be kept.
    #[must_use]
    pub const fn required() -> &'static [Self] {
        &[Self::Make, Self::Model, Self::ModelYear, Self::EvType]
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Make,
            Self::Model,
            Self::ModelYear,
            Self::EvType,
            Self::ElectricRange,
            Self::BaseMsrp,
            Self::County,
            Self::City,
            Self::State,
            Self::Vin,
            Self::PostalCode,
            Self::CleanAlternativeFuel,
            Self::LegislativeDistrict,
            Self::DolVehicleId,
            Self::VehicleLocation,
            Self::ElectricUtility,
            Self::CensusTract,
        ]
    }
}

/// One vehicle registration normalized to the canonical schema.
///
/// Numeric fields use `0` for "unknown": an `electric_range` of `0` is an
/// undisclosed range, not a vehicle with no electric range, and a
/// `base_msrp` of `0` is an undisclosed price.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRecord {
    /// Manufacturer name (e.g., "TESLA").
    pub make: String,
    /// Model name (e.g., "MODEL 3").
    pub model: String,
    /// Model year. Never `0` for a record produced by the normalizer.
    pub model_year: i32,
    /// Powertrain type, kept as the source spells it.
    pub ev_type: String,
    /// All-electric range in miles, `0` when unknown.
    pub electric_range: u32,
    /// Base MSRP in dollars, `0` when undisclosed.
    pub base_msrp: u32,
    /// County of registration.
    pub county: String,
    /// City of registration.
    pub city: String,
    /// Two-letter state abbreviation.
    pub state: String,
    /// First ten characters of the VIN.
    pub vin: String,
    /// Postal code.
    pub postal_code: String,
    /// Clean alternative fuel vehicle eligibility text.
    pub clean_alternative_fuel: String,
    /// Legislative district.
    pub legislative_district: String,
    /// Department of licensing vehicle identifier.
    pub dol_vehicle_id: String,
    /// Vehicle location (usually a WKT point).
    pub vehicle_location: String,
    /// Electric utility.
    pub electric_utility: String,
    /// 2020 census tract.
    pub census_tract: String,
}

impl VehicleRecord {
    /// Returns `true` if every required field is populated.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing_field().is_none()
    }

    /// Returns the first required field that is empty or zero, if any.
    #[must_use]
    pub fn missing_field(&self) -> Option<RecordField> {
        if self.make.is_empty() {
            Some(RecordField::Make)
        } else if self.model.is_empty() {
            Some(RecordField::Model)
        } else if self.model_year == 0 {
            Some(RecordField::ModelYear)
        } else if self.ev_type.is_empty() {
            Some(RecordField::EvType)
        } else {
            None
        }
    }
}

/// Maps each [`RecordField`] to the raw column name it is read from.
///
/// Defaults match the headers of the public electric vehicle population
/// dataset. Every key is optional when deserializing, so a TOML override
/// only needs to list the columns that differ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    /// Column holding the make.
    pub make: String,
    /// Column holding the model.
    pub model: String,
    /// Column holding the model year.
    pub model_year: String,
    /// Column holding the EV type.
    pub ev_type: String,
    /// Column holding the electric range.
    pub electric_range: String,
    /// Column holding the base MSRP.
    pub base_msrp: String,
    /// Column holding the county.
    pub county: String,
    /// Column holding the city.
    pub city: String,
    /// Column holding the state.
    pub state: String,
    /// Column holding the VIN prefix.
    pub vin: String,
    /// Column holding the postal code.
    pub postal_code: String,
    /// Column holding CAFV eligibility.
    pub clean_alternative_fuel: String,
    /// Column holding the legislative district.
    pub legislative_district: String,
    /// Column holding the DOL vehicle id.
    pub dol_vehicle_id: String,
    /// Column holding the vehicle location.
    pub vehicle_location: String,
    /// Column holding the electric utility.
    pub electric_utility: String,
    /// Column holding the census tract.
    pub census_tract: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            make: "Make".to_string(),
            model: "Model".to_string(),
            model_year: "Model Year".to_string(),
            ev_type: "Electric Vehicle Type".to_string(),
            electric_range: "Electric Range".to_string(),
            base_msrp: "Base MSRP".to_string(),
            county: "County".to_string(),
            city: "City".to_string(),
            state: "State".to_string(),
            vin: "VIN (1-10)".to_string(),
            postal_code: "Postal Code".to_string(),
            clean_alternative_fuel: "Clean Alternative Fuel Vehicle (CAFV) Eligibility"
                .to_string(),
            legislative_district: "Legislative District".to_string(),
            dol_vehicle_id: "DOL Vehicle ID".to_string(),
            vehicle_location: "Vehicle Location".to_string(),
            electric_utility: "Electric Utility".to_string(),
            census_tract: "2020 Census Tract".to_string(),
        }
    }
}

impl ColumnMapping {
    /// Returns the raw column name for `field`.
    #[must_use]
    pub fn column(&self, field: RecordField) -> &str {
        match field {
            RecordField::Make => &self.make,
            RecordField::Model => &self.model,
            RecordField::ModelYear => &self.model_year,
            RecordField::EvType => &self.ev_type,
            RecordField::ElectricRange => &self.electric_range,
            RecordField::BaseMsrp => &self.base_msrp,
            RecordField::County => &self.county,
            RecordField::City => &self.city,
            RecordField::State => &self.state,
            RecordField::Vin => &self.vin,
            RecordField::PostalCode => &self.postal_code,
            RecordField::CleanAlternativeFuel => &self.clean_alternative_fuel,
            RecordField::LegislativeDistrict => &self.legislative_district,
            RecordField::DolVehicleId => &self.dol_vehicle_id,
            RecordField::VehicleLocation => &self.vehicle_location,
            RecordField::ElectricUtility => &self.electric_utility,
            RecordField::CensusTract => &self.census_tract,
        }
    }
}
