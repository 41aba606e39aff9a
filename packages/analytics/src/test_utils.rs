use ev_dashboard_source_models::VehicleRecord;

/// Builds a complete record with the fields the analytics read.
pub fn vehicle(
    make: &str,
    model: &str,
    model_year: i32,
    ev_type: &str,
    electric_range: u32,
    base_msrp: u32,
) -> VehicleRecord {
    VehicleRecord {
        make: make.to_string(),
        model: model.to_string(),
        model_year,
        ev_type: ev_type.to_string(),
        electric_range,
        base_msrp,
        state: "WA".to_string(),
        ..Default::default()
    }
}

/// Two 2022 Tesla Model 3s and a 2021 Mach-E with unknown range and price.
pub fn scenario() -> Vec<VehicleRecord> {
    vec![
        vehicle("Tesla", "Model 3", 2022, "BEV", 250, 40_000),
        vehicle("Tesla", "Model 3", 2022, "BEV", 260, 42_000),
        vehicle("Ford", "Mach-E", 2021, "BEV", 0, 0),
    ]
}

/// Borrows every record, as a filtered set does.
pub fn refs(records: &[VehicleRecord]) -> Vec<&VehicleRecord> {
    records.iter().collect()
}
