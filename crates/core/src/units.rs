use rust_decimal::Decimal;

fn meters_per_foot() -> Decimal {
    Decimal::new(3048, 4)
}

/// Exact conversion used wherever foot-denominated quantities meet
/// meter-denominated pricing thresholds and labor formulas.
pub fn feet_to_meters(feet: Decimal) -> Decimal {
    feet * meters_per_foot()
}
