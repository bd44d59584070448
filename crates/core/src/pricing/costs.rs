use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::pricing_config::PricingConfig;
use crate::units::feet_to_meters;

/// Computed financial breakdown, full precision. Tax and discount are the
/// orchestrator's concern and are layered on after this step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub materials_cost: Decimal,
    pub labor_cost: Decimal,
    pub subtotal: Decimal,
    pub contingency_amount: Decimal,
    pub profit_amount: Decimal,
    pub total_amount: Decimal,
}

pub fn labor_hours(total_linear_feet: Decimal, config: &PricingConfig) -> Decimal {
    feet_to_meters(total_linear_feet) * config.hours_per_linear_meter
}

pub fn labor_cost(total_linear_feet: Decimal, config: &PricingConfig) -> Decimal {
    labor_hours(total_linear_feet, config) * config.labor_rate_per_hour
}

pub fn compute_breakdown(
    materials_cost: Decimal,
    labor_cost: Decimal,
    config: &PricingConfig,
) -> CostBreakdown {
    let subtotal = materials_cost + labor_cost;
    let contingency_amount = subtotal * config.contingency_pct;
    // Profit is margin on cost-plus-contingency, not on the subtotal alone.
    let profit_amount = (subtotal + contingency_amount) * config.profit_margin_pct;
    let total_amount = subtotal + contingency_amount + profit_amount;

    CostBreakdown {
        materials_cost,
        labor_cost,
        subtotal,
        contingency_amount,
        profit_amount,
        total_amount,
    }
}
