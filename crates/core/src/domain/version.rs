use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::quote::QuoteId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuoteVersionId(pub Uuid);

/// BOM row fields frozen into a version. Deliberately denormalized: no
/// component reference survives here, so catalog edits cannot reach back
/// into stored history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BomLineSnapshot {
    pub category: String,
    pub description: String,
    pub sku: Option<String>,
    pub quantity: Decimal,
    pub unit_of_measure: String,
    pub unit_price: Decimal,
    pub total_price: Decimal,
    pub sort_order: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeightTierSnapshot {
    pub min_height_m: Decimal,
    pub max_height_m: Option<Decimal>,
    pub multiplier: Decimal,
    pub description: String,
}

/// Pricing-config parameters as they were when the version was cut.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricingConfigSnapshot {
    pub name: String,
    pub labor_rate_per_hour: Decimal,
    pub hours_per_linear_meter: Decimal,
    pub contingency_pct: Decimal,
    pub profit_margin_pct: Decimal,
    pub height_tiers: Vec<HeightTierSnapshot>,
}

/// Append-only, immutable snapshot of a quote's computed state.
/// `(quote_id, version_number)` is unique; version numbers start at 1 and
/// increase without gaps. Entries are never updated or deleted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuoteVersion {
    pub id: QuoteVersionId,
    pub quote_id: QuoteId,
    pub version_number: u32,
    pub change_summary: Option<String>,
    pub materials_cost: Decimal,
    pub labor_cost: Decimal,
    pub subtotal: Decimal,
    pub contingency_amount: Decimal,
    pub profit_amount: Decimal,
    pub tax_amount: Decimal,
    pub discount_amount: Decimal,
    pub total_amount: Decimal,
    pub grand_total: Decimal,
    pub bom_snapshot: Vec<BomLineSnapshot>,
    pub pricing_snapshot: PricingConfigSnapshot,
    pub content_hash: String,
    pub created_at: DateTime<Utc>,
}
