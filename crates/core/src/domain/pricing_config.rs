use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::OrgId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PricingConfigId(pub Uuid);

/// Height band in meters mapped to a price multiplier. `max_height_m` of
/// `None` means unbounded. Bounds are inclusive on both ends.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeightTier {
    pub min_height_m: Decimal,
    pub max_height_m: Option<Decimal>,
    pub multiplier: Decimal,
    pub description: String,
}

/// Tenant-scoped formula parameters. `contingency_pct` and
/// `profit_margin_pct` are fractions (0.10 = 10%). At most one default per
/// organization is enforced by the collaborator loading these, not here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    pub id: PricingConfigId,
    pub organization_id: OrgId,
    pub name: String,
    pub labor_rate_per_hour: Decimal,
    pub hours_per_linear_meter: Decimal,
    pub contingency_pct: Decimal,
    pub profit_margin_pct: Decimal,
    pub is_default: bool,
    pub height_tiers: Vec<HeightTier>,
}
