use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::OrgId;

/// Category label reserved for the synthetic labor row the aggregator
/// appends; catalog components must not claim it.
pub const LABOR_CATEGORY: &str = "Labor";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentId(pub Uuid);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: ComponentId,
    pub organization_id: OrgId,
    pub name: String,
    pub category: String,
    pub unit_of_measure: String,
    pub unit_price: Decimal,
    pub sku: Option<String>,
}
