use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::component::Component;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FenceTypeId(pub Uuid);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GateTypeId(pub Uuid);

/// One catalog component and how much of it a single unit of product
/// consumes: per linear foot for fences, per gate for gates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComponentRequirement {
    pub component: Component,
    pub quantity_per_unit: Decimal,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FenceType {
    pub id: FenceTypeId,
    pub name: String,
    pub height_ft: Decimal,
    pub base_price: Decimal,
    pub requirements: Vec<ComponentRequirement>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GateType {
    pub id: GateTypeId,
    pub name: String,
    pub width_ft: Decimal,
    pub height_ft: Decimal,
    pub base_price: Decimal,
    pub requirements: Vec<ComponentRequirement>,
}
