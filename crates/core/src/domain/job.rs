use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::catalog::{FenceType, GateType};
use crate::domain::OrgId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub Uuid);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// One row of a job. Fence and gate rows carry their hydrated product type;
/// a `None` type is a dangling reference and contributes no materials.
/// The per-row unit price is a job-level snapshot used for job totals only,
/// independent of BOM pricing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum LineItem {
    Fence { fence_type: Option<FenceType>, linear_feet: Decimal, unit_price: Decimal },
    Gate { gate_type: Option<GateType>, count: u32, unit_price: Decimal },
    Labor { description: String, quantity: Decimal, unit_price: Decimal },
    Other { description: String, quantity: Decimal, unit_price: Decimal },
}

impl LineItem {
    pub fn line_total(&self) -> Decimal {
        match self {
            Self::Fence { linear_feet, unit_price, .. } => *linear_feet * *unit_price,
            Self::Gate { count, unit_price, .. } => Decimal::from(*count) * *unit_price,
            Self::Labor { quantity, unit_price, .. }
            | Self::Other { quantity, unit_price, .. } => *quantity * *unit_price,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub organization_id: OrgId,
    pub customer: Customer,
    /// Authoritative footage for labor, independent of the product mix in
    /// the line items.
    pub total_linear_feet: Decimal,
    pub line_items: Vec<LineItem>,
    pub created_at: DateTime<Utc>,
}

impl Job {
    pub fn line_items_total(&self) -> Decimal {
        self.line_items.iter().map(LineItem::line_total).sum()
    }
}
