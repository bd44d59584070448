use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::component::ComponentId;
use crate::domain::job::JobId;
use crate::domain::pricing_config::PricingConfigId;
use crate::domain::version::QuoteVersion;
use crate::domain::OrgId;
use crate::errors::DomainError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuoteId(pub Uuid);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuoteStatus {
    Draft,
    Pending,
    Sent,
    Accepted,
    Rejected,
    Expired,
    Revised,
}

/// One consolidated, denormalized output row of the bill of materials.
/// Rows are created fresh on every generate/recalculate and never mutated;
/// superseded rows are discarded (version snapshots keep history).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BomLine {
    pub category: String,
    pub description: String,
    pub component_id: Option<ComponentId>,
    pub sku: Option<String>,
    pub quantity: Decimal,
    pub unit_of_measure: String,
    pub unit_price: Decimal,
    pub total_price: Decimal,
    pub sort_order: u32,
}

/// Aggregate root: the mutable current state of a quote, owning its current
/// BOM and the append-only version log. `quote_number` is immutable once
/// assigned; `discount_amount` is carried but not wired into the totals.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub id: QuoteId,
    pub job_id: JobId,
    pub organization_id: OrgId,
    pub pricing_config_id: Option<PricingConfigId>,
    pub quote_number: String,
    pub current_version: u32,
    pub status: QuoteStatus,
    pub materials_cost: Decimal,
    pub labor_cost: Decimal,
    pub subtotal: Decimal,
    pub contingency_amount: Decimal,
    pub profit_amount: Decimal,
    pub tax_amount: Decimal,
    pub discount_amount: Decimal,
    pub total_amount: Decimal,
    pub grand_total: Decimal,
    pub bom_lines: Vec<BomLine>,
    pub versions: Vec<QuoteVersion>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Quote {
    pub fn can_transition_to(&self, next: QuoteStatus) -> bool {
        matches!(
            (&self.status, next),
            (QuoteStatus::Draft, QuoteStatus::Pending)
                | (QuoteStatus::Draft, QuoteStatus::Sent)
                | (QuoteStatus::Pending, QuoteStatus::Sent)
                | (QuoteStatus::Pending, QuoteStatus::Expired)
                | (QuoteStatus::Sent, QuoteStatus::Accepted)
                | (QuoteStatus::Sent, QuoteStatus::Rejected)
                | (QuoteStatus::Sent, QuoteStatus::Expired)
                | (QuoteStatus::Revised, QuoteStatus::Pending)
                | (QuoteStatus::Revised, QuoteStatus::Sent)
                | (_, QuoteStatus::Revised)
        )
    }

    pub fn transition_to(&mut self, next: QuoteStatus) -> Result<(), DomainError> {
        if self.can_transition_to(next.clone()) {
            self.status = next;
            return Ok(());
        }

        Err(DomainError::InvalidQuoteTransition { from: self.status.clone(), to: next })
    }
}
