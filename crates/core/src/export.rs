use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::domain::job::Job;
use crate::domain::quote::{Quote, QuoteStatus};

/// Flattened projection consumed by the document renderers (HTML, delimited
/// text). Money fields are rounded here and only here: round-half-even to
/// two decimal places at the presentation edge, full precision upstream.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuoteExportData {
    pub organization_name: String,
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_address: Option<String>,
    pub quote_number: String,
    pub status: QuoteStatus,
    pub current_version: u32,
    pub materials_cost: Decimal,
    pub labor_cost: Decimal,
    pub subtotal: Decimal,
    pub contingency_amount: Decimal,
    pub profit_amount: Decimal,
    pub tax_amount: Decimal,
    pub discount_amount: Decimal,
    pub total_amount: Decimal,
    pub grand_total: Decimal,
    pub lines: Vec<ExportLine>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportLine {
    pub category: String,
    pub description: String,
    pub sku: Option<String>,
    pub quantity: Decimal,
    pub unit_of_measure: String,
    pub unit_price: Decimal,
    pub total_price: Decimal,
    pub sort_order: u32,
}

impl QuoteExportData {
    pub fn project(quote: &Quote, job: &Job, organization_name: &str) -> Self {
        Self {
            organization_name: organization_name.to_string(),
            customer_name: job.customer.name.clone(),
            customer_email: job.customer.email.clone(),
            customer_phone: job.customer.phone.clone(),
            customer_address: job.customer.address.clone(),
            quote_number: quote.quote_number.clone(),
            status: quote.status.clone(),
            current_version: quote.current_version,
            materials_cost: money(quote.materials_cost),
            labor_cost: money(quote.labor_cost),
            subtotal: money(quote.subtotal),
            contingency_amount: money(quote.contingency_amount),
            profit_amount: money(quote.profit_amount),
            tax_amount: money(quote.tax_amount),
            discount_amount: money(quote.discount_amount),
            total_amount: money(quote.total_amount),
            grand_total: money(quote.grand_total),
            lines: quote
                .bom_lines
                .iter()
                .map(|line| ExportLine {
                    category: line.category.clone(),
                    description: line.description.clone(),
                    sku: line.sku.clone(),
                    quantity: line.quantity,
                    unit_of_measure: line.unit_of_measure.clone(),
                    unit_price: money(line.unit_price),
                    total_price: money(line.total_price),
                    sort_order: line.sort_order,
                })
                .collect(),
            created_at: quote.created_at,
            updated_at: quote.updated_at,
        }
    }
}

fn money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
}
