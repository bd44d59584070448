use chrono::Utc;
use serde::Serialize;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::domain::pricing_config::PricingConfig;
use crate::domain::quote::{BomLine, Quote};
use crate::domain::version::{
    BomLineSnapshot, HeightTierSnapshot, PricingConfigSnapshot, QuoteVersion, QuoteVersionId,
};

/// Cuts an immutable version record from a quote's computed state. Takes
/// `version_number` from `quote.current_version` (the orchestrator sets that
/// first) and copies the breakdown, BOM rows, and pricing-config parameters
/// by value: later edits to the live config or catalog never reach a stored
/// version. The content hash covers the canonical JSON of the frozen payload.
pub fn snapshot_version(
    quote: &Quote,
    bom_lines: &[BomLine],
    config: &PricingConfig,
    change_summary: Option<String>,
) -> QuoteVersion {
    let bom_snapshot: Vec<BomLineSnapshot> = bom_lines
        .iter()
        .map(|line| BomLineSnapshot {
            category: line.category.clone(),
            description: line.description.clone(),
            sku: line.sku.clone(),
            quantity: line.quantity,
            unit_of_measure: line.unit_of_measure.clone(),
            unit_price: line.unit_price,
            total_price: line.total_price,
            sort_order: line.sort_order,
        })
        .collect();

    let pricing_snapshot = PricingConfigSnapshot {
        name: config.name.clone(),
        labor_rate_per_hour: config.labor_rate_per_hour,
        hours_per_linear_meter: config.hours_per_linear_meter,
        contingency_pct: config.contingency_pct,
        profit_margin_pct: config.profit_margin_pct,
        height_tiers: config
            .height_tiers
            .iter()
            .map(|tier| HeightTierSnapshot {
                min_height_m: tier.min_height_m,
                max_height_m: tier.max_height_m,
                multiplier: tier.multiplier,
                description: tier.description.clone(),
            })
            .collect(),
    };

    let content_hash = snapshot_hash(&SnapshotPayload {
        quote_id: quote.id.0,
        version_number: quote.current_version,
        materials_cost: quote.materials_cost,
        labor_cost: quote.labor_cost,
        subtotal: quote.subtotal,
        contingency_amount: quote.contingency_amount,
        profit_amount: quote.profit_amount,
        tax_amount: quote.tax_amount,
        discount_amount: quote.discount_amount,
        total_amount: quote.total_amount,
        grand_total: quote.grand_total,
        bom_snapshot: &bom_snapshot,
        pricing_snapshot: &pricing_snapshot,
    });

    QuoteVersion {
        id: QuoteVersionId(Uuid::new_v4()),
        quote_id: quote.id,
        version_number: quote.current_version,
        change_summary,
        materials_cost: quote.materials_cost,
        labor_cost: quote.labor_cost,
        subtotal: quote.subtotal,
        contingency_amount: quote.contingency_amount,
        profit_amount: quote.profit_amount,
        tax_amount: quote.tax_amount,
        discount_amount: quote.discount_amount,
        total_amount: quote.total_amount,
        grand_total: quote.grand_total,
        bom_snapshot,
        pricing_snapshot,
        content_hash,
        created_at: Utc::now(),
    }
}

#[derive(Serialize)]
struct SnapshotPayload<'a> {
    quote_id: Uuid,
    version_number: u32,
    materials_cost: rust_decimal::Decimal,
    labor_cost: rust_decimal::Decimal,
    subtotal: rust_decimal::Decimal,
    contingency_amount: rust_decimal::Decimal,
    profit_amount: rust_decimal::Decimal,
    tax_amount: rust_decimal::Decimal,
    discount_amount: rust_decimal::Decimal,
    total_amount: rust_decimal::Decimal,
    grand_total: rust_decimal::Decimal,
    bom_snapshot: &'a [BomLineSnapshot],
    pricing_snapshot: &'a PricingConfigSnapshot,
}

fn snapshot_hash(payload: &SnapshotPayload<'_>) -> String {
    let canonical = match serde_json::to_vec(payload) {
        Ok(bytes) => bytes,
        Err(_) => payload.quote_id.as_bytes().to_vec(),
    };
    let digest = Sha256::digest(&canonical);
    encode_hex(digest.as_slice())
}

fn encode_hex(bytes: &[u8]) -> String {
    let mut output = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        output.push_str(&format!("{byte:02x}"));
    }
    output
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use crate::domain::job::JobId;
    use crate::domain::pricing_config::{HeightTier, PricingConfig, PricingConfigId};
    use crate::domain::quote::{BomLine, Quote, QuoteId, QuoteStatus};
    use crate::domain::OrgId;

    use super::snapshot_version;

    fn config() -> PricingConfig {
        PricingConfig {
            id: PricingConfigId(Uuid::new_v4()),
            organization_id: OrgId(Uuid::new_v4()),
            name: "Residential standard".to_string(),
            labor_rate_per_hour: Decimal::from(50),
            hours_per_linear_meter: Decimal::new(5, 1),
            contingency_pct: Decimal::new(10, 2),
            profit_margin_pct: Decimal::new(20, 2),
            is_default: true,
            height_tiers: vec![HeightTier {
                min_height_m: Decimal::ZERO,
                max_height_m: Some(Decimal::new(18, 1)),
                multiplier: Decimal::ONE,
                description: "Standard height".to_string(),
            }],
        }
    }

    fn quote(version: u32) -> Quote {
        Quote {
            id: QuoteId(Uuid::new_v4()),
            job_id: JobId(Uuid::new_v4()),
            organization_id: OrgId(Uuid::new_v4()),
            pricing_config_id: None,
            quote_number: "Q-20260805-0007".to_string(),
            current_version: version,
            status: QuoteStatus::Draft,
            materials_cost: Decimal::new(1_612_50, 2),
            labor_cost: Decimal::new(762_00, 2),
            subtotal: Decimal::new(2_374_50, 2),
            contingency_amount: Decimal::new(237_45, 2),
            profit_amount: Decimal::new(522_39, 2),
            tax_amount: Decimal::ZERO,
            discount_amount: Decimal::ZERO,
            total_amount: Decimal::new(3_134_34, 2),
            grand_total: Decimal::new(3_134_34, 2),
            bom_lines: Vec::new(),
            versions: Vec::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn bom_line() -> BomLine {
        BomLine {
            category: "Framing".to_string(),
            description: "Line post".to_string(),
            component_id: None,
            sku: Some("SKU-LINE-POST".to_string()),
            quantity: Decimal::new(12_5, 1),
            unit_of_measure: "each".to_string(),
            unit_price: Decimal::from(45),
            total_price: Decimal::new(562_50, 2),
            sort_order: 0,
        }
    }

    #[test]
    fn version_number_comes_from_the_quote() {
        let version = snapshot_version(&quote(3), &[bom_line()], &config(), None);
        assert_eq!(version.version_number, 3);
    }

    #[test]
    fn snapshot_copies_breakdown_and_bom_by_value() {
        let quote = quote(1);
        let version = snapshot_version(
            &quote,
            &[bom_line()],
            &config(),
            Some("Initial generation".to_string()),
        );

        assert_eq!(version.quote_id, quote.id);
        assert_eq!(version.total_amount, quote.total_amount);
        assert_eq!(version.bom_snapshot.len(), 1);
        assert_eq!(version.bom_snapshot[0].description, "Line post");
        assert_eq!(version.change_summary.as_deref(), Some("Initial generation"));
        assert!(!version.content_hash.is_empty());
    }

    #[test]
    fn later_config_edits_do_not_reach_a_stored_snapshot() {
        let quote = quote(1);
        let mut live_config = config();
        let version = snapshot_version(&quote, &[bom_line()], &live_config, None);

        live_config.labor_rate_per_hour = Decimal::from(95);
        live_config.height_tiers.clear();

        assert_eq!(version.pricing_snapshot.labor_rate_per_hour, Decimal::from(50));
        assert_eq!(version.pricing_snapshot.height_tiers.len(), 1);
    }

    #[test]
    fn identical_state_hashes_identically_and_edits_change_the_hash() {
        let quote = quote(1);
        let config = config();
        let lines = [bom_line()];

        let first = snapshot_version(&quote, &lines, &config, None);
        let second = snapshot_version(&quote, &lines, &config, None);
        assert_eq!(first.content_hash, second.content_hash);

        let mut cheaper = quote.clone();
        cheaper.total_amount = Decimal::new(3_000_00, 2);
        let third = snapshot_version(&cheaper, &lines, &config, None);
        assert_ne!(first.content_hash, third.content_hash);
    }
}
