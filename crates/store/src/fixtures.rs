use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use fencequote_core::domain::catalog::{
    ComponentRequirement, FenceType, FenceTypeId, GateType, GateTypeId,
};
use fencequote_core::domain::component::{Component, ComponentId};
use fencequote_core::domain::job::{Customer, Job, JobId, LineItem};
use fencequote_core::domain::pricing_config::{HeightTier, PricingConfig, PricingConfigId};
use fencequote_core::domain::quote::{Quote, QuoteId, QuoteStatus};
use fencequote_core::domain::OrgId;

/// Deterministic tenant catalog for engine tests: a privacy fence consuming
/// posts and rails, a walk gate consuming posts and hardware, and a default
/// pricing configuration with the standard three height bands.
pub struct SeedCatalog {
    pub organization_id: OrgId,
    pub post: Component,
    pub rail: Component,
    pub hinge: Component,
    pub latch: Component,
    pub privacy_fence: FenceType,
    pub walk_gate: GateType,
    pub residential_config: PricingConfig,
}

pub fn standard_catalog() -> SeedCatalog {
    let organization_id = OrgId(Uuid::new_v4());

    let post = component(organization_id, "Line post", "Framing", "each", Decimal::from(45), "FP-POST-6");
    let rail = component(
        organization_id,
        "Rail 2x4",
        "Framing",
        "each",
        Decimal::new(3_50, 2),
        "FP-RAIL-8",
    );
    let hinge = component(
        organization_id,
        "Gate hinge",
        "Hardware",
        "each",
        Decimal::new(12_75, 2),
        "HW-HINGE",
    );
    let latch = component(
        organization_id,
        "Gate latch",
        "Hardware",
        "each",
        Decimal::new(18_00, 2),
        "HW-LATCH",
    );

    let privacy_fence = FenceType {
        id: FenceTypeId(Uuid::new_v4()),
        name: "Privacy 6ft".to_string(),
        height_ft: Decimal::from(6),
        base_price: Decimal::new(28_50, 2),
        requirements: vec![
            ComponentRequirement { component: post.clone(), quantity_per_unit: Decimal::new(125, 3) },
            ComponentRequirement { component: rail.clone(), quantity_per_unit: Decimal::from(3) },
        ],
    };

    let walk_gate = GateType {
        id: GateTypeId(Uuid::new_v4()),
        name: "Walk gate".to_string(),
        width_ft: Decimal::from(4),
        height_ft: Decimal::from(6),
        base_price: Decimal::new(180_00, 2),
        requirements: vec![
            ComponentRequirement { component: post.clone(), quantity_per_unit: Decimal::from(2) },
            ComponentRequirement { component: hinge.clone(), quantity_per_unit: Decimal::from(2) },
            ComponentRequirement { component: latch.clone(), quantity_per_unit: Decimal::ONE },
        ],
    };

    let residential_config = PricingConfig {
        id: PricingConfigId(Uuid::new_v4()),
        organization_id,
        name: "Residential standard".to_string(),
        labor_rate_per_hour: Decimal::from(50),
        hours_per_linear_meter: Decimal::new(5, 1),
        contingency_pct: Decimal::new(10, 2),
        profit_margin_pct: Decimal::new(20, 2),
        is_default: true,
        height_tiers: vec![
            HeightTier {
                min_height_m: Decimal::ZERO,
                max_height_m: Some(Decimal::new(18, 1)),
                multiplier: Decimal::ONE,
                description: "Standard height".to_string(),
            },
            HeightTier {
                min_height_m: Decimal::new(18, 1),
                max_height_m: Some(Decimal::new(21, 1)),
                multiplier: Decimal::new(125, 2),
                description: "Tall".to_string(),
            },
            HeightTier {
                min_height_m: Decimal::new(21, 1),
                max_height_m: None,
                multiplier: Decimal::new(15, 1),
                description: "Extra tall".to_string(),
            },
        ],
    };

    SeedCatalog {
        organization_id,
        post,
        rail,
        hinge,
        latch,
        privacy_fence,
        walk_gate,
        residential_config,
    }
}

/// Job with a single fence run; `total_linear_feet` mirrors the fence line.
pub fn fence_job(catalog: &SeedCatalog, linear_feet: Decimal) -> Job {
    Job {
        id: JobId(Uuid::new_v4()),
        organization_id: catalog.organization_id,
        customer: sample_customer(),
        total_linear_feet: linear_feet,
        line_items: vec![LineItem::Fence {
            fence_type: Some(catalog.privacy_fence.clone()),
            linear_feet,
            unit_price: Decimal::new(28_50, 2),
        }],
        created_at: Utc::now(),
    }
}

pub fn fence_and_gate_job(catalog: &SeedCatalog, linear_feet: Decimal, gates: u32) -> Job {
    Job {
        id: JobId(Uuid::new_v4()),
        organization_id: catalog.organization_id,
        customer: sample_customer(),
        total_linear_feet: linear_feet,
        line_items: vec![
            LineItem::Fence {
                fence_type: Some(catalog.privacy_fence.clone()),
                linear_feet,
                unit_price: Decimal::new(28_50, 2),
            },
            LineItem::Gate {
                gate_type: Some(catalog.walk_gate.clone()),
                count: gates,
                unit_price: Decimal::new(350_00, 2),
            },
        ],
        created_at: Utc::now(),
    }
}

/// Bare quote shell for store-level tests; the engine populates real ones.
pub fn draft_quote(job: &Job, quote_number: &str) -> Quote {
    Quote {
        id: QuoteId(Uuid::new_v4()),
        job_id: job.id,
        organization_id: job.organization_id,
        pricing_config_id: None,
        quote_number: quote_number.to_string(),
        current_version: 1,
        status: QuoteStatus::Draft,
        materials_cost: Decimal::ZERO,
        labor_cost: Decimal::ZERO,
        subtotal: Decimal::ZERO,
        contingency_amount: Decimal::ZERO,
        profit_amount: Decimal::ZERO,
        tax_amount: Decimal::ZERO,
        discount_amount: Decimal::ZERO,
        total_amount: Decimal::ZERO,
        grand_total: Decimal::ZERO,
        bom_lines: Vec::new(),
        versions: Vec::new(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn sample_customer() -> Customer {
    Customer {
        name: "J. Paulsen".to_string(),
        email: Some("j.paulsen@example.com".to_string()),
        phone: Some("555-0199".to_string()),
        address: Some("420 Meadow Run".to_string()),
    }
}

fn component(
    organization_id: OrgId,
    name: &str,
    category: &str,
    unit_of_measure: &str,
    unit_price: Decimal,
    sku: &str,
) -> Component {
    Component {
        id: ComponentId(Uuid::new_v4()),
        organization_id,
        name: name.to_string(),
        category: category.to_string(),
        unit_of_measure: unit_of_measure.to_string(),
        unit_price,
        sku: Some(sku.to_string()),
    }
}
