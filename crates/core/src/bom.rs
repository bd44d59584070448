use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::debug;

use crate::domain::component::{Component, ComponentId, LABOR_CATEGORY};
use crate::domain::job::{Job, LineItem};
use crate::domain::pricing_config::PricingConfig;
use crate::domain::quote::BomLine;
use crate::pricing::costs::{labor_cost, labor_hours};
use crate::pricing::tiers::resolve_height_multiplier;

/// Expands a job's fence/gate line items into one consolidated, priced row
/// per distinct component, ordered by category then component name, followed
/// by a synthetic labor row when labor cost is nonzero. Line items whose
/// product type reference is dangling are skipped silently. Unit prices are
/// read from the catalog as it stands now; history lives in version
/// snapshots, not here.
pub fn aggregate_bom(job: &Job, config: &PricingConfig) -> Vec<BomLine> {
    let mut totals: HashMap<ComponentId, (Component, Decimal)> = HashMap::new();

    for item in &job.line_items {
        match item {
            LineItem::Fence { fence_type: Some(fence), linear_feet, .. } => {
                // Resolved per fence type but not yet folded into component
                // unit pricing.
                let _height_multiplier =
                    resolve_height_multiplier(&config.height_tiers, fence.height_ft);
                for requirement in &fence.requirements {
                    accumulate(
                        &mut totals,
                        &requirement.component,
                        requirement.quantity_per_unit * *linear_feet,
                    );
                }
            }
            LineItem::Gate { gate_type: Some(gate), count, .. } => {
                for requirement in &gate.requirements {
                    accumulate(
                        &mut totals,
                        &requirement.component,
                        requirement.quantity_per_unit * Decimal::from(*count),
                    );
                }
            }
            // Dangling product references and labor/other rows contribute
            // no materials.
            LineItem::Fence { fence_type: None, .. }
            | LineItem::Gate { gate_type: None, .. }
            | LineItem::Labor { .. }
            | LineItem::Other { .. } => {}
        }
    }

    let mut consolidated: Vec<(Component, Decimal)> = totals.into_values().collect();
    consolidated.sort_by(|(a, _), (b, _)| {
        a.category
            .cmp(&b.category)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.id.0.cmp(&b.id.0))
    });

    let mut lines: Vec<BomLine> = consolidated
        .into_iter()
        .enumerate()
        .map(|(index, (component, quantity))| BomLine {
            category: component.category.clone(),
            description: component.name.clone(),
            component_id: Some(component.id),
            sku: component.sku.clone(),
            quantity,
            unit_of_measure: component.unit_of_measure.clone(),
            unit_price: component.unit_price,
            total_price: quantity * component.unit_price,
            sort_order: index as u32,
        })
        .collect();

    // Labor is derived from the job's footage field, independent of the
    // product mix above.
    let labor = labor_cost(job.total_linear_feet, config);
    if !labor.is_zero() {
        lines.push(BomLine {
            category: LABOR_CATEGORY.to_string(),
            description: "Installation labor".to_string(),
            component_id: None,
            sku: None,
            quantity: labor_hours(job.total_linear_feet, config),
            unit_of_measure: "hours".to_string(),
            unit_price: config.labor_rate_per_hour,
            total_price: labor,
            sort_order: lines.len() as u32,
        });
    }

    debug!(lines = lines.len(), job = %job.id.0, "aggregated bill of materials");
    lines
}

/// Sum of the component rows, excluding the synthetic labor row.
pub fn materials_total(lines: &[BomLine]) -> Decimal {
    lines
        .iter()
        .filter(|line| line.category != LABOR_CATEGORY)
        .map(|line| line.total_price)
        .sum()
}

fn accumulate(
    totals: &mut HashMap<ComponentId, (Component, Decimal)>,
    component: &Component,
    quantity: Decimal,
) {
    totals
        .entry(component.id)
        .and_modify(|(_, total)| *total += quantity)
        .or_insert_with(|| (component.clone(), quantity));
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use crate::domain::catalog::{
        ComponentRequirement, FenceType, FenceTypeId, GateType, GateTypeId,
    };
    use crate::domain::component::{Component, ComponentId, LABOR_CATEGORY};
    use crate::domain::job::{Customer, Job, JobId, LineItem};
    use crate::domain::pricing_config::{PricingConfig, PricingConfigId};
    use crate::domain::OrgId;

    use super::{aggregate_bom, materials_total};

    fn org() -> OrgId {
        OrgId(Uuid::new_v4())
    }

    fn component(org: OrgId, name: &str, category: &str, unit_price: Decimal) -> Component {
        Component {
            id: ComponentId(Uuid::new_v4()),
            organization_id: org,
            name: name.to_string(),
            category: category.to_string(),
            unit_of_measure: "each".to_string(),
            unit_price,
            sku: Some(format!("SKU-{}", name.to_ascii_uppercase().replace(' ', "-"))),
        }
    }

    fn fence_type(name: &str, height_ft: Decimal, requirements: Vec<ComponentRequirement>) -> FenceType {
        FenceType {
            id: FenceTypeId(Uuid::new_v4()),
            name: name.to_string(),
            height_ft,
            base_price: Decimal::new(28_50, 2),
            requirements,
        }
    }

    fn config(org: OrgId) -> PricingConfig {
        PricingConfig {
            id: PricingConfigId(Uuid::new_v4()),
            organization_id: org,
            name: "Residential standard".to_string(),
            labor_rate_per_hour: Decimal::from(50),
            hours_per_linear_meter: Decimal::new(5, 1),
            contingency_pct: Decimal::new(10, 2),
            profit_margin_pct: Decimal::new(20, 2),
            is_default: true,
            height_tiers: Vec::new(),
        }
    }

    fn job(org: OrgId, total_linear_feet: Decimal, line_items: Vec<LineItem>) -> Job {
        Job {
            id: JobId(Uuid::new_v4()),
            organization_id: org,
            customer: Customer {
                name: "D. Okafor".to_string(),
                email: Some("d.okafor@example.com".to_string()),
                phone: None,
                address: Some("88 Quarry Rd".to_string()),
            },
            total_linear_feet,
            line_items,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn consolidates_shared_components_across_line_items() {
        let org = org();
        let post = component(org, "Line post", "Framing", Decimal::from(45));
        let rail = component(org, "Rail 2x4", "Framing", Decimal::new(3_50, 2));
        let hinge = component(org, "Gate hinge", "Hardware", Decimal::new(12_75, 2));

        let fence = fence_type(
            "Privacy 6ft",
            Decimal::from(6),
            vec![
                ComponentRequirement {
                    component: post.clone(),
                    quantity_per_unit: Decimal::new(125, 3),
                },
                ComponentRequirement { component: rail.clone(), quantity_per_unit: Decimal::from(3) },
            ],
        );
        let gate = GateType {
            id: GateTypeId(Uuid::new_v4()),
            name: "Walk gate".to_string(),
            width_ft: Decimal::from(4),
            height_ft: Decimal::from(6),
            base_price: Decimal::new(180_00, 2),
            requirements: vec![
                ComponentRequirement { component: post.clone(), quantity_per_unit: Decimal::from(2) },
                ComponentRequirement { component: hinge.clone(), quantity_per_unit: Decimal::from(2) },
            ],
        };

        let job = job(
            org,
            Decimal::ZERO,
            vec![
                LineItem::Fence {
                    fence_type: Some(fence),
                    linear_feet: Decimal::from(100),
                    unit_price: Decimal::new(28_50, 2),
                },
                LineItem::Gate {
                    gate_type: Some(gate),
                    count: 2,
                    unit_price: Decimal::new(350_00, 2),
                },
            ],
        );

        let lines = aggregate_bom(&job, &config(org));

        // Three distinct components, one row each: posts appear once even
        // though both the fence and the gate consume them.
        assert_eq!(lines.len(), 3);

        let post_row = lines
            .iter()
            .find(|line| line.component_id == Some(post.id))
            .expect("post row present");
        assert_eq!(post_row.quantity, Decimal::new(16_5, 1)); // 100*0.125 + 2*2
        assert_eq!(post_row.total_price, Decimal::new(742_50, 2));

        let rail_row = lines
            .iter()
            .find(|line| line.component_id == Some(rail.id))
            .expect("rail row present");
        assert_eq!(rail_row.quantity, Decimal::from(300));
        assert_eq!(rail_row.total_price, Decimal::new(1_050_00, 2));

        assert_eq!(materials_total(&lines), Decimal::new(1_843_50, 2));
    }

    #[test]
    fn orders_by_category_then_name_with_dense_sort_order() {
        let org = org();
        let latch = component(org, "Latch", "Hardware", Decimal::from(18));
        let hinge = component(org, "Hinge", "Hardware", Decimal::new(12_75, 2));
        let concrete = component(org, "Concrete bag", "Concrete", Decimal::new(6_25, 2));

        let fence = fence_type(
            "Picket 4ft",
            Decimal::from(4),
            vec![
                ComponentRequirement { component: latch, quantity_per_unit: Decimal::ONE },
                ComponentRequirement { component: hinge, quantity_per_unit: Decimal::ONE },
                ComponentRequirement { component: concrete, quantity_per_unit: Decimal::ONE },
            ],
        );
        let job = job(
            org,
            Decimal::ZERO,
            vec![LineItem::Fence {
                fence_type: Some(fence),
                linear_feet: Decimal::from(10),
                unit_price: Decimal::new(18_00, 2),
            }],
        );

        let lines = aggregate_bom(&job, &config(org));

        let emitted: Vec<(&str, &str, u32)> = lines
            .iter()
            .map(|line| (line.category.as_str(), line.description.as_str(), line.sort_order))
            .collect();
        assert_eq!(
            emitted,
            vec![
                ("Concrete", "Concrete bag", 0),
                ("Hardware", "Hinge", 1),
                ("Hardware", "Latch", 2),
            ]
        );
    }

    #[test]
    fn dangling_type_references_are_skipped_silently() {
        let org = org();
        let job = job(
            org,
            Decimal::ZERO,
            vec![
                LineItem::Fence {
                    fence_type: None,
                    linear_feet: Decimal::from(40),
                    unit_price: Decimal::new(22_00, 2),
                },
                LineItem::Gate { gate_type: None, count: 1, unit_price: Decimal::new(275_00, 2) },
            ],
        );

        assert!(aggregate_bom(&job, &config(org)).is_empty());
    }

    #[test]
    fn empty_job_with_footage_still_yields_a_labor_row() {
        let org = org();
        let job = job(org, Decimal::from(100), Vec::new());

        let lines = aggregate_bom(&job, &config(org));

        assert_eq!(lines.len(), 1);
        let labor = &lines[0];
        assert_eq!(labor.category, LABOR_CATEGORY);
        assert_eq!(labor.component_id, None);
        assert_eq!(labor.quantity, Decimal::new(15_24, 2)); // 30.48 m * 0.5 h/m
        assert_eq!(labor.unit_of_measure, "hours");
        assert_eq!(labor.unit_price, Decimal::from(50));
        assert_eq!(labor.total_price, Decimal::new(762_00, 2));
        assert_eq!(labor.sort_order, 0);
        assert_eq!(materials_total(&lines), Decimal::ZERO);
    }

    #[test]
    fn labor_row_is_omitted_when_footage_is_zero() {
        let org = org();
        let job = job(org, Decimal::ZERO, Vec::new());

        assert!(aggregate_bom(&job, &config(org)).is_empty());
    }

    #[test]
    fn labor_row_continues_the_sort_order_sequence() {
        let org = org();
        let post = component(org, "Line post", "Framing", Decimal::from(45));
        let fence = fence_type(
            "Privacy 6ft",
            Decimal::from(6),
            vec![ComponentRequirement {
                component: post,
                quantity_per_unit: Decimal::new(125, 3),
            }],
        );
        let job = job(
            org,
            Decimal::from(80),
            vec![LineItem::Fence {
                fence_type: Some(fence),
                linear_feet: Decimal::from(80),
                unit_price: Decimal::new(28_50, 2),
            }],
        );

        let lines = aggregate_bom(&job, &config(org));

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].category, LABOR_CATEGORY);
        assert_eq!(lines[1].sort_order, 1);
    }

    #[test]
    fn aggregation_is_idempotent_for_an_unchanged_job() {
        let org = org();
        let post = component(org, "Line post", "Framing", Decimal::from(45));
        let rail = component(org, "Rail 2x4", "Framing", Decimal::new(3_50, 2));
        let fence = fence_type(
            "Privacy 6ft",
            Decimal::from(6),
            vec![
                ComponentRequirement { component: post, quantity_per_unit: Decimal::new(125, 3) },
                ComponentRequirement { component: rail, quantity_per_unit: Decimal::from(3) },
            ],
        );
        let job = job(
            org,
            Decimal::from(100),
            vec![LineItem::Fence {
                fence_type: Some(fence),
                linear_feet: Decimal::from(100),
                unit_price: Decimal::new(28_50, 2),
            }],
        );
        let config = config(org);

        assert_eq!(aggregate_bom(&job, &config), aggregate_bom(&job, &config));
    }
}
