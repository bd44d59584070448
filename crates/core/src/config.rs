use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::catalog::{
    ComponentRequirement, FenceType, FenceTypeId, GateType, GateTypeId,
};
use crate::domain::component::{Component, ComponentId, LABOR_CATEGORY};
use crate::domain::pricing_config::{HeightTier, PricingConfig, PricingConfigId};
use crate::domain::OrgId;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read catalog file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse catalog file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("duplicate component key `{0}`")]
    DuplicateComponentKey(String),
    #[error("component `{0}` uses the reserved category `Labor`")]
    ReservedCategory(String),
    #[error("`{referenced_by}` requires unknown component `{reference}`")]
    UnknownComponent { reference: String, referenced_by: String },
    #[error("negative amount for `{field}` on `{entry}`")]
    NegativeAmount { field: &'static str, entry: String },
    #[error("height tier `{0}` has max below min")]
    InvalidTierBounds(String),
    #[error("more than one pricing configuration is marked default")]
    MultipleDefaultConfigs,
}

/// Tenant catalog parsed from TOML and hydrated into the domain graph:
/// components, fence/gate types with their requirements resolved by value,
/// and pricing configurations. This is how seed data and onboarding files
/// enter the system; per-request loading is the storage collaborator's job.
#[derive(Clone, Debug)]
pub struct CatalogSeed {
    pub organization_id: OrgId,
    pub components: Vec<Component>,
    pub fence_types: Vec<FenceType>,
    pub gate_types: Vec<GateType>,
    pub pricing_configs: Vec<PricingConfig>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    components: Vec<ComponentEntry>,
    #[serde(default)]
    fence_types: Vec<FenceTypeEntry>,
    #[serde(default)]
    gate_types: Vec<GateTypeEntry>,
    #[serde(default)]
    pricing_configs: Vec<PricingConfigEntry>,
}

#[derive(Debug, Deserialize)]
struct ComponentEntry {
    key: String,
    name: String,
    category: String,
    unit_of_measure: String,
    unit_price: Decimal,
    #[serde(default)]
    sku: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RequirementEntry {
    component: String,
    quantity_per_unit: Decimal,
}

#[derive(Debug, Deserialize)]
struct FenceTypeEntry {
    name: String,
    height_ft: Decimal,
    base_price: Decimal,
    #[serde(default)]
    requirements: Vec<RequirementEntry>,
}

#[derive(Debug, Deserialize)]
struct GateTypeEntry {
    name: String,
    width_ft: Decimal,
    height_ft: Decimal,
    base_price: Decimal,
    #[serde(default)]
    requirements: Vec<RequirementEntry>,
}

#[derive(Debug, Deserialize)]
struct HeightTierEntry {
    min_height_m: Decimal,
    #[serde(default)]
    max_height_m: Option<Decimal>,
    multiplier: Decimal,
    description: String,
}

#[derive(Debug, Deserialize)]
struct PricingConfigEntry {
    name: String,
    labor_rate_per_hour: Decimal,
    hours_per_linear_meter: Decimal,
    contingency_pct: Decimal,
    profit_margin_pct: Decimal,
    #[serde(default)]
    default: bool,
    #[serde(default)]
    height_tiers: Vec<HeightTierEntry>,
}

pub fn load_catalog_file(
    path: &Path,
    organization_id: OrgId,
) -> Result<CatalogSeed, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;
    let file: CatalogFile = toml::from_str(&raw)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })?;
    hydrate(file, organization_id)
}

fn hydrate(file: CatalogFile, organization_id: OrgId) -> Result<CatalogSeed, ConfigError> {
    let mut components_by_key: HashMap<String, Component> = HashMap::new();
    let mut components = Vec::with_capacity(file.components.len());

    for entry in file.components {
        if entry.category == LABOR_CATEGORY {
            return Err(ConfigError::ReservedCategory(entry.key));
        }
        if entry.unit_price < Decimal::ZERO {
            return Err(ConfigError::NegativeAmount { field: "unit_price", entry: entry.key });
        }
        let component = Component {
            id: ComponentId(Uuid::new_v4()),
            organization_id,
            name: entry.name,
            category: entry.category,
            unit_of_measure: entry.unit_of_measure,
            unit_price: entry.unit_price,
            sku: entry.sku,
        };
        if components_by_key.insert(entry.key.clone(), component.clone()).is_some() {
            return Err(ConfigError::DuplicateComponentKey(entry.key));
        }
        components.push(component);
    }

    let mut fence_types = Vec::with_capacity(file.fence_types.len());
    for entry in file.fence_types {
        let requirements = resolve_requirements(&components_by_key, &entry.name, entry.requirements)?;
        fence_types.push(FenceType {
            id: FenceTypeId(Uuid::new_v4()),
            name: entry.name,
            height_ft: entry.height_ft,
            base_price: entry.base_price,
            requirements,
        });
    }

    let mut gate_types = Vec::with_capacity(file.gate_types.len());
    for entry in file.gate_types {
        let requirements = resolve_requirements(&components_by_key, &entry.name, entry.requirements)?;
        gate_types.push(GateType {
            id: GateTypeId(Uuid::new_v4()),
            name: entry.name,
            width_ft: entry.width_ft,
            height_ft: entry.height_ft,
            base_price: entry.base_price,
            requirements,
        });
    }

    let mut pricing_configs = Vec::with_capacity(file.pricing_configs.len());
    for entry in file.pricing_configs {
        for (field, value) in [
            ("labor_rate_per_hour", entry.labor_rate_per_hour),
            ("hours_per_linear_meter", entry.hours_per_linear_meter),
            ("contingency_pct", entry.contingency_pct),
            ("profit_margin_pct", entry.profit_margin_pct),
        ] {
            if value < Decimal::ZERO {
                return Err(ConfigError::NegativeAmount { field, entry: entry.name });
            }
        }
        let mut height_tiers = Vec::with_capacity(entry.height_tiers.len());
        for tier in entry.height_tiers {
            if tier.max_height_m.is_some_and(|max| max < tier.min_height_m) {
                return Err(ConfigError::InvalidTierBounds(tier.description));
            }
            height_tiers.push(HeightTier {
                min_height_m: tier.min_height_m,
                max_height_m: tier.max_height_m,
                multiplier: tier.multiplier,
                description: tier.description,
            });
        }
        pricing_configs.push(PricingConfig {
            id: PricingConfigId(Uuid::new_v4()),
            organization_id,
            name: entry.name,
            labor_rate_per_hour: entry.labor_rate_per_hour,
            hours_per_linear_meter: entry.hours_per_linear_meter,
            contingency_pct: entry.contingency_pct,
            profit_margin_pct: entry.profit_margin_pct,
            is_default: entry.default,
            height_tiers,
        });
    }

    if pricing_configs.iter().filter(|config| config.is_default).count() > 1 {
        return Err(ConfigError::MultipleDefaultConfigs);
    }

    Ok(CatalogSeed { organization_id, components, fence_types, gate_types, pricing_configs })
}

fn resolve_requirements(
    components_by_key: &HashMap<String, Component>,
    owner: &str,
    entries: Vec<RequirementEntry>,
) -> Result<Vec<ComponentRequirement>, ConfigError> {
    entries
        .into_iter()
        .map(|entry| {
            let component = components_by_key.get(&entry.component).cloned().ok_or_else(|| {
                ConfigError::UnknownComponent {
                    reference: entry.component.clone(),
                    referenced_by: owner.to_string(),
                }
            })?;
            Ok(ComponentRequirement { component, quantity_per_unit: entry.quantity_per_unit })
        })
        .collect()
}
