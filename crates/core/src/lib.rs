pub mod audit;
pub mod bom;
pub mod config;
pub mod domain;
pub mod engine;
pub mod errors;
pub mod export;
pub mod numbering;
pub mod pricing;
pub mod units;
pub mod versioning;

pub use audit::{AuditCategory, AuditContext, AuditEvent, AuditOutcome, AuditSink, InMemoryAuditSink};
pub use bom::{aggregate_bom, materials_total};
pub use config::{load_catalog_file, CatalogSeed, ConfigError};
pub use domain::catalog::{ComponentRequirement, FenceType, FenceTypeId, GateType, GateTypeId};
pub use domain::component::{Component, ComponentId, LABOR_CATEGORY};
pub use domain::job::{Customer, Job, JobId, LineItem};
pub use domain::pricing_config::{HeightTier, PricingConfig, PricingConfigId};
pub use domain::quote::{BomLine, Quote, QuoteId, QuoteStatus};
pub use domain::version::{
    BomLineSnapshot, HeightTierSnapshot, PricingConfigSnapshot, QuoteVersion, QuoteVersionId,
};
pub use domain::OrgId;
pub use engine::{
    GenerateQuoteRequest, JobStore, PricingConfigStore, QuoteEngine, QuoteStore,
    RecalculateQuoteRequest,
};
pub use errors::{DomainError, EngineError, InterfaceError, StoreError};
pub use export::{ExportLine, QuoteExportData};
pub use numbering::{date_prefix, next_quote_number};
pub use pricing::{compute_breakdown, labor_cost, labor_hours, resolve_height_multiplier, CostBreakdown};
pub use units::feet_to_meters;
pub use versioning::snapshot_version;
