pub mod costs;
pub mod tiers;

pub use costs::{compute_breakdown, labor_cost, labor_hours, CostBreakdown};
pub use tiers::resolve_height_multiplier;
