use rust_decimal::Decimal;

use crate::domain::pricing_config::HeightTier;
use crate::units::feet_to_meters;

/// Resolves the multiplier for a fence height against a config's height
/// bands. Tier bounds are inclusive on both ends; an absent max is
/// unbounded. When bands overlap, the smallest-min tier wins, first in list
/// order among equals. No match (or no tiers at all) means no surcharge:
/// height-tier pricing is optional configuration, never a failure.
pub fn resolve_height_multiplier(tiers: &[HeightTier], height_ft: Decimal) -> Decimal {
    let height_m = feet_to_meters(height_ft);

    let mut selected: Option<&HeightTier> = None;
    for tier in tiers {
        let above_min = height_m >= tier.min_height_m;
        let below_max = tier.max_height_m.map_or(true, |max| height_m <= max);
        if !(above_min && below_max) {
            continue;
        }
        if selected.map_or(true, |current| tier.min_height_m < current.min_height_m) {
            selected = Some(tier);
        }
    }

    selected.map_or(Decimal::ONE, |tier| tier.multiplier)
}
