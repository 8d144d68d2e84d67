use super::inputs::EconomicInputs;
use super::{BLOCKS_PER_DAY, BYTES_PER_MB};

/// Constant-elasticity demand in vB/day at `feerate` (sat/vB).
///
/// `feerate` must be > 0; the power law is undefined elsewhere.
pub fn demand_vb_per_day(feerate: f64, inputs: &EconomicInputs) -> f64 {
    debug_assert!(feerate > 0.0, "feerate must be positive");
    let base = inputs.baseline_demand_vb_day / inputs.batching_factor;
    base * (feerate / inputs.baseline_feerate).powf(inputs.elasticity)
}

/// Block-space capacity in vB/day.
pub fn supply_vb_per_day(inputs: &EconomicInputs) -> f64 {
    inputs.block_limit_mb * BYTES_PER_MB * BLOCKS_PER_DAY
}

/// Bytes actually confirmed per day; excess demand becomes backlog.
pub fn confirmed_vb_per_day(feerate: f64, inputs: &EconomicInputs) -> f64 {
    demand_vb_per_day(feerate, inputs).min(supply_vb_per_day(inputs))
}
