//! Regression guards for the model arithmetic.
//!
//! Each check recomputes a figure a second way and compares it with what
//! `compute_full_model` reported. Divergence is logged and flagged on the
//! output; the output itself is left untouched.

use log::warn;
use serde::Serialize;

use super::inputs::EconomicInputs;
use super::outputs::EconomicOutputs;
use super::{BLOCKS_PER_DAY, SATS_PER_BTC};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencyViolation {
    pub check: &'static str,
    pub expected: f64,
    pub actual: f64,
    pub tolerance: f64,
}

struct Check {
    name: &'static str,
    expected: f64,
    actual: f64,
    tolerance: f64,
}

pub fn check_consistency(
    outputs: &EconomicOutputs,
    inputs: &EconomicInputs,
) -> Vec<ConsistencyViolation> {
    let price = inputs.btc_price;
    let feerate = outputs.optimal_feerate;
    let uplift = 1.0 + inputs.mev_uplift;

    let checks = [
        Check {
            name: "block_fees_usd_times_144",
            expected: outputs.daily_fee_revenue_usd,
            actual: outputs.fees_per_block_usd * BLOCKS_PER_DAY,
            tolerance: 1.0,
        },
        Check {
            name: "block_fees_btc_times_price",
            expected: outputs.fees_per_block_usd,
            actual: outputs.fees_per_block_btc * price,
            tolerance: 0.01,
        },
        Check {
            name: "daily_fees_btc_times_price",
            expected: outputs.daily_fee_revenue_usd,
            actual: outputs.daily_fee_revenue_btc * price,
            tolerance: 1.0,
        },
        Check {
            name: "daily_fees_from_feerate",
            expected: outputs.daily_fee_revenue_usd,
            actual: feerate * outputs.confirmed_vb_day / SATS_PER_BTC * price,
            tolerance: 1.0,
        },
        Check {
            name: "avg_tx_fee_from_daily_fees",
            expected: outputs.avg_fee_per_tx_usd,
            actual: outputs.daily_fee_revenue_usd * inputs.avg_tx_vb / outputs.confirmed_vb_day,
            tolerance: 0.01,
        },
        Check {
            name: "network_revenue_composition",
            expected: outputs.network_revenue_usd,
            actual: outputs.daily_fee_revenue_usd * uplift + outputs.reward_revenue_usd,
            tolerance: 1.0,
        },
        Check {
            name: "solver_total_revenue",
            expected: outputs.solver_info.total_revenue_usd,
            actual: outputs.network_revenue_usd - outputs.reward_revenue_usd,
            tolerance: 1.0,
        },
        Check {
            name: "equilibrium_hashrate_cost_cover",
            expected: outputs.network_revenue_usd,
            actual: outputs.equilibrium_hashrate_th
                * inputs.cost_per_th_day
                * (1.0 + inputs.margin),
            tolerance: 1.0,
        },
        Check {
            name: "pool_profit_identity",
            expected: outputs.pool_daily_profit_usd,
            actual: outputs.pool_daily_revenue_usd - outputs.pool_daily_expenses_usd,
            tolerance: 0.01,
        },
    ];

    // written so that NaN fails the comparison
    checks
        .into_iter()
        .filter(|c| !((c.expected - c.actual).abs() <= c.tolerance))
        .map(|c| {
            warn!(
                "consistency check {} diverged: expected={} actual={} diff={} tolerance={}",
                c.name,
                c.expected,
                c.actual,
                (c.expected - c.actual).abs(),
                c.tolerance
            );
            ConsistencyViolation {
                check: c.name,
                expected: c.expected,
                actual: c.actual,
                tolerance: c.tolerance,
            }
        })
        .collect()
}
