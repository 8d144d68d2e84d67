use serde::Serialize;

use super::fees::fees_usd_per_day;
use super::inputs::EconomicInputs;
use super::{ATTACK_HASHRATE_SHARE, BLOCKS_PER_DAY, DAYS_PER_MONTH};

/// A derived figure whose denominator may vanish.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Metric {
    Defined(f64),
    Undefined,
}

impl Metric {
    pub fn value(&self) -> Option<f64> {
        match self {
            Metric::Defined(v) => Some(*v),
            Metric::Undefined => None,
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, Metric::Defined(_))
    }
}

/// Block subsidy revenue in USD/day; zero for the fee-only regime.
pub fn reward_usd_per_day(inputs: &EconomicInputs, include_block_rewards: bool) -> f64 {
    if include_block_rewards {
        inputs.block_reward_btc * BLOCKS_PER_DAY * inputs.btc_price
    } else {
        0.0
    }
}

/// Hashrate (TH/s) at which revenue covers cost plus the required margin.
pub fn equilibrium_hashrate_th(feerate: f64, inputs: &EconomicInputs, reward_usd_day: f64) -> f64 {
    let revenue = fees_usd_per_day(feerate, inputs) * (1.0 + inputs.mev_uplift) + reward_usd_day;
    revenue / (inputs.cost_per_th_day * (1.0 + inputs.margin))
}

/// Cost of renting a 51% share of `hashrate_th` for `hours`.
pub fn attack_cost_usd(hours: f64, hashrate_th: f64, rent_rate_usd_per_th_hour: f64) -> f64 {
    ATTACK_HASHRATE_SHARE * hashrate_th * rent_rate_usd_per_th_hour * hours
}

/// Attack cost relative to daily settlement value, in percent. Zero when no
/// settlement value is configured.
pub fn attack_cost_pct_of_settlement(attack_cost: f64, settlement_usd_day: Option<f64>) -> f64 {
    match settlement_usd_day {
        Some(settlement) if settlement > 0.0 => attack_cost / settlement * 100.0,
        _ => 0.0,
    }
}

/// Daily economics of a pool holding `poolShare` of the network hashrate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolEconomics {
    pub revenue_usd: f64,
    pub expenses_usd: f64,
    pub profit_usd: f64,
    pub margin: Metric,
    #[serde(rename = "breakEvenBTCPrice")]
    pub break_even_btc_price: Metric,
    pub roi_months: Metric,
}

impl PoolEconomics {
    pub fn compute(
        network_revenue_usd: f64,
        equilibrium_hashrate_th: f64,
        daily_fee_revenue_btc: f64,
        inputs: &EconomicInputs,
    ) -> Self {
        let pool_hashrate = equilibrium_hashrate_th * inputs.pool_share;
        let revenue_usd = network_revenue_usd * inputs.pool_share;
        let expenses_usd = pool_hashrate * inputs.cost_per_th_day;
        let profit_usd = revenue_usd - expenses_usd;

        let margin = if revenue_usd > 0.0 {
            Metric::Defined(profit_usd / revenue_usd)
        } else {
            Metric::Undefined
        };

        let pool_fee_btc = daily_fee_revenue_btc * inputs.pool_share;
        let break_even_btc_price = if daily_fee_revenue_btc > 0.0 && inputs.pool_share > 0.0 {
            Metric::Defined(expenses_usd / pool_fee_btc)
        } else {
            Metric::Undefined
        };

        let capex = pool_hashrate * inputs.hardware_cost_usd_per_th;
        let roi_months = if profit_usd > 0.0 {
            Metric::Defined(capex / (profit_usd * DAYS_PER_MONTH))
        } else {
            Metric::Undefined
        };

        Self {
            revenue_usd,
            expenses_usd,
            profit_usd,
            margin,
            break_even_btc_price,
            roi_months,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attack_cost_is_linear() {
        assert_eq!(attack_cost_usd(6.0, 1_000.0, 0.1), 0.51 * 1_000.0 * 0.1 * 6.0);
        assert_eq!(attack_cost_usd(0.0, 1_000.0, 0.1), 0.0);
    }

    #[test]
    fn attack_pct_without_settlement_is_zero() {
        assert_eq!(attack_cost_pct_of_settlement(500.0, None), 0.0);
        assert_eq!(attack_cost_pct_of_settlement(500.0, Some(0.0)), 0.0);
        assert_eq!(attack_cost_pct_of_settlement(500.0, Some(10_000.0)), 5.0);
    }

    #[test]
    fn rewards_add_to_equilibrium_hashrate() {
        let inputs = EconomicInputs::baseline(100_000.0);
        let fee_only = equilibrium_hashrate_th(500.0, &inputs, reward_usd_per_day(&inputs, false));
        let with_reward = equilibrium_hashrate_th(500.0, &inputs, reward_usd_per_day(&inputs, true));
        assert!(with_reward > fee_only);
        let expected_delta = 45_000_000.0 / (1.5 * 1.107);
        assert!((with_reward - fee_only - expected_delta).abs() < 1e-3);
    }

    #[test]
    fn pool_margin_matches_required_margin() {
        let inputs = EconomicInputs::baseline(100_000.0);
        let hashrate = 10_000_000.0;
        let revenue = hashrate * inputs.cost_per_th_day * (1.0 + inputs.margin);
        let pool = PoolEconomics::compute(revenue, hashrate, 300.0, &inputs);

        let margin = pool.margin.value().unwrap();
        assert!((margin - 0.107 / 1.107).abs() < 1e-12);
        assert!((pool.profit_usd - (pool.revenue_usd - pool.expenses_usd)).abs() < 1e-9);
        assert!(pool.roi_months.is_defined());
    }

    #[test]
    fn zero_revenue_pool_has_undefined_metrics() {
        let inputs = EconomicInputs::baseline(100_000.0);
        let pool = PoolEconomics::compute(0.0, 0.0, 0.0, &inputs);
        assert_eq!(pool.margin, Metric::Undefined);
        assert_eq!(pool.break_even_btc_price, Metric::Undefined);
        assert_eq!(pool.roi_months, Metric::Undefined);
    }

    #[test]
    fn break_even_price_scales_expenses_by_fee_btc() {
        let inputs = EconomicInputs::baseline(100_000.0);
        let pool = PoolEconomics::compute(1_000_000.0, 500_000.0, 10.0, &inputs);
        let expected = pool.expenses_usd / (10.0 * inputs.pool_share);
        assert_eq!(pool.break_even_btc_price, Metric::Defined(expected));
    }

    #[test]
    fn metric_serializes_with_status_tag() {
        let json = serde_json::to_value(Metric::Defined(1.5)).unwrap();
        assert_eq!(json, serde_json::json!({"status": "defined", "value": 1.5}));
        let json = serde_json::to_value(Metric::Undefined).unwrap();
        assert_eq!(json, serde_json::json!({"status": "undefined"}));
    }
}
