use log::info;
use serde::Serialize;

use super::budget::security_budget_target_usd;
use super::confirmation::calculate_confirmation_time;
use super::consistency::{ConsistencyViolation, check_consistency};
use super::demand::{confirmed_vb_per_day, demand_vb_per_day, supply_vb_per_day};
use super::error::ModelError;
use super::fees::{
    avg_fee_per_tx_btc, avg_fee_per_tx_usd, fees_btc_per_day, fees_per_block_btc,
    fees_per_block_usd, fees_usd_per_day,
};
use super::inputs::EconomicInputs;
use super::mining::{
    Metric, PoolEconomics, attack_cost_pct_of_settlement, attack_cost_usd,
    equilibrium_hashrate_th, reward_usd_per_day,
};
use super::solver::{SolverInfo, solve_feerate_for_target};
use super::ATTACK_DURATION_HOURS;

/// Everything derived from one solve.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EconomicOutputs {
    pub include_block_rewards: bool,
    pub optimal_feerate: f64,

    #[serde(rename = "dailyFeeRevenueBTC")]
    pub daily_fee_revenue_btc: f64,
    #[serde(rename = "dailyFeeRevenueUSD")]
    pub daily_fee_revenue_usd: f64,
    #[serde(rename = "feesPerBlockBTC")]
    pub fees_per_block_btc: f64,
    #[serde(rename = "feesPerBlockUSD")]
    pub fees_per_block_usd: f64,
    #[serde(rename = "avgFeePerTxBTC")]
    pub avg_fee_per_tx_btc: f64,
    #[serde(rename = "avgFeePerTxUSD")]
    pub avg_fee_per_tx_usd: f64,

    pub demand_vb_day: f64,
    pub confirmed_vb_day: f64,
    pub supply_vb_day: f64,
    pub backlog_vb: f64,
    pub avg_confirmation_minutes: f64,

    #[serde(rename = "equilibriumHashrateTH")]
    pub equilibrium_hashrate_th: f64,
    #[serde(rename = "rewardRevenueUSD")]
    pub reward_revenue_usd: f64,
    #[serde(rename = "networkRevenueUSD")]
    pub network_revenue_usd: f64,
    pub security_budget_target_usd: f64,
    #[serde(rename = "attackCost6hUSD")]
    pub attack_cost_6h_usd: f64,
    pub attack_cost_pct_of_settlement: f64,

    #[serde(rename = "poolDailyRevenueUSD")]
    pub pool_daily_revenue_usd: f64,
    #[serde(rename = "poolDailyExpensesUSD")]
    pub pool_daily_expenses_usd: f64,
    #[serde(rename = "poolDailyProfitUSD")]
    pub pool_daily_profit_usd: f64,
    pub pool_profit_margin: Metric,
    #[serde(rename = "breakEvenBTCPrice")]
    pub break_even_btc_price: Metric,
    pub roi_months: Metric,
    pub hashrate_sustainability_ratio: f64,

    pub solver_info: SolverInfo,
    /// Internal arithmetic checks that diverged; empty on a healthy run.
    pub consistency_violations: Vec<ConsistencyViolation>,
}

/// Solve the fee market for `inputs`.
///
/// `include_block_rewards = true` models today's subsidy; `false` the
/// fee-only regime. Pure apart from diagnostic logging.
pub fn compute_full_model(
    inputs: &EconomicInputs,
    include_block_rewards: bool,
) -> Result<EconomicOutputs, ModelError> {
    inputs.validate()?;
    let budget = security_budget_target_usd(inputs)?;

    let solver_info = solve_feerate_for_target(budget, inputs);
    let feerate = solver_info.feerate;

    let demand = demand_vb_per_day(feerate, inputs);
    let supply = supply_vb_per_day(inputs);
    let confirmed = confirmed_vb_per_day(feerate, inputs);
    let confirmation = calculate_confirmation_time(demand, supply, inputs.backlog_vb);

    let daily_fee_revenue_usd = fees_usd_per_day(feerate, inputs);
    let daily_fee_revenue_btc = fees_btc_per_day(feerate, inputs);

    let reward_revenue_usd = reward_usd_per_day(inputs, include_block_rewards);
    let network_revenue_usd = daily_fee_revenue_usd * (1.0 + inputs.mev_uplift) + reward_revenue_usd;
    let hashrate = equilibrium_hashrate_th(feerate, inputs, reward_revenue_usd);

    let attack_cost_6h_usd =
        attack_cost_usd(ATTACK_DURATION_HOURS, hashrate, inputs.rent_rate_usd_per_th_hour);
    let pool = PoolEconomics::compute(network_revenue_usd, hashrate, daily_fee_revenue_btc, inputs);

    let mut outputs = EconomicOutputs {
        include_block_rewards,
        optimal_feerate: feerate,
        daily_fee_revenue_btc,
        daily_fee_revenue_usd,
        fees_per_block_btc: fees_per_block_btc(feerate, inputs),
        fees_per_block_usd: fees_per_block_usd(feerate, inputs),
        avg_fee_per_tx_btc: avg_fee_per_tx_btc(feerate, inputs),
        avg_fee_per_tx_usd: avg_fee_per_tx_usd(feerate, inputs),
        demand_vb_day: demand,
        confirmed_vb_day: confirmed,
        supply_vb_day: supply,
        backlog_vb: confirmation.backlog_vb,
        avg_confirmation_minutes: confirmation.avg_confirmation_minutes,
        equilibrium_hashrate_th: hashrate,
        reward_revenue_usd,
        network_revenue_usd,
        security_budget_target_usd: budget,
        attack_cost_6h_usd,
        attack_cost_pct_of_settlement: attack_cost_pct_of_settlement(
            attack_cost_6h_usd,
            inputs.settlement_usd_day,
        ),
        pool_daily_revenue_usd: pool.revenue_usd,
        pool_daily_expenses_usd: pool.expenses_usd,
        pool_daily_profit_usd: pool.profit_usd,
        pool_profit_margin: pool.margin,
        break_even_btc_price: pool.break_even_btc_price,
        roi_months: pool.roi_months,
        hashrate_sustainability_ratio: hashrate / inputs.observed_hashrate_th,
        solver_info,
        consistency_violations: Vec::new(),
    };
    outputs.consistency_violations = check_consistency(&outputs, inputs);

    info!(
        "model solved (rewards={}): feerate={:.2} sat/vB fees=${:.0}/day hashrate={:.0} TH target_met={}",
        include_block_rewards,
        feerate,
        daily_fee_revenue_usd,
        hashrate,
        outputs.solver_info.target_met
    );

    Ok(outputs)
}
