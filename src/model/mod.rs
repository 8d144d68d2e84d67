pub mod budget;
pub mod confirmation;
pub mod consistency;
pub mod demand;
pub mod error;
pub mod fees;
pub mod inputs;
pub mod mining;
pub mod outputs;
pub mod solver;

pub use budget::security_budget_target_usd;
pub use confirmation::{ConfirmationEstimate, calculate_confirmation_time};
pub use consistency::{ConsistencyViolation, check_consistency};
pub use demand::{confirmed_vb_per_day, demand_vb_per_day, supply_vb_per_day};
pub use error::ModelError;
pub use fees::fees_usd_per_day;
pub use inputs::{EconomicInputs, SecurityBudgetMode, SecurityBudgetPolicy};
pub use mining::{Metric, PoolEconomics, attack_cost_usd, equilibrium_hashrate_th};
pub use outputs::{EconomicOutputs, compute_full_model};
pub use solver::{SolverInfo, solve_feerate_for_target};

/// Blocks per day at the 10-minute target interval (fixed network parameter).
pub const BLOCKS_PER_DAY: f64 = 144.0;

/// Target block interval in minutes.
pub const BLOCK_INTERVAL_MINUTES: f64 = 10.0;

pub const SATS_PER_BTC: f64 = 1e8;

pub const BYTES_PER_MB: f64 = 1_000_000.0;

/// Current block subsidy (post-2024 halving).
pub const CURRENT_BLOCK_REWARD_BTC: f64 = 3.125;

/// Reference network hashrate in TH/s standing in for live data (~600 EH/s).
pub const CURRENT_NETWORK_HASHRATE_TH: f64 = 600_000_000.0;

/// Fee-rate search domain in sat/vB.
pub const SEARCH_MIN_FEERATE: f64 = 1.0;
pub const SEARCH_MAX_FEERATE: f64 = 100_000.0;

/// Bisection ceiling and bracket resolution.
pub const SOLVER_MAX_ITERATIONS: u32 = 100;
pub const SOLVER_BRACKET_EPSILON: f64 = 0.001;

/// Relative gap at which the budget counts as met (0.25%).
pub const SOLVER_TOLERANCE: f64 = 0.0025;

/// Share of network hashrate an attacker must rent.
pub const ATTACK_HASHRATE_SHARE: f64 = 0.51;

pub const ATTACK_DURATION_HOURS: f64 = 6.0;

pub const DEFAULT_RENT_RATE_USD_PER_TH_HOUR: f64 = 0.07;

pub const DEFAULT_HARDWARE_COST_USD_PER_TH: f64 = 15.0;

pub const DAYS_PER_MONTH: f64 = 30.0;
