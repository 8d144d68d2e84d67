use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::ModelError;
use super::{
    BLOCKS_PER_DAY, CURRENT_BLOCK_REWARD_BTC, CURRENT_NETWORK_HASHRATE_TH,
    DEFAULT_HARDWARE_COST_USD_PER_TH, DEFAULT_RENT_RATE_USD_PER_TH_HOUR,
};

/// Policy used to derive the USD/day security budget target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SecurityBudgetMode {
    PercentOf2025,
    PercentOfSettlementValue,
    AbsoluteUsd,
}

impl SecurityBudgetMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SecurityBudgetMode::PercentOf2025 => "percent_of_2025",
            SecurityBudgetMode::PercentOfSettlementValue => "percent_of_settlement_value",
            SecurityBudgetMode::AbsoluteUsd => "absolute_usd",
        }
    }
}

impl FromStr for SecurityBudgetMode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "percent_of_2025" => Ok(SecurityBudgetMode::PercentOf2025),
            "percent_of_settlement_value" => Ok(SecurityBudgetMode::PercentOfSettlementValue),
            "absolute_usd" => Ok(SecurityBudgetMode::AbsoluteUsd),
            other => Err(ModelError::UnknownBudgetMode(other.to_string())),
        }
    }
}

impl TryFrom<String> for SecurityBudgetMode {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SecurityBudgetMode> for String {
    fn from(mode: SecurityBudgetMode) -> Self {
        mode.as_str().to_string()
    }
}

impl fmt::Display for SecurityBudgetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A budget mode resolved together with the parameters it needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SecurityBudgetPolicy {
    PercentOf2025 { alpha: f64, base_revenue_usd: f64 },
    PercentOfSettlement { beta: f64, settlement_usd_day: f64 },
    AbsoluteUsd { usd_day: f64 },
}

/// Immutable input record for one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EconomicInputs {
    pub btc_price: f64,
    #[serde(rename = "blockLimitMB")]
    pub block_limit_mb: f64,

    pub baseline_feerate: f64, // sat/vB
    pub baseline_demand_vb_day: f64,
    pub elasticity: f64,
    #[serde(default = "default_batching_factor")]
    pub batching_factor: f64,

    pub mev_uplift: f64,
    #[serde(rename = "costPerTHDay")]
    pub cost_per_th_day: f64,
    pub margin: f64,
    pub pool_share: f64,

    pub avg_tx_vb: f64,
    #[serde(default)]
    pub backlog_vb: f64,

    pub security_budget_mode: SecurityBudgetMode,
    #[serde(default)]
    pub alpha: Option<f64>,
    #[serde(default)]
    pub base_2025_revenue_usd: Option<f64>,
    #[serde(default)]
    pub beta: Option<f64>,
    #[serde(default)]
    pub settlement_usd_day: Option<f64>,
    #[serde(default)]
    pub absolute_usd_day: Option<f64>,

    #[serde(
        rename = "rentRateUsdPerTHHour",
        default = "default_rent_rate_usd_per_th_hour"
    )]
    pub rent_rate_usd_per_th_hour: f64,
    #[serde(default = "default_block_reward_btc")]
    pub block_reward_btc: f64,
    #[serde(rename = "observedHashrateTH", default = "default_observed_hashrate_th")]
    pub observed_hashrate_th: f64,
    #[serde(
        rename = "hardwareCostUsdPerTH",
        default = "default_hardware_cost_usd_per_th"
    )]
    pub hardware_cost_usd_per_th: f64,
}

fn default_batching_factor() -> f64 {
    1.0
}

fn default_rent_rate_usd_per_th_hour() -> f64 {
    DEFAULT_RENT_RATE_USD_PER_TH_HOUR
}

fn default_block_reward_btc() -> f64 {
    CURRENT_BLOCK_REWARD_BTC
}

fn default_observed_hashrate_th() -> f64 {
    CURRENT_NETWORK_HASHRATE_TH
}

fn default_hardware_cost_usd_per_th() -> f64 {
    DEFAULT_HARDWARE_COST_USD_PER_TH
}

impl EconomicInputs {
    /// Reference scenario: 4 MB blocks, 65% of the 2025 miner revenue as budget.
    pub fn baseline(btc_price: f64) -> Self {
        Self {
            btc_price,
            block_limit_mb: 4.0,
            baseline_feerate: 12.0,
            baseline_demand_vb_day: 280_000_000.0,
            elasticity: -0.5,
            batching_factor: 1.0,
            mev_uplift: 0.03,
            cost_per_th_day: 1.5,
            margin: 0.107,
            pool_share: 0.008,
            avg_tx_vb: 210.0,
            backlog_vb: 25_000_000.0,
            security_budget_mode: SecurityBudgetMode::PercentOf2025,
            alpha: Some(0.65),
            base_2025_revenue_usd: Some(btc_price * CURRENT_BLOCK_REWARD_BTC * BLOCKS_PER_DAY),
            beta: None,
            settlement_usd_day: None,
            absolute_usd_day: None,
            rent_rate_usd_per_th_hour: DEFAULT_RENT_RATE_USD_PER_TH_HOUR,
            block_reward_btc: CURRENT_BLOCK_REWARD_BTC,
            observed_hashrate_th: CURRENT_NETWORK_HASHRATE_TH,
            hardware_cost_usd_per_th: DEFAULT_HARDWARE_COST_USD_PER_TH,
        }
    }

    /// Resolve the active budget mode into its parameters.
    /// A field required by the mode that is missing is a configuration error.
    pub fn policy(&self) -> Result<SecurityBudgetPolicy, ModelError> {
        let mode = self.security_budget_mode.as_str();
        let require = |value: Option<f64>, field: &'static str| {
            value.ok_or(ModelError::MissingField { mode, field })
        };

        match self.security_budget_mode {
            SecurityBudgetMode::PercentOf2025 => Ok(SecurityBudgetPolicy::PercentOf2025 {
                alpha: require(self.alpha, "alpha")?,
                base_revenue_usd: require(self.base_2025_revenue_usd, "base2025RevenueUsd")?,
            }),
            SecurityBudgetMode::PercentOfSettlementValue => {
                Ok(SecurityBudgetPolicy::PercentOfSettlement {
                    beta: require(self.beta, "beta")?,
                    settlement_usd_day: require(self.settlement_usd_day, "settlementUsdDay")?,
                })
            }
            SecurityBudgetMode::AbsoluteUsd => Ok(SecurityBudgetPolicy::AbsoluteUsd {
                usd_day: require(self.absolute_usd_day, "absoluteUsdDay")?,
            }),
        }
    }

    /// Check the numeric contract every model function relies on.
    pub fn validate(&self) -> Result<(), ModelError> {
        positive("btcPrice", self.btc_price)?;
        positive("blockLimitMB", self.block_limit_mb)?;
        positive("baselineFeerate", self.baseline_feerate)?;
        positive("baselineDemandVbDay", self.baseline_demand_vb_day)?;
        positive("avgTxVb", self.avg_tx_vb)?;
        finite("elasticity", self.elasticity)?;
        finite("mevUplift", self.mev_uplift)?;
        finite("costPerTHDay", self.cost_per_th_day)?;
        finite("margin", self.margin)?;
        finite("rentRateUsdPerTHHour", self.rent_rate_usd_per_th_hour)?;
        finite("blockRewardBtc", self.block_reward_btc)?;
        finite("hardwareCostUsdPerTH", self.hardware_cost_usd_per_th)?;
        positive("observedHashrateTH", self.observed_hashrate_th)?;

        if !(self.batching_factor.is_finite() && self.batching_factor >= 1.0) {
            return Err(ModelError::InvalidInput {
                field: "batchingFactor",
                reason: "must be >= 1",
            });
        }
        if !(self.backlog_vb.is_finite() && self.backlog_vb >= 0.0) {
            return Err(ModelError::InvalidInput {
                field: "backlogVb",
                reason: "must be >= 0",
            });
        }
        if !(self.pool_share > 0.0 && self.pool_share <= 1.0) {
            return Err(ModelError::InvalidInput {
                field: "poolShare",
                reason: "must be in (0, 1]",
            });
        }
        if self.cost_per_th_day * (1.0 + self.margin) <= 0.0 {
            return Err(ModelError::InvalidInput {
                field: "costPerTHDay",
                reason: "cost including margin must be > 0",
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ModelError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ModelError::InvalidInput {
            field,
            reason: "must be a finite value > 0",
        })
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), ModelError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ModelError::InvalidInput {
            field,
            reason: "must be finite",
        })
    }
}
