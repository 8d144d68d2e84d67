use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

use crate::config::AppConfig;
use crate::market::{MarketService, MarketSnapshot, StaticProvider, SystemClock, TtlCache};
use crate::model::{EconomicInputs, EconomicOutputs, SolverInfo};

/// Shared application state. The model itself is stateless; only the
/// market snapshot cache lives here.
pub struct AppState {
    pub market: Mutex<MarketService<SystemClock>>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        // no live providers: configured values are served as the primary source
        let providers: Vec<Box<dyn crate::market::MarketProvider>> =
            vec![Box::new(StaticProvider::new("config", config.fallback))];
        let cache = TtlCache::new(Duration::seconds(config.market_cache_ttl_secs), SystemClock);
        Self {
            market: Mutex::new(MarketService::new(providers, config.fallback, cache)),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&AppConfig::default())
    }
}

/* ---------- Model API Models ---------- */

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelRequest {
    pub inputs: EconomicInputs,
    #[serde(default)]
    pub include_block_rewards: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareResponse {
    pub current: EconomicOutputs,
    pub fee_only: EconomicOutputs,
    /// `None` when the current figure is zero.
    pub network_revenue_change_pct: Option<f64>,
    pub hashrate_change_pct: Option<f64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveResponse {
    pub security_budget_target_usd: f64,
    #[serde(flatten)]
    pub solver: SolverInfo,
}

#[derive(Serialize)]
pub struct BaselineResponse {
    pub market: MarketSnapshot,
    pub inputs: EconomicInputs,
}
