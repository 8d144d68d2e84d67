//! Market snapshots feeding the model: price, hashrate, mempool size and
//! fee rate. Providers are tried in order; the first success is cached for
//! the TTL, otherwise the last known or fallback snapshot is served.

pub mod cache;

use log::{debug, warn};
use serde::Serialize;

pub use cache::{Clock, ManualClock, SystemClock, TtlCache};

const SNAPSHOT_KEY: &str = "market";

/// Raw values from one provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketData {
    pub btc_price: f64,
    pub hashrate_th: f64,
    pub mempool_vb: f64,
    pub feerate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSnapshot {
    pub btc_price: f64,
    #[serde(rename = "hashrateTH")]
    pub hashrate_th: f64,
    pub mempool_vb: f64,
    pub feerate: f64,
    pub source: String,
    pub fetched_at: i64, // Unix timestamp (UTC)
    /// True when served from an expired entry or the fallback.
    pub stale: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum MarketError {
    #[error("provider {provider} unavailable: {reason}")]
    Unavailable { provider: String, reason: String },

    #[error("provider {provider} returned invalid {field}")]
    InvalidValue {
        provider: String,
        field: &'static str,
    },
}

pub trait MarketProvider: Send + Sync {
    fn name(&self) -> &str;
    fn fetch(&self) -> Result<MarketData, MarketError>;
}

/// Fixed values, typically from configuration.
#[derive(Debug, Clone)]
pub struct StaticProvider {
    name: String,
    data: MarketData,
}

impl StaticProvider {
    pub fn new(name: impl Into<String>, data: MarketData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }
}

impl MarketProvider for StaticProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self) -> Result<MarketData, MarketError> {
        Ok(self.data)
    }
}

/// Every value the model consumes must be finite and positive (backlog may be 0).
fn check(provider: &str, data: MarketData) -> Result<MarketData, MarketError> {
    let invalid = |field| MarketError::InvalidValue {
        provider: provider.to_string(),
        field,
    };
    if !(data.btc_price.is_finite() && data.btc_price > 0.0) {
        return Err(invalid("btcPrice"));
    }
    if !(data.hashrate_th.is_finite() && data.hashrate_th > 0.0) {
        return Err(invalid("hashrateTH"));
    }
    if !(data.feerate.is_finite() && data.feerate > 0.0) {
        return Err(invalid("feerate"));
    }
    if !(data.mempool_vb.is_finite() && data.mempool_vb >= 0.0) {
        return Err(invalid("mempoolVb"));
    }
    Ok(data)
}

pub struct MarketService<C: Clock> {
    providers: Vec<Box<dyn MarketProvider>>,
    fallback: MarketData,
    cache: TtlCache<MarketSnapshot, C>,
}

impl<C: Clock> MarketService<C> {
    pub fn new(
        providers: Vec<Box<dyn MarketProvider>>,
        fallback: MarketData,
        cache: TtlCache<MarketSnapshot, C>,
    ) -> Self {
        Self {
            providers,
            fallback,
            cache,
        }
    }

    pub fn snapshot(&mut self) -> MarketSnapshot {
        if let Some(hit) = self.cache.get(SNAPSHOT_KEY) {
            debug!("market snapshot cache hit ({})", hit.source);
            return hit;
        }

        for provider in &self.providers {
            match provider.fetch().and_then(|d| check(provider.name(), d)) {
                Ok(data) => {
                    let snapshot = MarketSnapshot {
                        btc_price: data.btc_price,
                        hashrate_th: data.hashrate_th,
                        mempool_vb: data.mempool_vb,
                        feerate: data.feerate,
                        source: provider.name().to_string(),
                        fetched_at: self.cache.now().timestamp(),
                        stale: false,
                    };
                    self.cache.insert(SNAPSHOT_KEY, snapshot.clone());
                    return snapshot;
                }
                Err(e) => warn!("market provider failed: {e}"),
            }
        }

        if let Some((mut last, _)) = self.cache.get_stale(SNAPSHOT_KEY) {
            warn!("all market providers failed, serving last snapshot from {}", last.source);
            last.stale = true;
            return last;
        }

        warn!("all market providers failed, serving fallback values");
        MarketSnapshot {
            btc_price: self.fallback.btc_price,
            hashrate_th: self.fallback.hashrate_th,
            mempool_vb: self.fallback.mempool_vb,
            feerate: self.fallback.feerate,
            source: "fallback".to_string(),
            fetched_at: self.cache.now().timestamp(),
            stale: true,
        }
    }
}
