use std::env;
use std::str::FromStr;

use crate::market::MarketData;
use crate::model::CURRENT_NETWORK_HASHRATE_TH;

/// Server and market settings read from the environment (after `.env`).
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub market_cache_ttl_secs: i64,
    pub fallback: MarketData,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            market_cache_ttl_secs: 30,
            fallback: MarketData {
                btc_price: 100_000.0,
                hashrate_th: CURRENT_NETWORK_HASHRATE_TH,
                mempool_vb: 25_000_000.0,
                feerate: 12.0,
            },
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Unset or unparsable values keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let d = Self::default();

        Self {
            host: lookup("HOST").unwrap_or(d.host),
            port: parse(&lookup, "PORT").unwrap_or(d.port),
            market_cache_ttl_secs: parse(&lookup, "MARKET_CACHE_TTL_SECS")
                .unwrap_or(d.market_cache_ttl_secs),
            fallback: MarketData {
                btc_price: positive(parse::<f64, _>(&lookup, "FALLBACK_BTC_PRICE"))
                    .unwrap_or(d.fallback.btc_price),
                hashrate_th: positive(parse::<f64, _>(&lookup, "FALLBACK_HASHRATE_TH"))
                    .unwrap_or(d.fallback.hashrate_th),
                mempool_vb: parse::<f64, _>(&lookup, "FALLBACK_MEMPOOL_VB")
                    .filter(|v| *v >= 0.0)
                    .unwrap_or(d.fallback.mempool_vb),
                feerate: positive(parse::<f64, _>(&lookup, "FALLBACK_FEERATE"))
                    .unwrap_or(d.fallback.feerate),
            },
        }
    }
}

fn parse<T: FromStr, F: Fn(&str) -> Option<String>>(lookup: &F, key: &str) -> Option<T> {
    lookup(key).and_then(|v| v.trim().parse().ok())
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}
