//! Fee revenue figures. Every USD fee value is derived from
//! [`fees_usd_per_day`]; the other helpers rescale it.

use super::demand::confirmed_vb_per_day;
use super::inputs::EconomicInputs;
use super::{BLOCKS_PER_DAY, SATS_PER_BTC};

/// Daily fee revenue in BTC at `feerate`.
pub fn fees_btc_per_day(feerate: f64, inputs: &EconomicInputs) -> f64 {
    feerate * confirmed_vb_per_day(feerate, inputs) / SATS_PER_BTC
}

/// Daily fee revenue in USD at `feerate`.
pub fn fees_usd_per_day(feerate: f64, inputs: &EconomicInputs) -> f64 {
    (feerate * confirmed_vb_per_day(feerate, inputs)) / SATS_PER_BTC * inputs.btc_price
}

pub fn fees_per_block_usd(feerate: f64, inputs: &EconomicInputs) -> f64 {
    fees_usd_per_day(feerate, inputs) / BLOCKS_PER_DAY
}

pub fn fees_per_block_btc(feerate: f64, inputs: &EconomicInputs) -> f64 {
    fees_btc_per_day(feerate, inputs) / BLOCKS_PER_DAY
}

/// Fee paid by one representative transaction of `avg_tx_vb` bytes.
pub fn avg_fee_per_tx_btc(feerate: f64, inputs: &EconomicInputs) -> f64 {
    (feerate * inputs.avg_tx_vb) / SATS_PER_BTC
}

pub fn avg_fee_per_tx_usd(feerate: f64, inputs: &EconomicInputs) -> f64 {
    (feerate * inputs.avg_tx_vb) / SATS_PER_BTC * inputs.btc_price
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn fees_at_baseline_match_hand_calculation() {
        let inputs = EconomicInputs::baseline(100_000.0);
        // 12 sat/vB * 280M vB = 33.6 BTC/day
        assert!((fees_btc_per_day(12.0, &inputs) - 33.6).abs() < 1e-9);
        assert!((fees_usd_per_day(12.0, &inputs) - 3_360_000.0).abs() < 1e-3);
    }

    #[test]
    fn per_tx_fee_uses_avg_tx_size() {
        let inputs = EconomicInputs::baseline(100_000.0);
        // 10 sat/vB * 210 vB = 2100 sats = 0.000021 BTC = 2.10 USD
        assert!((avg_fee_per_tx_btc(10.0, &inputs) - 0.000021).abs() < 1e-15);
        assert!((avg_fee_per_tx_usd(10.0, &inputs) - 2.1).abs() < 1e-9);
    }

    #[test]
    fn block_fees_are_daily_fees_over_144() {
        let inputs = EconomicInputs::baseline(80_000.0);
        let daily = fees_usd_per_day(250.0, &inputs);
        assert!((fees_per_block_usd(250.0, &inputs) * BLOCKS_PER_DAY - daily).abs() < 1e-6);
        let block_btc = fees_per_block_btc(250.0, &inputs);
        assert!((block_btc * inputs.btc_price - fees_per_block_usd(250.0, &inputs)).abs() < 1e-6);
    }

    #[test]
    fn fees_are_monotonic_in_feerate() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let mut inputs = EconomicInputs::baseline(rng.gen_range(10_000.0..500_000.0));
            inputs.elasticity = rng.gen_range(-0.99..=0.0);
            inputs.block_limit_mb = rng.gen_range(0.5..16.0);
            inputs.baseline_demand_vb_day = rng.gen_range(1e7..5e9);

            let mut prev = fees_usd_per_day(1.0, &inputs);
            let mut f: f64 = 1.0;
            while f < 100_000.0 {
                f *= 1.15;
                let cur = fees_usd_per_day(f.min(100_000.0), &inputs);
                assert!(cur + 1e-9 * prev.abs() >= prev, "fees dropped at {f}");
                prev = cur;
            }
        }
    }
}
