//! Presentation helpers. They only read already-computed numbers.

use crate::model::{Metric, SATS_PER_BTC};

pub fn sats_to_btc(sats: f64) -> f64 {
    sats / SATS_PER_BTC
}

pub fn btc_to_sats(btc: f64) -> f64 {
    btc * SATS_PER_BTC
}

/// Compact USD figure: `$1.23B`, `$45.60M`, `$7.50K`, `$12.34`.
pub fn usd(value: f64) -> String {
    if !value.is_finite() {
        return "n/a".to_string();
    }
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();
    let (scaled, suffix) = if abs >= 1e12 {
        (abs / 1e12, "T")
    } else if abs >= 1e9 {
        (abs / 1e9, "B")
    } else if abs >= 1e6 {
        (abs / 1e6, "M")
    } else if abs >= 1e3 {
        (abs / 1e3, "K")
    } else {
        (abs, "")
    };
    format!("{sign}${scaled:.2}{suffix}")
}

/// Fraction as a percentage: `0.1234` -> `12.34%`.
pub fn pct(fraction: f64) -> String {
    if !fraction.is_finite() {
        return "n/a".to_string();
    }
    format!("{:.2}%", fraction * 100.0)
}

/// Signed relative change from `old` to `new`; `n/a` when `old` is zero.
pub fn pct_change(old: f64, new: f64) -> String {
    match relative_change(old, new) {
        Some(change) => format!("{:+.1}%", change * 100.0),
        None => "n/a".to_string(),
    }
}

pub fn relative_change(old: f64, new: f64) -> Option<f64> {
    if old == 0.0 || !old.is_finite() || !new.is_finite() {
        None
    } else {
        Some((new - old) / old.abs())
    }
}

/// Hashrate given in TH/s, scaled to the largest fitting SI unit.
pub fn hashrate(th_per_sec: f64) -> String {
    if !th_per_sec.is_finite() {
        return "n/a".to_string();
    }
    let units = [(1e9, "ZH/s"), (1e6, "EH/s"), (1e3, "PH/s"), (1.0, "TH/s")];
    for (scale, unit) in units {
        if th_per_sec.abs() >= scale {
            return format!("{:.2} {unit}", th_per_sec / scale);
        }
    }
    format!("{th_per_sec:.2} TH/s")
}

pub fn btc(value: f64) -> String {
    format!("{value:.8} BTC")
}

pub fn sat_per_vb(feerate: f64) -> String {
    format!("{feerate:.1} sat/vB")
}

/// Render a metric with `render`, or `n/a` when undefined.
pub fn metric(value: &Metric, render: fn(f64) -> String) -> String {
    match value {
        Metric::Defined(v) => render(*v),
        Metric::Undefined => "n/a".to_string(),
    }
}
