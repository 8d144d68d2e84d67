//! Backlog and confirmation-time estimate.
//!
//! This is a linear backlog-clearing approximation with empirically chosen
//! constants, not a queueing model. Useful for comparing scenarios only.

use serde::Serialize;

use super::BLOCK_INTERVAL_MINUTES;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationEstimate {
    pub backlog_vb: f64,
    pub avg_confirmation_minutes: f64,
}

pub fn calculate_confirmation_time(
    demand_vb_day: f64,
    supply_vb_day: f64,
    existing_backlog_vb: f64,
) -> ConfirmationEstimate {
    if demand_vb_day <= supply_vb_day {
        return ConfirmationEstimate {
            backlog_vb: existing_backlog_vb,
            avg_confirmation_minutes: BLOCK_INTERVAL_MINUTES,
        };
    }

    let backlog_vb = existing_backlog_vb + (demand_vb_day - supply_vb_day);
    let minutes = (backlog_vb / supply_vb_day) * 10.0 * 60.0;
    ConfirmationEstimate {
        backlog_vb,
        avg_confirmation_minutes: minutes.max(BLOCK_INTERVAL_MINUTES),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsaturated_chain_confirms_next_block() {
        let est = calculate_confirmation_time(100.0, 576.0, 25.0);
        assert_eq!(est.avg_confirmation_minutes, 10.0);
        assert_eq!(est.backlog_vb, 25.0);
    }

    #[test]
    fn saturated_chain_grows_backlog() {
        let supply = 576_000_000.0;
        let est = calculate_confirmation_time(supply * 2.0, supply, 25_000_000.0);
        assert_eq!(est.backlog_vb, 25_000_000.0 + supply);
        let expected = (est.backlog_vb / supply) * 600.0;
        assert!((est.avg_confirmation_minutes - expected).abs() < 1e-9);
    }

    #[test]
    fn small_overflow_is_floored_at_one_block() {
        let est = calculate_confirmation_time(1_000_001.0, 1_000_000.0, 0.0);
        assert_eq!(est.backlog_vb, 1.0);
        assert_eq!(est.avg_confirmation_minutes, 10.0);
    }
}
