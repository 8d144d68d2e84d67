use super::error::ModelError;
use super::inputs::{EconomicInputs, SecurityBudgetPolicy};

/// USD/day the network must pay miners under the configured policy.
pub fn security_budget_target_usd(inputs: &EconomicInputs) -> Result<f64, ModelError> {
    let target = match inputs.policy()? {
        SecurityBudgetPolicy::PercentOf2025 {
            alpha,
            base_revenue_usd,
        } => alpha * base_revenue_usd,
        SecurityBudgetPolicy::PercentOfSettlement {
            beta,
            settlement_usd_day,
        } => beta * settlement_usd_day,
        SecurityBudgetPolicy::AbsoluteUsd { usd_day } => usd_day,
    };
    Ok(target)
}
