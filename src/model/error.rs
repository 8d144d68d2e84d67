/// Configuration errors raised before any computation runs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error("unknown security budget mode: {0}")]
    UnknownBudgetMode(String),

    #[error("security budget mode {mode} requires field {field}")]
    MissingField {
        mode: &'static str,
        field: &'static str,
    },

    #[error("invalid input {field}: {reason}")]
    InvalidInput {
        field: &'static str,
        reason: &'static str,
    },
}
