//! Post-subsidy Bitcoin fee market model.
//!
//! Given a security budget and a demand curve, [`model::compute_full_model`]
//! solves for the fee rate that pays for that budget and derives the mining,
//! pool, attack-cost and confirmation-delay figures that follow from it.

pub mod api;
pub mod config;
pub mod format;
pub mod market;
pub mod model;
