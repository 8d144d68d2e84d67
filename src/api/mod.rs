mod health;
mod market;
mod model;
pub mod models;

use actix_web::web::{self, ServiceConfig};

pub use models::AppState;

pub fn init_routes(cfg: &mut ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(health::health_check)
            .service(model::baseline_inputs)
            .service(model::compute_model)
            .service(model::compare_scenarios)
            .service(model::solve)
            .service(market::get_market),
    );
}
