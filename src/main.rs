use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use log::info;

use fee_market::api::{self, AppState};
use fee_market::config::AppConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let config = AppConfig::from_env();
    info!(
        "Starting fee market API at http://{}:{} (market cache ttl {}s)",
        config.host, config.port, config.market_cache_ttl_secs
    );

    let state = web::Data::new(AppState::new(&config));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
