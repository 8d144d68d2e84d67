use actix_web::{HttpResponse, Responder, get, web};

use super::models::AppState;

/// Current market snapshot (cached, or fallback when providers fail).
#[get("/market/")]
pub async fn get_market(state: web::Data<AppState>) -> impl Responder {
    let snapshot = {
        let mut market = state.market.lock().expect("mutex poisoned");
        market.snapshot()
    };
    HttpResponse::Ok().json(snapshot)
}
