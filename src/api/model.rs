use actix_web::{HttpResponse, Responder, get, post, web};
use log::{info, warn};
use std::time::Instant;

use super::models::{AppState, BaselineResponse, CompareResponse, ModelRequest, SolveResponse};
use crate::format;
use crate::model::{
    EconomicInputs, compute_full_model, security_budget_target_usd, solve_feerate_for_target,
};

/// Baseline inputs filled in from the current market snapshot.
#[get("/model/baseline/")]
pub async fn baseline_inputs(state: web::Data<AppState>) -> impl Responder {
    let market = {
        let mut service = state.market.lock().expect("mutex poisoned");
        service.snapshot()
    };

    let mut inputs = EconomicInputs::baseline(market.btc_price);
    inputs.baseline_feerate = market.feerate;
    inputs.backlog_vb = market.mempool_vb;
    inputs.observed_hashrate_th = market.hashrate_th;

    HttpResponse::Ok().json(BaselineResponse { market, inputs })
}

/// Solve one scenario.
#[post("/model/")]
pub async fn compute_model(req: web::Json<ModelRequest>) -> impl Responder {
    let t0 = Instant::now();
    match compute_full_model(&req.inputs, req.include_block_rewards) {
        Ok(outputs) => {
            info!(
                "POST /model/ - feerate={} fees={}/day ({} us)",
                format::sat_per_vb(outputs.optimal_feerate),
                format::usd(outputs.daily_fee_revenue_usd),
                t0.elapsed().as_micros()
            );
            HttpResponse::Ok().json(outputs)
        }
        Err(e) => {
            warn!("POST /model/ - rejected: {e}");
            HttpResponse::BadRequest().body(e.to_string())
        }
    }
}

/// Today (subsidy included) against the fee-only future, same inputs.
#[post("/model/compare/")]
pub async fn compare_scenarios(req: web::Json<EconomicInputs>) -> impl Responder {
    let inputs = req.into_inner();
    let (current, fee_only) = match (
        compute_full_model(&inputs, true),
        compute_full_model(&inputs, false),
    ) {
        (Ok(current), Ok(fee_only)) => (current, fee_only),
        (Err(e), _) | (_, Err(e)) => {
            warn!("POST /model/compare/ - rejected: {e}");
            return HttpResponse::BadRequest().body(e.to_string());
        }
    };

    let network_revenue_change_pct =
        format::relative_change(current.network_revenue_usd, fee_only.network_revenue_usd)
            .map(|c| c * 100.0);
    let hashrate_change_pct =
        format::relative_change(current.equilibrium_hashrate_th, fee_only.equilibrium_hashrate_th)
            .map(|c| c * 100.0);

    info!(
        "POST /model/compare/ - hashrate {} -> {} ({})",
        format::hashrate(current.equilibrium_hashrate_th),
        format::hashrate(fee_only.equilibrium_hashrate_th),
        format::pct_change(current.equilibrium_hashrate_th, fee_only.equilibrium_hashrate_th)
    );

    HttpResponse::Ok().json(CompareResponse {
        current,
        fee_only,
        network_revenue_change_pct,
        hashrate_change_pct,
    })
}

/// Only run the equilibrium search.
#[post("/solve/")]
pub async fn solve(req: web::Json<EconomicInputs>) -> impl Responder {
    let inputs = req.into_inner();
    let target = match inputs
        .validate()
        .and_then(|_| security_budget_target_usd(&inputs))
    {
        Ok(target) => target,
        Err(e) => {
            warn!("POST /solve/ - rejected: {e}");
            return HttpResponse::BadRequest().body(e.to_string());
        }
    };

    HttpResponse::Ok().json(SolveResponse {
        security_budget_target_usd: target,
        solver: solve_feerate_for_target(target, &inputs),
    })
}

#[cfg(test)]
mod tests {
    use crate::api::{AppState, init_routes};
    use crate::model::EconomicInputs;
    use actix_web::{App, test, web};
    use serde_json::{Value, json};

    macro_rules! app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(AppState::default()))
                    .configure(init_routes),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn model_endpoint_returns_outputs() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/api/v1/model/")
            .set_json(json!({
                "inputs": EconomicInputs::baseline(100_000.0),
                "includeBlockRewards": false
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["solverInfo"]["targetMet"], json!(true));
        assert_eq!(body["rewardRevenueUSD"], json!(0.0));
        assert!(body["dailyFeeRevenueUSD"].as_f64().unwrap() > 0.0);
        assert_eq!(body["poolProfitMargin"]["status"], json!("defined"));
    }

    #[actix_web::test]
    async fn unknown_mode_is_bad_request() {
        let app = app!();
        let mut inputs = serde_json::to_value(EconomicInputs::baseline(100_000.0)).unwrap();
        inputs["securityBudgetMode"] = json!("vibes");
        let req = test::TestRequest::post()
            .uri("/api/v1/solve/")
            .set_json(inputs)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
    }

    #[actix_web::test]
    async fn missing_mode_field_is_bad_request() {
        let app = app!();
        let mut inputs = EconomicInputs::baseline(100_000.0);
        inputs.alpha = None;
        let req = test::TestRequest::post()
            .uri("/api/v1/model/compare/")
            .set_json(inputs)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
        let body = test::read_body(resp).await;
        assert!(std::str::from_utf8(&body).unwrap().contains("alpha"));
    }

    #[actix_web::test]
    async fn compare_reports_revenue_drop() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/api/v1/model/compare/")
            .set_json(EconomicInputs::baseline(100_000.0))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        let current = body["current"]["networkRevenueUSD"].as_f64().unwrap();
        let fee_only = body["feeOnly"]["networkRevenueUSD"].as_f64().unwrap();
        assert!(current > fee_only);
        assert!(body["networkRevenueChangePct"].as_f64().unwrap() < 0.0);
    }

    #[actix_web::test]
    async fn solve_flattens_solver_info() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/api/v1/solve/")
            .set_json(EconomicInputs::baseline(100_000.0))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["targetMet"], json!(true));
        assert!(body["feerate"].as_f64().unwrap() > 12.0);
        assert!(body["securityBudgetTargetUsd"].as_f64().unwrap() > 0.0);
    }

    #[actix_web::test]
    async fn baseline_uses_market_snapshot() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/api/v1/model/baseline/")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["market"]["source"], json!("config"));
        assert_eq!(body["inputs"]["btcPrice"], body["market"]["btcPrice"]);
        assert_eq!(body["inputs"]["backlogVb"], body["market"]["mempoolVb"]);
    }

    #[actix_web::test]
    async fn health_and_market_respond() {
        let app = app!();
        let req = test::TestRequest::get().uri("/api/v1/health/").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let req = test::TestRequest::get().uri("/api/v1/market/").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["stale"], json!(false));
    }
}
