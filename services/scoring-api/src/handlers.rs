use crate::config::AppConfig;
use crate::database;
use crate::dispatch::DecisionDispatcher;
use crate::errors::{ApiError, ApiResult};
use crate::metrics::{self, PREDICTIONS_TOTAL, SCORE_DISTRIBUTION, VALIDATION_FAILURES};
use crate::models::*;
use actix_web::{web, HttpResponse};
use rust_decimal::prelude::ToPrimitive;
use scoring_engine::{
    CreditRiskInput, CreditRiskScorer, DecisionRecord, FraudCheckInput, FraudScorer,
    PredictionType,
};
use sqlx::SqlitePool;
use tracing::info;

// ===== Root =====
pub async fn root(app: web::Data<AppConfig>) -> HttpResponse {
    HttpResponse::Ok().json(RootResponse {
        message: app.title.clone(),
        version: app.version.clone(),
        status: "running".to_string(),
    })
}

// ===== Health Check =====
pub async fn health_check(
    app: web::Data<AppConfig>,
    pool: Option<web::Data<SqlitePool>>,
) -> HttpResponse {
    let database = match pool {
        Some(pool) => match database::health_check(pool.get_ref()).await {
            Ok(_) => "connected",
            Err(_) => "disconnected",
        },
        None => "disabled",
    };

    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        environment: app.environment.clone(),
        debug: app.debug,
        database: database.to_string(),
    })
}

// ===== Credit Risk =====
pub async fn predict_credit_risk(
    query: web::Query<CreditRiskInput>,
    scorer: web::Data<CreditRiskScorer>,
    dispatcher: web::Data<DecisionDispatcher>,
) -> ApiResult<HttpResponse> {
    let input = query.into_inner();
    let label = PredictionType::CreditRisk.as_str();

    let result = scorer.score(&input).map_err(|e| {
        VALIDATION_FAILURES.with_label_values(&[label]).inc();
        ApiError::from(e)
    })?;

    PREDICTIONS_TOTAL
        .with_label_values(&[label, result.risk_category.as_str()])
        .inc();
    SCORE_DISTRIBUTION
        .with_label_values(&[label])
        .observe(result.risk_score.to_f64().unwrap_or_default());

    info!(
        "Credit risk decision: score={} category={} region={}",
        result.risk_score, result.risk_category, input.region
    );

    dispatcher.dispatch(DecisionRecord::credit(&input, &result));

    Ok(HttpResponse::Ok().json(CreditRiskResponse::from(result)))
}

// ===== Fraud =====
pub async fn predict_fraud(
    query: web::Query<FraudCheckInput>,
    scorer: web::Data<FraudScorer>,
    dispatcher: web::Data<DecisionDispatcher>,
) -> ApiResult<HttpResponse> {
    let input = query.into_inner();
    let label = PredictionType::Fraud.as_str();

    let result = scorer.score(&input).map_err(|e| {
        VALIDATION_FAILURES.with_label_values(&[label]).inc();
        ApiError::from(e)
    })?;

    PREDICTIONS_TOTAL
        .with_label_values(&[label, result.action.as_str()])
        .inc();
    SCORE_DISTRIBUTION
        .with_label_values(&[label])
        .observe(result.fraud_risk_score.to_f64().unwrap_or_default());

    info!(
        "Fraud decision: score={} action={} amount={}",
        result.fraud_risk_score, result.action, input.transaction_amount
    );

    dispatcher.dispatch(DecisionRecord::fraud(&input, &result));

    Ok(HttpResponse::Ok().json(FraudResponse::from(result)))
}

// ===== Prediction History =====
pub async fn list_predictions(
    query: web::Query<HistoryQuery>,
    pool: Option<web::Data<SqlitePool>>,
) -> ApiResult<HttpResponse> {
    let prediction_type = query
        .prediction_type
        .as_deref()
        .map(str::parse::<PredictionType>)
        .transpose()?;

    let predictions = match pool {
        Some(pool) => {
            database::recent_predictions(pool.get_ref(), query.effective_limit(), prediction_type)
                .await?
        }
        None => Vec::new(),
    };

    Ok(HttpResponse::Ok().json(PredictionHistory {
        count: predictions.len(),
        predictions,
    }))
}

// ===== Metrics =====
pub async fn get_metrics() -> ApiResult<HttpResponse> {
    let body = metrics::render().map_err(|e| ApiError::InternalError(e.to_string()))?;

    Ok(HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(body))
}

// ===== Configure Routes =====
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(|err, _req| {
        ApiError::ValidationError(format!("Invalid query parameters: {}", err)).into()
    }))
    .service(
        web::scope("/predict")
            .route("/credit-risk", web::post().to(predict_credit_risk))
            .route("/fraud", web::post().to(predict_fraud)),
    )
    .route("/predictions", web::get().to(list_predictions))
    .route("/metrics", web::get().to(get_metrics))
    .route("/health", web::get().to(health_check))
    .route("/", web::get().to(root));
}
