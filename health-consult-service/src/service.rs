use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{Html, Json},
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};
use uuid::Uuid;

use agent_flow::{AggregationPolicy, Pipeline};
use serde_json::{Value, json};

use crate::config::Config;
use crate::consultation::{build_consult_pipeline, run_consultation};
use crate::document::{DOCUMENT_FILENAME, download_payload};
use crate::models::{ConsultResponse, PatientInput};
use crate::translate::Translator;

type ApiResult<T> = Result<Json<T>, ApiError>;
type ApiError = (StatusCode, Json<Value>);

fn internal_error(message: &str, details: &str) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": message,
            "details": details
        })),
    )
}

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
    pub translator: Arc<Translator>,
    pub policy: AggregationPolicy,
}

pub fn create_app(config: &Config) -> Router {
    let app_state = AppState {
        pipeline: Arc::new(build_consult_pipeline(config)),
        translator: Arc::new(Translator::new(
            config.source_lang.clone(),
            config.target_lang.clone(),
        )),
        policy: AggregationPolicy::FinalOutput,
    };
    build_router(app_state)
}

fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/consult", post(consult))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

async fn index() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn consult(
    State(state): State<AppState>,
    Json(patient): Json<PatientInput>,
) -> ApiResult<ConsultResponse> {
    let run_id = Uuid::new_v4().to_string();
    info!(run_id = %run_id, age = patient.age, "starting consultation");

    match run_consultation(&state.pipeline, &state.translator, state.policy, patient).await {
        Ok(run) => {
            info!(run_id = %run_id, "consultation succeeded");
            Ok(Json(ConsultResponse {
                run_id,
                result: run.translated_text,
                document_base64: download_payload(&run.document_bytes),
                filename: DOCUMENT_FILENAME.to_string(),
            }))
        }
        Err(e) => {
            error!(run_id = %run_id, "consultation failed: {e:#}");
            Err(internal_error("Consultation run failed", &e.to_string()))
        }
    }
}
