use anyhow::Result;
use axum::{extract::{Path, Query, State}, http::StatusCode, routing::get, Json, Router};
use qa_core::{Corpus, QaEngine, RankConfig, ScoredFile, ScoredSentence};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

const MAX_MATCHES: usize = 100;

#[derive(Deserialize)]
pub struct AskParams {
    pub q: String,
    pub files: Option<usize>,
    pub sentences: Option<usize>,
}

#[derive(Serialize)]
pub struct AskResponse {
    pub query: String,
    pub took_s: f64,
    pub files: Vec<ScoredFile>,
    pub answers: Vec<ScoredSentence>,
}

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<QaEngine>,
}

/// Load the corpus under `corpus_dir` once and build the router around it.
pub fn build_app(corpus_dir: &str, config: RankConfig) -> Result<Router> {
    let corpus = Corpus::load(corpus_dir)?;
    Ok(router(QaEngine::new(corpus, config)?))
}

pub fn router(engine: QaEngine) -> Router {
    let app_state = AppState { engine: Arc::new(engine) };

    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/ask", get(ask_handler))
        .route("/doc/:id", get(doc_handler))
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn ask_handler(
    State(state): State<AppState>,
    Query(params): Query<AskParams>,
) -> Result<Json<AskResponse>, (StatusCode, String)> {
    let start = std::time::Instant::now();
    let config = state.engine.config();
    let files = params.files.unwrap_or(config.file_matches).clamp(1, MAX_MATCHES);
    let sentences = params.sentences.unwrap_or(config.sentence_matches).clamp(1, MAX_MATCHES);

    let answer = state
        .engine
        .answer_with(&params.q, files, sentences)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    let elapsed = start.elapsed();
    tracing::debug!(query = %params.q, answers = answer.sentences.len(), took_s = elapsed.as_secs_f64(), "answered");
    Ok(Json(AskResponse { query: params.q, took_s: elapsed.as_secs_f64(), files: answer.files, answers: answer.sentences }))
}

pub async fn doc_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> (StatusCode, Json<serde_json::Value>) {
    match state.engine.corpus().get(&id) {
        Some(text) => (StatusCode::OK, Json(serde_json::json!({ "id": id, "text": text }))),
        None => (StatusCode::NOT_FOUND, Json(serde_json::json!({ "error": "not found" }))),
    }
}
