use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::{HeaderValue, StatusCode},
    routing::get,
    Json, Router,
};
use guide_search_core::{
    highlight, highlighted_excerpt, DocId, MatchMode, SearchEngine, SearchOptions, DEFAULT_EXCERPT_LEN, DEFAULT_LIMIT,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub const MAX_K: usize = 100;

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default = "default_k")]
    pub k: usize,
    pub mode: Option<MatchMode>,
}
fn default_k() -> usize { DEFAULT_LIMIT }

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<SearchResult>,
}

#[derive(Serialize)]
pub struct SearchResult {
    pub doc_id: DocId,
    pub score: f32,
    /// Title with query occurrences wrapped in `<mark>`.
    pub title: String,
    pub url: String,
    pub category: String,
    pub excerpt: String,
}

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<SearchEngine>,
}

pub fn build_app(engine: SearchEngine) -> Result<Router> {
    let app_state = AppState { engine: Arc::new(engine) };

    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<HeaderValue> = val
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .filter_map(|s| HeaderValue::from_str(s).ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/doc/:doc_id", get(doc_handler))
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());
    Ok(app)
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Json<SearchResponse> {
    let start = std::time::Instant::now();
    let engine = &state.engine;
    let query = params.q.trim().to_string();
    let opts = SearchOptions { mode: params.mode.unwrap_or(engine.config().mode), limit: usize::MAX };

    // too-short queries come back as an empty list from the engine
    let hits = engine.search_with(&query, &opts);
    let total_hits = hits.len();
    let k = params.k.clamp(1, MAX_K);

    let results: Vec<SearchResult> = hits
        .into_iter()
        .take(k)
        .filter_map(|hit| {
            let doc = engine.document(hit.doc_id)?;
            Some(SearchResult {
                doc_id: hit.doc_id,
                score: hit.score,
                title: highlight(&doc.title, &query),
                url: doc.url.clone(),
                category: doc.category.clone(),
                excerpt: highlighted_excerpt(&doc.content, &query, DEFAULT_EXCERPT_LEN),
            })
        })
        .collect();

    let elapsed = start.elapsed();
    tracing::debug!(query = %query, total_hits, "served search");
    Json(SearchResponse { query, took_s: elapsed.as_secs_f64(), total_hits, results })
}

pub async fn doc_handler(
    State(state): State<AppState>,
    Path(doc_id): Path<DocId>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    match state.engine.document(doc_id) {
        Some(doc) => Ok(Json(serde_json::json!(doc))),
        None => Err((StatusCode::NOT_FOUND, Json(serde_json::json!({ "error": "not found" })))),
    }
}
