use std::sync::Arc;

use chrono::Utc;
use metrics::{counter, gauge};
use shuttle_axum::axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use uuid::Uuid;

use crate::age::age_between;
use crate::config::ScorerConfig;
use crate::error::AnalyzeError;
use crate::remote::build_analyzer;
use crate::result::{AnalysisResult, Sentiment};
use crate::score::matched_keywords;
use crate::session::Session;
use crate::view::ViewState;

#[derive(Clone)]
pub struct AppState {
    session: Arc<Session>,
}

impl AppState {
    pub fn new(cfg: &ScorerConfig) -> Self {
        Self {
            session: Arc::new(Session::new(build_analyzer(cfg))),
        }
    }

    pub fn from_env() -> Self {
        Self::new(&ScorerConfig::load_default())
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/analyze", post(analyze))
        .route("/results", get(results))
        .route("/view", get(view))
        .route("/view/select", post(view_select))
        .route("/view/close", post(view_close))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(serde::Deserialize)]
struct AnalyzeReq {
    text: String,
}

#[derive(serde::Serialize)]
struct ResultOut {
    id: Uuid,
    text: String,
    sentiment: Sentiment,
    score: i32,
    created_at: chrono::DateTime<Utc>,
    /// Coarse relative age ("now", "5m", "2h") at response time.
    age: String,
    /// Rule keywords found in the text; explanatory only.
    keywords: Vec<&'static str>,
}

impl ResultOut {
    fn from_result(r: &AnalysisResult) -> Self {
        Self {
            id: r.id,
            sentiment: r.sentiment(),
            score: r.score,
            created_at: r.created_at,
            age: age_between(r.created_at, Utc::now()).to_string(),
            keywords: matched_keywords(&r.text),
            text: r.text.clone(),
        }
    }
}

#[derive(serde::Serialize)]
struct ErrorOut {
    error: String,
}

fn error_response(err: &AnalyzeError) -> (StatusCode, Json<ErrorOut>) {
    let status = match err {
        AnalyzeError::EmptyInput => StatusCode::BAD_REQUEST,
        AnalyzeError::Transport { .. } => StatusCode::BAD_GATEWAY,
    };
    (
        status,
        Json(ErrorOut {
            error: err.to_string(),
        }),
    )
}

async fn analyze(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeReq>,
) -> Result<Json<ResultOut>, (StatusCode, Json<ErrorOut>)> {
    counter!("analyze_requests_total").increment(1);

    match state.session.submit(&body.text).await {
        Ok(result) => {
            gauge!("feed_size").set(state.session.feed().len() as f64);
            info!(
                target: "api",
                id = %anon_hash(&body.text),
                score = result.score,
                sentiment = %result.sentiment(),
                "analyze ok"
            );
            Ok(Json(ResultOut::from_result(&result)))
        }
        Err(err) => {
            counter!("analyze_failures_total").increment(1);
            warn!(target: "api", id = %anon_hash(&body.text), error = ?err, "analyze failed");
            Err(error_response(&err))
        }
    }
}

async fn results(State(state): State<AppState>) -> Json<Vec<ResultOut>> {
    let rows = state.session.feed().all();
    Json(rows.iter().map(ResultOut::from_result).collect())
}

#[derive(serde::Serialize)]
struct ViewOut {
    mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    selected: Option<ResultOut>,
}

fn view_out(state: &AppState) -> ViewOut {
    match state.session.view() {
        ViewState::Feed => ViewOut {
            mode: "feed",
            selected: None,
        },
        ViewState::Split { selected } => ViewOut {
            mode: "split",
            selected: Some(ResultOut::from_result(&selected)),
        },
    }
}

async fn view(State(state): State<AppState>) -> Json<ViewOut> {
    Json(view_out(&state))
}

#[derive(serde::Deserialize)]
struct SelectReq {
    id: Uuid,
}

async fn view_select(
    State(state): State<AppState>,
    Json(body): Json<SelectReq>,
) -> Result<Json<ViewOut>, (StatusCode, Json<ErrorOut>)> {
    match state.session.select(body.id) {
        Some(_) => Ok(Json(view_out(&state))),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorOut {
                error: format!("no result with id {}", body.id),
            }),
        )),
    }
}

async fn view_close(State(state): State<AppState>) -> Json<ViewOut> {
    state.session.close();
    Json(view_out(&state))
}

/// Short stable hash so logs can correlate requests without ever carrying
/// the raw text.
fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anon_hash_is_short_and_stable() {
        let a = anon_hash("I love this");
        let b = anon_hash("I love this");
        assert_eq!(a, b);
        assert_eq!(a.len(), 12);
        assert_ne!(anon_hash("something else"), a);
    }
}
