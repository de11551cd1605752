use axum::body::Bytes;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

use miner_core::{
    spin_once, BlockSequence, ColumnOutcome, DigEvent, EngineParams, SpinOutcome, ThreadRandom, ToolTier,
};
use miner_shared::{
    ApiError, ApiResult, BlockInfo, BoardResponse, ColumnResult, DigStep, ErrorBody, SpinRequest, SpinResponse,
    ToolInfo,
};

use crate::session::{resolve_session, ScoreStore};

const INDEX_TEMPLATE: &str = include_str!("../static/index.html");

pub struct AppState {
    pub params: EngineParams,
    pub scores: Arc<dyn ScoreStore>,
}

impl AppState {
    pub fn new(params: EngineParams, scores: Arc<dyn ScoreStore>) -> Self {
        Self { params, scores }
    }
}

/// Local wrapper so `ApiError` can become an HTTP response.
#[derive(Debug)]
pub struct AppError(pub ApiError);

impl From<ApiError> for AppError {
    fn from(e: ApiError) -> Self {
        Self(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            ApiError::Invalid(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorBody {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

fn block_infos(blocks: &BlockSequence) -> Vec<BlockInfo> {
    blocks
        .iter()
        .map(|b| BlockInfo {
            id: b.kind.id().to_string(),
            name: b.kind.name().to_string(),
            hardness: b.hardness,
            reward: b.reward,
        })
        .collect()
}

fn tool_infos() -> Vec<ToolInfo> {
    ToolTier::ALL
        .iter()
        .map(|t| ToolInfo {
            tag: t.tag().to_string(),
            label: t.label(),
            power: t.base_power(),
        })
        .collect()
}

fn board(state: &AppState, total_score: u64) -> BoardResponse {
    BoardResponse {
        total_score,
        reels_rows: state.params.grid.rows(),
        reels_cols: state.params.grid.cols(),
        blocks: block_infos(&state.params.blocks),
        tools: tool_infos(),
    }
}

fn to_json<T: serde::Serialize>(what: &str, value: &T) -> ApiResult<String> {
    serde_json::to_string(value).map_err(|e| {
        error!("failed to encode {what}: {e}");
        ApiError::Internal
    })
}

pub fn render_index(board: &BoardResponse) -> ApiResult<String> {
    let blocks_json = to_json("blocks", &board.blocks)?;
    let tools_json = to_json("tools", &board.tools)?;
    Ok(INDEX_TEMPLATE
        .replace("{{ total_score }}", &board.total_score.to_string())
        .replace("{{ reels_rows }}", &board.reels_rows.to_string())
        .replace("{{ reels_cols }}", &board.reels_cols.to_string())
        .replace("{{ blocks_json }}", &blocks_json)
        .replace("{{ tools_json }}", &tools_json))
}

fn dig_step(event: &DigEvent) -> DigStep {
    match *event {
        DigEvent::Break { block, power_left } => DigStep::Break { block, power_left },
        DigEvent::Chest { block, multiplier } => DigStep::Chest { block, multiplier },
        DigEvent::Stall { block, power_left } => DigStep::Stall { block, power_left },
    }
}

fn column_result(c: &ColumnOutcome) -> ColumnResult {
    ColumnResult {
        base_pickaxe: c.base_tier.tag().to_string(),
        final_power: c.final_power,
        depth_reached: c.depth,
        broke_chest: c.chest_reached,
        chest_mult: c.chest_multiplier,
        raw_reward: c.raw_reward,
        final_reward: c.final_reward,
        events: c.events.iter().map(dig_step).collect(),
    }
}

pub fn spin_response(outcome: &SpinOutcome, total_score: u64) -> SpinResponse {
    SpinResponse {
        reels: outcome.grid.tags(),
        results: outcome.columns.iter().map(column_result).collect(),
        gain: outcome.gain,
        total_score,
    }
}

fn parse_spin_request(body: &[u8]) -> ApiResult<SpinRequest> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(SpinRequest::default());
    }
    serde_json::from_slice(body).map_err(|e| ApiError::Invalid(e.to_string()))
}

async fn route_index(State(state): State<Arc<AppState>>, jar: CookieJar) -> Result<(CookieJar, Html<String>), AppError> {
    let (jar, session, fresh) = resolve_session(jar);
    if fresh {
        debug!(%session, "new session");
    }
    let total = state.scores.get(&session);
    let page = render_index(&board(&state, total))?;
    Ok((jar, Html(page)))
}

async fn route_board(State(state): State<Arc<AppState>>, jar: CookieJar) -> (CookieJar, Json<BoardResponse>) {
    let (jar, session, fresh) = resolve_session(jar);
    if fresh {
        debug!(%session, "new session");
    }
    let total = state.scores.get(&session);
    (jar, Json(board(&state, total)))
}

async fn route_spin(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    body: Bytes,
) -> Result<(CookieJar, Json<SpinResponse>), AppError> {
    let _req = parse_spin_request(&body)?;
    let (jar, session, fresh) = resolve_session(jar);
    if fresh {
        debug!(%session, "new session");
    }

    let outcome = spin_once(&mut ThreadRandom, &state.params);
    let total = state.scores.increment(&session, outcome.gain);
    info!(%session, gain = outcome.gain, total, "spin");

    Ok((jar, Json(spin_response(&outcome, total))))
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(route_index))
        .route("/board", get(route_board))
        .route("/spin", post(route_spin))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
