//! HTTP routes: thin request/response glue over [`BackendHandle`].
//!
//! Payload shapes follow the mini-app API: every response carries a
//! `success` flag, and player ids may arrive as JSON numbers or strings.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use arrows_core::{
    Cosmetic, CosmeticId, LoginRequest, PlayerId, PlayerProfile, RankedEntry, ScoreSubmission,
    StatsSnapshot,
};
use arrows_runtime::{BackendHandle, RuntimeError};

pub fn router(handle: BackendHandle) -> Router {
    Router::new()
        .route("/api/get_user", post(get_user))
        .route("/api/update_score", post(update_score))
        .route("/api/select_cosmetic", post(select_cosmetic))
        .route("/api/leaderboard", get(leaderboard))
        .route("/api/stats", get(stats))
        .route("/api/shop", get(shop))
        .route("/api/health", get(health))
        .with_state(handle)
}

/// Player ids arrive from the mini-app as either numbers or strings.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
enum UserId {
    Number(u64),
    Text(String),
}

impl From<UserId> for PlayerId {
    fn from(id: UserId) -> Self {
        match id {
            UserId::Number(n) => PlayerId::new(n.to_string()),
            UserId::Text(s) => PlayerId::new(s),
        }
    }
}

fn player_id(id: Option<UserId>) -> PlayerId {
    // A missing id becomes the empty id, rejected by the core as
    // MissingIdentity so the client sees a 400 rather than a parse error.
    id.map(Into::into).unwrap_or_default()
}

#[derive(Debug, Deserialize)]
struct GetUserBody {
    user_id: Option<UserId>,
    username: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
}

#[derive(Serialize)]
struct UserResponse {
    success: bool,
    user: PlayerProfile,
}

async fn get_user(
    State(handle): State<BackendHandle>,
    Json(body): Json<GetUserBody>,
) -> Result<Json<UserResponse>, ApiError> {
    let request = LoginRequest {
        player_id: player_id(body.user_id),
        handle: body.username,
        given_name: body.first_name,
        family_name: body.last_name,
    };
    let user = handle.login(request).await?;
    Ok(Json(UserResponse {
        success: true,
        user,
    }))
}

#[derive(Debug, Deserialize)]
struct UpdateScoreBody {
    user_id: Option<UserId>,
    username: Option<String>,
    #[serde(default = "default_level")]
    level: u32,
    #[serde(default = "default_coins_earned")]
    coins_earned: u64,
}

fn default_level() -> u32 {
    1
}

fn default_coins_earned() -> u64 {
    20
}

#[derive(Serialize)]
struct UpdateScoreResponse {
    success: bool,
    coins: u64,
    level: u32,
    username: String,
}

async fn update_score(
    State(handle): State<BackendHandle>,
    Json(body): Json<UpdateScoreBody>,
) -> Result<Json<UpdateScoreResponse>, ApiError> {
    let submission = ScoreSubmission {
        player_id: player_id(body.user_id),
        display_name: body.username,
        level: body.level,
        coins_earned: body.coins_earned,
    };
    let outcome = handle.submit_score(submission).await?;
    Ok(Json(UpdateScoreResponse {
        success: true,
        coins: outcome.coins,
        level: outcome.best_level,
        username: outcome.display_name,
    }))
}

#[derive(Debug, Deserialize)]
struct SelectCosmeticBody {
    user_id: Option<UserId>,
    cosmetic: String,
}

async fn select_cosmetic(
    State(handle): State<BackendHandle>,
    Json(body): Json<SelectCosmeticBody>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = handle
        .select_cosmetic(player_id(body.user_id), CosmeticId::new(body.cosmetic))
        .await?;
    Ok(Json(UserResponse {
        success: true,
        user,
    }))
}

#[derive(Debug, Deserialize)]
struct LeaderboardQuery {
    #[serde(default = "default_limit")]
    limit: usize,
}

fn default_limit() -> usize {
    50
}

#[derive(Serialize)]
struct LeaderboardResponse {
    success: bool,
    leaderboard: Vec<RankedEntry>,
    total_players: usize,
}

async fn leaderboard(
    State(handle): State<BackendHandle>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<LeaderboardResponse>, ApiError> {
    let page = handle.leaderboard(query.limit).await?;
    Ok(Json(LeaderboardResponse {
        success: true,
        leaderboard: page.entries,
        total_players: page.total_players,
    }))
}

#[derive(Serialize)]
struct StatsResponse {
    success: bool,
    stats: StatsSnapshot,
}

async fn stats(State(handle): State<BackendHandle>) -> Result<Json<StatsResponse>, ApiError> {
    let stats = handle.stats().await?;
    Ok(Json(StatsResponse {
        success: true,
        stats,
    }))
}

#[derive(Serialize)]
struct ShopResponse {
    success: bool,
    arrow_skins: Vec<Cosmetic>,
}

async fn shop(State(handle): State<BackendHandle>) -> Result<Json<ShopResponse>, ApiError> {
    let arrow_skins = handle.catalog().await?;
    Ok(Json(ShopResponse {
        success: true,
        arrow_skins,
    }))
}

#[derive(Serialize)]
struct HealthResponse {
    success: bool,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        success: true,
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Maps backend errors onto HTTP responses with the `success` envelope.
struct ApiError(RuntimeError);

impl From<RuntimeError> for ApiError {
    fn from(error: RuntimeError) -> Self {
        Self(error)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            tracing::error!(error = %self.0, "request failed");
            StatusCode::INTERNAL_SERVER_ERROR
        };
        let body = ErrorBody {
            success: false,
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
