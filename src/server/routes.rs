//! HTTP API routes
//!
//! Defines all REST API endpoints for the server.

use crate::cluster::{cluster, ClusterParams, ClusterResponse};
use crate::demo::generate_demo_posts;
use crate::error::Error;
use crate::filter::{apply_filter, PostFilter};
use crate::format::{available_formats, FormatInfo};
use crate::geo::{Coordinates, MapRect, Viewport};
use crate::post::{Mood, Post, Topic};
use crate::server::state::AppState;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/cluster", post(cluster_handler))
        .route("/api/demo", post(demo_handler))
        .route("/api/topics", get(topics_handler))
        .route("/api/moods", get(moods_handler))
        .route("/api/formats", get(formats_handler))
        .route("/api/status", get(status_handler))
        .with_state(state)
}

/// Viewport in a request body
///
/// Either projected map units or a lat/lng bounding box.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ViewportSpec {
    Projected(MapRect),
    Bounds {
        south: f64,
        west: f64,
        north: f64,
        east: f64,
    },
}

impl ViewportSpec {
    fn resolve(&self) -> Result<Viewport, Error> {
        let viewport = match *self {
            Self::Projected(rect) => rect,
            Self::Bounds {
                south,
                west,
                north,
                east,
            } => MapRect::from_bounds(
                Coordinates::new(south, west),
                Coordinates::new(north, east),
            )?,
        };
        viewport.validate()?;
        Ok(viewport)
    }
}

/// Cluster request body
#[derive(Debug, Deserialize)]
pub struct ClusterRequest {
    pub viewport: ViewportSpec,
    /// All known posts; filtering happens server-side
    #[serde(default)]
    pub posts: Vec<Post>,
    #[serde(default)]
    pub filter: PostFilter,
    /// Attach the cell grid overlay
    #[serde(default)]
    pub include_cells: bool,
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::BAD_REQUEST, Json(self)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::InvalidCoordinates(_) => "INVALID_COORDINATES",
            Error::InvalidViewport(_) => "INVALID_VIEWPORT",
            Error::InvalidParams(_) => "INVALID_PARAMS",
            Error::Config(_) => "CONFIG_ERROR",
            _ => "INTERNAL_ERROR",
        };
        ApiError {
            error: err.to_string(),
            code: code.to_string(),
        }
    }
}

/// Cluster posts for a viewport
///
/// POST /api/cluster
async fn cluster_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ClusterRequest>,
) -> Result<Json<ClusterResponse>, ApiError> {
    let viewport = req.viewport.resolve()?;
    let engine = state.engine().await?;
    let outcome = apply_filter(&req.posts, &req.filter);
    debug!(
        "Cluster request - posts={}, filtered={}",
        req.posts.len(),
        outcome.posts.len()
    );

    let include_cells = req.include_cells;
    let response = tokio::task::spawn_blocking(move || {
        cluster(&engine, viewport, &outcome.posts, include_cells)
    })
    .await
    .map_err(|e| Error::Server(format!("Clustering task failed: {}", e)))??;

    Ok(Json(response))
}

/// Demo request body
#[derive(Debug, Deserialize)]
pub struct DemoRequest {
    pub viewport: ViewportSpec,
    /// Posts already on the map
    #[serde(default)]
    pub posts: Vec<Post>,
    /// Seed for reproducible output
    pub seed: Option<u64>,
    /// Viewport width per post (defaults to the configured spacing)
    pub spacing: Option<f64>,
}

/// Demo response: the input posts followed by the generated ones
#[derive(Debug, Serialize, Deserialize)]
pub struct DemoResponse {
    pub posts: Vec<Post>,
    pub generated: usize,
}

/// Top up a viewport with demo posts
///
/// POST /api/demo
async fn demo_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DemoRequest>,
) -> Result<Json<DemoResponse>, ApiError> {
    let viewport = req.viewport.resolve()?;
    let spacing = match req.spacing {
        Some(spacing) => spacing,
        None => state.demo_spacing().await,
    };

    let mut rng = match req.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let generated = generate_demo_posts(&viewport, &req.posts, spacing, &mut rng)?;

    let count = generated.len();
    let mut posts = req.posts;
    posts.extend(generated);

    Ok(Json(DemoResponse {
        posts,
        generated: count,
    }))
}

/// Topic query parameters
#[derive(Debug, Default, Deserialize)]
pub struct TopicsQuery {
    pub mood: Option<String>,
    pub search: Option<String>,
}

/// Topic catalog entry
#[derive(Debug, Serialize, Deserialize)]
pub struct TopicInfo {
    pub name: String,
    pub mood: String,
    pub emoji: String,
    pub title: String,
}

impl From<Topic> for TopicInfo {
    fn from(topic: Topic) -> Self {
        Self {
            name: topic.to_string(),
            mood: topic.mood().to_string(),
            emoji: topic.emoji().to_string(),
            title: topic.title().to_string(),
        }
    }
}

/// Topics list response
#[derive(Debug, Serialize, Deserialize)]
pub struct TopicsResponse {
    pub topics: Vec<TopicInfo>,
}

/// List topics offered under a mood and search text
///
/// GET /api/topics
async fn topics_handler(
    Query(query): Query<TopicsQuery>,
) -> Result<Json<TopicsResponse>, ApiError> {
    let mut filter = PostFilter::default();
    if let Some(mood) = query.mood.as_deref().filter(|m| !m.is_empty()) {
        filter = filter.with_mood(Mood::from_str(mood).map_err(Error::InvalidParams)?);
    }
    if let Some(search) = query.search {
        filter = filter.with_search(search);
    }

    let topics = filter
        .visible_topics()
        .into_iter()
        .map(TopicInfo::from)
        .collect();

    Ok(Json(TopicsResponse { topics }))
}

/// Mood catalog entry
#[derive(Debug, Serialize, Deserialize)]
pub struct MoodInfo {
    pub name: String,
    pub emoji: String,
    pub title: String,
    pub topics: Vec<String>,
}

/// Moods list response
#[derive(Debug, Serialize, Deserialize)]
pub struct MoodsResponse {
    pub moods: Vec<MoodInfo>,
}

/// List moods with their topics
///
/// GET /api/moods
async fn moods_handler() -> Json<MoodsResponse> {
    let moods = Mood::ALL
        .iter()
        .map(|mood| MoodInfo {
            name: mood.to_string(),
            emoji: mood.emoji().to_string(),
            title: mood.title().to_string(),
            topics: mood.topics().iter().map(Topic::to_string).collect(),
        })
        .collect();

    Json(MoodsResponse { moods })
}

/// Formats list response
#[derive(Debug, Serialize, Deserialize)]
pub struct FormatsResponse {
    pub formats: Vec<FormatInfo>,
}

/// List available output formats
///
/// GET /api/formats
async fn formats_handler() -> Json<FormatsResponse> {
    Json(FormatsResponse {
        formats: available_formats(),
    })
}

/// Status response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Server is running
    pub running: bool,
    /// Server version
    pub version: String,
    /// Active clustering parameters
    pub cluster: ClusterParams,
    /// Uptime in seconds
    pub uptime_secs: u64,
}

/// Server status endpoint
///
/// GET /api/status
async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let cluster = state.config.read().await.cluster_params();

    Json(StatusResponse {
        running: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        cluster,
        uptime_secs: state.uptime_secs(),
    })
}
