//! Board JSON API
//!
//! Same operations as the HTML pages, for scripted clients.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::board_routes::BoardState;
use crate::board::{BoardError, Post};

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Serialize)]
pub struct TopicsResponse {
    pub topics: Vec<String>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct PostsResponse {
    pub posts: Vec<Post>,
    pub total: usize,
}

#[derive(Debug, Deserialize)]
pub struct CreateTopicRequest {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct ListPostsQuery {
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(e: BoardError) -> ApiError {
    let code = e.status_code();
    let details: Vec<String> = match &e {
        BoardError::InvalidPost(errors) => errors.iter().map(|f| f.as_str().to_string()).collect(),
        _ => Vec::new(),
    };

    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(ErrorResponse {
            error: e.to_string(),
            code,
            details,
        }),
    )
}

// ==================
// API Routes
// ==================

/// Create the JSON API routes
pub fn api_routes(state: Arc<BoardState>) -> Router {
    Router::new()
        .route("/topics", get(list_topics_handler).post(create_topic_handler))
        .route("/posts", get(list_posts_handler).post(create_post_handler))
        .route("/posts/:id", get(get_post_handler))
        .with_state(state)
}

// ==================
// Handlers
// ==================

async fn list_topics_handler(State(state): State<Arc<BoardState>>) -> Json<TopicsResponse> {
    let topics = state.board.list_topics();
    Json(TopicsResponse {
        total: topics.len(),
        topics,
    })
}

async fn create_topic_handler(
    State(state): State<Arc<BoardState>>,
    Json(request): Json<CreateTopicRequest>,
) -> Result<(StatusCode, Json<TopicsResponse>), ApiError> {
    let topics = state.board.add_topic(&request.name).map_err(api_error)?;

    Ok((
        StatusCode::CREATED,
        Json(TopicsResponse {
            total: topics.len(),
            topics,
        }),
    ))
}

/// Without `limit`, every post is returned
async fn list_posts_handler(
    State(state): State<Arc<BoardState>>,
    Query(query): Query<ListPostsQuery>,
) -> Json<PostsResponse> {
    let posts = match query.limit {
        Some(limit) => state.board.list_recent_posts(limit),
        None => state.board.list_posts(),
    };

    Json(PostsResponse {
        total: posts.len(),
        posts,
    })
}

async fn create_post_handler(
    State(state): State<Arc<BoardState>>,
    Json(request): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<Post>), ApiError> {
    let post = state
        .board
        .create_post(&request.title, &request.topic, &request.content)
        .map_err(api_error)?;

    Ok((StatusCode::CREATED, Json(post)))
}

async fn get_post_handler(
    State(state): State<Arc<BoardState>>,
    Path(id): Path<String>,
) -> Result<Json<Post>, ApiError> {
    let Ok(id) = id.parse::<u64>() else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Post not found: {}", id),
                code: 404,
                details: Vec::new(),
            }),
        ));
    };

    state.board.get_post(id).map(Json).map_err(api_error)
}
