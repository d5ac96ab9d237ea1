//! Board HTML Routes
//!
//! Home page, topic and post forms, and the single-post page.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use serde::Deserialize;

use super::flash::FlashQueue;
use super::views::{self, PostDraft};
use crate::board::{Board, BoardError};

// ==================
// Shared State
// ==================

/// State shared by the HTML and JSON handlers
#[derive(Debug)]
pub struct BoardState {
    pub board: Board,
    pub flashes: FlashQueue,
    /// Posts shown on the home page
    pub recent_posts: usize,
}

impl BoardState {
    pub fn new(board: Board, recent_posts: usize) -> Self {
        Self {
            board,
            flashes: FlashQueue::new(),
            recent_posts,
        }
    }
}

// ==================
// Form Types
// ==================

#[derive(Debug, Deserialize)]
pub struct TopicForm {
    #[serde(default)]
    pub topic: String,
}

#[derive(Debug, Deserialize)]
pub struct PostForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub content: String,
}

// ==================
// Board Routes
// ==================

/// Create the HTML routes
pub fn board_routes(state: Arc<BoardState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/add_topic", get(add_topic_form_handler).post(add_topic_handler))
        .route("/add_post", get(add_post_form_handler).post(add_post_handler))
        .route("/post/:id", get(view_post_handler))
        .with_state(state)
}

/// Fallback for unknown paths
pub async fn not_found_handler() -> Response {
    not_found()
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Html(views::not_found_page())).into_response()
}

fn status(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

// ==================
// Handlers
// ==================

async fn index_handler(State(state): State<Arc<BoardState>>) -> Html<String> {
    let posts = state.board.list_recent_posts(state.recent_posts);
    let topics = state.board.list_topics();
    let flashes = state.flashes.drain();

    Html(views::index_page(&posts, &topics, &flashes))
}

async fn add_topic_form_handler(State(state): State<Arc<BoardState>>) -> Html<String> {
    let topics = state.board.list_topics();
    let flashes = state.flashes.drain();

    Html(views::add_topic_page(&topics, &flashes))
}

async fn add_topic_handler(
    State(state): State<Arc<BoardState>>,
    Form(form): Form<TopicForm>,
) -> Response {
    match state.board.add_topic(&form.topic) {
        Ok(_) => {
            state
                .flashes
                .success(format!("Topic \"{}\" added successfully!", form.topic.trim()));
            Redirect::to("/").into_response()
        }
        Err(BoardError::SaveFailed(_)) => {
            state.flashes.error("Error saving topic. Please try again.");
            Redirect::to("/").into_response()
        }
        Err(e) => {
            for message in e.flash_messages() {
                state.flashes.error(message);
            }
            let topics = state.board.list_topics();
            let flashes = state.flashes.drain();

            (
                status(e.status_code()),
                Html(views::add_topic_page(&topics, &flashes)),
            )
                .into_response()
        }
    }
}

fn no_topics_redirect(state: &BoardState) -> Response {
    for message in BoardError::NoTopics.flash_messages() {
        state.flashes.warning(message);
    }
    Redirect::to("/add_topic").into_response()
}

async fn add_post_form_handler(State(state): State<Arc<BoardState>>) -> Response {
    let topics = state.board.list_topics();
    if topics.is_empty() {
        return no_topics_redirect(&state);
    }

    let flashes = state.flashes.drain();
    Html(views::add_post_page(&topics, &PostDraft::default(), &flashes)).into_response()
}

async fn add_post_handler(
    State(state): State<Arc<BoardState>>,
    Form(form): Form<PostForm>,
) -> Response {
    let topics = state.board.list_topics();
    if topics.is_empty() {
        return no_topics_redirect(&state);
    }

    let error = match state.board.create_post(&form.title, &form.topic, &form.content) {
        Ok(_) => {
            state.flashes.success("Post created successfully!");
            return Redirect::to("/").into_response();
        }
        Err(e) => e,
    };

    match &error {
        BoardError::SaveFailed(_) => state.flashes.error("Error saving post. Please try again."),
        other => {
            for message in other.flash_messages() {
                state.flashes.error(message);
            }
        }
    }

    let draft = PostDraft {
        title: form.title,
        topic: form.topic,
        content: form.content,
    };
    let flashes = state.flashes.drain();

    (
        status(error.status_code()),
        Html(views::add_post_page(&topics, &draft, &flashes)),
    )
        .into_response()
}

async fn view_post_handler(
    State(state): State<Arc<BoardState>>,
    Path(id): Path<String>,
) -> Response {
    // Non-numeric ids name no post
    let Ok(id) = id.parse::<u64>() else {
        return not_found();
    };

    match state.board.get_post(id) {
        Ok(post) => {
            let flashes = state.flashes.drain();
            Html(views::post_page(&post, &flashes)).into_response()
        }
        Err(_) => not_found(),
    }
}
