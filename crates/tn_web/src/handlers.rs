use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use tn_core::Article;
use tracing::info;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct NewsResponse {
    pub news: Vec<Article>,
}

pub async fn status() -> Json<StatusResponse> {
    Json(StatusResponse {
        message: "Backend is running!",
    })
}

/// Always answers 200: upstream failures only shrink the list.
pub async fn get_news(
    State(state): State<Arc<AppState>>,
    Path(topic): Path<String>,
) -> Json<NewsResponse> {
    info!(topic = %topic, "news requested");
    let news = state.aggregator.get_news(&topic).await;
    Json(NewsResponse { news })
}
