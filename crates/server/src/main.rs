use std::{io::ErrorKind, net::SocketAddr, path::PathBuf, sync::Arc};

use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use client_core::{filter::SEARCH_INPUT_ID, sort_button_html, HtmlContainer, SortButtonLabel};
use shared::error::{ApiError, ErrorCode};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod config;

use config::load_settings;

#[derive(Clone)]
struct AppState {
    films_path: PathBuf,
    cache_control: HeaderValue,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let settings = load_settings();
    if !settings.films_path.exists() {
        warn!(
            path = %settings.films_path.display(),
            "dataset file not found; /films.json will answer 404 until it exists"
        );
    }

    let state = AppState {
        films_path: settings.films_path,
        cache_control: cache_control(settings.cache_max_age_seconds)?,
    };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "dataset host listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn cache_control(max_age_seconds: u64) -> anyhow::Result<HeaderValue> {
    Ok(HeaderValue::from_str(&format!(
        "public, max-age={max_age_seconds}"
    ))?)
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/healthz", get(healthz))
        .route("/films.json", get(films))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

fn page_shell() -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>Films</title>\n</head>\n<body>\n\
         <input id=\"{SEARCH_INPUT_ID}\" type=\"text\" placeholder=\"Search by title or director\">\n\
         {}{}</body>\n</html>\n",
        sort_button_html(SortButtonLabel::NextDescending),
        HtmlContainer::new().outer_html(),
    )
}

async fn index() -> Html<String> {
    Html(page_shell())
}

async fn films(State(state): State<Arc<AppState>>) -> Response {
    match tokio::fs::read(&state.films_path).await {
        Ok(body) => (
            [
                (
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("application/json"),
                ),
                (header::CACHE_CONTROL, state.cache_control.clone()),
            ],
            body,
        )
            .into_response(),
        Err(e) if e.kind() == ErrorKind::NotFound => (
            StatusCode::NOT_FOUND,
            Json(ApiError::new(ErrorCode::NotFound, "dataset not found")),
        )
            .into_response(),
        Err(e) => {
            error!(path = %state.films_path.display(), error = %e, "failed to read dataset");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError::new(ErrorCode::Internal, "failed to read dataset")),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
