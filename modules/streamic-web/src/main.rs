use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderValue},
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use serde::Deserialize;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use streamic_common::Config;
use streamic_feed::FeedClient;
use streamic_web::pages;
use streamic_web::templates::Theme;

// --- App State ---

struct AppState {
    client: FeedClient,
    config: Config,
    theme: Theme,
}

// --- Main ---

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("streamic=info".parse()?))
        .init();

    let config = Config::from_env();

    let state = Arc::new(AppState {
        client: FeedClient::new(&config.feed_base_url),
        config: config.clone(),
        theme: Theme::default(),
    });

    let app = Router::new()
        .route("/", get(home_page))
        .route("/category/{key}", get(category_page))
        .with_state(state)
        // Rendered pages embed hourly feed data; never let an intermediary cache them
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::PRAGMA,
            HeaderValue::from_static("no-cache"),
        ))
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        );

    let addr = format!("{}:{}", config.web_host, config.web_port);
    info!("Streamic web server starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// --- Handlers ---

async fn home_page(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Html(pages::render_home(&state.client, &state.config, &state.theme).await)
}

#[derive(Deserialize)]
struct CategoryQuery {
    shown: Option<usize>,
}

async fn category_page(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
    Query(query): Query<CategoryQuery>,
) -> impl IntoResponse {
    Html(pages::render_category(&state.client, &state.config, &state.theme, &key, query.shown).await)
}
