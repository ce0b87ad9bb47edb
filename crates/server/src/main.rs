use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use server_api::{dashboard_summary, onboarding_rows, register_intern, ApiContext};
use shared::{
    error::{ApiError, ErrorCode},
    protocol::RegistrationForm,
};
use storage::{Registry, TabularSink};
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod pages;

use config::load_settings;

const MAX_FORM_BYTES: usize = 16 * 1024;

#[derive(Clone)]
struct AppState {
    api: ApiContext,
}

/// An [`ApiError`] rendered as an HTML page.
struct PageError(ApiError);

impl From<ApiError> for PageError {
    fn from(value: ApiError) -> Self {
        Self(value)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let (status, title) = match self.0.code {
            ErrorCode::Validation => (StatusCode::BAD_REQUEST, "Registration Incomplete"),
            ErrorCode::StorageNotFound | ErrorCode::Internal => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Registration Failed")
            }
        };
        (status, Html(pages::error_page(title, &self.0.message))).into_response()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = load_settings()?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let sink = TabularSink::new(&settings.interns_file);
    let created = sink.ensure_initialized().with_context(|| {
        format!(
            "failed to prepare interns table '{}'",
            settings.interns_file.display()
        )
    })?;
    info!(path = %sink.path().display(), created, "interns table ready");

    let api = ApiContext::new(Registry::seeded(), Arc::new(sink));
    let app = build_router(Arc::new(AppState { api }));

    let addr = settings.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "interns guide listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(%error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(dashboard))
        .route("/registration", get(registration_form).post(submit_registration))
        .route("/onboarding", get(onboarding))
        .route("/modules", get(|| async { Html(pages::modules()) }))
        .route("/schedule", get(|| async { Html(pages::schedule()) }))
        .route("/resources", get(|| async { Html(pages::resources()) }))
        .route("/assessments", get(|| async { Html(pages::assessments()) }))
        .route("/contact", get(|| async { Html(pages::contact()) }))
        .route("/healthz", get(healthz))
        .fallback(not_found)
        .layer(RequestBodyLimitLayer::new(MAX_FORM_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn dashboard(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(pages::dashboard(dashboard_summary(&state.api)))
}

async fn registration_form() -> Html<String> {
    Html(pages::registration_form())
}

async fn submit_registration(
    State(state): State<Arc<AppState>>,
    Form(form): Form<RegistrationForm>,
) -> Result<Redirect, PageError> {
    register_intern(&state.api, form).await?;
    Ok(Redirect::to("/"))
}

async fn onboarding(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(pages::onboarding(&onboarding_rows(&state.api)))
}

async fn not_found(uri: Uri) -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html(pages::not_found(uri.path())))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
