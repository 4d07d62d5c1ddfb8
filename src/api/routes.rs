use axum::{
    body::Bytes,
    extract::State,
    http::{header, Method, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::api::models::{Page, SmushRequest};
use crate::api::statics::static_file;
use crate::compiler::compile;
use crate::config::SmushMode;
use crate::error::{AppError, Result};
use crate::fetcher::aggregate;
use crate::storage::{validate_artifact_name, write_artifact};
use crate::AppState;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler).post(index_handler))
        .route("/smush", post(smush_handler).fallback(smush_wrong_method))
        .route("/out/*path", get(static_file))
        .route("/css/*path", get(static_file))
        .route("/js/*path", get(static_file))
        .fallback(not_found)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

async fn index_handler(State(state): State<AppState>) -> Html<String> {
    let page = Page {
        title: "Index".to_string(),
        ..Page::default()
    };
    Html(state.templates.render_index(&page))
}

async fn smush_wrong_method(method: Method) -> AppError {
    log::warn!("Rejected {} to /smush", method);
    AppError::MethodNotAllowed("Must post from main Smush form".to_string())
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

async fn smush_handler(State(state): State<AppState>, uri: Uri, body: Bytes) -> Response {
    let start_time = std::time::Instant::now();
    let result = process_smush_request(&state, &uri, &body).await;
    log::debug!("Smush request took {:?}", start_time.elapsed());

    match result {
        Ok(response) => response,
        Err(err) => {
            if err.status().is_server_error() {
                log::error!("Smush failed: {}", err);
            } else {
                log::info!("Smush rejected: {}", err);
            }
            err.into_response()
        }
    }
}

async fn process_smush_request(state: &AppState, uri: &Uri, body: &[u8]) -> Result<Response> {
    let req = SmushRequest::parse(body, uri.query())?;
    log::info!("Smushing {} source(s) into {}", req.sources.len(), req.name);

    match state.config.mode {
        SmushMode::Concat => {
            let combined = aggregate(&state.client, &req.sources, state.config.fetch_concurrency).await;
            Ok((
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                combined,
            )
                .into_response())
        }
        SmushMode::Compile => {
            validate_artifact_name(&req.name)?;
            let compiled = compile(&state.client, &state.config.compiler_url, &req.sources).await?;
            let location = write_artifact(&state.config.output_dir(), &req.name, &compiled).await?;
            log::info!("Wrote {}", location);
            Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
        }
    }
}
