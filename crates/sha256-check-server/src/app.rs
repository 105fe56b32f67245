//! Router and handlers.
//!
//! Hashing is blocking filesystem work, so each lookup runs on the blocking
//! pool. Responses are `{"sha256sum": ..}` or `{"error": ..}`.

use axum::extract::{Query, Request};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use sha256_check_core::error::GENERIC_SERVER_MESSAGE;
use sha256_check_core::{Checksum, Checksummer, ErrorClass, HostProfile, LookupError};
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinError;

/// Raw query pairs in request order. Repeated keys are kept, so extraction
/// never rejects a well-formed query string.
type QueryPairs = Query<Vec<(String, String)>>;

/// First value of `key`, or empty if absent.
fn first_value(pairs: Vec<(String, String)>, key: &str) -> String {
    pairs
        .into_iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v)
        .unwrap_or_default()
}

#[derive(Debug, Serialize)]
struct ChecksumBody {
    sha256sum: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
}

/// Builds the router: `GET /<name>?file=` for every profile and
/// `GET /<name>/<subdir>?id=` for profiles with container access.
pub fn router(profiles: Vec<HostProfile>, sums: Checksummer) -> Router {
    let mut app = Router::new();

    for profile in profiles {
        let profile = Arc::new(profile);

        if let Some(route) = profile.container_route() {
            let (p, s) = (Arc::clone(&profile), sums.clone());
            app = app.route(
                &route,
                get(move |Query(q): QueryPairs| container(p, s, first_value(q, "id"))),
            );
        }

        let (p, s) = (Arc::clone(&profile), sums.clone());
        app = app.route(
            &profile.route(),
            get(move |Query(q): QueryPairs| named_file(p, s, first_value(q, "file"))),
        );
    }

    app.layer(middleware::from_fn(trace_request))
}

async fn named_file(profile: Arc<HostProfile>, sums: Checksummer, file: String) -> Response {
    let worker = sums.clone();
    let joined = tokio::task::spawn_blocking(move || worker.named_file(&profile, &file)).await;
    respond(&sums, joined)
}

async fn container(profile: Arc<HostProfile>, sums: Checksummer, id: String) -> Response {
    let worker = sums.clone();
    let joined = tokio::task::spawn_blocking(move || worker.container(&profile, &id)).await;
    respond(&sums, joined)
}

fn respond(sums: &Checksummer, joined: Result<Result<Checksum, LookupError>, JoinError>) -> Response {
    match joined {
        Ok(Ok(sum)) => (
            StatusCode::OK,
            Json(ChecksumBody {
                sha256sum: sum.sha256,
            }),
        )
            .into_response(),
        Ok(Err(e)) => {
            let status = match e.class() {
                ErrorClass::Client => StatusCode::BAD_REQUEST,
                ErrorClass::Server => StatusCode::INTERNAL_SERVER_ERROR,
            };
            error_response(status, e.public_message())
        }
        Err(e) => {
            tracing::error!("lookup task failed: {}", e);
            sums.record(&format!("lookup task failed: {e}"));
            error_response(StatusCode::INTERNAL_SERVER_ERROR, GENERIC_SERVER_MESSAGE)
        }
    }
}

fn error_response(status: StatusCode, error: &'static str) -> Response {
    (status, Json(ErrorBody { error })).into_response()
}

/// One info line per request: method, path, status, latency.
async fn trace_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let started = Instant::now();

    let resp = next.run(req).await;

    tracing::info!(
        %method,
        %path,
        status = resp.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "request"
    );
    resp
}
