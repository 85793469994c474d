//! Development reverse proxy: forwards `/api/*` from the client's origin to the API service.

use axum::{
    Json, Router,
    body::{Body, to_bytes},
    extract::{Request, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::any,
};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::api::models::ErrorResponse;

const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

const HOP_BY_HOP: [header::HeaderName; 7] = [
    header::CONNECTION,
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

#[derive(Clone)]
struct ProxyState {
    client: reqwest::Client,
    target: String,
}

/// Router forwarding every method on `/api` and `/api/*` to `target`.
pub fn proxy_router(target: impl Into<String>) -> Router {
    let state = ProxyState {
        client: reqwest::Client::new(),
        target: target.into().trim_end_matches('/').to_string(),
    };
    Router::new()
        .route("/api", any(forward))
        .route("/api/{*path}", any(forward))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

fn strip_headers(headers: &HeaderMap, extra: &[header::HeaderName]) -> HeaderMap {
    let mut out = headers.clone();
    for name in HOP_BY_HOP.iter().chain(extra) {
        out.remove(name);
    }
    out.remove("keep-alive");
    out
}

fn bad_gateway(message: String) -> Response {
    (StatusCode::BAD_GATEWAY, Json(ErrorResponse { error: message })).into_response()
}

async fn forward(State(state): State<ProxyState>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let path_and_query = parts.uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/api");
    let url = format!("{}{}", state.target, path_and_query);

    let body = match to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            return (
                StatusCode::PAYLOAD_TOO_LARGE,
                Json(ErrorResponse {
                    error: format!("Request body rejected: {}", e),
                }),
            )
                .into_response();
        }
    };

    // Host is dropped so the upstream sees its own origin.
    let headers = strip_headers(&parts.headers, &[header::HOST, header::CONTENT_LENGTH]);
    let upstream = state
        .client
        .request(parts.method, &url)
        .headers(headers)
        .body(body)
        .send()
        .await;

    let upstream = match upstream {
        Ok(response) => response,
        Err(e) => {
            warn!(error = %e, url = %url, "upstream request failed");
            return bad_gateway(format!("Proxy error: {}", e));
        }
    };

    let status = upstream.status();
    let headers = strip_headers(upstream.headers(), &[header::CONTENT_LENGTH]);
    match upstream.bytes().await {
        Ok(bytes) => {
            let mut response = Response::new(Body::from(bytes));
            *response.status_mut() = status;
            *response.headers_mut() = headers;
            response
        }
        Err(e) => {
            warn!(error = %e, url = %url, "failed to read upstream body");
            bad_gateway(format!("Proxy error: {}", e))
        }
    }
}
