//! `tiny_http` server adapter
//!
//! Handles socket binding, the worker pool, body reading and response
//! conversion. Routing itself lives in [`super::router`].

use std::io::Cursor;
use std::io::Read as _;
use std::sync::Arc;
use std::thread;

use tiny_http::{Header, Method, Request, Response, Server, StatusCode};

use super::AppState;
use super::router::{self, Reply};
use crate::api::ApiError;

/// Bind a listener on `addr` (e.g. `0.0.0.0:5000`)
pub fn bind(addr: &str) -> anyhow::Result<Server> {
    Server::http(addr).map_err(|e| anyhow::anyhow!("Failed to start server on {addr}: {e}"))
}

/// Serve requests on `server` with `workers` threads until the listener closes
pub fn serve(server: Server, state: &AppState, workers: usize) -> anyhow::Result<()> {
    let server = Arc::new(server);

    let handles = (0..workers.max(1))
        .map(|n| {
            let server = Arc::clone(&server);
            let state = state.clone();
            thread::Builder::new()
                .name(format!("todos-worker-{n}"))
                .spawn(move || worker_loop(&server, &state))
        })
        .collect::<Result<Vec<_>, _>>()?;

    for handle in handles {
        if handle.join().is_err() {
            log::error!("Request worker panicked");
        }
    }

    Ok(())
}

fn worker_loop(server: &Server, state: &AppState) {
    for mut request in server.incoming_requests() {
        let response = handle_request(state, &mut request);
        if let Err(e) = request.respond(response) {
            log::warn!("Failed to send response: {e}");
        }
    }
}

// =============================================================================
// REQUEST HANDLING
// =============================================================================

/// Handle one request and build its response
pub fn handle_request(state: &AppState, request: &mut Request) -> Response<Cursor<Vec<u8>>> {
    let method = request.method().clone();
    let url = request.url().to_string();
    let origin = header_value(request, "Origin");

    let body = if matches!(method, Method::Post | Method::Put) {
        read_body(request)
    } else {
        Ok(String::new())
    };
    let reply = body.map_or_else(
        |e| Reply::error(&e),
        |body| router::route(state.store.as_ref(), &method, &url, &body),
    );

    log::info!("{method} {url} -> {}", reply.status);

    let cors = state.cors.headers(origin.as_deref(), method == Method::Options);
    to_response(&reply, &cors)
}

fn header_value(request: &Request, name: &'static str) -> Option<String> {
    request
        .headers()
        .iter()
        .find(|h| h.field.equiv(name))
        .map(|h| h.value.as_str().to_string())
}

/// Read the whole request body as text
fn read_body(request: &mut Request) -> Result<String, ApiError> {
    let mut body = String::new();
    request.as_reader().read_to_string(&mut body).map_err(|e| {
        log::debug!("Failed to read request body: {e}");
        ApiError::BadRequest("Failed to read request body".to_string())
    })?;
    Ok(body)
}

// =============================================================================
// RESPONSE CONVERSION
// =============================================================================

/// Serialize a reply with its extra headers
fn to_response(reply: &Reply, extra: &[(&str, String)]) -> Response<Cursor<Vec<u8>>> {
    let data = if reply.status == 204 {
        Vec::new()
    } else {
        serde_json::to_vec(&reply.body)
            .unwrap_or_else(|_| br#"{"error":"Internal server error"}"#.to_vec())
    };

    let content_type = (reply.status != 204).then_some(("Content-Type", "application/json"));

    let mut response = Response::from_data(data).with_status_code(StatusCode(reply.status));
    let headers = content_type.into_iter().chain(extra.iter().map(|(n, v)| (*n, v.as_str())));
    for (name, value) in headers {
        if let Some(h) = header(name, value) {
            response.add_header(h);
        }
    }
    response
}

fn header(name: &str, value: &str) -> Option<Header> {
    Header::from_bytes(name.as_bytes(), value.as_bytes()).ok()
}
