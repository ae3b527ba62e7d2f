//! Request routing
//!
//! Maps a method, URL and body onto the API handlers and turns the result
//! into a status code plus JSON body. Nothing here touches the socket, so
//! the whole HTTP surface can be exercised without binding a port.

use std::borrow::Cow;

use serde::{Serialize, de::DeserializeOwned};
use tiny_http::Method;
use url::form_urlencoded;

use crate::api::{self, ApiError, CreateTaskRequest, ErrorBody, ListQuery, UpdateTaskRequest};
use crate::storage::TaskStore;

/// Mount point of the task routes
pub const BASE_PATH: &str = "/api/todos";

/// Routed response: status code and JSON body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// HTTP status code
    pub status: u16,
    /// JSON body (`Null` for 204)
    pub body: serde_json::Value,
}

impl Reply {
    /// Serialize `data` as the body of a response with `status`
    #[must_use]
    pub fn json<T: Serialize>(status: u16, data: &T) -> Self {
        serde_json::to_value(data).map_or_else(
            |e| {
                log::error!("Failed to serialize response: {e}");
                Self::error(&ApiError::Internal("Internal server error".to_string()))
            },
            |body| Self { status, body },
        )
    }

    /// Error response carrying `{"error": message}`
    #[must_use]
    pub fn error(err: &ApiError) -> Self {
        Self {
            status: err.status_code(),
            body: serde_json::to_value(ErrorBody::from(err)).unwrap_or_default(),
        }
    }

    /// Empty 204 response
    #[must_use]
    pub const fn no_content() -> Self {
        Self {
            status: 204,
            body: serde_json::Value::Null,
        }
    }
}

// =============================================================================
// ROUTING
// =============================================================================

/// Route a request to its handler
///
/// `url` is the request target including any query string; `body` is the raw
/// request body (empty when there is none).
pub fn route(store: &dyn TaskStore, method: &Method, url: &str, body: &str) -> Reply {
    if *method == Method::Options {
        return Reply::no_content();
    }
    dispatch(store, method, url, body).unwrap_or_else(|e| Reply::error(&e))
}

fn dispatch(
    store: &dyn TaskStore,
    method: &Method,
    url: &str,
    body: &str,
) -> Result<Reply, ApiError> {
    let (path, query) = url.split_once('?').unwrap_or((url, ""));

    let Some(rest) = path.strip_prefix(BASE_PATH) else {
        return Err(unknown_route());
    };
    let rest = rest.strip_suffix('/').unwrap_or(rest);

    match (method, rest) {
        // POST / - create task
        (&Method::Post, "") => {
            let req: CreateTaskRequest = parse_body(body)?;
            Ok(Reply::json(201, &api::create_task(store, &req)?))
        },

        // GET / and GET /filter - list with optional status
        (&Method::Get, "") => Ok(Reply::json(200, &api::list_tasks(store, &list_query(query))?)),
        (&Method::Get, "/filter") => {
            Ok(Reply::json(200, &api::filter_tasks(store, &list_query(query))?))
        },

        // PUT /{id} - update task
        (&Method::Put, _) => {
            let id = task_id(rest).ok_or_else(unknown_route)?;
            let req: UpdateTaskRequest = parse_body(body)?;
            Ok(Reply::json(200, &api::update_task(store, &id, &req)?))
        },

        // DELETE /{id} - delete task
        (&Method::Delete, _) => {
            let id = task_id(rest).ok_or_else(unknown_route)?;
            Ok(Reply::json(200, &api::delete_task(store, &id)?))
        },

        _ => Err(unknown_route()),
    }
}

fn unknown_route() -> ApiError {
    ApiError::NotFound("Not found".to_string())
}

/// Extract `{id}` from `/{id}`, rejecting nested paths
fn task_id(rest: &str) -> Option<String> {
    let id = rest.strip_prefix('/')?;
    if id.is_empty() || id.contains('/') {
        return None;
    }
    urlencoding::decode(id).ok().map(Cow::into_owned)
}

fn list_query(query: &str) -> ListQuery {
    ListQuery {
        status: form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == "status")
            .map(|(_, value)| value.into_owned()),
    }
}

// =============================================================================
// BODY PARSING
// =============================================================================

/// Parse a JSON body; an empty body counts as `{}`
fn parse_body<T: DeserializeOwned + Default>(body: &str) -> Result<T, ApiError> {
    if body.trim().is_empty() {
        return Ok(T::default());
    }
    serde_json::from_str(body).map_err(|e| {
        log::debug!("Rejected request body: {e}");
        ApiError::BadRequest("Invalid JSON body".to_string())
    })
}
