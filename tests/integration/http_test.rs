//! End-to-end HTTP tests against a live `tiny_http` listener

use std::net::SocketAddr;
use std::sync::Arc;
use std::thread;

use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use serde_json::{Value, json};
use todos::server::{self, AppState, CorsPolicy};
use todos::storage::{JsonFileStore, MemoryStore, TaskStore};

/// Client bound to one running server
struct TodosClient {
    client: Client,
    base: String,
}

impl TodosClient {
    fn new(addr: SocketAddr) -> Self {
        Self {
            client: Client::new(),
            base: format!("http://{addr}"),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    fn create(&self, text: &str) -> Response {
        self.client.post(self.url("/api/todos")).json(&json!({ "text": text })).send().unwrap()
    }

    fn list(&self, query: &str) -> Response {
        self.client.get(self.url(&format!("/api/todos{query}"))).send().unwrap()
    }

    fn filter(&self, query: &str) -> Response {
        self.client.get(self.url(&format!("/api/todos/filter{query}"))).send().unwrap()
    }

    fn update(&self, id: &str, body: &Value) -> Response {
        self.client.put(self.url(&format!("/api/todos/{id}"))).json(body).send().unwrap()
    }

    fn delete(&self, id: &str) -> Response {
        self.client.delete(self.url(&format!("/api/todos/{id}"))).send().unwrap()
    }
}

/// Start a server over `store` on 127.0.0.1 with an OS-assigned port
fn start(store: Arc<dyn TaskStore>, cors: CorsPolicy) -> TodosClient {
    let listener = tiny_http::Server::http("127.0.0.1:0").unwrap();
    let addr = listener.server_addr().to_ip().unwrap();
    let state = AppState::new(store, cors);
    thread::spawn(move || {
        let _ = server::serve(listener, &state, 2);
    });
    TodosClient::new(addr)
}

fn start_memory() -> TodosClient {
    start(Arc::new(MemoryStore::new()), CorsPolicy::default())
}

fn header<'a>(response: &'a Response, name: &str) -> Option<&'a str> {
    response.headers().get(name).and_then(|v| v.to_str().ok())
}

fn ids(response: Response) -> Vec<String> {
    let mut ids: Vec<String> = response
        .json::<Vec<Value>>()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap().to_string())
        .collect();
    ids.sort();
    ids
}

#[test]
fn test_buy_milk_scenario_over_http() {
    let api = start_memory();

    let created = api.create("buy milk");
    assert_eq!(created.status(), StatusCode::CREATED);
    assert_eq!(header(&created, "content-type"), Some("application/json"));
    let task: Value = created.json().unwrap();
    assert_eq!(task["completed"], false);
    let id = task["id"].as_str().unwrap().to_string();

    let updated = api.update(&id, &json!({ "completed": true }));
    assert_eq!(updated.status(), StatusCode::OK);
    let updated: Value = updated.json().unwrap();
    assert_eq!(updated["completed"], true);
    assert_eq!(updated["text"], "buy milk");

    let completed = api.list("?status=completed");
    assert_eq!(completed.status(), StatusCode::OK);
    assert!(ids(completed).contains(&id));

    let deleted = api.delete(&id);
    assert_eq!(deleted.status(), StatusCode::OK);
    assert_eq!(deleted.json::<Value>().unwrap()["id"], json!(id));

    assert!(!ids(api.list("?status=completed")).contains(&id));

    let again = api.delete(&id);
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
    assert!(again.json::<Value>().unwrap()["error"].is_string());
}

#[test]
fn test_filter_route_over_http() {
    let api = start_memory();

    for (text, done) in [("a", false), ("b", true)] {
        let task: Value = api.create(text).json().unwrap();
        if done {
            api.update(task["id"].as_str().unwrap(), &json!({ "completed": true }));
        }
    }

    for status in ["active", "completed", "other"] {
        let query = format!("?status={status}");
        assert_eq!(ids(api.list(&query)), ids(api.filter(&query)), "status={status}");
    }

    let active: Value = api.filter("?status=active").json().unwrap();
    assert_eq!(active.as_array().unwrap().len(), 1);
    assert_eq!(active[0]["text"], "a");
}

#[test]
fn test_missing_text_over_http() {
    let api = start_memory();

    let reply = api.client.post(api.url("/api/todos")).json(&json!({})).send().unwrap();
    assert_ne!(reply.status(), StatusCode::CREATED);
    assert_eq!(reply.json::<Value>().unwrap(), json!({"error": "Failed to create task"}));

    assert_eq!(api.list("").json::<Value>().unwrap(), json!([]));
}

#[test]
fn test_unknown_route_over_http() {
    let api = start_memory();
    let reply = api.client.get(api.url("/health")).send().unwrap();
    assert_eq!(reply.status(), StatusCode::NOT_FOUND);
    assert_eq!(reply.json::<Value>().unwrap(), json!({"error": "Not found"}));
}

#[test]
fn test_cors_headers() {
    let api = start(Arc::new(MemoryStore::new()), CorsPolicy::new(["http://localhost:3000"]));
    let todos = api.url("/api/todos");

    let allowed = api.client.get(&todos).header("Origin", "http://localhost:3000").send().unwrap();
    assert_eq!(header(&allowed, "access-control-allow-origin"), Some("http://localhost:3000"));

    let denied = api.client.get(&todos).header("Origin", "http://evil.test").send().unwrap();
    assert_eq!(denied.status(), StatusCode::OK);
    assert_eq!(header(&denied, "access-control-allow-origin"), None);

    let preflight = api
        .client
        .request(reqwest::Method::OPTIONS, &todos)
        .header("Origin", "http://localhost:3000")
        .send()
        .unwrap();
    assert_eq!(preflight.status(), StatusCode::NO_CONTENT);
    assert!(header(&preflight, "access-control-allow-methods").unwrap().contains("PUT"));
}

#[test]
fn test_file_store_survives_restart() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("tasks.json");

    let first = start(Arc::new(JsonFileStore::open(&path).unwrap()), CorsPolicy::default());
    assert_eq!(first.create("persist me").status(), StatusCode::CREATED);

    let second = start(Arc::new(JsonFileStore::open(&path).unwrap()), CorsPolicy::default());
    let list: Value = second.list("").json().unwrap();
    assert_eq!(list[0]["text"], "persist me");
}
