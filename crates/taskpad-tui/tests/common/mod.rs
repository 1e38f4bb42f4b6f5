use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use taskpad_core::task::{Status, Task};
use tokio::net::TcpListener;

type Rejection = (StatusCode, Json<Value>);

/// A request observed by the mock API, for assertions on the wire contract.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub body: Option<Value>,
}

/// In-memory stand-in for the remote task collection: serves the CRUD
/// contract, records every request, and can be flipped into a failing
/// state so error paths are reachable from tests.
pub struct MockApi {
    tasks: Mutex<Vec<Task>>,
    next_id: AtomicI64,
    api_key: Option<String>,
    fail: AtomicBool,
    requests: Mutex<Vec<Recorded>>,
}

impl MockApi {
    pub fn new() -> Arc<Self> {
        Self::build(None)
    }

    pub fn with_api_key(key: &str) -> Arc<Self> {
        Self::build(Some(key.to_string()))
    }

    fn build(api_key: Option<String>) -> Arc<Self> {
        Arc::new(Self {
            tasks: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
            api_key,
            fail: AtomicBool::new(false),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Insert a task directly into the store, bypassing HTTP.
    pub fn seed(&self, title: &str, description: &str, status: Status) -> i64 {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.tasks.lock().unwrap().push(Task {
            id,
            title: title.into(),
            description: description.into(),
            status,
            created_at: "2024-01-01T09:00:00Z".into(),
        });
        id
    }

    /// While set, every request is rejected with a 500.
    pub fn set_failing(&self, on: bool) {
        self.fail.store(on, Ordering::SeqCst);
    }

    pub fn stored_tasks(&self) -> Vec<Task> {
        self.tasks.lock().unwrap().clone()
    }

    pub fn recorded(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    fn record(&self, method: &str, path: String, body: Option<Value>) {
        self.requests.lock().unwrap().push(Recorded {
            method: method.into(),
            path,
            body,
        });
    }

    fn check(&self, headers: &HeaderMap) -> Result<(), Rejection> {
        if let Some(ref key) = self.api_key {
            let sent = headers.get("x-api-key").and_then(|v| v.to_str().ok());
            if sent != Some(key.as_str()) {
                return Err((
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "error": "missing or invalid api key" })),
                ));
            }
        }
        if self.fail.load(Ordering::SeqCst) {
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "simulated failure" })),
            ));
        }
        Ok(())
    }
}

async fn list_tasks(
    State(api): State<Arc<MockApi>>,
    headers: HeaderMap,
) -> Result<Json<Value>, Rejection> {
    api.record("GET", "/".into(), None);
    api.check(&headers)?;
    let tasks = api.tasks.lock().unwrap().clone();
    Ok(Json(json!(tasks)))
}

async fn create_task(
    State(api): State<Arc<MockApi>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), Rejection> {
    api.record("POST", "/".into(), Some(body.clone()));
    api.check(&headers)?;
    let id = api.next_id.fetch_add(1, Ordering::SeqCst);
    let task = Task {
        id,
        title: body["title"].as_str().unwrap_or_default().to_string(),
        description: body["description"].as_str().unwrap_or_default().to_string(),
        status: body["status"]
            .as_str()
            .and_then(Status::from_str)
            .unwrap_or(Status::Pending),
        created_at: "2024-01-02T09:00:00Z".into(),
    };
    api.tasks.lock().unwrap().push(task.clone());
    Ok((StatusCode::CREATED, Json(json!(task))))
}

async fn update_task(
    State(api): State<Arc<MockApi>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, Rejection> {
    api.record("PUT", format!("/{id}"), Some(body.clone()));
    api.check(&headers)?;
    let mut tasks = api.tasks.lock().unwrap();
    let Some(task) = tasks.iter_mut().find(|t| t.id == id) else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("no task {id}") })),
        ));
    };
    if let Some(title) = body["title"].as_str() {
        task.title = title.to_string();
    }
    if let Some(description) = body["description"].as_str() {
        task.description = description.to_string();
    }
    if let Some(status) = body["status"].as_str().and_then(Status::from_str) {
        task.status = status;
    }
    Ok(Json(json!(task.clone())))
}

async fn delete_task(
    State(api): State<Arc<MockApi>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<StatusCode, Rejection> {
    api.record("DELETE", format!("/{id}"), None);
    api.check(&headers)?;
    let mut tasks = api.tasks.lock().unwrap();
    let before = tasks.len();
    tasks.retain(|t| t.id != id);
    if tasks.len() == before {
        return Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("no task {id}") })),
        ));
    }
    Ok(StatusCode::NO_CONTENT)
}

fn router(api: Arc<MockApi>) -> Router {
    Router::new()
        .route("/", get(list_tasks).post(create_task))
        .route("/{id}", put(update_task).delete(delete_task))
        .with_state(api)
}

/// Spawn the mock API on a background thread with its own runtime
/// (`BlockingHttpService` owns a runtime, so the server cannot share it).
/// Returns the base URL.
pub fn spawn(api: Arc<MockApi>) -> String {
    let (tx, rx) = std::sync::mpsc::sync_channel(1);
    std::thread::spawn(move || {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async move {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            tx.send(format!("http://{addr}")).unwrap();
            axum::serve(listener, router(api)).await.unwrap();
        });
    });
    rx.recv().unwrap()
}
