#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use parking_lot::Mutex;
use serde_json::{json, Value};

use hradmin::config::ClientConfig;
use hradmin::gateway::{Navigator, Notice, Notifier};

/// One request as the backend saw it
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

type Log = Arc<Mutex<Vec<Recorded>>>;

/// In-process stand-in for the admin backend, bound to a free local port
pub struct MockBackend {
    pub origin: String,
    requests: Log,
}

impl MockBackend {
    pub async fn start() -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let addr = SocketAddr::from(([127, 0, 0, 1], port));
        let requests: Log = Arc::new(Mutex::new(Vec::new()));

        let app = axum::Router::new().fallback(respond).with_state(requests.clone());
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind {}", addr))?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self { origin: format!("http://127.0.0.1:{}", port), requests })
    }

    /// Client config aimed at this backend with an in-memory session
    pub fn config(&self) -> ClientConfig {
        ClientConfig::for_server(&self.origin)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().clone()
    }

    pub fn last(&self) -> Recorded {
        self.requests().pop().expect("backend received no requests")
    }
}

async fn respond(
    State(requests): State<Log>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let body: Option<Value> = serde_json::from_slice(&body).ok();
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    requests.lock().push(Recorded {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization: authorization.clone(),
        body: body.clone(),
    });

    let Some(path) = uri.path().strip_prefix("/api") else {
        return (StatusCode::NOT_FOUND, "not under /api").into_response();
    };
    let signed_in = authorization.as_deref().map_or(false, |a| a != "Bearer null");

    match (method.as_str(), path) {
        ("POST", "/auth/login") => login(body.unwrap_or(Value::Null)),
        ("GET", "/expired") => {
            (StatusCode::UNAUTHORIZED, Json(json!({"code": 401, "message": "token expired"}))).into_response()
        }
        ("GET", "/forbidden") => (StatusCode::FORBIDDEN, "forbidden").into_response(),
        ("GET", "/broken") => {
            (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"code": 500, "message": "boom"}))).into_response()
        }
        ("GET", "/slow") => {
            tokio::time::sleep(Duration::from_millis(1_500)).await;
            ok(json!(true))
        }
        ("GET", "/empty") => StatusCode::OK.into_response(),
        ("GET", "/failing") => Json(json!({"code": 1, "message": "name already taken", "data": null})).into_response(),
        ("GET", "/emps/search") if !signed_in => {
            (StatusCode::UNAUTHORIZED, Json(json!({"code": 401, "message": "not logged in"}))).into_response()
        }
        ("GET", "/emps/search") => ok(json!({
            "total": 12,
            "rows": [
                {"id": 1, "name": "Ada", "gender": "1", "deptName": "Teaching", "jobTitle": "Teacher", "hireDate": "2020-03-01"},
                {"id": 2, "name": "Lin", "gender": null, "deptName": null, "jobTitle": null, "hireDate": null}
            ]
        })),
        ("GET", "/students/search") => ok(json!({"total": 0, "rows": []})),
        ("GET", "/depts") => ok(json!([
            {"id": 1, "name": "Teaching", "updateTime": "2024-01-02T03:04:05"},
            {"id": 2, "name": "Admissions"}
        ])),
        ("GET", "/subjects") | ("GET", "/jobs") | ("GET", "/edu-levels") => {
            ok(json!([{"id": 1, "name": "First"}, {"id": 2, "name": "Second"}]))
        }
        ("GET", "/emps/jobTitle/count") => ok(json!({
            "jobTitleList": ["Teacher", "Counselor"],
            "jobTitleCountList": [12, 4]
        })),
        ("GET", "/emps/gender/count") => ok(json!([
            {"gender": "Male", "count": 9},
            {"gender": "Female", "count": 7}
        ])),
        ("GET", "/logs") => ok(json!({
            "total": 1,
            "rows": [{
                "operator": null, "operateTime": "2024-05-06T07:08:09",
                "className": "com.example.EmpController", "methodName": "delete",
                "duration": 12
            }]
        })),
        _ => ok(json!(true)),
    }
}

fn login(body: Value) -> Response {
    let username = body["username"].as_str().unwrap_or_default().to_string();
    if body["password"] == "wrong" {
        return Json(json!({"code": 1, "message": "invalid credentials", "data": null})).into_response();
    }

    let role = if username == "admin" { "ROLE_ADMIN" } else { "ROLE_USER" };
    ok(json!({
        "id": 7,
        "username": username,
        "name": "Test User",
        "roleName": role,
        "token": format!("token-{}", username),
        "isFirstLogged": false
    }))
}

fn ok(data: Value) -> Response {
    Json(json!({"code": 0, "message": "success", "data": data})).into_response()
}

/// Navigator and notifier that keep everything they are handed
#[derive(Default)]
pub struct Recorder {
    routes: Mutex<Vec<String>>,
    notices: Mutex<Vec<Notice>>,
}

impl Recorder {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn routes(&self) -> Vec<String> {
        self.routes.lock().clone()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().clone()
    }
}

impl Navigator for Recorder {
    fn navigate(&self, to: &str) {
        self.routes.lock().push(to.to_string());
    }
}

impl Notifier for Recorder {
    fn notify(&self, notice: &Notice) {
        self.notices.lock().push(notice.clone());
    }
}
