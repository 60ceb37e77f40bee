//! Scripted local backend for client integration tests.

use std::io::Read;
use std::sync::{Arc, Mutex};

use fmdesk_client::{Credentials, TaskApiClient};

/// Canned response for one method + path (query string ignored).
#[derive(Clone)]
pub struct Route {
    pub method: &'static str,
    pub path: String,
    pub status: u16,
    pub body: String,
}

impl Route {
    pub fn new(method: &'static str, path: &str, status: u16, body: serde_json::Value) -> Self {
        Self {
            method,
            path: path.to_string(),
            status,
            body: body.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub url: String,
    pub authorization: Option<String>,
    pub body: String,
}

impl Recorded {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

pub struct MockBackend {
    pub base_url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockBackend {
    /// Serve `routes` on a random local port. Unknown routes answer 404.
    pub fn start(routes: Vec<Route>) -> Self {
        let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
        let port = server.server_addr().to_ip().map(|a| a.port()).unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&requests);

        std::thread::spawn(move || {
            for mut request in server.incoming_requests() {
                let mut body = String::new();
                let _ = request.as_reader().read_to_string(&mut body);
                let method = request.method().to_string();
                let url = request.url().to_string();
                let authorization = request
                    .headers()
                    .iter()
                    .find(|h| h.field.equiv("Authorization"))
                    .map(|h| h.value.to_string());
                log.lock().unwrap().push(Recorded {
                    method: method.clone(),
                    url: url.clone(),
                    authorization,
                    body,
                });

                let path = url.split('?').next().unwrap_or_default();
                let (status, body) = routes
                    .iter()
                    .find(|route| route.method == method && route.path == path)
                    .map_or_else(
                        || (404, r#"{"message":"Cannot find route"}"#.to_string()),
                        |route| (route.status, route.body.clone()),
                    );
                let response = tiny_http::Response::from_string(body)
                    .with_status_code(status)
                    .with_header(
                        tiny_http::Header::from_bytes("Content-Type", "application/json").unwrap(),
                    );
                let _ = request.respond(response);
            }
        });

        Self {
            base_url: format!("http://127.0.0.1:{port}"),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    /// `METHOD path` for every request received, in order.
    pub fn calls(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| format!("{} {}", r.method, r.url.split('?').next().unwrap_or_default()))
            .collect()
    }

    pub fn client(&self) -> TaskApiClient {
        TaskApiClient::builder(&self.base_url)
            .credentials(Credentials::bearer("test-token"))
            .build()
            .unwrap()
    }
}

pub fn raw_task(id: &str, status: &str) -> serde_json::Value {
    serde_json::json!({
        "_id": id,
        "title": format!("Task {id}"),
        "status": status,
        "priority": "high",
        "assignedTo": {"_id": "u-1", "name": "Ana Reyes"},
        "category": "Plumbing",
        "updatedAt": "2024-06-01T09:00:00Z"
    })
}
