//! In-process mock transit service.
//!
//! Speaks just enough of the transit API for the CLI to run end to end:
//! single and bulk transforms in both directions, a `data` envelope, and
//! `{"errors": [...]}` failure bodies. "Encryption" tags the (already
//! base64) payload with a `vault:v1:` prefix; decryption strips it.
//!
//! Special key names trigger failure modes:
//! - `missing-field`: 200 with an empty `data` object
//! - `server-error`: 500 with an error body
//! - `short-batch`: drops the last result from every bulk response

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::sync::oneshot;

use super::TEST_TOKEN;

const CIPHERTEXT_PREFIX: &str = "vault:v1:";

#[derive(Clone)]
struct AppState {
    hits: Arc<AtomicUsize>,
}

/// Handle to a running mock service; shuts down on drop.
pub struct MockTransit {
    addr: SocketAddr,
    hits: Arc<AtomicUsize>,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl MockTransit {
    /// Bind a fresh server on a random local port.
    pub fn start() -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let state = AppState { hits: hits.clone() };

        let app = Router::new()
            .route("/v1/:engine/:op/:key", post(handle_transform))
            .with_state(state);

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("failed to create server runtime");
        let listener = runtime
            .block_on(tokio::net::TcpListener::bind("127.0.0.1:0"))
            .expect("failed to bind mock server");
        let addr = listener.local_addr().expect("failed to get server addr");

        let (tx, rx) = oneshot::channel::<()>();
        let handle = std::thread::spawn(move || {
            runtime.block_on(async {
                axum::serve(listener, app)
                    .with_graceful_shutdown(async {
                        let _ = rx.await;
                    })
                    .await
                    .expect("mock server failed");
            });
        });

        Self {
            addr,
            hits,
            shutdown: Some(tx),
            handle: Some(handle),
        }
    }

    /// Base URL for VAULT_ADDR.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Number of transform requests received so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

impl Drop for MockTransit {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "errors": [message] })))
}

/// `{field: value}` with a runtime key name.
fn result_item(field: &str, value: String) -> Value {
    let mut map = serde_json::Map::new();
    map.insert(field.to_string(), Value::String(value));
    Value::Object(map)
}

async fn handle_transform(
    State(state): State<AppState>,
    Path((_engine, op, key)): Path<(String, String, String)>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.hits.fetch_add(1, Ordering::SeqCst);

    let token = headers
        .get("X-Vault-Token")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if token != TEST_TOKEN {
        return error_response(StatusCode::FORBIDDEN, "permission denied");
    }

    match key.as_str() {
        "missing-field" => return (StatusCode::OK, Json(json!({ "data": {} }))),
        "server-error" => {
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
        }
        _ => {}
    }

    let (field_in, field_out) = match op.as_str() {
        "encrypt" => ("plaintext", "ciphertext"),
        "decrypt" => ("ciphertext", "plaintext"),
        _ => return error_response(StatusCode::NOT_FOUND, "unsupported operation"),
    };

    let transform = |value: &str| -> Option<String> {
        match op.as_str() {
            "encrypt" => Some(format!("{CIPHERTEXT_PREFIX}{value}")),
            _ => value.strip_prefix(CIPHERTEXT_PREFIX).map(str::to_string),
        }
    };

    if let Some(items) = body.get("batch_input").and_then(Value::as_array) {
        let mut results = Vec::with_capacity(items.len());
        for item in items {
            let Some(value) = item.get(field_in).and_then(Value::as_str) else {
                return error_response(StatusCode::BAD_REQUEST, "missing batch item field");
            };
            let Some(out) = transform(value) else {
                return error_response(StatusCode::BAD_REQUEST, "invalid ciphertext");
            };
            results.push(result_item(field_out, out));
        }
        if key == "short-batch" {
            results.pop();
        }
        (
            StatusCode::OK,
            Json(json!({ "data": { "batch_results": results } })),
        )
    } else {
        let Some(value) = body.get(field_in).and_then(Value::as_str) else {
            return error_response(StatusCode::BAD_REQUEST, "missing request field");
        };
        let Some(out) = transform(value) else {
            return error_response(StatusCode::BAD_REQUEST, "invalid ciphertext");
        };
        (
            StatusCode::OK,
            Json(json!({ "data": result_item(field_out, out) })),
        )
    }
}
