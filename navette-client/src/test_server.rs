//! a loopback axum server answering every path with one canned reply, just
//! enough to drive the client over real sockets in tests.
use std::sync::{Arc, Mutex, PoisonError};

use axum::{
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::IntoResponse,
    Router,
};
use tokio::net::TcpListener;

#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub content_type: Option<String>,
    pub body: String,
}

#[derive(Clone, Debug)]
pub enum Reply {
    /// answers 200 with the request body
    Echo,
    Json { status: u16, body: String },
}

impl Reply {
    pub fn json(status: u16, body: &str) -> Reply {
        Reply::Json {
            status,
            body: body.to_string(),
        }
    }
}

#[derive(Clone)]
struct StubState {
    reply: Reply,
    recorded: Arc<Mutex<Vec<RecordedRequest>>>,
}

pub struct StubServer {
    pub base_url: String,
    recorded: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubServer {
    pub async fn start(reply: Reply) -> StubServer {
        let recorded: Arc<Mutex<Vec<RecordedRequest>>> = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            reply,
            recorded: recorded.clone(),
        };
        let app = Router::new().fallback(answer).with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("test invariant failed: could not bind loopback port");
        let addr = listener
            .local_addr()
            .expect("test invariant failed: listener has no address");
        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("test invariant failed: stub server stopped")
        });
        StubServer {
            base_url: format!("http://{addr}"),
            recorded,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.recorded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

async fn answer(
    State(state): State<StubState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    let (status, reply_body) = match &state.reply {
        Reply::Echo => (StatusCode::OK, body.clone()),
        Reply::Json { status, body } => (
            StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            body.clone(),
        ),
    };
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state
        .recorded
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(RecordedRequest {
            method: method.to_string(),
            path: uri.path().to_string(),
            content_type,
            body,
        });
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        reply_body,
    )
}

/// a base URL pointing at a loopback port nothing listens on.
pub async fn unused_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("test invariant failed: could not bind loopback port");
    let addr = listener
        .local_addr()
        .expect("test invariant failed: listener has no address");
    drop(listener);
    format!("http://{addr}")
}
