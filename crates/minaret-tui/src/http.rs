//! Local control API.
//!
//! Reads come from the latest published `Session`; every mutation is sent to
//! the App loop as an `Action` so the session keeps a single writer.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use minaret_proto::directory::DirectorySnapshot;
use minaret_proto::session::Session;
use minaret_proto::station::{StationId, StationSnapshot};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::sync::{mpsc, watch};
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::action::Action;

#[derive(Clone)]
pub struct HttpState {
    pub session_rx: watch::Receiver<Session>,
    pub directory_rx: watch::Receiver<DirectorySnapshot>,
    pub action_tx: mpsc::Sender<Action>,
}

#[derive(Debug, Serialize)]
struct ApiSession {
    state: &'static str,
    current: Option<StationSnapshot>,
    is_playing: bool,
    volume: f32,
    muted: bool,
}

impl From<&Session> for ApiSession {
    fn from(session: &Session) -> Self {
        Self {
            state: session.state().label(),
            current: session.current().cloned(),
            is_playing: session.is_playing(),
            volume: session.volume(),
            muted: session.is_muted(),
        }
    }
}

pub fn router(state: HttpState) -> Router {
    Router::new()
        .route("/api/session", get(get_session))
        .route("/api/toggle", get(toggle).post(toggle))
        .route("/api/close", get(close).post(close))
        .route("/api/mute", get(mute).post(mute))
        .route("/api/volume/:percent", get(set_volume).post(set_volume))
        .route("/api/select/:id", get(select).post(select))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub fn start_server(bind_address: String, port: u16, state: HttpState) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let app = router(state);

        let addr = format!("{}:{}", bind_address, port);
        let listener = match TcpListener::bind(&addr).await {
            Ok(l) => l,
            Err(e) => {
                error!("Failed to bind HTTP server to {}: {}", addr, e);
                return;
            }
        };

        info!("HTTP API server listening on http://{}", addr);

        if let Err(e) = axum::serve(listener, app).await {
            error!("HTTP server error: {}", e);
        }
    })
}

async fn send(state: &HttpState, action: Action) -> StatusCode {
    info!("HTTP API: {:?}", action);
    if state.action_tx.send(action).await.is_err() {
        error!("HTTP API: app loop is gone");
        return StatusCode::SERVICE_UNAVAILABLE;
    }
    StatusCode::OK
}

async fn get_session(State(state): State<HttpState>) -> Json<ApiSession> {
    let session = state.session_rx.borrow();
    Json(ApiSession::from(&*session))
}

async fn toggle(State(state): State<HttpState>) -> StatusCode {
    send(&state, Action::TogglePlay).await
}

async fn close(State(state): State<HttpState>) -> StatusCode {
    send(&state, Action::Close).await
}

async fn mute(State(state): State<HttpState>) -> StatusCode {
    send(&state, Action::Mute).await
}

async fn set_volume(State(state): State<HttpState>, Path(percent): Path<u32>) -> StatusCode {
    let volume = percent.min(100) as f32 / 100.0;
    send(&state, Action::Volume(volume)).await
}

async fn select(State(state): State<HttpState>, Path(id): Path<String>) -> StatusCode {
    let snapshot = match state.directory_rx.borrow().get(&StationId::new(id)) {
        Ok(station) => station.snapshot(),
        Err(e) => {
            info!("HTTP API: select rejected: {}", e);
            return StatusCode::NOT_FOUND;
        }
    };
    send(&state, Action::Select(snapshot)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_state::test_support::station;
    use axum::body::Body;
    use axum::http::Request;
    use minaret_proto::session::SessionStore;
    use tower::ServiceExt;

    struct Harness {
        app: Router,
        session_tx: watch::Sender<Session>,
        action_rx: mpsc::Receiver<Action>,
    }

    fn harness() -> Harness {
        let (session_tx, session_rx) = watch::channel(Session::default());
        let (_directory_tx, directory_rx) = watch::channel(DirectorySnapshot::new(vec![
            station("s1", "Masjid A", true),
            station("s2", "Masjid B", false),
        ]));
        let (action_tx, action_rx) = mpsc::channel(8);
        let app = router(HttpState {
            session_rx,
            directory_rx,
            action_tx,
        });
        Harness {
            app,
            session_tx,
            action_rx,
        }
    }

    async fn call(app: &Router, method: &str, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn test_session_reflects_published_value() {
        let h = harness();
        let (status, body) = call(&h.app, "GET", "/api/session").await;
        assert_eq!(status, StatusCode::OK);
        let v: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(v["state"], "idle");
        assert!(v["current"].is_null());

        let mut store = SessionStore::default();
        store.select(station("s1", "Masjid A", true).snapshot());
        h.session_tx.send_replace(store.session().clone());

        let (_, body) = call(&h.app, "GET", "/api/session").await;
        let v: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(v["state"], "playing");
        assert_eq!(v["current"]["id"], "s1");
        assert_eq!(v["is_playing"], true);
    }

    #[tokio::test]
    async fn test_mutations_become_actions() {
        let mut h = harness();
        assert_eq!(call(&h.app, "POST", "/api/toggle").await.0, StatusCode::OK);
        assert!(matches!(h.action_rx.recv().await, Some(Action::TogglePlay)));

        assert_eq!(call(&h.app, "GET", "/api/close").await.0, StatusCode::OK);
        assert!(matches!(h.action_rx.recv().await, Some(Action::Close)));

        call(&h.app, "POST", "/api/volume/250").await;
        match h.action_rx.recv().await {
            Some(Action::Volume(v)) => assert_eq!(v, 1.0),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_select_resolves_against_directory() {
        let mut h = harness();
        assert_eq!(call(&h.app, "POST", "/api/select/s2").await.0, StatusCode::OK);
        match h.action_rx.recv().await {
            Some(Action::Select(snap)) => assert_eq!(snap.name, "Masjid B"),
            other => panic!("unexpected {other:?}"),
        }

        let (status, _) = call(&h.app, "POST", "/api/select/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(h.action_rx.try_recv().is_err());
    }
}
