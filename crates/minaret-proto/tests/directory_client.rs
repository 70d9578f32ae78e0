//! Directory client against a local mock of the broadcast service.
//!
//! Each test binds an axum router to an ephemeral port and points a
//! `DirectoryClient` at it.

use std::time::Duration;

use axum::{
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use minaret_proto::directory::{DirectoryClient, DirectoryError};
use minaret_proto::feed::LoadState;
use serde_json::json;
use tokio::net::TcpListener;

async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock server");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock server");
    });
    format!("http://{}", addr)
}

fn client(base: &str) -> DirectoryClient {
    DirectoryClient::new(base, Duration::from_secs(5)).expect("client should build")
}

fn list_item(id: &str, name: &str, live: bool) -> serde_json::Value {
    json!({
        "_id": id,
        "name": name,
        "slug": format!("{}-slug", id),
        "isLive": live,
        "mosqueId": { "_id": "m", "name": "M", "slug": "m", "location": "Kontagora, Niger State" },
        "stats": { "totalListeners": 10 }
    })
}

async fn stations_handler() -> Json<serde_json::Value> {
    Json(json!({
        "status": "success",
        "results": 3,
        "data": { "stations": [
            list_item("z", "Zawiyya", true),
            list_item("a", "Nasarawa", true),
            list_item("m", "Central Mosque", false),
        ] }
    }))
}

async fn live_handler() -> Json<serde_json::Value> {
    Json(json!({
        "status": "success",
        "results": 1,
        "data": { "stations": [ list_item("z", "Zawiyya", true) ] }
    }))
}

async fn detail_handler(Path(slug): Path<String>) -> Response {
    if slug != "z-slug" {
        return (StatusCode::NOT_FOUND, Json(json!({ "status": "fail" }))).into_response();
    }
    Json(json!({
        "status": "success",
        "data": { "station": {
            "_id": "z",
            "mosqueId": { "_id": "m", "name": "M", "slug": "m", "location": "Kontagora" },
            "name": "Zawiyya",
            "slug": "z-slug",
            "mountPoint": "/zawiyya",
            "isLive": true,
            "settings": { "bitrate": 96, "format": "aac", "isPublic": true },
            "stats": { "totalListeners": 500 },
            "createdAt": "2024-03-01T08:00:00Z",
            "updatedAt": "2024-03-02T08:00:00Z"
        } }
    }))
    .into_response()
}

async fn now_playing_handler(Path(slug): Path<String>) -> Response {
    if slug != "z-slug" {
        return StatusCode::NOT_FOUND.into_response();
    }
    Json(json!({
        "status": "success",
        "data": {
            "stationName": "Zawiyya",
            "isLive": true,
            "currentTrack": { "title": "Tafsir Surah Al-Kahf", "artist": "Mallam Sani" }
        }
    }))
    .into_response()
}

fn directory_app() -> Router {
    Router::new()
        .route("/stations", get(stations_handler))
        .route("/stations/live", get(live_handler))
        .route("/stations/:slug", get(detail_handler))
        .route("/stations/:slug/now-playing", get(now_playing_handler))
}

#[tokio::test]
async fn list_preserves_server_order() {
    let base = serve(directory_app()).await;
    let stations = client(&base).list().await.expect("list should succeed");
    let ids: Vec<&str> = stations.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["z", "a", "m"]);
    assert_eq!(stations[0].location, "Kontagora, Niger State");
}

#[tokio::test]
async fn live_is_server_filtered() {
    let base = serve(directory_app()).await;
    let stations = client(&base).live().await.expect("live should succeed");
    assert_eq!(stations.len(), 1);
    assert!(stations[0].is_live);
}

#[tokio::test]
async fn detail_and_now_playing_decode() {
    let base = serve(directory_app()).await;
    let c = client(&base);

    let detail = c.get("z-slug").await.expect("detail should succeed");
    assert_eq!(detail.mount_point, "/zawiyya");
    assert_eq!(detail.settings.bitrate, 96);

    let np = c.now_playing("z-slug").await.expect("now playing should succeed");
    assert_eq!(
        np.current_track.and_then(|t| t.display()).as_deref(),
        Some("Mallam Sani – Tafsir Surah Al-Kahf")
    );
}

#[tokio::test]
async fn unknown_slug_is_not_found() {
    let base = serve(directory_app()).await;
    let err = client(&base).get("nope").await.unwrap_err();
    assert!(err.is_not_found(), "expected NotFound, got {err:?}");

    let err = client(&base).now_playing("nope").await.unwrap_err();
    assert!(matches!(err, DirectoryError::NotFound(ref s) if s == "nope"));
}

#[tokio::test]
async fn empty_list_is_distinct_from_failure() {
    let empty = Router::new().route(
        "/stations",
        get(|| async {
            Json(json!({ "status": "success", "results": 0, "data": { "stations": [] } }))
        }),
    );
    let base = serve(empty).await;
    let stations = client(&base).list().await.expect("empty list is a success");
    assert_eq!(LoadState::from_list(stations), LoadState::Empty);

    let broken = Router::new().route(
        "/stations",
        get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let base = serve(broken).await;
    let err = client(&base).list().await.unwrap_err();
    assert!(matches!(err, DirectoryError::Status(s) if s == StatusCode::INTERNAL_SERVER_ERROR));
}

#[tokio::test]
async fn garbage_body_is_decode_error() {
    let app = Router::new().route("/stations", get(|| async { "<html>oops</html>" }));
    let base = serve(app).await;
    let err = client(&base).list().await.unwrap_err();
    assert!(matches!(err, DirectoryError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn non_success_envelope_is_api_error() {
    let app = Router::new().route(
        "/stations",
        get(|| async {
            Json(json!({ "status": "error", "message": "maintenance", "data": { "stations": [] } }))
        }),
    );
    let base = serve(app).await;
    let err = client(&base).list().await.unwrap_err();
    match err {
        DirectoryError::Api { status, message } => {
            assert_eq!(status, "error");
            assert_eq!(message, "maintenance");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_server_is_network_error() {
    // Bind then drop to get a port nothing listens on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{}", addr)).list().await.unwrap_err();
    assert!(matches!(err, DirectoryError::Network(_)), "got {err:?}");
}
