//! Background fetch tasks.  Each posts its result back to the App loop as an
//! `AppMessage`; none of them touch `AppState`.

use std::time::Duration;

use minaret_proto::directory::DirectoryClient;
use minaret_proto::feed::{FetchTag, Tagged};
use tokio::sync::mpsc;
use tokio::task::{AbortHandle, JoinHandle};
use tokio::time::MissedTickBehavior;
use tracing::debug;

use crate::app::AppMessage;

/// Fetch both listings concurrently and post them back.
pub async fn fetch_lists(client: &DirectoryClient, tx: &mpsc::Sender<AppMessage>) -> bool {
    let (all, live) = tokio::join!(client.list(), client.live());
    tx.send(AppMessage::Stations(all)).await.is_ok()
        && tx.send(AppMessage::LiveStations(live)).await.is_ok()
}

/// Poll both listings every `period` for the lifetime of the process.  The
/// first fetch happens immediately.
pub fn spawn_list_poll(
    client: DirectoryClient,
    period: Duration,
    tx: mpsc::Sender<AppMessage>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            if !fetch_lists(&client, &tx).await {
                debug!("list poll: app gone, stopping");
                break;
            }
        }
    })
}

/// One-off listing refresh (the `r` key).
pub fn spawn_refresh(client: DirectoryClient, tx: mpsc::Sender<AppMessage>) {
    tokio::spawn(async move {
        fetch_lists(&client, &tx).await;
    });
}

/// Poll now-playing for one selection.  Replies carry `tag` so the App can
/// drop any that arrive after the selection moved on.
pub fn spawn_now_playing_poll(
    client: DirectoryClient,
    tag: FetchTag,
    slug: String,
    period: Duration,
    tx: mpsc::Sender<AppMessage>,
) -> AbortHandle {
    let handle = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            let result = client.now_playing(&slug).await;
            let msg = AppMessage::NowPlaying(Tagged::new(tag.clone(), result));
            if tx.send(msg).await.is_err() {
                break;
            }
        }
    });
    handle.abort_handle()
}

/// Fetch the detail record once for a new selection.
pub fn spawn_detail_fetch(
    client: DirectoryClient,
    tag: FetchTag,
    slug: String,
    tx: mpsc::Sender<AppMessage>,
) -> AbortHandle {
    let handle = tokio::spawn(async move {
        let result = client.get(&slug).await;
        let _ = tx.send(AppMessage::Detail(Tagged::new(tag, result))).await;
    });
    handle.abort_handle()
}
