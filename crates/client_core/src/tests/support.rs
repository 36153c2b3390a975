//! In-process HTTP fixtures shared by the transport and controller suites.

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use axum::{extract::State, http::StatusCode, routing::get, Router};
use tokio::net::TcpListener;

use crate::config::ClientSettings;

pub(crate) const ALICE_DOCUMENT: &str = r#"{"user": {"username":"alice", "name":"Alice A", "avatar":"https://x/a.png", "location":{"city":"Lima","country":"Peru"}, "social":{"profiles":[{"platform":"instagram","url":"https://instagram.com/alice"},{"platform":"facebook","url":"https://facebook.com/alice"}],"website":"https://alice.dev"}, "statistics":{"followers":120,"following":30,"activity":{"shots":5,"collections":0}}}}"#;

#[derive(Clone)]
struct ServerState {
    status: StatusCode,
    body: &'static str,
    hits: Arc<AtomicUsize>,
}

async fn handle_profile(State(state): State<ServerState>) -> (StatusCode, &'static str) {
    state.hits.fetch_add(1, Ordering::SeqCst);
    (state.status, state.body)
}

/// Serves `body` with `status` at `/profile/data.json` and returns the settings pointing at it.
pub(crate) async fn spawn_profile_server(
    status: StatusCode,
    body: &'static str,
) -> (ClientSettings, Arc<AtomicUsize>) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let hits = Arc::new(AtomicUsize::new(0));
    let state = ServerState {
        status,
        body,
        hits: hits.clone(),
    };
    let app = Router::new()
        .route("/profile/data.json", get(handle_profile))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let settings = ClientSettings {
        base_url: format!("http://{addr}/"),
        profile_path: "profile/data.json".into(),
        request_timeout_secs: 5,
        connect_timeout_secs: 5,
    };
    (settings, hits)
}

/// Settings for a local port that nothing listens on.
pub(crate) async fn refused_settings() -> ClientSettings {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    ClientSettings {
        base_url: format!("http://{addr}/"),
        profile_path: "profile/data.json".into(),
        request_timeout_secs: 5,
        connect_timeout_secs: 5,
    }
}

/// Serves the profile document only after `delay`, for exercising timeouts.
pub(crate) async fn spawn_slow_profile_server(delay: Duration) -> ClientSettings {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let app = Router::new().route(
        "/profile/data.json",
        get(move || async move {
            tokio::time::sleep(delay).await;
            ALICE_DOCUMENT
        }),
    );
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    ClientSettings {
        base_url: format!("http://{addr}/"),
        profile_path: "profile/data.json".into(),
        request_timeout_secs: 1,
        connect_timeout_secs: 1,
    }
}
