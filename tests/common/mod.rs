//! Shared utilities for integration testing.

use mini_backend::config::AppConfig;
use mini_backend::http::ApiServer;

/// Spawn the full server on an ephemeral port, returning its base URL.
///
/// The listener is bound before the server task starts, so callers can hit
/// the returned URL immediately without polling for readiness.
pub async fn spawn_app() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("listener address");

    let server = ApiServer::new(&AppConfig::default()).expect("construct server");
    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });

    format!("http://{addr}")
}

/// Client that ignores any proxy configured in the environment.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().expect("build client")
}

/// Value of the first sample line for `metric` carrying all of `labels`.
#[allow(dead_code)]
pub fn sample_value(exposition: &str, metric: &str, labels: &[(&str, &str)]) -> Option<f64> {
    exposition
        .lines()
        .find(|line| {
            line.starts_with(metric)
                && labels
                    .iter()
                    .all(|(k, v)| line.contains(&format!("{k}=\"{v}\"")))
        })
        .and_then(|line| line.split_whitespace().last())
        .and_then(|value| value.parse().ok())
}
