//! Test helpers: a minimal local HTTP server and canned API payloads.

#![allow(dead_code)]

use serde_json::json;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

type Handler = dyn Fn(&str) -> (u16, String) + Send + Sync;

/// Serves every request by calling a handler with the request target
/// (path plus query string) and replying with the returned status and body.
pub struct MockServer {
    addr: SocketAddr,
    hits: Arc<AtomicUsize>,
    task: JoinHandle<()>,
}

impl MockServer {
    pub async fn start<F>(handler: F) -> Self
    where
        F: Fn(&str) -> (u16, String) + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock server");
        let addr = listener.local_addr().expect("Mock server has no address");
        let handler: Arc<Handler> = Arc::new(handler);
        let hits = Arc::new(AtomicUsize::new(0));

        let task_hits = hits.clone();
        let task = tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let handler = handler.clone();
                let hits = task_hits.clone();
                tokio::spawn(async move {
                    let mut request = Vec::new();
                    let mut chunk = [0u8; 4096];
                    loop {
                        let n = socket.read(&mut chunk).await.unwrap_or(0);
                        if n == 0 {
                            break;
                        }
                        request.extend_from_slice(&chunk[..n]);
                        if request.windows(4).any(|w| w == b"\r\n\r\n") {
                            break;
                        }
                    }
                    let request = String::from_utf8_lossy(&request);
                    let target = request.split_whitespace().nth(1).unwrap_or("/").to_string();

                    hits.fetch_add(1, Ordering::SeqCst);
                    let (status, body) = (*handler)(&target);
                    let response = format!(
                        "HTTP/1.1 {} Mock\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        status,
                        body.len(),
                        body
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        Self { addr, hits, task }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Number of requests served so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Value of query parameter `name` in a request target.
pub fn query_param(target: &str, name: &str) -> Option<String> {
    let query = target.split_once('?')?.1;
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key == name).then(|| value.to_string())
    })
}

pub const DEFAULT_VARIABLES: [&str; 12] = [
    "pm10",
    "pm2_5",
    "carbon_monoxide",
    "carbon_dioxide",
    "nitrogen_dioxide",
    "sulphur_dioxide",
    "ozone",
    "dust",
    "uv_index",
    "uv_index_clear_sky",
    "ammonia",
    "methane",
];

// 2024-08-12T00:00:00Z
pub const START: i64 = 1723420800;

/// An Open-Meteo style body with `steps` hourly samples for `variables`.
/// Values encode the variable position and step: `position * 1000 + step`.
pub fn air_quality_body(latitude: f64, longitude: f64, steps: usize, variables: &[&str]) -> String {
    let mut hourly = serde_json::Map::new();
    let time: Vec<i64> = (0..steps as i64).map(|i| START + i * 3600).collect();
    hourly.insert("time".to_string(), json!(time));
    for (position, name) in variables.iter().enumerate() {
        let values: Vec<f64> = (0..steps).map(|i| (position * 1000 + i) as f64).collect();
        hourly.insert(name.to_string(), json!(values));
    }
    json!({
        "latitude": latitude,
        "longitude": longitude,
        "generationtime_ms": 1.2,
        "utc_offset_seconds": 25200,
        "timezone": "Asia/Bangkok",
        "timezone_abbreviation": "+07",
        "elevation": 216.0,
        "hourly": hourly,
    })
    .to_string()
}

pub fn reverse_body(city: Option<&str>) -> String {
    match city {
        Some(city) => json!({"place_id": 1, "address": {"city": city, "country": "India"}}),
        None => json!({"place_id": 1, "address": {"state": "Odisha", "country": "India"}}),
    }
    .to_string()
}
