//! Mock log receiver for testing assertions over received telemetry
//!
//! This module provides a simple HTTP server that stands in for a collector's
//! log exporter target. It exposes three endpoints:
//! - POST /v1/logs: Hand an incoming JSON ResourceLogs batch to a LogSink
//! - GET /v1/logs: Return the flattened view of everything received
//! - DELETE /v1/logs: Clear all received batches
//!
//! Each test creates its own MockLogReceiver instance.

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};

use crate::logs::{LogSink, ResourceLogs};

/// POST /v1/logs - capture incoming batch
async fn post_logs(State(sink): State<LogSink>, Json(batch): Json<ResourceLogs>) -> StatusCode {
    sink.consume(batch).await;
    StatusCode::OK
}

/// GET /v1/logs - return the flattened logs
async fn get_logs(State(sink): State<LogSink>) -> Result<Json<ResourceLogs>, StatusCode> {
    sink.all_logs()
        .await
        .map(Json)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// DELETE /v1/logs - clear all received batches
async fn delete_logs(State(sink): State<LogSink>) -> StatusCode {
    sink.reset().await;
    StatusCode::NO_CONTENT
}

/// Mock log receiver server
pub struct MockLogReceiver {
    address: String,
    client: reqwest::Client,
    sink: LogSink,
    #[allow(dead_code)]
    server_handle: tokio::task::JoinHandle<()>,
}

impl MockLogReceiver {
    /// Create and start a new mock receiver on a random port
    pub async fn start(sink: LogSink) -> Self {
        let app = Router::new()
            .route("/v1/logs", post(post_logs).get(get_logs).delete(delete_logs))
            .with_state(sink.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");

        let addr = listener.local_addr().expect("Failed to get local address");
        let address = format!("http://127.0.0.1:{}", addr.port());

        let server_handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server failed");
        });

        Self {
            address,
            client: reqwest::Client::new(),
            sink,
            server_handle,
        }
    }

    /// Get the sink receiving the posted batches
    pub fn sink(&self) -> &LogSink {
        &self.sink
    }

    /// POST /v1/logs - export a batch the way a collector would
    pub async fn export(&self, batch: &ResourceLogs) {
        let status = self
            .client
            .post(format!("{}/v1/logs", self.address))
            .json(batch)
            .send()
            .await
            .expect("Failed to POST logs")
            .status();
        assert!(status.is_success(), "export rejected: {}", status);
    }

    /// GET /v1/logs - fetch the flattened logs
    pub async fn get_logs(&self) -> ResourceLogs {
        self.client
            .get(format!("{}/v1/logs", self.address))
            .send()
            .await
            .expect("Failed to GET logs")
            .json()
            .await
            .expect("Failed to parse logs JSON")
    }

    /// DELETE /v1/logs - clear received batches
    pub async fn clear(&self) {
        self.client
            .delete(format!("{}/v1/logs", self.address))
            .send()
            .await
            .expect("Failed to DELETE logs");
    }
}
