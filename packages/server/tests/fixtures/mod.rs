//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::{net::SocketAddr, time::Duration};

use parlor_server::{ServerConfig, run_server};
use tokio::{net::TcpStream, task::JoinHandle};

/// A server running in the test's runtime, stopped on drop.
pub struct TestServer {
    addr: SocketAddr,
    task: JoinHandle<()>,
}

impl TestServer {
    pub async fn start(port: u16) -> Self {
        let addr: SocketAddr = format!("127.0.0.1:{}", port).parse().unwrap();
        let config = ServerConfig::with_addr(addr);
        let task = tokio::spawn(async move {
            if let Err(e) = run_server(config).await {
                panic!("test server failed: {}", e);
            }
        });

        for _ in 0..100 {
            if TcpStream::connect(addr).await.is_ok() {
                return Self { addr, task };
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("test server on {} did not start", addr);
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self, client_id: &str) -> String {
        format!("ws://{}/ws?client_id={}", self.addr, client_id)
    }

    /// Poll the room detail endpoint until it lists `expected` members.
    pub async fn wait_for_members(&self, expected: usize) {
        let client = reqwest::Client::new();
        for _ in 0..100 {
            let body: serde_json::Value = client
                .get(format!("{}/api/rooms/default", self.base_url()))
                .send()
                .await
                .expect("Failed to send request")
                .json()
                .await
                .expect("Failed to parse JSON");
            if body["members"].as_array().map(Vec::len) == Some(expected) {
                return;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("room never reached {} members", expected);
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}
