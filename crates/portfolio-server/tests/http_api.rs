//! End-to-end tests over a real TCP socket.
//!
//! Each test binds the server on an ephemeral port, talks to it with
//! `reqwest`, and stops it through the shutdown flag.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use portfolio_server::application::ConfigService;
use portfolio_server::infrastructure::{ConfigStore, FileConfigStore, HttpServer};
use serde_json::{json, Value};
use tokio::task::JoinHandle;
use uuid::Uuid;

const SECRET: &str = "integration-secret";

struct TestServer {
    base_url: String,
    running: Arc<AtomicBool>,
    task: JoinHandle<anyhow::Result<()>>,
    data_dir: PathBuf,
}

impl TestServer {
    async fn start(max_body_bytes: usize) -> Self {
        let data_dir = std::env::temp_dir().join(format!("portfolio_e2e_{}", Uuid::new_v4()));
        let store = Arc::new(FileConfigStore::new(data_dir.join("portfolio-data.json")));
        let service = Arc::new(ConfigService::new(store as Arc<dyn ConfigStore>, SECRET));

        let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
        let server = HttpServer::bind(addr, max_body_bytes).await.expect("bind");
        let local = server.local_addr().expect("local addr");

        let running = Arc::new(AtomicBool::new(true));
        let task = tokio::spawn(server.run(service, Arc::clone(&running)));

        Self {
            base_url: format!("http://{local}/api/portfolio"),
            running,
            task,
            data_dir,
        }
    }

    fn data_file(&self) -> PathBuf {
        self.data_dir.join("portfolio-data.json")
    }

    async fn stop(self) {
        self.running.store(false, Ordering::Relaxed);
        self.task.await.expect("join").expect("server result");
        std::fs::remove_dir_all(&self.data_dir).ok();
    }
}

async fn get_doc(client: &reqwest::Client, url: &str) -> Value {
    let resp = client.get(url).send().await.expect("GET");
    assert_eq!(resp.status().as_u16(), 200);
    resp.json().await.expect("JSON body")
}

#[tokio::test]
async fn test_save_and_reload_scenario() {
    let server = TestServer::start(1024 * 1024).await;
    let client = reqwest::Client::new();

    // 1. Fresh server serves the embedded default.
    let mut doc = get_doc(&client, &server.base_url).await;
    assert_eq!(doc["personal"]["firstName"], "Matheus");
    assert!(!server.data_file().exists());

    // 2. Save with the right secret.
    doc["personal"]["firstName"] = json!("Ana");
    let resp = client
        .post(&server.base_url)
        .header("x-admin-password", SECRET)
        .json(&doc)
        .send()
        .await
        .expect("POST");
    assert_eq!(resp.status().as_u16(), 200);
    let ack: Value = resp.json().await.unwrap();
    assert_eq!(ack["success"], true);

    // 3. The change is served back and persisted as pretty JSON.
    assert_eq!(get_doc(&client, &server.base_url).await["personal"]["firstName"], "Ana");
    let on_disk = std::fs::read_to_string(server.data_file()).unwrap();
    assert_eq!(on_disk, serde_json::to_string_pretty(&doc).unwrap());

    // 4. A wrong secret is rejected and changes nothing.
    let mut other = doc.clone();
    other["personal"]["firstName"] = json!("Mallory");
    let resp = client
        .post(&server.base_url)
        .header("x-admin-password", "wrong")
        .json(&other)
        .send()
        .await
        .expect("POST");
    assert_eq!(resp.status().as_u16(), 401);
    assert_eq!(resp.json::<Value>().await.unwrap(), json!({ "error": "Unauthorized" }));
    assert_eq!(get_doc(&client, &server.base_url).await["personal"]["firstName"], "Ana");

    server.stop().await;
}

#[tokio::test]
async fn test_malformed_body_is_400_and_keeps_document() {
    let server = TestServer::start(1024 * 1024).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(&server.base_url)
        .header("x-admin-password", SECRET)
        .header("content-type", "application/json")
        .body("{ this is not json")
        .send()
        .await
        .expect("POST");

    assert_eq!(resp.status().as_u16(), 400);
    assert!(!server.data_file().exists());
    assert_eq!(get_doc(&client, &server.base_url).await["personal"]["firstName"], "Matheus");

    server.stop().await;
}

#[tokio::test]
async fn test_patch_edits_single_field() {
    let server = TestServer::start(1024 * 1024).await;
    let client = reqwest::Client::new();

    let resp = client
        .patch(&server.base_url)
        .header("x-admin-password", SECRET)
        .json(&json!({ "path": "experience[0].title", "value": "Head of QA" }))
        .send()
        .await
        .expect("PATCH");
    assert_eq!(resp.status().as_u16(), 200);

    let doc = get_doc(&client, &server.base_url).await;
    assert_eq!(doc["experience"][0]["title"], "Head of QA");
    assert_eq!(doc["personal"]["firstName"], "Matheus");

    let resp = client
        .patch(&server.base_url)
        .header("x-admin-password", SECRET)
        .json(&json!({ "path": "experience[5].title", "value": "x" }))
        .send()
        .await
        .expect("PATCH");
    assert_eq!(resp.status().as_u16(), 400);

    server.stop().await;
}

#[tokio::test]
async fn test_routing_errors() {
    let server = TestServer::start(1024).await;
    let client = reqwest::Client::new();

    let resp = client.put(&server.base_url).send().await.expect("PUT");
    assert_eq!(resp.status().as_u16(), 405);
    assert!(resp.headers().contains_key("allow"));

    let other = server.base_url.replace("/api/portfolio", "/api/unknown");
    let resp = client.get(&other).send().await.expect("GET");
    assert_eq!(resp.status().as_u16(), 404);

    let resp = client
        .post(&server.base_url)
        .header("x-admin-password", SECRET)
        .body("x".repeat(4096))
        .send()
        .await
        .expect("POST");
    assert_eq!(resp.status().as_u16(), 413);

    server.stop().await;
}
