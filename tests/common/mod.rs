#![allow(dead_code)]

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;

/// What the fake webhook answers with, plus what it has received.
#[derive(Debug, Clone)]
pub struct Script {
    pub list_status: u16,
    pub list_body: String,
    pub submit_status: u16,
    pub submit_body: String,
    pub received: Vec<Value>,
}

impl Default for Script {
    fn default() -> Self {
        Self {
            list_status: 200,
            list_body: "[]".to_string(),
            submit_status: 200,
            submit_body: "[]".to_string(),
            received: Vec::new(),
        }
    }
}

pub struct FakeWebhook {
    pub base_url: String,
    pub script: Arc<Mutex<Script>>,
}

impl FakeWebhook {
    pub async fn start(script: Script) -> Self {
        let script = Arc::new(Mutex::new(script));
        let app = Router::new()
            .route("/webhook/moods", get(list_moods))
            .route("/webhook/mood/submit", post(submit_mood))
            .with_state(Arc::clone(&script));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake webhook");
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            script,
        }
    }

    pub fn moods_url(&self) -> String {
        format!("{}/webhook/moods", self.base_url)
    }

    pub fn submit_url(&self) -> String {
        format!("{}/webhook/mood/submit", self.base_url)
    }

    pub async fn received(&self) -> Vec<Value> {
        self.script.lock().await.received.clone()
    }
}

async fn list_moods(State(script): State<Arc<Mutex<Script>>>) -> (StatusCode, String) {
    let script = script.lock().await;
    (status(script.list_status), script.list_body.clone())
}

async fn submit_mood(
    State(script): State<Arc<Mutex<Script>>>,
    Json(body): Json<Value>,
) -> (StatusCode, String) {
    let mut script = script.lock().await;
    script.received.push(body);
    (status(script.submit_status), script.submit_body.clone())
}

fn status(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap()
}

pub fn today() -> String {
    chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string()
}
