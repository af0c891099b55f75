//! A thin `reqwest` client for calling a running `elyx-server` instance's
//! `/ask` endpoint. The only coupling between chat-sim and the RAG service
//! is this HTTP boundary — they never share a process.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct AskRequestBody {
    question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    since: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct AskResponseBody {
    pub role: String,
    pub answer: String,
    #[allow(dead_code)]
    pub sources: Vec<String>,
}

pub struct RagClient {
    http: reqwest::Client,
    base_url: String,
}

impl RagClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { http: reqwest::Client::new(), base_url: base_url.into() }
    }

    pub async fn ask(&self, question: &str, role: Option<&str>) -> Result<AskResponseBody, reqwest::Error> {
        let body = AskRequestBody { question: question.to_string(), role: role.map(str::to_string), since: None };
        self.http.post(format!("{}/ask", self.base_url)).json(&body).send().await?.error_for_status()?.json().await
    }
}
