// src/upstream.rs
//! Clients for the external model-server collaborators (sentiment
//! classifier, NER pipeline). The engine never talks to them directly;
//! the API layer resolves missing signals here before calling in.
//!
//! Collaborator failures degrade, never crash: sentiment falls back to
//! `{neutral, 0.0}` and entity extraction to empty lists, with a traced
//! warning either way.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::mood::{SentimentLabel, SentimentSignal};
use crate::text::anon_hash;
use crate::violence::ReportEntities;

pub const ENV_MODEL_SERVER_URL: &str = "MODEL_SERVER_URL";

#[derive(Debug, Serialize)]
struct SentimentReq<'a> {
    text: &'a str,
    language: &'a str,
}

#[derive(Debug, Deserialize)]
struct SentimentResp {
    label: String,
    confidence: f32,
}

#[derive(Debug, Serialize)]
struct ExtractReq<'a> {
    text: &'a str,
    report_type: &'a str,
}

#[derive(Debug, Deserialize)]
struct ExtractResp {
    #[serde(default)]
    entities: ReportEntities,
}

/// Thin HTTP client for the model server. A missing `MODEL_SERVER_URL`
/// disables it; every call then returns the degraded default immediately.
#[derive(Clone)]
pub struct ModelServerClient {
    base_url: Option<String>,
    http: reqwest::Client,
}

impl ModelServerClient {
    pub fn from_env() -> Self {
        let http = reqwest::Client::builder()
            .user_agent("jamcare-triage/0.1")
            .connect_timeout(Duration::from_secs(4))
            .timeout(Duration::from_secs(10))
            .build()
            .expect("reqwest client");
        Self {
            base_url: std::env::var(ENV_MODEL_SERVER_URL).ok(),
            http,
        }
    }

    /// Builder for tests.
    pub fn with_base_url(url: Option<String>) -> Self {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(1))
            .timeout(Duration::from_secs(2))
            .build()
            .expect("reqwest client");
        Self {
            base_url: url,
            http,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.base_url.is_some()
    }

    /// Ask the sentiment collaborator; degrade on any failure.
    pub async fn sentiment(&self, text: &str, language: &str) -> SentimentSignal {
        let Some(base) = &self.base_url else {
            return SentimentSignal::degraded();
        };

        let req = SentimentReq { text, language };
        let out = async {
            let resp = self
                .http
                .post(format!("{base}/sentiment"))
                .json(&req)
                .send()
                .await?
                .error_for_status()?;
            let body: SentimentResp = resp.json().await?;
            Ok::<SentimentResp, reqwest::Error>(body)
        }
        .await;

        match out {
            Ok(body) => match SentimentLabel::parse(&body.label) {
                Some(label) => SentimentSignal::new(label, body.confidence),
                None => {
                    tracing::warn!(id = %anon_hash(text), label = %body.label, "unknown sentiment label, degrading");
                    SentimentSignal::degraded()
                }
            },
            Err(e) => {
                tracing::warn!(id = %anon_hash(text), error = %e, "sentiment collaborator unavailable, degrading");
                SentimentSignal::degraded()
            }
        }
    }

    /// Ask the NER collaborator; degrade to empty entities on any failure.
    pub async fn entities(&self, text: &str, report_type: &str) -> ReportEntities {
        let Some(base) = &self.base_url else {
            return ReportEntities::default();
        };

        let req = ExtractReq { text, report_type };
        let out = async {
            let resp = self
                .http
                .post(format!("{base}/extract"))
                .json(&req)
                .send()
                .await?
                .error_for_status()?;
            let body: ExtractResp = resp.json().await?;
            Ok::<ExtractResp, reqwest::Error>(body)
        }
        .await;

        match out {
            Ok(body) => body.entities,
            Err(e) => {
                tracing::warn!(id = %anon_hash(text), error = %e, "NER collaborator unavailable, degrading");
                ReportEntities::default()
            }
        }
    }
}
