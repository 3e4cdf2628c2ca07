// src/notify/webhook.rs

use anyhow::{anyhow, Result};
use reqwest::Client;
use std::time::Duration;

use super::{AlertEvent, Notifier};

pub const ENV_WEBHOOK_URL: &str = "TRIAGE_ALERT_WEBHOOK_URL";

/// Posts crisis alerts to a team channel webhook (Slack/Discord style
/// `{"text": ...}` payload).
#[derive(Clone)]
pub struct WebhookNotifier {
    webhook_url: Option<String>,
    client: Client,
    timeout: Duration,
    max_retries: u8,
}

impl WebhookNotifier {
    pub fn from_env() -> Self {
        Self {
            webhook_url: std::env::var(ENV_WEBHOOK_URL).ok(),
            client: Client::new(),
            timeout: Duration::from_secs(5),
            max_retries: 3,
        }
    }

    /// Builder for tests/tools.
    pub fn new(url: String) -> Self {
        Self {
            webhook_url: Some(url),
            client: Client::new(),
            timeout: Duration::from_secs(5),
            max_retries: 3,
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    pub fn with_retries(mut self, retries: u8) -> Self {
        self.max_retries = retries;
        self
    }
}

#[async_trait::async_trait]
impl Notifier for WebhookNotifier {
    async fn send(&self, ev: &AlertEvent) -> Result<()> {
        let Some(url) = &self.webhook_url else {
            tracing::debug!("webhook disabled (no {ENV_WEBHOOK_URL})");
            return Ok(());
        };

        let flags = match (ev.suicide_risk, ev.self_harm_risk) {
            (true, true) => "suicide+self-harm",
            (true, false) => "suicide",
            (false, true) => "self-harm",
            (false, false) => "score",
        };
        let text = format!(
            "*Crisis alert:* ref `{}` — level *{}* ({flags})\n@ {}",
            ev.anon_id,
            ev.risk_level.as_str(),
            ev.ts.to_rfc3339()
        );
        let body = serde_json::json!({ "text": text });

        let mut attempt: u8 = 0;
        loop {
            attempt += 1;
            let res = self
                .client
                .post(url)
                .timeout(self.timeout)
                .json(&body)
                .send()
                .await;

            match res {
                Ok(rsp) => {
                    if let Err(e) = rsp.error_for_status_ref() {
                        if attempt < self.max_retries {
                            tokio::time::sleep(Duration::from_millis(500u64 << (attempt - 1))).await;
                            continue;
                        }
                        return Err(anyhow!("webhook HTTP error: {e}"));
                    }
                    return Ok(());
                }
                Err(e) => {
                    if attempt < self.max_retries {
                        tokio::time::sleep(Duration::from_millis(500u64 << (attempt - 1))).await;
                        continue;
                    }
                    return Err(anyhow!("webhook request failed: {e}"));
                }
            }
        }
    }

    fn name(&self) -> &'static str {
        "webhook"
    }
}
