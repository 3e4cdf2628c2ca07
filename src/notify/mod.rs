// src/notify/mod.rs
//! Crisis-alert delivery: a Notifier trait with webhook and email sinks,
//! fanned out through a mux. Payloads carry the anonymized reference and
//! severity only, never the disclosure text.

pub mod email;
pub mod webhook;

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::risk::RiskLevel;

/// What a sink receives when an alert fires.
#[derive(Debug, Clone)]
pub struct AlertEvent {
    pub anon_id: String,
    pub risk_level: RiskLevel,
    pub suicide_risk: bool,
    pub self_harm_risk: bool,
    pub ts: DateTime<Utc>,
}

#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, ev: &AlertEvent) -> anyhow::Result<()>;
    fn name(&self) -> &'static str;
}

/// Fan-out over all configured sinks. Delivery failures are logged and
/// swallowed: alerting must never fail the analysis request.
#[derive(Clone, Default)]
pub struct NotifierMux {
    sinks: Vec<Arc<dyn Notifier>>,
}

impl NotifierMux {
    /// Build from the environment: webhook sink if
    /// `TRIAGE_ALERT_WEBHOOK_URL` is set, email sink if `SMTP_HOST` is set.
    pub fn from_env() -> Self {
        let mut sinks: Vec<Arc<dyn Notifier>> = Vec::new();
        if std::env::var(webhook::ENV_WEBHOOK_URL).is_ok() {
            sinks.push(Arc::new(webhook::WebhookNotifier::from_env()));
        }
        if std::env::var("SMTP_HOST").is_ok() {
            sinks.push(Arc::new(email::EmailNotifier::from_env()));
        }
        Self { sinks }
    }

    pub fn with_sink(mut self, sink: Arc<dyn Notifier>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub async fn dispatch(&self, ev: &AlertEvent) {
        for sink in &self.sinks {
            if let Err(e) = sink.send(ev).await {
                tracing::warn!(sink = sink.name(), error = ?e, "alert delivery failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSink {
        sent: AtomicUsize,
        fail: bool,
    }

    #[async_trait::async_trait]
    impl Notifier for CountingSink {
        async fn send(&self, _ev: &AlertEvent) -> anyhow::Result<()> {
            self.sent.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                anyhow::bail!("boom");
            }
            Ok(())
        }
        fn name(&self) -> &'static str {
            "counting"
        }
    }

    fn event() -> AlertEvent {
        AlertEvent {
            anon_id: "ab12cd34ef56".into(),
            risk_level: RiskLevel::Critical,
            suicide_risk: true,
            self_harm_risk: false,
            ts: Utc::now(),
        }
    }

    #[tokio::test]
    async fn dispatch_reaches_every_sink_despite_failures() {
        let failing = Arc::new(CountingSink {
            sent: AtomicUsize::new(0),
            fail: true,
        });
        let ok = Arc::new(CountingSink {
            sent: AtomicUsize::new(0),
            fail: false,
        });

        let mux = NotifierMux::default()
            .with_sink(failing.clone())
            .with_sink(ok.clone());
        mux.dispatch(&event()).await;

        assert_eq!(failing.sent.load(Ordering::SeqCst), 1);
        assert_eq!(ok.sent.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn mux_without_env_is_empty() {
        // from_env reads process env; the default build is what matters here
        assert!(NotifierMux::default().is_empty());
    }
}
