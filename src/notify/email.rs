// src/notify/email.rs

use anyhow::{Context, Result};
use lettre::message::{header, Mailbox, Message};
use lettre::transport::smtp::{authentication::Credentials, AsyncSmtpTransport};
use lettre::{AsyncTransport, Tokio1Executor};

use super::{AlertEvent, Notifier};

/// Mails crisis alerts to the on-call counselor address.
pub struct EmailNotifier {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl EmailNotifier {
    /// Build from env. Call only when SMTP_HOST is set; a partial SMTP
    /// configuration is a deployment error and fails fast.
    pub fn from_env() -> Self {
        let host = std::env::var("SMTP_HOST").expect("SMTP_HOST missing");
        let user = std::env::var("SMTP_USER").expect("SMTP_USER missing");
        let pass = std::env::var("SMTP_PASS").expect("SMTP_PASS missing");
        let from_addr = std::env::var("NOTIFY_EMAIL_FROM").expect("NOTIFY_EMAIL_FROM missing");
        let to_addr = std::env::var("NOTIFY_EMAIL_TO").expect("NOTIFY_EMAIL_TO missing");

        let creds = Credentials::new(user, pass);
        let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay(&host)
            .expect("invalid SMTP_HOST")
            .credentials(creds)
            .build();

        let from = from_addr.parse().expect("invalid NOTIFY_EMAIL_FROM");
        let to = to_addr.parse().expect("invalid NOTIFY_EMAIL_TO");

        Self { mailer, from, to }
    }
}

#[async_trait::async_trait]
impl Notifier for EmailNotifier {
    async fn send(&self, ev: &AlertEvent) -> Result<()> {
        let subject = format!("Crisis alert: {} (ref {})", ev.risk_level.as_str(), ev.anon_id);
        let body = format!(
            "Reference: {}\nRisk level: {}\nSuicide flag: {}\nSelf-harm flag: {}\nTimestamp: {}\n",
            ev.anon_id,
            ev.risk_level.as_str(),
            ev.suicide_risk,
            ev.self_harm_risk,
            ev.ts.to_rfc3339()
        );

        let msg = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(subject)
            .header(header::ContentType::TEXT_PLAIN)
            .body(body)
            .context("build email")?;

        self.mailer.send(msg).await.context("send email")?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "email"
    }
}
