//! Transactional mail collaborator. Delivery is best-effort: review
//! transitions commit before any mail is attempted, and a failed send is
//! logged, never retried, never surfaced to the student-facing request.

use reqwest::Client;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::Config;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("mail request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("mail API returned {status}: {body}")]
    Api { status: u16, body: String },
}

#[derive(Debug, Serialize)]
struct MailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

pub struct Mailer {
    client: Client,
    api_url: String,
    api_key: Option<String>,
    sender: String,
}

impl Mailer {
    pub fn new(config: &Config) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_url: config.mail_api_url.clone(),
            api_key: config.mail_api_key.clone(),
            sender: config.mail_sender.clone(),
        }
    }

    pub async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), MailError> {
        let api_key = match &self.api_key {
            Some(key) => key,
            None => {
                // local/dev runs without MAIL_API_KEY just skip delivery
                info!("mail delivery disabled, skipping '{}' to {}", subject, to);
                return Ok(());
            }
        };

        let body = MailRequest {
            from: &self.sender,
            to,
            subject,
            html,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }

    /// Fire-and-forget: spawn the send and log the outcome. Callers must not
    /// depend on delivery.
    pub fn send_in_background(self: &Arc<Self>, to: String, subject: String, html: String) {
        let mailer = self.clone();
        tokio::spawn(async move {
            if let Err(e) = mailer.send(&to, &subject, &html).await {
                warn!("notification mail to {} failed: {}", to, e);
            }
        });
    }
}
