//! Mail delivery boundary

use super::NotifyError;
use crate::core::Config;
use async_trait::async_trait;
use serde::Serialize;

/// External message-delivery service
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), NotifyError>;
}

/// Resend HTTP API client
pub struct ResendMailer {
    http: reqwest::Client,
    api_key: String,
    from: String,
    base_url: String,
}

const RESEND_BASE_URL: &str = "https://api.resend.com";

impl ResendMailer {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: config.resend_api_key.clone(),
            from: config.alert_from_address.clone(),
            base_url: RESEND_BASE_URL.to_string(),
        }
    }
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    text: &'a str,
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), NotifyError> {
        let url = format!("{}/emails", self.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&SendEmailRequest {
                from: &self.from,
                to: [to],
                subject,
                text: body,
            })
            .send()
            .await
            .map_err(|e| NotifyError::Delivery(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Delivery(format!("{status}: {body}")));
        }
        Ok(())
    }
}
