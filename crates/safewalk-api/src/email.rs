//! EmailJS REST client implementing [`AlertNotifier`].

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use safewalk_core::notify::{AlertEmail, AlertNotifier};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
  pub endpoint:    String,
  pub service_id:  String,
  pub template_id: String,
  /// The account's public key, sent as `user_id`.
  pub public_key:  String,
}

impl Default for EmailConfig {
  fn default() -> Self {
    Self {
      endpoint:    "https://api.emailjs.com/api/v1.0/email/send".to_owned(),
      service_id:  String::new(),
      template_id: String::new(),
      public_key:  String::new(),
    }
  }
}

impl EmailConfig {
  fn is_configured(&self) -> bool {
    !(self.service_id.is_empty() || self.template_id.is_empty() || self.public_key.is_empty())
  }
}

#[derive(Debug, Error)]
pub enum EmailError {
  #[error("email service is not configured")]
  NotConfigured,

  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("email service rejected the message ({status}): {body}")]
  Rejected { status: u16, body: String },
}

#[derive(Serialize)]
struct SendRequest<'a> {
  service_id:      &'a str,
  template_id:     &'a str,
  user_id:         &'a str,
  template_params: &'a AlertEmail,
}

/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct EmailClient {
  client: Client,
  config: EmailConfig,
}

impl EmailClient {
  pub fn new(config: EmailConfig) -> reqwest::Result<Self> {
    let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
    Ok(Self { client, config })
  }
}

impl AlertNotifier for EmailClient {
  type Error = EmailError;

  async fn send(&self, email: &AlertEmail) -> Result<(), EmailError> {
    if !self.config.is_configured() {
      return Err(EmailError::NotConfigured);
    }

    let resp = self
      .client
      .post(&self.config.endpoint)
      .json(&SendRequest {
        service_id:      &self.config.service_id,
        template_id:     &self.config.template_id,
        user_id:         &self.config.public_key,
        template_params: email,
      })
      .send()
      .await?;

    let status = resp.status();
    if !status.is_success() {
      let body = resp.text().await.unwrap_or_default();
      return Err(EmailError::Rejected { status: status.as_u16(), body });
    }
    debug!(service = %self.config.service_id, "alert email accepted");
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn email() -> AlertEmail {
    AlertEmail {
      from_name:  "asha".into(),
      from_email: "asha@example.com".into(),
      subject:    "subject".into(),
      message:    "message".into(),
    }
  }

  #[tokio::test]
  async fn unconfigured_client_fails_without_network() {
    let client = EmailClient::new(EmailConfig::default()).unwrap();
    let err = client.send(&email()).await.unwrap_err();
    assert!(matches!(err, EmailError::NotConfigured));
  }

  #[tokio::test]
  async fn unreachable_endpoint_is_an_http_error() {
    let client = EmailClient::new(EmailConfig {
      endpoint:    "http://127.0.0.1:1/send".into(),
      service_id:  "service".into(),
      template_id: "template".into(),
      public_key:  "key".into(),
    })
    .unwrap();
    let err = client.send(&email()).await.unwrap_err();
    assert!(matches!(err, EmailError::Http(_)));
  }

  #[test]
  fn request_body_shape() {
    let e = email();
    let body = serde_json::to_value(SendRequest {
      service_id:      "s",
      template_id:     "t",
      user_id:         "u",
      template_params: &e,
    })
    .unwrap();
    assert_eq!(body["user_id"], "u");
    assert_eq!(body["template_params"]["from_email"], "asha@example.com");
  }
}
