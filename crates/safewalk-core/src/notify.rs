//! Outbound alert notification through the transactional email collaborator.

use std::future::Future;

use serde::Serialize;

use crate::{alert::SosAlert, session::Identity};

/// Sender address used when the alerting user has no email.
pub const FALLBACK_SENDER: &str = "sos@safewalk.com";

pub const ALERT_SUBJECT: &str = "URGENT: SOS Alert from SafeWalk User";

/// The template fields sent to the email service for one SOS alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertEmail {
  pub from_name:  String,
  pub from_email: String,
  pub subject:    String,
  pub message:    String,
}

impl AlertEmail {
  pub fn for_alert(alert: &SosAlert, identity: Option<&Identity>) -> Self {
    let email = identity.and_then(|i| i.email.as_deref());
    let from_name = if alert.user.name.is_empty() {
      "SafeWalk User".to_owned()
    } else {
      alert.user.name.clone()
    };
    let message = format!(
      "A SafeWalk user has triggered an SOS alert. Immediate assistance may be required.\n\n\
       User: {}\nEmail: {}\nLocation: {}\nMap Link: {}",
      alert.user.name,
      email.unwrap_or("Not provided"),
      alert.location.name,
      alert.location.maps_url(),
    );
    Self {
      from_name,
      from_email: email.unwrap_or(FALLBACK_SENDER).to_owned(),
      subject: ALERT_SUBJECT.to_owned(),
      message,
    }
  }
}

/// Abstraction over the transactional email service.
///
/// A send is attempted once; callers decide what a failure means.
pub trait AlertNotifier: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn send<'a>(
    &'a self,
    email: &'a AlertEmail,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}
