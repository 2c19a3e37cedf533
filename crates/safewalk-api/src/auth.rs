//! Identity resolution and session extractors.
//!
//! A request carries its identity either as HTTP Basic credentials checked
//! against the configured accounts, or as a header set by a trusted
//! federated-login proxy. Anything unusable (missing header, bad base64,
//! unknown account, wrong password) resolves to no identity; it is never a
//! server error.
//!
//! The extractors build a [`Session`] per request and run it through the
//! session gate:
//!
//! | Extractor | Admits | Otherwise |
//! |-----------|--------|-----------|
//! | [`CurrentSession`] | everyone | never rejects |
//! | [`SignedIn`] | any authenticated session | 401 |
//! | [`UserSession`] | users | 401 when anonymous, 403 for admins |
//! | [`AdminSession`] | the administrator | 401 when anonymous, 403 for users |

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, header, request::Parts};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use serde::Deserialize;
use tracing::debug;

use safewalk_core::session::{
  ADMIN_CONSOLE_PATH, DASHBOARD_PATH, DEFAULT_ADMIN_EMAIL, GateDecision, Identity,
  Session, gate,
};

use crate::{AppState, error::ApiError};

// ─── Configuration ───────────────────────────────────────────────────────────

/// One account accepted over HTTP Basic auth.
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
  pub email:         String,
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  pub password_hash: String,
  #[serde(default)]
  pub display_name:  Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
  /// The single operator address that resolves to the admin role.
  pub admin_email:    String,
  pub accounts:       Vec<Account>,
  /// Header carrying the signed-in email when a login proxy fronts the
  /// service. Unset means the header is ignored.
  pub trusted_header: Option<String>,
}

impl Default for IdentityConfig {
  fn default() -> Self {
    Self {
      admin_email:    DEFAULT_ADMIN_EMAIL.to_owned(),
      accounts:       Vec::new(),
      trusted_header: None,
    }
  }
}

// ─── Resolution ──────────────────────────────────────────────────────────────

/// Resolve the caller's identity from request headers.
pub fn resolve_identity(headers: &HeaderMap, config: &IdentityConfig) -> Option<Identity> {
  if let Some(name) = config.trusted_header.as_deref()
    && let Some(email) = headers.get(name).and_then(|v| v.to_str().ok())
  {
    let email = email.trim();
    if !email.is_empty() {
      return Some(identity_for(email, config));
    }
  }
  verify_basic(headers, config)
}

fn verify_basic(headers: &HeaderMap, config: &IdentityConfig) -> Option<Identity> {
  let encoded = headers
    .get(header::AUTHORIZATION)?
    .to_str()
    .ok()?
    .strip_prefix("Basic ")?;

  let decoded = B64.decode(encoded).ok()?;
  let creds = std::str::from_utf8(&decoded).ok()?;
  let (email, password) = creds.split_once(':')?;

  let account = config
    .accounts
    .iter()
    .find(|a| a.email.eq_ignore_ascii_case(email))?;

  let parsed_hash = PasswordHash::new(&account.password_hash).ok()?;
  if Argon2::default()
    .verify_password(password.as_bytes(), &parsed_hash)
    .is_err()
  {
    debug!(email, "basic auth rejected");
    return None;
  }

  Some(identity_for(&account.email, config))
}

fn identity_for(email: &str, config: &IdentityConfig) -> Identity {
  let display_name = config
    .accounts
    .iter()
    .find(|a| a.email.eq_ignore_ascii_case(email))
    .and_then(|a| a.display_name.clone());
  Identity {
    uid: email.to_lowercase(),
    email: Some(email.to_owned()),
    display_name,
  }
}

// ─── Extractors ──────────────────────────────────────────────────────────────

/// The resolved session, whatever it is.
pub struct CurrentSession(pub Session);

/// An authenticated session of either role.
pub struct SignedIn(pub Session);

/// A session admitted to user pages.
pub struct UserSession(pub Session);

/// A session admitted to the admin console.
pub struct AdminSession(pub Session);

fn session_from(parts: &Parts, config: &IdentityConfig) -> Session {
  Session::establish(resolve_identity(&parts.headers, config), &config.admin_email)
}

/// Run the gate for a representative page and turn a redirect into a
/// rejection.
fn admit(session: Session, page: &str) -> Result<Session, ApiError> {
  match gate(&session, page) {
    GateDecision::Allow => Ok(session),
    GateDecision::Redirect(_) if !session.is_authenticated() => {
      Err(ApiError::Unauthorized)
    }
    GateDecision::Redirect(redirect) => Err(ApiError::Forbidden { redirect }),
    GateDecision::Wait => Err(ApiError::Unauthorized),
  }
}

impl<S: Send + Sync> FromRequestParts<AppState<S>> for CurrentSession {
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    Ok(CurrentSession(session_from(parts, &state.identity)))
  }
}

impl<S: Send + Sync> FromRequestParts<AppState<S>> for SignedIn {
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let session = session_from(parts, &state.identity);
    if !session.is_authenticated() {
      return Err(ApiError::Unauthorized);
    }
    Ok(SignedIn(session))
  }
}

impl<S: Send + Sync> FromRequestParts<AppState<S>> for UserSession {
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    admit(session_from(parts, &state.identity), DASHBOARD_PATH).map(UserSession)
  }
}

impl<S: Send + Sync> FromRequestParts<AppState<S>> for AdminSession {
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    admit(session_from(parts, &state.identity), ADMIN_CONSOLE_PATH)
      .map(AdminSession)
  }
}
