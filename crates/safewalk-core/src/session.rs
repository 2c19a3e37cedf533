//! Session context and the routing policy that gates views by role.
//!
//! A [`Session`] is built once per request from the identity signal and passed
//! down explicitly. The role is resolved at construction time by comparing the
//! identity's email with the single operator address; SafeWalk has exactly one
//! administrator account.

use serde::{Deserialize, Serialize};

/// Operator address used when none is configured.
pub const DEFAULT_ADMIN_EMAIL: &str = "officialpolice@gmail.com";

pub const ENTRY_PATH: &str = "/";
pub const DASHBOARD_PATH: &str = "/dashboard";
pub const ADMIN_CONSOLE_PATH: &str = "/admin/dashboard";

// ─── Identity ────────────────────────────────────────────────────────────────

/// The signed-in user as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
  /// Stable identifier assigned by the provider.
  pub uid:          String,
  pub email:        Option<String>,
  pub display_name: Option<String>,
}

impl Identity {
  /// The name shown on alerts and community posts: the display name if set,
  /// otherwise the first seven characters of the email's local part.
  pub fn short_name(&self) -> String {
    if let Some(name) = self.display_name.as_deref().filter(|n| !n.is_empty()) {
      return name.to_owned();
    }
    match self.email.as_deref() {
      Some(email) => {
        let local = email.split('@').next().unwrap_or_default();
        local.chars().take(7).collect()
      }
      None => "Anonymous".to_owned(),
    }
  }
}

// ─── Role & session ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  #[default]
  User,
  Admin,
}

impl Role {
  pub fn resolve(identity: &Identity, admin_email: &str) -> Self {
    let is_operator = identity
      .email
      .as_deref()
      .is_some_and(|email| email.eq_ignore_ascii_case(admin_email));
    if is_operator {
      Self::Admin
    } else {
      Self::User
    }
  }
}

/// Explicit session context: who is signed in, with which role, and whether
/// the identity signal is still pending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
  pub identity: Option<Identity>,
  pub role:     Role,
  pub loading:  bool,
}

impl Session {
  /// A session whose identity signal has not arrived yet.
  pub fn loading() -> Self {
    Self { identity: None, role: Role::User, loading: true }
  }

  /// Resolve a session from the identity signal. `None` (including a failed
  /// signal) yields an unauthenticated session.
  pub fn establish(identity: Option<Identity>, admin_email: &str) -> Self {
    let role = identity
      .as_ref()
      .map(|i| Role::resolve(i, admin_email))
      .unwrap_or_default();
    Self { identity, role, loading: false }
  }

  pub fn is_authenticated(&self) -> bool { self.identity.is_some() }

  pub fn render_state(&self) -> RenderState {
    match (&self.identity, self.role) {
      (None, _) => RenderState::Unauthenticated,
      (Some(_), Role::User) => RenderState::User,
      (Some(_), Role::Admin) => RenderState::Admin,
    }
  }
}

// ─── Gate ────────────────────────────────────────────────────────────────────

/// Which top-level view the session may render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderState {
  Unauthenticated,
  User,
  Admin,
}

impl RenderState {
  /// Where a freshly signed-in session lands.
  pub fn landing_path(self) -> &'static str {
    match self {
      Self::Unauthenticated => ENTRY_PATH,
      Self::User => DASHBOARD_PATH,
      Self::Admin => ADMIN_CONSOLE_PATH,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
  /// The login / signup view.
  Entry,
  User,
  Admin,
}

impl PageKind {
  pub fn classify(path: &str) -> Self {
    if path == ENTRY_PATH || path.is_empty() {
      Self::Entry
    } else if path.starts_with("/admin") {
      Self::Admin
    } else {
      Self::User
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", content = "to", rename_all = "snake_case")]
pub enum GateDecision {
  Allow,
  /// The identity signal is still pending; render nothing yet.
  Wait,
  Redirect(&'static str),
}

/// Decide whether `session` may view `path`.
///
/// Every redirect target is itself allowed for the same session, so applying
/// the gate to its own output never redirects twice.
pub fn gate(session: &Session, path: &str) -> GateDecision {
  if session.loading {
    return GateDecision::Wait;
  }
  let page = PageKind::classify(path);
  match (session.render_state(), page) {
    (RenderState::Unauthenticated, PageKind::Entry) => GateDecision::Allow,
    (RenderState::Unauthenticated, _) => GateDecision::Redirect(ENTRY_PATH),
    (RenderState::User, PageKind::User) => GateDecision::Allow,
    (RenderState::User, _) => GateDecision::Redirect(DASHBOARD_PATH),
    (RenderState::Admin, PageKind::Admin) => GateDecision::Allow,
    (RenderState::Admin, _) => GateDecision::Redirect(ADMIN_CONSOLE_PATH),
  }
}
