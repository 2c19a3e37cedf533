//! Device-local usage counters shown on the admin console.
//!
//! The counters are coarse: they count session establishments on this
//! deployment, not distinct people across deployments.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UsageCounters {
  pub active_users:      u64,
  pub new_registrations: u64,
  pub verified_accounts: u64,
}

impl UsageCounters {
  /// Apply one session establishment.
  ///
  /// - `first_seen_account`: the identity has never established a session here.
  /// - `first_today`: no session has counted as a registration today.
  pub fn record_session(&mut self, first_seen_account: bool, first_today: bool) {
    self.active_users += 1;
    if first_seen_account {
      self.verified_accounts += 1;
    }
    if first_today {
      self.new_registrations += 1;
    }
  }
}
