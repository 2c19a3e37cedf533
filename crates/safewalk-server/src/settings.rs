//! Runtime configuration, layered from an optional TOML file and
//! `SAFEWALK_*` environment variables.
//!
//! Nested keys use a double underscore in the environment, e.g.
//! `SAFEWALK_EMAIL__SERVICE_ID`.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use safewalk_api::{auth::IdentityConfig, email::EmailConfig, geocode::GeocoderConfig};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
  pub identity:   IdentityConfig,
  pub email:      EmailConfig,
  pub geocoder:   GeocoderConfig,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:       "127.0.0.1".to_owned(),
      port:       8080,
      store_path: PathBuf::from("~/.local/share/safewalk/safewalk.db"),
      identity:   IdentityConfig::default(),
      email:      EmailConfig::default(),
      geocoder:   GeocoderConfig::default(),
    }
  }
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Read `path` (if it exists) and the environment into a [`ServerConfig`].
pub fn load(path: &Path) -> Result<ServerConfig, ConfigError> {
  Config::builder()
    .add_source(File::from(path).required(false))
    .add_source(
      Environment::with_prefix("SAFEWALK")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true),
    )
    .build()?
    .try_deserialize()
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use safewalk_core::session::DEFAULT_ADMIN_EMAIL;

  use super::*;

  fn write_temp(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("safewalk-settings-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
  }

  #[test]
  fn missing_file_gives_defaults() {
    let cfg = load(Path::new("/nonexistent/safewalk.toml")).unwrap();
    assert_eq!(cfg.identity.admin_email, DEFAULT_ADMIN_EMAIL);
    assert_eq!(cfg.geocoder.region, "Karnataka,India");
    assert!(cfg.identity.accounts.is_empty());
  }

  #[test]
  fn file_overrides_nested_sections() {
    let path = write_temp(
      "override.toml",
      r#"
        port = 9090
        store_path = "/var/lib/safewalk.db"

        [identity]
        trusted_header = "x-forwarded-email"

        [[identity.accounts]]
        email = "asha@example.com"
        password_hash = "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA"

        [email]
        service_id = "service_abc"
      "#,
    );
    let cfg = load(&path).unwrap();
    assert_eq!(cfg.port, 9090);
    assert_eq!(cfg.address(), "127.0.0.1:9090");
    assert_eq!(cfg.identity.trusted_header.as_deref(), Some("x-forwarded-email"));
    assert_eq!(cfg.identity.accounts.len(), 1);
    assert_eq!(cfg.identity.admin_email, DEFAULT_ADMIN_EMAIL);
    assert_eq!(cfg.email.service_id, "service_abc");
    assert!(cfg.email.endpoint.starts_with("https://api.emailjs.com"));
  }

  #[test]
  fn tilde_expands_to_home() {
    let Ok(home) = std::env::var("HOME") else { return };
    assert_eq!(
      expand_tilde(Path::new("~/data/safewalk.db")),
      PathBuf::from(home).join("data/safewalk.db")
    );
    assert_eq!(expand_tilde(Path::new("/abs.db")), PathBuf::from("/abs.db"));
  }
}
