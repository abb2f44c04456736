//! Runtime configuration, deserialised from `config.toml` and `ROSTER_*`
//! environment variables.

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use axum::http::{HeaderName, HeaderValue, Method};
use jsonwebtoken::Algorithm;
use serde::{Deserialize, Deserializer};
use thiserror::Error;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};

/// Prefix of the environment variables layered over the config file.
pub const ENV_PREFIX: &str = "ROSTER";

/// Issuer prefix of ID tokens minted for a managed identity project.
const PROJECT_ISSUER_PREFIX: &str = "https://securetoken.google.com/";

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("invalid CORS origin: {0:?}")]
  InvalidOrigin(String),
  #[error("invalid CORS method: {0:?}")]
  InvalidMethod(String),
  #[error("invalid CORS header: {0:?}")]
  InvalidHeader(String),
  #[error("`{0}` must be set for the configured token algorithm")]
  MissingKey(&'static str),
  #[error("failed to read key file {path:?}: {source}")]
  KeyFile {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },
  #[error("invalid key material: {0}")]
  Key(#[from] jsonwebtoken::errors::Error),
}

// ─── Server ──────────────────────────────────────────────────────────────────

/// Immutable server configuration, injected into the router at startup.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:            String,
  #[serde(default = "default_port")]
  pub port:            u16,
  #[serde(default = "default_store_path")]
  pub store_path:      PathBuf,
  /// Directory holding the pre-built front-end bundle.
  #[serde(default = "default_static_dir")]
  pub static_dir:      PathBuf,
  pub admin_name:      String,
  pub admin_password:  String,
  /// Deadline applied to every identity provider and store call.
  #[serde(default = "default_call_timeout_ms")]
  pub call_timeout_ms: u64,
  #[serde(default)]
  pub cors:            CorsConfig,
  #[serde(default)]
  pub identity:        IdentityConfig,
}

impl ServerConfig {
  /// Read the TOML file at `path` (if it exists) with `ROSTER_*` environment
  /// variables layered on top.
  pub fn load(path: &Path) -> Result<Self, ::config::ConfigError> {
    Self::load_with(path, environment())
  }

  fn load_with(
    path: &Path,
    env: ::config::Environment,
  ) -> Result<Self, ::config::ConfigError> {
    ::config::Config::builder()
      .add_source(::config::File::from(path).required(false))
      .add_source(env)
      .build()?
      .try_deserialize()
  }

  pub fn call_timeout(&self) -> Duration {
    Duration::from_millis(self.call_timeout_ms)
  }
}

/// Nested keys are separated by `__`. Values stay strings; secrets must
/// reach `check_admin` byte for byte, so no number or bool coercion happens
/// here. Typed fields convert on deserialisation.
fn environment() -> ::config::Environment {
  ::config::Environment::with_prefix(ENV_PREFIX)
    .prefix_separator("_")
    .separator("__")
}

/// Accept either a list or one comma-separated string.
fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
  D: Deserializer<'de>,
{
  #[derive(Deserialize)]
  #[serde(untagged)]
  enum List {
    Many(Vec<String>),
    Csv(String),
  }

  Ok(match List::deserialize(deserializer)? {
    List::Many(items) => items,
    List::Csv(s) => s
      .split(',')
      .map(str::trim)
      .filter(|s| !s.is_empty())
      .map(String::from)
      .collect(),
  })
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 5000 }
fn default_store_path() -> PathBuf { PathBuf::from("roster.db") }
fn default_static_dir() -> PathBuf { PathBuf::from("client/build") }
fn default_call_timeout_ms() -> u64 { 10_000 }

// ─── CORS ────────────────────────────────────────────────────────────────────

/// Cross-origin policy. Empty origin or header lists mean "any".
#[derive(Deserialize, Clone, Debug)]
pub struct CorsConfig {
  #[serde(default, deserialize_with = "string_list")]
  pub allowed_origins: Vec<String>,
  #[serde(default = "default_methods", deserialize_with = "string_list")]
  pub allowed_methods: Vec<String>,
  #[serde(default, deserialize_with = "string_list")]
  pub allowed_headers: Vec<String>,
}

impl Default for CorsConfig {
  fn default() -> Self {
    Self {
      allowed_origins: Vec::new(),
      allowed_methods: default_methods(),
      allowed_headers: Vec::new(),
    }
  }
}

fn default_methods() -> Vec<String> {
  ["GET", "POST", "PUT", "DELETE", "OPTIONS"]
    .into_iter()
    .map(String::from)
    .collect()
}

fn is_wildcard(list: &[String]) -> bool {
  list.is_empty() || list.iter().any(|s| s.trim() == "*")
}

impl CorsConfig {
  /// Build the tower-http layer, rejecting entries that are not valid HTTP
  /// tokens.
  pub fn layer(&self) -> Result<CorsLayer, ConfigError> {
    let origins = if is_wildcard(&self.allowed_origins) {
      AllowOrigin::any()
    } else {
      let values = self
        .allowed_origins
        .iter()
        .map(|o| {
          HeaderValue::from_str(o.trim())
            .map_err(|_| ConfigError::InvalidOrigin(o.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;
      AllowOrigin::list(values)
    };

    let methods = self
      .allowed_methods
      .iter()
      .map(|m| {
        Method::from_bytes(m.trim().to_ascii_uppercase().as_bytes())
          .map_err(|_| ConfigError::InvalidMethod(m.clone()))
      })
      .collect::<Result<Vec<_>, _>>()?;

    let headers = if is_wildcard(&self.allowed_headers) {
      AllowHeaders::any()
    } else {
      let names = self
        .allowed_headers
        .iter()
        .map(|h| {
          HeaderName::from_bytes(h.trim().as_bytes())
            .map_err(|_| ConfigError::InvalidHeader(h.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;
      AllowHeaders::list(names)
    };

    Ok(
      CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(methods)
        .allow_headers(headers),
    )
  }
}

// ─── Identity ────────────────────────────────────────────────────────────────

/// Token verification settings for [`JwtVerifier`](crate::identity::JwtVerifier).
#[derive(Deserialize, Clone, Debug)]
pub struct IdentityConfig {
  #[serde(default = "default_algorithm")]
  pub algorithm:       Algorithm,
  /// HMAC secret, for the `HS*` algorithms.
  #[serde(default)]
  pub secret:          Option<String>,
  /// PEM-encoded public key, for the asymmetric algorithms.
  #[serde(default)]
  pub public_key_path: Option<PathBuf>,
  /// Managed identity project; derives `issuer` and `audience` when those
  /// are not set explicitly.
  #[serde(default)]
  pub project_id:      Option<String>,
  #[serde(default)]
  pub issuer:          Option<String>,
  #[serde(default)]
  pub audience:        Option<String>,
}

impl Default for IdentityConfig {
  fn default() -> Self {
    Self {
      algorithm:       default_algorithm(),
      secret:          None,
      public_key_path: None,
      project_id:      None,
      issuer:          None,
      audience:        None,
    }
  }
}

fn default_algorithm() -> Algorithm { Algorithm::RS256 }

impl IdentityConfig {
  pub fn issuer(&self) -> Option<String> {
    self.issuer.clone().or_else(|| {
      self
        .project_id
        .as_ref()
        .map(|p| format!("{PROJECT_ISSUER_PREFIX}{p}"))
    })
  }

  pub fn audience(&self) -> Option<String> {
    self.audience.clone().or_else(|| self.project_id.clone())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn project_id_derives_issuer_and_audience() {
    let cfg = IdentityConfig {
      project_id: Some("demo".into()),
      ..Default::default()
    };
    assert_eq!(
      cfg.issuer().as_deref(),
      Some("https://securetoken.google.com/demo")
    );
    assert_eq!(cfg.audience().as_deref(), Some("demo"));
  }

  #[test]
  fn explicit_issuer_wins_over_project_id() {
    let cfg = IdentityConfig {
      project_id: Some("demo".into()),
      issuer: Some("https://issuer.example".into()),
      ..Default::default()
    };
    assert_eq!(cfg.issuer().as_deref(), Some("https://issuer.example"));
  }

  fn load_env(vars: &[(&str, &str)]) -> ServerConfig {
    let source = vars
      .iter()
      .map(|(k, v)| (k.to_string(), v.to_string()))
      .collect::<::config::Map<String, String>>();
    ServerConfig::load_with(
      Path::new("roster-config-that-does-not-exist.toml"),
      environment().source(Some(source)),
    )
    .unwrap()
  }

  #[test]
  fn env_secrets_are_kept_verbatim() {
    let cfg = load_env(&[
      ("ROSTER_ADMIN_NAME", "True"),
      ("ROSTER_ADMIN_PASSWORD", "007"),
      ("ROSTER_IDENTITY__SECRET", "1e3"),
    ]);
    assert_eq!(cfg.admin_name, "True");
    assert_eq!(cfg.admin_password, "007");
    assert_eq!(cfg.identity.secret.as_deref(), Some("1e3"));
  }

  #[test]
  fn env_numbers_and_lists_are_converted() {
    let cfg = load_env(&[
      ("ROSTER_ADMIN_NAME", "admin"),
      ("ROSTER_ADMIN_PASSWORD", "pw"),
      ("ROSTER_PORT", "8080"),
      ("ROSTER_CALL_TIMEOUT_MS", "250"),
      ("ROSTER_CORS__ALLOWED_ORIGINS", "http://a.example, http://b.example"),
    ]);
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.call_timeout(), Duration::from_millis(250));
    assert_eq!(
      cfg.cors.allowed_origins,
      vec!["http://a.example".to_string(), "http://b.example".to_string()]
    );
    assert_eq!(cfg.cors.allowed_methods, default_methods());
    assert!(cfg.cors.layer().is_ok());
  }

  #[test]
  fn toml_file_is_read_with_defaults() {
    let path = std::env::temp_dir()
      .join(format!("roster-config-{}.toml", uuid::Uuid::new_v4()));
    std::fs::write(
      &path,
      r#"
admin_name     = "admin"
admin_password = "007"

[cors]
allowed_headers = ["authorization", "content-type"]

[identity]
algorithm = "HS256"
secret    = "s"
"#,
    )
    .unwrap();

    let cfg = ServerConfig::load_with(&path, environment().source(Some(Default::default())))
      .unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(cfg.admin_password, "007");
    assert_eq!(cfg.port, 5000);
    assert_eq!(cfg.cors.allowed_headers.len(), 2);
    assert_eq!(cfg.identity.algorithm, Algorithm::HS256);
  }

  #[test]
  fn default_cors_layer_builds() {
    assert!(CorsConfig::default().layer().is_ok());
  }

  #[test]
  fn explicit_cors_lists_build() {
    let cfg = CorsConfig {
      allowed_origins: vec!["http://localhost:3000".into()],
      allowed_methods: vec!["get".into(), "post".into()],
      allowed_headers: vec!["authorization".into(), "content-type".into()],
    };
    assert!(cfg.layer().is_ok());
  }

  #[test]
  fn invalid_cors_method_is_rejected() {
    let cfg = CorsConfig {
      allowed_methods: vec!["GE T".into()],
      ..Default::default()
    };
    assert!(matches!(cfg.layer(), Err(ConfigError::InvalidMethod(_))));
  }

  #[test]
  fn invalid_cors_origin_is_rejected() {
    let cfg = CorsConfig {
      allowed_origins: vec!["http://bad\norigin".into()],
      ..Default::default()
    };
    assert!(matches!(cfg.layer(), Err(ConfigError::InvalidOrigin(_))));
  }
}
