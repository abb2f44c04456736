//! HTTP layer for Roster.
//!
//! Exposes an axum [`Router`] serving candidate CRUD behind bearer-token
//! authentication, an admin portal behind a static credential check, and the
//! front-end bundle as a catch-all fallback. Backed by any
//! [`CandidateStore`] and any [`IdentityProvider`].

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod identity;

pub use config::{ConfigError, ServerConfig};
pub use error::Error;

use std::{path::Path, sync::Arc};

use axum::{
  Router,
  routing::{get, get_service},
};
use roster_core::{identity::IdentityProvider, store::CandidateStore};
use tower_http::{
  services::{ServeDir, ServeFile},
  trace::TraceLayer,
};

use handlers::{admin, candidates, root};

/// Entry document of the front-end bundle, served for client-side routes.
const ENTRY_DOCUMENT: &str = "index.html";

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S, V> {
  pub store:    Arc<S>,
  pub identity: Arc<V>,
  pub config:   Arc<ServerConfig>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the application [`Router`].
///
/// Fails only if the CORS settings in `state.config` are invalid.
pub fn router<S, V>(state: AppState<S, V>) -> Result<Router, ConfigError>
where
  S: CandidateStore + Clone + 'static,
  V: IdentityProvider + Clone + 'static,
{
  let cors = state.config.cors.layer()?;
  let assets = static_assets(&state.config.static_dir);

  Ok(
    Router::new()
      .route("/",                 get(root::liveness))
      .route("/home",             get(root::home))
      .route("/admin-portal",     get(admin::portal).post(admin::portal_login))
      .route("/candidates",       get(candidates::list::<S, V>).post(candidates::create::<S, V>))
      .route(
        "/candidates/{id}",
        get_service(assets.clone())
          .put(candidates::update::<S, V>)
          .delete(candidates::delete::<S, V>),
      )
      .fallback_service(assets)
      .layer(cors)
      .layer(TraceLayer::new_for_http())
      .with_state(state),
  )
}

/// Serve files from `dir`, answering unknown paths with the entry document.
fn static_assets(dir: &Path) -> ServeDir<ServeFile> {
  ServeDir::new(dir).fallback(ServeFile::new(dir.join(ENTRY_DOCUMENT)))
}

// ─── Test support ─────────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod testing {
  use std::path::PathBuf;

  use crate::config::{CorsConfig, IdentityConfig, ServerConfig};

  pub fn config() -> ServerConfig {
    ServerConfig {
      host:            "127.0.0.1".to_string(),
      port:            5000,
      store_path:      PathBuf::from(":memory:"),
      static_dir:      PathBuf::from("client/build"),
      admin_name:      "admin".to_string(),
      admin_password:  "hunter2".to_string(),
      call_timeout_ms: 2_000,
      cors:            CorsConfig::default(),
      identity:        IdentityConfig::default(),
    }
  }
}

// ─── Integration tests ────────────────────────────────────────────────────────
