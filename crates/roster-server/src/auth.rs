//! Bearer-token and admin-credential extractors.
//!
//! [`Authenticated`] guards user routes: it pulls the bearer token from the
//! `Authorization` header and hands it to the configured
//! [`IdentityProvider`]. [`AdminAuthorized`] guards the admin portal login:
//! it compares the posted name and password against the configured secrets.

use std::time::Duration;

use axum::{
  body::Bytes,
  extract::{FromRequest, FromRequestParts, Request},
  http::{HeaderMap, header, request::Parts},
};
use roster_core::{Principal, identity::IdentityProvider};
use serde::Deserialize;
use serde_json::Value;

use crate::{AppState, config::ServerConfig, error::Error};

// ─── Bearer tokens ───────────────────────────────────────────────────────────

/// Present in a handler means the request carried a verified token.
pub struct Authenticated(pub Principal);

/// Pull the token segment out of `Authorization: Bearer <token>`.
///
/// The scheme word itself is not checked: whatever follows it is handed to
/// the identity provider, so `Basic xyz` fails as an invalid token. Only a
/// missing header or an empty token segment is "no token provided".
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, Error> {
  let value = headers
    .get(header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .ok_or(Error::MissingToken)?;

  let (_scheme, token) = value.trim().split_once(' ').ok_or(Error::MissingToken)?;
  let token = token.trim();
  if token.is_empty() {
    return Err(Error::MissingToken);
  }
  Ok(token)
}

/// Verify the request's bearer token within `deadline`.
///
/// Every verification failure collapses into [`Error::InvalidToken`]; the
/// underlying cause is only logged.
pub async fn verify_bearer<V>(
  headers:  &HeaderMap,
  identity: &V,
  deadline: Duration,
) -> Result<Principal, Error>
where
  V: IdentityProvider,
{
  let token = bearer_token(headers)?;

  match tokio::time::timeout(deadline, identity.verify_token(token)).await {
    Ok(Ok(principal)) => Ok(principal),
    Ok(Err(e)) => {
      tracing::debug!(error = %e, "token verification failed");
      Err(Error::InvalidToken)
    }
    Err(_) => {
      tracing::debug!(?deadline, "token verification timed out");
      Err(Error::InvalidToken)
    }
  }
}

impl<S, V> FromRequestParts<AppState<S, V>> for Authenticated
where
  S: Send + Sync + 'static,
  V: IdentityProvider + 'static,
{
  type Rejection = Error;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S, V>,
  ) -> Result<Self, Self::Rejection> {
    let principal =
      verify_bearer(&parts.headers, &*state.identity, state.config.call_timeout())
        .await?;
    tracing::debug!(subject = %principal.subject, "request authenticated");
    Ok(Authenticated(principal))
  }
}

// ─── Admin credentials ───────────────────────────────────────────────────────

/// Body of `POST /admin-portal`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminCredentials {
  #[serde(default)]
  pub admin_name:     Option<Value>,
  #[serde(default)]
  pub admin_password: Option<Value>,
}

impl AdminCredentials {
  /// Parse a request body. Anything that is not a JSON object counts as
  /// "no credentials supplied"; fields of any JSON type are kept.
  pub fn from_body(body: &[u8]) -> Self {
    serde_json::from_slice(body).unwrap_or_default()
  }
}

/// A submitted field counts as present unless it is `null`, `false`, `0`
/// or the empty string.
fn submitted(value: Option<&Value>) -> Option<&Value> {
  value.filter(|v| match v {
    Value::Null => false,
    Value::Bool(b) => *b,
    Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
    Value::String(s) => !s.is_empty(),
    Value::Array(_) | Value::Object(_) => true,
  })
}

/// Only a JSON string can equal a configured secret.
fn matches_secret(value: &Value, secret: &str) -> bool {
  value.as_str() == Some(secret)
}

/// Compare submitted admin credentials with the configured secrets.
///
/// Empty strings count as missing; present values of another JSON type are
/// a mismatch. Secrets never reach the log.
pub fn check_admin(creds: &AdminCredentials, config: &ServerConfig) -> Result<(), Error> {
  let name = submitted(creds.admin_name.as_ref());
  let password = submitted(creds.admin_password.as_ref());

  tracing::debug!(
    name_present = name.is_some(),
    password_present = password.is_some(),
    "admin credentials received"
  );

  let (Some(name), Some(password)) = (name, password) else {
    return Err(Error::MissingAdminCredentials);
  };

  if matches_secret(name, &config.admin_name)
    && matches_secret(password, &config.admin_password)
  {
    tracing::info!("admin credentials accepted");
    Ok(())
  } else {
    tracing::warn!("admin credentials rejected");
    Err(Error::InvalidAdminCredentials)
  }
}

/// Present in a handler means the body carried valid admin credentials.
pub struct AdminAuthorized;

impl<S, V> FromRequest<AppState<S, V>> for AdminAuthorized
where
  S: Send + Sync + 'static,
  V: Send + Sync + 'static,
{
  type Rejection = Error;

  async fn from_request(
    req:   Request,
    state: &AppState<S, V>,
  ) -> Result<Self, Self::Rejection> {
    let creds = match Bytes::from_request(req, state).await {
      Ok(body) => AdminCredentials::from_body(&body),
      Err(_) => AdminCredentials::default(),
    };
    check_admin(&creds, &state.config)?;
    Ok(AdminAuthorized)
  }
}
