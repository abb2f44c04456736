//! Error types and axum `IntoResponse` implementation.
//!
//! Every failure a handler can produce is terminal for the request and maps
//! to exactly one status code: unauthorized variants to 401, everything
//! else to 400. Bodies are plaintext.

use std::time::Duration;

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
};
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum Error {
  #[error("Unauthorized: No token provided")]
  MissingToken,
  #[error("Unauthorized: Invalid token")]
  InvalidToken,
  #[error("Unauthorized: Admin name and password are required")]
  MissingAdminCredentials,
  #[error("Unauthorized: Invalid admin credentials")]
  InvalidAdminCredentials,
  /// The request payload could not be read into the expected shape.
  #[error("{context}: {message}")]
  BadInput {
    context: &'static str,
    message: String,
  },
  /// A document store call failed or missed its deadline.
  #[error("{context}: {source}")]
  Store {
    context: &'static str,
    #[source]
    source:  BoxError,
  },
}

impl Error {
  pub fn bad_input(context: &'static str, message: impl Into<String>) -> Self {
    Error::BadInput { context, message: message.into() }
  }

  pub fn store(context: &'static str, source: BoxError) -> Self {
    Error::Store { context, source }
  }

  pub fn status(&self) -> StatusCode {
    match self {
      Error::MissingToken
      | Error::InvalidToken
      | Error::MissingAdminCredentials
      | Error::InvalidAdminCredentials => StatusCode::UNAUTHORIZED,
      Error::BadInput { .. } | Error::Store { .. } => StatusCode::BAD_REQUEST,
    }
  }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let status = self.status();
    if let Error::Store { context, source } = &self {
      tracing::warn!(error = %source, "{context}");
    }
    (status, self.to_string()).into_response()
  }
}

/// An external call did not complete within its deadline.
#[derive(Debug, Error)]
#[error("deadline of {0:?} exceeded")]
pub struct DeadlineExceeded(pub Duration);

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn unauthorized_variants_map_to_401() {
    for e in [
      Error::MissingToken,
      Error::InvalidToken,
      Error::MissingAdminCredentials,
      Error::InvalidAdminCredentials,
    ] {
      assert_eq!(e.status(), StatusCode::UNAUTHORIZED, "{e}");
    }
  }

  #[test]
  fn store_error_message_carries_context_and_cause() {
    let e = Error::store(
      "Error adding candidate",
      Box::new(DeadlineExceeded(Duration::from_millis(5))),
    );
    assert_eq!(e.status(), StatusCode::BAD_REQUEST);
    assert_eq!(e.to_string(), "Error adding candidate: deadline of 5ms exceeded");
  }
}
