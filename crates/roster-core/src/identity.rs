//! The `IdentityProvider` trait.
//!
//! Implemented by token verifiers (e.g. the JWT verifier in
//! `roster-server`). The HTTP layer depends on this abstraction only.

use std::future::Future;

use crate::principal::Principal;

/// Verifies a raw bearer credential and yields the caller's [`Principal`].
///
/// Implementations check signature, expiry and issuer. Callers must treat
/// every error the same way; the error type exists for diagnostics only.
pub trait IdentityProvider: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn verify_token<'a>(
    &'a self,
    token: &'a str,
  ) -> impl Future<Output = Result<Principal, Self::Error>> + Send + 'a;
}
