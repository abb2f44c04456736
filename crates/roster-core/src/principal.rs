//! Principal — the verified identity of an authenticated caller.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Decoded identity produced per request by an
/// [`IdentityProvider`](crate::identity::IdentityProvider). Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Principal {
  /// Unique subject identifier (the token's `sub` claim).
  pub subject: String,
  /// Every other claim carried by the token.
  #[serde(default)]
  pub claims:  Map<String, Value>,
}

impl Principal {
  pub fn claim(&self, name: &str) -> Option<&Value> { self.claims.get(name) }
}
