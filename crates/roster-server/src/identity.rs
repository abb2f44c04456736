//! JWT-backed [`IdentityProvider`].
//!
//! Verifies signature, expiry, issuer and audience of bearer tokens and
//! turns the claims into a [`Principal`].

use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use roster_core::{Principal, identity::IdentityProvider};
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::{ConfigError, IdentityConfig};

#[derive(Debug, Error)]
pub enum IdentityError {
  #[error("jwt verify: {0}")]
  Jwt(#[from] jsonwebtoken::errors::Error),
  #[error("token has an empty subject")]
  EmptySubject,
}

#[derive(Deserialize)]
struct Claims {
  sub:  String,
  #[serde(flatten)]
  rest: Map<String, Value>,
}

#[derive(Clone)]
pub struct JwtVerifier {
  decoding_key: DecodingKey,
  validation:   Validation,
}

impl JwtVerifier {
  pub fn new(decoding_key: DecodingKey, validation: Validation) -> Self {
    Self { decoding_key, validation }
  }

  /// Build a verifier from configuration, loading key material from disk
  /// for the asymmetric algorithms.
  pub fn from_config(cfg: &IdentityConfig) -> Result<Self, ConfigError> {
    let decoding_key = match cfg.algorithm {
      Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => {
        let secret = cfg
          .secret
          .as_deref()
          .ok_or(ConfigError::MissingKey("identity.secret"))?;
        DecodingKey::from_secret(secret.as_bytes())
      }
      alg => {
        let path = cfg
          .public_key_path
          .as_ref()
          .ok_or(ConfigError::MissingKey("identity.public_key_path"))?;
        let pem = std::fs::read(path).map_err(|source| ConfigError::KeyFile {
          path: path.clone(),
          source,
        })?;
        match alg {
          Algorithm::ES256 | Algorithm::ES384 => DecodingKey::from_ec_pem(&pem)?,
          Algorithm::EdDSA => DecodingKey::from_ed_pem(&pem)?,
          _ => DecodingKey::from_rsa_pem(&pem)?,
        }
      }
    };

    let mut validation = Validation::new(cfg.algorithm);
    validation.set_required_spec_claims(&["exp", "sub"]);
    if let Some(issuer) = cfg.issuer() {
      validation.set_issuer(&[issuer]);
    }
    match cfg.audience() {
      Some(audience) => validation.set_audience(&[audience]),
      None => validation.validate_aud = false,
    }

    Ok(Self::new(decoding_key, validation))
  }
}

impl IdentityProvider for JwtVerifier {
  type Error = IdentityError;

  async fn verify_token(&self, token: &str) -> Result<Principal, IdentityError> {
    let data = jsonwebtoken::decode::<Claims>(
      token,
      &self.decoding_key,
      &self.validation,
    )?;
    let Claims { sub, rest } = data.claims;
    if sub.is_empty() {
      return Err(IdentityError::EmptySubject);
    }
    Ok(Principal { subject: sub, claims: rest })
  }
}
