//! Candidate — the sole domain entity.
//!
//! A candidate is a flat, schema-less record. Every attribute is optional;
//! absent attributes are simply not stored and not serialised.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier assigned by the store on creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(String);

impl CandidateId {
  pub fn new(id: impl Into<String>) -> Self { Self(id.into()) }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for CandidateId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<String> for CandidateId {
  fn from(id: String) -> Self { Self(id) }
}

/// Year of study, kept as the client sent it: either a JSON number or text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum YearOfStudy {
  Number(serde_json::Number),
  Text(String),
}

/// The candidate payload accepted on create and update.
///
/// On update only the supplied (`Some`) fields overwrite the stored
/// document. JSON `null` deserialises to `None` and is therefore treated as
/// "not supplied".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateInput {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name:          Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub role:          Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub department:    Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub year_of_study: Option<YearOfStudy>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub photo:         Option<String>,
}

/// A stored candidate document annotated with its identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
  pub id:     CandidateId,
  #[serde(flatten)]
  pub fields: CandidateInput,
}
