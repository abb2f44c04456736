//! The `CandidateStore` trait.
//!
//! Implemented by document store backends (e.g. `roster-store-sqlite`).
//! The server depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::candidate::{Candidate, CandidateId, CandidateInput};

/// A named collection of schema-less candidate documents.
///
/// Each call is independent; atomicity holds only at the single-document
/// level. All methods return `Send` futures so the trait can be used from
/// axum handlers on a multi-threaded runtime.
pub trait CandidateStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist `input` as a new document and return its store-assigned id.
  fn create(
    &self,
    input: CandidateInput,
  ) -> impl Future<Output = Result<CandidateId, Self::Error>> + Send + '_;

  /// Merge the supplied fields of `input` into the existing document.
  ///
  /// Fields left as `None` keep their stored value. Returns an error if `id`
  /// does not resolve.
  fn update<'a>(
    &'a self,
    id: &'a CandidateId,
    input: CandidateInput,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Remove the document. Deleting an unknown id is not an error.
  fn delete<'a>(
    &'a self,
    id: &'a CandidateId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Every document in the collection, in store-defined order.
  fn list(
    &self,
  ) -> impl Future<Output = Result<Vec<Candidate>, Self::Error>> + Send + '_;
}
