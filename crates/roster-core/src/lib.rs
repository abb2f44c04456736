//! Core types and trait definitions for the Roster candidate service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! The store backend and the server depend on it; it depends on nothing
//! proprietary.

pub mod candidate;
pub mod identity;
pub mod principal;
pub mod store;

pub use candidate::{Candidate, CandidateId, CandidateInput, YearOfStudy};
pub use principal::Principal;
