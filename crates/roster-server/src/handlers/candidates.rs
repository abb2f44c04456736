//! Handlers for `/candidates` endpoints.
//!
//! | Method   | Path              | Success |
//! |----------|-------------------|---------|
//! | `GET`    | `/candidates`     | 200, JSON array |
//! | `POST`   | `/candidates`     | 201, plaintext with the new id |
//! | `PUT`    | `/candidates/:id` | 200, merge update |
//! | `DELETE` | `/candidates/:id` | 200, idempotent |
//!
//! All routes require a bearer token. Failures answer 400 with the
//! operation's context string prefixed to the cause.

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use roster_core::{
  candidate::{Candidate, CandidateId, CandidateInput},
  identity::IdentityProvider,
  store::CandidateStore,
};

use crate::{AppState, auth::Authenticated, error::Error, handlers::within};

const ADD_CONTEXT: &str = "Error adding candidate";
const UPDATE_CONTEXT: &str = "Error updating candidate";
const DELETE_CONTEXT: &str = "Error deleting candidate";
const LIST_CONTEXT: &str = "Error fetching candidates";

fn payload(
  context: &'static str,
  body: Result<Json<CandidateInput>, JsonRejection>,
) -> Result<CandidateInput, Error> {
  body
    .map(|Json(input)| input)
    .map_err(|rejection| Error::bad_input(context, rejection.body_text()))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /candidates`
pub async fn create<S, V>(
  State(state): State<AppState<S, V>>,
  Authenticated(principal): Authenticated,
  body: Result<Json<CandidateInput>, JsonRejection>,
) -> Result<impl IntoResponse, Error>
where
  S: CandidateStore + Clone + 'static,
  V: IdentityProvider + Clone + 'static,
{
  let input = payload(ADD_CONTEXT, body)?;
  let id = within(state.config.call_timeout(), state.store.create(input))
    .await
    .map_err(|e| Error::store(ADD_CONTEXT, e))?;

  tracing::info!(%id, subject = %principal.subject, "candidate added");
  Ok((StatusCode::CREATED, format!("Candidate added with ID: {id}")))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /candidates/:id`
pub async fn update<S, V>(
  State(state): State<AppState<S, V>>,
  Authenticated(principal): Authenticated,
  Path(id): Path<String>,
  body: Result<Json<CandidateInput>, JsonRejection>,
) -> Result<impl IntoResponse, Error>
where
  S: CandidateStore + Clone + 'static,
  V: IdentityProvider + Clone + 'static,
{
  let input = payload(UPDATE_CONTEXT, body)?;
  let id = CandidateId::from(id);
  within(state.config.call_timeout(), state.store.update(&id, input))
    .await
    .map_err(|e| Error::store(UPDATE_CONTEXT, e))?;

  tracing::info!(%id, subject = %principal.subject, "candidate updated");
  Ok((StatusCode::OK, "Candidate updated successfully"))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /candidates/:id`
pub async fn delete<S, V>(
  State(state): State<AppState<S, V>>,
  Authenticated(principal): Authenticated,
  Path(id): Path<String>,
) -> Result<impl IntoResponse, Error>
where
  S: CandidateStore + Clone + 'static,
  V: IdentityProvider + Clone + 'static,
{
  let id = CandidateId::from(id);
  within(state.config.call_timeout(), state.store.delete(&id))
    .await
    .map_err(|e| Error::store(DELETE_CONTEXT, e))?;

  tracing::info!(%id, subject = %principal.subject, "candidate deleted");
  Ok((StatusCode::OK, "Candidate deleted successfully"))
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /candidates`
pub async fn list<S, V>(
  State(state): State<AppState<S, V>>,
  Authenticated(_): Authenticated,
) -> Result<Json<Vec<Candidate>>, Error>
where
  S: CandidateStore + Clone + 'static,
  V: IdentityProvider + Clone + 'static,
{
  let candidates = within(state.config.call_timeout(), state.store.list())
    .await
    .map_err(|e| Error::store(LIST_CONTEXT, e))?;
  Ok(Json(candidates))
}
