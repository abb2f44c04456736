//! [`SqliteStore`] — the SQLite implementation of [`CandidateStore`].

use std::path::Path;

use uuid::Uuid;

use roster_core::{
  candidate::{Candidate, CandidateId, CandidateInput},
  store::CandidateStore,
};

use crate::{Error, Result, schema::SCHEMA};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A candidate collection backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── CandidateStore impl ─────────────────────────────────────────────────────

impl CandidateStore for SqliteStore {
  type Error = Error;

  async fn create(&self, input: CandidateInput) -> Result<CandidateId> {
    let id   = Uuid::new_v4().to_string();
    let body = serde_json::to_string(&input)?;

    let id_param = id.clone();
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO candidates (id, body) VALUES (?1, ?2)",
          rusqlite::params![id_param, body],
        )?;
        Ok(())
      })
      .await?;

    tracing::debug!(%id, "candidate document created");
    Ok(CandidateId::new(id))
  }

  async fn update(&self, id: &CandidateId, input: CandidateInput) -> Result<()> {
    // `json_patch` overlays only the keys present in the patch, and absent
    // fields are never serialised, so this is a field-level merge.
    let patch    = serde_json::to_string(&input)?;
    let id_param = id.as_str().to_owned();

    let changed = self
      .conn
      .call(move |conn| {
        let n = conn.execute(
          "UPDATE candidates SET body = json_patch(body, ?2) WHERE id = ?1",
          rusqlite::params![id_param, patch],
        )?;
        Ok(n)
      })
      .await?;

    if changed == 0 {
      return Err(Error::CandidateNotFound(id.to_string()));
    }
    Ok(())
  }

  async fn delete(&self, id: &CandidateId) -> Result<()> {
    let id_param = id.as_str().to_owned();

    let removed = self
      .conn
      .call(move |conn| {
        let n = conn.execute(
          "DELETE FROM candidates WHERE id = ?1",
          rusqlite::params![id_param],
        )?;
        Ok(n)
      })
      .await?;

    if removed == 0 {
      tracing::debug!(%id, "delete of unknown candidate id ignored");
    }
    Ok(())
  }

  async fn list(&self) -> Result<Vec<Candidate>> {
    let rows: Vec<(String, String)> = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare("SELECT id, body FROM candidates ORDER BY seq")?;
        let rows = stmt
          .query_map([], |r| Ok((r.get(0)?, r.get(1)?)))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    rows
      .into_iter()
      .map(|(id, body)| -> Result<Candidate> {
        Ok(Candidate {
          id:     CandidateId::new(id),
          fields: serde_json::from_str(&body)?,
        })
      })
      .collect()
  }
}
