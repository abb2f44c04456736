//! Integration tests for `SqliteStore` against an in-memory database.

use roster_core::{
  candidate::{CandidateId, CandidateInput, YearOfStudy},
  store::CandidateStore,
};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn alex() -> CandidateInput {
  CandidateInput {
    name:          Some("Alex".into()),
    role:          Some("Engineer".into()),
    department:    Some("CS".into()),
    year_of_study: Some(YearOfStudy::Text("3".into())),
    photo:         Some("http://x/y.png".into()),
  }
}

// ─── Create / list ───────────────────────────────────────────────────────────

#[tokio::test]
async fn list_empty_collection() {
  let s = store().await;
  assert!(s.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_then_list_returns_document_with_id() {
  let s = store().await;

  let id = s.create(alex()).await.unwrap();
  assert!(!id.as_str().is_empty());

  let all = s.list().await.unwrap();
  assert_eq!(all.len(), 1);
  assert_eq!(all[0].id, id);
  assert_eq!(all[0].fields, alex());
}

#[tokio::test]
async fn create_assigns_distinct_ids() {
  let s = store().await;
  let a = s.create(alex()).await.unwrap();
  let b = s.create(alex()).await.unwrap();
  assert_ne!(a, b);
}

#[tokio::test]
async fn create_with_subset_stores_only_supplied_fields() {
  let s = store().await;
  let input = CandidateInput {
    name: Some("Sam".into()),
    ..Default::default()
  };
  s.create(input.clone()).await.unwrap();

  let all = s.list().await.unwrap();
  assert_eq!(all[0].fields, input);
  assert_eq!(all[0].fields.role, None);
}

#[tokio::test]
async fn list_preserves_insertion_order() {
  let s = store().await;
  let mut ids = Vec::new();
  for name in ["a", "b", "c"] {
    let input = CandidateInput {
      name: Some(name.into()),
      ..Default::default()
    };
    ids.push(s.create(input).await.unwrap());
  }

  let listed: Vec<CandidateId> =
    s.list().await.unwrap().into_iter().map(|c| c.id).collect();
  assert_eq!(listed, ids);
}

// ─── Update ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_merges_supplied_fields_only() {
  let s = store().await;
  let id = s.create(alex()).await.unwrap();

  let patch = CandidateInput {
    role: Some("Lead".into()),
    ..Default::default()
  };
  s.update(&id, patch).await.unwrap();

  let all = s.list().await.unwrap();
  let expected = CandidateInput {
    role: Some("Lead".into()),
    ..alex()
  };
  assert_eq!(all[0].fields, expected);
}

#[tokio::test]
async fn update_can_add_a_previously_absent_field() {
  let s = store().await;
  let id = s
    .create(CandidateInput {
      name: Some("Sam".into()),
      ..Default::default()
    })
    .await
    .unwrap();

  s.update(&id, CandidateInput {
    year_of_study: Some(YearOfStudy::Number(2.into())),
    ..Default::default()
  })
  .await
  .unwrap();

  let all = s.list().await.unwrap();
  assert_eq!(all[0].fields.name.as_deref(), Some("Sam"));
  assert_eq!(all[0].fields.year_of_study, Some(YearOfStudy::Number(2.into())));
}

#[tokio::test]
async fn update_unknown_id_fails() {
  let s = store().await;
  let err = s
    .update(&CandidateId::new("missing"), alex())
    .await
    .unwrap_err();
  assert!(matches!(err, Error::CandidateNotFound(ref id) if id == "missing"));
}

#[tokio::test]
async fn fractional_year_of_study_survives_create_and_update() {
  let s = store().await;
  let half = serde_json::Number::from_f64(2.5).unwrap();
  let id = s
    .create(CandidateInput {
      year_of_study: Some(YearOfStudy::Number(half.clone())),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(s.list().await.unwrap()[0].fields.year_of_study, Some(YearOfStudy::Number(half)));

  let next = serde_json::Number::from_f64(3.5).unwrap();
  s.update(&id, CandidateInput {
    year_of_study: Some(YearOfStudy::Number(next.clone())),
    ..Default::default()
  })
  .await
  .unwrap();
  assert_eq!(s.list().await.unwrap()[0].fields.year_of_study, Some(YearOfStudy::Number(next)));
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_removes_document() {
  let s = store().await;
  let keep = s.create(alex()).await.unwrap();
  let gone = s.create(alex()).await.unwrap();

  s.delete(&gone).await.unwrap();

  let ids: Vec<CandidateId> =
    s.list().await.unwrap().into_iter().map(|c| c.id).collect();
  assert_eq!(ids, vec![keep]);
}

#[tokio::test]
async fn delete_is_idempotent() {
  let s = store().await;
  let id = s.create(alex()).await.unwrap();

  s.delete(&id).await.unwrap();
  s.delete(&id).await.unwrap();
  s.delete(&CandidateId::new("never-existed")).await.unwrap();

  assert!(s.list().await.unwrap().is_empty());
}
