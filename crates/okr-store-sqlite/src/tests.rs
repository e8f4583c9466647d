//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{TimeZone, Utc};
use okr_core::{
  draft::{AreaObjectiveDraft, KeyResultDraft, LifeObjectiveDraft},
  model::{AreaLevel, SubTasks, TrackingFrequency},
  store::ObjectiveStore,
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn kr_draft(title: &str, target: f64) -> KeyResultDraft {
  KeyResultDraft {
    id:                 None,
    title:              title.into(),
    target_value:       target,
    unit:               "sessions".into(),
    tracking_frequency: TrackingFrequency::Weekly,
    target_date:        None,
    current_value:      None,
    tags:               vec![],
    assignees:          vec![],
    sub_tasks:          None,
  }
}

fn area_draft(title: &str, key_results: Vec<KeyResultDraft>) -> AreaObjectiveDraft {
  AreaObjectiveDraft {
    id: None,
    title: title.into(),
    description: None,
    level: AreaLevel::Personal,
    icon: None,
    key_results,
  }
}

fn life_draft(title: &str) -> LifeObjectiveDraft {
  LifeObjectiveDraft {
    title:           title.into(),
    description:     Some("Feel good".into()),
    icon:            Some("heart".into()),
    area_objectives: vec![
      area_draft("Fitness", vec![kr_draft("Run", 12.0), kr_draft("Swim", 4.0)]),
      area_draft("Sleep", vec![kr_draft("Early nights", 20.0)]),
    ],
  }
}

// ─── Life Objectives ─────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_tree() {
  let s = store().await;

  let created = s.create_life_objective(life_draft("Health")).await.unwrap();
  let fetched = s.get_life_objective(created.id).await.unwrap().unwrap();
  assert_eq!(fetched, created);

  let titles: Vec<_> = fetched.area_objectives.iter().map(|a| a.title.as_str()).collect();
  assert_eq!(titles, ["Fitness", "Sleep"]);
  let krs: Vec<_> = fetched.area_objectives[0]
    .key_results
    .iter()
    .map(|kr| kr.title.as_str())
    .collect();
  assert_eq!(krs, ["Run", "Swim"]);
}

#[tokio::test]
async fn key_result_metadata_roundtrip() {
  let s = store().await;
  let due = Utc.with_ymd_and_hms(2024, 6, 30, 23, 59, 0).unwrap();

  let mut draft = life_draft("Health");
  let kr = &mut draft.area_objectives[0].key_results[0];
  kr.target_date = Some(due);
  kr.tags = vec!["health".into(), "outdoor".into()];
  kr.assignees = vec!["me".into()];
  kr.sub_tasks = Some(SubTasks { completed: 2, total: 5 });
  kr.tracking_frequency = TrackingFrequency::Quarterly;
  draft.area_objectives[1].level = AreaLevel::Team;

  let created = s.create_life_objective(draft).await.unwrap();
  let fetched = s.get_life_objective(created.id).await.unwrap().unwrap();

  let kr = &fetched.area_objectives[0].key_results[0];
  assert_eq!(kr.target_date, Some(due));
  assert_eq!(kr.tags, ["health", "outdoor"]);
  assert_eq!(kr.assignees, ["me"]);
  assert_eq!(kr.sub_tasks, Some(SubTasks { completed: 2, total: 5 }));
  assert_eq!(kr.tracking_frequency, TrackingFrequency::Quarterly);
  assert_eq!(fetched.area_objectives[1].level, AreaLevel::Team);
}

#[tokio::test]
async fn get_missing_returns_none() {
  let s = store().await;
  assert!(s.get_life_objective(Uuid::new_v4()).await.unwrap().is_none());
  assert!(s.get_area_objective(Uuid::new_v4()).await.unwrap().is_none());
  assert!(s.get_key_result(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn list_is_newest_first() {
  let s = store().await;
  assert!(s.is_empty().await.unwrap());

  let first = s.create_life_objective(life_draft("Health")).await.unwrap();
  let second = s.create_life_objective(life_draft("Career")).await.unwrap();

  let all = s.list_life_objectives().await.unwrap();
  let ids: Vec<_> = all.iter().map(|l| l.id).collect();
  assert_eq!(ids, [second.id, first.id]);
  assert!(!s.is_empty().await.unwrap());
}

#[tokio::test]
async fn create_rejects_invalid_draft() {
  let s = store().await;
  let mut draft = life_draft("Health");
  draft.area_objectives[0].key_results[0].target_value = -1.0;

  let err = s.create_life_objective(draft).await.unwrap_err();
  assert!(matches!(
    err,
    crate::Error::Core(okr_core::Error::Invalid { .. })
  ));
  assert!(s.list_life_objectives().await.unwrap().is_empty());
}

// ─── Editing ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_keeps_ids_and_progress() {
  let s = store().await;
  let created = s.create_life_objective(life_draft("Health")).await.unwrap();
  let run = &created.area_objectives[0].key_results[0];
  s.set_key_result_value(run.id, 6.0).await.unwrap();

  // Keep Fitness with Run only, drop Sleep, add a new area.
  let mut fitness = area_draft("Fitness", vec![kr_draft("Run far", 12.0)]);
  fitness.id = Some(created.area_objectives[0].id);
  fitness.key_results[0].id = Some(run.id);
  let draft = LifeObjectiveDraft {
    title:           "Health & Energy".into(),
    description:     None,
    icon:            None,
    area_objectives: vec![fitness, area_draft("Diet", vec![kr_draft("Salads", 10.0)])],
  };

  let updated = s.update_life_objective(created.id, draft).await.unwrap();
  assert_eq!(updated.id, created.id);
  assert_eq!(updated.area_objectives[0].id, created.area_objectives[0].id);

  let kept = &updated.area_objectives[0].key_results[0];
  assert_eq!(kept.id, run.id);
  assert_eq!(kept.title, "Run far");
  assert_eq!(kept.current_value, 6.0);

  let fetched = s.get_life_objective(created.id).await.unwrap().unwrap();
  assert_eq!(fetched, updated);

  // Children left out of the edit are gone.
  let swim = created.area_objectives[0].key_results[1].id;
  assert!(s.get_key_result(swim).await.unwrap().is_none());
  let sleep = created.area_objectives[1].id;
  assert!(s.get_area_objective(sleep).await.unwrap().is_none());
}

#[tokio::test]
async fn update_missing_errors() {
  let s = store().await;
  let err = s
    .update_life_objective(Uuid::new_v4(), life_draft("Health"))
    .await
    .unwrap_err();
  assert!(matches!(
    err,
    crate::Error::Core(okr_core::Error::LifeObjectiveNotFound(_))
  ));
}

#[tokio::test]
async fn replace_after_delete_errors_and_writes_nothing() {
  let s = store().await;
  let life = s.create_life_objective(life_draft("Health")).await.unwrap();
  let tree = crate::encode::RawTree::encode(&life).unwrap();

  // Deleted between the read and the write of an edit.
  s.delete_life_objective(life.id).await.unwrap();
  let err = s.replace_tree(tree).await.unwrap_err();
  assert!(matches!(
    err,
    crate::Error::Core(okr_core::Error::LifeObjectiveNotFound(id)) if id == life.id
  ));

  // No orphaned children were inserted.
  let area_id = life.area_objectives[0].id;
  assert!(s.get_area_objective(area_id).await.unwrap().is_none());
  assert!(s.list_life_objectives().await.unwrap().is_empty());
}

#[tokio::test]
async fn update_preserves_list_position() {
  let s = store().await;
  let first = s.create_life_objective(life_draft("Health")).await.unwrap();
  let second = s.create_life_objective(life_draft("Career")).await.unwrap();

  s.update_life_objective(first.id, life_draft("Health v2"))
    .await
    .unwrap();

  let all = s.list_life_objectives().await.unwrap();
  assert_eq!(all[0].id, second.id);
  assert_eq!(all[1].title, "Health v2");
}

// ─── Deletion ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_cascades_to_children() {
  let s = store().await;
  let created = s.create_life_objective(life_draft("Health")).await.unwrap();
  let area_id = created.area_objectives[0].id;
  let kr_id = created.area_objectives[0].key_results[0].id;

  s.delete_life_objective(created.id).await.unwrap();

  assert!(s.get_life_objective(created.id).await.unwrap().is_none());
  assert!(s.get_area_objective(area_id).await.unwrap().is_none());
  assert!(s.get_key_result(kr_id).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_missing_errors() {
  let s = store().await;
  let err = s.delete_life_objective(Uuid::new_v4()).await.unwrap_err();
  assert!(matches!(
    err,
    crate::Error::Core(okr_core::Error::LifeObjectiveNotFound(_))
  ));
}

// ─── Key Result values ───────────────────────────────────────────────────────

#[tokio::test]
async fn set_value_refreshes_last_updated() {
  let s = store().await;
  let created = s.create_life_objective(life_draft("Health")).await.unwrap();
  let kr = &created.area_objectives[0].key_results[0];
  assert_eq!(kr.current_value, 0.0);

  let updated = s.set_key_result_value(kr.id, 9.5).await.unwrap();
  assert_eq!(updated.current_value, 9.5);
  assert!(updated.last_updated >= kr.last_updated);

  let area = s
    .get_area_objective(created.area_objectives[0].id)
    .await
    .unwrap()
    .unwrap();
  assert_eq!(area.key_results[0].current_value, 9.5);
  assert_eq!(area.key_results.len(), 2);
}

#[tokio::test]
async fn set_value_rejects_negative() {
  let s = store().await;
  let created = s.create_life_objective(life_draft("Health")).await.unwrap();
  let kr = &created.area_objectives[0].key_results[0];

  let err = s.set_key_result_value(kr.id, -3.0).await.unwrap_err();
  assert!(matches!(
    err,
    crate::Error::Core(okr_core::Error::Invalid { .. })
  ));
}

#[tokio::test]
async fn set_value_missing_errors() {
  let s = store().await;
  let err = s.set_key_result_value(Uuid::new_v4(), 1.0).await.unwrap_err();
  assert!(matches!(
    err,
    crate::Error::Core(okr_core::Error::KeyResultNotFound(_))
  ));
}
