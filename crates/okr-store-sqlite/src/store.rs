//! [`SqliteStore`], the SQLite implementation of [`ObjectiveStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use okr_core::{
  draft::LifeObjectiveDraft,
  model::{AreaObjective, KeyResult, LifeObjective},
  store::ObjectiveStore,
  validate,
};

use crate::{
  encode::{
    RawAreaObjective, RawKeyResult, RawLifeObjective, RawTree, assemble, decode_uuid,
    encode_dt, encode_uuid,
  },
  schema::SCHEMA,
  Error, Result,
};

// ─── Queries ─────────────────────────────────────────────────────────────────

/// Rows for every tree, or for the single tree `life_id` when given.
type TreeRows = (Vec<RawLifeObjective>, Vec<RawAreaObjective>, Vec<RawKeyResult>);

fn load_rows(
  conn: &rusqlite::Connection,
  life_id: Option<&str>,
) -> rusqlite::Result<TreeRows> {
  let lives = conn
    .prepare(&format!(
      "SELECT {} FROM life_objectives
       WHERE ?1 IS NULL OR life_objective_id = ?1
       ORDER BY created_at DESC, rowid DESC",
      RawLifeObjective::COLUMNS
    ))?
    .query_map(rusqlite::params![life_id], RawLifeObjective::from_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;

  let areas = conn
    .prepare(&format!(
      "SELECT {} FROM area_objectives
       WHERE ?1 IS NULL OR life_objective_id = ?1
       ORDER BY position",
      RawAreaObjective::COLUMNS
    ))?
    .query_map(rusqlite::params![life_id], RawAreaObjective::from_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;

  let key_results = conn
    .prepare(&format!(
      "SELECT {} FROM key_results
       WHERE ?1 IS NULL OR area_objective_id IN (
         SELECT area_objective_id FROM area_objectives WHERE life_objective_id = ?1
       )
       ORDER BY position",
      RawKeyResult::COLUMNS
    ))?
    .query_map(rusqlite::params![life_id], RawKeyResult::from_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;

  Ok((lives, areas, key_results))
}

fn select_key_result(
  conn: &rusqlite::Connection,
  id: &str,
) -> rusqlite::Result<Option<RawKeyResult>> {
  conn
    .query_row(
      &format!(
        "SELECT {} FROM key_results WHERE key_result_id = ?1",
        RawKeyResult::COLUMNS
      ),
      rusqlite::params![id],
      RawKeyResult::from_row,
    )
    .optional()
}

/// Insert the children of a tree. The Life Objective row must already exist.
fn insert_children(tx: &rusqlite::Transaction<'_>, tree: &RawTree) -> rusqlite::Result<()> {
  for area in &tree.area_objectives {
    tx.execute(
      &format!(
        "INSERT INTO area_objectives ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        RawAreaObjective::COLUMNS
      ),
      rusqlite::params![
        area.id,
        area.life_id,
        area.position,
        area.title,
        area.description,
        area.level,
        area.icon,
      ],
    )?;
  }

  for kr in &tree.key_results {
    tx.execute(
      &format!(
        "INSERT INTO key_results ({})
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        RawKeyResult::COLUMNS
      ),
      rusqlite::params![
        kr.id,
        kr.area_id,
        kr.position,
        kr.title,
        kr.current_value,
        kr.target_value,
        kr.unit,
        kr.tracking_frequency,
        kr.last_updated,
        kr.target_date,
        kr.tags,
        kr.assignees,
        kr.sub_tasks,
      ],
    )?;
  }
  Ok(())
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// An OKR store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
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

  /// Open an in-memory store, useful for testing.
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

  /// `true` when no Life Objective has been stored yet.
  pub async fn is_empty(&self) -> Result<bool> {
    let count: i64 = self
      .conn
      .call(|conn| {
        Ok(conn.query_row("SELECT COUNT(*) FROM life_objectives", [], |r| r.get(0))?)
      })
      .await?;
    Ok(count == 0)
  }

  /// Overwrite a stored tree in one transaction. The Life Objective row is
  /// updated in place and its children are replaced.
  ///
  /// Fails with `LifeObjectiveNotFound` if the row is gone, e.g. deleted
  /// since the tree was read.
  pub(crate) async fn replace_tree(&self, tree: RawTree) -> Result<()> {
    let life_id = decode_uuid(&tree.life.id)?;
    let replaced = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let updated = tx.execute(
          "UPDATE life_objectives SET title = ?2, description = ?3, icon = ?4
           WHERE life_objective_id = ?1",
          rusqlite::params![
            tree.life.id,
            tree.life.title,
            tree.life.description,
            tree.life.icon,
          ],
        )?;
        if updated == 0 {
          return Ok(false);
        }
        // Cascades to the Key Results.
        tx.execute(
          "DELETE FROM area_objectives WHERE life_objective_id = ?1",
          rusqlite::params![tree.life.id],
        )?;
        insert_children(&tx, &tree)?;
        tx.commit()?;
        Ok(true)
      })
      .await?;

    if !replaced {
      return Err(okr_core::Error::LifeObjectiveNotFound(life_id).into());
    }
    Ok(())
  }

  async fn load(&self, life_id: Option<Uuid>) -> Result<Vec<LifeObjective>> {
    let life_id = life_id.map(encode_uuid);
    let (lives, areas, key_results) = self
      .conn
      .call(move |conn| Ok(load_rows(conn, life_id.as_deref())?))
      .await?;

    let lives = assemble(lives, areas, key_results)?;
    validate::forest(&lives)?;
    Ok(lives)
  }
}

// ─── ObjectiveStore impl ─────────────────────────────────────────────────────

impl ObjectiveStore for SqliteStore {
  type Error = Error;

  // ── Life Objectives ───────────────────────────────────────────────────────

  async fn create_life_objective(
    &self,
    draft: LifeObjectiveDraft,
  ) -> Result<LifeObjective> {
    validate::life_objective_draft(&draft)?;

    let now = Utc::now();
    let life = draft.into_new(now);
    validate::forest(std::slice::from_ref(&life))?;

    let tree = RawTree::encode(&life)?;
    let created_at = encode_dt(now);

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO life_objectives (
             life_objective_id, title, description, icon, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![
            tree.life.id,
            tree.life.title,
            tree.life.description,
            tree.life.icon,
            created_at,
          ],
        )?;
        insert_children(&tx, &tree)?;
        tx.commit()?;
        Ok(())
      })
      .await?;

    tracing::debug!(id = %life.id, "created life objective");
    Ok(life)
  }

  async fn update_life_objective(
    &self,
    id: Uuid,
    draft: LifeObjectiveDraft,
  ) -> Result<LifeObjective> {
    validate::life_objective_draft(&draft)?;

    let existing = self
      .get_life_objective(id)
      .await?
      .ok_or(okr_core::Error::LifeObjectiveNotFound(id))?;

    let life = draft.merge_into(&existing, Utc::now());
    validate::forest(std::slice::from_ref(&life))?;

    self.replace_tree(RawTree::encode(&life)?).await?;

    tracing::debug!(%id, "updated life objective");
    Ok(life)
  }

  async fn delete_life_objective(&self, id: Uuid) -> Result<()> {
    let id_str = encode_uuid(id);
    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM life_objectives WHERE life_objective_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    if deleted == 0 {
      return Err(okr_core::Error::LifeObjectiveNotFound(id).into());
    }
    tracing::debug!(%id, "deleted life objective");
    Ok(())
  }

  async fn get_life_objective(&self, id: Uuid) -> Result<Option<LifeObjective>> {
    Ok(self.load(Some(id)).await?.into_iter().next())
  }

  async fn list_life_objectives(&self) -> Result<Vec<LifeObjective>> {
    self.load(None).await
  }

  // ── Children ──────────────────────────────────────────────────────────────

  async fn get_area_objective(&self, id: Uuid) -> Result<Option<AreaObjective>> {
    let id_str = encode_uuid(id);
    let rows = self
      .conn
      .call(move |conn| {
        let area = conn
          .query_row(
            &format!(
              "SELECT {} FROM area_objectives WHERE area_objective_id = ?1",
              RawAreaObjective::COLUMNS
            ),
            rusqlite::params![id_str],
            RawAreaObjective::from_row,
          )
          .optional()?;
        let Some(area) = area else {
          return Ok(None);
        };

        let key_results = conn
          .prepare(&format!(
            "SELECT {} FROM key_results WHERE area_objective_id = ?1 ORDER BY position",
            RawKeyResult::COLUMNS
          ))?
          .query_map(rusqlite::params![id_str], RawKeyResult::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(Some((area, key_results)))
      })
      .await?;

    let Some((area, key_results)) = rows else {
      return Ok(None);
    };
    let mut area = area.into_area_objective()?;
    area.key_results = key_results
      .into_iter()
      .map(RawKeyResult::into_key_result)
      .collect::<Result<_>>()?;
    Ok(Some(area))
  }

  async fn get_key_result(&self, id: Uuid) -> Result<Option<KeyResult>> {
    let id_str = encode_uuid(id);
    let raw = self
      .conn
      .call(move |conn| Ok(select_key_result(conn, &id_str)?))
      .await?;
    raw.map(RawKeyResult::into_key_result).transpose()
  }

  async fn set_key_result_value(&self, id: Uuid, current_value: f64) -> Result<KeyResult> {
    validate::current_value(current_value)?;

    let id_str = encode_uuid(id);
    let now_str = encode_dt(Utc::now());

    let raw = self
      .conn
      .call(move |conn| {
        let updated = conn.execute(
          "UPDATE key_results SET current_value = ?2, last_updated = ?3
           WHERE key_result_id = ?1",
          rusqlite::params![id_str, current_value, now_str],
        )?;
        if updated == 0 {
          return Ok(None);
        }
        Ok(select_key_result(conn, &id_str)?)
      })
      .await?;

    let kr = raw
      .ok_or(okr_core::Error::KeyResultNotFound(id))?
      .into_key_result()?;
    tracing::debug!(%id, current_value, "updated key result value");
    Ok(kr)
  }
}
