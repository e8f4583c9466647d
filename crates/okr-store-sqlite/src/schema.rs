//! SQL schema for the OKR SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS life_objectives (
    life_objective_id TEXT PRIMARY KEY,
    title             TEXT NOT NULL,
    description       TEXT,
    icon              TEXT,
    created_at        TEXT NOT NULL    -- ISO 8601 UTC; listing order only
);

-- Children are replaced wholesale when their Life Objective is edited.
CREATE TABLE IF NOT EXISTS area_objectives (
    area_objective_id TEXT PRIMARY KEY,
    life_objective_id TEXT NOT NULL
        REFERENCES life_objectives(life_objective_id) ON DELETE CASCADE,
    position          INTEGER NOT NULL,
    title             TEXT NOT NULL,
    description       TEXT,
    level             TEXT NOT NULL,   -- 'company' | 'team' | 'individual' | 'personal'
    icon              TEXT
);

CREATE TABLE IF NOT EXISTS key_results (
    key_result_id      TEXT PRIMARY KEY,
    area_objective_id  TEXT NOT NULL
        REFERENCES area_objectives(area_objective_id) ON DELETE CASCADE,
    position           INTEGER NOT NULL,
    title              TEXT NOT NULL,
    current_value      REAL NOT NULL DEFAULT 0,
    target_value       REAL NOT NULL,
    unit               TEXT NOT NULL,
    tracking_frequency TEXT NOT NULL,
    last_updated       TEXT NOT NULL,   -- ISO 8601 UTC
    target_date        TEXT,            -- ISO 8601 UTC or NULL
    tags               TEXT NOT NULL DEFAULT '[]',
    assignees          TEXT NOT NULL DEFAULT '[]',
    sub_tasks          TEXT             -- JSON {completed,total} or NULL
);

CREATE INDEX IF NOT EXISTS areas_life_idx ON area_objectives(life_objective_id, position);
CREATE INDEX IF NOT EXISTS krs_area_idx   ON key_results(area_objective_id, position);

PRAGMA user_version = 1;
";
