//! SQLite persistence for stash.
//!
//! This module owns the database connection and provides all record
//! mutations plus the filtered-query primitive used by the resolver and
//! the listing engine. Every mutation is a single conditional UPDATE or
//! INSERT, so concurrent readers never observe a half-applied change.
//! Timestamps are stored as Unix seconds (INTEGER).

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row, ToSql};

use crate::error::{StashError, StashResult};
use crate::listing::{build_query, ListOptions, OrderPolicy};
use crate::models::{Attr, Value, FILE_NAME, NOTE_NAME};
use crate::validation::validate_alias;

/// Column list shared by every record SELECT.
const SQL_COLUMNS: &str = "id, parent_id, name, alias, mark, frequency, \
     value_text, value_blob, value_int, value_real, created_at, updated_at, deleted_at";

/// Escape LIKE metacharacters so user input matches literally.
/// Queries using the result must carry `ESCAPE '\'`.
pub(crate) fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if c == '%' || c == '_' || c == '\\' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn timestamp(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}

/// Database wrapper for SQLite operations
pub struct Store {
    conn: Connection,
    order: OrderPolicy,
}

impl Store {
    /// Open (or create) the store at the given path.
    pub fn open<P: AsRef<Path>>(db_path: P) -> StashResult<Self> {
        let conn = Connection::open(db_path)?;

        // WAL mode for better behavior alongside other invocations
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;

        let store = Self {
            conn,
            order: OrderPolicy::default(),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Create an in-memory store (for testing)
    pub fn open_in_memory() -> StashResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn,
            order: OrderPolicy::default(),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Set the ordering policy used to break ties in single-record
    /// lookups and to pick the most recent record.
    pub fn set_order(&mut self, order: OrderPolicy) {
        self.order = order;
    }

    /// Initialize the attributes schema and indexes.
    pub fn init_schema(&self) -> StashResult<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS attributes (
                id          INTEGER NOT NULL PRIMARY KEY,
                name        TEXT,
                alias       TEXT,
                parent_id   INTEGER,
                frequency   INTEGER DEFAULT 0,
                mark        INTEGER DEFAULT 0,

                value_text  TEXT,
                value_blob  BLOB,
                value_int   INTEGER,
                value_real  REAL,
                value_time  INTEGER,

                accessed_at INTEGER,
                updated_at  INTEGER,
                deleted_at  INTEGER,
                created_at  INTEGER NOT NULL
            );

            CREATE UNIQUE INDEX IF NOT EXISTS index_on_alias       ON attributes (alias);
            CREATE        INDEX IF NOT EXISTS index_on_name        ON attributes (name);
            CREATE        INDEX IF NOT EXISTS index_on_value_text  ON attributes (value_text);
            CREATE        INDEX IF NOT EXISTS index_on_value_blob  ON attributes (value_blob);
            CREATE        INDEX IF NOT EXISTS index_on_value_int   ON attributes (value_int);
            CREATE        INDEX IF NOT EXISTS index_on_value_real  ON attributes (value_real);
            CREATE        INDEX IF NOT EXISTS index_on_accessed_at ON attributes (accessed_at);
            CREATE        INDEX IF NOT EXISTS index_on_deleted_at  ON attributes (deleted_at);
            CREATE        INDEX IF NOT EXISTS index_on_frequency   ON attributes (frequency);
            CREATE        INDEX IF NOT EXISTS index_on_mark        ON attributes (mark);
            "#,
        )?;

        Ok(())
    }

    fn row_to_attr(&self, row: &Row) -> rusqlite::Result<Attr> {
        let text: Option<String> = row.get(6)?;
        let blob: Option<Vec<u8>> = row.get(7)?;
        let int: Option<i64> = row.get(8)?;
        let real: Option<f64> = row.get(9)?;

        // One value kind per record; if a row has several populated
        // columns, display precedence is blob, text, int, real.
        let value = if let Some(b) = blob.filter(|b| !b.is_empty()) {
            Value::Blob(b)
        } else if let Some(t) = text {
            Value::Text(t)
        } else if let Some(i) = int {
            Value::Int(i)
        } else if let Some(r) = real {
            Value::Real(r)
        } else {
            Value::Text(String::new())
        };

        Ok(Attr {
            id: row.get(0)?,
            parent_id: row.get(1)?,
            name: row.get(2)?,
            alias: row.get(3)?,
            mark: row.get(4)?,
            frequency: row.get(5)?,
            value,
            created_at: timestamp(row.get(10)?),
            updated_at: row.get::<_, Option<i64>>(11)?.map(timestamp),
            deleted_at: row.get::<_, Option<i64>>(12)?.map(timestamp),
        })
    }

    /// Insert a plain note.
    pub fn insert_note(&self, value_text: &str) -> StashResult<i64> {
        self.conn.execute(
            "INSERT INTO attributes (name, value_text, created_at) \
             VALUES (?, ?, strftime('%s', 'now'))",
            params![NOTE_NAME, value_text],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Insert an attribute, optionally named and optionally under a
    /// parent record.
    pub fn insert_attr(
        &self,
        name: Option<&str>,
        value_text: &str,
        parent_id: Option<i64>,
    ) -> StashResult<i64> {
        self.conn.execute(
            "INSERT INTO attributes (name, value_text, parent_id, created_at) \
             VALUES (?, ?, ?, strftime('%s', 'now'))",
            params![name, value_text, parent_id],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Import a file: value_text holds the absolute path, value_blob the contents.
    pub fn insert_file(&self, path: &str, contents: &[u8]) -> StashResult<i64> {
        self.conn.execute(
            "INSERT INTO attributes (name, value_text, value_blob, created_at) \
             VALUES (?, ?, ?, strftime('%s', 'now'))",
            params![FILE_NAME, path, contents],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Select at most one record matching the given conditions, ties
    /// broken by the store's order policy. The alias-query primitive
    /// behind the resolver tiers.
    pub(crate) fn select_one(
        &self,
        conditions: &str,
        query_params: &[&dyn ToSql],
    ) -> StashResult<Option<Attr>> {
        let sql = format!(
            "SELECT {} FROM attributes WHERE {} ORDER BY {} LIMIT 1",
            SQL_COLUMNS,
            conditions,
            self.order.sql()
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let attr = stmt
            .query_row(query_params, |row| self.row_to_attr(row))
            .optional()?;
        Ok(attr)
    }

    /// Look up a live record by id.
    pub fn find_by_id(&self, id: i64) -> StashResult<Option<Attr>> {
        self.select_one("id = ? AND deleted_at IS NULL", params![id])
    }

    /// Look up a live record by exact alias.
    pub fn find_by_exact_alias(&self, alias: &str) -> StashResult<Option<Attr>> {
        self.select_one("alias = ? AND deleted_at IS NULL", params![alias])
    }

    /// Look up a live record by alias LIKE pattern. The pattern's
    /// literal portion must already be escaped via [`escape_like`].
    pub fn find_by_alias_like(&self, pattern: &str) -> StashResult<Option<Attr>> {
        self.select_one(
            "alias LIKE ? ESCAPE '\\' AND deleted_at IS NULL",
            params![pattern],
        )
    }

    /// Look up a soft-deleted record by exact alias (restore path).
    pub fn find_removed_by_alias(&self, alias: &str) -> StashResult<Option<Attr>> {
        self.select_one("alias = ? AND deleted_at IS NOT NULL", params![alias])
    }

    /// The id of the most recent live record per the store's order
    /// policy. Default target for show/cat/edit without arguments.
    pub fn last_id(&self) -> StashResult<Option<i64>> {
        let sql = format!(
            "SELECT id FROM attributes WHERE deleted_at IS NULL ORDER BY {} LIMIT 1",
            self.order.sql()
        );
        let id = self
            .conn
            .query_row(&sql, [], |row| row.get(0))
            .optional()?;
        Ok(id)
    }

    /// Execute a filtered listing. Returns fully materialized records
    /// in order; recursion into children is the caller's concern.
    pub fn list(&self, opts: &ListOptions) -> StashResult<Vec<Attr>> {
        let query = build_query(opts)?;
        let sql = format!(
            "SELECT {} FROM attributes WHERE {} ORDER BY {} {}",
            SQL_COLUMNS, query.conditions, query.order_sql, query.limit_sql
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let param_refs: Vec<&dyn ToSql> = query.params.iter().map(|p| p.as_ref()).collect();
        let attrs = stmt
            .query_map(param_refs.as_slice(), |row| self.row_to_attr(row))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(attrs)
    }

    /// Replace a record's value text, stamping updated_at.
    ///
    /// Callers should skip the call when the new text equals the old
    /// text to avoid spurious timestamp churn.
    pub fn update_value(&self, id: i64, value_text: &str) -> StashResult<usize> {
        let updated = self.conn.execute(
            "UPDATE attributes SET value_text = ?, updated_at = strftime('%s', 'now') \
             WHERE id = ?",
            params![value_text, id],
        )?;
        Ok(updated)
    }

    /// Set or clear a record's alias.
    ///
    /// `None` clears the alias. A non-empty alias must contain at least
    /// one non-digit, non-whitespace character; a duplicate alias among
    /// live records is a conflict. Either failure leaves the record
    /// untouched.
    pub fn set_alias(&self, id: i64, alias: Option<&str>) -> StashResult<usize> {
        let alias = alias.filter(|a| !a.is_empty());

        if let Some(a) = alias {
            validate_alias(a)?;
        }

        let result = self.conn.execute(
            "UPDATE attributes SET alias = ? WHERE id = ?",
            params![alias, id],
        );

        match result {
            Ok(updated) => {
                tracing::debug!(id, alias = alias.unwrap_or(""), "alias updated");
                Ok(updated)
            }
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == ErrorCode::ConstraintViolation =>
            {
                Err(StashError::conflict(format!(
                    "alias \"{}\" is already in use",
                    alias.unwrap_or_default()
                )))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Set a record's mark flag. No-op on soft-deleted records.
    pub fn set_mark(&self, id: i64, mark: i64) -> StashResult<usize> {
        let updated = self.conn.execute(
            "UPDATE attributes SET mark = ? WHERE id = ? AND deleted_at IS NULL",
            params![mark, id],
        )?;
        Ok(updated)
    }

    /// Soft-delete a record. Returns 0 when it is already deleted.
    pub fn soft_delete(&self, id: i64) -> StashResult<usize> {
        let updated = self.conn.execute(
            "UPDATE attributes SET deleted_at = strftime('%s', 'now') \
             WHERE id = ? AND deleted_at IS NULL",
            params![id],
        )?;
        Ok(updated)
    }

    /// Restore a soft-deleted record. Returns 0 when it is not deleted.
    pub fn restore(&self, id: i64) -> StashResult<usize> {
        let updated = self.conn.execute(
            "UPDATE attributes SET deleted_at = NULL \
             WHERE id = ? AND deleted_at IS NOT NULL",
            params![id],
        )?;
        Ok(updated)
    }

    /// Bump a record's usage frequency. No-op on soft-deleted records.
    pub fn increment_frequency(&self, id: i64) -> StashResult<usize> {
        let updated = self.conn.execute(
            "UPDATE attributes SET frequency = frequency + 1 \
             WHERE id = ? AND deleted_at IS NULL",
            params![id],
        )?;
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("plain"), "plain");
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
    }

    #[test]
    fn test_insert_and_find_note() {
        let store = Store::open_in_memory().unwrap();
        let id = store.insert_note("remember the milk").unwrap();

        let attr = store.find_by_id(id).unwrap().unwrap();
        assert_eq!(attr.id, id);
        assert_eq!(attr.name.as_deref(), Some(NOTE_NAME));
        assert_eq!(attr.value, Value::Text("remember the milk".into()));
        assert!(attr.updated_at.is_none());
        assert!(!attr.is_deleted());
    }

    #[test]
    fn test_insert_attr_with_parent() {
        let store = Store::open_in_memory().unwrap();
        let parent = store.insert_note("parent").unwrap();
        let child = store
            .insert_attr(Some("phone"), "555-1234", Some(parent))
            .unwrap();

        let attr = store.find_by_id(child).unwrap().unwrap();
        assert_eq!(attr.parent_id, Some(parent));
        assert_eq!(attr.name.as_deref(), Some("phone"));

        let bare = store.insert_attr(None, "unnamed", Some(parent)).unwrap();
        let attr = store.find_by_id(bare).unwrap().unwrap();
        assert!(attr.name.is_none());
    }

    #[test]
    fn test_insert_file_blob_takes_precedence() {
        let store = Store::open_in_memory().unwrap();
        let id = store.insert_file("/tmp/notes.txt", b"file body").unwrap();

        let attr = store.find_by_id(id).unwrap().unwrap();
        assert_eq!(attr.name.as_deref(), Some(FILE_NAME));
        assert_eq!(attr.value, Value::Blob(b"file body".to_vec()));
        assert_eq!(attr.display_value(), "file body");
    }

    #[test]
    fn test_set_alias_and_exact_lookup() {
        let store = Store::open_in_memory().unwrap();
        let id = store.insert_note("aliased").unwrap();

        assert_eq!(store.set_alias(id, Some("groceries")).unwrap(), 1);
        let attr = store.find_by_exact_alias("groceries").unwrap().unwrap();
        assert_eq!(attr.id, id);
    }

    #[test]
    fn test_set_alias_rejects_digits_and_whitespace() {
        let store = Store::open_in_memory().unwrap();
        let id = store.insert_note("note").unwrap();
        store.set_alias(id, Some("keep")).unwrap();

        for bad in ["123", "  ", " 4 2 "] {
            let err = store.set_alias(id, Some(bad)).unwrap_err();
            assert!(matches!(err, StashError::Validation { .. }));
        }

        // failed attempts leave the alias unchanged
        let attr = store.find_by_id(id).unwrap().unwrap();
        assert_eq!(attr.alias.as_deref(), Some("keep"));
    }

    #[test]
    fn test_set_alias_conflict() {
        let store = Store::open_in_memory().unwrap();
        let a = store.insert_note("first").unwrap();
        let b = store.insert_note("second").unwrap();

        store.set_alias(a, Some("taken")).unwrap();
        let err = store.set_alias(b, Some("taken")).unwrap_err();
        assert!(matches!(err, StashError::Conflict(_)));

        let attr = store.find_by_id(b).unwrap().unwrap();
        assert!(attr.alias.is_none());
    }

    #[test]
    fn test_set_alias_empty_clears() {
        let store = Store::open_in_memory().unwrap();
        let id = store.insert_note("note").unwrap();
        store.set_alias(id, Some("handle")).unwrap();

        store.set_alias(id, None).unwrap();
        let attr = store.find_by_id(id).unwrap().unwrap();
        assert!(attr.alias.is_none());

        // empty string behaves like None
        store.set_alias(id, Some("handle")).unwrap();
        store.set_alias(id, Some("")).unwrap();
        let attr = store.find_by_id(id).unwrap().unwrap();
        assert!(attr.alias.is_none());
    }

    #[test]
    fn test_soft_delete_restore_round_trip() {
        let store = Store::open_in_memory().unwrap();
        let id = store.insert_note("ephemeral").unwrap();
        store.set_alias(id, Some("eph")).unwrap();
        let before = store.find_by_id(id).unwrap().unwrap();

        assert_eq!(store.soft_delete(id).unwrap(), 1);
        assert!(store.find_by_id(id).unwrap().is_none());

        // second delete is an idempotent no-op
        assert_eq!(store.soft_delete(id).unwrap(), 0);

        assert_eq!(store.restore(id).unwrap(), 1);
        let after = store.find_by_id(id).unwrap().unwrap();
        assert_eq!(after, before);

        assert_eq!(store.restore(id).unwrap(), 0);
    }

    #[test]
    fn test_find_removed_by_alias() {
        let store = Store::open_in_memory().unwrap();
        let id = store.insert_note("gone").unwrap();
        store.set_alias(id, Some("ghost")).unwrap();
        store.soft_delete(id).unwrap();

        assert!(store.find_by_exact_alias("ghost").unwrap().is_none());
        let attr = store.find_removed_by_alias("ghost").unwrap().unwrap();
        assert_eq!(attr.id, id);
    }

    #[test]
    fn test_mark_and_frequency_skip_deleted() {
        let store = Store::open_in_memory().unwrap();
        let id = store.insert_note("note").unwrap();

        assert_eq!(store.set_mark(id, 1).unwrap(), 1);
        assert_eq!(store.increment_frequency(id).unwrap(), 1);

        store.soft_delete(id).unwrap();
        assert_eq!(store.set_mark(id, 0).unwrap(), 0);
        assert_eq!(store.increment_frequency(id).unwrap(), 0);
    }

    #[test]
    fn test_update_value_stamps_updated_at() {
        let store = Store::open_in_memory().unwrap();
        let id = store.insert_note("draft").unwrap();

        assert_eq!(store.update_value(id, "final").unwrap(), 1);
        let attr = store.find_by_id(id).unwrap().unwrap();
        assert_eq!(attr.value, Value::Text("final".into()));
        assert!(attr.updated_at.is_some());
    }

    #[test]
    fn test_list_marked_first() {
        let store = Store::open_in_memory().unwrap();
        let a = store.insert_note("first").unwrap();
        let b = store.insert_note("second").unwrap();
        let c = store.insert_note("third").unwrap();
        store.set_mark(b, 1).unwrap();

        let attrs = store.list(&ListOptions::default()).unwrap();
        assert_eq!(attrs.len(), 3);
        assert_eq!(attrs[0].id, b);
        let rest: Vec<i64> = attrs[1..].iter().map(|a| a.id).collect();
        assert!(rest.contains(&a) && rest.contains(&c));
    }

    #[test]
    fn test_list_filter_and_semantics() {
        let store = Store::open_in_memory().unwrap();
        let pie = store.insert_note("apple pie").unwrap();
        let tart = store.insert_note("apple tart").unwrap();

        let both = store
            .list(&ListOptions {
                filters: vec!["apple".into()],
                ..Default::default()
            })
            .unwrap();
        assert_eq!(both.len(), 2);

        let only_pie = store
            .list(&ListOptions {
                filters: vec!["apple".into(), "pie".into()],
                ..Default::default()
            })
            .unwrap();
        assert_eq!(only_pie.len(), 1);
        assert_eq!(only_pie[0].id, pie);

        let none = store
            .list(&ListOptions {
                filters: vec!["apple".into(), "crumble".into()],
                ..Default::default()
            })
            .unwrap();
        assert!(none.is_empty());
        let _ = tart;
    }

    #[test]
    fn test_list_filter_matches_alias() {
        let store = Store::open_in_memory().unwrap();
        let id = store.insert_note("unrelated body").unwrap();
        store.set_alias(id, Some("shopping")).unwrap();

        let attrs = store
            .list(&ListOptions {
                filters: vec!["shopp".into()],
                ..Default::default()
            })
            .unwrap();
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs[0].id, id);
    }

    #[test]
    fn test_list_filter_treats_wildcards_literally() {
        let store = Store::open_in_memory().unwrap();
        store.insert_note("discount 50% off").unwrap();
        store.insert_note("discount 50 cents off").unwrap();

        let attrs = store
            .list(&ListOptions {
                filters: vec!["50%".into()],
                ..Default::default()
            })
            .unwrap();
        assert_eq!(attrs.len(), 1);
    }

    #[test]
    fn test_list_removed_only() {
        let store = Store::open_in_memory().unwrap();
        let live = store.insert_note("live").unwrap();
        let dead = store.insert_note("dead").unwrap();
        store.soft_delete(dead).unwrap();

        let removed = store
            .list(&ListOptions {
                include_removed: true,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].id, dead);

        let attrs = store.list(&ListOptions::default()).unwrap();
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs[0].id, live);
    }

    #[test]
    fn test_list_short_mode_marked_only() {
        let store = Store::open_in_memory().unwrap();
        store.insert_note("plain").unwrap();
        let marked = store.insert_note("pinned").unwrap();
        store.set_mark(marked, 1).unwrap();

        let attrs = store
            .list(&ListOptions {
                short_mode: true,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs[0].id, marked);
    }

    #[test]
    fn test_list_root_scope() {
        let store = Store::open_in_memory().unwrap();
        let root = store.insert_note("root").unwrap();
        let child = store
            .insert_attr(Some("kv"), "under root", Some(root))
            .unwrap();
        store.insert_note("other top-level").unwrap();

        let children = store
            .list(&ListOptions {
                root_id: Some(root),
                recursive: true,
                // root scope ignores pagination
                limit: 1,
                offset: 5,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].id, child);

        // top-level listing hides children
        let top = store.list(&ListOptions::default()).unwrap();
        assert!(top.iter().all(|a| a.id != child));
    }

    #[test]
    fn test_list_pagination() {
        let store = Store::open_in_memory().unwrap();
        for i in 0..5 {
            store.insert_note(&format!("note {}", i)).unwrap();
        }

        let page = store
            .list(&ListOptions {
                offset: 1,
                limit: 2,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(page.len(), 2);

        let all = store
            .list(&ListOptions {
                limit: crate::listing::NO_LIMIT,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(all.len(), 5);
    }

    #[test]
    fn test_list_frequency_policy() {
        let store = Store::open_in_memory().unwrap();
        let quiet = store.insert_note("rarely used").unwrap();
        let busy = store.insert_note("often used").unwrap();
        for _ in 0..3 {
            store.increment_frequency(busy).unwrap();
        }

        let attrs = store
            .list(&ListOptions {
                order: OrderPolicy::FrequencyThenMark,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(attrs[0].id, busy);
        assert_eq!(attrs[1].id, quiet);
    }

    #[test]
    fn test_lookup_ties_follow_configured_order() {
        let mut store = Store::open_in_memory().unwrap();
        let marked = store.insert_note("pinned").unwrap();
        store.set_alias(marked, Some("abc-one")).unwrap();
        store.set_mark(marked, 1).unwrap();

        let busy = store.insert_note("often used").unwrap();
        store.set_alias(busy, Some("abc-two")).unwrap();
        for _ in 0..5 {
            store.increment_frequency(busy).unwrap();
        }

        // default policy prefers the marked record
        let hit = store.find_by_alias_like("abc%").unwrap().unwrap();
        assert_eq!(hit.id, marked);

        store.set_order(OrderPolicy::FrequencyThenMark);
        let hit = store.find_by_alias_like("abc%").unwrap().unwrap();
        assert_eq!(hit.id, busy);
    }

    #[test]
    fn test_last_id() {
        let store = Store::open_in_memory().unwrap();
        assert!(store.last_id().unwrap().is_none());

        store.insert_note("old").unwrap();
        let marked = store.insert_note("pinned").unwrap();
        store.set_mark(marked, 1).unwrap();

        // marked records sort first under the default policy
        assert_eq!(store.last_id().unwrap(), Some(marked));
    }
}
