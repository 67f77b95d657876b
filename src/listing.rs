//! Filter/List Engine for stash.
//!
//! This module translates structured list options into the SQL
//! conditions, ordering, and pagination executed by the store. Query
//! construction is kept as a pure function so the rules are testable
//! without a database.

use rusqlite::ToSql;
use serde::{Deserialize, Serialize};

use crate::error::StashResult;
use crate::store::escape_like;
use crate::validation::validate_filter;

/// Sentinel limit value that disables pagination entirely.
pub const NO_LIMIT: i64 = -1;

/// Ordering policy for listings and resolver tie-breaks.
///
/// Two variants existed historically; mark-then-recency is canonical
/// and the frequency-first ranking is kept as a selectable alternative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderPolicy {
    /// Marked records first, then most recently touched
    #[default]
    MarkThenRecency,
    /// Most frequently resolved first, then mark, then recency
    FrequencyThenMark,
}

impl OrderPolicy {
    /// The ORDER BY expression for this policy.
    pub(crate) fn sql(&self) -> &'static str {
        match self {
            OrderPolicy::MarkThenRecency => {
                "mark DESC, COALESCE(updated_at, created_at) DESC"
            }
            OrderPolicy::FrequencyThenMark => {
                "frequency DESC, mark DESC, COALESCE(updated_at, created_at) DESC"
            }
        }
    }
}

/// Options controlling a filtered listing.
#[derive(Debug, Clone)]
pub struct ListOptions {
    /// List soft-deleted records instead of live ones
    pub include_removed: bool,
    /// None: top-level records only. Some(id): children of that record,
    /// shown in full (pagination disabled).
    pub root_id: Option<i64>,
    /// When false, only parentless records qualify regardless of root
    pub recursive: bool,
    /// Restrict to marked records only
    pub short_mode: bool,
    /// Free-text filters; each must match value text or alias, all must match
    pub filters: Vec<String>,
    /// Pagination offset
    pub offset: i64,
    /// Pagination limit; [`NO_LIMIT`] disables pagination
    pub limit: i64,
    /// Ordering policy
    pub order: OrderPolicy,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            include_removed: false,
            root_id: None,
            recursive: false,
            short_mode: false,
            filters: Vec::new(),
            offset: 0,
            limit: 10,
            order: OrderPolicy::default(),
        }
    }
}

/// A built listing query: WHERE conditions, ORDER BY expression, LIMIT
/// clause, and the bound parameters, ready for the store to execute.
pub(crate) struct ListQuery {
    pub conditions: String,
    pub order_sql: &'static str,
    pub limit_sql: String,
    pub params: Vec<Box<dyn ToSql>>,
}

/// Build the listing query for the given options.
///
/// Rules:
/// - base scope follows `include_removed`
/// - no root: top-level records only; a specific root: its children, unpaginated
/// - `recursive = false` always forces parentless-only
/// - `short_mode` adds a marked-only condition
/// - each filter contributes `(value_text LIKE %f% OR alias LIKE %f%)`,
///   combined with AND; any filter (without a root) disables pagination
pub(crate) fn build_query(opts: &ListOptions) -> StashResult<ListQuery> {
    let mut nolimit = opts.limit == NO_LIMIT;
    let mut params: Vec<Box<dyn ToSql>> = Vec::new();

    let mut conditions = String::from(if opts.include_removed {
        "deleted_at IS NOT NULL"
    } else {
        "deleted_at IS NULL"
    });

    match opts.root_id {
        None => conditions.push_str(" AND parent_id IS NULL"),
        Some(root) => {
            nolimit = true;
            conditions.push_str(" AND parent_id = ?");
            params.push(Box::new(root));
        }
    }

    if !opts.recursive && opts.root_id.is_some() {
        conditions.push_str(" AND parent_id IS NULL");
    }

    if opts.short_mode {
        conditions.push_str(" AND mark > 0");
    }

    if opts.root_id.is_none() && !opts.filters.is_empty() {
        nolimit = true;

        let mut value_or_alias = Vec::with_capacity(opts.filters.len());
        for filter in &opts.filters {
            validate_filter(filter)?;
            let like = format!("%{}%", escape_like(filter));
            params.push(Box::new(like.clone()));
            params.push(Box::new(like));
            value_or_alias
                .push("(value_text LIKE ? ESCAPE '\\' OR alias LIKE ? ESCAPE '\\')");
        }

        conditions.push_str(" AND ( ");
        conditions.push_str(&value_or_alias.join(" AND "));
        conditions.push_str(" )");
    }

    let limit_sql = if nolimit {
        String::new()
    } else {
        params.push(Box::new(opts.offset));
        params.push(Box::new(opts.limit));
        "LIMIT ?, ?".to_string()
    };

    Ok(ListQuery {
        conditions,
        order_sql: opts.order.sql(),
        limit_sql,
        params,
    })
}
