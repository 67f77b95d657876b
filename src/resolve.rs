//! Identifier resolution for stash.
//!
//! Maps a user-supplied string to at most one record via an ordered
//! list of matcher strategies, each tried only when the previous tier
//! found nothing:
//!
//! 1. exact alias
//! 2. alias prefix
//! 3. alias suffix
//! 4. fuzzy subsequence over the alias
//! 5. direct id lookup, when the input parses as an integer
//!
//! A successful resolution increments the record's frequency exactly
//! once; a miss touches nothing and is `Ok(None)`, not an error.

use crate::error::StashResult;
use crate::models::Attr;
use crate::store::{escape_like, Store};

/// How far down the tier list a resolution may fall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveMode {
    /// Exact alias tier only. Used by alias management so a typo can
    /// never unalias or merge an unrelated record via fuzzy collision.
    ExactOnly,
    /// All alias tiers plus the numeric id fallback.
    Fuzzy,
}

type Matcher = fn(&Store, &str) -> StashResult<Option<Attr>>;

fn match_exact(store: &Store, input: &str) -> StashResult<Option<Attr>> {
    store.find_by_exact_alias(input)
}

fn match_prefix(store: &Store, input: &str) -> StashResult<Option<Attr>> {
    store.find_by_alias_like(&format!("{}%", escape_like(input)))
}

fn match_suffix(store: &Store, input: &str) -> StashResult<Option<Attr>> {
    store.find_by_alias_like(&format!("%{}", escape_like(input)))
}

fn match_fuzzy(store: &Store, input: &str) -> StashResult<Option<Attr>> {
    store.find_by_alias_like(&fuzzy_pattern(input))
}

/// Alias tiers in fallback order.
const ALIAS_TIERS: [Matcher; 4] = [match_exact, match_prefix, match_suffix, match_fuzzy];

/// Build the LIKE pattern for a fuzzy subsequence match: the input's
/// characters, in order, each surrounded by wildcards. A cheap
/// approximate match, not edit distance.
pub fn fuzzy_pattern(input: &str) -> String {
    let mut pattern = String::with_capacity(input.len() * 2 + 1);
    pattern.push('%');
    for c in input.chars() {
        pattern.push_str(&escape_like(&c.to_string()));
        pattern.push('%');
    }
    pattern
}

/// Resolve an id-or-alias string to at most one live record.
pub fn resolve(store: &Store, input: &str, mode: ResolveMode) -> StashResult<Option<Attr>> {
    if input.is_empty() {
        return Ok(None);
    }

    let tiers: &[Matcher] = match mode {
        ResolveMode::ExactOnly => &ALIAS_TIERS[..1],
        ResolveMode::Fuzzy => &ALIAS_TIERS[..],
    };

    for matcher in tiers {
        if let Some(attr) = matcher(store, input)? {
            return Ok(Some(touch(store, attr)?));
        }
    }

    if mode == ResolveMode::Fuzzy {
        if let Ok(id) = input.parse::<i64>() {
            if let Some(attr) = store.find_by_id(id)? {
                return Ok(Some(touch(store, attr)?));
            }
        }
    }

    Ok(None)
}

/// Record a successful resolution: bump the stored frequency and
/// reflect the bump in the returned copy.
fn touch(store: &Store, mut attr: Attr) -> StashResult<Attr> {
    store.increment_frequency(attr.id)?;
    attr.frequency += 1;
    Ok(attr)
}
