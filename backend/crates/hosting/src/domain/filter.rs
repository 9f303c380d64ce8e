//! Filter Set
//!
//! The sparse set of query-shaping fields a read carries. Absent fields
//! never reach the generated predicate.

use crate::domain::entity::{Lifecycle, Scope};

pub const DEFAULT_LIMIT: i64 = 10;
pub const DEFAULT_OFFSET: i64 = 0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSet {
    /// Search text, already wrapped as `%text%`
    pub search: Option<String>,
    /// Parent names and possibly the entity's own name
    pub scope: Scope,
    pub limit: i64,
    pub offset: i64,
    /// Lift every lifecycle restriction
    pub show_deleted: bool,
    /// Show `disabled` rows, still hide `deleted` ones
    pub show_disabled: bool,
    /// Lifecycle a delete in this request writes
    pub delete_as: Lifecycle,
}

impl Default for FilterSet {
    fn default() -> Self {
        Self {
            search: None,
            scope: Scope::new(),
            limit: DEFAULT_LIMIT,
            offset: DEFAULT_OFFSET,
            show_deleted: false,
            show_disabled: false,
            delete_as: Lifecycle::Disabled,
        }
    }
}

impl FilterSet {
    /// Exactly the rows of `scope`, whatever their lifecycle
    pub fn show_all(scope: Scope) -> Self {
        Self {
            scope,
            show_deleted: true,
            show_disabled: true,
            ..Self::default()
        }
    }

    pub fn with_search(mut self, text: &str) -> Self {
        self.search = wrap_search(text);
        self
    }
}

/// `%text%`, or nothing for an empty text
///
/// `%`, `_` and `\` in `text` are escaped, so they match only themselves
/// under the default `LIKE` escape character.
pub fn wrap_search(text: &str) -> Option<String> {
    if text.is_empty() {
        return None;
    }

    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    Some(pattern)
}
