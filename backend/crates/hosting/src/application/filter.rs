//! Filter Builder
//!
//! Turns a [`FilterSet`] into a list of predicates and renders them into
//! a `QueryBuilder`. Fields are visited in a fixed order: search, then the
//! hierarchy levels root first, then visibility. The first clause opens
//! with `WHERE`, every later one with `AND`. All values are bound.

use serde::Deserialize;
use sqlx::{Postgres, QueryBuilder};

use crate::domain::entity::{Entity, Lifecycle, Scope};
use crate::domain::filter::{DEFAULT_LIMIT, DEFAULT_OFFSET, FilterSet, wrap_search};

// ============================================================================
// Query parameters
// ============================================================================

/// Raw query string of a list or delete request
///
/// Everything is read as text so that a malformed number falls back to its
/// default instead of failing the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub limit: Option<String>,
    pub offset: Option<String>,
    pub search: Option<String>,
    pub deleted: Option<String>,
    pub disabled: Option<String>,
    pub forced: Option<String>,
}

impl ListParams {
    pub fn into_filter_set(self, scope: Scope) -> FilterSet {
        FilterSet {
            search: self.search.as_deref().and_then(wrap_search),
            scope,
            limit: page_value(self.limit.as_deref(), DEFAULT_LIMIT),
            offset: page_value(self.offset.as_deref(), DEFAULT_OFFSET),
            show_deleted: is_true(self.deleted.as_deref()),
            show_disabled: is_true(self.disabled.as_deref()),
            delete_as: if is_true(self.forced.as_deref()) {
                Lifecycle::Deleted
            } else {
                Lifecycle::Disabled
            },
        }
    }
}

fn page_value(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|n| *n >= 0)
        .unwrap_or(default)
}

fn is_true(raw: Option<&str>) -> bool {
    raw == Some("true")
}

// ============================================================================
// Predicates
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operator {
    /// Any of the columns matches the pattern
    Like(String),
    Eq(String),
    /// The column holds none of the values
    NotIn(Vec<&'static str>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub columns: Vec<&'static str>,
    pub operator: Operator,
}

impl Predicate {
    fn push_to(&self, qb: &mut QueryBuilder<'static, Postgres>) {
        match &self.operator {
            Operator::Like(pattern) => {
                qb.push("(");
                for (i, column) in self.columns.iter().enumerate() {
                    if i > 0 {
                        qb.push(" OR ");
                    }
                    qb.push(*column).push(" LIKE ").push_bind(pattern.clone());
                }
                qb.push(")");
            }
            Operator::Eq(value) => {
                for (i, column) in self.columns.iter().enumerate() {
                    if i > 0 {
                        qb.push(" AND ");
                    }
                    qb.push(*column).push(" = ").push_bind(value.clone());
                }
            }
            Operator::NotIn(values) => {
                for (i, column) in self.columns.iter().enumerate() {
                    if i > 0 {
                        qb.push(" AND ");
                    }
                    qb.push(*column).push(" NOT IN (");
                    let mut list = qb.separated(", ");
                    for value in values {
                        list.push_bind(*value);
                    }
                    list.push_unseparated(")");
                }
            }
        }
    }
}

/// Predicates joined with AND
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Predicates(Vec<Predicate>);

impl Predicates {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Predicate> {
        self.0.iter()
    }

    /// Append ` WHERE a AND b ...`, or nothing at all
    pub fn push_to(&self, qb: &mut QueryBuilder<'static, Postgres>) {
        for (i, predicate) in self.0.iter().enumerate() {
            qb.push(if i == 0 { " WHERE " } else { " AND " });
            predicate.push_to(qb);
        }
    }
}

/// Visibility clause for the lifecycle flags
///
/// `show_deleted` is the broader flag and wins over `show_disabled`.
fn hidden_lifecycles(filters: &FilterSet) -> Option<Vec<&'static str>> {
    match (filters.show_deleted, filters.show_disabled) {
        (true, _) => None,
        (false, true) => Some(vec![Lifecycle::Deleted.as_str()]),
        (false, false) => Some(vec![
            Lifecycle::Disabled.as_str(),
            Lifecycle::Deleted.as_str(),
        ]),
    }
}

/// Predicates of `filters` for entity `E`
///
/// Scope levels `E` cannot see through its joins are skipped.
pub fn build<E: Entity>(filters: &FilterSet) -> Predicates {
    let mut predicates = Vec::new();

    if let Some(pattern) = &filters.search {
        predicates.push(Predicate {
            columns: E::SEARCH_COLUMNS.to_vec(),
            operator: Operator::Like(pattern.clone()),
        });
    }

    for (field, value) in filters.scope.iter() {
        match E::scope_column(field) {
            Some(column) => predicates.push(Predicate {
                columns: vec![column],
                operator: Operator::Eq(value.to_string()),
            }),
            None => {
                tracing::debug!(entity = E::KIND, field = field.param(), "Scope level ignored");
            }
        }
    }

    if let Some(hidden) = hidden_lifecycles(filters) {
        predicates.push(Predicate {
            columns: vec![E::TYPE_COLUMN],
            operator: Operator::NotIn(hidden),
        });
    }

    Predicates(predicates)
}

/// Append ` ORDER BY ... LIMIT $n OFFSET $m`
pub fn push_page<E: Entity>(qb: &mut QueryBuilder<'static, Postgres>, filters: &FilterSet) {
    qb.push(" ORDER BY ")
        .push(E::ORDER_COLUMN)
        .push(" LIMIT ")
        .push_bind(filters.limit)
        .push(" OFFSET ")
        .push_bind(filters.offset);
}
