//! Entity metadata
//!
//! Every hosting entity is described once by an [`Entity`] impl: its
//! table, the join chain up to its root, the columns it can be filtered
//! on, and how its insert and update statements are written. The store,
//! the filter builder and the router are generic over this trait.

use serde::Serialize;
use serde::de::DeserializeOwned;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Postgres, QueryBuilder};
use std::collections::BTreeMap;
use validator::Validate;

use crate::error::{HostingError, HostingResult};

// ============================================================================
// ScopeField
// ============================================================================

/// A named level of the hierarchy, as it appears in paths and filters
///
/// The declaration order is the filter precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScopeField {
    Domain,
    Plan,
    Tariff,
    Tenant,
    Group,
    User,
}

impl ScopeField {
    pub const HIERARCHY: [ScopeField; 6] = [
        ScopeField::Domain,
        ScopeField::Plan,
        ScopeField::Tariff,
        ScopeField::Tenant,
        ScopeField::Group,
        ScopeField::User,
    ];

    /// Path parameter name
    #[inline]
    pub const fn param(&self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::Plan => "plan",
            Self::Tariff => "tariff",
            Self::Tenant => "tenant",
            Self::Group => "group",
            Self::User => "user",
        }
    }

    pub fn from_param(param: &str) -> Option<Self> {
        Self::HIERARCHY.into_iter().find(|f| f.param() == param)
    }
}

// ============================================================================
// Lifecycle
// ============================================================================

/// Terminal lifecycle states written by a soft delete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    /// Hidden by default, shown with `disabled=true`
    #[default]
    Disabled,
    /// Hidden unless `deleted=true`
    Deleted,
}

impl Lifecycle {
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::Deleted => "deleted",
        }
    }
}

impl std::fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Scope
// ============================================================================

/// Names of the parents (and possibly the entity itself) a request targets
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope(BTreeMap<ScopeField, String>);

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: ScopeField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: ScopeField, value: impl Into<String>) {
        self.0.insert(field, value.into());
    }

    pub fn get(&self, field: ScopeField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// The name for `field`, which the statement cannot do without
    pub fn require(&self, field: ScopeField) -> HostingResult<&str> {
        self.get(field)
            .ok_or_else(|| HostingError::Validation(format!("missing {}", field.param())))
    }

    /// Entries in precedence order
    pub fn iter(&self) -> impl Iterator<Item = (ScopeField, &str)> {
        self.0.iter().map(|(f, v)| (*f, v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Build from path parameters, ignoring names that are not hierarchy levels
    pub fn from_params<'a, I>(params: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut scope = Self::new();
        for (name, value) in params {
            if let Some(field) = ScopeField::from_param(name) {
                scope.set(field, value);
            }
        }
        scope
    }
}

// ============================================================================
// Entity
// ============================================================================

/// Metadata and statement shapes of one entity kind
pub trait Entity: Send + Sync + 'static {
    /// Name used in logs
    const KIND: &'static str;
    const TABLE: &'static str;
    const ALIAS: &'static str;

    /// The level this entity occupies; its natural key column is the scope column of it
    const KEY: ScopeField;
    /// Every ancestor needed to pin one row, root first
    const PARENTS: &'static [ScopeField];

    /// Select list of the read query
    const COLUMNS: &'static str;
    /// Joins following `FROM <TABLE> <ALIAS>`, up to the root
    const JOINS: &'static str;

    /// Text columns matched by `search`
    const SEARCH_COLUMNS: &'static [&'static str];
    /// Column holding each level's name, as visible through `JOINS`
    const SCOPE_COLUMNS: &'static [(ScopeField, &'static str)];
    const TYPE_COLUMN: &'static str;
    const ORDER_COLUMN: &'static str;

    /// Row as returned to clients
    type Record: for<'r> FromRow<'r, PgRow> + Serialize + Send + Unpin + 'static;
    /// Body of POST and PUT
    type Input: DeserializeOwned + Validate + Send + Sync + 'static;

    /// The natural key carried by an input, i.e. the name after a rename
    fn input_key(input: &Self::Input) -> &str;

    /// `INSERT ... SELECT <values> FROM <parents> WHERE <parent names>`
    fn push_insert(
        qb: &mut QueryBuilder<'static, Postgres>,
        scope: &Scope,
        input: &Self::Input,
    ) -> HostingResult<()>;

    /// `UPDATE ... SET ... WHERE` followed by [`push_target`]
    fn push_update(
        qb: &mut QueryBuilder<'static, Postgres>,
        scope: &Scope,
        key: &str,
        input: &Self::Input,
    ) -> HostingResult<()>;

    fn scope_column(field: ScopeField) -> Option<&'static str> {
        Self::SCOPE_COLUMNS
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, column)| *column)
    }
}

/// Append `id IN (<select of the single row named key under scope>)`
///
/// The sub-select walks the whole parent chain, so a key reused under
/// another parent never matches.
pub fn push_target<E: Entity>(
    qb: &mut QueryBuilder<'static, Postgres>,
    scope: &Scope,
    key: &str,
) -> HostingResult<()> {
    qb.push("id IN (SELECT ")
        .push(E::ALIAS)
        .push(".id FROM ")
        .push(E::TABLE)
        .push(" ")
        .push(E::ALIAS);
    if !E::JOINS.is_empty() {
        qb.push(" ").push(E::JOINS);
    }

    let levels = E::PARENTS.iter().copied().chain(std::iter::once(E::KEY));
    for (i, field) in levels.enumerate() {
        let column = E::scope_column(field).ok_or_else(|| {
            HostingError::Internal(format!("{} has no column for {}", E::KIND, field.param()))
        })?;
        let value = if field == E::KEY {
            key
        } else {
            scope.require(field)?
        };
        qb.push(if i == 0 { " WHERE " } else { " AND " })
            .push(column)
            .push(" = ")
            .push_bind(value.to_string());
    }

    qb.push(")");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_field_order_is_precedence() {
        let mut fields = vec![ScopeField::User, ScopeField::Domain, ScopeField::Tenant];
        fields.sort();
        assert_eq!(
            fields,
            vec![ScopeField::Domain, ScopeField::Tenant, ScopeField::User]
        );
    }

    #[test]
    fn test_scope_from_params_ignores_unknown() {
        let scope = Scope::from_params([("domain", "acme"), ("page", "2"), ("tenant", "shop")]);
        assert_eq!(scope.get(ScopeField::Domain), Some("acme"));
        assert_eq!(scope.get(ScopeField::Tenant), Some("shop"));
        assert_eq!(scope.iter().count(), 2);
    }

    #[test]
    fn test_scope_require() {
        let scope = Scope::new().with(ScopeField::Domain, "acme");
        assert_eq!(scope.require(ScopeField::Domain).unwrap(), "acme");
        assert!(matches!(
            scope.require(ScopeField::Plan),
            Err(HostingError::Validation(_))
        ));
    }

    #[test]
    fn test_lifecycle_default_is_disabled() {
        assert_eq!(Lifecycle::default(), Lifecycle::Disabled);
        assert_eq!(Lifecycle::Deleted.as_str(), "deleted");
    }
}
