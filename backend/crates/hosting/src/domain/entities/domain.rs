//! Domain: the root of the hierarchy

use serde::{Deserialize, Serialize};
use sqlx::{Postgres, QueryBuilder};
use validator::Validate;

use crate::domain::entity::{Entity, Scope, ScopeField, push_target};
use crate::domain::validation::validate_name;
use crate::error::HostingResult;

/// Active domain kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainKind {
    Primary,
    Wholesale,
    Premium,
}

impl DomainKind {
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Wholesale => "wholesale",
            Self::Premium => "premium",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DomainRecord {
    pub name: String,
    pub organisation: String,
    pub primary_url: String,
    pub admin_url: String,
    pub data_path: String,
    pub user_name: String,
    pub version: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
}

/// Body of POST /domains and PUT /domains/{domain}
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DomainInput {
    #[validate(custom(function = "validate_name"))]
    pub name: String,
    #[validate(length(min = 1))]
    pub organisation: String,
    #[validate(url)]
    pub primary_url: String,
    #[validate(url)]
    pub admin_url: String,
    #[validate(length(min = 1))]
    pub data_path: String,
    #[validate(custom(function = "validate_name"))]
    pub user_name: String,
    /// Write-only
    #[validate(length(min = 12))]
    pub password: String,
    pub version: Option<String>,
    #[serde(rename = "type")]
    pub kind: DomainKind,
    pub description: Option<String>,
}

pub struct Domain;

impl Entity for Domain {
    const KIND: &'static str = "domain";
    const TABLE: &'static str = "domains";
    const ALIAS: &'static str = "d";
    const KEY: ScopeField = ScopeField::Domain;
    const PARENTS: &'static [ScopeField] = &[];

    const COLUMNS: &'static str = "d.name, d.organisation, d.primary_url, d.admin_url, \
        d.data_path, d.user_name, COALESCE(d.version, 'unknown') AS version, d.type, \
        COALESCE(d.description, 'unknown') AS description";
    const JOINS: &'static str = "";

    const SEARCH_COLUMNS: &'static [&'static str] = &["d.name", "d.organisation"];
    const SCOPE_COLUMNS: &'static [(ScopeField, &'static str)] = &[(ScopeField::Domain, "d.name")];
    const TYPE_COLUMN: &'static str = "d.type";
    const ORDER_COLUMN: &'static str = "d.name";

    type Record = DomainRecord;
    type Input = DomainInput;

    fn input_key(input: &DomainInput) -> &str {
        &input.name
    }

    fn push_insert(
        qb: &mut QueryBuilder<'static, Postgres>,
        _scope: &Scope,
        input: &DomainInput,
    ) -> HostingResult<()> {
        qb.push(
            "INSERT INTO domains (name, organisation, primary_url, admin_url, data_path, \
             user_name, password, version, type, description) VALUES (",
        );
        let mut values = qb.separated(", ");
        values.push_bind(input.name.clone());
        values.push_bind(input.organisation.clone());
        values.push_bind(input.primary_url.clone());
        values.push_bind(input.admin_url.clone());
        values.push_bind(input.data_path.clone());
        values.push_bind(input.user_name.clone());
        values.push_bind(input.password.clone());
        values.push_bind(input.version.clone());
        values.push_bind(input.kind.as_str());
        values.push_bind(input.description.clone());
        values.push_unseparated(")");
        Ok(())
    }

    fn push_update(
        qb: &mut QueryBuilder<'static, Postgres>,
        scope: &Scope,
        key: &str,
        input: &DomainInput,
    ) -> HostingResult<()> {
        qb.push("UPDATE domains SET ");
        let mut set = qb.separated(", ");
        set.push("name = ").push_bind_unseparated(input.name.clone());
        set.push("organisation = ")
            .push_bind_unseparated(input.organisation.clone());
        set.push("primary_url = ")
            .push_bind_unseparated(input.primary_url.clone());
        set.push("admin_url = ")
            .push_bind_unseparated(input.admin_url.clone());
        set.push("data_path = ")
            .push_bind_unseparated(input.data_path.clone());
        set.push("user_name = ")
            .push_bind_unseparated(input.user_name.clone());
        set.push("password = ")
            .push_bind_unseparated(input.password.clone());
        set.push("version = ")
            .push_bind_unseparated(input.version.clone());
        set.push("type = ").push_bind_unseparated(input.kind.as_str());
        set.push("description = ")
            .push_bind_unseparated(input.description.clone());
        qb.push(" WHERE ");
        push_target::<Self>(qb, scope, key)
    }
}
