//! Group: a set of users within a tenant

use serde::{Deserialize, Serialize};
use sqlx::{Postgres, QueryBuilder};
use validator::Validate;

use crate::domain::entity::{Entity, Scope, ScopeField, push_target};
use crate::domain::validation::validate_name;
use crate::error::HostingResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKind {
    Regular,
    Office,
    Access,
}

impl GroupKind {
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Office => "office",
            Self::Access => "access",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct GroupRecord {
    pub name: String,
    pub domain: String,
    pub tenant: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GroupInput {
    #[validate(custom(function = "validate_name"))]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: GroupKind,
}

pub struct Group;

impl Entity for Group {
    const KIND: &'static str = "group";
    const TABLE: &'static str = "groups";
    const ALIAS: &'static str = "g";
    const KEY: ScopeField = ScopeField::Group;
    const PARENTS: &'static [ScopeField] = &[ScopeField::Domain, ScopeField::Tenant];

    const COLUMNS: &'static str = "g.name, d.name AS domain, t.name AS tenant, g.type";
    const JOINS: &'static str =
        "JOIN tenants t ON t.id = g.tenant_id JOIN domains d ON d.id = t.domain_id";

    const SEARCH_COLUMNS: &'static [&'static str] = &["g.name"];
    const SCOPE_COLUMNS: &'static [(ScopeField, &'static str)] = &[
        (ScopeField::Domain, "d.name"),
        (ScopeField::Tenant, "t.name"),
        (ScopeField::Group, "g.name"),
    ];
    const TYPE_COLUMN: &'static str = "g.type";
    const ORDER_COLUMN: &'static str = "g.name";

    type Record = GroupRecord;
    type Input = GroupInput;

    fn input_key(input: &GroupInput) -> &str {
        &input.name
    }

    fn push_insert(
        qb: &mut QueryBuilder<'static, Postgres>,
        scope: &Scope,
        input: &GroupInput,
    ) -> HostingResult<()> {
        let domain = scope.require(ScopeField::Domain)?;
        let tenant = scope.require(ScopeField::Tenant)?;

        qb.push("INSERT INTO groups (tenant_id, name, type) SELECT t.id, ")
            .push_bind(input.name.clone())
            .push(", ")
            .push_bind(input.kind.as_str())
            .push(" FROM tenants t JOIN domains d ON d.id = t.domain_id WHERE d.name = ")
            .push_bind(domain.to_string())
            .push(" AND t.name = ")
            .push_bind(tenant.to_string());
        Ok(())
    }

    fn push_update(
        qb: &mut QueryBuilder<'static, Postgres>,
        scope: &Scope,
        key: &str,
        input: &GroupInput,
    ) -> HostingResult<()> {
        qb.push("UPDATE groups SET name = ")
            .push_bind(input.name.clone())
            .push(", type = ")
            .push_bind(input.kind.as_str())
            .push(" WHERE ");
        push_target::<Self>(qb, scope, key)
    }
}
