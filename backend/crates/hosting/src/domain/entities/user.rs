//! User: a mailbox of a tenant, billed under one of its plan's tariffs

use serde::{Deserialize, Serialize};
use sqlx::{Postgres, QueryBuilder};
use validator::Validate;

use crate::domain::entity::{Entity, Scope, ScopeField, push_target};
use crate::domain::validation::{validate_lowercase, validate_name};
use crate::error::HostingResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserKind {
    FullAdmin,
    DomainAdmin,
    TenantAdmin,
    Regular,
}

impl UserKind {
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FullAdmin => "full_admin",
            Self::DomainAdmin => "domain_admin",
            Self::TenantAdmin => "tenant_admin",
            Self::Regular => "regular",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub email: String,
    pub name: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free: Option<i32>,
    pub tariff: String,
    pub tenant: String,
    pub domain: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserInput {
    #[validate(email, custom(function = "validate_lowercase"))]
    pub email: String,
    /// Display name
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: UserKind,
    /// Tariff of the tenant's plan
    #[validate(custom(function = "validate_name"))]
    pub tariff: String,
}

pub struct User;

impl Entity for User {
    const KIND: &'static str = "user";
    const TABLE: &'static str = "users";
    const ALIAS: &'static str = "u";
    const KEY: ScopeField = ScopeField::User;
    const PARENTS: &'static [ScopeField] = &[ScopeField::Domain, ScopeField::Tenant];

    const COLUMNS: &'static str = "u.email, u.display_name AS name, u.type, u.free, \
        tf.name AS tariff, t.name AS tenant, d.name AS domain";
    const JOINS: &'static str = "JOIN tenants t ON t.id = u.tenant_id \
        JOIN domains d ON d.id = t.domain_id JOIN tariffs tf ON tf.id = u.tariff_id";

    const SEARCH_COLUMNS: &'static [&'static str] = &["u.email", "u.display_name"];
    const SCOPE_COLUMNS: &'static [(ScopeField, &'static str)] = &[
        (ScopeField::Domain, "d.name"),
        (ScopeField::Tariff, "tf.name"),
        (ScopeField::Tenant, "t.name"),
        (ScopeField::User, "u.email"),
    ];
    const TYPE_COLUMN: &'static str = "u.type";
    const ORDER_COLUMN: &'static str = "u.email";

    type Record = UserRecord;
    type Input = UserInput;

    fn input_key(input: &UserInput) -> &str {
        &input.email
    }

    fn push_insert(
        qb: &mut QueryBuilder<'static, Postgres>,
        scope: &Scope,
        input: &UserInput,
    ) -> HostingResult<()> {
        let domain = scope.require(ScopeField::Domain)?;
        let tenant = scope.require(ScopeField::Tenant)?;

        qb.push("INSERT INTO users (tenant_id, tariff_id, email, display_name, type) SELECT t.id, tf.id, ");
        let mut values = qb.separated(", ");
        values.push_bind(input.email.clone());
        values.push_bind(input.name.clone());
        values.push_bind(input.kind.as_str());
        qb.push(
            " FROM tenants t JOIN domains d ON d.id = t.domain_id \
             JOIN tariffs tf ON tf.plan_id = t.plan_id WHERE d.name = ",
        )
        .push_bind(domain.to_string())
        .push(" AND t.name = ")
        .push_bind(tenant.to_string())
        .push(" AND tf.name = ")
        .push_bind(input.tariff.clone());
        Ok(())
    }

    /// The tariff is looked up among the tariffs of the tenant's plan
    fn push_update(
        qb: &mut QueryBuilder<'static, Postgres>,
        scope: &Scope,
        key: &str,
        input: &UserInput,
    ) -> HostingResult<()> {
        qb.push("UPDATE users SET ");
        let mut set = qb.separated(", ");
        set.push("email = ").push_bind_unseparated(input.email.clone());
        set.push("display_name = ")
            .push_bind_unseparated(input.name.clone());
        set.push("type = ").push_bind_unseparated(input.kind.as_str());
        set.push("tariff_id = ntf.id");
        qb.push(
            " FROM tenants nt JOIN tariffs ntf ON ntf.plan_id = nt.plan_id \
             WHERE nt.id = users.tenant_id AND ntf.name = ",
        )
        .push_bind(input.tariff.clone())
        .push(" AND users.");
        push_target::<Self>(qb, scope, key)
    }
}
