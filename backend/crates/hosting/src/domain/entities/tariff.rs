//! Tariff: a billable option of a plan

use serde::{Deserialize, Serialize};
use sqlx::{Postgres, QueryBuilder};
use validator::Validate;

use crate::domain::entity::{Entity, Scope, ScopeField, push_target};
use crate::domain::validation::validate_name;
use crate::error::HostingResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TariffKind {
    Personal,
    Group,
    Options,
}

impl TariffKind {
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Personal => "personal",
            Self::Group => "group",
            Self::Options => "options",
        }
    }
}

/// Billing period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regularity {
    Daily,
    Monthly,
}

impl Regularity {
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Monthly => "monthly",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TariffRecord {
    pub name: String,
    pub domain: String,
    pub plan: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub disk_quota: i32,
    pub office: bool,
    pub price: i32,
    pub regularity: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TariffInput {
    #[validate(custom(function = "validate_name"))]
    pub name: String,
    pub description: Option<String>,
    /// Megabytes
    #[validate(range(min = 0))]
    pub disk_quota: i32,
    #[serde(default)]
    pub office: bool,
    #[validate(range(min = 0))]
    pub price: i32,
    #[serde(rename = "type")]
    pub kind: TariffKind,
    pub regularity: Regularity,
}

pub struct Tariff;

impl Entity for Tariff {
    const KIND: &'static str = "tariff";
    const TABLE: &'static str = "tariffs";
    const ALIAS: &'static str = "tf";
    const KEY: ScopeField = ScopeField::Tariff;
    const PARENTS: &'static [ScopeField] = &[ScopeField::Domain, ScopeField::Plan];

    const COLUMNS: &'static str = "tf.name, d.name AS domain, p.name AS plan, tf.type, \
        COALESCE(tf.description, 'unknown') AS description, tf.disk_quota, tf.office, \
        tf.price, tf.regularity";
    const JOINS: &'static str =
        "JOIN plans p ON p.id = tf.plan_id JOIN domains d ON d.id = p.domain_id";

    const SEARCH_COLUMNS: &'static [&'static str] = &["tf.name", "p.name", "tf.description"];
    const SCOPE_COLUMNS: &'static [(ScopeField, &'static str)] = &[
        (ScopeField::Domain, "d.name"),
        (ScopeField::Plan, "p.name"),
        (ScopeField::Tariff, "tf.name"),
    ];
    const TYPE_COLUMN: &'static str = "tf.type";
    const ORDER_COLUMN: &'static str = "tf.name";

    type Record = TariffRecord;
    type Input = TariffInput;

    fn input_key(input: &TariffInput) -> &str {
        &input.name
    }

    fn push_insert(
        qb: &mut QueryBuilder<'static, Postgres>,
        scope: &Scope,
        input: &TariffInput,
    ) -> HostingResult<()> {
        let domain = scope.require(ScopeField::Domain)?;
        let plan = scope.require(ScopeField::Plan)?;

        qb.push(
            "INSERT INTO tariffs (plan_id, name, type, description, disk_quota, office, price, \
             regularity) SELECT p.id, ",
        );
        let mut values = qb.separated(", ");
        values.push_bind(input.name.clone());
        values.push_bind(input.kind.as_str());
        values.push_bind(input.description.clone());
        values.push_bind(input.disk_quota);
        values.push_bind(input.office);
        values.push_bind(input.price);
        values.push_bind(input.regularity.as_str());
        qb.push(" FROM plans p JOIN domains d ON d.id = p.domain_id WHERE d.name = ")
            .push_bind(domain.to_string())
            .push(" AND p.name = ")
            .push_bind(plan.to_string());
        Ok(())
    }

    fn push_update(
        qb: &mut QueryBuilder<'static, Postgres>,
        scope: &Scope,
        key: &str,
        input: &TariffInput,
    ) -> HostingResult<()> {
        qb.push("UPDATE tariffs SET ");
        let mut set = qb.separated(", ");
        set.push("name = ").push_bind_unseparated(input.name.clone());
        set.push("type = ").push_bind_unseparated(input.kind.as_str());
        set.push("description = ")
            .push_bind_unseparated(input.description.clone());
        set.push("disk_quota = ")
            .push_bind_unseparated(input.disk_quota);
        set.push("office = ").push_bind_unseparated(input.office);
        set.push("price = ").push_bind_unseparated(input.price);
        set.push("regularity = ")
            .push_bind_unseparated(input.regularity.as_str());
        qb.push(" WHERE ");
        push_target::<Self>(qb, scope, key)
    }
}
