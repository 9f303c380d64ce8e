//! Plan: a priced offer within a domain

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Postgres, QueryBuilder};
use validator::Validate;

use crate::domain::entity::{Entity, Scope, ScopeField, push_target};
use crate::domain::validation::validate_name;
use crate::error::HostingResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanKind {
    Personal,
    Group,
}

impl PlanKind {
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Personal => "personal",
            Self::Group => "group",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PlanRecord {
    pub name: String,
    pub domain: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    pub from_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PlanInput {
    #[validate(custom(function = "validate_name"))]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PlanKind,
    pub from_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub description: Option<String>,
}

impl PlanInput {
    /// Plans start today unless told otherwise
    pub fn from_date_or_today(&self) -> NaiveDate {
        self.from_date.unwrap_or_else(|| Utc::now().date_naive())
    }
}

pub struct Plan;

impl Entity for Plan {
    const KIND: &'static str = "plan";
    const TABLE: &'static str = "plans";
    const ALIAS: &'static str = "p";
    const KEY: ScopeField = ScopeField::Plan;
    const PARENTS: &'static [ScopeField] = &[ScopeField::Domain];

    const COLUMNS: &'static str = "p.name, d.name AS domain, p.type, p.from_date, p.due_date, \
        COALESCE(p.description, 'unknown') AS description";
    const JOINS: &'static str = "JOIN domains d ON d.id = p.domain_id";

    const SEARCH_COLUMNS: &'static [&'static str] = &["p.name", "d.name", "d.organisation"];
    const SCOPE_COLUMNS: &'static [(ScopeField, &'static str)] = &[
        (ScopeField::Domain, "d.name"),
        (ScopeField::Plan, "p.name"),
    ];
    const TYPE_COLUMN: &'static str = "p.type";
    const ORDER_COLUMN: &'static str = "p.name";

    type Record = PlanRecord;
    type Input = PlanInput;

    fn input_key(input: &PlanInput) -> &str {
        &input.name
    }

    fn push_insert(
        qb: &mut QueryBuilder<'static, Postgres>,
        scope: &Scope,
        input: &PlanInput,
    ) -> HostingResult<()> {
        let domain = scope.require(ScopeField::Domain)?;

        qb.push(
            "INSERT INTO plans (domain_id, name, type, from_date, due_date, description) \
             SELECT d.id, ",
        );
        let mut values = qb.separated(", ");
        values.push_bind(input.name.clone());
        values.push_bind(input.kind.as_str());
        values.push_bind(input.from_date_or_today());
        values.push_bind(input.due_date);
        values.push_bind(input.description.clone());
        qb.push(" FROM domains d WHERE d.name = ")
            .push_bind(domain.to_string());
        Ok(())
    }

    fn push_update(
        qb: &mut QueryBuilder<'static, Postgres>,
        scope: &Scope,
        key: &str,
        input: &PlanInput,
    ) -> HostingResult<()> {
        qb.push("UPDATE plans SET ");
        let mut set = qb.separated(", ");
        set.push("name = ").push_bind_unseparated(input.name.clone());
        set.push("type = ").push_bind_unseparated(input.kind.as_str());
        set.push("from_date = ")
            .push_bind_unseparated(input.from_date_or_today());
        set.push("due_date = ").push_bind_unseparated(input.due_date);
        set.push("description = ")
            .push_bind_unseparated(input.description.clone());
        qb.push(" WHERE ");
        push_target::<Self>(qb, scope, key)
    }
}
