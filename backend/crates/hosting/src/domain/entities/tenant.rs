//! Tenant: a customer organisation within a domain, subscribed to one plan

use serde::{Deserialize, Serialize};
use sqlx::{Postgres, QueryBuilder};
use validator::Validate;

use crate::domain::entity::{Entity, Scope, ScopeField, push_target};
use crate::domain::validation::validate_name;
use crate::error::HostingResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TenantKind {
    Primary,
    Regular,
    Premium,
}

impl TenantKind {
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Regular => "regular",
            Self::Premium => "premium",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TenantRecord {
    pub name: String,
    pub domain: String,
    pub plan: String,
    pub organisation: String,
    pub order_form: String,
    pub order_link: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TenantInput {
    #[validate(custom(function = "validate_name"))]
    pub name: String,
    #[validate(length(min = 1))]
    pub organisation: String,
    #[validate(length(min = 1))]
    pub order_form: String,
    #[validate(url)]
    pub order_link: String,
    #[serde(rename = "type")]
    pub kind: TenantKind,
    /// Plan of the same domain
    #[validate(custom(function = "validate_name"))]
    pub plan_name: String,
    pub description: Option<String>,
}

pub struct Tenant;

impl Entity for Tenant {
    const KIND: &'static str = "tenant";
    const TABLE: &'static str = "tenants";
    const ALIAS: &'static str = "t";
    const KEY: ScopeField = ScopeField::Tenant;
    const PARENTS: &'static [ScopeField] = &[ScopeField::Domain];

    const COLUMNS: &'static str = "t.name, d.name AS domain, p.name AS plan, t.organisation, \
        t.order_form, t.order_link, t.type, COALESCE(t.description, 'unknown') AS description";
    const JOINS: &'static str =
        "JOIN domains d ON d.id = t.domain_id JOIN plans p ON p.id = t.plan_id";

    const SEARCH_COLUMNS: &'static [&'static str] = &["t.name", "t.organisation"];
    const SCOPE_COLUMNS: &'static [(ScopeField, &'static str)] = &[
        (ScopeField::Domain, "d.name"),
        (ScopeField::Plan, "p.name"),
        (ScopeField::Tenant, "t.name"),
    ];
    const TYPE_COLUMN: &'static str = "t.type";
    const ORDER_COLUMN: &'static str = "t.name";

    type Record = TenantRecord;
    type Input = TenantInput;

    fn input_key(input: &TenantInput) -> &str {
        &input.name
    }

    fn push_insert(
        qb: &mut QueryBuilder<'static, Postgres>,
        scope: &Scope,
        input: &TenantInput,
    ) -> HostingResult<()> {
        let domain = scope.require(ScopeField::Domain)?;

        qb.push(
            "INSERT INTO tenants (domain_id, plan_id, name, organisation, order_form, order_link, \
             type, description) SELECT d.id, p.id, ",
        );
        let mut values = qb.separated(", ");
        values.push_bind(input.name.clone());
        values.push_bind(input.organisation.clone());
        values.push_bind(input.order_form.clone());
        values.push_bind(input.order_link.clone());
        values.push_bind(input.kind.as_str());
        values.push_bind(input.description.clone());
        qb.push(" FROM domains d JOIN plans p ON p.domain_id = d.id WHERE d.name = ")
            .push_bind(domain.to_string())
            .push(" AND p.name = ")
            .push_bind(input.plan_name.clone());
        Ok(())
    }

    /// The plan is looked up in the tenant's own domain; an unknown plan
    /// matches no row and the update fails as not found
    fn push_update(
        qb: &mut QueryBuilder<'static, Postgres>,
        scope: &Scope,
        key: &str,
        input: &TenantInput,
    ) -> HostingResult<()> {
        qb.push("UPDATE tenants SET ");
        let mut set = qb.separated(", ");
        set.push("name = ").push_bind_unseparated(input.name.clone());
        set.push("organisation = ")
            .push_bind_unseparated(input.organisation.clone());
        set.push("order_form = ")
            .push_bind_unseparated(input.order_form.clone());
        set.push("order_link = ")
            .push_bind_unseparated(input.order_link.clone());
        set.push("type = ").push_bind_unseparated(input.kind.as_str());
        set.push("description = ")
            .push_bind_unseparated(input.description.clone());
        set.push("plan_id = np.id");
        qb.push(" FROM plans np WHERE np.domain_id = tenants.domain_id AND np.name = ")
            .push_bind(input.plan_name.clone())
            .push(" AND tenants.");
        push_target::<Self>(qb, scope, key)
    }
}
