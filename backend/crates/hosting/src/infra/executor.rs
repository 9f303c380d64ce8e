//! Single-Row Executor
//!
//! Every mutation goes through [`execute_one`]: one statement, one
//! transaction, exactly one affected row or nothing at all.

use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::error::{HostingError, HostingResult};

/// Cardinality rule for a mutation's affected-row count
pub fn check_single_row(affected: u64) -> HostingResult<()> {
    match affected {
        1 => Ok(()),
        0 => Err(HostingError::NotFound),
        n => Err(HostingError::NotExactlyOne(n)),
    }
}

/// Run `statement` in its own transaction and commit only if it touched
/// exactly one row
///
/// A failing statement drops the transaction, which rolls it back; store
/// errors are classified by `From<sqlx::Error>`.
pub async fn execute_one(
    pool: &PgPool,
    mut statement: QueryBuilder<'static, Postgres>,
) -> HostingResult<u64> {
    let mut tx = pool.begin().await?;

    let affected = statement.build().execute(&mut *tx).await?.rows_affected();

    if let Err(e) = check_single_row(affected) {
        if let Err(rollback) = tx.rollback().await {
            tracing::error!(error = %rollback, "Rollback failed");
        }
        return Err(e);
    }

    tx.commit().await.map_err(HostingError::Database)?;

    Ok(affected)
}
