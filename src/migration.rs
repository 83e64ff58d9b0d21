//! Create the resource tables. Idempotent: every statement is IF NOT EXISTS.

use crate::error::StoreError;
use sqlx::PgPool;

/// DDL in dependency order. Constraint names match `sql::CUSTOMERS` / `sql::ACCOUNTS`
/// so unique violations can be traced back to a column.
const DDL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS "customers" (
        "username" TEXT,
        "firstname" TEXT NOT NULL,
        "lastname" TEXT NOT NULL,
        "city" TEXT NOT NULL,
        "reference" TEXT NOT NULL,
        CONSTRAINT "customers_pkey" PRIMARY KEY ("reference"),
        CONSTRAINT "customers_username_key" UNIQUE ("username")
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS "accounts" (
        "number" TEXT NOT NULL,
        "reference" TEXT NOT NULL,
        "type" TEXT NOT NULL,
        "amount" DOUBLE PRECISION NOT NULL,
        CONSTRAINT "accounts_pkey" PRIMARY KEY ("number")
    )
    "#,
    r#"CREATE INDEX IF NOT EXISTS "accounts_reference_idx" ON "accounts" ("reference")"#,
];

pub async fn apply_migrations(pool: &PgPool) -> Result<(), StoreError> {
    for ddl in DDL {
        sqlx::query(ddl).execute(pool).await?;
    }
    tracing::info!(statements = DDL.len(), "schema ready");
    Ok(())
}
