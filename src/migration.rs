//! Schema DDL for the catalog tables. Idempotent: safe to run on every start.

use crate::error::AppError;
use crate::models::{Car, Motorbike, Record};
use crate::sql::Table;
use sqlx::PgPool;

const CARS_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS cars (
    id bigserial PRIMARY KEY,
    created_at timestamp(0) with time zone NOT NULL DEFAULT NOW(),
    name text NOT NULL,
    body text NOT NULL,
    brake_system text NOT NULL,
    aspiration text NOT NULL,
    horsepower double precision NOT NULL,
    mpg double precision NOT NULL,
    cylinders bigint NOT NULL,
    acceleration double precision NOT NULL,
    displacement double precision NOT NULL,
    origin text NOT NULL,
    version integer NOT NULL DEFAULT 1
)
"#;

const MOTORBIKES_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS motorbikes (
    id bigserial PRIMARY KEY,
    created_at timestamp(0) with time zone NOT NULL DEFAULT NOW(),
    name text NOT NULL,
    horsepower double precision NOT NULL,
    type text NOT NULL,
    weight double precision NOT NULL,
    third_place boolean NOT NULL DEFAULT false,
    cylinders bigint NOT NULL,
    acceleration double precision NOT NULL,
    displacement double precision NOT NULL,
    origin text NOT NULL,
    version integer NOT NULL DEFAULT 1
)
"#;

/// GIN index backing the list endpoint's full-text search.
fn search_index_ddl(table: &Table) -> String {
    format!(
        "CREATE INDEX IF NOT EXISTS {t}_{c}_idx ON {t} USING GIN (to_tsvector('simple', {c}))",
        t = table.name,
        c = table.search_column
    )
}

/// Create the cars and motorbikes tables and their search indexes if they do not exist.
pub async fn apply_migrations(pool: &PgPool) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;
    for ddl in [CARS_DDL, MOTORBIKES_DDL] {
        sqlx::query(ddl).execute(&mut *tx).await?;
    }
    for table in [Car::TABLE, Motorbike::TABLE] {
        sqlx::query(&search_index_ddl(&table)).execute(&mut *tx).await?;
    }
    tx.commit().await?;
    tracing::info!("schema migrations applied");
    Ok(())
}
