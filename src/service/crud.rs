//! Generic CRUD execution against PostgreSQL for any [`Record`].

use crate::error::AppError;
use crate::filters::{calculate_metadata, Filters, Metadata};
use crate::models::Record;
use crate::sql::{delete, insert, select_by_id, select_list, update, QueryBuf};
use crate::validator::Validator;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::{Query, QueryAs};
use sqlx::{FromRow, PgPool, Postgres, Row};
use std::time::Duration;

pub struct CrudService;

impl CrudService {
    /// Insert a new row; id, created_at and version (1) are written back onto `record`.
    pub async fn insert<T: Record>(pool: &PgPool, record: &mut T) -> Result<(), AppError> {
        let q = insert(&T::TABLE, record.bind_values());
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let row = bind(sqlx::query(&q.sql), &q).fetch_one(pool).await?;
        let id: i64 = row.try_get("id")?;
        let created_at: DateTime<Utc> = row.try_get("created_at")?;
        let version: i32 = row.try_get("version")?;
        record.set_inserted(id, created_at, version);
        Ok(())
    }

    /// Fetch one row by id. Ids below 1 never reach the database.
    pub async fn get<T: Record>(pool: &PgPool, id: i64) -> Result<T, AppError> {
        if id < 1 {
            return Err(AppError::NotFound);
        }
        let q = select_by_id(&T::TABLE, id);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        bind_as(sqlx::query_as::<_, T>(&q.sql), &q)
            .fetch_optional(pool)
            .await?
            .ok_or(AppError::NotFound)
    }

    /// Write every business field and bump the version, provided the stored version still
    /// equals `record.version()`. Zero matched rows means a concurrent update or delete won.
    pub async fn update<T: Record>(pool: &PgPool, record: &mut T) -> Result<(), AppError> {
        let q = update(&T::TABLE, record.bind_values(), record.id(), record.version());
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let row = bind(sqlx::query(&q.sql), &q).fetch_optional(pool).await?;
        match row {
            Some(row) => {
                record.set_version(row.try_get("version")?);
                Ok(())
            }
            None => Err(AppError::EditConflict),
        }
    }

    pub async fn delete<T: Record>(pool: &PgPool, id: i64) -> Result<(), AppError> {
        if id < 1 {
            return Err(AppError::NotFound);
        }
        let q = delete(&T::TABLE, id);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let result = bind(sqlx::query(&q.sql), &q).execute(pool).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    /// One page of rows matching `search` plus pagination metadata, bounded by `timeout`.
    pub async fn get_all<T: Record>(
        pool: &PgPool,
        search: &str,
        filters: &Filters,
        timeout: Duration,
    ) -> Result<(Vec<T>, Metadata), AppError> {
        let Some(sort_column) = filters.sort_column() else {
            let mut v = Validator::new();
            v.add_error("sort", "invalid sort value");
            return Err(AppError::Validation(v.errors().clone()));
        };
        let q = select_list(
            &T::TABLE,
            search,
            sort_column,
            filters.sort_direction(),
            filters.limit(),
            filters.offset(),
        );
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let rows: Vec<PgRow> = tokio::time::timeout(timeout, bind(sqlx::query(&q.sql), &q).fetch_all(pool))
            .await
            .map_err(|_| AppError::Timeout(timeout))??;

        let mut total_records = 0_i64;
        let mut records = Vec::with_capacity(rows.len());
        for row in &rows {
            total_records = row.try_get("total_records")?;
            records.push(T::from_row(row)?);
        }
        Ok((records, calculate_metadata(total_records, filters.page, filters.page_size)))
    }
}

fn bind<'q>(mut query: Query<'q, Postgres, PgArguments>, q: &QueryBuf) -> Query<'q, Postgres, PgArguments> {
    for p in &q.params {
        query = query.bind(p.clone());
    }
    query
}

fn bind_as<'q, T>(
    mut query: QueryAs<'q, Postgres, T, PgArguments>,
    q: &QueryBuf,
) -> QueryAs<'q, Postgres, T, PgArguments> {
    for p in &q.params {
        query = query.bind(p.clone());
    }
    query
}
