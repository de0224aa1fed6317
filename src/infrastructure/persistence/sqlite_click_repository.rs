//! SQLite implementation of click repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use std::sync::Arc;

use super::from_unix;
use crate::domain::entities::{Click, NewClick};
use crate::domain::repositories::ClickRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct ClickRow {
    id: i64,
    url_id: i64,
    clicked_at: i64,
}

impl From<ClickRow> for Click {
    fn from(row: ClickRow) -> Self {
        Click::new(row.id, row.url_id, from_unix(row.clicked_at))
    }
}

/// SQLite repository for the append-only `clicks` table.
pub struct SqliteClickRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteClickRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

/// Appends `url_id IN (...) AND clicked_at BETWEEN ? AND ?` to `qb`.
fn push_range_filter(
    qb: &mut QueryBuilder<'_, Sqlite>,
    url_ids: &[i64],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) {
    qb.push(" WHERE url_id IN (");
    let mut ids = qb.separated(", ");
    for id in url_ids {
        ids.push_bind(*id);
    }
    ids.push_unseparated(")");

    qb.push(" AND clicked_at >= ")
        .push_bind(start.timestamp())
        .push(" AND clicked_at <= ")
        .push_bind(end.timestamp());
}

#[async_trait]
impl ClickRepository for SqliteClickRepository {
    async fn record_click(&self, click: NewClick) -> Result<Click, AppError> {
        let row = sqlx::query_as::<_, ClickRow>(
            "INSERT INTO clicks (url_id, clicked_at) VALUES (?, ?) \
             RETURNING id, url_id, clicked_at",
        )
        .bind(click.url_id)
        .bind(click.clicked_at.timestamp())
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn count_in_range(
        &self,
        url_ids: &[i64],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<i64, AppError> {
        if url_ids.is_empty() {
            return Ok(0);
        }

        let mut qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM clicks");
        push_range_filter(&mut qb, url_ids, start, end);

        let count: i64 = qb
            .build_query_scalar::<i64>()
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn find_in_range(
        &self,
        url_ids: &[i64],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Click>, AppError> {
        if url_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut qb = QueryBuilder::<Sqlite>::new("SELECT id, url_id, clicked_at FROM clicks");
        push_range_filter(&mut qb, url_ids, start, end);
        qb.push(" ORDER BY clicked_at, id");

        let rows = qb
            .build_query_as::<ClickRow>()
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Click::from).collect())
    }

    async fn count_for_link(
        &self,
        url_id: i64,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM clicks WHERE url_id = ? \
             AND (? IS NULL OR clicked_at >= ?) \
             AND (? IS NULL OR clicked_at <= ?)",
        )
        .bind(url_id)
        .bind(start.map(|t| t.timestamp()))
        .bind(start.map(|t| t.timestamp()))
        .bind(end.map(|t| t.timestamp()))
        .bind(end.map(|t| t.timestamp()))
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }

    async fn count_all(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM clicks")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
