use anyhow::{Context, Result};
use diesel::dsl::sql;
use diesel::sql_types::BigInt;
use diesel::{ExpressionMethods, QueryDsl, RunQueryDsl, SqliteConnection};
use ct_core::translation::TranslationResult;

use crate::db::mappers::HistoryRowMapper;
use crate::db::models::HistoryRow;
use crate::db::pool::DbPool;
use crate::db::schema::history;

/// Removes every row past the first `keep` in history order.
const PRUNE_SQL: &str = "DELETE FROM history WHERE id IN (\
     SELECT id FROM history ORDER BY timestamp DESC, rowid DESC LIMIT -1 OFFSET ?)";

/// Synchronous history queries. Callers are responsible for running these
/// off the async runtime and for serializing writes.
pub struct HistoryRepository {
    pool: DbPool,
}

impl HistoryRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn with_conn<T>(&self, f: impl FnOnce(&mut SqliteConnection) -> Result<T>) -> Result<T> {
        let mut conn = self.pool.get().context("checkout history connection")?;
        f(&mut conn)
    }

    pub fn insert(&self, result: &TranslationResult) -> Result<()> {
        let row = HistoryRowMapper::to_row(result);
        self.with_conn(|conn| {
            diesel::insert_into(history::table)
                .values(&row)
                .execute(conn)?;
            Ok(())
        })
    }

    pub fn list_newest_first(&self) -> Result<Vec<TranslationResult>> {
        self.with_conn(|conn| {
            let rows = history::table
                .order((history::timestamp.desc(), sql::<BigInt>("rowid").desc()))
                .load::<HistoryRow>(conn)?;

            rows.iter().map(HistoryRowMapper::to_domain).collect()
        })
    }

    pub fn count(&self) -> Result<u64> {
        self.with_conn(|conn| {
            let count: i64 = history::table.count().get_result(conn)?;
            Ok(count.max(0) as u64)
        })
    }

    pub fn delete_all(&self) -> Result<u64> {
        self.with_conn(|conn| {
            let removed = diesel::delete(history::table).execute(conn)?;
            Ok(removed as u64)
        })
    }

    /// No-op when `keep <= 0`.
    pub fn delete_beyond(&self, keep: i64) -> Result<u64> {
        if keep <= 0 {
            return Ok(0);
        }
        self.with_conn(|conn| {
            let removed = diesel::sql_query(PRUNE_SQL)
                .bind::<BigInt, _>(keep)
                .execute(conn)?;
            Ok(removed as u64)
        })
    }
}
