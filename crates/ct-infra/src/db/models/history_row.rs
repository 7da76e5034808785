use diesel::prelude::*;

use crate::db::schema::history;

#[derive(Debug, Clone, Queryable, Insertable)]
#[diesel(table_name = history)]
pub struct HistoryRow {
    pub id: String,
    pub original: String,
    pub translated: String,
    pub direction: String,
    /// Unix epoch seconds
    pub timestamp: i64,
}
