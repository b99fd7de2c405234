use async_trait::async_trait;
use sqlx::SqlitePool;
use time::OffsetDateTime;

use crate::error::ListError;
use crate::webtoons::backend::ListBackend;
use crate::webtoons::model::WebtoonEntry;
use crate::webtoons::validate::WebtoonFields;

/// Durable list backend: rows in the `webtoons` table owned by one user.
/// Every statement carries the owner in its WHERE clause, so foreign ids
/// behave exactly like missing ids.
pub struct DurableList {
    db: SqlitePool,
    user_id: i64,
}

impl DurableList {
    pub fn new(db: SqlitePool, user_id: i64) -> Self {
        Self { db, user_id }
    }
}

const COLUMNS: &str = "id, title, chapter, read_status, webtoon_status, date_added, user_id";

/// Escapes LIKE wildcards so the query text is matched literally.
fn like_pattern(needle: &str) -> String {
    let escaped = needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[async_trait]
impl ListBackend for DurableList {
    async fn entries(&self) -> Result<Vec<WebtoonEntry>, ListError> {
        let rows = sqlx::query_as::<_, WebtoonEntry>(&format!(
            "SELECT {COLUMNS} FROM webtoons WHERE user_id = ?"
        ))
        .bind(self.user_id)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn get(&self, id: i64) -> Result<WebtoonEntry, ListError> {
        sqlx::query_as::<_, WebtoonEntry>(&format!(
            "SELECT {COLUMNS} FROM webtoons WHERE id = ? AND user_id = ?"
        ))
        .bind(id)
        .bind(self.user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(ListError::NotFound)
    }

    async fn insert(&self, fields: WebtoonFields) -> Result<WebtoonEntry, ListError> {
        let entry = sqlx::query_as::<_, WebtoonEntry>(&format!(
            r#"
            INSERT INTO webtoons (title, chapter, read_status, webtoon_status, date_added, user_id)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&fields.title)
        .bind(fields.chapter)
        .bind(fields.read_status)
        .bind(fields.webtoon_status)
        .bind(OffsetDateTime::now_utc())
        .bind(self.user_id)
        .fetch_one(&self.db)
        .await?;
        Ok(entry)
    }

    async fn update(&self, id: i64, fields: WebtoonFields) -> Result<WebtoonEntry, ListError> {
        sqlx::query_as::<_, WebtoonEntry>(&format!(
            r#"
            UPDATE webtoons
            SET title = ?, chapter = ?, read_status = ?, webtoon_status = ?
            WHERE id = ? AND user_id = ?
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&fields.title)
        .bind(fields.chapter)
        .bind(fields.read_status)
        .bind(fields.webtoon_status)
        .bind(id)
        .bind(self.user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(ListError::NotFound)
    }

    async fn remove(&self, id: i64) -> Result<(), ListError> {
        sqlx::query("DELETE FROM webtoons WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(self.user_id)
            .execute(&self.db)
            .await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), ListError> {
        sqlx::query("DELETE FROM webtoons WHERE user_id = ?")
            .bind(self.user_id)
            .execute(&self.db)
            .await?;
        Ok(())
    }

    async fn search(&self, needle: &str) -> Result<Vec<WebtoonEntry>, ListError> {
        let rows = sqlx::query_as::<_, WebtoonEntry>(&format!(
            r#"
            SELECT {COLUMNS} FROM webtoons
            WHERE user_id = ? AND title LIKE ? ESCAPE '\'
            ORDER BY datetime(date_added) DESC, id DESC
            "#
        ))
        .bind(self.user_id)
        .bind(like_pattern(needle))
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }
}
