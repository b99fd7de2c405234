use async_trait::async_trait;

use crate::error::ListError;
use crate::webtoons::model::WebtoonEntry;
use crate::webtoons::validate::WebtoonFields;

/// Storage seam behind the list facade: one durable implementation over
/// SQLite rows and one ephemeral implementation over the session.
///
/// Implementations only persist and retrieve; validation and query
/// normalization happen once, in the facade, before any call lands here.
#[async_trait]
pub trait ListBackend: Send + Sync {
    /// Every entry owned by the context, in insertion order.
    async fn entries(&self) -> Result<Vec<WebtoonEntry>, ListError>;

    /// One entry by id, scoped to the context's ownership.
    async fn get(&self, id: i64) -> Result<WebtoonEntry, ListError>;

    /// Appends a new entry, stamping `date_added`, and returns it with its
    /// assigned id.
    async fn insert(&self, fields: WebtoonFields) -> Result<WebtoonEntry, ListError>;

    /// Updates a owned entry in place; `date_added` is untouched.
    async fn update(&self, id: i64, fields: WebtoonFields) -> Result<WebtoonEntry, ListError>;

    /// Removes an entry if owned; missing or foreign ids are a no-op.
    async fn remove(&self, id: i64) -> Result<(), ListError>;

    /// Removes every entry owned by the context.
    async fn clear(&self) -> Result<(), ListError>;

    /// Case-insensitive title substring match, newest first. The needle is
    /// non-empty; the facade maps empty queries to `entries`.
    async fn search(&self, needle: &str) -> Result<Vec<WebtoonEntry>, ListError>;
}
