use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tower_sessions::Session;

use crate::error::ListError;
use crate::webtoons::backend::ListBackend;
use crate::webtoons::model::WebtoonEntry;
use crate::webtoons::validate::WebtoonFields;

const ENTRIES_KEY: &str = "webtoons";

/// The anonymous visitor's whole list, serialized under one session key.
///
/// `next_id` only ever advances, so ids stay unique within the session
/// even across deletions.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct EphemeralState {
    #[serde(default = "first_id")]
    next_id: i64,
    #[serde(default)]
    entries: Vec<WebtoonEntry>,
}

fn first_id() -> i64 {
    1
}

impl Default for EphemeralState {
    fn default() -> Self {
        Self {
            next_id: first_id(),
            entries: Vec::new(),
        }
    }
}

/// Ephemeral list backend: entries live only in the visitor's session and
/// expire with it. The whole list is written back after each mutation.
pub struct EphemeralList {
    session: Session,
}

impl EphemeralList {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    async fn load(&self) -> Result<EphemeralState, ListError> {
        Ok(self
            .session
            .get::<EphemeralState>(ENTRIES_KEY)
            .await?
            .unwrap_or_default())
    }

    async fn store(&self, state: EphemeralState) -> Result<(), ListError> {
        self.session.insert(ENTRIES_KEY, state).await?;
        Ok(())
    }
}

#[async_trait]
impl ListBackend for EphemeralList {
    async fn entries(&self) -> Result<Vec<WebtoonEntry>, ListError> {
        Ok(self.load().await?.entries)
    }

    async fn get(&self, id: i64) -> Result<WebtoonEntry, ListError> {
        self.load()
            .await?
            .entries
            .into_iter()
            .find(|e| e.id == id)
            .ok_or(ListError::NotFound)
    }

    async fn insert(&self, fields: WebtoonFields) -> Result<WebtoonEntry, ListError> {
        let mut state = self.load().await?;
        let entry = WebtoonEntry {
            id: state.next_id,
            title: fields.title,
            chapter: fields.chapter,
            read_status: fields.read_status,
            webtoon_status: fields.webtoon_status,
            date_added: OffsetDateTime::now_utc(),
            user_id: None,
        };
        state.next_id += 1;
        state.entries.push(entry.clone());
        self.store(state).await?;
        Ok(entry)
    }

    async fn update(&self, id: i64, fields: WebtoonFields) -> Result<WebtoonEntry, ListError> {
        let mut state = self.load().await?;
        let entry = state
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(ListError::NotFound)?;

        entry.title = fields.title;
        entry.chapter = fields.chapter;
        entry.read_status = fields.read_status;
        entry.webtoon_status = fields.webtoon_status;
        let updated = entry.clone();

        self.store(state).await?;
        Ok(updated)
    }

    async fn remove(&self, id: i64) -> Result<(), ListError> {
        let mut state = self.load().await?;
        state.entries.retain(|e| e.id != id);
        self.store(state).await
    }

    async fn clear(&self) -> Result<(), ListError> {
        let mut state = self.load().await?;
        state.entries.clear();
        self.store(state).await
    }

    async fn search(&self, needle: &str) -> Result<Vec<WebtoonEntry>, ListError> {
        let needle = needle.to_lowercase();
        let mut hits: Vec<WebtoonEntry> = self
            .load()
            .await?
            .entries
            .into_iter()
            .filter(|e| e.title.to_lowercase().contains(&needle))
            .collect();
        hits.sort_by(|a, b| b.date_added.cmp(&a.date_added).then(b.id.cmp(&a.id)));
        Ok(hits)
    }
}
