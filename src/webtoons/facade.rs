use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use tower_sessions::Session;

use crate::auth::session::USER_ID_KEY;
use crate::error::ListError;
use crate::state::AppState;
use crate::webtoons::backend::ListBackend;
use crate::webtoons::dto::WebtoonForm;
use crate::webtoons::durable::DurableList;
use crate::webtoons::ephemeral::EphemeralList;
use crate::webtoons::model::WebtoonEntry;
use crate::webtoons::validate::validate;

/// One contract over the two list backends.
///
/// Extracted per request: a session carrying a user id gets the durable
/// backend scoped to that user, anyone else gets the session-local
/// ephemeral backend. Validation and query normalization happen here,
/// once, before dispatch.
pub struct ListFacade {
    backend: Box<dyn ListBackend>,
}

impl ListFacade {
    pub fn durable(db: sqlx::SqlitePool, user_id: i64) -> Self {
        Self {
            backend: Box::new(DurableList::new(db, user_id)),
        }
    }

    pub fn ephemeral(session: Session) -> Self {
        Self {
            backend: Box::new(EphemeralList::new(session)),
        }
    }

    pub async fn list(&self) -> Result<Vec<WebtoonEntry>, ListError> {
        self.backend.entries().await
    }

    pub async fn get(&self, id: i64) -> Result<WebtoonEntry, ListError> {
        self.backend.get(id).await
    }

    pub async fn add(&self, form: WebtoonForm) -> Result<WebtoonEntry, ListError> {
        let fields = validate(form)?;
        self.backend.insert(fields).await
    }

    /// Ownership is checked before validation, so editing a missing or
    /// foreign id reports NOT_FOUND regardless of the submitted fields.
    pub async fn edit(&self, id: i64, form: WebtoonForm) -> Result<WebtoonEntry, ListError> {
        self.backend.get(id).await?;
        let fields = validate(form)?;
        self.backend.update(id, fields).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ListError> {
        self.backend.remove(id).await
    }

    pub async fn delete_all(&self) -> Result<(), ListError> {
        self.backend.clear().await
    }

    /// Empty or whitespace-only queries return the unfiltered list.
    pub async fn search(&self, query: &str) -> Result<Vec<WebtoonEntry>, ListError> {
        let query = query.trim();
        if query.is_empty() {
            self.backend.entries().await
        } else {
            self.backend.search(query).await
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for ListFacade {
    type Rejection = (StatusCode, String);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(status, msg)| (status, msg.to_string()))?;

        let user_id = session
            .get::<i64>(USER_ID_KEY)
            .await
            .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

        Ok(match user_id {
            Some(user_id) => ListFacade::durable(state.db.clone(), user_id),
            None => ListFacade::ephemeral(session),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::dto::{LoginRequest, RegisterRequest};
    use crate::auth::handlers::{login, register};
    use crate::auth::repo::User;
    use crate::config::{AppConfig, SessionConfig};
    use crate::webtoons::model::{ReadStatus, WebtoonStatus};
    use axum::extract::State;
    use axum::http::Request;
    use axum::Json;
    use sqlx::sqlite::SqlitePoolOptions;
    use std::sync::Arc;
    use tower_sessions::MemoryStore;

    async fn test_state() -> AppState {
        let db = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("open in-memory db");
        sqlx::migrate!("./migrations")
            .run(&db)
            .await
            .expect("run migrations");
        let config = Arc::new(AppConfig {
            database_url: "sqlite::memory:".into(),
            session: SessionConfig {
                secret: "0123456789abcdef0123456789abcdef".into(),
                ttl_minutes: 60,
            },
        });
        AppState::from_parts(db, config)
    }

    fn new_session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    /// Runs the extractor the way the session layer would: with the
    /// request-scoped `Session` sitting in the request extensions.
    async fn facade_for(state: &AppState, session: Session) -> ListFacade {
        let (mut parts, _) = Request::builder()
            .uri("/api/v1/webtoons")
            .body(())
            .unwrap()
            .into_parts();
        parts.extensions.insert(session);
        ListFacade::from_request_parts(&mut parts, state)
            .await
            .expect("extract facade")
    }

    fn anonymous_facade() -> ListFacade {
        let store = Arc::new(MemoryStore::default());
        ListFacade::ephemeral(Session::new(None, store, None))
    }

    fn form(title: &str) -> WebtoonForm {
        WebtoonForm {
            title: title.into(),
            chapter: None,
            read_status: "Reading".into(),
            webtoon_status: "Ongoing".into(),
        }
    }

    #[tokio::test]
    async fn session_with_user_id_dispatches_to_the_durable_backend() {
        let state = test_state().await;
        let alice = User::create(&state.db, "alice", "hash").await.unwrap();

        let session = new_session();
        session.insert(USER_ID_KEY, alice.id).await.unwrap();

        let facade = facade_for(&state, session).await;
        let entry = facade.add(form("Tower of God")).await.unwrap();
        assert_eq!(entry.user_id, Some(alice.id));

        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM webtoons WHERE user_id = ?")
                .bind(alice.id)
                .fetch_one(&state.db)
                .await
                .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn anonymous_session_dispatches_to_the_ephemeral_backend() {
        let state = test_state().await;
        let session = new_session();

        let facade = facade_for(&state, session.clone()).await;
        let entry = facade.add(form("Lore Olympus")).await.unwrap();
        assert_eq!(entry.id, 1);
        assert_eq!(entry.user_id, None);

        // Nothing lands in the durable store.
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM webtoons")
            .fetch_one(&state.db)
            .await
            .unwrap();
        assert_eq!(count, 0);

        // A fresh extraction over the same session still sees the entry.
        let again = facade_for(&state, session).await;
        assert_eq!(again.list().await.unwrap(), vec![entry]);
    }

    #[tokio::test]
    async fn register_login_add_list_round_trip() {
        let state = test_state().await;
        register(
            State(state.clone()),
            Json(RegisterRequest {
                username: "alice".into(),
                password: "pw1".into(),
            }),
        )
        .await
        .expect("register");

        let session = new_session();
        login(
            State(state.clone()),
            session.clone(),
            Json(LoginRequest {
                username: "alice".into(),
                password: "pw1".into(),
            }),
        )
        .await
        .expect("login");

        let alice = User::find_by_username(&state.db, "alice")
            .await
            .unwrap()
            .expect("alice exists");

        let facade = facade_for(&state, session).await;
        let mut f = form("Tower of God");
        f.chapter = Some(10);
        facade.add(f).await.unwrap();

        let entries = facade.list().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Tower of God");
        assert_eq!(entries[0].chapter, 10);
        assert_eq!(entries[0].read_status, ReadStatus::Reading);
        assert_eq!(entries[0].webtoon_status, WebtoonStatus::Ongoing);
        assert_eq!(entries[0].user_id, Some(alice.id));
    }

    #[tokio::test]
    async fn add_then_list_includes_the_entry() {
        let facade = anonymous_facade();
        let entry = facade.add(form("Lore Olympus")).await.unwrap();
        assert_eq!(entry.id, 1);
        assert_eq!(entry.chapter, 0);

        let entries = facade.list().await.unwrap();
        assert_eq!(entries, vec![entry]);
    }

    #[tokio::test]
    async fn overlong_title_is_rejected_and_nothing_is_stored() {
        let facade = anonymous_facade();
        let result = facade.add(form(&"a".repeat(81))).await;
        assert!(matches!(result, Err(ListError::TitleTooLong)));
        assert!(facade.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn edit_validates_with_the_same_rules_as_add() {
        let facade = anonymous_facade();
        let entry = facade.add(form("Tower of God")).await.unwrap();

        let result = facade.edit(entry.id, form(&"a".repeat(81))).await;
        assert!(matches!(result, Err(ListError::TitleTooLong)));

        // Entry is unchanged.
        assert_eq!(facade.list().await.unwrap(), vec![entry]);
    }

    #[tokio::test]
    async fn edit_missing_id_is_not_found_even_with_invalid_fields() {
        let facade = anonymous_facade();
        let result = facade.edit(9, form(&"a".repeat(81))).await;
        assert!(matches!(result, Err(ListError::NotFound)));
    }

    #[tokio::test]
    async fn empty_search_equals_list() {
        let facade = anonymous_facade();
        facade.add(form("Tower of God")).await.unwrap();
        facade.add(form("Lore Olympus")).await.unwrap();

        let all = facade.list().await.unwrap();
        assert_eq!(facade.search("").await.unwrap(), all);
        assert_eq!(facade.search("   ").await.unwrap(), all);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let facade = anonymous_facade();
        let entry = facade.add(form("Tower of God")).await.unwrap();

        facade.delete(entry.id).await.unwrap();
        facade.delete(entry.id).await.unwrap();
        assert!(facade.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_all_empties_the_list() {
        let facade = anonymous_facade();
        facade.add(form("Tower of God")).await.unwrap();
        facade.add(form("Bastard")).await.unwrap();

        facade.delete_all().await.unwrap();
        assert!(facade.list().await.unwrap().is_empty());
    }
}
