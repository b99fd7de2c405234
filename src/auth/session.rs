use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use tower_sessions::Session;

use crate::state::AppState;

/// Session key under which the authenticated user's id is stored.
pub const USER_ID_KEY: &str = "user_id";

/// Extracts the logged-in user's id from the session, rejecting with 401
/// when the session carries no identity.
pub struct CurrentUser(pub i64);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
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

        match user_id {
            Some(id) => Ok(CurrentUser(id)),
            None => Err((StatusCode::UNAUTHORIZED, "not logged in".into())),
        }
    }
}
