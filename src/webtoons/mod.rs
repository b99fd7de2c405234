use axum::{routing::get, Router};

use crate::state::AppState;

mod backend;
mod dto;
mod durable;
mod ephemeral;
pub mod facade;
pub mod handlers;
pub mod model;
mod validate;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/webtoons",
            get(handlers::list_webtoons)
                .post(handlers::add_webtoon)
                .delete(handlers::delete_all_webtoons),
        )
        .route("/webtoons/search", get(handlers::search_webtoons))
        .route(
            "/webtoons/:id",
            get(handlers::get_webtoon)
                .put(handlers::edit_webtoon)
                .delete(handlers::delete_webtoon),
        )
}
