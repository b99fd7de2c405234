use axum::{
    extract::{Path, Query},
    http::{header, StatusCode},
    Json,
};
use tracing::instrument;

use crate::error::ListError;
use crate::webtoons::dto::{SearchQuery, WebtoonForm};
use crate::webtoons::facade::ListFacade;
use crate::webtoons::model::WebtoonEntry;

#[instrument(skip(facade))]
pub async fn list_webtoons(facade: ListFacade) -> Result<Json<Vec<WebtoonEntry>>, ListError> {
    Ok(Json(facade.list().await?))
}

#[instrument(skip(facade))]
pub async fn get_webtoon(
    facade: ListFacade,
    Path(id): Path<i64>,
) -> Result<Json<WebtoonEntry>, ListError> {
    Ok(Json(facade.get(id).await?))
}

#[instrument(skip(facade, form))]
pub async fn add_webtoon(
    facade: ListFacade,
    Json(form): Json<WebtoonForm>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<WebtoonEntry>), ListError> {
    let entry = facade.add(form).await?;
    let location = format!("/api/v1/webtoons/{}", entry.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(entry),
    ))
}

#[instrument(skip(facade, form))]
pub async fn edit_webtoon(
    facade: ListFacade,
    Path(id): Path<i64>,
    Json(form): Json<WebtoonForm>,
) -> Result<Json<WebtoonEntry>, ListError> {
    Ok(Json(facade.edit(id, form).await?))
}

#[instrument(skip(facade))]
pub async fn delete_webtoon(
    facade: ListFacade,
    Path(id): Path<i64>,
) -> Result<StatusCode, ListError> {
    facade.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(facade))]
pub async fn delete_all_webtoons(facade: ListFacade) -> Result<StatusCode, ListError> {
    facade.delete_all().await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(facade))]
pub async fn search_webtoons(
    facade: ListFacade,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Vec<WebtoonEntry>>, ListError> {
    Ok(Json(facade.search(&params.q).await?))
}
