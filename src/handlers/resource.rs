use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use tracing::info;

use crate::db::{Record, Repository};
use crate::error::ApiError;

/// A record type exposed as an HTTP collection.
pub trait Resource: Record {
    /// Collection path, e.g. `/items`. Members live at `{PATH}/{id}`.
    const PATH: &'static str;

    fn location(&self) -> String {
        format!("{}/{}", Self::PATH, self.id())
    }
}

/// Mount the five CRUD routes for `R` with its repository as state.
pub fn resource_router<R: Resource>(repo: Repository<R>) -> Router {
    let member = format!("{}/{{id}}", R::PATH);
    Router::new()
        .route(R::PATH, get(list::<R>).post(create::<R>))
        .route(
            &member,
            get(get_one::<R>).put(update::<R>).delete(delete::<R>),
        )
        .with_state(repo)
}

/// GET {PATH} -> every record, in insertion order.
pub async fn list<R: Resource>(
    State(repo): State<Repository<R>>,
) -> Result<Json<Vec<R>>, ApiError> {
    Ok(Json(repo.list().await?))
}

/// GET {PATH}/{id}
pub async fn get_one<R: Resource>(
    State(repo): State<Repository<R>>,
    Path(id): Path<i64>,
) -> Result<Json<R>, ApiError> {
    repo.find(id).await?.map(Json).ok_or(ApiError::NotFound)
}

/// POST {PATH} -> 201 with a `Location` header for the new record.
pub async fn create<R: Resource>(
    State(repo): State<Repository<R>>,
    Json(fields): Json<R::Fields>,
) -> Result<impl IntoResponse, ApiError> {
    let record = repo.insert(fields).await?;
    let location = record.location();
    info!(%location, "record created");
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(record),
    ))
}

/// PUT {PATH}/{id} -> overwrite the writable fields; the id never changes.
pub async fn update<R: Resource>(
    State(repo): State<Repository<R>>,
    Path(id): Path<i64>,
    Json(fields): Json<R::Fields>,
) -> Result<Json<R>, ApiError> {
    repo.update(id, fields)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// DELETE {PATH}/{id} -> the record as it was just before removal.
pub async fn delete<R: Resource>(
    State(repo): State<Repository<R>>,
    Path(id): Path<i64>,
) -> Result<Json<R>, ApiError> {
    let record = repo.delete(id).await?.ok_or(ApiError::NotFound)?;
    info!(location = %record.location(), "record deleted");
    Ok(Json(record))
}
