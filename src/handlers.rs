use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect},
    Json,
};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::instrument;

use crate::entries::{create_entry, delete_entry, get_entry, list_entries, search_entries, update_entry};
use crate::error::{AppError, Result};
use crate::models::{Entry, EntryInput, SearchParams, StatusResponse};
use crate::utils::store_upload;
use crate::views::create_index_page;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub upload_dir: Arc<PathBuf>,
}

impl AppState {
    pub fn new(pool: SqlitePool, upload_dir: PathBuf) -> Self {
        Self {
            pool,
            upload_dir: Arc::new(upload_dir),
        }
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn require_content(input: &EntryInput) -> Result<()> {
    if input.content.trim().is_empty() {
        return Err(AppError::MissingField("content"));
    }
    Ok(())
}

async fn find_entries(pool: &SqlitePool, query: Option<&str>) -> Result<Vec<Entry>> {
    let entries = match query {
        Some(q) => search_entries(pool, q).await?,
        None => list_entries(pool).await?,
    };
    Ok(entries)
}

/// `GET /` and `GET /search`: the listing page, filtered when `q` is set.
pub async fn handle_index_request(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Html<String>> {
    let query = params.q.and_then(non_blank);
    let entries = find_entries(&state.pool, query.as_deref()).await?;

    let markup = create_index_page(&entries, query.as_deref());
    Ok(Html(markup.into_string()))
}

/// `POST /`: multipart form with `content`, `title`, `keywords` and an
/// optional `image` file.
pub async fn handle_submit_request(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Redirect> {
    let mut input = EntryInput::default();
    let mut image = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "content" => input.content = field.text().await?,
            "title" => input.title = non_blank(field.text().await?),
            "keywords" => input.keywords = non_blank(field.text().await?),
            "image" => {
                let file_name = field.file_name().map(str::to_string);
                let data = field.bytes().await?;
                // browsers send an empty, unnamed part when no file was picked
                image = file_name.filter(|_| !data.is_empty()).map(|name| (name, data));
            }
            _ => {}
        }
    }

    // nothing touches the upload directory until the form is known to be valid
    require_content(&input)?;
    if let Some((file_name, data)) = image {
        input.image_path = store_upload(&state.upload_dir, &file_name, &data).await?;
    }
    create_entry(&state.pool, &input).await?;

    Ok(Redirect::to("/"))
}

pub async fn handle_list_api(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Entry>>> {
    let query = params.q.and_then(non_blank);
    Ok(Json(find_entries(&state.pool, query.as_deref()).await?))
}

pub async fn handle_get_api(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Entry>> {
    get_entry(&state.pool, id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound(id))
}

#[instrument(skip_all)]
pub async fn handle_create_api(
    State(state): State<AppState>,
    Json(input): Json<EntryInput>,
) -> Result<impl IntoResponse> {
    require_content(&input)?;
    let id = create_entry(&state.pool, &input).await?;

    Ok((
        StatusCode::CREATED,
        Json(StatusResponse {
            status: "created",
            id: Some(id),
        }),
    ))
}

#[instrument(skip(state, input))]
pub async fn handle_update_api(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<EntryInput>,
) -> Result<Json<StatusResponse>> {
    require_content(&input)?;
    update_entry(&state.pool, id, &input).await?;

    Ok(Json(StatusResponse {
        status: "updated",
        id: None,
    }))
}

#[instrument(skip(state))]
pub async fn handle_delete_api(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<StatusResponse>> {
    delete_entry(&state.pool, id).await?;

    Ok(Json(StatusResponse {
        status: "deleted",
        id: None,
    }))
}
