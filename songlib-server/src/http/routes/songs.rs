//! Song catalog endpoints
//!
//! - `GET /songs` filtered listing
//! - `GET /songs/{id}` verse-paged lyrics
//! - `PUT /songs` add with enrichment
//! - `POST /songs` partial update
//! - `DELETE /songs` delete by id

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, SongId, ValidQuery};
use crate::http::server::AppState;
use crate::models::{
    LinkPresence, NewSong, Pagination, PaginationParams, Song, SongFilter, SongPatch,
    ValidationError,
};
use crate::verses::paginate;

/// Success envelope: `{"response": ...}`
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub response: T,
}

impl<T> Envelope<T> {
    pub fn new(response: T) -> Self {
        Self { response }
    }
}

/// Listing query params
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSongsParams {
    #[serde(flatten)]
    pub pagination: PaginationParams,
    pub song: Option<String>,
    pub group: Option<String>,
    /// Four-digit year
    pub release_date: Option<String>,
    pub text: Option<String>,
    pub link: Option<String>,
}

/// Verse page response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersesResponse {
    pub id: i32,
    pub verses: String,
    pub verses_in_song: usize,
}

/// Add song request
#[derive(Debug, Deserialize)]
pub struct CreateSongRequest {
    #[serde(default)]
    pub song: String,
    #[serde(default)]
    pub group: String,
}

/// Id of a freshly added song
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedSong {
    pub id: i32,
}

/// Partial update request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSongRequest {
    pub id: Option<i32>,
    pub release_date: Option<String>,
    pub text: Option<String>,
    pub link: Option<String>,
}

/// Delete request
#[derive(Debug, Deserialize)]
pub struct DeleteSongRequest {
    pub id: Option<i32>,
}

/// GET /songs - filtered, paginated listing
async fn list_songs(
    State(state): State<Arc<AppState>>,
    ValidQuery(params): ValidQuery<ListSongsParams>,
) -> Result<Json<Envelope<Vec<Song>>>, ApiError> {
    let page = Pagination::try_from(&params.pagination)?;
    let link = LinkPresence::parse(params.link.as_deref())?;

    let filter = SongFilter::builder()
        .song(params.song)
        .group(params.group)
        .year(params.release_date)
        .text(params.text)
        .link(link)
        .build();

    let songs = state.store.list(&filter, page).await?;
    tracing::debug!(count = songs.len(), limit = page.limit, offset = page.offset, "songs listed");

    Ok(Json(Envelope::new(songs)))
}

/// GET /songs/{id} - lyrics split into verses, paged
async fn get_song_verses(
    State(state): State<Arc<AppState>>,
    SongId(id): SongId,
    ValidQuery(params): ValidQuery<PaginationParams>,
) -> Result<Json<Envelope<VersesResponse>>, ApiError> {
    let page = Pagination::try_from(&params)?;
    let text = state.store.text(id).await?;

    let selected = paginate(&text, page.offset as usize, page.limit as usize);

    Ok(Json(Envelope::new(VersesResponse {
        id,
        verses: selected.verses,
        verses_in_song: selected.total,
    })))
}

/// PUT /songs - add a song, enriched from the song info service
async fn create_song(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<CreateSongRequest>,
) -> Result<(StatusCode, Json<Envelope<CreatedSong>>), ApiError> {
    if req.song.is_empty() || req.group.is_empty() {
        return Err(ValidationError::Empty {
            fields: "song and group",
        }
        .into());
    }

    let detail = state.lookup.fetch(&req.group, &req.song).await?;

    let id = state
        .store
        .add(NewSong {
            name: req.song,
            group: req.group,
            release_date: detail.release_date,
            text: detail.text,
            link: detail.link,
        })
        .await?;
    tracing::info!(id, "song added");

    Ok((StatusCode::CREATED, Json(Envelope::new(CreatedSong { id }))))
}

/// POST /songs - update release date, text and/or link
async fn update_song(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<UpdateSongRequest>,
) -> Result<StatusCode, ApiError> {
    let id = req.id.ok_or(ValidationError::Missing { field: "id" })?;
    let patch = SongPatch::from_raw(req.release_date, req.text, req.link);

    state.store.update(id, &patch).await?;
    tracing::info!(id, "song updated");

    Ok(StatusCode::OK)
}

/// DELETE /songs - remove a song permanently
async fn delete_song(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<DeleteSongRequest>,
) -> Result<StatusCode, ApiError> {
    let id = req.id.ok_or(ValidationError::Missing { field: "id" })?;

    state.store.delete(id).await?;
    tracing::info!(id, "song deleted");

    Ok(StatusCode::OK)
}

/// Song routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/songs",
            get(list_songs)
                .put(create_song)
                .post(update_song)
                .delete(delete_song),
        )
        .route("/songs/{id}", get(get_song_verses))
}
