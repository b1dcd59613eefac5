//! Router tests against an in-memory store and a stub song info source

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use songlib_server::db::query::update_song;
use songlib_server::db::{DbError, SongStore, WriteAction};
use songlib_server::lookup::LookupError;
use songlib_server::models::{
    parse_date, year_bounds, DateForm, LinkPresence, NewSong, Pagination, Song, SongFilter,
    SongPatch,
};
use songlib_server::{build_router, AppState, ServerConfig, SongDetail, SongInfoSource};

#[derive(Default)]
struct MemoryStore {
    songs: Mutex<Vec<Song>>,
    next_id: Mutex<i32>,
}

impl MemoryStore {
    fn with_songs(songs: Vec<Song>) -> Self {
        let next = songs.iter().map(|s| s.id).max().unwrap_or(0);
        Self {
            songs: Mutex::new(songs),
            next_id: Mutex::new(next),
        }
    }

    fn get(&self, id: i32) -> Option<Song> {
        self.songs.lock().unwrap().iter().find(|s| s.id == id).cloned()
    }
}

fn in_year(song: &Song, year: &str) -> Result<bool, DbError> {
    let (start, end) = year_bounds(year).ok_or(DbError::BadDate(DateForm::Year))?;
    Ok(parse_date(&song.release_date).is_some_and(|d| d >= start && d <= end))
}

#[async_trait]
impl SongStore for MemoryStore {
    async fn list(&self, filter: &SongFilter, page: Pagination) -> Result<Vec<Song>, DbError> {
        let mut songs = self.songs.lock().unwrap().clone();
        songs.sort_by_key(|s| s.id);

        let mut matched = Vec::new();
        for song in songs {
            if filter.song.as_ref().is_some_and(|f| !song.name.contains(f.as_str())) {
                continue;
            }
            if filter.group.as_ref().is_some_and(|f| !song.group.contains(f.as_str())) {
                continue;
            }
            if let Some(year) = &filter.year {
                if !in_year(&song, year)? {
                    continue;
                }
            }
            if filter.text.as_ref().is_some_and(|f| !song.text.contains(f.as_str())) {
                continue;
            }
            match filter.link {
                LinkPresence::Present if song.link.is_empty() => continue,
                LinkPresence::Absent if !song.link.is_empty() => continue,
                _ => {}
            }
            matched.push(song);
        }

        let rest = matched.into_iter().skip(page.offset as usize);
        Ok(if page.limit == 0 {
            rest.collect()
        } else {
            rest.take(page.limit as usize).collect()
        })
    }

    async fn text(&self, id: i32) -> Result<String, DbError> {
        self.get(id).map(|s| s.text).ok_or(DbError::NotFound { id })
    }

    async fn add(&self, song: NewSong) -> Result<i32, DbError> {
        if !song.release_date.is_empty() && parse_date(&song.release_date).is_none() {
            return Err(DbError::BadDate(DateForm::DayMonthYear));
        }
        let mut songs = self.songs.lock().unwrap();
        if songs.iter().any(|s| s.name == song.name && s.group == song.group) {
            return Err(DbError::DuplicateSong {
                name: song.name,
                group: song.group,
            });
        }
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        songs.push(Song {
            id: *next,
            name: song.name,
            group: song.group,
            release_date: song.release_date,
            text: song.text,
            link: song.link,
        });
        Ok(*next)
    }

    async fn update(&self, id: i32, patch: &SongPatch) -> Result<(), DbError> {
        // same validation the SQL path applies
        update_song(id, patch)?;

        let mut songs = self.songs.lock().unwrap();
        let song = songs.iter_mut().find(|s| s.id == id).ok_or(DbError::BadId {
            id,
            action: WriteAction::Update,
        })?;
        if let Some(date) = &patch.release_date {
            song.release_date = date.clone();
        }
        if let Some(text) = &patch.text {
            song.text = text.clone();
        }
        if let Some(link) = &patch.link {
            song.link = link.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), DbError> {
        let mut songs = self.songs.lock().unwrap();
        let before = songs.len();
        songs.retain(|s| s.id != id);
        if songs.len() == before {
            return Err(DbError::BadId {
                id,
                action: WriteAction::Delete,
            });
        }
        Ok(())
    }
}

enum StubLookup {
    Detail(SongDetail),
    Unavailable,
}

#[async_trait]
impl SongInfoSource for StubLookup {
    async fn fetch(&self, _group: &str, _song: &str) -> Result<SongDetail, LookupError> {
        match self {
            Self::Detail(detail) => Ok(detail.clone()),
            Self::Unavailable => Err(LookupError::Status {
                url: "http://songs.invalid/info".into(),
                status: StatusCode::SERVICE_UNAVAILABLE,
            }),
        }
    }
}

fn song(id: i32, name: &str, group: &str, date: &str, text: &str, link: &str) -> Song {
    Song {
        id,
        name: name.into(),
        group: group.into(),
        release_date: date.into(),
        text: text.into(),
        link: link.into(),
    }
}

fn catalog() -> Vec<Song> {
    vec![
        song(1, "Supermassive Black Hole", "Muse", "16.07.2006", "Ooh baby\n\nGlaciers melting\n\nSupermassive", "https://youtu.be/a"),
        song(2, "Starlight", "Muse", "03.09.2006", "Far away\n\nOur hopes", ""),
        song(3, "Madness", "Muse", "20.08.2012", "I can't get these memories", "https://youtu.be/b"),
        song(4, "Yellow", "Coldplay", "26.06.2000", "Look at the stars", ""),
        song(5, "Paradise", "Coldplay", "12.09.2011", "When she was just a girl", "https://youtu.be/c"),
    ]
}

fn app_with(store: Arc<MemoryStore>, lookup: StubLookup) -> Router {
    let state = AppState::new(store, Arc::new(lookup));
    build_router(state, &ServerConfig::default())
}

fn app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::with_songs(catalog()));
    let lookup = StubLookup::Detail(SongDetail {
        release_date: "01.05.2015".into(),
        text: "Verse one\n\nVerse two".into(),
        link: "https://youtu.be/new".into(),
    });
    (app_with(store.clone(), lookup), store)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn send_json(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, method, uri, body).await;
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn ids(body: &Value) -> Vec<i64> {
    body["response"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn health_endpoint() {
    let (app, _) = app();
    let (status, body) = send_json(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "reachable");
}

#[tokio::test]
async fn list_all_songs_in_id_order() {
    let (app, _) = app();
    let (status, body) = send_json(&app, "GET", "/songs", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![1, 2, 3, 4, 5]);
    assert_eq!(body["response"][0]["song"], "Supermassive Black Hole");
    assert_eq!(body["response"][0]["releaseDate"], "16.07.2006");
}

#[tokio::test]
async fn list_respects_limit_and_offset() {
    let (app, _) = app();
    let (_, body) = send_json(&app, "GET", "/songs?limit=2&offset=1", None).await;
    assert_eq!(ids(&body), vec![2, 3]);

    let (_, body) = send_json(&app, "GET", "/songs?limit=0&offset=3", None).await;
    assert_eq!(ids(&body), vec![4, 5]);

    let (_, body) = send_json(&app, "GET", "/songs?offset=10", None).await;
    assert!(ids(&body).is_empty());
}

#[tokio::test]
async fn list_filters_combine() {
    let (app, _) = app();
    let (_, body) = send_json(&app, "GET", "/songs?group=Muse&link=true", None).await;
    assert_eq!(ids(&body), vec![1, 3]);

    let (_, body) = send_json(&app, "GET", "/songs?link=false", None).await;
    assert_eq!(ids(&body), vec![2, 4]);

    let (_, body) = send_json(&app, "GET", "/songs?song=ar&text=away", None).await;
    assert_eq!(ids(&body), vec![2]);
}

#[tokio::test]
async fn list_year_filter_is_inclusive() {
    let (app, _) = app();
    let (status, body) = send_json(&app, "GET", "/songs?releaseDate=2006", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![1, 2]);

    let (_, body) = send_json(&app, "GET", "/songs?releaseDate=1999", None).await;
    assert!(ids(&body).is_empty());
}

#[tokio::test]
async fn list_bad_year_is_400() {
    let (app, _) = app();
    let (status, body) = send_json(&app, "GET", "/songs?releaseDate=abcd", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "bad date, date must have format year");
    assert_eq!(body["error"]["path"], "/songs");
    assert!(body["error"]["timestamp"].is_string());
}

#[tokio::test]
async fn list_validation_errors() {
    let (app, _) = app();
    let cases = [
        ("/songs?limit=abc", "limit must be number"),
        ("/songs?offset=x", "offset must be number"),
        ("/songs?limit=-1", "offset or limit cannot be negative"),
        ("/songs?link=maybe", "link must be true or false"),
    ];
    for (uri, message) in cases {
        let (status, body) = send_json(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["error"]["message"], message, "{uri}");
    }
}

#[tokio::test]
async fn verses_are_paged() {
    let (app, _) = app();
    let (status, body) = send_json(&app, "GET", "/songs/1?offset=1&limit=1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"]["id"], 1);
    assert_eq!(body["response"]["verses"], "Glaciers melting");
    assert_eq!(body["response"]["versesInSong"], 3);
}

#[tokio::test]
async fn verses_default_to_full_text() {
    let (app, _) = app();
    let (_, body) = send_json(&app, "GET", "/songs/1", None).await;
    assert_eq!(
        body["response"]["verses"],
        "Ooh baby\n\nGlaciers melting\n\nSupermassive"
    );
    assert_eq!(body["response"]["versesInSong"], 3);
}

#[tokio::test]
async fn verses_offset_past_end_still_reports_count() {
    let (app, _) = app();
    let (status, body) = send_json(&app, "GET", "/songs/2?offset=5&limit=1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"]["verses"], "");
    assert_eq!(body["response"]["versesInSong"], 2);
}

#[tokio::test]
async fn verses_offset_without_limit_is_empty() {
    let (app, _) = app();
    let (status, body) = send_json(&app, "GET", "/songs/1?offset=1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"]["verses"], "");
    assert_eq!(body["response"]["versesInSong"], 3);
}

#[tokio::test]
async fn verses_bad_id_and_missing_song() {
    let (app, _) = app();
    let (status, body) = send_json(&app, "GET", "/songs/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "id must be number");
    assert_eq!(body["error"]["path"], "/songs/abc");

    let (status, body) = send_json(&app, "GET", "/songs/99", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "no song with this id");

    let (status, body) = send_json(&app, "GET", "/songs/1?limit=-2", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "offset or limit cannot be negative");
}

#[tokio::test]
async fn create_enriches_and_returns_id() {
    let (app, store) = app();
    let (status, body) = send_json(
        &app,
        "PUT",
        "/songs",
        Some(json!({"song": "Mercy", "group": "Muse"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["response"]["id"].as_i64().unwrap() as i32;
    assert!(id > 0);

    let stored = store.get(id).unwrap();
    assert_eq!(stored.release_date, "01.05.2015");
    assert_eq!(stored.link, "https://youtu.be/new");
}

#[tokio::test]
async fn create_duplicate_is_400() {
    let (app, _) = app();
    let (status, body) = send_json(
        &app,
        "PUT",
        "/songs",
        Some(json!({"song": "Yellow", "group": "Coldplay"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "song of this group is already added");
}

#[tokio::test]
async fn create_requires_song_and_group() {
    let (app, _) = app();
    let (status, body) = send_json(&app, "PUT", "/songs", Some(json!({"song": "Only"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "song and group values must be not empty");
}

#[tokio::test]
async fn create_with_upstream_down_is_bare_502() {
    let store = Arc::new(MemoryStore::with_songs(catalog()));
    let app = app_with(store.clone(), StubLookup::Unavailable);
    let (status, bytes) = send(
        &app,
        "PUT",
        "/songs",
        Some(json!({"song": "Mercy", "group": "Muse"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(bytes.is_empty());
    assert_eq!(store.songs.lock().unwrap().len(), 5);
}

#[tokio::test]
async fn malformed_body_is_400() {
    let (app, _) = app();
    let request = Request::builder()
        .method("PUT")
        .uri("/songs")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_changes_only_given_fields() {
    let (app, store) = app();
    let (status, bytes) = send(&app, "POST", "/songs", Some(json!({"id": 4, "text": "new"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(bytes.is_empty());

    let stored = store.get(4).unwrap();
    assert_eq!(stored.text, "new");
    assert_eq!(stored.release_date, "26.06.2000");
    assert_eq!(stored.link, "");
}

#[tokio::test]
async fn update_errors() {
    let (app, _) = app();
    let cases = [
        (
            json!({"id": 1, "releaseDate": "", "text": "", "link": ""}),
            "no data to update, release date or link or text must be not empty",
        ),
        (json!({"id": 99, "text": "x"}), "bad id, nothing updated"),
        (
            json!({"id": 1, "releaseDate": "2012-02-25"}),
            "bad date, date must have format day.month.year",
        ),
        (json!({"text": "x"}), "id is required"),
    ];
    for (body, message) in cases {
        let (status, response) = send_json(&app, "POST", "/songs", Some(body.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(response["error"]["message"], message, "{body}");
    }
}

#[tokio::test]
async fn delete_then_read_is_not_found() {
    let (app, _) = app();
    let (status, _) = send(&app, "DELETE", "/songs", Some(json!({"id": 3}))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send_json(&app, "GET", "/songs/3", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "no song with this id");

    let (status, body) = send_json(&app, "DELETE", "/songs", Some(json!({"id": 3}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "bad id, nothing deleted");
}
