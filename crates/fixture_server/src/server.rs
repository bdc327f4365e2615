use std::{
    collections::VecDeque,
    sync::{
        Arc, Mutex,
        atomic::{AtomicU32, AtomicUsize, Ordering},
    },
};

use api_types::auth::{AuthCredentials, AuthToken};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{StatusCode, header::CONTENT_RANGE},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use serde::Deserialize;
use serde_json::Value;

use crate::{
    Dataset,
    dataset::FieldFilter,
};

const DEFAULT_TAKE: usize = 25;

#[derive(Clone)]
struct FixtureState {
    dataset: Arc<Dataset>,
    username: Arc<str>,
    password: Arc<str>,
    token: Arc<str>,
    page_limit: Option<usize>,
    content_range: bool,
    scripted_ranges: Arc<Mutex<VecDeque<String>>>,
    throttle: Arc<AtomicU32>,
    requests: Arc<AtomicUsize>,
}

/// An in-memory directory API.
#[derive(Clone)]
pub struct Fixture {
    state: FixtureState,
}

impl Fixture {
    /// Return a builder for `Fixture`.
    pub fn builder() -> FixtureBuilder {
        FixtureBuilder::default()
    }

    pub fn router(&self) -> Router {
        router(self.state.clone())
    }

    /// Controls shared with every clone of this fixture and its router.
    pub fn controls(&self) -> FixtureControls {
        FixtureControls {
            throttle: self.state.throttle.clone(),
            requests: self.state.requests.clone(),
        }
    }
}

/// Runtime knobs of a running fixture.
#[derive(Clone, Debug)]
pub struct FixtureControls {
    throttle: Arc<AtomicU32>,
    requests: Arc<AtomicUsize>,
}

impl FixtureControls {
    /// Answers the next `count` collection requests with 429.
    pub fn throttle_next(&self, count: u32) {
        self.throttle.store(count, Ordering::SeqCst);
    }

    /// Collection requests received so far, throttled ones included.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[derive(Debug)]
pub struct FixtureBuilder {
    dataset: Dataset,
    username: String,
    password: String,
    token: String,
    page_limit: Option<usize>,
    content_range: bool,
    scripted_ranges: VecDeque<String>,
}

impl Default for FixtureBuilder {
    fn default() -> Self {
        Self {
            dataset: Dataset::default(),
            username: "api".to_string(),
            password: "secret".to_string(),
            token: "fixture-token".to_string(),
            page_limit: None,
            content_range: true,
            scripted_ranges: VecDeque::new(),
        }
    }
}

impl FixtureBuilder {
    pub fn dataset(mut self, dataset: Dataset) -> FixtureBuilder {
        self.dataset = dataset;
        self
    }

    pub fn credentials(mut self, username: &str, password: &str) -> FixtureBuilder {
        self.username = username.to_string();
        self.password = password.to_string();
        self
    }

    pub fn token(mut self, token: &str) -> FixtureBuilder {
        self.token = token.to_string();
        self
    }

    /// Caps every page at `limit` records regardless of the requested `take`.
    pub fn page_limit(mut self, limit: usize) -> FixtureBuilder {
        self.page_limit = Some(limit.max(1));
        self
    }

    /// Serves whole collections in one response without `Content-Range`.
    pub fn without_content_range(mut self) -> FixtureBuilder {
        self.content_range = false;
        self
    }

    /// Answers the next collection requests with these `Content-Range`
    /// values, one per request, whatever the requested `skip`.
    ///
    /// The body holds the records the header names: `items a-b/t` serves
    /// records `a..=b`, `items */t` serves none. A value that does not parse
    /// is sent verbatim alongside the page the request asked for. Once the
    /// script runs out, paging is computed from `skip` and `take` again.
    pub fn scripted_ranges<I, S>(mut self, ranges: I) -> FixtureBuilder
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scripted_ranges = ranges.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(self) -> Fixture {
        Fixture {
            state: FixtureState {
                dataset: Arc::new(self.dataset),
                username: self.username.into(),
                password: self.password.into(),
                token: self.token.into(),
                page_limit: self.page_limit,
                content_range: self.content_range,
                scripted_ranges: Arc::new(Mutex::new(self.scripted_ranges)),
                throttle: Arc::new(AtomicU32::new(0)),
                requests: Arc::new(AtomicUsize::new(0)),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    #[serde(default)]
    skip: usize,
    take: Option<usize>,
    filter: Option<String>,
}

fn take_throttle(state: &FixtureState) -> bool {
    state
        .throttle
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
        .is_ok()
}

async fn login(
    State(state): State<FixtureState>,
    Json(credentials): Json<AuthCredentials>,
) -> Result<Json<AuthToken>, StatusCode> {
    if credentials.user != *state.username || credentials.password != *state.password {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(Json(AuthToken {
        token: Some(state.token.to_string()),
    }))
}

async fn list(
    State(state): State<FixtureState>,
    Path(collection): Path<String>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    Query(query): Query<ListQuery>,
) -> Response {
    state.requests.fetch_add(1, Ordering::SeqCst);

    if take_throttle(&state) {
        tracing::debug!(collection = %collection, "throttling request");
        return StatusCode::TOO_MANY_REQUESTS.into_response();
    }

    match bearer {
        Some(TypedHeader(auth)) if auth.token() == &*state.token => {}
        _ => return StatusCode::UNAUTHORIZED.into_response(),
    }

    let Some(records) = state.dataset.collection(&collection) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let filter = match query.filter.as_deref().map(FieldFilter::parse) {
        Some(None) => return StatusCode::BAD_REQUEST.into_response(),
        Some(Some(filter)) => Some(filter),
        None => None,
    };
    let matching: Vec<&Value> = records
        .iter()
        .filter(|record| filter.as_ref().is_none_or(|filter| filter.matches(record)))
        .collect();

    if !state.content_range {
        return Json(matching).into_response();
    }

    let total = matching.len();
    let take = query
        .take
        .unwrap_or(DEFAULT_TAKE)
        .min(state.page_limit.unwrap_or(usize::MAX))
        .max(1);
    let start = query.skip.min(total);
    let end = query.skip.saturating_add(take).min(total);

    let (range, start, end) = match next_scripted_range(&state) {
        Some(range) => {
            let (start, end) = scripted_slice(&range, total).unwrap_or((start, end));
            (range, start, end)
        }
        None if start < end => (format!("items {start}-{}/{total}", end - 1), start, end),
        None => (format!("items */{total}"), start, end),
    };
    tracing::debug!(
        collection = %collection,
        skip = query.skip,
        take,
        range = %range,
        "serving page"
    );

    ([(CONTENT_RANGE, range)], Json(&matching[start..end])).into_response()
}

fn next_scripted_range(state: &FixtureState) -> Option<String> {
    state
        .scripted_ranges
        .lock()
        .ok()
        .and_then(|mut ranges| ranges.pop_front())
}

/// Records named by a scripted header, clamped to the collection.
fn scripted_slice(range: &str, total: usize) -> Option<(usize, usize)> {
    let (slice, _) = range.strip_prefix("items ")?.split_once('/')?;
    if slice == "*" {
        return Some((0, 0));
    }
    let (first, last) = slice.split_once('-')?;
    let first: usize = first.parse().ok()?;
    let last: usize = last.parse().ok()?;
    let end = last.saturating_add(1).min(total);
    Some((first.min(end), end))
}

fn router(state: FixtureState) -> Router {
    Router::new()
        .route("/api/auth", post(login))
        .route("/api/{collection}", get(list))
        .with_state(state)
}

pub async fn run_with_listener(
    fixture: Fixture,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Fixture API listening on http://{}/api/", addr);

    axum::serve(listener, fixture.router()).await
}

pub fn spawn_with_listener(
    fixture: Fixture,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(fixture, listener).await {
            tracing::error!("fixture server failed: {err}");
        }
    });

    Ok(addr)
}
