//! JSON API handlers for the web dashboard.
//!
//! Each handler corresponds to an API endpoint and returns a
//! `Response<Cursor<Vec<u8>>>` with JSON content.

use anyhow::{Context, Result};
use serde::Serialize;
use tiny_http::{Response, StatusCode};

use crate::explore::{Body, CategoryCount, CategoryFilter, Query, Session, View};
use crate::record::Record;
use crate::render::Card;

use super::{HttpResponse, WebOptions, content_type_json};

// ---------------------------------------------------------------------------
// JSON response types
// ---------------------------------------------------------------------------

/// View API response: one render-ready frame for the page.
#[derive(Debug, Serialize)]
struct ViewResponse {
    loading: bool,
    total: usize,
    /// `loading`, `empty` or `cards`.
    body: &'static str,
    /// Status text for the non-card states.
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
    cards: Vec<Card>,
    options: Vec<String>,
    /// Full-dataset category counts; `null` while loading or without records.
    chart: Option<Vec<CategoryCount>>,
    bar_color: String,
    search: String,
    category: String,
}

impl ViewResponse {
    fn from_view(view: View<'_>, loading: bool, query: &Query, bar_color: &str) -> Self {
        let cards = match &view.body {
            Body::Cards(records) => {
                records.iter().map(|r| Card::from_record(r)).collect()
            }
            _ => Vec::new(),
        };

        Self {
            loading,
            total: view.total,
            body: view.body.kind(),
            message: view.body.message(),
            cards,
            options: view.options,
            chart: view.chart,
            bar_color: bar_color.to_string(),
            search: query.search_term.clone(),
            category: query.category_filter.to_string(),
        }
    }
}

/// Health API response.
#[derive(Debug, Serialize)]
struct HealthResponse {
    loading: bool,
    records: usize,
    api_url: String,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build a JSON success response.
fn json_response<T: Serialize>(data: &T) -> Result<HttpResponse> {
    let body = serde_json::to_string(data).context("failed to serialize JSON response")?;
    Ok(Response::from_data(body.into_bytes())
        .with_header(content_type_json())
        .with_status_code(StatusCode(200)))
}

/// Parse `?search=...&category=...` into a query. Values are
/// percent-decoded and `+` is a space; unknown parameters are ignored.
fn parse_view_query(url: &str) -> Query {
    let mut query = Query::default();
    let Some((_, raw)) = url.split_once('?') else {
        return query;
    };

    for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
        match key.as_ref() {
            "search" => query.search_term = value.into_owned(),
            "category" => query.category_filter = CategoryFilter::parse(&value),
            _ => {}
        }
    }
    query
}

// ---------------------------------------------------------------------------
// API Handlers
// ---------------------------------------------------------------------------

/// `GET /api/view?search=S&category=C`: derived view for one query.
pub fn get_view(session: &Session, options: &WebOptions, url: &str) -> Result<HttpResponse> {
    json_response(&view_response(session, options, url))
}

fn view_response(session: &Session, options: &WebOptions, url: &str) -> ViewResponse {
    let query = parse_view_query(url);
    let explorer = session.lock();
    ViewResponse::from_view(
        explorer.view_for(&query),
        explorer.is_loading(),
        &query,
        &options.bar_color,
    )
}

/// `GET /api/experiments`: the loaded records in source field naming.
pub fn get_experiments(session: &Session) -> Result<HttpResponse> {
    let records: Vec<Record> = session.lock().records().to_vec();
    json_response(&records)
}

/// `GET /api/health`: fetch state summary.
pub fn get_health(session: &Session) -> Result<HttpResponse> {
    json_response(&health_response(session))
}

fn health_response(session: &Session) -> HealthResponse {
    let explorer = session.lock();
    HealthResponse {
        loading: explorer.is_loading(),
        records: explorer.records().len(),
        api_url: session.origin().to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
