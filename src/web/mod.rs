//! Embedded web dashboard.
//!
//! Provides a lightweight HTTP server (sync, via `tiny_http`) that serves:
//! - The single-page explorer: search box, category dropdown, cards, chart
//! - JSON API endpoints deriving views from the session's records
//!
//! Launched via `biospace web` (default: `http://127.0.0.1:9747`). The
//! session's fetch runs in the background while the server is already
//! accepting requests; the page shows the loading state until it settles.

mod api;
mod frontend;

use std::io::Cursor;

use anyhow::{Context, Result};
use tiny_http::{Header, Method, Response, Server, StatusCode};

use crate::explore::Session;

pub(crate) type HttpResponse = Response<Cursor<Vec<u8>>>;

// ---------------------------------------------------------------------------
// Server entry point
// ---------------------------------------------------------------------------

/// Dashboard settings resolved from config and flags.
#[derive(Debug, Clone)]
pub struct WebOptions {
    pub addr: String,
    pub open_browser: bool,
    pub bar_color: String,
}

/// Start the dashboard server.
///
/// Blocks the current thread. Handles requests sequentially (sufficient for
/// a local single-user dashboard). Errors are answered per request without
/// stopping the server.
pub fn serve(session: &Session, options: &WebOptions) -> Result<()> {
    let server = Server::http(&options.addr)
        .map_err(|e| anyhow::anyhow!("failed to start HTTP server on {}: {e}", options.addr))?;

    println!("BioSpace Explorer running at http://{}", options.addr);
    println!("Records from {}", session.origin());
    println!("Press Ctrl+C to stop.\n");

    if options.open_browser {
        let url = format!("http://{}", options.addr);
        if let Err(e) = open_browser(&url) {
            tracing::warn!("{e:#}");
        }
    }

    for request in server.incoming_requests() {
        let method = request.method().clone();
        let url = request.url().to_string();

        let resp = match dispatch(session, options, &method, &url) {
            Ok(resp) => resp,
            Err(e) => {
                tracing::error!("{method} {url}: {e:#}");
                error_response(&e.to_string())
            }
        };
        let status = resp.status_code().0;

        if let Err(e) = request.respond(resp) {
            tracing::debug!("failed to answer {method} {url}: {e}");
        }

        // Brief access log
        println!(
            "{} {} {} {}",
            method,
            url,
            status,
            chrono::Local::now().format("%H:%M:%S")
        );
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Dispatch an incoming request to the appropriate handler.
pub(crate) fn dispatch(
    session: &Session,
    options: &WebOptions,
    method: &Method,
    url: &str,
) -> Result<HttpResponse> {
    // Strip query string for path matching
    let path = url.split('?').next().unwrap_or(url);

    match (method, path) {
        (&Method::Get, "/") | (&Method::Get, "/index.html") => Ok(serve_frontend()),
        (&Method::Get, "/api/view") => api::get_view(session, options, url),
        (&Method::Get, "/api/experiments") => api::get_experiments(session),
        (&Method::Get, "/api/health") => api::get_health(session),
        _ => Ok(not_found()),
    }
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

/// Serve the embedded single-page frontend.
fn serve_frontend() -> HttpResponse {
    Response::from_data(frontend::INDEX_HTML.as_bytes().to_vec())
        .with_header(content_type("text/html; charset=utf-8"))
        .with_status_code(StatusCode(200))
}

/// 404 response.
fn not_found() -> HttpResponse {
    let body = r#"{"error": "not found"}"#;
    Response::from_data(body.as_bytes().to_vec())
        .with_header(content_type_json())
        .with_status_code(StatusCode(404))
}

/// 500 response carrying the error text.
fn error_response(message: &str) -> HttpResponse {
    let body = serde_json::json!({ "error": message }).to_string();
    Response::from_data(body.into_bytes())
        .with_header(content_type_json())
        .with_status_code(StatusCode(500))
}

/// JSON content type header.
pub(crate) fn content_type_json() -> Header {
    content_type("application/json; charset=utf-8")
}

fn content_type(value: &str) -> Header {
    Header::from_bytes("Content-Type", value).expect("static header is valid ASCII")
}

/// Attempt to open a URL in the system default browser.
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", url])
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
