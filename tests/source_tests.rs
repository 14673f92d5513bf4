/// HTTP client tests against a throwaway local backend.
///
/// Each test binds a `tiny_http` server on an ephemeral port, answers a
/// single request with a canned response, and points an [`HttpSource`] at
/// it.
use std::thread::{self, JoinHandle};

use biospace_explorer::explore::{Body, Session};
use biospace_explorer::source::{FetchError, HttpSource, RecordSource};
use tiny_http::{Header, Response, Server, StatusCode};

/// Serve one canned response and report the path that was requested.
fn one_shot_backend(status: u16, body: &'static str) -> (String, JoinHandle<String>) {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();

    let handle = thread::spawn(move || {
        let request = server.recv().unwrap();
        let path = request.url().to_string();
        let response = Response::from_string(body)
            .with_status_code(StatusCode(status))
            .with_header(Header::from_bytes("Content-Type", "application/json").unwrap());
        request.respond(response).unwrap();
        path
    });

    (format!("http://{addr}"), handle)
}

#[test]
fn fetch_decodes_the_backend_array() {
    let (base, backend) = one_shot_backend(
        200,
        r#"[{"_id":"64f1","Title":"Plant Growth","Organism":"Arabidopsis","Category":"Botany","URL":"https://example.org/p"}]"#,
    );

    let records = HttpSource::new(&base).fetch().unwrap();

    assert_eq!(backend.join().unwrap(), "/api/experiments");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, "64f1");
    assert_eq!(records[0].url.as_deref(), Some("https://example.org/p"));
}

#[test]
fn non_array_body_is_a_body_error() {
    let (base, backend) = one_shot_backend(200, r#"{"experiments": []}"#);

    let err = HttpSource::new(&base).fetch().unwrap_err();
    backend.join().unwrap();

    assert!(matches!(err, FetchError::Body { .. }), "{err:?}");
}

#[test]
fn server_error_is_a_status_error() {
    let (base, backend) = one_shot_backend(500, r#"{"error":"boom"}"#);

    let err = HttpSource::new(&format!("{base}/")).fetch().unwrap_err();
    backend.join().unwrap();

    match err {
        FetchError::Status { status, url } => {
            assert_eq!(status, 500);
            assert!(url.ends_with("/api/experiments"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[test]
fn unreachable_backend_is_a_transport_error() {
    // Bind and immediately drop a listener to get a port nothing serves.
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };

    let source = HttpSource::new(&format!("http://{addr}"));
    assert!(matches!(source.fetch(), Err(FetchError::Transport { .. })));
    assert!(!source.is_reachable());
}

#[test]
fn session_settles_from_http_backend() {
    let (base, backend) = one_shot_backend(
        200,
        r#"[{"id":1,"Title":"Bone Density","Organism":"Mouse","Category":"Physiology"}]"#,
    );

    let mut session = Session::start(HttpSource::new(&base)).unwrap();
    session.wait_settled();
    backend.join().unwrap();

    let explorer = session.lock();
    assert!(!explorer.is_loading());
    assert!(matches!(explorer.view().body, Body::Cards(ref cards) if cards.len() == 1));
    assert_eq!(session.origin(), format!("{base}/api/experiments"));
}
