//! URL acquisition against a local axum server.

use std::cell::Cell;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::Router;
use tempfile::TempDir;

use rawdoc_acquire::{
    acquire_url, AcquireError, Acquirer, DocumentId, ErrorCategory, IdGenerator, RawDoc,
    SourceType,
};

const PDF_BYTES: &[u8] = b"%PDF-1.4\n1 0 obj << /Type /Catalog >> endobj\n%%EOF\n";
const TIMEOUT: Duration = Duration::from_secs(10);

async fn html_page() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        "<html><body><h1>Hello</h1></body></html>",
    )
}

async fn pdf() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/pdf")], PDF_BYTES)
}

async fn xhtml() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "Application/XHTML+XML")],
        "<html xmlns=\"http://www.w3.org/1999/xhtml\"></html>",
    )
}

async fn untyped() -> Response {
    Response::new(Body::from("no declared type"))
}

async fn missing() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "not here")
}

async fn no_content() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn slow() -> &'static str {
    tokio::time::sleep(Duration::from_secs(5)).await;
    "too late"
}

async fn moved() -> Redirect {
    Redirect::temporary("/page")
}

async fn echo_user_agent(headers: axum::http::HeaderMap) -> impl IntoResponse {
    let ua = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    ([(header::CONTENT_TYPE, "text/plain")], ua)
}

/// Starts the test server on its own runtime thread and returns its base URL.
fn spawn_server() -> String {
    let app = Router::new()
        .route("/page", get(html_page))
        .route("/doc.pdf", get(pdf))
        .route("/xhtml", get(xhtml))
        .route("/untyped", get(untyped))
        .route("/missing", get(missing))
        .route("/empty", get(no_content))
        .route("/slow", get(slow))
        .route("/moved", get(moved))
        .route("/ua", get(echo_user_agent));

    let (tx, rx) = std::sync::mpsc::channel::<SocketAddr>();
    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            tx.send(listener.local_addr().unwrap()).unwrap();
            axum::serve(listener, app).await.unwrap();
        });
    });
    let addr = rx.recv().unwrap();
    format!("http://{}", addr)
}

/// Loads the sidecar and checks it against its content blob.
fn check_sidecar(meta_path: &Path) -> RawDoc {
    assert!(meta_path.is_absolute(), "not absolute: {}", meta_path.display());
    let text = fs::read_to_string(meta_path).unwrap();
    let rawdoc: RawDoc = serde_json::from_str(&text).unwrap();

    let storage = PathBuf::from(&rawdoc.storage_path);
    assert!(storage.is_absolute());
    let content = fs::read(&storage).unwrap();
    assert_eq!(content.len() as u64, rawdoc.content_length);

    let meta_name = meta_path.file_name().unwrap().to_str().unwrap();
    let content_name = storage.file_name().unwrap().to_str().unwrap();
    let id = meta_name.strip_suffix(".meta.json").unwrap();
    assert_eq!(id, rawdoc.document_id);
    assert!(content_name.starts_with(id));
    assert!(DocumentId::parse(id).is_ok());
    assert_eq!(storage.parent(), meta_path.parent());
    assert!(rawdoc.metadata.is_empty());

    rawdoc
}

fn file_count(dir: &Path) -> usize {
    fs::read_dir(dir).map(|d| d.count()).unwrap_or(0)
}

#[test]
fn test_html_with_charset() {
    let base = spawn_server();
    let tmp = TempDir::new().unwrap();
    let url = format!("{}/page", base);

    let meta = acquire_url(&url, tmp.path(), TIMEOUT).unwrap();
    let rawdoc = check_sidecar(&meta);

    assert_eq!(rawdoc.content_type, "text/html");
    assert_eq!(rawdoc.source_type, SourceType::Url);
    assert_eq!(rawdoc.source_uri, url);
    assert!(rawdoc.storage_path.ends_with(".html"));
    assert_eq!(
        fs::read_to_string(&rawdoc.storage_path).unwrap(),
        "<html><body><h1>Hello</h1></body></html>"
    );
    assert!(chrono::DateTime::parse_from_rfc3339(&rawdoc.fetch_time).is_ok());
}

#[test]
fn test_pdf_stored_as_bin() {
    let base = spawn_server();
    let tmp = TempDir::new().unwrap();

    let meta = acquire_url(&format!("{}/doc.pdf", base), tmp.path(), TIMEOUT).unwrap();
    let rawdoc = check_sidecar(&meta);

    assert_eq!(rawdoc.source_type, SourceType::Url);
    assert_eq!(rawdoc.content_type, "application/pdf");
    assert!(rawdoc.storage_path.ends_with(".bin"));
    assert_eq!(fs::read(&rawdoc.storage_path).unwrap(), PDF_BYTES);
}

#[test]
fn test_html_match_is_case_insensitive() {
    let base = spawn_server();
    let tmp = TempDir::new().unwrap();

    let meta = acquire_url(&format!("{}/xhtml", base), tmp.path(), TIMEOUT).unwrap();
    let rawdoc = check_sidecar(&meta);

    assert_eq!(rawdoc.content_type, "Application/XHTML+XML");
    assert!(rawdoc.storage_path.ends_with(".html"));
}

#[test]
fn test_missing_content_type_defaults_to_html() {
    let base = spawn_server();
    let tmp = TempDir::new().unwrap();

    let meta = acquire_url(&format!("{}/untyped", base), tmp.path(), TIMEOUT).unwrap();
    let rawdoc = check_sidecar(&meta);

    assert_eq!(rawdoc.content_type, "");
    assert!(rawdoc.storage_path.ends_with(".html"));
}

#[test]
fn test_404_writes_nothing() {
    let base = spawn_server();
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("rawdocs");

    let err = acquire_url(&format!("{}/missing", base), &out, TIMEOUT).unwrap_err();

    assert!(matches!(err, AcquireError::HttpStatus { status: 404, .. }));
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.category(), ErrorCategory::Acquisition);
    assert_eq!(file_count(&out), 0);
}

#[test]
fn test_non_200_success_status_rejected() {
    let base = spawn_server();
    let tmp = TempDir::new().unwrap();

    let err = acquire_url(&format!("{}/empty", base), tmp.path(), TIMEOUT).unwrap_err();

    assert_eq!(err.status(), Some(204));
    assert_eq!(file_count(tmp.path()), 0);
}

#[test]
fn test_redirect_followed() {
    let base = spawn_server();
    let tmp = TempDir::new().unwrap();
    let url = format!("{}/moved", base);

    let meta = acquire_url(&url, tmp.path(), TIMEOUT).unwrap();
    let rawdoc = check_sidecar(&meta);

    assert_eq!(rawdoc.source_uri, url);
    assert_eq!(rawdoc.content_type, "text/html");
}

#[test]
fn test_timeout_is_distinct_error() {
    let base = spawn_server();
    let tmp = TempDir::new().unwrap();

    let err = acquire_url(
        &format!("{}/slow", base),
        tmp.path(),
        Duration::from_millis(300),
    )
    .unwrap_err();

    assert!(matches!(err, AcquireError::Timeout { .. }), "{err:?}");
    assert_eq!(file_count(tmp.path()), 0);
}

#[test]
fn test_connection_refused_is_request_error() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let tmp = TempDir::new().unwrap();

    let err = acquire_url(
        &format!("http://127.0.0.1:{}/", port),
        tmp.path(),
        TIMEOUT,
    )
    .unwrap_err();

    assert!(matches!(err, AcquireError::Request { .. }), "{err:?}");
    assert!(!err.is_fatal());
}

#[test]
fn test_same_url_twice_yields_distinct_documents() {
    let base = spawn_server();
    let tmp = TempDir::new().unwrap();
    let url = format!("{}/page", base);

    let first = acquire_url(&url, tmp.path(), TIMEOUT).unwrap();
    let second = acquire_url(&url, tmp.path(), TIMEOUT).unwrap();

    assert_ne!(first, second);
    let a = check_sidecar(&first);
    let b = check_sidecar(&second);
    assert_ne!(a.document_id, b.document_id);
    assert_eq!(file_count(tmp.path()), 4);
}

#[test]
fn test_output_dir_created_and_reused() {
    let base = spawn_server();
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("data").join("rawdocs");
    let url = format!("{}/page", base);

    acquire_url(&url, &out, TIMEOUT).unwrap();
    assert!(out.is_dir());
    acquire_url(&url, &out, TIMEOUT).unwrap();
    assert_eq!(file_count(&out), 4);
}

#[test]
fn test_user_agent_sent() {
    let base = spawn_server();
    let tmp = TempDir::new().unwrap();

    let meta = Acquirer::new()
        .user_agent("rawdoc-test/1.0")
        .acquire_url(&format!("{}/ua", base), tmp.path(), TIMEOUT)
        .unwrap();
    let rawdoc = check_sidecar(&meta);

    assert_eq!(
        fs::read_to_string(&rawdoc.storage_path).unwrap(),
        "rawdoc-test/1.0"
    );
    assert!(rawdoc.storage_path.ends_with(".bin"));
}

struct CountingIds(Cell<u8>);

impl IdGenerator for CountingIds {
    fn generate(&self) -> rawdoc_acquire::error::Result<DocumentId> {
        let n = self.0.get();
        self.0.set(n + 1);
        Ok(DocumentId::from_random_bytes([n; 16]))
    }
}

#[test]
fn test_injected_generator_names_files() {
    let base = spawn_server();
    let tmp = TempDir::new().unwrap();
    let acquirer = Acquirer::with_id_generator(CountingIds(Cell::new(0x11)));

    let meta = acquirer
        .acquire_url(&format!("{}/doc.pdf", base), tmp.path(), TIMEOUT)
        .unwrap();

    let id = "11111111-1111-4111-9111-111111111111";
    assert_eq!(meta, tmp.path().join(format!("{}.meta.json", id)));
    assert!(tmp.path().join(format!("{}.bin", id)).exists());
    assert_eq!(check_sidecar(&meta).document_id, id);
}

struct NoEntropy;

impl IdGenerator for NoEntropy {
    fn generate(&self) -> rawdoc_acquire::error::Result<DocumentId> {
        Err(AcquireError::Entropy(getrandom::Error::UNSUPPORTED))
    }
}

#[test]
fn test_entropy_failure_is_fatal_and_writes_nothing() {
    let base = spawn_server();
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("rawdocs");

    let err = Acquirer::with_id_generator(NoEntropy)
        .acquire_url(&format!("{}/page", base), &out, TIMEOUT)
        .unwrap_err();

    assert!(err.is_fatal());
    assert_eq!(err.category(), ErrorCategory::Fatal);
    assert!(!out.exists());
}
