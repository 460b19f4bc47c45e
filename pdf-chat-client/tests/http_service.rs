//! Adapter tests against an in-process mock of the document service.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, post},
};
use dashmap::DashMap;
use pdf_chat_client::HttpDocumentService;
use pdf_chat_client::models::ChatRequest;
use serde_json::{Value, json};
use session_flow::{
    CandidateFile, DocumentService, PDF_MEDIA_TYPE, Phase, ServiceError, SessionController, Turn,
};
use uuid::Uuid;

#[derive(Clone, Default)]
struct MockState {
    // session_id -> summary
    sessions: Arc<DashMap<String, String>>,
}

async fn upload(
    State(state): State<MockState>,
    mut multipart: Multipart,
) -> (StatusCode, Json<Value>) {
    let mut bytes = Vec::new();
    while let Some(field) = multipart.next_field().await.unwrap_or(None) {
        if field.name() == Some("file") {
            bytes = field.bytes().await.unwrap_or_default().to_vec();
        }
    }

    if !bytes.starts_with(b"%PDF") {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Invalid PDF file. Please upload a valid PDF." })),
        );
    }

    let session_id = Uuid::new_v4().to_string();
    state
        .sessions
        .insert(session_id.clone(), "A report.".to_string());
    (
        StatusCode::OK,
        Json(json!({ "session_id": session_id, "summary": "A report." })),
    )
}

async fn chat(
    State(state): State<MockState>,
    Json(request): Json<ChatRequest>,
) -> (StatusCode, Json<Value>) {
    if !state.sessions.contains_key(&request.session_id) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Invalid session ID." })),
        );
    }
    (
        StatusCode::OK,
        Json(json!({ "response": format!("You asked: {}", request.message) })),
    )
}

async fn end(
    State(state): State<MockState>,
    Path(session_id): Path<String>,
) -> (StatusCode, Json<Value>) {
    state.sessions.remove(&session_id);
    (
        StatusCode::OK,
        Json(json!({ "message": "Chat session ended successfully." })),
    )
}

async fn spawn_mock() -> (String, MockState) {
    let state = MockState::default();
    let app = Router::new()
        .route("/pdf/upload", post(upload))
        .route("/pdf/chat/", post(chat))
        .route("/pdf/chat/end/{session_id}", delete(end))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock listener");
    let addr = listener.local_addr().expect("mock listener addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve mock");
    });

    (format!("http://{addr}"), state)
}

fn pdf_file() -> CandidateFile {
    CandidateFile::new("doc.pdf", PDF_MEDIA_TYPE, b"%PDF-1.4 test".to_vec())
}

#[tokio::test]
async fn upload_returns_receipt_and_opens_remote_session() {
    let (base_url, state) = spawn_mock().await;
    let service = HttpDocumentService::new(&base_url);

    let receipt = service.upload(&pdf_file()).await.expect("upload");

    assert_eq!(receipt.summary, "A report.");
    assert!(state.sessions.contains_key(&receipt.session_id));
}

#[tokio::test]
async fn upload_rejection_carries_the_server_error() {
    let (base_url, _state) = spawn_mock().await;
    let service = HttpDocumentService::new(&base_url);
    let bogus = CandidateFile::new("doc.pdf", PDF_MEDIA_TYPE, b"not a pdf".to_vec());

    let err = service.upload(&bogus).await.expect_err("must be rejected");

    match err {
        ServiceError::Rejected(message) => {
            assert_eq!(message, "Invalid PDF file. Please upload a valid PDF.");
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn converse_and_terminate_round_trip() {
    let (base_url, state) = spawn_mock().await;
    let service = HttpDocumentService::new(&base_url);

    let receipt = service.upload(&pdf_file()).await.expect("upload");
    let reply = service
        .converse(&receipt.session_id, "What is the conclusion?")
        .await
        .expect("converse");
    assert_eq!(reply, "You asked: What is the conclusion?");

    service
        .terminate(&receipt.session_id)
        .await
        .expect("terminate");
    assert!(state.sessions.is_empty());
}

#[tokio::test]
async fn converse_with_unknown_session_is_rejected() {
    let (base_url, _state) = spawn_mock().await;
    let service = HttpDocumentService::new(&base_url);

    let err = service
        .converse("no-such-session", "hello")
        .await
        .expect_err("must be rejected");

    match err {
        ServiceError::Rejected(message) => assert_eq!(message, "Invalid session ID."),
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn controller_runs_a_full_session_over_http() {
    let (base_url, state) = spawn_mock().await;
    let service = Arc::new(HttpDocumentService::new(&base_url));
    let mut controller = SessionController::new(service);

    controller.select_file(pdf_file());
    controller.upload().await;
    assert_eq!(controller.phase(), Phase::Active);
    assert_eq!(
        controller.transcript().turns(),
        &[Turn::bot("Summary: A report.")]
    );

    for n in 1..=2 {
        controller.set_draft(format!("question {n}"));
        controller.send_message().await;
        assert_eq!(controller.transcript().len(), 2 * n + 1);
    }
    assert_eq!(
        controller.transcript().last(),
        Some(&Turn::bot("You asked: question 2"))
    );

    controller.end_chat().await;
    assert_eq!(controller.phase(), Phase::Idle);
    assert!(controller.transcript().is_empty());
    assert!(state.sessions.is_empty());
}
