//! HTTP client and widget against a throwaway comment service

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use commentbox_core::page::ids;
use commentbox_core::{
    CommentService, CommentWidget, Document, FeedbackState, HttpCommentService, NewComment,
    ServiceError, WidgetConfig, WidgetError,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

#[derive(Clone, Default)]
struct Stub {
    comments: Arc<Mutex<Vec<Value>>>,
    reject: Option<(StatusCode, String)>,
}

impl Stub {
    fn seeded(comments: Value) -> Self {
        let Value::Array(items) = comments else {
            panic!("seed must be an array");
        };
        Self {
            comments: Arc::new(Mutex::new(items)),
            reject: None,
        }
    }

    fn rejecting(status: StatusCode, body: &str) -> Self {
        Self {
            reject: Some((status, body.to_string())),
            ..Self::default()
        }
    }
}

async fn list_comments(State(stub): State<Stub>) -> Response {
    if let Some((status, body)) = &stub.reject {
        return (*status, body.clone()).into_response();
    }
    let comments = stub.comments.lock().unwrap().clone();
    Json(Value::Array(comments)).into_response()
}

async fn create_comment(State(stub): State<Stub>, Json(mut body): Json<Value>) -> Response {
    if let Some((status, text)) = &stub.reject {
        return (*status, text.clone()).into_response();
    }
    let mut comments = stub.comments.lock().unwrap();
    body["id"] = json!(comments.len() + 1);
    comments.push(body.clone());
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn spawn_stub(stub: Stub) -> String {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let app = Router::new()
        .route("/comments", get(list_comments).post(create_comment))
        .with_state(stub);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn test_list_preserves_service_order() {
    let stub = Stub::seeded(json!([
        {"name": "A", "message": "hi"},
        {"name": "B", "message": "yo"}
    ]));
    let base = spawn_stub(stub).await;
    let service = HttpCommentService::new(base).unwrap();

    let comments = service.list().await.unwrap();
    let pairs: Vec<_> = comments
        .iter()
        .map(|c| (c.name.as_str(), c.message.as_str()))
        .collect();
    assert_eq!(pairs, vec![("A", "hi"), ("B", "yo")]);
}

#[tokio::test]
async fn test_create_posts_name_and_message() {
    let stub = Stub::default();
    let base = spawn_stub(stub.clone()).await;
    let service = HttpCommentService::new(format!("{base}/")).unwrap();

    let new_comment = NewComment::validate(" Ada ", "hello").unwrap();
    let created = service.create(&new_comment).await.unwrap();

    assert_eq!(created.name, "Ada");
    assert_eq!(created.extra.get("id"), Some(&json!(1)));

    let stored = stub.comments.lock().unwrap().clone();
    assert_eq!(stored, vec![json!({"name": "Ada", "message": "hello", "id": 1})]);
}

#[tokio::test]
async fn test_error_status_carries_service_message() {
    let stub = Stub::rejecting(StatusCode::UNPROCESSABLE_ENTITY, r#"{"message": "Message too long"}"#);
    let base = spawn_stub(stub).await;
    let service = HttpCommentService::new(base).unwrap();

    let err = service
        .create(&NewComment::validate("A", "b").unwrap())
        .await
        .unwrap_err();
    match err {
        ServiceError::Status { status, message } => {
            assert_eq!(status, 422);
            assert_eq!(message.as_deref(), Some("Message too long"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_error_status_without_json_body() {
    let stub = Stub::rejecting(StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded");
    let base = spawn_stub(stub).await;
    let service = HttpCommentService::new(base).unwrap();

    let err = service.list().await.unwrap_err();
    assert!(matches!(err, ServiceError::Status { status: 500, message: None }));
}

#[tokio::test]
async fn test_success_with_unexpected_body_is_decode_error() {
    let stub = Stub::rejecting(StatusCode::OK, "<html>not json</html>");
    let base = spawn_stub(stub).await;
    let service = HttpCommentService::new(base).unwrap();

    let err = service.list().await.unwrap_err();
    assert!(matches!(err, ServiceError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_service_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let service = HttpCommentService::new(format!("http://{addr}")).unwrap();
    let err = service.list().await.unwrap_err();
    assert!(matches!(err, ServiceError::Transport(_)));
}

#[tokio::test]
async fn test_widget_round_trip_over_http() {
    let stub = Stub::seeded(json!([{"name": "A", "message": "hi"}]));
    let base = spawn_stub(stub).await;
    let service = HttpCommentService::new(base).unwrap();
    let widget = CommentWidget::new(service, Document::comment_page(800.0), &WidgetConfig::default());

    assert_eq!(widget.mount().await.unwrap().len(), 1);
    widget.submit_comment("B", "yo").await.unwrap();

    let items = widget.with_document(|doc| {
        let list = doc.get_element_by_id(ids::COMMENTS_LIST).unwrap();
        doc.children(list)
            .iter()
            .map(|li| doc.text_content(*li))
            .collect::<Vec<_>>()
    });
    assert_eq!(items, vec!["A hi", "B yo"]);
    assert!(matches!(widget.feedback(), FeedbackState::Success(_)));
}

#[tokio::test]
async fn test_widget_surfaces_http_failure() {
    let stub = Stub::rejecting(StatusCode::BAD_REQUEST, r#"{"message": "Spam detected"}"#);
    let base = spawn_stub(stub).await;
    let service = HttpCommentService::new(base).unwrap();
    let widget = CommentWidget::new(service, Document::comment_page(800.0), &WidgetConfig::default());

    let err = widget.submit_comment("B", "buy now").await.unwrap_err();
    assert!(matches!(err, WidgetError::Service(_)));
    assert_eq!(widget.feedback(), FeedbackState::Error("Spam detected".into()));
}
