use std::sync::Arc;
use std::time::Duration;

use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use async_trait::async_trait;
use serde_json::{Value, json};

use inkwell_core::RepoError;
use inkwell_core::domain::{NewPost, Post};
use inkwell_core::ports::PostRepository;
use inkwell_infra::InMemoryPostRepository;

use crate::middleware::no_store::CACHE_CONTROL_NO_STORE;
use crate::state::AppState;

macro_rules! test_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .configure(super::configure_routes)
                .default_service(web::to(super::not_found)),
        )
        .await
    };
}

/// Repository whose every call fails with internal detail in the error.
struct FailingRepository;

#[async_trait]
impl PostRepository for FailingRepository {
    async fn list(&self) -> Result<Vec<Post>, RepoError> {
        Err(RepoError::Connection(
            "connection refused (10.0.0.5:5432)".to_string(),
        ))
    }

    async fn create(&self, _post: NewPost) -> Result<Post, RepoError> {
        Err(RepoError::Query(
            "null value in column \"secret_column\"".to_string(),
        ))
    }
}

/// Repository that never answers within the request timeout.
struct StalledRepository;

#[async_trait]
impl PostRepository for StalledRepository {
    async fn list(&self) -> Result<Vec<Post>, RepoError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(Vec::new())
    }

    async fn create(&self, _post: NewPost) -> Result<Post, RepoError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Err(RepoError::Query("unreachable".to_string()))
    }
}

fn memory_state() -> (AppState, Arc<InMemoryPostRepository>) {
    let repo = Arc::new(InMemoryPostRepository::new());
    let state = AppState::with_repository(repo.clone(), Duration::from_secs(5));
    (state, repo)
}

fn assert_no_store<B>(resp: &actix_web::dev::ServiceResponse<B>) {
    let headers = resp.headers();
    assert_eq!(headers.get(header::CACHE_CONTROL).unwrap(), CACHE_CONTROL_NO_STORE);
    assert_eq!(headers.get(header::PRAGMA).unwrap(), "no-cache");
    assert_eq!(headers.get(header::EXPIRES).unwrap(), "0");
}

fn create_request(body: Value) -> test::TestRequest {
    test::TestRequest::post().uri("/api/posts").set_json(body)
}

#[actix_web::test]
async fn test_list_posts_empty() {
    let (state, _) = memory_state();
    let app = test_app!(state);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/posts").to_request()).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_no_store(&resp);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!([]));
}

#[actix_web::test]
async fn test_create_post() {
    let (state, _) = memory_state();
    let app = test_app!(state);

    let req = create_request(json!({"title": "A", "content": "hello\n\nsecond paragraph"}));
    let resp = test::call_service(&app, req.to_request()).await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_no_store(&resp);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["title"], "A");
    assert_eq!(body["content"], "hello\n\nsecond paragraph");
    assert!(body["id"].is_i64());
    assert!(body["created_at"].is_string());
    assert!(body["updated_at"].is_string());
}

#[actix_web::test]
async fn test_create_post_trims_input() {
    let (state, _) = memory_state();
    let app = test_app!(state);

    let req = create_request(json!({"title": "  Spaced  ", "content": "\n body \n"}));
    let post: Post = test::call_and_read_body_json(&app, req.to_request()).await;

    assert_eq!(post.title, "Spaced");
    assert_eq!(post.content, "body");
}

#[actix_web::test]
async fn test_create_post_rejects_invalid_input() {
    let (state, repo) = memory_state();
    let app = test_app!(state);

    let bodies = [
        json!({}),
        json!({"title": "A"}),
        json!({"content": "hello"}),
        json!({"title": "", "content": "hello"}),
        json!({"title": "A", "content": ""}),
        json!({"title": "   ", "content": "hello"}),
        json!({"title": "A", "content": "\n\t"}),
        json!({"title": null, "content": "hello"}),
        json!({"title": 5, "content": "hello"}),
        json!("A: hello"),
    ];

    for body in bodies {
        let resp = test::call_service(&app, create_request(body.clone()).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "body: {body}");
        assert_no_store(&resp);
        let error: Value = test::read_body_json(resp).await;
        assert_eq!(error, json!({"error": "Title and content are required"}));
    }

    assert!(repo.is_empty().await);
    let posts: Vec<Post> = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/api/posts").to_request(),
    )
    .await;
    assert!(posts.is_empty());
}

#[actix_web::test]
async fn test_create_post_rejects_malformed_json() {
    let (state, repo) = memory_state();
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(header::ContentType::json())
        .set_payload("{\"title\": \"A\", ");
    let resp = test::call_service(&app, req.to_request()).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(repo.is_empty().await);
}

#[actix_web::test]
async fn test_validation_runs_before_database() {
    let state = AppState::with_repository(Arc::new(FailingRepository), Duration::from_secs(5));
    let app = test_app!(state);

    let resp = test::call_service(&app, create_request(json!({"title": "A"})).to_request()).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_identical_posts_get_distinct_ids() {
    let (state, _) = memory_state();
    let app = test_app!(state);

    let body = json!({"title": "Same", "content": "same"});
    let first: Post = test::call_and_read_body_json(&app, create_request(body.clone()).to_request()).await;
    let second: Post = test::call_and_read_body_json(&app, create_request(body).to_request()).await;

    assert_ne!(first.id, second.id);

    let posts: Vec<Post> = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/api/posts").to_request(),
    )
    .await;
    assert_eq!(posts.len(), 2);
}

#[actix_web::test]
async fn test_list_posts_newest_first() {
    let (state, _) = memory_state();
    let app = test_app!(state);

    let a: Post = test::call_and_read_body_json(
        &app,
        create_request(json!({"title": "A", "content": "hello"})).to_request(),
    )
    .await;
    let b: Post = test::call_and_read_body_json(
        &app,
        create_request(json!({"title": "B", "content": "world"})).to_request(),
    )
    .await;

    let posts: Vec<Post> = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/api/posts").to_request(),
    )
    .await;

    assert_eq!(posts, vec![b, a]);
    assert!(posts.windows(2).all(|w| w[0].created_at >= w[1].created_at));
}

#[actix_web::test]
async fn test_list_failure_is_generic() {
    let state = AppState::with_repository(Arc::new(FailingRepository), Duration::from_secs(5));
    let app = test_app!(state);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/posts").to_request()).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_no_store(&resp);
    let body = test::read_body(resp).await;
    assert_eq!(&body[..], br#"{"error":"Failed to fetch posts"}"#);
}

#[actix_web::test]
async fn test_create_failure_is_generic() {
    let state = AppState::with_repository(Arc::new(FailingRepository), Duration::from_secs(5));
    let app = test_app!(state);

    let req = create_request(json!({"title": "A", "content": "hello"}));
    let resp = test::call_service(&app, req.to_request()).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = test::read_body(resp).await;
    let text = std::str::from_utf8(&body).unwrap();
    assert_eq!(text, r#"{"error":"Failed to create post"}"#);
    assert!(!text.contains("secret_column"));
}

#[actix_web::test]
async fn test_stalled_database_times_out() {
    let state = AppState::with_repository(Arc::new(StalledRepository), Duration::from_millis(50));
    let app = test_app!(state);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/posts").to_request()).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"error": "Failed to fetch posts"}));

    let req = create_request(json!({"title": "A", "content": "hello"}));
    let resp = test::call_service(&app, req.to_request()).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"error": "Failed to create post"}));
}

#[actix_web::test]
async fn test_unknown_route() {
    let (state, _) = memory_state();
    let app = test_app!(state);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/drafts").to_request()).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"error": "Not found"}));
}

#[actix_web::test]
async fn test_health_check() {
    let (state, _) = memory_state();
    let app = test_app!(state);

    let body: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/api/health").to_request(),
    )
    .await;

    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "unconfigured");
}
