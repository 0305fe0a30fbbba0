//! Integration tests for user and profile HTTP endpoints.
//!
//! Exercises the assembled router end to end against mock ports:
//! onboarding, profile edits, public profile pages, and image handling.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use wardrobe::adapters::auth::MockSessionValidator;
use wardrobe::adapters::http::{api_router, PostHandlers, UserHandlers};
use wardrobe::adapters::s3::InMemoryImageStore;
use wardrobe::application::handlers::post::{
    CreatePostHandler, DeletePostHandler, ListPostsHandler,
};
use wardrobe::application::handlers::user::{
    DeleteImageHandler, EditProfileHandler, GetMeHandler, GetProfileHandler,
    ProfileExistsHandler, SetImageHandler,
};
use wardrobe::application::ImageCleanup;
use wardrobe::domain::foundation::{AuthenticatedUser, DomainError, ImageId, PostId, UserId};
use wardrobe::domain::post::Post;
use wardrobe::domain::user::{PostCounts, ProfileUpdate, UserProfile};
use wardrobe::ports::{PostRepository, UserRepository};

// =============================================================================
// Test Infrastructure
// =============================================================================

/// Mock user repository for testing.
#[derive(Default)]
struct MockUserRepository {
    users: Mutex<Vec<UserProfile>>,
}

impl MockUserRepository {
    fn new() -> Self {
        Self::default()
    }

    fn with_user(self, user: UserProfile) -> Self {
        self.users.lock().unwrap().push(user);
        self
    }

    fn stored(&self, id: &str) -> Option<UserProfile> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id.as_str() == id)
            .cloned()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, DomainError> {
        Ok(self.stored(id.as_str()))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserProfile>, DomainError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn username_exists(&self, username: &str) -> Result<bool, DomainError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .any(|u| u.username == username))
    }

    async fn mark_onboarded(&self, id: &UserId) -> Result<(), DomainError> {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.id == *id) {
            user.onboarded = true;
        }
        Ok(())
    }

    async fn update_profile(
        &self,
        id: &UserId,
        update: &ProfileUpdate,
    ) -> Result<(), DomainError> {
        let mut users = self.users.lock().unwrap();

        if let Some(username) = &update.username {
            let taken = users
                .iter()
                .any(|u| u.id != *id && u.username == *username);
            if taken {
                return Err(DomainError::conflict("Email or username already exists"));
            }
        }

        let user = users
            .iter_mut()
            .find(|u| u.id == *id)
            .ok_or_else(|| DomainError::not_found("User not found"))?;
        if let Some(name) = &update.name {
            user.name = Some(name.clone());
        }
        if let Some(username) = &update.username {
            user.username = username.clone();
        }
        Ok(())
    }

    async fn set_image(&self, id: &UserId, image: &ImageId) -> Result<(), DomainError> {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.id == *id) {
            user.image = Some(image.clone());
        }
        Ok(())
    }

    async fn clear_image(&self, id: &UserId) -> Result<(), DomainError> {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.id == *id) {
            user.image = None;
        }
        Ok(())
    }
}

/// Minimal post repository; the user tests never route to it.
struct NoPostRepository;

#[async_trait]
impl PostRepository for NoPostRepository {
    async fn create(&self, _: &Post) -> Result<(), DomainError> {
        Ok(())
    }
    async fn find_owned(&self, _: &PostId, _: &UserId) -> Result<Option<Post>, DomainError> {
        Ok(None)
    }
    async fn delete(&self, _: &Post) -> Result<(), DomainError> {
        Ok(())
    }
    async fn list_recent(&self, _: &UserId, _: i64) -> Result<Vec<Post>, DomainError> {
        Ok(vec![])
    }
}

fn profile(id: &str, username: &str) -> UserProfile {
    UserProfile {
        id: UserId::new(id).unwrap(),
        name: Some(format!("User {}", id)),
        username: username.to_string(),
        email: format!("{}@example.com", id),
        email_verified: None,
        image: None,
        onboarded: false,
        counts: PostCounts::default(),
    }
}

fn test_app(users: Arc<MockUserRepository>, images: Arc<InMemoryImageStore>) -> axum::Router {
    let validator = Arc::new(MockSessionValidator::new().with_test_user("alice-token", "alice"));
    test_app_with_session(users, images, validator)
}

fn test_app_with_session(
    users: Arc<MockUserRepository>,
    images: Arc<InMemoryImageStore>,
    validator: Arc<MockSessionValidator>,
) -> axum::Router {
    let cleanup = ImageCleanup::new(images.clone());
    let posts: Arc<dyn PostRepository> = Arc::new(NoPostRepository);

    let post_handlers = PostHandlers::new(
        Arc::new(CreatePostHandler::new(posts.clone(), images.clone())),
        Arc::new(DeletePostHandler::new(posts.clone(), cleanup.clone())),
        Arc::new(ListPostsHandler::new(posts)),
    );

    let user_handlers = UserHandlers::new(
        Arc::new(GetMeHandler::new(users.clone())),
        Arc::new(EditProfileHandler::new(users.clone())),
        Arc::new(GetProfileHandler::new(users.clone())),
        Arc::new(ProfileExistsHandler::new(users.clone())),
        Arc::new(SetImageHandler::new(users.clone(), images, cleanup.clone())),
        Arc::new(DeleteImageHandler::new(users, cleanup)),
    );

    api_router(post_handlers, user_handlers, validator)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn authed(request: axum::http::request::Builder) -> axum::http::request::Builder {
    request.header(header::AUTHORIZATION, "Bearer alice-token")
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn get_me_returns_profile_and_marks_onboarded() {
    let users = Arc::new(MockUserRepository::new().with_user(profile("alice", "alice")));
    let app = test_app(users.clone(), Arc::new(InMemoryImageStore::new()));

    let request = authed(Request::builder().method("GET").uri("/api/me"))
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["id"], "alice");
    assert_eq!(body["username"], "alice");
    // First call reports the pre-update state while flipping the flag
    assert_eq!(body["onboarded"], false);
    assert!(users.stored("alice").unwrap().onboarded);

    let request = authed(Request::builder().method("GET").uri("/api/me"))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(body_json(response).await["onboarded"], true);
}

#[tokio::test]
async fn get_me_without_session_is_401() {
    let users = Arc::new(MockUserRepository::new().with_user(profile("alice", "alice")));
    let app = test_app(users.clone(), Arc::new(InMemoryImageStore::new()));

    let request = Request::builder()
        .method("GET")
        .uri("/api/me")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    // The onboarding flag was not touched
    assert!(!users.stored("alice").unwrap().onboarded);
}

#[tokio::test]
async fn edit_profile_updates_username() {
    let users = Arc::new(MockUserRepository::new().with_user(profile("alice", "alice")));
    let app = test_app(users.clone(), Arc::new(InMemoryImageStore::new()));

    let request = authed(Request::builder().method("PATCH").uri("/api/me"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({"username": "alice2"}).to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["username"], "alice2");
    assert_eq!(users.stored("alice").unwrap().username, "alice2");
}

#[tokio::test]
async fn edit_profile_rejects_reserved_short_and_api_usernames() {
    let users = Arc::new(MockUserRepository::new().with_user(profile("alice", "alice")));
    let app = test_app(users.clone(), Arc::new(InMemoryImageStore::new()));

    for bad in ["login", "settings", "onboarding", "ab", "api/x"] {
        let request = authed(Request::builder().method("PATCH").uri("/api/me"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({"username": bad}).to_string()))
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();

        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "expected 400 for username {:?}",
            bad
        );
    }

    assert_eq!(users.stored("alice").unwrap().username, "alice");
}

#[tokio::test]
async fn edit_profile_taken_username_is_409() {
    let users = Arc::new(
        MockUserRepository::new()
            .with_user(profile("alice", "alice"))
            .with_user(profile("bob", "bob")),
    );
    let app = test_app(users, Arc::new(InMemoryImageStore::new()));

    let request = authed(Request::builder().method("PATCH").uri("/api/me"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({"username": "bob"}).to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert!(body["message"].as_str().unwrap().contains("already exists"));
}

#[tokio::test]
async fn edit_profile_without_session_is_401_and_changes_nothing() {
    let users = Arc::new(MockUserRepository::new().with_user(profile("alice", "alice")));
    let app = test_app(users.clone(), Arc::new(InMemoryImageStore::new()));

    let request = Request::builder()
        .method("PATCH")
        .uri("/api/me")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({"username": "stolen"}).to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(users.stored("alice").unwrap().username, "alice");
}

#[tokio::test]
async fn get_profile_is_public_and_returns_counters() {
    let mut alice = profile("alice", "alice");
    alice.counts.shirt = 2;
    alice.counts.images = 2;
    alice.counts.likes = 9;
    let users = Arc::new(MockUserRepository::new().with_user(alice));
    let app = test_app(users, Arc::new(InMemoryImageStore::new()));

    let request = Request::builder()
        .method("GET")
        .uri("/api/profiles/alice")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["shirt_post_count"], 2);
    assert_eq!(body["image_count"], 2);
    assert_eq!(body["like_count"], 9);
    assert!(body.get("email").is_none());
}

#[tokio::test]
async fn get_profile_unknown_username_is_404() {
    let app = test_app(
        Arc::new(MockUserRepository::new()),
        Arc::new(InMemoryImageStore::new()),
    );

    let request = Request::builder()
        .method("GET")
        .uri("/api/profiles/nobody")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn profile_exists_reports_true_and_false() {
    let users = Arc::new(MockUserRepository::new().with_user(profile("alice", "alice")));
    let app = test_app(users, Arc::new(InMemoryImageStore::new()));

    let request = Request::builder()
        .method("GET")
        .uri("/api/profiles/alice/exists")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["exists"], true);

    let request = Request::builder()
        .method("GET")
        .uri("/api/profiles/free/exists")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["exists"], false);
}

#[tokio::test]
async fn set_image_returns_upload_url_and_updates_profile() {
    let users = Arc::new(MockUserRepository::new().with_user(profile("alice", "alice")));
    let images = Arc::new(InMemoryImageStore::new());
    let app = test_app(users.clone(), images.clone());

    let request = authed(Request::builder().method("PUT").uri("/api/me/image"))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let image = body["image"].as_str().unwrap();
    assert!(image.starts_with("alice-"));
    assert!(body["upload_url"].as_str().unwrap().contains(image));
    assert!(users.stored("alice").unwrap().image.is_some());
    assert_eq!(images.signed_keys().await.len(), 1);
}

#[tokio::test]
async fn delete_image_clears_profile_image() {
    let user_id = UserId::new("alice".to_string()).unwrap();
    let image = ImageId::derive(&user_id, 1_600_000_000_000);
    let mut alice = profile("alice", "alice");
    alice.image = Some(image.clone());
    let users = Arc::new(MockUserRepository::new().with_user(alice));
    let images = Arc::new(InMemoryImageStore::new());
    let session_user = AuthenticatedUser {
        id: user_id,
        email: "alice@example.com".to_string(),
        display_name: None,
        image: Some(image),
    };
    let validator = Arc::new(MockSessionValidator::new().with_user("alice-token", session_user));
    let app = test_app_with_session(users.clone(), images.clone(), validator);

    let request = authed(Request::builder().method("DELETE").uri("/api/me/image"))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(users.stored("alice").unwrap().image.is_none());

    // The old object is deleted on a background task
    for _ in 0..100 {
        if !images.deleted_keys().await.is_empty() {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }
    assert_eq!(images.deleted_keys().await.len(), 1);
}

#[tokio::test]
async fn image_routes_without_session_are_401_and_touch_nothing() {
    let users = Arc::new(MockUserRepository::new().with_user(profile("alice", "alice")));
    let images = Arc::new(InMemoryImageStore::new());
    let app = test_app(users.clone(), images.clone());

    for method in ["PUT", "DELETE"] {
        let request = Request::builder()
            .method(method)
            .uri("/api/me/image")
            .body(Body::empty())
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    assert!(images.signed_keys().await.is_empty());
    assert!(images.deleted_keys().await.is_empty());
}
