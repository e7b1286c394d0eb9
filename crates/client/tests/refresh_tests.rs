//! Integration tests for the 401 refresh-and-retry flow

use std::sync::{Arc, Mutex};

use fitdesk_client::{ApiClient, ApiError};
use fitdesk_core::{LoginView, MemorySessionStore, Session, SessionEvent, SessionStore, UserRole};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn session_with_role(role: UserRole) -> Session {
    Session {
        access_token: "abc".into(),
        refresh_token: "rtk".into(),
        user_id: 1,
        username: "jo".into(),
        display_name: "Jo Smith".into(),
        role,
        member_id: None,
    }
}

fn client_for(base_url: &str, store: Arc<MemorySessionStore>) -> ApiClient {
    ApiClient::builder()
        .base_url(base_url)
        .store(store)
        .build()
        .unwrap()
}

fn collect_events(client: &ApiClient) -> Arc<Mutex<Vec<SessionEvent>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    client.events().subscribe(move |event| sink.lock().unwrap().push(*event));
    seen
}

#[tokio::test]
async fn first_401_refreshes_once_and_retries_with_the_new_token() {
    let mock_server = MockServer::start().await;

    // The stale token is rejected...
    Mock::given(method("GET"))
        .and(path("/members/42/"))
        .and(header("authorization", "Bearer abc"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Given token not valid for any token type"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    // ...the refresh token is exchanged exactly once...
    Mock::given(method("POST"))
        .and(path("/token/refresh/"))
        .and(body_json(json!({"refresh": "rtk"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "xyz"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    // ...and the retry carries the fresh token.
    Mock::given(method("GET"))
        .and(path("/members/42/"))
        .and(header("authorization", "Bearer xyz"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 42})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = Arc::new(MemorySessionStore::with_session(session_with_role(
        UserRole::Member,
    )));
    let client = client_for(&mock_server.uri(), Arc::clone(&store));
    let events = collect_events(&client);

    let member = client.get_member(42).await.unwrap();
    assert_eq!(member["id"], 42);

    // The new access token was stored; everything else is untouched.
    let session = store.load().unwrap();
    assert_eq!(session.access_token, "xyz");
    assert_eq!(session.refresh_token, "rtk");
    assert_eq!(session.username, "jo");

    assert!(events.lock().unwrap().is_empty());
}

#[tokio::test]
async fn a_second_401_is_never_refreshed_again() {
    let mock_server = MockServer::start().await;

    // Both the original request and its retry are rejected.
    Mock::given(method("GET"))
        .and(path("/members/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Given token not valid for any token type"
        })))
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/token/refresh/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "fresh"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = Arc::new(MemorySessionStore::with_session(session_with_role(
        UserRole::Member,
    )));
    let client = client_for(&mock_server.uri(), Arc::clone(&store));

    let err = client.list_members().await.unwrap_err();
    assert_eq!(err.status(), Some(401));

    // The refresh itself succeeded, so the session survives with the token
    // the backend handed out; the caller just sees the rejection.
    assert_eq!(store.load().unwrap().access_token, "fresh");
}

#[tokio::test]
async fn a_401_with_no_refresh_token_skips_the_refresh_endpoint() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/members/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Authentication credentials were not provided."
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/token/refresh/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let store = Arc::new(MemorySessionStore::new());
    let client = client_for(&mock_server.uri(), Arc::clone(&store));
    let events = collect_events(&client);

    let err = client.list_members().await.unwrap_err();
    assert!(matches!(err, ApiError::AuthExpired));
    assert!(err.is_auth_expired());

    assert_eq!(store.load(), None);
    assert_eq!(
        *events.lock().unwrap(),
        vec![SessionEvent::Expired {
            login: LoginView::Default
        }]
    );
}

#[tokio::test]
async fn a_rejected_refresh_clears_the_session_and_signals_expiry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/attendance/history/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Given token not valid for any token type"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/token/refresh/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Token is invalid or expired",
            "code": "token_not_valid"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = Arc::new(MemorySessionStore::with_session(session_with_role(
        UserRole::Member,
    )));
    let client = client_for(&mock_server.uri(), Arc::clone(&store));
    let events = collect_events(&client);

    let err = client.attendance_history().await.unwrap_err();
    assert!(matches!(err, ApiError::AuthExpired));

    assert_eq!(store.load(), None);
    assert_eq!(
        *events.lock().unwrap(),
        vec![SessionEvent::Expired {
            login: LoginView::Default
        }]
    );
}

#[tokio::test]
async fn a_deleted_account_clears_the_session_and_picks_the_role_login_view() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/members/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Given token not valid for any token type"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/token/refresh/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "User not found",
            "code": "user_not_found"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    // An admin session: the shell should be pointed at the admin login view.
    let store = Arc::new(MemorySessionStore::with_session(session_with_role(
        UserRole::Admin,
    )));
    let client = client_for(&mock_server.uri(), Arc::clone(&store));
    let events = collect_events(&client);

    let err = client.list_members().await.unwrap_err();
    assert!(matches!(err, ApiError::AccountDeleted));
    assert!(err.is_auth_expired());

    assert_eq!(store.load(), None);
    assert_eq!(
        *events.lock().unwrap(),
        vec![SessionEvent::AccountDeleted {
            login: LoginView::Admin
        }]
    );
}

#[tokio::test]
async fn a_transient_refresh_failure_keeps_the_session_intact() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/members/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Given token not valid for any token type"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/token/refresh/"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = Arc::new(MemorySessionStore::with_session(session_with_role(
        UserRole::Member,
    )));
    let client = client_for(&mock_server.uri(), Arc::clone(&store));
    let events = collect_events(&client);

    let err = client.list_members().await.unwrap_err();
    assert_eq!(err.status(), Some(503));
    assert!(!err.is_auth_expired());

    // No forced logout on a flaky refresh endpoint.
    assert_eq!(store.load(), Some(session_with_role(UserRole::Member)));
    assert!(events.lock().unwrap().is_empty());
}

#[tokio::test]
async fn concurrent_401s_each_refresh_independently() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/members/"))
        .and(header("authorization", "Bearer abc"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Given token not valid for any token type"
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/token/refresh/"))
        .and(body_json(json!({"refresh": "rtk"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "xyz"})))
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/members/"))
        .and(header("authorization", "Bearer xyz"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let store = Arc::new(MemorySessionStore::with_session(session_with_role(
        UserRole::Member,
    )));
    let client = client_for(&mock_server.uri(), Arc::clone(&store));

    // Two requests race on the same stale token; each runs its own refresh
    // cycle (there is no shared in-flight deduplication) and both succeed.
    let (first, second) = tokio::join!(client.list_members(), client.list_members());
    first.unwrap();
    second.unwrap();

    assert_eq!(store.load().unwrap().access_token, "xyz");
}
