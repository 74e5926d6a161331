//! Integration tests for the session context.
//!
//! These tests cover company scoping, sentinel values left by other writers
//! and persistence through the file store.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::http::Method;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use workpro_client::{
    CompanyScoped, FileStore, MemoryStore, NewDepartment, NewTask, SessionContext, SessionStore,
};
use workpro_core::{CompanyId, CompanyRole, Email, SessionKey};
use workpro_integration_tests::{MockBackend, profile_json, temp_session_path};

// =============================================================================
// Company Scoping Tests
// =============================================================================

#[tokio::test]
async fn test_no_company_means_onboarding_without_requests() {
    let backend = MockBackend::start().await;
    let client = backend.client();

    assert_eq!(client.list_tasks().await.unwrap(), CompanyScoped::NoCompany);
    assert_eq!(client.my_tasks().await.unwrap(), CompanyScoped::NoCompany);
    assert_eq!(
        client.list_departments().await.unwrap(),
        CompanyScoped::NoCompany
    );

    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn test_sentinel_company_ids_are_absent() {
    for sentinel in ["null", "undefined", "", "  "] {
        let backend = MockBackend::start().await;
        let store = Arc::new(MemoryStore::new());
        store.set(SessionKey::CompanyId, sentinel).unwrap();
        store.set(SessionKey::CompanyRole, "owner").unwrap();
        let session = SessionContext::from_shared(store);
        let client = backend.client_with(session.clone());

        assert_eq!(session.company().unwrap(), None, "sentinel {sentinel:?}");
        assert_eq!(client.list_tasks().await.unwrap(), CompanyScoped::NoCompany);
        assert!(backend.requests().is_empty(), "sentinel {sentinel:?}");
    }
}

#[tokio::test]
async fn test_mutations_without_company_send_nothing() {
    let backend = MockBackend::start().await;
    let client = backend.client();

    let task = NewTask {
        title: "Task A".to_owned(),
        ..NewTask::default()
    };
    assert!(client.create_task(&task).await.is_err());

    let department = NewDepartment {
        name: "Ops".to_owned(),
        description: None,
    };
    assert!(client.create_department(&department).await.is_err());

    let email = Email::parse("new@example.com").unwrap();
    assert!(
        client
            .send_invitation(&email, CompanyRole::Employee)
            .await
            .is_err()
    );

    assert!(backend.requests().is_empty());
}

// =============================================================================
// Persistence Tests
// =============================================================================

#[tokio::test]
async fn test_login_persists_across_clients() {
    let backend = MockBackend::start().await;
    backend.respond(
        Method::POST,
        "/api/auth/login",
        200,
        json!({ "token": "abc123", "user": profile_json("u1", "jane@example.com") }),
    );
    backend.respond(Method::GET, "/api/pricing", 200, json!([]));

    let path = temp_session_path();
    let first = backend.client_with(SessionContext::new(FileStore::new(path.clone())));
    let email = Email::parse("jane@example.com").unwrap();
    first
        .login(&email, &SecretString::from("hunter2".to_owned()))
        .await
        .unwrap();
    first
        .select_company(&CompanyId::new("c1"), CompanyRole::Manager)
        .unwrap();

    // A second process reading the same file sees the same session.
    let session = SessionContext::new(FileStore::new(path.clone()));
    assert_eq!(
        session.token().unwrap().unwrap().expose_secret(),
        "abc123"
    );
    assert_eq!(session.user_id().unwrap().unwrap().as_str(), "u1");
    let company = session.company().unwrap().unwrap();
    assert_eq!(company.id.as_str(), "c1");
    assert_eq!(company.role, Some(CompanyRole::Manager));

    let second = backend.client_with(session);
    second.list_pricing_plans().await.unwrap();
    let requests = backend.requests();
    let last = requests.last().unwrap();
    assert_eq!(last.header("authorization"), Some("Bearer abc123"));

    let login = requests.first().unwrap();
    assert_eq!(
        login.json(),
        json!({ "email": "jane@example.com", "password": "hunter2" })
    );
    // Login itself is sent without a token.
    assert_eq!(login.header("authorization"), None);

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[tokio::test]
async fn test_logout_clears_file_session() {
    let path = temp_session_path();
    let backend = MockBackend::start().await;
    backend.respond(
        Method::POST,
        "/api/auth/login",
        200,
        json!({ "token": "abc123", "user": profile_json("u1", "jane@example.com") }),
    );

    let client = backend.client_with(SessionContext::new(FileStore::new(path.clone())));
    client
        .login(
            &Email::parse("jane@example.com").unwrap(),
            &SecretString::from("hunter2".to_owned()),
        )
        .await
        .unwrap();
    client.logout().unwrap();

    let session = SessionContext::new(FileStore::new(path.clone()));
    assert!(session.token().unwrap().is_none());
    assert!(session.user_profile().unwrap().is_none());
    assert!(session.company().unwrap().is_none());

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[tokio::test]
async fn test_rejected_login_leaves_session_untouched() {
    let backend = MockBackend::start().await;
    backend.respond(
        Method::POST,
        "/api/auth/login",
        401,
        json!({ "message": "Invalid credentials" }),
    );

    let session = SessionContext::in_memory();
    session
        .set_company(&CompanyId::new("c1"), CompanyRole::Owner)
        .unwrap();
    let client = backend.client_with(session.clone());

    let err = client
        .login(
            &Email::parse("jane@example.com").unwrap(),
            &SecretString::from("wrong".to_owned()),
        )
        .await
        .unwrap_err();

    assert_eq!(err.user_message("Login failed"), "Invalid credentials");
    assert!(session.token().unwrap().is_none());
    assert_eq!(session.company_id().unwrap(), Some(CompanyId::new("c1")));
}
