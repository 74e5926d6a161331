//! Integration tests for multi-step flows.
//!
//! These tests drive the typed endpoints the way the CLI does: sign up,
//! create or join a company, then work with its tasks.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::http::Method;
use secrecy::SecretString;
use serde_json::json;
use workpro_client::{CompanyScoped, FetchGuard, SessionContext, TaskBoard, TaskStatus};
use workpro_core::{CompanyId, CompanyRole, Email, TaskId};
use workpro_integration_tests::{MockBackend, profile_json};

fn tasks_json() -> serde_json::Value {
    json!([
        { "_id": "t1", "title": "Mine", "status": "todo", "assignedTo": ["u1"] },
        { "_id": "t2", "title": "Theirs", "status": "in-progress", "assignedTo": ["u2"] },
        { "_id": "t3", "title": "Shared", "status": "done", "assignedTo": ["u2", "u1"] },
    ])
}

// =============================================================================
// Onboarding Tests
// =============================================================================

#[tokio::test]
async fn test_signup_then_create_company_selects_it_as_owner() {
    let backend = MockBackend::start().await;
    backend.respond(
        Method::POST,
        "/api/auth/signup",
        201,
        json!({ "token": "tok-1", "user": profile_json("u1", "jane@example.com") }),
    );
    backend.respond(
        Method::POST,
        "/api/companies",
        201,
        json!({ "_id": "c1", "name": "Acme" }),
    );

    let session = SessionContext::in_memory();
    let client = backend.client_with(session.clone());

    let email = Email::parse("jane@example.com").unwrap();
    let profile = client
        .signup("Jane Doe", &email, &SecretString::from("hunter2".to_owned()))
        .await
        .unwrap();
    assert_eq!(profile.id.as_str(), "u1");
    assert!(session.company().unwrap().is_none());

    let company = client.create_company("Acme").await.unwrap();
    assert_eq!(company.name, "Acme");

    let selected = session.company().unwrap().unwrap();
    assert_eq!(selected.id, CompanyId::new("c1"));
    assert_eq!(selected.role, Some(CompanyRole::Owner));
    assert!(selected.can_manage());

    let requests = backend.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(
        requests[0].json(),
        json!({ "name": "Jane Doe", "email": "jane@example.com", "password": "hunter2" })
    );
    assert_eq!(requests[1].header("authorization"), Some("Bearer tok-1"));
    assert_eq!(requests[1].json(), json!({ "name": "Acme" }));
}

#[tokio::test]
async fn test_accepting_invitation_selects_company_with_granted_role() {
    let backend = MockBackend::start().await;
    backend.respond(
        Method::POST,
        "/api/invitations/inv%2F42/accept",
        200,
        json!({ "company": { "_id": "c9", "name": "Globex" }, "role": "employee" }),
    );

    let session = SessionContext::in_memory();
    let client = backend.client_with(session.clone());

    let acceptance = client.accept_invitation("inv/42").await.unwrap();

    assert_eq!(acceptance.company.name, "Globex");
    let selected = session.company().unwrap().unwrap();
    assert_eq!(selected.id.as_str(), "c9");
    assert_eq!(selected.role, Some(CompanyRole::Employee));
    assert!(!selected.can_manage());
}

// =============================================================================
// Task Tests
// =============================================================================

async fn backend_with_company() -> (MockBackend, SessionContext) {
    let backend = MockBackend::start().await;
    backend.respond(
        Method::POST,
        "/api/auth/login",
        200,
        json!({ "token": "tok-1", "user": profile_json("u1", "jane@example.com") }),
    );
    backend.respond(Method::GET, "/api/tasks", 200, tasks_json());

    let session = SessionContext::in_memory();
    let client = backend.client_with(session.clone());
    client
        .login(
            &Email::parse("jane@example.com").unwrap(),
            &SecretString::from("hunter2".to_owned()),
        )
        .await
        .unwrap();
    client
        .select_company(&CompanyId::new("c1"), CompanyRole::Manager)
        .unwrap();
    (backend, session)
}

#[tokio::test]
async fn test_my_tasks_keeps_only_assigned() {
    let (backend, session) = backend_with_company().await;
    let client = backend.client_with(session);

    let mine = client.my_tasks().await.unwrap().ready().unwrap();

    let ids: Vec<&str> = mine.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["t1", "t3"]);
}

#[tokio::test]
async fn test_board_groups_loaded_tasks() {
    let (backend, session) = backend_with_company().await;
    let client = backend.client_with(session);

    let CompanyScoped::Ready(tasks) = client.list_tasks().await.unwrap() else {
        panic!("company is selected");
    };
    let board = TaskBoard::from_tasks(tasks);

    assert_eq!(board.len(), 3);
    assert_eq!(board.column(TaskStatus::Todo)[0].title, "Mine");
    assert_eq!(board.column(TaskStatus::InProgress)[0].title, "Theirs");
    assert!(board.column(TaskStatus::Review).is_empty());
    assert_eq!(board.column(TaskStatus::Done)[0].title, "Shared");
}

#[tokio::test]
async fn test_status_update_and_delete_hit_task_paths() {
    let (backend, session) = backend_with_company().await;
    backend.respond(
        Method::PATCH,
        "/api/tasks/t1",
        200,
        json!({ "_id": "t1", "title": "Mine", "status": "review" }),
    );
    backend.respond(Method::DELETE, "/api/tasks/t1", 200, json!({ "message": "Deleted" }));
    let client = backend.client_with(session);

    let updated = client
        .update_task_status(&TaskId::new("t1"), TaskStatus::Review)
        .await
        .unwrap();
    assert_eq!(updated.status, TaskStatus::Review);
    client.delete_task(&TaskId::new("t1")).await.unwrap();

    let requests = backend.requests();
    let patch = &requests[requests.len() - 2];
    assert_eq!(patch.method, Method::PATCH);
    assert_eq!(patch.json(), json!({ "status": "review" }));
    let delete = requests.last().unwrap();
    assert_eq!(delete.method, Method::DELETE);
    assert_eq!(delete.path, "/api/tasks/t1");
}

#[tokio::test]
async fn test_superseded_fetch_is_dropped() {
    let (backend, session) = backend_with_company().await;
    let client = backend.client_with(session);
    let guard = FetchGuard::new();

    // Both start before either response arrives; only the newer one counts.
    let (older, newer) = tokio::join!(
        guard.run(client.list_tasks()),
        guard.run(client.list_tasks()),
    );

    assert!(older.is_none());
    let newer = newer.unwrap().unwrap().ready().unwrap();
    assert_eq!(newer.len(), 3);
}

// =============================================================================
// Admin Console Tests
// =============================================================================

#[tokio::test]
async fn test_admin_console_renders_sections_that_loaded() {
    let backend = MockBackend::start().await;
    backend.respond(
        Method::GET,
        "/api/admin/analytics",
        500,
        json!({ "message": "Analytics offline" }),
    );
    backend.respond(
        Method::GET,
        "/api/admin/companies",
        200,
        json!([{ "_id": "c1", "name": "Acme" }, { "_id": "c2", "name": "Globex" }]),
    );
    backend.respond(
        Method::GET,
        "/api/pricing",
        200,
        json!([{ "_id": "p1", "name": "Team", "price": "19.99" }]),
    );

    let console = backend.client().load_admin_console().await;

    assert!(console.analytics.is_none());
    assert_eq!(console.companies.len(), 2);
    assert_eq!(console.plans.len(), 1);
    assert_eq!(console.plans[0].price_label(), "$19.99/month");
    assert_eq!(backend.requests().len(), 3);
}

#[tokio::test]
async fn test_super_admin_routing_uses_configured_email() {
    let session = SessionContext::in_memory();
    let admin = Email::parse("root@workpro.example").unwrap();
    let profile = serde_json::from_value(profile_json("u0", "Root@WorkPro.example")).unwrap();
    session
        .sign_in(&SecretString::from("tok".to_owned()), &profile)
        .unwrap();

    assert!(session.is_super_admin(Some(&admin)));
    assert!(!session.is_super_admin(None));

    let other = Email::parse("someone@workpro.example").unwrap();
    assert!(!session.is_super_admin(Some(&other)));
}
