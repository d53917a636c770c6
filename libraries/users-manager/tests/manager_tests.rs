//! Behaviour tests for the user manager
//!
//! Runs against an in-memory service so every scenario is deterministic.

mod common;

use common::{FakeService, Op};
use users_client::{User, UserId};
use users_manager::notify::*;
use users_manager::{FormMode, FormState, ManagerError, NotificationKind, UserManager};

fn messages(notifications: &mut users_manager::Notifications) -> Vec<String> {
    notifications.drain().into_iter().map(|n| n.message).collect()
}

// ===== Refresh =====

#[tokio::test]
async fn test_refresh_twice_yields_identical_collection() {
    let (manager, mut notifications) = UserManager::new(FakeService::seeded(3));

    manager.refresh_all().await.unwrap();
    let first = manager.users().await;
    manager.refresh_all().await.unwrap();
    let second = manager.users().await;

    assert_eq!(first.len(), 3);
    assert_eq!(first, second);
    assert!(notifications.drain().is_empty());
}

#[tokio::test]
async fn test_refresh_keeps_server_order() {
    let service = FakeService::with_users(vec![
        User::new(9_u64, "Zed", "z@x.com"),
        User::new(1_u64, "Ann", "a@x.com"),
    ]);
    let (manager, _notifications) = UserManager::new(service);

    manager.refresh_all().await.unwrap();

    let names: Vec<String> = manager.users().await.into_iter().map(|u| u.name).collect();
    assert_eq!(names, vec!["Zed", "Ann"]);
}

#[tokio::test]
async fn test_failed_refresh_keeps_stale_collection() {
    let (manager, mut notifications) = UserManager::new(FakeService::seeded(2));
    manager.refresh_all().await.unwrap();
    let before = manager.users().await;

    manager.api().fail(Op::List);
    let result = manager.refresh_all().await;

    assert!(matches!(result, Err(ManagerError::RequestFailed(_))));
    assert_eq!(manager.users().await, before);
    assert_eq!(messages(&mut notifications), vec![FETCH_FAILED]);
}

#[tokio::test]
async fn test_initialize_loads_collection() {
    let (manager, _notifications) = UserManager::new(FakeService::seeded(4));

    manager.initialize().await.unwrap();
    manager.initialize().await.unwrap();

    assert_eq!(manager.users().await.len(), 4);
    assert_eq!(manager.api().list_calls(), 1);
}

// ===== Create =====

#[tokio::test]
async fn test_create_then_list_adds_exactly_one() {
    let (manager, mut notifications) = UserManager::new(FakeService::seeded(2));
    manager.refresh_all().await.unwrap();

    manager.set_name("Ann").await;
    manager.set_email("a@x.com").await;
    let refresh = manager.submit().await.unwrap();
    let count = refresh.wait().await.unwrap();

    let users = manager.users().await;
    assert_eq!(count, 3);
    assert_eq!(users.len(), 3);
    assert_eq!(
        users
            .iter()
            .filter(|u| u.name == "Ann" && u.email == "a@x.com")
            .count(),
        1
    );
    assert_eq!(manager.form().await, FormState::default());
    assert_eq!(messages(&mut notifications), vec![USER_ADDED]);
}

#[tokio::test]
async fn test_success_notification_precedes_refresh() {
    let (manager, mut notifications) = UserManager::new(FakeService::new());

    manager.set_name("Ann").await;
    manager.set_email("a@x.com").await;
    let refresh = manager.submit().await.unwrap();

    // Single-threaded runtime: the spawned refresh has not been polled yet
    assert_eq!(manager.api().list_calls(), 0);
    let queued = notifications.try_recv().unwrap();
    assert_eq!(queued.kind, NotificationKind::Success);
    assert_eq!(queued.message, USER_ADDED);

    refresh.wait().await.unwrap();
    assert_eq!(manager.api().list_calls(), 1);
}

#[tokio::test]
async fn test_failed_create_preserves_form() {
    let (manager, mut notifications) = UserManager::new(FakeService::new());
    manager.api().fail(Op::Create);

    manager.set_name("Ann").await;
    manager.set_email("a@x.com").await;
    let result = manager.submit().await;

    assert!(matches!(result, Err(ManagerError::RequestFailed(_))));
    assert_eq!(manager.form().await, FormState::new("Ann", "a@x.com"));
    assert_eq!(manager.api().list_calls(), 0);
    assert_eq!(messages(&mut notifications), vec![ADD_FAILED]);

    // Retry without retyping
    manager.api().heal(Op::Create);
    manager.submit().await.unwrap().wait().await.unwrap();
    assert_eq!(manager.users().await.len(), 1);
}

#[tokio::test]
async fn test_repeated_submit_is_not_deduplicated() {
    let (manager, _notifications) = UserManager::new(FakeService::new());
    manager.set_name("Ann").await;
    manager.set_email("a@x.com").await;

    let (a, b) = tokio::join!(manager.submit(), manager.submit());
    a.unwrap().wait().await.unwrap();
    b.unwrap().wait().await.unwrap();

    assert_eq!(manager.api().create_calls(), 2);
    assert_eq!(manager.api().list_calls(), 2);
    assert_eq!(manager.users().await.len(), 2);
}

// ===== Update =====

#[tokio::test]
async fn test_update_applies_fully() {
    let service = FakeService::with_users(vec![
        User::new(6_u64, "Amy", "amy@x.com"),
        User::new(7_u64, "Bob", "b@x.com"),
    ]);
    let (manager, mut notifications) = UserManager::new(service);
    manager.refresh_all().await.unwrap();

    let bob = manager.users().await[1].clone();
    manager.start_edit(&bob).await;
    assert_eq!(manager.mode().await, FormMode::Update);

    manager.set_name("Bobby").await;
    manager.set_email("b2@x.com").await;
    manager.submit().await.unwrap().wait().await.unwrap();

    let users = manager.users().await;
    let updated = users.iter().find(|u| u.id == UserId::from(7)).unwrap();
    assert_eq!(updated.name, "Bobby");
    assert_eq!(updated.email, "b2@x.com");
    assert_eq!(users.len(), 2);

    assert_eq!(manager.edit_target().await, None);
    assert_eq!(manager.mode().await, FormMode::Create);
    assert_eq!(manager.form().await, FormState::default());
    assert_eq!(messages(&mut notifications), vec![USER_UPDATED]);
}

#[tokio::test]
async fn test_failed_update_leaves_state_untouched() {
    let (manager, mut notifications) =
        UserManager::new(FakeService::with_users(vec![User::new(7_u64, "Bob", "b@x.com")]));
    manager.refresh_all().await.unwrap();

    let bob = manager.users().await[0].clone();
    manager.start_edit(&bob).await;
    manager.set_name("Bobby").await;
    manager.api().fail(Op::Update);

    let before = manager.snapshot().await;
    let result = manager.submit().await;
    let after = manager.snapshot().await;

    assert!(matches!(result, Err(ManagerError::RequestFailed(_))));
    assert_eq!(before, after);
    assert_eq!(after.edit_target, Some(UserId::from(7)));
    assert_eq!(after.mode(), FormMode::Update);
    assert_eq!(messages(&mut notifications), vec![UPDATE_FAILED]);
}

// ===== Delete =====

#[tokio::test]
async fn test_delete_removes_exactly_one() {
    let (manager, mut notifications) = UserManager::new(FakeService::seeded(5));
    manager.refresh_all().await.unwrap();

    manager
        .delete(&UserId::from(3))
        .await
        .unwrap()
        .wait()
        .await
        .unwrap();

    let users = manager.users().await;
    assert_eq!(users.len(), 4);
    assert!(users.iter().all(|u| u.id != UserId::from(3)));
    assert_eq!(messages(&mut notifications), vec![USER_DELETED]);
}

#[tokio::test]
async fn test_failed_delete_keeps_row() {
    let (manager, mut notifications) = UserManager::new(FakeService::seeded(3));
    manager.refresh_all().await.unwrap();
    manager.api().fail(Op::Delete);

    let result = manager.delete(&UserId::from(2)).await;

    assert!(result.is_err());
    assert_eq!(manager.users().await.len(), 3);
    assert!(manager
        .users()
        .await
        .iter()
        .any(|u| u.id == UserId::from(2)));
    assert_eq!(messages(&mut notifications), vec![DELETE_FAILED]);
}

#[tokio::test]
async fn test_delete_then_failed_refresh_reports_both() {
    let (manager, mut notifications) = UserManager::new(FakeService::seeded(2));
    manager.refresh_all().await.unwrap();
    manager.api().fail(Op::List);

    let refresh = manager.delete(&UserId::from(1)).await.unwrap();
    assert!(refresh.wait().await.is_err());

    // Server dropped the row, but the stale snapshot still shows it
    assert_eq!(manager.api().stored().len(), 1);
    assert_eq!(manager.users().await.len(), 2);
    assert_eq!(messages(&mut notifications), vec![USER_DELETED, FETCH_FAILED]);
}

// ===== Fetch one =====

#[tokio::test]
async fn test_fetch_one_shows_record() {
    let (manager, mut notifications) =
        UserManager::new(FakeService::with_users(vec![User::new(7_u64, "Bob", "b@x.com")]));

    manager.set_search_query("7").await;
    let record = manager.fetch_one().await.unwrap();

    assert_eq!(record["name"], "Bob");
    let shown = notifications.try_recv().unwrap();
    assert_eq!(shown.kind, NotificationKind::Info);
    let value: serde_json::Value = serde_json::from_str(&shown.message).unwrap();
    assert_eq!(
        value,
        serde_json::json!({"ID": 7, "name": "Bob", "email": "b@x.com"})
    );

    // Informational only
    assert!(manager.users().await.is_empty());
}

#[tokio::test]
async fn test_fetch_one_not_found() {
    let (manager, mut notifications) = UserManager::new(FakeService::seeded(1));
    manager.set_search_query("99").await;

    let before = manager.snapshot().await;
    let result = manager.fetch_one().await;

    assert!(matches!(result, Err(ManagerError::RequestFailed(_))));
    assert_eq!(manager.snapshot().await, before);
    assert_eq!(messages(&mut notifications), vec![USER_NOT_FOUND]);
}

#[tokio::test]
async fn test_fetch_one_server_error_uses_same_message() {
    let (manager, mut notifications) = UserManager::new(FakeService::seeded(1));
    manager.api().fail(Op::Get);
    manager.set_search_query("1").await;

    assert!(manager.fetch_one().await.is_err());
    assert_eq!(messages(&mut notifications), vec![USER_NOT_FOUND]);
}
