use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use roster_shared::{
    error::StoreError,
    models::{NewUser, User},
    store::{memory::MemoryUserStore, UserStore},
    test_utils::{test_logging::init_test_logging, user_data::generate_users},
};

use super::utils::MockStore;
use crate::{
    error::AppError,
    models::CreateUser,
    service::{sample_data::seed_sample_users, UserService},
};

fn create(name: &str, email: &str) -> CreateUser {
    CreateUser {
        name: name.to_string(),
        email: email.to_string(),
    }
}

fn service_with(store: MockStore) -> UserService<MockStore> {
    init_test_logging();
    UserService::new(Arc::new(store))
}

#[tokio::test]
async fn get_user_by_id_reports_missing_id() {
    let mut store = MockStore::new();
    store
        .expect_find_by_id()
        .withf(|id| *id == 999)
        .times(1)
        .returning(|_| Ok(None));
    let service = service_with(store);

    let err = service.get_user_by_id(999).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(ref msg) if msg == "User with ID 999 not found."));
}

#[tokio::test]
async fn get_user_by_id_returns_stored_user() {
    let mut store = MockStore::new();
    store.expect_find_by_id().times(1).returning(|id| {
        Ok(Some(User {
            id,
            name: "Test User".into(),
            email: "test@example.com".into(),
            code: "USER-1".into(),
        }))
    });
    let service = service_with(store);

    let user = service.get_user_by_id(1).await.unwrap();
    assert_eq!(user.id, 1);
    assert_eq!(user.name, "Test User");
}

#[tokio::test]
async fn create_user_rejects_taken_email_without_saving() {
    let mut store = MockStore::new();
    store
        .expect_exists_by_email()
        .withf(|email: &str| email == "existing@example.com")
        .times(1)
        .returning(|_| Ok(true));
    store.expect_save().never();
    let service = service_with(store);

    let err = service
        .create_user(create("Test User", "existing@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::InvalidArgument(ref msg) if msg == "Email already exists: existing@example.com"
    ));
}

#[tokio::test]
async fn create_user_assigns_code_and_store_id() {
    let mut store = MockStore::new();
    store.expect_exists_by_email().returning(|_| Ok(false));
    store
        .expect_save()
        .times(1)
        .returning(|user: NewUser| Ok(user.into_user(42)));
    let service = service_with(store);

    let user = service
        .create_user(create("Test User", "test@example.com"))
        .await
        .unwrap();

    assert_eq!(user.id, 42);
    assert_eq!(user.name, "Test User");
    assert_eq!(user.email, "test@example.com");
    assert!(user.code.starts_with("USER-"));
    assert!(user.code.len() > "USER-".len());
}

#[tokio::test]
async fn create_user_maps_store_duplicate_to_invalid_argument() {
    let mut store = MockStore::new();
    store.expect_exists_by_email().returning(|_| Ok(false));
    store
        .expect_save()
        .times(1)
        .returning(|user: NewUser| Err(StoreError::DuplicateEmail(user.email)));
    let service = service_with(store);

    let err = service
        .create_user(create("Race User", "race@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::InvalidArgument(ref msg) if msg == "Email already exists: race@example.com"
    ));
}

#[tokio::test]
async fn create_user_rejects_name_length_before_touching_store() {
    let mut store = MockStore::new();
    store.expect_exists_by_email().never();
    store.expect_save().never();
    let service = service_with(store);

    for name in ["ab".to_string(), "a".repeat(51)] {
        let err = service
            .create_user(create(&name, "len@example.com"))
            .await
            .unwrap_err();
        match err {
            AppError::InvalidArgument(msg) => {
                assert_eq!(
                    msg,
                    "Invalid name length: must be between 3 and 50 characters"
                );
                assert!(!msg.starts_with("Email already exists"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}

#[tokio::test]
async fn store_fault_surfaces_as_internal() {
    let mut store = MockStore::new();
    store
        .expect_find_all()
        .returning(|| Err(StoreError::InternalError("scan failed".into())));
    let service = service_with(store);

    let err = service.get_all_users().await.unwrap_err();
    assert!(matches!(err, AppError::Internal(_)));
}

#[tokio::test]
async fn get_all_users_handles_large_listing() {
    let mut store = MockStore::new();
    store
        .expect_find_all()
        .times(1)
        .returning(|| Ok(generate_users(10_000)));
    let service = service_with(store);

    let users = service.get_all_users().await.unwrap();
    assert_eq!(users.len(), 10_000);
    assert_eq!(users[0].id, 1);
    assert_eq!(users[9_999].email, "user10000@example.com");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_with_same_email_save_once() {
    let taken: Arc<Mutex<HashSet<String>>> = Arc::new(Mutex::new(HashSet::new()));

    let mut store = MockStore::new();
    let seen = taken.clone();
    store
        .expect_exists_by_email()
        .returning(move |email: &str| Ok(seen.lock().unwrap().contains(email)));
    let saved = taken.clone();
    store.expect_save().times(1).returning(move |user: NewUser| {
        saved.lock().unwrap().insert(user.email.clone());
        Ok(user.into_user(1))
    });
    let service = Arc::new(service_with(store));

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .create_user(create("Concurrent User", "concurrent@example.com"))
                    .await
            })
        })
        .collect();

    let mut created = 0;
    let mut rejected = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => created += 1,
            Err(AppError::InvalidArgument(msg)) => {
                assert_eq!(msg, "Email already exists: concurrent@example.com");
                rejected += 1;
            }
            Err(other) => panic!("unexpected error: {:?}", other),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(rejected, 9);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_against_memory_store_persist_once() {
    init_test_logging();
    let store = Arc::new(MemoryUserStore::new());
    let service = Arc::new(UserService::new(store.clone()));

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .create_user(create("Concurrent User", "concurrent@example.com"))
                    .await
            })
        })
        .collect();

    let mut created = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            created += 1;
        }
    }

    assert_eq!(created, 1);
    let users = store.find_all().await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].email, "concurrent@example.com");
}

#[tokio::test]
async fn distinct_emails_get_increasing_ids() {
    init_test_logging();
    let service = UserService::new(Arc::new(MemoryUserStore::new()));

    let first = service
        .create_user(create("First User", "first@example.com"))
        .await
        .unwrap();
    let second = service
        .create_user(create("Second User", "second@example.com"))
        .await
        .unwrap();

    assert!(second.id > first.id);
    let listed = service.get_all_users().await.unwrap();
    assert_eq!(listed, vec![first, second]);
}

#[tokio::test]
async fn seeding_is_idempotent() {
    init_test_logging();
    let store = Arc::new(MemoryUserStore::new());
    let service = UserService::new(store.clone());

    assert_eq!(seed_sample_users(&service).await.unwrap(), 2);
    assert_eq!(seed_sample_users(&service).await.unwrap(), 0);

    let users = store.find_all().await.unwrap();
    let emails: Vec<_> = users.iter().map(|u| u.email.as_str()).collect();
    assert_eq!(emails, vec!["user1@example.com", "user2@example.com"]);
}

#[tokio::test]
async fn create_user_measures_trimmed_name() {
    let mut store = MockStore::new();
    store.expect_exists_by_email().never();
    store.expect_save().never();
    let service = service_with(store);

    let err = service
        .create_user(create("  ab  ", "padded@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::InvalidArgument(ref msg)
            if msg == "Invalid name length: must be between 3 and 50 characters"
    ));
}
