use log::info;

use crate::error::StoreError;
use crate::models::NewUser;
use crate::store::dynamo::DynamoUserStore;
use crate::store::UserStore;
use crate::test_utils::dynamo_test_utils::{
    clear_dynamo_table, create_dynamo_client, create_user_table, use_dynamodb,
};
use crate::test_utils::test_logging::init_test_logging;

// Constants for DynamoDB tests
const TEST_TABLE_NAME: &str = "user-test-table";

// Runs against DynamoDB Local only when USE_DYNAMODB=true
#[tokio::test]
async fn test_dynamo_user_store_lifecycle() {
    init_test_logging();
    if !use_dynamodb() {
        info!("Skipping DynamoDB store test, USE_DYNAMODB is not set");
        return;
    }

    let client = create_dynamo_client().await;
    create_user_table(&client, TEST_TABLE_NAME).await.unwrap();
    clear_dynamo_table(&client, TEST_TABLE_NAME).await;

    let store = DynamoUserStore::with_client_and_table(client, TEST_TABLE_NAME.to_string());

    let first = store
        .save(NewUser::new("user1".into(), "user1@example.com".into()))
        .await
        .unwrap();
    let second = store
        .save(NewUser::new("user2".into(), "user2@example.com".into()))
        .await
        .unwrap();
    assert!(second.id > first.id);

    assert!(store.exists_by_email("user1@example.com").await.unwrap());
    assert!(!store.exists_by_email("nobody@example.com").await.unwrap());

    let found = store.find_by_id(first.id).await.unwrap();
    assert_eq!(found, Some(first.clone()));
    assert!(store.find_by_id(999_999).await.unwrap().is_none());

    let duplicate = store
        .save(NewUser::new("again".into(), "user1@example.com".into()))
        .await;
    assert!(matches!(duplicate, Err(StoreError::DuplicateEmail(_))));

    let users = store.find_all().await.unwrap();
    assert_eq!(users, vec![first, second]);
}
