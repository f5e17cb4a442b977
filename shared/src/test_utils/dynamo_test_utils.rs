//! DynamoDB test utilities
//!
//! These set up and clean the user table in DynamoDB Local.
//! Tests using them are skipped unless `USE_DYNAMODB=true`.

use aws_sdk_dynamodb::types::{
    AttributeDefinition, AttributeValue, KeySchemaElement, KeyType, ProvisionedThroughput,
    ScalarAttributeType, TableStatus,
};
use aws_sdk_dynamodb::Client;
use std::error::Error;
// Use log macros, but ensure test_logging::init_test_logging() is called in test files
use log::{debug, error, info};

use crate::store::dynamo::PARTITION_KEY;

// Constants for DynamoDB tests
pub const DYNAMO_LOCAL_URI: &str = "http://localhost:8000";

// Helper to check if DynamoDB integration tests should be used
pub fn use_dynamodb() -> bool {
    std::env::var("USE_DYNAMODB").unwrap_or_default() == "true"
}

// Helper to set up a DynamoDB client for local testing
pub async fn create_dynamo_client() -> Client {
    let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .endpoint_url(DYNAMO_LOCAL_URI)
        .region("us-east-1")
        .load()
        .await;

    Client::new(&config)
}

/// Creates the single-table user layout (`pk` string hash key),
/// replacing any table with the same name.
pub async fn create_user_table(client: &Client, table_name: &str) -> Result<(), Box<dyn Error>> {
    info!("Creating user table '{}'...", table_name);

    // Check if table already exists
    let tables = client.list_tables().send().await?;
    if tables.table_names().contains(&table_name.to_string()) {
        info!("Table '{}' already exists, deleting it first...", table_name);
        client.delete_table().table_name(table_name).send().await?;
        // Wait for table deletion to complete
        loop {
            let tables = client.list_tables().send().await?;
            if !tables.table_names().contains(&table_name.to_string()) {
                info!("Table '{}' successfully deleted!", table_name);
                break;
            }
            debug!("Table '{}' still exists, waiting...", table_name);
            tokio::time::sleep(std::time::Duration::from_secs(1)).await;
        }
    }

    let pk_key = KeySchemaElement::builder()
        .attribute_name(PARTITION_KEY)
        .key_type(KeyType::Hash)
        .build()?;

    let pk_attr = AttributeDefinition::builder()
        .attribute_name(PARTITION_KEY)
        .attribute_type(ScalarAttributeType::S)
        .build()?;

    client
        .create_table()
        .table_name(table_name)
        .key_schema(pk_key)
        .attribute_definitions(pk_attr)
        .provisioned_throughput(
            ProvisionedThroughput::builder()
                .read_capacity_units(5)
                .write_capacity_units(5)
                .build()?,
        )
        .send()
        .await?;

    // Wait for the table to become ACTIVE before running tests
    info!("Waiting for table '{}' to become ACTIVE...", table_name);
    loop {
        let resp = client.describe_table().table_name(table_name).send().await?;
        let status = resp.table().and_then(|table| table.table_status());
        if status == Some(&TableStatus::Active) {
            break;
        }
        debug!("Table '{}' status: {:?}", table_name, status);
        tokio::time::sleep(std::time::Duration::from_secs(1)).await;
    }

    info!("Table '{}' is ready for testing!", table_name);
    Ok(())
}

// Helper to clean the DynamoDB table between tests
pub async fn clear_dynamo_table(client: &Client, table_name: &str) {
    let mut last_key = None;
    loop {
        let scan_resp = match client
            .scan()
            .table_name(table_name)
            .set_exclusive_start_key(last_key.clone())
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                // Ignore scan errors to keep the test running
                error!("Failed to scan table '{}': {}", table_name, e);
                break;
            }
        };

        for item in scan_resp.items() {
            if let Some(AttributeValue::S(pk)) = item.get(PARTITION_KEY) {
                if let Err(e) = client
                    .delete_item()
                    .table_name(table_name)
                    .key(PARTITION_KEY, AttributeValue::S(pk.clone()))
                    .send()
                    .await
                {
                    error!(
                        "Failed to delete item '{}' from table '{}': {}",
                        pk, table_name, e
                    );
                }
            }
        }

        last_key = scan_resp.last_evaluated_key().cloned();
        if last_key.is_none() {
            break;
        }
    }
}
