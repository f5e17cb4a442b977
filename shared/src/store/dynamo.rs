use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::types::{AttributeValue, Put, ReturnValue, TransactWriteItem};
use aws_sdk_dynamodb::Client;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_dynamo::{from_item, to_item};
use std::collections::HashMap;

use crate::error::{
    map_get_dynamo_error, map_scan_dynamo_error, map_transact_dynamo_error,
    map_update_dynamo_error, Result, StoreError,
};
use crate::models::{NewUser, User};

// User Store Constants
pub const TABLE_NAME: &str = "user-table";
pub const PARTITION_KEY: &str = "pk";
const USER_ENTITY: &str = "user";
const EMAIL_ENTITY: &str = "email";
const USER_SEQUENCE_KEY: &str = "SEQUENCE#user";
const SEQUENCE_ATTRIBUTE: &str = "seq";
const NOT_EXISTS_CONDITION: &str = "attribute_not_exists(pk)";

fn user_key(id: u64) -> String {
    format!("USER#{}", id)
}

fn email_key(email: &str) -> String {
    format!("EMAIL#{}", email)
}

/// Row layout of a user in the single table
#[derive(Serialize, Deserialize, Debug)]
struct UserItem {
    pk: String,
    entity_type: String,
    id: u64,
    name: String,
    email: String,
    code: String,
}

impl From<&User> for UserItem {
    fn from(user: &User) -> Self {
        Self {
            pk: user_key(user.id),
            entity_type: USER_ENTITY.to_string(),
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            code: user.code.clone(),
        }
    }
}

impl From<UserItem> for User {
    fn from(item: UserItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
            email: item.email,
            code: item.code,
        }
    }
}

/// Reserves an email for one user. Its key is the email itself, so a
/// second guard for the same email fails the write condition.
#[derive(Serialize, Debug)]
struct EmailGuardItem {
    pk: String,
    entity_type: String,
    user_id: u64,
}

// DynamoUserStore

/// DynamoDB store for users
pub struct DynamoUserStore {
    client: Client,
    table_name: String,
}

impl DynamoUserStore {
    /// Creates a new DynamoDB store using the default AWS configuration
    pub async fn new(table_name: String) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest()).load().await;

        let client = Client::new(&config);
        info!("Using DynamoDB user table '{}'", table_name);

        Self { client, table_name }
    }

    /// Creates a new DynamoDB store with the specified client and table name.
    /// This is mainly useful for testing with a local DynamoDB instance.
    pub fn with_client_and_table(client: Client, table_name: String) -> Self {
        Self { client, table_name }
    }

    /// Atomically bumps the sequence item and returns the new value
    async fn next_id(&self) -> Result<u64> {
        let response = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key(PARTITION_KEY, AttributeValue::S(USER_SEQUENCE_KEY.to_string()))
            .update_expression("ADD #seq :one")
            .expression_attribute_names("#seq", SEQUENCE_ATTRIBUTE)
            .expression_attribute_values(":one", AttributeValue::N("1".to_string()))
            .return_values(ReturnValue::UpdatedNew)
            .send()
            .await
            .map_err(map_update_dynamo_error)?;

        let sequence = response
            .attributes()
            .and_then(|attributes| attributes.get(SEQUENCE_ATTRIBUTE))
            .and_then(|value| value.as_n().ok())
            .ok_or_else(|| {
                StoreError::InternalError("User sequence missing from update_item response".into())
            })?;

        sequence.parse::<u64>().map_err(|e| {
            StoreError::InternalError(format!("Invalid user sequence value {}: {}", sequence, e))
        })
    }
}

#[async_trait]
impl super::UserStore for DynamoUserStore {
    /// Scans every user item, following scan pagination
    async fn find_all(&self) -> Result<Vec<User>> {
        let mut users = Vec::new();
        let mut last_key: Option<HashMap<String, AttributeValue>> = None;

        loop {
            let response = self
                .client
                .scan()
                .table_name(&self.table_name)
                .filter_expression("#entity = :user")
                .expression_attribute_names("#entity", "entity_type")
                .expression_attribute_values(":user", AttributeValue::S(USER_ENTITY.to_string()))
                .consistent_read(true)
                .set_exclusive_start_key(last_key)
                .send()
                .await
                .map_err(map_scan_dynamo_error)?;

            for item in response.items() {
                let user_item: UserItem = from_item(item.clone())?;
                users.push(User::from(user_item));
            }

            last_key = response.last_evaluated_key().cloned();
            if last_key.is_none() {
                break;
            }
        }

        users.sort_by_key(|user| user.id);
        debug!("Scanned {} users from '{}'", users.len(), self.table_name);

        Ok(users)
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<User>> {
        let response = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(PARTITION_KEY, AttributeValue::S(user_key(id)))
            .consistent_read(true)
            .send()
            .await
            .map_err(map_get_dynamo_error)?;

        match response.item() {
            Some(item) => {
                let user_item: UserItem = from_item(item.clone())?;
                Ok(Some(user_item.into()))
            }
            None => Ok(None),
        }
    }

    /// Writes the user and its email guard in one transaction
    async fn save(&self, user: NewUser) -> Result<User> {
        let id = self.next_id().await?;
        let user = user.into_user(id);

        let user_item = to_item(UserItem::from(&user))?;
        let guard_item = to_item(EmailGuardItem {
            pk: email_key(&user.email),
            entity_type: EMAIL_ENTITY.to_string(),
            user_id: user.id,
        })?;

        let put_user = Put::builder()
            .table_name(&self.table_name)
            .set_item(Some(user_item))
            .condition_expression(NOT_EXISTS_CONDITION)
            .build()?;

        let put_guard = Put::builder()
            .table_name(&self.table_name)
            .set_item(Some(guard_item))
            .condition_expression(NOT_EXISTS_CONDITION)
            .build()?;

        self.client
            .transact_write_items()
            .transact_items(TransactWriteItem::builder().put(put_user).build())
            .transact_items(TransactWriteItem::builder().put(put_guard).build())
            .send()
            .await
            .map_err(|e| map_transact_dynamo_error(e, &user.email))?;

        debug!("Saved user {} to '{}'", user.id, self.table_name);
        Ok(user)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool> {
        let response = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(PARTITION_KEY, AttributeValue::S(email_key(email)))
            .consistent_read(true)
            .send()
            .await
            .map_err(map_get_dynamo_error)?;

        Ok(response.item().is_some())
    }
}
