use aws_sdk_dynamodb::error::{BuildError, SdkError};
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::scan::ScanError;
use aws_sdk_dynamodb::operation::transact_write_items::TransactWriteItemsError;
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    /// A write was rejected because another user already holds the email.
    #[error("Duplicate email: {0}")]
    DuplicateEmail(String),

    #[error("Internal store error: {0}")]
    InternalError(String),
}

// Helper function to map general DynamoDB errors
pub fn map_dynamo_error<E>(operation: &str, err: SdkError<E>) -> StoreError {
    StoreError::InternalError(format!("DynamoDB {} error: {}", operation, err))
}

// Helper function to map GetItem errors
pub fn map_get_dynamo_error(err: SdkError<GetItemError>) -> StoreError {
    map_dynamo_error("get_item", err)
}

// Helper function to map Scan errors
pub fn map_scan_dynamo_error(err: SdkError<ScanError>) -> StoreError {
    map_dynamo_error("scan", err)
}

// Helper function to map UpdateItem errors
pub fn map_update_dynamo_error(err: SdkError<UpdateItemError>) -> StoreError {
    map_dynamo_error("update_item", err)
}

/// Maps a failed user write. A cancelled transaction whose cancellation
/// reasons include a failed condition check means one of the guarded keys
/// already exists, which for the email guard is a duplicate email.
pub fn map_transact_dynamo_error(err: SdkError<TransactWriteItemsError>, email: &str) -> StoreError {
    if let Some(TransactWriteItemsError::TransactionCanceledException(cancelled)) =
        err.as_service_error()
    {
        let condition_failed = cancelled
            .cancellation_reasons()
            .iter()
            .any(|reason| reason.code() == Some("ConditionalCheckFailed"));

        if condition_failed {
            return StoreError::DuplicateEmail(email.to_string());
        }
    }

    map_dynamo_error("transact_write_items", err)
}

impl From<serde_dynamo::Error> for StoreError {
    fn from(err: serde_dynamo::Error) -> Self {
        StoreError::InternalError(format!("DynamoDB serialization error: {}", err))
    }
}

impl From<BuildError> for StoreError {
    fn from(err: BuildError) -> Self {
        StoreError::InternalError(format!("DynamoDB request build error: {}", err))
    }
}
