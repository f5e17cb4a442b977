pub mod dynamo_test_utils;
pub mod http_test_utils;
pub mod test_logging;
pub mod user_data;
