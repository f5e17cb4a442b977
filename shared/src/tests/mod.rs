mod dynamo_store_tests;
