mod service_tests;
mod utils;
