use serde::Serialize;
use validator::ValidateEmail;

use crate::models::{CreateUser, CreateUserRequest};

pub const NAME_MIN_CHARS: usize = 3;
pub const NAME_MAX_CHARS: usize = 50;

/// One failed constraint on one request field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: &'static str,
    pub message: String,
}

impl Violation {
    fn new(field: &'static str, message: &str) -> Self {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

/// Length is measured on the trimmed name, the same view the blank check uses
pub fn name_length_in_range(name: &str) -> bool {
    (NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&name.trim().chars().count())
}

fn present(value: &Option<String>) -> Option<&String> {
    value.as_ref().filter(|v| !v.trim().is_empty())
}

/// Collects every violation in the request, name first, then email.
pub fn check_create_user(request: &CreateUserRequest) -> Vec<Violation> {
    let mut violations = Vec::new();

    match present(&request.name) {
        None => violations.push(Violation::new("name", "Name is required")),
        Some(name) if !name_length_in_range(name) => violations.push(Violation::new(
            "name",
            "Name must be between 3 and 50 characters",
        )),
        Some(_) => {}
    }

    match present(&request.email) {
        None => violations.push(Violation::new("email", "Email is required")),
        Some(email) if !email.validate_email() => {
            violations.push(Violation::new("email", "Email should be valid"))
        }
        Some(_) => {}
    }

    violations
}

/// Turns a raw request into the input the user service accepts.
pub fn validate_create_user(request: CreateUserRequest) -> Result<CreateUser, Vec<Violation>> {
    let violations = check_create_user(&request);
    if !violations.is_empty() {
        return Err(violations);
    }

    match (request.name, request.email) {
        (Some(name), Some(email)) => Ok(CreateUser { name, email }),
        // check_create_user already reported missing fields
        _ => Err(vec![Violation::new("request", "Validation failed")]),
    }
}
