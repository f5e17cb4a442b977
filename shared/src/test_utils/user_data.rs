use crate::models::User;

/// Generates `count` users with ids `1..=count`, named `User{n}` with
/// email `user{n}@example.com`.
pub fn generate_users(count: u64) -> Vec<User> {
    (1..=count)
        .map(|n| User {
            id: n,
            name: format!("User{}", n),
            email: format!("user{}@example.com", n),
            code: format!("USER-{}", n),
        })
        .collect()
}
