use log::{debug, info};

use roster_shared::store::UserStore;

use super::UserService;
use crate::{
    error::{AppError, Result},
    models::CreateUser,
};

pub const SAMPLE_USERS: [(&str, &str); 2] = [
    ("user1", "user1@example.com"),
    ("user2", "user2@example.com"),
];

/// Seeds the sample users through the service. Users whose email is
/// already taken are skipped, so this is safe to run on every start.
/// Returns how many users were created.
pub async fn seed_sample_users<S: UserStore>(service: &UserService<S>) -> Result<usize> {
    info!("Initializing sample users...");

    let mut created = 0;
    for (name, email) in SAMPLE_USERS {
        let request = CreateUser {
            name: name.to_string(),
            email: email.to_string(),
        };

        match service.create_user(request).await {
            Ok(user) => {
                debug!("Seeded sample user {} ({})", user.id, user.email);
                created += 1;
            }
            Err(AppError::InvalidArgument(msg)) => {
                debug!("Skipping sample user {}: {}", email, msg);
            }
            Err(err) => return Err(err),
        }
    }

    info!("Sample users initialized: {} created", created);
    Ok(created)
}
