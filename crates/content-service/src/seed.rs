//! Startup baseline for the dataset
//!
//! Seeding is destructive: every start replaces whatever was persisted,
//! including posts created during a previous run.

use crate::model::{Dataset, Post, User};
use crate::store::{ContentStore, StoreError};

const LOREM_IPSUM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Curabitur vitae ligula in urna finibus ullamcorper et at mi. Quisque mauris turpis, dignissim sed vehicula a, dapibus euismod mauris. Sed non odio a tortor ornare mollis eget at elit. Suspendisse potenti.";

/// The fixed demo dataset: two users and two posts.
pub fn baseline() -> Dataset {
    Dataset {
        users: vec![
            User {
                id: 1,
                name: "John".to_string(),
                password: "super_secret_password_from_john".to_string(),
            },
            User {
                id: 2,
                name: "Alice".to_string(),
                password: "super_secret_password_from_alice".to_string(),
            },
        ],
        posts: vec![
            Post {
                id: 1,
                title: "Web app security".to_string(),
                text: LOREM_IPSUM.to_string(),
            },
            Post {
                id: 2,
                title: "OWASP Top 10".to_string(),
                text: LOREM_IPSUM.to_string(),
            },
        ],
    }
}

/// Overwrite the store with [`baseline`].
pub fn run(store: &dyn ContentStore) -> Result<(), StoreError> {
    let dataset = baseline();
    store.seed(&dataset)?;
    tracing::info!(
        "Seeded store with {} users and {} posts",
        dataset.users.len(),
        dataset.posts.len()
    );
    Ok(())
}
