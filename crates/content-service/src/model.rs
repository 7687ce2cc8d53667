//! Records persisted in the dataset document

use serde::{Deserialize, Serialize};

/// A user account, including its plaintext password
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub password: String,
}

/// A user with the password withheld
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicUser {
    pub id: u64,
    pub name: String,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
        }
    }
}

/// A post. Posts are never updated or deleted once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub text: String,
}

/// The whole persisted aggregate. Sequences keep insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Dataset {
    pub users: Vec<User>,
    pub posts: Vec<Post>,
}

impl Dataset {
    /// Id for the next post: current post count + 1.
    ///
    /// Derived rather than tracked, so a post removed out-of-band lets its
    /// successor's id be reused.
    pub fn next_post_id(&self) -> u64 {
        self.posts.len() as u64 + 1
    }
}
