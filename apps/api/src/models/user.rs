use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A user account record. `password` holds an already-hashed value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub id: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub roles: BTreeSet<String>,
}

/// Public view of a user, without the password hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub roles: BTreeSet<String>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            roles: user.roles,
        }
    }
}
