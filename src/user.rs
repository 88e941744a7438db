//! Authenticated backend identities

use serde::{Deserialize, Serialize};

/// A signed-in user, as returned by the auth endpoints.
///
/// The role (auditor or manager) is never stored on the user record, it is derived from the email address by [`crate::auth::is_auditor`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    email: String,
    access_token: String,
}

impl User {
    pub fn new(email: String, access_token: String) -> Self {
        Self { email, access_token }
    }

    pub fn email(&self) -> &str         { &self.email        }
    pub fn access_token(&self) -> &str  { &self.access_token }
}
