//! User entity as seen by the verification lifecycle.
//!
//! The account record itself is owned elsewhere; this is the projection the
//! verification service reads (identity, address, display name, flag).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Address verification emails are sent to
    pub email: String,

    /// Display name used to greet the user
    pub first_name: String,

    /// Whether the email address has been confirmed
    pub is_verified: bool,
}

impl User {
    /// Creates a new, unverified user
    pub fn new(email: impl Into<String>, first_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            first_name: first_name.into(),
            is_verified: false,
        }
    }

    /// Marks the user's email as verified
    pub fn verify(&mut self) {
        self.is_verified = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_is_unverified() {
        let user = User::new("olena@example.com", "Olena");
        assert!(!user.is_verified);
        assert_eq!(user.first_name, "Olena");
    }

    #[test]
    fn test_verify_sets_flag() {
        let mut user = User::new("olena@example.com", "Olena");
        user.verify();
        assert!(user.is_verified);
    }
}
