//! User Entity
//!
//! A user is created provisionally by the first registration step, activated
//! by the one-time code, and completed with profile data by the second step.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    email::Email, user_id::UserId, user_name::UserName, user_password::UserPassword,
    user_status::UserStatus,
};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    /// Unique handle, compared by canonical form
    pub user_name: UserName,
    /// Unique email
    pub email: Email,
    pub password: UserPassword,
    pub status: UserStatus,
    pub email_verified: bool,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Unique when present
    pub phone_number: Option<String>,
    pub profile_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a provisional (pending, unverified) user
    pub fn new(user_name: UserName, email: Email, password: UserPassword) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            user_name,
            email,
            password,
            status: UserStatus::Pending,
            email_verified: false,
            first_name: None,
            last_name: None,
            phone_number: None,
            profile_completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Email ownership proven
    pub fn mark_verified(&mut self) {
        self.email_verified = true;
        self.status = UserStatus::Active;
        self.updated_at = Utc::now();
    }

    /// Apply the second registration step
    ///
    /// A different email puts the account back to pending until the new
    /// address is verified. Returns whether the email changed.
    pub fn complete_profile(
        &mut self,
        first_name: String,
        last_name: String,
        email: Option<Email>,
        phone_number: Option<String>,
    ) -> bool {
        self.first_name = Some(first_name);
        self.last_name = Some(last_name);

        let email_changed = match email {
            Some(email) if email != self.email => {
                self.email = email;
                self.email_verified = false;
                self.status = UserStatus::Pending;
                true
            }
            _ => false,
        };

        if phone_number.is_some() {
            self.phone_number = phone_number;
        }
        self.profile_completed = true;
        self.updated_at = Utc::now();

        email_changed
    }

    pub fn can_login(&self) -> bool {
        self.email_verified && self.status.can_login()
    }
}
