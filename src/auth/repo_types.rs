use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::diet::DietType;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,                           // unique user ID
    pub email: String,                      // lower-cased, unique
    pub full_name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,              // Argon2 hash, not exposed in JSON
    pub is_verified: bool,
    #[serde(skip_serializing)]
    pub verification_token: Option<String>, // set exactly while unverified
    #[serde(skip_serializing)]
    pub consumed_token: Option<String>,     // token that verified the account
    pub diet_preference: Option<String>,
    pub created_at: OffsetDateTime,
}

impl User {
    /// Stored preference as a diet. Labels that no longer parse are treated as unset.
    pub fn diet(&self) -> Option<DietType> {
        self.diet_preference
            .as_deref()
            .and_then(|label| DietType::parse_optional(label).ok().flatten())
    }
}

/// Fields needed to insert a user at signup.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub full_name: String,
    pub password_hash: String,
    pub verification_token: String,
    pub diet_preference: Option<DietType>,
}
