use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::model::{
    common::{DomainError, NonEmptyString},
    db::{NewUser, User},
};

/// A user registration request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSpec {
    pub external_id: String,
    pub display_name: String,
    pub email_address: String,
}

impl TryFrom<UserSpec> for NewUser {
    type Error = DomainError;

    /// Validate a registration request into a storable user.
    fn try_from(spec: UserSpec) -> Result<Self, Self::Error> {
        Ok(Self {
            external_id: NonEmptyString::new(spec.external_id)?,
            display_name: NonEmptyString::new(spec.display_name)?,
            email_address: NonEmptyString::new(spec.email_address)?,
            joined_at: Utc::now(),
        })
    }
}

/// An API-friendly view of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDescription {
    /// Unique ID, serialised as a hex string.
    pub id: String,
    pub external_id: String,
    pub display_name: String,
    pub email_address: String,
}

impl From<User> for UserDescription {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            external_id: user.user.external_id.into(),
            display_name: user.user.display_name.into(),
            email_address: user.user.email_address.into(),
        }
    }
}
