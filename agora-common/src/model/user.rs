use crate::model::{Id, IdMarker, InvalidTextLengthError, bounded_text};
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter};
use time::OffsetDateTime;

pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 20;
pub const PASSWORD_MIN_LEN: usize = 3;
pub const PASSWORD_MAX_LEN: usize = 40;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct UserMarker;

impl IdMarker for UserMarker {
    type Repr = i64;
}

pub type UserId = Id<UserMarker>;

#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize, Serialize)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize)]
pub struct CreateUser {
    pub username: Username,
    pub password: Password,
}

bounded_text!(
    /// Unique display name of a user.
    Username,
    "Username",
    USERNAME_MIN_LEN,
    USERNAME_MAX_LEN
);

/// Opaque password bytes. Never serialized and never printed.
///
/// Unlike usernames, surrounding whitespace is kept.
#[derive(Clone, Eq, PartialEq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Password(Box<[u8]>);

impl Password {
    pub fn new(value: impl Into<String>) -> Result<Self, InvalidTextLengthError> {
        let value = value.into();
        let len = value.chars().count();

        if (PASSWORD_MIN_LEN..=PASSWORD_MAX_LEN).contains(&len) {
            Ok(Self(value.into_bytes().into_boxed_slice()))
        } else {
            Err(InvalidTextLengthError {
                what: "Password",
                min: PASSWORD_MIN_LEN,
                max: PASSWORD_MAX_LEN,
                len,
            })
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<String> for Password {
    type Error = InvalidTextLengthError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl Debug for Password {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Password").field(&"[redacted]").finish()
    }
}
