pub mod query;
pub mod thread;
pub mod user;
pub mod vote;

use crate::model::{query::ContradictoryThreadScopeError, vote::InvalidReaderVoteError};
use derive_where::derive_where;
use serde::{Deserialize, Serialize};
use std::{
    fmt::{Debug, Display},
    hash::Hash,
    marker::PhantomData,
};
use thiserror::Error;

#[derive(Clone, Eq, PartialEq, Debug, Hash, Error)]
pub enum ModelValidationError {
    #[error(transparent)]
    TextLength(#[from] InvalidTextLengthError),
    #[error(transparent)]
    ThreadScope(#[from] ContradictoryThreadScopeError),
    #[error(transparent)]
    ReaderVote(#[from] InvalidReaderVoteError),
}

/// Ties an id marker to the representation its ids are stored as.
pub trait IdMarker {
    type Repr: Copy + Eq + Ord + Hash + Debug + Display;
}

#[derive_where(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash; M::Repr)]
#[derive(Serialize, Deserialize)]
#[serde(
    transparent,
    bound(
        serialize = "M::Repr: Serialize",
        deserialize = "M::Repr: Deserialize<'de>"
    )
)]
pub struct Id<M: IdMarker>(M::Repr, #[serde(skip)] PhantomData<M>);

impl<M: IdMarker> Id<M> {
    #[must_use]
    pub fn new(value: M::Repr) -> Self {
        Self(value, PhantomData)
    }

    #[must_use]
    pub fn get(self) -> M::Repr {
        self.0
    }
}

impl<M: IdMarker> Display for Id<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Error)]
#[error("{what} must be between {min} and {max} characters long, got {len}")]
pub struct InvalidTextLengthError {
    pub what: &'static str,
    pub min: usize,
    pub max: usize,
    pub len: usize,
}

/// Declares a trimmed `String` newtype whose character count must fall in `$min..=$max`.
macro_rules! bounded_text {
    ($(#[$meta:meta])* $name:ident, $what:literal, $min:expr, $max:expr) => {
        $(#[$meta])*
        #[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, ::serde::Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(
                value: impl Into<String>,
            ) -> Result<Self, $crate::model::InvalidTextLengthError> {
                let value = value.into();
                let trimmed = value.trim();
                let len = trimmed.chars().count();

                if ($min..=$max).contains(&len) {
                    Ok(Self(trimmed.to_owned()))
                } else {
                    Err($crate::model::InvalidTextLengthError {
                        what: $what,
                        min: $min,
                        max: $max,
                        len,
                    })
                }
            }

            #[must_use]
            pub fn get(&self) -> &str {
                &self.0
            }

            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                let inner = String::deserialize(deserializer)?;
                $name::new(inner).map_err(<D::Error as ::serde::de::Error>::custom)
            }
        }
    };
}

pub(crate) use bounded_text;
