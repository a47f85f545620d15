//! Identifies who is reading or acting.
//!
//! The `x-reader-id` header carries a plain user id. It decides whose vote state
//! is shown and who authors writes; it is not authentication.

use crate::server::ServerError;
use agora_common::model::user::UserId;
use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::TypedHeader;
use headers::{Header, HeaderName, HeaderValue};

pub static READER_ID_HEADER: HeaderName = HeaderName::from_static("x-reader-id");

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub struct XReaderId(pub UserId);

impl Header for XReaderId {
    fn name() -> &'static HeaderName {
        &READER_ID_HEADER
    }

    fn decode<'i, I>(values: &mut I) -> Result<Self, headers::Error>
    where
        I: Iterator<Item = &'i HeaderValue>,
    {
        let value = values.next().ok_or_else(headers::Error::invalid)?;
        if values.next().is_some() {
            return Err(headers::Error::invalid());
        }

        value
            .to_str()
            .ok()
            .and_then(|value| value.trim().parse().ok())
            .map(|id| Self(UserId::new(id)))
            .ok_or_else(headers::Error::invalid)
    }

    fn encode<E>(&self, values: &mut E)
    where
        E: Extend<HeaderValue>,
    {
        values.extend(std::iter::once(HeaderValue::from(self.0.get())));
    }
}

/// The reader of a request, if one was named.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct Reader(pub Option<UserId>);

impl<S> FromRequestParts<S> for Reader
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match TypedHeader::<XReaderId>::from_request_parts(parts, state).await {
            Ok(TypedHeader(XReaderId(id))) => Ok(Self(Some(id))),
            Err(rejection) if rejection.is_missing() => Ok(Self(None)),
            Err(rejection) => Err(ServerError::InvalidReaderHeader(rejection)),
        }
    }
}

/// The user performing a write. The header is required.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub struct Actor {
    id: UserId,
}

impl Actor {
    #[must_use]
    pub fn user_id(self) -> UserId {
        self.id
    }
}

impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(XReaderId(id)) = TypedHeader::<XReaderId>::from_request_parts(parts, state)
            .await
            .map_err(ServerError::InvalidReaderHeader)?;

        Ok(Self { id })
    }
}
