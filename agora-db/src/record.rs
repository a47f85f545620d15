use agora_common::model::{
    Id, ModelValidationError,
    thread::{Thread, ThreadContent, ThreadExtended, ThreadTitle},
    user::{User, Username},
    vote::{ReaderVote, Vote},
};
use sqlx::FromRow;
use time::{OffsetDateTime, PrimitiveDateTime};
use uuid::Uuid;

/// Timestamps are stored as UTC without an offset.
pub(crate) fn timestamp_now() -> PrimitiveDateTime {
    let now = OffsetDateTime::now_utc();
    PrimitiveDateTime::new(now.date(), now.time())
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, FromRow)]
pub(crate) struct UserRecord {
    pub user_id: i64,
    pub username: String,
    pub created_at: PrimitiveDateTime,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, FromRow)]
pub(crate) struct ThreadRecord {
    pub thread_id: Uuid,
    pub root_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub author_id: i64,
    pub created_at: PrimitiveDateTime,
    pub title: Option<String>,
    pub content: String,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, FromRow)]
pub(crate) struct ThreadExtendedRecord {
    #[sqlx(flatten)]
    pub thread: ThreadRecord,
    pub username: String,
    pub upvote_count: i64,
    pub downvote_count: i64,
    pub comment_count: i64,
    pub reader_upvote: Option<bool>,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, FromRow)]
pub(crate) struct VoteRecord {
    pub vote_id: i64,
    pub voter_id: i64,
    pub thread_id: Uuid,
    pub upvote: bool,
    pub created_at: PrimitiveDateTime,
}

impl TryFrom<UserRecord> for User {
    type Error = ModelValidationError;

    fn try_from(value: UserRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Id::new(value.user_id),
            username: Username::new(value.username)?,
            created_at: value.created_at.assume_utc(),
        })
    }
}

impl TryFrom<ThreadRecord> for Thread {
    type Error = ModelValidationError;

    fn try_from(value: ThreadRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Id::new(value.thread_id),
            root_id: Id::new(value.root_id),
            parent_id: value.parent_id.map(Id::new),
            author_id: Id::new(value.author_id),
            created_at: value.created_at.assume_utc(),
            title: value.title.map(ThreadTitle::new).transpose()?,
            content: ThreadContent::new(value.content)?,
        })
    }
}

impl TryFrom<ThreadExtendedRecord> for ThreadExtended {
    type Error = ModelValidationError;

    fn try_from(value: ThreadExtendedRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            thread: value.thread.try_into()?,
            author: Username::new(value.username)?,
            vote: ReaderVote::from(value.reader_upvote),
            upvote_count: value.upvote_count.cast_unsigned(),
            downvote_count: value.downvote_count.cast_unsigned(),
            comment_count: value.comment_count.cast_unsigned(),
        })
    }
}

impl From<VoteRecord> for Vote {
    fn from(value: VoteRecord) -> Self {
        Self {
            id: Id::new(value.vote_id),
            voter_id: Id::new(value.voter_id),
            thread_id: Id::new(value.thread_id),
            upvote: value.upvote,
            created_at: value.created_at.assume_utc(),
        }
    }
}
