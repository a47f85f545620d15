use crate::model::{Id, IdMarker, thread::ThreadId, user::UserId};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct VoteMarker;

impl IdMarker for VoteMarker {
    type Repr = i64;
}

pub type VoteId = Id<VoteMarker>;

#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize, Serialize)]
pub struct Vote {
    pub id: VoteId,
    pub voter_id: UserId,
    pub thread_id: ThreadId,
    pub upvote: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Deserialize)]
pub struct CreateVote {
    pub voter_id: UserId,
    pub thread_id: ThreadId,
    pub upvote: bool,
}

/// The vote the requesting reader cast on a thread, serialized as `0`, `1` or `-1`.
#[derive(
    Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Serialize, Deserialize,
)]
#[serde(into = "i8", try_from = "i8")]
pub enum ReaderVote {
    #[default]
    None,
    Upvoted,
    Downvoted,
}

impl ReaderVote {
    #[must_use]
    pub fn get(self) -> i8 {
        match self {
            ReaderVote::None => 0,
            ReaderVote::Upvoted => 1,
            ReaderVote::Downvoted => -1,
        }
    }
}

impl From<ReaderVote> for i8 {
    fn from(value: ReaderVote) -> Self {
        value.get()
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Error)]
#[error("A reader vote must be -1, 0 or 1, got {0}")]
pub struct InvalidReaderVoteError(i8);

impl TryFrom<i8> for ReaderVote {
    type Error = InvalidReaderVoteError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ReaderVote::None),
            1 => Ok(ReaderVote::Upvoted),
            -1 => Ok(ReaderVote::Downvoted),
            other => Err(InvalidReaderVoteError(other)),
        }
    }
}

/// Maps the reader's `upvote` flag, if they voted at all.
impl From<Option<bool>> for ReaderVote {
    fn from(upvote: Option<bool>) -> Self {
        match upvote {
            None => ReaderVote::None,
            Some(true) => ReaderVote::Upvoted,
            Some(false) => ReaderVote::Downvoted,
        }
    }
}
