use crate::model::{Id, IdMarker, bounded_text, user::UserId, user::Username, vote::ReaderVote};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

pub const THREAD_TITLE_MAX_LEN: usize = 300;
pub const THREAD_CONTENT_MAX_LEN: usize = 10_000;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct ThreadMarker;

impl IdMarker for ThreadMarker {
    type Repr = Uuid;
}

pub type ThreadId = Id<ThreadMarker>;

impl ThreadId {
    #[must_use]
    pub fn generate() -> Self {
        Self::new(Uuid::new_v4())
    }
}

bounded_text!(
    /// Headline of a root post. Comments never carry one.
    ThreadTitle,
    "Thread title",
    1,
    THREAD_TITLE_MAX_LEN
);

bounded_text!(ThreadContent, "Thread content", 1, THREAD_CONTENT_MAX_LEN);

/// A post or a comment.
///
/// A thread without a parent is a root post: its `root_id` is its own id and it
/// has a title. Every reply carries the `root_id` of the post it ultimately
/// belongs to, no matter how deep it is nested.
#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize, Serialize)]
pub struct Thread {
    pub id: ThreadId,
    pub root_id: ThreadId,
    pub parent_id: Option<ThreadId>,
    pub author_id: UserId,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub title: Option<ThreadTitle>,
    pub content: ThreadContent,
}

impl Thread {
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// A thread as seen by one reader, with its vote and reply tallies.
#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize, Serialize)]
pub struct ThreadExtended {
    #[serde(flatten)]
    pub thread: Thread,
    pub author: Username,
    pub vote: ReaderVote,
    pub upvote_count: u64,
    pub downvote_count: u64,
    pub comment_count: u64,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize)]
pub struct CreatePost {
    pub author_id: UserId,
    pub title: ThreadTitle,
    pub content: ThreadContent,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize)]
pub struct CreateComment {
    pub author_id: UserId,
    pub parent_id: ThreadId,
    pub content: ThreadContent,
}
