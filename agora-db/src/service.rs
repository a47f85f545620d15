use crate::{
    client::DbClient,
    error::{DbError, Result},
};
use agora_common::model::{
    query::ThreadQuery,
    thread::{CreateComment, CreatePost, Thread, ThreadExtended, ThreadId},
    user::{CreateUser, User, UserId},
    vote::{CreateVote, Vote},
};
use std::sync::Arc;
use tracing::instrument;

/// Create and read operations on users, threads and votes.
///
/// Single-item reads turn a missing row into [`DbError::UserNotFound`] or
/// [`DbError::ThreadNotFound`]; multi-item reads return an empty vec instead.
#[derive(Clone, Debug)]
pub struct ThreadService {
    db: Arc<DbClient>,
}

impl ThreadService {
    #[must_use]
    pub fn new(db: Arc<DbClient>) -> Self {
        Self { db }
    }

    #[instrument(level = "debug", skip_all, fields(username = %user.username))]
    pub async fn create_user(&self, user: &CreateUser) -> Result<User> {
        self.db.create_user(user).await
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn get_user(&self, user_id: UserId) -> Result<User> {
        self.db
            .fetch_user(user_id)
            .await?
            .ok_or(DbError::UserNotFound(user_id))
    }

    #[instrument(level = "debug", skip_all, fields(author_id = %post.author_id))]
    pub async fn create_post(&self, post: &CreatePost) -> Result<Thread> {
        self.db.create_post(post).await
    }

    #[instrument(
        level = "debug",
        skip_all,
        fields(author_id = %comment.author_id, parent_id = %comment.parent_id)
    )]
    pub async fn create_comment(&self, comment: &CreateComment) -> Result<Thread> {
        self.db.create_comment(comment).await
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn create_vote(&self, vote: &CreateVote) -> Result<Vote> {
        self.db.upsert_vote(vote).await
    }

    /// Removing a vote that was never cast is not an error.
    #[instrument(level = "debug", skip(self))]
    pub async fn delete_vote(&self, voter_id: UserId, thread_id: ThreadId) -> Result<()> {
        self.db.delete_vote(voter_id, thread_id).await?;
        Ok(())
    }

    /// A query asking for both posts only and comments only is a validation error.
    #[instrument(level = "debug", skip(self))]
    pub async fn get_threads(&self, query: ThreadQuery) -> Result<Vec<ThreadExtended>> {
        self.db.fetch_threads_extended(&query).await
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn get_thread(
        &self,
        reader_id: Option<UserId>,
        thread_id: ThreadId,
    ) -> Result<ThreadExtended> {
        self.db
            .fetch_thread_extended(reader_id, thread_id)
            .await?
            .ok_or(DbError::ThreadNotFound(thread_id))
    }

    /// The root post of `thread_id` followed by every reply under it.
    #[instrument(level = "debug", skip(self))]
    pub async fn get_conversation(
        &self,
        reader_id: Option<UserId>,
        thread_id: ThreadId,
    ) -> Result<Vec<ThreadExtended>> {
        let thread = self
            .db
            .fetch_thread(thread_id)
            .await?
            .ok_or(DbError::ThreadNotFound(thread_id))?;

        let query = ThreadQuery::new().with_root(thread.root_id);
        let query = match reader_id {
            Some(reader_id) => query.with_reader(reader_id),
            None => query,
        };

        self.get_threads(query).await
    }
}
