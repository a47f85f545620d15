use crate::{
    error::{DbError, Result},
    record::{ThreadRecord, UserRecord, VoteRecord, timestamp_now},
};
use agora_common::model::{
    thread::{CreateComment, CreatePost, Thread, ThreadId},
    user::{CreateUser, User, UserId, Username},
    vote::{CreateVote, Vote},
};
use sqlx::{
    SqlitePool, query, query_as,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
};
use std::str::FromStr;
use tracing::debug;

/// Access to the `users`, `threads` and `votes` tables.
#[derive(Clone, Debug)]
pub struct DbClient {
    pool: SqlitePool,
}

impl DbClient {
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        Ok(Self::new(pool))
    }

    /// An in-memory database lives exactly as long as its single connection.
    pub async fn connect_in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Ok(Self::new(pool))
    }

    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn fetch_user(&self, user_id: UserId) -> Result<Option<User>> {
        let record = query_as::<_, UserRecord>(
            "
            SELECT
                users.user_id,
                users.username,
                users.created_at
            FROM
                users
            WHERE
                users.user_id = ?
            ",
        )
        .bind(user_id.get())
        .fetch_optional(&self.pool)
        .await?;

        record
            .map(User::try_from)
            .transpose()
            .map_err(DbError::Data)
    }

    pub async fn fetch_user_by_username(&self, username: &Username) -> Result<Option<User>> {
        let record = query_as::<_, UserRecord>(
            "
            SELECT
                users.user_id,
                users.username,
                users.created_at
            FROM
                users
            WHERE
                users.username = ?
            ",
        )
        .bind(username.get())
        .fetch_optional(&self.pool)
        .await?;

        record
            .map(User::try_from)
            .transpose()
            .map_err(DbError::Data)
    }

    pub async fn create_user(&self, user: &CreateUser) -> Result<User> {
        let record = query_as::<_, UserRecord>(
            "
            INSERT INTO users (username, password, created_at)
            VALUES (?, ?, ?)
            RETURNING user_id, username, created_at
            ",
        )
        .bind(user.username.get())
        .bind(user.password.as_bytes())
        .bind(timestamp_now())
        .fetch_one(&self.pool)
        .await?;

        debug!(user_id = record.user_id, username = %user.username, "Created user");

        User::try_from(record).map_err(DbError::Data)
    }

    pub async fn fetch_thread(&self, thread_id: ThreadId) -> Result<Option<Thread>> {
        let record = query_as::<_, ThreadRecord>(
            "
            SELECT
                threads.thread_id,
                threads.root_id,
                threads.parent_id,
                threads.author_id,
                threads.created_at,
                threads.title,
                threads.content
            FROM
                threads
            WHERE
                threads.thread_id = ?
            ",
        )
        .bind(thread_id.get())
        .fetch_optional(&self.pool)
        .await?;

        record
            .map(Thread::try_from)
            .transpose()
            .map_err(DbError::Data)
    }

    /// Inserts a root post. Its id is generated up front so it can double as its own root id.
    pub async fn create_post(&self, post: &CreatePost) -> Result<Thread> {
        let thread_id = ThreadId::generate();

        let record = query_as::<_, ThreadRecord>(
            "
            INSERT INTO threads (thread_id, root_id, parent_id, author_id, created_at, title, content)
            VALUES (?, ?, NULL, ?, ?, ?, ?)
            RETURNING thread_id, root_id, parent_id, author_id, created_at, title, content
            ",
        )
        .bind(thread_id.get())
        .bind(thread_id.get())
        .bind(post.author_id.get())
        .bind(timestamp_now())
        .bind(post.title.get())
        .bind(post.content.get())
        .fetch_one(&self.pool)
        .await?;

        debug!(%thread_id, author_id = %post.author_id, "Created post");

        Thread::try_from(record).map_err(DbError::Data)
    }

    /// Inserts a reply under `comment.parent_id`, inheriting the parent's root id.
    ///
    /// The parent lookup is part of the insert, so no row is written when the parent is missing.
    pub async fn create_comment(&self, comment: &CreateComment) -> Result<Thread> {
        let thread_id = ThreadId::generate();

        let record = query_as::<_, ThreadRecord>(
            "
            INSERT INTO threads (thread_id, root_id, parent_id, author_id, created_at, title, content)
            SELECT
                ?, parents.root_id, parents.thread_id, ?, ?, NULL, ?
            FROM
                threads AS parents
            WHERE
                parents.thread_id = ?
            RETURNING thread_id, root_id, parent_id, author_id, created_at, title, content
            ",
        )
        .bind(thread_id.get())
        .bind(comment.author_id.get())
        .bind(timestamp_now())
        .bind(comment.content.get())
        .bind(comment.parent_id.get())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DbError::ThreadNotFound(comment.parent_id))?;

        debug!(
            %thread_id,
            parent_id = %comment.parent_id,
            author_id = %comment.author_id,
            "Created comment"
        );

        Thread::try_from(record).map_err(DbError::Data)
    }

    /// Casts or replaces the voter's vote on a thread in a single statement.
    pub async fn upsert_vote(&self, vote: &CreateVote) -> Result<Vote> {
        let record = query_as::<_, VoteRecord>(
            "
            INSERT INTO votes (voter_id, thread_id, upvote, created_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT (voter_id, thread_id) DO UPDATE SET
                upvote = excluded.upvote,
                created_at = excluded.created_at
            RETURNING vote_id, voter_id, thread_id, upvote, created_at
            ",
        )
        .bind(vote.voter_id.get())
        .bind(vote.thread_id.get())
        .bind(vote.upvote)
        .bind(timestamp_now())
        .fetch_one(&self.pool)
        .await?;

        debug!(
            vote_id = record.vote_id,
            voter_id = %vote.voter_id,
            thread_id = %vote.thread_id,
            upvote = vote.upvote,
            "Upserted vote"
        );

        Ok(record.into())
    }

    /// Returns whether a vote was removed.
    pub async fn delete_vote(&self, voter_id: UserId, thread_id: ThreadId) -> Result<bool> {
        let deleted = query(
            "
            DELETE FROM votes
            WHERE
                votes.voter_id = ?
                AND votes.thread_id = ?
            ",
        )
        .bind(voter_id.get())
        .bind(thread_id.get())
        .execute(&self.pool)
        .await?
        .rows_affected();

        debug!(%voter_id, %thread_id, deleted, "Deleted vote");

        Ok(deleted > 0)
    }
}
