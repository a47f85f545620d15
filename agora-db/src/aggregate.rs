//! Read-time aggregation of threads.
//!
//! Every extended thread is computed fresh from the tables: vote tallies and the
//! reply count come from correlated subqueries, the reader's own vote from the
//! reader's row in `votes`, and the author name from `users`. Results are ordered
//! by creation time, with insertion order breaking ties.

use crate::{
    client::DbClient,
    error::{DbError, Result},
    record::ThreadExtendedRecord,
};
use agora_common::model::{
    ModelValidationError,
    query::{ThreadQuery, ThreadScope},
    thread::{ThreadExtended, ThreadId},
    user::UserId,
};
use sqlx::{QueryBuilder, Sqlite};

const SELECT_THREADS_EXTENDED: &str = "
    SELECT
        threads.thread_id,
        threads.root_id,
        threads.parent_id,
        threads.author_id,
        threads.created_at,
        threads.title,
        threads.content,
        users.username,
        (
            SELECT COUNT(*) FROM votes
            WHERE votes.thread_id = threads.thread_id AND votes.upvote
        ) AS upvote_count,
        (
            SELECT COUNT(*) FROM votes
            WHERE votes.thread_id = threads.thread_id AND NOT votes.upvote
        ) AS downvote_count,
        (
            SELECT COUNT(*) FROM threads AS replies
            WHERE replies.root_id = threads.root_id
                AND replies.parent_id IS NOT NULL
                AND replies.thread_id <> threads.thread_id
        ) AS comment_count,
";

fn select_threads_extended(
    query: &ThreadQuery,
    scope: ThreadScope,
    thread_id: Option<ThreadId>,
) -> QueryBuilder<'static, Sqlite> {
    let mut builder = QueryBuilder::new(SELECT_THREADS_EXTENDED);

    if let Some(reader_id) = query.reader_id() {
        builder.push(
            "(
                SELECT votes.upvote FROM votes
                WHERE votes.thread_id = threads.thread_id AND votes.voter_id = ",
        );
        builder.push_bind(reader_id.get());
        builder.push(") AS reader_upvote");
    } else {
        builder.push("NULL AS reader_upvote");
    }

    builder.push(
        "
        FROM
            threads JOIN users ON users.user_id = threads.author_id
        WHERE
            TRUE",
    );

    if let Some(thread_id) = thread_id {
        builder.push(" AND threads.thread_id = ");
        builder.push_bind(thread_id.get());
    }

    if let Some(author_id) = query.author_id() {
        builder.push(" AND threads.author_id = ");
        builder.push_bind(author_id.get());
    }

    if let Some(root_id) = query.root_id() {
        builder.push(" AND threads.root_id = ");
        builder.push_bind(root_id.get());
    }

    match scope {
        ThreadScope::All => {}
        ThreadScope::PostsOnly => {
            builder.push(" AND threads.parent_id IS NULL");
        }
        ThreadScope::CommentsOnly => {
            builder.push(" AND threads.parent_id IS NOT NULL");
        }
    }

    builder.push(" ORDER BY threads.created_at ASC, threads.rowid ASC");
    builder
}

impl DbClient {
    /// Fetches every thread matching `query`. No match is an empty vec, not an error.
    pub async fn fetch_threads_extended(&self, query: &ThreadQuery) -> Result<Vec<ThreadExtended>> {
        let scope = query.scope().map_err(ModelValidationError::from)?;

        let mut builder = select_threads_extended(query, scope, None);
        let records = builder
            .build_query_as::<ThreadExtendedRecord>()
            .fetch_all(self.pool())
            .await?;

        records
            .into_iter()
            .map(ThreadExtended::try_from)
            .collect::<Result<_, _>>()
            .map_err(DbError::Data)
    }

    pub async fn fetch_thread_extended(
        &self,
        reader_id: Option<UserId>,
        thread_id: ThreadId,
    ) -> Result<Option<ThreadExtended>> {
        let query = match reader_id {
            Some(reader_id) => ThreadQuery::new().with_reader(reader_id),
            None => ThreadQuery::new(),
        };

        let mut builder = select_threads_extended(&query, ThreadScope::All, Some(thread_id));
        let record = builder
            .build_query_as::<ThreadExtendedRecord>()
            .fetch_optional(self.pool())
            .await?;

        record
            .map(ThreadExtended::try_from)
            .transpose()
            .map_err(DbError::Data)
    }
}
