//! Filters over the thread hierarchy.
//!
//! A [`ThreadQuery`] is a plain value: every `with_*` call returns a new query
//! and leaves the one it was called on untouched, so a base query can be shared
//! and refined into several variants.

use crate::model::{thread::ThreadId, user::UserId};
use thiserror::Error;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Error)]
#[error("A thread query cannot be restricted to both posts and comments")]
pub struct ContradictoryThreadScopeError;

/// Which part of the hierarchy a query selects.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub enum ThreadScope {
    #[default]
    All,
    /// Threads without a parent.
    PostsOnly,
    /// Threads with a parent.
    CommentsOnly,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Hash)]
pub struct ThreadQuery {
    reader_id: Option<UserId>,
    author_id: Option<UserId>,
    root_id: Option<ThreadId>,
    root_threads_only: bool,
    child_threads_only: bool,
}

impl ThreadQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes each thread's vote state from this reader's perspective.
    #[must_use]
    pub fn with_reader(mut self, reader_id: UserId) -> Self {
        self.reader_id = Some(reader_id);
        self
    }

    #[must_use]
    pub fn with_author(mut self, author_id: UserId) -> Self {
        self.author_id = Some(author_id);
        self
    }

    /// Restricts to one post and every reply under it.
    #[must_use]
    pub fn with_root(mut self, root_id: ThreadId) -> Self {
        self.root_id = Some(root_id);
        self
    }

    #[must_use]
    pub fn posts_only(mut self) -> Self {
        self.root_threads_only = true;
        self
    }

    #[must_use]
    pub fn comments_only(mut self) -> Self {
        self.child_threads_only = true;
        self
    }

    #[must_use]
    pub fn reader_id(&self) -> Option<UserId> {
        self.reader_id
    }

    #[must_use]
    pub fn author_id(&self) -> Option<UserId> {
        self.author_id
    }

    #[must_use]
    pub fn root_id(&self) -> Option<ThreadId> {
        self.root_id
    }

    pub fn scope(&self) -> Result<ThreadScope, ContradictoryThreadScopeError> {
        match (self.root_threads_only, self.child_threads_only) {
            (false, false) => Ok(ThreadScope::All),
            (true, false) => Ok(ThreadScope::PostsOnly),
            (false, true) => Ok(ThreadScope::CommentsOnly),
            (true, true) => Err(ContradictoryThreadScopeError),
        }
    }

    pub fn validate(&self) -> Result<(), ContradictoryThreadScopeError> {
        self.scope().map(drop)
    }
}

#[cfg(test)]
mod tests {
    use super::{ContradictoryThreadScopeError, ThreadQuery, ThreadScope};
    use crate::model::{thread::ThreadId, user::UserId};

    #[test]
    fn empty_query_selects_everything() {
        let query = ThreadQuery::new();

        assert_eq!(query.reader_id(), None);
        assert_eq!(query.author_id(), None);
        assert_eq!(query.root_id(), None);
        assert_eq!(query.scope(), Ok(ThreadScope::All));
    }

    #[test]
    fn refining_leaves_the_base_query_untouched() {
        let base = ThreadQuery::new().with_reader(UserId::new(1)).posts_only();
        let by_author = base.with_author(UserId::new(0));

        assert_eq!(base.author_id(), None);
        assert_eq!(by_author.author_id(), Some(UserId::new(0)));
        assert_eq!(by_author.reader_id(), Some(UserId::new(1)));
        assert_eq!(by_author.scope(), Ok(ThreadScope::PostsOnly));
    }

    #[test]
    fn root_filter_is_kept() {
        let root = ThreadId::generate();
        let query = ThreadQuery::new().with_root(root).comments_only();

        assert_eq!(query.root_id(), Some(root));
        assert_eq!(query.scope(), Ok(ThreadScope::CommentsOnly));
    }

    #[test]
    fn posts_and_comments_only_contradict() {
        let query = ThreadQuery::new().posts_only().comments_only();

        assert_eq!(query.scope(), Err(ContradictoryThreadScopeError));
        assert_eq!(query.validate(), Err(ContradictoryThreadScopeError));
    }
}
