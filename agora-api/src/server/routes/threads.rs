use crate::server::{
    Result, ServerError, ServerRouter,
    json::{Created, Json},
    query::Query,
    reader::{Actor, Reader},
};
use agora_common::model::{
    query::ThreadQuery,
    thread::{CreateComment, CreatePost, Thread, ThreadContent, ThreadExtended, ThreadId, ThreadTitle},
    user::UserId,
    vote::CreateVote,
};
use agora_db::service::ThreadService;
use axum::extract::State;
use axum_extra::routing::{RouterExt, TypedPath};
use serde::Deserialize;

pub fn routes() -> ServerRouter {
    ServerRouter::new()
        .typed_get(list_threads)
        .typed_post(create_post)
        .typed_get(get_thread)
        .typed_get(get_conversation)
        .typed_post(create_comment)
        .typed_put(cast_vote)
        .typed_delete(retract_vote)
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Scope {
    #[default]
    All,
    Posts,
    Comments,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize)]
struct ListThreadsParams {
    author: Option<UserId>,
    root: Option<ThreadId>,
    #[serde(default)]
    scope: Scope,
}

impl ListThreadsParams {
    fn into_query(self, reader: Reader) -> ThreadQuery {
        let mut query = ThreadQuery::new();
        if let Reader(Some(reader_id)) = reader {
            query = query.with_reader(reader_id);
        }
        if let Some(author_id) = self.author {
            query = query.with_author(author_id);
        }
        if let Some(root_id) = self.root {
            query = query.with_root(root_id);
        }
        match self.scope {
            Scope::All => query,
            Scope::Posts => query.posts_only(),
            Scope::Comments => query.comments_only(),
        }
    }
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/threads", rejection(ServerError))]
struct ThreadsPath();

async fn list_threads(
    ThreadsPath(): ThreadsPath,
    Query(params): Query<ListThreadsParams>,
    State(threads): State<ThreadService>,
    reader: Reader,
) -> Result<Json<Vec<ThreadExtended>>> {
    let threads = threads.get_threads(params.into_query(reader)).await?;

    Ok(Json(threads))
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize)]
struct CreatePostBody {
    title: ThreadTitle,
    content: ThreadContent,
}

async fn create_post(
    ThreadsPath(): ThreadsPath,
    State(threads): State<ThreadService>,
    actor: Actor,
    Json(body): Json<CreatePostBody>,
) -> Result<Created<Thread>> {
    let post = threads
        .create_post(&CreatePost {
            author_id: actor.user_id(),
            title: body.title,
            content: body.content,
        })
        .await?;

    Ok(Created(post))
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/threads/{id}", rejection(ServerError))]
struct ThreadPath {
    id: ThreadId,
}

async fn get_thread(
    ThreadPath { id }: ThreadPath,
    State(threads): State<ThreadService>,
    Reader(reader_id): Reader,
) -> Result<Json<ThreadExtended>> {
    let thread = threads.get_thread(reader_id, id).await?;

    Ok(Json(thread))
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/threads/{id}/conversation", rejection(ServerError))]
struct ConversationPath {
    id: ThreadId,
}

async fn get_conversation(
    ConversationPath { id }: ConversationPath,
    State(threads): State<ThreadService>,
    Reader(reader_id): Reader,
) -> Result<Json<Vec<ThreadExtended>>> {
    let conversation = threads.get_conversation(reader_id, id).await?;

    Ok(Json(conversation))
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/threads/{id}/comments", rejection(ServerError))]
struct CommentsPath {
    id: ThreadId,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize)]
struct CreateCommentBody {
    content: ThreadContent,
}

async fn create_comment(
    CommentsPath { id }: CommentsPath,
    State(threads): State<ThreadService>,
    actor: Actor,
    Json(body): Json<CreateCommentBody>,
) -> Result<Created<Thread>> {
    let comment = threads
        .create_comment(&CreateComment {
            author_id: actor.user_id(),
            parent_id: id,
            content: body.content,
        })
        .await?;

    Ok(Created(comment))
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/threads/{id}/vote", rejection(ServerError))]
struct VotePath {
    id: ThreadId,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Deserialize)]
struct CastVoteBody {
    upvote: bool,
}

/// Answers with the thread as the voter now sees it.
async fn cast_vote(
    VotePath { id }: VotePath,
    State(threads): State<ThreadService>,
    actor: Actor,
    Json(body): Json<CastVoteBody>,
) -> Result<Json<ThreadExtended>> {
    threads
        .create_vote(&CreateVote {
            voter_id: actor.user_id(),
            thread_id: id,
            upvote: body.upvote,
        })
        .await?;

    let thread = threads.get_thread(Some(actor.user_id()), id).await?;

    Ok(Json(thread))
}

async fn retract_vote(
    VotePath { id }: VotePath,
    State(threads): State<ThreadService>,
    actor: Actor,
) -> Result<Json<ThreadExtended>> {
    threads.delete_vote(actor.user_id(), id).await?;

    let thread = threads.get_thread(Some(actor.user_id()), id).await?;

    Ok(Json(thread))
}
