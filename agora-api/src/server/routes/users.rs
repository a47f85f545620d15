use crate::server::{
    Result, ServerError, ServerRouter,
    json::{Created, Json},
    reader::Reader,
};
use agora_common::model::{
    query::ThreadQuery,
    thread::ThreadExtended,
    user::{CreateUser, User, UserId},
};
use agora_db::service::ThreadService;
use axum::extract::State;
use axum_extra::routing::{RouterExt, TypedPath};
use serde::Deserialize;

pub fn routes() -> ServerRouter {
    ServerRouter::new()
        .typed_post(create_user)
        .typed_get(get_user)
        .typed_get(get_user_posts)
        .typed_get(get_user_comments)
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/users", rejection(ServerError))]
struct UsersPath();

async fn create_user(
    UsersPath(): UsersPath,
    State(threads): State<ThreadService>,
    Json(user): Json<CreateUser>,
) -> Result<Created<User>> {
    let user = threads.create_user(&user).await?;

    Ok(Created(user))
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/users/{id}", rejection(ServerError))]
struct GetUserPath {
    id: UserId,
}

async fn get_user(
    GetUserPath { id }: GetUserPath,
    State(threads): State<ThreadService>,
) -> Result<Json<User>> {
    let user = threads.get_user(id).await?;

    Ok(Json(user))
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/users/{id}/posts", rejection(ServerError))]
struct GetUserPostsPath {
    id: UserId,
}

async fn get_user_posts(
    GetUserPostsPath { id }: GetUserPostsPath,
    State(threads): State<ThreadService>,
    reader: Reader,
) -> Result<Json<Vec<ThreadExtended>>> {
    let posts = user_threads(&threads, id, reader, ThreadQuery::posts_only).await?;

    Ok(Json(posts))
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/users/{id}/comments", rejection(ServerError))]
struct GetUserCommentsPath {
    id: UserId,
}

async fn get_user_comments(
    GetUserCommentsPath { id }: GetUserCommentsPath,
    State(threads): State<ThreadService>,
    reader: Reader,
) -> Result<Json<Vec<ThreadExtended>>> {
    let comments = user_threads(&threads, id, reader, ThreadQuery::comments_only).await?;

    Ok(Json(comments))
}

/// An unknown user is a 404 rather than an empty list.
async fn user_threads(
    threads: &ThreadService,
    author_id: UserId,
    Reader(reader_id): Reader,
    scope: fn(ThreadQuery) -> ThreadQuery,
) -> Result<Vec<ThreadExtended>> {
    threads.get_user(author_id).await?;

    let query = scope(ThreadQuery::new().with_author(author_id));
    let query = match reader_id {
        Some(reader_id) => query.with_reader(reader_id),
        None => query,
    };

    Ok(threads.get_threads(query).await?)
}
