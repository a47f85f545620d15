#![allow(dead_code)]

use agora_common::model::{
    thread::{CreateComment, CreatePost, Thread, ThreadContent, ThreadId, ThreadTitle},
    user::{CreateUser, Password, User, UserId, Username},
    vote::{CreateVote, Vote},
};
use agora_db::{client::DbClient, service::ThreadService};
use std::sync::Arc;
use tempfile::TempDir;

pub async fn service() -> ThreadService {
    let db = DbClient::connect_in_memory().await.unwrap();
    db.migrate().await.unwrap();
    ThreadService::new(Arc::new(db))
}

/// A database file shared by several pooled connections. Keep the dir alive for the test.
pub async fn file_service(max_connections: u32) -> (TempDir, ThreadService) {
    let dir = TempDir::new().unwrap();
    let url = format!("sqlite://{}", dir.path().join("agora.db").display());

    let db = DbClient::connect(&url, max_connections).await.unwrap();
    db.migrate().await.unwrap();
    (dir, ThreadService::new(Arc::new(db)))
}

pub async fn user(service: &ThreadService, username: &str) -> User {
    service
        .create_user(&CreateUser {
            username: Username::new(username).unwrap(),
            password: Password::new("password").unwrap(),
        })
        .await
        .unwrap()
}

pub async fn post(service: &ThreadService, author_id: UserId, title: &str) -> Thread {
    service
        .create_post(&CreatePost {
            author_id,
            title: ThreadTitle::new(title).unwrap(),
            content: ThreadContent::new("Lorem ipsum dolor sit amet").unwrap(),
        })
        .await
        .unwrap()
}

pub async fn comment(
    service: &ThreadService,
    author_id: UserId,
    parent_id: ThreadId,
    content: &str,
) -> Thread {
    service
        .create_comment(&CreateComment {
            author_id,
            parent_id,
            content: ThreadContent::new(content).unwrap(),
        })
        .await
        .unwrap()
}

pub async fn vote(
    service: &ThreadService,
    voter_id: UserId,
    thread_id: ThreadId,
    upvote: bool,
) -> Vote {
    service
        .create_vote(&CreateVote {
            voter_id,
            thread_id,
            upvote,
        })
        .await
        .unwrap()
}
