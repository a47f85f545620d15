mod common;

use agora_common::model::{
    thread::{CreateComment, CreatePost, ThreadContent, ThreadId, ThreadTitle},
    user::{CreateUser, Password, UserId, Username},
    vote::ReaderVote,
};
use agora_db::error::DbError;
use common::{comment, post, service, user};

#[tokio::test]
async fn posts_are_their_own_root() {
    let service = service().await;
    let primeagen = user(&service, "primeagen").await;

    let post = post(&service, primeagen.id, "Reaction: Python Is BAD For Beginners").await;

    assert_eq!(post.root_id, post.id);
    assert_eq!(post.parent_id, None);
    assert!(post.is_root());
    assert_eq!(post.author_id, primeagen.id);
    assert_eq!(
        post.title.as_ref().map(ThreadTitle::get),
        Some("Reaction: Python Is BAD For Beginners")
    );
}

#[tokio::test]
async fn comments_inherit_the_root_of_arbitrarily_deep_chains() {
    let service = service().await;
    let dhh = user(&service, "dhh").await;
    let primeagen = user(&service, "primeagen").await;

    let post = post(&service, primeagen.id, "Reaction: Turbo 8 is dropping Typescript").await;
    let reply = comment(&service, dhh.id, post.id, "Stop the cap").await;
    let nested = comment(&service, primeagen.id, reply.id, "No cap").await;
    let deeper = comment(&service, dhh.id, nested.id, "Cap").await;

    assert_eq!(reply.root_id, post.id);
    assert_eq!(reply.parent_id, Some(post.id));
    assert_eq!(reply.title, None);
    assert!(!reply.is_root());

    assert_eq!(nested.root_id, post.id);
    assert_eq!(nested.parent_id, Some(reply.id));

    assert_eq!(deeper.root_id, post.id);
    assert_eq!(deeper.parent_id, Some(nested.id));
}

#[tokio::test]
async fn commenting_on_a_missing_parent_is_not_found() {
    let service = service().await;
    let dhh = user(&service, "dhh").await;
    let missing = ThreadId::generate();

    let err = service
        .create_comment(&CreateComment {
            author_id: dhh.id,
            parent_id: missing,
            content: ThreadContent::new("Hello?").unwrap(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, DbError::ThreadNotFound(id) if id == missing));
    assert!(err.is_not_found());
}

#[tokio::test]
async fn posting_as_an_unknown_author_is_a_dependency_error() {
    let service = service().await;

    let err = service
        .create_post(&CreatePost {
            author_id: UserId::new(42),
            title: ThreadTitle::new("Orphan").unwrap(),
            content: ThreadContent::new("Nobody wrote this").unwrap(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, DbError::Dependency(_)), "{err:?}");
}

#[tokio::test]
async fn duplicate_usernames_conflict() {
    let service = service().await;
    user(&service, "dhh").await;

    let err = service
        .create_user(&CreateUser {
            username: Username::new("dhh").unwrap(),
            password: Password::new("other").unwrap(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, DbError::Conflict(_)), "{err:?}");
}

#[tokio::test]
async fn users_can_be_fetched_back() {
    let service = service().await;
    let dhh = user(&service, "dhh").await;

    assert_eq!(service.get_user(dhh.id).await.unwrap(), dhh);

    let err = service.get_user(UserId::new(dhh.id.get() + 1)).await.unwrap_err();
    assert!(matches!(err, DbError::UserNotFound(_)));
}

#[tokio::test]
async fn getting_a_missing_thread_is_not_found() {
    let service = service().await;
    let missing = ThreadId::generate();

    let err = service.get_thread(None, missing).await.unwrap_err();

    assert!(matches!(err, DbError::ThreadNotFound(id) if id == missing));
}

#[tokio::test]
async fn extended_thread_joins_the_author_and_counts_replies() {
    let service = service().await;
    let dhh = user(&service, "dhh").await;
    let primeagen = user(&service, "primeagen").await;

    let post = post(&service, dhh.id, "Turbo 8 is dropping Typescript").await;
    let first = comment(&service, primeagen.id, post.id, "Based").await;
    comment(&service, dhh.id, first.id, "Thanks").await;
    comment(&service, primeagen.id, post.id, "Cringe").await;

    let extended = service.get_thread(None, post.id).await.unwrap();

    assert_eq!(extended.thread, post);
    assert_eq!(extended.author.get(), "dhh");
    assert_eq!(extended.vote, ReaderVote::None);
    assert_eq!(extended.comment_count, 3);
    assert_eq!(extended.upvote_count, 0);
    assert_eq!(extended.downvote_count, 0);

    let reply = service.get_thread(None, first.id).await.unwrap();
    assert_eq!(reply.author.get(), "primeagen");
    assert_eq!(reply.comment_count, 2);
}

#[tokio::test]
async fn conversation_is_the_root_and_every_reply_in_order() {
    let service = service().await;
    let dhh = user(&service, "dhh").await;
    let primeagen = user(&service, "primeagen").await;

    let post = post(&service, primeagen.id, "Reaction: Turbo 8 is dropping Typescript").await;
    let other = post_elsewhere(&service, dhh.id).await;
    let first = comment(&service, dhh.id, post.id, "Stop the cap").await;
    let second = comment(&service, primeagen.id, first.id, "No").await;
    comment(&service, primeagen.id, other, "Elsewhere").await;

    let conversation = service
        .get_conversation(Some(dhh.id), second.id)
        .await
        .unwrap();

    let ids: Vec<_> = conversation.iter().map(|thread| thread.thread.id).collect();
    assert_eq!(ids, vec![post.id, first.id, second.id]);
}

async fn post_elsewhere(service: &agora_db::service::ThreadService, author_id: UserId) -> ThreadId {
    post(service, author_id, "Turbo 8 is dropping Typescript").await.id
}
