mod common;

use agora_common::model::{
    query::ThreadQuery,
    thread::{CreateComment, ThreadContent},
    vote::{CreateVote, ReaderVote},
};
use common::{file_service, post, user};

const WRITERS: usize = 40;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_comments_on_one_post_all_land() {
    let (_dir, service) = file_service(5).await;
    let author = user(&service, "dhh").await;
    let root = post(&service, author.id, "Busy thread").await;
    let (author_id, root_id) = (author.id, root.id);

    let mut tasks = Vec::with_capacity(WRITERS);
    for i in 0..WRITERS {
        let service = service.clone();
        tasks.push(tokio::spawn(async move {
            service
                .create_comment(&CreateComment {
                    author_id,
                    parent_id: root_id,
                    content: ThreadContent::new(format!("Reply number {i}")).unwrap(),
                })
                .await
        }));
    }

    for task in tasks {
        let comment = task.await.unwrap().unwrap();
        assert_eq!(comment.root_id, root.id);
        assert_eq!(comment.parent_id, Some(root.id));
    }

    let conversation = service.get_conversation(None, root.id).await.unwrap();
    assert_eq!(conversation.len(), WRITERS + 1);
    assert_eq!(conversation[0].comment_count, u64::try_from(WRITERS).unwrap());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_votes_by_one_voter_leave_a_single_vote() {
    let (_dir, service) = file_service(5).await;
    let author = user(&service, "primeagen").await;
    let voter = user(&service, "dhh").await;
    let thread = post(&service, author.id, "Contested").await;
    let (voter_id, thread_id) = (voter.id, thread.id);

    let mut tasks = Vec::with_capacity(WRITERS);
    for i in 0..WRITERS {
        let service = service.clone();
        tasks.push(tokio::spawn(async move {
            service
                .create_vote(&CreateVote {
                    voter_id,
                    thread_id,
                    upvote: i % 2 == 0,
                })
                .await
        }));
    }

    let mut vote_ids = Vec::with_capacity(WRITERS);
    for task in tasks {
        vote_ids.push(task.await.unwrap().unwrap().id);
    }
    vote_ids.dedup();
    assert_eq!(vote_ids.len(), 1);

    let extended = service.get_thread(Some(voter.id), thread.id).await.unwrap();
    assert_eq!(extended.upvote_count + extended.downvote_count, 1);
    assert_ne!(extended.vote, ReaderVote::None);

    let threads = service
        .get_threads(ThreadQuery::new().with_author(author.id))
        .await
        .unwrap();
    assert_eq!(threads.len(), 1);
}
