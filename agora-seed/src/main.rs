use agora_common::model::{
    InvalidTextLengthError,
    thread::{CreateComment, CreatePost, Thread, ThreadContent, ThreadTitle},
    user::{CreateUser, Password, User, UserId, Username},
    vote::CreateVote,
};
use agora_db::{client::DbClient, error::DbError, service::ThreadService};
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Error)]
enum SeedError {
    #[error("Error parsing .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),
    #[error("Error parsing environment: {0}")]
    Envy(#[from] envy::Error),
    #[error("Error writing seed data: {0}")]
    Database(#[from] DbError),
    #[error("Seed data is invalid: {0}")]
    Model(#[from] InvalidTextLengthError),
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize)]
struct Env {
    database_url: String,
}

fn install_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agora_seed=info,agora_db=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn get_env() -> Result<Env, SeedError> {
    if let Err(e) = dotenvy::dotenv() {
        if e.not_found() {
            debug!("No .dotenv file found");
        } else {
            return Err(e.into());
        }
    }

    envy::from_env().map_err(SeedError::from)
}

/// Reuses an existing user so the seed can run against a populated database.
async fn user(db: &DbClient, threads: &ThreadService, username: &str) -> Result<User, SeedError> {
    let username = Username::new(username)?;

    if let Some(user) = db.fetch_user_by_username(&username).await? {
        info!(user_id = %user.id, %username, "Reusing user");
        return Ok(user);
    }

    let user = threads
        .create_user(&CreateUser {
            username,
            password: Password::new("password")?,
        })
        .await?;
    info!(user_id = %user.id, username = %user.username, "Seeded user");

    Ok(user)
}

async fn post(
    threads: &ThreadService,
    author_id: UserId,
    title: &str,
    content: &str,
) -> Result<Thread, SeedError> {
    let post = threads
        .create_post(&CreatePost {
            author_id,
            title: ThreadTitle::new(title)?,
            content: ThreadContent::new(content)?,
        })
        .await?;
    info!(thread_id = %post.id, title, "Seeded post");

    Ok(post)
}

#[tokio::main]
async fn main() -> Result<(), SeedError> {
    install_tracing();
    let env = get_env()?;

    let db = Arc::new(DbClient::connect(&env.database_url, 1).await?);
    db.migrate().await?;
    let threads = ThreadService::new(Arc::clone(&db));

    let dhh = user(&db, &threads, "dhh").await?;
    let primeagen = user(&db, &threads, "primeagen").await?;

    post(
        &threads,
        primeagen.id,
        "Reaction: Turbo 8 is dropping Typescript",
        "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Morbi hendrerit eros a faucibus porttitor",
    )
    .await?;
    post(
        &threads,
        dhh.id,
        "Turbo 8 is dropping Typescript",
        "Class aptent taciti sociosqu ad litora torquent per conubia nostra, per inceptos himenaeos",
    )
    .await?;
    let python_post = post(
        &threads,
        primeagen.id,
        "Reaction: Python Is BAD For Beginners",
        "Class aptent taciti sociosqu ad litora torquent per conubia nostra, per inceptos himenaeos",
    )
    .await?;

    let comment = threads
        .create_comment(&CreateComment {
            author_id: primeagen.id,
            parent_id: python_post.id,
            content: ThreadContent::new("Stop the cap")?,
        })
        .await?;
    info!(thread_id = %comment.id, parent_id = %python_post.id, "Seeded comment");

    for (voter, upvote) in [(&primeagen, false), (&dhh, true)] {
        let vote = threads
            .create_vote(&CreateVote {
                voter_id: voter.id,
                thread_id: python_post.id,
                upvote,
            })
            .await?;
        info!(vote_id = %vote.id, voter = %voter.username, upvote, "Seeded vote");
    }

    info!("Seeding complete");
    Ok(())
}
