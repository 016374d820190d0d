//! Postgres adapter tests.
//!
//! - Each test gets a fresh database with migrations applied (`#[sqlx::test]`).
//! - Marked `#[ignore]` so they only run with `DATABASE_URL` pointing at a server:
//!   `cargo test --test postgres -- --ignored`.

use std::sync::Arc;

use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

use nms::application::news::{NewsError, NewsService};
use nms::application::pagination::PageRequest;
use nms::application::repos::{
    CommentsRepo, CommentsWriteRepo, CreateCommentParams, CreateNewsParams, NewsRepo,
    NewsWriteRepo, RepoError, UpdateNewsParams,
};
use nms::infra::db::PostgresRepositories;
use nms_api_types::NewsPayload;

fn page(page: u32, limit: u32) -> PageRequest {
    PageRequest::new(page, limit).expect("valid page")
}

async fn seed(repos: &PostgresRepositories, title: &str, body: &str) -> nms::domain::entities::NewsRecord {
    repos
        .create_news(CreateNewsParams {
            title: title.into(),
            body: body.into(),
            date: OffsetDateTime::now_utc(),
        })
        .await
        .expect("create news")
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn news_pages_follow_insertion_order(pool: PgPool) {
    let repos = PostgresRepositories::new(pool);
    let first = seed(&repos, "first", "a").await;
    let second = seed(&repos, "second", "b").await;
    let third = seed(&repos, "third", "c").await;

    let head = repos.list_page(page(0, 2)).await.expect("list");
    let tail = repos.list_page(page(1, 2)).await.expect("list");

    let ids: Vec<Uuid> = head.iter().chain(tail.iter()).map(|news| news.id).collect();
    assert_eq!(ids, vec![first.id, second.id, third.id]);
    assert!(repos.list_page(page(3, 2)).await.expect("list").is_empty());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn search_ranks_matches_and_skips_others(pool: PgPool) {
    let repos = PostgresRepositories::new(pool);
    seed(&repos, "Rust", "rust rust compiler release").await;
    seed(&repos, "Weekly", "a short rust mention").await;
    seed(&repos, "Gardening", "tomatoes").await;

    let hits = repos.search("rust", page(0, 10)).await.expect("search");

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].title, "Rust");
    assert!(hits.iter().all(|hit| hit.score.is_some()));
    assert!(hits[0].score >= hits[1].score);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn comment_batch_keeps_input_order(pool: PgPool) {
    let repos = PostgresRepositories::new(pool);
    let news = seed(&repos, "with comments", "b").await;
    let params = (0..5)
        .map(|index| CreateCommentParams {
            news_id: news.id,
            text: format!("c{index}"),
            date: news.date,
        })
        .collect();

    let created = repos.create_comments(params).await.expect("create comments");

    let texts: Vec<&str> = created.iter().map(|comment| comment.text.as_str()).collect();
    assert_eq!(texts, vec!["c0", "c1", "c2", "c3", "c4"]);

    let second_page = repos
        .list_page_for_news(news.id, page(1, 2))
        .await
        .expect("page");
    assert_eq!(second_page, created[2..4].to_vec());

    let found = CommentsRepo::find_by_id(&repos, created[0].id)
        .await
        .expect("find");
    assert_eq!(found.as_ref(), Some(&created[0]));

    assert_eq!(
        repos
            .delete_comments_for_news(news.id)
            .await
            .expect("delete"),
        5
    );
    assert!(repos.list_all_for_news(news.id).await.expect("all").is_empty());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn missing_rows_report_not_found(pool: PgPool) {
    let repos = PostgresRepositories::new(pool);
    let id = Uuid::new_v4();

    assert!(matches!(
        repos
            .update_news(UpdateNewsParams {
                id,
                title: "t".into(),
                body: "b".into(),
            })
            .await,
        Err(RepoError::NotFound)
    ));
    assert!(matches!(
        repos.delete_news(id).await,
        Err(RepoError::NotFound)
    ));
    assert!(
        NewsRepo::find_by_id(&repos, id)
            .await
            .expect("find")
            .is_none()
    );
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn service_round_trip_on_postgres(pool: PgPool) {
    let repos = Arc::new(PostgresRepositories::new(pool));
    let service = NewsService::new(repos.clone(), repos.clone(), repos.clone(), repos);

    let created = service
        .create(NewsPayload::new("A", "B").with_comment("c1").with_comment("c2"))
        .await
        .expect("create");
    let id = created.id().to_string();

    let read = service.read_by_id(&id, None, None).await.expect("read");
    assert_eq!(read, created);

    service.delete(&id).await.expect("delete");
    assert!(matches!(
        service.read_by_id(&id, None, None).await,
        Err(NewsError::NotFound { .. })
    ));
}
