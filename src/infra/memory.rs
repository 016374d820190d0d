//! In-memory repositories for local runs without Postgres and for tests.
//!
//! Records are kept in insertion order. Search scores a record by how often
//! the words of the term occur in its title and body, ignoring case.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::application::pagination::PageRequest;
use crate::application::repos::{
    CommentsRepo, CommentsWriteRepo, CreateCommentParams, CreateNewsParams, NewsRepo,
    NewsWriteRepo, RepoError, UpdateNewsParams,
};
use crate::domain::entities::{CommentRecord, NewsRecord};

#[derive(Clone, Default)]
pub struct InMemoryRepositories {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    news: RwLock<Vec<NewsRecord>>,
    comments: RwLock<Vec<CommentRecord>>,
}

impl InMemoryRepositories {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn news_count(&self) -> usize {
        self.inner.news.read().await.len()
    }

    pub async fn comment_count(&self) -> usize {
        self.inner.comments.read().await.len()
    }
}

fn relevance(record: &NewsRecord, words: &[String]) -> usize {
    let title = record.title.to_lowercase();
    let body = record.body.to_lowercase();
    words
        .iter()
        .map(|word| title.matches(word.as_str()).count() + body.matches(word.as_str()).count())
        .sum()
}

#[async_trait]
impl NewsRepo for InMemoryRepositories {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<NewsRecord>, RepoError> {
        let news = self.inner.news.read().await;
        Ok(news.iter().find(|record| record.id == id).cloned())
    }

    async fn list_page(&self, page: PageRequest) -> Result<Vec<NewsRecord>, RepoError> {
        let news = self.inner.news.read().await;
        Ok(page.slice(&news).to_vec())
    }

    async fn search(&self, term: &str, page: PageRequest) -> Result<Vec<NewsRecord>, RepoError> {
        let words: Vec<String> = term.split_whitespace().map(str::to_lowercase).collect();
        if words.is_empty() {
            return Ok(Vec::new());
        }

        let news = self.inner.news.read().await;
        let mut ranked: Vec<(usize, &NewsRecord)> = news
            .iter()
            .map(|record| (relevance(record, &words), record))
            .filter(|(score, _)| *score > 0)
            .collect();
        // Stable sort keeps insertion order among equal scores.
        ranked.sort_by(|a, b| b.0.cmp(&a.0));

        Ok(page
            .slice(&ranked)
            .iter()
            .map(|(score, record)| NewsRecord {
                score: Some(*score as f32),
                ..(*record).clone()
            })
            .collect())
    }
}

#[async_trait]
impl NewsWriteRepo for InMemoryRepositories {
    async fn create_news(&self, params: CreateNewsParams) -> Result<NewsRecord, RepoError> {
        let record = NewsRecord {
            id: Uuid::new_v4(),
            title: params.title,
            body: params.body,
            date: params.date,
            score: None,
        };
        self.inner.news.write().await.push(record.clone());
        Ok(record)
    }

    async fn update_news(&self, params: UpdateNewsParams) -> Result<NewsRecord, RepoError> {
        let mut news = self.inner.news.write().await;
        let record = news
            .iter_mut()
            .find(|record| record.id == params.id)
            .ok_or(RepoError::NotFound)?;
        record.title = params.title;
        record.body = params.body;
        Ok(record.clone())
    }

    async fn delete_news(&self, id: Uuid) -> Result<(), RepoError> {
        let mut news = self.inner.news.write().await;
        let before = news.len();
        news.retain(|record| record.id != id);
        if news.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl CommentsRepo for InMemoryRepositories {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<CommentRecord>, RepoError> {
        let comments = self.inner.comments.read().await;
        Ok(comments.iter().find(|comment| comment.id == id).cloned())
    }

    async fn list_page_for_news(
        &self,
        news_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<CommentRecord>, RepoError> {
        let comments = self.inner.comments.read().await;
        let owned: Vec<&CommentRecord> = comments
            .iter()
            .filter(|comment| comment.news_id == news_id)
            .collect();
        Ok(page.slice(&owned).iter().map(|comment| (*comment).clone()).collect())
    }

    async fn list_all_for_news(&self, news_id: Uuid) -> Result<Vec<CommentRecord>, RepoError> {
        let comments = self.inner.comments.read().await;
        Ok(comments
            .iter()
            .filter(|comment| comment.news_id == news_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl CommentsWriteRepo for InMemoryRepositories {
    async fn create_comments(
        &self,
        params: Vec<CreateCommentParams>,
    ) -> Result<Vec<CommentRecord>, RepoError> {
        let created: Vec<CommentRecord> = params
            .into_iter()
            .map(|params| CommentRecord {
                id: Uuid::new_v4(),
                news_id: params.news_id,
                text: params.text,
                date: params.date,
            })
            .collect();
        self.inner
            .comments
            .write()
            .await
            .extend(created.iter().cloned());
        Ok(created)
    }

    async fn delete_comment(&self, id: Uuid) -> Result<(), RepoError> {
        let mut comments = self.inner.comments.write().await;
        let before = comments.len();
        comments.retain(|comment| comment.id != id);
        if comments.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn delete_comments_for_news(&self, news_id: Uuid) -> Result<u64, RepoError> {
        let mut comments = self.inner.comments.write().await;
        let before = comments.len();
        comments.retain(|comment| comment.news_id != news_id);
        Ok((before - comments.len()) as u64)
    }
}
