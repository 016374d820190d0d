//! Repository traits describing persistence adapters.

use async_trait::async_trait;
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::application::pagination::PageRequest;
use crate::domain::entities::{CommentRecord, NewsRecord};

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("duplicate record violates unique constraint `{constraint}`")]
    Duplicate { constraint: String },
    #[error("resource not found")]
    NotFound,
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("integrity error: {message}")]
    Integrity { message: String },
    #[error("database timeout")]
    Timeout,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct CreateNewsParams {
    pub title: String,
    pub body: String,
    pub date: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct UpdateNewsParams {
    pub id: Uuid,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone)]
pub struct CreateCommentParams {
    pub news_id: Uuid,
    pub text: String,
    pub date: OffsetDateTime,
}

#[async_trait]
pub trait NewsRepo: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<NewsRecord>, RepoError>;

    /// Page through news in insertion order.
    async fn list_page(&self, page: PageRequest) -> Result<Vec<NewsRecord>, RepoError>;

    /// Full-text search ranked by relevance score, best first.
    async fn search(&self, term: &str, page: PageRequest) -> Result<Vec<NewsRecord>, RepoError>;
}

#[async_trait]
pub trait NewsWriteRepo: Send + Sync {
    async fn create_news(&self, params: CreateNewsParams) -> Result<NewsRecord, RepoError>;

    async fn update_news(&self, params: UpdateNewsParams) -> Result<NewsRecord, RepoError>;

    async fn delete_news(&self, id: Uuid) -> Result<(), RepoError>;
}

#[async_trait]
pub trait CommentsRepo: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<CommentRecord>, RepoError>;

    async fn list_page_for_news(
        &self,
        news_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<CommentRecord>, RepoError>;

    async fn list_all_for_news(&self, news_id: Uuid) -> Result<Vec<CommentRecord>, RepoError>;
}

#[async_trait]
pub trait CommentsWriteRepo: Send + Sync {
    /// Insert a batch, returning the stored comments in input order.
    async fn create_comments(
        &self,
        params: Vec<CreateCommentParams>,
    ) -> Result<Vec<CommentRecord>, RepoError>;

    async fn delete_comment(&self, id: Uuid) -> Result<(), RepoError>;

    /// Remove every comment of a news record, returning how many were deleted.
    async fn delete_comments_for_news(&self, news_id: Uuid) -> Result<u64, RepoError>;
}
