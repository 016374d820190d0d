use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::entities::{CommentRecord, NewsRecord};

#[derive(sqlx::FromRow)]
pub(crate) struct NewsRow {
    pub(crate) id: Uuid,
    pub(crate) title: String,
    pub(crate) body: String,
    pub(crate) created_at: OffsetDateTime,
    pub(crate) score: Option<f32>,
}

impl From<NewsRow> for NewsRecord {
    fn from(row: NewsRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            body: row.body,
            date: row.created_at,
            score: row.score,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct CommentRow {
    pub(crate) id: Uuid,
    pub(crate) news_id: Uuid,
    pub(crate) text: String,
    pub(crate) created_at: OffsetDateTime,
}

impl From<CommentRow> for CommentRecord {
    fn from(row: CommentRow) -> Self {
        Self {
            id: row.id,
            news_id: row.news_id,
            text: row.text,
            date: row.created_at,
        }
    }
}
