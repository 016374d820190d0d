//! Domain entities mirrored from persistent storage.

use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::error::DomainError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewsRecord {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    /// Relevance rank; only populated by full-text search.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentRecord {
    pub id: Uuid,
    pub news_id: Uuid,
    pub text: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
}

/// One news record plus a page of its comments, assembled per request.
///
/// Never persisted as a unit: the two halves live in separate stores, and
/// `comments` holds at most the requested page, not the full child set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewsWithComments {
    #[serde(flatten)]
    pub news: NewsRecord,
    pub comments: Vec<CommentRecord>,
}

impl NewsWithComments {
    pub fn compose(news: NewsRecord, comments: Vec<CommentRecord>) -> Result<Self, DomainError> {
        if let Some(stray) = comments.iter().find(|comment| comment.news_id != news.id) {
            return Err(DomainError::invariant(format!(
                "comment `{}` belongs to news `{}`, not `{}`",
                stray.id, stray.news_id, news.id
            )));
        }
        Ok(Self { news, comments })
    }

    pub fn id(&self) -> Uuid {
        self.news.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn news(id: Uuid) -> NewsRecord {
        NewsRecord {
            id,
            title: "A".into(),
            body: "B".into(),
            date: OffsetDateTime::UNIX_EPOCH,
            score: None,
        }
    }

    fn comment(news_id: Uuid) -> CommentRecord {
        CommentRecord {
            id: Uuid::new_v4(),
            news_id,
            text: "c".into(),
            date: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn compose_rejects_foreign_comments() {
        let id = Uuid::new_v4();
        let result = NewsWithComments::compose(news(id), vec![comment(id), comment(Uuid::new_v4())]);
        assert!(matches!(result, Err(DomainError::Invariant { .. })));
    }

    #[test]
    fn aggregate_serializes_flat() {
        let id = Uuid::new_v4();
        let aggregate = NewsWithComments::compose(news(id), vec![comment(id)]).expect("valid");
        let json = serde_json::to_value(&aggregate).expect("serializes");

        assert_eq!(json["id"], id.to_string());
        assert_eq!(json["title"], "A");
        assert_eq!(json["comments"].as_array().map(Vec::len), Some(1));
        assert!(json.get("score").is_none());
        assert_eq!(json["date"], "1970-01-01T00:00:00Z");
    }
}
