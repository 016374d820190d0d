use nms_api_types::NewsPayload;
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::application::repos::{CreateCommentParams, CreateNewsParams, UpdateNewsParams};
use crate::domain::entities::{NewsRecord, NewsWithComments};
use crate::domain::validation::{validate_create_payload, validate_update_payload};

use super::renovator::renovate;
use super::service::NewsService;
use super::types::{NewsError, ensure_valid, required};

impl NewsService {
    /// Persist a news record and its comment batch, returning the stored aggregate.
    ///
    /// Caller ids, foreign keys and dates are discarded. If the comment batch
    /// fails after the news insert, the news row stays without comments.
    pub async fn create(&self, payload: NewsPayload) -> Result<NewsWithComments, NewsError> {
        let created_at = creation_timestamp();
        let payload = stamp_for_create(payload, created_at);
        ensure_valid(validate_create_payload(&payload))?;

        let texts = payload
            .comments
            .unwrap_or_default()
            .into_iter()
            .map(|comment| required("comments[].text", comment.text))
            .collect::<Result<Vec<_>, _>>()?;

        let news = self
            .writer
            .create_news(CreateNewsParams {
                title: required("title", payload.title)?,
                body: required("body", payload.body)?,
                date: created_at,
            })
            .await?;

        let comments = if texts.is_empty() {
            Vec::new()
        } else {
            let params = texts
                .into_iter()
                .map(|text| CreateCommentParams {
                    news_id: news.id,
                    text,
                    date: created_at,
                })
                .collect();
            match self.comment_writer.create_comments(params).await {
                Ok(comments) => comments,
                Err(err) => {
                    warn!(
                        target = "application::news::create",
                        news_id = %news.id,
                        error = %err,
                        "news persisted but its comments were not; news left without comments"
                    );
                    self.invalidate_after_write("create");
                    return Err(err.into());
                }
            }
        };

        let aggregate = NewsWithComments::compose(news, comments)?;
        self.invalidate_after_write("create");

        info!(
            target = "application::news::create",
            news_id = %aggregate.id(),
            comments = aggregate.comments.len(),
            "news created"
        );
        Ok(aggregate)
    }

    /// Patch an existing news record. Comments are left untouched.
    pub async fn update(&self, payload: NewsPayload) -> Result<NewsRecord, NewsError> {
        let id = payload.id.as_deref().unwrap_or_default();
        let current = self.read_by_id(id, None, None).await?;

        let merged = renovate(&current.news, &payload);
        ensure_valid(validate_update_payload(&merged))?;

        let id = current.id();
        let params = UpdateNewsParams {
            id,
            title: required("title", merged.title)?,
            body: required("body", merged.body)?,
        };
        let updated = self
            .writer
            .update_news(params)
            .await
            .map_err(|err| NewsError::from_repo(id, err))?;
        self.invalidate_after_write("update");

        info!(
            target = "application::news::update",
            news_id = %updated.id,
            "news updated"
        );
        Ok(updated)
    }

    /// Remove a news record and every comment that references it.
    ///
    /// Comments go first. If the news delete then fails, the comments stay deleted.
    pub async fn delete(&self, id: &str) -> Result<(), NewsError> {
        let current = self.read_by_id(id, None, None).await?;
        let id = current.id();

        let removed = self.comment_writer.delete_comments_for_news(id).await?;

        if let Err(err) = self.writer.delete_news(id).await {
            warn!(
                target = "application::news::delete",
                news_id = %id,
                comments_removed = removed,
                error = %err,
                "comments deleted but the news record was not"
            );
            self.invalidate_after_write("delete");
            return Err(NewsError::from_repo(id, err));
        }
        self.invalidate_after_write("delete");

        info!(
            target = "application::news::delete",
            news_id = %id,
            comments_removed = removed,
            "news deleted"
        );
        Ok(())
    }
}

/// Current time at the precision the stores keep (microseconds).
fn creation_timestamp() -> OffsetDateTime {
    let now = OffsetDateTime::now_utc();
    now.replace_nanosecond(now.nanosecond() / 1_000 * 1_000)
        .unwrap_or(now)
}

fn stamp_for_create(mut payload: NewsPayload, created_at: OffsetDateTime) -> NewsPayload {
    payload.id = None;
    payload.date = Some(created_at);
    for comment in payload.comments.get_or_insert_with(Vec::new) {
        comment.id = None;
        comment.news_id = None;
        comment.date = Some(created_at);
    }
    payload
}

#[cfg(test)]
mod tests {
    use nms_api_types::CommentPayload;

    use super::*;

    #[test]
    fn stamping_discards_caller_identity() {
        let created_at = creation_timestamp();
        let payload = NewsPayload {
            id: Some("client".into()),
            date: Some(OffsetDateTime::UNIX_EPOCH),
            comments: Some(vec![CommentPayload {
                id: Some("c".into()),
                news_id: Some("spoofed".into()),
                text: Some("hi".into()),
                date: Some(OffsetDateTime::UNIX_EPOCH),
            }]),
            ..NewsPayload::new("A", "B")
        };

        let stamped = stamp_for_create(payload, created_at);

        assert!(stamped.id.is_none());
        assert_eq!(stamped.date, Some(created_at));
        let comment = &stamped.comments.as_deref().unwrap_or_default()[0];
        assert!(comment.id.is_none());
        assert!(comment.news_id.is_none());
        assert_eq!(comment.date, Some(created_at));
        assert!(validate_create_payload(&stamped).is_empty());
    }

    #[test]
    fn missing_comments_become_empty_batch() {
        let stamped = stamp_for_create(NewsPayload::new("A", "B"), creation_timestamp());
        assert_eq!(stamped.comments, Some(Vec::new()));
    }

    #[test]
    fn creation_timestamp_has_microsecond_precision() {
        assert_eq!(creation_timestamp().nanosecond() % 1_000, 0);
    }
}
