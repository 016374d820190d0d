//! Patch merge for news updates.
//!
//! Caller fields that are present and non-blank replace the persisted value;
//! anything else keeps what is stored. `date` and `score` always come from the
//! store, and comments are never carried into an update.

use nms_api_types::NewsPayload;

use crate::domain::entities::NewsRecord;

pub fn renovate(current: &NewsRecord, patch: &NewsPayload) -> NewsPayload {
    NewsPayload {
        id: Some(current.id.to_string()),
        title: Some(pick(patch.title.as_deref(), &current.title)),
        body: Some(pick(patch.body.as_deref(), &current.body)),
        date: Some(current.date),
        comments: None,
    }
}

fn pick(candidate: Option<&str>, current: &str) -> String {
    match candidate {
        Some(value) if !value.trim().is_empty() => value.to_string(),
        _ => current.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use time::OffsetDateTime;
    use time::macros::datetime;
    use uuid::Uuid;

    use super::*;

    fn current() -> NewsRecord {
        NewsRecord {
            id: Uuid::new_v4(),
            title: "Old title".into(),
            body: "Old body".into(),
            date: datetime!(2024-05-01 10:00 UTC),
            score: None,
        }
    }

    #[test]
    fn title_only_patch_keeps_other_fields() {
        let current = current();
        let patch = NewsPayload {
            title: Some("New title".into()),
            ..NewsPayload::default()
        };

        let merged = renovate(&current, &patch);

        assert_eq!(merged.id, Some(current.id.to_string()));
        assert_eq!(merged.title.as_deref(), Some("New title"));
        assert_eq!(merged.body.as_deref(), Some("Old body"));
        assert_eq!(merged.date, Some(current.date));
    }

    #[test]
    fn blank_fields_do_not_overwrite() {
        let current = current();
        let patch = NewsPayload::new("   ", "");

        let merged = renovate(&current, &patch);

        assert_eq!(merged.title.as_deref(), Some("Old title"));
        assert_eq!(merged.body.as_deref(), Some("Old body"));
    }

    #[test]
    fn caller_date_and_comments_are_ignored() {
        let current = current();
        let patch = NewsPayload {
            date: Some(OffsetDateTime::UNIX_EPOCH),
            id: Some(Uuid::new_v4().to_string()),
            ..NewsPayload::new("T", "B").with_comment("sneaky")
        };

        let merged = renovate(&current, &patch);

        assert_eq!(merged.date, Some(current.date));
        assert_eq!(merged.id, Some(current.id.to_string()));
        assert!(merged.comments.is_none());
    }
}
