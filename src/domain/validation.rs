//! Validation rule sets for news payloads and request arguments.
//!
//! Every check runs; violations are collected in field order and returned
//! together. An empty list means the candidate is valid.

use nms_api_types::{CommentPayload, NewsPayload};
use uuid::Uuid;

pub const MAX_TITLE_CHARS: usize = 255;
pub const MAX_BODY_CHARS: usize = 10_000;
pub const MAX_COMMENT_CHARS: usize = 1_000;
pub const MAX_COMMENTS_PER_BATCH: usize = 100;
pub const MAX_TERM_CHARS: usize = 100;

/// Rules for a create payload after the service has reset ids and stamped dates.
pub fn validate_create_payload(payload: &NewsPayload) -> Vec<String> {
    let mut violations = Vec::new();

    if payload.id.is_some() {
        violations.push("id: must not be set on create".to_string());
    }
    check_text(
        &mut violations,
        "title",
        payload.title.as_deref(),
        MAX_TITLE_CHARS,
    );
    check_text(
        &mut violations,
        "body",
        payload.body.as_deref(),
        MAX_BODY_CHARS,
    );
    if payload.date.is_none() {
        violations.push("date: is required".to_string());
    }

    let comments = payload.comments.as_deref().unwrap_or_default();
    if comments.len() > MAX_COMMENTS_PER_BATCH {
        violations.push(format!(
            "comments: at most {MAX_COMMENTS_PER_BATCH} comments per request, got {}",
            comments.len()
        ));
    }
    for (index, comment) in comments.iter().enumerate() {
        check_new_comment(&mut violations, index, comment, payload);
    }

    violations
}

/// Rules for a merged update candidate.
pub fn validate_update_payload(payload: &NewsPayload) -> Vec<String> {
    let mut violations = Vec::new();

    match payload.id.as_deref() {
        Some(id) => violations.extend(validate_id(id)),
        None => violations.push("id: is required".to_string()),
    }
    check_text(
        &mut violations,
        "title",
        payload.title.as_deref(),
        MAX_TITLE_CHARS,
    );
    check_text(
        &mut violations,
        "body",
        payload.body.as_deref(),
        MAX_BODY_CHARS,
    );
    if payload.date.is_none() {
        violations.push("date: is required".to_string());
    }

    violations
}

pub fn validate_search_term(term: &str) -> Vec<String> {
    let mut violations = Vec::new();
    check_text(&mut violations, "term", Some(term), MAX_TERM_CHARS);
    violations
}

pub fn validate_id(id: &str) -> Vec<String> {
    if id.trim().is_empty() {
        return vec!["id: must not be blank".to_string()];
    }
    match Uuid::try_parse(id.trim()) {
        Ok(_) => Vec::new(),
        Err(_) => vec![format!("id: `{id}` is not a valid identifier")],
    }
}

/// Parse an id string, returning the violations when it is malformed.
pub fn parse_id(id: &str) -> Result<Uuid, Vec<String>> {
    let violations = validate_id(id);
    if !violations.is_empty() {
        return Err(violations);
    }
    Uuid::try_parse(id.trim()).map_err(|err| vec![format!("id: {err}")])
}

fn check_new_comment(
    violations: &mut Vec<String>,
    index: usize,
    comment: &CommentPayload,
    parent: &NewsPayload,
) {
    if comment.id.is_some() {
        violations.push(format!("comments[{index}].id: must not be set on create"));
    }
    if comment.news_id.is_some() {
        violations.push(format!(
            "comments[{index}].news_id: is assigned by the server"
        ));
    }
    let field = format!("comments[{index}].text");
    check_text(
        violations,
        &field,
        comment.text.as_deref(),
        MAX_COMMENT_CHARS,
    );
    if comment.date.is_none() || comment.date != parent.date {
        violations.push(format!(
            "comments[{index}].date: must match the news creation date"
        ));
    }
}

fn check_text(violations: &mut Vec<String>, field: &str, value: Option<&str>, max_chars: usize) {
    match value {
        None => violations.push(format!("{field}: is required")),
        Some(text) if text.trim().is_empty() => {
            violations.push(format!("{field}: must not be blank"));
        }
        Some(text) => {
            let length = text.chars().count();
            if length > max_chars {
                violations.push(format!(
                    "{field}: must be at most {max_chars} characters, got {length}"
                ));
            }
        }
    }
}
