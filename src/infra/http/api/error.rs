use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use nms_api_types::{ApiErrorBody, ApiErrorMessage};

use crate::application::error::ErrorReport;
use crate::application::news::NewsError;
use crate::application::repos::RepoError;

pub mod codes {
    pub const VALIDATION: &str = "validation_failed";
    pub const INVALID_ARGUMENT: &str = "invalid_argument";
    pub const NOT_FOUND: &str = "not_found";
    pub const EMPTY_RESULT: &str = "empty_result";
    pub const DOMAIN: &str = "domain_invariant";
    pub const DB_TIMEOUT: &str = "db_timeout";
    pub const REPO: &str = "repo_error";
}

const SOURCE: &str = "infra::http::api";

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
    violations: Vec<String>,
    report: ErrorReport,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        let message = message.into();
        let report = ErrorReport::from_message(SOURCE, status, format!("{code}: {message}"));
        Self {
            status,
            code,
            message,
            violations: Vec::new(),
            report,
        }
    }

    pub fn with_violations(mut self, violations: Vec<String>) -> Self {
        self.report = ErrorReport::from_message(
            SOURCE,
            self.status,
            format!("{}: {}", self.code, violations.join("; ")),
        );
        self.violations = violations;
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn code(&self) -> &'static str {
        self.code
    }
}

impl From<NewsError> for ApiError {
    fn from(err: NewsError) -> Self {
        let (status, code, message) = match &err {
            NewsError::Validation { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                codes::VALIDATION,
                "Validation failed".to_string(),
            ),
            NewsError::InvalidArgument { .. } => (
                StatusCode::BAD_REQUEST,
                codes::INVALID_ARGUMENT,
                "Invalid argument".to_string(),
            ),
            NewsError::NotFound { id } => (
                StatusCode::NOT_FOUND,
                codes::NOT_FOUND,
                format!("News `{id}` not found"),
            ),
            NewsError::EmptyResult => (
                StatusCode::NOT_FOUND,
                codes::EMPTY_RESULT,
                "No news on the requested page".to_string(),
            ),
            NewsError::Domain(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                codes::DOMAIN,
                "Inconsistent news aggregate".to_string(),
            ),
            NewsError::Repo(RepoError::Timeout) => (
                StatusCode::SERVICE_UNAVAILABLE,
                codes::DB_TIMEOUT,
                "Database timeout".to_string(),
            ),
            NewsError::Repo(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                codes::REPO,
                "Persistence error".to_string(),
            ),
        };

        let violations = err.violations().to_vec();
        let mut api_error = Self::new(status, code, message);
        if !violations.is_empty() {
            api_error = api_error.with_violations(violations);
        }
        if status.is_server_error() {
            api_error.report = ErrorReport::from_error(SOURCE, status, &err);
        }
        api_error
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: ApiErrorMessage {
                code: self.code.to_string(),
                message: self.message,
                violations: self.violations,
            },
        };
        let mut response = (self.status, Json(body)).into_response();
        self.report.attach(&mut response);
        response
    }
}
