use tracing::{debug, instrument};

use crate::application::pagination::{DEFAULT_LIMIT, PageRequest};
use crate::domain::entities::{NewsRecord, NewsWithComments};
use crate::domain::validation::{parse_id, validate_search_term};

use super::service::NewsService;
use super::types::{NewsError, ensure_valid_argument};

impl NewsService {
    /// One page of news in insertion order, without comments.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Result<Vec<NewsRecord>, NewsError> {
        let request = PageRequest::from_query(page, limit, DEFAULT_LIMIT)?;
        let key = Self::list_key(request);

        if let Some(items) = self.cached_collection(&key) {
            return Ok(items);
        }

        let items = self.reader.list_page(request).await?;
        if items.is_empty() {
            return Err(NewsError::EmptyResult);
        }

        self.store_collection(key, &items);
        debug!(count = items.len(), "news page loaded from store");
        Ok(items)
    }

    /// Full-text search, best score first.
    #[instrument(skip(self))]
    pub async fn search(
        &self,
        term: &str,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Result<Vec<NewsRecord>, NewsError> {
        ensure_valid_argument(validate_search_term(term))?;
        let request = PageRequest::from_query(page, limit, DEFAULT_LIMIT)?;
        let term = term.trim();
        let key = Self::search_key(term, request);

        if let Some(items) = self.cached_collection(&key) {
            return Ok(items);
        }

        let items = self.reader.search(term, request).await?;
        if items.is_empty() {
            return Err(NewsError::EmptyResult);
        }

        self.store_collection(key, &items);
        debug!(count = items.len(), "search page loaded from store");
        Ok(items)
    }

    /// One news record with a page of its comments.
    ///
    /// A different comment page for the same id is a separate cache entry.
    #[instrument(skip(self))]
    pub async fn read_by_id(
        &self,
        id: &str,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Result<NewsWithComments, NewsError> {
        let id = parse_id(id).map_err(|violations| NewsError::InvalidArgument { violations })?;
        let request = PageRequest::from_query(page, limit, self.default_comment_limit)?;
        let key = Self::single_key(id, request);

        if let Some(aggregate) = self.cached_single(&key) {
            return Ok(aggregate);
        }

        let news = self
            .reader
            .find_by_id(id)
            .await?
            .ok_or(NewsError::NotFound { id })?;
        let comments = self.comments.list_page_for_news(id, request).await?;
        let aggregate = NewsWithComments::compose(news, comments)?;

        self.store_single(key, &aggregate);
        Ok(aggregate)
    }
}
