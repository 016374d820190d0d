use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::application::pagination::{DEFAULT_LIMIT, PageRequest};
use crate::application::repos::{CommentsRepo, CommentsWriteRepo, NewsRepo, NewsWriteRepo};
use crate::cache::{CacheKey, Namespace, NewsCache};
use crate::domain::entities::{NewsRecord, NewsWithComments};

/// Aggregate service over the news and comment stores.
///
/// Reads go through the optional cache; writes go straight to the stores and,
/// when `invalidate_on_write` is set, clear the `news` namespace afterwards.
#[derive(Clone)]
pub struct NewsService {
    pub(crate) reader: Arc<dyn NewsRepo>,
    pub(crate) writer: Arc<dyn NewsWriteRepo>,
    pub(crate) comments: Arc<dyn CommentsRepo>,
    pub(crate) comment_writer: Arc<dyn CommentsWriteRepo>,
    pub(crate) cache: Option<Arc<dyn NewsCache>>,
    pub(crate) invalidate_on_write: bool,
    pub(crate) default_comment_limit: u32,
}

impl NewsService {
    pub fn new(
        reader: Arc<dyn NewsRepo>,
        writer: Arc<dyn NewsWriteRepo>,
        comments: Arc<dyn CommentsRepo>,
        comment_writer: Arc<dyn CommentsWriteRepo>,
    ) -> Self {
        Self {
            reader,
            writer,
            comments,
            comment_writer,
            cache: None,
            invalidate_on_write: false,
            default_comment_limit: DEFAULT_LIMIT,
        }
    }

    pub fn with_cache(mut self, cache: Arc<dyn NewsCache>, invalidate_on_write: bool) -> Self {
        self.cache = Some(cache);
        self.invalidate_on_write = invalidate_on_write;
        self
    }

    pub fn with_default_comment_limit(mut self, limit: u32) -> Self {
        self.default_comment_limit = limit;
        self
    }

    pub(crate) fn list_key(page: PageRequest) -> CacheKey {
        CacheKey::new(Namespace::NEWS, &[page.page.into(), page.limit.into()])
    }

    pub(crate) fn search_key(term: &str, page: PageRequest) -> CacheKey {
        CacheKey::new(
            Namespace::NEWS,
            &[term.into(), page.page.into(), page.limit.into()],
        )
    }

    pub(crate) fn single_key(id: Uuid, page: PageRequest) -> CacheKey {
        CacheKey::new(
            Namespace::NEWS,
            &[id.into(), page.page.into(), page.limit.into()],
        )
    }

    pub(crate) fn cached_single(&self, key: &CacheKey) -> Option<NewsWithComments> {
        self.cache.as_ref()?.get_single(key)
    }

    pub(crate) fn store_single(&self, key: CacheKey, value: &NewsWithComments) {
        if let Some(cache) = &self.cache {
            cache.put_single(key, value.clone());
        }
    }

    pub(crate) fn cached_collection(&self, key: &CacheKey) -> Option<Vec<NewsRecord>> {
        self.cache.as_ref()?.get_collection(key)
    }

    pub(crate) fn store_collection(&self, key: CacheKey, values: &[NewsRecord]) {
        if let Some(cache) = &self.cache {
            cache.put_collection(key, values.to_vec());
        }
    }

    pub(crate) fn invalidate_after_write(&self, operation: &'static str) {
        let Some(cache) = &self.cache else {
            return;
        };
        if !self.invalidate_on_write {
            return;
        }
        cache.invalidate_namespace(Namespace::NEWS);
        debug!(operation, namespace = %Namespace::NEWS, "news cache invalidated after write");
    }
}
