//! Cache storage.
//!
//! `NewsCache` is the get/put contract the news service reads through;
//! `L0Store` is the in-process implementation with LRU eviction.

use std::sync::RwLock;

use lru::LruCache;
use metrics::counter;
use tracing::debug;

use crate::domain::entities::{NewsRecord, NewsWithComments};

use super::config::CacheConfig;
use super::keys::{CacheKey, Namespace};
use super::lock::{read, write};

pub(crate) const METRIC_CACHE_HIT: &str = "nms_cache_hit_total";
pub(crate) const METRIC_CACHE_MISS: &str = "nms_cache_miss_total";
pub(crate) const METRIC_CACHE_EVICT: &str = "nms_cache_evict_total";

const KIND_SINGLE: &str = "single";
const KIND_COLLECTION: &str = "collection";

/// Namespaced get/put storage for news aggregates and news pages.
///
/// Values come back structurally equal to what was stored. Eviction and
/// expiry are the implementation's business; callers only rely on get/put.
pub trait NewsCache: Send + Sync {
    fn get_single(&self, key: &CacheKey) -> Option<NewsWithComments>;

    fn put_single(&self, key: CacheKey, value: NewsWithComments);

    fn get_collection(&self, key: &CacheKey) -> Option<Vec<NewsRecord>>;

    fn put_collection(&self, key: CacheKey, values: Vec<NewsRecord>);

    /// Drop every entry, single or collection, under `namespace`.
    fn invalidate_namespace(&self, namespace: Namespace);
}

/// L0 object cache.
///
/// Singles and collections live in separate LRU maps, so a single key and a
/// collection key that render identically can never shadow each other.
pub struct L0Store {
    singles: RwLock<LruCache<CacheKey, NewsWithComments>>,
    collections: RwLock<LruCache<CacheKey, Vec<NewsRecord>>>,
}

impl L0Store {
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            singles: RwLock::new(LruCache::new(config.single_limit_non_zero())),
            collections: RwLock::new(LruCache::new(config.collection_limit_non_zero())),
        }
    }

    pub fn single_len(&self) -> usize {
        read(&self.singles, "single_len").len()
    }

    pub fn collection_len(&self) -> usize {
        read(&self.collections, "collection_len").len()
    }
}

impl NewsCache for L0Store {
    fn get_single(&self, key: &CacheKey) -> Option<NewsWithComments> {
        let value = write(&self.singles, "get_single").get(key).cloned();
        record_lookup(KIND_SINGLE, key, value.is_some());
        value
    }

    fn put_single(&self, key: CacheKey, value: NewsWithComments) {
        let evicted = write(&self.singles, "put_single").push(key.clone(), value);
        record_eviction(KIND_SINGLE, &key, evicted.map(|(evicted, _)| evicted));
    }

    fn get_collection(&self, key: &CacheKey) -> Option<Vec<NewsRecord>> {
        let value = write(&self.collections, "get_collection").get(key).cloned();
        record_lookup(KIND_COLLECTION, key, value.is_some());
        value
    }

    fn put_collection(&self, key: CacheKey, values: Vec<NewsRecord>) {
        let evicted = write(&self.collections, "put_collection").push(key.clone(), values);
        record_eviction(KIND_COLLECTION, &key, evicted.map(|(evicted, _)| evicted));
    }

    fn invalidate_namespace(&self, namespace: Namespace) {
        let singles = pop_namespace(&mut write(&self.singles, "invalidate.singles"), namespace);
        let collections = pop_namespace(
            &mut write(&self.collections, "invalidate.collections"),
            namespace,
        );
        debug!(
            namespace = %namespace,
            singles,
            collections,
            "cache namespace invalidated"
        );
    }
}

fn pop_namespace<V>(cache: &mut LruCache<CacheKey, V>, namespace: Namespace) -> usize {
    let stale: Vec<CacheKey> = cache
        .iter()
        .filter(|(key, _)| key.namespace() == namespace)
        .map(|(key, _)| key.clone())
        .collect();
    for key in &stale {
        cache.pop(key);
    }
    stale.len()
}

fn record_lookup(kind: &'static str, key: &CacheKey, hit: bool) {
    if hit {
        counter!(METRIC_CACHE_HIT, "kind" => kind).increment(1);
        debug!(kind, key = %key, "cache hit");
    } else {
        counter!(METRIC_CACHE_MISS, "kind" => kind).increment(1);
        debug!(kind, key = %key, "cache miss");
    }
}

// `push` also hands back the old value when a key is overwritten; only a
// different key counts as an eviction.
fn record_eviction(kind: &'static str, inserted: &CacheKey, evicted: Option<CacheKey>) {
    if let Some(evicted) = evicted.filter(|evicted| evicted != inserted) {
        counter!(METRIC_CACHE_EVICT, "kind" => kind).increment(1);
        debug!(kind, key = %evicted, "cache entry evicted");
    }
}
