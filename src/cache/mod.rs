//! News read-through cache.
//!
//! The news service consults an L0 object cache before hitting the store:
//! single aggregates (news plus a page of comments) and news pages (listing
//! and search results) are kept in separate LRU maps keyed by a
//! [`CacheKey`] derived from the request arguments.
//!
//! ## Configuration
//!
//! ```toml
//! [cache]
//! enabled = true
//! single_limit = 500
//! collection_limit = 100
//! invalidate_on_write = true
//! ```

mod config;
mod keys;
mod lock;
mod store;

pub use config::CacheConfig;
pub use keys::{CacheKey, KeyPart, Namespace, derive_key};
pub use store::{L0Store, NewsCache};

pub(crate) use store::{METRIC_CACHE_EVICT, METRIC_CACHE_HIT, METRIC_CACHE_MISS};
pub(crate) use lock::METRIC_LOCK_POISONED;
