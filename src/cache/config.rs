//! Cache configuration.
//!
//! Controls the L0 object cache used by the news read paths.

use std::num::NonZeroUsize;

use serde::Deserialize;

const DEFAULT_SINGLE_LIMIT: usize = 500;
const DEFAULT_COLLECTION_LIMIT: usize = 100;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Enable the L0 object cache. When off, every read goes to the stores.
    pub enabled: bool,
    /// Maximum cached news aggregates.
    pub single_limit: usize,
    /// Maximum cached news list/search pages.
    pub collection_limit: usize,
    /// Clear the news namespace after successful writes.
    pub invalidate_on_write: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            single_limit: DEFAULT_SINGLE_LIMIT,
            collection_limit: DEFAULT_COLLECTION_LIMIT,
            invalidate_on_write: true,
        }
    }
}

impl From<&crate::config::CacheSettings> for CacheConfig {
    fn from(settings: &crate::config::CacheSettings) -> Self {
        Self {
            enabled: settings.enabled,
            single_limit: settings.single_limit,
            collection_limit: settings.collection_limit,
            invalidate_on_write: settings.invalidate_on_write,
        }
    }
}

impl CacheConfig {
    /// Returns the single-entry limit as NonZeroUsize, clamping to 1 if zero.
    pub fn single_limit_non_zero(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.single_limit).unwrap_or(NonZeroUsize::MIN)
    }

    /// Returns the collection limit as NonZeroUsize, clamping to 1 if zero.
    pub fn collection_limit_non_zero(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.collection_limit).unwrap_or(NonZeroUsize::MIN)
    }
}
