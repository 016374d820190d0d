//! Poison-tolerant lock access for cache maps.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use metrics::counter;
use tracing::warn;

pub(crate) const METRIC_LOCK_POISONED: &str = "nms_cache_lock_poisoned_total";

pub(crate) fn read<'a, T>(lock: &'a RwLock<T>, op: &'static str) -> RwLockReadGuard<'a, T> {
    lock.read().unwrap_or_else(|poisoned| {
        recovered(op, "read");
        poisoned.into_inner()
    })
}

pub(crate) fn write<'a, T>(lock: &'a RwLock<T>, op: &'static str) -> RwLockWriteGuard<'a, T> {
    lock.write().unwrap_or_else(|poisoned| {
        recovered(op, "write");
        poisoned.into_inner()
    })
}

fn recovered(op: &'static str, mode: &'static str) {
    counter!(METRIC_LOCK_POISONED, "mode" => mode).increment(1);
    warn!(
        op,
        lock_mode = mode,
        result = "poisoned_recovered",
        "Recovered from poisoned cache lock"
    );
}
