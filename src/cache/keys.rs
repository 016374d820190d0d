//! Cache key definitions.
//!
//! A `CacheKey` pairs a namespace with a key derived from an ordered tuple
//! of scalar request parameters. Derived keys are length-prefixed and
//! type-tagged, so tuples that differ in arity or part types never render
//! to the same string.

use std::fmt::{self, Write as _};

use uuid::Uuid;

/// Logical partition of the cache that can be cleared as a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Namespace(&'static str);

impl Namespace {
    pub const NEWS: Namespace = Namespace("news");

    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyPart {
    Int(i64),
    Str(String),
}

impl From<u32> for KeyPart {
    fn from(value: u32) -> Self {
        KeyPart::Int(i64::from(value))
    }
}

impl From<i64> for KeyPart {
    fn from(value: i64) -> Self {
        KeyPart::Int(value)
    }
}

impl From<&str> for KeyPart {
    fn from(value: &str) -> Self {
        KeyPart::Str(value.to_string())
    }
}

impl From<String> for KeyPart {
    fn from(value: String) -> Self {
        KeyPart::Str(value)
    }
}

impl From<Uuid> for KeyPart {
    fn from(value: Uuid) -> Self {
        KeyPart::Str(value.hyphenated().to_string())
    }
}

/// Render an ordered tuple as `<arity>|<tag><len>:<value>|...`.
pub fn derive_key(parts: &[KeyPart]) -> String {
    let mut key = parts.len().to_string();
    for part in parts {
        key.push('|');
        let (tag, value) = match part {
            KeyPart::Int(value) => ('i', value.to_string()),
            KeyPart::Str(value) => ('s', value.clone()),
        };
        // Writing into a String cannot fail.
        let _ = write!(key, "{tag}{}:{value}", value.len());
    }
    key
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    namespace: Namespace,
    derived: String,
}

impl CacheKey {
    pub fn new(namespace: Namespace, parts: &[KeyPart]) -> Self {
        Self {
            namespace,
            derived: derive_key(parts),
        }
    }

    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    pub fn derived(&self) -> &str {
        &self.derived
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.namespace, self.derived)
    }
}
