//! nms: a news service with comments, read-through caching and full-text search.
//!
//! Layers follow the usual split: `domain` holds records and validation,
//! `application` the repository contracts and the news aggregate service,
//! `cache` the L0 object cache, `infra` the Postgres/in-memory adapters and
//! the HTTP API, and `config` the layered settings.

pub mod application;
pub mod cache;
pub mod config;
pub mod domain;
pub mod infra;
