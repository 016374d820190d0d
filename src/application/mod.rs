//! Application services: repository contracts, paging and the news aggregate service.

pub mod error;
pub mod news;
pub mod pagination;
pub mod repos;
