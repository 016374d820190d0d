mod commands;
mod queries;
mod renovator;
mod service;
pub mod types;


pub use renovator::renovate;
pub use service::NewsService;
pub use types::{NewsError, ensure_valid, ensure_valid_argument};
