use std::sync::Arc;

use crate::application::news::NewsService;
use crate::infra::db::PostgresRepositories;

#[derive(Clone)]
pub struct ApiState {
    pub news: Arc<NewsService>,
    /// Present when the service runs on Postgres; used by the health probe.
    pub db: Option<Arc<PostgresRepositories>>,
}

impl ApiState {
    pub fn new(news: Arc<NewsService>) -> Self {
        Self { news, db: None }
    }

    pub fn with_db(mut self, db: Arc<PostgresRepositories>) -> Self {
        self.db = Some(db);
        self
    }
}
