use async_trait::async_trait;
use uuid::Uuid;

use crate::application::pagination::PageRequest;
use crate::application::repos::{
    CreateNewsParams, NewsRepo, NewsWriteRepo, RepoError, UpdateNewsParams,
};
use crate::domain::entities::NewsRecord;

use super::PostgresRepositories;
use super::map_sqlx_error;
use super::types::NewsRow;

#[async_trait]
impl NewsRepo for PostgresRepositories {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<NewsRecord>, RepoError> {
        let row = sqlx::query_as::<_, NewsRow>(
            r#"
            SELECT id, title, body, created_at, NULL::real AS score
            FROM news
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(NewsRecord::from))
    }

    async fn list_page(&self, page: PageRequest) -> Result<Vec<NewsRecord>, RepoError> {
        let (limit, offset) = Self::page_bounds(page)?;
        let rows = sqlx::query_as::<_, NewsRow>(
            r#"
            SELECT id, title, body, created_at, NULL::real AS score
            FROM news
            ORDER BY seq
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(NewsRecord::from).collect())
    }

    async fn search(&self, term: &str, page: PageRequest) -> Result<Vec<NewsRecord>, RepoError> {
        let (limit, offset) = Self::page_bounds(page)?;
        let rows = sqlx::query_as::<_, NewsRow>(
            r#"
            SELECT n.id, n.title, n.body, n.created_at, ts_rank(n.search, q.query) AS score
            FROM news n, websearch_to_tsquery('english', $1) AS q(query)
            WHERE n.search @@ q.query
            ORDER BY score DESC, n.seq
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(term)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(NewsRecord::from).collect())
    }
}

#[async_trait]
impl NewsWriteRepo for PostgresRepositories {
    async fn create_news(&self, params: CreateNewsParams) -> Result<NewsRecord, RepoError> {
        let CreateNewsParams { title, body, date } = params;

        let row = sqlx::query_as::<_, NewsRow>(
            r#"
            INSERT INTO news (id, title, body, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, body, created_at, NULL::real AS score
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(title)
        .bind(body)
        .bind(date)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(NewsRecord::from(row))
    }

    async fn update_news(&self, params: UpdateNewsParams) -> Result<NewsRecord, RepoError> {
        let UpdateNewsParams { id, title, body } = params;

        let row = sqlx::query_as::<_, NewsRow>(
            r#"
            UPDATE news
            SET title = $2, body = $3
            WHERE id = $1
            RETURNING id, title, body, created_at, NULL::real AS score
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(body)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        row.map(NewsRecord::from).ok_or(RepoError::NotFound)
    }

    async fn delete_news(&self, id: Uuid) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM news WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}
