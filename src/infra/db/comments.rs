use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use crate::application::pagination::PageRequest;
use crate::application::repos::{
    CommentsRepo, CommentsWriteRepo, CreateCommentParams, RepoError,
};
use crate::domain::entities::CommentRecord;

use super::PostgresRepositories;
use super::map_sqlx_error;
use super::types::CommentRow;

#[async_trait]
impl CommentsRepo for PostgresRepositories {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<CommentRecord>, RepoError> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, news_id, text, created_at
            FROM comments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(CommentRecord::from))
    }

    async fn list_page_for_news(
        &self,
        news_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<CommentRecord>, RepoError> {
        let (limit, offset) = Self::page_bounds(page)?;
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, news_id, text, created_at
            FROM comments
            WHERE news_id = $1
            ORDER BY seq
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(news_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(CommentRecord::from).collect())
    }

    async fn list_all_for_news(&self, news_id: Uuid) -> Result<Vec<CommentRecord>, RepoError> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, news_id, text, created_at
            FROM comments
            WHERE news_id = $1
            ORDER BY seq
            "#,
        )
        .bind(news_id)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(CommentRecord::from).collect())
    }
}

#[async_trait]
impl CommentsWriteRepo for PostgresRepositories {
    async fn create_comments(
        &self,
        params: Vec<CreateCommentParams>,
    ) -> Result<Vec<CommentRecord>, RepoError> {
        if params.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = params.iter().map(|_| Uuid::new_v4()).collect();

        let mut qb: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("INSERT INTO comments (id, news_id, text, created_at) ");
        qb.push_values(ids.iter().zip(params), |mut row, (id, comment)| {
            row.push_bind(*id)
                .push_bind(comment.news_id)
                .push_bind(comment.text)
                .push_bind(comment.date);
        });
        qb.push(" RETURNING id, news_id, text, created_at");

        let rows = qb
            .build_query_as::<CommentRow>()
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        // RETURNING order is not guaranteed; restore input order by id.
        let mut by_id: HashMap<Uuid, CommentRow> =
            rows.into_iter().map(|row| (row.id, row)).collect();
        ids.iter()
            .map(|id| {
                by_id.remove(id).map(CommentRecord::from).ok_or_else(|| {
                    RepoError::Integrity {
                        message: format!("inserted comment `{id}` missing from RETURNING"),
                    }
                })
            })
            .collect()
    }

    async fn delete_comment(&self, id: Uuid) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn delete_comments_for_news(&self, news_id: Uuid) -> Result<u64, RepoError> {
        let result = sqlx::query("DELETE FROM comments WHERE news_id = $1")
            .bind(news_id)
            .execute(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }
}
