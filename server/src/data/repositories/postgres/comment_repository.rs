use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::data::comment_repository::{CommentRepository, NewComment};
use crate::domain::comment::Comment;
use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub(crate) struct PostgresCommentRepository {
    pool: PgPool,
}

impl PostgresCommentRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct CommentRow {
    id: i64,
    text: String,
    post_id: i64,
    author_id: i64,
    author_username: String,
    created_at: DateTime<Utc>,
}

const SELECT_COMMENTS: &str = r#"
SELECT cm.id, cm.text, cm.post_id, cm.author_id,
       u.username AS author_username, cm.created_at
FROM comments cm
JOIN users u ON u.id = cm.author_id
"#;

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn create_comment(&self, input: NewComment) -> Result<Comment, DomainError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO comments (text, post_id, author_id)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&input.text)
        .bind(input.post_id)
        .bind(input.author_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_comment_db_error)?;

        self.get_comment(id).await?.ok_or_else(|| {
            DomainError::Unexpected(format!("comment {id} missing right after insert"))
        })
    }

    async fn get_comment(&self, id: i64) -> Result<Option<Comment>, DomainError> {
        let row = sqlx::query_as::<_, CommentRow>(&format!("{SELECT_COMMENTS} WHERE cm.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_comment_db_error)?;

        Ok(row.map(map_row))
    }

    async fn update_comment(&self, id: i64, text: String) -> Result<Option<Comment>, DomainError> {
        let updated: Option<i64> =
            sqlx::query_scalar("UPDATE comments SET text = $2 WHERE id = $1 RETURNING id")
                .bind(id)
                .bind(&text)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_comment_db_error)?;

        match updated {
            Some(id) => self.get_comment(id).await,
            None => Ok(None),
        }
    }

    async fn delete_comment(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_comment_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_for_post(&self, post_id: i64) -> Result<Vec<Comment>, DomainError> {
        let rows = sqlx::query_as::<_, CommentRow>(&format!(
            "{SELECT_COMMENTS} WHERE cm.post_id = $1 ORDER BY cm.created_at ASC, cm.id ASC"
        ))
        .bind(post_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_comment_db_error)?;

        Ok(rows.into_iter().map(map_row).collect())
    }
}

fn map_row(row: CommentRow) -> Comment {
    Comment {
        id: row.id,
        text: row.text,
        post_id: row.post_id,
        author_id: row.author_id,
        author_username: row.author_username,
        created_at: row.created_at,
    }
}

fn map_comment_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.code().as_deref() == Some("23503")
    {
        return DomainError::NotFound("referenced post or author".to_string());
    }
    DomainError::Unexpected(err.to_string())
}
