use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::data::post_repository::{NewPost, Pagination, PostFilter, PostPatch, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::{CategoryRef, LocationRef, Post, PostSummary};
use crate::domain::published::Published;

#[derive(Debug, Clone)]
pub(crate) struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct PostRow {
    id: i64,
    title: String,
    text: String,
    image: String,
    pub_date: DateTime<Utc>,
    is_published: bool,
    created_at: DateTime<Utc>,
    author_id: i64,
    author_username: String,
    category_id: Option<i64>,
    category_title: Option<String>,
    category_slug: Option<String>,
    category_is_published: Option<bool>,
    location_id: Option<i64>,
    location_name: Option<String>,
    location_is_published: Option<bool>,
    comment_count: i64,
}

const SELECT_POSTS: &str = r#"
SELECT
    p.id, p.title, p.text, p.image, p.pub_date, p.is_published, p.created_at,
    p.author_id, u.username AS author_username,
    c.id AS category_id, c.title AS category_title,
    c.slug AS category_slug, c.is_published AS category_is_published,
    l.id AS location_id, l.name AS location_name,
    l.is_published AS location_is_published,
    (SELECT COUNT(*) FROM comments cm WHERE cm.post_id = p.id) AS comment_count
FROM posts p
JOIN users u ON u.id = p.author_id
LEFT JOIN categories c ON c.id = p.category_id
LEFT JOIN locations l ON l.id = p.location_id
"#;

// public_only reproduces the viewer-independent visibility predicate:
// published, category present and published, pub_date not in the future.
const FILTER_CLAUSE: &str = r#"
WHERE ($1::BIGINT IS NULL OR p.category_id = $1)
  AND ($2::BIGINT IS NULL OR p.author_id = $2)
  AND (NOT $3::BOOLEAN
       OR (p.is_published AND c.is_published IS TRUE AND p.pub_date <= NOW()))
"#;

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO posts (title, text, image, pub_date, is_published,
                               author_id, location_id, category_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(&input.title)
        .bind(&input.text)
        .bind(&input.image)
        .bind(input.pub_date)
        .bind(input.is_published)
        .bind(input.author_id)
        .bind(input.location_id)
        .bind(input.category_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        self.get_post(id).await?.ok_or_else(|| {
            DomainError::Unexpected(format!("post {id} missing right after insert"))
        })
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>, DomainError> {
        let row = sqlx::query_as::<_, PostRow>(&format!("{SELECT_POSTS} WHERE p.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        Ok(row.map(|row| map_row(row).post))
    }

    async fn update_post(
        &self,
        post_id: i64,
        patch: PostPatch,
    ) -> Result<Option<Post>, DomainError> {
        let updated: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE posts
            SET title = $2,
                text = $3,
                image = $4,
                pub_date = $5,
                is_published = $6,
                location_id = $7,
                category_id = $8
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(post_id)
        .bind(&patch.title)
        .bind(&patch.text)
        .bind(&patch.image)
        .bind(patch.pub_date)
        .bind(patch.is_published)
        .bind(patch.location_id)
        .bind(patch.category_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        match updated {
            Some(id) => self.get_post(id).await,
            None => Ok(None),
        }
    }

    async fn delete_post(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_posts(
        &self,
        filter: PostFilter,
        pagination: Pagination,
    ) -> Result<Vec<PostSummary>, DomainError> {
        let limit = pagination.page_size as i64;
        let offset = (pagination.page.saturating_sub(1) as i64) * limit;

        let rows = sqlx::query_as::<_, PostRow>(&format!(
            "{SELECT_POSTS} {FILTER_CLAUSE} ORDER BY p.pub_date DESC, p.id DESC LIMIT $4 OFFSET $5"
        ))
        .bind(filter.category_id)
        .bind(filter.author_id)
        .bind(filter.public_only)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(rows.into_iter().map(map_row).collect())
    }

    async fn count_posts(&self, filter: PostFilter) -> Result<i64, DomainError> {
        let count: i64 = sqlx::query_scalar(&format!(
            r#"
            SELECT COUNT(*)
            FROM posts p
            LEFT JOIN categories c ON c.id = p.category_id
            {FILTER_CLAUSE}
            "#
        ))
        .bind(filter.category_id)
        .bind(filter.author_id)
        .bind(filter.public_only)
        .fetch_one(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(count)
    }
}

fn map_row(row: PostRow) -> PostSummary {
    let category = match (row.category_id, row.category_title, row.category_slug) {
        (Some(id), Some(title), Some(slug)) => Some(CategoryRef {
            id,
            title,
            slug,
            is_published: row.category_is_published.unwrap_or(false),
        }),
        _ => None,
    };
    // unpublished locations vanish from the post instead of hiding it
    let location = match (row.location_id, row.location_name) {
        (Some(id), Some(name)) if row.location_is_published.unwrap_or(false) => {
            Some(LocationRef { id, name })
        }
        _ => None,
    };

    PostSummary {
        post: Post {
            id: row.id,
            title: row.title,
            text: row.text,
            image: row.image,
            pub_date: row.pub_date,
            author_id: row.author_id,
            author_username: row.author_username,
            location,
            category,
            published: Published::new(row.is_published, row.created_at),
        },
        comment_count: row.comment_count,
    }
}

fn map_post_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.code().as_deref() == Some("23503")
    {
        return DomainError::NotFound("referenced author, category or location".to_string());
    }
    DomainError::Unexpected(err.to_string())
}
