use sqlx::PgPool;

use crate::error::StoreError;
use crate::posts::repo_types::{NewPost, PostPatch, PostRow};

pub async fn list(db: &PgPool) -> Result<Vec<PostRow>, StoreError> {
    let rows = sqlx::query_as::<_, PostRow>(
        r#"
        SELECT id, title, content, author_id, created_at
        FROM posts
        ORDER BY id ASC
        "#,
    )
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn find(db: &PgPool, id: i32) -> Result<Option<PostRow>, StoreError> {
    let post = sqlx::query_as::<_, PostRow>(
        r#"
        SELECT id, title, content, author_id, created_at
        FROM posts
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(post)
}

/// Posts written by one author, oldest first.
pub async fn list_by_author(db: &PgPool, author_id: i32) -> Result<Vec<PostRow>, StoreError> {
    let rows = sqlx::query_as::<_, PostRow>(
        r#"
        SELECT id, title, content, author_id, created_at
        FROM posts
        WHERE author_id = $1
        ORDER BY id ASC
        "#,
    )
    .bind(author_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn list_by_authors(db: &PgPool, author_ids: &[i32]) -> Result<Vec<PostRow>, StoreError> {
    let rows = sqlx::query_as::<_, PostRow>(
        r#"
        SELECT id, title, content, author_id, created_at
        FROM posts
        WHERE author_id = ANY($1)
        ORDER BY id ASC
        "#,
    )
    .bind(author_ids)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn insert(db: &PgPool, new: &NewPost) -> Result<PostRow, StoreError> {
    let post = sqlx::query_as::<_, PostRow>(
        r#"
        INSERT INTO posts (title, content, author_id)
        VALUES ($1, $2, $3)
        RETURNING id, title, content, author_id, created_at
        "#,
    )
    .bind(&new.title)
    .bind(new.content.as_deref()) // Option<&str> → NULL allowed
    .bind(new.author_id)
    .fetch_one(db)
    .await?;
    Ok(post)
}

pub async fn update(db: &PgPool, id: i32, patch: &PostPatch) -> Result<Option<PostRow>, StoreError> {
    let post = sqlx::query_as::<_, PostRow>(
        r#"
        UPDATE posts
           SET title = $2,
               content = $3
         WHERE id = $1
        RETURNING id, title, content, author_id, created_at
        "#,
    )
    .bind(id)
    .bind(&patch.title)
    .bind(patch.content.as_deref())
    .fetch_optional(db)
    .await?;
    Ok(post)
}

pub async fn delete(db: &PgPool, id: i32) -> Result<u64, StoreError> {
    let res = sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(res.rows_affected())
}

pub async fn delete_by_author(db: &PgPool, author_id: i32) -> Result<u64, StoreError> {
    let res = sqlx::query("DELETE FROM posts WHERE author_id = $1")
        .bind(author_id)
        .execute(db)
        .await?;
    Ok(res.rows_affected())
}
