use sqlx::PgPool;

use crate::error::StoreError;
use crate::users::repo_types::{NewUser, UserPatch, UserRow};

/// List every user, oldest first.
pub async fn list(db: &PgPool) -> Result<Vec<UserRow>, StoreError> {
    let rows = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT id, name, email, created_at
        FROM users
        ORDER BY id ASC
        "#,
    )
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// Find a user by id. A missing row is `None`, not an error.
pub async fn find(db: &PgPool, id: i32) -> Result<Option<UserRow>, StoreError> {
    let user = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT id, name, email, created_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(user)
}

pub async fn find_many(db: &PgPool, ids: &[i32]) -> Result<Vec<UserRow>, StoreError> {
    let rows = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT id, name, email, created_at
        FROM users
        WHERE id = ANY($1)
        ORDER BY id ASC
        "#,
    )
    .bind(ids)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn insert(db: &PgPool, new: &NewUser) -> Result<UserRow, StoreError> {
    let user = sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO users (name, email)
        VALUES ($1, $2)
        RETURNING id, name, email, created_at
        "#,
    )
    .bind(&new.name)
    .bind(&new.email)
    .fetch_one(db)
    .await?;
    Ok(user)
}

/// Apply the supplied fields only. An empty patch just reads the row back.
pub async fn update(db: &PgPool, id: i32, patch: &UserPatch) -> Result<Option<UserRow>, StoreError> {
    if patch.is_empty() {
        return find(db, id).await;
    }
    let user = sqlx::query_as::<_, UserRow>(
        r#"
        UPDATE users
           SET name  = COALESCE($2, name),
               email = COALESCE($3, email)
         WHERE id = $1
        RETURNING id, name, email, created_at
        "#,
    )
    .bind(id)
    .bind(patch.name.as_deref())
    .bind(patch.email.as_deref())
    .fetch_optional(db)
    .await?;
    Ok(user)
}

pub async fn delete(db: &PgPool, id: i32) -> Result<u64, StoreError> {
    let res = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(res.rows_affected())
}
