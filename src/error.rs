use async_graphql::ErrorExtensions;
use thiserror::Error;
use tracing::{error, warn};

/// Failures coming out of the data access layer.
///
/// Constraint violations keep the driver's message verbatim so clients see
/// exactly what the store reported.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{0}")]
    UniqueViolation(String),

    #[error("{0}")]
    ForeignKeyViolation(String),

    #[error(transparent)]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        use sqlx::error::ErrorKind;

        if let sqlx::Error::Database(db) = &err {
            match db.kind() {
                ErrorKind::UniqueViolation => {
                    return StoreError::UniqueViolation(db.message().to_string())
                }
                ErrorKind::ForeignKeyViolation => {
                    return StoreError::ForeignKeyViolation(db.message().to_string())
                }
                _ => {}
            }
        }
        StoreError::Database(err)
    }
}

/// Resolver-level failures, rendered as GraphQL errors with a `code` extension.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },

    #[error("invalid id: {0}")]
    InvalidId(String),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Store(StoreError::UniqueViolation(_)) => "UNIQUE_VIOLATION",
            ApiError::Store(StoreError::ForeignKeyViolation(_)) => "FOREIGN_KEY_VIOLATION",
            ApiError::Store(StoreError::Database(_)) => "DATABASE_ERROR",
            ApiError::NotFound { .. } => "NOT_FOUND",
            ApiError::InvalidId(_) => "BAD_USER_INPUT",
        }
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> async_graphql::Error {
        let code = self.code();
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| e.set("code", code))
    }
}

/// Convert into a GraphQL error, logging on the way out.
pub fn gql<E: Into<ApiError>>(err: E) -> async_graphql::Error {
    let err = err.into();
    match &err {
        ApiError::Store(StoreError::Database(e)) => error!(error = %e, "store failure"),
        other => warn!(error = %other, code = other.code(), "request rejected"),
    }
    err.extend()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraint_messages_pass_through_unchanged() {
        let msg = r#"duplicate key value violates unique constraint "users_email_key""#;
        let err = ApiError::from(StoreError::UniqueViolation(msg.into()));
        assert_eq!(err.to_string(), msg);
        assert_eq!(err.code(), "UNIQUE_VIOLATION");
    }

    #[test]
    fn non_database_sqlx_errors_stay_generic() {
        let err = StoreError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, StoreError::Database(sqlx::Error::RowNotFound)));
        assert_eq!(ApiError::from(err).code(), "DATABASE_ERROR");
    }

    #[test]
    fn not_found_names_entity_and_id() {
        let err = ApiError::NotFound { entity: "user", id: 42 };
        assert_eq!(err.to_string(), "user 42 not found");
        assert_eq!(err.code(), "NOT_FOUND");
    }

    #[test]
    fn extension_carries_code() {
        let err = ApiError::InvalidId("abc".into()).extend();
        assert_eq!(err.message, "invalid id: abc");
        let ext = serde_json::to_value(err.extensions.expect("extensions set")).unwrap();
        assert_eq!(ext["code"], "BAD_USER_INPUT");
    }
}
