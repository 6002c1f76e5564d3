use std::fmt::Display;

use sea_orm::{DbErr, RuntimeErr};
use thiserror::Error;

/// Outcome taxonomy shared by both stores.
///
/// Reads never produce `InvalidInput`; writes collapse every backend
/// rejection (duplicate key, foreign key, check constraint, null column)
/// into it without telling them apart.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("backend unavailable: {0}")]
    BackendUnavailable(String),
}

impl StoreError {
    pub fn not_found(key: impl Display) -> Self { Self::NotFound(key.to_string()) }

    /// Classify a failure raised while reading.
    pub fn from_read(err: DbErr) -> Self { Self::BackendUnavailable(err.to_string()) }

    /// Classify a failure raised by an insert, update or delete. Only a
    /// statement the backend received and refused is `InvalidInput`; losing
    /// the connection mid-statement is `BackendUnavailable`.
    pub fn from_write(err: DbErr) -> Self {
        if is_rejection(&err) {
            Self::InvalidInput(err.to_string())
        } else {
            Self::BackendUnavailable(err.to_string())
        }
    }

    /// Like [`StoreError::from_write`], except that an update matching no
    /// row becomes `NotFound(key)`.
    pub fn from_update(err: DbErr, key: impl Display) -> Self {
        match err {
            DbErr::RecordNotUpdated | DbErr::RecordNotFound(_) => Self::not_found(key),
            other => Self::from_write(other),
        }
    }

    /// Stable label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            StoreError::NotFound(_) => "not_found",
            StoreError::InvalidInput(_) => "invalid_input",
            StoreError::BackendUnavailable(_) => "backend_unavailable",
        }
    }
}

fn is_rejection(err: &DbErr) -> bool {
    if err.sql_err().is_some() {
        return true;
    }
    match err {
        DbErr::RecordNotInserted => true,
        DbErr::Exec(rt) | DbErr::Query(rt) => match rt {
            RuntimeErr::SqlxError(e) => e.as_database_error().is_some(),
            RuntimeErr::Internal(_) => true,
        },
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ConnAcquireErr;

    #[test]
    fn read_failures_are_backend_faults() {
        let err = StoreError::from_read(DbErr::Query(RuntimeErr::Internal("syntax".into())));
        assert_eq!(err.kind(), "backend_unavailable");
    }

    #[test]
    fn write_rejections_collapse_to_invalid_input() {
        let err = StoreError::from_write(DbErr::Exec(RuntimeErr::Internal("UNIQUE constraint failed".into())));
        assert!(matches!(err, StoreError::InvalidInput(_)));
        let err = StoreError::from_write(DbErr::RecordNotInserted);
        assert!(matches!(err, StoreError::InvalidInput(_)));
    }

    #[test]
    fn connection_failures_during_writes_stay_backend_faults() {
        let err = StoreError::from_write(DbErr::Conn(RuntimeErr::Internal("refused".into())));
        assert!(matches!(err, StoreError::BackendUnavailable(_)));
        let err = StoreError::from_write(DbErr::ConnectionAcquire(ConnAcquireErr::Timeout));
        assert!(matches!(err, StoreError::BackendUnavailable(_)));
    }

    #[test]
    fn transport_failures_during_writes_stay_backend_faults() {
        use sea_orm::sqlx;
        use std::io;

        let reset = sqlx::Error::Io(io::Error::new(io::ErrorKind::ConnectionReset, "connection reset by peer"));
        let err = StoreError::from_write(DbErr::Exec(RuntimeErr::SqlxError(reset)));
        assert_eq!(err.kind(), "backend_unavailable");

        let err = StoreError::from_write(DbErr::Query(RuntimeErr::SqlxError(sqlx::Error::PoolClosed)));
        assert_eq!(err.kind(), "backend_unavailable");

        let err = StoreError::from_update(DbErr::Exec(RuntimeErr::SqlxError(sqlx::Error::PoolTimedOut)), 7);
        assert_eq!(err.kind(), "backend_unavailable");
    }

    #[test]
    fn unmatched_update_is_not_found() {
        assert_eq!(StoreError::from_update(DbErr::RecordNotUpdated, 42), StoreError::NotFound("42".into()));
        let err = StoreError::from_update(DbErr::Exec(RuntimeErr::Internal("CHECK".into())), 42);
        assert!(matches!(err, StoreError::InvalidInput(_)));
    }
}
