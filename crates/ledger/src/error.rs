//! The module contains the errors the ledger can return.
//!
//! The errors are:
//!
//! - [`NotFound`] when a referenced row does not exist.
//! - [`Constraint`] when the store rejects a write (unique or foreign key).
//! - [`Rollback`] when a unit of work failed and rolling it back failed too.
//! - [`Cancelled`] when the caller's cancellation fired.
//! - [`InvalidTransfer`] when transfer input is rejected before touching the
//!   store.
//!
//!  [`NotFound`]: LedgerError::NotFound
//!  [`Constraint`]: LedgerError::Constraint
//!  [`Rollback`]: LedgerError::Rollback
//!  [`Cancelled`]: LedgerError::Cancelled
//!  [`InvalidTransfer`]: LedgerError::InvalidTransfer
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Ledger errors.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("constraint violation: {0}")]
    Constraint(#[source] DbErr),
    /// The unit of work failed and the rollback failed as well. The store may
    /// hold an open or half-applied transaction and needs inspection.
    #[error("tx err: {source}, rb err: {rollback}")]
    Rollback {
        source: Box<LedgerError>,
        rollback: DbErr,
    },
    #[error("operation cancelled")]
    Cancelled,
    #[error("invalid transfer: {0}")]
    InvalidTransfer(String),
    #[error(transparent)]
    Database(DbErr),
}

impl LedgerError {
    /// Returns `true` if the error means a referenced row is missing.
    ///
    /// A foreign-key violation on insert is how the store reports a missing
    /// account, so it counts as not found too.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound(_) => true,
            Self::Constraint(err) => matches!(
                err.sql_err(),
                Some(SqlErr::ForeignKeyConstraintViolation(_))
            ),
            _ => false,
        }
    }

    /// Returns `true` for a failed unit of work whose rollback also failed.
    pub fn is_rollback_failure(&self) -> bool {
        matches!(self, Self::Rollback { .. })
    }
}

impl From<DbErr> for LedgerError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_))
            | Some(SqlErr::ForeignKeyConstraintViolation(_)) => return Self::Constraint(err),
            _ => {}
        }
        match err {
            DbErr::RecordNotFound(what) => Self::NotFound(what),
            other => Self::Database(other),
        }
    }
}

impl PartialEq for LedgerError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::NotFound(a), Self::NotFound(b)) => a == b,
            (Self::Constraint(a), Self::Constraint(b)) => a.to_string() == b.to_string(),
            (
                Self::Rollback {
                    source: a,
                    rollback: ra,
                },
                Self::Rollback {
                    source: b,
                    rollback: rb,
                },
            ) => a == b && ra.to_string() == rb.to_string(),
            (Self::Cancelled, Self::Cancelled) => true,
            (Self::InvalidTransfer(a), Self::InvalidTransfer(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
