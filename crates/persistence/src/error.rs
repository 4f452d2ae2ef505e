// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;
use time::Date;

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    /// Database connection failed.
    #[error("Database connection failed: {0}")]
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),
    /// Initialization error.
    #[error("Initialization error: {0}")]
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    #[error("Foreign key enforcement is not enabled")]
    ForeignKeyEnforcementNotEnabled,

    /// No service has the given id.
    #[error("Service {0} not found")]
    ServiceNotFound(i64),
    /// No service has the given name.
    #[error("Service '{0}' not found")]
    ServiceNameNotFound(String),
    /// No counter has the given id.
    #[error("Counter {0} not found")]
    CounterNotFound(i64),
    /// No queue is open for the service on the given day.
    #[error("No queue open for service {service_id} on {date}")]
    QueueNotFound { service_id: i64, date: Date },
    /// No ticket has the given id.
    #[error("Ticket {0} not found")]
    TicketNotFound(i64),
    /// The counter is not assigned to the service on the given day.
    #[error("Counter {counter_id} is not assigned to service {service_id} on {date}")]
    AssignmentNotFound {
        counter_id: i64,
        service_id: i64,
        date: Date,
    },
    /// A record the store expected was missing.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Another service already uses the name.
    #[error("A service named '{0}' already exists")]
    DuplicateServiceName(String),
    /// Another counter already uses the name.
    #[error("A counter named '{0}' already exists")]
    DuplicateCounterName(String),
    /// A queue is already open for the service on the given day.
    #[error("A queue for service {service_id} on {date} already exists")]
    DuplicateQueue { service_id: i64, date: Date },
    /// The counter already serves the service on the given day.
    #[error("Counter {counter_id} already serves service {service_id} on {date}")]
    DuplicateAssignment {
        counter_id: i64,
        service_id: i64,
        date: Date,
    },
    /// A uniqueness constraint rejected the write.
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    /// Decrementing the queue would make its length negative.
    #[error("Queue for service {service_id} on {date} is already empty")]
    QueueUnderflow { service_id: i64, date: Date },
    /// The ticket has already been claimed by a counter.
    #[error("Ticket {0} has already been served")]
    TicketAlreadyServed(i64),
    /// The ledger reports waiting customers but no waiting ticket exists.
    #[error(
        "Queue for service {service_id} on {date} has length {length} but no waiting ticket"
    )]
    InconsistentQueue {
        service_id: i64,
        date: Date,
        length: u32,
    },

    /// A stored value could not be converted into its domain type.
    #[error("Invalid stored value: {0}")]
    InvalidStoredValue(String),
    /// A database error occurred.
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<DieselError> for PersistenceError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => Self::NotFound("Record not found".to_string()),
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                Self::UniqueViolation(info.message().to_string())
            }
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

/// Returns whether a Diesel error is a unique constraint violation.
pub(crate) const fn is_unique_violation(err: &DieselError) -> bool {
    matches!(
        err,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    )
}
