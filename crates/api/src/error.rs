// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use office_queue_domain::DomainError;
use office_queue_persistence::PersistenceError;
use thiserror::Error;

/// API-level errors.
///
/// These are distinct from domain and persistence errors and represent the
/// API contract. Callers branch on the variant, never on the message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// A referenced service, counter, queue, ticket or assignment does not exist.
    #[error("{resource_type} not found: {message}")]
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The operation would break a ledger or ticket invariant.
    #[error("Invalid state: {message}")]
    InvalidState {
        /// A human-readable description of the violated invariant.
        message: String,
    },
    /// The resource already exists.
    #[error("{resource_type} conflict: {message}")]
    Conflict {
        /// The type of resource that collided.
        resource_type: String,
        /// A human-readable description of the collision.
        message: String,
    },
    /// Invalid input was provided.
    #[error("Invalid input for field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The store reported an error.
    #[error("Store failure: {message}")]
    StoreFailure {
        /// The store's description of the failure.
        message: String,
    },
}

fn not_found(resource_type: &str, message: String) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: resource_type.to_string(),
        message,
    }
}

fn conflict(resource_type: &str, message: String) -> ApiError {
    ApiError::Conflict {
        resource_type: resource_type.to_string(),
        message,
    }
}

/// Translates a domain error into an API error.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidServiceName(msg) | DomainError::InvalidCounterName(msg) => {
            ApiError::InvalidInput {
                field: String::from("name"),
                message: msg,
            }
        }
        DomainError::InvalidServiceTime { minutes } => ApiError::InvalidInput {
            field: String::from("service_time"),
            message: format!("Invalid service time: {minutes}. Must be greater than 0 minutes"),
        },
        DomainError::NoCountersForService { service_id, date } => not_found(
            "Counter",
            format!("No counter serves service {service_id} on {date}"),
        ),
        DomainError::InvalidFanOut { fan_out } => ApiError::InvalidState {
            message: format!("Counter fan-out must be at least 1, got {fan_out}"),
        },
        DomainError::DateParse { date_string, error } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Failed to parse date '{date_string}': {error}"),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Not-found, conflict and invariant errors keep their kind; everything
/// else is reported as a store failure with the store's message.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::ServiceNotFound(_) | PersistenceError::ServiceNameNotFound(_) => {
            not_found("Service", err.to_string())
        }
        PersistenceError::CounterNotFound(_) => not_found("Counter", err.to_string()),
        PersistenceError::QueueNotFound { .. } => not_found("Queue", err.to_string()),
        PersistenceError::TicketNotFound(_) => not_found("Ticket", err.to_string()),
        PersistenceError::AssignmentNotFound { .. } => {
            not_found("Counter assignment", err.to_string())
        }
        PersistenceError::NotFound(_) => not_found("Record", err.to_string()),
        PersistenceError::DuplicateServiceName(_) => conflict("Service", err.to_string()),
        PersistenceError::DuplicateCounterName(_) => conflict("Counter", err.to_string()),
        PersistenceError::DuplicateQueue { .. } => conflict("Queue", err.to_string()),
        PersistenceError::DuplicateAssignment { .. } => {
            conflict("Counter assignment", err.to_string())
        }
        PersistenceError::UniqueViolation(_) => conflict("Record", err.to_string()),
        PersistenceError::QueueUnderflow { .. }
        | PersistenceError::TicketAlreadyServed(_)
        | PersistenceError::InconsistentQueue { .. } => ApiError::InvalidState {
            message: err.to_string(),
        },
        PersistenceError::DatabaseConnectionFailed(_)
        | PersistenceError::MigrationFailed(_)
        | PersistenceError::InitializationError(_)
        | PersistenceError::ForeignKeyEnforcementNotEnabled
        | PersistenceError::InvalidStoredValue(_)
        | PersistenceError::DatabaseError(_) => ApiError::StoreFailure {
            message: err.to_string(),
        },
    }
}
