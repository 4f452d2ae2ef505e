// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use office_queue_domain::DomainError;
use office_queue_persistence::PersistenceError;

use crate::tests::helpers::today;
use crate::{ApiError, translate_domain_error, translate_persistence_error};

#[test]
fn test_invalid_fan_out_is_invalid_state() {
    let err: ApiError = translate_domain_error(DomainError::InvalidFanOut { fan_out: 0 });

    assert!(matches!(err, ApiError::InvalidState { .. }));
}

#[test]
fn test_invariant_errors_are_invalid_state() {
    let errors: Vec<PersistenceError> = vec![
        PersistenceError::QueueUnderflow {
            service_id: 1,
            date: today(),
        },
        PersistenceError::TicketAlreadyServed(4),
        PersistenceError::InconsistentQueue {
            service_id: 1,
            date: today(),
            length: 2,
        },
    ];

    for err in errors {
        assert!(matches!(
            translate_persistence_error(err),
            ApiError::InvalidState { .. }
        ));
    }
}

#[test]
fn test_database_error_is_store_failure_with_message() {
    let err: ApiError =
        translate_persistence_error(PersistenceError::DatabaseError(String::from("disk I/O")));

    match err {
        ApiError::StoreFailure { message } => assert!(message.contains("disk I/O")),
        other => panic!("Expected StoreFailure, got {other:?}"),
    }
}

#[test]
fn test_duplicate_assignment_is_conflict() {
    let err: ApiError = translate_persistence_error(PersistenceError::DuplicateAssignment {
        counter_id: 1,
        service_id: 2,
        date: today(),
    });

    assert!(matches!(
        err,
        ApiError::Conflict { ref resource_type, .. } if resource_type == "Counter assignment"
    ));
}

#[test]
fn test_api_error_display_includes_resource() {
    let err: ApiError = translate_persistence_error(PersistenceError::TicketNotFound(9));

    assert_eq!(err.to_string(), "Ticket not found: Ticket 9 not found");
}
