// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Counter registry and assignment mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use office_queue_domain::{Counter, CounterAssignment, format_day};
use time::Date;
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::{counter_services, counters};
use crate::error::{PersistenceError, is_unique_violation};
use crate::queries::counters::get_counter;
use crate::queries::services::get_service;

/// Creates a new counter.
///
/// # Errors
///
/// Returns `DuplicateCounterName` if the name is taken, or an error if the
/// insert fails.
pub fn create_counter(conn: &mut SqliteConnection, name: &str) -> Result<Counter, PersistenceError> {
    diesel::insert_into(counters::table)
        .values(counters::name.eq(name))
        .execute(conn)
        .map_err(|e| {
            if is_unique_violation(&e) {
                PersistenceError::DuplicateCounterName(name.to_string())
            } else {
                e.into()
            }
        })?;

    let counter_id: i64 = conn.get_last_insert_rowid()?;
    info!(counter_id, name, "Created counter");

    Ok(Counter::new(counter_id, name))
}

/// Renames a counter.
///
/// # Errors
///
/// Returns `CounterNotFound` if the counter does not exist, or
/// `DuplicateCounterName` if the name is taken.
pub fn update_counter(
    conn: &mut SqliteConnection,
    counter_id: i64,
    name: &str,
) -> Result<Counter, PersistenceError> {
    let rows_affected: usize =
        diesel::update(counters::table.filter(counters::counter_id.eq(counter_id)))
            .set(counters::name.eq(name))
            .execute(conn)
            .map_err(|e| {
                if is_unique_violation(&e) {
                    PersistenceError::DuplicateCounterName(name.to_string())
                } else {
                    e.into()
                }
            })?;

    if rows_affected == 0 {
        return Err(PersistenceError::CounterNotFound(counter_id));
    }

    info!(counter_id, name, "Renamed counter");
    Ok(Counter::new(counter_id, name))
}

/// Deletes a counter.
///
/// Its assignments are removed by cascade and tickets it served keep their
/// history with `counter_id` cleared.
///
/// # Errors
///
/// Returns `CounterNotFound` if the counter does not exist.
pub fn delete_counter(conn: &mut SqliteConnection, counter_id: i64) -> Result<(), PersistenceError> {
    let rows_affected: usize =
        diesel::delete(counters::table.filter(counters::counter_id.eq(counter_id)))
            .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::CounterNotFound(counter_id));
    }

    info!(counter_id, "Deleted counter");
    Ok(())
}

/// Assigns a service to a counter for one day.
///
/// # Errors
///
/// Returns an error if:
/// - The counter or the service does not exist
/// - The assignment already exists
/// - The insert fails
pub fn assign_service(
    conn: &mut SqliteConnection,
    counter_id: i64,
    service_id: i64,
    date: Date,
) -> Result<CounterAssignment, PersistenceError> {
    conn.immediate_transaction(|conn| {
        get_counter(conn, counter_id)?;
        get_service(conn, service_id)?;

        diesel::insert_into(counter_services::table)
            .values((
                counter_services::counter_id.eq(counter_id),
                counter_services::service_id.eq(service_id),
                counter_services::date.eq(format_day(date)),
            ))
            .execute(conn)
            .map_err(|e| {
                if is_unique_violation(&e) {
                    PersistenceError::DuplicateAssignment {
                        counter_id,
                        service_id,
                        date,
                    }
                } else {
                    e.into()
                }
            })?;

        info!(counter_id, service_id, %date, "Assigned service to counter");

        Ok(CounterAssignment {
            counter_id,
            service_id,
            date,
        })
    })
}

/// Removes a day-scoped service assignment from a counter.
///
/// # Errors
///
/// Returns `AssignmentNotFound` if the counter does not serve the service on `date`.
pub fn unassign_service(
    conn: &mut SqliteConnection,
    counter_id: i64,
    service_id: i64,
    date: Date,
) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::delete(
        counter_services::table
            .filter(counter_services::counter_id.eq(counter_id))
            .filter(counter_services::service_id.eq(service_id))
            .filter(counter_services::date.eq(format_day(date))),
    )
    .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::AssignmentNotFound {
            counter_id,
            service_id,
            date,
        });
    }

    info!(counter_id, service_id, %date, "Unassigned service from counter");
    Ok(())
}
