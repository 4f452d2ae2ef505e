// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Queue ledger mutations.
//!
//! The ledger is the only writer of `queues.length`. Increments and
//! decrements are single `UPDATE` statements so concurrent callers cannot
//! lose each other's updates.

use diesel::SqliteConnection;
use diesel::prelude::*;
use office_queue_domain::{Queue, format_day};
use time::Date;
use tracing::{info, warn};

use crate::data_models::stored_u32;
use crate::diesel_schema::queues;
use crate::error::{PersistenceError, is_unique_violation};
use crate::queries::queues::find_queue;
use crate::queries::services::get_service;

/// Opens an empty queue for a service on a day.
///
/// # Errors
///
/// Returns an error if:
/// - The service does not exist
/// - A queue is already open for the service on `date`
/// - The insert fails
pub fn open_queue(
    conn: &mut SqliteConnection,
    service_id: i64,
    date: Date,
) -> Result<Queue, PersistenceError> {
    conn.immediate_transaction(|conn| {
        get_service(conn, service_id)?;

        diesel::insert_into(queues::table)
            .values((
                queues::service_id.eq(service_id),
                queues::date.eq(format_day(date)),
                queues::length.eq(0),
            ))
            .execute(conn)
            .map_err(|e| {
                if is_unique_violation(&e) {
                    PersistenceError::DuplicateQueue { service_id, date }
                } else {
                    e.into()
                }
            })?;

        info!(service_id, %date, "Opened queue");
        Ok(Queue::new(service_id, date, 0))
    })
}

/// Adds one waiting customer to a queue and returns the updated queue.
///
/// # Errors
///
/// Returns `QueueNotFound` if no queue is open for the service on `date`.
pub fn increment_queue(
    conn: &mut SqliteConnection,
    service_id: i64,
    date: Date,
) -> Result<Queue, PersistenceError> {
    let length: Option<i32> = diesel::update(
        queues::table
            .filter(queues::service_id.eq(service_id))
            .filter(queues::date.eq(format_day(date))),
    )
    .set(queues::length.eq(queues::length + 1))
    .returning(queues::length)
    .get_result(conn)
    .optional()?;

    let length: i32 = length.ok_or(PersistenceError::QueueNotFound { service_id, date })?;
    Ok(Queue::new(service_id, date, stored_u32("length", length)?))
}

/// Removes one waiting customer from a queue.
///
/// # Errors
///
/// Returns `QueueNotFound` if no queue is open for the service on `date`,
/// or `QueueUnderflow` if the queue is already empty.
pub fn decrement_queue(
    conn: &mut SqliteConnection,
    service_id: i64,
    date: Date,
) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::update(
        queues::table
            .filter(queues::service_id.eq(service_id))
            .filter(queues::date.eq(format_day(date)))
            .filter(queues::length.gt(0)),
    )
    .set(queues::length.eq(queues::length - 1))
    .execute(conn)?;

    if rows_affected == 0 {
        if find_queue(conn, service_id, date)?.is_none() {
            return Err(PersistenceError::QueueNotFound { service_id, date });
        }
        warn!(service_id, %date, "Rejected decrement of empty queue");
        return Err(PersistenceError::QueueUnderflow { service_id, date });
    }

    Ok(())
}

/// Starts a new day: every service with a queue row gets a single empty
/// queue dated `today`.
///
/// Runs as one immediate transaction. Rows a service had for other days
/// are folded into the new one, since `(service_id, date)` is the key.
///
/// # Returns
///
/// The number of queues open after the reset.
///
/// # Errors
///
/// Returns an error if any statement fails; nothing is changed in that case.
pub fn reset_all_queues(
    conn: &mut SqliteConnection,
    today: Date,
) -> Result<usize, PersistenceError> {
    conn.immediate_transaction(|conn| {
        let service_ids: Vec<i64> = queues::table
            .select(queues::service_id)
            .distinct()
            .order(queues::service_id.asc())
            .load(conn)?;

        diesel::delete(queues::table).execute(conn)?;

        let day: String = format_day(today);
        let rows: Vec<_> = service_ids
            .iter()
            .map(|service_id| {
                (
                    queues::service_id.eq(*service_id),
                    queues::date.eq(day.clone()),
                    queues::length.eq(0),
                )
            })
            .collect();

        if !rows.is_empty() {
            diesel::insert_into(queues::table)
                .values(rows)
                .execute(conn)?;
        }

        info!(queues = service_ids.len(), %today, "Reset all queues");
        Ok(service_ids.len())
    })
}

/// Deletes the queue for a service on a day.
///
/// # Errors
///
/// Returns `QueueNotFound` if there is no such queue.
pub fn delete_queue(
    conn: &mut SqliteConnection,
    service_id: i64,
    date: Date,
) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::delete(
        queues::table
            .filter(queues::service_id.eq(service_id))
            .filter(queues::date.eq(format_day(date))),
    )
    .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::QueueNotFound { service_id, date });
    }

    info!(service_id, %date, "Deleted queue");
    Ok(())
}

/// Deletes every queue row and returns how many were removed.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_all_queues(conn: &mut SqliteConnection) -> Result<usize, PersistenceError> {
    let removed: usize = diesel::delete(queues::table).execute(conn)?;
    info!(removed, "Deleted all queues");
    Ok(removed)
}
