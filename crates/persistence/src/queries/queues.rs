// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Queue ledger reads.

use diesel::SqliteConnection;
use diesel::prelude::*;
use office_queue_domain::{DispatchCandidate, Queue, format_day};
use time::Date;
use tracing::debug;

use crate::data_models::{QueueRow, convert_rows, stored_u32};
use crate::diesel_schema::{counter_services, queues, services};
use crate::error::PersistenceError;
use crate::queries::counters::get_counter;

/// Retrieves the queue for a service on a day.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if no queue is open.
pub fn find_queue(
    conn: &mut SqliteConnection,
    service_id: i64,
    date: Date,
) -> Result<Option<Queue>, PersistenceError> {
    let row: Option<QueueRow> = queues::table
        .filter(queues::service_id.eq(service_id))
        .filter(queues::date.eq(format_day(date)))
        .select(QueueRow::as_select())
        .first(conn)
        .optional()?;

    row.map(Queue::try_from).transpose()
}

/// Retrieves the queue for a service on a day.
///
/// # Errors
///
/// Returns `QueueNotFound` if no queue is open for the service on `date`.
pub fn get_queue(
    conn: &mut SqliteConnection,
    service_id: i64,
    date: Date,
) -> Result<Queue, PersistenceError> {
    find_queue(conn, service_id, date)?
        .ok_or(PersistenceError::QueueNotFound { service_id, date })
}

/// Lists every queue row, ordered by day then service.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_queues(conn: &mut SqliteConnection) -> Result<Vec<Queue>, PersistenceError> {
    let rows: Vec<QueueRow> = queues::table
        .order((queues::date.asc(), queues::service_id.asc()))
        .select(QueueRow::as_select())
        .load(conn)?;

    convert_rows(rows)
}

/// Lists the queues open on `date` for every service the counter is
/// assigned that day, ordered by service id.
///
/// Services assigned without an open queue are omitted.
///
/// # Errors
///
/// Returns `CounterNotFound` if the counter does not exist, or an error if
/// the database query fails.
pub fn list_queues_for_counter(
    conn: &mut SqliteConnection,
    counter_id: i64,
    date: Date,
) -> Result<Vec<Queue>, PersistenceError> {
    get_counter(conn, counter_id)?;
    let day: String = format_day(date);

    let assigned = counter_services::table
        .filter(counter_services::counter_id.eq(counter_id))
        .filter(counter_services::date.eq(day.clone()))
        .select(counter_services::service_id);

    let rows: Vec<QueueRow> = queues::table
        .filter(queues::date.eq(day))
        .filter(queues::service_id.eq_any(assigned))
        .order(queues::service_id.asc())
        .select(QueueRow::as_select())
        .load(conn)?;

    convert_rows(rows)
}

/// Loads the queues a counter may drain on `date`, each paired with its
/// service time, ordered by service id.
///
/// The caller is expected to have verified the counter.
///
/// # Errors
///
/// Returns an error if the database query fails or a row is invalid.
pub fn list_dispatch_candidates(
    conn: &mut SqliteConnection,
    counter_id: i64,
    date: Date,
) -> Result<Vec<DispatchCandidate>, PersistenceError> {
    let day: String = format_day(date);

    let assigned = counter_services::table
        .filter(counter_services::counter_id.eq(counter_id))
        .filter(counter_services::date.eq(day.clone()))
        .select(counter_services::service_id);

    let rows: Vec<(QueueRow, i32)> = queues::table
        .inner_join(services::table)
        .filter(queues::date.eq(day))
        .filter(queues::service_id.eq_any(assigned))
        .order(queues::service_id.asc())
        .select((QueueRow::as_select(), services::service_time))
        .load(conn)?;

    let mut candidates: Vec<DispatchCandidate> = Vec::with_capacity(rows.len());
    for (queue_row, service_time) in rows {
        let queue: Queue = queue_row.try_into()?;
        candidates.push(DispatchCandidate::new(
            queue,
            stored_u32("service_time", service_time)?,
        ));
    }

    debug!(
        counter_id,
        candidates = candidates.len(),
        "Loaded dispatch candidates"
    );
    Ok(candidates)
}
