// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use office_queue_domain::{Counter, Service, format_day};
use time::Date;
use tracing::debug;

use crate::data_models::{CounterRow, ServiceRow, convert_rows};
use crate::diesel_schema::{counter_services, counters, services};
use crate::error::PersistenceError;

/// Retrieves a counter by id.
///
/// # Errors
///
/// Returns `CounterNotFound` if no counter has the id, or an error if the
/// database query fails.
pub fn get_counter(conn: &mut SqliteConnection, counter_id: i64) -> Result<Counter, PersistenceError> {
    debug!(counter_id, "Looking up counter");

    let row: Option<CounterRow> = counters::table
        .filter(counters::counter_id.eq(counter_id))
        .select(CounterRow::as_select())
        .first(conn)
        .optional()?;

    row.map(Counter::from)
        .ok_or(PersistenceError::CounterNotFound(counter_id))
}

/// Lists every counter ordered by id.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_counters(conn: &mut SqliteConnection) -> Result<Vec<Counter>, PersistenceError> {
    let rows: Vec<CounterRow> = counters::table
        .order(counters::counter_id.asc())
        .select(CounterRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(Counter::from).collect())
}

/// Lists the services a counter is assigned on `date`, ordered by service id.
///
/// # Errors
///
/// Returns `CounterNotFound` if the counter does not exist, or an error if
/// the database query fails.
pub fn services_for_day(
    conn: &mut SqliteConnection,
    counter_id: i64,
    date: Date,
) -> Result<Vec<Service>, PersistenceError> {
    get_counter(conn, counter_id)?;

    let rows: Vec<ServiceRow> = counter_services::table
        .inner_join(services::table)
        .filter(counter_services::counter_id.eq(counter_id))
        .filter(counter_services::date.eq(format_day(date)))
        .order(services::service_id.asc())
        .select(ServiceRow::as_select())
        .load(conn)?;

    convert_rows(rows)
}

