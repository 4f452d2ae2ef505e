// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use office_queue_domain::Service;
use tracing::debug;

use crate::data_models::{ServiceRow, convert_rows};
use crate::diesel_schema::services;
use crate::error::PersistenceError;

/// Retrieves a service by id.
///
/// # Errors
///
/// Returns `ServiceNotFound` if no service has the id, or an error if the
/// database query fails.
pub fn get_service(conn: &mut SqliteConnection, service_id: i64) -> Result<Service, PersistenceError> {
    debug!(service_id, "Looking up service");

    let row: Option<ServiceRow> = services::table
        .filter(services::service_id.eq(service_id))
        .select(ServiceRow::as_select())
        .first(conn)
        .optional()?;

    row.ok_or(PersistenceError::ServiceNotFound(service_id))?
        .try_into()
}

/// Retrieves a service by its unique name.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the service is not found.
pub fn find_service_by_name(
    conn: &mut SqliteConnection,
    name: &str,
) -> Result<Option<Service>, PersistenceError> {
    debug!("Looking up service by name: {}", name);

    let result: Result<ServiceRow, diesel::result::Error> = services::table
        .filter(services::name.eq(name))
        .select(ServiceRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.try_into()?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Lists every service ordered by id.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_services(conn: &mut SqliteConnection) -> Result<Vec<Service>, PersistenceError> {
    let rows: Vec<ServiceRow> = services::table
        .order(services::service_id.asc())
        .select(ServiceRow::as_select())
        .load(conn)?;

    convert_rows(rows)
}
