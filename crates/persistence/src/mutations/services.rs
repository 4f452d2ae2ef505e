// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Service registry mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use office_queue_domain::Service;
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::data_models::column_i32;
use crate::diesel_schema::services;
use crate::error::{PersistenceError, is_unique_violation};
use crate::queries::services::find_service_by_name;

/// Creates a new service.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `name` - The unique service name
/// * `service_time` - Expected handling duration in minutes
///
/// # Errors
///
/// Returns `DuplicateServiceName` if the name is taken, or an error if the
/// insert fails.
pub fn create_service(
    conn: &mut SqliteConnection,
    name: &str,
    service_time: u32,
) -> Result<Service, PersistenceError> {
    let stored_time: i32 = column_i32("service_time", service_time)?;

    diesel::insert_into(services::table)
        .values((
            services::name.eq(name),
            services::service_time.eq(stored_time),
        ))
        .execute(conn)
        .map_err(|e| {
            if is_unique_violation(&e) {
                PersistenceError::DuplicateServiceName(name.to_string())
            } else {
                e.into()
            }
        })?;

    let service_id: i64 = conn.get_last_insert_rowid()?;
    info!(service_id, name, service_time, "Created service");

    Ok(Service::new(service_id, name, service_time))
}

/// Renames a service and replaces its service time.
///
/// The service is addressed by its current name.
///
/// # Errors
///
/// Returns an error if:
/// - No service has `name`
/// - Another service already uses `new_name`
/// - The update fails
pub fn update_service(
    conn: &mut SqliteConnection,
    name: &str,
    new_name: &str,
    new_service_time: u32,
) -> Result<Service, PersistenceError> {
    let stored_time: i32 = column_i32("service_time", new_service_time)?;

    let rows_affected: usize = diesel::update(services::table.filter(services::name.eq(name)))
        .set((
            services::name.eq(new_name),
            services::service_time.eq(stored_time),
        ))
        .execute(conn)
        .map_err(|e| {
            if is_unique_violation(&e) {
                PersistenceError::DuplicateServiceName(new_name.to_string())
            } else {
                e.into()
            }
        })?;

    if rows_affected == 0 {
        return Err(PersistenceError::ServiceNameNotFound(name.to_string()));
    }

    info!(name, new_name, new_service_time, "Updated service");

    find_service_by_name(conn, new_name)?
        .ok_or_else(|| PersistenceError::ServiceNameNotFound(new_name.to_string()))
}

/// Deletes a service by name.
///
/// Its counter assignments, queues and tickets are removed by cascade.
///
/// # Errors
///
/// Returns `ServiceNameNotFound` if no service has `name`.
pub fn delete_service(conn: &mut SqliteConnection, name: &str) -> Result<(), PersistenceError> {
    let rows_affected: usize =
        diesel::delete(services::table.filter(services::name.eq(name))).execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::ServiceNameNotFound(name.to_string()));
    }

    info!(name, "Deleted service");
    Ok(())
}
