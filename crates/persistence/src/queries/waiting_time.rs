// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use num_traits::ToPrimitive;
use office_queue_domain::{Queue, Service, WaitingTimeInputs, format_day};
use time::Date;
use tracing::debug;

use crate::diesel_schema::counter_services;
use crate::error::PersistenceError;
use crate::queries::queues::get_queue;
use crate::queries::services::get_service;

/// Gathers everything the waiting-time estimate needs in one read transaction.
///
/// The fan-out of a counter is the number of services it is assigned on
/// `date`, the requested service included.
///
/// # Errors
///
/// Returns an error if:
/// - The service does not exist
/// - No queue is open for the service on `date`
/// - The database query fails
pub fn waiting_time_inputs(
    conn: &mut SqliteConnection,
    service_id: i64,
    date: Date,
) -> Result<WaitingTimeInputs, PersistenceError> {
    conn.transaction(|conn| {
        let service: Service = get_service(conn, service_id)?;
        let queue: Queue = get_queue(conn, service_id, date)?;
        let day: String = format_day(date);

        let serving = diesel::alias!(counter_services as serving);
        let serving_counters = serving
            .filter(serving.field(counter_services::service_id).eq(service_id))
            .filter(serving.field(counter_services::date).eq(day.clone()))
            .select(serving.field(counter_services::counter_id));

        let rows = counter_services::table
            .filter(counter_services::date.eq(day))
            .filter(counter_services::counter_id.eq_any(serving_counters))
            .group_by(counter_services::counter_id)
            .order(counter_services::counter_id.asc())
            .select((
                counter_services::counter_id,
                diesel::dsl::count(counter_services::service_id),
            ))
            .load::<(i64, i64)>(conn)?;

        let mut counter_fan_outs: Vec<u32> = Vec::with_capacity(rows.len());
        for (counter_id, count_i64) in rows {
            let fan_out: u32 = count_i64.to_u32().ok_or_else(|| {
                PersistenceError::InvalidStoredValue(format!(
                    "Fan-out of counter {counter_id} out of range: {count_i64}"
                ))
            })?;
            counter_fan_outs.push(fan_out);
        }

        debug!(
            service_id,
            queue_length = queue.length,
            counters = counter_fan_outs.len(),
            "Gathered waiting-time inputs"
        );

        Ok(WaitingTimeInputs {
            service_id,
            date,
            service_time: service.service_time,
            queue_length: queue.length,
            counter_fan_outs,
        })
    })
}
