// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::error::DomainError;

/// Everything the waiting-time estimate depends on, read in one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitingTimeInputs {
    /// The service being requested.
    pub service_id: i64,
    /// The day of the request.
    pub date: Date,
    /// Expected handling duration of the service, in minutes.
    pub service_time: u32,
    /// Customers currently waiting for the service.
    pub queue_length: u32,
    /// For each counter serving the service on `date`, the total number of
    /// services that counter is assigned that day (itself included).
    pub counter_fan_outs: Vec<u32>,
}

/// Estimates how long a new customer will wait, in minutes.
///
/// `service_time * (0.5 + queue_length / Σ(1 / k_i))`
///
/// The half service time models whoever is mid-service. The second term
/// divides the waiting customers by the effective number of counters
/// working this service, where a counter split across `k` services counts
/// as `1/k` of a counter.
///
/// # Errors
///
/// Returns an error if:
/// - No counter serves the service on the requested day
/// - A counter reports a fan-out of zero
pub fn estimate_waiting_time(inputs: &WaitingTimeInputs) -> Result<f64, DomainError> {
    if inputs.counter_fan_outs.is_empty() {
        return Err(DomainError::NoCountersForService {
            service_id: inputs.service_id,
            date: inputs.date,
        });
    }

    let mut sum_reciprocals: f64 = 0.0;
    for &fan_out in &inputs.counter_fan_outs {
        if fan_out == 0 {
            return Err(DomainError::InvalidFanOut { fan_out });
        }
        sum_reciprocals += 1.0 / f64::from(fan_out);
    }

    let service_time: f64 = f64::from(inputs.service_time);
    let queue_length: f64 = f64::from(inputs.queue_length);

    Ok(service_time * (0.5 + queue_length / sum_reciprocals))
}
