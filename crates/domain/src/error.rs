// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use thiserror::Error;

/// Errors raised by domain validation and pure domain computations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Service name is empty or otherwise unusable.
    #[error("Invalid service name: {0}")]
    InvalidServiceName(String),
    /// Service duration is not a positive number of minutes.
    #[error("Invalid service time: {minutes}. Must be greater than 0 minutes")]
    InvalidServiceTime {
        /// The rejected duration.
        minutes: u32,
    },
    /// Counter name is empty or otherwise unusable.
    #[error("Invalid counter name: {0}")]
    InvalidCounterName(String),
    /// No counter is assigned to the service on the requested day.
    #[error("No counter serves service {service_id} on {date}")]
    NoCountersForService {
        /// The service being estimated.
        service_id: i64,
        /// The day of the estimate.
        date: time::Date,
    },
    /// A counter reported a fan-out of zero services.
    #[error("Counter fan-out must be at least 1, got {fan_out}")]
    InvalidFanOut {
        /// The rejected fan-out.
        fan_out: u32,
    },
    /// A calendar day could not be parsed.
    #[error("Failed to parse date '{date_string}': {error}")]
    DateParse {
        /// The rejected input.
        date_string: String,
        /// The parser's message.
        error: String,
    },
}
