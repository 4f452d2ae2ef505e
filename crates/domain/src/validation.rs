// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;

/// Longest accepted service or counter name, in characters.
const MAX_NAME_LEN: usize = 64;

/// Validates a service name.
///
/// # Errors
///
/// Returns an error if the name is blank or longer than 64 characters.
pub fn validate_service_name(name: &str) -> Result<(), DomainError> {
    check_name(name).map_err(DomainError::InvalidServiceName)
}

/// Validates a service duration in minutes.
///
/// # Errors
///
/// Returns an error if the duration is zero.
pub const fn validate_service_time(minutes: u32) -> Result<(), DomainError> {
    if minutes == 0 {
        return Err(DomainError::InvalidServiceTime { minutes });
    }
    Ok(())
}

/// Validates a counter name.
///
/// # Errors
///
/// Returns an error if the name is blank or longer than 64 characters.
pub fn validate_counter_name(name: &str) -> Result<(), DomainError> {
    check_name(name).map_err(DomainError::InvalidCounterName)
}

fn check_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err(String::from("Name cannot be empty"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(format!("Name cannot exceed {MAX_NAME_LEN} characters"));
    }
    Ok(())
}
