// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Date;
use time::format_description::FormatItem;
use time::macros::format_description;

use crate::error::DomainError;

const DAY_FORMAT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Formats a calendar day as `YYYY-MM-DD`.
///
/// This is the storage and wire representation of every day key.
#[must_use]
pub fn format_day(date: Date) -> String {
    // The format only names date components, so formatting a `Date` cannot fail.
    date.format(DAY_FORMAT).unwrap_or_else(|_| {
        format!(
            "{:04}-{:02}-{:02}",
            date.year(),
            u8::from(date.month()),
            date.day()
        )
    })
}

/// Parses a `YYYY-MM-DD` calendar day.
///
/// # Errors
///
/// Returns `DomainError::DateParse` if the string is not a valid day.
pub fn parse_day(value: &str) -> Result<Date, DomainError> {
    Date::parse(value, DAY_FORMAT).map_err(|e| DomainError::DateParse {
        date_string: value.to_string(),
        error: e.to_string(),
    })
}
