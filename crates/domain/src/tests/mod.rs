// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod waiting_time;

use time::{Date, Month};

use crate::{Queue, Ticket};

pub fn test_day() -> Date {
    Date::from_calendar_date(2026, Month::March, 2).unwrap()
}

pub fn create_test_ticket(ticket_id: i64, queue_position: u32) -> Ticket {
    Ticket {
        ticket_id,
        service_id: 1,
        counter_id: None,
        queue_position,
        issue_date: test_day(),
        called_at: None,
        served: false,
    }
}

pub fn create_test_queue(service_id: i64, length: u32) -> Queue {
    Queue::new(service_id, test_day(), length)
}
