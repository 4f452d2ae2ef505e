// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::test_day;
use crate::{DomainError, WaitingTimeInputs, estimate_waiting_time};

fn inputs(service_time: u32, queue_length: u32, counter_fan_outs: Vec<u32>) -> WaitingTimeInputs {
    WaitingTimeInputs {
        service_id: 1,
        date: test_day(),
        service_time,
        queue_length,
        counter_fan_outs,
    }
}

fn assert_minutes(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected} minutes, got {actual}"
    );
}

#[test]
fn test_two_dedicated_counters() {
    // 10 * (0.5 + 4 / (1 + 1)) = 25
    let estimate: f64 = estimate_waiting_time(&inputs(10, 4, vec![1, 1])).unwrap();
    assert_minutes(estimate, 25.0);
}

#[test]
fn test_shared_counter_counts_as_fraction() {
    // One dedicated counter and one split across two services: 1 + 1/2 = 1.5
    // 6 * (0.5 + 3 / 1.5) = 15
    let estimate: f64 = estimate_waiting_time(&inputs(6, 3, vec![1, 2])).unwrap();
    assert_minutes(estimate, 15.0);
}

#[test]
fn test_empty_queue_is_half_a_service() {
    let estimate: f64 = estimate_waiting_time(&inputs(8, 0, vec![3])).unwrap();
    assert_minutes(estimate, 4.0);
}

#[test]
fn test_no_counters_is_rejected() {
    let result = estimate_waiting_time(&inputs(10, 4, Vec::new()));
    assert_eq!(
        result,
        Err(DomainError::NoCountersForService {
            service_id: 1,
            date: test_day(),
        })
    );
}

#[test]
fn test_zero_fan_out_is_rejected() {
    let result = estimate_waiting_time(&inputs(10, 4, vec![1, 0]));
    assert_eq!(result, Err(DomainError::InvalidFanOut { fan_out: 0 }));
}
