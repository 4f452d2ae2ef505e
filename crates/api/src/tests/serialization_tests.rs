// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{CallNextResponse, OpenQueueRequest};

#[test]
fn test_open_queue_request_date_is_optional() {
    let request: OpenQueueRequest = serde_json::from_str(r#"{"service_id": 4}"#).unwrap();

    assert_eq!(request.service_id, 4);
    assert_eq!(request.date, None);
}

#[test]
fn test_idle_call_next_serializes_null_ticket() {
    let response: CallNextResponse = CallNextResponse {
        counter_id: 2,
        ticket: None,
    };

    let json: serde_json::Value = serde_json::to_value(&response).unwrap();

    assert_eq!(json["counter_id"], 2);
    assert!(json["ticket"].is_null());
}
