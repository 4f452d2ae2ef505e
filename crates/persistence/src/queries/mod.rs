// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! ## Module Organization
//!
//! - `services`: Service registry lookups
//! - `counters`: Counter registry lookups and day-scoped assignments
//! - `queues`: Queue ledger reads and dispatch candidates
//! - `tickets`: Ticket lookups and waiting tickets
//! - `waiting_time`: Snapshot of the inputs to the waiting-time estimate
//!
//! Every function takes the connection explicitly so it can run either on
//! its own or inside a transaction opened by a mutation.

pub mod counters;
pub mod queues;
pub mod services;
pub mod tickets;
pub mod waiting_time;
