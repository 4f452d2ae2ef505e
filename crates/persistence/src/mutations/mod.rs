// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mutations.
//!
//! Functions that open an immediate transaction are the public units of
//! work. SQLite cannot nest `BEGIN IMMEDIATE`, so helpers meant to run
//! inside those units (`increment_queue`, `decrement_queue`,
//! `claim_ticket`) never open one themselves.

pub mod counters;
pub mod dispatch;
pub mod queues;
pub mod services;
pub mod tickets;
