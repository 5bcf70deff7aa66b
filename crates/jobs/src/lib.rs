// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! chime-jobs: ready-made job implementations
//!
//! Adapters that implement the [`Job`](chime_core::Job) contract for
//! common kinds of scheduled work. Currently one adapter: [`CommandJob`],
//! which runs an external command.

mod command;

pub use command::{CommandError, CommandJob};
