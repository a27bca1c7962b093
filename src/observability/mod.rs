// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and execution events.
//!
//! The engine never logs directly. Steps and workflows emit [`WorkflowEvent`]s to a
//! [`WorkflowObserver`](crate::traits::WorkflowObserver); the default
//! [`TracingObserver`] turns each event into a message struct from [`messages`]
//! and logs it through `tracing`.
//!
//! # Architecture
//!
//! Messages are organized by subsystem:
//! * `messages::engine` - Wiring, boundary and run lifecycle events
//! * `messages::step` - Per-step receive, execute and send events
//! * `messages::validation` - Configuration validation errors
//!
//! # Usage
//!
//! ```rust
//! use asyncflow::observability::messages::step::StepFailed;
//!
//! let msg = StepFailed {
//!     step: "add",
//!     error: "division by zero",
//!     cancelled: false,
//! };
//!
//! tracing::error!("{}", msg);
//! ```

pub mod events;
pub mod messages;
pub mod observers;

pub use events::WorkflowEvent;
pub use observers::{ChannelObserver, NoopObserver, TracingObserver};
