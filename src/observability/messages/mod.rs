// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for the human-readable line and
//! [`StructuredLog`] to emit it with typed fields at its fixed level.
//!
//! # Organization
//!
//! * `engine` - Wiring, boundary and run lifecycle events
//! * `step` - Step execution events
//! * `validation` - Configuration validation errors
//!
//! # Usage Pattern
//!
//! ```rust
//! use asyncflow::observability::messages::engine::RunStarted;
//! use asyncflow::observability::messages::StructuredLog;
//!
//! RunStarted { steps: 5 }.log();
//! ```

use tracing::Span;

pub mod engine;
pub mod step;
pub mod validation;

/// A message that knows its own level and structured fields.
pub trait StructuredLog {
    /// Emit the message as a `tracing` event
    fn log(&self);

    /// Open a span carrying the message's fields
    fn span(&self, name: &str) -> Span;
}

pub(crate) fn join<T: std::fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
