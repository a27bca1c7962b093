// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for step execution events.

use std::fmt::{Display, Formatter};
use std::time::Duration;

use tracing::Span;

use crate::engine::Identifier;
use crate::observability::messages::StructuredLog;

/// A step received one of its inputs.
///
/// # Log Level
/// `trace!` - Per-message traffic
pub struct MessageReceived<'a> {
    pub step: &'a str,
    pub identifier: &'a Identifier,
}

impl Display for MessageReceived<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Step '{}' received {}", self.step, self.identifier)
    }
}

impl StructuredLog for MessageReceived<'_> {
    fn log(&self) {
        tracing::trace!(step = self.step, identifier = %self.identifier, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::trace_span!(
            "message_received",
            span_name = name,
            step = self.step,
            identifier = %self.identifier,
        )
    }
}

/// All inputs arrived; the work is about to run.
///
/// # Log Level
/// `debug!` - Detailed execution flow
///
/// # Example
/// ```
/// use asyncflow::observability::messages::step::StepStarted;
///
/// let msg = StepStarted { step: "add", inputs: 2 };
/// assert_eq!(msg.to_string(), "Executing step 'add' with 2 input(s)");
/// ```
pub struct StepStarted<'a> {
    pub step: &'a str,
    pub inputs: usize,
}

impl Display for StepStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Executing step '{}' with {} input(s)", self.step, self.inputs)
    }
}

impl StructuredLog for StepStarted<'_> {
    fn log(&self) {
        tracing::debug!(step = self.step, inputs = self.inputs, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "step",
            span_name = name,
            step = self.step,
            inputs = self.inputs,
        )
    }
}

/// A result was put on one downstream channel.
///
/// # Log Level
/// `trace!` - Per-message traffic
pub struct MessageSent<'a> {
    pub step: &'a str,
    pub identifier: &'a Identifier,
    pub channel: &'a str,
}

impl Display for MessageSent<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Step '{}' sent {} on channel '{}'",
            self.step, self.identifier, self.channel
        )
    }
}

impl StructuredLog for MessageSent<'_> {
    fn log(&self) {
        tracing::trace!(
            step = self.step,
            identifier = %self.identifier,
            channel = self.channel,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::trace_span!(
            "message_sent",
            span_name = name,
            step = self.step,
            identifier = %self.identifier,
            channel = self.channel,
        )
    }
}

/// A step's work finished and its result was broadcast.
///
/// # Log Level
/// `debug!` - Detailed execution flow
pub struct StepCompleted<'a> {
    pub step: &'a str,
    pub duration: Duration,
}

impl Display for StepCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Step '{}' completed in {:?}", self.step, self.duration)
    }
}

impl StructuredLog for StepCompleted<'_> {
    fn log(&self) {
        tracing::debug!(
            step = self.step,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "step_completed",
            span_name = name,
            step = self.step,
            duration = ?self.duration,
        )
    }
}

/// A step gave up, either on its own error or because the run was cancelled.
///
/// # Log Level
/// `error!` for failures, `debug!` for cancellations
pub struct StepFailed<'a> {
    pub step: &'a str,
    pub error: &'a str,
    pub cancelled: bool,
}

impl Display for StepFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        if self.cancelled {
            write!(f, "Step '{}' cancelled", self.step)
        } else {
            write!(f, "Step '{}' failed: {}", self.step, self.error)
        }
    }
}

impl StructuredLog for StepFailed<'_> {
    fn log(&self) {
        if self.cancelled {
            tracing::debug!(step = self.step, "{}", self);
        } else {
            tracing::error!(step = self.step, error = self.error, "{}", self);
        }
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "step_failed",
            span_name = name,
            step = self.step,
            error = self.error,
            cancelled = self.cancelled,
        )
    }
}
