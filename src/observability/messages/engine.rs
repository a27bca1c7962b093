// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for workflow wiring and run lifecycle events.
//!
//! This module contains message types for logging events related to:
//! * Channel wiring at initialization (success and rejection)
//! * Values crossing the workflow boundary (feed, read, discard)
//! * Run lifecycle (start, completion, failure)

use std::fmt::{Display, Formatter};
use std::time::Duration;

use tracing::Span;

use crate::engine::Identifier;
use crate::observability::messages::{join, StructuredLog};

/// Every channel was bound and the workflow is ready to run.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use asyncflow::engine::Identifier;
/// use asyncflow::observability::messages::engine::WiringCompleted;
///
/// let inputs = vec![Identifier::new("A", "1.0")];
/// let outputs = vec![Identifier::new("X", "1.0")];
/// let msg = WiringCompleted {
///     steps: 1,
///     channels: 2,
///     inputs: &inputs,
///     outputs: &outputs,
/// };
///
/// assert_eq!(
///     msg.to_string(),
///     "Workflow wired: 1 steps, 2 channels, inputs [A@1.0], outputs [X@1.0]"
/// );
/// ```
pub struct WiringCompleted<'a> {
    pub steps: usize,
    pub channels: usize,
    pub inputs: &'a [Identifier],
    pub outputs: &'a [Identifier],
}

impl Display for WiringCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Workflow wired: {} steps, {} channels, inputs [{}], outputs [{}]",
            self.steps,
            self.channels,
            join(self.inputs),
            join(self.outputs)
        )
    }
}

impl StructuredLog for WiringCompleted<'_> {
    fn log(&self) {
        tracing::info!(
            steps = self.steps,
            channels = self.channels,
            inputs = join(self.inputs),
            outputs = join(self.outputs),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "wiring",
            span_name = name,
            steps = self.steps,
            channels = self.channels,
        )
    }
}

/// Initialization refused the graph.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct WiringRejected<'a> {
    pub reason: &'a str,
}

impl Display for WiringRejected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Workflow wiring rejected: {}", self.reason)
    }
}

impl StructuredLog for WiringRejected<'_> {
    fn log(&self) {
        tracing::error!(reason = self.reason, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!("wiring_rejected", span_name = name, reason = self.reason)
    }
}

/// A value was fed into the graph from outside.
///
/// # Log Level
/// `debug!` - Boundary traffic
pub struct InputFed<'a> {
    pub identifier: &'a Identifier,
    pub recipients: usize,
}

impl Display for InputFed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Fed {} to {} consuming step(s)",
            self.identifier, self.recipients
        )
    }
}

impl StructuredLog for InputFed<'_> {
    fn log(&self) {
        tracing::debug!(
            identifier = %self.identifier,
            recipients = self.recipients,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "input_fed",
            span_name = name,
            identifier = %self.identifier,
            recipients = self.recipients,
        )
    }
}

/// A value was read off a boundary channel.
///
/// # Log Level
/// `debug!` - Boundary traffic
pub struct OutputRead<'a> {
    pub identifier: &'a Identifier,
}

impl Display for OutputRead<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Read {} from the workflow boundary", self.identifier)
    }
}

impl StructuredLog for OutputRead<'_> {
    fn log(&self) {
        tracing::debug!(identifier = %self.identifier, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("output_read", span_name = name, identifier = %self.identifier)
    }
}

/// Unread values from the previous run were dropped from a boundary channel.
///
/// # Log Level
/// `debug!` - Boundary traffic
pub struct OutputDiscarded<'a> {
    pub identifier: &'a Identifier,
    pub count: usize,
}

impl Display for OutputDiscarded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Discarded {} unread value(s) of {} from the previous run",
            self.count, self.identifier
        )
    }
}

impl StructuredLog for OutputDiscarded<'_> {
    fn log(&self) {
        tracing::debug!(identifier = %self.identifier, count = self.count, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "output_discarded",
            span_name = name,
            identifier = %self.identifier,
            count = self.count,
        )
    }
}

/// A run started.
///
/// # Log Level
/// `info!` - Important operational event
pub struct RunStarted {
    pub steps: usize,
}

impl Display for RunStarted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Starting workflow run: {} steps", self.steps)
    }
}

impl StructuredLog for RunStarted {
    fn log(&self) {
        tracing::info!(steps = self.steps, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("run", span_name = name, steps = self.steps)
    }
}

/// Every step finished its single invocation.
///
/// # Log Level
/// `info!` - Important operational event
pub struct RunCompleted {
    pub steps: usize,
    pub duration: Duration,
}

impl Display for RunCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Workflow run completed: {} steps in {:?}",
            self.steps, self.duration
        )
    }
}

impl StructuredLog for RunCompleted {
    fn log(&self) {
        tracing::info!(
            steps = self.steps,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "run_completed",
            span_name = name,
            steps = self.steps,
            duration = ?self.duration,
        )
    }
}

/// A run ended with an error.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct RunFailed<'a> {
    pub error: &'a str,
}

impl Display for RunFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Workflow run failed: {}", self.error)
    }
}

impl StructuredLog for RunFailed<'_> {
    fn log(&self) {
        tracing::error!(error = self.error, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!("run_failed", span_name = name, error = self.error)
    }
}
