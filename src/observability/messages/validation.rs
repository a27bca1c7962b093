// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for configuration validation errors.
//!
//! This module contains message types for logging events related to:
//! * Duplicate producer detection
//! * Unknown work references
//! * Overall rejection of a configuration

use std::fmt::{Display, Formatter};

use tracing::Span;

use crate::engine::Identifier;
use crate::observability::messages::StructuredLog;

/// Two steps declare the same produced identifier.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use asyncflow::engine::Identifier;
/// use asyncflow::observability::messages::validation::DuplicateProducerDetected;
///
/// let identifier = Identifier::new("X", "1.0");
/// let msg = DuplicateProducerDetected {
///     identifier: &identifier,
///     first_step: "f1",
///     second_step: "f2",
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct DuplicateProducerDetected<'a> {
    pub identifier: &'a Identifier,
    pub first_step: &'a str,
    pub second_step: &'a str,
}

impl Display for DuplicateProducerDetected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Duplicate producer for {}: '{}' and '{}'",
            self.identifier, self.first_step, self.second_step
        )
    }
}

impl StructuredLog for DuplicateProducerDetected<'_> {
    fn log(&self) {
        tracing::error!(
            identifier = %self.identifier,
            first_step = self.first_step,
            second_step = self.second_step,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::ERROR,
            "duplicate_producer",
            span_name = name,
            identifier = %self.identifier,
            first_step = self.first_step,
            second_step = self.second_step,
        )
    }
}

/// A step refers to a work name the registry does not know.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct UnknownWorkReferenced<'a> {
    pub step: &'a str,
    pub work: &'a str,
}

impl Display for UnknownWorkReferenced<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Step '{}' references unknown work '{}'", self.step, self.work)
    }
}

impl StructuredLog for UnknownWorkReferenced<'_> {
    fn log(&self) {
        tracing::error!(step = self.step, work = self.work, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::ERROR,
            "unknown_work",
            span_name = name,
            step = self.step,
            work = self.work,
        )
    }
}

/// Validation finished with errors.
///
/// # Log Level
/// `warn!` - The individual errors are logged separately
pub struct ConfigurationRejected {
    pub error_count: usize,
}

impl Display for ConfigurationRejected {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Workflow configuration rejected with {} error(s)",
            self.error_count
        )
    }
}

impl StructuredLog for ConfigurationRejected {
    fn log(&self) {
        tracing::warn!(error_count = self.error_count, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::WARN,
            "configuration_rejected",
            span_name = name,
            error_count = self.error_count,
        )
    }
}
