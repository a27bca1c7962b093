// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors raised while a wired workflow is executing.

use thiserror::Error;

use crate::engine::Identifier;
use crate::errors::ConfigurationError;

/// The boxed error a work function returns.
///
/// Work failures are carried verbatim as the `source` of
/// [`ExecutionError::WorkFailed`], so callers can downcast to their own error types.
pub type WorkError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur during step invocation or a workflow run
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// The step's work function returned an error
    #[error("Step '{step}' failed: {source}")]
    WorkFailed {
        step: String,
        #[source]
        source: WorkError,
    },

    /// Wiring does not match the step's declaration; this is a defect, not a runtime condition
    #[error("Contract violation in step '{step}': {message}")]
    ContractViolation { step: String, message: String },

    /// The step stopped waiting because another step failed
    #[error("Step '{step}' cancelled due to failure in another step")]
    Cancelled { step: String },

    /// Every sender of a channel went away before a value arrived
    #[error("Channel for '{identifier}' closed while step '{step}' was using it")]
    ChannelClosed { step: String, identifier: Identifier },

    /// The run was rejected before any step started
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// A step task panicked or could not be joined
    #[error("Step task terminated abnormally: {message}")]
    TaskPanicked { message: String },
}

impl ExecutionError {
    /// Name of the step the error is attributed to, when there is one.
    pub fn step(&self) -> Option<&str> {
        match self {
            ExecutionError::WorkFailed { step, .. }
            | ExecutionError::ContractViolation { step, .. }
            | ExecutionError::Cancelled { step }
            | ExecutionError::ChannelClosed { step, .. } => Some(step),
            ExecutionError::Configuration(_) | ExecutionError::TaskPanicked { .. } => None,
        }
    }

    /// True for errors caused by another step failing first.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, ExecutionError::Cancelled { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[derive(Debug)]
    struct DivideByZero;

    impl std::fmt::Display for DivideByZero {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "division by zero")
        }
    }

    impl std::error::Error for DivideByZero {}

    #[test]
    fn work_failure_keeps_work_error_as_source() {
        let error = ExecutionError::WorkFailed {
            step: "divide".to_string(),
            source: Box::new(DivideByZero),
        };

        assert_eq!(error.to_string(), "Step 'divide' failed: division by zero");
        let source = error.source().expect("source should be preserved");
        assert!(source.downcast_ref::<DivideByZero>().is_some());
        assert_eq!(error.step(), Some("divide"));
    }

    #[test]
    fn configuration_errors_convert_transparently() {
        let config = ConfigurationError::UnproducedIdentifier(Identifier::new("Y", "1.0"));
        let error: ExecutionError = config.clone().into();

        assert_eq!(error.to_string(), config.to_string());
        assert_eq!(error.step(), None);
        assert!(!error.is_cancellation());
    }
}
