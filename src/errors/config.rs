// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Configuration errors raised while wiring or addressing a workflow.

use thiserror::Error;

use crate::engine::Identifier;

/// Errors signalling an invalid or incomplete wiring request.
///
/// These are raised synchronously by `initialize`, `feed`, `read` and by the
/// configuration loader, never mid-execution. The caller recovers by fixing the
/// graph definition and building the workflow again.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    /// Two steps declare the same produced identifier
    #[error("Identifier '{identifier}' is produced by both '{first_step}' and '{second_step}'")]
    DuplicateProducer {
        identifier: Identifier,
        first_step: String,
        second_step: String,
    },

    /// `feed` was called for an identifier no step consumes
    #[error("Identifier '{0}' is not consumed by any step")]
    UnconsumedIdentifier(Identifier),

    /// `read` was called for an identifier no step produces
    #[error("Identifier '{0}' is not produced by any step")]
    UnproducedIdentifier(Identifier),

    /// External inputs that were never fed before `run`
    #[error("No value was fed for external input(s): {}", join_identifiers(.identifiers))]
    UnsourcedIdentifier { identifiers: Vec<Identifier> },

    /// A configured step references a work implementation the registry does not know
    #[error("Step '{step}' references unknown work '{work}'")]
    UnknownWork { step: String, work: String },

    /// An identifier string could not be parsed
    #[error("Invalid identifier '{input}': {reason}")]
    InvalidIdentifier { input: String, reason: String },

    /// A step option is missing or has the wrong shape
    #[error("Step '{step}' has invalid option '{option}': {reason}")]
    InvalidOption {
        step: String,
        option: String,
        reason: String,
    },

    /// Engine options are out of range
    #[error("Invalid engine option '{option}': {reason}")]
    InvalidEngineOption { option: String, reason: String },

    /// A boundary input given on the command line could not be parsed
    #[error("Invalid input '{input}': {reason}")]
    InvalidInput { input: String, reason: String },

    /// The configuration file could not be read or parsed
    #[error("Failed to load configuration '{path}': {reason}")]
    Load { path: String, reason: String },

    /// Several problems found in one validation pass
    #[error("Configuration validation failed:\n{}", join_errors(.errors))]
    Validation { errors: Vec<ConfigurationError> },
}

fn join_identifiers(identifiers: &[Identifier]) -> String {
    identifiers
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_errors(errors: &[ConfigurationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_producer_message_names_both_steps() {
        let error = ConfigurationError::DuplicateProducer {
            identifier: Identifier::new("X", "1.0"),
            first_step: "f1".to_string(),
            second_step: "f2".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "Identifier 'X@1.0' is produced by both 'f1' and 'f2'"
        );
    }

    #[test]
    fn unsourced_message_lists_every_identifier() {
        let error = ConfigurationError::UnsourcedIdentifier {
            identifiers: vec![Identifier::new("A", "1.0"), Identifier::new("C", "2.0")],
        };

        assert_eq!(
            error.to_string(),
            "No value was fed for external input(s): A@1.0, C@2.0"
        );
    }

    #[test]
    fn validation_message_joins_nested_errors() {
        let error = ConfigurationError::Validation {
            errors: vec![
                ConfigurationError::UnknownWork {
                    step: "a".to_string(),
                    work: "nope".to_string(),
                },
                ConfigurationError::UnproducedIdentifier(Identifier::new("Y", "1.0")),
            ],
        };

        let message = error.to_string();
        assert!(message.starts_with("Configuration validation failed:"));
        assert!(message.contains("Step 'a' references unknown work 'nope'"));
        assert!(message.contains("Identifier 'Y@1.0' is not produced by any step"));
    }
}
