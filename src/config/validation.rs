// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Configuration validation ahead of wiring.
//!
//! [`WorkflowBuilder::initialize`](crate::engine::WorkflowBuilder::initialize)
//! stops at the first problem it meets. Validating the declarative config first
//! reports every problem at once, so a broken file can be fixed in one pass.
//!
//! # Validation Pipeline
//!
//! 1. **Engine options**: `channel_capacity` must be at least 1 when present
//! 2. **Work references**: every step's `work` must be registered
//! 3. **Unique producers**: no two steps may produce the same identifier
//!
//! All checks run regardless of earlier failures; they are independent.

use std::collections::HashMap;

use crate::config::{WorkRegistry, WorkflowConfig};
use crate::engine::Identifier;
use crate::errors::ConfigurationError;
use crate::observability::messages::validation::{
    ConfigurationRejected, DuplicateProducerDetected, UnknownWorkReferenced,
};
use crate::observability::messages::StructuredLog;

/// Validate a workflow config against the registry it will be built with.
///
/// # Returns
///
/// * `Ok(())` - The config can be built and wired
/// * `Err(Vec<ConfigurationError>)` - Every problem found, in declaration order
pub fn validate_workflow_config<T>(
    config: &WorkflowConfig,
    registry: &WorkRegistry<T>,
) -> Result<(), Vec<ConfigurationError>> {
    let mut errors = Vec::new();

    if let Err(error) = config.options.validate() {
        errors.push(error);
    }

    if let Err(unknown) = validate_work_references(config, registry) {
        errors.extend(unknown);
    }

    if let Err(duplicates) = validate_unique_producers(config) {
        errors.extend(duplicates);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        errors.iter().for_each(log_validation_error);
        ConfigurationRejected {
            error_count: errors.len(),
        }
        .log();
        Err(errors)
    }
}

fn log_validation_error(error: &ConfigurationError) {
    match error {
        ConfigurationError::DuplicateProducer {
            identifier,
            first_step,
            second_step,
        } => DuplicateProducerDetected {
            identifier,
            first_step,
            second_step,
        }
        .log(),
        ConfigurationError::UnknownWork { step, work } => UnknownWorkReferenced { step, work }.log(),
        other => tracing::error!("{}", other),
    }
}

fn validate_work_references<T>(
    config: &WorkflowConfig,
    registry: &WorkRegistry<T>,
) -> Result<(), Vec<ConfigurationError>> {
    let errors: Vec<ConfigurationError> = config
        .steps
        .iter()
        .filter(|step| !registry.contains(&step.work))
        .map(|step| ConfigurationError::UnknownWork {
            step: step.display_name().to_string(),
            work: step.work.clone(),
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Each identifier may have at most one producer. Every extra producer is
/// reported against the first one declared.
fn validate_unique_producers(config: &WorkflowConfig) -> Result<(), Vec<ConfigurationError>> {
    let mut producers: HashMap<&Identifier, &str> = HashMap::new();
    let mut errors = Vec::new();

    for step in &config.steps {
        let Some(identifier) = &step.produces else {
            continue;
        };
        match producers.get(identifier) {
            Some(first_step) => errors.push(ConfigurationError::DuplicateProducer {
                identifier: identifier.clone(),
                first_step: first_step.to_string(),
                second_step: step.display_name().to_string(),
            }),
            None => {
                producers.insert(identifier, step.display_name());
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::local::builtin_registry;

    fn config(yaml: &str) -> WorkflowConfig {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn valid_config_passes() {
        let cfg = config(
            r#"
steps:
  - { work: add, consumes: [A, B], produces: X }
  - { work: multiply, consumes: [X, C], produces: Y }
"#,
        );
        assert!(validate_workflow_config(&cfg, &builtin_registry()).is_ok());
    }

    #[test]
    fn duplicate_producers_are_reported_against_the_first() {
        let cfg = config(
            r#"
steps:
  - { name: f1, work: identity, consumes: [A], produces: X }
  - { name: f2, work: identity, consumes: [A], produces: X }
  - { name: f3, work: identity, consumes: [A], produces: X }
"#,
        );

        let errors = validate_workflow_config(&cfg, &builtin_registry()).unwrap_err();
        assert_eq!(errors.len(), 2);
        for (error, second) in errors.iter().zip(["f2", "f3"]) {
            match error {
                ConfigurationError::DuplicateProducer {
                    first_step,
                    second_step,
                    ..
                } => {
                    assert_eq!(first_step, "f1");
                    assert_eq!(second_step, second);
                }
                other => panic!("Expected DuplicateProducer, got {:?}", other),
            }
        }
    }

    #[test]
    fn all_problems_are_accumulated() {
        let cfg = config(
            r#"
options:
  channel_capacity: 0
steps:
  - { name: a, work: no_such_work, consumes: [A], produces: X }
  - { name: b, work: identity, consumes: [A], produces: X }
"#,
        );

        let errors = validate_workflow_config(&cfg, &builtin_registry()).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(matches!(errors[0], ConfigurationError::InvalidEngineOption { .. }));
        assert!(matches!(errors[1], ConfigurationError::UnknownWork { .. }));
        assert!(matches!(errors[2], ConfigurationError::DuplicateProducer { .. }));
    }
}
