// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::{WorkRegistry, WorkflowConfig};
use crate::engine::{Step, WorkflowBuilder};
use crate::errors::ConfigurationError;
use crate::traits::Payload;

/// Turns a declarative [`WorkflowConfig`] into a [`WorkflowBuilder`].
///
/// Each step's `work` is resolved through the registry, so the result is a
/// builder ready for `initialize`. Wiring problems (duplicate producers) are
/// still reported by `initialize`; run
/// [`validate_workflow_config`](crate::config::validate_workflow_config) first
/// to see every problem at once.
///
/// # Examples
///
/// ```
/// use asyncflow::backends::local::builtin_registry;
/// use asyncflow::config::{RuntimeBuilder, WorkflowConfig};
///
/// let cfg: WorkflowConfig = serde_yaml::from_str(r#"
/// steps:
///   - { work: add, consumes: [A, B], produces: X }
/// "#).unwrap();
///
/// let builder = RuntimeBuilder::from_config(&cfg, &builtin_registry()).unwrap();
/// assert_eq!(builder.step_count(), 1);
/// ```
pub struct RuntimeBuilder;

impl RuntimeBuilder {
    /// Build an unwired workflow from configuration.
    ///
    /// # Errors
    /// [`ConfigurationError::UnknownWork`] or [`ConfigurationError::InvalidOption`]
    /// from the registry, for the first step that cannot be instantiated.
    pub fn from_config<T: Payload>(
        cfg: &WorkflowConfig,
        registry: &WorkRegistry<T>,
    ) -> Result<WorkflowBuilder<T>, ConfigurationError> {
        let mut builder = WorkflowBuilder::new().with_options(cfg.options.clone());

        for step_cfg in &cfg.steps {
            let work = registry.create(step_cfg)?;
            let mut step = Step::from_shared(work, step_cfg.consumes.clone(), step_cfg.produces.clone());
            if let Some(name) = &step_cfg.name {
                step = step.with_name(name.clone());
            } else if step_cfg.produces.is_none() {
                step = step.with_name(step_cfg.work.clone());
            }
            builder = builder.add_step(step);
        }

        Ok(builder)
    }
}
