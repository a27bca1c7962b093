// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::config::StepConfig;
use crate::errors::ConfigurationError;
use crate::traits::{Payload, Work};

/// Builds a work instance for one configured step; options come from the step config.
pub type WorkFactory<T> =
    Arc<dyn Fn(&StepConfig) -> Result<Arc<dyn Work<T>>, ConfigurationError> + Send + Sync>;

/// Named work implementations that configured steps can refer to.
///
/// # Example
/// ```
/// use asyncflow::config::WorkRegistry;
/// use asyncflow::errors::WorkError;
///
/// let mut registry: WorkRegistry<i64> = WorkRegistry::new();
/// registry.register_work("sum", |inputs: Vec<i64>| async move {
///     Ok::<_, WorkError>(inputs.iter().sum())
/// });
///
/// assert!(registry.contains("sum"));
/// ```
pub struct WorkRegistry<T> {
    factories: HashMap<String, WorkFactory<T>>,
}

impl<T> Default for WorkRegistry<T> {
    fn default() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }
}

impl<T: Payload> WorkRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory that reads the step's options. Replaces any previous entry.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&StepConfig) -> Result<Arc<dyn Work<T>>, ConfigurationError> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Arc::new(factory));
    }

    /// Register one shared work instance used by every step that names it.
    pub fn register_work(&mut self, name: impl Into<String>, work: impl Work<T> + 'static) {
        let work: Arc<dyn Work<T>> = Arc::new(work);
        self.register(name, move |_: &StepConfig| Ok(work.clone()));
    }
}

impl<T> WorkRegistry<T> {
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Instantiate the work a step config refers to.
    pub fn create(&self, step: &StepConfig) -> Result<Arc<dyn Work<T>>, ConfigurationError> {
        let factory = self
            .factories
            .get(&step.work)
            .ok_or_else(|| ConfigurationError::UnknownWork {
                step: step.display_name().to_string(),
                work: step.work.clone(),
            })?;
        factory(step)
    }
}

impl<T> fmt::Debug for WorkRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkRegistry")
            .field("work_count", &self.factories.len())
            .field("work_names", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::WorkError;
    use std::collections::HashMap;

    fn step_config(work: &str) -> StepConfig {
        StepConfig {
            name: Some("step".to_string()),
            work: work.to_string(),
            consumes: vec![],
            produces: None,
            options: HashMap::new(),
        }
    }

    #[tokio::test]
    async fn creates_registered_work() {
        let mut registry: WorkRegistry<i64> = WorkRegistry::new();
        registry.register_work("seven", |_: Vec<i64>| async move { Ok::<_, WorkError>(7) });

        let work = registry.create(&step_config("seven")).unwrap();
        assert_eq!(work.call(vec![]).await.unwrap(), 7);
    }

    #[test]
    fn unknown_work_names_the_step() {
        let registry: WorkRegistry<i64> = WorkRegistry::new();

        match registry.create(&step_config("missing")) {
            Err(ConfigurationError::UnknownWork { step, work }) => {
                assert_eq!(step, "step");
                assert_eq!(work, "missing");
            }
            other => panic!("Expected UnknownWork, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn names_are_sorted() {
        let mut registry: WorkRegistry<i64> = WorkRegistry::new();
        registry.register_work("b", |_: Vec<i64>| async move { Ok::<_, WorkError>(0) });
        registry.register_work("a", |_: Vec<i64>| async move { Ok::<_, WorkError>(0) });

        assert_eq!(registry.names(), vec!["a", "b"]);
    }
}
