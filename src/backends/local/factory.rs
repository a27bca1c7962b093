// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::config::{StepConfig, WorkRegistry};
use crate::errors::ConfigurationError;
use crate::traits::Work;

use super::arithmetic::*;

/// Registry of the built-in `f64` works.
///
/// | name       | behavior                                    |
/// |------------|---------------------------------------------|
/// | `add`      | sum of all inputs                           |
/// | `sum`      | alias of `add`                              |
/// | `subtract` | first input minus the rest                  |
/// | `multiply` | product of all inputs                       |
/// | `divide`   | first input divided by the rest             |
/// | `negate`   | negation of a single input                  |
/// | `identity` | single input passed through                 |
/// | `scale`    | single input times the `factor` option      |
pub fn builtin_registry() -> WorkRegistry<f64> {
    let mut registry = WorkRegistry::new();
    registry.register_work("add", Add);
    registry.register_work("sum", Add);
    registry.register_work("subtract", Subtract);
    registry.register_work("multiply", Multiply);
    registry.register_work("divide", Divide);
    registry.register_work("negate", Negate);
    registry.register_work("identity", Identity);
    registry.register("scale", create_scale);
    registry
}

fn create_scale(step: &StepConfig) -> Result<Arc<dyn Work<f64>>, ConfigurationError> {
    let factor = step
        .f64_option("factor")?
        .ok_or_else(|| ConfigurationError::InvalidOption {
            step: step.display_name().to_string(),
            option: "factor".to_string(),
            reason: "required".to_string(),
        })?;
    Ok(Arc::new(Scale::new(factor)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn step_config(work: &str, options: &[(&str, serde_yaml::Value)]) -> StepConfig {
        StepConfig {
            name: Some("test".to_string()),
            work: work.to_string(),
            consumes: vec![],
            produces: None,
            options: options
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect::<HashMap<_, _>>(),
        }
    }

    #[test]
    fn lists_every_builtin() {
        assert_eq!(
            builtin_registry().names(),
            vec!["add", "divide", "identity", "multiply", "negate", "scale", "subtract", "sum"]
        );
    }

    #[tokio::test]
    async fn scale_reads_its_factor() {
        let registry = builtin_registry();
        let work = registry
            .create(&step_config("scale", &[("factor", serde_yaml::Value::from(3))]))
            .unwrap();
        assert_eq!(work.call(vec![2.0]).await.unwrap(), 6.0);
    }

    #[test]
    fn scale_without_factor_is_rejected() {
        let registry = builtin_registry();
        match registry.create(&step_config("scale", &[])) {
            Err(ConfigurationError::InvalidOption { step, option, .. }) => {
                assert_eq!(step, "test");
                assert_eq!(option, "factor");
            }
            other => panic!("Expected InvalidOption, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn scale_with_non_numeric_factor_is_rejected() {
        let registry = builtin_registry();
        let result = registry.create(&step_config(
            "scale",
            &[("factor", serde_yaml::Value::from("big"))],
        ));
        assert!(matches!(result, Err(ConfigurationError::InvalidOption { .. })));
    }
}
