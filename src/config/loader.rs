// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::config::registry::WorkRegistry;
use crate::config::validate_workflow_config;
use crate::engine::{ChannelCapacity, Identifier};
use crate::errors::ConfigurationError;

/// Declarative description of a workflow.
///
/// Steps reference their business logic by name; the names are resolved
/// against a [`WorkRegistry`] when the workflow is built. Steps are wired purely
/// by the identifiers they consume and produce, so their order in the file does
/// not matter.
///
/// # Fields
/// * `options` - Engine options (optional, see [`EngineOptions`])
/// * `steps` - Step declarations
///
/// # Example
/// ```yaml
/// options:
///   channel_capacity: 16
/// steps:
///   - name: add
///     work: add
///     consumes: ["A@1.0", "B@1.0"]
///     produces: "X@1.0"
///   - name: multiply
///     work: multiply
///     consumes: ["X@1.0", "C@1.0"]
///     produces: "Y@1.0"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowConfig {
    #[serde(default)]
    pub options: EngineOptions,
    pub steps: Vec<StepConfig>,
}

/// Engine-wide options.
///
/// # Fields
/// * `channel_capacity` - Queue size of every channel; omitted means unbounded.
///   With a bounded size, a producer waits for room on each downstream channel.
/// * `require_fed_inputs` - Refuse to `run` while an external input has not been
///   fed (defaults to `true`). When disabled, an unfed input makes `run` wait forever.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EngineOptions {
    #[serde(default)]
    pub channel_capacity: Option<usize>,
    #[serde(default = "default_require_fed_inputs")]
    pub require_fed_inputs: bool,
}

fn default_require_fed_inputs() -> bool {
    true
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            channel_capacity: None,
            require_fed_inputs: default_require_fed_inputs(),
        }
    }
}

impl EngineOptions {
    pub fn capacity(&self) -> ChannelCapacity {
        ChannelCapacity::from(self.channel_capacity)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.channel_capacity == Some(0) {
            return Err(ConfigurationError::InvalidEngineOption {
                option: "channel_capacity".to_string(),
                reason: "must be at least 1 (omit it for unbounded channels)".to_string(),
            });
        }
        Ok(())
    }
}

/// Declaration of a single step.
///
/// # Fields
/// * `name` - Display name used in logs and errors (optional)
/// * `work` - Name of the registered work implementation
/// * `consumes` - Input identifiers, in the order the work receives them
/// * `produces` - Output identifier (optional)
/// * `options` - Work-specific options, interpreted by the work's factory
#[derive(Debug, Clone, Deserialize)]
pub struct StepConfig {
    pub name: Option<String>,
    pub work: String,
    #[serde(default)]
    pub consumes: Vec<Identifier>,
    pub produces: Option<Identifier>,
    #[serde(default)]
    pub options: HashMap<String, serde_yaml::Value>,
}

impl StepConfig {
    /// Name used when reporting problems with this step.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.work)
    }

    /// Read a numeric option, failing when it is present but not a number.
    pub fn f64_option(&self, option: &str) -> Result<Option<f64>, ConfigurationError> {
        match self.options.get(option) {
            None => Ok(None),
            Some(value) => value
                .as_f64()
                .map(Some)
                .ok_or_else(|| ConfigurationError::InvalidOption {
                    step: self.display_name().to_string(),
                    option: option.to_string(),
                    reason: format!("expected a number, found {:?}", value),
                }),
        }
    }
}

/// Load a workflow config from a YAML file, or TOML when the extension is `.toml`
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<WorkflowConfig, ConfigurationError> {
    let path = path.as_ref();
    let load_error = |reason: String| ConfigurationError::Load {
        path: path.display().to_string(),
        reason,
    };

    let content = fs::read_to_string(path).map_err(|e| load_error(e.to_string()))?;
    let is_toml = path
        .extension()
        .map(|extension| extension.eq_ignore_ascii_case("toml"))
        .unwrap_or(false);

    if is_toml {
        toml::from_str(&content).map_err(|e| load_error(e.to_string()))
    } else {
        serde_yaml::from_str(&content).map_err(|e| load_error(e.to_string()))
    }
}

/// Load a workflow config and check it against the registry it will be built with
pub fn load_and_validate_config<P: AsRef<Path>, T>(
    path: P,
    registry: &WorkRegistry<T>,
) -> Result<WorkflowConfig, ConfigurationError> {
    let cfg = load_config(path)?;

    if let Err(errors) = validate_workflow_config(&cfg, registry) {
        return Err(ConfigurationError::Validation { errors });
    }

    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parse_basic_config() {
        let yaml = r#"
steps:
  - name: add
    work: add
    consumes: ["A@1.0", "B@1.0"]
    produces: "X@1.0"
  - work: multiply
    consumes: [X, { name: C, version: "1.0" }]
    produces: Y
"#;

        let cfg: WorkflowConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.steps.len(), 2);
        assert_eq!(cfg.options, EngineOptions::default());
        assert_eq!(
            cfg.steps[1].consumes,
            vec![Identifier::new("X", "1.0"), Identifier::new("C", "1.0")]
        );
        assert_eq!(cfg.steps[1].produces, Some(Identifier::new("Y", "1.0")));
        assert_eq!(cfg.steps[0].display_name(), "add");
        assert_eq!(cfg.steps[1].display_name(), "multiply");
    }

    #[test]
    fn parse_engine_options() {
        let yaml = r#"
options:
  channel_capacity: 4
  require_fed_inputs: false
steps: []
"#;

        let cfg: WorkflowConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.options.capacity(), ChannelCapacity::Bounded(4));
        assert!(!cfg.options.require_fed_inputs);
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let options = EngineOptions {
            channel_capacity: Some(0),
            ..EngineOptions::default()
        };
        assert!(matches!(
            options.validate(),
            Err(ConfigurationError::InvalidEngineOption { .. })
        ));
        assert!(EngineOptions::default().validate().is_ok());
    }

    #[test]
    fn malformed_identifier_fails_to_parse() {
        let yaml = r#"
steps:
  - work: add
    consumes: ["@1.0"]
"#;
        assert!(serde_yaml::from_str::<WorkflowConfig>(yaml).is_err());
    }

    #[test]
    fn numeric_options_are_typed() {
        let yaml = r#"
steps:
  - work: scale
    consumes: [A]
    produces: B
    options:
      factor: 2.5
      label: twice
"#;
        let cfg: WorkflowConfig = serde_yaml::from_str(yaml).unwrap();
        let step = &cfg.steps[0];

        assert_eq!(step.f64_option("factor").unwrap(), Some(2.5));
        assert_eq!(step.f64_option("missing").unwrap(), None);
        assert!(matches!(
            step.f64_option("label"),
            Err(ConfigurationError::InvalidOption { .. })
        ));
    }

    #[test]
    fn load_toml_by_extension() {
        let toml = r#"
[options]
channel_capacity = 2

[[steps]]
work = "negate"
consumes = ["A@1.0"]
produces = "B@1.0"
"#;
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(toml.as_bytes()).unwrap();

        let cfg = load_config(file.path()).unwrap();
        assert_eq!(cfg.options.channel_capacity, Some(2));
        assert_eq!(cfg.steps[0].work, "negate");
        assert_eq!(cfg.steps[0].produces, Some(Identifier::new("B", "1.0")));
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let result = load_config("/definitely/not/here.yaml");
        assert!(matches!(result, Err(ConfigurationError::Load { .. })));
    }
}
