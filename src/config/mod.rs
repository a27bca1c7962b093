// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod loader;
mod registry;
mod runtime;
mod validation;

pub mod consts;

pub use loader::{load_and_validate_config, load_config, EngineOptions, StepConfig, WorkflowConfig};
pub use registry::{WorkFactory, WorkRegistry};
pub use runtime::RuntimeBuilder;
pub use validation::validate_workflow_config;
