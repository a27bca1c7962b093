// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Work implementations that configured workflows can refer to by name.
//!
//! # Available Backends
//!
//! ## Local Backend
//! In-process `f64` arithmetic works, exposed through
//! [`builtin_registry`](local::builtin_registry):
//! - **Folding**: `add`/`sum`, `multiply`
//! - **Positional**: `subtract`, `divide` (division by zero is a work failure)
//! - **Unary**: `negate`, `identity`, `scale` (requires a `factor` option)
//!
//! ## Stub Backend (Test-Only)
//! Works for exercising the engine itself (only available in test builds):
//! - **FailingWork**: Always fails with a fixed message
//! - **EchoWork**: Returns its first input
//! - **DelayedWork**: Sleeps, then returns its first input
//!
//! # Architecture
//!
//! ```text
//! Configuration → WorkRegistry → Work Instance → Step → Workflow
//! ```
//!
//! # Examples
//!
//! ```rust
//! use asyncflow::backends::local::builtin_registry;
//!
//! let registry = builtin_registry();
//! assert!(registry.contains("multiply"));
//! ```

pub mod local;
#[cfg(test)]
pub mod stub;
