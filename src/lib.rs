// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;   // work implementations
pub mod config;     // config + registry
pub mod engine;     // wiring and execution
pub mod errors;     // error handling
pub mod observability;
pub mod traits;     // unified abstractions
