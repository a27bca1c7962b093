// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod arithmetic;
pub mod factory;

pub use arithmetic::*;
pub use factory::builtin_registry;
