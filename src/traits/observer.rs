// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::observability::WorkflowEvent;

/// Hook the engine calls at well-defined points while wiring and running.
///
/// The engine never writes to the console itself; everything observable goes
/// through `notify`. Implementations decide what to do with the event, usually logging or
/// forwarding it. `notify` is called from step tasks, so it must not block.
pub trait WorkflowObserver: Send + Sync {
    fn notify(&self, event: &WorkflowEvent);
}
