// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Events the engine emits to its [`WorkflowObserver`](crate::traits::WorkflowObserver).

use std::time::Duration;

use crate::engine::Identifier;

/// Something observable happened while wiring or running a workflow.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowEvent {
    /// `initialize` finished binding every channel
    WiringCompleted {
        steps: usize,
        channels: usize,
        inputs: Vec<Identifier>,
        outputs: Vec<Identifier>,
    },

    /// `initialize` refused the graph
    WiringRejected { reason: String },

    /// A caller fed a value into the graph
    InputFed {
        identifier: Identifier,
        recipients: usize,
    },

    /// A caller took a value off a boundary channel
    OutputRead { identifier: Identifier },

    /// A new run dropped boundary values the previous run left unread
    OutputDiscarded { identifier: Identifier, count: usize },

    RunStarted { steps: usize },

    /// A step finished waiting on one of its upstream channels
    MessageReceived { step: String, identifier: Identifier },

    /// All inputs arrived and the work function is about to run
    StepStarted { step: String, inputs: usize },

    /// A step put its result on one downstream channel
    MessageSent {
        step: String,
        identifier: Identifier,
        channel: String,
    },

    StepCompleted { step: String, duration: Duration },

    StepFailed {
        step: String,
        error: String,
        cancelled: bool,
    },

    RunCompleted { steps: usize, duration: Duration },

    RunFailed { error: String },
}
