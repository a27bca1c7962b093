// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Stock [`WorkflowObserver`] implementations.

use tokio::sync::mpsc::UnboundedSender;

use crate::observability::messages::engine::{
    InputFed, OutputDiscarded, OutputRead, RunCompleted, RunFailed, RunStarted, WiringCompleted,
    WiringRejected,
};
use crate::observability::messages::step::{
    MessageReceived, MessageSent, StepCompleted, StepFailed, StepStarted,
};
use crate::observability::messages::StructuredLog;
use crate::observability::WorkflowEvent;
use crate::traits::WorkflowObserver;

/// Logs every event through `tracing`. This is the default observer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl WorkflowObserver for TracingObserver {
    fn notify(&self, event: &WorkflowEvent) {
        match event {
            WorkflowEvent::WiringCompleted {
                steps,
                channels,
                inputs,
                outputs,
            } => WiringCompleted {
                steps: *steps,
                channels: *channels,
                inputs,
                outputs,
            }
            .log(),
            WorkflowEvent::WiringRejected { reason } => WiringRejected { reason }.log(),
            WorkflowEvent::InputFed {
                identifier,
                recipients,
            } => InputFed {
                identifier,
                recipients: *recipients,
            }
            .log(),
            WorkflowEvent::OutputRead { identifier } => OutputRead { identifier }.log(),
            WorkflowEvent::OutputDiscarded { identifier, count } => OutputDiscarded {
                identifier,
                count: *count,
            }
            .log(),
            WorkflowEvent::RunStarted { steps } => RunStarted { steps: *steps }.log(),
            WorkflowEvent::MessageReceived { step, identifier } => {
                MessageReceived { step, identifier }.log()
            }
            WorkflowEvent::StepStarted { step, inputs } => StepStarted {
                step,
                inputs: *inputs,
            }
            .log(),
            WorkflowEvent::MessageSent {
                step,
                identifier,
                channel,
            } => MessageSent {
                step,
                identifier,
                channel,
            }
            .log(),
            WorkflowEvent::StepCompleted { step, duration } => StepCompleted {
                step,
                duration: *duration,
            }
            .log(),
            WorkflowEvent::StepFailed {
                step,
                error,
                cancelled,
            } => StepFailed {
                step,
                error,
                cancelled: *cancelled,
            }
            .log(),
            WorkflowEvent::RunCompleted { steps, duration } => RunCompleted {
                steps: *steps,
                duration: *duration,
            }
            .log(),
            WorkflowEvent::RunFailed { error } => RunFailed { error }.log(),
        }
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl WorkflowObserver for NoopObserver {
    fn notify(&self, _event: &WorkflowEvent) {}
}

/// Forwards a clone of every event to a tokio channel.
///
/// Sends are fire-and-forget; events are dropped once the receiver is gone.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use asyncflow::engine::WorkflowBuilder;
/// use asyncflow::observability::ChannelObserver;
///
/// let (observer, mut events) = ChannelObserver::new();
/// let builder: WorkflowBuilder<i64> = WorkflowBuilder::new().with_observer(Arc::new(observer));
/// # let _ = (builder, events.try_recv());
/// ```
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    sender: UnboundedSender<WorkflowEvent>,
}

impl ChannelObserver {
    pub fn new() -> (Self, tokio::sync::mpsc::UnboundedReceiver<WorkflowEvent>) {
        let (sender, receiver) = tokio::sync::mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    pub fn from_sender(sender: UnboundedSender<WorkflowEvent>) -> Self {
        Self { sender }
    }
}

impl WorkflowObserver for ChannelObserver {
    fn notify(&self, event: &WorkflowEvent) {
        let _ = self.sender.send(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Identifier;

    #[test]
    fn channel_observer_forwards_events() {
        let (observer, mut events) = ChannelObserver::new();
        observer.notify(&WorkflowEvent::RunStarted { steps: 2 });
        observer.notify(&WorkflowEvent::OutputRead {
            identifier: Identifier::new("X", "1.0"),
        });

        assert_eq!(events.try_recv().unwrap(), WorkflowEvent::RunStarted { steps: 2 });
        assert!(matches!(
            events.try_recv().unwrap(),
            WorkflowEvent::OutputRead { .. }
        ));
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn channel_observer_survives_dropped_receiver() {
        let (observer, events) = ChannelObserver::new();
        drop(events);
        observer.notify(&WorkflowEvent::RunStarted { steps: 1 });
    }

    #[test]
    fn tracing_observer_handles_every_event() {
        let identifier = Identifier::new("X", "1.0");
        let events = vec![
            WorkflowEvent::WiringCompleted {
                steps: 1,
                channels: 1,
                inputs: vec![],
                outputs: vec![identifier.clone()],
            },
            WorkflowEvent::WiringRejected {
                reason: "duplicate".to_string(),
            },
            WorkflowEvent::StepFailed {
                step: "s".to_string(),
                error: "boom".to_string(),
                cancelled: false,
            },
            WorkflowEvent::OutputDiscarded {
                identifier: identifier.clone(),
                count: 2,
            },
            WorkflowEvent::RunFailed {
                error: "boom".to_string(),
            },
        ];
        for event in &events {
            TracingObserver.notify(event);
        }
    }
}
