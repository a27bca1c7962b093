// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Identifier-driven auto-wiring and single-pass execution.
//!
//! Steps never name each other. A [`WorkflowBuilder`] collects steps, and
//! [`WorkflowBuilder::initialize`] connects them purely by identifier equality:
//!
//! 1. **Consumers wire first.** Every consumed identifier of every step gets a
//!    fresh channel, bound as that step's upstream and remembered under the
//!    identifier.
//! 2. **Producers wire second.** Every produced identifier gets one boundary
//!    channel (readable through [`Workflow::read`]) plus every consumer channel
//!    recorded in pass 1, all bound as the producer's downstreams.
//!
//! A second producer for the same identifier is rejected with
//! [`ConfigurationError::DuplicateProducer`] and no [`Workflow`] is built.
//!
//! ```text
//!   feed(A) ──► [A→add] ┐
//!   feed(B) ──► [B→add] ┴─ add ──X──► [X→multiply] ┐
//!                               └──► [X→boundary]   │
//!   feed(C) ──────────────────────► [C→multiply] ──┴─ multiply ──Y──► [Y→boundary] ──► read(Y)
//! ```
//!
//! Identifiers that are consumed but never produced are the workflow's external
//! inputs. With [`EngineOptions::require_fed_inputs`] enabled (the default),
//! [`Workflow::run`] refuses to start until each of them has been fed, rather than
//! waiting forever.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Instant;

use futures::FutureExt;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::config::EngineOptions;
use crate::engine::{Channel, Envelope, Identifier, Step};
use crate::errors::{ConfigurationError, ExecutionError};
use crate::observability::{TracingObserver, WorkflowEvent};
use crate::traits::{Payload, Work, WorkflowObserver};

const BOUNDARY_READER: &str = "boundary";

/// Collects steps before wiring. Consumed by [`WorkflowBuilder::initialize`].
pub struct WorkflowBuilder<T> {
    steps: Vec<Step<T>>,
    options: EngineOptions,
    observer: Arc<dyn WorkflowObserver>,
}

impl<T: Payload> Default for WorkflowBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Payload> WorkflowBuilder<T> {
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            options: EngineOptions::default(),
            observer: Arc::new(TracingObserver),
        }
    }

    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn WorkflowObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn add_step(mut self, step: Step<T>) -> Self {
        self.steps.push(step);
        self
    }

    /// Shorthand for `add_step(Step::new(work, consumes, produces))`.
    pub fn add(
        self,
        work: impl Work<T> + 'static,
        consumes: Vec<Identifier>,
        produces: Option<Identifier>,
    ) -> Self {
        self.add_step(Step::new(work, consumes, produces))
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Wire every channel and return the runnable workflow.
    ///
    /// # Errors
    /// * [`ConfigurationError::DuplicateProducer`] when two steps produce the same identifier
    /// * [`ConfigurationError::InvalidEngineOption`] when the options are out of range
    pub fn initialize(self) -> Result<Workflow<T>, ConfigurationError> {
        let WorkflowBuilder {
            mut steps,
            options,
            observer,
        } = self;

        if let Err(error) = options.validate() {
            observer.notify(&WorkflowEvent::WiringRejected {
                reason: error.to_string(),
            });
            return Err(error);
        }
        let capacity = options.capacity();

        for (index, step) in steps.iter_mut().enumerate() {
            step.assign_name_if_missing(|| format!("step-{}", index));
            step.set_observer(observer.clone());
        }

        let mut upstreams: HashMap<Identifier, Vec<Channel<T>>> = HashMap::new();
        let mut boundary: HashMap<Identifier, Channel<T>> = HashMap::new();
        let mut producers: HashMap<Identifier, String> = HashMap::new();
        let mut channel_count = 0;

        // Pass 1: consumers
        for step in steps.iter_mut() {
            for identifier in step.consumes().to_vec() {
                let channel = Channel::new(format!("{} -> {}", identifier, step.name()), capacity);
                upstreams
                    .entry(identifier.clone())
                    .or_default()
                    .push(channel.clone());
                step.bind_upstream(identifier, channel);
                channel_count += 1;
            }
        }

        // Pass 2: producers, which can now see every consumer channel
        for step in steps.iter_mut() {
            let Some(identifier) = step.produces().cloned() else {
                continue;
            };

            if let Some(first_step) = producers.get(&identifier) {
                let error = ConfigurationError::DuplicateProducer {
                    identifier,
                    first_step: first_step.clone(),
                    second_step: step.name().to_string(),
                };
                observer.notify(&WorkflowEvent::WiringRejected {
                    reason: error.to_string(),
                });
                return Err(error);
            }
            producers.insert(identifier.clone(), step.name().to_string());

            let boundary_channel = Channel::new(
                format!("{} -> {}", identifier, BOUNDARY_READER),
                capacity,
            );
            boundary.insert(identifier.clone(), boundary_channel.clone());
            step.bind_downstream(identifier.clone(), boundary_channel);
            channel_count += 1;

            if let Some(consumers) = upstreams.get(&identifier) {
                for channel in consumers {
                    step.bind_downstream(identifier.clone(), channel.clone());
                }
            }
        }

        let mut inputs: Vec<Identifier> = upstreams
            .keys()
            .filter(|identifier| !boundary.contains_key(*identifier))
            .cloned()
            .collect();
        inputs.sort();
        let mut outputs: Vec<Identifier> = boundary.keys().cloned().collect();
        outputs.sort();

        observer.notify(&WorkflowEvent::WiringCompleted {
            steps: steps.len(),
            channels: channel_count,
            inputs: inputs.clone(),
            outputs: outputs.clone(),
        });

        Ok(Workflow {
            steps: steps.into_iter().map(Arc::new).collect(),
            upstreams,
            boundary,
            inputs,
            outputs,
            fed: Mutex::new(HashSet::new()),
            options,
            observer,
        })
    }
}

/// A wired workflow. The step set is fixed; only `feed`, `run` and `read` remain.
pub struct Workflow<T> {
    steps: Vec<Arc<Step<T>>>,
    upstreams: HashMap<Identifier, Vec<Channel<T>>>,
    boundary: HashMap<Identifier, Channel<T>>,
    inputs: Vec<Identifier>,
    outputs: Vec<Identifier>,
    fed: Mutex<HashSet<Identifier>>,
    options: EngineOptions,
    observer: Arc<dyn WorkflowObserver>,
}

impl<T: Payload> Workflow<T> {
    pub fn builder() -> WorkflowBuilder<T> {
        WorkflowBuilder::new()
    }

    /// Identifiers consumed by some step but produced by none, sorted.
    pub fn inputs(&self) -> &[Identifier] {
        &self.inputs
    }

    /// Identifiers with a boundary channel, sorted.
    pub fn outputs(&self) -> &[Identifier] {
        &self.outputs
    }

    /// Produced identifiers that no step consumes, i.e. the graph's final results.
    pub fn terminal_outputs(&self) -> Vec<&Identifier> {
        self.outputs
            .iter()
            .filter(|identifier| !self.upstreams.contains_key(*identifier))
            .collect()
    }

    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|step| step.name()).collect()
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Deliver `payload` to every step that consumes `identifier`.
    ///
    /// # Errors
    /// [`ConfigurationError::UnconsumedIdentifier`] when no step consumes `identifier`.
    pub async fn feed(&self, identifier: &Identifier, payload: T) -> Result<(), ExecutionError> {
        let channels = self
            .upstreams
            .get(identifier)
            .ok_or_else(|| ConfigurationError::UnconsumedIdentifier(identifier.clone()))?;

        for channel in channels {
            channel
                .put(Envelope::new(identifier.clone(), payload.clone()))
                .await
                .map_err(|_| ExecutionError::ChannelClosed {
                    step: BOUNDARY_READER.to_string(),
                    identifier: identifier.clone(),
                })?;
        }
        self.fed.lock().await.insert(identifier.clone());

        self.observer.notify(&WorkflowEvent::InputFed {
            identifier: identifier.clone(),
            recipients: channels.len(),
        });
        Ok(())
    }

    /// Wait for the value produced under `identifier` and return it.
    ///
    /// Each produced value can be read once; a second `read` for the same
    /// identifier in the same run waits for a value that never comes. Values left
    /// unread are discarded when the next run starts.
    ///
    /// # Errors
    /// [`ConfigurationError::UnproducedIdentifier`] when no step produces `identifier`.
    pub async fn read(&self, identifier: &Identifier) -> Result<T, ExecutionError> {
        let channel = self
            .boundary
            .get(identifier)
            .ok_or_else(|| ConfigurationError::UnproducedIdentifier(identifier.clone()))?;

        let envelope = channel
            .get()
            .await
            .map_err(|_| ExecutionError::ChannelClosed {
                step: BOUNDARY_READER.to_string(),
                identifier: identifier.clone(),
            })?;

        self.observer.notify(&WorkflowEvent::OutputRead {
            identifier: identifier.clone(),
        });
        Ok(envelope.into_payload())
    }

    /// Invoke every step once, concurrently, and wait for all of them.
    ///
    /// The first work failure cancels steps still waiting for inputs and is
    /// returned in preference to the resulting cancellations. Every failure is
    /// reported to the observer.
    pub async fn run(&self) -> Result<(), ExecutionError> {
        {
            let mut fed = self.fed.lock().await;
            if self.options.require_fed_inputs {
                let missing: Vec<Identifier> = self
                    .inputs
                    .iter()
                    .filter(|identifier| !fed.contains(*identifier))
                    .cloned()
                    .collect();
                if !missing.is_empty() {
                    let error = ExecutionError::from(ConfigurationError::UnsourcedIdentifier {
                        identifiers: missing,
                    });
                    self.observer.notify(&WorkflowEvent::RunFailed {
                        error: error.to_string(),
                    });
                    return Err(error);
                }
            }
            // Only a run that actually starts consumes the fed inputs
            fed.clear();
        }

        self.discard_unread_outputs();

        self.observer.notify(&WorkflowEvent::RunStarted {
            steps: self.steps.len(),
        });
        let started = Instant::now();
        let cancel = CancellationToken::new();

        let handles: Vec<_> = self
            .steps
            .iter()
            .map(|step| tokio::spawn(Self::run_step(step.clone(), cancel.clone())))
            .collect();

        let mut work_error = None;
        let mut other_errors = Vec::new();
        for joined in futures::future::join_all(handles).await {
            match joined {
                Ok(Ok(())) => {}
                Ok(Err(error)) if error.is_cancellation() => other_errors.push(error),
                Ok(Err(error)) => {
                    if work_error.is_none() {
                        work_error = Some(error);
                    } else {
                        other_errors.push(error);
                    }
                }
                Err(join_error) => other_errors.push(ExecutionError::TaskPanicked {
                    message: join_error.to_string(),
                }),
            }
        }

        // Prefer a real failure over the cancellations it caused
        if let Some(error) = work_error.or_else(|| other_errors.into_iter().next()) {
            self.observer.notify(&WorkflowEvent::RunFailed {
                error: error.to_string(),
            });
            return Err(error);
        }

        self.observer.notify(&WorkflowEvent::RunCompleted {
            steps: self.steps.len(),
            duration: started.elapsed(),
        });
        Ok(())
    }

    /// Drop boundary values the previous run left unread.
    fn discard_unread_outputs(&self) {
        for identifier in &self.outputs {
            let Some(channel) = self.boundary.get(identifier) else {
                continue;
            };
            let count = channel.drain();
            if count > 0 {
                self.observer.notify(&WorkflowEvent::OutputDiscarded {
                    identifier: identifier.clone(),
                    count,
                });
            }
        }
    }

    async fn run_step(step: Arc<Step<T>>, cancel: CancellationToken) -> Result<(), ExecutionError> {
        let outcome = std::panic::AssertUnwindSafe(step.invoke_until_cancelled(&cancel))
            .catch_unwind()
            .await;

        let result = match outcome {
            Ok(result) => result.map(|_| ()),
            Err(panic) => Err(ExecutionError::TaskPanicked {
                message: panic_message(panic.as_ref(), step.name()),
            }),
        };

        if matches!(&result, Err(error) if !error.is_cancellation()) {
            cancel.cancel();
        }
        result
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send), step: &str) -> String {
    let detail = panic
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());
    format!("step '{}' panicked: {}", step, detail)
}

impl<T> std::fmt::Debug for Workflow<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workflow")
            .field("step_count", &self.steps.len())
            .field("inputs", &self.inputs)
            .field("outputs", &self.outputs)
            .field("options", &self.options)
            .finish()
    }
}
