// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! A single unit of work bound to its input and output channels.
//!
//! A [`Step`] declares the identifiers it consumes (in positional order) and at
//! most one identifier it produces. The owning workflow binds one upstream
//! channel per consumed identifier and any number of downstream channels for the
//! produced identifier. Steps can also be bound by hand, which is how the tests
//! below drive them.
//!
//! # Invocation
//!
//! [`Step::invoke`] performs exactly one pass:
//!
//! 1. Wait for one envelope on every upstream channel (all of them, no short-circuit)
//! 2. Order the payloads by the `consumes` declaration
//! 3. Run the work function
//! 4. Broadcast a copy of the result to every downstream channel of the produced identifier
//!
//! A work failure is returned before anything is sent downstream.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use tokio_util::sync::CancellationToken;

use crate::engine::{Channel, Envelope, Identifier};
use crate::errors::ExecutionError;
use crate::observability::{NoopObserver, WorkflowEvent};
use crate::traits::{Payload, Work, WorkflowObserver};

pub struct Step<T> {
    name: Option<String>,
    work: Arc<dyn Work<T>>,
    consumes: Vec<Identifier>,
    produces: Option<Identifier>,
    upstreams: HashMap<Identifier, Channel<T>>,
    downstreams: HashMap<Identifier, Vec<Channel<T>>>,
    observer: Arc<dyn WorkflowObserver>,
}

impl<T: Payload> Step<T> {
    /// Create an unbound step.
    ///
    /// Repeated entries in `consumes` are collapsed to their first occurrence;
    /// each identifier is received at most once per invocation.
    pub fn new(
        work: impl Work<T> + 'static,
        consumes: Vec<Identifier>,
        produces: Option<Identifier>,
    ) -> Self {
        Self::from_shared(Arc::new(work), consumes, produces)
    }

    /// Same as [`Step::new`] for work that is already shared, e.g. from a registry.
    pub fn from_shared(
        work: Arc<dyn Work<T>>,
        consumes: Vec<Identifier>,
        produces: Option<Identifier>,
    ) -> Self {
        let mut unique = Vec::with_capacity(consumes.len());
        for identifier in consumes {
            if !unique.contains(&identifier) {
                unique.push(identifier);
            }
        }

        Self {
            name: None,
            work,
            consumes: unique,
            produces,
            upstreams: HashMap::new(),
            downstreams: HashMap::new(),
            observer: Arc::new(NoopObserver),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn WorkflowObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// The step's name. Until a workflow assigns one, unnamed steps fall back to
    /// their produced identifier's name.
    pub fn name(&self) -> &str {
        match (&self.name, &self.produces) {
            (Some(name), _) => name,
            (None, Some(produces)) => produces.name(),
            (None, None) => "anonymous",
        }
    }

    pub fn consumes(&self) -> &[Identifier] {
        &self.consumes
    }

    pub fn produces(&self) -> Option<&Identifier> {
        self.produces.as_ref()
    }

    /// Register the channel to read `identifier` from. Rebinding replaces the previous channel.
    pub fn bind_upstream(&mut self, identifier: Identifier, channel: Channel<T>) {
        self.upstreams.insert(identifier, channel);
    }

    /// Add a channel that receives a copy of every value produced under `identifier`.
    pub fn bind_downstream(&mut self, identifier: Identifier, channel: Channel<T>) {
        self.downstreams.entry(identifier).or_default().push(channel);
    }

    pub fn upstream(&self, identifier: &Identifier) -> Option<&Channel<T>> {
        self.upstreams.get(identifier)
    }

    pub fn downstreams(&self, identifier: &Identifier) -> &[Channel<T>] {
        self.downstreams
            .get(identifier)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub(crate) fn assign_name_if_missing(&mut self, fallback: impl FnOnce() -> String) {
        if self.name.is_none() {
            self.name = Some(fallback());
        }
    }

    pub(crate) fn set_observer(&mut self, observer: Arc<dyn WorkflowObserver>) {
        self.observer = observer;
    }

    /// Run one pass of the step and return the work result.
    pub async fn invoke(&self) -> Result<T, ExecutionError> {
        self.invoke_until_cancelled(&CancellationToken::new()).await
    }

    /// Like [`Step::invoke`], but stops waiting for inputs once `cancel` fires.
    ///
    /// Cancellation is only observed while waiting for upstream messages; a work
    /// function that has started always runs to completion.
    pub async fn invoke_until_cancelled(
        &self,
        cancel: &CancellationToken,
    ) -> Result<T, ExecutionError> {
        let result = self.run_once(cancel).await;
        if let Err(error) = &result {
            self.observer.notify(&WorkflowEvent::StepFailed {
                step: self.name().to_string(),
                error: error.to_string(),
                cancelled: error.is_cancellation(),
            });
        }
        result
    }

    async fn run_once(&self, cancel: &CancellationToken) -> Result<T, ExecutionError> {
        let messages = tokio::select! {
            _ = cancel.cancelled() => {
                return Err(ExecutionError::Cancelled { step: self.name().to_string() });
            }
            messages = self.wait_for_upstreams() => messages?,
        };

        let inputs = self.order_inputs(messages)?;

        self.observer.notify(&WorkflowEvent::StepStarted {
            step: self.name().to_string(),
            inputs: inputs.len(),
        });
        let started = Instant::now();

        let result = self
            .work
            .call(inputs)
            .await
            .map_err(|source| ExecutionError::WorkFailed {
                step: self.name().to_string(),
                source,
            })?;

        self.push_to_downstreams(&result).await?;

        self.observer.notify(&WorkflowEvent::StepCompleted {
            step: self.name().to_string(),
            duration: started.elapsed(),
        });

        Ok(result)
    }

    async fn wait_for_upstreams(&self) -> Result<Vec<Envelope<T>>, ExecutionError> {
        let mut channels = Vec::with_capacity(self.consumes.len());
        for identifier in &self.consumes {
            let channel = self.upstreams.get(identifier).ok_or_else(|| {
                ExecutionError::ContractViolation {
                    step: self.name().to_string(),
                    message: format!("no upstream channel bound for '{}'", identifier),
                }
            })?;
            channels.push((identifier, channel));
        }

        let received = futures::future::join_all(channels.into_iter().map(
            |(identifier, channel)| async move {
                channel
                    .get()
                    .await
                    .map_err(|_| ExecutionError::ChannelClosed {
                        step: self.name().to_string(),
                        identifier: identifier.clone(),
                    })
            },
        ))
        .await;

        let mut messages = Vec::with_capacity(received.len());
        for envelope in received {
            let envelope = envelope?;
            self.observer.notify(&WorkflowEvent::MessageReceived {
                step: self.name().to_string(),
                identifier: envelope.identifier().clone(),
            });
            messages.push(envelope);
        }
        Ok(messages)
    }

    /// Match received envelopes to the declared `consumes` order.
    fn order_inputs(&self, messages: Vec<Envelope<T>>) -> Result<Vec<T>, ExecutionError> {
        let mut by_identifier: HashMap<Identifier, T> = HashMap::with_capacity(messages.len());
        for envelope in messages {
            let (identifier, payload) = envelope.into_parts();
            if !self.consumes.contains(&identifier) {
                return Err(self.contract_violation(format!(
                    "received '{}' which is not declared in consumes",
                    identifier
                )));
            }
            if by_identifier.insert(identifier.clone(), payload).is_some() {
                return Err(self.contract_violation(format!(
                    "received more than one message for '{}'",
                    identifier
                )));
            }
        }

        self.consumes
            .iter()
            .map(|identifier| {
                by_identifier.remove(identifier).ok_or_else(|| {
                    self.contract_violation(format!("no message received for '{}'", identifier))
                })
            })
            .collect()
    }

    async fn push_to_downstreams(&self, result: &T) -> Result<(), ExecutionError> {
        let Some(identifier) = &self.produces else {
            return Ok(());
        };

        for channel in self.downstreams(identifier) {
            channel
                .put(Envelope::new(identifier.clone(), result.clone()))
                .await
                .map_err(|_| ExecutionError::ChannelClosed {
                    step: self.name().to_string(),
                    identifier: identifier.clone(),
                })?;
            self.observer.notify(&WorkflowEvent::MessageSent {
                step: self.name().to_string(),
                identifier: identifier.clone(),
                channel: channel.label().to_string(),
            });
        }
        Ok(())
    }

    fn contract_violation(&self, message: String) -> ExecutionError {
        ExecutionError::ContractViolation {
            step: self.name().to_string(),
            message,
        }
    }
}

impl<T> fmt::Debug for Step<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
            .field("name", &self.name)
            .field("consumes", &self.consumes)
            .field("produces", &self.produces)
            .field("upstream_count", &self.upstreams.len())
            .field(
                "downstream_count",
                &self.downstreams.values().map(Vec::len).sum::<usize>(),
            )
            .finish()
    }
}
