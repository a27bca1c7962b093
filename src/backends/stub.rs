// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::time::Duration;

use async_trait::async_trait;

use crate::errors::WorkError;
use crate::traits::{Payload, Work};

/// A work that always fails for testing failure scenarios
pub struct FailingWork {
    message: String,
}

impl FailingWork {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl<T: Payload> Work<T> for FailingWork {
    async fn call(&self, _inputs: Vec<T>) -> Result<T, WorkError> {
        Err(self.message.clone().into())
    }
}

/// Returns its first input; fails when called with none
pub struct EchoWork;

#[async_trait]
impl<T: Payload> Work<T> for EchoWork {
    async fn call(&self, inputs: Vec<T>) -> Result<T, WorkError> {
        inputs
            .into_iter()
            .next()
            .ok_or_else(|| "echo called without inputs".into())
    }
}

/// Sleeps before echoing its first input, for ordering and cancellation tests
pub struct DelayedWork {
    delay: Duration,
}

impl DelayedWork {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl<T: Payload> Work<T> for DelayedWork {
    async fn call(&self, inputs: Vec<T>) -> Result<T, WorkError> {
        tokio::time::sleep(self.delay).await;
        EchoWork.call(inputs).await
    }
}
