// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::future::Future;

use async_trait::async_trait;

use crate::errors::WorkError;

/// Bounds every payload type carried by a workflow must satisfy.
pub trait Payload: Clone + Send + Sync + 'static {}

impl<T: Clone + Send + Sync + 'static> Payload for T {}

/// The business logic a step runs.
///
/// `inputs` holds one value per consumed identifier, in the order the step
/// declared them. The returned value is broadcast under the step's produced
/// identifier (or discarded when the step produces nothing). Errors are
/// propagated verbatim as the step's failure.
///
/// Any `Fn(Vec<T>) -> impl Future<Output = Result<T, WorkError>>` closure is a `Work`:
///
/// ```
/// use asyncflow::errors::WorkError;
/// use asyncflow::traits::Work;
///
/// # tokio_test_block(async {
/// let add = |inputs: Vec<i64>| async move { Ok::<_, WorkError>(inputs.iter().sum()) };
/// assert_eq!(add.call(vec![2, 3]).await.unwrap(), 5);
/// # });
/// # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Runtime::new().unwrap().block_on(f)
/// # }
/// ```
#[async_trait]
pub trait Work<T>: Send + Sync {
    async fn call(&self, inputs: Vec<T>) -> Result<T, WorkError>;
}

#[async_trait]
impl<T, F, Fut> Work<T> for F
where
    T: Send + 'static,
    F: Fn(Vec<T>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<T, WorkError>> + Send + 'static,
{
    async fn call(&self, inputs: Vec<T>) -> Result<T, WorkError> {
        (self)(inputs).await
    }
}
