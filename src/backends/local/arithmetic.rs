// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! In-process numeric works over `f64` payloads.

use async_trait::async_trait;
use thiserror::Error;

use crate::errors::WorkError;
use crate::traits::Work;

/// Failures raised by the arithmetic works
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArithmeticError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("'{work}' expects {expected} input(s), got {actual}")]
    Arity {
        work: &'static str,
        expected: &'static str,
        actual: usize,
    },
}

fn exactly_one(work: &'static str, inputs: &[f64]) -> Result<f64, ArithmeticError> {
    match inputs {
        [value] => Ok(*value),
        _ => Err(ArithmeticError::Arity {
            work,
            expected: "exactly 1",
            actual: inputs.len(),
        }),
    }
}

fn split_first<'a>(
    work: &'static str,
    inputs: &'a [f64],
) -> Result<(f64, &'a [f64]), ArithmeticError> {
    match inputs {
        [first, rest @ ..] => Ok((*first, rest)),
        [] => Err(ArithmeticError::Arity {
            work,
            expected: "at least 1",
            actual: 0,
        }),
    }
}

/// Sum of all inputs
pub struct Add;

#[async_trait]
impl Work<f64> for Add {
    async fn call(&self, inputs: Vec<f64>) -> Result<f64, WorkError> {
        Ok(inputs.iter().sum())
    }
}

/// First input minus every following input
pub struct Subtract;

#[async_trait]
impl Work<f64> for Subtract {
    async fn call(&self, inputs: Vec<f64>) -> Result<f64, WorkError> {
        let (first, rest) = split_first("subtract", &inputs)?;
        Ok(rest.iter().fold(first, |acc, value| acc - value))
    }
}

/// Product of all inputs
pub struct Multiply;

#[async_trait]
impl Work<f64> for Multiply {
    async fn call(&self, inputs: Vec<f64>) -> Result<f64, WorkError> {
        Ok(inputs.iter().product())
    }
}

/// First input divided by every following input
pub struct Divide;

#[async_trait]
impl Work<f64> for Divide {
    async fn call(&self, inputs: Vec<f64>) -> Result<f64, WorkError> {
        let (first, rest) = split_first("divide", &inputs)?;
        let mut quotient = first;
        for divisor in rest {
            if *divisor == 0.0 {
                return Err(ArithmeticError::DivisionByZero.into());
            }
            quotient /= divisor;
        }
        Ok(quotient)
    }
}

pub struct Negate;

#[async_trait]
impl Work<f64> for Negate {
    async fn call(&self, inputs: Vec<f64>) -> Result<f64, WorkError> {
        Ok(-exactly_one("negate", &inputs)?)
    }
}

/// Passes its single input through unchanged
pub struct Identity;

#[async_trait]
impl Work<f64> for Identity {
    async fn call(&self, inputs: Vec<f64>) -> Result<f64, WorkError> {
        Ok(exactly_one("identity", &inputs)?)
    }
}

/// Multiplies its single input by a configured factor
pub struct Scale {
    factor: f64,
}

impl Scale {
    pub fn new(factor: f64) -> Self {
        Self { factor }
    }
}

#[async_trait]
impl Work<f64> for Scale {
    async fn call(&self, inputs: Vec<f64>) -> Result<f64, WorkError> {
        Ok(exactly_one("scale", &inputs)? * self.factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn add_and_multiply_fold_all_inputs() {
        assert_eq!(Add.call(vec![2.0, 3.0]).await.unwrap(), 5.0);
        assert_eq!(Add.call(vec![]).await.unwrap(), 0.0);
        assert_eq!(Multiply.call(vec![5.0, 4.0]).await.unwrap(), 20.0);
    }

    #[tokio::test]
    async fn subtract_is_positional() {
        assert_eq!(Subtract.call(vec![10.0, 3.0, 2.0]).await.unwrap(), 5.0);
        assert!(Subtract.call(vec![]).await.is_err());
    }

    #[tokio::test]
    async fn divide_by_zero_fails() {
        assert_eq!(Divide.call(vec![9.0, 3.0]).await.unwrap(), 3.0);

        let error = Divide.call(vec![1.0, 0.0]).await.unwrap_err();
        assert_eq!(
            error.downcast_ref::<ArithmeticError>(),
            Some(&ArithmeticError::DivisionByZero)
        );
    }

    #[tokio::test]
    async fn unary_works_check_arity() {
        assert_eq!(Negate.call(vec![4.0]).await.unwrap(), -4.0);
        assert_eq!(Identity.call(vec![4.0]).await.unwrap(), 4.0);
        assert_eq!(Scale::new(0.5).call(vec![4.0]).await.unwrap(), 2.0);

        let error = Negate.call(vec![1.0, 2.0]).await.unwrap_err();
        assert_eq!(error.to_string(), "'negate' expects exactly 1 input(s), got 2");
    }
}
