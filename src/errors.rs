//! Provides the error types used throughout this crate.

use thiserror::Error;

/// Failure reported by a [crate::WholeBodyModel] implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct DynamicsError(pub String);

impl DynamicsError {
    pub fn new(message: impl Into<String>) -> Self {
        DynamicsError(message.into())
    }
}

/// The error type returned by the component lifecycle hooks
#[derive(Error, Debug)]
pub enum ComponentError {
    // Argument errors
    #[error("Wrong number of arguments: expected {expected}, got {actual}")]
    WrongArgumentCount { expected: usize, actual: usize },
    #[error("Malformed argument `{argument}`: expected {expected:?} (rows, cols), got {actual:?}")]
    InvalidArgumentShape {
        argument: &'static str,
        expected: (usize, usize),
        actual: (usize, usize),
    },
    #[error("Output has dimensions {actual:?} (rows, cols) but {expected:?} are required")]
    OutputShape {
        expected: (usize, usize),
        actual: (usize, usize),
    },
    #[error("No output space allocated")]
    OutputNotAllocated,
    // State errors
    #[error("No whole-body model bound")]
    UnboundModel,
    #[error("Component sized for {expected} degrees of freedom but model has {actual}")]
    ModelMismatch { expected: usize, actual: usize },
    #[error("Robot state has not been set")]
    StateNotSet,
    // Errors raised by collaborators
    #[error("Whole-body model failed: {0}")]
    Computation(#[from] DynamicsError),
    #[error("Error raised by `ndarray`: {0}")]
    Shape(#[from] ndarray::ShapeError),
}
