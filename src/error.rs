//! Error types for grid construction, stepping and rendering

use crate::physics::math::Scalar;
use std::io;
use thiserror::Error;

/// Errors raised while setting up or running a simulation
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Grid or time parameters violate their construction constraints
    #[error("invalid grid: {0}")]
    InvalidGrid(String),

    /// The initial profile or sampled state cannot start a run
    #[error("invalid initial state: {0}")]
    InvalidInitialState(String),

    /// The state picked up a NaN or infinity, usually from an unstable dt/dx choice
    #[error("non-finite value {value} at index {index} after step {step}")]
    NonFiniteState {
        step: usize,
        index: usize,
        value: Scalar,
    },

    #[error("state has {actual} values but the grid has {expected} points")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("simulation already completed all {steps} steps")]
    Complete { steps: usize },

    #[error("{0}")]
    UnknownIntegrator(String),

    #[error("renderer failed: {0}")]
    Render(#[from] RenderError),
}

/// Errors raised by a [`Renderer`](crate::render::Renderer)
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("snapshot has {actual} values but the grid has {expected} points")]
    Mismatch { expected: usize, actual: usize },
}
