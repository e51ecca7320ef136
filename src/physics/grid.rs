//! Uniform periodic grid and time parameters

use super::math::{Scalar, wrap_index};
use crate::error::SimulationError;

/// Uniform sampling of the periodic interval `[0, L)`
///
/// Point `N` is identified with point `0`. The grid is immutable once built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    length: Scalar,
    points: usize,
    dx: Scalar,
}

impl Grid {
    /// Smallest point count the five-point stencil accepts without a
    /// neighbor aliasing onto the centre point.
    pub const MIN_POINTS: usize = 5;

    /// Builds a grid of `points` samples over a domain of length `length`.
    ///
    /// # Errors
    ///
    /// [`SimulationError::InvalidGrid`] when `length` is not a positive finite
    /// number or `points < Grid::MIN_POINTS`.
    pub fn new(length: Scalar, points: usize) -> Result<Self, SimulationError> {
        if !length.is_finite() || length <= 0.0 {
            return Err(SimulationError::InvalidGrid(format!(
                "domain length must be positive and finite, got {length}"
            )));
        }

        if points < Self::MIN_POINTS {
            return Err(SimulationError::InvalidGrid(format!(
                "need at least {} points for the third-derivative stencil, got {points}",
                Self::MIN_POINTS
            )));
        }

        let dx = length / points as Scalar;
        if dx <= 0.0 {
            return Err(SimulationError::InvalidGrid(format!(
                "grid spacing underflowed for length {length} and {points} points"
            )));
        }

        Ok(Self { length, points, dx })
    }

    pub fn length(&self) -> Scalar {
        self.length
    }

    pub fn len(&self) -> usize {
        self.points
    }

    /// Always false; a valid grid has at least [`Grid::MIN_POINTS`] points.
    pub fn is_empty(&self) -> bool {
        self.points == 0
    }

    pub fn dx(&self) -> Scalar {
        self.dx
    }

    /// Coordinate `x_i = i * dx`
    pub fn coordinate(&self, index: usize) -> Scalar {
        index as Scalar * self.dx
    }

    pub fn coordinates(&self) -> impl ExactSizeIterator<Item = Scalar> + '_ {
        (0..self.points).map(|i| self.coordinate(i))
    }

    /// Periodic index lookup
    #[inline]
    pub fn wrap(&self, index: isize) -> usize {
        wrap_index(index, self.points)
    }
}

/// Fixed time-stepping parameters of a run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeParams {
    total_time: Scalar,
    dt: Scalar,
    steps: usize,
}

impl TimeParams {
    /// Runs `floor(total_time / dt)` steps of size `dt`.
    ///
    /// # Errors
    ///
    /// [`SimulationError::InvalidGrid`] when `dt` is not positive and finite
    /// or `total_time` is negative or non-finite.
    pub fn new(total_time: Scalar, dt: Scalar) -> Result<Self, SimulationError> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(SimulationError::InvalidGrid(format!(
                "time step must be positive and finite, got {dt}"
            )));
        }

        if !total_time.is_finite() || total_time < 0.0 {
            return Err(SimulationError::InvalidGrid(format!(
                "total time must be non-negative and finite, got {total_time}"
            )));
        }

        let steps = (total_time / dt).floor();
        if steps > usize::MAX as Scalar {
            return Err(SimulationError::InvalidGrid(format!(
                "total time {total_time} with step {dt} needs more steps than can be counted"
            )));
        }

        Ok(Self {
            total_time,
            dt,
            steps: steps as usize,
        })
    }

    pub fn total_time(&self) -> Scalar {
        self.total_time
    }

    pub fn dt(&self) -> Scalar {
        self.dt
    }

    /// Number of steps the run takes, `Nt`
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// `dt / dx³`, the dimensionless step size of a third-order operator
    pub fn courant_number(&self, dx: Scalar) -> Scalar {
        self.dt / (dx * dx * dx)
    }
}
