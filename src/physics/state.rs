//! The sampled field u(x) on a grid

use super::grid::Grid;
use super::math::Scalar;
use crate::error::SimulationError;

/// Field values indexed like the grid points they were sampled at
///
/// Only the stepping loop mutates a `State`; everything else reads it through
/// [`State::values`] or takes a copy.
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    values: Vec<Scalar>,
}

impl State {
    /// Evaluates `f` at every grid coordinate.
    pub fn from_fn<F>(grid: &Grid, mut f: F) -> Self
    where
        F: FnMut(Scalar) -> Scalar,
    {
        Self {
            values: grid.coordinates().map(&mut f).collect(),
        }
    }

    /// Evaluates a fallible `f` at every grid coordinate, stopping at the
    /// first error and returning it unchanged.
    pub fn try_from_fn<F, E>(grid: &Grid, mut f: F) -> Result<Self, E>
    where
        F: FnMut(Scalar) -> Result<Scalar, E>,
    {
        let values = grid
            .coordinates()
            .map(&mut f)
            .collect::<Result<Vec<_>, E>>()?;
        Ok(Self { values })
    }

    /// Wraps prepared values, checking they match the grid.
    pub fn from_values(grid: &Grid, values: Vec<Scalar>) -> Result<Self, SimulationError> {
        if values.len() != grid.len() {
            return Err(SimulationError::LengthMismatch {
                expected: grid.len(),
                actual: values.len(),
            });
        }
        Ok(Self { values })
    }

    pub fn values(&self) -> &[Scalar] {
        &self.values
    }

    pub(crate) fn values_mut(&mut self) -> &mut [Scalar] {
        &mut self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// First NaN or infinite entry as `(index, value)`
    pub fn first_non_finite(&self) -> Option<(usize, Scalar)> {
        self.values
            .iter()
            .copied()
            .enumerate()
            .find(|(_, value)| !value.is_finite())
    }

    pub fn into_values(self) -> Vec<Scalar> {
        self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fn_samples_coordinates() {
        let grid = Grid::new(5.0, 5).unwrap();
        let state = State::from_fn(&grid, |x| 2.0 * x + 1.0);
        assert_eq!(state.values(), &[1.0, 3.0, 5.0, 7.0, 9.0]);
    }

    #[test]
    fn test_try_from_fn_propagates_first_error() {
        let grid = Grid::new(5.0, 5).unwrap();
        let mut calls = 0;
        let result: Result<State, String> = State::try_from_fn(&grid, |x| {
            calls += 1;
            if x >= 2.0 {
                Err(format!("bad sample at {x}"))
            } else {
                Ok(x)
            }
        });
        assert_eq!(result.unwrap_err(), "bad sample at 2");
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_from_values_checks_length() {
        let grid = Grid::new(1.0, 6).unwrap();
        assert!(State::from_values(&grid, vec![0.0; 6]).is_ok());
        assert!(matches!(
            State::from_values(&grid, vec![0.0; 5]),
            Err(SimulationError::LengthMismatch {
                expected: 6,
                actual: 5
            })
        ));
    }

    #[test]
    fn test_first_non_finite() {
        let grid = Grid::new(1.0, 5).unwrap();
        let state = State::from_values(&grid, vec![0.0, 1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(state.first_non_finite(), None);

        let state =
            State::from_values(&grid, vec![0.0, 1.0, Scalar::INFINITY, Scalar::NAN, 4.0]).unwrap();
        assert_eq!(state.first_non_finite(), Some((2, Scalar::INFINITY)));
    }
}
