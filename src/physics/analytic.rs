//! Exact solutions of the linear KdV equation used as references

use super::grid::Grid;
use super::math::{Scalar, TAU};
use super::profiles::{CosineProfile, InitialProfile};
use crate::render::Snapshot;

/// Travelling cosine `A · cos(q x + q³ t + φ)`, `q = 2π m / L`
///
/// Each Fourier mode of `∂t u + ∂³x u = 0` obeys the dispersion relation
/// `ω(q) = -q³`, so cosine initial data moves left with phase speed `q²`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CosineWave {
    pub length: Scalar,
    pub mode: u32,
    pub amplitude: Scalar,
    pub phase: Scalar,
}

impl CosineWave {
    pub fn new(length: Scalar, profile: CosineProfile) -> Self {
        Self {
            length,
            mode: profile.mode,
            amplitude: profile.amplitude,
            phase: profile.phase,
        }
    }

    /// The exact solution for `profile`, if it has one in closed form
    pub fn from_profile(length: Scalar, profile: &InitialProfile) -> Option<Self> {
        match profile {
            InitialProfile::Cosine(cosine) => Some(Self::new(length, *cosine)),
            _ => None,
        }
    }

    pub fn wavenumber(&self) -> Scalar {
        TAU * self.mode as Scalar / self.length
    }

    /// Phase advance per unit time, `q³`
    pub fn frequency(&self) -> Scalar {
        self.wavenumber().powi(3)
    }

    pub fn value(&self, x: Scalar, t: Scalar) -> Scalar {
        let q = self.wavenumber();
        self.amplitude * libm::cos(q * x + self.frequency() * t + self.phase)
    }

    pub fn sample(&self, grid: &Grid, t: Scalar) -> Vec<Scalar> {
        grid.coordinates().map(|x| self.value(x, t)).collect()
    }

    /// Largest pointwise deviation of `snapshot` from the exact solution at its time
    pub fn max_error(&self, grid: &Grid, snapshot: &Snapshot) -> Scalar {
        grid.coordinates()
            .zip(snapshot.values())
            .map(|(x, u)| (u - self.value(x, snapshot.time())).abs())
            .fold(0.0, Scalar::max)
    }
}
