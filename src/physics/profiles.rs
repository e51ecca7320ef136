//! Initial conditions selectable from configuration

use super::grid::Grid;
use super::math::{Scalar, TAU, sech};
use super::state::State;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use serde::{Deserialize, Serialize};

/// Shape of `u(x, 0)`
///
/// Serialized with a `kind` tag, e.g.
///
/// ```toml
/// [initial]
/// kind = "gaussian"
/// width = 0.4
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InitialProfile {
    Cosine(CosineProfile),
    Gaussian(PulseProfile),
    Sech2(PulseProfile),
    RandomModes(RandomModesProfile),
}

impl Default for InitialProfile {
    fn default() -> Self {
        Self::Cosine(CosineProfile::default())
    }
}

/// `amplitude · cos(2π · mode · x / L + phase)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CosineProfile {
    pub mode: u32,
    pub amplitude: Scalar,
    pub phase: Scalar,
}

impl Default for CosineProfile {
    fn default() -> Self {
        Self {
            mode: 1,
            amplitude: 1.0,
            phase: 0.0,
        }
    }
}

/// Localized pulse; `center` defaults to the middle of the domain
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PulseProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center: Option<Scalar>,
    pub width: Scalar,
    pub amplitude: Scalar,
}

impl Default for PulseProfile {
    fn default() -> Self {
        Self {
            center: None,
            width: 0.5,
            amplitude: 1.0,
        }
    }
}

/// Sum of the first `modes` Fourier cosines with seeded random amplitudes and phases
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomModesProfile {
    pub modes: u32,
    pub amplitude: Scalar,
    pub seed: u64,
}

impl Default for RandomModesProfile {
    fn default() -> Self {
        Self {
            modes: 4,
            amplitude: 1.0,
            seed: 0,
        }
    }
}

impl InitialProfile {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Cosine(_) => "cosine",
            Self::Gaussian(_) => "gaussian",
            Self::Sech2(_) => "sech2",
            Self::RandomModes(_) => "random_modes",
        }
    }

    /// Checks the parameters, describing the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Self::Cosine(p) => finite("amplitude", p.amplitude).and(finite("phase", p.phase)),
            Self::Gaussian(p) | Self::Sech2(p) => {
                if !(p.width.is_finite() && p.width > 0.0) {
                    return Err(format!("pulse width must be positive, got {}", p.width));
                }
                if let Some(center) = p.center {
                    finite("center", center)?;
                }
                finite("amplitude", p.amplitude)
            }
            Self::RandomModes(p) => {
                if p.modes == 0 {
                    return Err("random_modes needs at least one mode".to_string());
                }
                finite("amplitude", p.amplitude)
            }
        }
    }

    /// Function of `x` to sample on `grid`
    pub fn evaluator(&self, grid: &Grid) -> Box<dyn Fn(Scalar) -> Scalar> {
        let length = grid.length();

        match *self {
            Self::Cosine(CosineProfile {
                mode,
                amplitude,
                phase,
            }) => {
                let q = TAU * mode as Scalar / length;
                Box::new(move |x| amplitude * libm::cos(q * x + phase))
            }
            Self::Gaussian(pulse) => {
                let center = pulse.center.unwrap_or(0.5 * length);
                Box::new(move |x| {
                    periodic_images(x - center, length, |s| {
                        pulse.amplitude * libm::exp(-(s * s) / (pulse.width * pulse.width))
                    })
                })
            }
            Self::Sech2(pulse) => {
                let center = pulse.center.unwrap_or(0.5 * length);
                Box::new(move |x| {
                    periodic_images(x - center, length, |s| {
                        let h = sech(s / pulse.width);
                        pulse.amplitude * h * h
                    })
                })
            }
            Self::RandomModes(RandomModesProfile {
                modes,
                amplitude,
                seed,
            }) => {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let terms: Vec<(Scalar, Scalar, Scalar)> = (1..=modes)
                    .map(|m| {
                        let weight = rng.random_range(-1.0..=1.0) * amplitude / modes as Scalar;
                        let phase = rng.random_range(0.0..TAU);
                        (TAU * m as Scalar / length, weight, phase)
                    })
                    .collect();
                Box::new(move |x| {
                    terms
                        .iter()
                        .map(|&(q, weight, phase)| weight * libm::cos(q * x + phase))
                        .sum()
                })
            }
        }
    }

    /// Samples the profile on `grid`
    pub fn sample(&self, grid: &Grid) -> State {
        State::from_fn(grid, self.evaluator(grid))
    }
}

fn finite(name: &str, value: Scalar) -> Result<(), String> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(format!("{name} must be finite, got {value}"))
    }
}

/// Sums a localized shape over the nearest periodic images of the offset.
fn periodic_images(offset: Scalar, length: Scalar, shape: impl Fn(Scalar) -> Scalar) -> Scalar {
    shape(offset - length) + shape(offset) + shape(offset + length)
}
