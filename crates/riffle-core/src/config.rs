//! Simulation configuration and validation.
//!
//! [`FluidConfig`] is the construction input for a simulator. Validation
//! happens once, at setup time; the numerical pipeline itself has no
//! error paths (backtrace positions are clamped by policy, and NaN
//! blow-up from an oversized `dt` is the caller's responsibility).

use std::error::Error;
use std::fmt;

/// Errors detected during [`FluidConfig::validate()`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// A grid dimension is below 3, leaving no interior cell.
    GridTooSmall {
        /// Which axis failed ("width" or "height").
        axis: &'static str,
        /// The configured value.
        value: u32,
    },
    /// A physical coefficient is NaN, infinite, or negative.
    InvalidCoefficient {
        /// Which coefficient failed ("diffusion" or "viscosity").
        name: &'static str,
        /// The offending value.
        value: f32,
    },
    /// The relaxation iteration count is zero.
    ZeroIterations,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GridTooSmall { axis, value } => {
                write!(f, "grid {axis} must be at least 3, got {value}")
            }
            Self::InvalidCoefficient { name, value } => {
                write!(f, "{name} must be finite and >= 0, got {value}")
            }
            Self::ZeroIterations => write!(f, "relaxation iteration count must be at least 1"),
        }
    }
}

impl Error for ConfigError {}

/// Complete configuration for constructing a simulator.
///
/// `width` and `height` include the one-cell boundary margin on each
/// side, so the interior spans `[1, width - 2] x [1, height - 2]`. The
/// domain is assumed to be a unit square regardless of aspect ratio:
/// the cell spacing is `1 / (width - 2)` everywhere. Non-square grids
/// are accepted but inherit that assumption.
#[derive(Clone, Debug)]
pub struct FluidConfig {
    /// Grid width in cells, boundary margin included. Minimum 3.
    pub width: u32,
    /// Grid height in cells, boundary margin included. Minimum 3.
    pub height: u32,
    /// Density diffusion coefficient. Must be finite and >= 0.
    pub diffusion: f32,
    /// Kinematic viscosity coefficient. Must be finite and >= 0.
    pub viscosity: f32,
    /// Relaxation sweeps per implicit solve.
    ///
    /// A fixed count, not a convergence criterion: per-tick cost is
    /// predictable and accuracy scales with the count. The serial
    /// backend (Gauss-Seidel) converges faster per sweep than the
    /// parallel backend (Jacobi); callers may configure the two
    /// differently.
    pub iterations: u32,
    /// RNG seed for the initial velocity perturbation.
    pub seed: u64,
}

impl FluidConfig {
    /// Default relaxation sweep count.
    pub const DEFAULT_ITERATIONS: u32 = 20;

    /// Create a configuration with the original reference coefficients
    /// (diffusion and viscosity 1e-4, 20 sweeps, seed 0).
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            diffusion: 1e-4,
            viscosity: 1e-4,
            iterations: Self::DEFAULT_ITERATIONS,
            seed: 0,
        }
    }

    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < 3 {
            return Err(ConfigError::GridTooSmall {
                axis: "width",
                value: self.width,
            });
        }
        if self.height < 3 {
            return Err(ConfigError::GridTooSmall {
                axis: "height",
                value: self.height,
            });
        }
        if !self.diffusion.is_finite() || self.diffusion < 0.0 {
            return Err(ConfigError::InvalidCoefficient {
                name: "diffusion",
                value: self.diffusion,
            });
        }
        if !self.viscosity.is_finite() || self.viscosity < 0.0 {
            return Err(ConfigError::InvalidCoefficient {
                name: "viscosity",
                value: self.viscosity,
            });
        }
        if self.iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        Ok(())
    }

    /// Interior width `N = width - 2`, the resolution the unit-square
    /// scaling is derived from.
    pub fn interior_width(&self) -> u32 {
        self.width - 2
    }

    /// Cell spacing `h = 1 / N` under the unit-square assumption.
    pub fn cell_spacing(&self) -> f32 {
        1.0 / self.interior_width() as f32
    }
}
