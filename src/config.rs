//! Solver configuration
//!
//! Every field has a default, so a TOML file only needs to list overrides:
//!
//! ```toml
//! viscosity_coefficient = 0.01
//!
//! [grid]
//! resolution = { x = 64, y = 32 }
//! grid_spacing = [0.015625, 0.015625]
//!
//! [linear_solver]
//! kind = "gauss_seidel"
//! ```

use std::path::Path;

use anyhow::Context;
use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::solver::{GRAVITY, MAX_CFL};
use crate::error::{invalid_config, FluidResult};
use crate::grid::GridGeometry2;
use crate::solver::fdm::LinearSolverConfig;
use crate::solver::grid::ClosedDomain;
use crate::solver::hybrid::DEFAULT_PARTICLE_RADIUS;

/// Settings for `PicSolver2`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PicSolverConfig {
    pub grid: GridGeometry2,
    pub gravity: DVec2,
    /// Kinematic viscosity; zero skips the diffusion step
    pub viscosity_coefficient: f64,
    /// Frames are split so that no sub-step exceeds this CFL number
    pub max_cfl: f64,
    pub closed_domain: ClosedDomain,
    /// Collision radius of each particle
    pub particle_radius: f64,
    /// Fraction of normal velocity kept when a particle bounces off a collider
    pub restitution_coefficient: f64,
    pub linear_solver: LinearSolverConfig,
    /// Index of the first frame `update` will simulate
    pub start_frame: i64,
}

impl Default for PicSolverConfig {
    fn default() -> Self {
        Self {
            grid: GridGeometry2::default(),
            gravity: DVec2::from_array(GRAVITY),
            viscosity_coefficient: 0.0,
            max_cfl: MAX_CFL,
            closed_domain: ClosedDomain::default(),
            particle_radius: DEFAULT_PARTICLE_RADIUS,
            restitution_coefficient: 0.0,
            linear_solver: LinearSolverConfig::default(),
            start_frame: 0,
        }
    }
}

impl PicSolverConfig {
    /// Reject values the solver cannot run with
    pub fn validate(&self) -> FluidResult<()> {
        self.grid.validate()?;
        self.linear_solver.validate()?;

        if !self.gravity.is_finite() {
            return Err(invalid_config("gravity", "must be finite"));
        }
        if !(self.viscosity_coefficient >= 0.0) {
            return Err(invalid_config(
                "viscosity_coefficient",
                format!("must be non-negative, got {}", self.viscosity_coefficient),
            ));
        }
        if !(self.max_cfl > 0.0) {
            return Err(invalid_config(
                "max_cfl",
                format!("must be positive, got {}", self.max_cfl),
            ));
        }
        if !(self.particle_radius >= 0.0) {
            return Err(invalid_config(
                "particle_radius",
                format!("must be non-negative, got {}", self.particle_radius),
            ));
        }
        if !(0.0..=1.0).contains(&self.restitution_coefficient) {
            return Err(invalid_config(
                "restitution_coefficient",
                format!("must lie in [0, 1], got {}", self.restitution_coefficient),
            ));
        }
        Ok(())
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(raw: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(raw).context("Failed to parse solver config")?;
        config.validate().context("Invalid solver config")?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        toml::to_string(self).context("Failed to serialize solver config")
    }
}

/// Load a `PicSolverConfig` from a TOML file
pub fn load_config(path: impl AsRef<Path>) -> anyhow::Result<PicSolverConfig> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config = PicSolverConfig::from_toml_str(&raw)
        .with_context(|| format!("Failed to load config file {}", path.display()))?;

    log::info!("[config] loaded solver config from {}", path.display());
    Ok(config)
}
