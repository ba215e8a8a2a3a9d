use std::sync::Arc;

use glam::DVec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::particle_data::ParticleSystemData2;
use crate::error::{invalid_config, FluidResult};
use crate::geometry::{BoundingBox2, ImplicitSurface2};
use crate::spatial_index::PointHashGrid2;

/// Volume emitter settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumeEmitterConfig {
    /// Lattice spacing between emitted particles
    pub spacing: f64,
    /// Extra clipping region (lower corner); particles are only emitted inside
    pub region_lower: DVec2,
    /// Extra clipping region (upper corner)
    pub region_upper: DVec2,
    pub initial_velocity: DVec2,
    /// Random offset as a fraction of half the spacing, in [0, 1]
    pub jitter: f64,
    /// Emit once, then disable
    pub is_one_shot: bool,
    /// Skip candidates within `spacing` of a particle that existed before this
    /// emission, unless set
    pub allow_overlapping: bool,
    pub max_number_of_particles: usize,
    pub seed: u64,
}

impl Default for VolumeEmitterConfig {
    fn default() -> Self {
        Self {
            spacing: 0.1,
            region_lower: DVec2::splat(-f64::MAX),
            region_upper: DVec2::splat(f64::MAX),
            initial_velocity: DVec2::ZERO,
            jitter: 0.0,
            is_one_shot: true,
            allow_overlapping: false,
            max_number_of_particles: usize::MAX,
            seed: 0,
        }
    }
}

impl VolumeEmitterConfig {
    pub fn validate(&self) -> FluidResult<()> {
        if !(self.spacing > 0.0) {
            return Err(invalid_config("emitter.spacing", "must be positive"));
        }
        if !(0.0..=1.0).contains(&self.jitter) {
            return Err(invalid_config("emitter.jitter", "must lie in [0, 1]"));
        }
        Ok(())
    }

    pub fn region(&self) -> BoundingBox2 {
        BoundingBox2::new(self.region_lower, self.region_upper)
    }
}

/// Fills the inside of an implicit surface with particles on a regular lattice
#[derive(Debug, Clone)]
pub struct VolumeParticleEmitter2 {
    surface: Arc<dyn ImplicitSurface2>,
    config: VolumeEmitterConfig,
    is_enabled: bool,
    number_of_emitted_particles: usize,
    rng: StdRng,
}

impl VolumeParticleEmitter2 {
    pub fn new(
        surface: Arc<dyn ImplicitSurface2>,
        config: VolumeEmitterConfig,
    ) -> FluidResult<Self> {
        config.validate()?;
        Ok(Self {
            surface,
            rng: StdRng::seed_from_u64(config.seed),
            config,
            is_enabled: true,
            number_of_emitted_particles: 0,
        })
    }

    pub fn config(&self) -> &VolumeEmitterConfig {
        &self.config
    }

    pub fn surface(&self) -> &Arc<dyn ImplicitSurface2> {
        &self.surface
    }

    pub fn is_enabled(&self) -> bool {
        self.is_enabled
    }

    pub fn set_is_enabled(&mut self, enabled: bool) {
        self.is_enabled = enabled;
    }

    pub fn number_of_emitted_particles(&self) -> usize {
        self.number_of_emitted_particles
    }

    /// Emit into `particles`; returns how many particles were added
    pub fn update(&mut self, particles: &mut ParticleSystemData2) -> usize {
        if !self.is_enabled {
            return 0;
        }

        let emitted = self.emit(particles);
        self.number_of_emitted_particles += emitted;

        if self.config.is_one_shot {
            self.is_enabled = false;
        }

        log::debug!(
            "[emitter] emitted {} particles ({} total)",
            emitted,
            self.number_of_emitted_particles
        );
        emitted
    }

    fn emission_region(&self) -> BoundingBox2 {
        let region = self.config.region();
        if !self.surface.is_bounded() {
            return region;
        }
        // Empty when the two boxes do not overlap
        let bounds = self.surface.bounding_box();
        BoundingBox2 {
            lower: region.lower.max(bounds.lower),
            upper: region.upper.min(bounds.upper),
        }
    }

    fn emit(&mut self, particles: &mut ParticleSystemData2) -> usize {
        let region = self.emission_region();
        if region.is_empty() || !region.width().is_finite() || !region.height().is_finite() {
            if !region.is_empty() {
                log::warn!("[emitter] unbounded emission region; set region_lower/region_upper");
            }
            return 0;
        }

        let spacing = self.config.spacing;
        let max_jitter = 0.5 * self.config.jitter * spacing;
        let budget = self
            .config
            .max_number_of_particles
            .saturating_sub(self.number_of_emitted_particles);

        let mut neighbors = PointHashGrid2::new(2.0 * spacing);
        if !self.config.allow_overlapping {
            neighbors.build(particles.positions());
        }

        let columns = (region.width() / spacing).floor() as usize + 1;
        let rows = (region.height() / spacing).floor() as usize + 1;

        let mut new_positions = Vec::new();
        'lattice: for j in 0..rows {
            for i in 0..columns {
                if new_positions.len() >= budget {
                    break 'lattice;
                }

                let mut candidate = region.lower + spacing * DVec2::new(i as f64, j as f64);
                if max_jitter > 0.0 {
                    let angle = self.rng.gen_range(0.0..std::f64::consts::TAU);
                    let radius = max_jitter * self.rng.gen::<f64>().sqrt();
                    candidate += radius * DVec2::from_angle(angle);
                }

                if self.surface.signed_distance(candidate) > 0.0 {
                    continue;
                }

                if !self.config.allow_overlapping
                    && neighbors.has_nearby_point(candidate, spacing)
                {
                    continue;
                }

                new_positions.push(candidate);
            }
        }

        let velocities = vec![self.config.initial_velocity; new_positions.len()];
        particles.add_particles(&new_positions, &velocities, &[]);
        new_positions.len()
    }
}
