//! Particle-in-Cell fluid solver
//!
//! Particles carry the fluid and its velocity; the face-centered grid is
//! rebuilt from them every sub-step and used for gravity, particle forces,
//! viscosity and pressure. Velocities go back to particles without blending (pure PIC).

use glam::DVec2;
use rayon::prelude::*;

use super::collider::Collider2;
use super::emitter::VolumeParticleEmitter2;
use super::particle_data::ParticleSystemData2;
use crate::animation::Frame;
use crate::array::Array2;
use crate::config::PicSolverConfig;
use crate::constants::parallel::PARALLEL_THRESHOLD;
use crate::constants::solver::{EXTRAPOLATION_DEPTH, FRAME_TIME_INTERVAL};
use crate::error::FluidResult;
use crate::grid::{
    extrapolate_to_region, FaceCenteredGrid2, GridGeometry2, ScalarGrid2, ScalarGridLayout,
};
use crate::solver::grid::{
    ClosedDomain, GridBlockedBoundaryConditionSolver2, GridForwardEulerDiffusionSolver2,
    GridSinglePhasePressureSolver2,
};
use crate::spatial_index::PointHashGrid2;

/// 2-D PIC solver advancing particles frame by frame
#[derive(Debug)]
pub struct PicSolver2 {
    config: PicSolverConfig,
    /// Next frame to simulate
    current_frame: Frame,

    particles: ParticleSystemData2,
    velocity: FaceCenteredGrid2,
    /// Scratch target for solvers that cannot work in place
    velocity_scratch: FaceCenteredGrid2,
    fluid_sdf: ScalarGrid2,
    /// Faces that received particle velocity in the last transfer
    u_markers: Array2<bool>,
    v_markers: Array2<bool>,
    /// Particle `force / mass` splatted onto the faces
    u_accelerations: Array2<f64>,
    v_accelerations: Array2<f64>,

    emitter: Option<VolumeParticleEmitter2>,
    diffusion_solver: GridForwardEulerDiffusionSolver2,
    pressure_solver: GridSinglePhasePressureSolver2,
    boundary_condition_solver: GridBlockedBoundaryConditionSolver2,
    neighbors: PointHashGrid2,
}

impl PicSolver2 {
    pub fn new(config: PicSolverConfig) -> FluidResult<Self> {
        config.validate()?;

        let geometry = config.grid;
        let velocity = FaceCenteredGrid2::with_geometry(geometry, DVec2::ZERO);
        let mut particles = ParticleSystemData2::default();
        particles.set_radius(config.particle_radius);

        let mut boundary_condition_solver =
            GridBlockedBoundaryConditionSolver2::new(config.closed_domain);
        boundary_condition_solver.update_collider(None, &geometry);

        let mut solver = Self {
            current_frame: Frame::new(config.start_frame, FRAME_TIME_INTERVAL),
            particles,
            velocity_scratch: velocity.clone(),
            u_markers: Array2::with_value(velocity.u_size(), false),
            v_markers: Array2::with_value(velocity.v_size(), false),
            u_accelerations: Array2::with_value(velocity.u_size(), 0.0),
            v_accelerations: Array2::with_value(velocity.v_size(), 0.0),
            velocity,
            fluid_sdf: ScalarGrid2::with_geometry(ScalarGridLayout::CellCentered, geometry, 0.0),
            emitter: None,
            diffusion_solver: GridForwardEulerDiffusionSolver2::new(),
            pressure_solver: GridSinglePhasePressureSolver2::new(config.linear_solver.build()),
            boundary_condition_solver,
            neighbors: PointHashGrid2::new(2.0 * Self::sdf_radius(&geometry)),
            config,
        };
        // Far-field value: what the SDF holds while no particle is nearby
        solver.fluid_sdf.fill(Self::sdf_band(&geometry) - Self::sdf_radius(&geometry));

        log::debug!(
            "[pic_solver] created {}x{} grid, spacing {:?}",
            geometry.resolution.x,
            geometry.resolution.y,
            geometry.grid_spacing
        );
        Ok(solver)
    }

    /// Radius of the blob each particle contributes to the fluid SDF
    fn sdf_radius(geometry: &GridGeometry2) -> f64 {
        1.2 * geometry.grid_spacing.max_element() / std::f64::consts::SQRT_2
    }

    /// Distance beyond which particles are ignored when building the SDF
    fn sdf_band(geometry: &GridGeometry2) -> f64 {
        2.0 * Self::sdf_radius(geometry)
    }

    pub fn config(&self) -> &PicSolverConfig {
        &self.config
    }

    /// The next frame `update` will simulate
    pub fn current_frame(&self) -> Frame {
        self.current_frame
    }

    pub fn particles(&self) -> &ParticleSystemData2 {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut ParticleSystemData2 {
        &mut self.particles
    }

    pub fn velocity(&self) -> &FaceCenteredGrid2 {
        &self.velocity
    }

    pub fn fluid_sdf(&self) -> &ScalarGrid2 {
        &self.fluid_sdf
    }

    pub fn grid_geometry(&self) -> &GridGeometry2 {
        self.velocity.geometry()
    }

    pub fn emitter(&self) -> Option<&VolumeParticleEmitter2> {
        self.emitter.as_ref()
    }

    pub fn set_emitter(&mut self, emitter: Option<VolumeParticleEmitter2>) {
        self.emitter = emitter;
    }

    pub fn collider(&self) -> Option<&Collider2> {
        self.boundary_condition_solver.collider()
    }

    /// Replace the collider and re-voxelize it onto the grid
    pub fn set_collider(&mut self, collider: Option<Collider2>) {
        let geometry = *self.velocity.geometry();
        self.boundary_condition_solver
            .update_collider(collider.as_ref(), &geometry);
    }

    pub fn closed_domain(&self) -> ClosedDomain {
        self.boundary_condition_solver.closed_domain()
    }

    pub fn pressure_solver(&self) -> &GridSinglePhasePressureSolver2 {
        &self.pressure_solver
    }

    /// Simulate every frame from the current one up to and including
    /// `frame.index`, each `frame.time_interval_in_seconds` long.
    ///
    /// Frames already simulated are skipped. Errors from the grid solvers stop
    /// the update; state advanced before the error is kept.
    pub fn update(&mut self, frame: &Frame) -> FluidResult<()> {
        if frame.index < self.current_frame.index {
            log::debug!(
                "[pic_solver] frame {} already simulated (next is {}); nothing to do",
                frame.index,
                self.current_frame.index
            );
            return Ok(());
        }

        let number_of_frames = i128::from(frame.index) - i128::from(self.current_frame.index) + 1;
        for _ in 0..number_of_frames {
            self.advance_frame(frame.time_interval_in_seconds)?;
        }
        self.current_frame.time_interval_in_seconds = frame.time_interval_in_seconds;
        Ok(())
    }

    /// Simulate exactly one frame of `time_interval` seconds
    pub fn advance_frame(&mut self, time_interval: f64) -> FluidResult<()> {
        let sub_steps = self.number_of_sub_time_steps(time_interval);
        let sub_interval = time_interval / sub_steps as f64;

        log::trace!(
            "[pic_solver] frame {}: {} sub-steps of {:.3e}s",
            self.current_frame.index,
            sub_steps,
            sub_interval
        );

        for _ in 0..sub_steps {
            self.advance_sub_step(sub_interval)?;
        }

        self.current_frame.advance();
        Ok(())
    }

    /// `ceil(max_speed * dt / min_spacing / max_cfl)`, at least 1
    pub fn number_of_sub_time_steps(&self, time_interval: f64) -> u32 {
        let acceleration = self.config.gravity.length() + self.particles.max_acceleration();
        let gravity_speed = acceleration * time_interval;
        let max_speed = self
            .particles
            .max_speed()
            .max(self.velocity.max_abs_component())
            + gravity_speed;

        let min_spacing = self.velocity.geometry().min_spacing();
        let cfl = max_speed * time_interval / min_spacing;
        let steps = (cfl / self.config.max_cfl).ceil();
        if steps.is_finite() && steps >= 1.0 {
            steps as u32
        } else {
            1
        }
    }

    fn advance_sub_step(&mut self, time_interval: f64) -> FluidResult<()> {
        self.emit_particles();
        self.transfer_particles_to_grid();
        self.build_fluid_sdf();
        self.extrapolate_velocity_to_air();
        self.apply_boundary_condition();

        self.apply_forces(time_interval);
        self.apply_boundary_condition();
        self.apply_viscosity(time_interval)?;
        self.apply_pressure();

        self.extrapolate_velocity_to_air();
        self.apply_boundary_condition();
        self.transfer_grid_to_particles();
        self.move_particles(time_interval);
        Ok(())
    }

    fn emit_particles(&mut self) {
        if let Some(emitter) = &mut self.emitter {
            emitter.update(&mut self.particles);
        }
    }

    fn transfer_particles_to_grid(&mut self) {
        let u_sampler = self.velocity.u_sampler();
        let v_sampler = self.velocity.v_sampler();

        let u_size = self.velocity.u_size();
        let v_size = self.velocity.v_size();
        let mut u_weights = Array2::with_value(u_size, 0.0);
        let mut v_weights = Array2::with_value(v_size, 0.0);
        self.u_accelerations.resize(u_size, 0.0);
        self.v_accelerations.resize(v_size, 0.0);

        let mass = self.particles.mass();
        let inverse_mass = if mass > 0.0 { 1.0 / mass } else { 0.0 };

        self.velocity.fill(DVec2::ZERO);
        let (u, v) = self.velocity.uv_mut();

        let particles = self
            .particles
            .positions()
            .iter()
            .zip(self.particles.velocities())
            .zip(self.particles.forces());
        for ((position, velocity), force) in particles {
            let acceleration = *force * inverse_mass;
            for ((i, j), weight) in u_sampler.coordinates_and_weights(*position) {
                u[(i, j)] += velocity.x * weight;
                self.u_accelerations[(i, j)] += acceleration.x * weight;
                u_weights[(i, j)] += weight;
            }
            for ((i, j), weight) in v_sampler.coordinates_and_weights(*position) {
                v[(i, j)] += velocity.y * weight;
                self.v_accelerations[(i, j)] += acceleration.y * weight;
                v_weights[(i, j)] += weight;
            }
        }

        normalize_by_weight(u, &u_weights);
        normalize_by_weight(v, &v_weights);
        normalize_by_weight(&mut self.u_accelerations, &u_weights);
        normalize_by_weight(&mut self.v_accelerations, &v_weights);
        self.u_markers = Array2::from_fn(u_size, |i, j| u_weights[(i, j)] > 0.0);
        self.v_markers = Array2::from_fn(v_size, |i, j| v_weights[(i, j)] > 0.0);
    }

    fn build_fluid_sdf(&mut self) {
        let geometry = *self.velocity.geometry();
        let radius = Self::sdf_radius(&geometry);
        let band = Self::sdf_band(&geometry);

        self.neighbors.build(self.particles.positions());
        let neighbors = &self.neighbors;
        self.fluid_sdf.parallel_fill_with(|x| {
            let mut min_distance = band;
            neighbors.for_each_nearby_point(x, band, |_, p| {
                min_distance = min_distance.min(p.distance(x));
            });
            min_distance - radius
        });
    }

    fn extrapolation_depth(&self) -> usize {
        (self.config.max_cfl.ceil() as usize).max(EXTRAPOLATION_DEPTH)
    }

    fn extrapolate_velocity_to_air(&mut self) {
        let depth = self.extrapolation_depth();
        let (u, v) = self.velocity.uv_mut();

        let u_input = u.clone();
        extrapolate_to_region(&u_input, &self.u_markers, depth, u);
        let v_input = v.clone();
        extrapolate_to_region(&v_input, &self.v_markers, depth, v);
    }

    fn apply_boundary_condition(&mut self) {
        self.boundary_condition_solver
            .constrain_velocity(&mut self.velocity);
    }

    /// Gravity and particle forces act only on faces that carry fluid
    fn apply_forces(&mut self, time_interval: f64) {
        let gravity = self.config.gravity;
        let (u_markers, v_markers) = (&self.u_markers, &self.v_markers);
        let (u_accelerations, v_accelerations) = (&self.u_accelerations, &self.v_accelerations);

        let (u, v) = self.velocity.uv_mut();
        u.parallel_for_each_mut(|i, j, value| {
            if u_markers[(i, j)] {
                *value += (gravity.x + u_accelerations[(i, j)]) * time_interval;
            }
        });
        v.parallel_for_each_mut(|i, j, value| {
            if v_markers[(i, j)] {
                *value += (gravity.y + v_accelerations[(i, j)]) * time_interval;
            }
        });
    }

    fn apply_viscosity(&mut self, time_interval: f64) -> FluidResult<()> {
        if self.config.viscosity_coefficient <= 0.0 {
            return Ok(());
        }

        self.diffusion_solver.solve_face_centered(
            &self.velocity,
            self.config.viscosity_coefficient,
            time_interval,
            &mut self.velocity_scratch,
            self.boundary_condition_solver.collider_sdf(),
            &self.fluid_sdf,
        )?;
        std::mem::swap(&mut self.velocity, &mut self.velocity_scratch);
        self.apply_boundary_condition();
        Ok(())
    }

    fn apply_pressure(&mut self) {
        self.pressure_solver.solve(
            &self.velocity,
            &mut self.velocity_scratch,
            self.boundary_condition_solver.collider_sdf(),
            &self.fluid_sdf,
        );
        std::mem::swap(&mut self.velocity, &mut self.velocity_scratch);
        self.apply_boundary_condition();
    }

    fn transfer_grid_to_particles(&mut self) {
        let grid = &self.velocity;
        let (positions, velocities) = self.particles.positions_and_velocities_mut();
        if positions.len() >= PARALLEL_THRESHOLD {
            velocities
                .par_iter_mut()
                .zip(positions.par_iter())
                .for_each(|(velocity, position)| *velocity = grid.sample(*position));
        } else {
            for (velocity, position) in velocities.iter_mut().zip(positions.iter()) {
                *velocity = grid.sample(*position);
            }
        }
    }

    /// Midpoint-rule advection through the grid velocity, then clamp to closed
    /// domain edges and push out of the collider
    fn move_particles(&mut self, time_interval: f64) {
        let bounds = self.velocity.bounding_box();
        let closed = self.boundary_condition_solver.closed_domain();
        let collider = self.boundary_condition_solver.collider().cloned();
        let radius = self.particles.radius();
        let restitution = self.config.restitution_coefficient;

        let sub_steps = (self.config.max_cfl.ceil() as usize).max(1);
        let dt = time_interval / sub_steps as f64;
        let grid = &self.velocity;

        let mover = |(position, velocity): (&mut DVec2, &mut DVec2)| {
            let mut point = *position;
            let mut new_velocity = *velocity;

            for _ in 0..sub_steps {
                let start_velocity = grid.sample(point);
                let mid_point = point + 0.5 * dt * start_velocity;
                point += dt * grid.sample(mid_point);
            }

            if closed.left && point.x <= bounds.lower.x {
                point.x = bounds.lower.x;
                new_velocity.x = 0.0;
            }
            if closed.right && point.x >= bounds.upper.x {
                point.x = bounds.upper.x;
                new_velocity.x = 0.0;
            }
            if closed.bottom && point.y <= bounds.lower.y {
                point.y = bounds.lower.y;
                new_velocity.y = 0.0;
            }
            if closed.top && point.y >= bounds.upper.y {
                point.y = bounds.upper.y;
                new_velocity.y = 0.0;
            }

            if let Some(collider) = &collider {
                collider.resolve_collision(radius, restitution, &mut point, &mut new_velocity);
            }

            *position = point;
            *velocity = new_velocity;
        };

        let (positions, velocities) = self.particles.positions_and_velocities_mut();
        if positions.len() >= PARALLEL_THRESHOLD {
            positions
                .par_iter_mut()
                .zip(velocities.par_iter_mut())
                .for_each(mover);
        } else {
            positions.iter_mut().zip(velocities.iter_mut()).for_each(mover);
        }
    }
}

/// Divide accumulated values by their weights; unweighted faces stay zero
fn normalize_by_weight(values: &mut Array2<f64>, weights: &Array2<f64>) {
    for (value, weight) in values.iter_mut().zip(weights.iter()) {
        if *weight > 0.0 {
            *value /= weight;
        }
    }
}
