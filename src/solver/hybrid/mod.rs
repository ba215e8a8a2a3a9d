//! Hybrid particle-grid fluid simulation
//!
//! - `ParticleSystemData2`: particle positions, velocities and forces
//! - `VolumeParticleEmitter2`: seeds particles inside an implicit surface
//! - `Collider2`: rigid obstacle for particles and grid boundary conditions
//! - `PicSolver2`: the frame-by-frame PIC time stepper

mod collider;
mod emitter;
mod particle_data;
mod pic_solver;

pub use collider::Collider2;
pub use emitter::{VolumeEmitterConfig, VolumeParticleEmitter2};
pub use particle_data::{ParticleSystemData2, DEFAULT_PARTICLE_MASS, DEFAULT_PARTICLE_RADIUS};
pub use pic_solver::PicSolver2;

#[cfg(test)]
mod tests;
