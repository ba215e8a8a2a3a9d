use std::sync::Arc;

use glam::DVec2;

use super::*;
use crate::animation::Frame;
use crate::array::Size2;
use crate::config::PicSolverConfig;
use crate::error::FluidError;
use crate::geometry::{Box2, ImplicitSurface2, Plane2, Sphere2, SurfaceToImplicit2};
use crate::grid::GridGeometry2;
use crate::solver::fdm::LinearSolverKind;

fn implicit_box(lower: DVec2, upper: DVec2) -> Arc<dyn ImplicitSurface2> {
    Arc::new(SurfaceToImplicit2::new(Arc::new(Box2::new(lower, upper))))
}

fn floor_collider() -> Collider2 {
    let floor = SurfaceToImplicit2::new(Arc::new(Plane2::new(DVec2::Y, DVec2::ZERO)));
    Collider2::new(Arc::new(floor))
}

#[test]
fn test_particle_buffers_stay_in_step() {
    let mut particles = ParticleSystemData2::new(2);
    assert_eq!(particles.number_of_particles(), 2);
    assert_eq!(particles.radius(), DEFAULT_PARTICLE_RADIUS);

    particles.add_particles(
        &[DVec2::new(1.0, 2.0), DVec2::new(3.0, 4.0)],
        &[DVec2::new(0.5, 0.0)],
        &[],
    );
    assert_eq!(particles.number_of_particles(), 4);
    assert_eq!(particles.velocities().len(), 4);
    assert_eq!(particles.forces().len(), 4);
    assert_eq!(particles.positions()[3], DVec2::new(3.0, 4.0));
    assert_eq!(particles.velocities()[2], DVec2::new(0.5, 0.0));
    assert_eq!(particles.velocities()[3], DVec2::ZERO);
    assert_eq!(particles.max_speed(), 0.5);

    particles.set_mass(2.0);
    particles.forces_mut()[1] = DVec2::new(3.0, 4.0);
    assert_eq!(particles.max_acceleration(), 2.5);
    particles.set_mass(0.0);
    assert_eq!(particles.max_acceleration(), 0.0);

    particles.set_radius(-1.0);
    assert_eq!(particles.radius(), 0.0);

    particles.resize(1);
    assert_eq!(particles.forces().len(), 1);
    particles.clear();
    assert!(particles.is_empty());
}

fn lattice_config() -> VolumeEmitterConfig {
    VolumeEmitterConfig {
        spacing: 0.1,
        region_lower: DVec2::new(0.05, 0.05),
        region_upper: DVec2::new(0.96, 0.46),
        ..VolumeEmitterConfig::default()
    }
}

#[test]
fn test_one_shot_emitter_fills_the_lattice_once() {
    let surface = implicit_box(DVec2::ZERO, DVec2::new(1.0, 0.5));
    let mut emitter = VolumeParticleEmitter2::new(surface, lattice_config()).unwrap();
    let mut particles = ParticleSystemData2::default();

    assert_eq!(emitter.update(&mut particles), 50);
    assert_eq!(particles.number_of_particles(), 50);
    assert!(!emitter.is_enabled());
    assert_eq!(emitter.update(&mut particles), 0);
    assert_eq!(emitter.number_of_emitted_particles(), 50);
}

#[test]
fn test_continuous_emitter_skips_occupied_spots_unless_overlap_is_allowed() {
    let surface = implicit_box(DVec2::ZERO, DVec2::new(1.0, 0.5));
    let mut particles = ParticleSystemData2::default();

    let config = VolumeEmitterConfig {
        is_one_shot: false,
        ..lattice_config()
    };
    let mut emitter = VolumeParticleEmitter2::new(surface.clone(), config).unwrap();
    assert_eq!(emitter.update(&mut particles), 50);
    assert_eq!(emitter.update(&mut particles), 0);

    let overlapping = VolumeEmitterConfig {
        allow_overlapping: true,
        ..config
    };
    let mut emitter = VolumeParticleEmitter2::new(surface, overlapping).unwrap();
    assert_eq!(emitter.update(&mut particles), 50);
    assert_eq!(particles.number_of_particles(), 100);
}

#[test]
fn test_emitter_respects_max_count_and_seeded_jitter() {
    let surface = implicit_box(DVec2::ZERO, DVec2::new(1.0, 0.5));

    let capped = VolumeEmitterConfig {
        max_number_of_particles: 7,
        ..lattice_config()
    };
    let mut particles = ParticleSystemData2::default();
    let mut emitter = VolumeParticleEmitter2::new(surface.clone(), capped).unwrap();
    assert_eq!(emitter.update(&mut particles), 7);

    let jittered = VolumeEmitterConfig {
        jitter: 1.0,
        seed: 42,
        initial_velocity: DVec2::new(0.0, -1.0),
        ..lattice_config()
    };
    let mut first = ParticleSystemData2::default();
    let mut second = ParticleSystemData2::default();
    VolumeParticleEmitter2::new(surface.clone(), jittered)
        .unwrap()
        .update(&mut first);
    VolumeParticleEmitter2::new(surface.clone(), jittered)
        .unwrap()
        .update(&mut second);

    assert!(!first.is_empty());
    assert_eq!(first, second);
    for (position, velocity) in first.positions().iter().zip(first.velocities()) {
        assert!(surface.signed_distance(*position) <= 0.0);
        assert_eq!(*velocity, DVec2::new(0.0, -1.0));
    }
}

#[test]
fn test_emitter_rejects_bad_config() {
    let surface = implicit_box(DVec2::ZERO, DVec2::ONE);
    let config = VolumeEmitterConfig {
        spacing: 0.0,
        ..VolumeEmitterConfig::default()
    };
    assert!(matches!(
        VolumeParticleEmitter2::new(surface, config),
        Err(FluidError::InvalidConfig { .. })
    ));
}

#[test]
fn test_collider_pushes_particles_out_and_removes_inward_velocity() {
    let collider = floor_collider();
    let mut position = DVec2::new(0.3, -0.1);
    let mut velocity = DVec2::new(2.0, -1.0);
    collider.resolve_collision(0.05, 0.0, &mut position, &mut velocity);
    assert!((position - DVec2::new(0.3, 0.05)).length() < 1e-12);
    assert!((velocity - DVec2::new(2.0, 0.0)).length() < 1e-12);

    let mut position = DVec2::new(0.3, -0.1);
    let mut velocity = DVec2::new(2.0, -1.0);
    collider.resolve_collision(0.05, 0.5, &mut position, &mut velocity);
    assert!((velocity - DVec2::new(2.0, 0.5)).length() < 1e-12);

    let sticky = floor_collider().with_friction(0.5);
    let mut position = DVec2::new(0.3, -0.1);
    let mut velocity = DVec2::new(2.0, -1.0);
    sticky.resolve_collision(0.05, 0.0, &mut position, &mut velocity);
    assert!((velocity - DVec2::new(1.5, 0.0)).length() < 1e-12);

    // Clear of the surface: untouched
    let mut position = DVec2::new(0.0, 1.0);
    let mut velocity = DVec2::new(0.0, -1.0);
    collider.resolve_collision(0.05, 0.0, &mut position, &mut velocity);
    assert_eq!(position, DVec2::new(0.0, 1.0));
    assert_eq!(velocity, DVec2::new(0.0, -1.0));
}

#[test]
fn test_collider_velocity_combines_linear_and_angular_parts() {
    let collider = floor_collider()
        .with_linear_velocity(DVec2::new(1.0, 0.0))
        .with_angular_velocity(2.0);
    let velocity = collider.velocity_at(DVec2::new(1.0, 0.0));
    assert!((velocity - DVec2::new(1.0, 2.0)).length() < 1e-12);
    assert!(collider.is_penetrating(DVec2::new(0.0, 0.01), 0.05));
    assert!(!collider.is_penetrating(DVec2::new(0.0, 0.1), 0.05));
}

fn unit_square_config(resolution: usize) -> PicSolverConfig {
    let mut config = PicSolverConfig::default();
    config.grid = GridGeometry2::new(
        Size2::new(resolution, resolution),
        DVec2::splat(1.0 / resolution as f64),
        DVec2::ZERO,
    );
    config.linear_solver.kind = LinearSolverKind::GaussSeidel;
    config.linear_solver.max_iterations = 200;
    config
}

#[test]
fn test_updating_an_empty_scene_only_advances_the_frame() {
    let mut solver = PicSolver2::new(unit_square_config(8)).unwrap();
    let velocity = solver.velocity().clone();
    let fluid_sdf = solver.fluid_sdf().clone();
    assert_eq!(solver.current_frame().index, 0);

    for frame in Frame::default().take(2) {
        solver.update(&frame).unwrap();
    }

    assert_eq!(solver.current_frame().index, 2);
    assert!(solver.particles().is_empty());
    assert_eq!(solver.velocity(), &velocity);
    assert_eq!(solver.fluid_sdf(), &fluid_sdf);

    // Already simulated
    solver.update(&Frame::new(1, 1.0 / 60.0)).unwrap();
    assert_eq!(solver.current_frame().index, 2);

    // Catches up over skipped frames
    solver.update(&Frame::new(4, 1.0 / 60.0)).unwrap();
    assert_eq!(solver.current_frame().index, 5);
    assert_eq!(solver.velocity(), &velocity);
}

#[test]
fn test_start_frame_comes_from_config() {
    let mut config = unit_square_config(4);
    config.start_frame = 10;
    let mut solver = PicSolver2::new(config).unwrap();

    solver.update(&Frame::new(3, 0.1)).unwrap();
    assert_eq!(solver.current_frame().index, 10);
    solver.update(&Frame::new(10, 0.1)).unwrap();
    assert_eq!(solver.current_frame().index, 11);
}

#[test]
fn test_update_up_to_the_last_frame_index_saturates() {
    let mut config = unit_square_config(4);
    config.start_frame = i64::MAX - 1;
    let mut solver = PicSolver2::new(config).unwrap();

    solver.update(&Frame::new(i64::MAX, 0.1)).unwrap();
    assert_eq!(solver.current_frame().index, i64::MAX);
}

#[test]
fn test_invalid_config_is_rejected() {
    let mut config = PicSolverConfig::default();
    config.grid.grid_spacing = DVec2::new(0.0, 1.0);
    assert!(matches!(
        PicSolver2::new(config),
        Err(FluidError::InvalidConfig { .. })
    ));
}

#[test]
fn test_fast_particles_split_the_frame() {
    let mut solver = PicSolver2::new(unit_square_config(16)).unwrap();
    assert_eq!(solver.number_of_sub_time_steps(1.0 / 60.0), 1);

    solver
        .particles_mut()
        .add_particle(DVec2::splat(0.5), DVec2::new(100.0, 0.0), DVec2::ZERO);
    // (100 + 9.8 / 60) * (1 / 60) * 16 / 5 = 5.34...
    assert_eq!(solver.number_of_sub_time_steps(1.0 / 60.0), 6);
}

fn drop_emitter() -> VolumeParticleEmitter2 {
    let config = VolumeEmitterConfig {
        spacing: 1.0 / 32.0,
        ..VolumeEmitterConfig::default()
    };
    VolumeParticleEmitter2::new(
        implicit_box(DVec2::new(0.3, 0.5), DVec2::new(0.7, 0.8)),
        config,
    )
    .unwrap()
}

fn mean_height(particles: &ParticleSystemData2) -> f64 {
    particles.positions().iter().map(|p| p.y).sum::<f64>() / particles.number_of_particles() as f64
}

#[test]
fn test_a_drop_falls_and_stays_inside_the_domain() {
    let mut solver = PicSolver2::new(unit_square_config(16)).unwrap();
    solver.set_emitter(Some(drop_emitter()));

    solver.update(&Frame::new(0, 1.0 / 60.0)).unwrap();
    let count = solver.particles().number_of_particles();
    assert!(count > 0);
    let start_height = mean_height(solver.particles());
    assert!(solver.fluid_sdf().sample(DVec2::new(0.5, 0.65)) < 0.0);
    assert!(solver.fluid_sdf().sample(DVec2::new(0.5, 0.1)) > 0.0);

    solver.update(&Frame::new(9, 1.0 / 60.0)).unwrap();
    assert_eq!(solver.current_frame().index, 10);
    assert_eq!(solver.particles().number_of_particles(), count);

    let end_height = mean_height(solver.particles());
    assert!(
        end_height < start_height - 0.05,
        "drop should fall: {start_height} -> {end_height}"
    );

    let bounds = solver.grid_geometry().bounding_box();
    for p in solver.particles().positions() {
        assert!(p.is_finite());
        assert!(bounds.contains(*p), "particle left the domain: {p:?}");
    }
}

#[test]
fn test_particle_forces_accelerate_the_fluid() {
    let mut config = unit_square_config(16);
    config.gravity = DVec2::ZERO;

    let mut still = PicSolver2::new(config).unwrap();
    still.set_emitter(Some(drop_emitter()));
    still.update(&Frame::new(0, 1.0 / 60.0)).unwrap();

    let mut lifted = PicSolver2::new(config).unwrap();
    lifted.set_emitter(Some(drop_emitter()));
    lifted.update(&Frame::new(0, 1.0 / 60.0)).unwrap();
    assert_eq!(lifted.particles(), still.particles());
    let start_height = mean_height(still.particles());

    // Upward force of one "g" per particle
    let lift = DVec2::new(0.0, 9.8 * lifted.particles().mass());
    lifted.particles_mut().forces_mut().fill(lift);

    still.update(&Frame::new(9, 1.0 / 60.0)).unwrap();
    lifted.update(&Frame::new(9, 1.0 / 60.0)).unwrap();

    assert!((mean_height(still.particles()) - start_height).abs() < 1e-12);
    assert!(still.particles().velocities().iter().all(|v| *v == DVec2::ZERO));

    let end_height = mean_height(lifted.particles());
    assert!(
        end_height > start_height + 0.05,
        "forced fluid should rise: {start_height} -> {end_height}"
    );
    let bounds = lifted.grid_geometry().bounding_box();
    for p in lifted.particles().positions() {
        assert!(bounds.contains(*p), "particle left the domain: {p:?}");
    }
}

#[test]
fn test_particles_never_end_inside_a_collider() {
    let mut config = unit_square_config(16);
    config.particle_radius = 0.01;
    let mut solver = PicSolver2::new(config).unwrap();
    solver.set_emitter(Some(drop_emitter()));

    let sphere: Arc<dyn ImplicitSurface2> = Arc::new(SurfaceToImplicit2::new(Arc::new(
        Sphere2::new(DVec2::new(0.5, 0.3), 0.15),
    )));
    solver.set_collider(Some(Collider2::new(sphere.clone())));
    assert!(solver.collider().is_some());

    for frame in Frame::default().take(30) {
        solver.update(&frame).unwrap();
    }

    let bounds = solver.grid_geometry().bounding_box();
    for p in solver.particles().positions() {
        assert!(sphere.signed_distance(*p) > -1e-9, "particle inside collider: {p:?}");
        assert!(bounds.contains(*p));
    }
}
