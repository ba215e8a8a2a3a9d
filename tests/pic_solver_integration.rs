// Hybrid Fluid PIC Solver Integration Tests
//
// Drives PicSolver2 through whole frames from the public API: empty scenes,
// frame bookkeeping, and a dam of particles settling in a closed box.

use std::sync::Arc;

use glam::DVec2;

use hybrid_fluid::solver::fdm::LinearSolverKind;
use hybrid_fluid::{
    Box2, Frame, GridGeometry2, ImplicitSurface2, PicSolver2, PicSolverConfig, Size2,
    SurfaceToImplicit2, VolumeEmitterConfig, VolumeParticleEmitter2,
};

fn box_config(resolution: Size2, spacing: f64) -> PicSolverConfig {
    let mut config = PicSolverConfig::default();
    config.grid = GridGeometry2::new(resolution, DVec2::splat(spacing), DVec2::ZERO);
    config.linear_solver.kind = LinearSolverKind::GaussSeidel;
    config.linear_solver.max_iterations = 300;
    config
}

#[test]
fn test_empty_scene_frames() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut solver = PicSolver2::new(box_config(Size2::new(12, 6), 0.25)).unwrap();
    let velocity = solver.velocity().clone();
    let fluid_sdf = solver.fluid_sdf().clone();

    let frames = 5;
    for frame in Frame::default().take(frames) {
        solver.update(&frame).unwrap();
    }

    assert_eq!(solver.current_frame().index, frames as i64);
    assert!(solver.particles().is_empty());
    assert_eq!(solver.velocity(), &velocity);
    assert_eq!(solver.fluid_sdf(), &fluid_sdf);
}

#[test]
fn test_dam_break_stays_in_box() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut config = box_config(Size2::new(20, 10), 0.1);
    config.viscosity_coefficient = 0.01;
    let mut solver = PicSolver2::new(config).unwrap();

    let column: Arc<dyn ImplicitSurface2> = Arc::new(SurfaceToImplicit2::new(Arc::new(Box2::new(
        DVec2::new(0.0, 0.0),
        DVec2::new(0.6, 0.8),
    ))));
    let emitter = VolumeParticleEmitter2::new(
        column,
        VolumeEmitterConfig {
            spacing: 0.05,
            jitter: 0.5,
            seed: 3,
            ..VolumeEmitterConfig::default()
        },
    )
    .unwrap();
    solver.set_emitter(Some(emitter));

    let mut frame = Frame::new(0, 1.0 / 60.0);
    for _ in 0..20 {
        solver.update(&frame).unwrap();
        frame.advance();
    }

    let particles = solver.particles();
    assert!(particles.number_of_particles() > 100);
    assert_eq!(solver.current_frame().index, 20);

    let bounds = solver.grid_geometry().bounding_box();
    let mut max_x: f64 = 0.0;
    for p in particles.positions() {
        assert!(p.is_finite());
        assert!(bounds.contains(*p), "particle escaped: {p:?}");
        max_x = max_x.max(p.x);
    }
    // The column spreads out along the floor
    assert!(max_x > 0.6, "column did not spread, max x = {max_x}");
}
