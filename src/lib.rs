pub mod animation;
pub mod array;
pub mod config;
pub mod constants;
pub mod error;
pub mod field;
pub mod geometry;
pub mod grid;
pub mod solver;
pub mod spatial_index;

pub use animation::Frame;
pub use array::{Array1, Array2, ArrayView1, ArrayView2, ConstArrayView1, ConstArrayView2, Size2};
pub use config::{load_config, PicSolverConfig};
pub use error::{FluidError, FluidResult};
pub use field::{ScalarField2, VectorField2};
pub use geometry::{
    BoundingBox2, Box2, ImplicitSurface2, ImplicitSurfaceSet2, Plane2, Ray2, Sphere2, Surface2,
    SurfaceSetConfig, SurfaceToImplicit2, Transform2,
};
pub use grid::{
    CollocatedVectorGrid2, FaceCenteredGrid2, Grid2, GridGeometry2, GridKind, ScalarGrid2,
};
pub use solver::grid::{DiffusionBoundary, GridForwardEulerDiffusionSolver2};
pub use solver::hybrid::{
    Collider2, ParticleSystemData2, PicSolver2, VolumeEmitterConfig, VolumeParticleEmitter2,
};

/// Install `env_logger` as the `log` backend (`RUST_LOG` controls filtering).
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    if let Err(e) = env_logger::try_init() {
        log::debug!("[init_logging] env_logger already initialized: {}", e);
    }
}
