// Hybrid Fluid Constants
//
// Shared numeric defaults for the array layer, geometry queries and solvers.
// Configuration structs take their defaults from here.

/// Data-parallel fan-out
pub mod parallel {
    /// Below this many elements kernels run on the calling thread
    pub const PARALLEL_THRESHOLD: usize = 4096;
}

/// Geometry tolerances
pub mod geometry {
    /// Tolerance used for ray/plane parallelism and degenerate directions
    pub const EPSILON: f64 = 1e-12;
}

/// Solver defaults
pub mod solver {
    /// Default gravity (m/s²), pointing down the y axis
    pub const GRAVITY: [f64; 2] = [0.0, -9.8];

    /// Default maximum CFL number before a frame is split into sub-steps
    pub const MAX_CFL: f64 = 5.0;

    /// Default frame length (60 FPS)
    pub const FRAME_TIME_INTERVAL: f64 = 1.0 / 60.0;

    /// Default linear-system iteration cap
    pub const LINEAR_SYSTEM_MAX_ITERATIONS: u32 = 100;

    /// Residual is checked every this many iterations
    pub const LINEAR_SYSTEM_RESIDUAL_CHECK_INTERVAL: u32 = 10;

    /// Default linear-system convergence tolerance
    pub const LINEAR_SYSTEM_TOLERANCE: f64 = 1e-6;

    /// Default successive over-relaxation factor for Gauss-Seidel
    pub const SOR_FACTOR: f64 = 1.0;

    /// Number of extrapolation passes into non-fluid regions
    pub const EXTRAPOLATION_DEPTH: usize = 5;
}
