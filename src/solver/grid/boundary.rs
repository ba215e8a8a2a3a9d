use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::grid::{FaceCenteredGrid2, GridGeometry2, ScalarGrid2, ScalarGridLayout};
use crate::solver::hybrid::Collider2;

/// Which domain edges are solid walls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClosedDomain {
    pub left: bool,
    pub right: bool,
    pub bottom: bool,
    pub top: bool,
}

impl Default for ClosedDomain {
    fn default() -> Self {
        Self::all()
    }
}

impl ClosedDomain {
    pub const fn all() -> Self {
        Self {
            left: true,
            right: true,
            bottom: true,
            top: true,
        }
    }

    pub const fn open() -> Self {
        Self {
            left: false,
            right: false,
            bottom: false,
            top: false,
        }
    }
}

/// Boundary conditions on a voxelized collider.
///
/// Cells whose center lies inside the collider are solid; every face touching
/// a solid cell takes the collider's velocity. Closed domain edges get zero
/// normal velocity.
#[derive(Debug, Clone)]
pub struct GridBlockedBoundaryConditionSolver2 {
    closed_domain: ClosedDomain,
    collider: Option<Collider2>,
    /// Collider signed distance sampled at cell centers
    collider_sdf: ScalarGrid2,
}

impl Default for GridBlockedBoundaryConditionSolver2 {
    fn default() -> Self {
        Self::new(ClosedDomain::default())
    }
}

impl GridBlockedBoundaryConditionSolver2 {
    pub fn new(closed_domain: ClosedDomain) -> Self {
        let mut collider_sdf = ScalarGrid2::default();
        collider_sdf.fill(f64::MAX);
        Self {
            closed_domain,
            collider: None,
            collider_sdf,
        }
    }

    pub fn closed_domain(&self) -> ClosedDomain {
        self.closed_domain
    }

    pub fn set_closed_domain(&mut self, closed_domain: ClosedDomain) {
        self.closed_domain = closed_domain;
    }

    pub fn collider(&self) -> Option<&Collider2> {
        self.collider.as_ref()
    }

    /// Signed distance to the collider at cell centers; `f64::MAX` without one
    pub fn collider_sdf(&self) -> &ScalarGrid2 {
        &self.collider_sdf
    }

    /// Re-voxelize `collider` onto `geometry`'s cells
    pub fn update_collider(&mut self, collider: Option<&Collider2>, geometry: &GridGeometry2) {
        self.collider = collider.cloned();
        self.collider_sdf =
            ScalarGrid2::with_geometry(ScalarGridLayout::CellCentered, *geometry, f64::MAX);

        if let Some(collider) = &self.collider {
            let surface = collider.surface();
            self.collider_sdf
                .parallel_fill_with(|x| surface.signed_distance(x));
        }
    }

    fn is_solid_cell(&self, i: usize, j: usize) -> bool {
        self.collider_sdf[(i, j)] < 0.0
    }

    pub fn constrain_velocity(&self, velocity: &mut FaceCenteredGrid2) {
        let resolution = velocity.resolution();
        if self.collider_sdf.data_size() != resolution {
            log::warn!(
                "[boundary_condition] collider grid {:?} does not match velocity grid {:?}",
                self.collider_sdf.data_size(),
                resolution
            );
            return;
        }

        if let Some(collider) = &self.collider {
            let u_origin = velocity.u_origin();
            let v_origin = velocity.v_origin();
            let spacing = velocity.grid_spacing();
            let (u, v) = velocity.uv_mut();

            u.parallel_for_each_mut(|i, j, value| {
                let left_solid = i > 0 && self.is_solid_cell(i - 1, j);
                let right_solid = i < resolution.x && self.is_solid_cell(i, j);
                if left_solid || right_solid {
                    let x = u_origin + spacing * DVec2::new(i as f64, j as f64);
                    *value = collider.velocity_at(x).x;
                }
            });
            v.parallel_for_each_mut(|i, j, value| {
                let down_solid = j > 0 && self.is_solid_cell(i, j - 1);
                let up_solid = j < resolution.y && self.is_solid_cell(i, j);
                if down_solid || up_solid {
                    let x = v_origin + spacing * DVec2::new(i as f64, j as f64);
                    *value = collider.velocity_at(x).y;
                }
            });
        }

        let closed = self.closed_domain;
        let (u, v) = velocity.uv_mut();
        for j in 0..resolution.y {
            if closed.left {
                u[(0, j)] = 0.0;
            }
            if closed.right {
                u[(resolution.x, j)] = 0.0;
            }
        }
        for i in 0..resolution.x {
            if closed.bottom {
                v[(i, 0)] = 0.0;
            }
            if closed.top {
                v[(i, resolution.y)] = 0.0;
            }
        }
    }
}
