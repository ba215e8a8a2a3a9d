//! Surface Geometry
//!
//! Explicit surfaces answer closest-point, normal and ray queries; implicit
//! surfaces add a signed distance (negative inside). Primitives are composed
//! into an `ImplicitSurfaceSet2`, which indexes its bounded members in a BVH.

mod bounding_box;
mod box_surface;
mod implicit_surface_set;
mod plane;
mod ray;
mod sphere;
mod surface;
mod surface_to_implicit;
mod transform;

pub use bounding_box::{BoundingBox2, BoundingBoxRayIntersection2};
pub use box_surface::Box2;
pub use implicit_surface_set::{ImplicitSurfaceSet2, SurfaceSetConfig};
pub use plane::Plane2;
pub use ray::Ray2;
pub use sphere::Sphere2;
pub use surface::{ImplicitSurface2, Surface2, SurfaceRayIntersection2};
pub use surface_to_implicit::SurfaceToImplicit2;
pub use transform::Transform2;
