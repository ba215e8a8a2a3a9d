//! Continuous fields
//!
//! Solvers take boundary and fluid signed distances as `&dyn ScalarField2`, so
//! constants, closures and grids can all be passed in the same slot.

use glam::DVec2;

/// Scalar quantity defined everywhere in space
pub trait ScalarField2: Send + Sync {
    fn sample(&self, x: DVec2) -> f64;
}

/// Vector quantity defined everywhere in space
pub trait VectorField2: Send + Sync {
    fn sample(&self, x: DVec2) -> DVec2;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantScalarField2 {
    pub value: f64,
}

impl ConstantScalarField2 {
    pub const fn new(value: f64) -> Self {
        Self { value }
    }
}

impl ScalarField2 for ConstantScalarField2 {
    fn sample(&self, _x: DVec2) -> f64 {
        self.value
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantVectorField2 {
    pub value: DVec2,
}

impl ConstantVectorField2 {
    pub const fn new(value: DVec2) -> Self {
        Self { value }
    }
}

impl VectorField2 for ConstantVectorField2 {
    fn sample(&self, _x: DVec2) -> DVec2 {
        self.value
    }
}

/// Scalar field backed by a closure
pub struct CustomScalarField2<F> {
    func: F,
}

impl<F> CustomScalarField2<F>
where
    F: Fn(DVec2) -> f64 + Send + Sync,
{
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> ScalarField2 for CustomScalarField2<F>
where
    F: Fn(DVec2) -> f64 + Send + Sync,
{
    fn sample(&self, x: DVec2) -> f64 {
        (self.func)(x)
    }
}

/// Vector field backed by a closure
pub struct CustomVectorField2<F> {
    func: F,
}

impl<F> CustomVectorField2<F>
where
    F: Fn(DVec2) -> DVec2 + Send + Sync,
{
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> VectorField2 for CustomVectorField2<F>
where
    F: Fn(DVec2) -> DVec2 + Send + Sync,
{
    fn sample(&self, x: DVec2) -> DVec2 {
        (self.func)(x)
    }
}
