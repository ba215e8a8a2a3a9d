use glam::DVec2;

/// Default particle radius (m)
pub const DEFAULT_PARTICLE_RADIUS: f64 = 1e-3;

/// Default particle mass (kg)
pub const DEFAULT_PARTICLE_MASS: f64 = 1e-3;

/// Particle state stored in Structure of Arrays (SOA) layout.
///
/// All per-particle buffers always have the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleSystemData2 {
    radius: f64,
    mass: f64,

    positions: Vec<DVec2>,
    velocities: Vec<DVec2>,
    forces: Vec<DVec2>,
}

impl Default for ParticleSystemData2 {
    fn default() -> Self {
        Self::new(0)
    }
}

impl ParticleSystemData2 {
    /// Create `count` particles at rest at the origin
    pub fn new(count: usize) -> Self {
        let mut data = Self {
            radius: DEFAULT_PARTICLE_RADIUS,
            mass: DEFAULT_PARTICLE_MASS,
            positions: Vec::new(),
            velocities: Vec::new(),
            forces: Vec::new(),
        };
        data.resize(count);
        data
    }

    pub fn number_of_particles(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Non-positive values are clamped to zero
    pub fn set_radius(&mut self, radius: f64) {
        self.radius = radius.max(0.0);
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn set_mass(&mut self, mass: f64) {
        self.mass = mass.max(0.0);
    }

    /// Grow or shrink every buffer to `count`; new particles start at zero
    pub fn resize(&mut self, count: usize) {
        self.positions.resize(count, DVec2::ZERO);
        self.velocities.resize(count, DVec2::ZERO);
        self.forces.resize(count, DVec2::ZERO);
    }

    pub fn clear(&mut self) {
        self.positions.clear();
        self.velocities.clear();
        self.forces.clear();
    }

    pub fn add_particle(&mut self, position: DVec2, velocity: DVec2, force: DVec2) {
        self.positions.push(position);
        self.velocities.push(velocity);
        self.forces.push(force);
    }

    /// Append particles; missing velocities and forces default to zero
    pub fn add_particles(&mut self, positions: &[DVec2], velocities: &[DVec2], forces: &[DVec2]) {
        let start = self.positions.len();
        self.positions.extend_from_slice(positions);
        self.resize(self.positions.len());

        for (offset, velocity) in velocities.iter().take(positions.len()).enumerate() {
            self.velocities[start + offset] = *velocity;
        }
        for (offset, force) in forces.iter().take(positions.len()).enumerate() {
            self.forces[start + offset] = *force;
        }
    }

    pub fn positions(&self) -> &[DVec2] {
        &self.positions
    }

    pub fn positions_mut(&mut self) -> &mut [DVec2] {
        &mut self.positions
    }

    pub fn velocities(&self) -> &[DVec2] {
        &self.velocities
    }

    pub fn velocities_mut(&mut self) -> &mut [DVec2] {
        &mut self.velocities
    }

    /// External force on each particle; applied every sub-step until changed
    pub fn forces(&self) -> &[DVec2] {
        &self.forces
    }

    pub fn forces_mut(&mut self) -> &mut [DVec2] {
        &mut self.forces
    }

    /// Split borrow of positions and velocities for the particle mover
    pub fn positions_and_velocities_mut(&mut self) -> (&mut [DVec2], &mut [DVec2]) {
        (&mut self.positions, &mut self.velocities)
    }

    /// Largest particle speed, zero when empty
    pub fn max_speed(&self) -> f64 {
        self.velocities
            .iter()
            .map(|v| v.length())
            .fold(0.0, f64::max)
    }

    /// Largest `|force| / mass`, zero when empty or massless
    pub fn max_acceleration(&self) -> f64 {
        if self.mass <= 0.0 {
            return 0.0;
        }
        self.forces
            .iter()
            .map(|f| f.length())
            .fold(0.0, f64::max)
            / self.mass
    }
}
