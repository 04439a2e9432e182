use glam::Vec3;

/// SoA particle storage.
///
/// `count` is the number of active particles and may be less than the
/// backing capacity, so a simulation can shrink without reallocating.
/// Index identity is stable for the lifetime of the simulation.
pub struct ParticleSet {
    /// Active particle count (<= capacity)
    pub count: usize,
    /// Per-particle mass; must stay positive
    pub mass: Vec<f32>,
    /// Smoothed density, recomputed each step; never below the reference density
    pub density: Vec<f32>,
    /// Equation-of-state pressure, derived from density each step
    pub pressure: Vec<f32>,
    /// Velocity, persists and integrates across steps
    pub velocity: Vec<Vec3>,
    /// Acceleration, fully recomputed each step (never accumulated)
    pub acceleration: Vec<Vec3>,
}

impl ParticleSet {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            mass: vec![1.0; count],
            density: vec![0.0; count],
            pressure: vec![0.0; count],
            velocity: vec![Vec3::ZERO; count],
            acceleration: vec![Vec3::ZERO; count],
        }
    }

    /// Backing storage capacity (>= `count`).
    pub fn capacity(&self) -> usize {
        self.mass.len()
    }
}
