use glam::Vec3;

use crate::boundary::BoundaryBox;
use crate::config::{check_non_negative, check_positive, InvalidParameter, SimParams};
use crate::density::compute_density_pressure;
use crate::forces::compute_forces;
use crate::grid::SpatialHashGrid;
use crate::kernels::SmoothingKernels;
use crate::particle::ParticleSet;

/// Hash table size for the spatial grid: 2^17 buckets.
const GRID_TABLE_SIZE: usize = 131072;

/// SPH fluid simulation: owns the particles, the position buffer, and the
/// spatial grid, and sequences one full tick per `step` call.
///
/// Single-writer by design: one instance fully owns its state, a step
/// completes atomically before returning, and concurrent simulations must
/// each own an independent instance.
pub struct FluidSolver {
    pub particles: ParticleSet,
    /// One position per particle slot; the flat f32 view of the active
    /// prefix is the only state exposed to renderers.
    positions: Vec<Vec3>,
    params: SimParams,
    kernels: SmoothingKernels,
    bounds: BoundaryBox,
    grid: SpatialHashGrid,
}

impl FluidSolver {
    /// Create a solver with default water-like parameters and particles
    /// seeded in a lattice block resting above the floor.
    pub fn new(particle_count: usize) -> Self {
        // Default parameters always validate; unwrap is unreachable.
        Self::with_params(particle_count, SimParams::default())
            .unwrap_or_else(|_| unreachable!("default params are valid"))
    }

    /// Create a solver with explicit parameters, rejecting any that would
    /// produce undefined numeric behavior.
    pub fn with_params(
        particle_count: usize,
        params: SimParams,
    ) -> Result<Self, InvalidParameter> {
        params.validate()?;

        let mut solver = Self {
            particles: ParticleSet::new(particle_count),
            positions: vec![Vec3::ZERO; particle_count],
            params,
            kernels: SmoothingKernels::new(params.smoothing_radius),
            bounds: BoundaryBox::default(),
            grid: SpatialHashGrid::new(params.smoothing_radius, GRID_TABLE_SIZE, particle_count),
        };
        solver.seed_lattice();
        Ok(solver)
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// Rebuilds the grid from current positions, runs the density pass,
    /// then the force pass, then semi-implicit Euler integration with
    /// boundary correction. Mutates particle kinematics and the position
    /// buffer in place. `dt <= 0` is accepted mechanically and produces no
    /// motion or reversed motion; rate sanity is a caller concern.
    pub fn step(&mut self, dt: f32) {
        let count = self.particles.count;

        self.grid.build(&self.positions, count);

        compute_density_pressure(
            &mut self.particles,
            &self.positions,
            &mut self.grid,
            &self.kernels,
            self.params.reference_density,
            self.params.pressure_constant,
        );

        compute_forces(
            &mut self.particles,
            &self.positions,
            &mut self.grid,
            &self.kernels,
            self.params.viscosity,
            self.params.gravity,
        );

        // Semi-implicit Euler: velocity first, then position from the
        // just-updated velocity, both with the same dt.
        for i in 0..count {
            let vel = self.particles.velocity[i] + self.particles.acceleration[i] * dt;
            self.particles.velocity[i] = vel;
            self.positions[i] += vel * dt;
            self.bounds.apply(
                &mut self.positions[i],
                &mut self.particles.velocity[i],
                self.params.horizontal_walls,
            );
        }
    }

    // ---------- read accessors ----------

    /// Number of active particles.
    pub fn particle_count(&self) -> usize {
        self.particles.count
    }

    /// Read-only flat position view: exactly `3 * particle_count()` floats,
    /// particle i at offsets [3i, 3i+1, 3i+2]. Updated in place by `step`;
    /// renderers copy from here into their draw call.
    pub fn positions(&self) -> &[f32] {
        let flat: &[f32] = bytemuck::cast_slice(&self.positions);
        &flat[..self.particles.count * 3]
    }

    pub fn position(&self, index: usize) -> Vec3 {
        self.positions[index]
    }

    pub fn smoothing_radius(&self) -> f32 {
        self.params.smoothing_radius
    }

    pub fn params(&self) -> &SimParams {
        &self.params
    }

    // ---------- mutators ----------

    pub fn set_position(&mut self, index: usize, position: Vec3) {
        self.positions[index] = position;
    }

    /// Change the smoothing radius. Recomputes the kernel normalization
    /// constants and the grid cell size; takes effect on the next `step`.
    pub fn set_smoothing_radius(&mut self, h: f32) -> Result<(), InvalidParameter> {
        check_positive("smoothing_radius", h)?;
        self.params.smoothing_radius = h;
        self.kernels.set_radius(h);
        self.grid.set_cell_size(h);
        Ok(())
    }

    pub fn set_reference_density(&mut self, density: f32) -> Result<(), InvalidParameter> {
        check_positive("reference_density", density)?;
        self.params.reference_density = density;
        Ok(())
    }

    pub fn set_pressure_constant(&mut self, k: f32) -> Result<(), InvalidParameter> {
        check_non_negative("pressure_constant", k)?;
        self.params.pressure_constant = k;
        Ok(())
    }

    pub fn set_viscosity(&mut self, viscosity: f32) -> Result<(), InvalidParameter> {
        check_non_negative("viscosity", viscosity)?;
        self.params.viscosity = viscosity;
        Ok(())
    }

    pub fn set_gravity(&mut self, gravity: Vec3) {
        self.params.gravity = gravity;
    }

    pub fn set_horizontal_walls(&mut self, enabled: bool) {
        self.params.horizontal_walls = enabled;
    }

    pub fn set_mass(&mut self, index: usize, mass: f32) -> Result<(), InvalidParameter> {
        check_positive("mass", mass)?;
        self.particles.mass[index] = mass;
        Ok(())
    }

    /// Shrink or grow the active particle count within the allocated
    /// capacity. Slots keep their state; no reallocation happens.
    pub fn set_active_count(&mut self, count: usize) -> Result<(), InvalidParameter> {
        if count > self.particles.capacity() {
            return Err(InvalidParameter {
                name: "active_count",
                value: count as f32,
            });
        }
        self.particles.count = count;
        Ok(())
    }

    /// Restore the seeded lattice block and zero all kinematic state.
    pub fn reinitialize(&mut self) {
        self.seed_lattice();
        for i in 0..self.particles.capacity() {
            self.particles.velocity[i] = Vec3::ZERO;
            self.particles.acceleration[i] = Vec3::ZERO;
            self.particles.density[i] = 0.0;
            self.particles.pressure[i] = 0.0;
        }
    }

    /// Seed particles in a cubic lattice centered between the x walls,
    /// resting just above the floor. Spacing is half the smoothing radius
    /// so the block starts near rest density.
    fn seed_lattice(&mut self) {
        let capacity = self.particles.capacity();
        let side = (capacity as f32).cbrt().ceil().max(1.0) as usize;
        let spacing = self.params.smoothing_radius * 0.5;
        let origin = Vec3::new(
            -0.5 * (side as f32 - 1.0) * spacing,
            self.bounds.floor_y + spacing,
            -0.5 * (side as f32 - 1.0) * spacing,
        );

        for i in 0..capacity {
            let x = (i % side) as f32;
            let y = ((i / side) % side) as f32;
            let z = (i / (side * side)) as f32;
            self.positions[i] = origin + Vec3::new(x, y, z) * spacing;
        }
    }
}
