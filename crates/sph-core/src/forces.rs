use glam::Vec3;

use crate::grid::SpatialHashGrid;
use crate::kernels::SmoothingKernels;
use crate::particle::ParticleSet;

/// Accumulate pressure-gradient, viscosity, and gravity acceleration for
/// every active particle.
///
/// Requires densities and pressures from the density pass. Acceleration
/// is overwritten, never accumulated across steps.
///
/// Neighbors contribute only for `0 < r < h`: the self term is excluded
/// because the direction normalization divides by r, which is undefined
/// at zero distance. Exact coincident particles are skipped by the same
/// guard.
pub fn compute_forces(
    particles: &mut ParticleSet,
    positions: &[Vec3],
    grid: &mut SpatialHashGrid,
    kernels: &SmoothingKernels,
    viscosity: f32,
    gravity: Vec3,
) {
    let count = particles.count;
    let h = kernels.radius();

    for i in 0..count {
        let pos_i = positions[i];
        let vel_i = particles.velocity[i];
        let pressure_i = particles.pressure[i];
        let density_i = particles.density[i];
        let mass_i = particles.mass[i];
        let mut acc = gravity;

        for &j in grid.query(pos_i) {
            let j = j as usize;
            if j == i {
                continue;
            }

            let diff = pos_i - positions[j];
            let r = diff.length();
            if r <= 0.0 || r >= h {
                continue;
            }

            let dir = diff / r;
            let mass_ratio = particles.mass[j] / mass_i;

            // Pressure gradient (spiky kernel). spiky_term is negative, so
            // subtracting pushes particle i away from high-pressure neighbors.
            let shared_pressure =
                (pressure_i + particles.pressure[j]) / (2.0 * density_i * particles.density[j]);
            acc -= dir * (kernels.spiky_term(r) * shared_pressure * mass_ratio);

            // Viscosity drag toward the neighbor's velocity.
            acc += (particles.velocity[j] - vel_i)
                * (kernels.viscosity_term(r) * viscosity * mass_ratio / particles.density[j]);
        }

        particles.acceleration[i] = acc;
    }
}
