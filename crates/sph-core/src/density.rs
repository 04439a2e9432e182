use glam::Vec3;

use crate::grid::SpatialHashGrid;
use crate::kernels::SmoothingKernels;
use crate::particle::ParticleSet;

/// Compute smoothed density and equation-of-state pressure for every
/// active particle.
///
/// Density is the poly6-weighted sum over all candidates within the
/// smoothing radius. The self term (r = 0) is included deliberately: the
/// poly6 kernel peaks there and an isolated particle still has the
/// density of its own smeared mass. The result is clamped to the
/// reference density, which keeps pressure non-negative in sparse
/// regions and avoids 1/density blowup in the force pass.
pub fn compute_density_pressure(
    particles: &mut ParticleSet,
    positions: &[Vec3],
    grid: &mut SpatialHashGrid,
    kernels: &SmoothingKernels,
    reference_density: f32,
    pressure_constant: f32,
) {
    let count = particles.count;

    for i in 0..count {
        let pos_i = positions[i];
        let mut rho = 0.0_f32;

        for &j in grid.query(pos_i) {
            let r_sq = (pos_i - positions[j as usize]).length_squared();
            // poly6 is zero at and beyond the radius, so candidates outside
            // the true kernel support contribute nothing.
            rho += kernels.poly6(r_sq);
        }

        let rho = rho.max(reference_density);
        particles.density[i] = rho;
        particles.pressure[i] = pressure_constant * (rho - reference_density);
    }
}
