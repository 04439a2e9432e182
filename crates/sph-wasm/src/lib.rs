use sph_core::solver::FluidSolver;
use wasm_bindgen::prelude::*;

/// Browser-facing wrapper around the SPH solver.
///
/// The renderer reads particle positions directly out of wasm linear
/// memory through the pointer/length pair, so no per-frame copy crosses
/// the JS boundary.
#[wasm_bindgen]
pub struct FluidWorld {
    solver: FluidSolver,
}

#[wasm_bindgen]
impl FluidWorld {
    #[wasm_bindgen(constructor)]
    pub fn new(particle_count: usize) -> FluidWorld {
        web_sys::console::log_1(
            &format!("WASM FluidWorld created: {} particles", particle_count).into(),
        );

        FluidWorld {
            solver: FluidSolver::new(particle_count),
        }
    }

    /// Advance the simulation by `dt` seconds. Returns the measured step
    /// time in milliseconds.
    #[wasm_bindgen]
    pub fn step(&mut self, dt: f32) -> f32 {
        let start = js_sys::Date::now();
        self.solver.step(dt);
        let elapsed = js_sys::Date::now() - start;
        elapsed as f32
    }

    /// Pointer to the flat position buffer (3 floats per particle).
    ///
    /// Valid until the next call that grows wasm memory; re-fetch after
    /// any allocation-heavy call.
    #[wasm_bindgen]
    pub fn positions_ptr(&self) -> *const f32 {
        self.solver.positions().as_ptr()
    }

    /// Length of the flat position buffer in floats (3 * particle count).
    #[wasm_bindgen]
    pub fn positions_len(&self) -> usize {
        self.solver.positions().len()
    }

    #[wasm_bindgen]
    pub fn particle_count(&self) -> usize {
        self.solver.particle_count()
    }

    #[wasm_bindgen]
    pub fn smoothing_radius(&self) -> f32 {
        self.solver.smoothing_radius()
    }

    /// Set the scalar fluid parameters. Returns false (and changes
    /// nothing for the rejected value) if any value is invalid.
    #[wasm_bindgen]
    pub fn set_fluid_config(
        &mut self,
        reference_density: f32,
        pressure_constant: f32,
        viscosity: f32,
        smoothing_radius: f32,
    ) -> bool {
        let mut ok = self.solver.set_reference_density(reference_density).is_ok();
        ok &= self.solver.set_pressure_constant(pressure_constant).is_ok();
        ok &= self.solver.set_viscosity(viscosity).is_ok();
        ok &= self.solver.set_smoothing_radius(smoothing_radius).is_ok();
        ok
    }

    #[wasm_bindgen]
    pub fn set_gravity(&mut self, x: f32, y: f32, z: f32) {
        self.solver.set_gravity(glam::Vec3::new(x, y, z));
    }

    #[wasm_bindgen]
    pub fn set_horizontal_walls(&mut self, enabled: bool) {
        self.solver.set_horizontal_walls(enabled);
    }

    #[wasm_bindgen]
    pub fn set_active_count(&mut self, count: usize) -> bool {
        self.solver.set_active_count(count).is_ok()
    }

    #[wasm_bindgen]
    pub fn reinitialize(&mut self) {
        self.solver.reinitialize();
    }
}
