use glam::Vec3;
use std::error::Error;
use std::fmt;

/// A construction or mutation argument was rejected before it could
/// poison the simulation with NaNs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvalidParameter {
    /// Name of the offending parameter.
    pub name: &'static str,
    /// The rejected value.
    pub value: f32,
}

impl fmt::Display for InvalidParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid parameter {}: {}", self.name, self.value)
    }
}

impl Error for InvalidParameter {}

/// Simulation parameters.
///
/// Tuned for water-like behavior by default. Scalar changes take effect on
/// the next `step`; changing the smoothing radius also recomputes the
/// kernel normalization constants and resizes the grid cells.
#[derive(Clone, Copy, Debug)]
pub struct SimParams {
    /// Kernel support radius (h) and grid cell size.
    pub smoothing_radius: f32,
    /// Reference density; densities are clamped to at least this value,
    /// which keeps pressure non-negative in sparse regions.
    pub reference_density: f32,
    /// Equation-of-state stiffness: pressure = k * (density - reference).
    pub pressure_constant: f32,
    /// Viscosity coefficient for the velocity-difference drag term.
    pub viscosity: f32,
    /// Constant external acceleration.
    pub gravity: Vec3,
    /// Enforce the x/z walls; the floor is always enforced.
    pub horizontal_walls: bool,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            smoothing_radius: 0.2,
            reference_density: 2000.0,
            pressure_constant: 20.0,
            viscosity: 0.02,
            gravity: Vec3::new(0.0, -9.8, 0.0),
            horizontal_walls: true,
        }
    }
}

impl SimParams {
    /// Reject parameter sets that would produce division by zero or NaN
    /// propagation in the passes.
    pub fn validate(&self) -> Result<(), InvalidParameter> {
        check_positive("smoothing_radius", self.smoothing_radius)?;
        check_positive("reference_density", self.reference_density)?;
        check_non_negative("pressure_constant", self.pressure_constant)?;
        check_non_negative("viscosity", self.viscosity)?;
        if !self.gravity.is_finite() {
            return Err(InvalidParameter {
                name: "gravity",
                value: self.gravity.length(),
            });
        }
        Ok(())
    }
}

pub(crate) fn check_positive(name: &'static str, value: f32) -> Result<(), InvalidParameter> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(InvalidParameter { name, value })
    }
}

pub(crate) fn check_non_negative(name: &'static str, value: f32) -> Result<(), InvalidParameter> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(InvalidParameter { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_valid() {
        assert!(SimParams::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_radius() {
        let mut params = SimParams::default();
        params.smoothing_radius = 0.0;
        let err = params.validate().unwrap_err();
        assert_eq!(err.name, "smoothing_radius");

        params.smoothing_radius = -0.2;
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_rejects_nan() {
        let mut params = SimParams::default();
        params.reference_density = f32::NAN;
        assert!(params.validate().is_err());

        let mut params = SimParams::default();
        params.gravity = Vec3::new(0.0, f32::INFINITY, 0.0);
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_rejects_negative_viscosity() {
        let mut params = SimParams::default();
        params.viscosity = -0.01;
        assert_eq!(params.validate().unwrap_err().name, "viscosity");
    }
}
