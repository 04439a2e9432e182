use glam::Vec3;

/// Axis-aligned planar container with reflect-and-damp collision response.
///
/// Each axis is handled independently after integration: the overshoot
/// past a bound is reflected back scaled by `1 + restitution`, and the
/// velocity component is inverted and damped by `-restitution`. This is a
/// first-order approximation of an inelastic wall, not continuous-time
/// collision detection; a fast particle can tunnel through a wall within
/// one tick, which is an accepted limitation.
#[derive(Clone, Copy, Debug)]
pub struct BoundaryBox {
    /// Lower bound on y, always enforced.
    pub floor_y: f32,
    /// Walls at +/- this value on x, enforced only when requested.
    pub wall_x: f32,
    /// Walls at +/- this value on z, enforced only when requested.
    pub wall_z: f32,
    /// Collision elasticity in [0, 1).
    pub restitution: f32,
}

impl Default for BoundaryBox {
    fn default() -> Self {
        Self {
            floor_y: -0.3,
            wall_x: 0.25,
            wall_z: 0.65,
            restitution: 0.4,
        }
    }
}

impl BoundaryBox {
    /// Apply collision response to one particle, per axis.
    ///
    /// When `horizontal_walls` is false, particles pass through the x/z
    /// walls freely; the floor is always enforced.
    pub fn apply(&self, position: &mut Vec3, velocity: &mut Vec3, horizontal_walls: bool) {
        reflect_min(&mut position.y, &mut velocity.y, self.floor_y, self.restitution);

        if horizontal_walls {
            reflect_min(&mut position.x, &mut velocity.x, -self.wall_x, self.restitution);
            reflect_max(&mut position.x, &mut velocity.x, self.wall_x, self.restitution);
            reflect_min(&mut position.z, &mut velocity.z, -self.wall_z, self.restitution);
            reflect_max(&mut position.z, &mut velocity.z, self.wall_z, self.restitution);
        }
    }
}

/// Reflect the overshoot below `bound` back across it, damping velocity.
#[inline]
fn reflect_min(p: &mut f32, v: &mut f32, bound: f32, restitution: f32) {
    if *p < bound {
        *p += (1.0 + restitution) * (bound - *p);
        *v *= -restitution;
    }
}

/// Reflect the overshoot above `bound` back across it, damping velocity.
#[inline]
fn reflect_max(p: &mut f32, v: &mut f32, bound: f32, restitution: f32) {
    if *p > bound {
        *p += (1.0 + restitution) * (bound - *p);
        *v *= -restitution;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_reflects_and_damps() {
        let bounds = BoundaryBox::default();
        let mut pos = Vec3::new(0.0, -0.5, 0.0);
        let mut vel = Vec3::new(0.0, -1.0, 0.0);

        bounds.apply(&mut pos, &mut vel, true);

        // Overshoot of 0.2 reflected with factor 1.4: -0.5 + 0.28 = -0.22
        assert!((pos.y - -0.22).abs() < 1e-6, "pos.y = {}", pos.y);
        assert!((vel.y - 0.4).abs() < 1e-6, "vel.y = {}", vel.y);
    }

    #[test]
    fn test_inside_box_untouched() {
        let bounds = BoundaryBox::default();
        let mut pos = Vec3::new(0.1, 0.0, -0.3);
        let mut vel = Vec3::new(1.0, -2.0, 3.0);
        let (pos0, vel0) = (pos, vel);

        bounds.apply(&mut pos, &mut vel, true);

        assert_eq!(pos, pos0);
        assert_eq!(vel, vel0);
    }

    #[test]
    fn test_walls_disabled_pass_through() {
        let bounds = BoundaryBox::default();
        let mut pos = Vec3::new(1.0, 0.0, -2.0);
        let mut vel = Vec3::new(1.0, 0.0, -1.0);

        bounds.apply(&mut pos, &mut vel, false);

        assert_eq!(pos, Vec3::new(1.0, 0.0, -2.0), "x/z should pass freely");
        assert_eq!(vel, Vec3::new(1.0, 0.0, -1.0));
    }

    #[test]
    fn test_both_wall_signs() {
        let bounds = BoundaryBox::default();

        let mut pos = Vec3::new(0.35, 0.0, 0.0);
        let mut vel = Vec3::new(2.0, 0.0, 0.0);
        bounds.apply(&mut pos, &mut vel, true);
        assert!(pos.x <= 0.25, "upper x wall: pos.x = {}", pos.x);
        assert!(vel.x < 0.0, "upper x wall should flip velocity");

        let mut pos = Vec3::new(0.0, 0.0, -0.7);
        let mut vel = Vec3::new(0.0, 0.0, -1.0);
        bounds.apply(&mut pos, &mut vel, true);
        assert!(pos.z >= -0.65, "lower z wall: pos.z = {}", pos.z);
        assert!(vel.z > 0.0, "lower z wall should flip velocity");
    }
}
