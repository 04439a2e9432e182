use std::f32::consts::PI;

/// Cached SPH smoothing kernel normalization constants.
///
/// The poly6 kernel weights density contributions, the spiky kernel
/// gradient weights pressure forces, and the viscosity kernel Laplacian
/// weights viscous drag. All three constants depend only on the smoothing
/// radius `h` and are recomputed whenever it changes.
#[derive(Clone, Copy, Debug)]
pub struct SmoothingKernels {
    h: f32,
    h_sq: f32,
    /// 315 / (64 * PI * h^9)
    poly6_norm: f32,
    /// -45 / (PI * h^6); negative, the gradient points toward the neighbor
    spiky_norm: f32,
    /// 45 / (PI * h^6)
    visc_norm: f32,
}

impl SmoothingKernels {
    pub fn new(h: f32) -> Self {
        let mut k = Self {
            h: 0.0,
            h_sq: 0.0,
            poly6_norm: 0.0,
            spiky_norm: 0.0,
            visc_norm: 0.0,
        };
        k.set_radius(h);
        k
    }

    /// Recompute all normalization constants for a new smoothing radius.
    pub fn set_radius(&mut self, h: f32) {
        let h2 = h * h;
        let h6 = h2 * h2 * h2;
        let h9 = h6 * h2 * h;
        self.h = h;
        self.h_sq = h2;
        self.poly6_norm = 315.0 / (64.0 * PI * h9);
        self.spiky_norm = -45.0 / (PI * h6);
        self.visc_norm = 45.0 / (PI * h6);
    }

    pub fn radius(&self) -> f32 {
        self.h
    }

    pub fn radius_sq(&self) -> f32 {
        self.h_sq
    }

    /// Poly6 density weight `315/(64 PI h^9) * (h^2 - r^2)^3` for `r^2 < h^2`,
    /// else 0. Well-defined at r = 0, where it takes its peak value.
    #[inline]
    pub fn poly6(&self, r_sq: f32) -> f32 {
        if r_sq >= self.h_sq {
            return 0.0;
        }
        let diff = self.h_sq - r_sq;
        self.poly6_norm * diff * diff * diff
    }

    /// Spiky kernel gradient magnitude `-45/(PI h^6) * (h - r)^2` for
    /// `0 < r < h`, else 0. Negative by construction; callers subtract the
    /// term along the b-to-a unit vector to get repulsion.
    #[inline]
    pub fn spiky_term(&self, r: f32) -> f32 {
        if r <= 0.0 || r >= self.h {
            return 0.0;
        }
        let diff = self.h - r;
        self.spiky_norm * diff * diff
    }

    /// Viscosity kernel Laplacian `45/(PI h^6) * (h - r)` for `0 < r < h`,
    /// else 0.
    #[inline]
    pub fn viscosity_term(&self, r: f32) -> f32 {
        if r <= 0.0 || r >= self.h {
            return 0.0;
        }
        self.visc_norm * (self.h - r)
    }
}
