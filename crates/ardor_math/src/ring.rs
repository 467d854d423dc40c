use core::fmt::Display;
use rand::Rng;
use crate::*;

/// Flat ring (annulus) around `center`, lying in the plane perpendicular to `up`
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Ring {
    pub center       : Vector3,
    pub up           : Vector3,
    pub inner_radius : f64,
    pub outer_radius : f64,
}

impl Ring {
    /// Create a new ring
    #[inline]
    #[must_use]
    pub const fn new(center: Vector3, up: Vector3, inner_radius: f64, outer_radius: f64) -> Self {
        Self { center, up, inner_radius, outer_radius }
    }

    /// Get a random point on the ring, uniformly distributed over its area
    #[must_use]
    pub fn random<R: Rng + ?Sized>(self, rng: &mut R) -> Vector3 {
        let inner2 = self.inner_radius * self.inner_radius;
        let outer2 = self.outer_radius * self.outer_radius;
        let radius = DefaultBackend::sqrt(inner2 + rng.gen::<f64>() * (outer2 - inner2));
        let theta = rng.gen::<f64>() * TWO_PI;

        let (b1, b2) = self.basis();
        self.center + b1 * (radius * DefaultBackend::cos(theta)) + b2 * (radius * DefaultBackend::sin(theta))
    }

    /// 2 unit vectors spanning the plane of the ring
    fn basis(self) -> (Vector3, Vector3) {
        let mut b1 = self.up.cross(Vector3::UNIT_X);
        if b1.length_squared() < EPSILON {
            b1 = self.up.cross(Vector3::UNIT_Y);
        }
        let b1 = b1.normalize();
        (b1, self.up.cross(b1))
    }

    /// Check if the ring contains no NaN or infinite values
    #[inline]
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.center.is_valid() && self.up.is_valid() && self.inner_radius.is_finite() && self.outer_radius.is_finite()
    }
}

impl Default for Ring {
    fn default() -> Self {
        Self::new(Vector3::ZERO, Vector3::UNIT_Y, 0.0, 1.0)
    }
}

impl Display for Ring {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("[Center: {} - Up: {} - Inner radius: {} - Outer radius: {}]",
            self.center, self.up, self.inner_radius, self.outer_radius))
    }
}
