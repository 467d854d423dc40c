use core::fmt::Display;
use crate::*;

impl Vector3 {
    pub const UNIT_X : Self = Self::new(1.0, 0.0, 0.0);
    pub const UNIT_Y : Self = Self::new(0.0, 1.0, 0.0);
    pub const UNIT_Z : Self = Self::new(0.0, 0.0, 1.0);
    pub const NEG_UNIT_X : Self = Self::new(-1.0, 0.0, 0.0);
    pub const NEG_UNIT_Y : Self = Self::new(0.0, -1.0, 0.0);
    pub const NEG_UNIT_Z : Self = Self::new(0.0, 0.0, -1.0);

    /// Extend a `Vector3` to a `Vector4`
    #[inline]
    #[must_use]
    pub fn extend(self, w: f64) -> Vector4 {
        Vector4 { x: self.x, y: self.y, z: self.z, w }
    }

    /// Shrink a `Vector3` to a `Vector2`
    #[inline]
    #[must_use]
    pub fn shrink(self) -> Vector2 {
        Vector2 { x: self.x, y: self.y }
    }

    /// Calculate the cross product of 2 vectors
    #[inline]
    #[must_use]
    pub fn cross(self, rhs: Self) -> Self {
        Vector3 { x: self.y * rhs.z - self.z * rhs.y,
                  y: self.z * rhs.x - self.x * rhs.z,
                  z: self.x * rhs.y - self.y * rhs.x }
    }

    /// Calculate the cross product of 2 vectors in place
    #[inline]
    pub fn cross_local(&mut self, rhs: Self) -> &mut Self {
        *self = self.cross(rhs);
        self
    }

    /// Unsigned angle between 2 vectors, in `[0, pi]`
    #[must_use]
    pub fn smallest_angle_between(self, other: Self) -> f64 {
        let len_prod = (self.length_squared() * other.length_squared()).sqrt();
        if len_prod <= EPSILON {
            return 0.0;
        }
        clamp(self.dot(other) / len_prod, -1.0, 1.0).acos()
    }

    /// Reflect a vector on a 'surface' with a unit normal
    #[inline]
    #[must_use]
    pub fn reflect(self, normal: Self) -> Self {
        self - normal * (2.0 * self.dot(normal))
    }
}

impl Display for Vector3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("({}, {}, {})", self.x, self.y, self.z))
    }
}
