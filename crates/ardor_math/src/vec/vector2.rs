use core::fmt::Display;
use crate::*;

impl Vector2 {
    pub const UNIT_X : Self = Self::new(1.0, 0.0);
    pub const UNIT_Y : Self = Self::new(0.0, 1.0);
    pub const NEG_UNIT_X : Self = Self::new(-1.0, 0.0);
    pub const NEG_UNIT_Y : Self = Self::new(0.0, -1.0);

    /// Extend a `Vector2` to a `Vector3`
    #[inline]
    #[must_use]
    pub fn extend(self, z: f64) -> Vector3 {
        Vector3 { x: self.x, y: self.y, z }
    }

    /// Rotate the vector around the origin, counter-clockwise unless `clockwise` is set
    #[must_use]
    pub fn rotate_around_origin(self, angle: f64, clockwise: bool) -> Self {
        let angle = if clockwise { -angle } else { angle };
        let (sin, cos) = (DefaultBackend::sin(angle), DefaultBackend::cos(angle));
        Self { x: cos * self.x - sin * self.y,
               y: sin * self.x + cos * self.y }
    }

    /// Rotate the vector around the origin in place
    #[inline]
    pub fn rotate_around_origin_local(&mut self, angle: f64, clockwise: bool) -> &mut Self {
        *self = self.rotate_around_origin(angle, clockwise);
        self
    }

    /// Signed angle to rotate `self` onto `other`, in `(-2pi, 2pi)`
    #[must_use]
    pub fn angle_between(self, other: Self) -> f64 {
        other.y.atan2(other.x) - self.y.atan2(self.x)
    }

    /// Angle of the vector relative to the positive x-axis, measured clockwise
    #[inline]
    #[must_use]
    pub fn polar_angle(self) -> f64 {
        -self.y.atan2(self.x)
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
}

impl Display for Vector2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("({}, {})", self.x, self.y))
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn rotate() {
        let v = Vector2::UNIT_X.rotate_around_origin(HALF_PI, false);
        assert!(v.is_close_to(Vector2::UNIT_Y, 1e-6));

        let mut v = Vector2::UNIT_X;
        v.rotate_around_origin_local(HALF_PI, true);
        assert!(v.is_close_to(Vector2::NEG_UNIT_Y, 1e-6));
    }

    #[test]
    fn angles() {
        assert!(Vector2::UNIT_X.angle_between(Vector2::UNIT_Y).is_close_to(HALF_PI, 1e-12));
        assert!(Vector2::UNIT_Y.angle_between(Vector2::UNIT_X).is_close_to(-HALF_PI, 1e-12));
        assert!(Vector2::new(0.0, 2.0).polar_angle().is_close_to(-HALF_PI, 1e-12));
        assert!(Vector2::new(3.0, 0.0).smallest_angle_between(Vector2::new(-1.0, 0.0)).is_close_to(PI, 1e-12));
        assert_eq!(Vector2::ZERO.smallest_angle_between(Vector2::UNIT_X), 0.0);
    }

    #[test]
    fn value_access() {
        let mut v = Vector2::new(1.0, 2.0);
        assert_eq!(v.value(1), Ok(2.0));
        assert!(v.value(2).is_err());
        assert!(v.set_value(2, 5.0).is_err());
        assert_eq!(v, Vector2::new(1.0, 2.0));
        assert_eq!(v.set_value(0, 5.0), Ok(()));
        assert_eq!(v, Vector2::new(5.0, 2.0));
    }

    #[test]
    fn display() {
        assert_eq!(Vector2::new(1.5, -2.0).to_string(), "(1.5, -2)");
    }
}
