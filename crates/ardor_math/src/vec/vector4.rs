use core::fmt::Display;
use crate::*;

impl Vector4 {
    pub const UNIT_X : Self = Self::new(1.0, 0.0, 0.0, 0.0);
    pub const UNIT_Y : Self = Self::new(0.0, 1.0, 0.0, 0.0);
    pub const UNIT_Z : Self = Self::new(0.0, 0.0, 1.0, 0.0);
    pub const UNIT_W : Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const NEG_UNIT_X : Self = Self::new(-1.0, 0.0, 0.0, 0.0);
    pub const NEG_UNIT_Y : Self = Self::new(0.0, -1.0, 0.0, 0.0);
    pub const NEG_UNIT_Z : Self = Self::new(0.0, 0.0, -1.0, 0.0);
    pub const NEG_UNIT_W : Self = Self::new(0.0, 0.0, 0.0, -1.0);

    /// Shrink a `Vector4` to a `Vector3`, dropping `w`
    #[inline]
    #[must_use]
    pub fn shrink(self) -> Vector3 {
        Vector3 { x: self.x, y: self.y, z: self.z }
    }
}

impl Display for Vector4 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("({}, {}, {}, {})", self.x, self.y, self.z, self.w))
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn basics() {
        let v = Vector4::new(1.0, 2.0, 2.0, 4.0);
        assert_eq!(v.length(), 5.0);
        assert_eq!(v.dot(Vector4::UNIT_W), 4.0);
        assert_eq!(v.shrink(), Vector3::new(1.0, 2.0, 2.0));
        assert_eq!(Vector3::new(1.0, 2.0, 2.0).extend(4.0), v);
        assert!(v.normalize().is_close_to(v / 5.0, 1e-9));
    }

    #[test]
    fn invalid_index_does_not_mutate() {
        let mut v = Vector4::new(1.0, 2.0, 3.0, 4.0);
        assert!(v.set_value(4, 10.0).is_err());
        assert!(v.value(4).is_err());
        assert_eq!(v, Vector4::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(v.value(3), Ok(4.0));
    }

    #[test]
    fn finite() {
        assert!(Vector4::ONE.is_finite());
        assert!(!Vector4::new(0.0, 0.0, 0.0, f64::INFINITY).is_finite());
    }
}
