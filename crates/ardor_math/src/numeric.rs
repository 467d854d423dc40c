use crate::ALLOWED_DEVIANCE;

/// Approximate equality
pub trait ApproxEq : Sized {
    type Epsilon : Copy;

    /// Epsilon used by [`ApproxEq::is_approx_eq`]
    const DEFAULT_EPSILON : Self::Epsilon;

    /// Check if `self` is approximately equal to another value, given an `epsilon`
    fn is_close_to(self, rhs: Self, epsilon: Self::Epsilon) -> bool;

    /// Check if `self` is approximately equal to another value, using the type's default epsilon
    fn is_approx_eq(self, rhs: Self) -> bool {
        self.is_close_to(rhs, Self::DEFAULT_EPSILON)
    }
}

impl ApproxEq for f64 {
    type Epsilon = f64;
    const DEFAULT_EPSILON : f64 = ALLOWED_DEVIANCE;

    #[inline]
    fn is_close_to(self, rhs: Self, epsilon: f64) -> bool {
        (self - rhs).abs() <= epsilon
    }
}

impl ApproxEq for f32 {
    type Epsilon = f32;
    const DEFAULT_EPSILON : f32 = f32::EPSILON;

    #[inline]
    fn is_close_to(self, rhs: Self, epsilon: f32) -> bool {
        (self - rhs).abs() <= epsilon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars() {
        assert!(1.0f64.is_close_to(1.0 + 1e-9, 1e-8));
        assert!(!1.0f64.is_close_to(1.1, 1e-8));
        assert!(0.1f64.is_approx_eq(0.3 - 0.2));
        assert!(!f64::NAN.is_approx_eq(f64::NAN));
        assert!(0.5f32.is_approx_eq(0.5));
    }
}
