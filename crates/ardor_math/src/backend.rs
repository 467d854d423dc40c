use crate::{PI, HALF_PI, TWO_PI};

/// Strategy used for the transcendental functions in hot paths.
///
/// The backend is a type parameter, so a build (or a single call site) always uses the same implementation.
pub trait MathBackend {
    fn sqrt(val: f64) -> f64;
    fn inverse_sqrt(val: f64) -> f64;
    fn sin(val: f64) -> f64;
    fn cos(val: f64) -> f64;
    fn tan(val: f64) -> f64;
    fn asin(val: f64) -> f64;
    fn acos(val: f64) -> f64;
    fn atan(val: f64) -> f64;
    fn atan2(y: f64, x: f64) -> f64;
    fn exp(val: f64) -> f64;
}

/// Backend forwarding to the standard library
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Accurate;

impl MathBackend for Accurate {
    #[inline(always)]
    fn sqrt(val: f64) -> f64 {
        val.sqrt()
    }

    #[inline(always)]
    fn inverse_sqrt(val: f64) -> f64 {
        1.0 / val.sqrt()
    }

    #[inline(always)]
    fn sin(val: f64) -> f64 {
        val.sin()
    }

    #[inline(always)]
    fn cos(val: f64) -> f64 {
        val.cos()
    }

    #[inline(always)]
    fn tan(val: f64) -> f64 {
        val.tan()
    }

    #[inline(always)]
    fn asin(val: f64) -> f64 {
        val.asin()
    }

    #[inline(always)]
    fn acos(val: f64) -> f64 {
        val.acos()
    }

    #[inline(always)]
    fn atan(val: f64) -> f64 {
        val.atan()
    }

    #[inline(always)]
    fn atan2(y: f64, x: f64) -> f64 {
        y.atan2(x)
    }

    #[inline(always)]
    fn exp(val: f64) -> f64 {
        val.exp()
    }
}

/// Approximate backend
///
/// The inverse square root uses the bit-level initial guess refined with Newton-Raphson steps,
/// sine and cosine use an odd polynomial after range reduction to `[-pi/2, pi/2]`.
/// Relative error is in the order of `1e-6`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Fast;

impl Fast {
    const INV_SQRT_MAGIC : u64 = 0x5FE6_EB50_C7B5_37A9;

    fn reduce_angle(val: f64) -> f64 {
        // into [-pi, pi)
        let mut x = (val + PI) % TWO_PI;
        if x < 0.0 {
            x += TWO_PI;
        }
        x -= PI;

        // mirror into [-pi/2, pi/2], sin(pi - x) == sin(x)
        if x > HALF_PI {
            PI - x
        } else if x < -HALF_PI {
            -PI - x
        } else {
            x
        }
    }
}

impl MathBackend for Fast {
    fn sqrt(val: f64) -> f64 {
        if val <= 0.0 || !val.is_finite() {
            return val.sqrt();
        }
        val * Self::inverse_sqrt(val)
    }

    fn inverse_sqrt(val: f64) -> f64 {
        if val <= 0.0 || !val.is_finite() {
            return 1.0 / val.sqrt();
        }

        let half = 0.5 * val;
        let mut y = f64::from_bits(Self::INV_SQRT_MAGIC - (val.to_bits() >> 1));
        y *= 1.5 - half * y * y;
        y *= 1.5 - half * y * y;
        y *= 1.5 - half * y * y;
        y
    }

    fn sin(val: f64) -> f64 {
        if !val.is_finite() {
            return f64::NAN;
        }

        let x = Self::reduce_angle(val);
        let x2 = x * x;
        x * (1.0 + x2 * (-1.0 / 6.0 + x2 * (1.0 / 120.0 + x2 * (-1.0 / 5040.0 + x2 * (1.0 / 362880.0 + x2 * (-1.0 / 39916800.0))))))
    }

    fn cos(val: f64) -> f64 {
        Self::sin(val + HALF_PI)
    }

    fn tan(val: f64) -> f64 {
        Self::sin(val) / Self::cos(val)
    }

    #[inline(always)]
    fn asin(val: f64) -> f64 {
        val.asin()
    }

    #[inline(always)]
    fn acos(val: f64) -> f64 {
        val.acos()
    }

    #[inline(always)]
    fn atan(val: f64) -> f64 {
        val.atan()
    }

    #[inline(always)]
    fn atan2(y: f64, x: f64) -> f64 {
        y.atan2(x)
    }

    #[inline(always)]
    fn exp(val: f64) -> f64 {
        val.exp()
    }
}

cfg_if::cfg_if!{
    if #[cfg(feature = "fast-math")] {
        /// Backend used by the library when none is given explicitly
        pub type DefaultBackend = Fast;
    } else {
        /// Backend used by the library when none is given explicitly
        pub type DefaultBackend = Accurate;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fast_inverse_sqrt() {
        for val in [0.001, 0.5, 1.0, 2.0, 9.0, 12345.678, 1e12] {
            let expected = 1.0 / f64::sqrt(val);
            let found = Fast::inverse_sqrt(val);
            assert!(((found - expected) / expected).abs() < 1e-6, "{val}: {found} != {expected}");
        }
        assert!(Fast::inverse_sqrt(0.0).is_infinite());
        assert_eq!(Fast::sqrt(0.0), 0.0);
        assert!((Fast::sqrt(16.0) - 4.0).abs() < 1e-6);
    }

    #[test]
    fn fast_trig() {
        let mut angle = -10.0;
        while angle < 10.0 {
            assert!((Fast::sin(angle) - angle.sin()).abs() < 1e-5, "sin({angle})");
            assert!((Fast::cos(angle) - angle.cos()).abs() < 1e-5, "cos({angle})");
            angle += 0.173;
        }
        assert!(Fast::sin(f64::INFINITY).is_nan());
    }

    #[test]
    fn accurate_matches_std() {
        assert_eq!(Accurate::inverse_sqrt(4.0), 0.5);
        assert_eq!(Accurate::atan2(1.0, 1.0), core::f64::consts::FRAC_PI_4);
    }
}
