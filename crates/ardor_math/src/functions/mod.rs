//! Scalar functions over 3D space
//!
//! A [`Function3D`] maps a position to a single value. Noise sources such as [`SimplexNoise`] and [`VoronoiFunction3D`]
//! can be shaped by chaining combinators, each of which wraps the source in a new function:
//!
//! ```
//! use ardor_math::{Function3D, SimplexNoise};
//!
//! let terrain = SimplexNoise::new()
//!     .scale_input(0.01, 0.01, 0.01)
//!     .remap(-1.0, 1.0, 0.0, 255.0);
//! let height = terrain.eval(10.0, 0.0, 20.0);
//! assert!((0.0..=255.0).contains(&height));
//! ```

use crate::*;

mod combinators;
pub use combinators::*;

mod simplex;
pub use simplex::*;

mod voronoi;
pub use voronoi::*;

/// A function that maps a point in 3D space to a value
pub trait Function3D {
    /// Evaluate the function at the given position
    fn eval(&self, x: f64, y: f64, z: f64) -> f64;

    /// Evaluate the function at the given position
    #[inline]
    fn eval_at(&self, pos: Vector3) -> f64 {
        self.eval(pos.x, pos.y, pos.z)
    }

    /// Multiply the output by `scale`, then add `bias`
    fn scale_bias(self, scale: f64, bias: f64) -> ScaleBias<Self>
    where
        Self: Sized,
    {
        ScaleBias { source: self, scale, bias }
    }

    /// Take the absolute value of the output
    fn abs(self) -> Abs<Self>
    where
        Self: Sized,
    {
        Abs { source: self }
    }

    /// Clamp the output to `[min, max]`
    fn clamp(self, min: f64, max: f64) -> Clamp<Self>
    where
        Self: Sized,
    {
        Clamp { source: self, min, max }
    }

    /// Negate the output
    fn invert(self) -> Invert<Self>
    where
        Self: Sized,
    {
        Invert { source: self }
    }

    /// Add the output of another function
    fn add<F: Function3D>(self, other: F) -> Add<Self, F>
    where
        Self: Sized,
    {
        Add { a: self, b: other }
    }

    /// Multiply by the output of another function
    fn multiply<F: Function3D>(self, other: F) -> Multiply<Self, F>
    where
        Self: Sized,
    {
        Multiply { a: self, b: other }
    }

    /// Take the smallest of this and another function's output
    fn min<F: Function3D>(self, other: F) -> Min<Self, F>
    where
        Self: Sized,
    {
        Min { a: self, b: other }
    }

    /// Take the largest of this and another function's output
    fn max<F: Function3D>(self, other: F) -> Max<Self, F>
    where
        Self: Sized,
    {
        Max { a: self, b: other }
    }

    /// Interpolate from this function's output to `other`'s, using the output of `amount` as the percentage
    fn lerp<F: Function3D, A: Function3D>(self, other: F, amount: A) -> Lerp<Self, F, A>
    where
        Self: Sized,
    {
        Lerp { a: self, b: other, amount }
    }

    /// Rotate the input position before evaluating
    fn rotate_input(self, rotation: Matrix3) -> RotateInput<Self>
    where
        Self: Sized,
    {
        RotateInput { source: self, rotation }
    }

    /// Scale the input position before evaluating
    fn scale_input(self, x: f64, y: f64, z: f64) -> ScaleInput<Self>
    where
        Self: Sized,
    {
        ScaleInput { source: self, scale: Vector3::new(x, y, z) }
    }

    /// Translate the input position before evaluating
    fn translate_input(self, x: f64, y: f64, z: f64) -> TranslateInput<Self>
    where
        Self: Sized,
    {
        TranslateInput { source: self, offset: Vector3::new(x, y, z) }
    }

    /// Linearly map the output from `[old_low, old_high]` to `[new_low, new_high]`
    ///
    /// Values outside of the old range are extrapolated, an empty old range maps everything to `new_low`.
    fn remap(self, old_low: f64, old_high: f64, new_low: f64, new_high: f64) -> Remap<Self>
    where
        Self: Sized,
    {
        Remap { source: self, old_low, old_high, new_low, new_high }
    }
}

impl<T: Function3D + ?Sized> Function3D for &T {
    #[inline]
    fn eval(&self, x: f64, y: f64, z: f64) -> f64 {
        (**self).eval(x, y, z)
    }
}

impl<T: Function3D + ?Sized> Function3D for Box<T> {
    #[inline]
    fn eval(&self, x: f64, y: f64, z: f64) -> f64 {
        (**self).eval(x, y, z)
    }
}

/// Function that always returns the same value
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Constant(pub f64);

impl Function3D for Constant {
    #[inline]
    fn eval(&self, _x: f64, _y: f64, _z: f64) -> f64 {
        self.0
    }
}

/// Function backed by a closure, see [`from_fn`]
#[derive(Clone, Copy)]
pub struct FromFn<F>(F);

impl<F: Fn(f64, f64, f64) -> f64> Function3D for FromFn<F> {
    #[inline]
    fn eval(&self, x: f64, y: f64, z: f64) -> f64 {
        (self.0)(x, y, z)
    }
}

/// Create a function from a closure
#[inline]
#[must_use]
pub fn from_fn<F: Fn(f64, f64, f64) -> f64>(f: F) -> FromFn<F> {
    FromFn(f)
}

#[cfg(test)]
mod tests {
    use crate::*;
    use crate::functions::*;

    #[test]
    fn constant_and_closure() {
        assert_eq!(Constant(2.5).eval(1.0, -4.0, 9.0), 2.5);

        let sum = from_fn(|x, y, z| x + y + z);
        assert_eq!(sum.eval(1.0, 2.0, 3.0), 6.0);
        assert_eq!(sum.eval_at(Vector3::new(-1.0, 0.5, 0.5)), 0.0);
    }

    #[test]
    fn boxed_and_borrowed() {
        let boxed : Box<dyn Function3D> = Box::new(Constant(3.0));
        assert_eq!(boxed.eval(0.0, 0.0, 0.0), 3.0);

        let doubled = boxed.scale_bias(2.0, 0.0);
        assert_eq!(doubled.eval(0.0, 0.0, 0.0), 6.0);

        let source = from_fn(|x, _, _| x);
        let shifted = (&source).translate_input(1.0, 0.0, 0.0);
        assert_eq!(shifted.eval(1.0, 0.0, 0.0), 2.0);
        assert_eq!(source.eval(1.0, 0.0, 0.0), 1.0);
    }
}
