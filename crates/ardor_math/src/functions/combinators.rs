use crate::*;
use super::Function3D;

/// Output multiplied by a scale, then offset by a bias, see [`Function3D::scale_bias`]
#[derive(Clone, Copy, Debug)]
pub struct ScaleBias<F> {
    pub(super) source : F,
    pub(super) scale  : f64,
    pub(super) bias   : f64,
}

impl<F: Function3D> Function3D for ScaleBias<F> {
    fn eval(&self, x: f64, y: f64, z: f64) -> f64 {
        self.source.eval(x, y, z) * self.scale + self.bias
    }
}

/// Absolute value of the output, see [`Function3D::abs`]
#[derive(Clone, Copy, Debug)]
pub struct Abs<F> {
    pub(super) source : F,
}

impl<F: Function3D> Function3D for Abs<F> {
    fn eval(&self, x: f64, y: f64, z: f64) -> f64 {
        self.source.eval(x, y, z).abs()
    }
}

/// Output clamped to a range, see [`Function3D::clamp`]
#[derive(Clone, Copy, Debug)]
pub struct Clamp<F> {
    pub(super) source : F,
    pub(super) min    : f64,
    pub(super) max    : f64,
}

impl<F: Function3D> Function3D for Clamp<F> {
    fn eval(&self, x: f64, y: f64, z: f64) -> f64 {
        clamp(self.source.eval(x, y, z), self.min, self.max)
    }
}

/// Negated output, see [`Function3D::invert`]
#[derive(Clone, Copy, Debug)]
pub struct Invert<F> {
    pub(super) source : F,
}

impl<F: Function3D> Function3D for Invert<F> {
    fn eval(&self, x: f64, y: f64, z: f64) -> f64 {
        -self.source.eval(x, y, z)
    }
}

//------------------------------------------------------------------------------------------------------------------------------

/// Sum of 2 functions, see [`Function3D::add`]
#[derive(Clone, Copy, Debug)]
pub struct Add<A, B> {
    pub(super) a : A,
    pub(super) b : B,
}

impl<A: Function3D, B: Function3D> Function3D for Add<A, B> {
    fn eval(&self, x: f64, y: f64, z: f64) -> f64 {
        self.a.eval(x, y, z) + self.b.eval(x, y, z)
    }
}

/// Product of 2 functions, see [`Function3D::multiply`]
#[derive(Clone, Copy, Debug)]
pub struct Multiply<A, B> {
    pub(super) a : A,
    pub(super) b : B,
}

impl<A: Function3D, B: Function3D> Function3D for Multiply<A, B> {
    fn eval(&self, x: f64, y: f64, z: f64) -> f64 {
        self.a.eval(x, y, z) * self.b.eval(x, y, z)
    }
}

/// Smallest output of 2 functions, see [`Function3D::min`]
#[derive(Clone, Copy, Debug)]
pub struct Min<A, B> {
    pub(super) a : A,
    pub(super) b : B,
}

impl<A: Function3D, B: Function3D> Function3D for Min<A, B> {
    fn eval(&self, x: f64, y: f64, z: f64) -> f64 {
        self.a.eval(x, y, z).min(self.b.eval(x, y, z))
    }
}

/// Largest output of 2 functions, see [`Function3D::max`]
#[derive(Clone, Copy, Debug)]
pub struct Max<A, B> {
    pub(super) a : A,
    pub(super) b : B,
}

impl<A: Function3D, B: Function3D> Function3D for Max<A, B> {
    fn eval(&self, x: f64, y: f64, z: f64) -> f64 {
        self.a.eval(x, y, z).max(self.b.eval(x, y, z))
    }
}

/// Interpolation between 2 functions driven by a third, see [`Function3D::lerp`]
#[derive(Clone, Copy, Debug)]
pub struct Lerp<A, B, T> {
    pub(super) a      : A,
    pub(super) b      : B,
    pub(super) amount : T,
}

impl<A: Function3D, B: Function3D, T: Function3D> Function3D for Lerp<A, B, T> {
    fn eval(&self, x: f64, y: f64, z: f64) -> f64 {
        lerp(self.amount.eval(x, y, z), self.a.eval(x, y, z), self.b.eval(x, y, z))
    }
}

//------------------------------------------------------------------------------------------------------------------------------

/// Function evaluated at a rotated position, see [`Function3D::rotate_input`]
#[derive(Clone, Copy, Debug)]
pub struct RotateInput<F> {
    pub(super) source   : F,
    pub(super) rotation : Matrix3,
}

impl<F: Function3D> Function3D for RotateInput<F> {
    fn eval(&self, x: f64, y: f64, z: f64) -> f64 {
        self.source.eval_at(self.rotation.apply_post(Vector3::new(x, y, z)))
    }
}

/// Function evaluated at a scaled position, see [`Function3D::scale_input`]
#[derive(Clone, Copy, Debug)]
pub struct ScaleInput<F> {
    pub(super) source : F,
    pub(super) scale  : Vector3,
}

impl<F: Function3D> Function3D for ScaleInput<F> {
    fn eval(&self, x: f64, y: f64, z: f64) -> f64 {
        self.source.eval(x * self.scale.x, y * self.scale.y, z * self.scale.z)
    }
}

/// Function evaluated at a translated position, see [`Function3D::translate_input`]
#[derive(Clone, Copy, Debug)]
pub struct TranslateInput<F> {
    pub(super) source : F,
    pub(super) offset : Vector3,
}

impl<F: Function3D> Function3D for TranslateInput<F> {
    fn eval(&self, x: f64, y: f64, z: f64) -> f64 {
        self.source.eval(x + self.offset.x, y + self.offset.y, z + self.offset.z)
    }
}

/// Output mapped from one range onto another, see [`Function3D::remap`]
#[derive(Clone, Copy, Debug)]
pub struct Remap<F> {
    pub(super) source   : F,
    pub(super) old_low  : f64,
    pub(super) old_high : f64,
    pub(super) new_low  : f64,
    pub(super) new_high : f64,
}

impl<F: Function3D> Function3D for Remap<F> {
    fn eval(&self, x: f64, y: f64, z: f64) -> f64 {
        let old_range = self.old_high - self.old_low;
        if old_range == 0.0 {
            return self.new_low;
        }
        (self.source.eval(x, y, z) - self.old_low) / old_range * (self.new_high - self.new_low) + self.new_low
    }
}
