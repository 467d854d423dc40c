use core::fmt::Display;
use crate::*;

/// Side of a plane a point lies on
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Side {
    /// On the side the normal points away from
    Inside,
    /// On the side the normal points towards
    Outside,
    /// On the plane, within [`EPSILON`]
    Neither,
}

/// Plane defined by a unit normal and a constant, containing all points `p` for which `normal.dot(p) == constant`
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Plane {
    pub normal   : Vector3,
    pub constant : f64,
}

impl Plane {
    /// Plane spanning the x and z axis
    pub const XZ : Self = Self::new(Vector3::UNIT_Y, 0.0);
    /// Plane spanning the x and y axis
    pub const XY : Self = Self::new(Vector3::UNIT_Z, 0.0);
    /// Plane spanning the y and z axis
    pub const YZ : Self = Self::new(Vector3::UNIT_X, 0.0);

    /// Create a new plane
    #[inline]
    #[must_use]
    pub const fn new(normal: Vector3, constant: f64) -> Self {
        Self { normal, constant }
    }

    /// Create a plane through 3 points, the normal follows the counter-clockwise winding of `a`, `b` and `c`
    #[must_use]
    pub fn from_points(a: Vector3, b: Vector3, c: Vector3) -> Self {
        let normal = (b - a).cross(c - a).normalize();
        Self { normal, constant: normal.dot(a) }
    }

    /// Signed distance of a point to the plane, positive on the side the normal points towards
    #[inline]
    #[must_use]
    pub fn pseudo_distance(self, point: Vector3) -> f64 {
        self.normal.dot(point) - self.constant
    }

    /// Classify which side of the plane a point lies on
    #[must_use]
    pub fn which_side(self, point: Vector3) -> Side {
        let dist = self.pseudo_distance(point);
        if dist.abs() <= EPSILON {
            Side::Neither
        } else if dist < 0.0 {
            Side::Inside
        } else {
            Side::Outside
        }
    }

    /// Reflect a vector on the plane
    #[inline]
    #[must_use]
    pub fn reflect_vector(self, vec: Vector3) -> Vector3 {
        vec.reflect(self.normal)
    }

    /// Check if the plane contains no NaN or infinite values
    #[inline]
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.normal.is_valid() && self.constant.is_finite()
    }
}

impl Default for Plane {
    fn default() -> Self {
        Self::XZ
    }
}

impl ApproxEq for Plane {
    type Epsilon = f64;
    const DEFAULT_EPSILON : f64 = ALLOWED_DEVIANCE;

    fn is_close_to(self, rhs: Self, epsilon: f64) -> bool {
        self.normal.is_close_to(rhs.normal, epsilon) && self.constant.is_close_to(rhs.constant, epsilon)
    }
}

impl Display for Plane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("[Normal: {} - Constant: {}]", self.normal, self.constant))
    }
}
