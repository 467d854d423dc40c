use core::fmt::Display;
use rand::Rng;
use crate::*;

/// Infinite 3D line
///
/// Distances are only metrically correct when `dir` has unit length.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Line3 {
    pub orig : Vector3,
    pub dir  : Vector3,
}

impl Line3 {
    /// Create a new line
    #[inline]
    #[must_use]
    pub const fn new(orig: Vector3, dir: Vector3) -> Self {
        Self { orig, dir }
    }

    /// Get the point at a given distance along the line
    #[inline]
    #[must_use]
    pub fn point_at(self, dist: f64) -> Vector3 {
        self.orig + self.dir * dist
    }

    /// Squared distance from the line to a point, together with the closest point on the line
    #[must_use]
    pub fn distance_squared_with_closest(self, point: Vector3) -> (f64, Vector3) {
        let t0 = self.dir.dot(point - self.orig);
        let closest = self.point_at(t0);
        (point.distance_squared(closest), closest)
    }

    /// Squared distance from the line to a point
    #[inline]
    #[must_use]
    pub fn distance_squared(self, point: Vector3) -> f64 {
        self.distance_squared_with_closest(point).0
    }

    /// Distance from the line to a point
    #[inline]
    #[must_use]
    pub fn distance(self, point: Vector3) -> f64 {
        self.distance_squared(point).sqrt()
    }

    /// Check if both the origin and direction only contain finite values
    #[inline]
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.orig.is_valid() && self.dir.is_valid()
    }
}

impl Default for Line3 {
    fn default() -> Self {
        Self::new(Vector3::ZERO, Vector3::UNIT_Z)
    }
}

impl ApproxEq for Line3 {
    type Epsilon = f64;
    const DEFAULT_EPSILON : f64 = ALLOWED_DEVIANCE;

    fn is_close_to(self, rhs: Self, epsilon: f64) -> bool {
        self.orig.is_close_to(rhs.orig, epsilon) && self.dir.is_close_to(rhs.dir, epsilon)
    }
}

impl Display for Line3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("[Origin: {} - Direction: {}]", self.orig, self.dir))
    }
}

//------------------------------------------------------------------------------------------------------------------------------

/// 3D line segment, centered on `orig` and reaching `extent` along `dir` in both directions
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct LineSegment3 {
    pub orig   : Vector3,
    pub dir    : Vector3,
    pub extent : f64,
}

impl LineSegment3 {
    /// Create a new line segment
    #[inline]
    #[must_use]
    pub const fn new(orig: Vector3, dir: Vector3, extent: f64) -> Self {
        Self { orig, dir, extent }
    }

    /// Create a line segment going from `start` to `end`
    #[must_use]
    pub fn from_points(start: Vector3, end: Vector3) -> Self {
        let diff = end - start;
        Self {
            orig: (start + end) * 0.5,
            dir: diff.normalize(),
            extent: diff.length() * 0.5,
        }
    }

    /// End point in the direction of `dir`
    #[inline]
    #[must_use]
    pub fn positive_end(self) -> Vector3 {
        self.orig + self.dir * self.extent
    }

    /// End point opposite to `dir`
    #[inline]
    #[must_use]
    pub fn negative_end(self) -> Vector3 {
        self.orig - self.dir * self.extent
    }

    /// Squared distance from the segment to a point, together with the closest point on the segment
    #[must_use]
    pub fn distance_squared_with_closest(self, point: Vector3) -> (f64, Vector3) {
        let t0 = self.dir.dot(point - self.orig);
        let closest = if t0 <= -self.extent {
            self.negative_end()
        } else if t0 >= self.extent {
            self.positive_end()
        } else {
            self.orig + self.dir * t0
        };
        (point.distance_squared(closest), closest)
    }

    /// Squared distance from the segment to a point
    #[inline]
    #[must_use]
    pub fn distance_squared(self, point: Vector3) -> f64 {
        self.distance_squared_with_closest(point).0
    }

    /// Distance from the segment to a point
    #[inline]
    #[must_use]
    pub fn distance(self, point: Vector3) -> f64 {
        self.distance_squared(point).sqrt()
    }

    /// Get a random point on the segment
    #[must_use]
    pub fn random<R: Rng + ?Sized>(self, rng: &mut R) -> Vector3 {
        let rand : f64 = rng.gen();
        self.orig + self.dir * (self.extent * (2.0 * rand - 1.0))
    }

    /// Check if the segment is finite, i.e. all components and the extent are finite
    #[inline]
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.orig.is_finite() && self.dir.is_finite() && self.extent.is_finite()
    }

    /// Check if the segment contains no NaN or infinite values
    #[inline]
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.orig.is_valid() && self.dir.is_valid() && self.extent.is_finite()
    }
}

impl Default for LineSegment3 {
    fn default() -> Self {
        Self::new(Vector3::ZERO, Vector3::UNIT_Z, 0.5)
    }
}

impl ApproxEq for LineSegment3 {
    type Epsilon = f64;
    const DEFAULT_EPSILON : f64 = ALLOWED_DEVIANCE;

    fn is_close_to(self, rhs: Self, epsilon: f64) -> bool {
        self.orig.is_close_to(rhs.orig, epsilon) &&
        self.dir.is_close_to(rhs.dir, epsilon) &&
        self.extent.is_close_to(rhs.extent, epsilon)
    }
}

impl Display for LineSegment3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("[Origin: {} - Direction: {} - Extent: {}]", self.orig, self.dir, self.extent))
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};
    use crate::*;

    #[test]
    fn line_distance() {
        let line = Line3::default();
        assert_eq!(line.distance_squared_with_closest(Vector3::new(0.0, 5.0, 3.0)), (25.0, Vector3::new(0.0, 0.0, 3.0)));
        // An infinite line also reaches behind its origin
        assert_eq!(line.distance_squared_with_closest(Vector3::new(0.0, 3.0, -3.0)), (9.0, Vector3::new(0.0, 0.0, -3.0)));
        assert_eq!(line.distance(Vector3::new(3.0, 4.0, 100.0)), 5.0);
    }

    #[test]
    fn segment_from_points() {
        let seg = LineSegment3::from_points(Vector3::new(1.0, 0.0, 0.0), Vector3::new(5.0, 0.0, 0.0));
        assert_eq!(seg.orig, Vector3::new(3.0, 0.0, 0.0));
        assert!(seg.dir.is_close_to(Vector3::UNIT_X, 1e-9));
        assert_eq!(seg.extent, 2.0);
        assert!(seg.positive_end().is_close_to(Vector3::new(5.0, 0.0, 0.0), 1e-9));
        assert!(seg.negative_end().is_close_to(Vector3::new(1.0, 0.0, 0.0), 1e-9));
    }

    #[test]
    fn segment_distance_clamps_to_ends() {
        let seg = LineSegment3::new(Vector3::ZERO, Vector3::UNIT_X, 1.0);

        let (dist, closest) = seg.distance_squared_with_closest(Vector3::new(0.5, 2.0, 0.0));
        assert_eq!(dist, 4.0);
        assert_eq!(closest, Vector3::new(0.5, 0.0, 0.0));

        let (dist, closest) = seg.distance_squared_with_closest(Vector3::new(4.0, 0.0, 0.0));
        assert_eq!(dist, 9.0);
        assert_eq!(closest, Vector3::UNIT_X);

        let (dist, closest) = seg.distance_squared_with_closest(Vector3::new(-1.0, 1.0, 0.0));
        assert_eq!(dist, 1.0);
        assert_eq!(closest, Vector3::NEG_UNIT_X);

        assert_eq!(seg.distance(Vector3::new(-1.0, 1.0, 0.0)), 1.0);
    }

    #[test]
    fn segment_random_stays_on_segment() {
        let seg = LineSegment3::new(Vector3::new(1.0, 2.0, 3.0), Vector3::UNIT_Y, 2.0);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let point = seg.random(&mut rng);
            assert!(seg.distance(point) < 1e-9);
            assert!(point.x == 1.0 && point.z == 3.0);
            assert!(point.y >= 0.0 && point.y <= 4.0);
        }
    }

    #[test]
    fn validity() {
        assert!(LineSegment3::default().is_finite());
        assert!(!LineSegment3::new(Vector3::ZERO, Vector3::UNIT_X, f64::INFINITY).is_finite());
        assert!(!LineSegment3::new(Vector3::set(f64::NAN), Vector3::UNIT_X, 1.0).is_valid());
        assert!(Line3::default().is_valid());
        assert!(!Line3::new(Vector3::ZERO, Vector3::set(f64::NAN)).is_valid());
    }

    #[test]
    fn display() {
        assert_eq!(Line3::default().to_string(), "[Origin: (0, 0, 0) - Direction: (0, 0, 1)]");
        assert_eq!(LineSegment3::default().to_string(), "[Origin: (0, 0, 0) - Direction: (0, 0, 1) - Extent: 0.5]");
    }
}
