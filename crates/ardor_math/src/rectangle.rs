use core::fmt::Display;
use rand::Rng;
use crate::*;

/// Integer 2D rectangle, e.g. a viewport or scissor region
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug)]
pub struct Rectangle2 {
    pub x      : i32,
    pub y      : i32,
    pub width  : i32,
    pub height : i32,
}

impl Rectangle2 {
    /// Create a new rectangle
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Intersect this rectangle with another one
    ///
    /// When the rectangles don't overlap, the resulting width and/or height is 0 or negative.
    /// Edges past the `i32` range are clamped to it.
    #[must_use]
    pub fn intersect(self, other: Self) -> Self {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.x.saturating_add(self.width).min(other.x.saturating_add(other.width));
        let y2 = self.y.saturating_add(self.height).min(other.y.saturating_add(other.height));
        Self { x: x1, y: y1, width: x2.saturating_sub(x1), height: y2.saturating_sub(y1) }
    }

    /// Intersection of 2 rectangles
    #[inline]
    #[must_use]
    pub fn intersection(lhs: Self, rhs: Self) -> Self {
        lhs.intersect(rhs)
    }

    /// Check if the rectangle covers any area
    #[inline]
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

impl Display for Rectangle2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("[Origin: {}, {} - Width: {} - Height: {}]", self.x, self.y, self.width, self.height))
    }
}

//------------------------------------------------------------------------------------------------------------------------------

/// 3D rectangle defined by 3 corners, `a` is the corner shared by the edges `a -> b` and `a -> c`
#[derive(Clone, Copy, PartialEq, Default, Debug)]
pub struct Rectangle3 {
    pub a : Vector3,
    pub b : Vector3,
    pub c : Vector3,
}

impl Rectangle3 {
    /// Create a new rectangle
    #[inline]
    #[must_use]
    pub const fn new(a: Vector3, b: Vector3, c: Vector3) -> Self {
        Self { a, b, c }
    }

    /// Corner opposite of `a`
    #[inline]
    #[must_use]
    pub fn d(self) -> Vector3 {
        self.b + self.c - self.a
    }

    /// Get a random point on the rectangle
    #[must_use]
    pub fn random<R: Rng + ?Sized>(self, rng: &mut R) -> Vector3 {
        let s : f64 = rng.gen();
        let t : f64 = rng.gen();
        self.a * (1.0 - s - t) + self.b * s + self.c * t
    }

    /// Check if all corners contain no NaN or infinite values
    #[inline]
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.a.is_valid() && self.b.is_valid() && self.c.is_valid()
    }
}

impl ApproxEq for Rectangle3 {
    type Epsilon = f64;
    const DEFAULT_EPSILON : f64 = ALLOWED_DEVIANCE;

    fn is_close_to(self, rhs: Self, epsilon: f64) -> bool {
        self.a.is_close_to(rhs.a, epsilon) && self.b.is_close_to(rhs.b, epsilon) && self.c.is_close_to(rhs.c, epsilon)
    }
}

impl Display for Rectangle3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("[A: {} - B: {} - C: {}]", self.a, self.b, self.c))
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};
    use crate::*;

    #[test]
    fn rect2_intersect() {
        let lhs = Rectangle2::new(0, 0, 10, 10);
        let rhs = Rectangle2::new(5, -2, 10, 8);
        assert_eq!(lhs.intersect(rhs), Rectangle2::new(5, 0, 5, 6));
        assert_eq!(Rectangle2::intersection(rhs, lhs), Rectangle2::new(5, 0, 5, 6));

        let disjoint = lhs.intersect(Rectangle2::new(20, 20, 5, 5));
        assert_eq!(disjoint, Rectangle2::new(20, 20, -10, -10));
        assert!(disjoint.is_empty());
        assert!(!lhs.is_empty());
    }

    #[test]
    fn rect2_intersect_extreme() {
        let huge = Rectangle2::new(i32::MAX - 10, 0, i32::MAX, i32::MAX);
        let small = Rectangle2::new(i32::MAX - 5, 5, 100, 100);
        assert_eq!(huge.intersect(small), Rectangle2::new(i32::MAX - 5, 5, 5, 100));

        let disjoint = Rectangle2::new(i32::MIN, i32::MIN, 1, 1).intersect(huge);
        assert_eq!(disjoint.width, i32::MIN);
        assert!(disjoint.is_empty());
    }

    #[test]
    fn rect3_random() {
        let rect = Rectangle3::new(Vector3::ZERO, Vector3::new(2.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 3.0));
        assert_eq!(rect.d(), Vector3::new(2.0, 0.0, 3.0));

        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let point = rect.random(&mut rng);
            assert_eq!(point.y, 0.0);
            assert!(point.x >= 0.0 && point.x <= 2.0);
            assert!(point.z >= 0.0 && point.z <= 3.0);
        }
    }

    #[test]
    fn display() {
        assert_eq!(Rectangle2::new(1, 2, 3, 4).to_string(), "[Origin: 1, 2 - Width: 3 - Height: 4]");
        assert_eq!(Rectangle3::default().to_string(), "[A: (0, 0, 0) - B: (0, 0, 0) - C: (0, 0, 0)]");
        assert!(Rectangle3::default().is_valid());
    }
}
