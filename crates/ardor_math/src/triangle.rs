use core::{cell::Cell, fmt::Display};
use crate::*;

/// Triangle with an index, e.g. into a mesh's primitive list
///
/// The center and normal are computed on first access and cached until a vertex changes.
#[derive(Clone, Debug)]
pub struct Triangle {
    a      : Vector3,
    b      : Vector3,
    c      : Vector3,
    index  : usize,
    center : Cell<Option<Vector3>>,
    normal : Cell<Option<Vector3>>,
}

impl Triangle {
    /// Create a new triangle with index 0
    #[inline]
    #[must_use]
    pub fn new(a: Vector3, b: Vector3, c: Vector3) -> Self {
        Self::with_index(a, b, c, 0)
    }

    /// Create a new triangle
    #[inline]
    #[must_use]
    pub fn with_index(a: Vector3, b: Vector3, c: Vector3, index: usize) -> Self {
        Self { a, b, c, index, center: Cell::new(None), normal: Cell::new(None) }
    }

    #[inline]
    #[must_use]
    pub fn a(&self) -> Vector3 {
        self.a
    }

    #[inline]
    #[must_use]
    pub fn b(&self) -> Vector3 {
        self.b
    }

    #[inline]
    #[must_use]
    pub fn c(&self) -> Vector3 {
        self.c
    }

    #[inline]
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    /// Get the vertex at `index`: 0 for `a`, 1 for `b` and 2 for `c`
    pub fn get(&self, index: usize) -> Result<Vector3> {
        match index {
            0 => Ok(self.a),
            1 => Ok(self.b),
            2 => Ok(self.c),
            _ => Err(Error::IndexOutOfRange { index, len: 3 }),
        }
    }

    /// Set the vertex at `index`, the triangle is left untouched for an invalid index
    pub fn set(&mut self, index: usize, point: Vector3) -> Result<()> {
        match index {
            0 => self.set_a(point),
            1 => self.set_b(point),
            2 => self.set_c(point),
            _ => return Err(Error::IndexOutOfRange { index, len: 3 }),
        }
        Ok(())
    }

    pub fn set_a(&mut self, point: Vector3) {
        self.a = point;
        self.mark_dirty();
    }

    pub fn set_b(&mut self, point: Vector3) {
        self.b = point;
        self.mark_dirty();
    }

    pub fn set_c(&mut self, point: Vector3) {
        self.c = point;
        self.mark_dirty();
    }

    /// Average of the 3 vertices
    #[must_use]
    pub fn center(&self) -> Vector3 {
        match self.center.get() {
            Some(center) => center,
            None => {
                let center = (self.a + self.b + self.c) * ONE_THIRD;
                self.center.set(Some(center));
                center
            },
        }
    }

    /// Unit normal, following the counter-clockwise winding of `a`, `b` and `c`
    #[must_use]
    pub fn normal(&self) -> Vector3 {
        match self.normal.get() {
            Some(normal) => normal,
            None => {
                let normal = (self.b - self.a).cross(self.c - self.a).normalize();
                self.normal.set(Some(normal));
                normal
            },
        }
    }

    /// Check if all vertices contain no NaN or infinite values
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.a.is_valid() && self.b.is_valid() && self.c.is_valid()
    }

    fn mark_dirty(&mut self) {
        self.center.set(None);
        self.normal.set(None);
    }
}

impl Default for Triangle {
    fn default() -> Self {
        Self::new(Vector3::ZERO, Vector3::ZERO, Vector3::ZERO)
    }
}

impl PartialEq for Triangle {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.a == other.a && self.b == other.b && self.c == other.c
    }
}

impl Display for Triangle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("[A: {} - B: {} - C: {} - Index: {}]", self.a, self.b, self.c, self.index))
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn derived_values() {
        let tri = Triangle::new(Vector3::ZERO, Vector3::new(3.0, 0.0, 0.0), Vector3::new(0.0, 3.0, 0.0));
        assert!(tri.center().is_close_to(Vector3::new(1.0, 1.0, 0.0), 1e-9));
        assert!(tri.normal().is_close_to(Vector3::UNIT_Z, 1e-9));
    }

    #[test]
    fn cache_is_refreshed_on_mutation() {
        let mut tri = Triangle::new(Vector3::ZERO, Vector3::UNIT_X, Vector3::UNIT_Y);
        assert!(tri.normal().is_close_to(Vector3::UNIT_Z, 1e-9));

        // Swapping b and c flips the winding
        tri.set_b(Vector3::UNIT_Y);
        tri.set_c(Vector3::UNIT_X);
        assert!(tri.normal().is_close_to(Vector3::NEG_UNIT_Z, 1e-9));

        tri.set(0, Vector3::new(3.0, 3.0, 0.0)).unwrap();
        assert!(tri.center().is_close_to(Vector3::new(4.0 / 3.0, 4.0 / 3.0, 0.0), 1e-9));
    }

    #[test]
    fn indexed_access() {
        let mut tri = Triangle::with_index(Vector3::UNIT_X, Vector3::UNIT_Y, Vector3::UNIT_Z, 4);
        assert_eq!(tri.index(), 4);
        assert_eq!(tri.get(1), Ok(Vector3::UNIT_Y));
        assert_eq!(tri.get(3), Err(Error::IndexOutOfRange { index: 3, len: 3 }));

        let before = tri.clone();
        assert!(tri.set(5, Vector3::ZERO).is_err());
        assert_eq!(tri, before);

        tri.set_index(2);
        assert_ne!(tri, before);
    }

    #[test]
    fn validity() {
        assert!(Triangle::default().is_valid());
        assert!(!Triangle::new(Vector3::ZERO, Vector3::set(f64::NAN), Vector3::ZERO).is_valid());
    }

    #[test]
    fn display() {
        let tri = Triangle::with_index(Vector3::ZERO, Vector3::UNIT_X, Vector3::UNIT_Y, 1);
        assert_eq!(tri.to_string(), "[A: (0, 0, 0) - B: (1, 0, 0) - C: (0, 1, 0) - Index: 1]");
    }
}
