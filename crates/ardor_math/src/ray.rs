use core::fmt::Display;
use crate::*;

/// 3D ray, starting at `orig` and going along `dir`
///
/// Distances are only metrically correct when `dir` has unit length.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Ray3 {
    pub orig : Vector3,
    pub dir  : Vector3,
}

impl Ray3 {
    /// Create a new ray
    #[inline]
    #[must_use]
    pub const fn new(orig: Vector3, dir: Vector3) -> Self {
        Self { orig, dir }
    }

    /// Get the point at a given distance along the ray
    #[inline]
    #[must_use]
    pub fn point_at(self, dist: f64) -> Vector3 {
        self.orig + self.dir * dist
    }

    /// Intersect the ray with a triangle, returning the intersection point
    ///
    /// Hits on an edge or a vertex count as intersections. Both windings are accepted.
    #[must_use]
    pub fn intersects_triangle(self, a: Vector3, b: Vector3, c: Vector3) -> Option<Vector3> {
        self.triangle_hit(a, b, c).map(|(t, _, _)| self.point_at(t))
    }

    /// Intersect the ray with a triangle, returning the ray parameter and the barycentric `u`/`v` coordinates of the hit as
    /// `(t, u, v)`
    ///
    /// The intersection point can be reconstructed as `a + (b - a) * u + (c - a) * v`.
    #[must_use]
    pub fn intersects_triangle_planar(self, a: Vector3, b: Vector3, c: Vector3) -> Option<Vector3> {
        self.triangle_hit(a, b, c).map(|(t, u, v)| Vector3::new(t, u, v))
    }

    /// Intersect the ray with a quad, split into the triangles `a, b, c` and `a, c, d`
    #[must_use]
    pub fn intersects_quad(self, a: Vector3, b: Vector3, c: Vector3, d: Vector3) -> Option<Vector3> {
        self.intersects_triangle(a, b, c).or_else(|| self.intersects_triangle(a, c, d))
    }

    /// Intersect the ray with a quad, split into the triangles `a, b, c` and `a, c, d`, returning `(t, u, v)`
    ///
    /// `u` and `v` are relative to the triangle that was hit, with `a` as its origin in both cases.
    #[must_use]
    pub fn intersects_quad_planar(self, a: Vector3, b: Vector3, c: Vector3, d: Vector3) -> Option<Vector3> {
        self.intersects_triangle_planar(a, b, c).or_else(|| self.intersects_triangle_planar(a, c, d))
    }

    /// Intersect the ray with a plane, returning the intersection point
    ///
    /// A ray parallel to the plane never intersects it, even when it lies inside the plane.
    #[must_use]
    pub fn intersects_plane(self, plane: &Plane) -> Option<Vector3> {
        self.plane_hit(plane).map(|t| self.point_at(t))
    }

    /// Distance from the origin to a triangle (3 vertices) or quad (4 vertices), or `f64::INFINITY` when the ray misses
    ///
    /// Any other vertex count is treated as a miss.
    #[must_use]
    pub fn distance_to_primitive(self, vertices: &[Vector3]) -> f64 {
        let hit = match *vertices {
            [a, b, c] => self.intersects_triangle(a, b, c),
            [a, b, c, d] => self.intersects_quad(a, b, c, d),
            _ => None,
        };
        hit.map_or(f64::INFINITY, |point| self.orig.distance(point))
    }

    /// Squared distance from the ray to a point, together with the closest point on the ray
    #[must_use]
    pub fn distance_squared(self, point: Vector3) -> (f64, Vector3) {
        let t0 = self.dir.dot(point - self.orig);
        let closest = if t0 > 0.0 { self.point_at(t0) } else { self.orig };
        (point.distance_squared(closest), closest)
    }

    /// Check if both the origin and direction contain no NaN or infinite values
    #[inline]
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.orig.is_valid() && self.dir.is_valid()
    }

    /// Ray parameter of the plane hit
    pub(crate) fn plane_hit(self, plane: &Plane) -> Option<f64> {
        let denom = plane.normal.dot(self.dir);
        if denom.abs() < EPSILON {
            return None;
        }

        let t = (plane.constant - plane.normal.dot(self.orig)) / denom;
        if t < EPSILON {
            return None;
        }
        Some(t)
    }

    /// Ray parameter and barycentric coordinates of the triangle hit
    pub(crate) fn triangle_hit(self, a: Vector3, b: Vector3, c: Vector3) -> Option<(f64, f64, f64)> {
        let diff = self.orig - a;
        let edge1 = b - a;
        let edge2 = c - a;
        let norm = edge1.cross(edge2);

        let mut dir_dot_norm = self.dir.dot(norm);
        let sign = if dir_dot_norm > EPSILON {
            1.0
        } else if dir_dot_norm < -EPSILON {
            dir_dot_norm = -dir_dot_norm;
            -1.0
        } else {
            // Parallel to the triangle
            return None;
        };

        let dir_dot_diff_edge2 = sign * self.dir.dot(diff.cross(edge2));
        if dir_dot_diff_edge2 < 0.0 {
            return None;
        }

        let dir_dot_edge1_diff = sign * self.dir.dot(edge1.cross(diff));
        if dir_dot_edge1_diff < 0.0 || dir_dot_diff_edge2 + dir_dot_edge1_diff > dir_dot_norm {
            return None;
        }

        // Behind the origin
        let diff_dot_norm = -sign * diff.dot(norm);
        if diff_dot_norm < 0.0 {
            return None;
        }

        let inv = 1.0 / dir_dot_norm;
        Some((diff_dot_norm * inv, dir_dot_diff_edge2 * inv, dir_dot_edge1_diff * inv))
    }
}

impl Default for Ray3 {
    fn default() -> Self {
        Self::new(Vector3::ZERO, Vector3::UNIT_Z)
    }
}

impl From<Line3> for Ray3 {
    fn from(line: Line3) -> Self {
        Self::new(line.orig, line.dir)
    }
}

impl ApproxEq for Ray3 {
    type Epsilon = f64;
    const DEFAULT_EPSILON : f64 = ALLOWED_DEVIANCE;

    fn is_close_to(self, rhs: Self, epsilon: f64) -> bool {
        self.orig.is_close_to(rhs.orig, epsilon) && self.dir.is_close_to(rhs.dir, epsilon)
    }
}

impl Display for Ray3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("[Origin: {} - Direction: {}]", self.orig, self.dir))
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn distance_squared() {
        let ray = Ray3::default();
        assert_eq!(ray.distance_squared(Vector3::new(0.0, 5.0, 3.0)).0, 25.0);
        assert_eq!(ray.distance_squared(Vector3::new(0.0, 3.0, 3.0)), (9.0, Vector3::new(0.0, 0.0, 3.0)));
        // Points behind the origin measure to the origin
        assert_eq!(ray.distance_squared(Vector3::new(0.0, 3.0, -3.0)), (18.0, Vector3::ZERO));
    }

    #[test]
    fn planar_coordinates() {
        let a = Vector3::new(0.0, 0.0, -2.0);
        let b = Vector3::new(4.0, 0.0, -2.0);
        let c = Vector3::new(0.0, 4.0, -2.0);
        let ray = Ray3::new(Vector3::new(1.0, 2.0, 0.0), Vector3::NEG_UNIT_Z);

        let tuv = ray.intersects_triangle_planar(a, b, c).unwrap();
        assert!(tuv.is_close_to(Vector3::new(2.0, 0.25, 0.5), 1e-12));

        let point = a + (b - a) * tuv.y + (c - a) * tuv.z;
        assert!(point.is_close_to(ray.intersects_triangle(a, b, c).unwrap(), 1e-12));
    }

    #[test]
    fn quad_planar_coordinates() {
        let a = Vector3::ZERO;
        let b = Vector3::new(4.0, 0.0, 0.0);
        let c = Vector3::new(4.0, 4.0, 0.0);
        let d = Vector3::new(0.0, 4.0, 0.0);

        // First triangle a, b, c
        let ray = Ray3::new(Vector3::new(3.0, 1.0, 5.0), Vector3::NEG_UNIT_Z);
        let tuv = ray.intersects_quad_planar(a, b, c, d).unwrap();
        assert!(tuv.is_close_to(Vector3::new(5.0, 0.5, 0.25), 1e-12));

        // Second triangle a, c, d
        let ray = Ray3::new(Vector3::new(1.0, 3.0, 5.0), Vector3::NEG_UNIT_Z);
        let tuv = ray.intersects_quad_planar(a, b, c, d).unwrap();
        assert!(tuv.is_close_to(Vector3::new(5.0, 0.25, 0.5), 1e-12));
        assert!(ray.intersects_quad(a, b, c, d).unwrap().is_close_to(Vector3::new(1.0, 3.0, 0.0), 1e-12));

        let miss = Ray3::new(Vector3::new(5.0, 1.0, 5.0), Vector3::NEG_UNIT_Z);
        assert!(miss.intersects_quad_planar(a, b, c, d).is_none());
    }

    #[test]
    fn primitive_arity() {
        let ray = Ray3::new(Vector3::new(0.25, 0.25, 1.0), Vector3::NEG_UNIT_Z);
        assert_eq!(ray.distance_to_primitive(&[Vector3::ZERO, Vector3::UNIT_X, Vector3::UNIT_Y]), 1.0);
        assert_eq!(ray.distance_to_primitive(&[Vector3::ZERO, Vector3::UNIT_X]), f64::INFINITY);
        assert_eq!(ray.distance_to_primitive(&[]), f64::INFINITY);
    }

    #[test]
    fn validity() {
        assert!(Ray3::default().is_valid());
        assert!(!Ray3::new(Vector3::set(f64::NAN), Vector3::UNIT_X).is_valid());
        assert_eq!(Ray3::from(Line3::default()), Ray3::default());
    }

    #[test]
    fn display() {
        assert_eq!(Ray3::default().to_string(), "[Origin: (0, 0, 0) - Direction: (0, 0, 1)]");
    }
}
