use crate::*;
use super::Function3D;

/// Number of neighboring cells searched on each side of the sample's cell
const SEARCH_RADIUS : i32 = 2;

/// Cellular (Voronoi) function over a grid of unit cubes, each holding one pseudo-random feature point
///
/// Every position gets the value of the cell owning its nearest feature point, scaled by `displacement`.
/// With `use_distance`, the distance to that feature point is added on top.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct VoronoiFunction3D {
    /// Scale applied to the input position, higher values give smaller cells
    pub frequency    : f64,
    /// Scale of the per-cell value, in `(-1, 1]` before scaling
    pub displacement : f64,
    /// Add the distance to the nearest feature point to the output
    pub use_distance : bool,
    /// Seed selecting the placement of the feature points
    pub seed         : i32,
}

impl VoronoiFunction3D {
    #[must_use]
    pub fn new(frequency: f64, displacement: f64, use_distance: bool, seed: i32) -> Self {
        Self { frequency, displacement, use_distance, seed }
    }

    /// Integer hash of a cell, mapped to `(-1, 1]`
    fn cell_value(x: i32, y: i32, z: i32, seed: i32) -> f64 {
        let n = 4241i32.wrapping_mul(x)
            .wrapping_add(7817i32.wrapping_mul(y))
            .wrapping_add(38261i32.wrapping_mul(z))
            .wrapping_add(1979i32.wrapping_mul(seed))
            & 0x7fff_ffff;
        let n = (n >> 13) ^ n;
        let hashed = n.wrapping_mul(n.wrapping_mul(n).wrapping_mul(15731).wrapping_add(789_221)).wrapping_add(1_376_312_589) & 0x7fff_ffff;
        1.0 - f64::from(hashed) / f64::from(0x4000_0000)
    }

    /// Feature point of the cell at `(x, y, z)`
    fn feature_point(&self, x: i32, y: i32, z: i32) -> Vector3 {
        Vector3::new(
            f64::from(x) + Self::cell_value(x, y, z, self.seed),
            f64::from(y) + Self::cell_value(x, y, z, self.seed.wrapping_add(1)),
            f64::from(z) + Self::cell_value(x, y, z, self.seed.wrapping_add(2)),
        )
    }
}

impl Default for VoronoiFunction3D {
    fn default() -> Self {
        Self::new(1.0, 1.0, false, 0)
    }
}

impl Function3D for VoronoiFunction3D {
    fn eval(&self, x: f64, y: f64, z: f64) -> f64 {
        let pos = Vector3::new(x, y, z) * self.frequency;
        let (cx, cy, cz) = (floor(pos.x) as i32, floor(pos.y) as i32, floor(pos.z) as i32);

        let mut nearest = Vector3::ZERO;
        let mut nearest_dist_sq = f64::MAX;
        for a in cx - SEARCH_RADIUS..=cx + SEARCH_RADIUS {
            for b in cy - SEARCH_RADIUS..=cy + SEARCH_RADIUS {
                for c in cz - SEARCH_RADIUS..=cz + SEARCH_RADIUS {
                    let point = self.feature_point(a, b, c);
                    let dist_sq = (point - pos).length_squared();
                    if dist_sq < nearest_dist_sq {
                        nearest_dist_sq = dist_sq;
                        nearest = point;
                    }
                }
            }
        }

        let dist = if self.use_distance { nearest_dist_sq.sqrt() } else { 0.0 };
        let owner = Self::cell_value(floor(nearest.x) as i32, floor(nearest.y) as i32, floor(nearest.z) as i32, 0);
        dist + self.displacement * owner
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn cell_values() {
        assert_eq!(VoronoiFunction3D::cell_value(0, 0, 0, 0), 1.0 - 1376312589.0 / 1073741824.0);
        for idx in -50..50 {
            let val = VoronoiFunction3D::cell_value(idx, idx * 7, -idx * 13, idx);
            assert!(val > -1.0 && val <= 1.0);
        }
        // Large inputs wrap instead of overflowing
        let val = VoronoiFunction3D::cell_value(i32::MAX, i32::MIN, i32::MAX, i32::MAX);
        assert!(val > -1.0 && val <= 1.0);
    }

    #[test]
    fn distance_to_feature_points() {
        let voronoi = VoronoiFunction3D::new(1.0, 0.0, true, 7);
        for (x, y, z) in [(0, 0, 0), (3, -2, 5), (-4, 1, -1)] {
            let point = voronoi.feature_point(x, y, z);
            assert_eq!(voronoi.eval_at(point), 0.0);

            // Close to a feature point, the distance to it is the result
            let nudged = point + Vector3::new(0.01, 0.0, 0.0);
            assert!(voronoi.eval_at(nudged).is_close_to(0.01, 1e-9));
        }
    }

    #[test]
    fn cell_owner_value() {
        let voronoi = VoronoiFunction3D::default();
        let point = voronoi.feature_point(2, -3, 1);
        let expected = VoronoiFunction3D::cell_value(floor(point.x) as i32, floor(point.y) as i32, floor(point.z) as i32, 0);
        assert_eq!(voronoi.eval_at(point), expected);

        let doubled = VoronoiFunction3D { displacement: 2.0, ..voronoi };
        assert_eq!(doubled.eval_at(point), 2.0 * expected);
    }

    #[test]
    fn frequency_scales_input() {
        let base = VoronoiFunction3D::new(1.0, 1.0, true, 3);
        let fine = VoronoiFunction3D { frequency: 2.0, ..base };
        for idx in 0..25 {
            let (x, y, z) = (idx as f64 * 0.31 - 2.0, idx as f64 * -0.17, idx as f64 * 0.05 + 1.0);
            assert_eq!(fine.eval(x, y, z), base.eval(2.0 * x, 2.0 * y, 2.0 * z));
        }
    }

    #[test]
    fn seed_moves_points() {
        let a = VoronoiFunction3D::new(1.0, 0.0, true, 0);
        let b = VoronoiFunction3D { seed: 1, ..a };
        let differs = (0..20).any(|idx| {
            let x = idx as f64 * 0.43;
            a.eval(x, 0.5, -x) != b.eval(x, 0.5, -x)
        });
        assert!(differs);
    }
}
