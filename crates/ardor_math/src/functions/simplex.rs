use core::fmt;
use crate::*;
use super::Function3D;

const GRAD3 : [[f64; 3]; 12] = [
    [ 1.0,  1.0,  0.0], [-1.0,  1.0,  0.0], [ 1.0, -1.0,  0.0], [-1.0, -1.0,  0.0],
    [ 1.0,  0.0,  1.0], [-1.0,  0.0,  1.0], [ 1.0,  0.0, -1.0], [-1.0,  0.0, -1.0],
    [ 0.0,  1.0,  1.0], [ 0.0, -1.0,  1.0], [ 0.0,  1.0, -1.0], [ 0.0, -1.0, -1.0],
];

const GRAD4 : [[f64; 4]; 32] = [
    [ 0.0,  1.0,  1.0,  1.0], [ 0.0,  1.0,  1.0, -1.0], [ 0.0,  1.0, -1.0,  1.0], [ 0.0,  1.0, -1.0, -1.0],
    [ 0.0, -1.0,  1.0,  1.0], [ 0.0, -1.0,  1.0, -1.0], [ 0.0, -1.0, -1.0,  1.0], [ 0.0, -1.0, -1.0, -1.0],
    [ 1.0,  0.0,  1.0,  1.0], [ 1.0,  0.0,  1.0, -1.0], [ 1.0,  0.0, -1.0,  1.0], [ 1.0,  0.0, -1.0, -1.0],
    [-1.0,  0.0,  1.0,  1.0], [-1.0,  0.0,  1.0, -1.0], [-1.0,  0.0, -1.0,  1.0], [-1.0,  0.0, -1.0, -1.0],
    [ 1.0,  1.0,  0.0,  1.0], [ 1.0,  1.0,  0.0, -1.0], [ 1.0, -1.0,  0.0,  1.0], [ 1.0, -1.0,  0.0, -1.0],
    [-1.0,  1.0,  0.0,  1.0], [-1.0,  1.0,  0.0, -1.0], [-1.0, -1.0,  0.0,  1.0], [-1.0, -1.0,  0.0, -1.0],
    [ 1.0,  1.0,  1.0,  0.0], [ 1.0,  1.0, -1.0,  0.0], [ 1.0, -1.0,  1.0,  0.0], [ 1.0, -1.0, -1.0,  0.0],
    [-1.0,  1.0,  1.0,  0.0], [-1.0,  1.0, -1.0,  0.0], [-1.0, -1.0,  1.0,  0.0], [-1.0, -1.0, -1.0,  0.0],
];

/// Rank of each coordinate when sorting the 4 offsets in a cell, indexed by the results of their 6 pair-wise comparisons
const SIMPLEX4 : [[u8; 4]; 64] = [
    [0, 1, 2, 3], [0, 1, 3, 2], [0, 0, 0, 0], [0, 2, 3, 1], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [1, 2, 3, 0],
    [0, 2, 1, 3], [0, 0, 0, 0], [0, 3, 1, 2], [0, 3, 2, 1], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [1, 3, 2, 0],
    [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0],
    [1, 2, 0, 3], [0, 0, 0, 0], [1, 3, 0, 2], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [2, 3, 0, 1], [2, 3, 1, 0],
    [1, 0, 2, 3], [1, 0, 3, 2], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [2, 0, 3, 1], [0, 0, 0, 0], [2, 1, 3, 0],
    [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0],
    [2, 0, 1, 3], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [3, 0, 1, 2], [3, 0, 2, 1], [0, 0, 0, 0], [3, 1, 2, 0],
    [2, 1, 0, 3], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [3, 1, 0, 2], [0, 0, 0, 0], [3, 2, 0, 1], [3, 2, 1, 0],
];

/// Ken Perlin's reference permutation
const DEFAULT_PERMUTATION : [u8; 256] = [
    151, 160, 137,  91,  90,  15, 131,  13, 201,  95,  96,  53, 194, 233,   7, 225,
    140,  36, 103,  30,  69, 142,   8,  99,  37, 240,  21,  10,  23, 190,   6, 148,
    247, 120, 234,  75,   0,  26, 197,  62,  94, 252, 219, 203, 117,  35,  11,  32,
     57, 177,  33,  88, 237, 149,  56,  87, 174,  20, 125, 136, 171, 168,  68, 175,
     74, 165,  71, 134, 139,  48,  27, 166,  77, 146, 158, 231,  83, 111, 229, 122,
     60, 211, 133, 230, 220, 105,  92,  41,  55,  46, 245,  40, 244, 102, 143,  54,
     65,  25,  63, 161,   1, 216,  80,  73, 209,  76, 132, 187, 208,  89,  18, 169,
    200, 196, 135, 130, 116, 188, 159,  86, 164, 100, 109, 198, 173, 186,   3,  64,
     52, 217, 226, 250, 124, 123,   5, 202,  38, 147, 118, 126, 255,  82,  85, 212,
    207, 206,  59, 227,  47,  16,  58,  17, 182, 189,  28,  42, 223, 183, 170, 213,
    119, 248, 152,   2,  44, 154, 163,  70, 221, 153, 101, 155, 167,  43, 172,   9,
    129,  22,  39, 253,  19,  98, 108, 110,  79, 113, 224, 232, 178, 185, 112, 104,
    218, 246,  97, 228, 251,  34, 242, 193, 238, 210, 144,  12, 191, 179, 162, 241,
     81,  51, 145, 235, 249,  14, 239, 107,  49, 192, 214,  31, 181, 199, 106, 157,
    184,  84, 204, 176, 115, 121,  50,  45, 127,   4, 150, 254, 138, 236, 205,  93,
    222, 114,  67,  29,  24,  72, 243, 141, 128, 195,  78,  66, 215,  61, 156, 180,
];

/// Contribution of a single simplex corner at `offset` from the sample position
fn corner(radius_sq: f64, offset: &[f64], grad: &[f64]) -> f64 {
    let t = radius_sq - offset.iter().map(|val| val * val).sum::<f64>();
    if t < 0.0 {
        return 0.0;
    }
    let t = t * t;
    t * t * offset.iter().zip(grad).map(|(off, g)| off * g).sum::<f64>()
}

/// Simplex noise in 2, 3 and 4 dimensions
///
/// The noise is deterministic for a given permutation table, returns values in `[-1, 1]` and is 0 at every lattice corner of the skewed grid.
/// As a [`Function3D`], it evaluates [`SimplexNoise::noise3`].
#[derive(Clone)]
pub struct SimplexNoise {
    /// Permutation repeated twice, removing the need to wrap indices
    perm : [u8; 512],
}

impl SimplexNoise {
    /// Create simplex noise using the reference permutation
    #[must_use]
    pub fn new() -> Self {
        Self::from_table(&DEFAULT_PERMUTATION)
    }

    /// Create simplex noise with a custom permutation, which needs to contain every value in `0..=255` exactly once
    pub fn with_permutations(permutations: &[u8; 256]) -> Result<Self> {
        let mut seen = [false; 256];
        for val in permutations {
            if core::mem::replace(&mut seen[*val as usize], true) {
                return Err(Error::InvalidPermutation);
            }
        }
        Ok(Self::from_table(permutations))
    }

    fn from_table(permutations: &[u8; 256]) -> Self {
        let mut perm = [0; 512];
        for (idx, val) in perm.iter_mut().enumerate() {
            *val = permutations[idx & 255];
        }
        Self { perm }
    }

    fn hash(&self, cell: i64, offset: usize) -> usize {
        self.perm[(cell & 255) as usize + offset] as usize
    }

    /// 2D simplex noise
    #[must_use]
    pub fn noise2(&self, x: f64, y: f64) -> f64 {
        let f2 = 0.5 * (3f64.sqrt() - 1.0);
        let g2 = (3.0 - 3f64.sqrt()) / 6.0;

        // Skew the input to find the cell, then unskew its origin back
        let skew = (x + y) * f2;
        let (i, j) = (floor(x + skew), floor(y + skew));
        let unskew = (i + j) as f64 * g2;
        let (x0, y0) = (x - (i as f64 - unskew), y - (j as f64 - unskew));

        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };
        let (x1, y1) = (x0 - i1 as f64 + g2, y0 - j1 as f64 + g2);
        let (x2, y2) = (x0 - 1.0 + 2.0 * g2, y0 - 1.0 + 2.0 * g2);

        let gi0 = self.hash(i, self.hash(j, 0)) % 12;
        let gi1 = self.hash(i, i1 + self.hash(j, j1)) % 12;
        let gi2 = self.hash(i, 1 + self.hash(j, 1)) % 12;

        70.0 * (corner(0.5, &[x0, y0], &GRAD3[gi0][..2])
            + corner(0.5, &[x1, y1], &GRAD3[gi1][..2])
            + corner(0.5, &[x2, y2], &GRAD3[gi2][..2]))
    }

    /// 3D simplex noise
    #[must_use]
    pub fn noise3(&self, x: f64, y: f64, z: f64) -> f64 {
        let f3 = ONE_THIRD;
        let g3 = 1.0 / 6.0;

        let skew = (x + y + z) * f3;
        let (i, j, k) = (floor(x + skew), floor(y + skew), floor(z + skew));
        let unskew = (i + j + k) as f64 * g3;
        let x0 = x - (i as f64 - unskew);
        let y0 = y - (j as f64 - unskew);
        let z0 = z - (k as f64 - unskew);

        // The cell is split into 6 tetrahedra, pick the one by the ordering of the offsets
        let (first, second) = if x0 >= y0 {
            if y0 >= z0 {
                ([1, 0, 0], [1, 1, 0])
            } else if x0 >= z0 {
                ([1, 0, 0], [1, 0, 1])
            } else {
                ([0, 0, 1], [1, 0, 1])
            }
        } else if y0 < z0 {
            ([0, 0, 1], [0, 1, 1])
        } else if x0 < z0 {
            ([0, 1, 0], [0, 1, 1])
        } else {
            ([0, 1, 0], [1, 1, 0])
        };

        let offset = |step: [usize; 3], scale: f64| [
            x0 - step[0] as f64 + scale * g3,
            y0 - step[1] as f64 + scale * g3,
            z0 - step[2] as f64 + scale * g3,
        ];
        let grad = |step: [usize; 3]| {
            let idx = self.hash(i, step[0] + self.hash(j, step[1] + self.hash(k, step[2]))) % 12;
            &GRAD3[idx]
        };

        32.0 * (corner(0.6, &[x0, y0, z0], grad([0, 0, 0]))
            + corner(0.6, &offset(first, 1.0), grad(first))
            + corner(0.6, &offset(second, 2.0), grad(second))
            + corner(0.6, &offset([1, 1, 1], 3.0), grad([1, 1, 1])))
    }

    /// 4D simplex noise
    #[must_use]
    pub fn noise4(&self, x: f64, y: f64, z: f64, w: f64) -> f64 {
        let f4 = (5f64.sqrt() - 1.0) / 4.0;
        let g4 = (5.0 - 5f64.sqrt()) / 20.0;

        let input = [x, y, z, w];
        let skew = (x + y + z + w) * f4;
        let cell = input.map(|val| floor(val + skew));
        let unskew = cell.iter().sum::<i64>() as f64 * g4;
        let mut origin = [0.0; 4];
        for axis in 0..4 {
            origin[axis] = input[axis] - (cell[axis] as f64 - unskew);
        }

        let [x0, y0, z0, w0] = origin;
        let rank_idx = (usize::from(x0 > y0) << 5)
            | (usize::from(x0 > z0) << 4)
            | (usize::from(y0 > z0) << 3)
            | (usize::from(x0 > w0) << 2)
            | (usize::from(y0 > w0) << 1)
            | usize::from(z0 > w0);
        let ranks = SIMPLEX4[rank_idx];

        // Corners are visited by stepping along the axes from the largest offset to the smallest
        let mut sum = 0.0;
        for corner_idx in 0..5 {
            let step = ranks.map(|rank| usize::from(rank as usize + corner_idx >= 4));
            let mut offset = [0.0; 4];
            for axis in 0..4 {
                offset[axis] = origin[axis] - step[axis] as f64 + corner_idx as f64 * g4;
            }
            let gi = self.hash(cell[0], step[0] + self.hash(cell[1], step[1] + self.hash(cell[2], step[2] + self.hash(cell[3], step[3])))) % 32;
            sum += corner(0.6, &offset, &GRAD4[gi]);
        }
        27.0 * sum
    }
}

impl Default for SimplexNoise {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SimplexNoise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!("SimplexNoise {{ perm: {:?}.. }}", &self.perm[..8]))
    }
}

impl Function3D for SimplexNoise {
    #[inline]
    fn eval(&self, x: f64, y: f64, z: f64) -> f64 {
        self.noise3(x, y, z)
    }
}
