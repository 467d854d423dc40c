use core::{ops::Mul, fmt::Display};
use ardor_logging::log_debug;
use crate::*;

impl Matrix3 {
    /// Create a new matrix with the given values
    #[inline]
    #[must_use]
    pub const fn new(m00: f64, m01: f64, m02: f64, m10: f64, m11: f64, m12: f64, m20: f64, m21: f64, m22: f64) -> Self {
        Self { vals: [m00, m01, m02,
                      m10, m11, m12,
                      m20, m21, m22] }
    }

    /// Create a new matrix with the given rows
    #[inline]
    #[must_use]
    pub fn from_rows(row0: Vector3, row1: Vector3, row2: Vector3) -> Self {
        Self { vals: [row0.x, row0.y, row0.z,
                      row1.x, row1.y, row1.z,
                      row2.x, row2.y, row2.z] }
    }

    /// Create a new matrix with the given columns
    #[inline]
    #[must_use]
    pub fn from_columns(column0: Vector3, column1: Vector3, column2: Vector3) -> Self {
        Self { vals: [column0.x, column1.x, column2.x,
                      column0.y, column1.y, column2.y,
                      column0.z, column1.z, column2.z] }
    }

    /// Create a rotation matrix from the 3 axes of a coordinate frame, the axes become the columns of the matrix
    #[inline]
    #[must_use]
    pub fn from_axes(x_axis: Vector3, y_axis: Vector3, z_axis: Vector3) -> Self {
        Self::from_columns(x_axis, y_axis, z_axis)
    }

    /// Get the 3 axes of the coordinate frame, i.e. the columns of the matrix
    #[must_use]
    pub fn to_axes(self) -> [Vector3; 3] {
        [self.column_unchecked(0), self.column_unchecked(1), self.column_unchecked(2)]
    }

    fn row_unchecked(self, index: usize) -> Vector3 {
        let idx = index * 3;
        Vector3::new(self.vals[idx], self.vals[idx + 1], self.vals[idx + 2])
    }

    fn column_unchecked(self, index: usize) -> Vector3 {
        Vector3::new(self.vals[index], self.vals[index + 3], self.vals[index + 6])
    }

    /// Get the row at the given index
    pub fn row(self, index: usize) -> Result<Vector3> {
        check_index(index, 3)?;
        Ok(self.row_unchecked(index))
    }

    /// Set the row at the given index
    pub fn set_row(&mut self, index: usize, row: Vector3) -> Result<()> {
        check_index(index, 3)?;
        let idx = index * 3;
        self.vals[idx + 0] = row.x;
        self.vals[idx + 1] = row.y;
        self.vals[idx + 2] = row.z;
        Ok(())
    }

    /// Get the column at the given index
    pub fn column(self, index: usize) -> Result<Vector3> {
        check_index(index, 3)?;
        Ok(self.column_unchecked(index))
    }

    /// Set the column at the given index
    pub fn set_column(&mut self, index: usize, column: Vector3) -> Result<()> {
        check_index(index, 3)?;
        self.vals[index + 0] = column.x;
        self.vals[index + 3] = column.y;
        self.vals[index + 6] = column.z;
        Ok(())
    }

    /// Create a diagonal matrix
    #[inline]
    #[must_use]
    pub fn from_diagonal(diag: Vector3) -> Self {
        Self::new(diag.x, 0.0   , 0.0   ,
                  0.0   , diag.y, 0.0   ,
                  0.0   , 0.0   , diag.z)
    }

    /// Create a rotation of `angle` radians around `axis`, the axis is normalized first
    #[inline]
    #[must_use]
    pub fn from_angle_axis(angle: f64, axis: Vector3) -> Self {
        Self::from_angle_normal_axis(angle, axis.normalize())
    }

    /// Create a rotation of `angle` radians around a unit length `axis`
    #[must_use]
    pub fn from_angle_normal_axis(angle: f64, axis: Vector3) -> Self {
        let cos = DefaultBackend::cos(angle);
        let sin = DefaultBackend::sin(angle);
        let one_minus_cos = 1.0 - cos;

        let x2 = axis.x * axis.x;
        let y2 = axis.y * axis.y;
        let z2 = axis.z * axis.z;
        let xym = axis.x * axis.y * one_minus_cos;
        let xzm = axis.x * axis.z * one_minus_cos;
        let yzm = axis.y * axis.z * one_minus_cos;
        let x_sin = axis.x * sin;
        let y_sin = axis.y * sin;
        let z_sin = axis.z * sin;

        Self::new(x2 * one_minus_cos + cos, xym - z_sin              , xzm + y_sin,
                  xym + z_sin             , y2 * one_minus_cos + cos , yzm - x_sin,
                  xzm - y_sin             , yzm + x_sin              , z2 * one_minus_cos + cos)
    }

    /// Create a rotation from euler angles, in radians.
    ///
    /// `yaw` rotates around x, `roll` around y and `pitch` around z, applied in that order.
    #[must_use]
    pub fn from_angles(yaw: f64, roll: f64, pitch: f64) -> Self {
        let ch = DefaultBackend::cos(roll);
        let sh = DefaultBackend::sin(roll);
        let cp = DefaultBackend::cos(pitch);
        let sp = DefaultBackend::sin(pitch);
        let cy = DefaultBackend::cos(yaw);
        let sy = DefaultBackend::sin(yaw);

        Self::new(ch * cp , sh * sy - ch * sp * cy, ch * sp * sy + sh * cy,
                  sp      , cp * cy               , -cp * sy,
                  -sh * cp, sh * sp * cy + ch * sy, -sh * sp * sy + ch * cy)
    }

    /// Extract euler angles `[yaw, roll, pitch]`, compatible with [`Matrix3::from_angles`].
    ///
    /// The angles are not guaranteed to be the ones the matrix was created with, but they describe the same rotation.
    /// At the poles (pitch of +-pi/2) the yaw is folded into the roll.
    #[must_use]
    pub fn to_angles(&self) -> [f64; 3] {
        let [m00, _m01, m02, m10, m11, m12, m20, _m21, m22] = self.vals;
        if m10 > 1.0 - ZERO_TOLERANCE {
            [0.0, m02.atan2(m22), HALF_PI]
        } else if m10 < -1.0 + ZERO_TOLERANCE {
            [0.0, m02.atan2(m22), -HALF_PI]
        } else {
            [(-m12).atan2(m11), (-m20).atan2(m00), m10.asin()]
        }
    }

    /// Create a rotation matrix from a quaternion, the quaternion does not need to be normalized
    #[inline]
    #[must_use]
    pub fn from_quaternion(quat: Quaternion) -> Self {
        quat.to_rotation_matrix()
    }

    /// Create the rotation that rotates unit vector `start` onto unit vector `end`
    #[must_use]
    pub fn from_start_end(start: Vector3, end: Vector3) -> Self {
        let v = start.cross(end);
        let e = start.dot(end);

        if e.abs() > 1.0 - ZERO_TOLERANCE {
            // Nearly parallel, reflect twice through the axis least aligned with `start`
            let abs = start.abs();
            let x = if abs.x < abs.y {
                if abs.x < abs.z { Vector3::UNIT_X } else { Vector3::UNIT_Z }
            } else {
                if abs.y < abs.z { Vector3::UNIT_Y } else { Vector3::UNIT_Z }
            };

            let u = x - start;
            let v = x - end;
            let c1 = 2.0 / u.dot(u);
            let c2 = 2.0 / v.dot(v);
            let c3 = c1 * c2 * u.dot(v);

            let mut res = Self::IDENTITY;
            for row in 0..3 {
                for column in 0..3 {
                    res.vals[row * 3 + column] += -c1 * u[row] * u[column] - c2 * v[row] * v[column] + c3 * v[row] * u[column];
                }
            }
            res
        } else {
            let h = 1.0 / (1.0 + e);
            let hvx = h * v.x;
            let hvz = h * v.z;
            let hvxy = hvx * v.y;
            let hvxz = hvx * v.z;
            let hvyz = hvz * v.y;

            Self::new(e + hvx * v.x, hvxy - v.z       , hvxz + v.y,
                      hvxy + v.z   , e + h * v.y * v.y, hvyz - v.x,
                      hvxz - v.y   , hvyz + v.x       , e + hvz * v.z)
        }
    }

    /// Create a rotation whose z-axis points along `direction`, with the y-axis as close to `up` as possible
    #[must_use]
    pub fn look_at(direction: Vector3, up: Vector3) -> Self {
        let z_axis = direction.normalize();
        let x_axis = up.normalize().cross(z_axis).normalize();
        let y_axis = z_axis.cross(x_axis);
        Self::from_axes(x_axis, y_axis, z_axis)
    }

    /// Rotate the matrix by `angle` radians around `axis`, the rotation is applied after the current matrix (`self * R`)
    #[inline]
    #[must_use]
    pub fn apply_rotation(self, angle: f64, axis: Vector3) -> Self {
        self.multiply(Self::from_angle_axis(angle, axis))
    }

    /// Rotate the matrix around the x-axis (`self * Rx`)
    #[must_use]
    pub fn apply_rotation_x(self, angle: f64) -> Self {
        let cos = DefaultBackend::cos(angle);
        let sin = DefaultBackend::sin(angle);
        self.multiply(Self::new(1.0, 0.0,  0.0,
                                0.0, cos, -sin,
                                0.0, sin,  cos))
    }

    /// Rotate the matrix around the y-axis (`self * Ry`)
    #[must_use]
    pub fn apply_rotation_y(self, angle: f64) -> Self {
        let cos = DefaultBackend::cos(angle);
        let sin = DefaultBackend::sin(angle);
        self.multiply(Self::new( cos, 0.0, sin,
                                 0.0, 1.0, 0.0,
                                -sin, 0.0, cos))
    }

    /// Rotate the matrix around the z-axis (`self * Rz`)
    #[must_use]
    pub fn apply_rotation_z(self, angle: f64) -> Self {
        let cos = DefaultBackend::cos(angle);
        let sin = DefaultBackend::sin(angle);
        self.multiply(Self::new(cos, -sin, 0.0,
                                sin,  cos, 0.0,
                                0.0,  0.0, 1.0))
    }

    /// Calculate `self * diag(vec)`, i.e. scale each column by the matching component
    #[must_use]
    pub fn multiply_diagonal_post(mut self, vec: Vector3) -> Self {
        for row in 0..3 {
            self.vals[row * 3 + 0] *= vec.x;
            self.vals[row * 3 + 1] *= vec.y;
            self.vals[row * 3 + 2] *= vec.z;
        }
        self
    }

    /// Calculate `diag(vec) * self`, i.e. scale each row by the matching component
    #[must_use]
    pub fn multiply_diagonal_pre(mut self, vec: Vector3) -> Self {
        for column in 0..3 {
            self.vals[column + 0] *= vec.x;
            self.vals[column + 3] *= vec.y;
            self.vals[column + 6] *= vec.z;
        }
        self
    }

    /// Scale the columns of the matrix, same as [`Matrix3::multiply_diagonal_post`]
    #[inline]
    #[must_use]
    pub fn scale(self, scale: Vector3) -> Self {
        self.multiply_diagonal_post(scale)
    }

    /// Transform a column vector: `self * vec`
    #[inline]
    #[must_use]
    pub fn apply_post(&self, vec: Vector3) -> Vector3 {
        let m = &self.vals;
        Vector3::new(m[0] * vec.x + m[1] * vec.y + m[2] * vec.z,
                     m[3] * vec.x + m[4] * vec.y + m[5] * vec.z,
                     m[6] * vec.x + m[7] * vec.y + m[8] * vec.z)
    }

    /// Transform a row vector: `vec * self`
    #[inline]
    #[must_use]
    pub fn apply_pre(&self, vec: Vector3) -> Vector3 {
        let m = &self.vals;
        Vector3::new(m[0] * vec.x + m[3] * vec.y + m[6] * vec.z,
                     m[1] * vec.x + m[4] * vec.y + m[7] * vec.z,
                     m[2] * vec.x + m[5] * vec.y + m[8] * vec.z)
    }

    /// Calculate the determinant, using cofactor expansion along the first row
    #[must_use]
    pub fn determinant(&self) -> f64 {
        let [m00, m01, m02, m10, m11, m12, m20, m21, m22] = self.vals;
        m00 * (m11 * m22 - m12 * m21) - m01 * (m10 * m22 - m12 * m20) + m02 * (m10 * m21 - m11 * m20)
    }

    /// Calculate the adjugate (transposed cofactor matrix), this is also defined for singular matrices
    #[must_use]
    pub fn adjugate(&self) -> Self {
        let [m00, m01, m02, m10, m11, m12, m20, m21, m22] = self.vals;
        Self::new(m11 * m22 - m12 * m21, m02 * m21 - m01 * m22, m01 * m12 - m02 * m11,
                  m12 * m20 - m10 * m22, m00 * m22 - m02 * m20, m02 * m10 - m00 * m12,
                  m10 * m21 - m11 * m20, m01 * m20 - m00 * m21, m00 * m11 - m01 * m10)
    }

    /// Calculate the inverse as `adjugate / determinant`
    ///
    /// Only a determinant of exactly 0 is treated as singular.
    pub fn invert(&self) -> Result<Self> {
        let det = self.determinant();
        if det == 0.0 {
            log_debug!(crate::LOG_CAT, Matrix3::invert, "Tried to invert singular matrix {}", self);
            return Err(Error::SingularMatrix);
        }
        Ok(self.adjugate() * (1.0 / det))
    }

    /// Check if the rows of the matrix are unit length and mutually perpendicular, within [`ZERO_TOLERANCE`]
    #[must_use]
    pub fn is_orthonormal(&self) -> bool {
        let rows = [self.row_unchecked(0), self.row_unchecked(1), self.row_unchecked(2)];
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                if !((rows[i].dot(rows[j]) - expected).abs() <= ZERO_TOLERANCE) {
                    return false;
                }
            }
        }
        true
    }
}

impl Mul<Vector3> for Matrix3 {
    type Output = Vector3;

    #[inline]
    fn mul(self, rhs: Vector3) -> Vector3 {
        self.apply_post(rhs)
    }
}

impl Mul<Matrix3> for Vector3 {
    type Output = Vector3;

    #[inline]
    fn mul(self, rhs: Matrix3) -> Vector3 {
        rhs.apply_pre(self)
    }
}

impl Display for Matrix3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("[[{}, {}, {}], [{}, {}, {}], [{}, {}, {}]]",
            self.vals[0], self.vals[1], self.vals[2],
            self.vals[3], self.vals[4], self.vals[5],
            self.vals[6], self.vals[7], self.vals[8]
        ))
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    const EPS : f64 = 1e-6;

    #[test]
    fn determinant() {
        let mat = Matrix3::new(-3.0, 2.0, -5.0, -1.0, 0.0, -2.0, 3.0, -4.0, 1.0);
        let (a, b, c, d, e, f, g, h, i) = (-3.0, 2.0, -5.0, -1.0, 0.0, -2.0, 3.0, -4.0, 1.0);
        let rule_of_sarrus = a * e * i + b * f * g + c * d * h - c * e * g - b * d * i - a * f * h;
        assert_eq!(mat.determinant(), rule_of_sarrus);
        assert_eq!(mat.determinant(), -6.0);
        assert_eq!(Matrix3::IDENTITY.determinant(), 1.0);
    }

    #[test]
    fn adjugate_and_invert() {
        let mat = Matrix3::new(-3.0, 2.0, -5.0, -1.0, 0.0, -2.0, 3.0, -4.0, 1.0);
        let adj = mat.adjugate();
        assert!((mat * adj).is_close_to(Matrix3::IDENTITY * mat.determinant(), 1e-12));

        let inv = mat.invert().unwrap();
        assert!((mat * inv).is_close_to(Matrix3::IDENTITY, 1e-12));
        assert!((inv * mat).is_close_to(Matrix3::IDENTITY, 1e-12));

        let mut local = mat;
        local.invert_local().unwrap();
        assert_eq!(local, inv);
    }

    #[test]
    fn singular_invert() {
        let singular = Matrix3::new(1.0, 2.0, 3.0, 2.0, 4.0, 6.0, 0.0, 1.0, 1.0);
        assert_eq!(singular.determinant(), 0.0);
        assert_eq!(singular.invert(), Err(Error::SingularMatrix));

        let mut local = singular;
        assert!(local.invert_local().is_err());
        assert_eq!(local, singular);

        // The adjugate is still defined
        assert!((singular * singular.adjugate()).is_close_to(Matrix3::ZERO, 1e-12));
    }

    #[test]
    fn angles_round_trip() {
        for (yaw, roll, pitch) in [(HALF_PI, QUARTER_PI, PI), (QUARTER_PI, PI, HALF_PI), (0.3, -1.2, 0.7), (1.0, 2.0, -HALF_PI)] {
            let mat = Matrix3::from_angles(yaw, roll, pitch);
            let [a, b, c] = mat.to_angles();
            let rebuilt = Matrix3::from_angles(a, b, c);
            assert!(rebuilt.is_close_to(mat, EPS), "{mat} != {rebuilt}");
        }
    }

    #[test]
    fn angle_axis_matches_axis_rotations() {
        let angle = 0.8;
        assert!(Matrix3::from_angle_axis(angle, Vector3::UNIT_X).is_close_to(Matrix3::IDENTITY.apply_rotation_x(angle), EPS));
        assert!(Matrix3::from_angle_axis(angle, Vector3::new(0.0, 3.0, 0.0)).is_close_to(Matrix3::IDENTITY.apply_rotation_y(angle), EPS));
        assert!(Matrix3::from_angle_axis(angle, Vector3::UNIT_Z).is_close_to(Matrix3::IDENTITY.apply_rotation_z(angle), EPS));

        let rot = Matrix3::from_angle_axis(HALF_PI, Vector3::UNIT_Z);
        assert!((rot * Vector3::UNIT_X).is_close_to(Vector3::UNIT_Y, EPS));
        assert!(rot.is_orthonormal());

        let twice = rot.apply_rotation(HALF_PI, Vector3::UNIT_Z);
        assert!((twice * Vector3::UNIT_X).is_close_to(Vector3::NEG_UNIT_X, EPS));
    }

    #[test]
    fn start_end() {
        let start = Vector3::UNIT_X;
        let end = Vector3::new(1.0, 1.0, 0.0).normalize();
        let rot = Matrix3::from_start_end(start, end);
        assert!((rot * start).is_close_to(end, EPS));
        assert!(rot.is_orthonormal());

        // Parallel and anti-parallel take the reflection path
        let same = Matrix3::from_start_end(Vector3::UNIT_Y, Vector3::UNIT_Y);
        assert!((same * Vector3::UNIT_Y).is_close_to(Vector3::UNIT_Y, EPS));

        let opposite = Matrix3::from_start_end(Vector3::UNIT_Y, Vector3::NEG_UNIT_Y);
        assert!((opposite * Vector3::UNIT_Y).is_close_to(Vector3::NEG_UNIT_Y, EPS));
        assert!(opposite.is_orthonormal());
    }

    #[test]
    fn look_at() {
        let rot = Matrix3::look_at(Vector3::new(0.0, 0.0, 2.0), Vector3::UNIT_Y);
        assert!(rot.is_close_to(Matrix3::IDENTITY, EPS));

        let rot = Matrix3::look_at(Vector3::UNIT_X, Vector3::UNIT_Y);
        assert!((rot * Vector3::UNIT_Z).is_close_to(Vector3::UNIT_X, EPS));
        assert!(rot.is_orthonormal());
    }

    #[test]
    fn orthonormal() {
        assert!(Matrix3::IDENTITY.is_orthonormal());
        assert!(Matrix3::from_angles(0.2, 0.4, 0.6).is_orthonormal());
        assert!(!Matrix3::from_diagonal(Vector3::new(1.0, 2.0, 1.0)).is_orthonormal());
        assert!(!Matrix3::new(1.0, 0.1, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0).is_orthonormal());
    }

    #[test]
    fn apply_pre_post() {
        let mat = Matrix3::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0);
        let vec = Vector3::new(1.0, 0.0, -1.0);
        assert_eq!(mat.apply_post(vec), Vector3::new(-2.0, -2.0, -2.0));
        assert_eq!(mat.apply_pre(vec), Vector3::new(-6.0, -6.0, -6.0));
        assert_eq!(vec * mat, mat.transpose() * vec);
    }

    #[test]
    fn diagonal_multiplication() {
        let mat = Matrix3::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0);
        let diag = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(mat.multiply_diagonal_post(diag), mat * Matrix3::from_diagonal(diag));
        assert_eq!(mat.multiply_diagonal_pre(diag), Matrix3::from_diagonal(diag) * mat);
        assert_eq!(mat.scale(diag), mat.multiply_diagonal_post(diag));
    }

    #[test]
    fn rows_columns_and_axes() {
        let mut mat = Matrix3::from_rows(Vector3::new(1.0, 2.0, 3.0), Vector3::new(4.0, 5.0, 6.0), Vector3::new(7.0, 8.0, 9.0));
        assert_eq!(mat.row(1), Ok(Vector3::new(4.0, 5.0, 6.0)));
        assert_eq!(mat.column(2), Ok(Vector3::new(3.0, 6.0, 9.0)));
        assert!(mat.row(3).is_err());
        assert!(mat.column(3).is_err());

        let copy = mat;
        assert!(mat.set_row(3, Vector3::ZERO).is_err());
        assert!(mat.set_column(5, Vector3::ZERO).is_err());
        assert!(mat.set_value(0, 3, 1.0).is_err());
        assert_eq!(mat, copy);

        mat.set_column(0, Vector3::ZERO).unwrap();
        assert_eq!(mat.value(2, 0), Ok(0.0));
        assert_eq!(mat[(2, 1)], 8.0);

        let [x, y, z] = Matrix3::from_axes(Vector3::UNIT_Y, Vector3::UNIT_Z, Vector3::UNIT_X).to_axes();
        assert_eq!((x, y, z), (Vector3::UNIT_Y, Vector3::UNIT_Z, Vector3::UNIT_X));
    }

    #[test]
    fn buffers() {
        let mat = Matrix3::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0);

        let mut buf = [0.0; 10];
        mat.write_to_slice(&mut buf, true).unwrap();
        assert_eq!(buf[..9], [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        mat.write_to_slice(&mut buf, false).unwrap();
        assert_eq!(buf[..9], [1.0, 4.0, 7.0, 2.0, 5.0, 8.0, 3.0, 6.0, 9.0]);
        assert_eq!(Matrix3::from_slice(&buf, false), Ok(mat));

        let mut fbuf = [0.0f32; 9];
        mat.write_to_f32_slice(&mut fbuf, false).unwrap();
        assert_eq!(fbuf[1], 4.0);
        assert_eq!(Matrix3::from_f32_slice(&fbuf, false), Ok(mat));

        assert_eq!(Matrix3::from_slice(&buf[..8], true), Err(Error::BufferTooSmall { required: 9, found: 8 }));
        assert!(mat.write_to_f32_slice(&mut [0.0f32; 4], true).is_err());
    }

    #[test]
    fn validity_and_identity() {
        assert!(Matrix3::IDENTITY.is_identity());
        assert!(Matrix3::default().is_identity());
        assert!(!Matrix3::ZERO.is_identity());

        let mut mat = Matrix3::IDENTITY;
        assert!(mat.is_valid());
        mat[4] = f64::NAN;
        assert!(!mat.is_valid());
        assert!(!mat.is_finite());
    }

    #[test]
    fn display() {
        assert_eq!(Matrix3::IDENTITY.to_string(), "[[1, 0, 0], [0, 1, 0], [0, 0, 1]]");
    }
}
