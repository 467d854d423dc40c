use core::{ops::Mul, fmt::Display};
use ardor_logging::log_debug;
use crate::*;

impl Matrix4 {
    /// Create a new matrix with the given values
    #[inline]
    #[must_use]
    pub const fn new(m00: f64, m01: f64, m02: f64, m03: f64,
                     m10: f64, m11: f64, m12: f64, m13: f64,
                     m20: f64, m21: f64, m22: f64, m23: f64,
                     m30: f64, m31: f64, m32: f64, m33: f64) -> Self {
        Self { vals: [m00, m01, m02, m03,
                      m10, m11, m12, m13,
                      m20, m21, m22, m23,
                      m30, m31, m32, m33] }
    }

    /// Create a new matrix with the given rows
    #[inline]
    #[must_use]
    pub fn from_rows(row0: Vector4, row1: Vector4, row2: Vector4, row3: Vector4) -> Self {
        Self { vals: [row0.x, row0.y, row0.z, row0.w,
                      row1.x, row1.y, row1.z, row1.w,
                      row2.x, row2.y, row2.z, row2.w,
                      row3.x, row3.y, row3.z, row3.w] }
    }

    /// Create a new matrix with the given columns
    #[inline]
    #[must_use]
    pub fn from_columns(column0: Vector4, column1: Vector4, column2: Vector4, column3: Vector4) -> Self {
        Self::from_rows(column0, column1, column2, column3).transpose()
    }

    /// Create a matrix with `mat` as the upper-left 3x3 block and identity elsewhere
    #[must_use]
    pub fn from_matrix3(mat: Matrix3) -> Self {
        let mut res = Self::IDENTITY;
        res.set_matrix3(mat);
        res
    }

    /// Overwrite the upper-left 3x3 block, keeping the translation and the last row
    pub fn set_matrix3(&mut self, mat: Matrix3) -> &mut Self {
        for row in 0..3 {
            for column in 0..3 {
                self.vals[row * 4 + column] = mat[(row, column)];
            }
        }
        self
    }

    /// Get the upper-left 3x3 block
    #[must_use]
    pub fn to_matrix3(&self) -> Matrix3 {
        let m = &self.vals;
        Matrix3::new(m[0], m[1], m[2],
                     m[4], m[5], m[6],
                     m[8], m[9], m[10])
    }

    fn row_unchecked(&self, index: usize) -> Vector4 {
        let idx = index * 4;
        Vector4::new(self.vals[idx], self.vals[idx + 1], self.vals[idx + 2], self.vals[idx + 3])
    }

    /// Get the row at the given index
    pub fn row(&self, index: usize) -> Result<Vector4> {
        check_index(index, 4)?;
        Ok(self.row_unchecked(index))
    }

    /// Set the row at the given index
    pub fn set_row(&mut self, index: usize, row: Vector4) -> Result<()> {
        check_index(index, 4)?;
        self.vals[index * 4..index * 4 + 4].copy_from_slice(&row.to_array());
        Ok(())
    }

    /// Get the column at the given index
    pub fn column(&self, index: usize) -> Result<Vector4> {
        check_index(index, 4)?;
        Ok(Vector4::new(self.vals[index], self.vals[index + 4], self.vals[index + 8], self.vals[index + 12]))
    }

    /// Set the column at the given index
    pub fn set_column(&mut self, index: usize, column: Vector4) -> Result<()> {
        check_index(index, 4)?;
        for (row, val) in column.to_array().into_iter().enumerate() {
            self.vals[row * 4 + index] = val;
        }
        Ok(())
    }

    /// Create a rotation of `angle` radians around `axis`, the axis is normalized first
    #[inline]
    #[must_use]
    pub fn from_angle_axis(angle: f64, axis: Vector3) -> Self {
        Self::from_matrix3(Matrix3::from_angle_axis(angle, axis))
    }

    /// Create a rotation of `angle` radians around a unit length `axis`
    #[inline]
    #[must_use]
    pub fn from_angle_normal_axis(angle: f64, axis: Vector3) -> Self {
        Self::from_matrix3(Matrix3::from_angle_normal_axis(angle, axis))
    }

    /// Create a translation matrix
    #[must_use]
    pub fn from_translation(translation: Vector3) -> Self {
        let mut res = Self::IDENTITY;
        res.vals[3]  = translation.x;
        res.vals[7]  = translation.y;
        res.vals[11] = translation.z;
        res
    }

    /// Get the translation column
    #[inline]
    #[must_use]
    pub fn translation(&self) -> Vector3 {
        Vector3::new(self.vals[3], self.vals[7], self.vals[11])
    }

    /// Rotate the matrix by `angle` radians around `axis` (`self * R`)
    #[inline]
    #[must_use]
    pub fn apply_rotation(self, angle: f64, axis: Vector3) -> Self {
        self.multiply(Self::from_angle_axis(angle, axis))
    }

    /// Rotate the matrix around the x-axis (`self * Rx`)
    #[inline]
    #[must_use]
    pub fn apply_rotation_x(self, angle: f64) -> Self {
        self.multiply(Self::from_matrix3(Matrix3::IDENTITY.apply_rotation_x(angle)))
    }

    /// Rotate the matrix around the y-axis (`self * Ry`)
    #[inline]
    #[must_use]
    pub fn apply_rotation_y(self, angle: f64) -> Self {
        self.multiply(Self::from_matrix3(Matrix3::IDENTITY.apply_rotation_y(angle)))
    }

    /// Rotate the matrix around the z-axis (`self * Rz`)
    #[inline]
    #[must_use]
    pub fn apply_rotation_z(self, angle: f64) -> Self {
        self.multiply(Self::from_matrix3(Matrix3::IDENTITY.apply_rotation_z(angle)))
    }

    /// Translate before the current matrix is applied (`self * T`)
    #[must_use]
    pub fn apply_translation_post(mut self, translation: Vector3) -> Self {
        for row in 0..4 {
            let idx = row * 4;
            self.vals[idx + 3] += self.vals[idx] * translation.x + self.vals[idx + 1] * translation.y + self.vals[idx + 2] * translation.z;
        }
        self
    }

    /// Translate after the current matrix is applied (`T * self`)
    #[must_use]
    pub fn apply_translation_pre(mut self, translation: Vector3) -> Self {
        let last_row = self.row_unchecked(3);
        for (row, offset) in translation.to_array().into_iter().enumerate() {
            for column in 0..4 {
                self.vals[row * 4 + column] += offset * last_row[column];
            }
        }
        self
    }

    /// Calculate `self * diag(vec)`, i.e. scale each column by the matching component
    #[must_use]
    pub fn multiply_diagonal_post(mut self, vec: Vector4) -> Self {
        for row in 0..4 {
            for column in 0..4 {
                self.vals[row * 4 + column] *= vec[column];
            }
        }
        self
    }

    /// Calculate `diag(vec) * self`, i.e. scale each row by the matching component
    #[must_use]
    pub fn multiply_diagonal_pre(mut self, vec: Vector4) -> Self {
        for row in 0..4 {
            for column in 0..4 {
                self.vals[row * 4 + column] *= vec[row];
            }
        }
        self
    }

    /// Scale the columns of the matrix, same as [`Matrix4::multiply_diagonal_post`]
    #[inline]
    #[must_use]
    pub fn scale(self, scale: Vector4) -> Self {
        self.multiply_diagonal_post(scale)
    }

    /// Transform a column vector: `self * vec`
    #[must_use]
    pub fn apply_post(&self, vec: Vector4) -> Vector4 {
        Vector4::new(self.row_unchecked(0).dot(vec),
                     self.row_unchecked(1).dot(vec),
                     self.row_unchecked(2).dot(vec),
                     self.row_unchecked(3).dot(vec))
    }

    /// Transform a row vector: `vec * self`
    #[must_use]
    pub fn apply_pre(&self, vec: Vector4) -> Vector4 {
        let m = &self.vals;
        Vector4::new(m[0] * vec.x + m[4] * vec.y + m[8]  * vec.z + m[12] * vec.w,
                     m[1] * vec.x + m[5] * vec.y + m[9]  * vec.z + m[13] * vec.w,
                     m[2] * vec.x + m[6] * vec.y + m[10] * vec.z + m[14] * vec.w,
                     m[3] * vec.x + m[7] * vec.y + m[11] * vec.z + m[15] * vec.w)
    }

    /// Transform a point: the translation column is applied, the last row is ignored
    #[must_use]
    pub fn apply_post_point(&self, point: Vector3) -> Vector3 {
        let m = &self.vals;
        Vector3::new(m[0] * point.x + m[1] * point.y + m[2]  * point.z + m[3],
                     m[4] * point.x + m[5] * point.y + m[6]  * point.z + m[7],
                     m[8] * point.x + m[9] * point.y + m[10] * point.z + m[11])
    }

    /// Transform a direction: only the upper-left 3x3 block is applied
    #[must_use]
    pub fn apply_post_vector(&self, vector: Vector3) -> Vector3 {
        let m = &self.vals;
        Vector3::new(m[0] * vector.x + m[1] * vector.y + m[2]  * vector.z,
                     m[4] * vector.x + m[5] * vector.y + m[6]  * vector.z,
                     m[8] * vector.x + m[9] * vector.y + m[10] * vector.z)
    }

    /// Get the 3x3 minor, skipping `skip_row` and `skip_column`
    fn minor(&self, skip_row: usize, skip_column: usize) -> Matrix3 {
        let mut vals = [0.0; 9];
        let mut idx = 0;
        for row in (0..4).filter(|row| *row != skip_row) {
            for column in (0..4).filter(|column| *column != skip_column) {
                vals[idx] = self.vals[row * 4 + column];
                idx += 1;
            }
        }
        Matrix3::from_array(vals)
    }

    /// Calculate the determinant, using cofactor expansion along the first row with 3x3 minors
    #[must_use]
    pub fn determinant(&self) -> f64 {
        self.vals[0] * self.minor(0, 0).determinant()
            - self.vals[1] * self.minor(0, 1).determinant()
            + self.vals[2] * self.minor(0, 2).determinant()
            - self.vals[3] * self.minor(0, 3).determinant()
    }

    /// Calculate the adjugate (transposed cofactor matrix), this is also defined for singular matrices
    #[must_use]
    pub fn adjugate(&self) -> Self {
        let [m00, m01, m02, m03,
             m10, m11, m12, m13,
             m20, m21, m22, m23,
             m30, m31, m32, m33] = self.vals;

        // 2x2 determinants of the upper (a) and lower (b) two rows
        let a0 = m00 * m11 - m01 * m10;
        let a1 = m00 * m12 - m02 * m10;
        let a2 = m00 * m13 - m03 * m10;
        let a3 = m01 * m12 - m02 * m11;
        let a4 = m01 * m13 - m03 * m11;
        let a5 = m02 * m13 - m03 * m12;
        let b0 = m20 * m31 - m21 * m30;
        let b1 = m20 * m32 - m22 * m30;
        let b2 = m20 * m33 - m23 * m30;
        let b3 = m21 * m32 - m22 * m31;
        let b4 = m21 * m33 - m23 * m31;
        let b5 = m22 * m33 - m23 * m32;

        Self::new( m11 * b5 - m12 * b4 + m13 * b3, -m01 * b5 + m02 * b4 - m03 * b3,  m31 * a5 - m32 * a4 + m33 * a3, -m21 * a5 + m22 * a4 - m23 * a3,
                  -m10 * b5 + m12 * b2 - m13 * b1,  m00 * b5 - m02 * b2 + m03 * b1, -m30 * a5 + m32 * a2 - m33 * a1,  m20 * a5 - m22 * a2 + m23 * a1,
                   m10 * b4 - m11 * b2 + m13 * b0, -m00 * b4 + m01 * b2 - m03 * b0,  m30 * a4 - m31 * a2 + m33 * a0, -m20 * a4 + m21 * a2 - m23 * a0,
                  -m10 * b3 + m11 * b1 - m12 * b0,  m00 * b3 - m01 * b1 + m02 * b0, -m30 * a3 + m31 * a1 - m32 * a0,  m20 * a3 - m21 * a1 + m22 * a0)
    }

    /// Calculate the inverse as `adjugate / determinant`
    ///
    /// Only a determinant of exactly 0 is treated as singular.
    pub fn invert(&self) -> Result<Self> {
        let det = self.determinant();
        if det == 0.0 {
            log_debug!(crate::LOG_CAT, Matrix4::invert, "Tried to invert singular matrix {}", self);
            return Err(Error::SingularMatrix);
        }
        Ok(self.adjugate() * (1.0 / det))
    }

    /// Check if the rows of the matrix are unit length and mutually perpendicular, within [`ZERO_TOLERANCE`]
    #[must_use]
    pub fn is_orthonormal(&self) -> bool {
        for i in 0..4 {
            let row_i = self.row_unchecked(i);
            for j in i..4 {
                let expected = if i == j { 1.0 } else { 0.0 };
                if !((row_i.dot(self.row_unchecked(j)) - expected).abs() <= ZERO_TOLERANCE) {
                    return false;
                }
            }
        }
        true
    }
}

impl Mul<Vector4> for Matrix4 {
    type Output = Vector4;

    #[inline]
    fn mul(self, rhs: Vector4) -> Vector4 {
        self.apply_post(rhs)
    }
}

impl Mul<Matrix4> for Vector4 {
    type Output = Vector4;

    #[inline]
    fn mul(self, rhs: Matrix4) -> Vector4 {
        rhs.apply_pre(self)
    }
}

impl Display for Matrix4 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[")?;
        for row in 0..4 {
            let idx = row * 4;
            if row != 0 {
                f.write_str(", ")?;
            }
            f.write_fmt(format_args!("[{}, {}, {}, {}]", self.vals[idx], self.vals[idx + 1], self.vals[idx + 2], self.vals[idx + 3]))?;
        }
        f.write_str("]")
    }
}
