use core::ops::*;
use crate::*;

mod matrix3;
pub use matrix3::*;

mod matrix4;
pub use matrix4::*;

macro_rules! generic_matrix {
    {$docs:meta; $name:ident, $n:literal} => {
        #[$docs]
        ///
        /// Values are stored in row-major order, `vals[row * N + column]`.
        #[derive(Clone, Copy, PartialEq, Debug)]
        pub struct $name {
            vals : [f64; $n * $n]
        }

        impl $name {
            /// Matrix with all values set to 0
            pub const ZERO : Self = Self { vals: [0.0; $n * $n] };

            /// Identity matrix
            pub const IDENTITY : Self = {
                let mut vals = [0.0; $n * $n];
                let mut i = 0;
                while i < $n {
                    vals[i * $n + i] = 1.0;
                    i += 1;
                }
                Self { vals }
            };

            /// Create a matrix from an array in row-major order
            #[inline(always)]
            #[must_use]
            pub const fn from_array(vals: [f64; $n * $n]) -> Self {
                Self { vals }
            }

            /// Get the content of the matrix as a row-major array
            #[inline(always)]
            #[must_use]
            pub const fn to_array(self) -> [f64; $n * $n] {
                self.vals
            }

            /// Interpret the matrix as a reference to a row-major array
            #[inline(always)]
            #[must_use]
            pub fn as_array(&self) -> &[f64; $n * $n] {
                &self.vals
            }

            /// Get the value at the given row and column
            pub fn value(&self, row: usize, column: usize) -> Result<f64> {
                check_index(row, $n)?;
                check_index(column, $n)?;
                Ok(self.vals[row * $n + column])
            }

            /// Set the value at the given row and column, the matrix is left untouched when either index is out of range
            pub fn set_value(&mut self, row: usize, column: usize, val: f64) -> Result<()> {
                check_index(row, $n)?;
                check_index(column, $n)?;
                self.vals[row * $n + column] = val;
                Ok(())
            }

            /// Read a matrix from a buffer, stored either in row-major or column-major order
            pub fn from_slice(buf: &[f64], row_major: bool) -> Result<Self> {
                check_buffer_len(buf.len(), $n * $n)?;
                let mut mat = Self::ZERO;
                mat.vals.copy_from_slice(&buf[..$n * $n]);
                Ok(if row_major { mat } else { mat.transpose() })
            }

            /// Read a matrix from a single precision buffer, stored either in row-major or column-major order
            pub fn from_f32_slice(buf: &[f32], row_major: bool) -> Result<Self> {
                check_buffer_len(buf.len(), $n * $n)?;
                let mut mat = Self::ZERO;
                for (dst, src) in mat.vals.iter_mut().zip(buf) {
                    *dst = *src as f64;
                }
                Ok(if row_major { mat } else { mat.transpose() })
            }

            /// Write the matrix to the start of a buffer, either in row-major or column-major order
            pub fn write_to_slice(&self, buf: &mut [f64], row_major: bool) -> Result<()> {
                check_buffer_len(buf.len(), $n * $n)?;
                let src = if row_major { *self } else { self.transpose() };
                buf[..$n * $n].copy_from_slice(&src.vals);
                Ok(())
            }

            /// Write the matrix to the start of a single precision buffer, either in row-major or column-major order
            pub fn write_to_f32_slice(&self, buf: &mut [f32], row_major: bool) -> Result<()> {
                check_buffer_len(buf.len(), $n * $n)?;
                let src = if row_major { *self } else { self.transpose() };
                for (dst, val) in buf.iter_mut().zip(src.vals) {
                    *dst = val as f32;
                }
                Ok(())
            }

            /// Get the transpose of the matrix
            #[must_use]
            pub fn transpose(self) -> Self {
                let mut res = Self::ZERO;
                for row in 0..$n {
                    for column in 0..$n {
                        res.vals[column * $n + row] = self.vals[row * $n + column];
                    }
                }
                res
            }

            /// Transpose the matrix in place
            #[inline]
            pub fn transpose_local(&mut self) -> &mut Self {
                *self = self.transpose();
                self
            }

            /// Calculate `self * rhs`
            #[must_use]
            pub fn multiply(self, rhs: Self) -> Self {
                let mut res = Self::ZERO;
                for row in 0..$n {
                    for column in 0..$n {
                        let mut sum = 0.0;
                        for k in 0..$n {
                            sum += self.vals[row * $n + k] * rhs.vals[k * $n + column];
                        }
                        res.vals[row * $n + column] = sum;
                    }
                }
                res
            }

            /// Calculate `self * rhs` in place
            #[inline]
            pub fn multiply_local(&mut self, rhs: Self) -> &mut Self {
                *self = self.multiply(rhs);
                self
            }

            /// Check if the matrix is exactly the identity matrix
            #[inline]
            #[must_use]
            pub fn is_identity(&self) -> bool {
                *self == Self::IDENTITY
            }

            /// Check that no value is NaN or infinite
            #[must_use]
            pub fn is_valid(&self) -> bool {
                self.vals.iter().all(|val| val.is_finite())
            }

            /// Check that all values are finite
            #[inline]
            #[must_use]
            pub fn is_finite(&self) -> bool {
                self.is_valid()
            }

            /// Invert the matrix in place, the matrix is left untouched when it is singular
            pub fn invert_local(&mut self) -> Result<&mut Self> {
                *self = self.invert()?;
                Ok(self)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::IDENTITY
            }
        }

        //------------------------------------------------------------------------------------------------------------------------------

        impl Index<usize> for $name {
            type Output = f64;

            fn index(&self, index: usize) -> &Self::Output {
                debug_assert!(index < $n * $n);
                &self.vals[index]
            }
        }

        impl IndexMut<usize> for $name {
            fn index_mut(&mut self, index: usize) -> &mut Self::Output {
                debug_assert!(index < $n * $n);
                &mut self.vals[index]
            }
        }

        impl Index<(usize, usize)> for $name {
            type Output = f64;

            fn index(&self, index: (usize, usize)) -> &Self::Output {
                debug_assert!(index.0 < $n);
                debug_assert!(index.1 < $n);
                &self.vals[index.0 * $n + index.1]
            }
        }

        impl IndexMut<(usize, usize)> for $name {
            fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
                debug_assert!(index.0 < $n);
                debug_assert!(index.1 < $n);
                &mut self.vals[index.0 * $n + index.1]
            }
        }

        //------------------------------------------------------------------------------------------------------------------------------

        impl Add for $name {
            type Output = Self;

            fn add(mut self, rhs: Self) -> Self::Output {
                for (lhs, rhs) in self.vals.iter_mut().zip(rhs.vals) {
                    *lhs += rhs;
                }
                self
            }
        }

        impl AddAssign for $name {
            fn add_assign(&mut self, rhs: Self) {
                *self = *self + rhs;
            }
        }

        impl Sub for $name {
            type Output = Self;

            fn sub(mut self, rhs: Self) -> Self::Output {
                for (lhs, rhs) in self.vals.iter_mut().zip(rhs.vals) {
                    *lhs -= rhs;
                }
                self
            }
        }

        impl SubAssign for $name {
            fn sub_assign(&mut self, rhs: Self) {
                *self = *self - rhs;
            }
        }

        impl Neg for $name {
            type Output = Self;

            fn neg(self) -> Self::Output {
                self * -1.0
            }
        }

        impl Mul<f64> for $name {
            type Output = Self;

            fn mul(mut self, rhs: f64) -> Self::Output {
                for val in &mut self.vals {
                    *val *= rhs;
                }
                self
            }
        }

        impl MulAssign<f64> for $name {
            fn mul_assign(&mut self, rhs: f64) {
                *self = *self * rhs;
            }
        }

        impl Mul<$name> for f64 {
            type Output = $name;

            fn mul(self, rhs: $name) -> $name {
                rhs * self
            }
        }

        impl Div<f64> for $name {
            type Output = Self;

            fn div(mut self, rhs: f64) -> Self::Output {
                for val in &mut self.vals {
                    *val /= rhs;
                }
                self
            }
        }

        impl DivAssign<f64> for $name {
            fn div_assign(&mut self, rhs: f64) {
                *self = *self / rhs;
            }
        }

        impl Mul for $name {
            type Output = Self;

            #[inline]
            fn mul(self, rhs: Self) -> Self::Output {
                self.multiply(rhs)
            }
        }

        impl MulAssign for $name {
            #[inline]
            fn mul_assign(&mut self, rhs: Self) {
                *self = self.multiply(rhs);
            }
        }

        //------------------------------------------------------------------------------------------------------------------------------

        impl ApproxEq for $name {
            type Epsilon = f64;
            const DEFAULT_EPSILON : f64 = ALLOWED_DEVIANCE;

            fn is_close_to(self, rhs: Self, epsilon: f64) -> bool {
                self.vals.iter().zip(rhs.vals).all(|(lhs, rhs)| lhs.is_close_to(rhs, epsilon))
            }
        }

        impl From<[f64; $n * $n]> for $name {
            fn from(vals: [f64; $n * $n]) -> Self {
                Self { vals }
            }
        }
    };
}

generic_matrix!{ doc = "3x3 matrix, mostly used as a rotation"; Matrix3, 3 }
generic_matrix!{ doc = "4x4 matrix, used for homogeneous transforms and projections"; Matrix4, 4 }

static_assertions::assert_eq_size!(Matrix3, [u8; 72]);
static_assertions::assert_eq_size!(Matrix4, [u8; 128]);
