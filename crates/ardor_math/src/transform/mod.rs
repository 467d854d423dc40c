use core::fmt::Display;
use ardor_common_macros::flags;
use crate::*;

mod validating;
pub use validating::*;

/// Shortcut flags cached by a [`Transform`]
#[flags]
pub enum TransformFlags {
    /// The transform does nothing
    Identity,
    /// The matrix is a pure rotation and the scale is stored separately
    RotationMatrix,
    /// All scale components are equal
    UniformScale,
}

/// Rotation, scale and translation, applied to a point in the order scale, rotate, translate
///
/// The transform owns copies of its parts, so the cached [`TransformFlags`] always describe the current state.
/// When the matrix is not a pure rotation (see [`Transform::is_rotation_matrix`]), it also holds the scale and the scale vector is ignored.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Transform {
    matrix      : Matrix3,
    scale       : Vector3,
    translation : Vector3,
    flags       : TransformFlags,
}

impl Transform {
    /// Transform that leaves everything as-is
    pub const IDENTITY : Self = Self {
        matrix: Matrix3::IDENTITY,
        scale: Vector3::ONE,
        translation: Vector3::ZERO,
        flags: TransformFlags::Identity.union(TransformFlags::RotationMatrix).union(TransformFlags::UniformScale),
    };

    /// Create an identity transform
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self::IDENTITY
    }

    /// Get the rotation matrix, or the full 3x3 matrix when it is not a pure rotation
    #[inline]
    #[must_use]
    pub fn matrix(&self) -> Matrix3 {
        self.matrix
    }

    /// Get the rotation part as a quaternion, only meaningful when [`Transform::is_rotation_matrix`] is `true`
    #[inline]
    #[must_use]
    pub fn rotation(&self) -> Quaternion {
        Quaternion::from_rotation_matrix(&self.matrix)
    }

    /// Get the scale
    #[inline]
    #[must_use]
    pub fn scale(&self) -> Vector3 {
        self.scale
    }

    /// Get the translation
    #[inline]
    #[must_use]
    pub fn translation(&self) -> Vector3 {
        self.translation
    }

    /// Get the cached shortcut flags
    #[inline]
    #[must_use]
    pub fn flags(&self) -> TransformFlags {
        self.flags
    }

    /// Check if the transform does nothing
    #[inline]
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.flags.contains(TransformFlags::Identity)
    }

    /// Check if the matrix is a pure rotation, with the scale stored separately
    #[inline]
    #[must_use]
    pub fn is_rotation_matrix(&self) -> bool {
        self.flags.contains(TransformFlags::RotationMatrix)
    }

    /// Check if the scale is the same on every axis
    #[inline]
    #[must_use]
    pub fn is_uniform_scale(&self) -> bool {
        self.flags.contains(TransformFlags::UniformScale)
    }

    /// Reset the transform to the identity
    pub fn set_identity(&mut self) -> &mut Self {
        *self = Self::IDENTITY;
        self
    }

    /// Set the 3x3 matrix, which does not need to be a pure rotation
    ///
    /// When the matrix is not orthonormal, it is treated as a general matrix that includes scale.
    pub fn set_rotation(&mut self, rotation: Matrix3) -> &mut Self {
        self.matrix = rotation;
        self.update_flags(false);
        self
    }

    /// Set the rotation from a quaternion
    pub fn set_rotation_quaternion(&mut self, rotation: Quaternion) -> &mut Self {
        self.matrix = rotation.to_rotation_matrix();
        self.update_flags(true);
        self
    }

    /// Set the translation
    pub fn set_translation(&mut self, translation: Vector3) -> &mut Self {
        self.translation = translation;
        self.flags.set(TransformFlags::Identity, self.is_identity() && translation == Vector3::ZERO);
        self
    }

    /// Add an offset to the translation
    pub fn translate(&mut self, offset: Vector3) -> &mut Self {
        self.translation += offset;
        self.flags.set(TransformFlags::Identity, self.is_identity() && self.translation == Vector3::ZERO);
        self
    }

    /// Set a non-uniform scale
    ///
    /// Fails when the matrix already holds the scale, or when all components are 0.
    pub fn set_scale(&mut self, scale: Vector3) -> Result<&mut Self> {
        if !self.is_rotation_matrix() {
            return Err(Error::ScaleOnGeneralMatrix);
        }
        if scale == Vector3::ZERO {
            return Err(Error::ZeroScale);
        }

        self.scale = scale;
        self.flags.set(TransformFlags::Identity, self.is_identity() && scale == Vector3::ONE);
        self.flags.set(TransformFlags::UniformScale, scale.x == scale.y && scale.y == scale.z);
        Ok(self)
    }

    /// Set the same scale on every axis
    pub fn set_scale_uniform(&mut self, scale: f64) -> Result<&mut Self> {
        if !self.is_rotation_matrix() {
            return Err(Error::ScaleOnGeneralMatrix);
        }
        if scale == 0.0 {
            return Err(Error::ZeroScale);
        }

        self.scale = Vector3::set(scale);
        self.flags.set(TransformFlags::Identity, self.is_identity() && scale == 1.0);
        self.flags.enable(TransformFlags::UniformScale);
        Ok(self)
    }

    /// Recalculate the flags from the current state
    ///
    /// When `rotation_guaranteed` is set, the matrix is known to be a pure rotation and is not checked.
    fn update_flags(&mut self, rotation_guaranteed: bool) {
        let identity = self.translation == Vector3::ZERO && self.matrix.is_identity() && self.scale == Vector3::ONE;
        self.flags = if identity {
            TransformFlags::Identity | TransformFlags::RotationMatrix | TransformFlags::UniformScale
        } else {
            let mut flags = TransformFlags::none();
            let rotation = rotation_guaranteed || self.matrix.is_orthonormal();
            flags.set(TransformFlags::RotationMatrix, rotation);
            flags.set(TransformFlags::UniformScale, rotation && self.scale.x == self.scale.y && self.scale.y == self.scale.z);
            flags
        };
    }

    /// The matrix including the scale, i.e. `M * diag(S)` for a rotation matrix
    fn scaled_matrix(&self) -> Matrix3 {
        if self.is_rotation_matrix() {
            self.matrix.multiply_diagonal_post(self.scale)
        } else {
            self.matrix
        }
    }

    /// Transform a point: scale, rotate, then translate
    #[must_use]
    pub fn apply_forward(&self, point: Vector3) -> Vector3 {
        if self.is_identity() {
            return point;
        }
        self.apply_forward_vector(point) + self.translation
    }

    /// Transform a direction: scale and rotate, without translating
    #[must_use]
    pub fn apply_forward_vector(&self, vector: Vector3) -> Vector3 {
        if self.is_identity() {
            return vector;
        }
        if self.is_rotation_matrix() {
            self.matrix.apply_post(vector * self.scale)
        } else {
            self.matrix.apply_post(vector)
        }
    }

    /// Undo [`Transform::apply_forward`] on a point
    ///
    /// Fails when the transform has a zero scale component or a singular matrix.
    pub fn apply_inverse(&self, point: Vector3) -> Result<Vector3> {
        if self.is_identity() {
            return Ok(point);
        }
        self.apply_inverse_vector(point - self.translation)
    }

    /// Undo [`Transform::apply_forward_vector`] on a direction
    pub fn apply_inverse_vector(&self, vector: Vector3) -> Result<Vector3> {
        if self.is_identity() {
            return Ok(vector);
        }
        if self.is_rotation_matrix() {
            self.check_scale_invertible()?;
            let rotated = self.matrix.apply_pre(vector);
            Ok(if self.is_uniform_scale() { rotated / self.scale.x } else { rotated / self.scale })
        } else {
            let inverse = self.matrix.invert().map_err(|_| Error::NonInvertibleTransform)?;
            Ok(inverse.apply_post(vector))
        }
    }

    fn check_scale_invertible(&self) -> Result<()> {
        if self.scale.x == 0.0 || self.scale.y == 0.0 || self.scale.z == 0.0 {
            Err(Error::NonInvertibleTransform)
        } else {
            Ok(())
        }
    }

    /// Combine 2 transforms, the result applies `rhs` first and `self` second
    ///
    /// When both are rotations and `self` has a uniform scale, the result keeps its scale separate,
    /// otherwise the result is a general matrix with the scale folded in.
    #[must_use]
    pub fn multiply(&self, rhs: &Transform) -> Transform {
        if self.is_identity() {
            return *rhs;
        }
        if rhs.is_identity() {
            return *self;
        }

        let shortcut = self.is_rotation_matrix() && rhs.is_rotation_matrix() && self.is_uniform_scale();
        let mut res = if shortcut {
            let uniform = self.scale.x;
            Transform {
                matrix: self.matrix * rhs.matrix,
                scale: rhs.scale * uniform,
                translation: self.matrix.apply_post(rhs.translation) * uniform + self.translation,
                flags: TransformFlags::none(),
            }
        } else {
            let lhs_mat = self.scaled_matrix();
            Transform {
                matrix: lhs_mat * rhs.scaled_matrix(),
                scale: Vector3::ONE,
                translation: lhs_mat.apply_post(rhs.translation) + self.translation,
                flags: TransformFlags::none(),
            }
        };
        res.update_flags(shortcut);
        res
    }

    /// Calculate the inverse transform
    ///
    /// Fails when the transform has a zero scale component or a singular matrix.
    pub fn invert(&self) -> Result<Transform> {
        if self.is_identity() {
            return Ok(Self::IDENTITY);
        }

        let mut res = Self::IDENTITY;
        let keeps_rotation = self.is_rotation_matrix() && self.is_uniform_scale();
        // linear part of the inverse, including the scale
        let inverse_map = if keeps_rotation {
            self.check_scale_invertible()?;
            let inv_scale = 1.0 / self.scale.x;
            res.matrix = self.matrix.transpose();
            res.scale = Vector3::set(inv_scale);
            res.matrix * inv_scale
        } else {
            if self.is_rotation_matrix() {
                self.check_scale_invertible()?;
            }
            res.matrix = self.scaled_matrix().invert().map_err(|_| Error::NonInvertibleTransform)?;
            res.matrix
        };
        res.translation = -inverse_map.apply_post(self.translation);
        res.update_flags(keeps_rotation);
        Ok(res)
    }

    /// Invert the transform in place, the transform is left untouched on failure
    pub fn invert_local(&mut self) -> Result<&mut Self> {
        *self = self.invert()?;
        Ok(self)
    }

    /// Get the 4x4 matrix doing the same as this transform
    #[must_use]
    pub fn homogeneous_matrix(&self) -> Matrix4 {
        let mut res = Matrix4::from_matrix3(self.scaled_matrix());
        res[(0, 3)] = self.translation.x;
        res[(1, 3)] = self.translation.y;
        res[(2, 3)] = self.translation.z;
        res
    }

    /// Create a transform from the upper 3x4 part of a 4x4 matrix
    ///
    /// The 3x3 block is taken as-is, so the scale is reset to 1 and any scale is held by the matrix.
    #[must_use]
    pub fn from_homogeneous_matrix(mat: &Matrix4) -> Self {
        let mut res = Self::IDENTITY;
        res.matrix = mat.to_matrix3();
        res.translation = mat.translation();
        res.update_flags(false);
        res
    }

    /// Get the homogeneous matrix in column-major order, as expected by OpenGL
    #[must_use]
    pub fn gl_apply_matrix(&self) -> [f64; 16] {
        let mut res = [0.0; 16];
        // `write_to_slice` only fails on short buffers
        let _ = self.homogeneous_matrix().write_to_slice(&mut res, false);
        res
    }

    /// Get the homogeneous matrix in column-major order, in single precision
    #[must_use]
    pub fn gl_apply_matrix_f32(&self) -> [f32; 16] {
        self.gl_apply_matrix().map(|val| val as f32)
    }

    /// Check that no part contains a NaN or infinite value
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.matrix.is_valid() && self.scale.is_valid() && self.translation.is_valid()
    }

    /// Check if the matrix, scale and translation are exactly equal
    #[must_use]
    pub fn strict_eq(&self, other: &Transform) -> bool {
        self.matrix == other.matrix && self.scale == other.scale && self.translation == other.translation
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ApproxEq for Transform {
    type Epsilon = f64;
    const DEFAULT_EPSILON : f64 = ALLOWED_DEVIANCE;

    fn is_close_to(self, rhs: Self, epsilon: f64) -> bool {
        self.matrix.is_close_to(rhs.matrix, epsilon) &&
        self.scale.is_close_to(rhs.scale, epsilon) &&
        self.translation.is_close_to(rhs.translation, epsilon)
    }
}

impl Display for Transform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("[M: {}, S: {}, T: {}]", self.matrix, self.scale, self.translation))
    }
}
