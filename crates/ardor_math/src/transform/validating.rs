use core::{fmt, ops::Deref};
use ardor_logging::log_warning;
use crate::*;

/// Error returned when a [`ValidatingTransform`] rejects a mutation
#[derive(Clone, PartialEq, Debug)]
pub enum ValidationError {
    /// The mutation would result in a NaN or infinite value, holds the rejected state
    NonFinite(Box<Transform>),
    /// The mutation itself failed
    Rejected(Error),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::NonFinite(trans) => f.write_fmt(format_args!("Transform would contain a NaN or infinite value: {trans}")),
            ValidationError::Rejected(err)    => f.write_fmt(format_args!("Transform mutation was rejected: {err}")),
        }
    }
}

impl std::error::Error for ValidationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ValidationError::Rejected(err) => Some(err),
            ValidationError::NonFinite(_) => None,
        }
    }
}

impl From<Error> for ValidationError {
    fn from(err: Error) -> Self {
        ValidationError::Rejected(err)
    }
}

/// Result of a [`ValidatingTransform`] mutation
pub type ValidationResult<T> = core::result::Result<T, ValidationError>;

/// Transform that checks every mutation for NaN and infinite values
///
/// A rejected mutation leaves the transform as it was. Reading goes through `Deref` to [`Transform`].
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct ValidatingTransform {
    inner : Transform,
}

impl ValidatingTransform {
    /// Create an identity transform
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { inner: Transform::IDENTITY }
    }

    /// Wrap an existing transform, fails when it is not valid
    pub fn from_transform(trans: Transform) -> ValidationResult<Self> {
        let mut res = Self::new();
        res.mutate(|inner| {
            *inner = trans;
            Ok(())
        })?;
        Ok(res)
    }

    /// Get the wrapped transform
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> Transform {
        self.inner
    }

    /// Apply `f` to a copy of the transform and only keep the result when it succeeded and is valid
    fn mutate<F>(&mut self, f: F) -> ValidationResult<&mut Self>
        where F: FnOnce(&mut Transform) -> Result<()>
    {
        let mut candidate = self.inner;
        if let Err(err) = f(&mut candidate) {
            log_warning!(crate::LOG_CAT, "Rejected transform mutation: {}", err);
            return Err(ValidationError::Rejected(err));
        }
        if !candidate.is_valid() {
            log_warning!(crate::LOG_CAT, "Rejected transform mutation resulting in invalid transform {}", candidate);
            return Err(ValidationError::NonFinite(Box::new(candidate)));
        }
        self.inner = candidate;
        Ok(self)
    }

    /// Reset to the identity
    pub fn set_identity(&mut self) -> &mut Self {
        self.inner.set_identity();
        self
    }

    /// See [`Transform::set_rotation`]
    pub fn set_rotation(&mut self, rotation: Matrix3) -> ValidationResult<&mut Self> {
        self.mutate(|inner| {
            inner.set_rotation(rotation);
            Ok(())
        })
    }

    /// See [`Transform::set_rotation_quaternion`]
    pub fn set_rotation_quaternion(&mut self, rotation: Quaternion) -> ValidationResult<&mut Self> {
        self.mutate(|inner| {
            inner.set_rotation_quaternion(rotation);
            Ok(())
        })
    }

    /// See [`Transform::set_translation`]
    pub fn set_translation(&mut self, translation: Vector3) -> ValidationResult<&mut Self> {
        self.mutate(|inner| {
            inner.set_translation(translation);
            Ok(())
        })
    }

    /// See [`Transform::translate`]
    pub fn translate(&mut self, offset: Vector3) -> ValidationResult<&mut Self> {
        self.mutate(|inner| {
            inner.translate(offset);
            Ok(())
        })
    }

    /// See [`Transform::set_scale`]
    pub fn set_scale(&mut self, scale: Vector3) -> ValidationResult<&mut Self> {
        self.mutate(|inner| inner.set_scale(scale).map(|_| ()))
    }

    /// See [`Transform::set_scale_uniform`]
    pub fn set_scale_uniform(&mut self, scale: f64) -> ValidationResult<&mut Self> {
        self.mutate(|inner| inner.set_scale_uniform(scale).map(|_| ()))
    }

    /// Replace the transform with `self * rhs`
    pub fn multiply_local(&mut self, rhs: &Transform) -> ValidationResult<&mut Self> {
        self.mutate(|inner| {
            *inner = inner.multiply(rhs);
            Ok(())
        })
    }

    /// See [`Transform::invert_local`]
    pub fn invert_local(&mut self) -> ValidationResult<&mut Self> {
        self.mutate(|inner| inner.invert_local().map(|_| ()))
    }

    /// Replace the transform with one created from a homogeneous matrix
    pub fn set_homogeneous_matrix(&mut self, mat: &Matrix4) -> ValidationResult<&mut Self> {
        self.mutate(|inner| {
            *inner = Transform::from_homogeneous_matrix(mat);
            Ok(())
        })
    }
}

impl Deref for ValidatingTransform {
    type Target = Transform;

    fn deref(&self) -> &Transform {
        &self.inner
    }
}

impl From<ValidatingTransform> for Transform {
    fn from(trans: ValidatingTransform) -> Self {
        trans.inner
    }
}

impl TryFrom<Transform> for ValidatingTransform {
    type Error = ValidationError;

    fn try_from(trans: Transform) -> ValidationResult<Self> {
        Self::from_transform(trans)
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn accepts_valid_mutations() {
        let mut trans = ValidatingTransform::new();
        trans.set_translation(Vector3::new(1.0, 2.0, 3.0)).unwrap()
             .set_scale_uniform(2.0).unwrap()
             .set_rotation_quaternion(Quaternion::from_angle_axis(0.5, Vector3::UNIT_X)).unwrap();
        assert_eq!(trans.translation(), Vector3::new(1.0, 2.0, 3.0));
        assert!(trans.is_uniform_scale());
        assert!(trans.is_valid());
    }

    #[test]
    fn rejects_non_finite() {
        let mut trans = ValidatingTransform::new();
        let before = *trans;

        assert!(matches!(trans.set_translation(Vector3::new(f64::NAN, 0.0, 0.0)), Err(ValidationError::NonFinite(_))));
        assert!(matches!(trans.set_scale(Vector3::new(f64::INFINITY, 1.0, 1.0)), Err(ValidationError::NonFinite(_))));
        assert!(matches!(trans.set_rotation(Matrix3::from_diagonal(Vector3::set(f64::NAN))), Err(ValidationError::NonFinite(_))));
        assert!(matches!(trans.translate(Vector3::set(f64::NEG_INFINITY)), Err(ValidationError::NonFinite(_))));
        assert_eq!(*trans, before);
    }

    #[test]
    fn revalidates_reused_values() {
        let mut trans = ValidatingTransform::new();
        let mut translation = Vector3::new(1.0, 1.0, 1.0);
        trans.set_translation(translation).unwrap();

        translation.y = f64::NAN;
        assert!(trans.set_translation(translation).is_err());
        assert_eq!(trans.translation(), Vector3::ONE);

        let mut scale = Vector3::set(2.0);
        trans.set_scale(scale).unwrap();
        scale.z = f64::INFINITY;
        assert!(trans.set_scale(scale).is_err());
        assert_eq!(trans.scale(), Vector3::set(2.0));
    }

    #[test]
    fn forwards_transform_errors() {
        let mut trans = ValidatingTransform::new();
        assert_eq!(trans.set_scale_uniform(0.0).err(), Some(ValidationError::Rejected(Error::ZeroScale)));

        trans.set_rotation(Matrix3::from_diagonal(Vector3::new(1.0, 0.0, 1.0))).unwrap();
        assert_eq!(trans.invert_local().err(), Some(ValidationError::Rejected(Error::NonInvertibleTransform)));
        assert_eq!(trans.set_scale(Vector3::ONE).err(), Some(ValidationError::Rejected(Error::ScaleOnGeneralMatrix)));
    }

    #[test]
    fn multiply_and_convert() {
        let mut huge = Transform::new();
        huge.set_scale_uniform(f64::MAX).unwrap();

        let mut trans = ValidatingTransform::try_from(huge).unwrap();
        // f64::MAX * f64::MAX overflows to infinity
        assert!(trans.multiply_local(&huge).is_err());
        assert_eq!(trans.scale(), Vector3::set(f64::MAX));

        let mut bad = Transform::new();
        bad.set_translation(Vector3::set(f64::NAN));
        assert!(ValidatingTransform::from_transform(bad).is_err());

        let mut trans = ValidatingTransform::new();
        trans.set_homogeneous_matrix(&Matrix4::from_translation(Vector3::UNIT_Z)).unwrap();
        assert_eq!(Transform::from(trans).translation(), Vector3::UNIT_Z);
        assert!(ValidationError::Rejected(Error::ZeroScale).to_string().contains("rejected"));
    }
}
