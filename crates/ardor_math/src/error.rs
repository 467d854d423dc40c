use core::fmt;

/// Math error
#[derive(Clone, PartialEq, Debug)]
pub enum Error {
    /// An index based accessor was called with an index outside of `0..len`
    IndexOutOfRange { index: usize, len: usize },
    /// The matrix has a determinant of exactly 0 and cannot be inverted
    SingularMatrix,
    /// The transform has a zero scale component or a singular matrix and cannot be inverted
    NonInvertibleTransform,
    /// Scale can only be set on a transform whose matrix is a pure rotation
    ScaleOnGeneralMatrix,
    /// A scale of 0 on every axis was requested
    ZeroScale,
    /// The buffer has fewer elements than required
    BufferTooSmall { required: usize, found: usize },
    /// The string does not describe a color in one of the supported `#` notations
    InvalidColorString(String),
    /// An object pool needs a capacity of at least 1
    PoolCapacity,
    /// Hole start indices need to be strictly increasing, non-zero and inside the vertex list
    InvalidHoleIndices,
    /// A noise permutation table needs to contain every value in `0..=255` exactly once
    InvalidPermutation,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::IndexOutOfRange { index, len } => f.write_fmt(format_args!("Index {index} is out of range, expected an index in 0..{len}")),
            Error::SingularMatrix                 => f.write_str("Matrix is singular (determinant is 0) and cannot be inverted"),
            Error::NonInvertibleTransform         => f.write_str("Transform has a zero scale component or a singular matrix and cannot be inverted"),
            Error::ScaleOnGeneralMatrix           => f.write_str("Scale can only be set when the transform's matrix is a rotation matrix"),
            Error::ZeroScale                      => f.write_str("Scale cannot be zero on every axis"),
            Error::BufferTooSmall { required, found } => f.write_fmt(format_args!("Buffer is too small, {required} elements are required, but only {found} are available")),
            Error::InvalidColorString(s)          => f.write_fmt(format_args!("'{s}' is not a valid color, expected '#' followed by 1, 2, 3, 4, 6 or 8 hex digits")),
            Error::PoolCapacity                   => f.write_str("Object pool capacity needs to be at least 1"),
            Error::InvalidHoleIndices             => f.write_str("Hole indices need to be strictly increasing, non-zero and smaller than the vertex count"),
            Error::InvalidPermutation             => f.write_str("Permutation table needs to contain every value in 0..=255 exactly once"),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = core::result::Result<T, Error>;

/// Check that `index` is in `0..len`
#[inline]
pub(crate) fn check_index(index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(Error::IndexOutOfRange { index, len })
    }
}

/// Check that a buffer holds at least `required` elements
#[inline]
pub(crate) fn check_buffer_len(found: usize, required: usize) -> Result<()> {
    if found >= required {
        Ok(())
    } else {
        Err(Error::BufferTooSmall { required, found })
    }
}
