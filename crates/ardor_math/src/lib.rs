//! Double precision math and geometry core for the ardor engine
//!
//! All types are plain `Copy` values: operations either mutate in place (`*_local`) or return a new value.
//! Shared constants such as [`Vector3::ZERO`] or [`Matrix3::IDENTITY`] are associated `const`s.
//!
//! Numeric degeneracies (normalizing a zero vector, a ray parallel to a plane, ...) are reported with fallback values,
//! while misuse (an out of range index, inverting a singular matrix, ...) is reported with an [`Error`].

use ardor_logging::LogCategory;

pub(crate) const LOG_CAT : LogCategory = LogCategory::new("Math");

mod utils;

mod error;
pub use error::*;

mod math_utils;
pub use math_utils::*;

mod backend;
pub use backend::*;

mod numeric;
pub use numeric::*;

mod vec;
pub use vec::*;

mod mat;
pub use mat::*;

mod quaternion;
pub use quaternion::*;

mod transform;
pub use transform::*;

mod line;
pub use line::*;

mod ray;
pub use ray::*;

mod plane;
pub use plane::*;

mod triangle;
pub use triangle::*;

mod rectangle;
pub use rectangle::*;

mod ring;
pub use ring::*;

mod color;
pub use color::*;

mod pool;
pub use pool::*;

mod intersections;
pub use intersections::*;

mod triangulator;
pub use triangulator::*;

pub mod functions;
pub use functions::{Function3D, SimplexNoise, VoronoiFunction3D};
