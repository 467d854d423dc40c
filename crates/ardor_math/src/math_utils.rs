use rand::Rng;
use crate::*;

/// Smallest double such that `1.0 + EPSILON != 1.0`
pub const EPSILON : f64 = f64::EPSILON;
/// Tolerance used when a value is considered to be 'close enough' to 0
pub const ZERO_TOLERANCE : f64 = 0.0001;
/// Maximum deviation allowed when comparing rotations and transforms
pub const ALLOWED_DEVIANCE : f64 = 0.00000001;

/// 1 / 3
pub const ONE_THIRD : f64 = 1.0 / 3.0;
/// pi
pub const PI : f64 = core::f64::consts::PI;
/// 2 * pi
pub const TWO_PI : f64 = 2.0 * PI;
/// pi / 2
pub const HALF_PI : f64 = 0.5 * PI;
/// pi / 4
pub const QUARTER_PI : f64 = 0.25 * PI;
/// 3 * pi / 2
pub const THREE_PI_HALVES : f64 = 3.0 * HALF_PI;
/// 1 / pi
pub const INV_PI : f64 = 1.0 / PI;
/// 1 / (2 * pi)
pub const INV_TWO_PI : f64 = 1.0 / TWO_PI;
/// Multiply an angle in degrees by this to get radians
pub const DEG_TO_RAD : f64 = PI / 180.0;
/// Multiply an angle in radians by this to get degrees
pub const RAD_TO_DEG : f64 = 180.0 / PI;

/// Calculate `1 / sqrt(value)` using the default backend
#[inline]
#[must_use]
pub fn inverse_sqrt(value: f64) -> f64 {
    DefaultBackend::inverse_sqrt(value)
}

/// Linearly interpolate between `start` and `end`
///
/// When both ends are equal, `start` is returned as-is, so the result is exact even for large values.
#[inline]
#[must_use]
pub fn lerp(percent: f64, start: f64, end: f64) -> f64 {
    if start == end {
        return start;
    }
    (1.0 - percent) * start + percent * end
}

/// Cubic s-curve: `3t^2 - 2t^3`
#[inline]
#[must_use]
pub fn scurve3(t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t * t2;
    3.0 * t2 - 2.0 * t3
}

/// Quintic s-curve: `6t^5 - 15t^4 + 10t^3`
#[inline]
#[must_use]
pub fn scurve5(t: f64) -> f64 {
    let t3 = t * t * t;
    let t4 = t * t3;
    let t5 = t * t4;
    6.0 * t5 - 15.0 * t4 + 10.0 * t3
}

/// Convert spherical coordinates `(radius, azimuth, polar)` to cartesian coordinates, with y pointing up
#[must_use]
pub fn spherical_to_cartesian(sphere: Vector3) -> Vector3 {
    let a = sphere.x * sphere.z.cos();
    Vector3::new(a * sphere.y.cos(), sphere.x * sphere.z.sin(), a * sphere.y.sin())
}

/// Convert cartesian coordinates, with y pointing up, to spherical coordinates `(radius, azimuth, polar)`
#[must_use]
pub fn cartesian_to_spherical(cart: Vector3) -> Vector3 {
    let cart_x = if cart.x.abs() <= EPSILON { EPSILON } else { cart.x };
    let radius = (cart_x * cart_x + cart.y * cart.y + cart.z * cart.z).sqrt();
    let azimuth = (cart.z / cart_x).atan() + if cart_x < 0.0 { PI } else { 0.0 };
    let polar = (cart.y / radius).asin();
    Vector3::new(radius, azimuth, polar)
}

/// Convert spherical coordinates `(radius, azimuth, polar)` to cartesian coordinates, with z pointing up
#[must_use]
pub fn spherical_to_cartesian_z(sphere: Vector3) -> Vector3 {
    let a = sphere.x * sphere.z.cos();
    Vector3::new(a * sphere.y.cos(), a * sphere.y.sin(), sphere.x * sphere.z.sin())
}

/// Convert cartesian coordinates, with z pointing up, to spherical coordinates `(radius, azimuth, polar)`
#[must_use]
pub fn cartesian_z_to_spherical(cart: Vector3) -> Vector3 {
    let cart_x = if cart.x.abs() <= EPSILON { EPSILON } else { cart.x };
    let radius = (cart_x * cart_x + cart.y * cart.y + cart.z * cart.z).sqrt();
    let azimuth = (cart.y / radius).asin();
    let polar = (cart.z / cart_x).atan() + if cart_x < 0.0 { PI } else { 0.0 };
    Vector3::new(radius, azimuth, polar)
}

/// Check if `number` is a positive power of 2
#[inline]
#[must_use]
pub fn is_power_of_two(number: i32) -> bool {
    number > 0 && (number & (number - 1)) == 0
}

/// Get the smallest power of 2 that is larger or equal to `number`
///
/// Saturates to `i32::MAX` for inputs above 2^30, whose next power of 2 does not fit an `i32`.
#[must_use]
pub fn nearest_power_of_two(number: i32) -> i32 {
    if number <= 1 {
        return 1;
    }
    i32::try_from((number as u32).next_power_of_two()).unwrap_or(i32::MAX)
}

/// Logarithm of `value` in the given `base`
#[inline]
#[must_use]
pub fn log(value: f64, base: f64) -> f64 {
    value.ln() / base.ln()
}

/// Floor a value to an integer
#[inline]
#[must_use]
pub fn floor(val: f64) -> i64 {
    val.floor() as i64
}

/// Round a value to the nearest integer, halves are rounded up (towards positive infinity)
#[inline]
#[must_use]
pub fn round(val: f64) -> i64 {
    floor(val + 0.5)
}

/// Clamp a value between `min` and `max`
#[inline]
#[must_use]
pub fn clamp(val: f64, min: f64, max: f64) -> f64 {
    if val < min { min } else if val > max { max } else { val }
}

/// Clamp a value between 0 and 1
#[inline]
#[must_use]
pub fn clamp01(val: f64) -> f64 {
    clamp(val, 0.0, 1.0)
}

/// Wrap `value` into `0..size`, also for negative values
#[inline]
#[must_use]
pub fn modulo_positive(value: f64, size: f64) -> f64 {
    let wrapped = value % size;
    if wrapped < 0.0 { wrapped + size } else { wrapped }
}

/// `2^x` for positive `x`, 1 otherwise
///
/// Saturates to `i32::MAX` from `x = 31` on.
#[inline]
#[must_use]
pub fn pow2(x: i32) -> i32 {
    if x <= 0 {
        return 1;
    }
    1i32.checked_shl(x as u32).filter(|val| *val > 0).unwrap_or(i32::MAX)
}

/// Random integer in the inclusive range `min..=max`
#[must_use]
pub fn next_random_int<R: Rng + ?Sized>(rng: &mut R, min: i32, max: i32) -> i32 {
    if max <= min {
        return min;
    }
    rng.gen_range(min..=max)
}

/// Build a perspective projection matrix from the frustum bounds
#[must_use]
pub fn matrix_frustum(left: f64, right: f64, bottom: f64, top: f64, near_z: f64, far_z: f64) -> Matrix4 {
    let x = 2.0 * near_z / (right - left);
    let y = 2.0 * near_z / (top - bottom);
    let a = (right + left) / (right - left);
    let b = (top + bottom) / (top - bottom);
    let c = -(far_z + near_z) / (far_z - near_z);
    let d = -(2.0 * far_z * near_z) / (far_z - near_z);

    Matrix4::new(x  , 0.0, 0.0,  0.0,
                 0.0, y  , 0.0,  0.0,
                 a  , b  , c  , -1.0,
                 0.0, 0.0, d  ,  0.0)
}

/// Build an orthographic projection matrix
#[must_use]
pub fn matrix_ortho(left: f64, right: f64, bottom: f64, top: f64, near_z: f64, far_z: f64) -> Matrix4 {
    Matrix4::new(2.0 / (right - left)            , 0.0                             , 0.0                                , 0.0,
                 0.0                             , 2.0 / (top - bottom)            , 0.0                                , 0.0,
                 0.0                             , 0.0                             , -2.0 / (far_z - near_z)            , 0.0,
                 -(right + left) / (right - left), -(top + bottom) / (top - bottom), -(far_z + near_z) / (far_z - near_z), 1.0)
}

/// Build a perspective projection matrix, `fov_y` is in degrees
#[must_use]
pub fn matrix_perspective(fov_y: f64, aspect: f64, near_z: f64, far_z: f64) -> Matrix4 {
    let height = near_z * (fov_y * 0.5 * DEG_TO_RAD).tan();
    let width = height * aspect;
    matrix_frustum(-width, width, -height, height, near_z, far_z)
}

fn look_at_basis(position: Vector3, target: Vector3, world_up: Vector3) -> (Vector3, Vector3, Vector3) {
    let direction = (target - position).normalize();
    let side = direction.cross(world_up).normalize();
    let up = side.cross(direction);
    (side, up, direction)
}

/// Build a view matrix looking from `position` at `target`
#[must_use]
pub fn matrix_look_at(position: Vector3, target: Vector3, world_up: Vector3) -> Matrix4 {
    let (side, up, dir) = look_at_basis(position, target, world_up);
    let neg_pos = -position;
    Matrix4::new(side.x          , up.x          , -dir.x             , 0.0,
                 side.y          , up.y          , -dir.y             , 0.0,
                 side.z          , up.z          , -dir.z             , 0.0,
                 side.dot(neg_pos), up.dot(neg_pos), (-dir).dot(neg_pos), 1.0)
}

/// Build the rotation part of a view matrix looking from `position` at `target`
#[must_use]
pub fn matrix3_look_at(position: Vector3, target: Vector3, world_up: Vector3) -> Matrix3 {
    let (side, up, dir) = look_at_basis(position, target, world_up);
    Matrix3::new(side.x, up.x, -dir.x,
                 side.y, up.y, -dir.y,
                 side.z, up.z, -dir.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn spherical_round_trip() {
        let cart = Vector3::new(3.0, 2.0, -1.5);
        let back = spherical_to_cartesian(cartesian_to_spherical(cart));
        assert!(back.is_close_to(cart, 1e-9));

        let back = spherical_to_cartesian_z(cartesian_z_to_spherical(cart));
        assert!(back.is_close_to(cart, 1e-9));
    }

    #[test]
    fn powers_of_two() {
        assert!(is_power_of_two(1));
        assert!(is_power_of_two(64));
        assert!(!is_power_of_two(0));
        assert!(!is_power_of_two(-8));
        assert!(!is_power_of_two(65));

        assert_eq!(nearest_power_of_two(65), 128);
        assert_eq!(nearest_power_of_two(64), 64);
        assert_eq!(nearest_power_of_two(0), 1);

        assert_eq!(pow2(0), 1);
        assert_eq!(pow2(-3), 1);
        assert_eq!(pow2(1), 2);
        assert_eq!(pow2(10), 1024);
    }

    #[test]
    fn powers_of_two_saturate() {
        assert_eq!(nearest_power_of_two(1 << 30), 1 << 30);
        assert_eq!(nearest_power_of_two((1 << 30) + 1), i32::MAX);
        assert_eq!(nearest_power_of_two(i32::MAX), i32::MAX);

        assert_eq!(pow2(30), 1 << 30);
        assert_eq!(pow2(31), i32::MAX);
        assert_eq!(pow2(33), i32::MAX);
        assert_eq!(pow2(i32::MAX), i32::MAX);
    }

    #[test]
    fn rounding() {
        assert_eq!(floor(-1.5), -2);
        assert_eq!(floor(-2.0), -2);
        assert_eq!(floor(1.9), 1);
        assert_eq!(round(-1.5), -1);
        assert_eq!(round(2.5), 3);
        assert_eq!(round(2.49), 2);
    }

    #[test]
    fn clamp_and_modulo() {
        assert_eq!(clamp(5.0, 0.0, 3.0), 3.0);
        assert_eq!(clamp(-5.0, 0.0, 3.0), 0.0);
        assert_eq!(clamp01(0.25), 0.25);
        assert_eq!(modulo_positive(-1.0, 4.0), 3.0);
        assert_eq!(modulo_positive(9.0, 4.0), 1.0);
    }

    #[test]
    fn interpolation() {
        assert_eq!(lerp(0.5, 1.0, 3.0), 2.0);
        assert_eq!(lerp(0.3, 1e300, 1e300), 1e300);
        assert_eq!(scurve3(0.0), 0.0);
        assert_eq!(scurve3(1.0), 1.0);
        assert_eq!(scurve3(0.5), 0.5);
        assert_eq!(scurve5(0.5), 0.5);
        assert!(log(8.0, 2.0).is_close_to(3.0, 1e-12));
    }

    #[test]
    fn random_int_in_range() {
        let mut rng = StdRng::seed_from_u64(0x5EED);
        for _ in 0..100 {
            let val = next_random_int(&mut rng, -3, 3);
            assert!((-3..=3).contains(&val));
        }
        assert_eq!(next_random_int(&mut rng, 4, 4), 4);
    }

    #[test]
    fn perspective_is_frustum() {
        let persp = matrix_perspective(90.0, 1.0, 1.0, 10.0);
        let frustum = matrix_frustum(-1.0, 1.0, -1.0, 1.0, 1.0, 10.0);
        assert!(persp.is_close_to(frustum, 1e-12));
        assert_eq!(persp.value(2, 3), Ok(-1.0));
    }

    #[test]
    fn look_at_moves_target_onto_negative_z() {
        let view = matrix_look_at(Vector3::new(0.0, 0.0, 5.0), Vector3::ZERO, Vector3::UNIT_Y);
        // Row-vector convention: the translation lives in the last row
        let target = view.apply_pre(Vector4::new(0.0, 0.0, 0.0, 1.0));
        assert!(target.is_close_to(Vector4::new(0.0, 0.0, -5.0, 1.0), 1e-12));

        let rot = matrix3_look_at(Vector3::new(0.0, 0.0, 5.0), Vector3::ZERO, Vector3::UNIT_Y);
        assert!(rot.is_close_to(view.to_matrix3(), 1e-12));
    }
}
