use core::{ops::*, fmt::Display};
use crate::*;

/// Rotation quaternion
///
/// The quaternion is not normalized automatically, call [`Quaternion::normalize`] when unit length is required.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Quaternion {
    pub x : f64,
    pub y : f64,
    pub z : f64,
    pub w : f64,
}

impl Quaternion {
    /// Quaternion representing no rotation
    pub const IDENTITY : Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Create a new quaternion
    #[inline(always)]
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Create a quaternion from an array, ordered `[x, y, z, w]`
    #[inline(always)]
    #[must_use]
    pub const fn from_array(arr: [f64; 4]) -> Self {
        Self { x: arr[0], y: arr[1], z: arr[2], w: arr[3] }
    }

    /// Get the content of the quaternion as an array, ordered `[x, y, z, w]`
    #[inline(always)]
    #[must_use]
    pub const fn to_array(self) -> [f64; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Get the content of the quaternion as a single precision array, ordered `[x, y, z, w]`
    #[inline]
    #[must_use]
    pub fn to_f32_array(self) -> [f32; 4] {
        [self.x as f32, self.y as f32, self.z as f32, self.w as f32]
    }

    /// Create a rotation from euler angles, in radians
    ///
    /// `heading` rotates around y, `attitude` around z and `bank` around x. The result is normalized.
    #[must_use]
    pub fn from_euler_angles(heading: f64, attitude: f64, bank: f64) -> Self {
        let sin_heading = DefaultBackend::sin(heading * 0.5);
        let cos_heading = DefaultBackend::cos(heading * 0.5);
        let sin_attitude = DefaultBackend::sin(attitude * 0.5);
        let cos_attitude = DefaultBackend::cos(attitude * 0.5);
        let sin_bank = DefaultBackend::sin(bank * 0.5);
        let cos_bank = DefaultBackend::cos(bank * 0.5);

        let ch_ca = cos_heading * cos_attitude;
        let sh_sa = sin_heading * sin_attitude;
        let ch_sa = cos_heading * sin_attitude;
        let sh_ca = sin_heading * cos_attitude;

        Self { x: ch_ca * sin_bank + sh_sa * cos_bank,
               y: sh_ca * cos_bank + ch_sa * sin_bank,
               z: ch_sa * cos_bank - sh_ca * sin_bank,
               w: ch_ca * cos_bank - sh_sa * sin_bank }.normalize()
    }

    /// Extract euler angles `[heading, attitude, bank]`, compatible with [`Quaternion::from_euler_angles`]
    ///
    /// Close to the poles (attitude of +-pi/2), the bank is folded into the heading and reported as 0.
    #[must_use]
    pub fn to_euler_angles(self) -> [f64; 3] {
        let sqw = self.w * self.w;
        let sqx = self.x * self.x;
        let sqy = self.y * self.y;
        let sqz = self.z * self.z;
        // 1 when normalized, otherwise acts as a correction factor
        let unit = sqx + sqy + sqz + sqw;
        let test = self.x * self.y + self.z * self.w;

        if test > 0.499 * unit {
            [2.0 * self.x.atan2(self.w), HALF_PI, 0.0]
        } else if test < -0.499 * unit {
            [-2.0 * self.x.atan2(self.w), -HALF_PI, 0.0]
        } else {
            [(2.0 * self.y * self.w - 2.0 * self.x * self.z).atan2(sqx - sqy - sqz + sqw),
             (2.0 * test / unit).asin(),
             (2.0 * self.x * self.w - 2.0 * self.y * self.z).atan2(-sqx + sqy - sqz + sqw)]
        }
    }

    /// Create a quaternion from a rotation matrix
    #[must_use]
    pub fn from_rotation_matrix(mat: &Matrix3) -> Self {
        let [m00, m01, m02, m10, m11, m12, m20, m21, m22] = mat.to_array();
        let trace = m00 + m11 + m22;

        if trace >= 0.0 {
            let s = (trace + 1.0).sqrt();
            let inv = 0.5 / s;
            Self { x: (m21 - m12) * inv,
                   y: (m02 - m20) * inv,
                   z: (m10 - m01) * inv,
                   w: 0.5 * s }
        } else if m00 > m11 && m00 > m22 {
            let s = (1.0 + m00 - m11 - m22).sqrt();
            let inv = 0.5 / s;
            Self { x: 0.5 * s,
                   y: (m10 + m01) * inv,
                   z: (m02 + m20) * inv,
                   w: (m21 - m12) * inv }
        } else if m11 > m22 {
            let s = (1.0 + m11 - m00 - m22).sqrt();
            let inv = 0.5 / s;
            Self { x: (m10 + m01) * inv,
                   y: 0.5 * s,
                   z: (m21 + m12) * inv,
                   w: (m02 - m20) * inv }
        } else {
            let s = (1.0 + m22 - m00 - m11).sqrt();
            let inv = 0.5 / s;
            Self { x: (m02 + m20) * inv,
                   y: (m21 + m12) * inv,
                   z: 0.5 * s,
                   w: (m10 - m01) * inv }
        }
    }

    /// Scaled products shared by the matrix conversions: `[xx, xy, xz, xw, yy, yz, yw, zz, zw]`
    fn rotation_products(self) -> [f64; 9] {
        let norm = self.magnitude_squared();
        let s = if norm == 1.0 { 2.0 } else if norm > 0.0 { 2.0 / norm } else { 0.0 };

        let xs = self.x * s;
        let ys = self.y * s;
        let zs = self.z * s;
        [self.x * xs, self.x * ys, self.x * zs, self.w * xs,
         self.y * ys, self.y * zs, self.w * ys,
         self.z * zs, self.w * zs]
    }

    /// Convert the quaternion to a rotation matrix, the quaternion does not need to be normalized
    #[must_use]
    pub fn to_rotation_matrix(self) -> Matrix3 {
        let [xx, xy, xz, xw, yy, yz, yw, zz, zw] = self.rotation_products();
        Matrix3::new(1.0 - (yy + zz), xy - zw        , xz + yw,
                     xy + zw        , 1.0 - (xx + zz), yz - xw,
                     xz - yw        , yz + xw        , 1.0 - (xx + yy))
    }

    /// Convert the quaternion to a 4x4 rotation matrix, without translation
    #[inline]
    #[must_use]
    pub fn to_rotation_matrix4(self) -> Matrix4 {
        Matrix4::from_matrix3(self.to_rotation_matrix())
    }

    /// Get a single column of the rotation matrix, without calculating the entire matrix
    pub fn rotation_column(self, index: usize) -> Result<Vector3> {
        check_index(index, 3)?;
        let [xx, xy, xz, xw, yy, yz, yw, zz, zw] = self.rotation_products();
        Ok(match index {
            0 => Vector3::new(1.0 - (yy + zz), xy + zw, xz - yw),
            1 => Vector3::new(xy - zw, 1.0 - (xx + zz), yz + xw),
            _ => Vector3::new(xz + yw, yz - xw, 1.0 - (xx + yy)),
        })
    }

    /// Create a rotation of `angle` radians around `axis`, the axis is normalized first
    #[inline]
    #[must_use]
    pub fn from_angle_axis(angle: f64, axis: Vector3) -> Self {
        Self::from_angle_normal_axis(angle, axis.normalize())
    }

    /// Create a rotation of `angle` radians around a unit length `axis`
    ///
    /// A zero axis results in the identity quaternion.
    #[must_use]
    pub fn from_angle_normal_axis(angle: f64, axis: Vector3) -> Self {
        if axis == Vector3::ZERO {
            return Self::IDENTITY;
        }

        let half_angle = 0.5 * angle;
        let sin = DefaultBackend::sin(half_angle);
        Self { x: sin * axis.x,
               y: sin * axis.y,
               z: sin * axis.z,
               w: DefaultBackend::cos(half_angle) }
    }

    /// Extract the rotation angle and a unit axis
    ///
    /// When the quaternion is (close to) the identity, the result is `(0, UNIT_X)`.
    #[must_use]
    pub fn to_angle_axis(self) -> (f64, Vector3) {
        let sqr_len = self.x * self.x + self.y * self.y + self.z * self.z;
        if sqr_len <= EPSILON {
            (0.0, Vector3::UNIT_X)
        } else {
            let inv_len = 1.0 / sqr_len.sqrt();
            (2.0 * clamp(self.w, -1.0, 1.0).acos(), Vector3::new(self.x * inv_len, self.y * inv_len, self.z * inv_len))
        }
    }

    /// Create the smallest rotation that rotates direction `from` onto direction `to`
    ///
    /// When either vector has no length, the identity is returned.
    /// For opposite vectors, the rotation of pi is done around an axis perpendicular to `from`.
    #[must_use]
    pub fn from_vector_to_vector(from: Vector3, to: Vector3) -> Self {
        let factor = from.length() * to.length();
        if factor.abs() <= EPSILON {
            return Self::IDENTITY;
        }

        let dot = from.dot(to) / factor;
        let theta = clamp(dot, -1.0, 1.0).acos();
        let mut pivot = from.cross(to);

        if dot < 0.0 && pivot.length() < EPSILON {
            let abs = from.abs();
            let dominant = if abs.x > abs.y {
                if abs.x > abs.z { 0 } else { 2 }
            } else {
                if abs.y > abs.z { 1 } else { 2 }
            };
            let next = (dominant + 1) % 3;
            pivot[dominant] = -from[next];
            pivot[next] = from[dominant];
            pivot[(dominant + 2) % 3] = 0.0;
        }
        Self::from_angle_axis(theta, pivot)
    }

    /// Create a quaternion from the 3 axes of a rotation
    #[inline]
    #[must_use]
    pub fn from_axes(x_axis: Vector3, y_axis: Vector3, z_axis: Vector3) -> Self {
        Self::from_rotation_matrix(&Matrix3::from_axes(x_axis, y_axis, z_axis))
    }

    /// Get the 3 axes of the rotation
    #[inline]
    #[must_use]
    pub fn to_axes(self) -> [Vector3; 3] {
        self.to_rotation_matrix().to_axes()
    }

    /// Create a rotation whose z-axis points along `direction`, with the y-axis as close to `up` as possible
    #[must_use]
    pub fn look_at(direction: Vector3, up: Vector3) -> Self {
        Self::from_rotation_matrix(&Matrix3::look_at(direction, up)).normalize()
    }

    /// Get the squared magnitude
    #[inline]
    #[must_use]
    pub fn magnitude_squared(self) -> f64 {
        self.dot(self)
    }

    /// Get the magnitude
    #[must_use]
    pub fn magnitude(self) -> f64 {
        let mag_sq = self.magnitude_squared();
        if mag_sq == 1.0 {
            1.0
        } else {
            DefaultBackend::sqrt(mag_sq)
        }
    }

    /// Calculate the dot product of 2 quaternions
    #[inline]
    #[must_use]
    pub fn dot(self, rhs: Self) -> f64 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z + self.w * rhs.w
    }

    /// Normalize the quaternion, a zero quaternion is returned unchanged
    #[must_use]
    pub fn normalize(self) -> Self {
        let mag = self.magnitude();
        if mag == 0.0 {
            self
        } else {
            self * (1.0 / mag)
        }
    }

    /// Normalize the quaternion in place
    #[inline]
    pub fn normalize_local(&mut self) -> &mut Self {
        *self = self.normalize();
        self
    }

    /// Get the conjugate of the quaternion
    #[inline]
    #[must_use]
    pub fn conjugate(self) -> Self {
        Self { x: -self.x, y: -self.y, z: -self.z, w: self.w }
    }

    /// Get the multiplicative inverse, for a unit quaternion this is the conjugate
    #[must_use]
    pub fn invert(self) -> Self {
        let mag_sq = self.magnitude_squared();
        let conjugate = self.conjugate();
        if (1.0 - mag_sq).abs() <= EPSILON {
            conjugate
        } else {
            conjugate * (1.0 / mag_sq)
        }
    }

    /// Invert the quaternion in place
    #[inline]
    pub fn invert_local(&mut self) -> &mut Self {
        *self = self.invert();
        self
    }

    /// Calculate `self * rhs`, i.e. `rhs` is applied first
    #[must_use]
    pub fn multiply(self, rhs: Self) -> Self {
        Self { x:  self.x * rhs.w + self.y * rhs.z - self.z * rhs.y + self.w * rhs.x,
               y: -self.x * rhs.z + self.y * rhs.w + self.z * rhs.x + self.w * rhs.y,
               z:  self.x * rhs.y - self.y * rhs.x + self.z * rhs.w + self.w * rhs.z,
               w: -self.x * rhs.x - self.y * rhs.y - self.z * rhs.z + self.w * rhs.w }
    }

    /// Calculate `self * rhs` in place
    #[inline]
    pub fn multiply_local(&mut self, rhs: Self) -> &mut Self {
        *self = self.multiply(rhs);
        self
    }

    /// Rotate `vec`, the result is scaled by the squared magnitude when the quaternion is not normalized
    #[must_use]
    pub fn apply(self, vec: Vector3) -> Vector3 {
        if vec == Vector3::ZERO {
            return Vector3::ZERO;
        }
        let res = self.multiply(Self::new(vec.x, vec.y, vec.z, 0.0)).multiply(self.conjugate());
        Vector3::new(res.x, res.y, res.z)
    }

    /// Apply an additional rotation of `angle` radians around a unit `axis` (`self * R`)
    #[must_use]
    pub fn apply_rotation(self, angle: f64, axis: Vector3) -> Self {
        if axis == Vector3::ZERO {
            return self;
        }
        self.multiply(Self::from_angle_normal_axis(angle, axis))
    }

    /// Apply an additional rotation around the x-axis (`self * Rx`)
    #[inline]
    #[must_use]
    pub fn apply_rotation_x(self, angle: f64) -> Self {
        self.multiply(Self::from_angle_normal_axis(angle, Vector3::UNIT_X))
    }

    /// Apply an additional rotation around the y-axis (`self * Ry`)
    #[inline]
    #[must_use]
    pub fn apply_rotation_y(self, angle: f64) -> Self {
        self.multiply(Self::from_angle_normal_axis(angle, Vector3::UNIT_Y))
    }

    /// Apply an additional rotation around the z-axis (`self * Rz`)
    #[inline]
    #[must_use]
    pub fn apply_rotation_z(self, angle: f64) -> Self {
        self.multiply(Self::from_angle_normal_axis(angle, Vector3::UNIT_Z))
    }

    /// Spherical linear interpolation from `self` to `end`
    ///
    /// - `t == 0` and `t == 1` return the respective end points unchanged.
    /// - Interpolation goes along the shorter arc, so `end` may be negated.
    /// - Rotations closer than the interpolation threshold are linearly interpolated and normalized.
    #[must_use]
    pub fn slerp(self, end: Self, t: f64) -> Self {
        if t == 0.0 {
            return self;
        } else if t == 1.0 {
            return end;
        }
        if self.is_approx_eq(end) {
            return self;
        }

        let mut end = end;
        let mut dot = self.dot(end);
        if dot < 0.0 {
            end = -end;
            dot = -dot;
        }

        if 1.0 - dot > 0.1 {
            let theta = dot.acos();
            let inv_sin_theta = 1.0 / DefaultBackend::sin(theta);
            let scale0 = DefaultBackend::sin((1.0 - t) * theta) * inv_sin_theta;
            let scale1 = DefaultBackend::sin(t * theta) * inv_sin_theta;
            self * scale0 + end * scale1
        } else {
            (self * (1.0 - t) + end * t).normalize()
        }
    }

    /// Spherical linear interpolation in place
    #[inline]
    pub fn slerp_local(&mut self, end: Self, t: f64) -> &mut Self {
        *self = self.slerp(end, t);
        self
    }

    /// Get the value at the given index, ordered `[x, y, z, w]`
    pub fn value(self, index: usize) -> Result<f64> {
        check_index(index, 4)?;
        Ok(self.to_array()[index])
    }

    /// Check if the quaternion is exactly the identity
    #[inline]
    #[must_use]
    pub fn is_identity(self) -> bool {
        self == Self::IDENTITY
    }

    /// Check that no component is NaN or infinite
    #[inline]
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite() && self.w.is_finite()
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Add for Quaternion {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self { x: self.x + rhs.x, y: self.y + rhs.y, z: self.z + rhs.z, w: self.w + rhs.w }
    }
}

impl AddAssign for Quaternion {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Quaternion {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self { x: self.x - rhs.x, y: self.y - rhs.y, z: self.z - rhs.z, w: self.w - rhs.w }
    }
}

impl SubAssign for Quaternion {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Mul<f64> for Quaternion {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self { x: self.x * rhs, y: self.y * rhs, z: self.z * rhs, w: self.w * rhs }
    }
}

impl MulAssign<f64> for Quaternion {
    fn mul_assign(&mut self, rhs: f64) {
        *self = *self * rhs;
    }
}

impl Mul for Quaternion {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        self.multiply(rhs)
    }
}

impl MulAssign for Quaternion {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = self.multiply(rhs);
    }
}

impl Mul<Vector3> for Quaternion {
    type Output = Vector3;

    #[inline]
    fn mul(self, rhs: Vector3) -> Vector3 {
        self.apply(rhs)
    }
}

impl Neg for Quaternion {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self { x: -self.x, y: -self.y, z: -self.z, w: -self.w }
    }
}

impl ApproxEq for Quaternion {
    type Epsilon = f64;
    const DEFAULT_EPSILON : f64 = ALLOWED_DEVIANCE;

    fn is_close_to(self, rhs: Self, epsilon: f64) -> bool {
        self.x.is_close_to(rhs.x, epsilon) &&
        self.y.is_close_to(rhs.y, epsilon) &&
        self.z.is_close_to(rhs.z, epsilon) &&
        self.w.is_close_to(rhs.w, epsilon)
    }
}

impl From<[f64; 4]> for Quaternion {
    fn from(arr: [f64; 4]) -> Self {
        Self::from_array(arr)
    }
}

impl Display for Quaternion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("({}, ({}, {}, {}))", self.w, self.x, self.y, self.z))
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    const EPS : f64 = 1e-6;

    fn same_rotation(lhs: Quaternion, rhs: Quaternion) -> bool {
        [Vector3::UNIT_X, Vector3::UNIT_Y, Vector3::new(1.0, 2.0, 3.0)].into_iter()
            .all(|vec| lhs.apply(vec).is_close_to(rhs.apply(vec), EPS))
    }

    #[test]
    fn angle_axis() {
        let quat = Quaternion::from_angle_axis(HALF_PI, Vector3::new(0.0, 0.0, 2.0));
        assert!(quat.apply(Vector3::UNIT_X).is_close_to(Vector3::UNIT_Y, EPS));
        assert!((quat * Vector3::UNIT_Y).is_close_to(Vector3::NEG_UNIT_X, EPS));

        let (angle, axis) = quat.to_angle_axis();
        assert!(angle.is_close_to(HALF_PI, EPS));
        assert!(axis.is_close_to(Vector3::UNIT_Z, EPS));

        assert_eq!(Quaternion::from_angle_axis(1.0, Vector3::ZERO), Quaternion::IDENTITY);
        assert_eq!(Quaternion::IDENTITY.to_angle_axis(), (0.0, Vector3::UNIT_X));
    }

    #[test]
    fn matrix_conversion() {
        let axis = Vector3::new(1.0, -2.0, 0.5);
        let quat = Quaternion::from_angle_axis(0.8, axis);
        let mat = Matrix3::from_angle_axis(0.8, axis);
        assert!(quat.to_rotation_matrix().is_close_to(mat, EPS));
        assert!(Matrix3::from_quaternion(quat).is_close_to(mat, EPS));
        assert!(quat.to_rotation_matrix4().to_matrix3().is_close_to(mat, EPS));

        for col in 0..3 {
            assert!(quat.rotation_column(col).unwrap().is_close_to(mat.column(col).unwrap(), EPS));
        }
        assert!(quat.rotation_column(3).is_err());

        // each branch of the matrix conversion
        for quat in [quat,
                     Quaternion::from_angle_axis(PI, Vector3::UNIT_X),
                     Quaternion::from_angle_axis(PI, Vector3::UNIT_Y),
                     Quaternion::from_angle_axis(PI, Vector3::UNIT_Z)] {
            let back = Quaternion::from_rotation_matrix(&quat.to_rotation_matrix());
            assert!(same_rotation(back, quat));
        }
    }

    #[test]
    fn unnormalized_matrix() {
        let quat = Quaternion::from_angle_axis(0.3, Vector3::UNIT_Y);
        assert!((quat * 3.0).to_rotation_matrix().is_close_to(quat.to_rotation_matrix(), EPS));
        assert_eq!(Quaternion::new(0.0, 0.0, 0.0, 0.0).to_rotation_matrix(), Matrix3::IDENTITY);
    }

    #[test]
    fn euler_angles() {
        let quat = Quaternion::from_euler_angles(0.1, 0.2, 0.3);
        let [heading, attitude, bank] = quat.to_euler_angles();
        assert!(heading.is_close_to(0.1, EPS));
        assert!(attitude.is_close_to(0.2, EPS));
        assert!(bank.is_close_to(0.3, EPS));

        assert!(Quaternion::from_euler_angles(HALF_PI, 0.0, 0.0).apply(Vector3::UNIT_X).is_close_to(Vector3::NEG_UNIT_Z, EPS));
        assert!(Quaternion::from_euler_angles(0.0, HALF_PI, 0.0).apply(Vector3::UNIT_X).is_close_to(Vector3::UNIT_Y, EPS));
        assert!(Quaternion::from_euler_angles(0.0, 0.0, HALF_PI).apply(Vector3::UNIT_Y).is_close_to(Vector3::UNIT_Z, EPS));
    }

    #[test]
    fn euler_angles_at_poles() {
        for (heading, attitude, bank) in [(0.3, HALF_PI, 0.4), (-0.5, -HALF_PI, 0.2)] {
            let quat = Quaternion::from_euler_angles(heading, attitude, bank);
            let [h, a, b] = quat.to_euler_angles();
            assert_eq!(a, attitude);
            assert_eq!(b, 0.0);
            assert!(same_rotation(Quaternion::from_euler_angles(h, a, b), quat));
        }
    }

    #[test]
    fn vector_to_vector() {
        let quat = Quaternion::from_vector_to_vector(Vector3::UNIT_X, Vector3::new(0.0, 3.0, 0.0));
        assert!(quat.apply(Vector3::UNIT_X).is_close_to(Vector3::UNIT_Y, EPS));

        let from = Vector3::new(1.0, 2.0, -1.0);
        let to = Vector3::new(-3.0, 0.5, 2.0);
        let quat = Quaternion::from_vector_to_vector(from, to);
        assert!(quat.apply(from.normalize()).is_close_to(to.normalize(), EPS));

        assert_eq!(Quaternion::from_vector_to_vector(Vector3::ZERO, Vector3::ZERO), Quaternion::IDENTITY);
        assert_eq!(Quaternion::from_vector_to_vector(Vector3::UNIT_X, Vector3::ZERO), Quaternion::IDENTITY);
        assert!(same_rotation(Quaternion::from_vector_to_vector(Vector3::UNIT_Y, Vector3::UNIT_Y), Quaternion::IDENTITY));
    }

    #[test]
    fn vector_to_opposite_vector() {
        for from in [Vector3::UNIT_X, Vector3::new(0.0, 0.0, 2.0), Vector3::new(0.0, -4.0, 1.0)] {
            let to = from * -1.5;
            let quat = Quaternion::from_vector_to_vector(from, to);
            assert!(quat.is_valid());
            assert!(quat.apply(from).is_close_to(from * -1.0, EPS));
        }
    }

    #[test]
    fn slerp_boundaries() {
        let start = Quaternion::from_angle_axis(0.2, Vector3::UNIT_X);
        let end = Quaternion::from_angle_axis(1.4, Vector3::new(0.0, 1.0, 1.0));

        assert_eq!(start.slerp(end, 0.0), start);
        assert_eq!(start.slerp(end, 1.0), end);
        assert_eq!(start.slerp(start, 0.4), start);

        // the negated end point represents the same rotation
        let negated = -end;
        assert!(same_rotation(start.slerp(negated, 0.5), start.slerp(end, 0.5)));
        assert!(same_rotation(start.slerp(negated, 1.0), end));
    }

    #[test]
    fn slerp_halfway() {
        let end = Quaternion::from_angle_axis(HALF_PI, Vector3::UNIT_Z);
        let half = Quaternion::IDENTITY.slerp(end, 0.5);
        assert!(half.is_close_to(Quaternion::from_angle_axis(QUARTER_PI, Vector3::UNIT_Z), EPS));

        // close rotations go through the linear path, which still yields a unit quaternion
        let close = Quaternion::from_angle_axis(0.01, Vector3::UNIT_Z);
        let mut local = Quaternion::IDENTITY;
        local.slerp_local(close, 0.5);
        assert!(local.magnitude().is_close_to(1.0, EPS));
        assert!(local.is_close_to(Quaternion::from_angle_axis(0.005, Vector3::UNIT_Z), EPS));
    }

    #[test]
    fn multiply_and_invert() {
        let lhs = Quaternion::from_angle_axis(0.5, Vector3::UNIT_X);
        let rhs = Quaternion::from_angle_axis(-1.2, Vector3::new(1.0, 1.0, 0.0));
        assert!((lhs * rhs).to_rotation_matrix().is_close_to(lhs.to_rotation_matrix() * rhs.to_rotation_matrix(), EPS));

        let scaled = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        assert!((scaled * scaled.invert()).is_close_to(Quaternion::IDENTITY, 1e-12));
        assert!(lhs.invert().is_close_to(lhs.conjugate(), 1e-12));

        let mut local = scaled;
        local.invert_local().multiply_local(scaled);
        assert!(local.is_close_to(Quaternion::IDENTITY, 1e-12));
    }

    #[test]
    fn axis_rotations() {
        let quat = Quaternion::from_angle_axis(0.7, Vector3::new(1.0, 2.0, 3.0));
        assert!(quat.apply_rotation_x(0.3).is_close_to(quat * Quaternion::from_angle_axis(0.3, Vector3::UNIT_X), 1e-12));
        assert!(quat.apply_rotation_y(0.3).is_close_to(quat * Quaternion::from_angle_axis(0.3, Vector3::UNIT_Y), 1e-12));
        assert!(quat.apply_rotation_z(0.3).is_close_to(quat * Quaternion::from_angle_axis(0.3, Vector3::UNIT_Z), 1e-12));
        assert_eq!(quat.apply_rotation(0.3, Vector3::ZERO), quat);
    }

    #[test]
    fn axes_and_look_at() {
        let quat = Quaternion::from_angle_axis(1.0, Vector3::new(0.0, 1.0, 1.0));
        let [x_axis, y_axis, z_axis] = quat.to_axes();
        assert!(Quaternion::from_axes(x_axis, y_axis, z_axis).is_close_to(quat, EPS));

        let dir = Vector3::new(1.0, 0.0, 1.0);
        let look = Quaternion::look_at(dir, Vector3::UNIT_Y);
        assert!(look.apply(Vector3::UNIT_Z).is_close_to(dir.normalize(), EPS));
        assert!(look.apply(Vector3::UNIT_Y).is_close_to(Vector3::UNIT_Y, EPS));
    }

    #[test]
    fn magnitude() {
        assert_eq!(Quaternion::IDENTITY.magnitude(), 1.0);
        assert!(Quaternion::new(0.0, 3.0, 0.0, 4.0).magnitude().is_close_to(5.0, EPS));
        assert!(Quaternion::new(0.0, 3.0, 0.0, 4.0).normalize().magnitude().is_close_to(1.0, EPS));
        let zero = Quaternion::new(0.0, 0.0, 0.0, 0.0);
        assert_eq!(zero.normalize(), zero);
    }

    #[test]
    fn identity_and_validity() {
        assert!(Quaternion::default().is_identity());
        assert!(!Quaternion::new(0.0, 0.0, 1e-300, 1.0).is_identity());
        assert!(!Quaternion::new(f64::NAN, 0.0, 0.0, 1.0).is_valid());
        assert_eq!(Quaternion::IDENTITY.value(3), Ok(1.0));
        assert!(Quaternion::IDENTITY.value(4).is_err());
        assert_eq!(Quaternion::IDENTITY.to_string(), "(1, (0, 0, 0))");
    }
}
