use core::ops::*;
use crate::*;

mod vector2;
pub use vector2::*;

mod vector3;
pub use vector3::*;

mod vector4;
pub use vector4::*;

macro_rules! generic_vec {
    {
        $docs:meta;
        $name:ident,
        $elem_cnt:literal,
        $($comp:ident),+;
    } => {
        #[$docs]
        #[derive(Clone, Copy, PartialEq, Debug, Default)]
        pub struct $name {
            $(pub $comp: f64,)+
        }

        impl $name {
            /// Vector with all components set to 0
            pub const ZERO : Self = Self { $($comp: 0.0),+ };
            /// Vector with all components set to 1
            pub const ONE : Self = Self { $($comp: 1.0),+ };
            /// Vector with all components set to -1
            pub const NEG_ONE : Self = Self { $($comp: -1.0),+ };
            /// Number of components in the vector
            pub const LEN : usize = $elem_cnt;

            /// Create a new vector
            #[inline(always)]
            #[must_use]
            pub const fn new($($comp: f64),+) -> Self {
                Self{ $($comp),+ }
            }

            /// Create a vector with all components set to `val`
            #[inline(always)]
            #[must_use]
            pub const fn set(val: f64) -> Self {
                Self{ $($comp: val),+ }
            }

            /// Create a vector from an array
            #[inline(always)]
            #[must_use]
            pub fn from_array(arr: [f64; $elem_cnt]) -> Self {
                let [$($comp),+] = arr;
                Self{ $($comp),+ }
            }

            /// Get the content of the vector as an array
            #[inline(always)]
            #[must_use]
            pub fn to_array(self) -> [f64; $elem_cnt] {
                [$(self.$comp),+]
            }

            /// Create a vector from single precision values
            #[inline]
            #[must_use]
            pub fn from_f32_array(arr: [f32; $elem_cnt]) -> Self {
                let [$($comp),+] = arr;
                Self{ $($comp: $comp as f64),+ }
            }

            /// Get the content of the vector as single precision values
            #[inline]
            #[must_use]
            pub fn to_f32_array(self) -> [f32; $elem_cnt] {
                [$(self.$comp as f32),+]
            }

            /// Get the component at `index`
            pub fn value(self, index: usize) -> Result<f64> {
                check_index(index, $elem_cnt)?;
                Ok(self.to_array()[index])
            }

            /// Set the component at `index`, the vector is left untouched when the index is out of range
            pub fn set_value(&mut self, index: usize, val: f64) -> Result<()> {
                check_index(index, $elem_cnt)?;
                self[index] = val;
                Ok(())
            }

        //--------------------------------------------------------------

            /// Calculate the dot product of 2 vectors
            #[inline]
            #[must_use]
            pub fn dot(self, rhs: Self) -> f64 {
                crate::utils::strip_plus!($(+ self.$comp * rhs.$comp)+)
            }

            /// Calculate the square length of the vector
            #[inline]
            #[must_use]
            pub fn length_squared(self) -> f64 {
                crate::utils::strip_plus!($(+ self.$comp * self.$comp)+)
            }

            /// Calculate the length of the vector
            #[inline]
            #[must_use]
            pub fn length(self) -> f64 {
                self.length_squared().sqrt()
            }

            /// Calculate the square distance between 2 vectors
            #[inline]
            #[must_use]
            pub fn distance_squared(self, other: Self) -> f64 {
                (other - self).length_squared()
            }

            /// Calculate the distance between 2 vectors
            #[inline]
            #[must_use]
            pub fn distance(self, other: Self) -> f64 {
                self.distance_squared(other).sqrt()
            }

            /// Normalize the vector, a zero length vector is returned unchanged
            ///
            /// The inverse square root of the backend is used, so the resulting length is not guaranteed to be exactly 1.
            #[inline]
            #[must_use]
            pub fn normalize(self) -> Self {
                self.normalize_with::<DefaultBackend>()
            }

            /// Normalize the vector using the given backend
            #[must_use]
            pub fn normalize_with<B: MathBackend>(self) -> Self {
                let len_sq = self.length_squared();
                if len_sq <= EPSILON {
                    self
                } else {
                    self * B::inverse_sqrt(len_sq)
                }
            }

            /// Normalize the vector in place
            #[inline]
            pub fn normalize_local(&mut self) -> &mut Self {
                *self = self.normalize();
                self
            }

            /// Check if the vector has a length of 1, within `epsilon`
            #[inline]
            #[must_use]
            pub fn is_normalized(self, epsilon: f64) -> bool {
                self.length_squared().is_close_to(1.0, epsilon)
            }

            /// Get the negated vector
            #[inline]
            #[must_use]
            pub fn negate(self) -> Self {
                -self
            }

            /// Negate the vector in place
            #[inline]
            pub fn negate_local(&mut self) -> &mut Self {
                *self = -*self;
                self
            }

            /// Calculate `self * scale + add`
            #[inline]
            #[must_use]
            pub fn scale_add(self, scale: f64, add: Self) -> Self {
                Self{ $($comp: self.$comp * scale + add.$comp),+ }
            }

            /// Calculate `self * scale + add` in place
            #[inline]
            pub fn scale_add_local(&mut self, scale: f64, add: Self) -> &mut Self {
                *self = self.scale_add(scale, add);
                self
            }

            /// Linearly interpolate from `self` to `end`
            #[inline]
            #[must_use]
            pub fn lerp(self, end: Self, scalar: f64) -> Self {
                Self::lerp_between(self, end, scalar)
            }

            /// Linearly interpolate from `self` to `end` in place
            #[inline]
            pub fn lerp_local(&mut self, end: Self, scalar: f64) -> &mut Self {
                *self = Self::lerp_between(*self, end, scalar);
                self
            }

            /// Linearly interpolate from `begin` to `end`
            ///
            /// When both ends are the same, `begin` is returned without any rounding.
            #[must_use]
            pub fn lerp_between(begin: Self, end: Self, scalar: f64) -> Self {
                if begin == end {
                    return begin;
                }
                let inv = 1.0 - scalar;
                Self{ $($comp: inv * begin.$comp + scalar * end.$comp),+ }
            }

            /// Check that no component is NaN or infinite
            #[inline]
            #[must_use]
            pub fn is_valid(self) -> bool {
                $(self.$comp.is_finite())&&+
            }

            /// Check that all components are finite
            #[inline]
            #[must_use]
            pub fn is_finite(self) -> bool {
                self.is_valid()
            }

            /// Check if any component is infinite
            #[inline]
            #[must_use]
            pub fn is_infinite(self) -> bool {
                $(self.$comp.is_infinite())||+
            }

            /// Component-wise minimum
            #[inline]
            #[must_use]
            pub fn min(self, rhs: Self) -> Self {
                Self{ $($comp: self.$comp.min(rhs.$comp)),+ }
            }

            /// Component-wise maximum
            #[inline]
            #[must_use]
            pub fn max(self, rhs: Self) -> Self {
                Self{ $($comp: self.$comp.max(rhs.$comp)),+ }
            }

            /// Component-wise absolute value
            #[inline]
            #[must_use]
            pub fn abs(self) -> Self {
                Self{ $($comp: self.$comp.abs()),+ }
            }
        }

        impl Index<usize> for $name {
            type Output = f64;

            #[inline(always)]
            fn index(&self, index: usize) -> &Self::Output {
                debug_assert!(index < $elem_cnt);
                let mut _idx = 0;
                $(
                    if index == _idx {
                        return &self.$comp;
                    }
                    _idx += 1;
                )+
                panic!("index {index} out of range for a vector with {} components", $elem_cnt)
            }
        }

        impl IndexMut<usize> for $name {
            #[inline(always)]
            fn index_mut(&mut self, index: usize) -> &mut Self::Output {
                debug_assert!(index < $elem_cnt);
                let mut _idx = 0;
                $(
                    if index == _idx {
                        return &mut self.$comp;
                    }
                    _idx += 1;
                )+
                panic!("index {index} out of range for a vector with {} components", $elem_cnt)
            }
        }

        //------------------------------------------------------------------------------------------------------------------------------

        impl Add for $name {
            type Output = Self;

            #[inline(always)]
            fn add(self, rhs: Self) -> Self {
                Self{ $($comp: self.$comp + rhs.$comp),+ }
            }
        }

        impl AddAssign for $name {
            #[inline(always)]
            fn add_assign(&mut self, rhs: Self) {
                $(self.$comp += rhs.$comp;)+
            }
        }

        impl Add<f64> for $name {
            type Output = Self;

            #[inline(always)]
            fn add(self, rhs: f64) -> Self {
                Self{ $($comp: self.$comp + rhs),+ }
            }
        }

        impl AddAssign<f64> for $name {
            #[inline(always)]
            fn add_assign(&mut self, rhs: f64) {
                $(self.$comp += rhs;)+
            }
        }

        //--------------------------------------------------------------

        impl Sub for $name {
            type Output = Self;

            #[inline(always)]
            fn sub(self, rhs: Self) -> Self {
                Self{ $($comp: self.$comp - rhs.$comp),+ }
            }
        }

        impl SubAssign for $name {
            #[inline(always)]
            fn sub_assign(&mut self, rhs: Self) {
                $(self.$comp -= rhs.$comp;)+
            }
        }

        impl Sub<f64> for $name {
            type Output = Self;

            #[inline(always)]
            fn sub(self, rhs: f64) -> Self {
                Self{ $($comp: self.$comp - rhs),+ }
            }
        }

        impl SubAssign<f64> for $name {
            #[inline(always)]
            fn sub_assign(&mut self, rhs: f64) {
                $(self.$comp -= rhs;)+
            }
        }

        //--------------------------------------------------------------

        impl Mul for $name {
            type Output = Self;

            #[inline(always)]
            fn mul(self, rhs: Self) -> Self {
                Self{ $($comp: self.$comp * rhs.$comp),+ }
            }
        }

        impl MulAssign for $name {
            #[inline(always)]
            fn mul_assign(&mut self, rhs: Self) {
                $(self.$comp *= rhs.$comp;)+
            }
        }

        impl Mul<f64> for $name {
            type Output = Self;

            #[inline(always)]
            fn mul(self, rhs: f64) -> Self {
                Self{ $($comp: self.$comp * rhs),+ }
            }
        }

        impl MulAssign<f64> for $name {
            #[inline(always)]
            fn mul_assign(&mut self, rhs: f64) {
                $(self.$comp *= rhs;)+
            }
        }

        impl Mul<$name> for f64 {
            type Output = $name;

            #[inline(always)]
            fn mul(self, rhs: $name) -> $name {
                rhs * self
            }
        }

        //--------------------------------------------------------------

        // No zero checks, division follows IEEE-754
        impl Div for $name {
            type Output = Self;

            #[inline(always)]
            fn div(self, rhs: Self) -> Self {
                Self{ $($comp: self.$comp / rhs.$comp),+ }
            }
        }

        impl DivAssign for $name {
            #[inline(always)]
            fn div_assign(&mut self, rhs: Self) {
                $(self.$comp /= rhs.$comp;)+
            }
        }

        impl Div<f64> for $name {
            type Output = Self;

            #[inline(always)]
            fn div(self, rhs: f64) -> Self {
                Self{ $($comp: self.$comp / rhs),+ }
            }
        }

        impl DivAssign<f64> for $name {
            #[inline(always)]
            fn div_assign(&mut self, rhs: f64) {
                $(self.$comp /= rhs;)+
            }
        }

        //--------------------------------------------------------------

        impl Neg for $name {
            type Output = Self;

            #[inline(always)]
            fn neg(self) -> Self {
                Self{ $($comp: -self.$comp),+ }
            }
        }

        //------------------------------------------------------------------------------------------------------------------------------

        impl ApproxEq for $name {
            type Epsilon = f64;
            const DEFAULT_EPSILON : f64 = ALLOWED_DEVIANCE;

            fn is_close_to(self, rhs: Self, epsilon: f64) -> bool {
                $(self.$comp.is_close_to(rhs.$comp, epsilon))&&+
            }
        }

        impl From<[f64; $elem_cnt]> for $name {
            fn from(arr: [f64; $elem_cnt]) -> Self {
                Self::from_array(arr)
            }
        }

        impl From<$name> for [f64; $elem_cnt] {
            fn from(v: $name) -> Self {
                v.to_array()
            }
        }
    };
}

generic_vec!{ doc = "2D vector"; Vector2, 2, x, y; }
generic_vec!{ doc = "3D vector"; Vector3, 3, x, y, z; }
generic_vec!{ doc = "4D vector, also used as a homogeneous coordinate"; Vector4, 4, x, y, z, w; }

static_assertions::assert_eq_size!(Vector2, [f64; 2]);
static_assertions::assert_eq_size!(Vector3, [f64; 3]);
static_assertions::assert_eq_size!(Vector4, [f64; 4]);
