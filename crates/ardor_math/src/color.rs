use core::{ops::*, fmt::Display};
use rand::Rng;
use crate::*;

/// Single precision RGBA color, with components nominally in `[0, 1]`
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ColorRGBA {
    pub r : f32,
    pub g : f32,
    pub b : f32,
    pub a : f32,
}

impl ColorRGBA {
    pub const BLACK          : Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const BLACK_NO_ALPHA : Self = Self::new(0.0, 0.0, 0.0, 0.0);
    pub const WHITE          : Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const DARK_GRAY      : Self = Self::new(0.2, 0.2, 0.2, 1.0);
    pub const GRAY           : Self = Self::new(0.5, 0.5, 0.5, 1.0);
    pub const LIGHT_GRAY     : Self = Self::new(0.8, 0.8, 0.8, 1.0);
    pub const RED            : Self = Self::new(1.0, 0.0, 0.0, 1.0);
    pub const GREEN          : Self = Self::new(0.0, 1.0, 0.0, 1.0);
    pub const BLUE           : Self = Self::new(0.0, 0.0, 1.0, 1.0);
    pub const YELLOW         : Self = Self::new(1.0, 1.0, 0.0, 1.0);
    pub const MAGENTA        : Self = Self::new(1.0, 0.0, 1.0, 1.0);
    pub const CYAN           : Self = Self::new(0.0, 1.0, 1.0, 1.0);
    pub const ORANGE         : Self = Self::new(251.0 / 255.0, 130.0 / 255.0, 0.0, 1.0);
    pub const BROWN          : Self = Self::new(65.0 / 255.0, 40.0 / 255.0, 25.0 / 255.0, 1.0);
    pub const PINK           : Self = Self::new(1.0, 0.68, 0.68, 1.0);

    /// Create a new color
    #[inline(always)]
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Get the component at `index`, ordered `r, g, b, a`
    pub fn value(self, index: usize) -> Result<f32> {
        check_index(index, 4)?;
        Ok(self.to_array()[index])
    }

    /// Set the component at `index`, ordered `r, g, b, a`
    pub fn set_value(&mut self, index: usize, val: f32) -> Result<()> {
        match index {
            0 => self.r = val,
            1 => self.g = val,
            2 => self.b = val,
            3 => self.a = val,
            _ => return Err(Error::IndexOutOfRange { index, len: 4 }),
        }
        Ok(())
    }

    #[inline]
    #[must_use]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Clamp all components into `[0, 1]`
    #[must_use]
    pub fn clamp(self) -> Self {
        Self {
            r: self.r.clamp(0.0, 1.0),
            g: self.g.clamp(0.0, 1.0),
            b: self.b.clamp(0.0, 1.0),
            a: self.a.clamp(0.0, 1.0),
        }
    }

    /// Clamp all components into `[0, 1]` in place
    #[inline]
    pub fn clamp_local(&mut self) -> &mut Self {
        *self = self.clamp();
        self
    }

    /// Create a random opaque color
    #[must_use]
    pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self { r: rng.gen(), g: rng.gen(), b: rng.gen(), a: 1.0 }
    }

    /// Linearly interpolate between 2 colors
    #[inline]
    #[must_use]
    pub fn lerp(self, end: Self, scalar: f32) -> Self {
        if self == end {
            return self;
        }
        let inv = 1.0 - scalar;
        Self {
            r: inv * self.r + scalar * end.r,
            g: inv * self.g + scalar * end.g,
            b: inv * self.b + scalar * end.b,
            a: inv * self.a + scalar * end.a,
        }
    }

    /// Pack the color into an integer as `0xAARRGGBB`
    ///
    /// Components are expected to be in `[0, 1]`.
    #[must_use]
    pub fn as_int_argb(self) -> u32 {
        pack(self.a, self.r, self.g, self.b)
    }

    /// Pack the color into an integer as `0xRRGGBBAA`
    ///
    /// Components are expected to be in `[0, 1]`.
    #[must_use]
    pub fn as_int_rgba(self) -> u32 {
        pack(self.r, self.g, self.b, self.a)
    }

    /// Pack the color into an integer as `0xAABBGGRR`
    ///
    /// Components are expected to be in `[0, 1]`.
    #[must_use]
    pub fn as_int_abgr(self) -> u32 {
        pack(self.a, self.b, self.g, self.r)
    }

    /// Unpack a color from an integer stored as `0xAARRGGBB`
    #[must_use]
    pub fn from_int_argb(color: u32) -> Self {
        let [a, r, g, b] = unpack(color);
        Self { r, g, b, a }
    }

    /// Unpack a color from an integer stored as `0xRRGGBBAA`
    #[must_use]
    pub fn from_int_rgba(color: u32) -> Self {
        let [r, g, b, a] = unpack(color);
        Self { r, g, b, a }
    }

    /// Unpack a color from an integer stored as `0xAABBGGRR`
    #[must_use]
    pub fn from_int_abgr(color: u32) -> Self {
        let [a, b, g, r] = unpack(color);
        Self { r, g, b, a }
    }

    /// Format the color as a lowercase `#rrggbbaa` string, clamping the components into `[0, 1]`
    #[must_use]
    pub fn as_hex_rrggbbaa(self) -> String {
        let hex = |val: f32| (val.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}{:02x}", hex(self.r), hex(self.g), hex(self.b), hex(self.a))
    }

    /// Parse a color from one of the following notations:
    /// - `#g` and `#ga`: gray with an optional alpha, each a single hex digit
    /// - `#rgb` and `#rgba`: single hex digit components
    /// - `#rrggbb` and `#rrggbbaa`: 2 hex digit components
    ///
    /// Missing alpha values default to 1.
    pub fn parse_color(color: &str) -> Result<Self> {
        let invalid = || Error::InvalidColorString(color.to_string());

        let digits = color.strip_prefix('#').ok_or_else(invalid)?;
        let nibbles = digits.chars()
            .map(|c| c.to_digit(16).map(|val| val as f32))
            .collect::<Option<Vec<f32>>>()
            .ok_or_else(invalid)?;

        let single = |idx: usize| nibbles[idx] / 15.0;
        let double = |idx: usize| (nibbles[idx * 2] * 16.0 + nibbles[idx * 2 + 1]) / 255.0;

        match nibbles.len() {
            1 => Ok(Self::new(single(0), single(0), single(0), 1.0)),
            2 => Ok(Self::new(single(0), single(0), single(0), single(1))),
            3 => Ok(Self::new(single(0), single(1), single(2), 1.0)),
            4 => Ok(Self::new(single(0), single(1), single(2), single(3))),
            6 => Ok(Self::new(double(0), double(1), double(2), 1.0)),
            8 => Ok(Self::new(double(0), double(1), double(2), double(3))),
            _ => Err(invalid()),
        }
    }

    /// Check if no component is NaN or infinite
    #[inline]
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }
}

fn to_byte(val: f32) -> u32 {
    ((val * 255.0) as i32 & 0xFF) as u32
}

fn pack(hi: f32, mid_hi: f32, mid_lo: f32, lo: f32) -> u32 {
    to_byte(hi) << 24 | to_byte(mid_hi) << 16 | to_byte(mid_lo) << 8 | to_byte(lo)
}

fn unpack(color: u32) -> [f32; 4] {
    color.to_be_bytes().map(|byte| byte as f32 / 255.0)
}

impl Default for ColorRGBA {
    fn default() -> Self {
        Self::WHITE
    }
}

macro_rules! color_ops {
    ($($trait:ident, $func:ident, $assign_trait:ident, $assign_func:ident, $op:tt);*) => {
        $(
            impl $trait for ColorRGBA {
                type Output = Self;

                #[inline]
                fn $func(self, rhs: Self) -> Self {
                    Self { r: self.r $op rhs.r, g: self.g $op rhs.g, b: self.b $op rhs.b, a: self.a $op rhs.a }
                }
            }

            impl $trait<f32> for ColorRGBA {
                type Output = Self;

                #[inline]
                fn $func(self, rhs: f32) -> Self {
                    Self { r: self.r $op rhs, g: self.g $op rhs, b: self.b $op rhs, a: self.a $op rhs }
                }
            }

            impl $assign_trait for ColorRGBA {
                #[inline]
                fn $assign_func(&mut self, rhs: Self) {
                    *self = *self $op rhs;
                }
            }

            impl $assign_trait<f32> for ColorRGBA {
                #[inline]
                fn $assign_func(&mut self, rhs: f32) {
                    *self = *self $op rhs;
                }
            }
        )*
    };
}

color_ops!{
    Add, add, AddAssign, add_assign, +;
    Sub, sub, SubAssign, sub_assign, -;
    Mul, mul, MulAssign, mul_assign, *;
    Div, div, DivAssign, div_assign, /
}

impl ApproxEq for ColorRGBA {
    type Epsilon = f32;
    const DEFAULT_EPSILON : f32 = 1.0 / 512.0;

    fn is_close_to(self, rhs: Self, epsilon: f32) -> bool {
        self.r.is_close_to(rhs.r, epsilon) &&
        self.g.is_close_to(rhs.g, epsilon) &&
        self.b.is_close_to(rhs.b, epsilon) &&
        self.a.is_close_to(rhs.a, epsilon)
    }
}

impl core::str::FromStr for ColorRGBA {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_color(s)
    }
}

impl Display for ColorRGBA {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("(r: {}, g: {}, b: {}, a: {})", self.r, self.g, self.b, self.a))
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};
    use crate::*;

    #[test]
    fn hex_round_trip() {
        assert_eq!(ColorRGBA::BROWN.as_hex_rrggbbaa(), "#412819ff");
        assert_eq!(ColorRGBA::parse_color("#412819ff"), Ok(ColorRGBA::BROWN));
        assert_eq!(ColorRGBA::BLUE.as_hex_rrggbbaa(), "#0000ffff");
        assert_eq!(ColorRGBA::new(2.0, -1.0, 0.5, 1.0).as_hex_rrggbbaa(), "#ff0080ff");
    }

    #[test]
    fn parse_short_notations() {
        assert_eq!(ColorRGBA::parse_color("#f"), Ok(ColorRGBA::WHITE));
        assert_eq!(ColorRGBA::parse_color("#00"), Ok(ColorRGBA::BLACK_NO_ALPHA));
        assert_eq!(ColorRGBA::parse_color("#F00"), Ok(ColorRGBA::RED));
        assert_eq!(ColorRGBA::parse_color("#0f0f"), Ok(ColorRGBA::GREEN));
        assert_eq!(ColorRGBA::parse_color("#ffff00"), Ok(ColorRGBA::YELLOW));
        assert_eq!("#00ffff".parse::<ColorRGBA>(), Ok(ColorRGBA::CYAN));

        let gray = ColorRGBA::parse_color("#8").unwrap();
        assert!(gray.is_close_to(ColorRGBA::new(8.0 / 15.0, 8.0 / 15.0, 8.0 / 15.0, 1.0), 1e-6));
    }

    #[test]
    fn parse_rejects_invalid() {
        for input in ["", "ff0000", "#", "#12345", "#1234567", "#gg0000", "#12345678a", "#é1"] {
            assert_eq!(ColorRGBA::parse_color(input), Err(Error::InvalidColorString(input.to_string())), "{input}");
        }
    }

    #[test]
    fn int_packing() {
        assert_eq!(ColorRGBA::RED.as_int_argb(), 0xFFFF0000);
        assert_eq!(ColorRGBA::RED.as_int_rgba(), 0xFF0000FF);
        assert_eq!(ColorRGBA::RED.as_int_abgr(), 0xFF0000FF);
        assert_eq!(ColorRGBA::BLUE.as_int_abgr(), 0xFFFF0000);

        assert_eq!(ColorRGBA::from_int_argb(0xFF00FF00), ColorRGBA::GREEN);
        assert_eq!(ColorRGBA::from_int_rgba(0x0000FFFF), ColorRGBA::BLUE);
        assert_eq!(ColorRGBA::from_int_abgr(0xFF0000FF), ColorRGBA::RED);

        let color = ColorRGBA::new(0.2, 0.4, 0.6, 0.8);
        assert!(ColorRGBA::from_int_rgba(color.as_int_rgba()).is_close_to(color, 1.0 / 255.0));
    }

    #[test]
    fn arithmetic() {
        let a = ColorRGBA::new(0.5, 0.25, 1.0, 1.0);
        assert_eq!(a + ColorRGBA::BLACK_NO_ALPHA, a);
        assert_eq!(a * 2.0, ColorRGBA::new(1.0, 0.5, 2.0, 2.0));
        assert_eq!(a * ColorRGBA::RED, ColorRGBA::new(0.5, 0.0, 0.0, 1.0));
        assert_eq!(a / 2.0, ColorRGBA::new(0.25, 0.125, 0.5, 0.5));
        assert_eq!(a - a, ColorRGBA::BLACK_NO_ALPHA);

        let mut c = a;
        c *= 4.0;
        assert_eq!(c.clamp(), ColorRGBA::WHITE);
        c.clamp_local();
        assert_eq!(c, ColorRGBA::WHITE);
        c -= ColorRGBA::new(1.0, 1.0, 1.0, 0.0);
        assert_eq!(c, ColorRGBA::BLACK);
    }

    #[test]
    fn lerp() {
        assert_eq!(ColorRGBA::BLACK.lerp(ColorRGBA::WHITE, 0.5), ColorRGBA::GRAY);
        assert_eq!(ColorRGBA::RED.lerp(ColorRGBA::BLUE, 0.0), ColorRGBA::RED);
        assert_eq!(ColorRGBA::RED.lerp(ColorRGBA::BLUE, 1.0), ColorRGBA::BLUE);
    }

    #[test]
    fn values_and_random() {
        let mut color = ColorRGBA::default();
        assert_eq!(color, ColorRGBA::WHITE);
        assert_eq!(color.value(3), Ok(1.0));
        assert!(color.set_value(4, 0.0).is_err());
        assert_eq!(color, ColorRGBA::WHITE);
        color.set_value(0, 0.0).unwrap();
        assert_eq!(color, ColorRGBA::CYAN);

        let mut rng = StdRng::seed_from_u64(1);
        let random = ColorRGBA::random_color(&mut rng);
        assert_eq!(random.a, 1.0);
        assert!(random.is_valid());
        assert_eq!(random.clamp(), random);
        assert!(!ColorRGBA::new(f32::NAN, 0.0, 0.0, 1.0).is_valid());
    }

    #[test]
    fn display() {
        assert_eq!(ColorRGBA::RED.to_string(), "(r: 1, g: 0, b: 0, a: 1)");
    }
}
