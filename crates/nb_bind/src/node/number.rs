use core::fmt;

// -----------------------------------------------------------------------------
// Number

/// A numeric scalar in its widest lossless representation.
///
/// Non-negative integers are always [`Number::PosInt`] and negative ones
/// [`Number::NegInt`]; the `From` conversions normalize accordingly, so two
/// equal integers compare equal regardless of the source type.
///
/// The narrowing accessors return `None` instead of truncating. Floats
/// narrow to integers only when they carry no fraction.
///
/// # Examples
///
/// ```
/// use nb_bind::node::Number;
///
/// assert_eq!(Number::from(7_i32), Number::PosInt(7));
/// assert_eq!(Number::from(300_u32).as_u8(), None);
/// assert_eq!(Number::Float(2.0).as_i32(), Some(2));
/// assert_eq!(Number::Float(2.5).as_i32(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    PosInt(u64),
    NegInt(i64),
    Float(f64),
}

macro_rules! narrow_signed {
    ($($name:ident => $ty:ty),* $(,)?) => {
        $(
            #[inline]
            pub fn $name(&self) -> Option<$ty> {
                self.as_i64().and_then(|v| <$ty>::try_from(v).ok())
            }
        )*
    };
}

macro_rules! narrow_unsigned {
    ($($name:ident => $ty:ty),* $(,)?) => {
        $(
            #[inline]
            pub fn $name(&self) -> Option<$ty> {
                self.as_u64().and_then(|v| <$ty>::try_from(v).ok())
            }
        )*
    };
}

// `2^63` and `2^64`. Both round trip through the saturating casts, so the
// range is checked before casting.
const I64_END: f64 = 9_223_372_036_854_775_808.0;
const U64_END: f64 = 18_446_744_073_709_551_616.0;

impl Number {
    #[inline]
    pub const fn is_integer(&self) -> bool {
        !matches!(self, Self::Float(_))
    }

    #[inline]
    pub const fn is_float(&self) -> bool {
        matches!(self, Self::Float(_))
    }

    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::PosInt(v) => i64::try_from(v).ok(),
            Self::NegInt(v) => Some(v),
            Self::Float(v) if (-I64_END..I64_END).contains(&v) => {
                let int = v as i64;
                (int as f64 == v).then_some(int)
            }
            Self::Float(_) => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Self::PosInt(v) => Some(v),
            Self::NegInt(_) => None,
            Self::Float(v) if (0.0..U64_END).contains(&v) => {
                let int = v as u64;
                (int as f64 == v).then_some(int)
            }
            Self::Float(_) => None,
        }
    }

    narrow_signed! {
        as_i8 => i8,
        as_i16 => i16,
        as_i32 => i32,
        as_isize => isize,
    }

    narrow_unsigned! {
        as_u8 => u8,
        as_u16 => u16,
        as_u32 => u32,
        as_usize => usize,
    }

    /// Always succeeds; large integers may lose precision.
    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        Some(match *self {
            Self::PosInt(v) => v as f64,
            Self::NegInt(v) => v as f64,
            Self::Float(v) => v,
        })
    }

    /// Fails only for finite values outside the `f32` range.
    pub fn as_f32(&self) -> Option<f32> {
        let wide = self.as_f64()?;
        let narrow = wide as f32;
        if wide.is_finite() && narrow.is_infinite() {
            None
        } else {
            Some(narrow)
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PosInt(v) => fmt::Display::fmt(v, f),
            Self::NegInt(v) => fmt::Display::fmt(v, f),
            Self::Float(v) => fmt::Display::fmt(v, f),
        }
    }
}

macro_rules! from_unsigned {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::PosInt(value as u64)
                }
            }
        )*
    };
}

macro_rules! from_signed {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                #[inline]
                fn from(value: $ty) -> Self {
                    if value < 0 {
                        Self::NegInt(value as i64)
                    } else {
                        Self::PosInt(value as u64)
                    }
                }
            }
        )*
    };
}

from_unsigned!(u8, u16, u32, u64, usize);
from_signed!(i8, i16, i32, i64, isize);

impl From<f32> for Number {
    #[inline]
    fn from(value: f32) -> Self {
        Self::Float(value as f64)
    }
}

impl From<f64> for Number {
    #[inline]
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::Number;

    #[test]
    fn normalizes_sign() {
        assert_eq!(Number::from(0_i64), Number::PosInt(0));
        assert_eq!(Number::from(-3_i8), Number::NegInt(-3));
        assert_eq!(Number::from(3_i8), Number::from(3_u64));
    }

    #[test]
    fn narrowing_rejects_overflow() {
        assert_eq!(Number::PosInt(127).as_i8(), Some(127));
        assert_eq!(Number::PosInt(128).as_i8(), None);
        assert_eq!(Number::NegInt(-1).as_u32(), None);
        assert_eq!(Number::PosInt(u64::MAX).as_i64(), None);
        assert_eq!(Number::Float(f64::NAN).as_i64(), None);
        assert_eq!(Number::Float(1e300).as_f32(), None);
        assert_eq!(Number::Float(-4.0).as_i16(), Some(-4));
        assert_eq!(Number::Float(-4.0).as_u16(), None);
    }

    #[test]
    fn float_narrowing_respects_integer_bounds() {
        let two_pow_63 = 9_223_372_036_854_775_808.0;
        let two_pow_64 = 18_446_744_073_709_551_616.0;
        assert_eq!(Number::Float(two_pow_63).as_i64(), None);
        assert_eq!(Number::Float(-two_pow_63).as_i64(), Some(i64::MIN));
        assert_eq!(Number::Float(-two_pow_63 * 2.0).as_i64(), None);
        assert_eq!(Number::Float(two_pow_64).as_u64(), None);
        assert_eq!(Number::Float(two_pow_63).as_u64(), Some(1 << 63));
        assert_eq!(Number::Float(f64::INFINITY).as_u64(), None);
        assert_eq!(Number::Float(0.5).as_u64(), None);
    }

    #[test]
    fn displays_plainly() {
        assert_eq!(Number::NegInt(-12).to_string(), "-12");
        assert_eq!(Number::Float(1.5).to_string(), "1.5");
    }
}
