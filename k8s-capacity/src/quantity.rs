use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;
use std::hash::Hasher;
use std::iter::Sum;
use std::ops::Add;
use std::ops::AddAssign;
use std::ops::Neg;
use std::ops::Sub;
use std::ops::SubAssign;
use std::str::FromStr;

use serde::de;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serializer;

use super::*;

const NANOS_PER_UNIT: i128 = 1_000_000_000;

const DECIMAL_SUFFIXES: [(&str, u32); 10] = [
    ("n", 0),
    ("u", 3),
    ("m", 6),
    ("", 9),
    ("k", 12),
    ("M", 15),
    ("G", 18),
    ("T", 21),
    ("P", 24),
    ("E", 27),
];

const BINARY_SUFFIXES: [(&str, u32); 6] = [
    ("Ki", 10),
    ("Mi", 20),
    ("Gi", 30),
    ("Ti", 40),
    ("Pi", 50),
    ("Ei", 60),
];

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum QuantityParseError {
    #[error("quantity is empty")]
    Empty,
    #[error("quantity {0:?} has no valid number")]
    InvalidNumber(String),
    #[error("quantity {quantity:?} has unknown suffix {suffix:?}")]
    InvalidSuffix { quantity: String, suffix: String },
    #[error("quantity {0:?} is out of range")]
    OutOfRange(String),
}

/// Notation a quantity was written in, kept so it can be printed back canonically.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum Format {
    /// `Ki`, `Mi`, `Gi`, ...
    Binary,
    /// `m`, `k`, `M`, plain numbers and exponents.
    #[default]
    Decimal,
}

/// Unit a quantity can be read out in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scale {
    Nano,
    Micro,
    Milli,
    Unit,
    Kilo,
    Mega,
    Giga,
    Tera,
    Peta,
    Exa,
    Kibi,
    Mebi,
    Gibi,
    Tebi,
    Pebi,
    Exbi,
}

impl Scale {
    const fn nanos(self) -> i128 {
        match self {
            Self::Nano => 1,
            Self::Micro => 1_000,
            Self::Milli => 1_000_000,
            Self::Unit => NANOS_PER_UNIT,
            Self::Kilo => NANOS_PER_UNIT * 1_000,
            Self::Mega => NANOS_PER_UNIT * 1_000_000,
            Self::Giga => NANOS_PER_UNIT * 1_000_000_000,
            Self::Tera => NANOS_PER_UNIT * 1_000_000_000_000,
            Self::Peta => NANOS_PER_UNIT * 1_000_000_000_000_000,
            Self::Exa => NANOS_PER_UNIT * 1_000_000_000_000_000_000,
            Self::Kibi => NANOS_PER_UNIT << 10,
            Self::Mebi => NANOS_PER_UNIT << 20,
            Self::Gibi => NANOS_PER_UNIT << 30,
            Self::Tebi => NANOS_PER_UNIT << 40,
            Self::Pebi => NANOS_PER_UNIT << 50,
            Self::Exbi => NANOS_PER_UNIT << 60,
        }
    }
}

/// An exact resource amount: CPU cores, bytes or a plain count.
///
/// The value is held as an integer number of nano-units, which is the finest
/// precision the API server keeps. Sums and differences are therefore exact;
/// floating point only appears in [`Quantity::ratio`] and [`Quantity::scaled_f64`].
/// An absent resource is [`Quantity::ZERO`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Quantity {
    nanos: i128,
    format: Format,
}

impl Quantity {
    pub const ZERO: Self = Self {
        nanos: 0,
        format: Format::Decimal,
    };

    pub const fn from_units(units: i64) -> Self {
        Self {
            nanos: units as i128 * NANOS_PER_UNIT,
            format: Format::Decimal,
        }
    }

    pub const fn from_milli(milli: i64) -> Self {
        Self {
            nanos: milli as i128 * 1_000_000,
            format: Format::Decimal,
        }
    }

    pub fn parse(text: &str) -> Result<Self, QuantityParseError> {
        text.parse()
    }

    pub const fn is_zero(&self) -> bool {
        self.nanos == 0
    }

    pub const fn is_negative(&self) -> bool {
        self.nanos < 0
    }

    /// Whole units, rounded up.
    pub fn value(&self) -> i64 {
        self.scaled_value(Scale::Unit)
    }

    /// Thousandths of a unit, rounded up.
    pub fn milli_value(&self) -> i64 {
        self.scaled_value(Scale::Milli)
    }

    /// `ceil(self / scale)`, saturating at the `i64` bounds.
    pub fn scaled_value(&self, scale: Scale) -> i64 {
        let unit = scale.nanos();
        let floor = self.nanos.div_euclid(unit);
        let ceil = if self.nanos.rem_euclid(unit) == 0 {
            floor
        } else {
            floor + 1
        };
        i64::try_from(ceil).unwrap_or(if ceil < 0 { i64::MIN } else { i64::MAX })
    }

    pub fn scaled_f64(&self, scale: Scale) -> f64 {
        self.nanos as f64 / scale.nanos() as f64
    }

    /// `self / denominator`, or exactly `0.0` when the denominator is zero.
    ///
    /// Both sides are compared in nano-units, so the result is never NaN or infinite.
    pub fn ratio(&self, denominator: &Self) -> f64 {
        if denominator.nanos == 0 {
            0.0
        } else {
            self.nanos as f64 / denominator.nanos as f64
        }
    }

    fn from_parts(text: &str) -> Result<Self, QuantityParseError> {
        let out_of_range = || QuantityParseError::OutOfRange(text.to_string());

        let (negative, unsigned) = if let Some(rest) = text.strip_prefix('-') {
            (true, rest)
        } else {
            (false, text.strip_prefix('+').unwrap_or(text))
        };

        let number_len = unsigned
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(unsigned.len());
        let (number, suffix) = unsigned.split_at(number_len);
        let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));
        if (whole.is_empty() && fraction.is_empty()) || fraction.contains('.') {
            return Err(QuantityParseError::InvalidNumber(text.to_string()));
        }

        let mantissa = whole
            .bytes()
            .chain(fraction.bytes())
            .try_fold(0_i128, |acc, digit| {
                acc.checked_mul(10)?.checked_add(i128::from(digit - b'0'))
            })
            .ok_or_else(out_of_range)?;
        let fraction_digits = u32::try_from(fraction.len()).map_err(|_| out_of_range())?;

        let (multiplier, format) =
            Multiplier::parse(suffix).ok_or_else(|| QuantityParseError::InvalidSuffix {
                quantity: text.to_string(),
                suffix: suffix.to_string(),
            })?;

        let magnitude = multiplier
            .apply(mantissa, fraction_digits)
            .ok_or_else(out_of_range)?;
        let nanos = if negative { -magnitude } else { magnitude };

        Ok(Self { nanos, format })
    }
}

/// What a suffix multiplies the written number by.
#[derive(Clone, Copy, Debug)]
enum Multiplier {
    /// `2^shift` units.
    Binary(u32),
    /// `10^exponent` nano-units.
    Decimal(i32),
}

impl Multiplier {
    fn parse(suffix: &str) -> Option<(Self, Format)> {
        if let Some((_, exponent)) = DECIMAL_SUFFIXES.iter().find(|(s, _)| *s == suffix) {
            let exponent = i32::try_from(*exponent).ok()?;
            return Some((Self::Decimal(exponent), Format::Decimal));
        }
        if let Some((_, shift)) = BINARY_SUFFIXES.iter().find(|(s, _)| *s == suffix) {
            return Some((Self::Binary(*shift), Format::Binary));
        }
        let exponent = suffix.strip_prefix(['e', 'E'])?.parse::<i32>().ok()?;
        Some((Self::Decimal(exponent.checked_add(9)?), Format::Decimal))
    }

    /// Nano-units for `mantissa * 10^-fraction_digits` of this multiplier,
    /// rounding anything finer than one nano-unit up.
    fn apply(self, mantissa: i128, fraction_digits: u32) -> Option<i128> {
        match self {
            Self::Binary(shift) => {
                let scaled = mantissa
                    .checked_mul(1_i128 << shift)?
                    .checked_mul(NANOS_PER_UNIT)?;
                Some(ceil_div(scaled, 10_i128.checked_pow(fraction_digits)?))
            }
            Self::Decimal(exponent) => {
                let fraction_digits = i32::try_from(fraction_digits).ok()?;
                let shift = exponent.checked_sub(fraction_digits)?;
                if shift >= 0 {
                    mantissa.checked_mul(10_i128.checked_pow(shift.unsigned_abs())?)
                } else {
                    match 10_i128.checked_pow(shift.unsigned_abs()) {
                        Some(divisor) => Some(ceil_div(mantissa, divisor)),
                        None => Some(i128::from(mantissa != 0)),
                    }
                }
            }
        }
    }
}

fn ceil_div(value: i128, divisor: i128) -> i128 {
    value / divisor + i128::from(value % divisor != 0)
}

impl FromStr for Quantity {
    type Err = QuantityParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        if text.is_empty() {
            return Err(QuantityParseError::Empty);
        }
        Self::from_parts(text)
    }
}

impl TryFrom<&resource::Quantity> for Quantity {
    type Error = QuantityParseError;

    fn try_from(quantity: &resource::Quantity) -> Result<Self, Self::Error> {
        quantity.0.parse()
    }
}

impl From<i64> for Quantity {
    fn from(units: i64) -> Self {
        Self::from_units(units)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nanos == 0 {
            return f.write_str("0");
        }

        if self.format == Format::Binary && self.nanos % NANOS_PER_UNIT == 0 {
            let units = self.nanos / NANOS_PER_UNIT;
            let suffix = BINARY_SUFFIXES
                .iter()
                .rev()
                .find(|(_, shift)| units % (1_i128 << shift) == 0);
            return match suffix {
                Some((suffix, shift)) => write!(f, "{}{suffix}", units / (1_i128 << shift)),
                None => write!(f, "{units}"),
            };
        }

        let (suffix, unit) = DECIMAL_SUFFIXES
            .iter()
            .rev()
            .map(|(suffix, exponent)| (suffix, 10_i128.pow(*exponent)))
            .find(|(_, unit)| self.nanos % unit == 0)
            .unwrap_or((&"n", 1));
        write!(f, "{}{suffix}", self.nanos / unit)
    }
}

impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        self.nanos == other.nanos
    }
}

impl Eq for Quantity {}

impl PartialOrd for Quantity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Quantity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.nanos.cmp(&other.nanos)
    }
}

impl Hash for Quantity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.nanos.hash(state);
    }
}

impl Add for Quantity {
    type Output = Self;

    /// A zero left-hand side takes the notation of the right-hand side.
    fn add(self, rhs: Self) -> Self {
        let format = if self.nanos == 0 {
            rhs.format
        } else {
            self.format
        };
        Self {
            nanos: self.nanos.saturating_add(rhs.nanos),
            format,
        }
    }
}

impl Sub for Quantity {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self + -rhs
    }
}

impl Neg for Quantity {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            nanos: self.nanos.saturating_neg(),
            format: self.format,
        }
    }
}

impl AddAssign for Quantity {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Quantity {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Sum for Quantity {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Quantity> for Quantity {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}
