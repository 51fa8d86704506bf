//! Exact decimal values behind the built-in operations and operand parsing.
//!
//! An [`ExactDecimal`] is an arbitrary-precision mantissa with a base-10
//! scale, so sums, differences, products and halves never round. Converting
//! back to `Decimal` fails instead of rounding when the value needs more than
//! 28 fractional digits or a mantissa wider than 96 bits.

use num_bigint::BigInt;
use num_traits::Zero;
use rust_decimal::Decimal;

/// Largest scale a `Decimal` can carry.
const MAX_SCALE: u32 = 28;

/// Any nonzero value scaled by more than this power of ten exceeds 96 bits.
const MAX_WHOLE_DIGITS: i64 = 29;

/// Why an exact value has no `Decimal` equivalent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unrepresentable {
    /// The integer part does not fit a 96-bit mantissa.
    Overflow,
    /// The value needs more significant digits than a `Decimal` holds.
    Precision,
}

/// Why operand text could not become a `Decimal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralError {
    /// Not a decimal literal at all.
    NotANumber,
    /// A valid literal whose value a `Decimal` cannot hold exactly.
    Unrepresentable(Unrepresentable),
}

/// Decimal value with an unbounded mantissa.
#[derive(Debug, Clone)]
pub struct ExactDecimal {
    mantissa: BigInt,
    scale: u32,
}

impl From<Decimal> for ExactDecimal {
    fn from(value: Decimal) -> Self {
        Self {
            mantissa: BigInt::from(value.mantissa()),
            scale: value.scale(),
        }
    }
}

impl ExactDecimal {
    #[must_use]
    pub fn sum(&self, other: &Self) -> Self {
        let scale = self.scale.max(other.scale);
        Self {
            mantissa: self.mantissa_at(scale) + other.mantissa_at(scale),
            scale,
        }
    }

    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        let scale = self.scale.max(other.scale);
        Self {
            mantissa: self.mantissa_at(scale) - other.mantissa_at(scale),
            scale,
        }
    }

    #[must_use]
    pub fn product(&self, other: &Self) -> Self {
        Self {
            mantissa: &self.mantissa * &other.mantissa,
            scale: self.scale + other.scale,
        }
    }

    /// Half of the value. An odd mantissa gains one fractional digit.
    #[must_use]
    pub fn half(&self) -> Self {
        if (&self.mantissa % 2u32).is_zero() {
            Self {
                mantissa: &self.mantissa / 2u32,
                scale: self.scale,
            }
        } else {
            Self {
                mantissa: &self.mantissa * 5u32,
                scale: self.scale + 1,
            }
        }
    }

    /// Convert to `Decimal` without rounding.
    ///
    /// The scale is kept where it fits; trailing fractional zeros are dropped
    /// only as far as needed to fit.
    pub fn to_decimal(&self) -> Result<Decimal, Unrepresentable> {
        if self.mantissa.is_zero() {
            return Ok(Decimal::new(0, self.scale.min(MAX_SCALE)));
        }

        let mut mantissa = self.mantissa.clone();
        let mut scale = self.scale;
        loop {
            if scale <= MAX_SCALE {
                if let Some(value) = fit(&mantissa, scale) {
                    return Ok(value);
                }
            }
            if scale == 0 || !(&mantissa % 10u32).is_zero() {
                break;
            }
            mantissa = &mantissa / 10u32;
            scale -= 1;
        }

        if scale > MAX_SCALE {
            return Err(Unrepresentable::Precision);
        }
        let whole = &mantissa / BigInt::from(10u32).pow(scale);
        let limit = Decimal::MAX.mantissa().unsigned_abs();
        match i128::try_from(&whole) {
            Ok(w) if w.unsigned_abs() <= limit => Err(Unrepresentable::Precision),
            _ => Err(Unrepresentable::Overflow),
        }
    }

    fn mantissa_at(&self, scale: u32) -> BigInt {
        &self.mantissa * BigInt::from(10u32).pow(scale - self.scale)
    }
}

fn fit(mantissa: &BigInt, scale: u32) -> Option<Decimal> {
    let m = i128::try_from(mantissa).ok()?;
    Decimal::try_from_i128_with_scale(m, scale).ok()
}

/// Parse a decimal literal (`-12.50`, `.5`, `1.5e3`, `2E-4`) exactly.
pub fn parse_literal(text: &str) -> Result<Decimal, LiteralError> {
    let (number, exponent) = match text.find(['e', 'E']) {
        Some(at) => (
            &text[..at],
            text[at + 1..]
                .parse::<i64>()
                .map_err(|_| LiteralError::NotANumber)?,
        ),
        None => (text, 0),
    };

    let digits = number
        .strip_prefix('-')
        .or_else(|| number.strip_prefix('+'))
        .unwrap_or(number);
    let negative = number.starts_with('-');
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));
    if whole.is_empty() && fraction.is_empty() {
        return Err(LiteralError::NotANumber);
    }
    if !whole.bytes().chain(fraction.bytes()).all(|c| c.is_ascii_digit()) {
        return Err(LiteralError::NotANumber);
    }

    let mut mantissa: BigInt = format!("{whole}{fraction}")
        .parse()
        .map_err(|_| LiteralError::NotANumber)?;
    if negative {
        mantissa = -mantissa;
    }
    if mantissa.is_zero() {
        return Ok(Decimal::ZERO);
    }

    let out_of_range = |exponent: i64| {
        LiteralError::Unrepresentable(if exponent > 0 {
            Unrepresentable::Overflow
        } else {
            Unrepresentable::Precision
        })
    };
    let fraction_len = i64::try_from(fraction.len()).map_err(|_| out_of_range(exponent))?;
    let scale = fraction_len
        .checked_sub(exponent)
        .ok_or_else(|| out_of_range(exponent))?;

    let exact = if scale < 0 {
        if -scale > MAX_WHOLE_DIGITS {
            return Err(LiteralError::Unrepresentable(Unrepresentable::Overflow));
        }
        let shift = u32::try_from(-scale).map_err(|_| out_of_range(exponent))?;
        ExactDecimal {
            mantissa: mantissa * BigInt::from(10u32).pow(shift),
            scale: 0,
        }
    } else {
        ExactDecimal {
            mantissa,
            scale: u32::try_from(scale).map_err(|_| out_of_range(exponent))?,
        }
    };
    exact.to_decimal().map_err(LiteralError::Unrepresentable)
}
