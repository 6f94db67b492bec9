use std::{
    fmt::{self, Display},
    str::FromStr,
};

use num_bigint::{BigInt, Sign};
use num_traits::{Signed, Zero};

/// Exact decimal number: `mantissa * 10^-scale`.
///
/// The digit sequence is the value. `1.50` and `1.5` compare unequal
/// because they were written differently.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Decimal {
    mantissa: BigInt,
    scale: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseDecimalError {
    Empty,
    MissingPoint,
    MultiplePoints,
    MissingDigits,
    InvalidDigit(char),
    ScaleOverflow,
}

impl Display for ParseDecimalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "cannot parse decimal from empty string"),
            Self::MissingPoint => write!(f, "decimal has no decimal point"),
            Self::MultiplePoints => write!(f, "decimal has more than one decimal point"),
            Self::MissingDigits => write!(f, "decimal needs digits on both sides of the point"),
            Self::InvalidDigit(c) => write!(f, "invalid digit '{}' in decimal", c),
            Self::ScaleOverflow => write!(f, "decimal has too many fractional digits"),
        }
    }
}

impl std::error::Error for ParseDecimalError {}

impl Decimal {
    /// Builds `mantissa * 10^-scale`.
    ///
    /// A decimal always has at least one fractional digit, so a scale of 0 is
    /// stored as scale 1 with the mantissa shifted accordingly.
    pub fn new(mantissa: BigInt, scale: u32) -> Self {
        if scale == 0 {
            Self {
                mantissa: mantissa * 10u32,
                scale: 1,
            }
        } else {
            Self { mantissa, scale }
        }
    }

    pub fn mantissa(&self) -> &BigInt {
        &self.mantissa
    }

    /// Number of digits after the decimal point.
    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn is_negative(&self) -> bool {
        self.mantissa.sign() == Sign::Minus
    }

    /// Same value with trailing fractional zeros dropped (keeping one digit).
    pub fn normalized(&self) -> Self {
        let ten = BigInt::from(10u32);
        let mut mantissa = self.mantissa.clone();
        let mut scale = self.scale;

        while scale > 1 && (&mantissa % &ten).is_zero() {
            mantissa /= &ten;
            scale -= 1;
        }

        Self { mantissa, scale }
    }

    /// `f64` holding exactly this value, if there is one.
    pub fn to_f64_exact(&self) -> Option<f64> {
        let float: f64 = self.to_string().parse().ok()?;

        if !float.is_finite() {
            return None;
        }

        // Display writes the shortest round-tripping digits, never in exponent
        // notation, and drops the point for whole numbers
        let text = float.to_string();
        let back: Decimal = if text.contains('.') {
            text.parse().ok()?
        } else {
            Decimal::new(text.parse().ok()?, 0)
        };

        (back.normalized() == self.normalized()).then_some(float)
    }
}

impl FromStr for Decimal {
    type Err = ParseDecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseDecimalError::Empty);
        }

        let unsigned = s.strip_prefix('-').unwrap_or(s);

        let (whole, fraction) = unsigned
            .split_once('.')
            .ok_or(ParseDecimalError::MissingPoint)?;

        if fraction.contains('.') {
            return Err(ParseDecimalError::MultiplePoints);
        }

        if whole.is_empty() || fraction.is_empty() {
            return Err(ParseDecimalError::MissingDigits);
        }

        if let Some(c) = whole.chars().chain(fraction.chars()).find(|c| !c.is_ascii_digit()) {
            return Err(ParseDecimalError::InvalidDigit(c));
        }

        let digits = format!("{}{}", whole, fraction);
        let magnitude = BigInt::parse_bytes(digits.as_bytes(), 10)
            .ok_or(ParseDecimalError::MissingDigits)?;

        let mantissa = if s.starts_with('-') {
            -magnitude
        } else {
            magnitude
        };

        let scale = u32::try_from(fraction.len()).map_err(|_| ParseDecimalError::ScaleOverflow)?;

        Ok(Self::new(mantissa, scale))
    }
}

impl Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.mantissa.abs().to_str_radix(10);
        let scale = self.scale as usize;

        if self.is_negative() {
            f.write_str("-")?;
        }

        if digits.len() > scale {
            let (whole, fraction) = digits.split_at(digits.len() - scale);
            write!(f, "{}.{}", whole, fraction)
        } else {
            write!(f, "0.{:0>width$}", digits, width = scale)
        }
    }
}
