use std::fmt;
use std::iter::Sum;
use std::ops::Add;

/// Computes the base-2 logarithm of a probability.
///
/// The caller must not pass 0; use [`LogProb::from_probability()`] when the probability
/// may be zero.
#[inline(always)]
pub fn log2(p: f64) -> f64 {
    p.log10() / 2f64.log10()
}

// Exact decimal expansion of any finite f64 fits in this many fractional digits.
const MAX_FRACTION_DIGITS: usize = 1074;

/// Rounds `value` to `places` decimal places, resolving ties toward zero.
///
/// The tie is decided on the exact decimal value of `value`, so a double lying just past the
/// midpoint rounds away from zero.
///
/// # Examples
///
/// ```
/// use vitgram::round_half_down;
///
/// assert_eq!(0.12, round_half_down(0.125, 2));
/// assert_eq!(-1.2346, round_half_down(-1.23456, 4));
///
/// // 0.00025 is stored as 0.000250000000000000005...
/// assert_eq!(0.0003, round_half_down(0.00025, 4));
/// ```
pub fn round_half_down(value: f64, places: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let exact = format!("{:.*}", MAX_FRACTION_DIGITS, value.abs());
    let (int_part, frac) = exact.split_once('.').unwrap_or((&exact, ""));
    let (kept, rest) = frac.split_at(places.min(frac.len()));

    let mut rest = rest.bytes();
    let round_up = match rest.next() {
        Some(b'6'..=b'9') => true,
        Some(b'5') => rest.any(|d| d != b'0'),
        _ => false,
    };

    let mut digits: Vec<u8> = int_part.bytes().chain(kept.bytes()).collect();
    if round_up {
        increment_digits(&mut digits);
    }
    let split = digits.len() - kept.len();
    let mut text: String = digits[..split].iter().map(|&d| char::from(d)).collect();
    if split < digits.len() {
        text.push('.');
        text.extend(digits[split..].iter().map(|&d| char::from(d)));
    }
    let rounded = text.parse::<f64>().unwrap_or(value.abs());
    if value.is_sign_negative() {
        -rounded
    } else {
        rounded
    }
}

// Adds one unit in the last place to a string of ASCII digits.
fn increment_digits(digits: &mut Vec<u8>) {
    for d in digits.iter_mut().rev() {
        if *d == b'9' {
            *d = b'0';
        } else {
            *d += 1;
            return;
        }
    }
    digits.insert(0, b'1');
}

/// Log-probability of a sentence, or `Undefined` when a factor of the product is zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogProb {
    Defined(f64),
    Undefined,
}

impl LogProb {
    /// Converts a probability into its base-2 logarithm.
    ///
    /// Non-positive probabilities yield [`LogProb::Undefined`].
    pub fn from_probability(p: f64) -> Self {
        if p > 0.0 {
            Self::Defined(log2(p))
        } else {
            Self::Undefined
        }
    }

    /// Returns the value if defined.
    pub const fn value(self) -> Option<f64> {
        match self {
            Self::Defined(v) => Some(v),
            Self::Undefined => None,
        }
    }

    /// Returns `true` unless the value is [`LogProb::Undefined`].
    pub const fn is_defined(self) -> bool {
        matches!(self, Self::Defined(_))
    }
}

impl Default for LogProb {
    fn default() -> Self {
        Self::Defined(0.0)
    }
}

impl Add for LogProb {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Defined(a), Self::Defined(b)) => Self::Defined(a + b),
            _ => Self::Undefined,
        }
    }
}

impl Sum for LogProb {
    fn sum<I>(iter: I) -> Self
    where
        I: Iterator<Item = Self>,
    {
        iter.fold(Self::default(), Add::add)
    }
}

impl fmt::Display for LogProb {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Defined(v) => {
                let rounded = round_half_down(*v, 4);
                // -0.0 prints as "-0"
                let rounded = if rounded == 0.0 { 0.0 } else { rounded };
                write!(f, "{}", rounded)
            }
            Self::Undefined => write!(f, "undefined"),
        }
    }
}
