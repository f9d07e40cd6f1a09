//! Shortest round-trip formatting of doubles.
//!
//! [`d2a`] produces the same text as JavaScript's `Number.prototype.toString`.
//! [`short_d2a`] post-processes that into the shortest numeric literal this
//! crate emits.

use num_bigint::BigUint;

const EXPONENT_BIAS: i32 = 1075;
const FRACTION_BITS: u32 = 52;
const FRACTION_MASK: u64 = (1 << FRACTION_BITS) - 1;

/// Largest double that still fits in an `i64` without saturating.
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// Digits `d0 d1 d2 ...` meaning `d0.d1d2... * 10^exponent`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Decimal {
    digits: String,
    exponent: i32,
}

/// Exact shortest digits for a positive finite double.
fn shortest(value: f64) -> Decimal {
    let bits = value.to_bits();
    let biased = ((bits >> FRACTION_BITS) & 0x7ff) as i32;
    let fraction = bits & FRACTION_MASK;
    let (mantissa, exp) = if biased == 0 {
        (fraction, 1 - EXPONENT_BIAS)
    } else {
        (fraction | (1 << FRACTION_BITS), biased - EXPONENT_BIAS)
    };

    // Scale so the value and one unit in the last place are both integers:
    // `scaled = value * 10^max(0, -exp)`.
    let (scaled, ulp) = if exp >= 0 {
        let shift = exp as usize;
        (BigUint::from(mantissa) << shift, BigUint::from(1u8) << shift)
    } else {
        let power = BigUint::from(5u8).pow(exp.unsigned_abs());
        (BigUint::from(mantissa) * &power, power)
    };

    let bounds = Bounds {
        ulp,
        // Just above a power of two the gap to the next lower double is half
        // as wide.
        narrow_below: fraction == 0 && biased > 1,
        inclusive: mantissa % 2 == 0,
    };

    let original = scaled.to_string();
    let trimmed = digit_trim(&scaled, &bounds);
    let exponent = exp.min(0) - 1 + original.len() as i32;
    Decimal {
        exponent: exponent + trimmed.len() as i32 - original.len() as i32,
        digits: trimmed,
    }
}

/// The rounding interval of a double around its exact scaled value.
struct Bounds {
    ulp: BigUint,
    narrow_below: bool,
    /// Round-half-even parsing maps interval endpoints back to an even
    /// mantissa, so endpoints only count when ours is even.
    inclusive: bool,
}

impl Bounds {
    fn contains(&self, value: &BigUint, candidate: &BigUint) -> bool {
        let (distance, scale) = if candidate >= value {
            (candidate - value, 2u8)
        } else if self.narrow_below {
            (value - candidate, 4u8)
        } else {
            (value - candidate, 2u8)
        };
        let distance = distance * scale;
        distance < self.ulp || (self.inclusive && distance == self.ulp)
    }
}

/// Round `value` at successively lower powers of ten and return the first
/// rounding that still reads back as the same double.
fn digit_trim(value: &BigUint, bounds: &Bounds) -> String {
    let ten = BigUint::from(10u8);
    let digits = (value.bits() as f64 * std::f64::consts::LOG10_2).ceil() as u32;
    let mut unit = ten.pow(digits);
    let one = BigUint::from(1u8);

    while unit > one {
        let half = &unit >> 1;
        let bumped = value + &half;
        let nearest = &bumped - (&bumped % &unit);
        if bounds.contains(value, &nearest) {
            return nearest.to_string();
        }
        if &nearest < value {
            let above = nearest + &unit;
            if bounds.contains(value, &above) {
                return above.to_string();
            }
        }
        unit /= &ten;
    }
    value.to_string()
}

/// Format a double the way JavaScript's `ToString(Number)` does.
pub fn d2a(number: f64) -> String {
    if number.is_nan() {
        return "NaN".to_string();
    }
    if number == 0.0 {
        return "0".to_string();
    }
    if number < 0.0 {
        return format!("-{}", d2a(-number));
    }
    if number.is_infinite() {
        return "Infinity".to_string();
    }
    if number.fract() == 0.0 && number < I64_LIMIT {
        return (number as i64).to_string();
    }

    let Decimal { mut digits, exponent } = shortest(number);
    if exponent >= 21 || exponent <= -7 {
        let (head, tail) = digits.split_at(1);
        let tail = tail.trim_end_matches('0');
        let sign = if exponent > 0 { "+" } else { "" };
        if tail.is_empty() {
            format!("{head}e{sign}{exponent}")
        } else {
            format!("{head}.{tail}e{sign}{exponent}")
        }
    } else if exponent >= 0 {
        let int_len = exponent as usize + 1;
        while digits.len() < int_len {
            digits.push('0');
        }
        let (int_part, frac) = digits.split_at(int_len);
        let frac = frac.trim_end_matches('0');
        if frac.is_empty() {
            int_part.to_string()
        } else {
            format!("{int_part}.{frac}")
        }
    } else {
        let zeros = "0".repeat((-exponent - 1) as usize);
        format!("0.{zeros}{}", digits.trim_end_matches('0'))
    }
}

/// Shortest numeric literal for a non-negative double.
///
/// Large round integers use an exponent (`1e3`), integers in `(1e15, 1e20)`
/// use hexadecimal, `0.` shortens to `.`, and exponents drop their `+`.
pub fn short_d2a(number: f64) -> String {
    short_d2a_with(number, true)
}

/// [`short_d2a`] with hexadecimal rendering of large integers optional.
pub fn short_d2a_with(number: f64, hex_large_integers: bool) -> String {
    let s = d2a(number);
    if number >= 1e3 && number % 10.0 == 0.0 {
        if s.contains('e') {
            return s.replace("e+", "e");
        }
        let zeros = s.len() - s.trim_end_matches('0').len();
        // `12e2` is no shorter than `1200`.
        if zeros > 2 {
            return format!("{}e{}", &s[..s.len() - zeros], zeros);
        }
        return s;
    }
    if number.fract() == 0.0 {
        if hex_large_integers && number > 1e15 && number < 1e20 {
            return format!("0x{:X}", number as u128);
        }
        return s.replace("e+", "e");
    }
    match s.strip_prefix("0.") {
        Some(rest) => format!(".{}", rest.replace("e+", "e")),
        None => s.replace("e+", "e"),
    }
}
