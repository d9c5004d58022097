//! Positional digits and the string representations of a [ContinuedFraction]

use super::block::Block;
use super::lazy::ContinuedFraction;
use crate::settings;
use crate::traits::PartialQuotients;
use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive, Zero};
use std::fmt;

/// Iterator of the digits of a number in a given base. The first item is the
/// floor of the number, the following items are the digits of the fractional part.
/// The iterator stops when all the remaining digits are zero, so that a
/// terminating expansion has no trailing zero digit. NaN yields nothing.
pub struct Digits {
    block: Block,
    value: ContinuedFraction,
    pos: usize,
    base: BigInt,
    emitted: bool,
    done: bool,
}

impl Iterator for Digits {
    type Item = BigInt;

    fn next(&mut self) -> Option<BigInt> {
        if self.done {
            return None;
        }

        while !self.block.is_exhausted() {
            match self.block.check_integer() {
                Ok(Some(i)) => {
                    // a zero digit may be all that is left once the input ends
                    if i.is_zero()
                        && self.emitted
                        && self.block.is_zero_at_infinity()
                        && self.value.nth(self.pos).is_none()
                    {
                        self.block.freeze();
                        continue;
                    }
                    self.block.reduce_base(&i, &self.base);
                    self.emitted = true;
                    return Some(i);
                }
                Ok(None) => {
                    self.done = true;
                    return None;
                }
                Err(()) => match self.value.nth(self.pos) {
                    Some(a) => {
                        self.pos += 1;
                        self.block.rmove(&a);
                    }
                    None => self.block.freeze(),
                },
            }
        }

        self.done = true;
        if self.emitted {
            None
        } else {
            // the number is exactly zero
            self.emitted = true;
            Some(BigInt::zero())
        }
    }
}

impl ContinuedFraction {
    /// Digits of the number in the given base, see [Digits]
    pub fn digits(&self, base: u32) -> Digits {
        Digits {
            block: Block::identity(),
            value: self.clone(),
            pos: 0,
            base: BigInt::from(base),
            emitted: false,
            done: false,
        }
    }

    /// Decimal digits of the number, see [Digits]
    #[inline]
    pub fn decimals(&self) -> Digits {
        self.digits(10)
    }

    /// Convert to the nearest float by walking through the convergents until two
    /// consecutive ones are equal as `f64`. NaN is converted to `f64::NAN`.
    pub fn to_f64(&self) -> f64 {
        let mut last: Option<f64> = None;
        for conv in self.convergents() {
            // correctly rounded conversion of the ratio
            let v = match conv.to_f64() {
                Some(v) if !v.is_nan() => v,
                _ => return last.unwrap_or(f64::NAN),
            };
            if last == Some(v) {
                return v;
            }
            last = Some(v);
        }
        last.unwrap_or(f64::NAN)
    }

    /// Round towards zero, returns `None` for NaN
    pub fn to_integer(&self) -> Option<BigInt> {
        let a0 = self.nth(0)?;
        if !a0.is_negative() || self.nth(1).is_none() {
            Some(a0)
        } else {
            Some(a0 + 1)
        }
    }
}

impl fmt::Display for ContinuedFraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = settings::get();
        let mut digits = self.decimals();
        let int = match digits.next() {
            Some(i) => i,
            None => return f.write_str("NaN"),
        };
        if int.is_negative() {
            return write!(f, "-{}", -self);
        }

        let mut frac = String::new();
        let mut zeros = 0; // leading zeros of the fractional part
        let mut only_zeros = int.is_zero();
        let mut push = |d: BigInt, frac: &mut String, zeros: &mut usize| {
            if only_zeros {
                if d.is_zero() {
                    *zeros += 1;
                } else {
                    only_zeros = false;
                }
            }
            frac.push_str(&d.to_string());
        };
        for d in (&mut digits).take(config.decimal_digits) {
            push(d, &mut frac, &mut zeros);
        }

        match config.scientific_threshold {
            Some(threshold) if threshold > 0 && zeros >= threshold => {
                // collect enough significant digits after the leading zeros
                while frac.len() < zeros + 1 + config.decimal_digits {
                    match digits.next() {
                        Some(d) => push(d, &mut frac, &mut zeros),
                        None => break,
                    }
                }
                let mantissa = &frac[zeros..];
                match mantissa.len() {
                    0 => f.write_str("0"),
                    1 => write!(f, "{}e-{}", mantissa, zeros + 1),
                    _ => write!(f, "{}.{}e-{}", &mantissa[..1], &mantissa[1..], zeros + 1),
                }
            }
            _ => {
                if frac.is_empty() {
                    write!(f, "{}", int)
                } else {
                    write!(f, "{}.{}", int, frac)
                }
            }
        }
    }
}

impl fmt::Debug for ContinuedFraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = settings::get().debug_quotients.max(1);
        let a0 = match self.nth(0) {
            Some(a) => a,
            None => return f.write_str("NaN"),
        };

        write!(f, "[{}", a0)?;
        let mut i = 1;
        while i < count {
            match self.nth(i) {
                Some(a) => {
                    if i == 1 {
                        write!(f, "; {}", a)?;
                    } else {
                        write!(f, ", {}", a)?;
                    }
                }
                None => return f.write_str("]"),
            }
            i += 1;
        }
        if self.nth(count).is_none() {
            f.write_str("]")
        } else if count == 1 {
            f.write_str("; ..]")
        } else {
            f.write_str(", ..]")
        }
    }
}

/// Integer conversions round towards zero, and fail for NaN
impl ToPrimitive for ContinuedFraction {
    fn to_i64(&self) -> Option<i64> {
        self.to_integer()?.to_i64()
    }

    fn to_u64(&self) -> Option<u64> {
        self.to_integer()?.to_u64()
    }

    fn to_f64(&self) -> Option<f64> {
        Some(ContinuedFraction::to_f64(self))
    }
}
