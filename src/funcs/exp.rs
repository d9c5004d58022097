use super::{agreement, Agreement};
use crate::cont_frac::{ContinuedFraction, Producer};
use crate::error::{DomainError, Result};
use crate::symbols::{e, exp_power_of_two, exp_unit};
use crate::traits::PartialQuotients;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use tracing::trace;

/// `e^n` for an integer `n`, by binary exponentiation over the cached `e^(2^k)`
fn iexp(n: &BigInt) -> ContinuedFraction {
    let negative = n.is_negative();
    let mut m = n.magnitude().clone();
    let mut result: Option<ContinuedFraction> = None;
    let mut k = 0;
    while !m.is_zero() {
        if m.is_odd() {
            let power = exp_power_of_two(k);
            if negative && m.is_one() {
                // invert in the last multiplication
                return match result {
                    None => 1 / &power,
                    Some(r) => r.bihomo(&power, 0, 0, 0, 1, 1, 0, 0, 0),
                };
            }
            result = Some(match result {
                None => power,
                Some(r) => r * power,
            });
        }
        m >>= 1usize;
        k += 1;
    }
    result.unwrap_or_else(ContinuedFraction::one)
}

/// Exponential of the fractional part `r`, which is decomposed into the
/// alternating series `1/q1 - 1/q2 + 1/q3 - ...`. Every term multiplies or
/// divides the approximation by `e^(1/q)`, and the result lies between the
/// last two approximations.
pub(crate) struct Exp {
    better: ContinuedFraction,
    worse: ContinuedFraction,
    residual: ContinuedFraction,
    multiply: bool,
    pos: usize,
    ended: bool,
}

impl Exp {
    pub fn create(x: &ContinuedFraction) -> ContinuedFraction {
        let a0 = match x.nth(0) {
            Some(a) => a,
            None => return ContinuedFraction::nan(),
        };
        if x.nth(1).is_none() {
            return iexp(&a0);
        }
        ContinuedFraction::new(Producer::Exp(Exp {
            better: iexp(&a0),
            worse: ContinuedFraction::nan(),
            residual: x - a0,
            multiply: true,
            pos: 0,
            ended: false,
        }))
    }

    fn refine(&mut self) {
        let q = match self.residual.nth(1) {
            Some(q) => q,
            None => {
                // the series is finite
                self.worse = self.better.clone();
                return;
            }
        };
        trace!("exponential refined with e^(1/{})", q);

        let unit = exp_unit(&q);
        let next = if self.multiply {
            self.better.bihomo(&unit, 1, 0, 0, 0, 0, 0, 0, 1)
        } else {
            self.better.bihomo(&unit, 0, 1, 0, 0, 0, 0, 1, 0)
        };
        self.worse = std::mem::replace(&mut self.better, next);
        self.multiply = !self.multiply;
        self.residual = ContinuedFraction::ratio(1, q) - &self.residual;
    }
}

impl Iterator for Exp {
    type Item = BigInt;

    fn next(&mut self) -> Option<BigInt> {
        if self.ended {
            return None;
        }
        let n = self.pos;
        loop {
            match agreement(&self.worse, &self.better, n, true) {
                Agreement::Common(q) => {
                    self.pos += 1;
                    return q;
                }
                Agreement::Last(q) => {
                    self.ended = true;
                    return Some(q);
                }
                Agreement::Differ => self.refine(),
            }
        }
    }
}

/// `(k, x / e^k)` where `k = floor(log x)` for a positive `x`
fn ilog(x: &ContinuedFraction) -> (BigInt, ContinuedFraction) {
    let mut characteristic = BigInt::zero();
    let mut x = x.clone();
    let mut k = 0;
    if x >= 1 {
        while exp_power_of_two(k) <= x {
            k += 1;
        }
        while k > 0 {
            k -= 1;
            let next = &x / exp_power_of_two(k);
            if next >= 1 {
                characteristic += BigInt::one() << k;
                x = next;
            }
        }
    } else {
        let bound = e() / &x;
        while exp_power_of_two(k) <= bound {
            k += 1;
        }
        while k > 0 {
            k -= 1;
            let next = &x * exp_power_of_two(k);
            if next < e() {
                characteristic -= BigInt::one() << k;
                x = next;
            }
        }
    }
    (characteristic, x)
}

/// Logarithm of the residual `y` in `[1, e)`, which is decomposed into the
/// alternating product `e^(1/m1) / e^(1/m2) * ...`. The exponents are summed.
pub(crate) struct Log {
    better: ContinuedFraction,
    worse: ContinuedFraction,
    residual: ContinuedFraction,
    add: bool,
    pos: usize,
}

impl Log {
    /// Logarithm of a positive number (or NaN)
    pub fn create(x: &ContinuedFraction) -> ContinuedFraction {
        if x.is_nan() {
            return ContinuedFraction::nan();
        }
        let (characteristic, residual) = ilog(x);
        ContinuedFraction::new(Producer::Log(Log {
            better: ContinuedFraction::from(characteristic),
            worse: ContinuedFraction::nan(),
            residual,
            add: true,
            pos: 0,
        }))
    }

    fn refine(&mut self) {
        let one = BigInt::one();
        let (m, next) = match self.residual.nth(0) {
            Some(y0) if y0 > one => (one, e() / &self.residual),
            _ => match self.residual.nth(1) {
                None => {
                    // the residual is exactly 1
                    self.worse = self.better.clone();
                    return;
                }
                Some(y1) => {
                    // the least m with e^(1/m) >= y is either y1 + 1 or y1
                    let m = y1 + 1u32;
                    let next = exp_unit(&m) / &self.residual;
                    if matches!(next.nth(0), Some(q) if q < one) {
                        let m = m - 1u32;
                        let next = exp_unit(&m) / &self.residual;
                        (m, next)
                    } else {
                        (m, next)
                    }
                }
            },
        };
        trace!("logarithm refined with 1/{}", m);

        let sign = if self.add { 1 } else { -1 };
        let updated = self.better.homo(m.clone(), sign, 0, m);
        self.worse = std::mem::replace(&mut self.better, updated);
        self.add = !self.add;
        self.residual = next;
    }
}

impl Iterator for Log {
    type Item = BigInt;

    fn next(&mut self) -> Option<BigInt> {
        let n = self.pos;
        loop {
            match agreement(&self.worse, &self.better, n, false) {
                Agreement::Common(q) => {
                    self.pos += 1;
                    return q;
                }
                _ => self.refine(),
            }
        }
    }
}

impl ContinuedFraction {
    /// The exponential function `e^x`
    pub fn exp(&self) -> ContinuedFraction {
        Exp::create(self)
    }

    /// The natural logarithm
    pub fn log(&self) -> Result<ContinuedFraction> {
        if self.is_nan() {
            return Ok(ContinuedFraction::nan());
        }
        if *self <= 0 {
            return Err(DomainError::NonPositiveLog);
        }
        Ok(Log::create(self))
    }

    /// The logarithm with respect to an arbitrary base
    pub fn log_base(&self, base: &ContinuedFraction) -> Result<ContinuedFraction> {
        Ok(self.log()? / base.log()?)
    }

    /// The base 10 logarithm
    pub fn log10(&self) -> Result<ContinuedFraction> {
        self.log_base(&ContinuedFraction::from(10))
    }

    /// The base 2 logarithm
    pub fn log2(&self) -> Result<ContinuedFraction> {
        self.log_base(&ContinuedFraction::from(2))
    }

    /// `log(1 + x)`
    pub fn log1p(&self) -> Result<ContinuedFraction> {
        (self + 1i64).log()
    }
}
