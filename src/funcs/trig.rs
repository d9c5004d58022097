use super::sqrt::Sqrt;
use super::{agreement, Agreement};
use crate::cont_frac::{ContinuedFraction, Producer};
use crate::error::{DomainError, Result};
use crate::symbols::{half_pi, pi, quarter_pi, tan_unit};
use crate::traits::PartialQuotients;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};
use tracing::trace;

/// Tangent of a reduced argument in `[0, 1)`, decomposed into the
/// alternating series `1/q1 - 1/q2 + ...` like the exponential. Every term
/// combines the approximation with `tan(1/q)` by the angle addition formula.
pub(crate) struct Tan {
    better: ContinuedFraction,
    worse: ContinuedFraction,
    residual: ContinuedFraction,
    started: bool,
    add: bool,
    pos: usize,
    ended: bool,
}

impl Tan {
    fn create(x: &ContinuedFraction) -> ContinuedFraction {
        if x.is_nan() {
            return ContinuedFraction::nan();
        }
        ContinuedFraction::new(Producer::Tan(Tan {
            better: ContinuedFraction::zero(),
            worse: ContinuedFraction::nan(),
            residual: x.clone(),
            started: false,
            add: true,
            pos: 0,
            ended: false,
        }))
    }

    fn refine(&mut self) {
        let q = match self.residual.nth(1) {
            Some(q) => q,
            None => {
                self.worse = self.better.clone();
                return;
            }
        };
        trace!("tangent refined with tan(1/{})", q);

        let unit = tan_unit(&q);
        let next = if !self.started {
            self.started = true;
            unit
        } else {
            // (better + s t) / (1 - s better t)
            let s = if self.add { 1 } else { -1 };
            self.better.bihomo(&unit, 0, 1, s, 0, -s, 0, 0, 1)
        };
        self.worse = std::mem::replace(&mut self.better, next);
        self.add = !self.add;
        self.residual = ContinuedFraction::ratio(1, q) - &self.residual;
    }
}

impl Iterator for Tan {
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

/// Arctangent of a reduced argument in `[0, 1]`. The argument is written as
/// `tan(1/m1 - 1/m2 + ...)` and the unit fractions are summed.
pub(crate) struct Atan {
    better: ContinuedFraction,
    worse: ContinuedFraction,
    residual: ContinuedFraction,
    started: bool,
    add: bool,
    pos: usize,
}

impl Atan {
    fn create(x: &ContinuedFraction) -> ContinuedFraction {
        if x.is_nan() {
            return ContinuedFraction::nan();
        }
        ContinuedFraction::new(Producer::Atan(Atan {
            better: ContinuedFraction::zero(),
            worse: ContinuedFraction::nan(),
            residual: x.clone(),
            started: false,
            add: true,
            pos: 0,
        }))
    }

    /// `tan(1/m - atan(y))`
    fn remainder(m: &BigInt, y: &ContinuedFraction) -> ContinuedFraction {
        tan_unit(m).bihomo(y, 0, 1, -1, 0, 1, 0, 0, 1)
    }

    fn refine(&mut self) {
        let one = BigInt::one();
        let (m, next) = match self.residual.nth(0) {
            Some(y0) if y0 >= one => (one.clone(), Self::remainder(&one, &self.residual)),
            _ => match self.residual.nth(1) {
                None => {
                    // the residual is exactly 0
                    self.worse = self.better.clone();
                    return;
                }
                Some(y1) => {
                    // the least m with tan(1/m) >= y is either y1 + 1 or y1
                    let m = y1 + 1u32;
                    let next = Self::remainder(&m, &self.residual);
                    if matches!(next.nth(0), Some(q) if q < BigInt::zero()) {
                        let m = m - 1u32;
                        let next = Self::remainder(&m, &self.residual);
                        (m, next)
                    } else {
                        (m, next)
                    }
                }
            },
        };
        trace!("arctangent refined with 1/{}", m);

        let updated = if !self.started {
            self.started = true;
            ContinuedFraction::ratio(1, m)
        } else {
            let s = if self.add { 1 } else { -1 };
            self.better.homo(m.clone(), s, 0, m)
        };
        self.worse = std::mem::replace(&mut self.better, updated);
        self.add = !self.add;
        self.residual = next;
    }
}

impl Iterator for Atan {
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
    /// The tangent, computed from the octant of the argument
    pub fn tan(&self) -> ContinuedFraction {
        let octant = match (self / quarter_pi()).nth(0) {
            Some(o) => o,
            None => return ContinuedFraction::nan(),
        };
        let lower = || self - &(quarter_pi() * octant.clone());
        let upper = || &(quarter_pi() * (&octant + 1u32)) - self;

        match octant.mod_floor(&BigInt::from(4)).to_u8() {
            Some(0) => Tan::create(&lower()),
            Some(1) => 1 / Tan::create(&upper()),
            Some(2) => -1 / Tan::create(&lower()),
            _ => -Tan::create(&upper()),
        }
    }

    /// The sine, as `2t / (1 + t^2)` with `t = tan(x/2)`
    pub fn sin(&self) -> ContinuedFraction {
        if self.is_nan() {
            return ContinuedFraction::nan();
        }
        let t = (self / 2i64).tan();
        t.bihomo(&t, 0, 2, 0, 0, 1, 0, 0, 1)
    }

    /// The cosine, as `(1 - t^2) / (1 + t^2)` with `t = tan(x/2)`
    pub fn cos(&self) -> ContinuedFraction {
        if self.is_nan() {
            return ContinuedFraction::nan();
        }
        let t = (self / 2i64).tan();
        t.bihomo(&t, -1, 0, 0, 1, 1, 0, 0, 1)
    }

    /// The arctangent in `[-pi/2, pi/2]`
    pub fn atan(&self) -> ContinuedFraction {
        let a0 = match self.nth(0) {
            Some(a) => a,
            None => return ContinuedFraction::nan(),
        };
        let minus_one = -BigInt::one();
        if a0 < minus_one {
            Atan::create(&(-1 / self)) - half_pi()
        } else if a0 == minus_one {
            -Atan::create(&-self)
        } else if a0.is_zero() {
            Atan::create(self)
        } else {
            half_pi() - Atan::create(&(1 / self))
        }
    }

    /// The arcsine in `[-pi/2, pi/2]`, for arguments in `[-1, 1]`
    pub fn asin(&self) -> Result<ContinuedFraction> {
        let a0 = match self.nth(0) {
            Some(a) => a,
            None => return Ok(ContinuedFraction::nan()),
        };
        let a1 = self.nth(1);
        let one = BigInt::one();
        if a0 < -&one || a0 > one || (a0 == one && a1.is_some()) {
            return Err(DomainError::OutOfUnitRange);
        }
        if a1.is_none() && a0 == one {
            return Ok(half_pi());
        }
        if a1.is_none() && a0 == -one {
            return Ok(-half_pi());
        }

        // atan(x / sqrt(1 - x^2))
        let cos = Sqrt::create(&self.bihomo(self, -1, 0, 0, 1, 0, 0, 0, 1));
        Ok((self / cos).atan())
    }

    /// The arccosine in `[0, pi]`, for arguments in `[-1, 1]`
    pub fn acos(&self) -> Result<ContinuedFraction> {
        Ok(half_pi() - self.asin()?)
    }

    /// The angle of the point `(x, y)` in `[-pi, pi]`, where `self` is `y`.
    /// A point on the negative x axis gives `pi`.
    pub fn atan2(&self, x: &ContinuedFraction) -> ContinuedFraction {
        let y = self;
        if y.is_nan() || x.is_nan() {
            return ContinuedFraction::nan();
        }
        if *x > 0 {
            (y / x).atan()
        } else if *x < 0 {
            if *y >= 0 {
                (y / x).atan() + pi()
            } else {
                (y / x).atan() - pi()
            }
        } else if *y > 0 {
            half_pi()
        } else if *y < 0 {
            -half_pi()
        } else {
            ContinuedFraction::zero()
        }
    }

    /// Convert an angle from radians to degrees
    pub fn degrees(&self) -> ContinuedFraction {
        if self.is_nan() {
            return ContinuedFraction::nan();
        }
        self.bihomo(&pi(), 0, 180, 0, 0, 0, 0, 1, 0)
    }

    /// Convert an angle from degrees to radians
    pub fn radians(&self) -> ContinuedFraction {
        if self.is_nan() {
            return ContinuedFraction::nan();
        }
        self.bihomo(&pi(), 1, 0, 0, 0, 0, 0, 0, 180)
    }
}
