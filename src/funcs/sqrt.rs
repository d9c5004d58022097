use super::{agreement, Agreement};
use crate::cont_frac::{ContinuedFraction, Producer};
use crate::error::{DomainError, Result};
use crate::traits::PartialQuotients;
use core::cmp::max;
use num_bigint::BigInt;
use num_integer::Roots;
use num_traits::{One, Signed, Zero};
use tracing::trace;

/// Square root by Newton's iteration. `plain` and `converse = x / plain`
/// bracket the root, every iteration replaces `plain` by their mean.
pub(crate) struct Sqrt {
    x: ContinuedFraction,
    plain: ContinuedFraction,
    converse: ContinuedFraction,
    pos: usize,
    ended: bool,
}

impl Sqrt {
    /// Square root of a non-negative number (or NaN)
    pub fn create(x: &ContinuedFraction) -> ContinuedFraction {
        let a0 = match x.nth(0) {
            Some(a) => a,
            None => return ContinuedFraction::nan(),
        };
        let a1 = x.nth(1);
        if a0.is_zero() && a1.is_none() {
            return ContinuedFraction::zero();
        }

        let (plain, converse) = match a1 {
            None => {
                let root = max(Roots::sqrt(&a0), BigInt::one());
                (ContinuedFraction::from(root.clone()), ContinuedFraction::ratio(a0, root))
            }
            Some(a1) if a0.is_zero() && a1 > BigInt::one() => {
                // 0 < x <= 1/2, start from the inverse root of 1/x
                let root = Roots::sqrt(&a1);
                (ContinuedFraction::ratio(1, root.clone()), x * root)
            }
            Some(_) => {
                let root = max(Roots::sqrt(&a0), BigInt::one());
                (ContinuedFraction::from(root.clone()), x / root)
            }
        };
        ContinuedFraction::new(Producer::Sqrt(Sqrt {
            x: x.clone(),
            plain,
            converse,
            pos: 0,
            ended: false,
        }))
    }
}

impl Iterator for Sqrt {
    type Item = BigInt;

    fn next(&mut self) -> Option<BigInt> {
        if self.ended {
            return None;
        }
        let n = self.pos;
        loop {
            match agreement(&self.converse, &self.plain, n, true) {
                Agreement::Common(q) => {
                    self.pos += 1;
                    return q;
                }
                Agreement::Last(q) => {
                    self.ended = true;
                    return Some(q);
                }
                Agreement::Differ => {
                    trace!("newton iteration at partial quotient {}", n);
                    self.plain = self.plain.bihomo(&self.converse, 0, 1, 1, 0, 0, 0, 0, 2);
                    self.converse = &self.x / &self.plain;
                }
            }
        }
    }
}

impl ContinuedFraction {
    /// Square root of the number. Zero and NaN are returned as is.
    pub fn sqrt(&self) -> Result<ContinuedFraction> {
        match self.nth(0) {
            Some(a) if a.is_negative() => Err(DomainError::NegativeSqrt),
            _ => Ok(Sqrt::create(self)),
        }
    }
}
