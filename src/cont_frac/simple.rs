//! Leaf sources of partial quotients and the convergents of a continued fraction

use super::block::Block;
use super::lazy::ContinuedFraction;
use crate::traits::{Approximation, PartialQuotients, RationalApproximation};
use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::Ratio;
use num_traits::Zero;

/// Partial quotients of `p/q` by the Euclidean algorithm
#[derive(Debug, Clone)]
pub(crate) struct RationalQuotients {
    p: BigInt,
    q: BigInt,
}

impl RationalQuotients {
    pub fn new(p: BigInt, q: BigInt) -> Self {
        RationalQuotients { p, q }
    }
}

impl Iterator for RationalQuotients {
    type Item = BigInt;

    fn next(&mut self) -> Option<BigInt> {
        if self.q.is_zero() {
            return None;
        }
        let (i, r) = self.p.div_mod_floor(&self.q);
        self.p = std::mem::replace(&mut self.q, r);
        Some(i)
    }
}

/// Partial quotients given by an aperiodic part and a (possibly empty) periodic part
#[derive(Debug, Clone)]
pub(crate) struct FixedQuotients {
    a_coeffs: Vec<BigInt>,
    p_coeffs: Vec<BigInt>,
    pos: usize,
}

impl FixedQuotients {
    pub fn new(a_coeffs: Vec<BigInt>, p_coeffs: Vec<BigInt>) -> Self {
        FixedQuotients { a_coeffs, p_coeffs, pos: 0 }
    }
}

impl Iterator for FixedQuotients {
    type Item = BigInt;

    fn next(&mut self) -> Option<BigInt> {
        let i = self.pos;
        self.pos += 1;
        if i < self.a_coeffs.len() {
            // in aperiodic part
            Some(self.a_coeffs[i].clone())
        } else if !self.p_coeffs.is_empty() {
            // in periodic part
            let j = (i - self.a_coeffs.len()) % self.p_coeffs.len();
            Some(self.p_coeffs[j].clone())
        } else {
            None
        }
    }
}

/// Iterator of convergents of a [ContinuedFraction]
pub struct Convergents {
    value: ContinuedFraction,
    block: Block,
    pos: usize,
}

impl Iterator for Convergents {
    type Item = Ratio<BigInt>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let a = self.value.nth(self.pos)?;
            self.pos += 1;
            self.block.rmove(&a);

            // quotients given by the user may be zero, skip the convergents at infinity
            let (p, q) = self.block.convergent();
            if !q.is_zero() {
                break Some(Ratio::new(p.clone(), q.clone()));
            }
        }
    }
}

impl ContinuedFraction {
    /// Returns an iterator of the convergents. The iterator stops at the end of the expansion.
    pub fn convergents(&self) -> Convergents {
        Convergents {
            value: self.clone(),
            block: Block::identity(),
            pos: 0,
        }
    }
}

impl RationalApproximation<BigInt> for ContinuedFraction {
    fn approx_rational(&self, limit: &BigInt) -> Option<Approximation<Ratio<BigInt>>> {
        let mut convergents = self.convergents();
        let mut last_conv = convergents.next()?;
        if last_conv.denom() > limit {
            return Some(Approximation::Approximated(last_conv));
        }
        loop {
            last_conv = match convergents.next() {
                Some(v) => {
                    if v.denom() <= limit {
                        v
                    } else {
                        return Some(Approximation::Approximated(last_conv));
                    }
                }
                None => return Some(Approximation::Exact(last_conv)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(v: &[i64]) -> Vec<BigInt> {
        v.iter().map(|&i| BigInt::from(i)).collect()
    }

    #[test]
    fn rational_test() {
        let q = RationalQuotients::new(BigInt::from(415), BigInt::from(93));
        assert_eq!(q.collect::<Vec<_>>(), ints(&[4, 2, 6, 7]));
        let q = RationalQuotients::new(BigInt::from(-1), BigInt::from(-2));
        assert_eq!(q.collect::<Vec<_>>(), ints(&[0, 2]));
        let q = RationalQuotients::new(BigInt::from(1), BigInt::from(0));
        assert_eq!(q.count(), 0);
    }

    #[test]
    fn fixed_test() {
        let q = FixedQuotients::new(ints(&[1]), ints(&[1, 2]));
        assert_eq!(q.take(6).collect::<Vec<_>>(), ints(&[1, 1, 2, 1, 2, 1]));
        let q = FixedQuotients::new(ints(&[3, 7, 15]), Vec::new());
        assert_eq!(q.collect::<Vec<_>>(), ints(&[3, 7, 15]));
    }

    #[test]
    fn convergents_test() {
        let sq2 = ContinuedFraction::from_quotients(ints(&[1]), ints(&[2]));
        let convs: Vec<_> = sq2.convergents().take(4).collect();
        assert_eq!(
            convs,
            vec![
                Ratio::new(BigInt::from(1), BigInt::from(1)),
                Ratio::new(BigInt::from(3), BigInt::from(2)),
                Ratio::new(BigInt::from(7), BigInt::from(5)),
                Ratio::new(BigInt::from(17), BigInt::from(12)),
            ]
        );

        let r = ContinuedFraction::ratio(415, 93);
        assert_eq!(r.convergents().last(), Some(Ratio::new(BigInt::from(415), BigInt::from(93))));
        assert_eq!(ContinuedFraction::nan().convergents().count(), 0);
    }

    #[test]
    fn approx_rational_test() {
        let pi = ContinuedFraction::from_quotients(ints(&[3, 7, 15, 1, 292]), Vec::new());
        assert_eq!(
            pi.approx_rational(&BigInt::from(100)),
            Some(Approximation::Approximated(Ratio::new(BigInt::from(22), BigInt::from(7))))
        );
        assert_eq!(
            pi.approx_rational(&BigInt::from(200)),
            Some(Approximation::Approximated(Ratio::new(BigInt::from(355), BigInt::from(113))))
        );

        let r = ContinuedFraction::ratio(415, 93);
        assert_eq!(
            r.approx_rational(&BigInt::from(93)),
            Some(Approximation::Exact(Ratio::new(BigInt::from(415), BigInt::from(93))))
        );
        assert_eq!(ContinuedFraction::nan().approx_rational(&BigInt::from(10)), None);
    }
}
