//! This module contains several predefined irrational math constants,
//! and the closed forms of `e^(1/n)` and `tan(1/n)` used by the transcendental functions

use crate::cont_frac::{ContinuedFraction, PiSpigot, Producer};
use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};
use std::cell::RefCell;

/// Partial quotients of `e^(1/n)`:
/// `[1; n-1, 1, 1, 3n-1, 1, 1, 5n-1, ...]`, and `[2; 1, 2, 1, 1, 4, 1, 1, 6, ...]` for `n = 1`
#[derive(Debug, Clone)]
pub(crate) struct ExpUnit {
    n: BigInt,
    i: usize,
}

impl Iterator for ExpUnit {
    type Item = BigInt;

    fn next(&mut self) -> Option<BigInt> {
        let i = self.i;
        self.i += 1;
        let k = BigInt::from(i / 3);
        let result = if self.n.is_one() {
            match (i, i % 3) {
                (0, _) => BigInt::from(2),
                (_, 2) => 2 * k + 2,
                _ => BigInt::one(),
            }
        } else if i % 3 == 1 {
            (2 * k + 1) * &self.n - 1
        } else {
            BigInt::one()
        };
        Some(result)
    }
}

/// Partial quotients of `tan(1/n)`:
/// `[0; n-1, 1, 3n-2, 1, 5n-2, ...]`, and `[1; 1, 1, 3, 1, 5, ...]` for `n = 1`
#[derive(Debug, Clone)]
pub(crate) struct TanUnit {
    n: BigInt,
    i: usize,
}

impl Iterator for TanUnit {
    type Item = BigInt;

    fn next(&mut self) -> Option<BigInt> {
        let i = self.i;
        self.i += 1;
        let result = if self.n.is_one() {
            if i % 2 == 1 { BigInt::from(i) } else { BigInt::one() }
        } else {
            match i {
                0 => BigInt::zero(),
                1 => &self.n - 1,
                _ if i % 2 == 1 => BigInt::from(i) * &self.n - 2,
                _ => BigInt::one(),
            }
        };
        Some(result)
    }
}

/// `e^(1/n)` for a nonzero integer `n`, NaN for `n = 0`
pub(crate) fn exp_unit(n: &BigInt) -> ContinuedFraction {
    if n.is_zero() {
        ContinuedFraction::nan()
    } else if n.is_negative() {
        exp_unit(&-n).homo(0, 1, 1, 0)
    } else if n.is_one() {
        e()
    } else {
        ContinuedFraction::new(Producer::ExpUnit(ExpUnit { n: n.clone(), i: 0 }))
    }
}

/// `tan(1/n)` for a nonzero integer `n`, NaN for `n = 0`
pub(crate) fn tan_unit(n: &BigInt) -> ContinuedFraction {
    if n.is_zero() {
        ContinuedFraction::nan()
    } else if n.is_negative() {
        tan_unit(&-n).homo(-1, 0, 0, 1)
    } else {
        ContinuedFraction::new(Producer::TanUnit(TanUnit { n: n.clone(), i: 0 }))
    }
}

thread_local! {
    static E: ContinuedFraction =
        ContinuedFraction::new(Producer::ExpUnit(ExpUnit { n: BigInt::one(), i: 0 }));
    static PI: ContinuedFraction = ContinuedFraction::new(Producer::Pi(PiSpigot::new()));
    static HALF_PI: ContinuedFraction = pi().homo(1, 0, 0, 2);
    static QUARTER_PI: ContinuedFraction = pi().homo(1, 0, 0, 4);

    // e^(2^k) for k = 0, 1, 2, ...
    static EXP_POWERS: RefCell<Vec<ContinuedFraction>> = RefCell::new(Vec::new());
}

/// The base of the natural logarithm
pub fn e() -> ContinuedFraction {
    E.with(Clone::clone)
}

/// The ratio of a circle's circumference to its diameter
pub fn pi() -> ContinuedFraction {
    PI.with(Clone::clone)
}

pub fn half_pi() -> ContinuedFraction {
    HALF_PI.with(Clone::clone)
}

pub fn quarter_pi() -> ContinuedFraction {
    QUARTER_PI.with(Clone::clone)
}

/// `e^(2^k)`, the values are cached per thread
pub(crate) fn exp_power_of_two(k: usize) -> ContinuedFraction {
    EXP_POWERS.with(|cache| {
        let mut cache = cache.borrow_mut();
        if cache.is_empty() {
            cache.push(e());
        }
        while cache.len() <= k {
            let last = &cache[cache.len() - 1];
            let square = last * last;
            cache.push(square);
        }
        cache[k].clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cont_frac::quotients;
    use crate::traits::PartialQuotients;

    #[test]
    fn cfrac_test() {
        assert_eq!(quotients(&e(), 10), vec![2, 1, 2, 1, 1, 4, 1, 1, 6, 1]);
        assert_eq!(quotients(&exp_unit(&BigInt::from(2)), 8), vec![1, 1, 1, 1, 5, 1, 1, 9]);
        assert_eq!(quotients(&exp_unit(&BigInt::from(-1)), 5), vec![0, 2, 1, 2, 1]);
        assert!(exp_unit(&BigInt::zero()).is_nan());

        assert_eq!(quotients(&tan_unit(&BigInt::one()), 8), vec![1, 1, 1, 3, 1, 5, 1, 7]);
        assert_eq!(quotients(&tan_unit(&BigInt::from(2)), 7), vec![0, 1, 1, 4, 1, 8, 1]);
        assert_eq!(quotients(&tan_unit(&BigInt::from(-2)), 4), vec![-1, 2, 4, 1]);
    }

    #[test]
    fn constants_test() {
        assert_eq!(quotients(&pi(), 13), vec![3, 7, 15, 1, 292, 1, 1, 1, 2, 1, 3, 1, 14]);
        assert!(pi().ptr_eq(&pi()));
        assert_eq!(quotients(&half_pi(), 6), vec![1, 1, 1, 3, 31, 1]);
        assert_eq!(quotients(&quarter_pi(), 6), vec![0, 1, 3, 1, 1, 1]);

        // e^2 = [7; 2, 1, 1, 3, 18, 5, 1, 1, 6, 30, ...]
        assert_eq!(quotients(&exp_power_of_two(1), 10), vec![7, 2, 1, 1, 3, 18, 5, 1, 1, 6]);
    }
}
