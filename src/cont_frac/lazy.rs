//! The memoizing node shared by all lazily evaluated continued fractions

use super::general::PiSpigot;
use super::infinite::{Bihomographic, Homographic};
use super::simple::{FixedQuotients, RationalQuotients};
use crate::funcs::exp::{Exp, Log};
use crate::funcs::sqrt::Sqrt;
use crate::funcs::trig::{Atan, Tan};
use crate::symbols::{ExpUnit, TanUnit};
use crate::traits::PartialQuotients;
use num_bigint::BigInt;
use num_rational::Ratio;
use std::cell::RefCell;
use std::rc::Rc;

/// Cache of the partial quotients produced by an iterator. `None` from the
/// iterator marks the end of the expansion, after which the iterator is dropped.
pub(crate) struct Memoized<I: Iterator<Item = BigInt>> {
    cache: RefCell<Vec<Option<BigInt>>>,
    source: RefCell<Option<I>>,
}

impl<I: Iterator<Item = BigInt>> Memoized<I> {
    pub fn new(source: I) -> Self {
        Memoized {
            cache: RefCell::new(Vec::new()),
            source: RefCell::new(Some(source)),
        }
    }

    pub fn nth(&self, n: usize) -> Option<BigInt> {
        loop {
            {
                let cache = self.cache.borrow();
                if n < cache.len() {
                    return cache[n].clone();
                }
                if let Some(None) = cache.last() {
                    panic!(
                        "partial quotient {} requested after the end of the expansion at {}",
                        n,
                        cache.len() - 1
                    );
                }
            }

            // the source may query other nodes, so no cache borrow is held here
            let next = match self.source.borrow_mut().as_mut() {
                Some(source) => source.next(),
                None => None,
            };
            let ended = next.is_none();
            self.cache.borrow_mut().push(next);
            if ended {
                self.source.replace(None);
            }
        }
    }
}

/// All kinds of partial quotient producers
pub(crate) enum Producer {
    Rational(RationalQuotients),
    Fixed(FixedQuotients),
    ExpUnit(ExpUnit),
    TanUnit(TanUnit),
    Homographic(Homographic),
    Bihomographic(Bihomographic),
    Sqrt(Sqrt),
    Exp(Exp),
    Log(Log),
    Tan(Tan),
    Atan(Atan),
    Pi(PiSpigot),
}

impl Iterator for Producer {
    type Item = BigInt;

    fn next(&mut self) -> Option<BigInt> {
        match self {
            Producer::Rational(it) => it.next(),
            Producer::Fixed(it) => it.next(),
            Producer::ExpUnit(it) => it.next(),
            Producer::TanUnit(it) => it.next(),
            Producer::Homographic(it) => it.next(),
            Producer::Bihomographic(it) => it.next(),
            Producer::Sqrt(it) => it.next(),
            Producer::Exp(it) => it.next(),
            Producer::Log(it) => it.next(),
            Producer::Tan(it) => it.next(),
            Producer::Atan(it) => it.next(),
            Producer::Pi(it) => it.next(),
        }
    }
}

/// A real number represented by a lazily evaluated regular continued fraction
/// `a0 + 1/(a1 + 1/(a2 + ...))`.
///
/// The partial quotients are computed on demand and memoized, cloning the value
/// only clones the handle. An expansion without any partial quotient represents
/// "no value" (NaN).
#[derive(Clone)]
pub struct ContinuedFraction(Rc<Memoized<Producer>>);

impl ContinuedFraction {
    pub(crate) fn new(producer: Producer) -> Self {
        ContinuedFraction(Rc::new(Memoized::new(producer)))
    }

    /// The value without a continued fraction, representing undefined results
    #[inline]
    pub fn nan() -> Self {
        Self::from_quotients(Vec::new(), Vec::new())
    }

    /// Create the continued fraction of `p/q`, which is NaN when `q` is zero
    pub fn ratio<P: Into<BigInt>, Q: Into<BigInt>>(p: P, q: Q) -> Self {
        Self::new(Producer::Rational(RationalQuotients::new(p.into(), q.into())))
    }

    /// Create a continued fraction from the aperiodic partial quotients followed
    /// by repetitions of the periodic ones. The quotients are taken as is, they are
    /// not required to be in canonical form.
    pub fn from_quotients(prefix: Vec<BigInt>, period: Vec<BigInt>) -> Self {
        Self::new(Producer::Fixed(FixedQuotients::new(prefix, period)))
    }

    /// Check whether the two handles refer to the same node
    #[inline]
    pub(crate) fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialQuotients for ContinuedFraction {
    #[inline]
    fn nth(&self, n: usize) -> Option<BigInt> {
        self.0.nth(n)
    }
}

impl From<BigInt> for ContinuedFraction {
    fn from(n: BigInt) -> Self {
        Self::from_quotients(vec![n], Vec::new())
    }
}

impl From<Ratio<BigInt>> for ContinuedFraction {
    fn from(r: Ratio<BigInt>) -> Self {
        Self::ratio(r.numer().clone(), r.denom().clone())
    }
}

impl From<&ContinuedFraction> for ContinuedFraction {
    #[inline]
    fn from(x: &ContinuedFraction) -> Self {
        x.clone()
    }
}

macro_rules! impl_from_prim {
    ($($t:ty)*) => ($(
        impl From<$t> for ContinuedFraction {
            #[inline]
            fn from(n: $t) -> Self {
                Self::from(BigInt::from(n))
            }
        }
    )*);
}
impl_from_prim!(i8 i16 i32 i64 i128 isize u8 u16 u32 u64 u128 usize);

#[cfg(test)]
mod tests {
    use super::*;

    struct Counting<'a>(&'a std::cell::Cell<usize>, i64);

    impl<'a> Iterator for Counting<'a> {
        type Item = BigInt;
        fn next(&mut self) -> Option<BigInt> {
            self.0.set(self.0.get() + 1);
            if self.1 > 3 {
                None
            } else {
                self.1 += 1;
                Some(BigInt::from(self.1))
            }
        }
    }

    #[test]
    fn memoize_test() {
        let calls = std::cell::Cell::new(0);
        let memo = Memoized::new(Counting(&calls, 0));
        assert_eq!(memo.nth(2), Some(BigInt::from(3)));
        assert_eq!(calls.get(), 3);
        assert_eq!(memo.nth(0), Some(BigInt::from(1)));
        assert_eq!(memo.nth(2), Some(BigInt::from(3)));
        assert_eq!(calls.get(), 3);
        assert_eq!(memo.nth(4), None);
        assert_eq!(memo.nth(4), None);
        assert_eq!(calls.get(), 5);
        assert!(memo.source.borrow().is_none());
    }

    #[test]
    #[should_panic]
    fn after_end_test() {
        let x = ContinuedFraction::from(5);
        assert_eq!(x.nth(1), None);
        x.nth(2);
    }

    #[test]
    fn constructor_test() {
        let x = ContinuedFraction::ratio(-7, 3);
        assert_eq!(x.nth(0), Some(BigInt::from(-3)));
        assert_eq!(x.nth(1), Some(BigInt::from(1)));
        assert_eq!(x.nth(2), Some(BigInt::from(2)));
        assert_eq!(x.nth(3), None);

        assert!(ContinuedFraction::nan().is_nan());
        assert!(ContinuedFraction::ratio(1, 0).is_nan());
        assert!(ContinuedFraction::from(12u8).is_integer());

        let r = ContinuedFraction::from(Ratio::new(BigInt::from(6), BigInt::from(4)));
        assert_eq!(r.nth(1), Some(BigInt::from(2)));
        assert!(ContinuedFraction::from(&r).ptr_eq(&r));
    }
}
