use super::lazy::ContinuedFraction;
use crate::settings;
use crate::traits::{Approximation, PartialQuotients};
use core::cmp::Ordering;
use num_bigint::BigInt;
use num_traits::Zero;
use tracing::debug;

impl ContinuedFraction {
    /// Compare two numbers by their partial quotients.
    ///
    /// The result is `Exact` when a difference is found or both expansions end
    /// at the same place. When the first `max_iters / 2` partial quotients are
    /// all equal, the numbers are considered equal and the result is
    /// `Approximated(Equal)`. Returns `None` if any of the numbers is NaN.
    pub fn compare(&self, other: &ContinuedFraction) -> Option<Approximation<Ordering>> {
        if self.is_nan() || other.is_nan() {
            return None;
        }

        let limit = settings::max_iters().map(|n| n / 2);
        let mut i = 0;
        loop {
            if let Some(limit) = limit {
                if i >= limit {
                    debug!("numbers are assumed equal after {} equal partial quotients", limit);
                    return Some(Approximation::Approximated(Ordering::Equal));
                }
            }

            let ord = match (self.nth(i), other.nth(i)) {
                (None, None) => return Some(Approximation::Exact(Ordering::Equal)),
                (None, Some(o)) => o.cmp(&BigInt::zero()),
                (Some(s), None) => BigInt::zero().cmp(&s),
                (Some(s), Some(o)) => s.cmp(&o),
            };
            if ord != Ordering::Equal {
                // a larger partial quotient at an odd position makes the number smaller
                let ord = if i % 2 == 1 { ord.reverse() } else { ord };
                return Some(Approximation::Exact(ord));
            }
            i += 1;
        }
    }
}

impl PartialEq for ContinuedFraction {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for ContinuedFraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(other).map(Approximation::value)
    }
}

macro_rules! impl_cmp_for_int {
    ($($t:ty)*) => ($(
        impl PartialEq<$t> for ContinuedFraction {
            fn eq(&self, other: &$t) -> bool {
                self.partial_cmp(other) == Some(Ordering::Equal)
            }
        }

        impl PartialOrd<$t> for ContinuedFraction {
            fn partial_cmp(&self, other: &$t) -> Option<Ordering> {
                self.partial_cmp(&ContinuedFraction::from(other.clone()))
            }
        }
    )*);
}

impl_cmp_for_int!(i32 i64 u32 u64 BigInt);
