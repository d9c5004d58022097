use num_bigint::BigInt;
use num_rational::Ratio;

/// The lazy production protocol shared by every continued fraction in this crate.
///
/// `nth(n)` returns the `n`-th partial quotient, or `None` for the end of the
/// expansion (an infinite partial quotient). An expansion that ends at index 0
/// stands for "no value". Once `None` has been returned at index `k`, asking
/// for an index beyond `k` is a programming error.
pub trait PartialQuotients {
    fn nth(&self, n: usize) -> Option<BigInt>;

    /// Test whether the expansion has no value at all
    #[inline]
    fn is_nan(&self) -> bool {
        self.nth(0).is_none()
    }

    /// Test whether the expansion is a single integer
    #[inline]
    fn is_integer(&self) -> bool {
        self.nth(0).is_some() && self.nth(1).is_none()
    }
}

/// The result of a computation that may have been decided by a heuristic
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Approximation<T> {
    Approximated(T),
    Exact(T),
}

impl<T> Approximation<T> {
    /// Get the value regardless of exactness
    #[inline]
    pub fn value(self) -> T {
        match self {
            Approximation::Approximated(v) => v,
            Approximation::Exact(v) => v,
        }
    }

    #[inline]
    pub fn is_exact(&self) -> bool {
        matches!(self, Approximation::Exact(_))
    }
}

pub trait RationalApproximation<T> {
    /// Return the best convergent whose denominator does not exceed `limit`.
    /// The result is `Exact` if the number equals this convergent.
    fn approx_rational(&self, limit: &T) -> Option<Approximation<Ratio<T>>>;
}
