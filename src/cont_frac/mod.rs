//! Data structures and algorithms implementations related to
//! lazily evaluated regular continued fractions
//!
//! Every value is a [ContinuedFraction], a shared handle to a memoized producer of
//! partial quotients. Arithmetic builds new producers on top of the operands using
//! Gosper's algorithm, so only the partial quotients that are requested get computed.
//!
//! # References:
//! - <https://perl.plover.com/yak/cftalk/INFO/gosper.txt>
//! - <https://crypto.stanford.edu/pbc/notes/contfrac/>
//! - <http://www.numbertheory.org/continued_fractions.html>
//! - <https://github.com/blynn/frac>
//!

mod block;
mod cmp;
mod digits;
mod general;
mod infinite;
mod lazy;
mod ops;
mod simple;

pub use digits::Digits;
pub use lazy::ContinuedFraction;
pub use simple::Convergents;

pub(crate) use general::PiSpigot;
pub(crate) use lazy::Producer;

#[cfg(test)]
pub(crate) fn quotients(x: &ContinuedFraction, n: usize) -> Vec<i64> {
    use crate::traits::PartialQuotients;
    use num_traits::ToPrimitive;

    let mut result = Vec::new();
    for i in 0..n {
        match x.nth(i) {
            Some(v) => result.push(v.to_i64().unwrap()),
            None => break,
        }
    }
    result
}
