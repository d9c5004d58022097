//! Elementary functions of [ContinuedFraction] values.
//!
//! The square root is computed by Newton's iteration, while the exponential,
//! logarithm, tangent and arctangent decompose their argument into an
//! alternating series of unit fractions (the Ostrogradsky series of second kind).
//! In both cases the result lies between two approximations, and a partial
//! quotient is produced once both approximations agree on it.
//!
//! # References:
//! - Wacław Sierpiński, Sur quelques algorithmes pour développer les nombres réels
//!   en séries, Oeuvres choisies, tome I, PWN, Warszawa, 1974, 236-254
//! - <https://www.inwap.com/pdp10/hbaker/hakmem/cf.html>

pub(crate) mod exp;
mod hyperbolic;
pub(crate) mod misc;
pub(crate) mod sqrt;
pub(crate) mod trig;

use crate::cont_frac::ContinuedFraction;
use crate::settings;
use crate::traits::PartialQuotients;
use core::mem::swap;
use num_bigint::BigInt;
use num_traits::One;
use tracing::debug;

/// The state of two approximations bracketing a result at one partial quotient
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Agreement {
    /// Both approximations have this partial quotient (`None` if both end here)
    Common(Option<BigInt>),
    /// The result is decided to be rational, and this is its last partial quotient
    Last(BigInt),
    /// The approximations have to be refined
    Differ,
}

/// Compare the `n`-th partial quotients of two approximations of the same number.
///
/// With `detect_rational`, when the two candidates differ by one, the complete
/// quotient of `better` is checked against the larger one. If the distance is
/// below `1 / max_quotient`, the result is assumed to be the rational number
/// ending with the larger candidate.
pub(crate) fn agreement(
    worse: &ContinuedFraction,
    better: &ContinuedFraction,
    n: usize,
    detect_rational: bool,
) -> Agreement {
    let (mut lesser, mut greater) = match (worse.nth(n), better.nth(n)) {
        (w, b) if w == b => return Agreement::Common(b),
        (Some(w), Some(b)) => (w, b),
        _ => return Agreement::Differ,
    };
    if !detect_rational {
        return Agreement::Differ;
    }
    if lesser > greater {
        swap(&mut lesser, &mut greater);
    }
    if lesser + 1u32 != greater {
        return Agreement::Differ;
    }

    let limit = match settings::max_quotient() {
        Some(limit) => limit,
        None => return Agreement::Differ,
    };
    let next = if better.nth(n).as_ref() == Some(&greater) {
        // overestimation, the expansion continues with a large quotient
        better.nth(n + 1)
    } else if better.nth(n + 1).map_or(false, |q| q.is_one()) {
        // underestimation, the expansion continues with 1 and a large quotient
        better.nth(n + 2).map(|q| q + 1u32)
    } else {
        None
    };
    match next {
        Some(q) if q >= limit => {
            debug!("result is assumed to be rational, ending with {} at {}", greater, n);
            Agreement::Last(greater)
        }
        _ => Agreement::Differ,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::e;

    #[test]
    fn agreement_test() {
        let a = ContinuedFraction::ratio(3, 2);
        let b = ContinuedFraction::ratio(4, 3);
        assert_eq!(agreement(&a, &b, 0, true), Agreement::Common(Some(1.into())));
        assert_eq!(agreement(&a, &b, 1, false), Agreement::Differ);
        assert_eq!(agreement(&a, &a, 2, true), Agreement::Common(None));
        assert_eq!(agreement(&ContinuedFraction::nan(), &e(), 0, true), Agreement::Differ);

        // [1; 1, 1, 10^40] and [1; 2, 10^40] bracket 3/2
        let big = BigInt::from(10u8).pow(40u32);
        let above = ContinuedFraction::from_quotients(
            vec![1.into(), 1.into(), 1.into(), big.clone()],
            Vec::new(),
        );
        let below = ContinuedFraction::from_quotients(vec![1.into(), 2.into(), big], Vec::new());
        assert_eq!(agreement(&below, &above, 1, true), Agreement::Last(2.into()));
        assert_eq!(agreement(&above, &below, 1, true), Agreement::Last(2.into()));

        // not close enough
        let loose = ContinuedFraction::from_quotients(vec![1.into(), 2.into(), 1000.into()], Vec::new());
        assert_eq!(agreement(&above, &loose, 1, true), Agreement::Differ);
    }
}
