//! Conversions from host floating point numbers, and the functions extended
//! to the infinite values.
//!
//! A [ContinuedFraction] has no infinity: a float NaN or infinity converts to
//! the value without any partial quotient. [Extended] keeps the infinities
//! apart, so that the limits of the elementary functions can be applied.

use crate::cont_frac::ContinuedFraction;
use crate::error::{DomainError, Result};
use crate::symbols::half_pi;
use crate::traits::PartialQuotients;
use num_bigint::BigInt;
use num_rational::Ratio;
use num_traits::{FromPrimitive, One, Zero};

/// The exact value of a finite float, NaN otherwise
impl From<f64> for ContinuedFraction {
    fn from(f: f64) -> Self {
        match Ratio::<BigInt>::from_f64(f) {
            Some(r) => ContinuedFraction::from(r),
            None => ContinuedFraction::nan(),
        }
    }
}

/// A real number extended with the two infinities
#[derive(Clone, Debug)]
pub enum Extended {
    Finite(ContinuedFraction),
    PosInf,
    NegInf,
    NaN,
}

impl From<f64> for Extended {
    fn from(f: f64) -> Self {
        if f.is_nan() {
            Extended::NaN
        } else if f == f64::INFINITY {
            Extended::PosInf
        } else if f == f64::NEG_INFINITY {
            Extended::NegInf
        } else {
            Extended::Finite(ContinuedFraction::from(f))
        }
    }
}

impl From<ContinuedFraction> for Extended {
    fn from(x: ContinuedFraction) -> Self {
        if x.is_nan() {
            Extended::NaN
        } else {
            Extended::Finite(x)
        }
    }
}

impl From<&ContinuedFraction> for Extended {
    fn from(x: &ContinuedFraction) -> Self {
        Extended::from(x.clone())
    }
}

impl Extended {
    pub fn is_nan(&self) -> bool {
        match self {
            Extended::NaN => true,
            Extended::Finite(x) => x.is_nan(),
            _ => false,
        }
    }

    pub fn is_infinite(&self) -> bool {
        matches!(self, Extended::PosInf | Extended::NegInf)
    }

    /// The nearest float
    pub fn to_f64(&self) -> f64 {
        match self {
            Extended::Finite(x) => x.to_f64(),
            Extended::PosInf => f64::INFINITY,
            Extended::NegInf => f64::NEG_INFINITY,
            Extended::NaN => f64::NAN,
        }
    }

    /// Apply a function that is total on the finite values,
    /// with its limits at the two infinities
    fn map<F>(&self, f: F, pos: Extended, neg: Extended) -> Extended
    where
        F: FnOnce(&ContinuedFraction) -> ContinuedFraction,
    {
        match self {
            Extended::Finite(x) => Extended::from(f(x)),
            Extended::PosInf => pos,
            Extended::NegInf => neg,
            Extended::NaN => Extended::NaN,
        }
    }

    /// Apply a function with a restricted domain, `None` as a limit marks
    /// the infinity as out of the domain
    fn try_map<F>(&self, f: F, pos: Option<Extended>, neg: Option<Extended>, err: DomainError) -> Result<Extended>
    where
        F: FnOnce(&ContinuedFraction) -> Result<ContinuedFraction>,
    {
        match self {
            Extended::Finite(x) => f(x).map(Extended::from),
            Extended::PosInf => pos.ok_or(err),
            Extended::NegInf => neg.ok_or(err),
            Extended::NaN => Ok(Extended::NaN),
        }
    }

    pub fn exp(&self) -> Extended {
        self.map(ContinuedFraction::exp, Extended::PosInf, Extended::Finite(ContinuedFraction::zero()))
    }

    pub fn log(&self) -> Result<Extended> {
        self.try_map(ContinuedFraction::log, Some(Extended::PosInf), None, DomainError::NonPositiveLog)
    }

    pub fn sqrt(&self) -> Result<Extended> {
        self.try_map(ContinuedFraction::sqrt, Some(Extended::PosInf), None, DomainError::NegativeSqrt)
    }

    pub fn tan(&self) -> Result<Extended> {
        self.try_map(|x| Ok(x.tan()), None, None, DomainError::InfiniteArgument)
    }

    pub fn sin(&self) -> Result<Extended> {
        self.try_map(|x| Ok(x.sin()), None, None, DomainError::InfiniteArgument)
    }

    pub fn cos(&self) -> Result<Extended> {
        self.try_map(|x| Ok(x.cos()), None, None, DomainError::InfiniteArgument)
    }

    pub fn atan(&self) -> Extended {
        self.map(
            ContinuedFraction::atan,
            Extended::Finite(half_pi()),
            Extended::Finite(-half_pi()),
        )
    }

    pub fn sinh(&self) -> Extended {
        self.map(ContinuedFraction::sinh, Extended::PosInf, Extended::NegInf)
    }

    pub fn cosh(&self) -> Extended {
        self.map(ContinuedFraction::cosh, Extended::PosInf, Extended::PosInf)
    }

    pub fn tanh(&self) -> Extended {
        self.map(
            ContinuedFraction::tanh,
            Extended::Finite(ContinuedFraction::one()),
            Extended::Finite(-ContinuedFraction::one()),
        )
    }

    pub fn asinh(&self) -> Extended {
        self.map(ContinuedFraction::asinh, Extended::PosInf, Extended::NegInf)
    }

    pub fn acosh(&self) -> Result<Extended> {
        self.try_map(ContinuedFraction::acosh, Some(Extended::PosInf), None, DomainError::NegativeSqrt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cont_frac::quotients;

    #[test]
    fn from_f64_test() {
        assert_eq!(quotients(&ContinuedFraction::from(0.5), 10), vec![0, 2]);
        assert_eq!(quotients(&ContinuedFraction::from(-2.25), 10), vec![-3, 1, 3]);
        assert_eq!(quotients(&ContinuedFraction::from(0.0), 10), vec![0]);
        assert!(ContinuedFraction::from(f64::NAN).is_nan());
        assert!(ContinuedFraction::from(f64::INFINITY).is_nan());
        assert!(ContinuedFraction::from(f64::NEG_INFINITY).is_nan());

        // the conversion is exact, and so is the way back
        for &f in &[0.1, 1.0 / 3.0, -7.25, 1e-10, 123456.789] {
            assert_eq!(ContinuedFraction::from(f).to_f64(), f);
        }
    }

    #[test]
    fn extended_test() {
        let pos = Extended::from(f64::INFINITY);
        let neg = Extended::from(f64::NEG_INFINITY);
        let nan = Extended::from(f64::NAN);

        assert!(matches!(pos.exp(), Extended::PosInf));
        assert!(matches!(neg.exp(), Extended::Finite(x) if x.is_zero()));
        assert!(matches!(pos.log(), Ok(Extended::PosInf)));
        assert!(matches!(neg.log(), Err(DomainError::NonPositiveLog)));
        assert!(matches!(pos.atan(), Extended::Finite(x) if x == half_pi()));
        assert!(matches!(neg.atan(), Extended::Finite(x) if x == -half_pi()));
        assert!(matches!(pos.tan(), Err(DomainError::InfiniteArgument)));
        assert!(matches!(neg.sin(), Err(DomainError::InfiniteArgument)));
        assert!(matches!(pos.cos(), Err(DomainError::InfiniteArgument)));
        assert!(matches!(pos.sqrt(), Ok(Extended::PosInf)));
        assert!(matches!(neg.sqrt(), Err(DomainError::NegativeSqrt)));
        assert!(matches!(pos.tanh(), Extended::Finite(x) if x == 1));
        assert!(matches!(neg.tanh(), Extended::Finite(x) if x == -1));
        assert!(matches!(neg.cosh(), Extended::PosInf));
        assert!(matches!(neg.acosh(), Err(DomainError::NegativeSqrt)));

        assert!(nan.exp().is_nan());
        assert!(matches!(nan.log(), Ok(Extended::NaN)));
        assert!(nan.atan().to_f64().is_nan());
        assert_eq!(pos.to_f64(), f64::INFINITY);

        let two = Extended::from(2.0);
        assert!(matches!(two.log(), Ok(Extended::Finite(_))));
        assert!(matches!(Extended::from(-2.0).log(), Err(DomainError::NonPositiveLog)));
        assert!((two.exp().to_f64() - std::f64::consts::E * std::f64::consts::E).abs() < 1e-12);
        assert!(!two.is_infinite() && pos.is_infinite());
    }
}
