use super::exp::Log;
use super::sqrt::Sqrt;
use crate::cont_frac::ContinuedFraction;
use crate::error::{DomainError, Result};
use crate::traits::PartialQuotients;
use num_traits::Zero;

impl ContinuedFraction {
    /// `(e^x - e^-x) / 2`
    pub fn sinh(&self) -> ContinuedFraction {
        if self.is_nan() {
            return ContinuedFraction::nan();
        }
        self.exp().bihomo(&(-self).exp(), 0, 1, -1, 0, 0, 0, 0, 2)
    }

    /// `(e^x + e^-x) / 2`
    pub fn cosh(&self) -> ContinuedFraction {
        if self.is_nan() {
            return ContinuedFraction::nan();
        }
        self.exp().bihomo(&(-self).exp(), 0, 1, 1, 0, 0, 0, 0, 2)
    }

    /// `(e^x - e^-x) / (e^x + e^-x)`
    pub fn tanh(&self) -> ContinuedFraction {
        if self.is_nan() || self.is_zero() {
            return self.clone();
        }
        self.exp().bihomo(&(-self).exp(), 0, 1, -1, 0, 0, 1, 1, 0)
    }

    /// `log(x + sqrt(x^2 + 1))`
    pub fn asinh(&self) -> ContinuedFraction {
        if self.is_nan() {
            return ContinuedFraction::nan();
        }
        let root = Sqrt::create(&(self * self + 1i64));
        Log::create(&(self + root))
    }

    /// `log(x + sqrt(x^2 - 1))`, for arguments not less than 1
    pub fn acosh(&self) -> Result<ContinuedFraction> {
        let root = (self * self - 1i64).sqrt()?;
        (self + root).log()
    }

    /// `log((1 + x) / (1 - x)) / 2`, for arguments in `(-1, 1)`
    pub fn atanh(&self) -> Result<ContinuedFraction> {
        if self.is_nan() {
            return Ok(ContinuedFraction::nan());
        }
        if *self >= 1 || *self <= -1 {
            return Err(DomainError::OutOfUnitRange);
        }
        Ok(self.homo(1, 1, -1, 1).log()? / 2i64)
    }
}
