use super::exp::{Exp, Log};
use super::sqrt::Sqrt;
use crate::cont_frac::ContinuedFraction;
use crate::error::{DomainError, Result};
use crate::float::Extended;
use crate::traits::PartialQuotients;
use num_bigint::BigInt;
use num_traits::{One, Signed, ToPrimitive, Zero};
use std::iter::{Product, Sum};

impl ContinuedFraction {
    /// Largest integer not greater than the number
    pub fn floor(&self) -> ContinuedFraction {
        match self.nth(0) {
            Some(a) => ContinuedFraction::from(a),
            None => ContinuedFraction::nan(),
        }
    }

    /// Smallest integer not less than the number
    pub fn ceil(&self) -> ContinuedFraction {
        match self.nth(0) {
            Some(a) if self.nth(1).is_some() => ContinuedFraction::from(a + 1u32),
            Some(a) => ContinuedFraction::from(a),
            None => ContinuedFraction::nan(),
        }
    }

    /// The integer part, rounded towards zero
    pub fn trunc(&self) -> ContinuedFraction {
        match self.to_integer() {
            Some(i) => ContinuedFraction::from(i),
            None => ContinuedFraction::nan(),
        }
    }

    /// Absolute value
    #[inline]
    pub fn fabs(&self) -> ContinuedFraction {
        self.abs()
    }

    /// `n!` for a non-negative integer `n`
    pub fn factorial(&self) -> Result<ContinuedFraction> {
        let n = match self.nth(0) {
            Some(n) => n,
            None => return Ok(ContinuedFraction::nan()),
        };
        if n.is_negative() || self.nth(1).is_some() {
            return Err(DomainError::NotNatural);
        }

        let mut product = BigInt::one();
        let mut k = BigInt::from(2);
        while k <= n {
            product *= &k;
            k += 1u32;
        }
        Ok(ContinuedFraction::from(product))
    }

    /// Fractional and integer parts, both with the sign of the number
    pub fn modf(&self) -> (ContinuedFraction, ContinuedFraction) {
        let int = self.trunc();
        (self - &int, int)
    }

    /// Remainder of the division with the sign of the dividend
    /// (compare to `%`, which follows the divisor)
    pub fn fmod(&self, rhs: &ContinuedFraction) -> Result<ContinuedFraction> {
        if rhs.is_zero() {
            return Err(DomainError::ZeroDivisor);
        }
        let same_sign = (*self > 0 && *rhs > 0) || (*self < 0 && *rhs < 0);
        if same_sign {
            Ok(self % rhs)
        } else {
            Ok(-((-self) % rhs))
        }
    }

    /// `x * 2^exp`
    pub fn ldexp(&self, exp: i64) -> ContinuedFraction {
        if self.is_zero() {
            return self.clone();
        }
        self * power_of_two(exp)
    }

    /// Mantissa `m` and exponent `p` with `x = m * 2^p` and `0.5 <= |m| < 1`.
    /// Zero gives `(0, 0)`.
    pub fn frexp(&self) -> (ContinuedFraction, i64) {
        if self.is_nan() {
            return (ContinuedFraction::nan(), 0);
        }
        if self.is_zero() {
            return (ContinuedFraction::zero(), 0);
        }

        let negative = *self < 0;
        let abs = self.abs();
        let log2 = Log::create(&abs) / Log::create(&ContinuedFraction::from(2));
        let p = match log2.ceil().to_i64() {
            Some(p) => p,
            None => return (ContinuedFraction::nan(), 0),
        };
        let m = &abs * power_of_two(-p);
        let (m, p) = if m == 1 {
            (ContinuedFraction::ratio(1, 2), p + 1)
        } else {
            (m, p)
        };
        if negative {
            (-m, p)
        } else {
            (m, p)
        }
    }

    /// `sqrt(x^2 + y^2)`
    pub fn hypot(&self, rhs: &ContinuedFraction) -> ContinuedFraction {
        Sqrt::create(&(self * self + rhs * rhs))
    }

    /// The number with the sign of `sign`
    pub fn copysign(&self, sign: &ContinuedFraction) -> ContinuedFraction {
        if (*sign < 0) != (*self < 0) {
            -self
        } else {
            self.clone()
        }
    }

    /// Raise to a real power, `e^(y log x)` unless the exponent is an integer
    pub fn powf(&self, rhs: &ContinuedFraction) -> Result<ContinuedFraction> {
        if self.is_nan() || rhs.is_nan() {
            return Ok(ContinuedFraction::nan());
        }
        if self.is_zero() {
            return if *rhs > 0 {
                Ok(ContinuedFraction::zero())
            } else if *rhs < 0 {
                Err(DomainError::ZeroToNegativePower)
            } else {
                Ok(ContinuedFraction::one())
            };
        }
        if rhs.is_integer() {
            if let Some(n) = rhs.nth(0) {
                return self.pow_big(&n);
            }
        }
        if *self < 0 {
            return Err(DomainError::NegativeBase);
        }
        Ok(Exp::create(&(rhs * Log::create(self))))
    }

    /// Sum of all values, zero for an empty iterator
    pub fn fsum<I: IntoIterator<Item = ContinuedFraction>>(values: I) -> ContinuedFraction {
        values.into_iter().sum()
    }
}

/// `2^exp`, exactly
fn power_of_two(exp: i64) -> ContinuedFraction {
    let p = BigInt::one() << exp.unsigned_abs() as usize;
    if exp < 0 {
        ContinuedFraction::ratio(1, p)
    } else {
        ContinuedFraction::from(p)
    }
}

/// Whether the number is NaN, for floats and continued fractions alike
pub fn isnan<T: Into<Extended>>(x: T) -> bool {
    x.into().is_nan()
}

/// Whether the number is one of the infinities. A [ContinuedFraction] is never infinite.
pub fn isinf<T: Into<Extended>>(x: T) -> bool {
    x.into().is_infinite()
}

impl Sum for ContinuedFraction {
    fn sum<I: Iterator<Item = ContinuedFraction>>(iter: I) -> Self {
        iter.fold(None, |acc: Option<ContinuedFraction>, x| match acc {
            None => Some(x),
            Some(acc) => Some(acc + x),
        })
        .unwrap_or_else(ContinuedFraction::zero)
    }
}

impl<'a> Sum<&'a ContinuedFraction> for ContinuedFraction {
    fn sum<I: Iterator<Item = &'a ContinuedFraction>>(iter: I) -> Self {
        iter.cloned().sum()
    }
}

impl Product for ContinuedFraction {
    fn product<I: Iterator<Item = ContinuedFraction>>(iter: I) -> Self {
        iter.fold(None, |acc: Option<ContinuedFraction>, x| match acc {
            None => Some(x),
            Some(acc) => Some(acc * x),
        })
        .unwrap_or_else(ContinuedFraction::one)
    }
}

impl<'a> Product<&'a ContinuedFraction> for ContinuedFraction {
    fn product<I: Iterator<Item = &'a ContinuedFraction>>(iter: I) -> Self {
        iter.cloned().product()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cont_frac::quotients;
    use crate::symbols::{e, pi};

    #[test]
    fn rounding_test() {
        let x = ContinuedFraction::ratio(7, 2);
        let y = ContinuedFraction::ratio(-7, 2);
        assert_eq!(quotients(&x.floor(), 10), vec![3]);
        assert_eq!(quotients(&x.ceil(), 10), vec![4]);
        assert_eq!(quotients(&x.trunc(), 10), vec![3]);
        assert_eq!(quotients(&y.floor(), 10), vec![-4]);
        assert_eq!(quotients(&y.ceil(), 10), vec![-3]);
        assert_eq!(quotients(&y.trunc(), 10), vec![-3]);
        assert_eq!(quotients(&ContinuedFraction::from(5).ceil(), 10), vec![5]);
        assert_eq!(quotients(&pi().floor(), 10), vec![3]);
        assert!(ContinuedFraction::nan().floor().is_nan());
        assert!(ContinuedFraction::nan().ceil().is_nan());

        let (frac, int) = y.modf();
        assert_eq!(quotients(&frac, 10), vec![-1, 2]);
        assert_eq!(quotients(&int, 10), vec![-3]);
    }

    #[test]
    fn fmod_test() {
        let x = ContinuedFraction::from(7);
        let y = ContinuedFraction::from(-3);
        assert_eq!(quotients(&x.fmod(&y).unwrap(), 10), vec![1]);
        assert_eq!(quotients(&(-&x).fmod(&y).unwrap(), 10), vec![-1]);
        assert_eq!(quotients(&(-&x).fmod(&-&y).unwrap(), 10), vec![-1]);
        assert_eq!(quotients(&x.fmod(&-&y).unwrap(), 10), vec![1]);
        // the operator follows the divisor
        assert_eq!(quotients(&(&x % &y), 10), vec![-2]);
        assert_eq!(x.fmod(&ContinuedFraction::zero()).err(), Some(DomainError::ZeroDivisor));
    }

    #[test]
    fn binary_test() {
        let x = ContinuedFraction::ratio(3, 4);
        assert_eq!(quotients(&x.ldexp(3), 10), vec![6]);
        assert_eq!(quotients(&x.ldexp(-2), 10), vec![0, 5, 3]);
        assert!(ContinuedFraction::zero().ldexp(5).is_zero());

        let (m, p) = ContinuedFraction::from(8).frexp();
        assert_eq!(quotients(&m, 10), vec![0, 2]);
        assert_eq!(p, 4);
        let (m, p) = ContinuedFraction::from(-6).frexp();
        assert_eq!(quotients(&m, 10), vec![-1, 4]);
        assert_eq!(p, 3);
        let (m, p) = ContinuedFraction::ratio(3, 32).frexp();
        assert_eq!(quotients(&m, 10), vec![0, 1, 3]);
        assert_eq!(p, -3);
        let (m, p) = ContinuedFraction::zero().frexp();
        assert!(m.is_zero());
        assert_eq!(p, 0);
    }

    #[test]
    fn misc_test() {
        let three = ContinuedFraction::from(3);
        let four = ContinuedFraction::from(4);
        assert!(three.hypot(&four) == 5);
        assert!(ContinuedFraction::from(1).hypot(&ContinuedFraction::from(1)) == ContinuedFraction::from(2).sqrt().unwrap());

        assert_eq!(quotients(&three.copysign(&-&four), 10), vec![-3]);
        assert_eq!(quotients(&(-&three).copysign(&four), 10), vec![3]);
        assert_eq!(quotients(&three.copysign(&four), 10), vec![3]);

        let values = vec![ContinuedFraction::ratio(1, 2), ContinuedFraction::ratio(1, 3), ContinuedFraction::ratio(1, 6)];
        assert_eq!(quotients(&ContinuedFraction::fsum(values.clone()), 10), vec![1]);
        assert_eq!(quotients(&values.iter().product(), 10), vec![0, 36]);
        assert!(ContinuedFraction::fsum(Vec::new()).is_zero());

        assert_eq!(quotients(&ContinuedFraction::ratio(-3, 2).fabs(), 10), vec![1, 2]);
        assert!(ContinuedFraction::nan().fabs().is_nan());
    }

    #[test]
    fn factorial_test() {
        assert_eq!(quotients(&ContinuedFraction::from(0).factorial().unwrap(), 10), vec![1]);
        assert_eq!(quotients(&ContinuedFraction::from(1).factorial().unwrap(), 10), vec![1]);
        assert_eq!(quotients(&ContinuedFraction::from(5).factorial().unwrap(), 10), vec![120]);
        assert!(ContinuedFraction::from(25).factorial().unwrap() == "15511210043330985984000000".parse::<BigInt>().unwrap());
        assert!(ContinuedFraction::nan().factorial().unwrap().is_nan());
        assert_eq!(ContinuedFraction::from(-1).factorial().err(), Some(DomainError::NotNatural));
        assert_eq!(ContinuedFraction::ratio(5, 2).factorial().err(), Some(DomainError::NotNatural));
    }

    #[test]
    fn classify_test() {
        assert!(isnan(f64::NAN));
        assert!(isnan(ContinuedFraction::nan()));
        assert!(isnan(&(e() / ContinuedFraction::zero())));
        assert!(!isnan(1.5));
        assert!(!isnan(&e()));

        assert!(isinf(f64::INFINITY));
        assert!(isinf(f64::NEG_INFINITY));
        assert!(!isinf(f64::NAN));
        assert!(!isinf(2.0));
        assert!(!isinf(&pi()));
        assert!(!isinf(Extended::Finite(e())));
    }

    #[test]
    fn powf_test() {
        let two = ContinuedFraction::from(2);
        let half = ContinuedFraction::ratio(1, 2);
        assert!(two.powf(&half).unwrap() == two.sqrt().unwrap());
        assert_eq!(quotients(&two.powf(&ContinuedFraction::from(-3)).unwrap(), 10), vec![0, 8]);
        assert!(e().powf(&half).unwrap() == half.exp());
        assert!(ContinuedFraction::from(4).powf(&half).unwrap() == 2);

        let zero = ContinuedFraction::zero();
        assert!(zero.powf(&half).unwrap().is_zero());
        assert_eq!(quotients(&zero.powf(&zero).unwrap(), 10), vec![1]);
        assert_eq!(zero.powf(&-&half).err(), Some(DomainError::ZeroToNegativePower));
        assert_eq!((-&two).powf(&half).err(), Some(DomainError::NegativeBase));
        assert_eq!(quotients(&(-&two).powf(&ContinuedFraction::from(3)).unwrap(), 10), vec![-8]);
        assert!(two.powf(&ContinuedFraction::nan()).unwrap().is_nan());

        // integral exponents beyond i64 keep the sign rules of integer powers
        let big = BigInt::one() << 70usize;
        let minus_one = ContinuedFraction::from(-1);
        assert_eq!(quotients(&minus_one.powf(&ContinuedFraction::from(big.clone())).unwrap(), 10), vec![1]);
        assert_eq!(quotients(&minus_one.powf(&ContinuedFraction::from(-big - 1u32)).unwrap(), 10), vec![-1]);
        assert_eq!(
            zero.powf(&ContinuedFraction::from(-(BigInt::one() << 70usize))).err(),
            Some(DomainError::ZeroToNegativePower)
        );
    }
}
