//! Arithmetic operators on [ContinuedFraction], with owned or borrowed operands
//! and integer operands on either side

use super::lazy::ContinuedFraction;
use crate::error::{DomainError, Result};
use crate::traits::PartialQuotients;
use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Pow, Signed, Zero};
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};

fn add(x: &ContinuedFraction, y: &ContinuedFraction) -> ContinuedFraction {
    x.bihomo(y, 0, 1, 1, 0, 0, 0, 0, 1)
}

fn sub(x: &ContinuedFraction, y: &ContinuedFraction) -> ContinuedFraction {
    x.bihomo(y, 0, 1, -1, 0, 0, 0, 0, 1)
}

fn mul(x: &ContinuedFraction, y: &ContinuedFraction) -> ContinuedFraction {
    x.bihomo(y, 1, 0, 0, 0, 0, 0, 0, 1)
}

fn div(x: &ContinuedFraction, y: &ContinuedFraction) -> ContinuedFraction {
    // NaN may stand for zero, so a division by exact zero cannot be zero either
    if y.is_nan() || y.is_zero() {
        return ContinuedFraction::nan();
    }
    x.bihomo(y, 0, 1, 0, 0, 0, 0, 1, 0)
}

fn rem(x: &ContinuedFraction, y: &ContinuedFraction) -> ContinuedFraction {
    x.mod_floor(y)
}

fn add_int(x: &ContinuedFraction, n: BigInt) -> ContinuedFraction {
    if n.is_zero() {
        x.clone()
    } else {
        x.homo(1, n, 0, 1)
    }
}

fn sub_int(x: &ContinuedFraction, n: BigInt) -> ContinuedFraction {
    if n.is_zero() {
        x.clone()
    } else {
        x.homo(1, -n, 0, 1)
    }
}

fn mul_int(x: &ContinuedFraction, n: BigInt) -> ContinuedFraction {
    // NaN * 0 stays NaN
    if x.is_nan() {
        ContinuedFraction::nan()
    } else if n.is_one() {
        x.clone()
    } else {
        x.homo(n, 0, 0, 1)
    }
}

fn div_int(x: &ContinuedFraction, n: BigInt) -> ContinuedFraction {
    if n.is_one() {
        x.clone()
    } else {
        x.homo(1, 0, 0, n)
    }
}

fn rem_int(x: &ContinuedFraction, n: BigInt) -> ContinuedFraction {
    x.mod_floor(&ContinuedFraction::from(n))
}

fn int_add(n: BigInt, x: &ContinuedFraction) -> ContinuedFraction {
    add_int(x, n)
}

fn int_sub(n: BigInt, x: &ContinuedFraction) -> ContinuedFraction {
    x.homo(-1, n, 0, 1)
}

fn int_mul(n: BigInt, x: &ContinuedFraction) -> ContinuedFraction {
    mul_int(x, n)
}

fn int_div(n: BigInt, x: &ContinuedFraction) -> ContinuedFraction {
    if x.is_nan() {
        ContinuedFraction::nan()
    } else {
        x.homo(0, n, 1, 0)
    }
}

fn int_rem(n: BigInt, x: &ContinuedFraction) -> ContinuedFraction {
    ContinuedFraction::from(n).mod_floor(x)
}

macro_rules! impl_binop {
    (impl $imp:ident, $method:ident, $func:ident) => {
        impl $imp<ContinuedFraction> for ContinuedFraction {
            type Output = ContinuedFraction;
            #[inline]
            fn $method(self, rhs: ContinuedFraction) -> ContinuedFraction {
                $func(&self, &rhs)
            }
        }

        impl<'a> $imp<&'a ContinuedFraction> for ContinuedFraction {
            type Output = ContinuedFraction;
            #[inline]
            fn $method(self, rhs: &ContinuedFraction) -> ContinuedFraction {
                $func(&self, rhs)
            }
        }

        impl<'a> $imp<ContinuedFraction> for &'a ContinuedFraction {
            type Output = ContinuedFraction;
            #[inline]
            fn $method(self, rhs: ContinuedFraction) -> ContinuedFraction {
                $func(self, &rhs)
            }
        }

        impl<'a, 'b> $imp<&'b ContinuedFraction> for &'a ContinuedFraction {
            type Output = ContinuedFraction;
            #[inline]
            fn $method(self, rhs: &ContinuedFraction) -> ContinuedFraction {
                $func(self, rhs)
            }
        }
    };
}

impl_binop!(impl Add, add, add);
impl_binop!(impl Sub, sub, sub);
impl_binop!(impl Mul, mul, mul);
impl_binop!(impl Div, div, div);
impl_binop!(impl Rem, rem, rem);

macro_rules! impl_binop_for_int {
    (impl $imp:ident, $method:ident, $func:ident, $rfunc:ident; $($t:ty)*) => ($(
        impl $imp<$t> for ContinuedFraction {
            type Output = ContinuedFraction;
            #[inline]
            fn $method(self, rhs: $t) -> ContinuedFraction {
                $func(&self, BigInt::from(rhs))
            }
        }

        impl<'a> $imp<$t> for &'a ContinuedFraction {
            type Output = ContinuedFraction;
            #[inline]
            fn $method(self, rhs: $t) -> ContinuedFraction {
                $func(self, BigInt::from(rhs))
            }
        }

        impl $imp<ContinuedFraction> for $t {
            type Output = ContinuedFraction;
            #[inline]
            fn $method(self, rhs: ContinuedFraction) -> ContinuedFraction {
                $rfunc(BigInt::from(self), &rhs)
            }
        }

        impl<'a> $imp<&'a ContinuedFraction> for $t {
            type Output = ContinuedFraction;
            #[inline]
            fn $method(self, rhs: &ContinuedFraction) -> ContinuedFraction {
                $rfunc(BigInt::from(self), rhs)
            }
        }
    )*);
}

impl_binop_for_int!(impl Add, add, add_int, int_add; i32 i64 u32 u64 BigInt);
impl_binop_for_int!(impl Sub, sub, sub_int, int_sub; i32 i64 u32 u64 BigInt);
impl_binop_for_int!(impl Mul, mul, mul_int, int_mul; i32 i64 u32 u64 BigInt);
impl_binop_for_int!(impl Div, div, div_int, int_div; i32 i64 u32 u64 BigInt);
impl_binop_for_int!(impl Rem, rem, rem_int, int_rem; i32 i64 u32 u64 BigInt);

impl Neg for ContinuedFraction {
    type Output = ContinuedFraction;
    #[inline]
    fn neg(self) -> ContinuedFraction {
        -&self
    }
}

impl<'a> Neg for &'a ContinuedFraction {
    type Output = ContinuedFraction;
    #[inline]
    fn neg(self) -> ContinuedFraction {
        self.homo(-1, 0, 0, 1)
    }
}

impl Zero for ContinuedFraction {
    #[inline]
    fn zero() -> Self {
        ContinuedFraction::from(0)
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.nth(0).map_or(false, |a| a.is_zero()) && self.nth(1).is_none()
    }
}

impl One for ContinuedFraction {
    #[inline]
    fn one() -> Self {
        ContinuedFraction::from(1)
    }
}

impl ContinuedFraction {
    /// Absolute value, NaN stays NaN
    pub fn abs(&self) -> ContinuedFraction {
        match self.nth(0) {
            Some(a) if a.is_negative() => -self,
            _ => self.clone(),
        }
    }

    /// Largest integer not greater than `self / rhs`
    pub fn div_floor(&self, rhs: &ContinuedFraction) -> ContinuedFraction {
        (self / rhs).floor()
    }

    /// Remainder of the floored division, having the sign of `rhs`
    pub fn mod_floor(&self, rhs: &ContinuedFraction) -> ContinuedFraction {
        self.div_mod_floor(rhs).1
    }

    /// Floored quotient and remainder at once
    pub fn div_mod_floor(&self, rhs: &ContinuedFraction) -> (ContinuedFraction, ContinuedFraction) {
        let q = self.div_floor(rhs);
        let r = self - &q * rhs;
        (q, r)
    }

    /// Raise to an integer power, by right-to-left binary exponentiation.
    /// Zero cannot be raised to a negative power.
    #[inline]
    pub fn powi(&self, n: i64) -> Result<ContinuedFraction> {
        self.pow_big(&BigInt::from(n))
    }

    /// [ContinuedFraction::powi()] with an unbounded exponent
    pub fn pow_big(&self, n: &BigInt) -> Result<ContinuedFraction> {
        if self.is_nan() {
            return Ok(ContinuedFraction::nan());
        }
        let negative = n.is_negative();
        if negative && self.is_zero() {
            return Err(DomainError::ZeroToNegativePower);
        }

        let two = BigUint::from(2u32);
        let mut n = n.magnitude().clone();
        let mut base = self.clone();
        let mut result: Option<ContinuedFraction> = None;
        while !n.is_zero() {
            if n.is_odd() {
                if negative && n.is_one() {
                    // invert in the last multiplication
                    return Ok(match result {
                        None => 1i64 / &base,
                        Some(r) => r.bihomo(&base, 0, 0, 0, 1, 1, 0, 0, 0),
                    });
                }
                result = Some(match result {
                    None => base.clone(),
                    Some(r) => r * &base,
                });
                n -= 1u32;
            } else {
                if negative && n == two && result.is_none() {
                    return Ok(base.bihomo(&base, 0, 0, 0, 1, 1, 0, 0, 0));
                }
                base = &base * &base;
                n >>= 1usize;
            }
        }
        Ok(result.unwrap_or_else(ContinuedFraction::one))
    }
}

impl Pow<i64> for ContinuedFraction {
    type Output = Result<ContinuedFraction>;
    #[inline]
    fn pow(self, rhs: i64) -> Result<ContinuedFraction> {
        self.powi(rhs)
    }
}

impl<'a> Pow<i64> for &'a ContinuedFraction {
    type Output = Result<ContinuedFraction>;
    #[inline]
    fn pow(self, rhs: i64) -> Result<ContinuedFraction> {
        self.powi(rhs)
    }
}

impl<'a> Pow<&'a BigInt> for &'a ContinuedFraction {
    type Output = Result<ContinuedFraction>;
    #[inline]
    fn pow(self, rhs: &'a BigInt) -> Result<ContinuedFraction> {
        self.pow_big(rhs)
    }
}
