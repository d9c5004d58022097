use core::cmp::{max, min};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use std::mem::swap;

/// A block on the magic table for homographic operation computation of continued fractions,
/// representing `(ax + b) / (cx + d)`.
/// The method is described in <https://crypto.stanford.edu/pbc/notes/contfrac/compute.html>
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pm1: BigInt, // p_(k-1), a
    pm2: BigInt, // p_(k-2), b
    qm1: BigInt, // q_(k-1), c
    qm2: BigInt, // q_(k-2), d
}

impl Block {
    /// create a block that represents (ax + b) / (cx + d)
    pub fn new(a: BigInt, b: BigInt, c: BigInt, d: BigInt) -> Self {
        Block { pm1: a, pm2: b, qm1: c, qm2: d }
    }

    /// create a block that represents a identity operation
    pub fn identity() -> Self {
        Block::new(BigInt::one(), BigInt::zero(), BigInt::zero(), BigInt::one())
    }

    /// push the latest convergent to the block
    fn update(&mut self, p: BigInt, q: BigInt) {
        swap(&mut self.pm2, &mut self.pm1); // self.pm2 = self.pm1
        swap(&mut self.qm2, &mut self.qm1); // self.qm2 = self.qm1
        self.pm1 = p;
        self.qm1 = q;
    }

    /// move with an coefficient from regular continued fraction, i.e. substitute `x = a + 1/x'`
    pub fn rmove(&mut self, a: &BigInt) {
        let p = a * &self.pm1 + &self.pm2;
        let q = a * &self.qm1 + &self.qm2;
        self.update(p, q);
    }

    /// move with two coefficients from generalized continued fraction, i.e. substitute `x = b + a/x'`
    pub fn gmove(&mut self, a: &BigInt, b: &BigInt) {
        let p = &self.pm1 * b + &self.pm2 * a;
        let q = &self.qm1 * b + &self.qm2 * a;
        self.update(p, q);
    }

    /// divide all coefficients by their common divisor
    pub fn reduce_common(&mut self) {
        let g = self.pm1.gcd(&self.pm2).gcd(&self.qm1).gcd(&self.qm2);
        if g > BigInt::one() {
            self.pm1 = &self.pm1 / &g;
            self.pm2 = &self.pm2 / &g;
            self.qm1 = &self.qm1 / &g;
            self.qm2 = &self.qm2 / g;
        }
    }

    /// Check whether the block yields the same integer part at `x = inf` and `x = 0`.
    /// Returns `Ok(None)` if both values are infinite.
    #[inline]
    pub fn check_integer(&self) -> Result<Option<BigInt>, ()> {
        let (a, b, c, d) = (&self.pm1, &self.pm2, &self.qm1, &self.qm2);
        if !c.is_zero() {
            let ac = a.div_floor(c);
            if !d.is_zero() {
                if ac == b.div_floor(d) { Ok(Some(ac)) } else { Err(()) }
            } else if !b.is_zero() {
                Err(())
            } else {
                // z(0) == 0/0 gives no information
                Ok(Some(ac))
            }
        } else if !d.is_zero() {
            if a.is_zero() { Ok(Some(b.div_floor(d))) } else { Err(()) }
        } else {
            Ok(None)
        }
    }

    /// output an integer `i` from the block, i.e. substitute `z = i + 1/z'`
    pub fn reduce(&mut self, i: &BigInt) {
        let r1 = &self.pm1 - &self.qm1 * i;
        let r2 = &self.pm2 - &self.qm2 * i;
        swap(&mut self.pm1, &mut self.qm1); // self.pm1 = self.qm1
        swap(&mut self.pm2, &mut self.qm2); // self.pm2 = self.qm2
        self.qm1 = r1;
        self.qm2 = r2;
    }

    /// output a digit `i` from the block, i.e. substitute `z = i + z'/base`
    pub fn reduce_base(&mut self, i: &BigInt, base: &BigInt) {
        self.pm1 = (&self.pm1 - &self.qm1 * i) * base;
        self.pm2 = (&self.pm2 - &self.qm2 * i) * base;
    }

    /// the latest convergent `p_(k-1)/q_(k-1)`
    #[inline]
    pub fn convergent(&self) -> (&BigInt, &BigInt) {
        (&self.pm1, &self.qm1)
    }

    /// fix the input at infinity, after which the block represents `a/c`
    pub fn freeze(&mut self) {
        self.pm2 = self.pm1.clone();
        self.qm2 = self.qm1.clone();
    }

    /// whether the numerators are both zero, i.e. the block is identically zero
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.pm1.is_zero() && self.pm2.is_zero()
    }

    /// whether the block vanishes when the input is at infinity
    #[inline]
    pub fn is_zero_at_infinity(&self) -> bool {
        self.pm1.is_zero()
    }

    /// the value `a/c` when the input is at infinity
    pub fn into_ratio(self) -> (BigInt, BigInt) {
        (self.pm1, self.qm1)
    }
}

/// The value of a bihomographic function at one corner of the input domain
#[derive(Debug, Clone, PartialEq)]
enum Corner {
    Finite(BigInt),
    Infinite,
    Unknown, // 0/0
}

impl Corner {
    fn of(p: &BigInt, q: &BigInt) -> Self {
        if !q.is_zero() {
            Corner::Finite(p.div_floor(q))
        } else if !p.is_zero() {
            Corner::Infinite
        } else {
            Corner::Unknown
        }
    }
}

/// The integer bounds of a bihomographic function over the input domain,
/// and the input to be consumed for narrowing the bounds
#[derive(Debug, Clone, PartialEq)]
pub struct Bracket {
    /// floor of the minimal corner value, `None` if there is no finite corner
    pub lower: Option<BigInt>,
    /// floor of the maximal corner value, `None` if any corner is infinite
    pub upper: Option<BigInt>,
    /// true to consume x (move right), false to consume y (move down)
    pub right: bool,
}

impl Bracket {
    /// The next output term is determined
    #[inline]
    pub fn is_tight(&self) -> bool {
        self.lower == self.upper
    }

    /// The bounds could be tight for a rational result that may never be proven
    #[inline]
    pub fn is_stalled(&self) -> bool {
        match (&self.lower, &self.upper) {
            (_, None) => true,
            (Some(l), Some(u)) => &(l + 1) == u,
            (None, Some(_)) => false,
        }
    }
}

/// A block on the magic table for bihomographic operation computation of continued fractions
/// The method is described in <https://crypto.stanford.edu/pbc/notes/contfrac/bihom.html>
#[derive(Debug, Clone, PartialEq)]
pub struct DualBlock {
    pm11: BigInt, // p with a_(i-1), b_(j-1), a
    pm12: BigInt, // p with a_(i-1), b_(j-2), b
    pm21: BigInt, // c
    pm22: BigInt, // d
    qm11: BigInt, // q with a_(i-1), b_(j-1), e
    qm12: BigInt, // q with a_(i-1), b_(j-2), f
    qm21: BigInt, // g
    qm22: BigInt, // h
}

impl DualBlock {
    /// create a block that represents (axy + bx + cy + d)/(exy + fx + gy + h)
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        a: BigInt,
        b: BigInt,
        c: BigInt,
        d: BigInt,
        e: BigInt,
        f: BigInt,
        g: BigInt,
        h: BigInt,
    ) -> Self {
        DualBlock {
            pm11: a, pm12: b, pm21: c, pm22: d,
            qm11: e, qm12: f, qm21: g, qm22: h,
        }
    }

    /// push the latest convergent using x from right to the block
    fn update_right(&mut self, p1: BigInt, q1: BigInt, p2: BigInt, q2: BigInt) {
        swap(&mut self.pm21, &mut self.pm11); // self.pm21 = self.pm11
        swap(&mut self.qm21, &mut self.qm11); // self.qm21 = self.qm11
        self.pm11 = p1;
        self.qm11 = q1;

        swap(&mut self.pm22, &mut self.pm12); // self.pm22 = self.pm12
        swap(&mut self.qm22, &mut self.qm12); // self.qm22 = self.qm12
        self.pm12 = p2;
        self.qm12 = q2;
    }

    /// push the latest convergent using y from bottom to the block
    fn update_down(&mut self, p1: BigInt, q1: BigInt, p2: BigInt, q2: BigInt) {
        swap(&mut self.pm12, &mut self.pm11); // self.pm12 = self.pm11
        swap(&mut self.qm12, &mut self.qm11); // self.qm12 = self.qm11
        self.pm11 = p1;
        self.qm11 = q1;

        swap(&mut self.pm22, &mut self.pm21); // self.pm22 = self.pm21
        swap(&mut self.qm22, &mut self.qm21); // self.qm22 = self.qm21
        self.pm21 = p2;
        self.qm21 = q2;
    }

    /// move with an coefficient from the first regular continued fraction (x)
    pub fn rmove_right(&mut self, a: &BigInt) {
        let p1 = a * &self.pm11 + &self.pm21;
        let q1 = a * &self.qm11 + &self.qm21;
        let p2 = a * &self.pm12 + &self.pm22;
        let q2 = a * &self.qm12 + &self.qm22;
        self.update_right(p1, q1, p2, q2);
    }

    /// move with an coefficient from the second regular continued fraction (y)
    pub fn rmove_down(&mut self, a: &BigInt) {
        let p1 = a * &self.pm11 + &self.pm12;
        let q1 = a * &self.qm11 + &self.qm12;
        let p2 = a * &self.pm21 + &self.pm22;
        let q2 = a * &self.qm21 + &self.qm22;
        self.update_down(p1, q1, p2, q2);
    }

    /// Compute the integer bounds from the four corners `(x, y)` in `{inf, 0}^2`,
    /// and decide which input narrows the bounds the most.
    pub fn bracket(&self) -> Bracket {
        let ae = Corner::of(&self.pm11, &self.qm11);
        let bf = Corner::of(&self.pm12, &self.qm12);
        let cg = Corner::of(&self.pm21, &self.qm21);
        let dh = Corner::of(&self.pm22, &self.qm22);

        let mut lower: Option<BigInt> = None;
        let mut upper: Option<BigInt> = None;
        let mut infinite = false;
        for corner in [&ae, &bf, &cg, &dh].iter() {
            match corner {
                Corner::Finite(v) => {
                    lower = Some(match lower {
                        Some(l) => min(l, v.clone()),
                        None => v.clone(),
                    });
                    upper = Some(match upper {
                        Some(u) => max(u, v.clone()),
                        None => v.clone(),
                    });
                }
                Corner::Infinite => infinite = true,
                Corner::Unknown => {}
            }
        }
        if infinite {
            upper = None;
        }

        // move towards the input whose corners are farther apart, i.e.
        // right = |b/f - d/h| > |c/g - d/h|
        let right = match (bf, cg) {
            (_, Corner::Unknown) => true,
            (Corner::Unknown, _) => false,
            (bf, cg) => {
                let dh = match dh {
                    Corner::Finite(v) => Some(v),
                    Corner::Infinite => None,
                    Corner::Unknown => Some(BigInt::zero()),
                };
                match (bf, cg, dh) {
                    (Corner::Infinite, _, dh) => dh.is_some(),
                    (_, Corner::Infinite, dh) => dh.is_none(),
                    (Corner::Finite(bf), Corner::Finite(cg), None) => bf.abs() < cg.abs(),
                    (Corner::Finite(bf), Corner::Finite(cg), Some(dh)) => {
                        (&bf - &dh).abs() > (&cg - &dh).abs()
                    }
                    _ => unreachable!(),
                }
            }
        };

        Bracket { lower, upper, right }
    }

    /// output an integer `i` from the block, i.e. substitute `z = i + 1/z'`
    pub fn reduce(&mut self, i: &BigInt) {
        swap(&mut self.pm11, &mut self.qm11);
        self.qm11 = &self.qm11 - &self.pm11 * i;
        swap(&mut self.pm12, &mut self.qm12);
        self.qm12 = &self.qm12 - &self.pm12 * i;
        swap(&mut self.pm21, &mut self.qm21);
        self.qm21 = &self.qm21 - &self.pm21 * i;
        swap(&mut self.pm22, &mut self.qm22);
        self.qm22 = &self.qm22 - &self.pm22 * i;
    }

    /// collapse the block when x reaches infinity, resulting `(ay + b)/(ey + f)`
    pub fn fix_right(self) -> Block {
        Block::new(self.pm11, self.pm12, self.qm11, self.qm12)
    }

    /// collapse the block when y reaches infinity, resulting `(ax + c)/(ex + g)`
    pub fn fix_down(self) -> Block {
        Block::new(self.pm11, self.pm21, self.qm11, self.qm21)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(v: i64) -> BigInt {
        BigInt::from(v)
    }

    #[test]
    fn block_test() {
        // (2x + 1) / (x + 0) with x = 3 + 1/x'
        let mut block = Block::new(int(2), int(1), int(1), int(0));
        assert_eq!(block.check_integer(), Err(()));
        block.rmove(&int(3));
        assert_eq!(block, Block::new(int(7), int(2), int(3), int(1)));
        assert_eq!(block.check_integer(), Ok(Some(int(2))));
        block.reduce(&int(2));
        assert_eq!(block, Block::new(int(3), int(1), int(1), int(0)));

        let nan = Block::new(int(1), int(0), int(0), int(0));
        assert_eq!(nan.check_integer(), Ok(None));

        let mut frozen = Block::new(int(7), int(2), int(3), int(1));
        frozen.freeze();
        assert_eq!(frozen.check_integer(), Ok(Some(int(2))));
        assert_eq!(frozen.into_ratio(), (int(7), int(3)));
    }

    #[test]
    fn gmove_test() {
        // 4/pi = 1 + 1/(3 + 4/(5 + 9/(7 + ..)))
        let mut block = Block::identity();
        block.gmove(&int(1), &int(1));
        block.gmove(&int(1), &int(3));
        assert_eq!(block, Block::new(int(4), int(1), int(3), int(1)));
        block.gmove(&int(4), &int(5));
        assert_eq!(block, Block::new(int(24), int(4), int(19), int(3)));

        let mut scaled = Block::new(int(2), int(4), int(6), int(8));
        scaled.reduce_common();
        assert_eq!(scaled, Block::new(int(1), int(2), int(3), int(4)));
    }

    #[test]
    fn dual_block_test() {
        // x + y
        let mut block = DualBlock::new(int(0), int(1), int(1), int(0), int(0), int(0), int(0), int(1));
        let bracket = block.bracket();
        assert_eq!(bracket.lower, Some(int(0)));
        assert_eq!(bracket.upper, None);

        block.rmove_right(&int(1));
        block.rmove_down(&int(2));
        let bracket = block.bracket();
        assert_eq!(bracket.lower, Some(int(3)));
        assert!(bracket.upper.is_none());
        assert!(bracket.is_stalled());

        // 3/2 + 5/2 == 4
        let mut sum = DualBlock::new(int(0), int(1), int(1), int(0), int(0), int(0), int(0), int(1));
        sum.rmove_right(&int(1));
        sum.rmove_right(&int(2));
        sum.rmove_down(&int(2));
        sum.rmove_down(&int(2));
        let bracket = sum.bracket();
        assert_eq!(bracket.lower, Some(int(3)));
        assert_eq!(bracket.upper, Some(int(4)));
    }
}
