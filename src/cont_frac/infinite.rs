//! Homographic and bihomographic functions of lazily evaluated continued fractions

use super::block::{Block, DualBlock};
use super::lazy::{ContinuedFraction, Producer};
use super::simple::RationalQuotients;
use crate::settings;
use crate::traits::PartialQuotients;
use num_bigint::BigInt;
use std::mem::replace;
use tracing::{debug, trace};

/// Iterator of [ContinuedFraction::homo()] result
pub(crate) struct Homographic {
    block: Block,
    coeffs: ContinuedFraction,
    pos: usize,
    tail: Option<RationalQuotients>, // expansion of the block after the input ended
}

impl Homographic {
    pub fn new(block: Block, coeffs: ContinuedFraction, pos: usize) -> Self {
        Homographic { block, coeffs, pos, tail: None }
    }
}

impl Iterator for Homographic {
    type Item = BigInt;

    fn next(&mut self) -> Option<BigInt> {
        if let Some(tail) = self.tail.as_mut() {
            return tail.next();
        }

        loop {
            match self.block.check_integer() {
                Ok(Some(i)) => {
                    self.block.reduce(&i);
                    break Some(i);
                }
                Ok(None) => break None,
                Err(()) => match self.coeffs.nth(self.pos) {
                    Some(a) => {
                        self.pos += 1;
                        self.block.rmove(&a);
                    }
                    None => {
                        let (p, q) = replace(&mut self.block, Block::identity()).into_ratio();
                        let mut tail = RationalQuotients::new(p, q);
                        let result = tail.next();
                        self.tail = Some(tail);
                        break result;
                    }
                },
            }
        }
    }
}

enum BihomographicState {
    Dual {
        block: DualBlock,
        x_coeffs: ContinuedFraction,
        y_coeffs: ContinuedFraction,
        x_pos: usize,
        y_pos: usize,
        stalls: usize,
    },
    Single(Homographic),
    Ended,
}

/// Iterator of [ContinuedFraction::bihomo()] result
pub(crate) struct Bihomographic {
    state: BihomographicState,
}

impl Bihomographic {
    pub fn new(block: DualBlock, x_coeffs: ContinuedFraction, y_coeffs: ContinuedFraction) -> Self {
        Bihomographic {
            state: BihomographicState::Dual {
                block,
                x_coeffs,
                y_coeffs,
                x_pos: 0,
                y_pos: 0,
                stalls: 0,
            },
        }
    }
}

impl Iterator for Bihomographic {
    type Item = BigInt;

    fn next(&mut self) -> Option<BigInt> {
        loop {
            let (block, x_coeffs, y_coeffs, x_pos, y_pos, stalls) = match &mut self.state {
                BihomographicState::Dual { block, x_coeffs, y_coeffs, x_pos, y_pos, stalls } => {
                    (block, x_coeffs, y_coeffs, x_pos, y_pos, stalls)
                }
                BihomographicState::Single(homo) => return homo.next(),
                BihomographicState::Ended => return None,
            };

            let bracket = block.bracket();
            if bracket.is_tight() {
                // both bounds infinite means the end of the expansion
                let i = bracket.upper?;
                block.reduce(&i);
                *stalls = 0;
                return Some(i);
            }
            if bracket.is_stalled() {
                if let Some(limit) = settings::max_iters() {
                    if *stalls >= limit {
                        debug!(
                            "bihomographic result is assumed to end after {} stalled iterations",
                            limit
                        );
                        self.state = BihomographicState::Ended;
                        return bracket.upper;
                    }
                }
                *stalls += 1;
            }

            if bracket.right {
                match x_coeffs.nth(*x_pos) {
                    Some(a) => {
                        *x_pos += 1;
                        block.rmove_right(&a);
                    }
                    None => {
                        trace!("first operand ended, continue with the homographic function");
                        let (y_coeffs, y_pos) = (y_coeffs.clone(), *y_pos);
                        let block = block.clone().fix_right();
                        self.state = BihomographicState::Single(Homographic::new(block, y_coeffs, y_pos));
                    }
                }
            } else {
                match y_coeffs.nth(*y_pos) {
                    Some(a) => {
                        *y_pos += 1;
                        block.rmove_down(&a);
                    }
                    None => {
                        trace!("second operand ended, continue with the homographic function");
                        let (x_coeffs, x_pos) = (x_coeffs.clone(), *x_pos);
                        let block = block.clone().fix_down();
                        self.state = BihomographicState::Single(Homographic::new(block, x_coeffs, x_pos));
                    }
                }
            }
        }
    }
}

impl ContinuedFraction {
    /// This method returns a homographic function result on the fraction
    /// A homographic function is `(ax + b)/(cx + d)`
    ///
    /// An input without partial quotients is taken as `x = inf`, so NaN maps to
    /// `a/c`. Callers with `c != 0` check for NaN themselves.
    pub fn homo<A, B, C, D>(&self, a: A, b: B, c: C, d: D) -> Self
    where
        A: Into<BigInt>,
        B: Into<BigInt>,
        C: Into<BigInt>,
        D: Into<BigInt>,
    {
        let block = Block::new(a.into(), b.into(), c.into(), d.into());
        Self::new(Producer::Homographic(Homographic::new(block, self.clone(), 0)))
    }

    /// This method returns a bihomographic function result on the fraction
    /// A bihomographic function is `(axy + bx + cy + d)/(exy + fx + gy + h)`
    ///
    /// Like [ContinuedFraction::homo()], an operand that is NaN is taken as infinity.
    #[allow(clippy::too_many_arguments)]
    pub fn bihomo<A, B, C, D, E, F, G, H>(
        &self,
        rhs: &ContinuedFraction,
        a: A,
        b: B,
        c: C,
        d: D,
        e: E,
        f: F,
        g: G,
        h: H,
    ) -> Self
    where
        A: Into<BigInt>,
        B: Into<BigInt>,
        C: Into<BigInt>,
        D: Into<BigInt>,
        E: Into<BigInt>,
        F: Into<BigInt>,
        G: Into<BigInt>,
        H: Into<BigInt>,
    {
        let block = DualBlock::new(
            a.into(),
            b.into(),
            c.into(),
            d.into(),
            e.into(),
            f.into(),
            g.into(),
            h.into(),
        );
        Self::new(Producer::Bihomographic(Bihomographic::new(
            block,
            self.clone(),
            rhs.clone(),
        )))
    }
}
