use super::block::Block;
use super::simple::RationalQuotients;
use num_bigint::BigInt;
use num_traits::One;

/// Number of moves between two reductions of the block by the common divisor
const REDUCE_PERIOD: usize = 1024;

/// Regular continued fraction coefficients of a generalized continued fraction
/// `b_1 + a_2 / (b_2 + a_3 / (b_3 + a_4 / .. ))`. The coefficients `(a_k, b_k)` are
/// consumed from an iterator, the first one should be (1, b_1) for an identity block.
// use the magic table method described in https://crypto.stanford.edu/pbc/notes/contfrac/nonsimple.html
#[derive(Debug, Clone)]
pub(crate) struct Simplified<I: Iterator<Item = (BigInt, BigInt)>> {
    block: Block,
    g_coeffs: I,
    moves: usize,
    tail: Option<RationalQuotients>,
}

impl<I: Iterator<Item = (BigInt, BigInt)>> Simplified<I> {
    /// Start from a block that already consumed some of the coefficients
    pub fn new(block: Block, g_coeffs: I) -> Self {
        Simplified {
            block,
            g_coeffs,
            moves: 0,
            tail: None,
        }
    }
}

impl<I: Iterator<Item = (BigInt, BigInt)>> Iterator for Simplified<I> {
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
                Err(()) => match self.g_coeffs.next() {
                    Some((a, b)) => {
                        self.block.gmove(&a, &b);
                        self.moves += 1;
                        if self.moves % REDUCE_PERIOD == 0 {
                            self.block.reduce_common();
                        }
                    }
                    None => {
                        // the latest convergent is the exact value
                        let (p, q) = self.block.convergent();
                        let mut tail = RationalQuotients::new(p.clone(), q.clone());
                        let result = tail.next();
                        self.tail = Some(tail);
                        break result;
                    }
                },
            }
        }
    }
}

/// Coefficients `(k^2, 2k+1)` of the generalized continued fraction
/// `4/pi = 1 + 1/(3 + 4/(5 + 9/(7 + 16/(9 + ...))))`, starting from `k = 4`
#[derive(Debug, Clone)]
pub(crate) struct PiCoefficients {
    a: BigInt, // consecutive squares
    b: BigInt, // consecutive odd integers
}

impl Iterator for PiCoefficients {
    type Item = (BigInt, BigInt);

    fn next(&mut self) -> Option<Self::Item> {
        let result = (self.a.clone(), self.b.clone());
        self.a += &self.b;
        self.b += 2u32;
        Some(result)
    }
}

/// Spigot generator of the partial quotients of pi
pub(crate) struct PiSpigot {
    started: bool,
    inner: Simplified<PiCoefficients>,
}

impl PiSpigot {
    pub fn new() -> Self {
        // The block after emitting 3 and consuming the coefficients up to k = 3,
        // both denominators are nonzero from here on
        let block = Block::new(51.into(), 6.into(), 7.into(), BigInt::one());
        let coeffs = PiCoefficients { a: 16.into(), b: 9.into() };
        PiSpigot {
            started: false,
            inner: Simplified::new(block, coeffs),
        }
    }
}

impl Iterator for PiSpigot {
    type Item = BigInt;

    fn next(&mut self) -> Option<BigInt> {
        if !self.started {
            self.started = true;
            return Some(BigInt::from(3));
        }
        self.inner.next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::ToPrimitive;

    fn finite(coeffs: &[(i64, i64)]) -> impl Iterator<Item = (BigInt, BigInt)> + '_ {
        coeffs.iter().map(|&(a, b)| (BigInt::from(a), BigInt::from(b)))
    }

    #[test]
    fn pi_test() {
        let pi: Vec<_> = PiSpigot::new().take(13).map(|v| v.to_i64().unwrap()).collect();
        assert_eq!(pi, vec![3, 7, 15, 1, 292, 1, 1, 1, 2, 1, 3, 1, 14]);
    }

    #[test]
    fn reduce_period_test() {
        // deep enough to pass several reductions
        let mut spigot = PiSpigot::new();
        let terms: Vec<_> = (&mut spigot).take(1000).collect();
        assert!(terms[1..].iter().all(|v| v >= &BigInt::one()));
        assert!(spigot.inner.moves > REDUCE_PERIOD);
    }

    #[test]
    fn simplify_test() {
        // 1 + 1/(2 + 1/3) = 10/7
        let s = Simplified::new(Block::identity(), finite(&[(1, 1), (1, 2), (1, 3)]));
        assert_eq!(s.collect::<Vec<_>>(), vec![BigInt::one(), BigInt::from(2), BigInt::from(3)]);

        // 1 + 2/(1 + 2/1) = 5/3 = [1; 1, 2]
        let s = Simplified::new(Block::identity(), finite(&[(1, 1), (2, 1), (2, 1)]));
        assert_eq!(s.collect::<Vec<_>>(), vec![BigInt::one(), BigInt::one(), BigInt::from(2)]);

        let empty = Simplified::new(Block::identity(), finite(&[]));
        assert_eq!(empty.count(), 0);
    }
}
