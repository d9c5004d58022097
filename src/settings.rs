//! Tunable parameters of the heuristics and the formatting.
//!
//! The settings are held in one process-wide instance, which [scoped] can
//! replace for the current thread. They are read when an operation produces
//! its partial quotients (or formats a string), so changing them affects
//! values created before the change as well.

use num_bigint::BigInt;
use std::cell::RefCell;
use std::sync::{OnceLock, RwLock};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Number of stalled iterations after which a bihomographic operation
    /// decides that its result is rational. Comparison gives up after half
    /// of this number of equal partial quotients. `None` never gives up,
    /// which may hang on a rational result of irrational operands.
    ///
    /// With 100 iterations the tail left out has an expected accuracy
    /// somewhere between 1e-32 and 1e-31, so the probability of a wrong cut
    /// is about 1.5e-31 per partial quotient (Gauss-Kuzmin).
    pub max_iters: Option<usize>,

    /// Square root, exponential and tangent decide that their result is
    /// rational when the two bracketing approximations differ by one in the
    /// next partial quotient and the following one would reach this bound.
    /// `None` disables the detection.
    pub max_quotient: Option<BigInt>,

    /// Number of digits after the decimal point in `Display`
    pub decimal_digits: usize,

    /// Scientific notation is used for numbers below `10^-threshold`.
    /// `None` disables scientific notation.
    pub scientific_threshold: Option<usize>,

    /// Number of partial quotients shown by `Debug`
    pub debug_quotients: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            max_iters: Some(100),
            max_quotient: Some(BigInt::from(10u8).pow(31u32)),
            decimal_digits: 28,
            scientific_threshold: Some(4),
            debug_quotients: 17,
        }
    }
}

fn global() -> &'static RwLock<Settings> {
    static SETTINGS: OnceLock<RwLock<Settings>> = OnceLock::new();
    SETTINGS.get_or_init(|| RwLock::new(Settings::default()))
}

thread_local! {
    static SCOPED: RefCell<Option<Settings>> = RefCell::new(None);
}

fn read<T, F: FnOnce(&Settings) -> T>(f: F) -> T {
    SCOPED.with(|scoped| match &*scoped.borrow() {
        Some(settings) => f(settings),
        None => match global().read() {
            Ok(guard) => f(&guard),
            Err(poisoned) => f(&poisoned.into_inner()),
        },
    })
}

/// Get a snapshot of the current settings
pub fn get() -> Settings {
    read(Settings::clone)
}

/// Replace the current settings
pub fn set(settings: Settings) {
    update(|s| *s = settings);
}

/// Modify the current settings in place
pub fn update<F: FnOnce(&mut Settings)>(f: F) {
    SCOPED.with(|scoped| match &mut *scoped.borrow_mut() {
        Some(settings) => f(settings),
        None => {
            let mut guard = match global().write() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            f(&mut guard);
        }
    })
}

/// Run `f` with `settings` in place of the process-wide ones on the current
/// thread. Within `f`, [set] and [update] change these settings only. The
/// previous settings are restored when `f` returns or panics.
///
/// Only partial quotients computed inside `f` see these settings.
pub fn scoped<T, F: FnOnce() -> T>(settings: Settings, f: F) -> T {
    struct Restore(Option<Settings>);

    impl Drop for Restore {
        fn drop(&mut self) {
            let previous = self.0.take();
            SCOPED.with(|scoped| *scoped.borrow_mut() = previous);
        }
    }

    let _restore = Restore(SCOPED.with(|scoped| scoped.replace(Some(settings))));
    f()
}

pub(crate) fn max_iters() -> Option<usize> {
    read(|s| s.max_iters)
}

pub(crate) fn max_quotient() -> Option<BigInt> {
    read(|s| s.max_quotient.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::{e, pi};
    use crate::traits::Approximation;
    use crate::cont_frac::quotients;
    use crate::ContinuedFraction;
    use core::cmp::Ordering;

    #[test]
    fn default_test() {
        let s = Settings::default();
        assert_eq!(s.max_iters, Some(100));
        assert_eq!(s.max_quotient, Some("10000000000000000000000000000000".parse().unwrap()));
        assert_eq!(s.decimal_digits, 28);
        assert_eq!(s.scientific_threshold, Some(4));
        assert_eq!(s.debug_quotients, 17);
    }

    #[test]
    fn scoped_test() {
        let before = get();
        scoped(Settings::default(), || {
            update(|s| s.decimal_digits = 5);
            assert_eq!(get().decimal_digits, 5);
            assert_eq!(e().to_string(), "2.71828");

            set(Settings { debug_quotients: 3, ..Settings::default() });
            assert_eq!(format!("{:?}", e()), "[2; 1, 2, ..]");
            assert_eq!(e().to_string(), "2.7182818284590452353602874713");

            // nested scopes restore the enclosing one
            scoped(Settings { scientific_threshold: None, ..get() }, || {
                assert_eq!(ContinuedFraction::ratio(1, 100000).to_string(), "0.00001");
            });
            assert_eq!(get().debug_quotients, 3);
            assert_eq!(ContinuedFraction::ratio(1, 100000).to_string(), "1e-5");
        });
        assert_eq!(get(), before);

        let result = std::panic::catch_unwind(|| {
            scoped(Settings { decimal_digits: 1, ..Settings::default() }, || panic!("inside the scope"))
        });
        assert!(result.is_err());
        assert_eq!(get(), before);
    }

    #[test]
    fn unbounded_test() {
        scoped(Settings { max_iters: None, ..Settings::default() }, || {
            assert_eq!(max_iters(), None);
            let half = ContinuedFraction::ratio(1, 2);
            assert_eq!(
                half.compare(&ContinuedFraction::ratio(2, 4)),
                Some(Approximation::Exact(Ordering::Equal))
            );
            assert_eq!(e().compare(&pi()), Some(Approximation::Exact(Ordering::Less)));
            assert!(ContinuedFraction::ratio(1, 3) + ContinuedFraction::ratio(1, 6) == half);
            // 2e = [5; 2, 3, 2, 3, 1, 2, 1, 3, 4, 3]
            assert_eq!(quotients(&(e() + e()), 11), vec![5, 2, 3, 2, 3, 1, 2, 1, 3, 4, 3]);
        });
    }

    #[test]
    fn compare_cutoff_test() {
        // e and e + 10^-20 first differ at the partial quotient 24
        let x = e() + ContinuedFraction::ratio(1, BigInt::from(10u8).pow(20u32));
        scoped(Settings { max_iters: Some(40), ..Settings::default() }, || {
            assert_eq!(e().compare(&x), Some(Approximation::Approximated(Ordering::Equal)));
            assert!(e() == x);
        });
        scoped(Settings { max_iters: Some(50), ..Settings::default() }, || {
            assert_eq!(e().compare(&x), Some(Approximation::Exact(Ordering::Less)));
        });
        scoped(Settings { max_iters: Some(1), ..Settings::default() }, || {
            assert_eq!(e().compare(&pi()), Some(Approximation::Approximated(Ordering::Equal)));
        });
        assert_eq!(e().compare(&x), Some(Approximation::Exact(Ordering::Less)));
    }
}
