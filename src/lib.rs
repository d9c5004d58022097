//! Exact real arithmetic on lazily evaluated regular continued fractions.
//!
//! ```
//! use num_contfrac::{symbols::e, ContinuedFraction};
//!
//! let x = ContinuedFraction::from(2).sqrt().unwrap();
//! assert!(&x * &x == 2);
//! assert!(e().to_string().starts_with("2.71828182845904523536"));
//! ```

mod cont_frac;
pub mod error;
pub mod float;
mod funcs;
pub mod settings;
pub mod symbols;
pub mod traits;

pub use cont_frac::{ContinuedFraction, Convergents, Digits};
pub use error::{DomainError, Result};
pub use float::Extended;
pub use funcs::misc::{isinf, isnan};
pub use settings::Settings;
pub use traits::{Approximation, PartialQuotients, RationalApproximation};
