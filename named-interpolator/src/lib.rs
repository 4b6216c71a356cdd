//! Named-placeholder interpolation for short strings.
//!
//! A template carries tokens of the form `@key`; an [`Interpolator`] swaps
//! each token for the value registered under `key`. There is no escaping,
//! no boundary check and no validation: unregistered tokens stay as written
//! and unused keys are ignored.
//!
//! ## Modules
//!
//! - [`mod@interpolator`] - The [`Interpolator`] and its fluent API
//! - [`mod@parameters`] - Insertion-ordered [`Parameters`] mapping
//! - [`mod@substitute`] - The single-key [`substitute`] pass and [`ScanMode`]
//! - [`mod@error`] - [`InterpolateError`]
//!
//! ## Examples
//!
//! ```
//! use named_interpolator::Interpolator;
//!
//! let text = Interpolator::new("@x plus @x equals @y")
//!     .add_parameters([("x", "1"), ("y", "2")])
//!     .interpolate();
//! assert_eq!(text, "1 plus 1 equals 2");
//! ```

pub mod error;
pub mod interpolator;
pub mod parameters;
pub mod substitute;

pub use error::InterpolateError;
pub use interpolator::{DEFAULT_REPLACEMENT_LIMIT, Interpolator};
pub use parameters::Parameters;
pub use substitute::{ScanMode, TOKEN_MARKER, substitute, token_for};
