use thiserror::Error;

/// Errors raised by the guarded interpolation path
/// ([`Interpolator::try_interpolate`](crate::Interpolator::try_interpolate)).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterpolateError {
    /// A single key pass kept finding its own token, usually because the
    /// value re-introduces `@key` after its first character.
    #[error("substitution of '@{key}' exceeded {limit} replacements in a single pass")]
    RunawaySubstitution { key: String, limit: usize },
}
