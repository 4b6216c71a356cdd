//! The single-key substitution pass.
//!
//! A pass scans the text left to right for the literal token `@key` and
//! splices the value in at every hit. Matching is exact, case-sensitive and
//! has no trailing boundary check, so key `a` also matches the `@a` prefix
//! of `@ab`.

use tracing::warn;

use crate::error::InterpolateError;

/// The marker that introduces a token in a template.
pub const TOKEN_MARKER: char = '@';

/// Where the scan cursor resumes after a replacement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScanMode {
    /// Resume one character past the start of the replacement.
    ///
    /// Text inside the inserted value (after its first character) is scanned
    /// again, so a value that contains `@key` past its first character will
    /// keep matching. When the value is empty the character that followed the
    /// token is stepped over.
    #[default]
    Overlapping,
    /// Resume after the whole inserted value. Always terminates.
    SkipReplacement,
}

/// Builds the token text for `key`.
pub fn token_for(key: &str) -> String {
    let mut token = String::with_capacity(key.len() + 1);
    token.push(TOKEN_MARKER);
    token.push_str(key);
    token
}

/// Replaces every occurrence of `@key` in `text` with `value`, editing `text`
/// in place, and returns how many replacements were made.
///
/// With `limit: Some(n)` the pass fails once it would perform replacement
/// `n + 1`; `text` then holds the partially substituted result.
///
/// ## Errors
///
/// Returns [`InterpolateError::RunawaySubstitution`] when the limit is hit.
///
/// ## Examples
///
/// ```
/// use named_interpolator::{ScanMode, substitute};
///
/// let mut text = String::from("@x plus @x");
/// let count = substitute(&mut text, "x", "1", ScanMode::Overlapping, None).unwrap();
/// assert_eq!(text, "1 plus 1");
/// assert_eq!(count, 2);
/// ```
pub fn substitute(
    text: &mut String,
    key: &str,
    value: &str,
    mode: ScanMode,
    limit: Option<usize>,
) -> Result<usize, InterpolateError> {
    let token = token_for(key);
    let mut cursor = 0;
    let mut replacements = 0;

    while let Some(offset) = text[cursor..].find(&token) {
        if let Some(limit) = limit.filter(|limit| replacements >= *limit) {
            warn!(key, limit, "Replacement limit reached, aborting pass");
            return Err(InterpolateError::RunawaySubstitution {
                key: key.to_string(),
                limit,
            });
        }

        let position = cursor + offset;
        text.replace_range(position..position + token.len(), value);
        replacements += 1;

        cursor = match mode {
            ScanMode::Overlapping => match text[position..].chars().next() {
                Some(ch) => position + ch.len_utf8(),
                None => break,
            },
            ScanMode::SkipReplacement => position + value.len(),
        };
    }

    Ok(replacements)
}
