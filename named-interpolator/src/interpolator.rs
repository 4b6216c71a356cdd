//! The [`Interpolator`]: a fixed template plus an ordered set of parameters.
//!
//! Keys are resolved one at a time in insertion order. Each key's pass scans
//! the output of the passes before it, so a value may introduce a token for a
//! key registered *later* and have it resolved; a key is never revisited once
//! its pass has completed.
//!
//! ## Examples
//!
//! ```
//! use named_interpolator::Interpolator;
//!
//! let greeting = Interpolator::new("Hello @name!")
//!     .add_parameter("name", "World")
//!     .interpolate();
//! assert_eq!(greeting, "Hello World!");
//!
//! // A value can introduce a token for a later key
//! let chained = Interpolator::new("@a")
//!     .add_parameter("a", "@b")
//!     .add_parameter("b", "X")
//!     .interpolate();
//! assert_eq!(chained, "X");
//! ```

use std::fmt;

use tracing::{debug, instrument, trace};

use crate::error::InterpolateError;
use crate::parameters::Parameters;
use crate::substitute::{ScanMode, substitute};

/// Default per-pass bound used by [`Interpolator::try_interpolate`].
pub const DEFAULT_REPLACEMENT_LIMIT: usize = 10_000;

/// Replaces `@key` tokens in a template with registered values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpolator {
    template: String,
    parameters: Parameters,
    scan_mode: ScanMode,
    replacement_limit: usize,
}

impl Interpolator {
    /// Creates an interpolator over `template` with no parameters.
    ///
    /// The template is stored verbatim; templates without tokens are fine.
    pub fn new<T: Into<String>>(template: T) -> Self {
        Self {
            template: template.into(),
            parameters: Parameters::new(),
            scan_mode: ScanMode::default(),
            replacement_limit: DEFAULT_REPLACEMENT_LIMIT,
        }
    }

    /// Sets where a pass resumes scanning after each replacement.
    pub fn with_scan_mode(mut self, mode: ScanMode) -> Self {
        self.scan_mode = mode;
        self
    }

    /// Sets the per-pass replacement bound enforced by
    /// [`try_interpolate`](Self::try_interpolate).
    pub fn with_replacement_limit(mut self, limit: usize) -> Self {
        self.replacement_limit = limit;
        self
    }

    /// Registers `key -> value`, overwriting any previous value for `key`.
    ///
    /// `key` is given without the `@` marker. Empty keys and values are
    /// accepted; an empty key matches every bare `@`.
    pub fn add_parameter<K: Into<String>, V: Into<String>>(
        &mut self,
        key: K,
        value: V,
    ) -> &mut Self {
        let key = key.into();
        if let Some(previous) = self.parameters.insert(key.clone(), value) {
            debug!(key = %key, previous = %previous, "Overwrote interpolation parameter");
        }
        self
    }

    /// Registers every entry, in the iteration order of `entries`, merging
    /// into the existing parameters.
    ///
    /// ## Examples
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use named_interpolator::Interpolator;
    ///
    /// let mut values = BTreeMap::new();
    /// values.insert("first", "Ada");
    /// values.insert("last", "Lovelace");
    ///
    /// let text = Interpolator::new("@first @last")
    ///     .add_parameters(values)
    ///     .interpolate();
    /// assert_eq!(text, "Ada Lovelace");
    /// ```
    pub fn add_parameters<I, K, V>(&mut self, entries: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in entries {
            self.add_parameter(key, value);
        }
        self
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn scan_mode(&self) -> ScanMode {
        self.scan_mode
    }

    pub fn replacement_limit(&self) -> usize {
        self.replacement_limit
    }

    /// Produces the template with every registered token replaced.
    ///
    /// Unregistered tokens are left verbatim and unused keys are ignored.
    /// Neither the template nor the parameters change, so repeated calls give
    /// the same result.
    ///
    /// Under [`ScanMode::Overlapping`] a value that contains its own token
    /// after the first character (`k -> "x@k"`) never terminates; use
    /// [`try_interpolate`](Self::try_interpolate) or
    /// [`ScanMode::SkipReplacement`] when values are untrusted.
    #[instrument(level = "debug", skip(self), fields(keys = self.parameters.len()))]
    pub fn interpolate(&self) -> String {
        let mut text = self.template.clone();
        for (key, value) in &self.parameters {
            // an unbounded pass has no error path
            if let Ok(replaced) = substitute(&mut text, key, value, self.scan_mode, None) {
                trace!(key, replaced, "Completed key pass");
            }
        }
        text
    }

    /// Like [`interpolate`](Self::interpolate), but each key pass is bounded
    /// by the replacement limit.
    ///
    /// ## Errors
    ///
    /// Returns [`InterpolateError::RunawaySubstitution`] for the first key
    /// whose pass exceeds the limit.
    ///
    /// ## Examples
    ///
    /// ```
    /// use named_interpolator::{InterpolateError, Interpolator};
    ///
    /// let result = Interpolator::new("@k")
    ///     .with_replacement_limit(100)
    ///     .add_parameter("k", "x@k")
    ///     .try_interpolate();
    /// assert!(matches!(result, Err(InterpolateError::RunawaySubstitution { .. })));
    /// ```
    #[instrument(level = "debug", skip(self), fields(keys = self.parameters.len()))]
    pub fn try_interpolate(&self) -> Result<String, InterpolateError> {
        let mut text = self.template.clone();
        for (key, value) in &self.parameters {
            let replaced = substitute(
                &mut text,
                key,
                value,
                self.scan_mode,
                Some(self.replacement_limit),
            )?;
            trace!(key, replaced, "Completed key pass");
        }
        Ok(text)
    }
}

impl fmt::Display for Interpolator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.interpolate())
    }
}

impl From<&str> for Interpolator {
    fn from(template: &str) -> Self {
        Self::new(template)
    }
}

impl From<String> for Interpolator {
    fn from(template: String) -> Self {
        Self::new(template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stores_template_verbatim() {
        let interpolator = Interpolator::new("@@ weird @ template @");
        assert_eq!(interpolator.template(), "@@ weird @ template @");
        assert!(interpolator.parameters().is_empty());
        assert_eq!(interpolator.scan_mode(), ScanMode::Overlapping);
        assert_eq!(interpolator.replacement_limit(), DEFAULT_REPLACEMENT_LIMIT);
    }

    #[test]
    fn test_no_parameters_returns_template() {
        let interpolator = Interpolator::new("Hello @name!");
        assert_eq!(interpolator.interpolate(), "Hello @name!");
    }

    #[test]
    fn test_basic_substitution() {
        let mut interpolator = Interpolator::new("Hello @name!");
        interpolator.add_parameter("name", "World");
        assert_eq!(interpolator.interpolate(), "Hello World!");
    }

    #[test]
    fn test_add_parameter_overwrites_value() {
        let mut interpolator = Interpolator::new("@a");
        interpolator.add_parameter("a", "1").add_parameter("a", "2");
        assert_eq!(interpolator.parameters().len(), 1);
        assert_eq!(interpolator.interpolate(), "2");
    }

    #[test]
    fn test_overwrite_keeps_original_key_order() {
        // "a" stays first, so its value's "@b" is still resolved by "b"
        let mut interpolator = Interpolator::new("@a");
        interpolator
            .add_parameter("a", "@b")
            .add_parameter("b", "X")
            .add_parameter("a", "[@b]");
        assert_eq!(interpolator.interpolate(), "[X]");
    }

    #[test]
    fn test_earlier_key_is_not_revisited() {
        // "b" reintroduces "@a" after the "a" pass has finished
        let mut interpolator = Interpolator::new("@a @b");
        interpolator.add_parameter("a", "1").add_parameter("b", "@a");
        assert_eq!(interpolator.interpolate(), "1 @a");
    }

    #[test]
    fn test_add_parameters_follows_entry_order() {
        let mut interpolator = Interpolator::new("@a");
        interpolator.add_parameters(vec![("a", "@b"), ("b", "X")]);
        assert_eq!(interpolator.interpolate(), "X");

        let mut reversed = Interpolator::new("@a");
        reversed.add_parameters(vec![("b", "X"), ("a", "@b")]);
        assert_eq!(reversed.interpolate(), "@b");
    }

    #[test]
    fn test_add_parameters_merges() {
        let mut interpolator = Interpolator::new("@a @b @c");
        interpolator
            .add_parameter("a", "1")
            .add_parameters([("b", "2"), ("a", "3")])
            .add_parameters([("c".to_string(), "4".to_string())]);
        assert_eq!(interpolator.interpolate(), "3 2 4");
    }

    #[test]
    fn test_interpolate_is_repeatable() {
        let mut interpolator = Interpolator::new("@x-@y");
        interpolator.add_parameter("x", "1").add_parameter("y", "2");
        let before = interpolator.clone();

        let first = interpolator.interpolate();
        let second = interpolator.interpolate();
        assert_eq!(first, "1-2");
        assert_eq!(first, second);
        assert_eq!(interpolator, before);
    }

    #[test]
    fn test_interpolate_reflects_later_changes() {
        let mut interpolator = Interpolator::new("@x");
        interpolator.add_parameter("x", "1");
        assert_eq!(interpolator.interpolate(), "1");
        interpolator.add_parameter("x", "2");
        assert_eq!(interpolator.interpolate(), "2");
    }

    #[test]
    fn test_skip_replacement_mode() {
        let mut interpolator = Interpolator::new("@k@k").with_scan_mode(ScanMode::SkipReplacement);
        interpolator.add_parameter("k", "");
        assert_eq!(interpolator.interpolate(), "");
    }

    #[test]
    fn test_try_interpolate_matches_interpolate() {
        let mut interpolator = Interpolator::new("@a and @b");
        interpolator.add_parameter("a", "@b").add_parameter("b", "B");
        assert_eq!(
            interpolator.try_interpolate().unwrap(),
            interpolator.interpolate()
        );
    }

    #[test]
    fn test_try_interpolate_reports_runaway_key() {
        let mut interpolator = Interpolator::new("@ok @k").with_replacement_limit(10);
        interpolator.add_parameter("ok", "fine").add_parameter("k", "x@k");

        let err = interpolator.try_interpolate().unwrap_err();
        assert_eq!(
            err,
            InterpolateError::RunawaySubstitution {
                key: "k".to_string(),
                limit: 10
            }
        );
        assert_eq!(
            err.to_string(),
            "substitution of '@k' exceeded 10 replacements in a single pass"
        );
    }

    #[test]
    fn test_display_renders_interpolation() {
        let mut interpolator = Interpolator::from("Hi @who");
        interpolator.add_parameter("who", "there");
        assert_eq!(format!("{interpolator}"), "Hi there");
        assert_eq!(interpolator.to_string(), "Hi there");
    }

    #[test]
    fn test_from_string() {
        let interpolator = Interpolator::from(String::from("@x"));
        assert_eq!(interpolator.template(), "@x");
    }

    #[test]
    #[tracing_test::traced_test]
    fn test_overwrite_is_logged() {
        let mut interpolator = Interpolator::new("@a");
        interpolator.add_parameter("a", "1").add_parameter("a", "2");
        assert!(logs_contain("Overwrote interpolation parameter"));
    }

    #[test]
    #[tracing_test::traced_test]
    fn test_key_passes_are_traced() {
        let mut interpolator = Interpolator::new("@a");
        interpolator.add_parameter("a", "1");
        let _ = interpolator.interpolate();
        assert!(logs_contain("Completed key pass"));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_passthrough_without_tokens(
                template in "[^@]*",
                entries in prop::collection::vec(("[a-z]{1,5}", "\\PC{0,8}"), 0..5),
            ) {
                let mut interpolator = Interpolator::new(template.clone());
                interpolator.add_parameters(entries);
                prop_assert_eq!(interpolator.interpolate(), template);
            }

            #[test]
            fn prop_interpolate_is_idempotent(
                template in "[a-c@ ]{0,30}",
                entries in prop::collection::vec(("[a-c]{1,2}", "[a-c ]{0,4}"), 0..4),
            ) {
                let mut interpolator = Interpolator::new(template);
                interpolator.add_parameters(entries);
                let snapshot = interpolator.clone();
                let first = interpolator.interpolate();
                let second = interpolator.interpolate();
                prop_assert_eq!(first, second);
                prop_assert_eq!(interpolator, snapshot);
            }
        }
    }
}
