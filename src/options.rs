/// Nesting limit used by [`ParseOptions::default`].
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Configuration for [`parse_with`](crate::parse_with).
///
/// The defaults are lenient: the comma before an element is optional,
/// strings are kept exactly as written, and text after the root value is
/// ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    pub(crate) max_depth: usize,
    pub(crate) strict_commas: bool,
    pub(crate) unescape_strings: bool,
    pub(crate) allow_trailing: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            strict_commas: false,
            unescape_strings: false,
            allow_trailing: true,
        }
    }
}

impl ParseOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deepest allowed nesting of objects and arrays. The root container is
    /// at depth 1, so `0` only admits scalar documents.
    #[must_use]
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Require exactly one `,` between elements and reject trailing commas.
    #[must_use]
    pub fn strict_commas(mut self, strict: bool) -> Self {
        self.strict_commas = strict;
        self
    }

    /// Decode backslash escapes (including `\uXXXX` and surrogate pairs) in
    /// strings and object keys instead of keeping them verbatim.
    #[must_use]
    pub fn unescape_strings(mut self, unescape: bool) -> Self {
        self.unescape_strings = unescape;
        self
    }

    /// Whether non-whitespace text after the root value is ignored (`true`)
    /// or reported as an error (`false`).
    #[must_use]
    pub fn allow_trailing(mut self, allow: bool) -> Self {
        self.allow_trailing = allow;
        self
    }
}
