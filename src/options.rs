//! Filtering options.

/// Options controlling a filter pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterOptions {
    /// Strip comment text, keeping only the line terminator so line counts
    /// are preserved.
    pub delete_comments: bool,
    /// Substitute `\input{file}` occurrences once, before filtering.
    ///
    /// Expansion needs a base directory to resolve references against, so it
    /// runs as a pre-pass driven by the caller (see
    /// [`expand_inputs_once`](crate::expand_inputs_once)); the filter
    /// functions themselves ignore this flag.
    pub expand_inputs: bool,
}
