//! Ifstrip - conditional compilation for LaTeX sources.
//!
//! Scans a document for hand-rolled conditional directives (`\newif`,
//! `\if<name>`, `\else`, `\fi`) and, given a caller-supplied set of named
//! conditions, deletes the chosen branch of each matching conditional while
//! leaving unmatched conditionals and all surrounding text untouched.
//!
//! ```
//! use ifstrip::{filter_latex, Condition, ConditionSet};
//!
//! let doc = "\\newif\\ifdraft\n\\ifdraft DRAFT\\else FINAL\\fi\n";
//! let conditions: ConditionSet = [Condition::new("draft", true)].into_iter().collect();
//! assert_eq!(filter_latex(doc, &conditions).unwrap(), "\\newif\\ifdraft\n FINAL\n");
//! ```
//!
//! Only names declared via `\newif\if<name>` are treated as conditionals;
//! `\if<name>` tokens with undeclared names (LaTeX built-ins, mostly) pass
//! through as literal text. Unbalanced `\else`/`\fi` aborts the pass with
//! [`FilterError::MalformedNesting`].

pub mod core;
pub mod options;
pub mod report;
pub mod utils;

use std::path::Path;

pub use crate::core::conditions::{Condition, ConditionSet};
pub use crate::core::engine::{filter_document, filter_document_with_report, FilterEngine};
pub use crate::core::scanner::{newif_declaration, scan_directives, DirectiveKind, DirectiveToken};
pub use crate::options::FilterOptions;
pub use crate::report::{FilterOutcome, FilterReport};
pub use crate::utils::error::{FilterError, FilterResult};

/// Filter a document with default options.
pub fn filter_latex(input: &str, conditions: &ConditionSet) -> FilterResult<String> {
    filter_document(input, conditions, &FilterOptions::default())
}

/// Filter a document with explicit options.
pub fn filter_latex_with_options(
    input: &str,
    conditions: &ConditionSet,
    options: &FilterOptions,
) -> FilterResult<String> {
    filter_document(input, conditions, options)
}

/// Filter a document and report what the pass did.
pub fn filter_latex_with_report(
    input: &str,
    conditions: &ConditionSet,
    options: &FilterOptions,
) -> FilterResult<FilterOutcome> {
    let (content, report) = filter_document_with_report(input, conditions, options)?;
    Ok(FilterOutcome::new(content, report))
}

/// Substitute `\input{file}` occurrences once, before filtering.
///
/// See [`core::expand::expand_inputs_once`].
pub fn expand_inputs_once(input: &str, base_dir: &Path) -> FilterResult<String> {
    core::expand::expand_inputs_once(input, base_dir)
}
