//! Directive scanner for conditional tokens.
//!
//! Produces a lazy, left-to-right stream of the directive tokens the filter
//! engine cares about: `\if<name>`, `\else` and `\fi`, each with its byte
//! span in the line. `\newif\if<name>` declarations are detected separately,
//! once per line, because a declaration line is handled atomically and never
//! scanned for conditional tokens.
//!
//! The alternation order `\if<name> | \else | \fi` matters: `\iffoo` must
//! lex as an `\if` token named `foo`, not as `\if` + garbage, while a word
//! like `\fine` lexes as `\fi` followed by literal `ne` (standard TeX does
//! the same; the engine's defined-name check keeps this harmless outside
//! open conditionals).

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DIRECTIVE_RE: Regex = Regex::new(r"\\if(\w+)|\\else|\\fi").unwrap();
    static ref NEWIF_RE: Regex = Regex::new(r"\\newif\\if(\w+)").unwrap();
}

/// The kind of a scanned directive token.
///
/// `Open` borrows the condition name from the scanned line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKind<'a> {
    /// `\if<name>`
    Open(&'a str),
    /// `\else`
    Else,
    /// `\fi`
    Close,
}

/// One directive token with its byte span in the scanned line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectiveToken<'a> {
    pub kind: DirectiveKind<'a>,
    pub start: usize,
    pub end: usize,
}

impl<'a> DirectiveToken<'a> {
    /// The literal source text of this token.
    pub fn text<'b>(&self, content: &'b str) -> &'b str {
        &content[self.start..self.end]
    }
}

/// Scan line content for directive tokens, lazily, in left-to-right order.
pub fn scan_directives(content: &str) -> impl Iterator<Item = DirectiveToken<'_>> + '_ {
    DIRECTIVE_RE.captures_iter(content).map(|caps| {
        let whole = caps.get(0).unwrap();
        let kind = match caps.get(1) {
            Some(name) => DirectiveKind::Open(name.as_str()),
            None if whole.as_str() == "\\else" => DirectiveKind::Else,
            None => DirectiveKind::Close,
        };
        DirectiveToken {
            kind,
            start: whole.start(),
            end: whole.end(),
        }
    })
}

/// Detect a `\newif\if<name>` declaration in line content.
///
/// Returns the declared condition name. The caller treats the whole line as
/// a declaration and must not scan it for conditional tokens.
pub fn newif_declaration(content: &str) -> Option<&str> {
    NEWIF_RE
        .captures(content)
        .map(|caps| caps.get(1).unwrap().as_str())
}
