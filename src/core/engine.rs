//! The conditional filter engine.
//!
//! A `FilterEngine` consumes a document line by line and decides, for every
//! character range, whether it is copied to the output. It owns the whole
//! scan state:
//! - the scope stack of currently open recognized conditionals and which
//!   branch of each is active,
//! - the suppression depth (0 means emitting, >0 means suppressing; a depth
//!   rather than a flag because nested matched conditionals each push their
//!   own reason to keep suppressing),
//! - the set of names declared via `\newif\if<name>` so far.
//!
//! Only names seen in a `\newif` declaration are recognized as conditionals.
//! An `\if<name>` with an undeclared name never opens a scope and passes
//! through as literal text; LaTeX's built-in conditionals are routinely used
//! without an explicit `\newif` in the sources we filter.
//!
//! All suppression decisions resolve within a single line, so output
//! accumulates in a per-line buffer that is flushed (or dropped) before the
//! next line is read.

use fxhash::FxHashSet;

use crate::core::comment::split_comment;
use crate::core::conditions::ConditionSet;
use crate::core::scanner::{newif_declaration, scan_directives, DirectiveKind, DirectiveToken};
use crate::options::FilterOptions;
use crate::report::FilterReport;
use crate::utils::error::{FilterError, FilterResult};

/// Which branch of an open conditional the scan is currently inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Branch {
    If,
    Else,
}

/// One currently open recognized conditional.
#[derive(Debug, Clone)]
struct ScopeFrame {
    name: String,
    branch: Branch,
}

/// The stateful filter. One engine per document pass; nothing crosses
/// document boundaries.
pub struct FilterEngine<'a> {
    conditions: &'a ConditionSet,
    delete_comments: bool,
    scope: Vec<ScopeFrame>,
    depth: usize,
    defined: FxHashSet<String>,
    line_number: usize,
    report: FilterReport,
}

impl<'a> FilterEngine<'a> {
    pub fn new(conditions: &'a ConditionSet, options: &FilterOptions) -> Self {
        Self {
            conditions,
            delete_comments: options.delete_comments,
            scope: Vec::new(),
            depth: 0,
            defined: FxHashSet::default(),
            line_number: 0,
            report: FilterReport::default(),
        }
    }

    /// Process one source line (terminator included) and append whatever
    /// survives filtering to `out`.
    pub fn filter_line(&mut self, raw: &str, out: &mut String) -> FilterResult<()> {
        self.line_number += 1;
        self.report.lines_in += 1;

        // Blank source lines pass through untouched while emitting; they
        // carry paragraph breaks and must never be scanned or reflowed.
        if self.depth == 0 && raw.trim().is_empty() {
            out.push_str(raw);
            self.report.lines_out += 1;
            return Ok(());
        }

        let (content, comment) = split_comment(raw);

        // A declaration line is handled atomically: register the name, then
        // emit or drop the whole line on the current suppression state.
        if let Some(name) = newif_declaration(content) {
            self.defined.insert(name.to_string());
            self.report.declarations_seen += 1;
            if self.depth == 0 {
                out.push_str(content);
                self.emit_comment(comment, out);
                self.report.lines_out += 1;
            } else {
                self.report.lines_dropped += 1;
            }
            return Ok(());
        }

        let mut buf = String::with_capacity(raw.len());
        let mut cursor = 0;
        for token in scan_directives(content) {
            // The prefix before the token is judged on the suppression state
            // *before* this token's transition takes effect.
            if self.depth == 0 {
                buf.push_str(&content[cursor..token.start]);
            }
            cursor = token.end;
            self.apply_token(&token, content, raw, &mut buf)?;
        }

        let comment_visible = self.depth == 0 && !comment.is_empty();
        if self.depth == 0 {
            buf.push_str(&content[cursor..]);
        }

        // A line that lost all its visible text to filtering is dropped
        // whole; emitting it would introduce a paragraph break the source
        // never had. A surviving comment counts as visible even when comment
        // deletion will strip its text, so line counts stay stable.
        if buf.trim().is_empty() && !comment_visible {
            self.report.lines_dropped += 1;
            return Ok(());
        }

        out.push_str(&buf);
        if comment_visible {
            self.emit_comment(comment, out);
        }
        self.report.lines_out += 1;
        Ok(())
    }

    /// Apply one directive token: emit it literally if it is not consumed,
    /// and update the scope stack and suppression depth.
    fn apply_token(
        &mut self,
        token: &DirectiveToken<'_>,
        content: &str,
        raw: &str,
        buf: &mut String,
    ) -> FilterResult<()> {
        match token.kind {
            DirectiveKind::Open(name) => {
                if !self.defined.contains(name) {
                    // Undeclared name: not a conditional, just text.
                    if self.depth == 0 {
                        buf.push_str(token.text(content));
                    }
                    return Ok(());
                }
                self.scope.push(ScopeFrame {
                    name: name.to_string(),
                    branch: Branch::If,
                });
                match self.conditions.lookup(name) {
                    None => {
                        if self.depth == 0 {
                            buf.push_str(token.text(content));
                        }
                    }
                    Some(c) => {
                        // Matched directives are always consumed, whichever
                        // branch they gate.
                        self.report.note_removed(name);
                        if c.suppress_if_branch {
                            self.depth += 1;
                        }
                    }
                }
            }
            DirectiveKind::Else => {
                let Some(frame) = self.scope.last_mut() else {
                    return Err(self.malformed("\\else", raw));
                };
                let from_if = frame.branch == Branch::If;
                frame.branch = Branch::Else;
                let name = frame.name.clone();
                match self.conditions.lookup(&name) {
                    None => {
                        if self.depth == 0 {
                            buf.push_str(token.text(content));
                        }
                    }
                    Some(c) => {
                        self.report.note_removed(&name);
                        // Depth only moves on the genuine if->else transition;
                        // a stray second \else on the same frame changes nothing.
                        if from_if {
                            if c.suppress_if_branch {
                                self.depth -= 1;
                            } else {
                                self.depth += 1;
                            }
                        }
                    }
                }
            }
            DirectiveKind::Close => {
                let Some(frame) = self.scope.pop() else {
                    return Err(self.malformed("\\fi", raw));
                };
                match self.conditions.lookup(&frame.name) {
                    None => {
                        if self.depth == 0 {
                            buf.push_str(token.text(content));
                        }
                    }
                    Some(c) => {
                        self.report.note_removed(&frame.name);
                        let closing_suppressed = match frame.branch {
                            Branch::If => c.suppress_if_branch,
                            Branch::Else => !c.suppress_if_branch,
                        };
                        if closing_suppressed {
                            self.depth -= 1;
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Emit a (non-empty) comment suffix, honoring comment-deletion mode:
    /// the comment text vanishes but its line terminator survives, so line
    /// counts are preserved.
    fn emit_comment(&self, comment: &str, out: &mut String) {
        if comment.is_empty() {
            return;
        }
        if self.delete_comments {
            if comment.ends_with("\r\n") {
                out.push_str("\r\n");
            } else if comment.ends_with('\n') {
                out.push('\n');
            }
        } else {
            out.push_str(comment);
        }
    }

    fn malformed(&self, directive: &str, raw: &str) -> FilterError {
        FilterError::MalformedNesting {
            directive: directive.to_string(),
            line_number: self.line_number,
            line: raw.trim_end().to_string(),
        }
    }

    /// Finish the pass and hand back the accumulated report.
    ///
    /// Conditionals left open at end of input are not an error; only an
    /// `\else`/`\fi` with no open scope is.
    pub fn finish(self) -> FilterReport {
        self.report
    }
}

/// Filter a whole document held in memory, discarding the report.
pub fn filter_document(
    input: &str,
    conditions: &ConditionSet,
    options: &FilterOptions,
) -> FilterResult<String> {
    let mut engine = FilterEngine::new(conditions, options);
    let mut out = String::with_capacity(input.len());
    for line in input.split_inclusive('\n') {
        engine.filter_line(line, &mut out)?;
    }
    Ok(out)
}

/// Filter a whole document and also return the pass report.
pub fn filter_document_with_report(
    input: &str,
    conditions: &ConditionSet,
    options: &FilterOptions,
) -> FilterResult<(String, FilterReport)> {
    let mut engine = FilterEngine::new(conditions, options);
    let mut out = String::with_capacity(input.len());
    for line in input.split_inclusive('\n') {
        engine.filter_line(line, &mut out)?;
    }
    Ok((out, engine.finish()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::conditions::Condition;

    fn conditions(pairs: &[(&str, bool)]) -> ConditionSet {
        pairs
            .iter()
            .map(|(name, polarity)| Condition::new(*name, *polarity))
            .collect()
    }

    fn run(input: &str, pairs: &[(&str, bool)]) -> String {
        filter_document(input, &conditions(pairs), &FilterOptions::default()).unwrap()
    }

    #[test]
    fn test_identity_when_nothing_matches() {
        let doc = "\\newif\\iffoo\ntext\n\\iffoo A\\else B\\fi\n";
        assert_eq!(run(doc, &[]), doc);
    }

    #[test]
    fn test_suppress_if_branch() {
        let doc = "\\newif\\iffoo\n\\iffoo A\\else B\\fi\n";
        assert_eq!(run(doc, &[("foo", true)]), "\\newif\\iffoo\n B\n");
    }

    #[test]
    fn test_suppress_else_branch() {
        let doc = "\\newif\\iffoo\n\\iffoo A\\else B\\fi\n";
        assert_eq!(run(doc, &[("foo", false)]), "\\newif\\iffoo\n A\n");
    }

    #[test]
    fn test_undeclared_if_passes_through() {
        // \ifdim was never declared, so the token is literal text even when a
        // condition of that name is supplied. Its \fi belongs to a recognized
        // outer scope, which here is the kept branch of \ifouter.
        let doc = "\\newif\\ifouter\n\\ifouter\\ifdim\\wd0>0pt x\n\\fi\n";
        assert_eq!(run(doc, &[("dim", true)]), doc);
        assert_eq!(
            run(doc, &[("outer", false), ("dim", true)]),
            "\\newif\\ifouter\n\\ifdim\\wd0>0pt x\n"
        );
    }

    #[test]
    fn test_declaration_registers_inside_suppressed_region() {
        // The inner \newif line is suppressed but its name is still
        // registered, so the later \ifinner is recognized (and unmatched,
        // hence preserved).
        let doc = "\\newif\\iffoo\n\\iffoo\n\\newif\\ifinner\n\\fi\n\\ifinner x\\fi\n";
        let got = run(doc, &[("foo", true)]);
        assert_eq!(got, "\\newif\\iffoo\n\\ifinner x\\fi\n");
    }

    #[test]
    fn test_nested_outer_suppression_wins() {
        let doc = "\\newif\\ifouter\n\\newif\\ifinner\n\
                   \\ifouter X \\ifinner Y \\fi Z \\fi\nrest\n";
        let got = run(doc, &[("outer", true), ("inner", false)]);
        assert_eq!(got, "\\newif\\ifouter\n\\newif\\ifinner\nrest\n");
    }

    #[test]
    fn test_nested_inner_filtered_inside_kept_branch() {
        let doc = "\\newif\\ifouter\n\\newif\\ifinner\n\
                   \\ifouter X \\ifinner Y\\else Z\\fi W\\fi\n";
        let got = run(doc, &[("outer", false), ("inner", true)]);
        assert_eq!(got, "\\newif\\ifouter\n\\newif\\ifinner\n X  Z W\n");
    }

    #[test]
    fn test_multi_line_branches() {
        let doc = "\\newif\\ifshort\n\\ifshort\nbrief\n\\else\nlong one\nlong two\n\\fi\n";
        assert_eq!(
            run(doc, &[("short", true)]),
            "\\newif\\ifshort\nlong one\nlong two\n"
        );
        assert_eq!(run(doc, &[("short", false)]), "\\newif\\ifshort\nbrief\n");
    }

    #[test]
    fn test_line_emptied_by_filtering_is_dropped() {
        let doc = "\\newif\\iffoo\nbefore\n\\iffoo\\fi\nafter\n";
        assert_eq!(
            run(doc, &[("foo", true)]),
            "\\newif\\iffoo\nbefore\nafter\n"
        );
        assert_eq!(
            run(doc, &[("foo", false)]),
            "\\newif\\iffoo\nbefore\nafter\n"
        );
    }

    #[test]
    fn test_blank_line_passes_through() {
        let doc = "\\newif\\iffoo\na\n\nb\n";
        assert_eq!(run(doc, &[("foo", true)]), doc);
    }

    #[test]
    fn test_blank_line_inside_suppressed_branch_vanishes() {
        let doc = "\\newif\\iffoo\n\\iffoo\nA\n\nB\n\\fi\nrest\n";
        assert_eq!(run(doc, &[("foo", true)]), "\\newif\\iffoo\nrest\n");
    }

    #[test]
    fn test_unbalanced_fi_is_fatal() {
        let err = filter_document("\\fi\n", &conditions(&[]), &FilterOptions::default())
            .unwrap_err();
        match err {
            FilterError::MalformedNesting {
                directive,
                line_number,
                ..
            } => {
                assert_eq!(directive, "\\fi");
                assert_eq!(line_number, 1);
            }
            other => panic!("expected MalformedNesting, got {:?}", other),
        }
    }

    #[test]
    fn test_unbalanced_else_is_fatal() {
        let err = filter_document("a\\else b\n", &conditions(&[]), &FilterOptions::default())
            .unwrap_err();
        assert!(matches!(err, FilterError::MalformedNesting { .. }));
    }

    #[test]
    fn test_unclosed_conditional_at_eof_is_not_an_error() {
        let doc = "\\newif\\iffoo\n\\iffoo\ntail\n";
        assert_eq!(run(doc, &[]), doc);
    }

    #[test]
    fn test_duplicate_condition_first_wins() {
        let doc = "\\newif\\iffoo\n\\iffoo A\\else B\\fi\n";
        assert_eq!(
            run(doc, &[("foo", true), ("foo", false)]),
            run(doc, &[("foo", true)])
        );
    }

    #[test]
    fn test_comment_deletion_keeps_line_terminator() {
        let doc = "text % note\n% whole line comment\ncode\n";
        let got = filter_document(
            doc,
            &conditions(&[]),
            &FilterOptions {
                delete_comments: true,
                ..FilterOptions::default()
            },
        )
        .unwrap();
        assert_eq!(got, "text \n\ncode\n");
    }

    #[test]
    fn test_comment_dropped_when_line_is_suppressed() {
        let doc = "\\newif\\iffoo\n\\iffoo\nhidden % gone too\n\\fi\nrest\n";
        assert_eq!(run(doc, &[("foo", true)]), "\\newif\\iffoo\nrest\n");
    }

    #[test]
    fn test_report_counters() {
        let doc = "\\newif\\iffoo\n\\iffoo\nA\n\\else\nB\n\\fi\n";
        let (out, report) = filter_document_with_report(
            doc,
            &conditions(&[("foo", true)]),
            &FilterOptions::default(),
        )
        .unwrap();
        assert_eq!(out, "\\newif\\iffoo\nB\n");
        assert_eq!(report.lines_in, 6);
        assert_eq!(report.lines_out, 2);
        assert_eq!(report.lines_dropped, 4);
        assert_eq!(report.declarations_seen, 1);
        assert_eq!(report.directives_removed, 3);
        assert_eq!(report.matched_conditions, vec!["foo".to_string()]);
    }
}
