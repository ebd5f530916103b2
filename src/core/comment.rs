//! Comment splitting for LaTeX source lines.
//!
//! A `%` starts a comment only when it is not escaped. Escaping is decided by
//! the parity of the backslash run immediately before it: `\%` is a literal
//! percent, `\\%` is a line break followed by a live comment, `\\\%` is a
//! line break followed by a literal percent, and so on.

/// Split one line into `(content, comment)` at the first live `%`.
///
/// The comment suffix includes the `%` itself and the line terminator, so
/// `content + comment` always reconstructs the original line. If the line has
/// no live comment marker, the comment suffix is empty.
///
/// Single pass over the bytes; `%` and `\` are ASCII, so splitting at the
/// matched byte index always lands on a char boundary.
pub fn split_comment(line: &str) -> (&str, &str) {
    let bytes = line.as_bytes();
    let mut escape_run = 0usize;
    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'\\' => escape_run += 1,
            b'%' => {
                if escape_run % 2 == 0 {
                    return line.split_at(i);
                }
                escape_run = 0;
            }
            _ => escape_run = 0,
        }
    }
    (line, "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_comment() {
        assert_eq!(split_comment("plain text\n"), ("plain text\n", ""));
    }

    #[test]
    fn test_simple_comment() {
        assert_eq!(split_comment("code % note\n"), ("code ", "% note\n"));
    }

    #[test]
    fn test_comment_at_line_start() {
        assert_eq!(split_comment("% all comment\n"), ("", "% all comment\n"));
    }

    #[test]
    fn test_escaped_percent_is_not_a_comment() {
        assert_eq!(
            split_comment("100\\% done % real comment"),
            ("100\\% done ", "% real comment")
        );
    }

    #[test]
    fn test_escape_run_parity() {
        // \\% : the backslashes form a \\ control sequence, the % is live
        assert_eq!(split_comment("a\\\\% c"), ("a\\\\", "% c"));
        // \\\% : literal percent after a \\ control sequence
        assert_eq!(split_comment("a\\\\\\% c"), ("a\\\\\\% c", ""));
        // \\\\% : live again
        assert_eq!(split_comment("a\\\\\\\\% c"), ("a\\\\\\\\", "% c"));
    }

    #[test]
    fn test_first_live_marker_wins() {
        assert_eq!(split_comment("a % b % c\n"), ("a ", "% b % c\n"));
    }

    #[test]
    fn test_escape_run_broken_by_other_char() {
        // The backslash escapes the x, not the percent
        assert_eq!(split_comment("\\x% c"), ("\\x", "% c"));
    }
}
