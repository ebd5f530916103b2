//! Single-level `\input{...}` expansion.
//!
//! Rewrites a document by substituting each `\input{ref}` with the verbatim
//! contents of the referenced file, resolved against a base directory and
//! defaulting the extension to `.tex`. Substitution is a single pass over the
//! original text: newly inserted text is deliberately never rescanned for
//! further inclusions.

use std::fs;
use std::path::{Path, PathBuf};

use crate::utils::error::{FilterError, FilterResult};

/// Expand `\input{...}` occurrences one level deep.
///
/// Relative references resolve against `base_dir`. A reference without an
/// extension gets `.tex` appended. An unreadable referenced file aborts the
/// pass with an IO error.
pub fn expand_inputs_once(input: &str, base_dir: &Path) -> FilterResult<String> {
    let bytes = input.as_bytes();
    let mut out = String::with_capacity(input.len());
    let mut copied = 0usize;
    let mut i = 0usize;
    while i < bytes.len() {
        if bytes[i] != b'\\' || !input[i..].starts_with("\\input") {
            i += 1;
            continue;
        }
        let after = i + "\\input".len();
        // Avoid matching commands like \inputenc
        if after < bytes.len() && bytes[after].is_ascii_alphabetic() {
            i = after;
            continue;
        }
        let mut j = after;
        while j < bytes.len() && bytes[j].is_ascii_whitespace() {
            j += 1;
        }
        let Some((reference, used)) = (j < bytes.len() && bytes[j] == b'{')
            .then(|| braced_content(&input[j..]))
            .flatten()
        else {
            // \input without a braced argument is left untouched
            i = after;
            continue;
        };

        let mut path = PathBuf::from(reference.trim());
        if path.extension().is_none() {
            path.set_extension("tex");
        }
        let full_path = if path.is_absolute() {
            path
        } else {
            base_dir.join(path)
        };
        let text = fs::read_to_string(&full_path).map_err(|err| FilterError::IoError {
            message: format!("cannot read \\input file {}: {}", full_path.display(), err),
        })?;

        out.push_str(&input[copied..i]);
        out.push_str(&text);
        i = j + used;
        copied = i;
    }
    out.push_str(&input[copied..]);
    Ok(out)
}

/// Content of a brace group starting at the first byte of `s`, plus the byte
/// length of the whole group including both braces. Nested braces balance.
fn braced_content(s: &str) -> Option<(&str, usize)> {
    let bytes = s.as_bytes();
    if bytes.first() != Some(&b'{') {
        return None;
    }
    let mut depth = 1usize;
    let mut i = 1usize;
    while i < bytes.len() {
        match bytes[i] {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some((&s[1..i], i + 1));
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}
