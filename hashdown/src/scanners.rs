// Copyright 2026 The hashdown developers.
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.

//! Text scanning helpers shared by the block and span passes: input
//! normalization, tab expansion and the pattern builders for nested
//! constructs.

use std::iter;

use fancy_regex::{Regex, RegexBuilder, Replacer};
use log::warn;
use memchr::memchr;
use once_cell::sync::Lazy;

/// How deeply brackets, parentheses and tags may nest inside link text,
/// link destinations and HTML tags.
pub(crate) const NESTING_DEPTH: usize = 6;

static BLANK_LINE: Lazy<regex::Regex> =
    Lazy::new(|| regex::Regex::new(r"(?m)^[ \t]+$").expect("valid blank line pattern"));

/// Backtracking steps allowed for one search, the engine's own default.
const BACKTRACK_LIMIT: usize = 1_000_000;

/// Compiles a pattern that is part of the grammar. The patterns are
/// constants, so failing to compile one is a bug.
pub(crate) fn compile(pattern: &str) -> Regex {
    compile_with_limit(pattern, BACKTRACK_LIMIT)
}

/// Like [`compile`], for patterns whose every search may walk to the end
/// of the document.
pub(crate) fn compile_with_limit(pattern: &str, backtrack_limit: usize) -> Regex {
    match RegexBuilder::new(pattern)
        .backtrack_limit(backtrack_limit)
        .build()
    {
        Ok(re) => re,
        Err(err) => panic!("invalid built-in pattern `{}`: {}", pattern, err),
    }
}

/// Replaces every match of `re` in `text`.
///
/// The backtracking engine gives up on pathological input. When that
/// happens the pass is skipped: the failure is logged and `text` is
/// returned as is.
pub(crate) fn replace_all<R: Replacer>(re: &Regex, text: &str, rep: R) -> String {
    match re.try_replacen(text, 0, rep) {
        Ok(replaced) => replaced.into_owned(),
        Err(err) => {
            warn!(
                "pattern `{}` failed, leaving {} bytes unchanged: {}",
                re.as_str(),
                text.len(),
                err
            );
            text.to_owned()
        }
    }
}

/// Converts `\r\n` and lone `\r` line endings to `\n`.
pub(crate) fn normalize_newlines(text: &str) -> String {
    if memchr(b'\r', text.as_bytes()).is_none() {
        return text.to_owned();
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Expands every tab to spaces, padding to the next multiple of `tab_width`.
/// Columns are counted in characters and restart after each newline.
pub(crate) fn detab(text: &str, tab_width: usize) -> String {
    if memchr(b'\t', text.as_bytes()).is_none() {
        return text.to_owned();
    }
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    let mut column = 0;
    for c in text.chars() {
        match c {
            '\t' => {
                let pad = tab_width - column % tab_width;
                out.extend(iter::repeat(' ').take(pad));
                column += pad;
            }
            '\n' => {
                out.push(c);
                column = 0;
            }
            _ => {
                out.push(c);
                column += 1;
            }
        }
    }
    out
}

/// Empties lines made only of spaces and tabs, so that later passes can
/// find blank lines with `\n\n`.
pub(crate) fn strip_blank_lines(text: &str) -> String {
    BLANK_LINE.replace_all(text, "").into_owned()
}

/// Brackets balanced up to [`NESTING_DEPTH`] levels, as found in link text.
pub(crate) fn nested_brackets() -> String {
    nested(r"(?>[^\[\]]+|\[", r"\])*")
}

/// Parentheses balanced up to [`NESTING_DEPTH`] levels, without whitespace,
/// as found in inline link destinations.
pub(crate) fn nested_parens() -> String {
    nested(r"(?>[^()\s]+|\(", r"\))*")
}

/// Tags whose attributes may themselves contain tags, e.g.
/// `<a href="<MTFoo>">`.
pub(crate) fn nested_tags() -> String {
    nested(r"(?:<[a-z/!$](?:[^<>]|", r")*>)")
}

fn nested(open: &str, close: &str) -> String {
    let mut pattern = open.repeat(NESTING_DEPTH);
    pattern.push_str(&close.repeat(NESTING_DEPTH));
    pattern
}
