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

//! Placeholders for characters that Markdown gives a meaning to.
//!
//! Once a character has been consumed as a literal (inside code, after a
//! backslash, inside an HTML tag), it is swapped for a placeholder so that
//! later passes leave it alone. The placeholders go back to the literal
//! characters as the very last rewriting step.

use hashdown_escape::escape_html_body_text;
use once_cell::sync::Lazy;

use crate::store::content_hash;

/// The characters with a Markdown meaning. The backslash comes first so
/// that `\\` is consumed before it can escape its neighbour.
pub(crate) const SPECIAL_CHARS: &str = "\\`*_{}[]()>#+-.!";

pub(crate) static ESCAPES: Lazy<EscapeTable> = Lazy::new(EscapeTable::new);

/// Maps each special character to a placeholder made of hex digits, which
/// are never special themselves.
#[derive(Debug)]
pub(crate) struct EscapeTable {
    entries: Vec<(char, String)>,
}

impl EscapeTable {
    fn new() -> Self {
        let entries = SPECIAL_CHARS
            .chars()
            .map(|c| (c, content_hash(c.encode_utf8(&mut [0; 4]))))
            .collect();
        EscapeTable { entries }
    }

    /// The placeholder standing for `c`, if `c` is special.
    pub(crate) fn placeholder(&self, c: char) -> Option<&str> {
        self.entries
            .iter()
            .find(|(special, _)| *special == c)
            .map(|(_, placeholder)| placeholder.as_str())
    }

    /// Swaps every special character of `text` for its placeholder.
    fn hide_all(&self, text: &str, out: &mut String) {
        for c in text.chars() {
            match self.placeholder(c) {
                Some(placeholder) => out.push_str(placeholder),
                None => out.push(c),
            }
        }
    }

    /// Prepares the contents of a code span or code block: `& < >` become
    /// entities and every special character is hidden, so nothing inside
    /// is ever read as Markdown.
    pub(crate) fn encode_code(&self, code: &str) -> String {
        let mut escaped = String::with_capacity(code.len());
        // Writing to a String cannot fail.
        let _ = escape_html_body_text(&mut escaped, code);
        let mut out = String::with_capacity(escaped.len() * 2);
        self.hide_all(&escaped, &mut out);
        out
    }

    /// Hides `*` and `_`, which would otherwise start emphasis inside an
    /// attribute value.
    pub(crate) fn escape_bold_italic(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            match c {
                '*' | '_' => out.push_str(self.placeholder(c).unwrap_or_default()),
                _ => out.push(c),
            }
        }
        out
    }

    /// Hides backslash-escaped special characters, dropping the backslash.
    /// A backslash before an ordinary character is kept as is.
    pub(crate) fn encode_backslash_escapes(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '\\' {
                if let Some(placeholder) = chars.peek().and_then(|&next| self.placeholder(next)) {
                    out.push_str(placeholder);
                    chars.next();
                    continue;
                }
            }
            out.push(c);
        }
        out
    }

    /// Puts the literal characters back.
    pub(crate) fn unescape(&self, text: &str) -> String {
        let mut text = text.to_owned();
        for (c, placeholder) in &self.entries {
            if text.contains(placeholder.as_str()) {
                text = text.replace(placeholder.as_str(), c.encode_utf8(&mut [0; 4]));
            }
        }
        text
    }
}
