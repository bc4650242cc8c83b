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

//! Splits a fragment into HTML tags and the text between them.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::scanners::nested_tags;

static TAG: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(
        r"(?i)(?s:<!(?:--.*?--\s*)+>)|(?s:<\?.*?\?>)|{}",
        nested_tags()
    );
    Regex::new(&pattern).expect("valid tag pattern")
});

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TokenKind {
    /// A tag, comment or processing instruction, brackets included.
    Tag,
    Text,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Token<'a> {
    pub(crate) kind: TokenKind,
    pub(crate) text: &'a str,
}

/// Tokens cover `text` exactly, in order; concatenating them gives `text`
/// back.
pub(crate) fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut pos = 0;
    for tag in TAG.find_iter(text) {
        if pos < tag.start() {
            tokens.push(Token {
                kind: TokenKind::Text,
                text: &text[pos..tag.start()],
            });
        }
        tokens.push(Token {
            kind: TokenKind::Tag,
            text: tag.as_str(),
        });
        pos = tag.end();
    }
    if pos < text.len() {
        tokens.push(Token {
            kind: TokenKind::Text,
            text: &text[pos..],
        });
    }
    tokens
}
