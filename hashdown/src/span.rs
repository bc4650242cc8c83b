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

//! Inline passes, run on the contents of each block.

use fancy_regex::{Captures, Regex};
use once_cell::sync::Lazy;

use crate::escapes::ESCAPES;
use crate::parse::Transformer;
use crate::scanners::{compile, replace_all};
use crate::tokenizer::{tokenize, TokenKind};
use crate::Options;

static CODE_SPAN: Lazy<Regex> =
    Lazy::new(|| compile(r"(?s)(?<![\\`])(`+)(?!`)(.+?)(?<!`)\1(?!`)"));

static LONE_AMP: Lazy<Regex> = Lazy::new(|| compile(r"&(?!#?[xX]?(?:[0-9a-fA-F]+|\w+);)"));
static LONE_ANGLE: Lazy<Regex> = Lazy::new(|| compile(r"(?i)<(?![a-z/?\$!])"));

static BOLD: Lazy<Regex> = Lazy::new(|| compile(r"(?s)(\*\*|__)(?=\S)(.+?[*_]*)(?<=\S)\1"));
static ITALIC: Lazy<Regex> = Lazy::new(|| compile(r"(?s)(\*|_)(?=\S)(.+?)(?<=\S)\1"));

// The delimiters must sit on a word boundary, so `snake_case_name` and
// `2*3*4` stay as they are.
static STRICT_BOLD: Lazy<Regex> = Lazy::new(|| {
    compile(r"(?s)(^|[\W_])(?:(?!\1)|(?=^))(\*|_)\2(?=\S)(.*?\S)\2\2(?!\2)(?=[\W_]|$)")
});
static STRICT_ITALIC: Lazy<Regex> = Lazy::new(|| {
    compile(r"(?s)(^|[\W_])(?:(?!\1)|(?=^))(\*|_)(?=\S)((?:(?!\2).)*?\S)\2(?!\2)(?=[\W_]|$)")
});

static HARD_BREAK: Lazy<regex::Regex> =
    Lazy::new(|| regex::Regex::new(r" {2,}\n").expect("valid hard break pattern"));

/// Encodes `&` when it doesn't start an entity, and `<` when it can't
/// start a tag.
pub(crate) fn encode_amps_and_angles(text: &str) -> String {
    let text = replace_all(&LONE_AMP, text, "&amp;");
    replace_all(&LONE_ANGLE, &text, "&lt;")
}

impl Transformer<'_> {
    /// Runs the inline passes over `text`. The order matters: code spans
    /// claim their contents first, and images must be found before links.
    pub(crate) fn run_span_gamut(&self, text: &str) -> String {
        let text = self.do_code_spans(text);
        let text = self.escape_special_chars(&text);
        let text = self.do_images(&text);
        let text = self.do_anchors(&text);
        // After anchors, since `[x](<url>)` also uses angle brackets.
        let text = self.do_auto_links(&text);
        let text = encode_amps_and_angles(&text);
        let text = self.do_italics_and_bold(&text);
        self.do_hard_breaks(&text)
    }

    fn do_code_spans(&self, text: &str) -> String {
        replace_all(&CODE_SPAN, text, |caps: &Captures<'_>| {
            let code = caps.get(2).map_or("", |m| m.as_str());
            let code = code.trim_matches([' ', '\t']);
            format!("<code>{}</code>", ESCAPES.encode_code(code))
        })
    }

    /// Inside tags, hides `*` and `_` so attribute values never turn into
    /// emphasis. Elsewhere, hides backslash-escaped characters.
    fn escape_special_chars(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for token in tokenize(text) {
            match token.kind {
                TokenKind::Tag => out.push_str(&ESCAPES.escape_bold_italic(token.text)),
                TokenKind::Text => out.push_str(&ESCAPES.encode_backslash_escapes(token.text)),
            }
        }
        out
    }

    fn do_italics_and_bold(&self, text: &str) -> String {
        if self.options.contains(Options::ENABLE_STRICT_EMPHASIS) {
            let text = replace_all(&STRICT_BOLD, text, "$1<strong>$3</strong>");
            replace_all(&STRICT_ITALIC, &text, "$1<em>$3</em>")
        } else {
            // <strong> must go first.
            let text = replace_all(&BOLD, text, "<strong>$2</strong>");
            replace_all(&ITALIC, &text, "<em>$2</em>")
        }
    }

    fn do_hard_breaks(&self, text: &str) -> String {
        let br = format!("<br{}\n", self.suffix);
        if self.options.contains(Options::ENABLE_AUTO_NEWLINES) {
            text.replace('\n', &br)
        } else {
            HARD_BREAK.replace_all(text, br.as_str()).into_owned()
        }
    }
}
