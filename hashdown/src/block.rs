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

//! Block passes: headings, rules, code blocks, blockquotes and paragraphs.
//! Lists live in their own module.

use fancy_regex::{Captures, Regex};
use once_cell::sync::Lazy;

use crate::escapes::ESCAPES;
use crate::parse::Transformer;
use crate::scanners::{compile, replace_all};
use crate::HeadingLevel;

static SETEXT_H1: Lazy<Regex> = Lazy::new(|| compile(r"(?m)^(.+)[ \t]*\n=+[ \t]*\n+"));
static SETEXT_H2: Lazy<Regex> = Lazy::new(|| compile(r"(?m)^(.+)[ \t]*\n-+[ \t]*\n+"));
static ATX: Lazy<Regex> = Lazy::new(|| compile(r"(?m)^(\#{1,6})[ \t]*(.+?)[ \t]*\#*\n+"));

static RULES: Lazy<[Regex; 3]> = Lazy::new(|| {
    [
        compile(r"(?m)^[ ]{0,2}(?:[ ]?\*[ ]?){3,}[ \t]*$"),
        compile(r"(?m)^[ ]{0,2}(?:[ ]?-[ ]?){3,}[ \t]*$"),
        compile(r"(?m)^[ ]{0,2}(?:[ ]?_[ ]?){3,}[ \t]*$"),
    ]
});

static BLOCKQUOTE: Lazy<Regex> =
    Lazy::new(|| compile(r"(?m)(((?:^[ \t]*>[ \t]?.+\n)(?:.+\n)*\n*)+)"));
static QUOTE_MARKER: Lazy<regex::Regex> =
    Lazy::new(|| regex::Regex::new(r"(?m)^[ \t]*>[ \t]?").expect("valid quote marker pattern"));
static WHITESPACE_LINE: Lazy<regex::Regex> =
    Lazy::new(|| regex::Regex::new(r"(?m)^[ \t]+$").expect("valid whitespace line pattern"));
static LINE_START: Lazy<regex::Regex> =
    Lazy::new(|| regex::Regex::new(r"(?m)^").expect("valid line start pattern"));
static PRE_REGION: Lazy<regex::Regex> =
    Lazy::new(|| regex::Regex::new(r"(?s)(\s*<pre>.+?</pre>)").expect("valid pre pattern"));
static TWO_SPACE_INDENT: Lazy<regex::Regex> =
    Lazy::new(|| regex::Regex::new(r"(?m)^  ").expect("valid indent pattern"));

static PARAGRAPH_BREAK: Lazy<regex::Regex> =
    Lazy::new(|| regex::Regex::new(r"\n{2,}").expect("valid paragraph break pattern"));

impl Transformer<'_> {
    /// Runs the block passes over `text`. `depth` is the list nesting level,
    /// zero outside of lists.
    pub(crate) fn run_block_gamut(&mut self, text: &str, depth: usize) -> String {
        let text = self.do_headers(text);
        let text = self.do_horizontal_rules(&text);
        let text = self.do_lists(&text, depth);
        let text = self.do_code_blocks(&text);
        let text = self.do_block_quotes(&text, depth);
        // Protect the markup generated so far from paragraph wrapping.
        let text = self.hash_html_blocks(&text);
        self.form_paragraphs(&text)
    }

    fn do_headers(&self, text: &str) -> String {
        let setext = |level: HeadingLevel| {
            move |caps: &Captures<'_>| {
                let content = caps.get(1).map_or("", |m| m.as_str());
                format!("<{0}>{1}</{0}>\n\n", level, self.run_span_gamut(content))
            }
        };
        let text = replace_all(&SETEXT_H1, text, setext(HeadingLevel::H1));
        let text = replace_all(&SETEXT_H2, &text, setext(HeadingLevel::H2));
        replace_all(&ATX, &text, |caps: &Captures<'_>| {
            let hashes = caps.get(1).map_or("", |m| m.as_str());
            let content = caps.get(2).map_or("", |m| m.as_str());
            // The pattern allows one to six hashes.
            let level = HeadingLevel::try_from(hashes.len()).unwrap_or(HeadingLevel::H6);
            format!("<{0}>{1}</{0}>\n\n", level, self.run_span_gamut(content))
        })
    }

    fn do_horizontal_rules(&self, text: &str) -> String {
        let rule = format!("<hr{}\n", self.suffix);
        RULES.iter().fold(text.to_owned(), |text, re| {
            replace_all(re, &text, rule.as_str())
        })
    }

    fn do_code_blocks(&self, text: &str) -> String {
        let grammar = self.grammar;
        replace_all(&grammar.code_block, text, |caps: &Captures<'_>| {
            let block = caps.get(1).map_or("", |m| m.as_str());
            let code = ESCAPES.encode_code(&self.outdent(block));
            let code = code.trim_start_matches('\n').trim_end();
            format!("\n\n<pre><code>{}\n</code></pre>\n\n", code)
        })
    }

    fn do_block_quotes(&mut self, text: &str, depth: usize) -> String {
        replace_all(&BLOCKQUOTE, text, |caps: &Captures<'_>| {
            let quote = caps.get(1).map_or("", |m| m.as_str());
            let quote = QUOTE_MARKER.replace_all(quote, "");
            let quote = WHITESPACE_LINE.replace_all(&quote, "");
            let quote = self.run_block_gamut(&quote, depth);
            let quote = LINE_START.replace_all(&quote, "  ");
            // The indentation must not leak into preformatted text.
            let quote = PRE_REGION.replace_all(&quote, |pre: &regex::Captures<'_>| {
                TWO_SPACE_INDENT.replace_all(&pre[1], "").into_owned()
            });
            format!("<blockquote>\n{}\n</blockquote>\n\n", quote)
        })
    }

    fn form_paragraphs(&self, text: &str) -> String {
        let text = text.trim_start_matches('\n').trim_end_matches('\n');
        let paragraphs: Vec<String> = PARAGRAPH_BREAK
            .split(text)
            .map(|chunk| {
                if let Some(block) = self.blocks.get(chunk) {
                    block.to_owned()
                } else if chunk.is_empty() {
                    String::new()
                } else {
                    let span = self.run_span_gamut(chunk);
                    format!("<p>{}</p>", span.trim_start_matches([' ', '\t']))
                }
            })
            .collect();
        paragraphs.join("\n\n")
    }

    /// Removes one level of indentation from every line.
    pub(crate) fn outdent(&self, text: &str) -> String {
        self.grammar.outdent.replace_all(text, "").into_owned()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Config, EmptyElementSuffix, Markdown};

    fn block(text: &str) -> String {
        let md = Markdown::default();
        let mut t = Transformer::new(&md);
        let out = t.run_block_gamut(text, 0);
        ESCAPES.unescape(&t.blocks.restore(out))
    }

    #[test]
    fn setext_and_atx_headers() {
        assert_eq!("<h1>Title</h1>", block("Title\n=====\n"));
        assert_eq!("<h2>Sub <em>x</em></h2>", block("Sub *x*\n---\n"));
        assert_eq!("<h3>Three</h3>", block("### Three ###\n"));
        assert_eq!("<h6>Six</h6>", block("######Six\n"));
    }

    #[test]
    fn seven_hashes_is_level_six() {
        assert_eq!("<h6>#Seven</h6>", block("#######Seven\n"));
    }

    #[test]
    fn rules() {
        assert_eq!("<hr />", block("* * *\n"));
        assert_eq!("<hr />", block("  ___\n"));
        let md = Markdown::new(Config {
            empty_element_suffix: EmptyElementSuffix::Html,
            ..Config::default()
        });
        let mut t = Transformer::new(&md);
        let out = t.run_block_gamut("- - -\n", 0);
        assert_eq!("<hr>", t.blocks.restore(out));
    }

    #[test]
    fn code_block_is_outdented_and_escaped() {
        assert_eq!(
            "<pre><code>if a &lt; b {\n    *p = 1;\n}\n</code></pre>",
            block("\n\n    if a < b {\n        *p = 1;\n    }\n\n\n")
        );
    }

    #[test]
    fn blockquote_body_is_indented() {
        assert_eq!(
            "<blockquote>\n  <h2>Quote</h2>\n  \n  <p>body\n  lazy</p>\n</blockquote>",
            block("> ## Quote\n>\n> body\nlazy\n\n")
        );
    }

    #[test]
    fn blockquote_keeps_pre_unindented() {
        assert_eq!(
            "<blockquote>\n  <p>code:</p>\n\n<pre><code>x\n</code></pre>\n</blockquote>",
            block("> code:\n>\n>     x\n\n")
        );
    }

    #[test]
    fn paragraphs_are_split_on_blank_lines() {
        assert_eq!("<p>one\ntwo</p>\n\n<p>three</p>", block("\none\ntwo\n\n\nthree\n"));
    }

    #[test]
    fn leading_whitespace_is_dropped_from_paragraph() {
        assert_eq!("<p>text</p>", block("   text\n"));
    }
}
