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

//! Ordered and unordered lists.
//!
//! Outside of lists, a line like
//!
//! ```text
//! I recommend upgrading to version
//! 8. Oops, now this line is treated
//! ```
//!
//! must stay a paragraph, so a top-level list has to follow a blank line.
//! Inside a list item any line may start a sub-list.

use fancy_regex::{Captures, Regex};
use once_cell::sync::Lazy;

use crate::grammar::MARKER_ANY;
use crate::parse::Transformer;
use crate::scanners::{compile, replace_all};
use crate::ListKind;

static LIST_ITEM: Lazy<Regex> = Lazy::new(|| {
    compile(&format!(
        r"(?m)(\n)?(^[ \t]*)({marker})[ \t]+((?s:.+?)(\n{{1,2}}))(?=\n*(?:\z|\2{marker}[ \t]+))",
        marker = MARKER_ANY
    ))
});

static BLANK_RUN: Lazy<regex::Regex> =
    Lazy::new(|| regex::Regex::new(r"\n{2,}").expect("valid blank run pattern"));
static TRAILING_BLANKS: Lazy<regex::Regex> =
    Lazy::new(|| regex::Regex::new(r"\n{2,}\z").expect("valid trailing blank pattern"));

impl Transformer<'_> {
    /// Turns every list in `text` into `<ul>` or `<ol>` markup.
    pub(crate) fn do_lists(&mut self, text: &str, depth: usize) -> String {
        let grammar = self.grammar;
        let re = if depth > 0 {
            &grammar.list_nested
        } else {
            &grammar.list_top
        };
        replace_all(re, text, |caps: &Captures<'_>| {
            let list = caps.get(1).map_or("", |m| m.as_str());
            let marker = caps.get(3).map_or("", |m| m.as_str());
            let kind = ListKind::from_marker(marker);
            // Widen blank runs so that the last item can become a
            // paragraph too.
            let list = BLANK_RUN.replace_all(list, "\n\n\n");
            let items = self.process_list_items(&list, depth);
            format!("<{0}>\n{1}</{0}>\n", kind.tag(), items)
        })
    }

    fn process_list_items(&mut self, list: &str, depth: usize) -> String {
        let list = TRAILING_BLANKS.replace_all(list, "\n");
        replace_all(&LIST_ITEM, &list, |caps: &Captures<'_>| {
            let item = caps.get(4).map_or("", |m| m.as_str());
            let after_blank = caps.get(1).map_or(false, |m| !m.as_str().is_empty());
            let item = if after_blank || BLANK_RUN.is_match(item) {
                // Loose: the item holds paragraphs.
                let item = self.outdent(item);
                self.run_block_gamut(&item, depth + 1)
            } else {
                // Tight: no paragraph, but sub-lists are allowed.
                let item = self.outdent(item);
                let item = self.do_lists(&item, depth + 1);
                self.run_span_gamut(item.trim_end_matches('\n'))
            };
            format!("<li>{}</li>\n", item)
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::escapes::ESCAPES;
    use crate::Markdown;

    fn lists(text: &str) -> String {
        let md = Markdown::default();
        let mut t = Transformer::new(&md);
        let out = t.do_lists(text, 0);
        ESCAPES.unescape(&t.blocks.restore(out))
    }

    #[test]
    fn tight_unordered() {
        assert_eq!(
            "<ul>\n<li>a</li>\n<li><em>b</em></li>\n</ul>\n",
            lists("* a\n* *b*\n")
        );
    }

    #[test]
    fn ordered_kind_from_first_marker() {
        assert_eq!(
            "<ol>\n<li>one</li>\n<li>two</li>\n</ol>\n",
            lists("3. one\n1. two\n")
        );
    }

    #[test]
    fn loose_items_get_paragraphs() {
        assert_eq!(
            "<ul>\n<li><p>a</p></li>\n<li><p>b</p></li>\n<li><p>c</p></li>\n</ul>\n",
            lists("- a\n\n- b\n\n- c\n")
        );
    }

    #[test]
    fn nested_tight_list() {
        assert_eq!(
            "<ul>\n<li>a\n<ul>\n<li>b</li>\n</ul></li>\n<li>c</li>\n</ul>\n",
            lists("- a\n    - b\n- c\n")
        );
    }

    #[test]
    fn top_level_list_needs_blank_line() {
        let text = "I recommend version\n8. Oops\n";
        assert_eq!(text, lists(text));
    }

    #[test]
    fn list_ends_before_paragraph() {
        assert_eq!(
            "<ul>\n<li>a</li>\n</ul>\nafter\n",
            lists("- a\n\n\nafter\n")
        );
    }
}
