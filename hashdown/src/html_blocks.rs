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

//! Protection of block-level HTML, both written by the author and
//! generated by the block passes, from paragraph wrapping and span
//! processing.

use fancy_regex::{Captures, Regex};
use log::warn;
use once_cell::sync::Lazy;

use crate::parse::Transformer;
use crate::scanners::{compile_with_limit, replace_all};

const BLOCK_TAGS_STRICT: &str = "p|div|h[1-6]|blockquote|pre|table|dl|ol|ul|script|noscript|form|fieldset|iframe|math|ins|del";
const BLOCK_TAGS_LIBERAL: &str =
    "p|div|h[1-6]|blockquote|pre|table|dl|ol|ul|script|noscript|form|fieldset|iframe|math";

// Budget for one block attempt. An unclosed tag makes the attempt scan
// every line up to the end of the document.
const BLOCK_BACKTRACK_LIMIT: usize = 20_000_000;

// Every line where a block could open. The strict tags include the liberal
// ones.
static BLOCK_START: Lazy<regex::Regex> = Lazy::new(|| {
    regex::Regex::new(&format!(r"(?m)^<(?:{})\b", BLOCK_TAGS_STRICT))
        .expect("valid block start pattern")
});

// Nested blocks, whose inner tags are indented so that the closing tag at
// the left margin is the outer one:
//
//     <div>
//         <div>
//         inner
//         </div>
//     </div>
static STRICT_BLOCK: Lazy<Regex> = Lazy::new(|| {
    compile_with_limit(
        &format!(
            r"\A(<({})\b(.*\n)*?</\2>[ \t]*(?=\n+|\z))",
            BLOCK_TAGS_STRICT
        ),
        BLOCK_BACKTRACK_LIMIT,
    )
});

// From a block tag at the start of a line to its closing tag anywhere on a
// later line.
static LIBERAL_BLOCK: Lazy<Regex> = Lazy::new(|| {
    compile_with_limit(
        &format!(
            r"\A(<({})\b(.*\n)*?.*</\2>[ \t]*(?=\n+|\z))",
            BLOCK_TAGS_LIBERAL
        ),
        BLOCK_BACKTRACK_LIMIT,
    )
});

impl Transformer<'_> {
    /// Replaces each block-level HTML region with `\n\n<key>\n\n`, keeping
    /// the region in the block store.
    pub(crate) fn hash_html_blocks(&mut self, text: &str) -> String {
        let grammar = self.grammar;
        let text = self.hash_tag_blocks(&STRICT_BLOCK, text);
        let text = self.hash_tag_blocks(&LIBERAL_BLOCK, &text);
        let text = self.hash_matches(&grammar.html_hr, &text);
        self.hash_matches(&grammar.html_comment, &text)
    }

    /// Tries `re`, anchored at its start, on every line that opens a block
    /// tag. Each attempt has its own backtracking budget, so a block the
    /// engine gives up on stays unprotected without affecting the others.
    fn hash_tag_blocks(&mut self, re: &Regex, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for start in BLOCK_START.find_iter(text) {
            let pos = start.start();
            if pos < last {
                // Inside a block that was just protected.
                continue;
            }
            let block = match re.captures(&text[pos..]) {
                Ok(Some(caps)) => caps.get(1).map_or("", |m| m.as_str()),
                Ok(None) => continue,
                Err(err) => {
                    warn!(
                        "pattern `{}` failed at byte {}, leaving the block unprotected: {}",
                        re.as_str(),
                        pos,
                        err
                    );
                    continue;
                }
            };
            out.push_str(&text[last..pos]);
            out.push_str("\n\n");
            out.push_str(&self.blocks.insert(block));
            out.push_str("\n\n");
            last = pos + block.len();
        }
        out.push_str(&text[last..]);
        out
    }

    fn hash_matches(&mut self, re: &Regex, text: &str) -> String {
        let blocks = &mut self.blocks;
        replace_all(re, text, |caps: &Captures<'_>| {
            let block = caps.get(1).map_or("", |m| m.as_str());
            format!("\n\n{}\n\n", blocks.insert(block))
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::store::content_hash;
    use crate::Markdown;

    fn hash(text: &str) -> (String, Transformer<'static>) {
        static MD: Lazy<Markdown> = Lazy::new(Markdown::default);
        let mut t = Transformer::new(&MD);
        let hashed = t.hash_html_blocks(text);
        (hashed, t)
    }

    #[test]
    fn div_block_is_protected() {
        let block = "<div>\nHello *World*!\n</div>";
        let (hashed, t) = hash(&format!("{}\n\n", block));
        let key = content_hash(block);
        assert_eq!(format!("\n\n{}\n\n\n\n", key), hashed);
        assert_eq!(Some(block), t.blocks.get(&key));
    }

    #[test]
    fn nested_divs_stop_at_outer_close() {
        let block = "<div>\n    <div>\n    inner\n    </div>\n</div>";
        let (hashed, t) = hash(&format!("{}\nafter\n", block));
        assert!(hashed.starts_with("\n\n"));
        assert!(hashed.ends_with("\n\n\nafter\n"));
        assert_eq!(Some(block), t.blocks.get(&content_hash(block)));
    }

    #[test]
    fn closing_tag_on_content_line() {
        let block = "<p>one\ntwo</p>";
        let (_, t) = hash(&format!("{}\n", block));
        assert_eq!(Some(block), t.blocks.get(&content_hash(block)));
    }

    #[test]
    fn pre_with_blank_lines() {
        let block = "<pre><code>a\n\nb\n</code></pre>";
        let (hashed, t) = hash(&format!("\n\n{}\n\n", block));
        assert!(!hashed.contains("<pre>"));
        assert_eq!(Some(block), t.blocks.get(&content_hash(block)));
    }

    #[test]
    fn hr_and_comment() {
        let (hashed, t) = hash("para\n\n<hr>\n\n<!-- note -->\n");
        assert!(hashed.starts_with("para\n\n"));
        assert!(!hashed.contains("<hr>"));
        assert!(!hashed.contains("<!--"));
        assert_eq!(2, t.blocks.len());
    }

    #[test]
    fn inline_tags_are_left_alone() {
        let (hashed, t) = hash("<span>text</span>\n\n<b>bold</b>\n");
        assert_eq!("<span>text</span>\n\n<b>bold</b>\n", hashed);
        assert_eq!(0, t.blocks.len());
    }

    #[test]
    fn unclosed_tag_leaves_later_blocks_protected() {
        let block = "<div>\n*x*\n</div>";
        let (hashed, t) = hash(&format!("<p>never closed\ntext\n\n{}\n", block));
        assert!(hashed.starts_with("<p>never closed\ntext\n\n"));
        assert_eq!(1, t.blocks.len());
        assert_eq!(Some(block), t.blocks.get(&content_hash(block)));
    }

    #[test]
    fn hr_needs_blank_line_before() {
        let (hashed, _) = hash("text\n<hr />\n\n");
        assert_eq!("text\n<hr />\n\n", hashed);
    }
}
