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

//! Patterns that depend on the tab width. They are compiled once per
//! [`Markdown`](crate::Markdown) and shared by all its transformations.

use fancy_regex::Regex;

use crate::scanners::compile;

/// A list item marker: a bullet or a number followed by a period.
pub(crate) const MARKER_ANY: &str = r"(?:[*+-]|\d+[.])";

#[derive(Debug)]
pub(crate) struct Grammar {
    /// `[id]: url "title"`, indented less than a tab stop.
    pub(crate) link_def: Regex,
    /// A standalone `<hr>` after a blank line.
    pub(crate) html_hr: Regex,
    /// A standalone HTML comment after a blank line.
    pub(crate) html_comment: Regex,
    /// A whole list at the top level, which must follow a blank line.
    /// Group 1 is the list, group 3 its first marker.
    pub(crate) list_top: Regex,
    /// A whole list inside a list item, which may start on any line.
    pub(crate) list_nested: Regex,
    pub(crate) code_block: Regex,
    /// One level of indentation at the start of each line.
    pub(crate) outdent: regex::Regex,
}

impl Grammar {
    /// `tab_width` must be at least one.
    pub(crate) fn new(tab_width: usize) -> Self {
        let less_than_tab = tab_width - 1;

        let link_def = format!(
            r#"(?m)^[ ]{{0,{}}}\[(.+)\]:[ \t]*\n?[ \t]*<?(\S+?)>?[ \t]*\n?[ \t]*(?:(?<=\s)["(](.+?)[")][ \t]*)?(?:\n+|\z)"#,
            less_than_tab
        );
        let html_hr = format!(
            r"(?:(?<=\n\n)|\A\n?)([ ]{{0,{}}}<(hr)\b([^<>])*?/?>[ \t]*(?=\n{{2,}}|\n?\z))",
            less_than_tab
        );
        let html_comment = format!(
            r"(?:(?<=\n\n)|\A\n?)([ ]{{0,{}}}(?s:<!(?:--.*?--\s*)+>)[ \t]*(?=\n{{2,}}|\n?\z))",
            less_than_tab
        );
        let whole_list = format!(
            r"(([ ]{{0,{tab}}}({marker})[ \t]+)(?s:.+?)(\z|\n{{2,}}(?=\S)(?![ \t]*{marker}[ \t]+)))",
            tab = less_than_tab,
            marker = MARKER_ANY
        );
        let code_block = format!(
            r"(?m)(?:\n\n|\A)((?:(?:[ ]{{{tab}}}|\t).*\n+)+)((?=^[ ]{{0,{tab}}}\S)|\z)",
            tab = tab_width
        );
        let outdent = format!(r"(?m)^(?:\t|[ ]{{1,{}}})", tab_width);

        Grammar {
            link_def: compile(&link_def),
            html_hr: compile(&html_hr),
            html_comment: compile(&html_comment),
            list_top: compile(&format!(r"(?m)(?:(?<=\n\n)|\A\n?){}", whole_list)),
            list_nested: compile(&format!(r"(?m)^{}", whole_list)),
            code_block: compile(&code_block),
            outdent: regex::Regex::new(&outdent).expect("valid outdent pattern"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn compiles_for_small_and_large_widths() {
        for width in [1, 2, 4, 8, 32] {
            let grammar = Grammar::new(width);
            assert!(grammar.outdent.is_match(" x"));
        }
    }

    #[test]
    fn outdent_removes_one_level() {
        let grammar = Grammar::new(4);
        assert_eq!(
            "a\n  b\nc",
            grammar.outdent.replace_all("    a\n      b\n  c", "")
        );
    }

    #[test]
    fn nested_list_anchors_anywhere() {
        let grammar = Grammar::new(4);
        let text = "item\n- sub\n";
        assert!(grammar.list_nested.is_match(text).unwrap());
        assert!(!grammar.list_top.is_match(text).unwrap());
    }
}
