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

//! The driver of a single transformation.

use log::debug;

use crate::escapes::ESCAPES;
use crate::grammar::Grammar;
use crate::linkdefs::RefDefs;
use crate::scanners::{detab, normalize_newlines, strip_blank_lines};
use crate::store::BlockStore;
use crate::{Markdown, Options};

/// State of one call to [`Markdown::transform`]. The passes are methods on
/// this type, spread over the modules that implement them.
#[derive(Debug)]
pub(crate) struct Transformer<'a> {
    pub(crate) options: Options,
    /// Closes `<hr`, `<br` and `<img`.
    pub(crate) suffix: &'static str,
    pub(crate) grammar: &'a Grammar,
    pub(crate) tab_width: usize,
    pub(crate) blocks: BlockStore,
    pub(crate) refs: RefDefs,
}

impl<'a> Transformer<'a> {
    pub(crate) fn new(markdown: &'a Markdown) -> Self {
        let config = markdown.config();
        Transformer {
            options: config.options,
            suffix: config.empty_element_suffix.as_str(),
            grammar: markdown.grammar(),
            tab_width: config.tab_width.get(),
            blocks: BlockStore::default(),
            refs: RefDefs::default(),
        }
    }

    /// Converts a whole document.
    pub(crate) fn run(mut self, text: &str) -> String {
        debug!("transforming {} bytes", text.len());

        let mut text = normalize_newlines(text);
        text.push_str("\n\n");
        let text = detab(&text, self.tab_width);
        let text = strip_blank_lines(&text);

        let text = self.hash_html_blocks(&text);
        let text = self.strip_link_definitions(&text);
        let text = self.run_block_gamut(&text, 0);

        // Fragments that ended up somewhere paragraph formation never saw,
        // like a tight list item.
        let text = self.blocks.restore(text);
        let mut text = ESCAPES.unescape(&text);
        text.push('\n');

        debug!(
            "produced {} bytes ({} protected blocks, {} link definitions)",
            text.len(),
            self.blocks.len(),
            self.refs.len()
        );
        text
    }
}
