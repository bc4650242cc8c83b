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

//! Link reference definitions: `[id]: url "title"`.

use std::collections::HashMap;

use fancy_regex::Captures;
use log::trace;
use unicase::UniCase;

use crate::parse::Transformer;
use crate::scanners::replace_all;
use crate::span::encode_amps_and_angles;

/// Destination of a reference link or image. The url has its ampersands
/// and angle brackets encoded; the title is kept as written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct LinkDef {
    pub(crate) url: String,
    pub(crate) title: Option<String>,
}

/// Link definitions of one document, looked up case-insensitively.
#[derive(Debug, Default)]
pub(crate) struct RefDefs(HashMap<UniCase<String>, LinkDef>);

impl RefDefs {
    /// Later definitions replace earlier ones.
    pub(crate) fn insert(&mut self, id: &str, def: LinkDef) {
        trace!("link definition [{}] -> {}", id, def.url);
        self.0.insert(UniCase::new(id.to_owned()), def);
    }

    pub(crate) fn get(&self, id: &str) -> Option<&LinkDef> {
        self.0.get(&UniCase::new(id.to_owned()))
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }
}

impl Transformer<'_> {
    /// Removes every link definition from `text`, recording it.
    pub(crate) fn strip_link_definitions(&mut self, text: &str) -> String {
        let grammar = self.grammar;
        let refs = &mut self.refs;
        replace_all(&grammar.link_def, text, |caps: &Captures<'_>| {
            let id = caps.get(1).map_or("", |m| m.as_str());
            let url = caps.get(2).map_or("", |m| m.as_str());
            let title = caps
                .get(3)
                .map(|m| m.as_str())
                .filter(|title| !title.is_empty())
                .map(str::to_owned);
            refs.insert(
                id,
                LinkDef {
                    url: encode_amps_and_angles(url),
                    title,
                },
            );
            String::new()
        })
    }
}
