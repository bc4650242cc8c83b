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

//! Storage for fragments that must come through the block passes untouched.

use std::collections::HashMap;

use log::trace;
use sha1_smol::Sha1;

/// Lowercase hex SHA-1 digest of `content`, 40 characters long.
pub(crate) fn content_hash(content: &str) -> String {
    Sha1::from(content).digest().to_string()
}

/// Protected fragments of one transformation, keyed by their content hash.
#[derive(Debug, Default)]
pub(crate) struct BlockStore {
    blocks: HashMap<String, String>,
}

impl BlockStore {
    /// Stores `content` and returns the key that stands in for it.
    /// Storing the same fragment twice yields the same key.
    pub(crate) fn insert(&mut self, content: &str) -> String {
        let key = content_hash(content);
        if !self.blocks.contains_key(&key) {
            trace!("protecting {} byte block as {}", content.len(), key);
            self.blocks.insert(key.clone(), content.to_owned());
        }
        key
    }

    pub(crate) fn get(&self, key: &str) -> Option<&str> {
        self.blocks.get(key).map(String::as_str)
    }

    pub(crate) fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Swaps any key still present in `text` for its fragment. Fragments
    /// may contain keys themselves, so this repeats until none is left.
    pub(crate) fn restore(&self, mut text: String) -> String {
        // Each round resolves at least one level of nesting, and a fragment
        // cannot contain its own key.
        for _ in 0..=self.blocks.len() {
            let mut replaced = false;
            for (key, content) in &self.blocks {
                if text.contains(key.as_str()) {
                    text = text.replace(key.as_str(), content);
                    replaced = true;
                }
            }
            if !replaced {
                break;
            }
        }
        text
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn hash_is_sha1_hex() {
        assert_eq!("da39a3ee5e6b4b0d3255bfef95601890afd80709", content_hash(""));
        assert_eq!(40, content_hash("<div>x</div>").len());
    }

    #[test]
    fn identical_fragments_collapse() {
        let mut store = BlockStore::default();
        let a = store.insert("<div>a</div>");
        let b = store.insert("<div>a</div>");
        assert_eq!(a, b);
        assert_eq!(1, store.len());
        assert_eq!(Some("<div>a</div>"), store.get(&a));
    }

    #[test]
    fn restore_resolves_nested_keys() {
        let mut store = BlockStore::default();
        let inner = store.insert("<p>inner</p>");
        let outer = store.insert(&format!("<div>{}</div>", inner));
        let restored = store.restore(format!("before {} after", outer));
        assert_eq!("before <div><p>inner</p></div> after", restored);
    }

    #[test]
    fn restore_without_keys_is_identity() {
        let store = BlockStore::default();
        assert_eq!("text", store.restore("text".to_owned()));
    }
}
