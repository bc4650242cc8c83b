// Copyright 2015 Google Inc. All rights reserved.
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


//! Converter for classic [Markdown](https://daringfireball.net/projects/markdown/)
//! in the tradition of `Markdown.pl` and MarkdownSharp.
//!
//! The conversion is a pipeline of text rewriting passes. Raw HTML blocks and
//! generated markup are hidden behind content hashes while the remaining text
//! is rewritten, and backslash escapes travel through the passes as
//! placeholders. Inputs are never rejected: unrecognized markup is passed
//! through as text.
//!
//! # Example
//! ```rust
//! use hashdown::{Config, Markdown, Options};
//!
//! let markdown_input = "Hello world, this is a *very simple* example.";
//! let expected_html = "<p>Hello world, this is a <em>very simple</em> example.</p>\n";
//! assert_eq!(expected_html, hashdown::transform(markdown_input));
//!
//! // Extensions to classic Markdown are opt-in.
//! let md = Markdown::new(Config {
//!     options: Options::ENABLE_AUTO_HYPERLINK,
//!     ..Config::default()
//! });
//! assert_eq!(
//!     "<p>See <a href=\"http://example.com\">http://example.com</a></p>\n",
//!     md.transform("See http://example.com")
//! );
//! ```
//!
//! A [`Markdown`] compiles the patterns that depend on its configuration
//! once, so keep it around when converting many documents. It is `Send` and
//! `Sync`.

#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod html;

mod block;
mod escapes;
mod grammar;
mod html_blocks;
mod linkdefs;
mod links;
mod lists;
mod parse;
mod scanners;
mod span;
mod store;
mod tokenizer;

use std::fmt::{self, Display};

use once_cell::sync::Lazy;

use crate::grammar::Grammar;
use crate::parse::Transformer;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HeadingLevel {
    H1 = 1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::H1 => write!(f, "h1"),
            Self::H2 => write!(f, "h2"),
            Self::H3 => write!(f, "h3"),
            Self::H4 => write!(f, "h4"),
            Self::H5 => write!(f, "h5"),
            Self::H6 => write!(f, "h6"),
        }
    }
}

/// Returned when trying to convert a `usize` into a `HeadingLevel` but it fails
/// because the usize isn't a valid heading level
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct InvalidHeadingLevel(usize);

impl Display for InvalidHeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid heading level {}, expected 1 to 6", self.0)
    }
}

impl std::error::Error for InvalidHeadingLevel {}

impl TryFrom<usize> for HeadingLevel {
    type Error = InvalidHeadingLevel;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::H1),
            2 => Ok(Self::H2),
            3 => Ok(Self::H3),
            4 => Ok(Self::H4),
            5 => Ok(Self::H5),
            6 => Ok(Self::H6),
            _ => Err(InvalidHeadingLevel(value)),
        }
    }
}

/// Kind of a list, decided by the marker of its first item.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ListKind {
    /// `*`, `+` or `-` bullets.
    Unordered,
    /// Numbers followed by a period. The numbers themselves are ignored.
    Ordered,
}

impl ListKind {
    pub(crate) fn from_marker(marker: &str) -> Self {
        if marker.starts_with(|c: char| c.is_ascii_digit()) {
            ListKind::Ordered
        } else {
            ListKind::Unordered
        }
    }

    /// Name of the HTML element for this kind of list.
    pub fn tag(self) -> &'static str {
        match self {
            ListKind::Unordered => "ul",
            ListKind::Ordered => "ol",
        }
    }
}

bitflags::bitflags! {
    /// Option struct containing flags for enabling behaviour that is not
    /// part of classic Markdown. The empty set converts the way
    /// `Markdown.pl` does.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct Options: u32 {
        /// Turns bare `http`, `https` and `ftp` URLs into links.
        const ENABLE_AUTO_HYPERLINK = 1 << 0;
        /// Every newline inside a paragraph becomes a `<br />`.
        const ENABLE_AUTO_NEWLINES = 1 << 1;
        /// Emphasis markers only count at word boundaries, so that
        /// `snake_case_name` stays as it is.
        const ENABLE_STRICT_EMPHASIS = 1 << 2;
        /// Percent-encodes characters in link and image URLs that would
        /// otherwise break the generated attribute or be read as Markdown.
        const ENABLE_URL_ENCODING = 1 << 3;
        /// `<user@example.com>` is left alone instead of becoming an
        /// obfuscated `mailto:` link.
        const DISABLE_EMAIL_LINKS = 1 << 4;
    }
}

impl Default for Options {
    fn default() -> Self {
        Options::empty()
    }
}

/// How elements without content, like `<hr>` and `<br>`, are closed.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EmptyElementSuffix {
    /// `<hr />`
    #[default]
    Xhtml,
    /// `<hr>`
    Html,
}

impl EmptyElementSuffix {
    pub fn as_str(self) -> &'static str {
        match self {
            EmptyElementSuffix::Xhtml => " />",
            EmptyElementSuffix::Html => ">",
        }
    }
}

const MAX_TAB_WIDTH: usize = 32;

/// Number of columns between tab stops. Also the indentation of a code
/// block and of one level of list nesting.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "usize", into = "usize")
)]
pub struct TabWidth(usize);

impl TabWidth {
    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for TabWidth {
    fn default() -> Self {
        TabWidth(4)
    }
}

/// Returned when a tab width is zero or unreasonably large.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct InvalidTabWidth(usize);

impl Display for InvalidTabWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid tab width {}, expected 1 to {}",
            self.0, MAX_TAB_WIDTH
        )
    }
}

impl std::error::Error for InvalidTabWidth {}

impl TryFrom<usize> for TabWidth {
    type Error = InvalidTabWidth;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        if (1..=MAX_TAB_WIDTH).contains(&value) {
            Ok(TabWidth(value))
        } else {
            Err(InvalidTabWidth(value))
        }
    }
}

impl From<TabWidth> for usize {
    fn from(width: TabWidth) -> usize {
        width.0
    }
}

/// Everything that changes the output of a [`Markdown`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(default)
)]
pub struct Config {
    pub options: Options,
    pub empty_element_suffix: EmptyElementSuffix,
    pub tab_width: TabWidth,
}

/// A configured converter.
#[derive(Debug)]
pub struct Markdown {
    config: Config,
    grammar: Grammar,
}

impl Markdown {
    pub fn new(config: Config) -> Self {
        let grammar = Grammar::new(config.tab_width.get());
        Markdown { config, grammar }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// Converts a Markdown document into an HTML fragment.
    ///
    /// The result always ends with a single newline, and is just `"\n"` for
    /// an empty document.
    pub fn transform(&self, text: &str) -> String {
        Transformer::new(self).run(text)
    }
}

impl Default for Markdown {
    fn default() -> Self {
        Markdown::new(Config::default())
    }
}

static DEFAULT: Lazy<Markdown> = Lazy::new(Markdown::default);

/// Converts `text` with the default configuration.
pub fn transform(text: &str) -> String {
    DEFAULT.transform(text)
}
