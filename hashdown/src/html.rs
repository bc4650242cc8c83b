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


//! Writing converted documents to strings and streams.

use std::fmt;
use std::io;

use hashdown_escape::{FmtWriter, IoWriter, StrWrite};

use crate::Markdown;

fn write_html<W: StrWrite>(mut writer: W, markdown: &Markdown, text: &str) -> Result<(), W::Error> {
    writer.write_str(&markdown.transform(text))
}

/// Appends the HTML for `text` to a `String`.
///
/// # Examples
///
/// ```
/// use hashdown::{html, Markdown};
///
/// let markdown_str = r#"
/// hello
/// =====
///
/// * alpha
/// * beta
/// "#;
/// let mut html_buf = String::new();
/// html::push_html(&mut html_buf, &Markdown::default(), markdown_str);
///
/// assert_eq!(html_buf, r#"<h1>hello</h1>
///
/// <ul>
/// <li>alpha</li>
/// <li>beta</li>
/// </ul>
/// "#);
/// ```
pub fn push_html(s: &mut String, markdown: &Markdown, text: &str) {
    // Writing to a String can't fail.
    let _ = write_html(s, markdown, text);
}

/// Writes the HTML for `text` to a byte sink. Wrap unbuffered sinks like
/// files in a `BufWriter`.
///
/// # Examples
///
/// ```
/// use hashdown::{html, Markdown};
/// use std::io::Cursor;
///
/// let mut bytes = Vec::new();
/// html::write_html_io(Cursor::new(&mut bytes), &Markdown::default(), "*alpha*").unwrap();
///
/// assert_eq!(&String::from_utf8_lossy(&bytes)[..], "<p><em>alpha</em></p>\n");
/// ```
pub fn write_html_io<W>(writer: W, markdown: &Markdown, text: &str) -> io::Result<()>
where
    W: io::Write,
{
    write_html(IoWriter(writer), markdown, text)
}

/// Writes the HTML for `text` to a formatter sink.
///
/// # Examples
///
/// ```
/// use hashdown::{html, Markdown};
///
/// let mut buf = String::new();
/// html::write_html_fmt(&mut buf, &Markdown::default(), "# alpha").unwrap();
///
/// assert_eq!(buf, "<h1>alpha</h1>\n");
/// ```
pub fn write_html_fmt<W>(writer: W, markdown: &Markdown, text: &str) -> fmt::Result
where
    W: fmt::Write,
{
    write_html(FmtWriter(writer), markdown, text)
}
