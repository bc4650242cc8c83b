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

//! Images, links and autolinks.

use std::fmt::Write;

use fancy_regex::{Captures, Regex};
use hashdown_escape::{escape_href, escape_html};
use once_cell::sync::Lazy;

use crate::escapes::ESCAPES;
use crate::linkdefs::LinkDef;
use crate::parse::Transformer;
use crate::scanners::{compile, nested_brackets, nested_parens, replace_all};
use crate::tokenizer::{tokenize, TokenKind};
use crate::Options;

// ![alt text][id]
static IMAGE_REFERENCE: Lazy<Regex> =
    Lazy::new(|| compile(r"(?s)(!\[(.*?)\][ ]?(?:\n[ ]*)?\[(.*?)\])"));

// ![alt text](url "optional title")
static IMAGE_INLINE: Lazy<Regex> = Lazy::new(|| {
    compile(r#"(?s)(!\[(.*?)\]\([ \t]*<?(\S+?)>?[ \t]*((['"])(.*?)\5[ \t]*)?\))"#)
});

// [link text][id]
static ANCHOR_REFERENCE: Lazy<Regex> = Lazy::new(|| {
    compile(&format!(
        r"(?s)(\[({})\][ ]?(?:\n[ ]*)?\[(.*?)\])",
        nested_brackets()
    ))
});

// [link text](url "optional title")
static ANCHOR_INLINE: Lazy<Regex> = Lazy::new(|| {
    compile(&format!(
        r#"(?s)(\[({})\]\([ \t]*({})[ \t]*((['"])(.*?)\5[ \t]*)?\))"#,
        nested_brackets(),
        nested_parens()
    ))
});

// A bare url.
static BARE_URL: Lazy<Regex> = Lazy::new(|| {
    compile(r"(?i)\b((?:https?|ftp)://[-A-Z0-9+&@#/%?=~_|\[\]!:,.;]*[-A-Z0-9+&@#/%=~_|\[\]])")
});

static AUTOLINK: Lazy<Regex> = Lazy::new(|| compile(r#"<((https?|ftp):[^'">\s]+)>"#));

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    compile(r"(?i)<(?:mailto:)?([-.\w]+@[-a-z0-9]+(\.[-a-z0-9]+)*\.[a-z]+)>")
});

fn group<'t>(caps: &Captures<'t>, i: usize) -> &'t str {
    caps.get(i).map_or("", |m| m.as_str())
}

/// Every character except `:` becomes a hex character reference.
fn encode_email_chars(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 6);
    for c in text.chars() {
        if c == ':' {
            out.push(c);
        } else {
            // Writing to a String cannot fail.
            let _ = write!(out, "&#x{:x};", c as u32);
        }
    }
    out
}

/// Whether `tag` opens or closes an element whose text must not gain
/// links. Returns the change in nesting depth.
fn link_free_depth(tag: &str) -> isize {
    let Some(rest) = tag.strip_prefix('<') else {
        return 0;
    };
    let (closing, rest) = match rest.strip_prefix('/') {
        Some(rest) => (true, rest),
        None => (false, rest),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(rest.len());
    let name = &rest[..end];
    if !name.eq_ignore_ascii_case("a") && !name.eq_ignore_ascii_case("code") {
        0
    } else if closing {
        -1
    } else if rest[end..].trim_end().ends_with("/>") {
        0
    } else {
        1
    }
}

/// Wraps bare urls in angle brackets. Only text outside of tags, code
/// and existing links is looked at.
fn bracket_bare_urls(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut depth = 0isize;
    for token in tokenize(text) {
        match token.kind {
            TokenKind::Tag => {
                depth = (depth + link_free_depth(token.text)).max(0);
                out.push_str(token.text);
            }
            TokenKind::Text if depth > 0 => out.push_str(token.text),
            TokenKind::Text => out.push_str(&replace_all(&BARE_URL, token.text, "<$1>")),
        }
    }
    out
}

/// Quotes text for an attribute value.
fn attribute_value(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    // Writing to a String cannot fail.
    let _ = escape_html(&mut out, text);
    out
}

impl Transformer<'_> {
    /// Prepares a link destination for an attribute value.
    fn encode_url(&self, url: &str) -> String {
        if self.options.contains(Options::ENABLE_URL_ENCODING) {
            let mut encoded = String::with_capacity(url.len());
            let _ = escape_href(&mut encoded, url);
            ESCAPES.escape_bold_italic(&encoded)
        } else {
            ESCAPES.escape_bold_italic(url)
        }
    }

    fn title_attribute(&self, title: Option<&str>) -> String {
        match title {
            Some(title) if !title.is_empty() => {
                let title = attribute_value(title);
                format!(r#" title="{}""#, ESCAPES.escape_bold_italic(&title))
            }
            _ => String::new(),
        }
    }

    /// Resolves a reference; an empty id means the link text is the id.
    fn lookup<'d>(&'d self, id: &str, text: &str) -> Option<&'d LinkDef> {
        let id = if id.is_empty() { text } else { id };
        self.refs.get(id)
    }

    pub(crate) fn do_images(&self, text: &str) -> String {
        let text = replace_all(&IMAGE_REFERENCE, text, |caps: &Captures<'_>| {
            let alt = group(caps, 2);
            match self.lookup(group(caps, 3), alt) {
                Some(def) => self.image_tag(&def.url, alt, def.title.as_deref()),
                None => group(caps, 1).to_owned(),
            }
        });
        replace_all(&IMAGE_INLINE, &text, |caps: &Captures<'_>| {
            self.image_tag(group(caps, 3), group(caps, 2), Some(group(caps, 6)))
        })
    }

    fn image_tag(&self, url: &str, alt: &str, title: Option<&str>) -> String {
        format!(
            r#"<img src="{}" alt="{}"{}{}"#,
            self.encode_url(url),
            attribute_value(alt),
            self.title_attribute(title),
            self.suffix
        )
    }

    pub(crate) fn do_anchors(&self, text: &str) -> String {
        let text = replace_all(&ANCHOR_REFERENCE, text, |caps: &Captures<'_>| {
            let link_text = group(caps, 2);
            match self.lookup(group(caps, 3), link_text) {
                Some(def) => self.anchor_tag(&def.url, link_text, def.title.as_deref()),
                None => group(caps, 1).to_owned(),
            }
        });
        replace_all(&ANCHOR_INLINE, &text, |caps: &Captures<'_>| {
            let url = group(caps, 3);
            let url = url
                .strip_prefix('<')
                .and_then(|url| url.strip_suffix('>'))
                .unwrap_or(url);
            self.anchor_tag(url, group(caps, 2), Some(group(caps, 6)))
        })
    }

    fn anchor_tag(&self, url: &str, link_text: &str, title: Option<&str>) -> String {
        format!(
            r#"<a href="{}"{}>{}</a>"#,
            self.encode_url(url),
            self.title_attribute(title),
            link_text
        )
    }

    pub(crate) fn do_auto_links(&self, text: &str) -> String {
        let mut text = if self.options.contains(Options::ENABLE_AUTO_HYPERLINK) {
            // The rule below turns the bracketed urls into links.
            bracket_bare_urls(text)
        } else {
            text.to_owned()
        };

        text = replace_all(&AUTOLINK, &text, |caps: &Captures<'_>| {
            let link = group(caps, 1);
            format!(
                r#"<a href="{}">{}</a>"#,
                self.encode_url(link),
                ESCAPES.escape_bold_italic(link)
            )
        });

        if self.options.contains(Options::DISABLE_EMAIL_LINKS) {
            return text;
        }
        replace_all(&EMAIL, &text, |caps: &Captures<'_>| {
            let address = encode_email_chars(&ESCAPES.unescape(group(caps, 1)));
            format!(
                r#"<a href="{}:{}">{}</a>"#,
                encode_email_chars("mailto"),
                address,
                address
            )
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::linkdefs::LinkDef;
    use crate::{Config, Markdown};

    fn links(md: &Markdown, defs: &[(&str, &str, Option<&str>)], text: &str) -> String {
        let mut t = Transformer::new(md);
        for &(id, url, title) in defs {
            t.refs.insert(
                id,
                LinkDef {
                    url: url.to_owned(),
                    title: title.map(str::to_owned),
                },
            );
        }
        let text = t.do_images(text);
        let text = t.do_anchors(&text);
        let text = t.do_auto_links(&text);
        ESCAPES.unescape(&text)
    }

    fn with_options(options: Options) -> Markdown {
        Markdown::new(Config {
            options,
            ..Config::default()
        })
    }

    #[test]
    fn reference_anchor() {
        let md = Markdown::default();
        assert_eq!(
            r#"<a href="/u" title="T">link</a>"#,
            links(&md, &[("ID", "/u", Some("T"))], "[link][id]")
        );
        assert_eq!(
            r#"<a href="/u">Link</a>"#,
            links(&md, &[("link", "/u", None)], "[Link][]")
        );
    }

    #[test]
    fn unresolved_reference_is_kept() {
        let md = Markdown::default();
        assert_eq!("[x][2]", links(&md, &[], "[x][2]"));
        assert_eq!("![x][2]", links(&md, &[], "![x][2]"));
    }

    #[test]
    fn reference_split_over_lines() {
        let md = Markdown::default();
        assert_eq!(
            r#"<a href="/u">a b</a>"#,
            links(&md, &[("1", "/u", None)], "[a b] \n   [1]")
        );
    }

    #[test]
    fn inline_anchor_forms() {
        let md = Markdown::default();
        assert_eq!(
            r#"<a href="/u" title="Say &quot;hi&quot;">x</a>"#,
            links(&md, &[], r#"[x](/u 'Say "hi"')"#)
        );
        assert_eq!(
            r#"<a href="/wiki/A_(b)">nested [brackets]</a>"#,
            links(&md, &[], "[nested [brackets]](/wiki/A_(b))")
        );
        assert_eq!(
            r#"<a href="http://e.com/">angle</a>"#,
            links(&md, &[], "[angle](<http://e.com/>)")
        );
    }

    #[test]
    fn images() {
        let md = Markdown::default();
        assert_eq!(
            r#"<img src="/a.png" alt="A &quot;pic&quot;" title="T" />"#,
            links(&md, &[], r#"![A "pic"](/a.png "T")"#)
        );
        assert_eq!(
            r#"<img src="/a.png" alt="alt" />"#,
            links(&md, &[], "![alt](</a.png>)")
        );
        assert_eq!(
            r#"<img src="/r.png" alt="ref" title="RT" />"#,
            links(&md, &[("ref", "/r.png", Some("RT"))], "![ref][]")
        );
    }

    #[test]
    fn url_encoding_option() {
        let md = with_options(Options::ENABLE_URL_ENCODING);
        assert_eq!(
            r#"<a href="http://e.com:80/a%28b%29">x</a>"#,
            links(&md, &[], "[x](http://e.com:80/a(b))")
        );
    }

    #[test]
    fn autolinks() {
        let md = Markdown::default();
        assert_eq!(
            r#"see <a href="http://e.com/a_b_">http://e.com/a_b_</a>"#,
            links(&md, &[], "see <http://e.com/a_b_>")
        );
        assert_eq!("see http://e.com", links(&md, &[], "see http://e.com"));
    }

    #[test]
    fn bare_urls_with_auto_hyperlink() {
        let md = with_options(Options::ENABLE_AUTO_HYPERLINK);
        assert_eq!(
            r#"see <a href="http://e.com/x">http://e.com/x</a>."#,
            links(&md, &[], "see http://e.com/x.")
        );
        assert_eq!(
            r#"<a href="http://e.com">http://e.com</a>"#,
            links(&md, &[], "[http://e.com](http://e.com)")
        );
    }

    #[test]
    fn bare_urls_in_code_and_attributes() {
        let md = with_options(Options::ENABLE_AUTO_HYPERLINK);
        assert_eq!(
            "<code>curl http://e.com/x</code>",
            links(&md, &[], "<code>curl http://e.com/x</code>")
        );
        assert_eq!(
            r#"<img src="/a.png" alt="see http://e.com" />"#,
            links(&md, &[], "![see http://e.com](/a.png)")
        );
        assert_eq!(
            r#"<code>a</code> <a href="http://e.com">http://e.com</a>"#,
            links(&md, &[], "<code>a</code> http://e.com")
        );
    }

    #[test]
    fn link_free_elements() {
        assert_eq!(1, link_free_depth("<CODE>"));
        assert_eq!(1, link_free_depth(r#"<a href="/u">"#));
        assert_eq!(-1, link_free_depth("</a>"));
        assert_eq!(0, link_free_depth("<a name=x />"));
        assert_eq!(0, link_free_depth("<abbr>"));
        assert_eq!(0, link_free_depth("<!-- code -->"));
    }

    #[test]
    fn attribute_values_are_escaped() {
        let md = Markdown::default();
        assert_eq!(
            r#"<img src="/a.png" alt="1 &lt; 2 &amp; 3" title="x &gt; y" />"#,
            links(&md, &[], r#"![1 < 2 & 3](/a.png "x > y")"#)
        );
    }

    #[test]
    fn email_is_obfuscated() {
        let md = Markdown::default();
        let expected = format!(
            r#"<a href="{0}:{1}">{1}</a>"#,
            "&#x6d;&#x61;&#x69;&#x6c;&#x74;&#x6f;",
            "&#x61;&#x40;&#x62;&#x2e;&#x63;&#x6f;"
        );
        assert_eq!(expected, links(&md, &[], "<a@b.co>"));
        assert_eq!(expected, links(&md, &[], "<mailto:a@b.co>"));
    }

    #[test]
    fn email_links_disabled() {
        let md = with_options(Options::DISABLE_EMAIL_LINKS);
        assert_eq!("<a@b.co>", links(&md, &[], "<a@b.co>"));
    }
}
