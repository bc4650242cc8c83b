use super::super::test_markdown_html;
use hashdown::Options;

#[test]
fn spans_test_1() {
    let original = "This is **bold**. This is also __bold__.";
    let expected = "<p>This is <strong>bold</strong>. This is also <strong>bold</strong>.</p>\n";

    test_markdown_html(original, expected, Options::empty());
}

#[test]
fn spans_test_2() {
    let original = "This is *italic*. This is also _italic_.";
    let expected = "<p>This is <em>italic</em>. This is also <em>italic</em>.</p>\n";

    test_markdown_html(original, expected, Options::empty());
}

#[test]
fn spans_test_3() {
    let original = "This is [a link][1].\n\n  [1]: http://www.example.com";
    let expected = "<p>This is <a href=\"http://www.example.com\">a link</a>.</p>\n";

    test_markdown_html(original, expected, Options::empty());
}

#[test]
fn spans_test_4() {
    let original = "Have you visited <http://www.example.com> before?";
    let expected = "<p>Have you visited <a href=\"http://www.example.com\">http://www.example.com</a> before?</p>\n";

    test_markdown_html(original, expected, Options::empty());
}

#[test]
fn spans_test_5() {
    let original = "Have you visited http://www.example.com before?";
    let expected = "<p>Have you visited http://www.example.com before?</p>\n";

    test_markdown_html(original, expected, Options::empty());
}

#[test]
fn spans_test_6() {
    let original = "Have you visited [example](http://www.example.com) before?";
    let expected = "<p>Have you visited <a href=\"http://www.example.com\">example</a> before?</p>\n";

    test_markdown_html(original, expected, Options::empty());
}

#[test]
fn spans_test_7() {
    let original = "An image goes here: ![alt text][1]\n\n  [1]: http://www.google.com/intl/en_ALL/images/logo.gif";
    let expected = "<p>An image goes here: <img src=\"http://www.google.com/intl/en_ALL/images/logo.gif\" alt=\"alt text\" /></p>\n";

    test_markdown_html(original, expected, Options::empty());
}

#[test]
fn spans_test_8() {
    let original = "HTML contains the `<blink>` tag";
    let expected = "<p>HTML contains the <code>&lt;blink&gt;</code> tag</p>\n";

    test_markdown_html(original, expected, Options::empty());
}

#[test]
fn spans_test_9() {
    let original = r"\`foo\`";
    let expected = "<p>`foo`</p>\n";

    test_markdown_html(original, expected, Options::empty());
}

#[test]
fn spans_test_10() {
    let original = "[x][2]";
    let expected = "<p>[x][2]</p>\n";

    test_markdown_html(original, expected, Options::empty());
}

#[test]
fn spans_test_11() {
    let original = "`*a*` and *a*";
    let expected = "<p><code>*a*</code> and <em>a</em></p>\n";

    test_markdown_html(original, expected, Options::empty());
}

#[test]
fn spans_test_12() {
    let original = "AT&T &amp; 4 < 5";
    let expected = "<p>AT&amp;T &amp; 4 &lt; 5</p>\n";

    test_markdown_html(original, expected, Options::empty());
}

#[test]
fn spans_test_13() {
    let original = "line one  \nline two";
    let expected = "<p>line one<br />\nline two</p>\n";

    test_markdown_html(original, expected, Options::empty());
}
