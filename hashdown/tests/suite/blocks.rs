use super::super::test_markdown_html;
use hashdown::Options;

#[test]
fn blocks_test_1() {
    let original = r##"Here is a quote

> Sample blockquote
"##;
    let expected = r##"<p>Here is a quote</p>

<blockquote>
  <p>Sample blockquote</p>
</blockquote>
"##;

    test_markdown_html(original, expected, Options::empty());
}

#[test]
fn blocks_test_2() {
    let original = r##"A numbered list:

1. a
2. b
3. c
"##;
    let expected = r##"<p>A numbered list:</p>

<ol>
<li>a</li>
<li>b</li>
<li>c</li>
</ol>
"##;

    test_markdown_html(original, expected, Options::empty());
}

#[test]
fn blocks_test_3() {
    let original = r##"A bulleted list:

- a
- b
- c
"##;
    let expected = r##"<p>A bulleted list:</p>

<ul>
<li>a</li>
<li>b</li>
<li>c</li>
</ul>
"##;

    test_markdown_html(original, expected, Options::empty());
}

#[test]
fn blocks_test_4() {
    let original = "#Header 1\nHeader 1\n========";
    let expected = "<h1>Header 1</h1>\n\n<h1>Header 1</h1>\n";

    test_markdown_html(original, expected, Options::empty());
}

#[test]
fn blocks_test_5() {
    let original = "##Header 2\nHeader 2\n--------";
    let expected = "<h2>Header 2</h2>\n\n<h2>Header 2</h2>\n";

    test_markdown_html(original, expected, Options::empty());
}

#[test]
fn blocks_test_6() {
    let original = r##"code sample:

    <head>
    <title>page title</title>
    </head>
"##;
    let expected = r##"<p>code sample:</p>

<pre><code>&lt;head&gt;
&lt;title&gt;page title&lt;/title&gt;
&lt;/head&gt;
</code></pre>
"##;

    test_markdown_html(original, expected, Options::empty());
}

#[test]
fn blocks_test_7() {
    let original = "<div>\nHello World!\n</div>\n";
    let expected = "<div>\nHello World!\n</div>\n";

    test_markdown_html(original, expected, Options::empty());
}

#[test]
fn blocks_test_8() {
    let original = "* * *\n\n***\n\n*****\n\n- - -\n\n---------------------------------------\n\n";
    let expected = "<hr />\n\n<hr />\n\n<hr />\n\n<hr />\n\n<hr />\n";

    test_markdown_html(original, expected, Options::empty());
}

#[test]
fn blocks_test_9() {
    let original = "# H";
    let expected = "<h1>H</h1>\n";

    test_markdown_html(original, expected, Options::empty());
    test_markdown_html("H\n=", expected, Options::empty());
}

#[test]
fn blocks_test_10() {
    let original = r##"- loose

- items
"##;
    let expected = r##"<ul>
<li><p>loose</p></li>
<li><p>items</p></li>
</ul>
"##;

    test_markdown_html(original, expected, Options::empty());
}

#[test]
fn blocks_test_11() {
    let original = "Here is some code:\n\n\tfn main() {}\n";
    let expected = "<p>Here is some code:</p>\n\n<pre><code>fn main() {}\n</code></pre>\n";

    test_markdown_html(original, expected, Options::empty());
}
