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


//! Command line tool to convert Markdown files with hashdown.

#![forbid(unsafe_code)]

use hashdown::{html, Config, EmptyElementSuffix, Markdown, Options, TabWidth};

use std::env;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::PathBuf;

fn dry_run(text: &str, md: &Markdown) {
    let html = md.transform(text);
    println!("{} bytes", html.len());
}

fn brief(program: &str) -> String {
    format!(
        "Usage: {} [options] [FILE]...\n\n{}",
        program, "Reads markdown from files or standard input and emits HTML.",
    )
}

pub fn main() -> std::io::Result<()> {
    env_logger::init();

    let args: Vec<_> = env::args().collect();
    let mut opts = getopts::Options::new();
    opts.optflag("h", "help", "this help message");
    opts.optflag("d", "dry-run", "dry run, only print the output size");
    opts.optflag("a", "auto-hyperlink", "turn bare URLs into links");
    opts.optflag("n", "auto-newlines", "treat newlines in paragraphs as breaks");
    opts.optflag("s", "strict-emphasis", "no emphasis inside words");
    opts.optflag("u", "encode-urls", "percent-encode problem characters in URLs");
    opts.optflag("", "no-email-links", "leave <user@host> alone");
    opts.optflag("", "html", "close empty elements with > instead of />");
    opts.optopt("t", "tab-width", "columns between tab stops (default 4)", "N");

    let matches = match opts.parse(&args[1..]) {
        Ok(m) => m,
        Err(f) => {
            eprintln!("{}\n{}", f, opts.usage(&brief(&args[0])));
            std::process::exit(1);
        }
    };
    if matches.opt_present("help") {
        println!("{}", opts.usage(&brief(&args[0])));
        return Ok(());
    }

    let mut config = Config::default();
    if matches.opt_present("auto-hyperlink") {
        config.options.insert(Options::ENABLE_AUTO_HYPERLINK);
    }
    if matches.opt_present("auto-newlines") {
        config.options.insert(Options::ENABLE_AUTO_NEWLINES);
    }
    if matches.opt_present("strict-emphasis") {
        config.options.insert(Options::ENABLE_STRICT_EMPHASIS);
    }
    if matches.opt_present("encode-urls") {
        config.options.insert(Options::ENABLE_URL_ENCODING);
    }
    if matches.opt_present("no-email-links") {
        config.options.insert(Options::DISABLE_EMAIL_LINKS);
    }
    if matches.opt_present("html") {
        config.empty_element_suffix = EmptyElementSuffix::Html;
    }
    if let Some(width) = matches.opt_str("tab-width") {
        let width = width
            .parse::<usize>()
            .map_err(|e| e.to_string())
            .and_then(|w| TabWidth::try_from(w).map_err(|e| e.to_string()));
        match width {
            Ok(width) => config.tab_width = width,
            Err(e) => {
                eprintln!("--tab-width: {}\n{}", e, opts.usage(&brief(&args[0])));
                std::process::exit(1);
            }
        }
    }
    let md = Markdown::new(config);

    let stdio = io::stdout();
    let mut buffer = io::BufWriter::with_capacity(1024 * 1024, stdio.lock());
    if !matches.free.is_empty() {
        for filename in &matches.free {
            let mut input = String::new();
            let real_path = PathBuf::from(filename);
            File::open(&real_path)?.read_to_string(&mut input)?;
            if matches.opt_present("dry-run") {
                dry_run(&input, &md);
            } else {
                html::write_html_io(&mut buffer, &md, &input)?;
            }
        }
    } else {
        let mut input = String::new();
        io::stdin().lock().read_to_string(&mut input)?;
        if matches.opt_present("dry-run") {
            dry_run(&input, &md);
        } else {
            html::write_html_io(&mut buffer, &md, &input)?;
        }
    }
    buffer.flush()
}
