//! Splits pasted text into URL entries and their `!`-directive overrides.
//!
//! ```text
//! https://example.com/post
//! !title My own title
//! !desc  Short blurb
//! !image https://example.com/cover.png
//! ```

use crate::utils::has_http_scheme;

const DIRECTIVE_SENTINEL: char = '!';

/// User-supplied values that take precedence over scraped metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Override {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

impl Override {
    /// No field was supplied.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.image.is_none()
    }

    /// Every field was supplied, so nothing needs to be fetched.
    pub fn is_complete(&self) -> bool {
        self.title.is_some() && self.description.is_some() && self.image.is_some()
    }

    fn apply(&mut self, directive: Directive) {
        match directive {
            Directive::Title(v) => self.title = Some(v),
            Directive::Description(v) => self.description = Some(v),
            Directive::Image(v) => self.image = Some(v),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEntry {
    pub url: String,
    pub overrides: Override,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Title(String),
    Description(String),
    Image(String),
}

impl Directive {
    /// Parse a single trimmed line. Unknown keywords yield `None`.
    pub fn parse(line: &str) -> Option<Directive> {
        let body = line.strip_prefix(DIRECTIVE_SENTINEL)?;

        if let Some(value) = body.strip_prefix("title ") {
            Some(Directive::Title(value.trim().to_string()))
        } else if let Some(value) = body.strip_prefix("desc ") {
            Some(Directive::Description(value.trim().to_string()))
        } else if let Some(value) = body.strip_prefix("image ") {
            Some(Directive::Image(value.trim().to_string()))
        } else {
            None
        }
    }
}

pub fn is_url_line(line: &str) -> bool {
    has_http_scheme(line)
}

/// Scan `raw` line by line, emitting one entry per URL line in input order.
///
/// Directives only bind to the URL directly above them. The first `!` line
/// with an unknown keyword ends the block and is then skipped like any other
/// non-URL line.
pub fn parse_entries(raw: &str) -> Vec<ParsedEntry> {
    let lines: Vec<&str> = raw.lines().map(str::trim).collect();
    let mut entries = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        i += 1;

        if !is_url_line(line) {
            continue;
        }

        let mut overrides = Override::default();
        while let Some(directive) = lines.get(i).and_then(|next| Directive::parse(next)) {
            overrides.apply(directive);
            i += 1;
        }

        entries.push(ParsedEntry {
            url: line.to_string(),
            overrides,
        });
    }

    entries
}
