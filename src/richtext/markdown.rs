//! Markdown links in book and association entries, and bare-URL linking.

use std::sync::LazyLock;

use regex::Regex;

use super::split_keep;

static MARKDOWN_LINK: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\[([^\]\n]+)\]\(([^)\s]+)\)").ok());

static BARE_URL: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"https?://\S+").ok());

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Link { label: String, url: String },
}

/// Split `[label](url)` links out of an entry; everything else is text.
pub fn render_markdown_links(text: &str) -> Vec<Segment> {
    let Some(re) = MARKDOWN_LINK.as_ref() else {
        return vec![Segment::Text(text.to_string())];
    };
    let mut segments = Vec::new();
    let mut last = 0;
    for caps in re.captures_iter(text) {
        let (Some(whole), Some(label), Some(url)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        if whole.start() > last {
            segments.push(Segment::Text(text[last..whole.start()].to_string()));
        }
        segments.push(Segment::Link {
            label: label.as_str().to_string(),
            url: url.as_str().to_string(),
        });
        last = whole.end();
    }
    if last < text.len() {
        segments.push(Segment::Text(text[last..].to_string()));
    }
    segments
}

/// One segment list per line, with bare `http(s)://` URLs as links.
pub fn autolink(text: &str) -> Vec<Vec<Segment>> {
    text.split('\n')
        .map(|line| match BARE_URL.as_ref() {
            Some(re) => split_keep(re, line)
                .into_iter()
                .map(|piece| {
                    if piece.starts_with("http://") || piece.starts_with("https://") {
                        Segment::Link {
                            label: piece.to_string(),
                            url: piece.to_string(),
                        }
                    } else {
                        Segment::Text(piece.to_string())
                    }
                })
                .collect(),
            None => vec![Segment::Text(line.to_string())],
        })
        .collect()
}
