//! Safe rendering of the small HTML subset used in journal sections.
//!
//! Only block breaks (`<div>`, `<p>`, `<br>`, newlines), centring via
//! `text-align:center`, `<b>`/`<i>`/`<u>` and bare URLs are recognised.
//! Everything else stays literal text, so stored markup is never trusted.

use std::sync::LazyLock;

use regex::Regex;

use super::split_keep;

static BLOCK_SPLIT: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?i)<div[^>]*>|</div>|<p[^>]*>|</p>|<br\s*/?>|\n").ok()
});

static CENTER_OPEN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r#"(?i)^<(div|p)[^>]*style\s*=\s*["'][^"']*text-align\s*:\s*center[^"']*["'][^>]*>$"#)
        .ok()
});

static CLOSE_TAG: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"(?i)^</(div|p)>$").ok());

static LINE_BREAK: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"(?i)^<br\s*/?>$").ok());

static URL: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"(?i)https?://[^\s<]+").ok());

fn is_url(s: &str) -> bool {
    let lower = s.get(..8).unwrap_or(s).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

static STYLE_TAG: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"(?i)</?[biu]>").ok());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Justify,
    Center,
}

/// Inline run inside a paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Bold(String),
    Italic(String),
    Underline(String),
    /// A bare URL; label and target are the same.
    Link(String),
}

impl Inline {
    pub fn text(&self) -> &str {
        match self {
            Inline::Text(s)
            | Inline::Bold(s)
            | Inline::Italic(s)
            | Inline::Underline(s)
            | Inline::Link(s) => s,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph { align: Align, content: Vec<Inline> },
    LineBreak,
}

fn matches(re: &LazyLock<Option<Regex>>, s: &str) -> bool {
    re.as_ref().is_some_and(|re| re.is_match(s))
}

/// True when `s` is one whole match of `re`, i.e. a delimiter piece.
fn is_delimiter(re: &LazyLock<Option<Regex>>, s: &str) -> bool {
    re.as_ref()
        .and_then(|re| re.find(s))
        .is_some_and(|m| m.start() == 0 && m.end() == s.len())
}

/// Turn a stored fragment into blocks. Never fails: unknown markup is text.
pub fn render_fragment(html: &str) -> Vec<Block> {
    let pieces = match BLOCK_SPLIT.as_ref() {
        Some(re) => split_keep(re, html),
        None => vec![html],
    };

    let mut blocks = Vec::new();
    let mut align = Align::Justify;
    for piece in pieces {
        if piece == "\n" {
            continue;
        }
        if matches(&CENTER_OPEN, piece) {
            align = Align::Center;
        } else if matches(&CLOSE_TAG, piece) {
            align = Align::Justify;
        } else if matches(&LINE_BREAK, piece) {
            blocks.push(Block::LineBreak);
        } else if is_delimiter(&BLOCK_SPLIT, piece) {
            // other openers only separate blocks
        } else {
            blocks.push(Block::Paragraph {
                align,
                content: render_inline(piece),
            });
        }
    }
    blocks
}

fn render_inline(text: &str) -> Vec<Inline> {
    let mut out = Vec::new();
    let pieces = match URL.as_ref() {
        Some(re) => split_keep(re, text),
        None => vec![text],
    };
    for piece in pieces {
        if is_url(piece) {
            out.push(Inline::Link(piece.to_string()));
        } else {
            render_styled(piece, &mut out);
        }
    }
    out
}

fn render_styled(text: &str, out: &mut Vec<Inline>) {
    let tokens = match STYLE_TAG.as_ref() {
        Some(re) => split_keep(re, text),
        None => vec![text],
    };
    let mut current: Option<char> = None;
    for token in tokens {
        match token.to_ascii_lowercase().as_str() {
            "<b>" => current = Some('b'),
            "<i>" => current = Some('i'),
            "<u>" => current = Some('u'),
            "</b>" | "</i>" | "</u>" => current = None,
            _ => {
                let s = token.to_string();
                out.push(match current {
                    Some('b') => Inline::Bold(s),
                    Some('i') => Inline::Italic(s),
                    Some('u') => Inline::Underline(s),
                    _ => Inline::Text(s),
                });
            }
        }
    }
}

/// Text content of rendered blocks, one line per block.
pub fn plain_text(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(|block| match block {
            Block::Paragraph { content, .. } => content.iter().map(Inline::text).collect::<String>(),
            Block::LineBreak => String::new(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
