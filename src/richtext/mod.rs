//! Rich-text helpers for the admin editors and the public pages.
//!
//! Editors store either a small HTML subset (journal sections) or markdown
//! links (books, associations). These helpers edit such text by selection
//! and turn stored text into render-ready segments without ever trusting
//! it as markup.

mod fragment;
mod markdown;
mod selection;

pub use fragment::{Align, Block, Inline, plain_text, render_fragment};
pub use markdown::{Segment, autolink, render_markdown_links};
pub use selection::{
    Edit, InlineTag, Selection, center_selection, clear_formatting, insert_html_link,
    insert_markdown_link, wrap_selection,
};

use regex::Regex;

/// Split `text` around every match of `re`, keeping the matches.
/// Empty pieces are dropped.
pub(crate) fn split_keep<'t>(re: &Regex, text: &'t str) -> Vec<&'t str> {
    let mut pieces = Vec::new();
    let mut last = 0;
    for m in re.find_iter(text) {
        if m.start() > last {
            pieces.push(&text[last..m.start()]);
        }
        if !m.as_str().is_empty() {
            pieces.push(m.as_str());
        }
        last = m.end();
    }
    if last < text.len() {
        pieces.push(&text[last..]);
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_keep() {
        let re = Regex::new(r"<br>").unwrap();
        assert_eq!(split_keep(&re, "a<br>b<br>"), ["a", "<br>", "b", "<br>"]);
        assert_eq!(split_keep(&re, ""), Vec::<&str>::new());
        assert_eq!(split_keep(&re, "plain"), ["plain"]);
    }
}
