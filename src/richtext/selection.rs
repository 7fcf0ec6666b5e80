//! Selection-based edits of a text field.
//!
//! Offsets count characters, not bytes, so Cyrillic text behaves the same
//! as ASCII. Out-of-range offsets are clamped to the end of the text.

use crate::error::{AppError, Result};

/// A selected range `[start, end)` in character offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    /// Build a selection; reversed bounds are swapped.
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start: start.min(end),
            end: start.max(end),
        }
    }

    /// A collapsed selection (plain cursor).
    pub fn caret(at: usize) -> Self {
        Self { start: at, end: at }
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Clamp both offsets to the length of `text` in characters.
    pub fn clamp_to(self, text: &str) -> Self {
        let len = text.chars().count();
        Self::new(self.start.min(len), self.end.min(len))
    }
}

/// Result of an edit: the new text and where the cursor goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub text: String,
    pub cursor: usize,
}

impl Edit {
    fn unchanged(text: &str, selection: Selection) -> Self {
        Self {
            text: text.to_string(),
            cursor: selection.end,
        }
    }
}

/// Inline tags the formatting buttons apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineTag {
    Bold,
    Italic,
    Underline,
}

impl InlineTag {
    pub fn name(self) -> &'static str {
        match self {
            InlineTag::Bold => "b",
            InlineTag::Italic => "i",
            InlineTag::Underline => "u",
        }
    }
}

fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

/// Split into (before, selected, after).
fn parts(text: &str, selection: Selection) -> (&str, &str, &str) {
    let start = byte_offset(text, selection.start);
    let end = byte_offset(text, selection.end).max(start);
    (&text[..start], &text[start..end], &text[end..])
}

/// Replace the selection with `make(selected)`; the cursor lands right
/// after the replacement.
fn replace(text: &str, selection: Selection, make: impl FnOnce(&str) -> String) -> Edit {
    let (before, selected, after) = parts(text, selection);
    let replacement = make(selected);
    let cursor = before.chars().count() + replacement.chars().count();
    Edit {
        text: format!("{before}{replacement}{after}"),
        cursor,
    }
}

fn link_target(text: &str, selection: Selection, url: &str) -> Result<String> {
    let selection = selection.clamp_to(text);
    if selection.is_empty() {
        return Err(AppError::validation("select the text to turn into a link"));
    }
    let url = url.trim();
    if url.is_empty() {
        return Err(AppError::validation("link URL must not be empty"));
    }
    Ok(url.to_string())
}

/// Replace the selection `S` with `[S](url)`.
pub fn insert_markdown_link(text: &str, selection: Selection, url: &str) -> Result<Edit> {
    let url = link_target(text, selection, url)?;
    Ok(replace(text, selection, |s| format!("[{s}]({url})")))
}

/// Replace the selection `S` with an anchor opening in a new tab.
pub fn insert_html_link(text: &str, selection: Selection, url: &str) -> Result<Edit> {
    let url = link_target(text, selection, url)?;
    Ok(replace(text, selection, |s| {
        format!(r#"<a href="{url}" target="_blank" rel="noopener noreferrer">{s}</a>"#)
    }))
}

pub fn wrap_selection(text: &str, selection: Selection, tag: InlineTag) -> Edit {
    let selection = selection.clamp_to(text);
    if selection.is_empty() {
        return Edit::unchanged(text, selection);
    }
    let tag = tag.name();
    replace(text, selection, |s| format!("<{tag}>{s}</{tag}>"))
}

pub fn center_selection(text: &str, selection: Selection) -> Edit {
    let selection = selection.clamp_to(text);
    if selection.is_empty() {
        return Edit::unchanged(text, selection);
    }
    replace(text, selection, |s| {
        format!(r#"<div style="text-align:center">{s}</div>"#)
    })
}

/// Strip every tag inside the selection, keeping its text.
pub fn clear_formatting(text: &str, selection: Selection) -> Edit {
    let selection = selection.clamp_to(text);
    if selection.is_empty() {
        return Edit::unchanged(text, selection);
    }
    replace(text, selection, strip_tags)
}

fn strip_tags(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        match rest[open..].find('>') {
            Some(close) => rest = &rest[open + close + 1..],
            // An unterminated tag runs to the end of the selection.
            None => rest = "",
        }
    }
    out.push_str(rest);
    out
}
