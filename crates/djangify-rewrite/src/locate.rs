//! Locating the value that belongs to a keyword.
//!
//! Location is a nearest-delimiter search, not a tokenizer. It assumes simple
//! `keyword="value"` syntax and can pick up more than the quoted value on
//! irregular input such as `src = "a.png"`. That behavior is relied upon and
//! is kept as is by [`HeuristicLocator`].

use crate::keyword::Keyword;

/// Byte range of a value inside a line.
///
/// Both offsets are on character boundaries of the line they were computed
/// for, with `start <= end <= line.len()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Offset of the first byte of the value.
    pub start: usize,
    /// Offset one past the last byte of the value.
    pub end: usize,
}

impl Span {
    /// Create a span from its offsets.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length of the span in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span covers no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Strategy for finding the value of a keyword within a line.
///
/// Implementations must return spans that satisfy the [`Span`] invariants for
/// the given line. [`LineRewriter`](crate::LineRewriter) skips spans that do
/// not.
pub trait SpanLocator {
    /// Locate the value of the first occurrence of `keyword` in `line`.
    ///
    /// Returns `None` if the keyword does not occur or the line ends before a
    /// value can start.
    fn locate(&self, line: &str, keyword: Keyword) -> Option<Span>;
}

/// Default locator based on the characters right after the keyword.
///
/// - `src` / `href`: the value starts two characters after the keyword
///   (skipping `=` and the opening quote) and runs up to the next occurrence
///   of the second character.
/// - `url`: as above when the second character is a quote. Otherwise the
///   value starts one character after the keyword; if that character is `(`
///   the value runs up to the next `)`, else up to the next repeat of it.
///
/// A value without a closing delimiter runs to the end of the line, not
/// counting the line terminator.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicLocator;

impl SpanLocator for HeuristicLocator {
    fn locate(&self, line: &str, keyword: Keyword) -> Option<Span> {
        let keyword_end = line.find(keyword.as_str())? + keyword.as_str().len();

        let mut following = line[keyword_end..]
            .char_indices()
            .map(|(offset, ch)| (keyword_end + offset, ch));
        let first = following.next()?;
        let second = following.next();

        let (start, delimiter) = match (keyword, second) {
            (Keyword::Url, Some((offset, ch))) if is_quote(ch) => (offset + ch.len_utf8(), ch),
            (Keyword::Url, _) => {
                let (offset, ch) = first;
                let closing = if ch == '(' { ')' } else { ch };
                (offset + ch.len_utf8(), closing)
            }
            (Keyword::Src | Keyword::Href, Some((offset, ch))) => (offset + ch.len_utf8(), ch),
            (Keyword::Src | Keyword::Href, None) => return None,
        };

        let content_end = content_end(line);
        if start > content_end {
            return None;
        }

        let end = line[start..content_end]
            .find(delimiter)
            .map_or(content_end, |offset| start + offset);
        Some(Span::new(start, end))
    }
}

fn is_quote(ch: char) -> bool {
    matches!(ch, '\'' | '"')
}

/// Length of `line` without its trailing line terminator.
fn content_end(line: &str) -> usize {
    line.trim_end_matches(['\r', '\n']).len()
}
