//! Tag-level scanning over raw markup.
//!
//! [`TagScanner`] walks a document once and yields every opening, closing and
//! self-closing tag with its exact byte range. Comments, CDATA sections,
//! processing instructions and declarations are skipped, and a `>` inside a
//! quoted attribute value does not end a tag. Everything else in the engine
//! (extraction, tree building, grid exclusions) is layered on this iterator.

use crate::{span::Span, text::Cursor};

const COMMENT_OPEN: &[u8] = b"<!--";
const CDATA_OPEN: &[u8] = b"<![CDATA[";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// `<Name ...>`
    Open,
    /// `</Name>`
    Close,
    /// `<Name ... />`
    SelfClosing,
}

/// One tag found by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag<'a> {
    pub kind: TagKind,
    /// Tag name as written, including any namespace prefix.
    pub name: &'a str,
    /// Offset of the `<`.
    pub start: usize,
    /// Offset one past the closing `>`.
    pub end: usize,
}

impl Tag<'_> {
    pub fn span(&self) -> Span {
        Span::from_bounds(self.start, self.end)
    }

    /// Whether this tag opens an element (including self-closing elements).
    pub fn opens(&self) -> bool {
        !matches!(self.kind, TagKind::Close)
    }
}

/// Iterator over the tags of a document, in document order.
#[derive(Debug, Clone)]
pub struct TagScanner<'a> {
    cur: Cursor<'a>,
}

enum TagEnd {
    Closed { self_closing: bool },
    /// Another `<` appeared before the tag was closed.
    Interrupted,
    Eof,
}

impl<'a> TagScanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Self::starting_at(text, 0)
    }

    /// Starts scanning at `offset`. The offset must not be inside a tag.
    pub fn starting_at(text: &'a str, offset: usize) -> Self {
        Self {
            cur: Cursor::new(text, offset),
        }
    }

    /// Skips a region opened at the cursor by `open` and closed by `close`.
    /// Returns `false` if the region runs to the end of the text.
    fn skip_region(&mut self, open: usize, close: &str) -> bool {
        self.cur.bump_n(open);
        if !self.cur.seek(close) {
            return false;
        }
        self.cur.bump_n(close.len());
        true
    }

    /// Consumes the rest of a tag after its name, honoring quoted values.
    fn finish_tag(&mut self) -> TagEnd {
        let mut quote: Option<u8> = None;
        let mut prev = 0u8;
        while let Some(b) = self.cur.peek() {
            match (quote, b) {
                (Some(q), _) if b == q => quote = None,
                (Some(_), _) => {}
                (None, b'"' | b'\'') => quote = Some(b),
                (None, b'>') => {
                    self.cur.bump();
                    return TagEnd::Closed {
                        self_closing: prev == b'/',
                    };
                }
                (None, b'<') => return TagEnd::Interrupted,
                (None, _) => {}
            }
            prev = b;
            self.cur.bump();
        }
        TagEnd::Eof
    }
}

impl<'a> Iterator for TagScanner<'a> {
    type Item = Tag<'a>;

    fn next(&mut self) -> Option<Tag<'a>> {
        while self.cur.seek("<") {
            let start = self.cur.pos();

            if self.cur.starts_with(COMMENT_OPEN) {
                self.cur.i = comment_end(self.cur.s, start)?;
                continue;
            }
            if self.cur.starts_with(CDATA_OPEN) {
                if !self.skip_region(CDATA_OPEN.len(), "]]>") {
                    return None;
                }
                continue;
            }
            if self.cur.starts_with(b"<?") {
                if !self.skip_region(2, "?>") {
                    return None;
                }
                continue;
            }
            if self.cur.starts_with(b"<!") {
                if !self.skip_region(2, ">") {
                    return None;
                }
                continue;
            }

            self.cur.bump(); // <
            let closing = self.cur.peek() == Some(b'/');
            if closing {
                self.cur.bump();
            }
            let name = self.cur.take_while(is_name_byte);
            if name.is_empty() {
                // Stray `<` in text content
                continue;
            }

            match self.finish_tag() {
                TagEnd::Closed { self_closing } => {
                    let kind = match (closing, self_closing) {
                        (true, _) => TagKind::Close,
                        (false, true) => TagKind::SelfClosing,
                        (false, false) => TagKind::Open,
                    };
                    return Some(Tag {
                        kind,
                        name,
                        start,
                        end: self.cur.pos(),
                    });
                }
                TagEnd::Interrupted => {
                    log::debug!("tag `{name}` at {start} is interrupted by another tag");
                }
                TagEnd::Eof => return None,
            }
        }
        None
    }
}

fn is_name_byte(b: u8) -> bool {
    !b.is_ascii_whitespace() && !matches!(b, b'>' | b'/' | b'<' | b'"' | b'\'' | b'=')
}

/// Returns the offset one past the end of the comment opened at `start`.
///
/// Accepts whitespace between the closing `--` and `>`, which some editors
/// produce. Returns `None` for an unterminated comment.
pub fn comment_end(text: &str, start: usize) -> Option<usize> {
    let mut cur = Cursor::new(text, start + COMMENT_OPEN.len());
    while cur.seek("--") {
        cur.bump_n(2);
        let after_dashes = cur.pos();
        cur.skip_whitespace();
        if cur.peek() == Some(b'>') {
            return Some(cur.pos() + 1);
        }
        cur.i = after_dashes;
    }
    None
}

/// Spans of every comment in `text`. An unterminated comment runs to the end.
pub fn comment_spans(text: &str) -> Vec<Span> {
    let mut spans = vec![];
    let mut pos = 0;
    while let Some(rel) = text.get(pos..).and_then(|rest| rest.find("<!--")) {
        let start = pos + rel;
        let end = comment_end(text, start).unwrap_or(text.len());
        spans.push(Span::from_bounds(start, end));
        pos = end;
    }
    spans
}

/// Whether `offset` lies inside any of `comments`.
pub fn in_comment(comments: &[Span], offset: usize) -> bool {
    comments.iter().any(|c| c.contains(offset))
}

/// The first tag of `text` if it opens an element.
pub fn opening_tag(text: &str) -> Option<Tag<'_>> {
    TagScanner::new(text).next().filter(Tag::opens)
}

/// Name of the element whose markup starts `text`.
pub fn element_name(text: &str) -> Option<&str> {
    opening_tag(text).map(|t| t.name)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NestState {
    Scanning,
    InNestedOpen(usize),
}

/// Finds the closing tag that matches `open`.
///
/// Same-named elements nested inside `open` must each be closed before the
/// match is accepted. Returns `None` for self-closing tags and for elements that
/// are never closed.
pub fn matching_close<'a>(text: &'a str, open: &Tag<'_>) -> Option<Tag<'a>> {
    if open.kind != TagKind::Open {
        return None;
    }
    let mut state = NestState::Scanning;
    for tag in TagScanner::starting_at(text, open.end) {
        if tag.name != open.name {
            continue;
        }
        state = match (state, tag.kind) {
            (NestState::Scanning, TagKind::Close) => return Some(tag),
            (NestState::Scanning, TagKind::Open) => NestState::InNestedOpen(1),
            (NestState::InNestedOpen(depth), TagKind::Open) => NestState::InNestedOpen(depth + 1),
            (NestState::InNestedOpen(1), TagKind::Close) => NestState::Scanning,
            (NestState::InNestedOpen(depth), TagKind::Close) => NestState::InNestedOpen(depth - 1),
            (state, TagKind::SelfClosing) => state,
        };
    }
    None
}

/// Offset one past the end of the element opened by `open`.
pub fn element_end(text: &str, open: &Tag<'_>) -> Option<usize> {
    match open.kind {
        TagKind::SelfClosing => Some(open.end),
        TagKind::Open => matching_close(text, open).map(|close| close.end),
        TagKind::Close => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(text: &str) -> Vec<(TagKind, &str)> {
        TagScanner::new(text).map(|t| (t.kind, t.name)).collect()
    }

    #[test]
    fn scans_open_close_and_self_closing() {
        assert_eq!(
            kinds("<Grid><Button /></Grid>"),
            vec![
                (TagKind::Open, "Grid"),
                (TagKind::SelfClosing, "Button"),
                (TagKind::Close, "Grid"),
            ]
        );
    }

    #[test]
    fn tag_offsets_are_exact() {
        let text = "ab<Grid x=\"1\">cd</Grid>";
        let tags: Vec<_> = TagScanner::new(text).collect();
        assert_eq!(tags[0].span().slice(text), Some("<Grid x=\"1\">"));
        assert_eq!(tags[1].span().slice(text), Some("</Grid>"));
    }

    #[test]
    fn quoted_gt_does_not_end_tag() {
        let text = "<TextBlock Text=\"a > b\" />";
        let tags: Vec<_> = TagScanner::new(text).collect();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].kind, TagKind::SelfClosing);
        assert_eq!(tags[0].end, text.len());
    }

    #[test]
    fn comments_are_skipped() {
        assert_eq!(
            kinds("<!-- <Grid> --><Button/>"),
            vec![(TagKind::SelfClosing, "Button")]
        );
    }

    #[test]
    fn comment_with_spaced_terminator_is_skipped() {
        assert_eq!(
            kinds("<!--\n<Grid>\n-- ><Button/>"),
            vec![(TagKind::SelfClosing, "Button")]
        );
    }

    #[test]
    fn unterminated_comment_hides_rest() {
        assert!(kinds("<!-- <Grid></Grid>").is_empty());
    }

    #[test]
    fn declarations_and_cdata_are_skipped() {
        let text = "<?xml version=\"1.0\"?><!DOCTYPE x><A><![CDATA[<B>]]></A>";
        assert_eq!(kinds(text), vec![(TagKind::Open, "A"), (TagKind::Close, "A")]);
    }

    #[test]
    fn truncated_tag_yields_nothing() {
        assert_eq!(kinds("<Grid><Button Content=\"x\""), vec![(TagKind::Open, "Grid")]);
    }

    #[test]
    fn interrupted_tag_is_dropped() {
        assert_eq!(kinds("<Button <Grid/>"), vec![(TagKind::SelfClosing, "Grid")]);
    }

    #[test]
    fn namespaced_names_are_kept() {
        assert_eq!(kinds("<controls:Grid/>"), vec![(TagKind::SelfClosing, "controls:Grid")]);
    }

    #[test]
    fn matching_close_skips_nested_same_name() {
        let text = "<Grid><Grid></Grid><Grid/></Grid>";
        let open = opening_tag(text).unwrap();
        let close = matching_close(text, &open).unwrap();
        assert_eq!(close.end, text.len());
    }

    #[test]
    fn matching_close_of_unclosed_is_none() {
        let text = "<Grid><Grid></Grid>";
        let open = opening_tag(text).unwrap();
        assert_eq!(matching_close(text, &open), None);
        assert_eq!(element_end(text, &open), None);
    }

    #[test]
    fn element_end_of_self_closing() {
        let text = "<Grid /> trailing";
        let open = opening_tag(text).unwrap();
        assert_eq!(element_end(text, &open), Some(8));
    }

    #[test]
    fn comment_spans_cover_comments() {
        let text = "a<!--x-->b<!--y";
        assert_eq!(
            comment_spans(text),
            vec![Span::from_bounds(1, 9), Span::from_bounds(10, text.len())]
        );
        assert!(in_comment(&comment_spans(text), 4));
        assert!(!in_comment(&comment_spans(text), 9));
    }

    #[test]
    fn element_name_of_markup() {
        assert_eq!(element_name("<TextBox Header=\"h\" />"), Some("TextBox"));
        assert_eq!(element_name("</TextBox>"), None);
        assert_eq!(element_name("no markup"), None);
    }
}
