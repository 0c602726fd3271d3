//! Element Extractor.
//!
//! Walks a document once and hands every element whose name a sink is
//! interested in to that sink, together with the element's exact markup,
//! absolute offset and line padding.
//!
//! Elements are dispatched when they close, so descendants always reach the
//! sink before their ancestors. Open elements are tracked on an explicit stack
//! rather than by recursion, which keeps deeply nested documents from growing
//! the call stack. An element that is opened but never closed is never
//! dispatched.

use crate::{
    markup::scan::{Tag, TagKind, TagScanner},
    text::line_padding,
};

/// One element handed to an [`ElementSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementSource<'a> {
    /// Tag name as written in the document.
    pub name: &'a str,
    /// Verbatim markup from the opening `<` to the final `>`.
    pub text: &'a str,
    /// Offset of `text` in the document.
    pub offset: usize,
    /// Leading whitespace of the line the element starts on.
    pub line_padding: &'a str,
    /// The whole document, for handlers that need surrounding context.
    pub document: &'a str,
}

/// Receiver for extracted elements.
pub trait ElementSink {
    /// Whether elements with this tag name should be dispatched.
    fn wants(&self, name: &str) -> bool;

    fn element(&mut self, source: ElementSource<'_>);
}

/// Extracts every wanted element of `document` into `sink`.
pub fn extract(document: &str, sink: &mut impl ElementSink) {
    let mut open: Vec<Tag<'_>> = vec![];

    for tag in TagScanner::new(document) {
        match tag.kind {
            TagKind::SelfClosing => {
                if sink.wants(tag.name) {
                    dispatch(document, sink, tag.name, tag.start, tag.end);
                }
            }
            TagKind::Open => open.push(tag),
            TagKind::Close => {
                let Some(pos) = open.iter().rposition(|o| o.name == tag.name) else {
                    log::debug!("closing tag `{}` at {} has no opening tag", tag.name, tag.start);
                    continue;
                };
                let opening = open[pos];
                // Anything opened after the match was never closed.
                open.truncate(pos);
                if sink.wants(tag.name) {
                    dispatch(document, sink, tag.name, opening.start, tag.end);
                }
            }
        }
    }

    if !open.is_empty() {
        log::debug!("{} element(s) left unclosed at end of document", open.len());
    }
}

fn dispatch(document: &str, sink: &mut impl ElementSink, name: &str, start: usize, end: usize) {
    let Some(text) = document.get(start..end) else {
        return;
    };
    sink.element(ElementSource {
        name,
        text,
        offset: start,
        line_padding: line_padding(document, start),
        document,
    });
}
