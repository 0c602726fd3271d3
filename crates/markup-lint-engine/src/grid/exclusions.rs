use std::collections::BTreeMap;

use crate::markup::scan::{self, TagKind, TagScanner};

/// Byte ranges of a container that belong to nested containers of the same
/// kind. Keys are range starts, values are inclusive range ends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionMap(BTreeMap<usize, usize>);

impl ExclusionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, start: usize, end: usize) {
        self.0.insert(start, end);
    }

    /// Whether `offset` falls inside any range.
    pub fn contains(&self, offset: usize) -> bool {
        self.0
            .range(..=offset)
            .next_back()
            .is_some_and(|(_, end)| offset <= *end)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.0.iter().map(|(s, e)| (*s, *e))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NestState {
    Scanning,
    InNestedOpen { depth: usize, body_start: usize },
    Closed,
}

/// Ranges of `container` occupied by the bodies of nested `element`s.
///
/// Each top-level nested element contributes the range from just past its
/// opening tag to the `>` of its closing tag, so attributes on the nested
/// opening tag itself still belong to the outer container. Self-closing nested
/// elements have no body and are ignored, and a nested element that never
/// closes contributes nothing.
pub fn get_exclusions(container: &str, element: &str) -> ExclusionMap {
    let mut exclusions = ExclusionMap::new();
    let Some(open) = scan::opening_tag(container).filter(|t| t.kind == TagKind::Open) else {
        return exclusions;
    };

    let mut state = NestState::Scanning;
    for tag in TagScanner::starting_at(container, open.end) {
        if tag.name != element {
            continue;
        }
        state = match (state, tag.kind) {
            (NestState::Closed, _) => break,
            (state, TagKind::SelfClosing) => state,
            (NestState::Scanning, TagKind::Open) => NestState::InNestedOpen {
                depth: 1,
                body_start: tag.end,
            },
            (NestState::Scanning, TagKind::Close) => NestState::Closed,
            (NestState::InNestedOpen { depth, body_start }, TagKind::Open) => {
                NestState::InNestedOpen {
                    depth: depth + 1,
                    body_start,
                }
            }
            (NestState::InNestedOpen { depth: 1, body_start }, TagKind::Close) => {
                exclusions.insert(body_start, tag.end - 1);
                NestState::Scanning
            }
            (NestState::InNestedOpen { depth, body_start }, TagKind::Close) => {
                NestState::InNestedOpen {
                    depth: depth - 1,
                    body_start,
                }
            }
        };
        if state == NestState::Closed {
            break;
        }
    }

    if let NestState::InNestedOpen { body_start, .. } = state {
        log::debug!("nested `{element}` opened at {body_start} is never closed");
    }
    exclusions
}
