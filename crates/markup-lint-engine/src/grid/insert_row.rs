//! Insert-row-definition command.
//!
//! Given a document and a cursor inside a `<Grid.RowDefinitions>` group, adds a
//! new `RowDefinition` next to the one under the cursor and shifts every
//! `Grid.Row` of the same grid that points at or past the insertion index.
//! Rows of nested grids are left alone. When the cursor is not on a row
//! definition the result is disabled rather than an error.

use crate::{
    markup::scan::{self, Tag, TagKind, TagScanner},
    span::Span,
    text::{find_from, line_padding},
};

use super::get_exclusions;

const GROUP_SUFFIX: &str = ".RowDefinitions";
const DEFINITION: &str = "RowDefinition";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InsertPosition {
    /// Insert ahead of the definition under the cursor, which moves down.
    #[default]
    Before,
    After,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertOptions {
    pub position: InsertPosition,
    /// Markup of the definition to insert.
    pub new_definition: String,
}

impl Default for InsertOptions {
    fn default() -> Self {
        Self {
            position: InsertPosition::Before,
            new_definition: "<RowDefinition Height=\"*\" />".to_string(),
        }
    }
}

/// One textual substitution, e.g. `Grid.Row="2"` to `Grid.Row="3"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub find: String,
    pub replace: String,
}

/// Result of [`compute_insertion`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowInsertion {
    /// False when the cursor is not on a row definition of a complete grid.
    pub enabled: bool,
    /// Zero-based index the new definition will have. `None` when disabled.
    pub row_index: Option<usize>,
    /// Highest index first.
    pub replacements: Vec<Replacement>,
    /// The container's markup after the insertion.
    pub preview_text: String,
    /// Where the container sits in the original document.
    pub container: Span,
}

impl RowInsertion {
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// `document` with the container replaced by [`Self::preview_text`].
    pub fn apply(&self, document: &str) -> String {
        if !self.is_enabled() {
            return document.to_string();
        }
        match (
            document.get(..self.container.start),
            document.get(self.container.end()..),
        ) {
            (Some(head), Some(tail)) => format!("{head}{}{tail}", self.preview_text),
            _ => {
                log::debug!("insertion container {:?} is outside the document", self.container);
                document.to_string()
            }
        }
    }
}

/// Inserts a default row definition before the one under `cursor`.
pub fn compute_insertion(document: &str, cursor: usize) -> RowInsertion {
    compute_insertion_with(document, cursor, &InsertOptions::default())
}

pub fn compute_insertion_with(document: &str, cursor: usize, options: &InsertOptions) -> RowInsertion {
    let Some(target) = definition_at(document, cursor) else {
        log::debug!("no row definition at offset {cursor}");
        return RowInsertion::disabled();
    };
    let Some((container_open, container_end)) = enclosing_container(document, &target) else {
        log::debug!("row definitions at {} have no enclosing `{}`", target.group_start, target.container);
        return RowInsertion::disabled();
    };

    let container_start = container_open.start;
    let container = &document[container_start..container_end];
    let exclusions = get_exclusions(container, target.container);

    let def = target.definitions[target.index];
    let padding = line_padding(document, def.start);
    let (insert_index, insert_at, insert_text) = match options.position {
        InsertPosition::Before => (target.index, def.start, format!("{}\n{padding}", options.new_definition)),
        InsertPosition::After => (target.index + 1, def.end(), format!("\n{padding}{}", options.new_definition)),
    };

    let replacements: Vec<Replacement> = (insert_index..target.definitions.len())
        .rev()
        .map(|i| Replacement {
            find: format!("{}.Row=\"{i}\"", target.container),
            replace: format!("{}.Row=\"{}\"", target.container, i + 1),
        })
        .collect();

    // All edits are located on the original text and applied back to front,
    // so a value rewritten once is never matched again.
    let body_start = container_open.end - container_start;
    let mut edits: Vec<(Span, &str)> = vec![(Span::new(insert_at - container_start, 0), insert_text.as_str())];
    for replacement in &replacements {
        let mut from = body_start;
        while let Some(idx) = find_from(container, &replacement.find, from) {
            from = idx + replacement.find.len();
            let preceded_by_space = container.as_bytes()[idx - 1].is_ascii_whitespace();
            if preceded_by_space && !exclusions.contains(idx) {
                edits.push((Span::new(idx, replacement.find.len()), replacement.replace.as_str()));
            }
        }
    }
    edits.sort_by(|a, b| b.0.start.cmp(&a.0.start));

    let mut preview_text = container.to_string();
    for (span, text) in edits {
        preview_text.replace_range(span.start..span.end(), text);
    }

    RowInsertion {
        enabled: true,
        row_index: Some(insert_index),
        replacements,
        preview_text,
        container: Span::from_bounds(container_start, container_end),
    }
}

/// A row definition under the cursor, with its group.
#[derive(Debug)]
struct TargetDefinition<'a> {
    /// Owner of the group, e.g. `Grid` for `Grid.RowDefinitions`.
    container: &'a str,
    group_start: usize,
    /// Every definition in the group, in order.
    definitions: Vec<Span>,
    index: usize,
}

/// Finds the definition containing or touching `cursor`. A cursor in the
/// whitespace between two definitions selects the following one.
fn definition_at(document: &str, cursor: usize) -> Option<TargetDefinition<'_>> {
    for group in TagScanner::new(document) {
        if group.start > cursor {
            break;
        }
        let Some(container) = group.name.strip_suffix(GROUP_SUFFIX) else {
            continue;
        };
        if group.kind != TagKind::Open || cursor < group.end {
            continue;
        }
        let Some(close) = scan::matching_close(document, &group) else {
            continue;
        };
        if cursor > close.start {
            continue;
        }

        let definitions = group_definitions(document, &group, close.start);
        let index = definitions.iter().position(|d| cursor <= d.end())?;
        return Some(TargetDefinition {
            container,
            group_start: group.start,
            definitions,
            index,
        });
    }
    None
}

fn group_definitions(document: &str, group: &Tag<'_>, body_end: usize) -> Vec<Span> {
    let mut definitions = vec![];
    let mut scanner = TagScanner::starting_at(document, group.end);
    while let Some(tag) = scanner.next() {
        if tag.start >= body_end {
            break;
        }
        if tag.name != DEFINITION || !tag.opens() {
            continue;
        }
        let end = scan::element_end(document, &tag).unwrap_or(tag.end).min(body_end);
        definitions.push(Span::from_bounds(tag.start, end));
        scanner = TagScanner::starting_at(document, end);
    }
    definitions
}

/// The innermost open `target.container` element around the group, with the
/// offset one past its closing tag.
fn enclosing_container<'a>(document: &'a str, target: &TargetDefinition<'_>) -> Option<(Tag<'a>, usize)> {
    let mut open: Vec<Tag<'a>> = vec![];
    for tag in TagScanner::new(document) {
        if tag.start >= target.group_start {
            break;
        }
        if tag.name != target.container {
            continue;
        }
        match tag.kind {
            TagKind::Open => open.push(tag),
            TagKind::Close => {
                open.pop();
            }
            TagKind::SelfClosing => {}
        }
    }
    let container = open.pop()?;
    let end = scan::element_end(document, &container)?;
    Some((container, end))
}
