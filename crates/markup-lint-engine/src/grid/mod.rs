//! Grid row and column analysis.
//!
//! [`GridHandler`] checks one `Grid` at a time: whether it declares row and
//! column definitions at all, whether every `Grid.Row` / `Grid.Column` used by
//! its children has a definition, and whether `Grid.RowSpan` /
//! `Grid.ColumnSpan` run past the last definition. Children of nested grids are
//! excluded from all three checks through an [`ExclusionMap`].

use crate::{
    diagnostics::{Axis, DefinitionsToAdd, DiagnosticTag, TagPayload, codes, element_identifier},
    error::HandlerError,
    markup::{ElementSource, inline_value, scan},
    span::Span,
    text::find_from,
};

use crate::handlers::{ElementHandler, HandlerContext};

pub mod definitions;
pub mod exclusions;
pub mod insert_row;

pub use definitions::{DefinitionGroup, Definitions, discover};
pub use exclusions::{ExclusionMap, get_exclusions};
pub use insert_row::{
    InsertOptions, InsertPosition, Replacement, RowInsertion, compute_insertion,
    compute_insertion_with,
};

/// One `Grid.Row="N"` style attribute found in a container body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Usage {
    /// Relative span of `Grid.Row="N"`.
    span: Span,
    value: usize,
}

/// Every `{element}.{property}="N"` in `container` after `body_start`, skipping
/// nested containers and comments. Values that are not integers are ignored.
fn usages(
    container: &str,
    element: &str,
    property: &str,
    body_start: usize,
    exclusions: &ExclusionMap,
    comments: &[Span],
) -> Vec<Usage> {
    let needle = format!("{element}.{property}=\"");
    let bytes = container.as_bytes();
    let mut found = vec![];

    let mut from = body_start;
    while let Some(idx) = find_from(container, &needle, from) {
        from = idx + needle.len();
        let preceded_by_space = idx > 0 && bytes[idx - 1].is_ascii_whitespace();
        if !preceded_by_space || exclusions.contains(idx) || scan::in_comment(comments, idx) {
            continue;
        }
        let Some(close) = find_from(container, "\"", from) else {
            log::debug!("`{needle}` at {idx} has no closing quote");
            break;
        };
        match container[from..close].trim().parse::<usize>() {
            Ok(value) => found.push(Usage {
                span: Span::from_bounds(idx, close + 1),
                value,
            }),
            Err(_) => log::debug!("ignoring non-numeric {property} `{}`", &container[from..close]),
        }
    }
    found
}

/// Inline row or column index of the element whose attribute starts at `at`.
fn enclosing_index(container: &str, at: usize, element: &str, axis: Axis) -> usize {
    let Some(start) = container[..at].rfind('<') else {
        return 0;
    };
    let Some(open) = scan::opening_tag(&container[start..]) else {
        return 0;
    };
    let opening = &container[start..start + open.end];
    inline_value(opening, &format!("{element}.{}", axis.index_property()))
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(0)
}

/// Analyzes `Grid` elements. Handles any container name it is registered for.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridHandler;

impl GridHandler {
    fn add_definitions_tag(
        source: &ElementSource<'_>,
        ctx: &mut HandlerContext<'_>,
        open: scan::Tag<'_>,
        missing: DefinitionsToAdd,
    ) {
        let (code, what) = match missing {
            DefinitionsToAdd::Rows => (codes::ADD_ROW_DEFINITIONS, "row definitions"),
            DefinitionsToAdd::Columns => (codes::ADD_COLUMN_DEFINITIONS, "column definitions"),
            DefinitionsToAdd::Both => (
                codes::ADD_ROW_AND_COLUMN_DEFINITIONS,
                "row and column definitions",
            ),
        };

        let (insert_at, expand_from) = match open.kind {
            scan::TagKind::SelfClosing => {
                let slash = open.end.saturating_sub(2);
                let tail = source.text[..slash].trim_end().len();
                (tail, Some(Span::from_bounds(tail, open.end).offset_by(source.offset)))
            }
            _ => (open.end, None),
        };

        let tag = DiagnosticTag::new(
            code,
            open.span().offset_by(source.offset),
            ctx.file_name,
            format!("Add {what} to {}", source.name),
            TagPayload::AddDefinitions {
                definitions: missing,
                container: source.name.to_string(),
                left_padding: source.line_padding.to_string(),
                expand_from,
            },
        )
        .with_insert_position(source.offset + insert_at)
        .with_identifier(element_identifier(source.text));
        ctx.add(tag, source.text);
    }

    fn check_axis(
        source: &ElementSource<'_>,
        ctx: &mut HandlerContext<'_>,
        axis: Axis,
        definitions: &Definitions,
        body_start: usize,
        exclusions: &ExclusionMap,
        comments: &[Span],
    ) {
        let text = source.text;
        let element = source.name;
        let count = definitions.count();
        let (group_close, group_padding) = definitions
            .append_point()
            .map_or((None, ""), |(at, pad)| (Some(source.offset + at), pad));
        let identifier = element_identifier(text);

        let missing_code = match axis {
            Axis::Row => codes::MISSING_ROW_DEFINITION,
            Axis::Column => codes::MISSING_COLUMN_DEFINITION,
        };
        let overflow_code = match axis {
            Axis::Row => codes::ROW_SPAN_OVERFLOW,
            Axis::Column => codes::COLUMN_SPAN_OVERFLOW,
        };

        let index_usages = usages(text, element, axis.index_property(), body_start, exclusions, comments);
        let out_of_range: Vec<Usage> = index_usages
            .into_iter()
            .filter(|u| u.value > 0 && u.value >= count)
            .collect();
        // Every report asks for enough definitions to cover the highest index.
        if let Some(highest) = out_of_range.iter().map(|u| u.value).max() {
            for usage in &out_of_range {
                let tag = DiagnosticTag::new(
                    missing_code,
                    usage.span.offset_by(source.offset),
                    ctx.file_name,
                    format!(
                        "{element}.{}=\"{}\" has no matching {} ({count} defined)",
                        axis.index_property(),
                        usage.value,
                        axis.definition()
                    ),
                    TagPayload::MissingDefinitions {
                        axis,
                        required_index: highest,
                        existing_count: count,
                        group_close,
                        group_padding: group_padding.to_string(),
                    },
                )
                .with_identifier(identifier.clone());
                ctx.add(tag, text);
            }
        }

        for usage in usages(text, element, axis.span_property(), body_start, exclusions, comments) {
            if usage.value <= 1 {
                continue;
            }
            let index = enclosing_index(text, usage.span.start, element, axis);
            let required = usage.value - 1 + index;
            if required < count {
                continue;
            }
            let tag = DiagnosticTag::new(
                overflow_code,
                usage.span.offset_by(source.offset),
                ctx.file_name,
                format!(
                    "{element}.{}=\"{}\" from {axis} {index} needs {} {axis}s but {count} are defined",
                    axis.span_property(),
                    usage.value,
                    required + 1
                ),
                TagPayload::MissingDefinitions {
                    axis,
                    required_index: required,
                    existing_count: count,
                    group_close,
                    group_padding: group_padding.to_string(),
                },
            )
            .with_identifier(identifier.clone());
            ctx.add(tag, text);
        }
    }
}

impl ElementHandler for GridHandler {
    fn element(&self) -> &str {
        "Grid"
    }

    fn process(
        &self,
        source: &ElementSource<'_>,
        ctx: &mut HandlerContext<'_>,
    ) -> Result<(), HandlerError> {
        let text = source.text;
        let open = scan::opening_tag(text).ok_or(HandlerError::Malformed {
            element: source.name.to_string(),
            reason: "no opening tag",
        })?;
        let exclusions = get_exclusions(text, source.name);
        let comments = scan::comment_spans(text);

        let rows = discover(text, source.name, Axis::Row, &exclusions, ctx.project);
        let columns = discover(text, source.name, Axis::Column, &exclusions, ctx.project);

        let missing = match (rows.is_missing(), columns.is_missing()) {
            (true, true) => Some(DefinitionsToAdd::Both),
            (true, false) => Some(DefinitionsToAdd::Rows),
            (false, true) => Some(DefinitionsToAdd::Columns),
            (false, false) => None,
        };
        if let Some(missing) = missing {
            Self::add_definitions_tag(source, ctx, open, missing);
        }

        if open.kind == scan::TagKind::SelfClosing {
            return Ok(());
        }
        Self::check_axis(source, ctx, Axis::Row, &rows, open.end, &exclusions, &comments);
        Self::check_axis(source, ctx, Axis::Column, &columns, open.end, &exclusions, &comments);
        Ok(())
    }
}
