//! Quick-fix text edits derived from diagnostic tags.

use serde::Serialize;

use crate::span::Span;

use super::{Axis, DiagnosticTag, TagPayload};

const INDENT: &str = "    ";

/// Replace `span` with `new_text`. An empty span is a pure insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextChange {
    pub span: Span,
    pub new_text: String,
}

impl TextChange {
    pub fn insert(offset: usize, text: impl Into<String>) -> Self {
        Self {
            span: Span::new(offset, 0),
            new_text: text.into(),
        }
    }

    pub fn replace(span: Span, text: impl Into<String>) -> Self {
        Self {
            span,
            new_text: text.into(),
        }
    }
}

/// A set of non-overlapping changes against one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TextEdit {
    pub changes: Vec<TextChange>,
}

impl TextEdit {
    pub fn single(change: TextChange) -> Self {
        Self {
            changes: vec![change],
        }
    }

    /// Applies every change to `text`. Offsets refer to the original text;
    /// changes that fall outside it are skipped.
    pub fn apply(&self, text: &str) -> String {
        let mut changes: Vec<&TextChange> = self.changes.iter().collect();
        changes.sort_by(|a, b| b.span.start.cmp(&a.span.start));

        let mut out = text.to_string();
        for change in changes {
            let range = change.span.start..change.span.end();
            if out.get(range.clone()).is_none() {
                log::debug!("skipping edit at {:?}: outside the document", change.span);
                continue;
            }
            out.replace_range(range, &change.new_text);
        }
        out
    }
}

impl DiagnosticTag {
    /// The text edit that fixes this tag, for tags that have a mechanical fix.
    pub fn suggested_edit(&self) -> Option<TextEdit> {
        match &self.payload {
            TagPayload::HardcodedString {
                uid, uid_exists, ..
            } => (!uid_exists).then(|| {
                TextEdit::single(TextChange::insert(
                    self.insert_position,
                    format!(" x:Uid=\"{uid}\""),
                ))
            }),
            TagPayload::AddDefinitions {
                definitions,
                container,
                left_padding,
                expand_from,
            } => {
                let mut groups = String::new();
                for axis in definitions.axes() {
                    groups.push_str(&definition_group(container, *axis, left_padding));
                }
                let change = match expand_from {
                    Some(tail) => TextChange::replace(
                        *tail,
                        format!(">{groups}\n{left_padding}</{container}>"),
                    ),
                    None => TextChange::insert(self.insert_position, groups),
                };
                Some(TextEdit::single(change))
            }
            TagPayload::MissingDefinitions {
                axis,
                group_close,
                group_padding,
                ..
            } => {
                let at = (*group_close)?;
                let line = format!("{INDENT}{}\n{group_padding}", axis.default_definition());
                Some(TextEdit::single(TextChange::insert(
                    at,
                    line.repeat(self.definitions_to_add()),
                )))
            }
            TagPayload::MissingAttribute {
                attribute_name,
                suggested_value,
            } => Some(TextEdit::single(TextChange::insert(
                self.insert_position,
                format!(" {attribute_name}=\"{suggested_value}\""),
            ))),
            TagPayload::ReplaceWith { new_text } => {
                Some(TextEdit::single(TextChange::replace(self.span, new_text.clone())))
            }
            TagPayload::RenameElement {
                from,
                to,
                closing_tag,
            } => {
                let mut changes = vec![TextChange::replace(
                    Span::new(self.span.start + 1, from.len()),
                    to.clone(),
                )];
                if let Some(close) = closing_tag {
                    changes.push(TextChange::replace(Span::new(close + 2, from.len()), to.clone()));
                }
                Some(TextEdit { changes })
            }
            TagPayload::Plain | TagPayload::PairedEvent { .. } => None,
        }
    }
}

/// A `<Container.RowDefinitions>` group with two star-sized definitions,
/// starting on a new line.
fn definition_group(container: &str, axis: Axis, padding: &str) -> String {
    let group = axis.group();
    let definition = axis.default_definition();
    format!(
        "\n{padding}{INDENT}<{container}.{group}>\
         \n{padding}{INDENT}{INDENT}{definition}\
         \n{padding}{INDENT}{INDENT}{definition}\
         \n{padding}{INDENT}</{container}.{group}>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{DefinitionsToAdd, codes};
    use pretty_assertions::assert_eq;

    fn tag(code: &str, span: Span, payload: TagPayload) -> DiagnosticTag {
        DiagnosticTag::new(code, span, "Page.xaml", "", payload)
    }

    #[test]
    fn apply_handles_changes_in_any_order() {
        let edit = TextEdit {
            changes: vec![
                TextChange::insert(0, "<"),
                TextChange::replace(Span::new(4, 3), "xyz"),
            ],
        };
        assert_eq!(edit.apply("abc def"), "<abc xyz");
    }

    #[test]
    fn apply_skips_out_of_range_changes() {
        let edit = TextEdit::single(TextChange::insert(50, "x"));
        assert_eq!(edit.apply("abc"), "abc");
    }

    #[test]
    fn add_rows_inside_open_grid() {
        let doc = "<Page>\n  <Grid>\n    <Button />\n  </Grid>\n</Page>";
        let after_open = doc.find("<Grid>").unwrap() + "<Grid>".len();
        let t = tag(
            codes::ADD_ROW_DEFINITIONS,
            Span::new(9, 6),
            TagPayload::AddDefinitions {
                definitions: DefinitionsToAdd::Rows,
                container: "Grid".into(),
                left_padding: "  ".into(),
                expand_from: None,
            },
        )
        .with_insert_position(after_open);
        let fixed = t.suggested_edit().unwrap().apply(doc);
        assert_eq!(
            fixed,
            "<Page>\n  <Grid>\n      <Grid.RowDefinitions>\n          <RowDefinition Height=\"*\" />\n          <RowDefinition Height=\"*\" />\n      </Grid.RowDefinitions>\n    <Button />\n  </Grid>\n</Page>"
        );
    }

    #[test]
    fn add_both_expands_self_closing_grid() {
        let doc = "<Grid />";
        let t = tag(
            codes::ADD_ROW_AND_COLUMN_DEFINITIONS,
            Span::new(0, 8),
            TagPayload::AddDefinitions {
                definitions: DefinitionsToAdd::Both,
                container: "Grid".into(),
                left_padding: String::new(),
                expand_from: Some(Span::new(5, 3)),
            },
        );
        let fixed = t.suggested_edit().unwrap().apply(doc);
        assert!(fixed.starts_with("<Grid>\n    <Grid.RowDefinitions>"));
        assert!(fixed.contains("<Grid.ColumnDefinitions>\n        <ColumnDefinition Width=\"*\" />"));
        assert!(fixed.ends_with("</Grid.ColumnDefinitions>\n</Grid>"));
    }

    #[test]
    fn missing_definitions_append_to_group() {
        let doc = "<Grid>\n    <Grid.RowDefinitions>\n        <RowDefinition />\n    </Grid.RowDefinitions>\n</Grid>";
        let close = doc.find("</Grid.RowDefinitions>").unwrap();
        let t = tag(
            codes::MISSING_ROW_DEFINITION,
            Span::new(0, 6),
            TagPayload::MissingDefinitions {
                axis: Axis::Row,
                required_index: 2,
                existing_count: 1,
                group_close: Some(close),
                group_padding: "    ".into(),
            },
        );
        assert_eq!(
            t.suggested_edit().unwrap().apply(doc),
            "<Grid>\n    <Grid.RowDefinitions>\n        <RowDefinition />\n        <RowDefinition Height=\"*\" />\n        <RowDefinition Height=\"*\" />\n    </Grid.RowDefinitions>\n</Grid>"
        );
    }

    #[test]
    fn missing_definitions_without_group_has_no_edit() {
        let t = tag(
            codes::MISSING_COLUMN_DEFINITION,
            Span::new(0, 6),
            TagPayload::MissingDefinitions {
                axis: Axis::Column,
                required_index: 2,
                existing_count: 1,
                group_close: None,
                group_padding: String::new(),
            },
        );
        assert_eq!(t.suggested_edit(), None);
    }

    #[test]
    fn missing_attribute_is_inserted() {
        let doc = "<TextBox Header=\"h\" />";
        let t = tag(
            codes::TEXT_BOX_WITHOUT_INPUT_SCOPE,
            Span::new(0, doc.len()),
            TagPayload::MissingAttribute {
                attribute_name: "InputScope".into(),
                suggested_value: "Default".into(),
            },
        )
        .with_insert_position(8);
        assert_eq!(
            t.suggested_edit().unwrap().apply(doc),
            "<TextBox InputScope=\"Default\" Header=\"h\" />"
        );
    }

    #[test]
    fn rename_changes_both_tags() {
        let doc = "<MediaElement Source=\"a\"></MediaElement>";
        let t = tag(
            codes::USE_MEDIA_PLAYER_ELEMENT,
            Span::new(0, doc.len()),
            TagPayload::RenameElement {
                from: "MediaElement".into(),
                to: "MediaPlayerElement".into(),
                closing_tag: doc.find("</"),
            },
        );
        assert_eq!(
            t.suggested_edit().unwrap().apply(doc),
            "<MediaPlayerElement Source=\"a\"></MediaPlayerElement>"
        );
    }

    #[test]
    fn hardcoded_string_adds_uid_only_when_missing() {
        let payload = |uid_exists| TagPayload::HardcodedString {
            element_name: "TextBlock".into(),
            attribute_name: "Text".into(),
            attribute_kind: crate::markup::AttributeKind::Inline,
            value: "Hi".into(),
            uid: "TextBlockHi".into(),
            uid_exists,
        };
        let doc = "<TextBlock Text=\"Hi\" />";
        let t = tag(codes::HARDCODED_STRING, Span::new(11, 9), payload(false)).with_insert_position(10);
        assert_eq!(
            t.suggested_edit().unwrap().apply(doc),
            "<TextBlock x:Uid=\"TextBlockHi\" Text=\"Hi\" />"
        );
        let t = tag(codes::HARDCODED_STRING, Span::new(11, 9), payload(true));
        assert_eq!(t.suggested_edit(), None);
    }
}
