use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    markup::{AttributeKind, AttributeKinds, locate, scan},
    span::Span,
};

use super::codes;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Hidden,
    Suggestion,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Hidden => "hidden",
            Self::Suggestion => "suggestion",
            Self::Warning => "warning",
            Self::Error => "error",
        })
    }
}

/// Grid axis a definition belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Row,
    Column,
}

impl Axis {
    /// `RowDefinition` / `ColumnDefinition`
    pub fn definition(self) -> &'static str {
        match self {
            Self::Row => "RowDefinition",
            Self::Column => "ColumnDefinition",
        }
    }

    /// Property holding the definitions: `RowDefinitions` / `ColumnDefinitions`.
    pub fn group(self) -> &'static str {
        match self {
            Self::Row => "RowDefinitions",
            Self::Column => "ColumnDefinitions",
        }
    }

    /// Attached property selecting a cell: `Row` / `Column`.
    pub fn index_property(self) -> &'static str {
        match self {
            Self::Row => "Row",
            Self::Column => "Column",
        }
    }

    pub fn span_property(self) -> &'static str {
        match self {
            Self::Row => "RowSpan",
            Self::Column => "ColumnSpan",
        }
    }

    /// Markup for one star-sized definition.
    pub fn default_definition(self) -> &'static str {
        match self {
            Self::Row => "<RowDefinition Height=\"*\" />",
            Self::Column => "<ColumnDefinition Width=\"*\" />",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Row => "row",
            Self::Column => "column",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DefinitionsToAdd {
    Rows,
    Columns,
    Both,
}

impl DefinitionsToAdd {
    pub fn axes(self) -> &'static [Axis] {
        match self {
            Self::Rows => &[Axis::Row],
            Self::Columns => &[Axis::Column],
            Self::Both => &[Axis::Row, Axis::Column],
        }
    }
}

/// Kind-specific data a handler attaches to a tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TagPayload {
    /// Nothing beyond the common fields.
    Plain,
    HardcodedString {
        element_name: String,
        attribute_name: String,
        attribute_kind: AttributeKind,
        value: String,
        /// Localization id to use for the string.
        uid: String,
        /// Whether `uid` is already declared on the element.
        uid_exists: bool,
    },
    /// A container with no definition group for one or both axes.
    AddDefinitions {
        definitions: DefinitionsToAdd,
        container: String,
        left_padding: String,
        /// For a self-closing container, the ` />` to replace when expanding it.
        expand_from: Option<Span>,
    },
    /// Fewer definitions than the highest index or span in use requires.
    MissingDefinitions {
        axis: Axis,
        /// Highest zero-based index that must exist.
        required_index: usize,
        existing_count: usize,
        /// Offset of the group's closing tag, if there is a group to append to.
        group_close: Option<usize>,
        group_padding: String,
    },
    MissingAttribute {
        attribute_name: String,
        suggested_value: String,
    },
    /// Replace the tag's span with `new_text`.
    ReplaceWith { new_text: String },
    RenameElement {
        from: String,
        to: String,
        /// Offset of the matching `</from>`, absent for self-closing elements.
        closing_tag: Option<usize>,
    },
    PairedEvent { present: String, missing: String },
}

/// One diagnostic raised during an analysis pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticTag {
    /// What to underline, absolute in the document.
    pub span: Span,
    pub file_name: String,
    pub error_code: String,
    /// Short fragment such as `x:Name="title"`, only used for suppression matching.
    pub element_identifier: String,
    /// Where a quick-fix inserts text.
    pub insert_position: usize,
    pub description: String,
    pub severity: Severity,
    pub payload: TagPayload,
}

impl DiagnosticTag {
    /// A tag with the code's default severity, inserting at the span start.
    pub fn new(
        error_code: &str,
        span: Span,
        file_name: &str,
        description: impl Into<String>,
        payload: TagPayload,
    ) -> Self {
        Self {
            span,
            file_name: file_name.to_string(),
            error_code: error_code.to_string(),
            element_identifier: String::new(),
            insert_position: span.start,
            description: description.into(),
            severity: codes::default_severity(error_code),
            payload,
        }
    }

    #[must_use]
    pub fn with_insert_position(mut self, position: usize) -> Self {
        self.insert_position = position;
        self
    }

    #[must_use]
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.element_identifier = identifier.into();
        self
    }

    /// Number of definitions a [`TagPayload::MissingDefinitions`] tag asks for.
    pub fn definitions_to_add(&self) -> usize {
        match &self.payload {
            TagPayload::MissingDefinitions {
                required_index,
                existing_count,
                ..
            } => (required_index + 1).saturating_sub(*existing_count),
            _ => 0,
        }
    }
}

const IDENTIFYING_ATTRIBUTES: &[&str] = &["x:Name", "Name", "x:Uid", "Text", "Content", "Header"];

/// Short fragment identifying an element for suppression rules.
///
/// The first inline `Attr="value"` among the usual naming and text attributes,
/// otherwise the opening tag.
pub fn element_identifier(markup: &str) -> String {
    for name in IDENTIFYING_ATTRIBUTES {
        let found = locate(markup, name, AttributeKinds::INLINE);
        if found.found()
            && let Some(text) = found.span.slice(markup)
        {
            return text.to_string();
        }
    }
    scan::opening_tag(markup)
        .and_then(|open| open.span().slice(markup))
        .unwrap_or(markup)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn missing(required_index: usize, existing_count: usize) -> DiagnosticTag {
        DiagnosticTag::new(
            codes::MISSING_ROW_DEFINITION,
            Span::new(0, 4),
            "Page.xaml",
            "",
            TagPayload::MissingDefinitions {
                axis: Axis::Row,
                required_index,
                existing_count,
                group_close: None,
                group_padding: String::new(),
            },
        )
    }

    #[rstest]
    #[case(3, 2, 2)]
    #[case(1, 0, 2)]
    #[case(1, 5, 0)]
    fn definitions_to_add(#[case] index: usize, #[case] existing: usize, #[case] expected: usize) {
        assert_eq!(missing(index, existing).definitions_to_add(), expected);
    }

    #[test]
    fn new_tag_defaults() {
        let tag = missing(1, 1);
        assert_eq!(tag.insert_position, 0);
        assert_eq!(tag.severity, Severity::Warning);
        assert_eq!(tag.element_identifier, "");
    }

    #[rstest]
    #[case::x_name("<TextBlock Text=\"a\" x:Name=\"title\" />", "x:Name=\"title\"")]
    #[case::name("<TextBlock Name=\"title\" Text=\"a\" />", "Name=\"title\"")]
    #[case::text("<TextBlock Text=\"menu1\" />", "Text=\"menu1\"")]
    #[case::opening_tag("<Button Width=\"4\">Go</Button>", "<Button Width=\"4\">")]
    fn identifiers(#[case] markup: &str, #[case] expected: &str) {
        assert_eq!(element_identifier(markup), expected);
    }

    #[test]
    fn severity_display_and_order() {
        assert_eq!(Severity::Warning.to_string(), "warning");
        assert!(Severity::Error > Severity::Suggestion);
    }
}
