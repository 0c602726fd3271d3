//! Attribute Locator.
//!
//! Finds one attribute of an element in any of its three surface forms:
//!
//! ```text
//! <Button Content="Save" />                          Inline
//! <Button><Button.Content>Save</Button.Content>...   ElementExpanded
//! <Button>Save</Button>                              DefaultContent
//! ```
//!
//! Callers choose which forms to try with [`AttributeKinds`]; the forms are
//! always tried in the order above and the first success wins. Scan failures
//! are logged and reported as [`AttributeKind::None`].

use std::ops::BitOr;

use serde::Serialize;

use crate::{
    error::ScanError,
    markup::scan::{self, TagKind, TagScanner},
    span::Span,
    text::find_from,
};

/// Surface form an attribute was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AttributeKind {
    None,
    Inline,
    ElementExpanded,
    DefaultContent,
}

/// Set of [`AttributeKind`]s a lookup may try.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttributeKinds(u8);

impl AttributeKinds {
    pub const NONE: Self = Self(0);
    pub const INLINE: Self = Self(1);
    pub const ELEMENT: Self = Self(1 << 1);
    pub const DEFAULT_CONTENT: Self = Self(1 << 2);
    pub const INLINE_OR_ELEMENT: Self = Self(Self::INLINE.0 | Self::ELEMENT.0);
    pub const ANY: Self = Self(Self::INLINE.0 | Self::ELEMENT.0 | Self::DEFAULT_CONTENT.0);

    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for AttributeKinds {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Result of an attribute lookup. Spans are relative to the owner markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeMatch {
    pub kind: AttributeKind,
    pub span: Span,
    pub value: String,
}

impl AttributeMatch {
    pub fn none() -> Self {
        Self {
            kind: AttributeKind::None,
            span: Span::default(),
            value: String::new(),
        }
    }

    pub fn found(&self) -> bool {
        self.kind != AttributeKind::None
    }
}

/// Looks up `name` on the element whose markup is `owner`.
pub fn locate(owner: &str, name: &str, kinds: AttributeKinds) -> AttributeMatch {
    if name.is_empty() {
        log::warn!("attribute lookup requested with an empty attribute name");
        return AttributeMatch::none();
    }

    let attempts: [(AttributeKinds, fn(&str, &str) -> Result<Option<AttributeMatch>, ScanError>); 3] = [
        (AttributeKinds::INLINE, locate_inline),
        (AttributeKinds::ELEMENT, locate_element_expanded),
        (AttributeKinds::DEFAULT_CONTENT, locate_default_content),
    ];

    for (kind, attempt) in attempts {
        if !kinds.contains(kind) {
            continue;
        }
        match attempt(owner, name) {
            Ok(Some(found)) => return found,
            Ok(None) => {}
            Err(e) => {
                log::warn!("lookup of `{name}` abandoned: {e}");
                return AttributeMatch::none();
            }
        }
    }
    AttributeMatch::none()
}

/// Convenience for the common "inline value or nothing" lookup.
pub fn inline_value(owner: &str, name: &str) -> Option<String> {
    let found = locate(owner, name, AttributeKinds::INLINE);
    found.found().then_some(found.value)
}

/// `name="value"` on the opening tag, preceded by whitespace.
fn locate_inline(owner: &str, name: &str) -> Result<Option<AttributeMatch>, ScanError> {
    let needle = format!("{name}=\"");
    let region_end = scan::opening_tag(owner).map_or(owner.len(), |open| open.end);
    let bytes = owner.as_bytes();

    let mut from = 0;
    while let Some(idx) = find_from(owner, &needle, from) {
        if idx >= region_end {
            break;
        }
        from = idx + 1;
        let preceded_by_space = idx > 0 && bytes[idx - 1].is_ascii_whitespace();
        if !preceded_by_space {
            continue;
        }

        let value_start = idx + needle.len();
        let close = find_from(owner, "\"", value_start).ok_or_else(|| {
            ScanError::MissingClosingQuote {
                attribute: name.to_string(),
            }
        })?;
        return Ok(Some(AttributeMatch {
            kind: AttributeKind::Inline,
            span: Span::from_bounds(idx, close + 1),
            value: owner[value_start..close].to_string(),
        }));
    }
    Ok(None)
}

/// `<Owner.Name>value</Owner.Name>` among the owner's direct children.
///
/// Property elements of nested elements that share the owner's name are not
/// matched; each child element is skipped whole.
fn locate_element_expanded(owner: &str, name: &str) -> Result<Option<AttributeMatch>, ScanError> {
    let Some(open) = scan::opening_tag(owner) else {
        return Ok(None);
    };
    if open.kind != TagKind::Open {
        return Ok(None);
    }
    let qualified = format!("{}.{name}", open.name);
    let body_end = scan::matching_close(owner, &open).map_or(owner.len(), |close| close.start);

    let mut scanner = TagScanner::starting_at(owner, open.end);
    while let Some(child) = scanner.next() {
        if child.start >= body_end {
            break;
        }
        if child.kind == TagKind::Close {
            continue;
        }
        if child.name == qualified {
            if child.kind != TagKind::Open {
                return Ok(None);
            }
            let close = scan::matching_close(owner, &child)
                .ok_or(ScanError::UnterminatedElement { name: qualified })?;
            return Ok(Some(AttributeMatch {
                kind: AttributeKind::ElementExpanded,
                span: Span::from_bounds(child.start, close.end),
                value: owner[child.end..close.start].to_string(),
            }));
        }
        let Some(child_end) = scan::element_end(owner, &child) else {
            return Ok(None);
        };
        scanner = TagScanner::starting_at(owner, child_end);
    }
    Ok(None)
}

/// Literal text between the owner's opening and closing tags.
///
/// Only applies when the owner has no sub-elements at all.
fn locate_default_content(owner: &str, _name: &str) -> Result<Option<AttributeMatch>, ScanError> {
    let open = scan::opening_tag(owner).ok_or(ScanError::MissingOpeningTag)?;
    if open.kind != TagKind::Open {
        return Ok(None);
    }
    let close = scan::matching_close(owner, &open).ok_or_else(|| ScanError::UnterminatedElement {
        name: open.name.to_string(),
    })?;

    let inner = &owner[open.end..close.start];
    if inner.trim().is_empty() || inner.contains('<') {
        return Ok(None);
    }

    Ok(Some(AttributeMatch {
        kind: AttributeKind::DefaultContent,
        span: Span::from_bounds(open.end, close.start),
        value: inner.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn inline_value_and_span() {
        let xaml = "<Element Attr=\"Value\"></Element>";
        let m = locate(xaml, "Attr", AttributeKinds::INLINE);
        assert_eq!(m.kind, AttributeKind::Inline);
        assert_eq!(m.value, "Value");
        assert_eq!(m.span.slice(xaml), Some("Attr=\"Value\""));
    }

    #[rstest]
    #[case::suffix("<Element AttrX=\"Value\"></Element>")]
    #[case::prefix("<Element IsAttr=\"Value\"></Element>")]
    #[case::dotted("<Element Grid.Attr=\"Value\"></Element>")]
    fn inline_requires_name_boundary(#[case] xaml: &str) {
        assert!(!locate(xaml, "Attr", AttributeKinds::INLINE).found());
    }

    #[test]
    fn inline_skips_rejected_occurrence() {
        let xaml = "<Element IsAttr=\"No\" Attr=\"Yes\" />";
        let m = locate(xaml, "Attr", AttributeKinds::INLINE);
        assert_eq!(m.value, "Yes");
    }

    #[test]
    fn inline_ignores_child_attributes() {
        let xaml = "<StackPanel>\n  <TextBlock Text=\"child\" />\n</StackPanel>";
        assert!(!locate(xaml, "Text", AttributeKinds::INLINE).found());
    }

    #[test]
    fn inline_missing_closing_quote_is_none() {
        let xaml = "<Element Attr=\"Value";
        assert!(!locate(xaml, "Attr", AttributeKinds::ANY).found());
    }

    #[test]
    fn empty_value_is_found() {
        let m = locate("<TextBlock Text=\"\" />", "Text", AttributeKinds::INLINE);
        assert!(m.found());
        assert_eq!(m.value, "");
    }

    #[test]
    fn element_expanded_value_and_span() {
        let xaml = "<Button><Button.Content>Save</Button.Content></Button>";
        let m = locate(xaml, "Content", AttributeKinds::ELEMENT);
        assert_eq!(m.kind, AttributeKind::ElementExpanded);
        assert_eq!(m.value, "Save");
        assert_eq!(
            m.span.slice(xaml),
            Some("<Button.Content>Save</Button.Content>")
        );
    }

    #[test]
    fn element_expanded_skips_same_named_descendants() {
        let xaml = "<Button><StackPanel><Button><Button.Content>Inner</Button.Content></Button></StackPanel></Button>";
        assert!(!locate(xaml, "Content", AttributeKinds::ELEMENT).found());

        let inner = &xaml[xaml.rfind("<Button>").unwrap()..];
        let m = locate(inner, "Content", AttributeKinds::ELEMENT);
        assert_eq!(m.value, "Inner");
    }

    #[test]
    fn element_expanded_after_other_children() {
        let xaml = "<Button><ToolTipService.ToolTip>Tip</ToolTipService.ToolTip><Button.Content>Save</Button.Content></Button>";
        let m = locate(xaml, "Content", AttributeKinds::ELEMENT);
        assert_eq!(m.value, "Save");
        assert_eq!(
            m.span.slice(xaml),
            Some("<Button.Content>Save</Button.Content>")
        );
    }

    #[test]
    fn element_expanded_without_close_is_none() {
        let xaml = "<Button><Button.Content>Save";
        assert!(!locate(xaml, "Content", AttributeKinds::ANY).found());
    }

    #[test]
    fn default_content_value() {
        let xaml = "<Button>Click me</Button>";
        let m = locate(xaml, "Content", AttributeKinds::ANY);
        assert_eq!(m.kind, AttributeKind::DefaultContent);
        assert_eq!(m.value, "Click me");
        assert_eq!(m.span.slice(xaml), Some("Click me"));
    }

    #[rstest]
    #[case::whitespace("<Button>   </Button>")]
    #[case::child("<Button><Image /></Button>")]
    #[case::self_closing("<Button />")]
    fn default_content_not_applicable(#[case] xaml: &str) {
        assert!(!locate(xaml, "Content", AttributeKinds::DEFAULT_CONTENT).found());
    }

    #[test]
    fn inline_wins_over_other_forms() {
        let xaml = "<Button Content=\"Inline\">Default</Button>";
        let m = locate(xaml, "Content", AttributeKinds::ANY);
        assert_eq!(m.kind, AttributeKind::Inline);
        assert_eq!(m.value, "Inline");
    }

    #[test]
    fn kinds_not_requested_are_not_tried() {
        let xaml = "<Button>Default</Button>";
        assert!(!locate(xaml, "Content", AttributeKinds::INLINE_OR_ELEMENT).found());
    }

    #[test]
    fn empty_name_is_none() {
        assert!(!locate("<Button Content=\"x\" />", "", AttributeKinds::ANY).found());
    }

    #[test]
    fn kinds_combine() {
        let kinds = AttributeKinds::INLINE | AttributeKinds::DEFAULT_CONTENT;
        assert!(kinds.contains(AttributeKinds::INLINE));
        assert!(!kinds.contains(AttributeKinds::ELEMENT));
        assert!(AttributeKinds::ANY.contains(kinds));
    }

    #[test]
    fn inline_value_helper() {
        assert_eq!(
            inline_value("<Grid x:Name=\"Root\" />", "x:Name"),
            Some("Root".to_string())
        );
        assert_eq!(inline_value("<Grid />", "x:Name"), None);
    }
}
