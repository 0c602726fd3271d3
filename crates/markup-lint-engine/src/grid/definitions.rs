//! Discovery of a container's row and column definitions.

use crate::{
    diagnostics::Axis,
    markup::{
        inline_value,
        scan::{self, TagKind, TagScanner},
    },
    project::ProjectKind,
    text::line_padding,
};

use super::ExclusionMap;

/// An explicit `<Grid.RowDefinitions>` group. Offsets are relative to the
/// container markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionGroup {
    pub count: usize,
    /// Offset of `</Grid.RowDefinitions>`; `None` for a self-closing or
    /// truncated group.
    pub close: Option<usize>,
    /// Leading whitespace of the closing tag's line.
    pub close_padding: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Definitions {
    Group(DefinitionGroup),
    /// `RowDefinitions="Auto,*"` on the container's opening tag.
    Shorthand { count: usize },
    Missing,
}

impl Definitions {
    pub fn count(&self) -> usize {
        match self {
            Self::Group(group) => group.count,
            Self::Shorthand { count } => *count,
            Self::Missing => 0,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Where missing definitions can be appended, with the padding to use.
    pub fn append_point(&self) -> Option<(usize, &str)> {
        match self {
            Self::Group(DefinitionGroup {
                close: Some(close),
                close_padding,
                ..
            }) => Some((*close, close_padding.as_str())),
            _ => None,
        }
    }
}

/// Finds the definitions for `axis` of the container `element` whose markup is
/// `container`.
///
/// The explicit group is authoritative. Short-hand definitions are only read
/// for Xamarin.Forms projects and only when there is no group.
pub fn discover(
    container: &str,
    element: &str,
    axis: Axis,
    exclusions: &ExclusionMap,
    project: ProjectKind,
) -> Definitions {
    let Some(open) = scan::opening_tag(container) else {
        return Definitions::Missing;
    };
    let shorthand = (project == ProjectKind::XamarinForms)
        .then(|| inline_value(&container[..open.end], axis.group()))
        .flatten();

    if open.kind == TagKind::Open
        && let Some(group) = find_group(container, element, axis, open.end, exclusions)
    {
        if shorthand.is_some() {
            log::debug!("`{element}` has both {} short-hand and a group; using the group", axis.group());
        }
        return Definitions::Group(group);
    }

    match shorthand {
        Some(sizes) => Definitions::Shorthand {
            count: sizes.split(',').filter(|s| !s.trim().is_empty()).count(),
        },
        None => Definitions::Missing,
    }
}

fn find_group(
    container: &str,
    element: &str,
    axis: Axis,
    body_start: usize,
    exclusions: &ExclusionMap,
) -> Option<DefinitionGroup> {
    let group_name = format!("{element}.{}", axis.group());
    let group = TagScanner::starting_at(container, body_start)
        .filter(|tag| !exclusions.contains(tag.start))
        .take_while(|tag| !(tag.kind == TagKind::Close && tag.name == element))
        .find(|tag| tag.opens() && tag.name == group_name)?;

    if group.kind == TagKind::SelfClosing {
        return Some(DefinitionGroup {
            count: 0,
            close: None,
            close_padding: String::new(),
        });
    }

    let close = scan::matching_close(container, &group);
    let body_end = close.map_or(container.len(), |c| c.start);
    let count = TagScanner::starting_at(container, group.end)
        .take_while(|tag| tag.start < body_end)
        .filter(|tag| tag.opens() && tag.name == axis.definition())
        .count();

    Some(DefinitionGroup {
        count,
        close: close.map(|c| c.start),
        close_padding: close
            .map(|c| line_padding(container, c.start).to_string())
            .unwrap_or_default(),
    })
}
