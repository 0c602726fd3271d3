//! Input elements that should declare their keyboard layout.

use crate::{
    diagnostics::{DiagnosticTag, TagPayload, codes, element_identifier},
    error::HandlerError,
    markup::{AttributeKinds, ElementSource, inline_value, locate, scan},
    project::{Platform, ProjectKind},
};

use super::{ElementHandler, HandlerContext};

/// Reports an element that lacks `attribute`, suggesting a value for it.
#[derive(Debug, Clone, Copy)]
pub struct RequiredAttributeHandler {
    element: &'static str,
    attribute: &'static str,
    suggested_value: &'static str,
    code: &'static str,
    platform: Platform,
    /// Inline `(attribute, value)` pairs that make the check unnecessary.
    unless: &'static [(&'static str, &'static str)],
}

pub const TEXT_BOX: RequiredAttributeHandler = RequiredAttributeHandler {
    element: "TextBox",
    attribute: "InputScope",
    suggested_value: "Default",
    code: codes::TEXT_BOX_WITHOUT_INPUT_SCOPE,
    platform: Platform::Uwp,
    unless: &[("IsReadOnly", "True")],
};

pub const ENTRY: RequiredAttributeHandler = RequiredAttributeHandler {
    element: "Entry",
    attribute: "Keyboard",
    suggested_value: "Default",
    code: codes::ENTRY_WITHOUT_KEYBOARD,
    platform: Platform::XamarinForms,
    unless: &[("IsPassword", "True")],
};

pub fn handlers() -> [RequiredAttributeHandler; 2] {
    [TEXT_BOX, ENTRY]
}

impl RequiredAttributeHandler {
    fn exempt(&self, markup: &str) -> bool {
        self.unless.iter().any(|(name, value)| {
            inline_value(markup, name).is_some_and(|v| v.trim().eq_ignore_ascii_case(value))
        })
    }
}

impl ElementHandler for RequiredAttributeHandler {
    fn element(&self) -> &str {
        self.element
    }

    fn applies_to(&self, project: ProjectKind) -> bool {
        self.platform.supports(project)
    }

    fn process(
        &self,
        source: &ElementSource<'_>,
        ctx: &mut HandlerContext<'_>,
    ) -> Result<(), HandlerError> {
        if self.exempt(source.text)
            || locate(source.text, self.attribute, AttributeKinds::INLINE_OR_ELEMENT).found()
        {
            return Ok(());
        }

        let open = scan::opening_tag(source.text).ok_or(HandlerError::Malformed {
            element: source.name.to_string(),
            reason: "no opening tag",
        })?;
        let tag = DiagnosticTag::new(
            self.code,
            open.span().offset_by(source.offset),
            ctx.file_name,
            format!("{} does not specify {}", self.element, self.attribute),
            TagPayload::MissingAttribute {
                attribute_name: self.attribute.to_string(),
                suggested_value: self.suggested_value.to_string(),
            },
        )
        .with_insert_position(source.offset + 1 + source.name.len())
        .with_identifier(element_identifier(source.text));

        ctx.add(tag, source.text);
        Ok(())
    }
}
