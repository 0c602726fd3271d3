//! Hardcoded user-facing strings.
//!
//! One handler per `(element, attribute)` row of [`HARDCODED`]. A value is
//! reported when it is a literal: not blank, not child markup and not a markup
//! extension such as `{Binding Title}` or `{StaticResource Key}`. The `{}`
//! escape marks the rest of the value as literal text.

use crate::{
    diagnostics::{DiagnosticTag, TagPayload, codes, element_identifier},
    error::HandlerError,
    markup::{AttributeKinds, ElementSource, locate},
    project::{Platform, ProjectKind},
};

use super::{ElementHandler, HandlerContext};

const ANY: AttributeKinds = AttributeKinds::ANY;
const INLINE_OR_ELEMENT: AttributeKinds = AttributeKinds::INLINE_OR_ELEMENT;

/// Element, attribute, forms the value may take, supported platform.
const HARDCODED: &[(&str, &str, AttributeKinds, Platform)] = &[
    ("AppBarButton", "Label", INLINE_OR_ELEMENT, Platform::Uwp),
    ("Button", "Content", ANY, Platform::Windows),
    ("Button", "Text", INLINE_OR_ELEMENT, Platform::XamarinForms),
    ("CheckBox", "Content", ANY, Platform::Windows),
    ("ComboBox", "Header", INLINE_OR_ELEMENT, Platform::Uwp),
    ("ComboBox", "PlaceholderText", INLINE_OR_ELEMENT, Platform::Uwp),
    ("Entry", "Placeholder", INLINE_OR_ELEMENT, Platform::XamarinForms),
    ("Label", "Text", ANY, Platform::XamarinForms),
    ("Slider", "Header", INLINE_OR_ELEMENT, Platform::Uwp),
    ("TextBlock", "Text", ANY, Platform::Windows),
    ("TextBox", "Header", INLINE_OR_ELEMENT, Platform::Uwp),
    ("TextBox", "PlaceholderText", INLINE_OR_ELEMENT, Platform::Uwp),
    ("ToggleSwitch", "Header", INLINE_OR_ELEMENT, Platform::Uwp),
    ("ToggleSwitch", "OnContent", INLINE_OR_ELEMENT, Platform::Uwp),
    ("ToggleSwitch", "OffContent", INLINE_OR_ELEMENT, Platform::Uwp),
];

#[derive(Debug, Clone, Copy)]
pub struct HardcodedStringHandler {
    element: &'static str,
    attribute: &'static str,
    kinds: AttributeKinds,
    platform: Platform,
}

impl HardcodedStringHandler {
    pub const fn new(
        element: &'static str,
        attribute: &'static str,
        kinds: AttributeKinds,
        platform: Platform,
    ) -> Self {
        Self {
            element,
            attribute,
            kinds,
            platform,
        }
    }
}

/// Handlers for every row of the built-in table.
pub fn handlers() -> impl Iterator<Item = HardcodedStringHandler> {
    HARDCODED
        .iter()
        .map(|&(element, attribute, kinds, platform)| {
            HardcodedStringHandler::new(element, attribute, kinds, platform)
        })
}

/// Whether `value` is literal text rather than a markup extension or elements.
pub fn is_literal(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && !value.starts_with('<') && (!value.starts_with('{') || value.starts_with("{}"))
}

impl ElementHandler for HardcodedStringHandler {
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
        let found = locate(source.text, self.attribute, self.kinds);
        if !found.found() || !is_literal(&found.value) {
            return Ok(());
        }

        let value = found.value.trim();
        let uid = ctx
            .uids
            .uid_for(ctx.file_name, source.name, source.text, value);
        let tag = DiagnosticTag::new(
            codes::HARDCODED_STRING,
            found.span.offset_by(source.offset),
            ctx.file_name,
            format!("Hardcoded string \"{value}\" in {}.{}", self.element, self.attribute),
            TagPayload::HardcodedString {
                element_name: source.name.to_string(),
                attribute_name: self.attribute.to_string(),
                attribute_kind: found.kind,
                value: value.to_string(),
                uid: uid.value,
                uid_exists: uid.exists,
            },
        )
        .with_insert_position(source.offset + 1 + source.name.len())
        .with_identifier(element_identifier(source.text));

        ctx.add(tag, source.text);
        Ok(())
    }
}
