use crate::{
    diagnostics::{DiagnosticTag, TagPayload, codes, element_identifier},
    error::HandlerError,
    markup::{ElementSource, scan, tree},
    project::ProjectKind,
    span::Span,
};

use super::{ElementHandler, HandlerContext};

/// Attributes that give an image a name for screen readers.
const NAMING_ATTRIBUTES: &[&str] = &["AutomationProperties.Name", "AutomationProperties.LabeledBy"];

/// Images that screen readers announce must have an accessible name.
///
/// Decorative images opt out with `AutomationProperties.AccessibilityView="Raw"`
/// on Windows or `AutomationProperties.IsInAccessibleTree="False"` on Xamarin.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageHandler;

impl ElementHandler for ImageHandler {
    fn element(&self) -> &str {
        "Image"
    }

    fn process(
        &self,
        source: &ElementSource<'_>,
        ctx: &mut HandlerContext<'_>,
    ) -> Result<(), HandlerError> {
        let image = tree::build_at(source.text, source.offset)?;

        let named = !image.get_attributes(NAMING_ATTRIBUTES).is_empty();
        let hidden = match ctx.project {
            ProjectKind::XamarinForms => image
                .attribute_text("AutomationProperties.IsInAccessibleTree")
                .is_some_and(|v| v.trim().eq_ignore_ascii_case("false")),
            _ => image
                .attribute_text("AutomationProperties.AccessibilityView")
                .is_some_and(|v| v.trim().eq_ignore_ascii_case("raw")),
        };
        if named || hidden {
            return Ok(());
        }

        let open_len = scan::opening_tag(source.text).map_or(source.text.len(), |t| t.end);
        let tag = DiagnosticTag::new(
            codes::IMAGE_WITHOUT_NAME,
            Span::new(image.location.start, open_len),
            ctx.file_name,
            "Image has no accessible name",
            TagPayload::Plain,
        )
        .with_identifier(element_identifier(source.text));

        ctx.add(tag, source.text);
        Ok(())
    }
}
