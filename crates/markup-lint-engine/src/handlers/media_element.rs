use crate::{
    diagnostics::{DiagnosticTag, TagPayload, codes, element_identifier},
    error::HandlerError,
    markup::{ElementSource, scan},
    project::{Platform, ProjectKind},
};

use super::{ElementHandler, HandlerContext};

const REPLACEMENT: &str = "MediaPlayerElement";

/// Suggests `MediaPlayerElement` in place of the older `MediaElement`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MediaElementHandler;

impl ElementHandler for MediaElementHandler {
    fn element(&self) -> &str {
        "MediaElement"
    }

    fn applies_to(&self, project: ProjectKind) -> bool {
        Platform::Uwp.supports(project)
    }

    fn process(
        &self,
        source: &ElementSource<'_>,
        ctx: &mut HandlerContext<'_>,
    ) -> Result<(), HandlerError> {
        let open = scan::opening_tag(source.text).ok_or(HandlerError::Malformed {
            element: source.name.to_string(),
            reason: "no opening tag",
        })?;
        let closing_tag = scan::matching_close(source.text, &open).map(|close| close.start + source.offset);

        let tag = DiagnosticTag::new(
            codes::USE_MEDIA_PLAYER_ELEMENT,
            open.span().offset_by(source.offset),
            ctx.file_name,
            format!("Use {REPLACEMENT} instead of {}", source.name),
            TagPayload::RenameElement {
                from: source.name.to_string(),
                to: REPLACEMENT.to_string(),
                closing_tag,
            },
        )
        .with_identifier(element_identifier(source.text));

        ctx.add(tag, source.text);
        Ok(())
    }
}
