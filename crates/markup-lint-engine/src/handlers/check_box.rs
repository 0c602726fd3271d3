use crate::{
    diagnostics::{DiagnosticTag, TagPayload, codes, element_identifier},
    error::HandlerError,
    markup::{ElementSource, inline_value, scan},
    project::{Platform, ProjectKind},
};

use super::{ElementHandler, HandlerContext};

/// A `CheckBox` that handles `Checked` but not `Unchecked`, or the reverse,
/// usually misses half of its state changes.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckBoxHandler;

const CHECKED: &str = "Checked";
const UNCHECKED: &str = "Unchecked";

impl ElementHandler for CheckBoxHandler {
    fn element(&self) -> &str {
        "CheckBox"
    }

    fn applies_to(&self, project: ProjectKind) -> bool {
        Platform::Windows.supports(project)
    }

    fn process(
        &self,
        source: &ElementSource<'_>,
        ctx: &mut HandlerContext<'_>,
    ) -> Result<(), HandlerError> {
        let checked = inline_value(source.text, CHECKED).is_some();
        let unchecked = inline_value(source.text, UNCHECKED).is_some();
        let (present, missing) = match (checked, unchecked) {
            (true, false) => (CHECKED, UNCHECKED),
            (false, true) => (UNCHECKED, CHECKED),
            _ => return Ok(()),
        };

        let open = scan::opening_tag(source.text).ok_or(HandlerError::Malformed {
            element: source.name.to_string(),
            reason: "no opening tag",
        })?;
        let tag = DiagnosticTag::new(
            codes::CHECK_BOX_UNPAIRED_EVENT,
            open.span().offset_by(source.offset),
            ctx.file_name,
            format!("CheckBox handles {present} but not {missing}"),
            TagPayload::PairedEvent {
                present: present.to_string(),
                missing: missing.to_string(),
            },
        )
        .with_insert_position(source.offset + 1 + source.name.len())
        .with_identifier(element_identifier(source.text));

        ctx.add(tag, source.text);
        Ok(())
    }
}
