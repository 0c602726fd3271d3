//! `SelectedItem` bindings that never write the selection back.

use std::sync::OnceLock;

use regex::Regex;

use crate::{
    diagnostics::{DiagnosticTag, TagPayload, codes, element_identifier},
    error::HandlerError,
    markup::{AttributeKinds, ElementSource, locate},
};

use super::{ElementHandler, HandlerContext};

const SELECTORS: &[&str] = &["ComboBox", "GridView", "ListBox", "ListView", "Picker"];

#[derive(Debug, Clone, Copy)]
pub struct SelectedItemHandler {
    element: &'static str,
}

pub fn handlers() -> impl Iterator<Item = SelectedItemHandler> {
    SELECTORS.iter().map(|&element| SelectedItemHandler { element })
}

fn mode_regex() -> &'static Regex {
    static MODE: OnceLock<Regex> = OnceLock::new();
    MODE.get_or_init(|| Regex::new(r"Mode\s*=\s*(\w+)").expect("Invalid binding mode regex"))
}

/// The binding rewritten to `Mode=TwoWay`, or `None` if it already is two-way
/// or is not a binding at all.
pub fn two_way_binding(value: &str) -> Option<String> {
    let value = value.trim();
    let is_binding = value.starts_with("{Binding") || value.starts_with("{x:Bind");
    if !is_binding || !value.ends_with('}') {
        return None;
    }

    let mode = mode_regex();
    if let Some(caps) = mode.captures(value) {
        if caps[1].eq_ignore_ascii_case("TwoWay") {
            return None;
        }
        return Some(mode.replace(value, "Mode=TwoWay").into_owned());
    }

    let head = value[..value.len() - 1].trim_end();
    let separator = if head == "{Binding" || head == "{x:Bind" { " " } else { ", " };
    Some(format!("{head}{separator}Mode=TwoWay}}"))
}

impl ElementHandler for SelectedItemHandler {
    fn element(&self) -> &str {
        self.element
    }

    fn process(
        &self,
        source: &ElementSource<'_>,
        ctx: &mut HandlerContext<'_>,
    ) -> Result<(), HandlerError> {
        let found = locate(source.text, "SelectedItem", AttributeKinds::INLINE);
        if !found.found() {
            return Ok(());
        }
        let Some(binding) = two_way_binding(&found.value) else {
            return Ok(());
        };

        let tag = DiagnosticTag::new(
            codes::SELECTED_ITEM_NOT_TWO_WAY,
            found.span.offset_by(source.offset),
            ctx.file_name,
            format!("{}.SelectedItem binding should be TwoWay", self.element),
            TagPayload::ReplaceWith {
                new_text: format!("SelectedItem=\"{binding}\""),
            },
        )
        .with_identifier(element_identifier(source.text));

        ctx.add(tag, source.text);
        Ok(())
    }
}
