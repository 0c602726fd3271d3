//! Per-element diagnostic handlers.
//!
//! A [`HandlerRegistry`] maps element names to the handlers interested in
//! them. It is built once per analysis session for one project kind and then
//! drives the element extractor through a [`Dispatcher`].

use std::collections::HashMap;

use crate::{
    diagnostics::{DiagnosticTag, TagList, TagSuppression},
    error::HandlerError,
    grid::GridHandler,
    markup::{ElementSink, ElementSource},
    project::ProjectKind,
};

pub mod check_box;
pub mod hardcoded;
pub mod image;
pub mod media_element;
pub mod required_attribute;
pub mod selected_item;
pub mod uid;

pub use uid::{CounterSequence, Uid, UidGenerator, UidSequence};

/// Raises diagnostics for one kind of element.
pub trait ElementHandler {
    /// Tag name this handler is dispatched for.
    fn element(&self) -> &str;

    /// Whether the handler runs for documents of `project`.
    fn applies_to(&self, _project: ProjectKind) -> bool {
        true
    }

    fn process(
        &self,
        source: &ElementSource<'_>,
        ctx: &mut HandlerContext<'_>,
    ) -> Result<(), HandlerError>;
}

/// State shared by every handler during one analysis pass.
pub struct HandlerContext<'a> {
    pub file_name: &'a str,
    pub project: ProjectKind,
    pub suppressions: &'a [TagSuppression],
    pub tags: &'a mut TagList,
    pub uids: &'a mut UidGenerator,
}

impl HandlerContext<'_> {
    /// Adds `tag` unless a suppression matches it for `owner_markup`.
    pub fn add(&mut self, tag: DiagnosticTag, owner_markup: &str) -> bool {
        self.tags.try_add(tag, owner_markup, self.suppressions)
    }
}

#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Vec<Box<dyn ElementHandler>>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, handler: impl ElementHandler + 'static) {
        self.handlers
            .entry(handler.element().to_string())
            .or_default()
            .push(Box::new(handler));
    }

    /// Registers `handler` only if it supports `project`.
    pub fn register_for(&mut self, project: ProjectKind, handler: impl ElementHandler + 'static) {
        if handler.applies_to(project) {
            self.register(handler);
        } else {
            log::debug!("`{}` handler skipped for {project} projects", handler.element());
        }
    }

    /// Every built-in handler that supports `project`.
    pub fn builtin(project: ProjectKind) -> Self {
        let mut registry = Self::new();
        for handler in hardcoded::handlers() {
            registry.register_for(project, handler);
        }
        for handler in required_attribute::handlers() {
            registry.register_for(project, handler);
        }
        for handler in selected_item::handlers() {
            registry.register_for(project, handler);
        }
        registry.register_for(project, check_box::CheckBoxHandler);
        registry.register_for(project, media_element::MediaElementHandler);
        registry.register_for(project, image::ImageHandler);
        registry.register_for(project, GridHandler);
        registry
    }

    pub fn handlers_for(&self, element: &str) -> &[Box<dyn ElementHandler>] {
        self.handlers
            .get(element)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn is_registered(&self, element: &str) -> bool {
        self.handlers.contains_key(element)
    }

    /// Registered element names, sorted.
    pub fn elements(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Routes extracted elements to their handlers, isolating handler failures.
pub struct Dispatcher<'r, 'c> {
    registry: &'r HandlerRegistry,
    ctx: HandlerContext<'c>,
}

impl<'r, 'c> Dispatcher<'r, 'c> {
    pub fn new(registry: &'r HandlerRegistry, ctx: HandlerContext<'c>) -> Self {
        Self { registry, ctx }
    }
}

impl ElementSink for Dispatcher<'_, '_> {
    fn wants(&self, name: &str) -> bool {
        self.registry.is_registered(name)
    }

    fn element(&mut self, source: ElementSource<'_>) {
        for handler in self.registry.handlers_for(source.name) {
            if let Err(e) = handler.process(&source, &mut self.ctx) {
                log::warn!(
                    "`{}` handler failed at offset {} in {}: {e}",
                    source.name,
                    source.offset,
                    self.ctx.file_name
                );
            }
        }
    }
}
