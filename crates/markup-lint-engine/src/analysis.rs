//! Whole-document analysis.

use std::path::Path;

use crate::{
    diagnostics::{DiagnosticTag, TagList, TagSuppression},
    handlers::{Dispatcher, HandlerContext, HandlerRegistry, UidGenerator, UidSequence},
    markup::extract,
    project::ProjectKind,
};

const MARKUP_EXTENSION: &str = "xaml";

/// An analysis session for one project.
///
/// Holds the handler registry and the UID suggestion cache, so repeated
/// analyses of the same markup suggest the same UIDs.
pub struct Analyzer {
    project: ProjectKind,
    registry: HandlerRegistry,
    uids: UidGenerator,
}

impl Analyzer {
    pub fn new(project: ProjectKind) -> Self {
        Self::with_registry(project, HandlerRegistry::builtin(project))
    }

    pub fn with_registry(project: ProjectKind, registry: HandlerRegistry) -> Self {
        Self {
            project,
            registry,
            uids: UidGenerator::new(),
        }
    }

    /// Replaces the fallback UID sequence.
    pub fn with_uid_sequence(mut self, sequence: impl UidSequence + 'static) -> Self {
        self.uids = UidGenerator::with_sequence(sequence);
        self
    }

    pub fn project(&self) -> ProjectKind {
        self.project
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Runs every registered handler over `document`, in the order the
    /// elements close. Files that are not markup produce no tags.
    pub fn analyze(
        &mut self,
        document: &str,
        file_name: &str,
        suppressions: &[TagSuppression],
    ) -> Vec<DiagnosticTag> {
        if !is_markup_file(file_name) {
            log::debug!("skipping {file_name}: not a .{MARKUP_EXTENSION} file");
            return vec![];
        }

        let mut tags = TagList::new();
        let ctx = HandlerContext {
            file_name,
            project: self.project,
            suppressions,
            tags: &mut tags,
            uids: &mut self.uids,
        };
        let mut dispatcher = Dispatcher::new(&self.registry, ctx);
        extract(document, &mut dispatcher);

        log::debug!("{file_name}: {} tag(s)", tags.len());
        tags.into_vec()
    }
}

/// Analyzes `document` with a fresh session.
pub fn analyze(
    document: &str,
    file_name: &str,
    project: ProjectKind,
    suppressions: &[TagSuppression],
) -> Vec<DiagnosticTag> {
    Analyzer::new(project).analyze(document, file_name, suppressions)
}

pub fn is_markup_file(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(MARKUP_EXTENSION))
}
