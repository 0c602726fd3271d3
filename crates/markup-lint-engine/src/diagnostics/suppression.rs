use serde::{Deserialize, Serialize};

use super::DiagnosticTag;

/// A user rule that keeps one error code from being reported in one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSuppression {
    pub error_code: String,
    pub file_name: String,
    /// Fragment the element's markup must contain. Blank matches every element.
    #[serde(default)]
    pub element_identifier: String,
    #[serde(default)]
    pub reason: String,
}

impl TagSuppression {
    /// Suppresses every `error_code` tag in `file_name`.
    pub fn file_wide(error_code: &str, file_name: &str) -> Self {
        Self {
            error_code: error_code.to_string(),
            file_name: file_name.to_string(),
            element_identifier: String::new(),
            reason: String::new(),
        }
    }

    #[must_use]
    pub fn for_element(mut self, identifier: &str) -> Self {
        self.element_identifier = identifier.to_string();
        self
    }

    /// Whether this rule suppresses `tag` raised on the element `owner_markup`.
    pub fn matches(&self, tag: &DiagnosticTag, owner_markup: &str) -> bool {
        self.error_code == tag.error_code
            && self.file_name == tag.file_name
            && (self.element_identifier.trim().is_empty()
                || owner_markup.contains(self.element_identifier.as_str()))
    }
}

/// Tags raised during one analysis pass, in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagList {
    tags: Vec<DiagnosticTag>,
}

impl TagList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `tag` unless one of `suppressions` matches it. Returns whether it
    /// was added.
    pub fn try_add(
        &mut self,
        tag: DiagnosticTag,
        owner_markup: &str,
        suppressions: &[TagSuppression],
    ) -> bool {
        if let Some(rule) = suppressions.iter().find(|s| s.matches(&tag, owner_markup)) {
            log::debug!(
                "{} in {} suppressed by rule for `{}`",
                tag.error_code,
                tag.file_name,
                rule.element_identifier
            );
            return false;
        }
        self.tags.push(tag);
        true
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DiagnosticTag> {
        self.tags.iter()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn into_vec(self) -> Vec<DiagnosticTag> {
        self.tags
    }
}

impl<'a> IntoIterator for &'a TagList {
    type Item = &'a DiagnosticTag;
    type IntoIter = std::slice::Iter<'a, DiagnosticTag>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        diagnostics::{TagPayload, codes},
        span::Span,
    };

    const MARKUP: &str = "<TextBlock Text=\"menu1\" />";

    fn tag(code: &str, file: &str) -> DiagnosticTag {
        DiagnosticTag::new(code, Span::new(0, 10), file, "", TagPayload::Plain)
    }

    #[test]
    fn unsuppressed_tag_is_added() {
        let mut list = TagList::new();
        assert!(list.try_add(tag(codes::HARDCODED_STRING, "a.xaml"), MARKUP, &[]));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn file_wide_rule_suppresses() {
        let rules = [TagSuppression::file_wide(codes::HARDCODED_STRING, "a.xaml")];
        let mut list = TagList::new();
        assert!(!list.try_add(tag(codes::HARDCODED_STRING, "a.xaml"), MARKUP, &rules));
        assert!(list.is_empty());
    }

    #[test]
    fn whitespace_identifier_counts_as_blank() {
        let rules =
            [TagSuppression::file_wide(codes::HARDCODED_STRING, "a.xaml").for_element("  ")];
        let mut list = TagList::new();
        assert!(!list.try_add(tag(codes::HARDCODED_STRING, "a.xaml"), MARKUP, &rules));
    }

    #[test]
    fn element_rule_needs_fragment_in_markup() {
        let rules = [
            TagSuppression::file_wide(codes::HARDCODED_STRING, "a.xaml").for_element("Text=\"menu2\"")
        ];
        let mut list = TagList::new();
        assert!(list.try_add(tag(codes::HARDCODED_STRING, "a.xaml"), MARKUP, &rules));

        let rules = [
            TagSuppression::file_wide(codes::HARDCODED_STRING, "a.xaml").for_element("Text=\"menu1\"")
        ];
        assert!(!list.try_add(tag(codes::HARDCODED_STRING, "a.xaml"), MARKUP, &rules));
    }

    #[test]
    fn code_and_file_must_both_match() {
        let rules = [
            TagSuppression::file_wide(codes::HARDCODED_STRING, "b.xaml"),
            TagSuppression::file_wide(codes::IMAGE_WITHOUT_NAME, "a.xaml"),
        ];
        let mut list = TagList::new();
        assert!(list.try_add(tag(codes::HARDCODED_STRING, "a.xaml"), MARKUP, &rules));
    }

    #[test]
    fn blank_rule_wins_over_specific_rules() {
        let rules = [
            TagSuppression::file_wide(codes::HARDCODED_STRING, "a.xaml").for_element("nothing-like-this"),
            TagSuppression::file_wide(codes::HARDCODED_STRING, "a.xaml").for_element("other"),
            TagSuppression::file_wide(codes::HARDCODED_STRING, "a.xaml"),
        ];
        let mut list = TagList::new();
        for markup in [MARKUP, "<Button Content=\"x\" />", "<TextBox />"] {
            assert!(!list.try_add(tag(codes::HARDCODED_STRING, "a.xaml"), markup, &rules));
        }
        assert!(list.is_empty());
    }

    #[test]
    fn no_deduplication() {
        let mut list = TagList::new();
        list.try_add(tag(codes::HARDCODED_STRING, "a.xaml"), MARKUP, &[]);
        list.try_add(tag(codes::HARDCODED_STRING, "a.xaml"), MARKUP, &[]);
        list.try_add(tag(codes::IMAGE_WITHOUT_NAME, "a.xaml"), MARKUP, &[]);
        let codes: Vec<_> = list.iter().map(|t| t.error_code.as_str()).collect();
        assert_eq!(codes, vec!["RXT200", "RXT200", "RXT451"]);
    }
}
