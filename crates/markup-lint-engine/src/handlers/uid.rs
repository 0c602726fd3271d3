//! Localization ids for hardcoded strings.

use std::{fmt, sync::OnceLock};

use regex::Regex;

use crate::{cache::SizeLimitedMap, markup::inline_value, markup::tree::local_name};

/// Remembered suggestions per session.
const CACHE_CAPACITY: usize = 50;

/// Source of suffixes for ids that cannot be derived from the markup.
pub trait UidSequence: fmt::Debug {
    fn next_suffix(&mut self) -> u64;
}

/// Yields 1, 2, 3, ...
#[derive(Debug, Default)]
pub struct CounterSequence {
    last: u64,
}

impl UidSequence for CounterSequence {
    fn next_suffix(&mut self) -> u64 {
        self.last += 1;
        self.last
    }
}

/// A suggested id and whether the element already declares it as `x:Uid`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Uid {
    pub value: String,
    pub exists: bool,
}

/// Picks the id an element's strings should be localized under.
///
/// An existing `x:Uid` is used as is, then `x:Name` or `Name`. Otherwise the id
/// is synthesized from the element name and the string being localized, or
/// from the element name and the next number in the sequence. Synthesized ids
/// are remembered per file and element so re-analyzing unchanged markup gives
/// the same answer.
#[derive(Debug)]
pub struct UidGenerator {
    sequence: Box<dyn UidSequence>,
    suggestions: SizeLimitedMap<(String, String), String>,
}

impl Default for UidGenerator {
    fn default() -> Self {
        Self::with_sequence(CounterSequence::default())
    }
}

impl UidGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sequence(sequence: impl UidSequence + 'static) -> Self {
        Self {
            sequence: Box::new(sequence),
            suggestions: SizeLimitedMap::new(CACHE_CAPACITY),
        }
    }

    pub fn uid_for(
        &mut self,
        file_name: &str,
        element_name: &str,
        markup: &str,
        value: &str,
    ) -> Uid {
        if let Some(existing) = inline_value(markup, "x:Uid") {
            return Uid {
                value: existing,
                exists: true,
            };
        }
        if let Some(name) = inline_value(markup, "x:Name").or_else(|| inline_value(markup, "Name")) {
            return Uid {
                value: name,
                exists: false,
            };
        }

        let key = (file_name.to_string(), markup.to_string());
        if let Some(cached) = self.suggestions.get(&key) {
            return Uid {
                value: cached.clone(),
                exists: false,
            };
        }

        let element = local_name(element_name);
        let title = title_case(value);
        let suggestion = if title.is_empty() {
            format!("{element}{}", self.sequence.next_suffix())
        } else {
            format!("{element}{title}")
        };
        self.suggestions.insert(key, suggestion.clone());
        Uid {
            value: suggestion,
            exists: false,
        }
    }
}

/// `"save the file!"` becomes `"SaveTheFile"`.
fn title_case(text: &str) -> String {
    static WORD: OnceLock<Regex> = OnceLock::new();
    let word = WORD.get_or_init(|| Regex::new(r"[[:alnum:]]+").expect("Invalid word regex"));

    word.find_iter(text)
        .map(|m| {
            let mut chars = m.as_str().chars();
            chars
                .next()
                .map(|first| first.to_uppercase().chain(chars).collect::<String>())
                .unwrap_or_default()
        })
        .collect()
}
