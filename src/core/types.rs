// src/core/types.rs
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// The learned vocabulary profile, persisted as `learned_profile.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Lowercase malformed token -> corrected phrase, e.g. "pushto" -> "push to".
    #[serde(default, deserialize_with = "null_as_default")]
    pub word_corrections: BTreeMap<String, String>,
    /// Lowercase token -> canonical casing, e.g. "github" -> "GitHub".
    #[serde(default, deserialize_with = "null_as_default")]
    pub capitalizations: BTreeMap<String, String>,
    /// Every canonical form ever learned. Kept sorted whenever the learner writes.
    #[serde(default, deserialize_with = "null_as_default")]
    pub technical_vocabulary: Vec<String>,
    /// Reserved for a future rule source; rendered and tracked but never learned.
    #[serde(default, deserialize_with = "null_as_default")]
    pub phrase_patterns: BTreeMap<String, String>,
    /// Top-level keys written by other tools, carried through a rewrite untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// The four learned categories of a profile, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    WordCorrections,
    Capitalizations,
    TechnicalVocabulary,
    PhrasePatterns,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::WordCorrections,
        Category::Capitalizations,
        Category::TechnicalVocabulary,
        Category::PhrasePatterns,
    ];

    /// The JSON key used for this category in both persisted documents.
    pub fn key(self) -> &'static str {
        match self {
            Category::WordCorrections => "wordCorrections",
            Category::Capitalizations => "capitalizations",
            Category::TechnicalVocabulary => "technicalVocabulary",
            Category::PhrasePatterns => "phrasePatterns",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::WordCorrections => "Word Corrections",
            Category::Capitalizations => "Capitalizations",
            Category::TechnicalVocabulary => "Technical Vocabulary",
            Category::PhrasePatterns => "Phrase Patterns",
        }
    }
}

impl Profile {
    pub fn new() -> Self {
        Self::default()
    }

    /// The learned keys of one category. For the vocabulary list these are the
    /// terms themselves.
    pub fn keys(&self, category: Category) -> Vec<&str> {
        match category {
            Category::WordCorrections => self.word_corrections.keys().map(String::as_str).collect(),
            Category::Capitalizations => self.capitalizations.keys().map(String::as_str).collect(),
            Category::TechnicalVocabulary => {
                self.technical_vocabulary.iter().map(String::as_str).collect()
            }
            Category::PhrasePatterns => self.phrase_patterns.keys().map(String::as_str).collect(),
        }
    }

    pub fn count(&self, category: Category) -> usize {
        match category {
            Category::WordCorrections => self.word_corrections.len(),
            Category::Capitalizations => self.capitalizations.len(),
            Category::TechnicalVocabulary => self.technical_vocabulary.len(),
            Category::PhrasePatterns => self.phrase_patterns.len(),
        }
    }

    pub fn total_items(&self) -> usize {
        Category::ALL.iter().map(|&c| self.count(c)).sum()
    }
}

/// One value per profile category. Serializes with the same camelCase keys the
/// profile uses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerCategory<T> {
    #[serde(default)]
    pub word_corrections: T,
    #[serde(default)]
    pub capitalizations: T,
    #[serde(default)]
    pub technical_vocabulary: T,
    #[serde(default)]
    pub phrase_patterns: T,
}

impl<T> PerCategory<T> {
    pub fn get(&self, category: Category) -> &T {
        match category {
            Category::WordCorrections => &self.word_corrections,
            Category::Capitalizations => &self.capitalizations,
            Category::TechnicalVocabulary => &self.technical_vocabulary,
            Category::PhrasePatterns => &self.phrase_patterns,
        }
    }

    pub fn get_mut(&mut self, category: Category) -> &mut T {
        match category {
            Category::WordCorrections => &mut self.word_corrections,
            Category::Capitalizations => &mut self.capitalizations,
            Category::TechnicalVocabulary => &mut self.technical_vocabulary,
            Category::PhrasePatterns => &mut self.phrase_patterns,
        }
    }

    /// Builds a value for every category from a function of the category.
    pub fn from_fn(mut f: impl FnMut(Category) -> T) -> Self {
        Self {
            word_corrections: f(Category::WordCorrections),
            capitalizations: f(Category::Capitalizations),
            technical_vocabulary: f(Category::TechnicalVocabulary),
            phrase_patterns: f(Category::PhrasePatterns),
        }
    }
}

impl PerCategory<usize> {
    pub fn sum(&self) -> usize {
        Category::ALL.iter().map(|&c| *self.get(c)).sum()
    }
}
