// File: src/learning.rs
use crate::core::rules::{self, Rule};
use crate::core::types::Profile;
use log::debug;
use std::collections::BTreeSet;

/// Applies the fixed rule tables to observed text.
pub struct LearningEngine {
    capitalizations: &'static [Rule],
    word_splits: &'static [Rule],
}

impl Default for LearningEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl LearningEngine {
    pub fn new() -> Self {
        Self::with_rules(rules::CAPITALIZATIONS, rules::WORD_SPLITS)
    }

    pub fn with_rules(capitalizations: &'static [Rule], word_splits: &'static [Rule]) -> Self {
        Self { capitalizations, word_splits }
    }

    /// Learns from `text`, returning whether the profile changed.
    ///
    /// A rule fires when its trigger occurs in the lowercased text and the
    /// profile does not already map the trigger to the rule's replacement.
    /// Existing mappings are only ever moved toward the canonical form, never
    /// removed. When anything fires, `technical_vocabulary` is rewritten as the
    /// sorted union of its previous terms and the new canonical forms.
    pub fn learn(&self, text: &str, profile: &mut Profile) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        let lowered = text.to_lowercase();
        let mut changed = false;
        let mut vocabulary: BTreeSet<String> = profile.technical_vocabulary.iter().cloned().collect();

        for rule in rules::matching(self.capitalizations, &lowered) {
            if profile.capitalizations.get(rule.trigger).map(String::as_str) != Some(rule.replacement) {
                debug!("capitalization: {} -> {}", rule.trigger, rule.replacement);
                profile
                    .capitalizations
                    .insert(rule.trigger.to_string(), rule.replacement.to_string());
                vocabulary.insert(rule.replacement.to_string());
                changed = true;
            }
        }

        for rule in rules::matching(self.word_splits, &lowered) {
            if profile.word_corrections.get(rule.trigger).map(String::as_str) != Some(rule.replacement) {
                debug!("word correction: {} -> {}", rule.trigger, rule.replacement);
                profile
                    .word_corrections
                    .insert(rule.trigger.to_string(), rule.replacement.to_string());
                changed = true;
            }
        }

        if changed {
            profile.technical_vocabulary = vocabulary.into_iter().collect();
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Let's setup the api integration and pushto github";

    fn map(pairs: &[(&str, &str)]) -> std::collections::BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn learns_caps_and_splits_from_sample() {
        let mut profile = Profile::new();
        assert!(LearningEngine::new().learn(SAMPLE, &mut profile));

        assert_eq!(profile.capitalizations, map(&[("api", "API"), ("github", "GitHub")]));
        assert_eq!(profile.word_corrections, map(&[("setup", "set up"), ("pushto", "push to")]));
        assert_eq!(profile.technical_vocabulary, vec!["API", "GitHub"]);
        assert!(profile.phrase_patterns.is_empty());
    }

    #[test]
    fn second_application_is_a_no_op() {
        let engine = LearningEngine::new();
        let mut profile = Profile::new();
        assert!(engine.learn(SAMPLE, &mut profile));
        let after_first = serde_json::to_string_pretty(&profile).unwrap();

        assert!(!engine.learn(SAMPLE, &mut profile));
        assert_eq!(serde_json::to_string_pretty(&profile).unwrap(), after_first);
    }

    #[test]
    fn trigger_inside_longer_word_still_fires() {
        let mut profile = Profile::new();
        assert!(LearningEngine::new().learn("that curly brace is interesting", &mut profile));
        assert_eq!(profile.capitalizations, map(&[("rest", "REST"), ("url", "URL")]));
    }

    #[test]
    fn matching_ignores_case_of_input() {
        let mut profile = Profile::new();
        assert!(LearningEngine::new().learn("Deploy to KUBERNETES via Docker", &mut profile));
        assert_eq!(profile.technical_vocabulary, vec!["Docker", "Kubernetes"]);
    }

    #[test]
    fn blank_text_changes_nothing() {
        let mut profile = Profile::new();
        assert!(!LearningEngine::new().learn("   \n\t", &mut profile));
        assert_eq!(profile, Profile::new());
    }

    #[test]
    fn unrelated_text_changes_nothing() {
        let mut profile = Profile::new();
        assert!(!LearningEngine::new().learn("nothing to see here", &mut profile));
        assert!(profile.technical_vocabulary.is_empty());
    }

    #[test]
    fn wrong_mapping_is_corrected_toward_canonical_form() {
        let mut profile = Profile::new();
        profile.capitalizations.insert("github".into(), "Github".into());
        profile.technical_vocabulary.push("Github".into());

        assert!(LearningEngine::new().learn("github", &mut profile));
        assert_eq!(profile.capitalizations["github"], "GitHub");
        // Vocabulary is append-only: the stale casing stays alongside the new one.
        assert_eq!(profile.technical_vocabulary, vec!["GitHub", "Github"]);
    }

    #[test]
    fn unrelated_mappings_are_kept() {
        let mut profile = Profile::new();
        profile.word_corrections.insert("teh".into(), "the".into());
        profile.phrase_patterns.insert("new line".into(), "\n".into());

        assert!(LearningEngine::new().learn("login please", &mut profile));
        assert_eq!(profile.word_corrections["teh"], "the");
        assert_eq!(profile.word_corrections["login"], "log in");
        assert_eq!(profile.phrase_patterns.len(), 1);
    }

    #[test]
    fn vocabulary_is_resorted_only_when_something_fired() {
        let mut profile = Profile::new();
        profile.technical_vocabulary = vec!["Zig".into(), "Ada".into()];
        assert!(!LearningEngine::new().learn("no triggers", &mut profile));
        assert_eq!(profile.technical_vocabulary, vec!["Zig", "Ada"]);

        assert!(LearningEngine::new().learn("redis", &mut profile));
        assert_eq!(profile.technical_vocabulary, vec!["Ada", "Redis", "Zig"]);
    }

    #[test]
    fn custom_rule_tables_are_honoured() {
        const CAPS: &[Rule] = &[Rule { trigger: "rust", replacement: "Rust" }];
        let engine = LearningEngine::with_rules(CAPS, &[]);
        let mut profile = Profile::new();
        assert!(engine.learn("trust me", &mut profile));
        assert_eq!(profile.technical_vocabulary, vec!["Rust"]);
        assert!(profile.word_corrections.is_empty());
    }
}
