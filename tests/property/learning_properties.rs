use learning_core::core::rules::{CAPITALIZATIONS, WORD_SPLITS};
use learning_core::{LearningEngine, Profile};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn any_rule_trigger() -> impl Strategy<Value = &'static str> {
    let triggers: Vec<&'static str> = CAPITALIZATIONS
        .iter()
        .chain(WORD_SPLITS.iter())
        .map(|r| r.trigger)
        .collect();
    proptest::sample::select(triggers)
}

// ── Re-applying the same text never changes the profile again ─────────────

proptest! {
    #[test]
    fn learning_is_idempotent(text in "[a-zA-Z .,']{0,80}") {
        let engine = LearningEngine::new();
        let mut profile = Profile::new();
        engine.learn(&text, &mut profile);
        let snapshot = profile.clone();

        prop_assert!(!engine.learn(&text, &mut profile));
        prop_assert_eq!(profile, snapshot);
    }

    #[test]
    fn idempotent_on_text_with_triggers(
        prefix in "[a-z ]{0,20}",
        trigger in any_rule_trigger(),
        suffix in "[a-z ]{0,20}",
    ) {
        let text = format!("{prefix}{trigger}{suffix}");
        let engine = LearningEngine::new();
        let mut profile = Profile::new();
        prop_assert!(engine.learn(&text, &mut profile));
        prop_assert!(!engine.learn(&text, &mut profile));
    }
}

// ── A trigger embedded in a longer word still fires ───────────────────────

proptest! {
    #[test]
    fn embedded_trigger_fires(
        head in "[a-z]{1,8}",
        trigger in any_rule_trigger(),
        tail in "[a-z]{1,8}",
    ) {
        let mut profile = Profile::new();
        LearningEngine::new().learn(&format!("{head}{trigger}{tail}"), &mut profile);
        prop_assert!(
            profile.capitalizations.contains_key(trigger)
                || profile.word_corrections.contains_key(trigger),
            "trigger {} did not fire", trigger
        );
    }
}

// ── Vocabulary is the sorted set of learned canonical forms ───────────────

proptest! {
    #[test]
    fn vocabulary_matches_capitalizations(
        texts in proptest::collection::vec("[a-zA-Z ]{0,40}", 1..5),
        trigger in any_rule_trigger(),
    ) {
        let engine = LearningEngine::new();
        let mut profile = Profile::new();
        for text in &texts {
            engine.learn(text, &mut profile);
        }
        engine.learn(trigger, &mut profile);

        let expected: Vec<String> = profile
            .capitalizations
            .values()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        prop_assert_eq!(&profile.technical_vocabulary, &expected);
    }
}
