use authorship_vectorizer::features::FunctionWordExtractor;
use authorship_vectorizer::{TextNormalizer, ZeroSpVec};
use proptest::prelude::*;

// --- STRATEGIES ---

prop_compose! {
    fn arb_chat_message()(
        words in prop::collection::vec("[A-Za-z0-9.,!?'_]{0,12}", 0..20),
        mention in any::<bool>(),
        url in any::<bool>(),
        code in any::<bool>(),
        emoji in any::<bool>(),
    ) -> String {
        let mut parts = words;
        if mention { parts.push("<@!1234>".to_string()); }
        if url { parts.push("https://example.com/a?b=c".to_string()); }
        if code { parts.push("`let x = 1;`".to_string()); }
        if emoji { parts.push("<a:party:998877>".to_string()); }
        parts.join(" ")
    }
}

prop_compose! {
    fn arb_non_negative_row(len: usize)(
        vals in prop::collection::vec(prop_oneof![Just(0.0f64), 0.0..10.0f64], len)
    ) -> ZeroSpVec<f64> {
        ZeroSpVec::from(vals)
    }
}

proptest! {
    #[test]
    fn normalize_is_idempotent(raw in ".{0,200}") {
        let n = TextNormalizer::new();
        let once = n.normalize(&raw);
        prop_assert_eq!(n.normalize(&once), once.clone());
    }

    #[test]
    fn normalize_output_charset(raw in arb_chat_message()) {
        let out = TextNormalizer::new().normalize(&raw);
        prop_assert!(out.chars().all(|c| c.is_ascii_lowercase() || c == ' ' || c == '[' || c == ']' || c == '_'));
        prop_assert!(!out.starts_with(' ') && !out.ends_with(' '));
        prop_assert!(!out.contains("  "));
    }

    #[test]
    fn cosine_stays_in_unit_interval(
        (a, b) in (1usize..40).prop_flat_map(|len| (arb_non_negative_row(len), arb_non_negative_row(len)))
    ) {
        let s = a.cosine_similarity(&b);
        prop_assert!(!s.is_nan());
        prop_assert!((0.0..=1.0).contains(&s));
        if !a.is_all_zero() {
            prop_assert!((a.cosine_similarity(&a) - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn function_word_vector_has_fixed_length(tokens in prop::collection::vec("[a-z]{1,5}|\\[url\\]", 0..30)) {
        let fw = FunctionWordExtractor::with_vocabulary(&["a", "the", "of", "and"]);
        let v = fw.extract(&tokens);
        prop_assert_eq!(v.len(), 4);
        let total: f64 = v.to_dense().iter().sum();
        prop_assert!(total <= 1.0 + 1e-12);
    }
}
