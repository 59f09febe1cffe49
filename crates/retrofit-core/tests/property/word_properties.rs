use proptest::prelude::*;
use retrofit_core::normalize_word;
use retrofit_core::vector::{l2_norm, normalize_in_place};

proptest! {
    #[test]
    fn normalization_is_idempotent(s in "[A-Za-zÀ-ÿ0-9 .,;!?'_-]{0,24}") {
        let once = normalize_word(&s);
        let twice = normalize_word(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn normalized_words_have_no_uppercase(s in "[A-Za-z]{1,16}") {
        let w = normalize_word(&s);
        prop_assert!(!w.chars().any(char::is_uppercase));
    }

    #[test]
    fn normalized_vectors_are_at_most_unit(v in prop::collection::vec(-100.0f64..100.0, 1..64)) {
        let mut v = v;
        normalize_in_place(&mut v);
        let norm = l2_norm(&v);
        prop_assert!(norm < 1.0);
    }

    #[test]
    fn nonzero_vectors_normalize_close_to_unit(v in prop::collection::vec(1.0f64..10.0, 2..32)) {
        let mut v = v;
        normalize_in_place(&mut v);
        prop_assert!((l2_norm(&v) - 1.0).abs() < 1e-6);
    }
}
