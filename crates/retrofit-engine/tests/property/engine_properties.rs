//! Property tests for the retrofitting update.

use proptest::prelude::*;
use retrofit_engine::retrofit;
use retrofit_lexicon::{AlignmentIndex, AlignmentPair, Lexicon, VectorStore};

const WORDS: [&str; 6] = ["alpha", "beta", "gamma", "delta", "epsilon", "zeta"];

fn vectors() -> impl Strategy<Value = Vec<Vec<f64>>> {
    prop::collection::vec(prop::collection::vec(-1.0f64..1.0, 3), WORDS.len())
}

fn anchor_from(vectors: &[Vec<f64>]) -> VectorStore {
    VectorStore::from_entries(WORDS.iter().copied().zip(vectors.iter().cloned())).unwrap()
}

proptest! {
    #[test]
    fn zero_iterations_is_identity(vectors in vectors()) {
        let anchor = anchor_from(&vectors);
        let mut lexicon = Lexicon::new();
        lexicon.insert("alpha", ["beta", "gamma"]);
        let (out, _) = retrofit(&anchor, Some(&lexicon), None, 0).unwrap();
        prop_assert_eq!(out, anchor);
    }

    #[test]
    fn words_without_evidence_never_move(vectors in vectors(), iterations in 1usize..6) {
        let anchor = anchor_from(&vectors);
        let mut lexicon = Lexicon::new();
        lexicon.insert("alpha", ["beta"]);
        let mut index = AlignmentIndex::new();
        index.insert("pattern", AlignmentPair::new("gamma", "delta"));
        let (out, _) = retrofit(&anchor, Some(&lexicon), Some(&index), iterations).unwrap();
        for word in ["beta", "epsilon", "zeta"] {
            prop_assert_eq!(out.get(word), anchor.get(word));
        }
    }

    #[test]
    fn consistent_pair_is_a_fixed_point(vectors in vectors(), iterations in 1usize..6) {
        // A lone pair defines its own offset, so W[target] - offset == A[source].
        let anchor = anchor_from(&vectors);
        let mut index = AlignmentIndex::new();
        index.insert("pattern", AlignmentPair::new("alpha", "beta"));
        let (out, _) = retrofit(&anchor, None, Some(&index), iterations).unwrap();
        for word in ["alpha", "beta"] {
            let (a, b) = (out.get(word).unwrap(), anchor.get(word).unwrap());
            for (x, y) in a.iter().zip(b) {
                prop_assert!((x - y).abs() < 1e-9, "{} drifted {} -> {}", word, y, x);
            }
        }
    }

    #[test]
    fn output_is_bounded_by_inputs(vectors in vectors(), iterations in 1usize..8) {
        let anchor = anchor_from(&vectors);
        let mut lexicon = Lexicon::new();
        for (i, head) in WORDS.iter().enumerate() {
            lexicon.insert(head, [WORDS[(i + 1) % WORDS.len()]]);
        }
        let (out, _) = retrofit(&anchor, Some(&lexicon), None, iterations).unwrap();
        // Lexicon-only updates are convex combinations of existing vectors.
        let bound = vectors.iter().flatten().fold(0.0f64, |m, v| m.max(v.abs()));
        for (_, v) in out.iter() {
            for x in v {
                prop_assert!(x.abs() <= bound + 1e-12);
            }
        }
    }
}
