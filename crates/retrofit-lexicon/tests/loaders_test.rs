use std::collections::BTreeSet;

use retrofit_core::errors::LoadError;
use retrofit_fixtures::fixture_path;
use retrofit_lexicon::{AlignmentIndex, AlignmentPair, Lexicon, LoadOptions, MorphQuery, MorphRelation, VectorStore};

fn pair_set(index: &AlignmentIndex) -> BTreeSet<(String, AlignmentPair)> {
    index
        .patterns()
        .flat_map(|(p, pairs)| pairs.iter().map(move |pair| (p.to_string(), pair.clone())))
        .collect()
}

#[test]
fn loads_sample_vectors_normalized() {
    let (store, report) = VectorStore::load(&fixture_path("vectors.txt"), &LoadOptions::default()).unwrap();
    assert!(report.is_clean());
    assert_eq!(store.dimension(), 3);
    assert_eq!(store.len(), 12);
    assert!(store.contains("happy"), "keys are lowercased");
    assert!(store.contains("---num---"), "numbers collapse");
    for (word, v) in store.iter() {
        let norm: f64 = v.iter().map(|x| x * x).sum::<f64>().sqrt();
        assert!(norm < 1.0 && norm > 0.99, "{word} has norm {norm}");
    }
}

#[test]
fn malformed_vector_records_are_skipped() {
    let (store, report) =
        VectorStore::load(&fixture_path("vectors_malformed.txt"), &LoadOptions::default()).unwrap();
    let words: Vec<&str> = store.words().collect();
    assert_eq!(words, vec!["dog", "walk"]);
    let lines: Vec<usize> = report.skipped.iter().map(|r| r.line).collect();
    assert_eq!(lines, vec![2, 3, 4, 6]);
}

#[test]
fn word2vec_header_line_is_skipped() {
    let (store, report) = VectorStore::load(&fixture_path("vectors_header.txt"), &LoadOptions::default()).unwrap();
    assert_eq!(report.header, Some((4, 3)));
    assert!(report.is_clean());
    assert_eq!(store.dimension(), 3);
    assert_eq!(store.words().collect::<Vec<_>>(), vec!["dog", "dogs", "cat", "cats"]);
    assert!(!store.contains("---num---"));
}

#[test]
fn empty_vector_file_is_an_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("empty.txt");
    std::fs::write(&path, "\n\nonly-words here\n").unwrap();
    let err = VectorStore::load(&path, &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, LoadError::EmptyInput { .. }));
}

#[test]
fn missing_vector_file_is_io_error() {
    let err = VectorStore::load(std::path::Path::new("/nonexistent/vectors.txt"), &LoadOptions::default())
        .unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
}

#[test]
fn write_then_reload_matches_to_four_decimals() {
    let (store, _) = VectorStore::load(&fixture_path("vectors.txt"), &LoadOptions::default()).unwrap();
    let dir = tempfile::TempDir::new().unwrap();

    for name in ["out.txt", "out.txt.gz"] {
        let path = dir.path().join(name);
        store.write(&path).unwrap();
        // Reload without renormalizing so only the output rounding is measured.
        let raw = LoadOptions {
            normalize: false,
            ..Default::default()
        };
        let (reloaded, report) = VectorStore::load(&path, &raw).unwrap();
        assert!(report.is_clean());
        assert_eq!(reloaded.words().collect::<Vec<_>>(), store.words().collect::<Vec<_>>());
        for (word, original) in store.iter() {
            let back = reloaded.get(word).unwrap();
            for (a, b) in original.iter().zip(back) {
                assert!((a - b).abs() < 1e-4, "{name}: {word} drifted {a} -> {b}");
            }
        }
    }
}

#[test]
fn lexicon_fixture_loads() {
    let lexicon = Lexicon::load(&fixture_path("lexicon.txt")).unwrap();
    assert_eq!(lexicon.len(), 4);
    let (store, _) = VectorStore::load(&fixture_path("vectors.txt"), &LoadOptions::default()).unwrap();
    assert_eq!(lexicon.neighbors_of("happy", &store), vec!["glad", "joyful"]);
    assert!(lexicon.neighbors_of("dog", &store).is_empty());
}

#[test]
fn object_and_flat_alignment_files_agree() {
    let object = AlignmentIndex::load(&fixture_path("alignment.json")).unwrap();
    let flat = AlignmentIndex::load(&fixture_path("alignment_flat.json")).unwrap();
    assert_eq!(object.pair_count(), 10);
    assert_eq!(pair_set(&object), pair_set(&flat));
}

#[test]
fn malformed_alignment_json_is_format_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, r#"{"plural": "dog"}"#).unwrap();
    let err = AlignmentIndex::load(&path).unwrap_err();
    assert!(matches!(err, LoadError::Format { .. }));
}

#[test]
fn catvar_build_save_load_round_trip() {
    let (relations, skipped) = MorphRelation::load(&fixture_path("catvar_morph.txt")).unwrap();
    assert_eq!(relations.len(), 5);
    assert_eq!(skipped.len(), 1);

    let index = AlignmentIndex::build(&relations);
    // The duplicated dogs/dog relation contributes once.
    assert_eq!(index.pairs("plural").unwrap().len(), 2);
    assert_eq!(
        index.pairs("rplural").unwrap().iter().cloned().collect::<Vec<_>>(),
        vec![AlignmentPair::new("cats", "cat"), AlignmentPair::new("dogs", "dog")]
    );

    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("catvar.json");
    index.save(&path).unwrap();
    let reloaded = AlignmentIndex::load(&path).unwrap();
    assert_eq!(pair_set(&index), pair_set(&reloaded));
    assert_eq!(reloaded.pattern_count(), 6);
}

#[test]
fn filtered_build_only_keeps_matching_relations() {
    let (relations, _) = MorphRelation::load(&fixture_path("catvar_morph.txt")).unwrap();
    let query = MorphQuery {
        base: Some("walk".into()),
        ..Default::default()
    };
    let index = AlignmentIndex::build(query.search(&relations));
    let patterns: Vec<&str> = index.patterns().map(|(p, _)| p).collect();
    assert_eq!(patterns, vec!["agent", "past", "ragent", "rpast"]);
}

#[test]
fn built_forms_match_loaded_vector_keys() {
    let (store, _) = VectorStore::load(&fixture_path("vectors.txt"), &LoadOptions::default()).unwrap();
    let relation = MorphRelation::parse("Dogs\tDog\tplural").unwrap();
    let index = AlignmentIndex::build([&relation]);
    let forms: Vec<&str> = index.forms().into_iter().collect();
    assert_eq!(forms, vec!["dog", "dogs"]);
    assert!(forms.iter().all(|f| store.contains(f)));
}
