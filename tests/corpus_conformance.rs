//! Corpus-based conformance tests.
//!
//! Runs every vector in `corpus/corpus.json` and verifies both the recorded
//! expectation and agreement with the `serde_json` reference implementation.

use std::path::Path;

use json_tree::conformance::{differential_parse, CorpusRunner, VectorResult};

/// Path to the corpus file relative to the crate root.
const CORPUS_PATH: &str = "corpus/corpus.json";

fn load_corpus() -> CorpusRunner {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(CORPUS_PATH);
    CorpusRunner::load(&path).expect("failed to load corpus")
}

#[test]
fn corpus_manifest_is_current() {
    let runner = load_corpus();
    assert_eq!(runner.manifest().format_version, "corpus-v1");
    assert_eq!(runner.manifest().version, "1");
    assert!(runner.vector_count() > 40, "corpus unexpectedly small");
}

#[test]
fn full_corpus_passes() {
    let runner = load_corpus();
    let results = runner.run_all();

    if !results.all_passed() {
        for (id, result) in results.failures() {
            if let VectorResult::Fail { expected, actual } = result {
                eprintln!("{id}: expected {expected}, got {actual}");
            }
        }
    }

    assert!(
        results.all_passed(),
        "corpus conformance failed: {}",
        results.summary()
    );
    assert_eq!(results.total(), runner.vector_count());
}

#[test]
fn corpus_inputs_agree_with_reference() {
    // Every corpus input, accepting or rejecting, must produce the same
    // accept/reject decision as the reference implementation.
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(CORPUS_PATH);
    let content = std::fs::read_to_string(path).expect("failed to read corpus");
    let corpus: serde_json::Value = serde_json::from_str(&content).expect("corpus is JSON");

    for vector in corpus["vectors"].as_array().expect("vectors array") {
        let input = vector["input"].as_str().expect("input string");
        let outcome = differential_parse(input);
        assert!(
            outcome.is_agreement(),
            "disagreement with reference on {}: {outcome:?}",
            vector["id"]
        );
    }
}
