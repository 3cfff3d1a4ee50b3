//! Differential and corpus-based conformance checking.
//!
//! Two layers of cross-checking back the parser and serializer:
//!
//! - [`differential_parse`] runs the same input through this crate and the
//!   `serde_json` reference implementation and compares the outcomes.
//! - [`CorpusRunner`] executes the vectors in `corpus/corpus.json`, each a
//!   raw input with either an expected canonical rendering or an expected
//!   error name.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ParseError;
use crate::parser::parse;
use crate::serializer::serialize;
use crate::value::{Number, Value};

/// Outcome of parsing one input with both implementations.
#[derive(Debug)]
pub enum DiffOutcome {
    /// Both accepted and produced structurally matching trees.
    Match,
    /// Both rejected the input.
    BothRejected,
    /// Both accepted, but the trees differ.
    ValueMismatch {
        /// Our canonical rendering.
        ours: String,
        /// The reference rendering.
        reference: String,
    },
    /// We accepted; the reference rejected.
    ReferenceRejected,
    /// We rejected; the reference accepted.
    ReferenceAccepted {
        /// Our error.
        error: ParseError,
    },
}

impl DiffOutcome {
    /// True when both implementations agree (same accept/reject decision
    /// and, on accept, matching trees).
    pub fn is_agreement(&self) -> bool {
        matches!(self, DiffOutcome::Match | DiffOutcome::BothRejected)
    }
}

/// Parse one input with this crate and with `serde_json`, and compare.
pub fn differential_parse(input: &str) -> DiffOutcome {
    let ours = parse(input);
    let reference: Result<serde_json::Value, _> = serde_json::from_str(input);

    match (ours, reference) {
        (Ok(value), Ok(reference)) => {
            if value_matches(&value, &reference) {
                DiffOutcome::Match
            } else {
                DiffOutcome::ValueMismatch {
                    ours: serialize(&value),
                    reference: reference.to_string(),
                }
            }
        }
        (Err(_), Err(_)) => DiffOutcome::BothRejected,
        (Ok(_), Err(_)) => DiffOutcome::ReferenceRejected,
        (Err(error), Ok(_)) => DiffOutcome::ReferenceAccepted { error },
    }
}

/// Structural comparison against the reference tree.
///
/// Numbers compare by arm where possible; the reference keeps `-0` and
/// u64-range integers in float/u64 arms, so the integer arm also accepts
/// an exact `f64` match.
fn value_matches(ours: &Value, reference: &serde_json::Value) -> bool {
    match (ours, reference) {
        (Value::Null, serde_json::Value::Null) => true,
        (Value::Bool(a), serde_json::Value::Bool(b)) => a == b,
        (Value::Number(n), serde_json::Value::Number(m)) => match n {
            Number::Int(i) => m.as_i64() == Some(*i) || m.as_f64() == Some(*i as f64),
            Number::Float(f) => m.as_f64() == Some(*f),
        },
        (Value::String(a), serde_json::Value::String(b)) => a == b,
        (Value::Array(a), serde_json::Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| value_matches(x, y))
        }
        (Value::Object(members), serde_json::Value::Object(map)) => {
            members.len() == map.len()
                && members
                    .iter()
                    .all(|(k, v)| map.get(k).is_some_and(|r| value_matches(v, r)))
        }
        _ => false,
    }
}

/// Corpus manifest metadata.
#[derive(Debug, Deserialize)]
pub struct CorpusManifest {
    /// Format version of the corpus file.
    pub format_version: String,
    /// Corpus version.
    pub version: String,
}

/// A corpus of parser test vectors.
#[derive(Debug, Deserialize)]
pub struct Corpus {
    /// Corpus metadata.
    pub manifest: CorpusManifest,
    /// List of test vectors.
    pub vectors: Vec<TestVector>,
}

/// A single test vector.
#[derive(Debug, Deserialize)]
pub struct TestVector {
    /// Unique identifier for the vector.
    pub id: String,
    /// Raw input document.
    pub input: String,
    /// Expected canonical rendering, for accepting vectors.
    #[serde(default)]
    pub canonical: Option<String>,
    /// Expected error name, for rejecting vectors.
    #[serde(default)]
    pub error: Option<String>,
}

/// Result of running a single test vector.
#[derive(Debug)]
pub enum VectorResult {
    /// Vector behaved as recorded.
    Pass,
    /// Vector diverged from the recorded expectation.
    Fail {
        /// Expected behavior from the corpus.
        expected: String,
        /// Actual behavior.
        actual: String,
    },
}

impl VectorResult {
    /// Returns true if this is a passing result.
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }
}

/// Results from running the corpus.
#[derive(Debug, Default)]
pub struct CorpusResults {
    /// Number of vectors that passed.
    pub passed: usize,
    /// Number of vectors that failed.
    pub failed: usize,
    /// Detailed results for each vector.
    pub details: Vec<(String, VectorResult)>,
}

impl CorpusResults {
    /// Record a vector result.
    pub fn record(&mut self, id: &str, result: VectorResult) {
        match &result {
            VectorResult::Pass => self.passed += 1,
            VectorResult::Fail { .. } => self.failed += 1,
        }
        self.details.push((id.to_string(), result));
    }

    /// Total number of vectors run.
    pub fn total(&self) -> usize {
        self.passed + self.failed
    }

    /// Returns true if every vector passed.
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Failures only.
    pub fn failures(&self) -> Vec<&(String, VectorResult)> {
        self.details
            .iter()
            .filter(|(_, r)| !r.is_pass())
            .collect()
    }

    /// Summary string for reporting.
    pub fn summary(&self) -> String {
        format!(
            "{} passed, {} failed (total: {})",
            self.passed,
            self.failed,
            self.total()
        )
    }
}

/// Corpus runner that executes test vectors.
pub struct CorpusRunner {
    corpus: Corpus,
}

impl CorpusRunner {
    /// Load a corpus from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("failed to read corpus file: {e}"))?;
        let corpus: Corpus = serde_json::from_str(&content)
            .map_err(|e| format!("failed to parse corpus JSON: {e}"))?;
        Ok(Self { corpus })
    }

    /// Get the corpus manifest.
    pub fn manifest(&self) -> &CorpusManifest {
        &self.corpus.manifest
    }

    /// Get the number of test vectors.
    pub fn vector_count(&self) -> usize {
        self.corpus.vectors.len()
    }

    /// Run all vectors and return results.
    pub fn run_all(&self) -> CorpusResults {
        let mut results = CorpusResults::default();
        for vector in &self.corpus.vectors {
            results.record(&vector.id, Self::run_vector(vector));
        }
        results
    }

    /// Run a single vector: check the recorded expectation, then check
    /// agreement with the reference implementation.
    fn run_vector(vector: &TestVector) -> VectorResult {
        match parse(&vector.input) {
            Ok(value) => {
                let rendered = serialize(&value);
                match &vector.canonical {
                    Some(expected) if *expected == rendered => {
                        let diff = differential_parse(&vector.input);
                        if diff.is_agreement() {
                            VectorResult::Pass
                        } else {
                            VectorResult::Fail {
                                expected: "agreement with reference".to_string(),
                                actual: format!("{diff:?}"),
                            }
                        }
                    }
                    Some(expected) => VectorResult::Fail {
                        expected: expected.clone(),
                        actual: rendered,
                    },
                    None => VectorResult::Fail {
                        expected: vector.error.clone().unwrap_or_default(),
                        actual: format!("parsed: {rendered}"),
                    },
                }
            }
            Err(error) => match &vector.error {
                Some(expected) if expected == error.name() => {
                    let diff = differential_parse(&vector.input);
                    if diff.is_agreement() {
                        VectorResult::Pass
                    } else {
                        VectorResult::Fail {
                            expected: "agreement with reference".to_string(),
                            actual: format!("{diff:?}"),
                        }
                    }
                }
                Some(expected) => VectorResult::Fail {
                    expected: expected.clone(),
                    actual: error.name().to_string(),
                },
                None => VectorResult::Fail {
                    expected: vector.canonical.clone().unwrap_or_default(),
                    actual: error.to_string(),
                },
            },
        }
    }
}
