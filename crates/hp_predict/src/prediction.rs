use std::fmt;
use std::sync::Arc;
use std::sync::Mutex;

use log::debug;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use hp_structure::DotBracketVec;

use crate::Base;
use crate::Sequence;
use crate::KnownStructures;
use crate::CompositionMetrics;
use crate::greedy_structure;

/// Hands out a fresh record identifier per prediction. Uniqueness is
/// best effort.
pub trait IdentifierSource {
    fn fresh_id(&self) -> String;
}

impl<F> IdentifierSource for F
where
    F: Fn() -> String,
{
    fn fresh_id(&self) -> String {
        self()
    }
}

const ID_PREFIX: &str = "RNA-";
const ID_RANGE: u32 = 10_000;

/// "RNA-" followed by a random number below 10000, drawn from the thread
/// local generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdentifier;

impl IdentifierSource for RandomIdentifier {
    fn fresh_id(&self) -> String {
        format!("{}{}", ID_PREFIX, rand::rng().random_range(0..ID_RANGE))
    }
}

/// Like [`RandomIdentifier`], but reproducible from a seed.
#[derive(Debug)]
pub struct SeededIdentifier {
    rng: Mutex<StdRng>,
}

impl SeededIdentifier {
    pub fn new(seed: u64) -> Self {
        Self { rng: Mutex::new(StdRng::seed_from_u64(seed)) }
    }
}

impl IdentifierSource for SeededIdentifier {
    fn fresh_id(&self) -> String {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        format!("{}{}", ID_PREFIX, rng.random_range(0..ID_RANGE))
    }
}


/// Descriptive labels attached to every record. They are fixed text and
/// say nothing about the sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Annotations {
    pub stability: &'static str,
    pub function: &'static str,
    pub interactions: [&'static str; 2],
}

impl Default for Annotations {
    fn default() -> Self {
        Annotations {
            stability: "High",
            function: "Possible regulatory RNA",
            interactions: [
                "Protein binding sites detected",
                "Potential ribosome binding",
            ],
        }
    }
}

/// Which step produced the structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StructureSource {
    Known,
    Greedy,
}

impl fmt::Display for StructureSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructureSource::Known => write!(f, "known"),
            StructureSource::Greedy => write!(f, "greedy"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PredictionRecord {
    pub id: String,
    pub sequence: Sequence,
    pub structure: DotBracketVec,
    pub composition: CompositionMetrics,
    pub annotations: Annotations,
    pub source: StructureSource,
}

#[derive(Serialize)]
pub struct SerializablePrediction<'a> {
    #[serde(rename = "rnaId")]
    id: &'a str,
    sequence: String,
    structure: String,
    length: usize,
    gc_content: f64,
    predictions: &'a Annotations,
    source: StructureSource,
}

impl PredictionRecord {
    pub fn to_serializable(&self) -> SerializablePrediction<'_> {
        SerializablePrediction {
            id: &self.id,
            sequence: self.sequence.to_string(),
            structure: self.structure.to_string(),
            length: self.composition.length,
            gc_content: self.composition.gc_content,
            predictions: &self.annotations,
            source: self.source,
        }
    }
}


/// Folds validated sequences. Stateless apart from the shared, read-only
/// table of known structures.
pub struct Predictor<I: IdentifierSource> {
    known: Arc<KnownStructures>,
    ids: I,
}

impl Predictor<RandomIdentifier> {
    /// Curated table and random identifiers.
    pub fn with_defaults() -> Self {
        Predictor::new(Arc::new(KnownStructures::default()), RandomIdentifier)
    }
}

impl<I: IdentifierSource> Predictor<I> {
    pub fn new(known: Arc<KnownStructures>, ids: I) -> Self {
        Self { known, ids }
    }

    pub fn known(&self) -> &KnownStructures {
        &self.known
    }

    /// The structure alone: an exact match in the known table, otherwise
    /// the greedy fold.
    pub fn fold(&self, seq: &[Base]) -> (DotBracketVec, StructureSource) {
        match self.known.get(seq) {
            Some(db) => {
                debug!("Known structure for sequence of length {}", seq.len());
                (db.clone(), StructureSource::Known)
            }
            None => {
                debug!("No known structure, greedy fold of length {}", seq.len());
                (greedy_structure(seq), StructureSource::Greedy)
            }
        }
    }

    /// The full record. Never fails for a validated sequence.
    pub fn predict(&self, seq: &Sequence) -> PredictionRecord {
        let (structure, source) = self.fold(seq);
        PredictionRecord {
            id: self.ids.fresh_id(),
            sequence: seq.clone(),
            structure,
            composition: CompositionMetrics::of(seq),
            annotations: Annotations::default(),
            source,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use crate::validate;

    fn counting_predictor() -> Predictor<impl Fn() -> String> {
        let counter = AtomicUsize::new(0);
        Predictor::new(
            Arc::new(KnownStructures::default()),
            move || format!("test-{}", counter.fetch_add(1, Ordering::Relaxed)),
        )
    }

    #[test]
    fn test_known_structure_bypasses_greedy() {
        let predictor = counting_predictor();
        let seq = validate("GGGAUAACUUCGGUUGUCCC").unwrap();
        let record = predictor.predict(&seq);
        assert_eq!(record.structure.to_string(), "((((((((....))))))))");
        assert_eq!(record.source, StructureSource::Known);
        assert_ne!(record.structure, greedy_structure(&seq));
    }

    #[test]
    fn test_all_unpaired_known_structure() {
        let predictor = counting_predictor();
        let seq = validate("GGCGCAGUGGGCUAGCGCCACUCAAAAGCCCG").unwrap();
        let record = predictor.predict(&seq);
        assert_eq!(record.structure, DotBracketVec::unpaired(32));
        assert_eq!(record.source, StructureSource::Known);
    }

    #[test]
    fn test_greedy_record() {
        let predictor = counting_predictor();
        let seq = validate("GGCC").unwrap();
        let record = predictor.predict(&seq);
        assert_eq!(record.id, "test-0");
        assert_eq!(record.sequence.to_string(), "GGCC");
        assert_eq!(record.structure.to_string(), "(())");
        assert_eq!(record.composition.length, 4);
        assert_eq!(record.composition.gc_content, 1.0);
        assert_eq!(record.source, StructureSource::Greedy);
        assert_eq!(record.annotations, Annotations::default());
    }

    #[test]
    fn test_empty_sequence_record() {
        let predictor = counting_predictor();
        let record = predictor.predict(&Sequence::default());
        assert!(record.structure.is_empty());
        assert_eq!(record.composition.length, 0);
        assert_eq!(record.composition.gc_content, 0.0);
    }

    #[test]
    fn test_predict_is_idempotent() {
        let predictor = counting_predictor();
        for s in ["GGCC", "AUGCAUGGCAUCCGAUUA", "GGGUGCUCAGUACGAGAGGAACCGCACCC"] {
            let seq = validate(s).unwrap();
            let a = predictor.predict(&seq);
            let b = predictor.predict(&seq);
            assert_ne!(a.id, b.id);
            assert_eq!(a.structure, b.structure);
            assert_eq!(a.composition, b.composition);
            assert_eq!(a.source, b.source);
        }
    }

    #[test]
    fn test_random_requests() {
        let predictor = counting_predictor();
        let mut rng = StdRng::seed_from_u64(2024);
        let alphabet = ['G', 'C', 'A', 'U'];
        for _ in 0..300 {
            let len = rng.random_range(1..80);
            let raw: String = (0..len)
                .map(|_| alphabet[rng.random_range(0..alphabet.len())])
                .collect();

            let seq = validate(&raw).unwrap();
            assert_eq!(seq.to_string(), raw);

            let a = predictor.predict(&seq);
            let b = predictor.predict(&seq);
            assert_eq!(a.structure, b.structure);
            assert_eq!(a.composition, b.composition);
            assert_eq!(a.source, b.source);

            assert_eq!(a.structure.len(), seq.len());
            assert_eq!(a.composition.length, seq.len());
            assert!(a.structure.is_balanced(), "{} -> {}", raw, a.structure);
            if a.source == StructureSource::Greedy {
                assert_eq!(a.structure, greedy_structure(&seq));
            }
        }
    }

    #[test]
    fn test_every_curated_entry() {
        let predictor = counting_predictor();
        for (seq, structure) in predictor.known().iter() {
            let record = predictor.predict(seq);
            assert_eq!(record.source, StructureSource::Known);
            assert_eq!(&record.structure, structure);
            assert_eq!(record.structure.len(), seq.len());
            assert!(record.structure.is_balanced(), "{}", seq);
        }
        assert_eq!(predictor.known().iter().count(), 9);
    }

    #[test]
    fn test_injected_empty_table() {
        let predictor = Predictor::new(Arc::new(KnownStructures::empty()), || "x".to_string());
        let seq = validate("GGGAUAACUUCGGUUGUCCC").unwrap();
        let (structure, source) = predictor.fold(&seq);
        assert_eq!(source, StructureSource::Greedy);
        assert_eq!(structure, greedy_structure(&seq));
    }

    #[test]
    fn test_random_identifier_format() {
        for _ in 0..100 {
            let id = RandomIdentifier.fresh_id();
            let n: u32 = id.strip_prefix("RNA-").unwrap().parse().unwrap();
            assert!(n < 10_000);
        }
    }

    #[test]
    fn test_seeded_identifier_is_reproducible() {
        let a = SeededIdentifier::new(7);
        let b = SeededIdentifier::new(7);
        let xs: Vec<String> = (0..5).map(|_| a.fresh_id()).collect();
        let ys: Vec<String> = (0..5).map(|_| b.fresh_id()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_serializable_record() {
        let predictor = Predictor::new(Arc::new(KnownStructures::default()), || "RNA-42".to_string());
        let record = predictor.predict(&validate("GGGG").unwrap());
        let json = serde_json::to_value(record.to_serializable()).unwrap();
        assert_eq!(json["rnaId"], "RNA-42");
        assert_eq!(json["sequence"], "GGGG");
        assert_eq!(json["structure"], "....");
        assert_eq!(json["length"], 4);
        assert_eq!(json["gc_content"], 1.0);
        assert_eq!(json["source"], "greedy");
        assert_eq!(json["predictions"]["stability"], "High");
        assert_eq!(json["predictions"]["interactions"][1], "Potential ribosome binding");
    }

    #[test]
    fn test_shared_across_threads() {
        let predictor = Arc::new(Predictor::new(Arc::new(KnownStructures::default()), SeededIdentifier::new(1)));
        let seq = validate("GGCGCUUGCGUCAUAUGGCC").unwrap();
        let expected = predictor.fold(&seq);
        let handles: Vec<_> = (0..4).map(|_| {
            let predictor = Arc::clone(&predictor);
            let seq = seq.clone();
            thread::spawn(move || predictor.predict(&seq))
        }).collect();
        for h in handles {
            let record = h.join().unwrap();
            assert_eq!((record.structure, record.source), expected);
        }
    }
}
