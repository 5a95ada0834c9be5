//! # hp_predict
//!
//! Validation of RNA sequences and a small, deterministic secondary
//! structure predictor: curated answers for known sequences, a first-fit
//! greedy pairing for everything else.

/// Base, Sequence, ValidationError, ....
mod nucleotides;

/// Curated sequence -> structure answers.
mod known_structures;

/// The first-fit pairing heuristic.
mod greedy;

/// Length and GC content.
mod composition;

/// Predictor and prediction records.
mod prediction;

pub use nucleotides::*;
pub use known_structures::*;
pub use greedy::*;
pub use composition::*;
pub use prediction::*;

