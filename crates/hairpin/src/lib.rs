//! # hairpin
//!
//! Validate RNA sequences and predict their secondary structure.
//!
//! This crate re-exports the main functionality from its submodules and
//! adds the input parsing, configuration and reporting used by the
//! command line tools.

pub mod input_parsers;
pub mod predictor_parsers;
pub mod report;

pub mod structure {
    pub use ::hp_structure::*;
}

pub mod predict {
    pub use ::hp_predict::*;
}
