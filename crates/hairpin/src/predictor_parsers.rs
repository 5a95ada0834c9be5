use std::sync::Arc;
use std::path::PathBuf;

use clap::Args;
use log::debug;
use anyhow::Result;

use hp_predict::KnownStructures;
use hp_predict::Predictor;
use hp_predict::IdentifierSource;
use hp_predict::RandomIdentifier;
use hp_predict::SeededIdentifier;

/// Structure prediction parameters.
#[derive(Debug, Args)]
pub struct PredictorArguments {
    /// JSON object of additional known structures: {"SEQUENCE": "STRUCTURE", ...}
    #[arg(short, long, value_name = "FILE")]
    pub known: Option<PathBuf>,

    /// Ignore the built-in known structures
    #[arg(long)]
    pub no_known: bool,

    /// Seed for reproducible record identifiers
    #[arg(long)]
    pub seed: Option<u64>,
}

/// The identifier source selected on the command line.
#[derive(Debug)]
pub enum ConfiguredIdentifier {
    Random(RandomIdentifier),
    Seeded(SeededIdentifier),
}

impl IdentifierSource for ConfiguredIdentifier {
    fn fresh_id(&self) -> String {
        match self {
            ConfiguredIdentifier::Random(ids) => ids.fresh_id(),
            ConfiguredIdentifier::Seeded(ids) => ids.fresh_id(),
        }
    }
}

impl PredictorArguments {
    pub fn build_known(&self) -> Result<KnownStructures> {
        let mut known = if self.no_known {
            KnownStructures::empty()
        } else {
            KnownStructures::default()
        };
        if let Some(path) = &self.known {
            debug!("Using known structures from: {:?}", path);
            known.extend_from_json_file(path)?;
        }
        debug!("Known structures: {}", known.len());
        Ok(known)
    }

    pub fn build_identifiers(&self) -> ConfiguredIdentifier {
        match self.seed {
            Some(seed) => {
                debug!("Identifier seed: {}", seed);
                ConfiguredIdentifier::Seeded(SeededIdentifier::new(seed))
            }
            None => ConfiguredIdentifier::Random(RandomIdentifier),
        }
    }

    pub fn build_predictor(&self) -> Result<Predictor<ConfiguredIdentifier>> {
        let known = self.build_known()?;
        Ok(Predictor::new(Arc::new(known), self.build_identifiers()))
    }
}
