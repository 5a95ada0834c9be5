use std::io::Write;
use log::{info, warn};
use colored::*;
use env_logger::Builder;
use clap::Args;
use clap::Parser;
use clap::ArgAction;
use anyhow::{bail, Result};
use rayon::prelude::*;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;

use hp_predict::validate;
use hp_predict::PredictionRecord;
use hp_predict::ValidationError;

use hairpin::input_parsers::InputRecord;
use hairpin::input_parsers::read_records_input;
use hairpin::predictor_parsers::PredictorArguments;
use hairpin::report::PatientReport;
use hairpin::report::format_report;
use hairpin::report::format_known;


#[derive(Debug, Args)]
pub struct PredictInput {
    /// Input file (FASTA-like), or "-" for stdin
    #[arg(value_name = "INPUT", default_value = "-")]
    pub input: String,

    /// Predict a single sequence given on the command line instead
    #[arg(short, long, value_name = "SEQUENCE", conflicts_with = "input")]
    pub sequence: Option<String>,

    /// Patient name shown next to every result
    #[arg(short, long)]
    pub patient: Option<String>,

    /// Print one JSON document per record
    #[arg(long)]
    pub json: bool,

    /// Print the known structures table and exit
    #[arg(long)]
    pub list_known: bool,

    /// Number of worker threads (0 = all cores)
    #[arg(short, long, default_value_t = 0)]
    pub threads: usize,

    /// Show a progress bar on stderr
    #[arg(long)]
    pub progress: bool,

    /// Verbosity (-v = info, -vv = debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}


#[derive(Debug, Parser)]
#[command(name = "hp-predict")]
#[command(author, version, about = "Validate RNA sequences and predict their secondary structure")]
pub struct Cli {
    #[command(flatten)]
    pub predict: PredictInput,

    #[command(flatten, next_help_heading = "Predictor parameters")]
    pub predictor: PredictorArguments,
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format(|buf, record| {
            // no prefix, just the message
            writeln!(buf, "{}", record.args())
        })
        .init();
}

fn label(rec: &InputRecord) -> String {
    match &rec.name {
        Some(name) => format!("'{}' (line {})", name, rec.line),
        None => format!("line {}", rec.line),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.predict.verbose);

    let mut threads = cli.predict.threads;
    if cli.predictor.seed.is_some() && threads != 1 {
        info!("A seed was given, predicting on a single thread.");
        threads = 1;
    }
    rayon::ThreadPoolBuilder::new().num_threads(threads).build_global()?;

    let predictor = cli.predictor.build_predictor()?;
    if cli.predict.list_known {
        println!("{}", format_known(predictor.known()));
        return Ok(());
    }

    let mut records = match &cli.predict.sequence {
        Some(raw) => vec![InputRecord { name: None, line: 1, raw: raw.clone() }],
        None => read_records_input(&cli.predict.input)?,
    };
    if records.is_empty() {
        records.push(InputRecord { name: None, line: 1, raw: String::new() });
    }
    info!("Read {} record(s).", records.len());

    let pb = if cli.predict.progress {
        let pb = ProgressBar::new(records.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let results: Vec<Result<PredictionRecord, ValidationError>> = records
        .par_iter()
        .map_init(
            || pb.clone(),
            |pb, rec| {
                let result = validate(&rec.raw).map(|seq| predictor.predict(&seq));
                pb.inc(1);
                result
            },
        ).collect();
    pb.finish_and_clear();

    let mut rejected = 0;
    let patient = cli.predict.patient.as_deref();
    for (rec, result) in records.iter().zip(&results) {
        match result {
            Ok(prediction) => {
                if cli.predict.json {
                    let report = PatientReport::new(prediction, rec.name.as_deref(), patient);
                    println!("{}", serde_json::to_string_pretty(&report)?);
                } else {
                    if let Some(name) = &rec.name {
                        println!("{}", format!(">{}", name).yellow());
                    }
                    println!("{}\n", format_report(prediction, patient));
                }
            }
            Err(e @ ValidationError::EmptyInput) => {
                rejected += 1;
                warn!("{} {}: {}", "Empty input".red(), label(rec), e);
            }
            Err(e @ ValidationError::InvalidAlphabet { .. }) => {
                rejected += 1;
                warn!("{} {}: {}", "Invalid RNA sequence".red(), label(rec), e);
            }
        }
    }

    if rejected > 0 {
        bail!("{} of {} record(s) were rejected", rejected, records.len());
    }
    Ok(())
}
