use clap::Parser;
use anyhow::{bail, Result};
use rand::rng;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::prelude::IndexedRandom;

/// Generate random sequences from a given alphabet.
#[derive(Parser, Debug)]
#[command(author, version, about = "Generate random RNA sequences", long_about = None)]
struct Args {
    /// Alphabet to choose from, comma-separated (e.g., A,C,G,U)
    #[arg(short, long, default_value = "A,C,G,U")]
    alphabet: String,

    /// Length of each generated sequence
    #[arg(short, long, default_value_t = 50)]
    length: usize,

    /// Number of sequences to generate
    #[arg(short, long, default_value_t = 1)]
    num: usize,

    /// Prefix every sequence with a '>seq_<i>' header
    #[arg(long)]
    headers: bool,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

fn generate<R: Rng>(rng: &mut R, args: &Args, alphabet: &[char]) {
    for i in 0..args.num {
        let seq: String = (0..args.length)
            .filter_map(|_| alphabet.choose(rng).copied())
            .collect();
        if args.headers {
            println!(">seq_{}", i);
        }
        println!("{}", seq);
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let alphabet: Vec<char> = args.alphabet.split(',')
        .filter_map(|s| s.trim().chars().next())
        .collect();
    if alphabet.is_empty() {
        bail!("Empty alphabet: '{}'", args.alphabet);
    }

    match args.seed {
        Some(seed) => generate(&mut StdRng::seed_from_u64(seed), &args, &alphabet),
        None => generate(&mut rng(), &args, &alphabet),
    }
    Ok(())
}
