use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use string_bloom::config::{DEFAULT_DISTINCT_SIZES, DEFAULT_HASH_SIZE};
use string_bloom::hash_tester::{self, open_input, open_output};
use string_bloom::{read_config, BloomFilter, HashFunction, Modulus};

#[derive(Parser, Debug)]
#[command(
    name = "string-bloom",
    version,
    about = "String hash functions and the Bloom filter built on them"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write every selected hash of every key as CSV.
    Hash {
        /// Newline-delimited keys.
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
        #[arg(long, default_value_t = DEFAULT_HASH_SIZE)]
        size: i32,
        /// Hash function to include; repeat for several. Defaults to all.
        #[arg(long = "function")]
        functions: Vec<HashFunction>,
        #[arg(long)]
        append: bool,
    },

    /// Count distinct hash values per function, one line per size.
    Distinct {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
        /// Modulus to test; repeat for several. Defaults to 100000, 1000000, 10000000.
        #[arg(long = "size")]
        sizes: Vec<i32>,
        #[arg(long = "function")]
        functions: Vec<HashFunction>,
        #[arg(long)]
        append: bool,
    },

    /// Run both reports as described by a JSON config file.
    Run {
        #[arg(long)]
        config: PathBuf,
    },

    /// Load keys into a filter and test other keys against it.
    Probe {
        /// Number of bits in the filter.
        #[arg(long)]
        size: usize,
        /// Keys to insert.
        #[arg(long)]
        insert: PathBuf,
        /// Keys to look up; read from stdin when omitted.
        #[arg(long)]
        query: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("{}: {err:#}", env!("CARGO_PKG_NAME"));
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Hash {
            input,
            output,
            size,
            functions,
            append,
        } => {
            let functions = or_all(functions);
            let modulus = Modulus::new(size)?;
            let reader = open_input(&input)?;
            let mut writer = open_output(&output, append)?;
            let keys = hash_tester::write_hashes(reader, &mut writer, &functions, modulus)?;
            info!(keys, size, "wrote hash values");
        }
        Command::Distinct {
            input,
            output,
            sizes,
            functions,
            append,
        } => {
            let functions = or_all(functions);
            let sizes = if sizes.is_empty() {
                DEFAULT_DISTINCT_SIZES.to_vec()
            } else {
                sizes
            };
            let moduli = sizes
                .into_iter()
                .map(Modulus::new)
                .collect::<string_bloom::Result<Vec<_>>>()?;
            let mut reader = Some(open_input(&input)?);
            let mut writer = open_output(&output, append)?;
            for modulus in moduli {
                let pass = match reader.take() {
                    Some(reader) => reader,
                    None => open_input(&input)?,
                };
                let counts = hash_tester::count_distinct(pass, &mut writer, &functions, modulus)?;
                info!(size = modulus.get(), ?counts, "counted distinct hash values");
            }
        }
        Command::Run { config } => {
            let config = read_config(&config)?;
            hash_tester::run(&config)?;
        }
        Command::Probe {
            size,
            insert,
            query,
        } => probe(size, insert, query)?,
    }
    Ok(())
}

fn or_all(functions: Vec<HashFunction>) -> Vec<HashFunction> {
    if functions.is_empty() {
        HashFunction::ALL.to_vec()
    } else {
        functions
    }
}

fn probe(size: usize, insert: PathBuf, query: Option<PathBuf>) -> Result<()> {
    let mut filter = BloomFilter::with_size(size).context("invalid filter size")?;
    for line in open_input(&insert)?.lines() {
        filter.insert(&line.context("failed to read key")?);
    }
    info!(
        inserted = filter.inserted(),
        load_factor = filter.load_factor(),
        fill_ratio = filter.fill_ratio(),
        false_positive_rate = filter.estimated_false_positive_rate(),
        "filter loaded"
    );

    let queries: Box<dyn BufRead> = match query {
        Some(path) => Box::new(open_input(&path)?),
        None => Box::new(io::stdin().lock()),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in queries.lines() {
        let key = line.context("failed to read query")?;
        let verdict = if filter.contains(&key) { "maybe" } else { "absent" };
        writeln!(out, "{key}\t{verdict}")?;
    }
    out.flush()?;
    Ok(())
}
