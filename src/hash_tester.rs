//! Offline hash quality checks over newline-delimited key files.
//!
//! Two reports are produced, both as comma-separated text:
//! a per-key dump of every selected hash (with a quoted header line), and a
//! per-size line holding how many distinct values each function produced.

use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::hash::BuildHasherDefault;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;
use twox_hash::XxHash64;

use crate::config::TesterConfig;
use crate::hash_function::HashFunction;
use crate::string_hash::Modulus;

type HashValues = HashSet<u32, BuildHasherDefault<XxHash64>>;

/// Writes a header and one line of hashes per key. Returns the key count.
pub fn write_hashes<R: BufRead, W: Write>(
    reader: R,
    writer: &mut W,
    functions: &[HashFunction],
    modulus: Modulus,
) -> Result<usize> {
    let header = functions
        .iter()
        .map(|function| format!("\"{}\"", function.name()))
        .collect::<Vec<_>>()
        .join(",");
    writeln!(writer, "{header}")?;

    let mut keys = 0;
    for line in reader.lines() {
        let key = line.context("failed to read key")?;
        let row = functions
            .iter()
            .map(|function| function.hash(&key, modulus).to_string())
            .collect::<Vec<_>>()
            .join(",");
        writeln!(writer, "{row}")?;
        keys += 1;
    }
    writer.flush()?;
    Ok(keys)
}

/// Counts the distinct values each function produces over all keys and
/// writes the counts as one line.
pub fn count_distinct<R: BufRead, W: Write>(
    reader: R,
    writer: &mut W,
    functions: &[HashFunction],
    modulus: Modulus,
) -> Result<Vec<usize>> {
    let mut unique_hashes: Vec<HashValues> = vec![HashValues::default(); functions.len()];
    for line in reader.lines() {
        let key = line.context("failed to read key")?;
        for (function, seen) in functions.iter().zip(unique_hashes.iter_mut()) {
            seen.insert(function.hash(&key, modulus));
        }
    }

    let counts: Vec<usize> = unique_hashes.iter().map(HashSet::len).collect();
    let line = counts
        .iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(",");
    writeln!(writer, "{line}")?;
    writer.flush()?;
    Ok(counts)
}

/// Hashes every key at `hash_size`, then appends one distinct-count line
/// per entry of `distinct_sizes`.
pub fn run(config: &TesterConfig) -> Result<()> {
    config.validate()?;

    // The input is opened first so a bad path leaves earlier reports intact.
    let input = open_input(&config.input)?;
    let mut hash_output = open_output(&config.hash_output, config.append)?;
    let keys = write_hashes(
        input,
        &mut hash_output,
        &config.functions,
        Modulus::new(config.hash_size)?,
    )?;
    info!(
        keys,
        size = config.hash_size,
        output = %config.hash_output.display(),
        "wrote hash values"
    );

    let mut distinct_output = open_output(&config.distinct_output, true)?;
    for &size in &config.distinct_sizes {
        let counts = count_distinct(
            open_input(&config.input)?,
            &mut distinct_output,
            &config.functions,
            Modulus::new(size)?,
        )?;
        info!(size, ?counts, "counted distinct hash values");
    }
    Ok(())
}

pub fn open_input(path: &Path) -> Result<BufReader<File>> {
    let file =
        File::open(path).with_context(|| format!("failed to open input {}", path.display()))?;
    Ok(BufReader::new(file))
}

pub fn open_output(path: &Path, append: bool) -> Result<BufWriter<File>> {
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .append(append)
        .truncate(!append)
        .open(path)
        .with_context(|| format!("failed to open output {}", path.display()))?;
    Ok(BufWriter::new(file))
}
