use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BloomError;
use crate::string_hash::{self, Modulus};

/// Identifies one of the string hash functions so callers can pick them at
/// runtime (for instance from a command line) without any name lookup at the
/// call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashFunction {
    #[serde(rename = "simpleHash")]
    Simple,
    #[serde(rename = "crossHash")]
    Cross,
    #[serde(rename = "indexValueHash")]
    IndexValue,
    #[serde(rename = "primeHash")]
    Prime,
}

impl HashFunction {
    /// Every function, in the column order of the benchmark output.
    pub const ALL: [HashFunction; 4] = [
        HashFunction::Simple,
        HashFunction::Cross,
        HashFunction::IndexValue,
        HashFunction::Prime,
    ];

    pub fn name(self) -> &'static str {
        match self {
            HashFunction::Simple => "simpleHash",
            HashFunction::Cross => "crossHash",
            HashFunction::IndexValue => "indexValueHash",
            HashFunction::Prime => "primeHash",
        }
    }

    pub fn hash(self, key: &str, modulus: Modulus) -> u32 {
        match self {
            HashFunction::Simple => string_hash::simple(key, modulus),
            HashFunction::Cross => string_hash::cross(key, modulus),
            HashFunction::IndexValue => string_hash::index_value(key, modulus),
            HashFunction::Prime => string_hash::prime(key, modulus),
        }
    }

    /// Like [`HashFunction::hash`], validating a raw modulus first.
    pub fn run(self, key: &str, size: i32) -> Result<u32, BloomError> {
        Ok(self.hash(key, Modulus::new(size)?))
    }
}

impl fmt::Display for HashFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashFunction {
    type Err = BloomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "simpleHash" | "simple_hash" | "simple" => Ok(HashFunction::Simple),
            "crossHash" | "cross_hash" | "cross" => Ok(HashFunction::Cross),
            "indexValueHash" | "index_value_hash" | "index_value" => Ok(HashFunction::IndexValue),
            "primeHash" | "prime_hash" | "prime" => Ok(HashFunction::Prime),
            other => Err(BloomError::UnknownHashFunction(other.to_string())),
        }
    }
}
