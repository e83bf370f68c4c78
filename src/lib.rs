//! A Bloom filter keyed by strings, built on a small family of
//! deterministic 32-bit string hashes.
//!
//! ```
//! use string_bloom::BloomFilter;
//!
//! let mut filter = BloomFilter::with_size(101)?;
//! filter.insert("abc");
//! assert!(filter.contains("abc"));
//! # Ok::<(), string_bloom::BloomError>(())
//! ```

pub mod bloom_filter;
pub mod config;
pub mod error;
pub mod hash_function;
pub mod hash_tester;
pub mod hasher;
pub mod shared;
pub mod string_hash;

pub use bloom_filter::BloomFilter;
pub use config::{read_config, TesterConfig};
pub use error::{BloomError, Result};
pub use hash_function::HashFunction;
pub use hasher::{Hasher, Indexes, NUMBER_OF_HASH_FUNCTIONS};
pub use shared::SharedBloomFilter;
pub use string_hash::{
    cross_hash, index_value_hash, prime_hash, simple_hash, Modulus, PRIME_NUMBER,
};
