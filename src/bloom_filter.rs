//! Bloom filter over a caller-chosen bit array.
//!
//! `contains` answers "definitely absent" (`false`) or "possibly present"
//! (`true`). A key that went through [`BloomFilter::insert`] is always
//! reported present: bits are only ever set, never cleared. A key that was
//! never inserted may still be reported present when its three bits were set
//! by other keys; the odds grow with the load factor
//! (`inserted × 3 / size`) and are estimated by
//! [`BloomFilter::estimated_false_positive_rate`].
//!
//! Indexes handed to [`BloomFilter::insert_indexes`] are trusted as they are.
//! If they were not produced by this filter's [`Hasher`] for the same key and
//! size, the no-false-negative guarantee no longer holds for that key.

use bitvec::prelude::*;
use tracing::debug;

use crate::error::{BloomError, Result};
use crate::hasher::{Hasher, Indexes, NUMBER_OF_HASH_FUNCTIONS};
use crate::string_hash::Modulus;

#[derive(Debug, Clone)]
pub struct BloomFilter {
    bit_vector: BitVec,
    hasher: Hasher,
    modulus: Modulus,
    inserted: usize,
}

impl BloomFilter {
    /// Builds a filter on top of `bit_vector`, keeping any bits already set.
    pub fn new(bit_vector: BitVec) -> Result<Self> {
        let modulus = Modulus::try_from(bit_vector.len())?;
        let preset = bit_vector.count_ones();
        if preset > 0 {
            debug!(size = bit_vector.len(), preset, "adopting populated bit array");
        } else {
            debug!(size = bit_vector.len(), "created bloom filter");
        }

        Ok(Self {
            bit_vector,
            hasher: Hasher::new(),
            modulus,
            inserted: 0,
        })
    }

    /// Builds a filter with `size` cleared bits.
    pub fn with_size(size: usize) -> Result<Self> {
        Self::new(bitvec![0; size])
    }

    pub fn insert(&mut self, item: &str) {
        let indexes = self.hasher.indexes(item, self.modulus);
        for index in indexes {
            self.bit_vector.set(index, true);
        }
        self.inserted += 1;
    }

    /// Sets the bits at precomputed `indexes`.
    ///
    /// Nothing is written unless every index is in range.
    pub fn insert_indexes(&mut self, indexes: &Indexes) -> Result<()> {
        self.check_range(indexes)?;
        for &index in indexes {
            self.bit_vector.set(index, true);
        }
        self.inserted += 1;
        Ok(())
    }

    pub fn contains(&self, item: &str) -> bool {
        self.hasher
            .indexes(item, self.modulus)
            .iter()
            .all(|&index| self.bit_vector[index])
    }

    pub fn contains_indexes(&self, indexes: &Indexes) -> Result<bool> {
        self.check_range(indexes)?;
        Ok(indexes.iter().all(|&index| self.bit_vector[index]))
    }

    /// The positions `item` maps to in this filter.
    pub fn indexes(&self, item: &str) -> Indexes {
        self.hasher.indexes(item, self.modulus)
    }

    pub fn size(&self) -> usize {
        self.bit_vector.len()
    }

    /// Number of insert calls made through this filter. Bits that were set
    /// before the array was adopted are not counted.
    pub fn inserted(&self) -> usize {
        self.inserted
    }

    pub fn count_ones(&self) -> usize {
        self.bit_vector.count_ones()
    }

    pub fn load_factor(&self) -> f64 {
        (self.inserted * NUMBER_OF_HASH_FUNCTIONS) as f64 / self.size() as f64
    }

    pub fn fill_ratio(&self) -> f64 {
        self.count_ones() as f64 / self.size() as f64
    }

    /// Probability that a key never inserted is reported present, judged
    /// from the bits currently set.
    pub fn estimated_false_positive_rate(&self) -> f64 {
        self.fill_ratio().powi(NUMBER_OF_HASH_FUNCTIONS as i32)
    }

    pub fn bits(&self) -> &BitSlice {
        &self.bit_vector
    }

    pub fn into_bits(self) -> BitVec {
        self.bit_vector
    }

    fn check_range(&self, indexes: &Indexes) -> Result<()> {
        let size = self.size();
        match indexes.iter().find(|&&index| index >= size) {
            Some(&index) => Err(BloomError::IndexOutOfRange { index, size }),
            None => Ok(()),
        }
    }
}
