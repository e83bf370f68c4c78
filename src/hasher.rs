use crate::error::Result;
use crate::hash_function::HashFunction;
use crate::string_hash::Modulus;

pub const NUMBER_OF_HASH_FUNCTIONS: usize = 3;

/// Bit positions derived from one key, one per hash function.
pub type Indexes = [usize; NUMBER_OF_HASH_FUNCTIONS];

/// Turns a key into [`NUMBER_OF_HASH_FUNCTIONS`] positions of a bit array.
///
/// The order is fixed to cross, index-value, prime. Nothing is cached; every
/// call recomputes the hashes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hasher {
    hash_functions: [HashFunction; NUMBER_OF_HASH_FUNCTIONS],
}

impl Hasher {
    pub fn new() -> Self {
        Self {
            hash_functions: [
                HashFunction::Cross,
                HashFunction::IndexValue,
                HashFunction::Prime,
            ],
        }
    }

    pub fn hash_functions(&self) -> &[HashFunction; NUMBER_OF_HASH_FUNCTIONS] {
        &self.hash_functions
    }

    pub fn hash_string(&self, key: &str, size: i32) -> Result<Indexes> {
        Ok(self.indexes(key, Modulus::new(size)?))
    }

    pub fn indexes(&self, key: &str, modulus: Modulus) -> Indexes {
        self.hash_functions
            .map(|hash_function| hash_function.hash(key, modulus) as usize)
    }
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new()
    }
}
