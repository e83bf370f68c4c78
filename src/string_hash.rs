//! String hash functions used to spread keys over a bit array.
//!
//! Every function works on the key's UTF-16 code units with signed 32-bit
//! wrapping arithmetic. Shift counts only use their low five bits. A negative
//! accumulator has its sign bit cleared by a logical right shift before the
//! final remainder, so results always land in `[0, size)`.
//!
//! The exact bit patterns are load-bearing: bit arrays populated by earlier
//! runs are only readable if these functions keep producing the same values.

use crate::error::{BloomError, Result};

// DO NOT change this prime number if you want to keep
// compatibility with previously computed hashes.
pub const PRIME_NUMBER: i32 = 99989;

/// A strictly positive 32-bit modulus, the exclusive upper bound of a hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Modulus(i32);

impl Modulus {
    pub fn new(size: i32) -> Result<Self> {
        if size <= 0 {
            return Err(BloomError::InvalidModulus(i64::from(size)));
        }
        Ok(Self(size))
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

impl TryFrom<usize> for Modulus {
    type Error = BloomError;

    fn try_from(size: usize) -> Result<Self> {
        let size = i32::try_from(size).map_err(|_| BloomError::SizeTooLarge(size))?;
        Self::new(size)
    }
}

/// Mixes the first and last code units with `!3` and cross-shifts the middle
/// ones by their mirror image.
///
/// The mirror of position `i` is `len - 1 - i`. The old Java `crossHash` read
/// `len - i` instead, so for keys of two or more characters its values (and
/// any bit array it populated) do not match this function.
///
/// ```
/// assert_eq!(string_bloom::cross_hash("abc", 101), Ok(1));
/// ```
pub fn cross_hash(key: &str, size: i32) -> Result<u32> {
    Ok(cross(key, Modulus::new(size)?))
}

/// Shifts the complement of each position by its code unit.
pub fn index_value_hash(key: &str, size: i32) -> Result<u32> {
    Ok(index_value(key, Modulus::new(size)?))
}

/// XOR-folds each code unit times [`PRIME_NUMBER`], shifted by its position.
pub fn prime_hash(key: &str, size: i32) -> Result<u32> {
    Ok(prime(key, Modulus::new(size)?))
}

/// The polynomial `31` string hash, reduced like the others.
pub fn simple_hash(key: &str, size: i32) -> Result<u32> {
    Ok(simple(key, Modulus::new(size)?))
}

pub(crate) fn cross(key: &str, modulus: Modulus) -> u32 {
    let codes: Vec<i32> = key.encode_utf16().map(i32::from).collect();
    let len = codes.len();
    let mut sum: i32 = 0;

    for (i, &code) in codes.iter().enumerate() {
        if i == 0 || (i == len - 1 && len != 2) {
            sum = sum.wrapping_add(code.wrapping_mul(!3));
        } else {
            let shifted = code.wrapping_shl(codes[len - 1 - i] as u32);
            sum = sum.wrapping_add(shifted ^ !modulus.0);
        }
    }

    reduce(sum, modulus)
}

pub(crate) fn index_value(key: &str, modulus: Modulus) -> u32 {
    let mut units = key.encode_utf16();
    let sum = match (units.next(), units.next()) {
        (Some(only), None) => i32::from(only) ^ 1,
        _ => key
            .encode_utf16()
            .enumerate()
            .fold(0i32, |sum, (i, code)| {
                let mixed = (!(i as i32)).wrapping_shl(u32::from(code)) ^ modulus.0 ^ 17;
                sum.wrapping_add(mixed)
            }),
    };

    reduce(sum, modulus)
}

pub(crate) fn prime(key: &str, modulus: Modulus) -> u32 {
    let sum = key
        .encode_utf16()
        .enumerate()
        .fold(0i32, |sum, (i, code)| {
            sum ^ i32::from(code)
                .wrapping_mul(PRIME_NUMBER)
                .wrapping_shl(i as u32)
        });

    reduce(sum, modulus)
}

pub(crate) fn simple(key: &str, modulus: Modulus) -> u32 {
    let hash = key
        .encode_utf16()
        .fold(0i32, |hash, code| hash.wrapping_mul(31).wrapping_add(i32::from(code)));

    reduce(hash, modulus)
}

fn reduce(sum: i32, modulus: Modulus) -> u32 {
    let sum = if sum < 0 {
        ((sum as u32) >> 1) as i32
    } else {
        sum
    };
    (sum % modulus.0) as u32
}
