use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BloomError {
    #[error("invalid modulus {0}: size must be strictly positive")]
    InvalidModulus(i64),

    #[error("index {index} out of range for bit array of size {size}")]
    IndexOutOfRange { index: usize, size: usize },

    #[error("bit array of {0} bits does not fit a 32-bit modulus")]
    SizeTooLarge(usize),

    #[error("unknown hash function: {0}")]
    UnknownHashFunction(String),
}

pub type Result<T> = std::result::Result<T, BloomError>;
