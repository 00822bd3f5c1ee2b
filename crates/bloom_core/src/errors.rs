use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("Configuration: {0}")]
    Configuration(String),

    #[error("Bit position {pos} out of range (size {size})")]
    OutOfRange { pos: u64, size: u64 },

    #[error("Incompatible filters: size/hash_count differ")]
    Incompatible,
}

pub type Result<T> = std::result::Result<T, FilterError>;
