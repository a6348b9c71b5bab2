use thiserror::Error;

/// Errors reported by the encoder. Decoding is total and never fails.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegintError {
	#[error("Invalid input: negative value {0}")]
	NegativeValue(i64),

	#[error("Invalid input: sequence is not strictly ascending ({prev} followed by {next})")]
	NotAscending { prev: i64, next: i64 },
}

pub type Result<T> = std::result::Result<T, SegintError>;
