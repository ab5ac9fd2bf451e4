use thiserror::Error;

/// A request frame that cannot be decoded. Fatal to that single request only;
/// the connection layer decides what to do with the connection.
///
/// Protocol-level failures (unsupported version, unknown topic) are NOT errors:
/// they are error codes carried inside a well-formed response.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("malformed frame: truncated while reading <{0}>")]
    Truncated(&'static str),
    #[error("malformed frame: negative length {len} for <{field}>")]
    NegativeLength { field: &'static str, len: i16 },
}

pub type CodecResult<T> = Result<T, CodecError>;
