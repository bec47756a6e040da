//! Error types for the encoder core

pub type Result<T> = std::result::Result<T, EncoderError>;

#[derive(Debug, thiserror::Error)]
pub enum EncoderError {
    /// No sink was supplied for the entry write
    #[error("no sink supplied for log entry")]
    NilSink,

    /// IO error reported by the sink
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Sink accepted the write but consumed fewer bytes than assembled
    #[error("incomplete write: only wrote {written} of {expected} bytes")]
    IncompleteWrite { written: usize, expected: usize },

    /// A marshalable value failed while serializing itself
    #[error("marshal error: {0}")]
    Marshal(String),
}

impl EncoderError {
    /// Create an incomplete write error with byte counts
    pub fn incomplete_write(written: usize, expected: usize) -> Self {
        EncoderError::IncompleteWrite { written, expected }
    }

    /// Create a marshal error
    pub fn marshal<S: Into<String>>(msg: S) -> Self {
        EncoderError::Marshal(msg.into())
    }
}
