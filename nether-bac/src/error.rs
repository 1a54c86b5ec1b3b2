//! BAC parsing and serialization error types

use thiserror::Error;

/// BAC parsing and serialization error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BacError {
    /// File does not start with the "NCBC" signature
    #[error("Invalid BAC signature")]
    InvalidSignature,
    /// Format generation is not the one this codec speaks
    #[error("Unsupported BAC generation: 0x{0:04X} (expected 0x{expected:04X})", expected = crate::BAC_GENERATION)]
    UnsupportedGeneration(u16),
    /// Sub-kind row names a record kind outside the catalog
    #[error("Unknown record kind: {0}")]
    UnknownKind(i16),
    /// Throw record table length matches neither known revision
    #[error("Ambiguous throw record size: stride {stride} at offset {offset} ({count} records)")]
    AmbiguousThrowSize {
        /// Derived bytes-per-record for the table
        stride: usize,
        /// Absolute byte offset of the table
        offset: usize,
        /// Declared record count
        count: usize,
    },
    /// Two entries claim the same index at write time
    #[error("Duplicate entry index: {0}")]
    DuplicateIndex(i32),
    /// Record list too long for the row's 16-bit count field at write time
    #[error("Record table too large: {count} records of kind {kind} (limit {max})", max = i16::MAX)]
    OversizedTable {
        /// Kind id of the offending list
        kind: i16,
        /// In-memory record count
        count: usize,
    },
    /// Read past the end of the buffer
    #[error("Unexpected end of file at offset {0}")]
    UnexpectedEof(usize),
    /// IO error while loading or saving
    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for BacError {
    fn from(e: std::io::Error) -> Self {
        BacError::Io(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            BacError::InvalidSignature.to_string(),
            "Invalid BAC signature"
        );
        assert_eq!(
            BacError::UnsupportedGeneration(0x0100).to_string(),
            "Unsupported BAC generation: 0x0100 (expected 0x0200)"
        );
        assert_eq!(
            BacError::UnknownKind(77).to_string(),
            "Unknown record kind: 77"
        );
        assert_eq!(
            BacError::DuplicateIndex(3).to_string(),
            "Duplicate entry index: 3"
        );
        assert_eq!(
            BacError::OversizedTable {
                kind: 30,
                count: 32768
            }
            .to_string(),
            "Record table too large: 32768 records of kind 30 (limit 32767)"
        );
        assert_eq!(
            BacError::UnexpectedEof(104).to_string(),
            "Unexpected end of file at offset 104"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: BacError = io.into();
        assert!(matches!(err, BacError::Io(_)));
    }
}
