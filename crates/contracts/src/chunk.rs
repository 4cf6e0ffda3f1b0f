//! LogChunk - bytes extracted from a source between two size observations.

use bytes::Bytes;

/// Raw payload handed from a source monitor to the router.
///
/// Never mutated after creation; cloning shares the underlying buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogChunk {
    /// Id of the source the bytes were read from.
    pub source_id: String,
    /// The extracted bytes, exactly as they appeared on disk.
    pub payload: Bytes,
}

impl LogChunk {
    /// Create a chunk tagged with its source id.
    pub fn new(source_id: impl Into<String>, payload: impl Into<Bytes>) -> Self {
        Self {
            source_id: source_id.into(),
            payload: payload.into(),
        }
    }

    /// Payload length in bytes.
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    /// Whether the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_is_byte_exact() {
        let chunk = LogChunk::new("app", &b"line1\nline2\n"[..]);
        assert_eq!(chunk.source_id, "app");
        assert_eq!(chunk.len(), 12);
        assert_eq!(&chunk.payload[..], b"line1\nline2\n");
    }
}
