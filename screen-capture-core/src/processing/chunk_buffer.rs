use crate::models::error::RecorderError;

/// Ordered, append-only store of encoder slices for one recording.
///
/// Owned by a single `RecordingSession` and dropped with it. Once sealed
/// (the encoder reported `Stopped`) no further chunks are accepted.
#[derive(Debug, Default)]
pub struct ChunkBuffer {
    chunks: Vec<Vec<u8>>,
    total_bytes: usize,
    sealed: bool,
}

impl ChunkBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk in arrival order. Empty chunks are kept.
    pub fn push(&mut self, chunk: Vec<u8>) -> Result<(), RecorderError> {
        if self.sealed {
            return Err(RecorderError::InvalidState(
                "chunk arrived after the recording stopped".into(),
            ));
        }
        self.total_bytes += chunk.len();
        self.chunks.push(chunk);
        Ok(())
    }

    pub fn seal(&mut self) {
        self.sealed = true;
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Number of chunks received.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Sum of all chunk lengths.
    pub fn total_bytes(&self) -> usize {
        self.total_bytes
    }

    pub fn into_chunks(self) -> Vec<Vec<u8>> {
        self.chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_arrival_order_and_counts_bytes() {
        let mut buf = ChunkBuffer::new();
        buf.push(b"ab".to_vec()).unwrap();
        buf.push(Vec::new()).unwrap();
        buf.push(b"c".to_vec()).unwrap();

        assert_eq!(buf.len(), 3);
        assert_eq!(buf.total_bytes(), 3);
        assert_eq!(buf.into_chunks(), vec![b"ab".to_vec(), Vec::new(), b"c".to_vec()]);
    }

    #[test]
    fn duplicate_chunks_are_not_collapsed() {
        let mut buf = ChunkBuffer::new();
        buf.push(b"x".to_vec()).unwrap();
        buf.push(b"x".to_vec()).unwrap();
        assert_eq!(buf.len(), 2);
    }

    #[test]
    fn sealed_buffer_rejects_chunks() {
        let mut buf = ChunkBuffer::new();
        buf.push(b"a".to_vec()).unwrap();
        buf.seal();

        assert!(buf.is_sealed());
        assert!(matches!(buf.push(b"b".to_vec()), Err(RecorderError::InvalidState(_))));
        assert_eq!(buf.len(), 1);
    }

    #[test]
    fn empty_buffer() {
        let buf = ChunkBuffer::new();
        assert!(buf.is_empty());
        assert_eq!(buf.total_bytes(), 0);
        assert!(buf.into_chunks().is_empty());
    }
}
