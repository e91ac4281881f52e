//! Word-window chunking for knowledge-base ingestion.

/// Splits text into overlapping word windows.
pub struct TextChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl TextChunker {
    /// Create a chunker. `chunk_size` and `chunk_overlap` are word counts;
    /// overlap must be smaller than the chunk size (validated at config
    /// load).
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size,
            chunk_overlap,
        }
    }

    /// Chunk `text` into overlapping windows. Whitespace is normalized;
    /// a text shorter than one window yields a single chunk.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        let words: Vec<&str> = text.split_whitespace().collect();
        if words.is_empty() {
            return Vec::new();
        }

        let step = self.chunk_size.saturating_sub(self.chunk_overlap).max(1);
        let mut chunks = Vec::new();

        for i in (0..words.len()).step_by(step) {
            let end = (i + self.chunk_size).min(words.len());
            chunks.push(words[i..end].join(" "));
            if end == words.len() {
                break;
            }
        }

        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_one_chunk() {
        let chunker = TextChunker::new(100, 10);
        let chunks = chunker.chunk("tell(channel, message)");
        assert_eq!(chunks, vec!["tell(channel, message)".to_string()]);
    }

    #[test]
    fn test_empty_text_yields_no_chunks() {
        let chunker = TextChunker::new(100, 10);
        assert!(chunker.chunk("   \n  ").is_empty());
    }

    #[test]
    fn test_windows_overlap() {
        let chunker = TextChunker::new(4, 2);
        let chunks = chunker.chunk("a b c d e f");

        assert_eq!(chunks[0], "a b c d");
        assert_eq!(chunks[1], "c d e f");
    }

    #[test]
    fn test_no_chunk_exceeds_size() {
        let chunker = TextChunker::new(5, 1);
        let text = (0..57).map(|i| i.to_string()).collect::<Vec<_>>().join(" ");

        for chunk in chunker.chunk(&text) {
            assert!(chunk.split_whitespace().count() <= 5);
        }
    }

    #[test]
    fn test_trailing_words_are_kept() {
        let chunker = TextChunker::new(4, 0);
        let chunks = chunker.chunk("a b c d e");

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1], "e");
    }
}
