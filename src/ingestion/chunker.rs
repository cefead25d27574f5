//! Fixed-size sliding-window chunking with overlap

use crate::error::{Error, Result};

/// Splits text into overlapping fixed-size character windows
///
/// Each window starts `chunk_size - overlap` characters after the previous
/// one, so chunk `i` in the output corresponds to window start
/// `i * (chunk_size - overlap)` over the non-skipped windows. Windows are
/// trimmed; trimmed-empty windows are dropped without affecting the stride.
#[derive(Debug, Clone)]
pub struct TextChunker {
    chunk_size: usize,
    overlap: usize,
}

impl TextChunker {
    /// Create a chunker, rejecting configurations without forward progress
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self> {
        if chunk_size == 0 || overlap >= chunk_size {
            return Err(Error::InvalidChunkConfig {
                chunk_size,
                overlap,
            });
        }
        Ok(Self {
            chunk_size,
            overlap,
        })
    }

    /// Split `text` into ordered, non-empty chunks
    pub fn split(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        let stride = self.chunk_size - self.overlap;

        let mut chunks = Vec::new();
        let mut start = 0;
        while start < chars.len() {
            let end = (start + self.chunk_size).min(chars.len());
            let window: String = chars[start..end].iter().collect();
            let trimmed = window.trim();
            if !trimmed.is_empty() {
                chunks.push(trimmed.to_string());
            }
            start += stride;
        }

        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_overlap_equal_to_size() {
        assert!(matches!(
            TextChunker::new(20, 20),
            Err(Error::InvalidChunkConfig { .. })
        ));
        assert!(matches!(
            TextChunker::new(20, 25),
            Err(Error::InvalidChunkConfig { .. })
        ));
        assert!(matches!(
            TextChunker::new(0, 0),
            Err(Error::InvalidChunkConfig { .. })
        ));
    }

    #[test]
    fn test_window_stride_is_size_minus_overlap() {
        // 26 letters, size 10, overlap 3 -> starts at 0, 7, 14, 21
        let text = "abcdefghijklmnopqrstuvwxyz";
        let chunker = TextChunker::new(10, 3).unwrap();
        let chunks = chunker.split(text);

        assert_eq!(
            chunks,
            vec!["abcdefghij", "hijklmnopq", "opqrstuvwx", "vwxyz"]
        );
    }

    #[test]
    fn test_every_character_is_covered() {
        let text = "The quick brown fox jumps over the lazy dog again and again";
        let chunker = TextChunker::new(12, 4).unwrap();
        let chunks = chunker.split(text);

        let joined: String = chunks.concat();
        for c in text.chars().filter(|c| !c.is_whitespace()) {
            assert!(joined.contains(c), "character {:?} lost", c);
        }
    }

    #[test]
    fn test_two_sentence_split() {
        // chunk_size=20, overlap=5: second window starts 15 chars after the first
        let text = "The quick brown fox. The lazy dog sleeps.";
        let chunker = TextChunker::new(20, 5).unwrap();
        let chunks = chunker.split(text);

        assert!(chunks.len() >= 2);
        assert!(chunks.iter().all(|c| c.chars().count() <= 20));
        let second_window_start: String = text.chars().skip(15).take(20).collect();
        assert_eq!(chunks[1], second_window_start.trim());
    }

    #[test]
    fn test_blank_windows_are_dropped() {
        let text = "abc                                        xyz";
        let chunker = TextChunker::new(10, 0).unwrap();
        let chunks = chunker.split(text);

        assert!(chunks.iter().all(|c| !c.trim().is_empty()));
        assert_eq!(chunks.first().unwrap(), "abc");
        assert_eq!(chunks.last().unwrap(), "xyz");
    }

    #[test]
    fn test_empty_input_yields_no_chunks() {
        let chunker = TextChunker::new(10, 2).unwrap();
        assert!(chunker.split("").is_empty());
        assert!(chunker.split("   \n\t  ").is_empty());
    }

    #[test]
    fn test_multibyte_text_windows_by_characters() {
        let text = "日本語のテキストを分割するテスト";
        let chunker = TextChunker::new(5, 1).unwrap();
        let chunks = chunker.split(text);
        assert!(chunks.iter().all(|c| c.chars().count() <= 5));
        assert_eq!(chunks[0], "日本語のテ");
    }
}
