//! Policy document chunking with fixed width and overlap.
//!
//! Chunk starts are fixed: chunk `i` begins exactly `width - overlap`
//! bytes after chunk `i-1` (aligned forward to a char boundary), so
//! identical input and parameters always yield an identical sequence.
//! Chunk ends prefer a natural boundary (paragraph break, then sentence
//! end, then whitespace) found near the width limit; seeking is backward
//! only, so no chunk ever exceeds `width` bytes. The seek floor never
//! drops below the next chunk's start, keeping the document fully covered.

use crate::types::PolicyChunk;
use wayfinder_core::{AppError, AppResult};

/// Boundary seeking is confined to the trailing quarter of a chunk.
const SEEK_WINDOW_DIVISOR: usize = 4;

/// Split `text` into overlapping chunks of at most `width` bytes.
///
/// Fails with a configuration error when `width` is zero or `overlap` is
/// not strictly smaller than `width`. An empty text yields no chunks.
pub fn chunk(text: &str, width: usize, overlap: usize) -> AppResult<Vec<PolicyChunk>> {
    if width == 0 {
        return Err(AppError::Config("Chunk width must be positive".to_string()));
    }

    if overlap >= width {
        return Err(AppError::Config(format!(
            "Chunk overlap ({}) must be smaller than chunk width ({})",
            overlap, width
        )));
    }

    if text.is_empty() {
        return Ok(vec![]);
    }

    let step = width - overlap;
    let mut chunks = Vec::new();
    let mut seq = 0u32;
    let mut start = 0usize;

    loop {
        let hard_end = (start + width).min(text.len());

        // Pull the cut back to a valid char boundary
        let mut end = hard_end;
        while end > start && !text.is_char_boundary(end) {
            end -= 1;
        }

        // Only interior cuts get boundary seeking; the final chunk simply
        // runs to the end of the document
        if hard_end < text.len() {
            end = seek_boundary(text, start, end, width, step);
        }

        // Degenerate widths on multibyte text can leave an empty span
        if end > start {
            chunks.push(PolicyChunk::new(seq, start, end, &text[start..end]));
            seq += 1;
        }

        if hard_end >= text.len() {
            break;
        }

        // Next chunk starts a fixed step after this one
        let mut next = start + step;
        while next < text.len() && !text.is_char_boundary(next) {
            next += 1;
        }
        if next >= text.len() {
            break;
        }
        start = next;
    }

    tracing::debug!(
        "Chunked {} bytes into {} chunks (width: {}, overlap: {})",
        text.len(),
        chunks.len(),
        width,
        overlap
    );

    Ok(chunks)
}

/// Find a natural boundary in the tail of the chunk.
///
/// The floor is the later of the next chunk's start (coverage must not
/// break) and the start of the trailing seek window. If no boundary is
/// found the hard cut stands.
fn seek_boundary(text: &str, start: usize, end: usize, width: usize, step: usize) -> usize {
    let mut floor = start + step.max(width - width / SEEK_WINDOW_DIVISOR);
    if floor >= end {
        return end;
    }
    while floor < end && !text.is_char_boundary(floor) {
        floor += 1;
    }

    let window = &text[floor..end];

    // Paragraph break first, keeping both newlines in this chunk
    if let Some(pos) = window.rfind("\n\n") {
        return floor + pos + 2;
    }

    // Then a sentence end followed by whitespace
    if let Some(pos) = rfind_sentence_end(window) {
        return floor + pos;
    }

    // Then any ASCII whitespace (single byte, so `pos + 1` stays on a
    // char boundary)
    if let Some(pos) = window.rfind(|c: char| c.is_ascii_whitespace()) {
        return floor + pos + 1;
    }

    end
}

/// Rightmost position just past a sentence terminator and its following
/// whitespace, or None.
fn rfind_sentence_end(window: &str) -> Option<usize> {
    let bytes = window.as_bytes();
    (1..bytes.len()).rev().find_map(|i| {
        let terminator = matches!(bytes[i - 1], b'.' | b'!' | b'?');
        let whitespace = bytes[i] == b' ' || bytes[i] == b'\n';
        (terminator && whitespace).then_some(i + 1)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_must_be_smaller_than_width() {
        let err = chunk("some text", 50, 50).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));

        let err = chunk("some text", 50, 80).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));

        assert!(chunk("some text", 50, 49).is_ok());
    }

    #[test]
    fn test_zero_width_rejected() {
        let err = chunk("some text", 0, 0).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_empty_text_yields_no_chunks() {
        assert!(chunk("", 100, 10).unwrap().is_empty());
    }

    #[test]
    fn test_short_text_is_a_single_chunk() {
        let chunks = chunk("short policy note", 100, 10).unwrap();

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].seq, 0);
        assert_eq!(chunks[0].start, 0);
        assert_eq!(chunks[0].end, 17);
        assert_eq!(chunks[0].text, "short policy note");
    }

    #[test]
    fn test_fixed_starts_and_exact_overlap() {
        // Uniform text has no natural boundaries, so ends are hard cuts
        // and adjacent chunks share exactly `overlap` bytes.
        let text = "a".repeat(1000);
        let chunks = chunk(&text, 100, 20).unwrap();

        for (i, c) in chunks.iter().enumerate() {
            assert_eq!(c.seq, i as u32);
            assert_eq!(c.start, i * 80);
            assert!(c.end - c.start <= 100);
        }

        for pair in chunks.windows(2) {
            let shared = pair[0].end - pair[1].start;
            assert_eq!(shared, 20);
            assert_eq!(
                text[pair[1].start..pair[0].end],
                pair[0].text[pair[0].text.len() - shared..]
            );
        }
    }

    #[test]
    fn test_chunking_is_deterministic() {
        let text = "The quick brown fox jumps over the lazy dog. ".repeat(40);

        let first = chunk(&text, 120, 30).unwrap();
        let second = chunk(&text, 120, 30).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_offsets_index_into_source() {
        let text = "Sentence one is here. Sentence two follows it. ".repeat(20);
        let chunks = chunk(&text, 150, 30).unwrap();

        assert!(chunks.len() > 1);
        for c in &chunks {
            assert_eq!(c.text, &text[c.start..c.end]);
            assert!(c.end - c.start <= 150);
        }
    }

    #[test]
    fn test_prefers_sentence_boundary() {
        let text = "Alpha beta gamma delta. Epsilon zeta eta theta. ".repeat(10);
        let chunks = chunk(&text, 100, 30).unwrap();

        // Interior chunks should end just after a sentence terminator
        // rather than mid-word.
        let interior = &chunks[0];
        assert!(
            interior.text.ends_with(". ") || interior.text.ends_with("."),
            "chunk ended mid-sentence: {:?}",
            interior.text
        );
    }

    #[test]
    fn test_never_exceeds_width_on_utf8() {
        let text = "Viagem ao Japão é ótima. ".repeat(50);
        let chunks = chunk(&text, 90, 20).unwrap();

        for c in &chunks {
            assert!(c.end - c.start <= 90);
            // Offsets sit on char boundaries: slicing must not panic
            assert_eq!(c.text, &text[c.start..c.end]);
        }
    }

    #[test]
    fn test_final_chunk_may_be_short() {
        let text = "a".repeat(250);
        let chunks = chunk(&text, 100, 0).unwrap();

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[2].end - chunks[2].start, 50);
    }
}
