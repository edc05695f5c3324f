//! Recursive character splitter for reference documents.
//!
//! Tries paragraph breaks first, then line breaks, then spaces, then single
//! characters, and greedily merges the pieces into chunks of at most
//! `chunk_size` characters with up to `overlap` characters carried between
//! neighbouring chunks.

use std::collections::VecDeque;

pub const DEFAULT_CHUNK_SIZE: usize = 1000;
pub const DEFAULT_CHUNK_OVERLAP: usize = 200;

const SEPARATORS: [&str; 4] = ["\n\n", "\n", " ", ""];

fn char_len(s: &str) -> usize {
    s.chars().count()
}

pub fn split_text(text: &str, chunk_size: usize, overlap: usize) -> Vec<String> {
    let overlap = overlap.min(chunk_size.saturating_sub(1));
    split_recursive(text, &SEPARATORS, chunk_size.max(1), overlap)
}

fn split_recursive(text: &str, separators: &[&str], chunk_size: usize, overlap: usize) -> Vec<String> {
    let (idx, separator) = separators
        .iter()
        .enumerate()
        .find(|(_, sep)| sep.is_empty() || text.contains(**sep))
        .map(|(i, sep)| (i, *sep))
        .unwrap_or((separators.len().saturating_sub(1), ""));
    let remaining = &separators[(idx + 1).min(separators.len())..];

    let pieces: Vec<String> = if separator.is_empty() {
        text.chars().map(String::from).collect()
    } else {
        text.split(separator)
            .filter(|p| !p.is_empty())
            .map(String::from)
            .collect()
    };

    let mut chunks = Vec::new();
    let mut fitting: Vec<String> = Vec::new();

    for piece in pieces {
        if char_len(&piece) < chunk_size {
            fitting.push(piece);
            continue;
        }
        if !fitting.is_empty() {
            chunks.extend(merge_pieces(&fitting, separator, chunk_size, overlap));
            fitting.clear();
        }
        if remaining.is_empty() {
            chunks.push(piece);
        } else {
            chunks.extend(split_recursive(&piece, remaining, chunk_size, overlap));
        }
    }
    if !fitting.is_empty() {
        chunks.extend(merge_pieces(&fitting, separator, chunk_size, overlap));
    }
    chunks
}

/// Greedily joins pieces with `separator` into chunks, keeping a tail of at most
/// `overlap` characters from the previous chunk.
fn merge_pieces(pieces: &[String], separator: &str, chunk_size: usize, overlap: usize) -> Vec<String> {
    let sep_len = char_len(separator);
    let mut chunks = Vec::new();
    let mut window: VecDeque<&str> = VecDeque::new();
    let mut total = 0usize;

    for piece in pieces {
        let len = char_len(piece);
        let joiner = if window.is_empty() { 0 } else { sep_len };

        if total + len + joiner > chunk_size && !window.is_empty() {
            push_chunk(&mut chunks, &window, separator);
            while total > overlap
                || (total > 0 && total + len + if window.is_empty() { 0 } else { sep_len } > chunk_size)
            {
                let Some(front) = window.pop_front() else {
                    break;
                };
                total -= char_len(front) + if window.is_empty() { 0 } else { sep_len };
            }
        }

        total += len + if window.is_empty() { 0 } else { sep_len };
        window.push_back(piece);
    }
    push_chunk(&mut chunks, &window, separator);
    chunks
}

fn push_chunk(chunks: &mut Vec<String>, window: &VecDeque<&str>, separator: &str) {
    let joined = window.iter().copied().collect::<Vec<_>>().join(separator);
    let trimmed = joined.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_single_chunk() {
        let chunks = split_text("근로기준법 제54조 (휴게)", 1000, 200);
        assert_eq!(chunks, vec!["근로기준법 제54조 (휴게)"]);
    }

    #[test]
    fn test_empty_text_yields_nothing() {
        assert!(split_text("", 100, 10).is_empty());
        assert!(split_text("   \n\n  ", 100, 10).is_empty());
    }

    #[test]
    fn test_paragraphs_are_preferred_boundaries() {
        let text = format!("{}\n\n{}", "가".repeat(30), "나".repeat(30));
        let chunks = split_text(&text, 40, 0);
        assert_eq!(chunks, vec!["가".repeat(30), "나".repeat(30)]);
    }

    #[test]
    fn test_chunks_respect_size_limit() {
        let text = "word ".repeat(500);
        let chunks = split_text(&text, 100, 20);
        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|c| c.chars().count() <= 100));
    }

    #[test]
    fn test_neighbouring_chunks_overlap() {
        let words: Vec<String> = (0..60).map(|i| format!("w{i:02}")).collect();
        let text = words.join(" ");
        let chunks = split_text(&text, 40, 12);
        assert!(chunks.len() > 1);
        let last_of_first = chunks[0].split(' ').last().unwrap();
        assert!(chunks[1].split(' ').any(|w| w == last_of_first));
    }

    #[test]
    fn test_long_unbroken_run_falls_back_to_characters() {
        let text = "가".repeat(250);
        let chunks = split_text(&text, 100, 0);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].chars().count(), 100);
        assert_eq!(chunks[2].chars().count(), 50);
    }
}
