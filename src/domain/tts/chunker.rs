/// Default chunk size; Polly rejects plain-text requests above 3000 characters
pub const DEFAULT_MAX_CHUNK_LENGTH: usize = 3000;

/// Split text into consecutive chunks of at most `max_length` characters.
///
/// Slicing is purely positional: chunk `i` covers characters
/// `[i * max_length, (i + 1) * max_length)`. Words and sentences may be cut
/// in half. Concatenating the chunks in order yields the original text.
/// Empty input produces no chunks. A `max_length` of zero is treated as one.
pub fn split_text(text: &str, max_length: usize) -> Vec<&str> {
    let max_length = max_length.max(1);

    let mut chunks = Vec::with_capacity(text.len() / max_length + 1);
    let mut start = 0;

    for (count, (offset, _)) in text.char_indices().enumerate() {
        if count > 0 && count % max_length == 0 {
            chunks.push(&text[start..offset]);
            start = offset;
        }
    }

    if start < text.len() {
        chunks.push(&text[start..]);
    }

    chunks
}
