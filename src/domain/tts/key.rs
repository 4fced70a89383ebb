const TEXT_SUFFIX: &str = ".txt";
const AUDIO_SUFFIX: &str = ".mp3";

/// Derive the destination audio key from the source text key.
///
/// Replaces the first `.txt` occurrence with `.mp3`. This is a plain
/// substring replacement, not a path-aware extension swap: keys without
/// `.txt` are returned unchanged.
pub fn derive_audio_key(source_key: &str) -> String {
    source_key.replacen(TEXT_SUFFIX, AUDIO_SUFFIX, 1)
}
