use crate::models::PipelineOptions;

#[derive(Debug, Clone, Copy)]
pub struct ChunkingConfig {
    pub max_chars: usize,
    pub overlap_words: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_chars: 40_000,
            overlap_words: 10,
        }
    }
}

impl From<PipelineOptions> for ChunkingConfig {
    fn from(value: PipelineOptions) -> Self {
        Self {
            max_chars: value.max_chunk_chars,
            overlap_words: value.overlap_words,
        }
    }
}

/// Splits `text` into chunks that each roughly fit the extraction service's
/// input budget, sharing a small rolling window of words between consecutive
/// chunks.
///
/// Words accumulate into a buffer; once the joined buffer reaches
/// `max_chars`, the buffer is emitted *minus* its trailing `overlap_words`
/// words, and the next buffer is seeded from the rolling window plus the word
/// that tripped the boundary. The trailing words are counted toward the
/// length but dropped from the emitted chunk. That asymmetry is observed
/// production behavior and is load-bearing for chunk reproducibility, so it
/// is kept rather than corrected.
///
/// Chunks are not guaranteed to stay under `max_chars`; the bound is only
/// checked per appended word. Empty input yields no chunks.
pub fn split_into_chunks(text: &str, config: ChunkingConfig) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();

    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_len = 0usize;
    let mut overlap: Vec<&str> = words.iter().copied().take(config.overlap_words).collect();

    for &word in &words {
        if !current.is_empty() {
            current_len += 1;
        }
        current_len += word.chars().count();
        current.push(word);

        if current_len >= config.max_chars {
            let kept = current.len().saturating_sub(config.overlap_words);
            chunks.push(current[..kept].join(" "));

            let mut seeded = overlap.clone();
            seeded.push(word);
            current = seeded;
            current_len = joined_char_len(&current);

            let tail = current.len().saturating_sub(config.overlap_words);
            overlap = current[tail..].to_vec();
        }
    }

    if !current.is_empty() {
        chunks.push(current.join(" "));
    }

    chunks
}

fn joined_char_len(words: &[&str]) -> usize {
    let chars: usize = words.iter().map(|word| word.chars().count()).sum();
    chars + words.len().saturating_sub(1)
}
