use crate::error::{Result, VectorStoreError};
use jieba_rs::Jieba;
use once_cell::sync::Lazy;
use passage_text_chunker::Document;
use std::collections::{HashMap, HashSet};

/// Default vector dimension (the 128 most frequent terms)
pub const DEFAULT_DIMENSION: usize = 128;

/// Process-wide segmenter. Built once on first use and shared read-only by
/// every quantizer; its internal state is never mutated after construction.
static SEGMENTER: Lazy<Jieba> = Lazy::new(Jieba::new);

/// Common function words in Chinese and English, dropped before counting.
static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // Chinese
        "的", "了", "在", "是", "我", "有", "和", "就", "不", "人", "都", "一", "一个", "上",
        "也", "很", "到", "说", "要", "去", "你", "会", "着", "没有", "看", "好", "自己",
        "这", "那", "他", "她", "它", "他们", "我们", "你们", "这个", "那个", "什么", "怎么",
        "如何", "这样", "那样", "时候", "因为", "所以", "但是", "然后", "如果", "就是",
        "还是", "只是",
        // English
        "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with",
        "by", "about", "as", "if", "when", "than", "so", "such", "can", "will", "would",
        "should", "could", "may", "might", "must", "shall", "this", "that", "these", "those",
        "i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us", "them", "my",
        "your", "his", "its", "our", "their", "mine", "yours", "hers", "ours", "theirs",
        "who", "which", "what", "where", "why", "how", "whose", "whom", "been", "being",
        "have", "has", "had", "do", "does", "did", "done", "doing", "am", "is", "are",
        "was", "were", "be",
    ]
    .into_iter()
    .collect()
});

/// Single characters exempt from the one-character filter.
const CJK_NUMERALS: &str = "一二三四五六七八九十";

/// Deterministic pseudo-embedding over a term-frequency fingerprint.
///
/// This is intentionally a crude bag-of-words representation, not a semantic
/// embedding: two lexically different but semantically identical texts will
/// not be recognized as similar. The trade is a fast, model-free vectorizer
/// whose output depends only on the input text.
#[derive(Debug, Clone)]
pub struct Quantizer {
    dimension: usize,
}

impl Default for Quantizer {
    fn default() -> Self {
        Self {
            dimension: DEFAULT_DIMENSION,
        }
    }
}

impl Quantizer {
    /// Create a quantizer with an explicit vector dimension
    pub fn new(dimension: usize) -> Result<Self> {
        if dimension == 0 {
            return Err(VectorStoreError::InvalidConfig(
                "quantizer dimension must be > 0".to_string(),
            ));
        }
        Ok(Self { dimension })
    }

    /// Configured vector dimension
    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    /// Map text to a fixed-length frequency vector.
    ///
    /// Blank input yields a zero-length vector (the "no content" sentinel).
    /// Otherwise the result has length exactly `dimension`: slot `i` holds
    /// the raw occurrence count of the `i`-th most frequent surviving token,
    /// ties broken by first occurrence in the text. Texts whose tokens are
    /// all filtered out quantize to an all-zero vector of full length.
    #[must_use]
    pub fn quantize(&self, text: &str) -> Vec<f32> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let tokens = preprocess(text);

        // Term frequency, keeping first-occurrence positions for the
        // tie-break.
        let mut frequency: HashMap<String, (usize, usize)> = HashMap::new();
        for (position, token) in tokens.into_iter().enumerate() {
            let slot = frequency.entry(token).or_insert((position, 0));
            slot.1 += 1;
        }

        let mut ranked: Vec<(usize, usize)> = frequency.into_values().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        let mut vector = vec![0.0f32; self.dimension];
        for (slot, (_, count)) in ranked.into_iter().take(self.dimension).enumerate() {
            vector[slot] = count as f32;
        }
        vector
    }

    /// Quantize a document's text
    #[must_use]
    pub fn quantize_document(&self, document: &Document) -> Vec<f32> {
        self.quantize(&document.text)
    }

    /// Cosine similarity between two frequency vectors.
    ///
    /// An empty operand or a zero norm yields `0.0`. Vectors of different
    /// lengths are truncated to the shorter length before comparison; this is
    /// lossy when one side is fully populated and kept as documented
    /// behavior.
    #[must_use]
    pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }

        let len = a.len().min(b.len());
        let (a, b) = (&a[..len], &b[..len]);

        let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
        let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }

        dot_product / (norm_a * norm_b)
    }
}

/// Segment text into normalized tokens: lowercase, minus stop words,
/// punctuation-only tokens and bare single characters (CJK numerals stay).
fn preprocess(text: &str) -> Vec<String> {
    SEGMENTER
        .cut(text, true)
        .into_iter()
        .map(str::to_lowercase)
        .filter(|token| !is_stop_word(token))
        .collect()
}

fn is_stop_word(token: &str) -> bool {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return true;
    }

    if STOP_WORDS.contains(trimmed) {
        return true;
    }

    // Pure punctuation/symbol tokens carry no term signal.
    if trimmed.chars().all(|c| !c.is_alphanumeric()) {
        return true;
    }

    let mut chars = trimmed.chars();
    if let (Some(only), None) = (chars.next(), chars.next()) {
        return !CJK_NUMERALS.contains(only);
    }

    false
}
