//! Relevance reranking of search results by embedding similarity.

pub mod embedding;

pub use embedding::OnnxEmbedder;

use crate::error::{Result, ScoutError};

/// Scores documents against a query.
pub trait Reranker: Send + Sync {
    /// Return `(doc_index, score)` pairs, best first.
    ///
    /// Empty `docs` yields an empty list. With `top_k` the list is cut to
    /// that length.
    fn rerank(&self, query: &str, docs: &[&str], top_k: Option<usize>) -> Result<Vec<(usize, f32)>>;
}

/// Turns texts into fixed-length vectors, one per input, in order.
pub trait Embedder: Send + Sync {
    /// Embed every text in `texts`.
    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>>;
}

/// Cosine similarity in `[-1, 1]`; zero when either vector has no length.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    let denom = norm_a * norm_b;
    if denom < 1e-12 { 0.0 } else { dot / denom }
}

/// Score each document vector against `query` and order best first.
///
/// The sort is stable, so equal scores keep input order.
pub fn rank_by_similarity(query: &[f32], docs: &[Vec<f32>], top_k: Option<usize>) -> Vec<(usize, f32)> {
    let mut scored: Vec<(usize, f32)> = docs
        .iter()
        .enumerate()
        .map(|(i, doc)| (i, cosine_similarity(query, doc)))
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    if let Some(k) = top_k {
        scored.truncate(k);
    }
    scored
}

/// [`Reranker`] that embeds the query with the documents in one batch.
#[derive(Debug)]
pub struct EmbeddingReranker<E> {
    embedder: E,
}

impl<E: Embedder> EmbeddingReranker<E> {
    /// Wrap an embedder.
    pub fn new(embedder: E) -> Self {
        Self { embedder }
    }
}

impl<E: Embedder> Reranker for EmbeddingReranker<E> {
    fn rerank(&self, query: &str, docs: &[&str], top_k: Option<usize>) -> Result<Vec<(usize, f32)>> {
        if docs.is_empty() {
            return Ok(Vec::new());
        }
        let mut texts = Vec::with_capacity(docs.len() + 1);
        texts.push(query);
        texts.extend_from_slice(docs);

        let vectors = self.embedder.embed(&texts)?;
        if vectors.len() != texts.len() {
            return Err(ScoutError::Rerank(format!(
                "embedder returned {} vectors for {} texts",
                vectors.len(),
                texts.len()
            )));
        }
        let (query_vec, doc_vecs) = vectors.split_at(1);
        Ok(rank_by_similarity(&query_vec[0], doc_vecs, top_k))
    }
}
