//! ONNX sentence embedder for reranking.
//!
//! Runs `all-MiniLM-L6-v2` through ONNX Runtime. Model files come from the
//! HuggingFace Hub on first use and are cached by `hf-hub`.
//!
//! ```text
//! texts → tokenizer (pad to longest) → ONNX → masked mean-pool → L2-normalize
//! ```

use super::Embedder;
use crate::config::RerankConfig;
use crate::error::{Result, ScoutError};
use ort::session::{Session, SessionInputValue, SessionInputs};
use ort::value::Tensor;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;

const MODEL_FILE: &str = "onnx/model.onnx";
const TOKENIZER_FILE: &str = "tokenizer.json";

/// Token budget per text; titles are far shorter.
const MAX_TOKENS: usize = 256;

struct Inner {
    session: Session,
    tokenizer: tokenizers::Tokenizer,
}

/// Sentence embedder backed by an ONNX session.
///
/// Loaded once and shared; calls are serialised by an internal lock because
/// both the session and the tokenizer need exclusive access.
pub struct OnnxEmbedder {
    inner: Mutex<Inner>,
}

impl std::fmt::Debug for OnnxEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxEmbedder").finish_non_exhaustive()
    }
}

impl OnnxEmbedder {
    /// Load from local model and tokenizer files.
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::Model`] if either file cannot be loaded.
    pub fn from_files(model_path: &Path, tokenizer_path: &Path, intra_threads: usize) -> Result<Self> {
        info!(model = %model_path.display(), "loading reranker model");
        let session = Session::builder()
            .and_then(|b| b.with_intra_threads(intra_threads.max(1)))
            .and_then(|b| b.commit_from_file(model_path))
            .map_err(|e| ScoutError::Model(format!("reranker model load failed: {e}")))?;

        let mut tokenizer = tokenizers::Tokenizer::from_file(tokenizer_path)
            .map_err(|e| ScoutError::Model(format!("reranker tokenizer load failed: {e}")))?;
        tokenizer
            .with_truncation(Some(tokenizers::TruncationParams {
                max_length: MAX_TOKENS,
                ..Default::default()
            }))
            .map_err(|e| ScoutError::Model(format!("tokenizer truncation config failed: {e}")))?;
        // Padding is done by hand so the mask stays aligned with each row.
        tokenizer.with_padding(None);

        Ok(Self {
            inner: Mutex::new(Inner { session, tokenizer }),
        })
    }

    /// Fetch model files for `repo_id` into the hf-hub cache.
    ///
    /// Returns `(model_path, tokenizer_path)`.
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::Model`] if the hub is unreachable or a file is
    /// missing.
    pub fn download(repo_id: &str) -> Result<(PathBuf, PathBuf)> {
        info!(repo = repo_id, "fetching reranker model");
        let api = hf_hub::api::sync::Api::new()
            .map_err(|e| ScoutError::Model(format!("HF Hub API init failed: {e}")))?;
        let repo = api.model(repo_id.to_owned());
        let model_path = repo
            .get(MODEL_FILE)
            .map_err(|e| ScoutError::Model(format!("failed to download {MODEL_FILE}: {e}")))?;
        let tokenizer_path = repo
            .get(TOKENIZER_FILE)
            .map_err(|e| ScoutError::Model(format!("failed to download {TOKENIZER_FILE}: {e}")))?;
        Ok((model_path, tokenizer_path))
    }

    /// Download (if needed) and load the configured model.
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::Model`] on download or load failure.
    pub fn load(config: &RerankConfig) -> Result<Self> {
        let (model_path, tokenizer_path) = Self::download(&config.model_repo)?;
        Self::from_files(&model_path, &tokenizer_path, config.intra_threads)
    }
}

impl Embedder for OnnxEmbedder {
    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| ScoutError::Rerank("embedder lock poisoned".into()))?;
        let inner = &mut *guard;

        let encodings = texts
            .iter()
            .map(|t| {
                inner
                    .tokenizer
                    .encode(*t, true)
                    .map_err(|e| ScoutError::Rerank(format!("tokenization failed: {e}")))
            })
            .collect::<Result<Vec<_>>>()?;

        let rows = encodings.len();
        let width = encodings
            .iter()
            .map(|e| e.get_ids().len())
            .max()
            .unwrap_or(0)
            .max(1);

        let mut ids = vec![0i64; rows * width];
        let mut mask = vec![0i64; rows * width];
        let mut types = vec![0i64; rows * width];
        for (row, enc) in encodings.iter().enumerate() {
            let base = row * width;
            let cells = enc
                .get_ids()
                .iter()
                .zip(enc.get_attention_mask())
                .zip(enc.get_type_ids());
            for (col, ((&id, &m), &t)) in cells.enumerate() {
                ids[base + col] = i64::from(id);
                mask[base + col] = i64::from(m);
                types[base + col] = i64::from(t);
            }
        }

        let tensor = |name: &str, data: Vec<i64>| {
            Tensor::from_array(([rows, width], data))
                .map_err(|e| ScoutError::Rerank(format!("{name} tensor failed: {e}")))
        };
        let mut feed: HashMap<String, SessionInputValue> = HashMap::new();
        feed.insert("input_ids".to_owned(), tensor("input_ids", ids)?.into());
        feed.insert(
            "attention_mask".to_owned(),
            tensor("attention_mask", mask.clone())?.into(),
        );
        feed.insert("token_type_ids".to_owned(), tensor("token_type_ids", types)?.into());

        let outputs = inner
            .session
            .run(SessionInputs::from(feed))
            .map_err(|e| ScoutError::Rerank(format!("ONNX inference failed: {e}")))?;
        let (_shape, hidden) = outputs[0_usize]
            .try_extract_tensor::<f32>()
            .map_err(|e| ScoutError::Rerank(format!("output extraction failed: {e}")))?;

        // Output is [rows, width, dim] token embeddings.
        let dim = hidden.len() / (rows * width);
        if dim == 0 {
            return Err(ScoutError::Rerank("model returned an empty tensor".into()));
        }
        Ok((0..rows)
            .map(|row| {
                let start = row * width * dim;
                let tokens = &hidden[start..start + width * dim];
                let row_mask = &mask[row * width..(row + 1) * width];
                l2_normalize(masked_mean(tokens, row_mask, dim))
            })
            .collect())
    }
}

/// Average the token rows whose mask is non-zero.
///
/// `tokens` is `[mask.len(), dim]` row-major.
fn masked_mean(tokens: &[f32], mask: &[i64], dim: usize) -> Vec<f32> {
    let mut sum = vec![0.0f32; dim];
    let mut live = 0usize;
    for (row, _) in mask.iter().enumerate().filter(|&(_, &m)| m != 0) {
        for (acc, &v) in sum.iter_mut().zip(&tokens[row * dim..(row + 1) * dim]) {
            *acc += v;
        }
        live += 1;
    }
    if live > 0 {
        let n = live as f32;
        sum.iter_mut().for_each(|v| *v /= n);
    }
    sum
}

fn l2_normalize(mut v: Vec<f32>) -> Vec<f32> {
    let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 1e-12 {
        v.iter_mut().for_each(|x| *x /= norm);
    }
    v
}
