//! Embedding provider abstraction and the deterministic mock provider.
//!
//! The embedding model is the pipeline's only long-lived external resource.
//! It is modeled as an explicitly constructed, explicitly passed dependency
//! ([`EmbeddingProvider`]) rather than ambient global state, so tests can
//! substitute [`MockEmbeddingProvider`] and stay deterministic and offline.
//!
//! Batch embedding carries a hard contract: output vectors arrive in input
//! order, one per input. Callers verify the length side of the contract and
//! surface violations as [`EmbeddingError::BatchShape`] instead of silently
//! mis-attributing vectors.

pub mod query;

pub use query::{compose_query, resolved_job, resolved_persona};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by embedding providers.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// The underlying model call failed.
    #[error("embedding provider '{provider}' failed: {message}")]
    Provider { provider: String, message: String },

    /// A batch call returned the wrong number of vectors.
    #[error("batch shape mismatch: {expected} inputs produced {actual} vectors")]
    BatchShape { expected: usize, actual: usize },
}

/// Description of the loaded embedding model, surfaced in output metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub embedding_dimension: usize,
    pub max_input_length: usize,
    pub model_identifier: String,
}

/// A source of fixed-length embedding vectors for arbitrary text.
///
/// Implementations must be deterministic for a given model version and
/// operate fully offline at call time. The provider is shared read-only
/// across the pipeline's lifetime; implementations must be `Send + Sync`.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embeds a batch of texts.
    ///
    /// Output order and length must equal the input's; the pipeline relies
    /// on positional correspondence to attach vectors to their sources.
    async fn embed_batch(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError>;

    /// Describes the loaded model.
    fn model_info(&self) -> ModelInfo;

    /// Short provider name for telemetry.
    fn name(&self) -> &str;

    /// Embeds a single text via a one-element batch.
    async fn embed(&self, input: &str) -> Result<Vec<f32>, EmbeddingError> {
        let inputs = [input.to_string()];
        let vectors = self.embed_batch(&inputs).await?;
        if vectors.len() != 1 {
            return Err(EmbeddingError::BatchShape {
                expected: 1,
                actual: vectors.len(),
            });
        }
        Ok(vectors.into_iter().next().unwrap_or_default())
    }
}

/// Deterministic embedding provider for tests and offline CI.
///
/// Vectors are derived from an FNV-1a hash of the input text expanded
/// through a xorshift generator, so identical text yields an identical
/// vector in every process, while distinct texts land on effectively
/// unrelated directions.
///
/// # Examples
///
/// ```rust
/// use ranksmith::embedding::{EmbeddingProvider, MockEmbeddingProvider};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let provider = MockEmbeddingProvider::new();
/// let a = provider.embed("hello").await.unwrap();
/// let b = provider.embed("hello").await.unwrap();
/// assert_eq!(a, b);
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct MockEmbeddingProvider {
    dimension: usize,
}

impl MockEmbeddingProvider {
    /// Matches the dimensionality of common sentence-transformer models.
    pub const DEFAULT_DIMENSION: usize = 384;

    pub fn new() -> Self {
        Self {
            dimension: Self::DEFAULT_DIMENSION,
        }
    }

    pub fn with_dimension(dimension: usize) -> Self {
        Self { dimension }
    }

    fn vector_for(&self, text: &str) -> Vec<f32> {
        // Zero seed would make xorshift emit zeros forever.
        let mut state = fnv1a(text.as_bytes()) | 1;
        (0..self.dimension)
            .map(|_| {
                state = xorshift64(state);
                // Top 53 bits to a float in [-1, 1).
                ((state >> 11) as f64 / (1u64 << 53) as f64).mul_add(2.0, -1.0) as f32
            })
            .collect()
    }
}

impl Default for MockEmbeddingProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbeddingProvider {
    async fn embed_batch(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Ok(inputs.iter().map(|text| self.vector_for(text)).collect())
    }

    fn model_info(&self) -> ModelInfo {
        ModelInfo {
            embedding_dimension: self.dimension,
            max_input_length: 256,
            model_identifier: "mock-embedder".to_string(),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash = 0xcbf2_9ce4_8422_2325u64;
    for &byte in bytes {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

fn xorshift64(mut state: u64) -> u64 {
    state ^= state << 13;
    state ^= state >> 7;
    state ^= state << 17;
    state
}
