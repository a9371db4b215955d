//! # sleuth-embeddings
//!
//! Embedding generation for the hint matcher.
//! Supports a local Ollama server and an always-available TF-IDF fallback.
//!
//! ## Architecture
//!
//! ```text
//! EmbeddingEngine
//! ├── DegradationChain (provider fallback)
//! │   ├── OllamaProvider (local server, MiniLM sentence model)
//! │   └── TfIdfFallback (always available)
//! └── L1MemoryCache (moka, keyed by provider + blake3(text))
//! ```

pub mod cache;
pub mod degradation;
pub mod engine;
pub mod providers;

pub use cache::L1MemoryCache;
pub use degradation::DegradationChain;
pub use engine::EmbeddingEngine;
pub use providers::{OllamaProvider, TfIdfFallback};
