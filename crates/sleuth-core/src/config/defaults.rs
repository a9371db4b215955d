// Single source of truth for all default values.

// --- Scoring ---
pub const DEFAULT_INITIAL_SCORE: f64 = 1.0;
pub const DEFAULT_MATCH_BOOST: f64 = 1.2;
pub const DEFAULT_ALIVE_BOOST: f64 = 1.2;
pub const DEFAULT_EXCLUSION_BOOST: f64 = 1.1;
pub const DEFAULT_CONTRADICTION_PENALTY: f64 = 0.8;
pub const DEFAULT_REJECTED_GUESS_PENALTY: f64 = 0.5;
pub const DEFAULT_CONFIDENCE_RATIO: f64 = 2.0;
pub const DEFAULT_MIN_GUESS_SCORE: f64 = 1.5;

// --- Session ---
pub const DEFAULT_FINAL_STAGE_POOL_SIZE: usize = 3;
pub const DEFAULT_DONT_KNOW_TOKENS: [&str; 4] = ["idk", "i dont know", "i don't know", "dont know"];

// --- Embeddings ---
pub const DEFAULT_EMBEDDING_PROVIDER: &str = "tfidf";
pub const DEFAULT_EMBEDDING_MODEL: &str = "all-minilm";
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 384;
pub const DEFAULT_EMBEDDING_BATCH_SIZE: usize = 32;
pub const DEFAULT_L1_CACHE_SIZE: u64 = 10_000;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
