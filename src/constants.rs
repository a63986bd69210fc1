//! Global Constants
//!
//! Centralized constants for configuration and tuning.
//! All magic numbers should be defined here with documentation.

/// File chunking constants
pub mod chunking {
    /// Maximum lines per chunk (and the threshold above which chunking
    /// is considered at all)
    pub const CHUNK_SIZE_LINES: usize = 300;

    /// Chunking only kicks in when the excess over the threshold is
    /// strictly greater than this, so a file barely over the limit is
    /// still documented in a single call
    pub const CHUNK_EXCESS_LINES: usize = 50;

    /// Concurrent chunk-level generation calls per file
    pub const CHUNK_CONCURRENCY: usize = 4;
}

/// Generation retry constants
pub mod retry {
    /// Total attempts per generation call (initial call + retries)
    pub const MAX_ATTEMPTS: u32 = 3;

    /// Fixed cooldown after a rate-limit response (seconds)
    pub const RATE_LIMIT_COOLDOWN_SECS: u64 = 60;
}

/// Orchestrator concurrency constants
pub mod orchestrator {
    /// Default worker cap per fan-out pool below the project root
    pub const DEFAULT_DISPATCH_WORKERS: usize = 5;

    /// Default worker cap for the project root's own fan-out pools
    pub const DEFAULT_RUN_WORKERS: usize = 3;
}

/// Network constants
pub mod network {
    /// Per-request timeout for generation calls (seconds)
    pub const DEFAULT_TIMEOUT_SECS: u64 = 300;
}
