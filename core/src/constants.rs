//! constants.rs
//! Chunk sizing defaults shared by the io helpers and the pipeline.

/// Defaults when Option<T> is None
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024; // 64 KiB
/// Common transfer chunk sizes (in bytes)
pub const ALLOWED_CHUNK_SIZES: &[usize] = &[
    4 * 1024,    // 4 KiB
    8 * 1024,    // 8 KiB
    16 * 1024,   // 16 KiB
    32 * 1024,   // 32 KiB
    64 * 1024,   // 64 KiB
    128 * 1024,  // 128 KiB
    256 * 1024,  // 256 KiB
    1024 * 1024, // 1 MiB
];
/// Max chunk size sanity bound (32 MiB).
pub const MAX_CHUNK_SIZE: usize = 32 * 1024 * 1024;

/// Number of chunks allowed in flight between the pipeline reader and writer.
pub const DEFAULT_PIPELINE_DEPTH: usize = 8;

/// How a requested chunk size that is not in `ALLOWED_CHUNK_SIZES` is normalized.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ChunkPolicy {
    /// Smallest allowed size that fits the request.
    #[default]
    RoundUp,
    /// Largest allowed size not above the request.
    RoundDown,
    /// Closest allowed size if within `tolerance` (relative), otherwise round up.
    Nearest { tolerance: f32 },
}
