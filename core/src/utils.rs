use crate::constants::{ALLOWED_CHUNK_SIZES, ChunkPolicy, DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE};
use crate::types::CombineError;

/// Normalize a requested chunk size against `ALLOWED_CHUNK_SIZES`.
///
/// - `None` → `DEFAULT_CHUNK_SIZE`.
/// - Exact matches are kept; anything above `MAX_CHUNK_SIZE` clamps to it.
/// - Sizes above the largest allowed entry but within the bound are kept as-is.
pub fn best_chunk_size(requested: Option<usize>, policy: ChunkPolicy) -> usize {
    let size = match requested {
        None => return DEFAULT_CHUNK_SIZE,
        Some(size) => size,
    };
    if size > MAX_CHUNK_SIZE {
        return MAX_CHUNK_SIZE;
    }
    if ALLOWED_CHUNK_SIZES.contains(&size) {
        return size;
    }

    let min_allowed = ALLOWED_CHUNK_SIZES[0];
    let max_allowed = ALLOWED_CHUNK_SIZES[ALLOWED_CHUNK_SIZES.len() - 1];

    if size < min_allowed {
        return min_allowed;
    }
    if size > max_allowed {
        return size;
    }

    let round_up = || {
        ALLOWED_CHUNK_SIZES
            .iter()
            .copied()
            .find(|&allowed| size <= allowed)
            .unwrap_or(max_allowed)
    };

    match policy {
        ChunkPolicy::RoundUp => round_up(),
        ChunkPolicy::RoundDown => ALLOWED_CHUNK_SIZES
            .iter()
            .copied()
            .take_while(|&allowed| allowed <= size)
            .last()
            .unwrap_or(min_allowed),
        ChunkPolicy::Nearest { tolerance } => {
            let closest = ALLOWED_CHUNK_SIZES
                .iter()
                .copied()
                .min_by_key(|&allowed| size.abs_diff(allowed))
                .unwrap_or(min_allowed);
            let rel_diff = size.abs_diff(closest) as f32 / size as f32;
            if rel_diff <= tolerance {
                closest
            } else {
                round_up()
            }
        }
    }
}

/// Reject chunk sizes that can never make progress or exceed the sanity bound.
pub fn validate_chunk_size(size: usize) -> Result<usize, CombineError> {
    if size == 0 || size > MAX_CHUNK_SIZE {
        return Err(CombineError::InvalidChunkSize { requested: size, max: MAX_CHUNK_SIZE });
    }
    Ok(size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_uses_default() {
        assert_eq!(best_chunk_size(None, ChunkPolicy::RoundUp), DEFAULT_CHUNK_SIZE);
        assert_eq!(ChunkPolicy::default(), ChunkPolicy::RoundUp);
    }

    #[test]
    fn exact_sizes_are_kept() {
        for &size in ALLOWED_CHUNK_SIZES {
            assert_eq!(best_chunk_size(Some(size), ChunkPolicy::RoundDown), size);
        }
    }

    #[test]
    fn rounding_policies() {
        let size = 40 * 1024;
        assert_eq!(best_chunk_size(Some(size), ChunkPolicy::RoundUp), 64 * 1024);
        assert_eq!(best_chunk_size(Some(size), ChunkPolicy::RoundDown), 32 * 1024);
        assert_eq!(
            best_chunk_size(Some(size), ChunkPolicy::Nearest { tolerance: 0.25 }),
            32 * 1024
        );
        // 8 KiB away from 32 KiB is 20%, outside a 10% tolerance
        assert_eq!(
            best_chunk_size(Some(size), ChunkPolicy::Nearest { tolerance: 0.10 }),
            64 * 1024
        );
    }

    #[test]
    fn tiny_and_huge_requests_clamp() {
        assert_eq!(best_chunk_size(Some(1), ChunkPolicy::RoundDown), ALLOWED_CHUNK_SIZES[0]);
        assert_eq!(best_chunk_size(Some(usize::MAX), ChunkPolicy::RoundUp), MAX_CHUNK_SIZE);
        assert_eq!(best_chunk_size(Some(3 * 1024 * 1024), ChunkPolicy::RoundUp), 3 * 1024 * 1024);
    }

    #[test]
    fn zero_chunk_is_invalid() {
        assert!(matches!(
            validate_chunk_size(0),
            Err(CombineError::InvalidChunkSize { requested: 0, .. })
        ));
        assert_eq!(validate_chunk_size(1).unwrap(), 1);
    }
}
